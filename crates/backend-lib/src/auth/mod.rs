// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication and authorization.

pub mod password;
pub mod policy;
pub mod session;
pub mod token_generator;
mod verifier;

pub use password::{hash_password_secure, hash_password_with, verify_password};
pub use policy::{AccessPolicy, AccessRule, Challenge, PathPattern, Requirement};
pub use session::{Principal, Session, SessionManager, MAX_SESSION_TTL, SESSION_TTL};
pub use verifier::{CredentialVerifier, ScryptVerifier};
