// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the listings server.

pub mod authorize;

pub use authorize::{authorize, session_cookie, SESSION_COOKIE};
