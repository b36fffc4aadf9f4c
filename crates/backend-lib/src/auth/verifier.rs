// ============================
// crates/backend-lib/src/auth/verifier.rs
// ============================
//! Credential verification seam used by the handlers.
use scrypt::Params;

use super::password::{hash_password_secure, verify_password};
use crate::error::AppError;

/// One-way salted hashing of credentials
pub trait CredentialVerifier: Send + Sync {
    /// Hash a plaintext password; the buffer is wiped afterwards
    fn hash(&self, plain: &mut String) -> Result<String, AppError>;

    /// True iff `plain` hashes to `hash` under the same scheme
    fn matches(&self, plain: &str, hash: &str) -> bool;
}

/// scrypt-backed verifier with configurable cost
#[derive(Debug, Clone)]
pub struct ScryptVerifier {
    params: Params,
}

impl ScryptVerifier {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Build from raw cost parameters
    pub fn from_cost(log_n: u8, r: u32, p: u32) -> Result<Self, AppError> {
        let params = Params::new(log_n, r, p, Params::RECOMMENDED_LEN)
            .map_err(|e| AppError::InvalidInput(format!("scrypt parameters: {e}")))?;
        Ok(Self::new(params))
    }
}

impl Default for ScryptVerifier {
    fn default() -> Self {
        Self::new(Params::recommended())
    }
}

impl CredentialVerifier for ScryptVerifier {
    fn hash(&self, plain: &mut String) -> Result<String, AppError> {
        hash_password_secure(plain, self.params)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
    }

    fn matches(&self, plain: &str, hash: &str) -> bool {
        verify_password(hash, plain)
    }
}
