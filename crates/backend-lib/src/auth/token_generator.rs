// ============================
// crates/backend-lib/src/auth/token_generator.rs
// ============================
//! Opaque session identifiers drawn from the operating system RNG.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};

/// Random bytes behind a session cookie value
const SESSION_TOKEN_BYTES: usize = 32;

/// Fresh session token: 32 random bytes, base64url without padding (43 chars)
pub fn generate_secure_token() -> String {
    generate_secure_token_with_size(SESSION_TOKEN_BYTES)
}

/// Token carrying `bytes` random bytes
pub fn generate_secure_token_with_size(bytes: usize) -> String {
    let mut raw = vec![0u8; bytes];
    OsRng.fill_bytes(&mut raw);
    URL_SAFE_NO_PAD.encode(raw)
}
