// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};
use zeroize::Zeroize;

/// Hash a password using scrypt with explicit cost parameters.
///
/// The result is a PHC string carrying its own salt and parameters.
pub fn hash_password_with(plain: &str, params: Params) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a password against a hash
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Securely hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String, params: Params) -> anyhow::Result<String> {
    let hash = hash_password_with(plain, params);
    plain.zeroize();
    hash
}
