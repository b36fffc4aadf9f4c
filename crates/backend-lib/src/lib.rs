// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core functionality for the property listings server.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod model;
pub mod router;
pub mod storage;

use std::sync::Arc;

use listings_common::Role;
use tracing::info;

use crate::auth::token_generator::generate_secure_token;
use crate::auth::{AccessPolicy, CredentialVerifier, SessionManager};
use crate::config::Settings;
use crate::error::AppError;
use crate::model::User;
use crate::storage::Storage;

pub use crate::router::create_router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Storage backend
    pub storage: S,
    /// Session manager
    pub sessions: SessionManager,
    /// Password hashing and verification
    pub verifier: Arc<dyn CredentialVerifier>,
    /// Path authorization rules
    pub policy: Arc<AccessPolicy>,
    /// Settings the state was built from
    pub settings: Arc<Settings>,
    /// Hash of a random secret, checked when the username is unknown
    decoy_hash: Arc<str>,
}

impl<S: Storage> AppState<S> {
    /// Create a new application state
    pub fn new(storage: S, settings: Settings) -> anyhow::Result<Self> {
        let verifier = Arc::new(settings.verifier()?);
        let sessions = SessionManager::new(settings.session_ttl());
        let decoy_hash = verifier.hash(&mut generate_secure_token())?;

        Ok(Self {
            storage,
            sessions,
            verifier,
            policy: Arc::new(AccessPolicy::default()),
            settings: Arc::new(settings),
            decoy_hash: decoy_hash.into(),
        })
    }

    /// Hash on the blocking pool; scrypt is deliberately slow
    pub async fn hash_password(&self, mut plain: String) -> Result<String, AppError> {
        let verifier = Arc::clone(&self.verifier);
        tokio::task::spawn_blocking(move || verifier.hash(&mut plain)).await?
    }

    /// Verify on the blocking pool
    pub async fn check_password(&self, plain: String, hash: String) -> Result<bool, AppError> {
        let verifier = Arc::clone(&self.verifier);
        Ok(tokio::task::spawn_blocking(move || verifier.matches(&plain, &hash)).await?)
    }

    /// Spend one verification on a password that cannot match
    pub async fn check_unknown_user(&self, plain: String) -> Result<(), AppError> {
        self.check_password(plain, self.decoy_hash.to_string()).await?;
        Ok(())
    }

    /// Insert every configured principal whose username is not taken yet.
    ///
    /// Returns how many accounts were created.
    pub async fn seed_principals(&self) -> Result<usize, AppError> {
        let mut created = 0;
        for seed in &self.settings.principals {
            if self.storage.find_user_by_username(&seed.username).await?.is_some() {
                continue;
            }
            let hash = self.hash_password(seed.password.clone()).await?;
            let user = self
                .storage
                .save_user(User::new(seed.username.clone(), hash, seed.role))
                .await?;
            info!(username = %user.username, role = %user.role, "seeded principal");
            created += 1;
        }
        Ok(created)
    }
}

/// Role given to self-registered accounts
pub const DEFAULT_ROLE: Role = Role::User;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PasswordHashSettings, PrincipalSeed};
    use crate::storage::MemoryStorage;

    fn settings() -> Settings {
        Settings {
            password_hash: PasswordHashSettings { log_n: 4, r: 8, p: 1 },
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let state = AppState::new(MemoryStorage::new(), settings()).unwrap();
        assert_eq!(state.seed_principals().await.unwrap(), 2);
        assert_eq!(state.seed_principals().await.unwrap(), 0);

        let admin = state.storage.find_user_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(state
            .check_password("admin123".to_string(), admin.password.clone())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_decoy_hash_uses_configured_cost() {
        let state = AppState::new(MemoryStorage::new(), settings()).unwrap();
        assert!(state.decoy_hash.starts_with("$scrypt$ln=4,"));
        assert!(!state
            .check_password(String::new(), state.decoy_hash.to_string())
            .await
            .unwrap());
        state.check_unknown_user("anything".to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn test_seeding_skips_taken_usernames() {
        let mut settings = settings();
        settings.principals = vec![PrincipalSeed {
            username: "alice".to_string(),
            password: "seeded".to_string(),
            role: Role::Admin,
        }];
        let state = AppState::new(MemoryStorage::new(), settings).unwrap();
        state
            .storage
            .save_user(User::new("alice", "existing-hash", Role::User))
            .await
            .unwrap();

        assert_eq!(state.seed_principals().await.unwrap(), 0);
        let alice = state.storage.find_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(alice.password, "existing-hash");
        assert_eq!(alice.role, Role::User);
    }
}
