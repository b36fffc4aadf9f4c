// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session token handling and management.
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

use listings_common::{EntityId, Role};
use metrics::{counter, gauge};
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::debug;

use super::token_generator::generate_secure_token;
use crate::error::AppError;
use crate::metrics::{SESSION_ACTIVE, SESSION_CREATED, SESSION_EXPIRED};
use crate::model::User;

/// Default session TTL (time to live)
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7); // 7 days

/// Longest TTL accepted from configuration
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Authenticated identity attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: EntityId,
    pub username: String,
    pub role: Role,
}

impl Principal {
    /// Principal for a stored user
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id.unwrap_or_default(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// Session information
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: Principal,
    pub expires_at: SystemTime,
}

/// Session manager for handling authentication tokens
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SESSION_TTL)
    }
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(ttl: Duration) -> Self {
        SessionManager {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Create a new session and return its token
    pub async fn create(&self, principal: Principal) -> Result<String, AppError> {
        let expires_at = SystemTime::now().checked_add(self.ttl).ok_or_else(|| {
            AppError::Internal(format!("session ttl {:?} overflows the clock", self.ttl))
        })?;
        let token = generate_secure_token();
        let session = Session { principal, expires_at };

        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);

        counter!(SESSION_CREATED).increment(1);
        gauge!(SESSION_ACTIVE).set(sessions.len() as f64);

        Ok(token)
    }

    /// Principal for a live session; expired sessions are treated as absent
    pub async fn get(&self, token: &str) -> Option<Principal> {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .filter(|session| SystemTime::now() < session.expires_at)
            .map(|session| session.principal.clone())
    }

    /// Drop a session, returning whether it existed
    pub async fn remove(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(token).is_some();
        gauge!(SESSION_ACTIVE).set(sessions.len() as f64);
        removed
    }

    /// Remove expired sessions, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = SystemTime::now();
        let before_count = sessions.len();

        sessions.retain(|_, session| now < session.expires_at);

        let after_count = sessions.len();
        let removed = before_count - after_count;

        if removed > 0 {
            counter!(SESSION_EXPIRED).increment(removed as u64);
            gauge!(SESSION_ACTIVE).set(after_count as f64);
            debug!(removed, "purged expired sessions");
        }
        removed
    }

    /// Spawn the periodic purge task
    pub fn spawn_cleanup(&self, every: Duration) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                manager.purge_expired().await;
            }
        })
    }
}
