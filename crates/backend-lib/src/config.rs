// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use listings_common::Role;
use serde::{Deserialize, Serialize};

use crate::auth::{ScryptVerifier, MAX_SESSION_TTL};

/// Prefix for environment overrides, e.g. `LISTINGS_BIND_ADDR`
pub const ENV_PREFIX: &str = "LISTINGS_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// sqlx connection URL
    pub database_url: String,
    /// Upper bound of the connection pool
    pub max_connections: u32,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Session TTL in seconds
    pub session_ttl_secs: u64,
    /// How often expired sessions are purged
    pub session_cleanup_secs: u64,
    /// scrypt cost for newly hashed passwords
    pub password_hash: PasswordHashSettings,
    /// Accounts inserted at startup when missing
    pub principals: Vec<PrincipalSeed>,
}

/// scrypt cost parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PasswordHashSettings {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

/// A bootstrap account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalSeed {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database_url: "sqlite://listings.db".to_string(),
            max_connections: 5,
            log_level: "info".to_string(),
            session_ttl_secs: 60 * 60 * 24 * 7, // 7 days
            session_cleanup_secs: 60 * 60,
            password_hash: PasswordHashSettings::default(),
            principals: vec![
                PrincipalSeed {
                    username: "user".to_string(),
                    password: "password".to_string(),
                    role: Role::User,
                },
                PrincipalSeed {
                    username: "admin".to_string(),
                    password: "admin123".to_string(),
                    role: Role::Admin,
                },
            ],
        }
    }
}

impl Default for PasswordHashSettings {
    fn default() -> Self {
        // scrypt's recommended interactive cost
        Self { log_n: 17, r: 8, p: 1 }
    }
}

impl Settings {
    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!("unknown log level: {}", self.log_level);
        }
        if self.session_ttl_secs == 0 {
            bail!("session_ttl_secs must be positive");
        }
        if self.session_ttl() > MAX_SESSION_TTL {
            bail!(
                "session_ttl_secs must not exceed {} seconds",
                MAX_SESSION_TTL.as_secs()
            );
        }
        if self.session_cleanup_secs == 0 {
            bail!("session_cleanup_secs must be positive");
        }
        if self.max_connections == 0 {
            bail!("max_connections must be positive");
        }
        if let Some(seed) = self.principals.iter().find(|p| p.username.trim().is_empty()) {
            bail!("principal with empty username (role {})", seed.role);
        }
        self.verifier()?;
        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn session_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.session_cleanup_secs)
    }

    /// Credential verifier with the configured cost
    pub fn verifier(&self) -> Result<ScryptVerifier> {
        let PasswordHashSettings { log_n, r, p } = self.password_hash;
        Ok(ScryptVerifier::from_cost(log_n, r, p)?)
    }
}

/// Load settings from defaults, config files and the environment.
///
/// Later sources win: defaults, `listings.{toml,yaml,json}` in the working
/// directory, the explicit `path` if given, then `LISTINGS_*` variables
/// (nested keys separated by `__`, e.g. `LISTINGS_PASSWORD_HASH__LOG_N`).
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()))
        .merge(Toml::file("listings.toml"))
        .merge(Yaml::file("listings.yaml"))
        .merge(Json::file("listings.json"));

    if let Some(path) = path {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => figment.merge(Toml::file(path)),
        };
    }

    let settings: Settings = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    settings.validate()?;
    Ok(settings)
}
