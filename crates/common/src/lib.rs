// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! exchanged between the listings web client and the server.
//! Everything in here is a wire shape; persistence-only data stays in the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-generated entity identifier
pub type EntityId = i64;

/// A property listing as returned to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Property {
    /// Generated identifier
    pub id: EntityId,
    /// Street address
    pub address: String,
    /// Asking price
    pub price: f64,
    /// Floor area
    pub size: f64,
    /// Free-text description
    pub description: String,
}

/// Client-supplied property fields for create and replace.
///
/// Unknown fields (including any `id`) are ignored and missing fields fall
/// back to their defaults; nothing here is validated.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PropertyPayload {
    pub address: String,
    pub price: f64,
    pub size: f64,
    pub description: String,
}

/// Username and plaintext password, used by login, form login and registration
#[derive(Serialize, Deserialize, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Role attached to a user
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Canonical upper-case name, as stored and serialized
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Public view of a user. Carries no credential material.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserView {
    pub id: EntityId,
    pub username: String,
    pub role: Role,
}
