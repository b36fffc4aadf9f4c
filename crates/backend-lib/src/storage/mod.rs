// ============================
// crates/backend-lib/src/storage/mod.rs
// ============================
//! Storage abstraction with SQLite and in-memory implementations.
use async_trait::async_trait;
use listings_common::{EntityId, Property};
use crate::error::AppError;
use crate::model::{NewProperty, User};

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Trait for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Look a user up by exact username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Look a user up by id
    async fn find_user_by_id(&self, id: EntityId) -> Result<Option<User>, AppError>;

    /// Insert the user if it has no id, otherwise update it
    async fn save_user(&self, user: User) -> Result<User, AppError>;

    /// Look a property up by id
    async fn find_property(&self, id: EntityId) -> Result<Option<Property>, AppError>;

    /// All properties, ascending by id
    async fn find_all_properties(&self) -> Result<Vec<Property>, AppError>;

    /// Insert the property if it has no id, otherwise update it.
    ///
    /// Updating an id that is no longer stored yields `AppError::NotFound`.
    async fn save_property(&self, property: NewProperty) -> Result<Property, AppError>;

    /// Remove a stored property
    async fn delete_property(&self, property: &Property) -> Result<(), AppError>;
}
