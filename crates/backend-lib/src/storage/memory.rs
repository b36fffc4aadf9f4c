// ============================
// crates/backend-lib/src/storage/memory.rs
// ============================
//! In-process storage, mirroring the SQLite table semantics.
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use listings_common::{EntityId, Property};
use parking_lot::RwLock;

use super::Storage;
use crate::error::AppError;
use crate::model::{property_with_id, NewProperty, User};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<EntityId, User>,
    properties: BTreeMap<EntityId, Property>,
    last_user_id: EntityId,
    last_property_id: EntityId,
}

/// Non-durable storage backed by ordered maps
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read();
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: EntityId) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn save_user(&self, mut user: User) -> Result<User, AppError> {
        let mut tables = self.tables.write();

        // Same guard as the UNIQUE column in SQLite
        let taken = tables
            .users
            .values()
            .any(|u| u.username == user.username && u.id != user.id);
        if taken {
            return Err(AppError::Storage(format!(
                "UNIQUE constraint failed: users.username ({})",
                user.username
            )));
        }

        let id = match user.id {
            Some(id) if tables.users.contains_key(&id) => id,
            Some(id) => return Err(AppError::Storage(format!("no user with id {id}"))),
            None => {
                tables.last_user_id += 1;
                tables.last_user_id
            },
        };
        user.id = Some(id);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_property(&self, id: EntityId) -> Result<Option<Property>, AppError> {
        Ok(self.tables.read().properties.get(&id).cloned())
    }

    async fn find_all_properties(&self) -> Result<Vec<Property>, AppError> {
        Ok(self.tables.read().properties.values().cloned().collect())
    }

    async fn save_property(&self, property: NewProperty) -> Result<Property, AppError> {
        let mut tables = self.tables.write();
        let id = match property.id {
            Some(id) if tables.properties.contains_key(&id) => id,
            Some(_) => return Err(AppError::NotFound),
            None => {
                tables.last_property_id += 1;
                tables.last_property_id
            },
        };
        let stored = property_with_id(id, property.fields);
        tables.properties.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_property(&self, property: &Property) -> Result<(), AppError> {
        self.tables.write().properties.remove(&property.id);
        Ok(())
    }
}
