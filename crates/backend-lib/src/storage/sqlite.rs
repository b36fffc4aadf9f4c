// ============================
// crates/backend-lib/src/storage/sqlite.rs
// ============================
//! SQLite implementation of the `Storage` trait.
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use listings_common::{EntityId, Property, Role};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, info};

use super::{schema, Storage};
use crate::error::AppError;
use crate::model::{property_with_id, NewProperty, User};

/// Durable storage over a pooled SQLite database
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Connect to `url` (e.g. `sqlite://data/listings.db`), creating the file and tables if needed
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        let storage = Self { pool };
        storage.migrate().await?;
        info!(url, max_connections, "connected to sqlite store");
        Ok(storage)
    }

    /// Private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` opens its own database, so the
    /// pool is pinned to one connection that never idles out.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let storage = Self { pool };
        storage.migrate().await?;
        Ok(storage)
    }

    /// Underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<(), AppError> {
        for ddl in schema::ALL {
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, AppError> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: Some(row.try_get("id")?),
        username: row.try_get("username")?,
        password: row.try_get("password")?,
        role: Role::from_str(&role).map_err(AppError::Storage)?,
    })
}

fn property_from_row(row: &SqliteRow) -> Result<Property, AppError> {
    Ok(Property {
        id: row.try_get("id")?,
        address: row.try_get("address")?,
        price: row.try_get("price")?,
        size: row.try_get("size")?,
        description: row.try_get("description")?,
    })
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, username, password, role FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user_by_id(&self, id: EntityId) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, username, password, role FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn save_user(&self, mut user: User) -> Result<User, AppError> {
        match user.id {
            None => {
                let id = sqlx::query("INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)")
                    .bind(&user.username)
                    .bind(&user.password)
                    .bind(user.role.as_str())
                    .execute(&self.pool)
                    .await?
                    .last_insert_rowid();
                debug!(user_id = id, username = %user.username, "inserted user");
                user.id = Some(id);
            },
            Some(id) => {
                let updated = sqlx::query(
                    "UPDATE users SET username = ?1, password = ?2, role = ?3 WHERE id = ?4",
                )
                .bind(&user.username)
                .bind(&user.password)
                .bind(user.role.as_str())
                .bind(id)
                .execute(&self.pool)
                .await?
                .rows_affected();
                if updated == 0 {
                    return Err(AppError::Storage(format!("no user with id {id}")));
                }
            },
        }
        Ok(user)
    }

    async fn find_property(&self, id: EntityId) -> Result<Option<Property>, AppError> {
        let row = sqlx::query(
            "SELECT id, address, price, size, description FROM properties WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(property_from_row).transpose()
    }

    async fn find_all_properties(&self) -> Result<Vec<Property>, AppError> {
        let rows = sqlx::query(
            "SELECT id, address, price, size, description FROM properties ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(property_from_row).collect()
    }

    async fn save_property(&self, property: NewProperty) -> Result<Property, AppError> {
        let NewProperty { id, fields } = property;
        let id = match id {
            None => sqlx::query(
                "INSERT INTO properties (address, price, size, description) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&fields.address)
            .bind(fields.price)
            .bind(fields.size)
            .bind(&fields.description)
            .execute(&self.pool)
            .await?
            .last_insert_rowid(),
            Some(id) => {
                let updated = sqlx::query(
                    "UPDATE properties SET address = ?1, price = ?2, size = ?3, description = ?4 WHERE id = ?5",
                )
                .bind(&fields.address)
                .bind(fields.price)
                .bind(fields.size)
                .bind(&fields.description)
                .bind(id)
                .execute(&self.pool)
                .await?
                .rows_affected();
                if updated == 0 {
                    return Err(AppError::NotFound);
                }
                id
            },
        };
        Ok(property_with_id(id, fields))
    }

    async fn delete_property(&self, property: &Property) -> Result<(), AppError> {
        sqlx::query("DELETE FROM properties WHERE id = ?1")
            .bind(property.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
