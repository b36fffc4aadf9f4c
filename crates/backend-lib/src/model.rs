// ============================
// crates/backend-lib/src/model.rs
// ============================
//! Persisted entities.
//!
//! `Property` lives in `listings-common` because it crosses the wire as-is;
//! `User` stays here since its password hash must never leave the server.
use listings_common::{EntityId, Property, PropertyPayload, Role, UserView};

/// A stored account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// `None` until the store assigns an id
    pub id: Option<EntityId>,
    pub username: String,
    /// PHC-encoded scrypt hash
    pub password: String,
    pub role: Role,
}

impl User {
    /// New, not yet persisted user with an already hashed password
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: password_hash.into(),
            role,
        }
    }

    /// Public projection without the password hash.
    ///
    /// Unsaved users project with id 0.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id.unwrap_or_default(),
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// A property record that may not have been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub id: Option<EntityId>,
    pub fields: PropertyPayload,
}

impl From<PropertyPayload> for NewProperty {
    fn from(fields: PropertyPayload) -> Self {
        Self { id: None, fields }
    }
}

impl From<Property> for NewProperty {
    fn from(p: Property) -> Self {
        Self {
            id: Some(p.id),
            fields: PropertyPayload {
                address: p.address,
                price: p.price,
                size: p.size,
                description: p.description,
            },
        }
    }
}

/// Overwrite the four mutable fields, keeping the id
pub fn apply_payload(property: &mut Property, payload: PropertyPayload) {
    property.address = payload.address;
    property.price = payload.price;
    property.size = payload.size;
    property.description = payload.description;
}

pub(crate) fn property_with_id(id: EntityId, fields: PropertyPayload) -> Property {
    Property {
        id,
        address: fields.address,
        price: fields.price,
        size: fields.size,
        description: fields.description,
    }
}
