// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const LOGIN_SUCCESS: &str = "auth.login.succeeded";
pub const LOGIN_FAILURE: &str = "auth.login.failed";
pub const USER_REGISTERED: &str = "auth.register";
pub const SESSION_CREATED: &str = "session.created";
pub const SESSION_EXPIRED: &str = "session.expired";
pub const SESSION_ACTIVE: &str = "session.active";
pub const PROPERTY_CREATED: &str = "property.created";
pub const PROPERTY_UPDATED: &str = "property.updated";
pub const PROPERTY_DELETED: &str = "property.deleted";
