// ============================
// crates/backend-lib/src/handlers/properties.rs
// ============================
//! Property CRUD under `/api/properties`.
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use listings_common::{EntityId, Property, PropertyPayload};
use metrics::counter;
use tracing::info;

use crate::auth::Principal;
use crate::error::AppError;
use crate::metrics::{PROPERTY_CREATED, PROPERTY_DELETED, PROPERTY_UPDATED};
use crate::model::apply_payload;
use crate::storage::Storage;
use crate::AppState;

async fn existing<S: Storage>(state: &AppState<S>, id: EntityId) -> Result<Property, AppError> {
    state.storage.find_property(id).await?.ok_or(AppError::NotFound)
}

/// `GET /api/properties`
pub async fn list<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Property>>, AppError> {
    Ok(Json(state.storage.find_all_properties().await?))
}

/// `GET /api/properties/{id}`
pub async fn get_one<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<EntityId>,
) -> Result<Json<Property>, AppError> {
    Ok(Json(existing(&state, id).await?))
}

/// `POST /api/properties`
pub async fn create<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<PropertyPayload>,
) -> Result<Json<Property>, AppError> {
    let property = state.storage.save_property(payload.into()).await?;

    counter!(PROPERTY_CREATED).increment(1);
    info!(property_id = property.id, user = %principal.username, "created property");
    Ok(Json(property))
}

/// `PUT /api/properties/{id}`
pub async fn update<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<EntityId>,
    Json(payload): Json<PropertyPayload>,
) -> Result<Json<Property>, AppError> {
    let mut property = existing(&state, id).await?;
    apply_payload(&mut property, payload);
    let property = state.storage.save_property(property.into()).await?;

    counter!(PROPERTY_UPDATED).increment(1);
    info!(property_id = id, user = %principal.username, "updated property");
    Ok(Json(property))
}

/// `DELETE /api/properties/{id}`
pub async fn delete<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<EntityId>,
) -> Result<StatusCode, AppError> {
    let property = existing(&state, id).await?;
    state.storage.delete_property(&property).await?;

    counter!(PROPERTY_DELETED).increment(1);
    info!(property_id = id, user = %principal.username, "deleted property");
    Ok(StatusCode::NO_CONTENT)
}
