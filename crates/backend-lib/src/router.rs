// ============================
// crates/backend-lib/src/router.rs
// ============================
//! Route table and middleware stack.
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{login, pages, properties};
use crate::middleware::authorize;
use crate::storage::Storage;
use crate::AppState;

/// Create the application router
pub fn create_router<S: Storage + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login_page).post(login::form_login::<S>))
        .route("/logout", post(login::logout::<S>))
        .route("/script.js", get(pages::script))
        .route("/api/login", post(login::login::<S>))
        .route("/api/login/register", post(login::register::<S>))
        .route(
            "/api/properties",
            get(properties::list::<S>).post(properties::create::<S>),
        )
        .route(
            "/api/properties/{id}",
            get(properties::get_one::<S>)
                .put(properties::update::<S>)
                .delete(properties::delete::<S>),
        )
        .layer(middleware::from_fn_with_state(state.clone(), authorize::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
