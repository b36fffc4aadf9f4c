//! Session lookup and path authorization.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use crate::auth::{Challenge, Requirement};
use crate::error::AppError;
use crate::storage::Storage;
use crate::AppState;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "LISTINGS_SESSION";

/// Cookie handed out after a successful login
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Gate every request through the access policy.
///
/// Protected paths need a live session; its principal is attached to the
/// request extensions for the handlers.
pub async fn authorize<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    if state.policy.evaluate(&path) == Requirement::PermitAll {
        return next.run(request).await;
    }

    let principal = match jar.get(SESSION_COOKIE) {
        Some(cookie) => state.sessions.get(cookie.value()).await,
        None => None,
    };

    match principal {
        Some(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        },
        None => {
            debug!(%path, "rejected unauthenticated request");
            match state.policy.challenge(&path) {
                Challenge::Redirect(to) => Redirect::to(to).into_response(),
                Challenge::Unauthorized => AppError::Unauthenticated.into_response(),
            }
        },
    }
}
