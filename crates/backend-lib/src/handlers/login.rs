// ============================
// crates/backend-lib/src/handlers/login.rs
// ============================
//! Login, registration and logout.
use std::sync::Arc;

use axum::{
    extract::State,
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use listings_common::{Credentials, UserView};
use metrics::counter;
use tracing::{info, warn};

use crate::auth::Principal;
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILURE, LOGIN_SUCCESS, USER_REGISTERED};
use crate::middleware::{session_cookie, SESSION_COOKIE};
use crate::model::User;
use crate::storage::Storage;
use crate::{AppState, DEFAULT_ROLE};

/// Resolve credentials to a stored user.
///
/// Unknown usernames and wrong passwords fail the same way and both cost one
/// scrypt verification.
async fn authenticate<S: Storage>(
    state: &AppState<S>,
    credentials: Credentials,
) -> Result<User, AppError> {
    let Credentials { username, password } = credentials;

    let Some(user) = state.storage.find_user_by_username(&username).await? else {
        state.check_unknown_user(password).await?;
        counter!(LOGIN_FAILURE).increment(1);
        warn!(%username, "login failed: unknown user");
        return Err(AppError::InvalidCredentials);
    };

    if !state.check_password(password, user.password.clone()).await? {
        counter!(LOGIN_FAILURE).increment(1);
        warn!(%username, "login failed: password mismatch");
        return Err(AppError::InvalidCredentials);
    }

    counter!(LOGIN_SUCCESS).increment(1);
    info!(%username, role = %user.role, "login succeeded");
    Ok(user)
}

async fn open_session<S: Storage>(
    state: &AppState<S>,
    jar: CookieJar,
    user: &User,
) -> Result<CookieJar, AppError> {
    let token = state.sessions.create(Principal::from_user(user)).await?;
    Ok(jar.add(session_cookie(token)))
}

/// `POST /api/login`
pub async fn login<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<(CookieJar, Json<UserView>), AppError> {
    let user = authenticate(&state, credentials).await?;
    let jar = open_session(&state, jar, &user).await?;
    Ok((jar, Json(user.view())))
}

/// `POST /api/login/register`
pub async fn register<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<UserView>, AppError> {
    let Credentials { username, password } = credentials;
    let hash = state.hash_password(password).await?;
    let user = state
        .storage
        .save_user(User::new(username, hash, DEFAULT_ROLE))
        .await?;

    counter!(USER_REGISTERED).increment(1);
    info!(user_id = user.id, username = %user.username, "registered user");
    Ok(Json(user.view()))
}

/// `POST /login` from the HTML form
pub async fn form_login<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    Form(credentials): Form<Credentials>,
) -> Result<(CookieJar, Redirect), AppError> {
    match authenticate(&state, credentials).await {
        Ok(user) => {
            let jar = open_session(&state, jar, &user).await?;
            Ok((jar, Redirect::to("/")))
        },
        Err(AppError::InvalidCredentials) => Ok((jar, Redirect::to("/login?error"))),
        Err(e) => Err(e),
    }
}

/// `POST /logout`
pub async fn logout<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if state.sessions.remove(cookie.value()).await {
            info!("session closed");
        }
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/login?logout"))
}
