//! Embedded browser pages.
use axum::{http::header, response::{Html, IntoResponse}};

const INDEX_HTML: &str = include_str!("../../static/index.html");
const LOGIN_HTML: &str = include_str!("../../static/login.html");
const SCRIPT_JS: &str = include_str!("../../static/script.js");

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /login`
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

/// `GET /script.js`
pub async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], SCRIPT_JS)
}
