//! End-to-end flows through the full router: registration, login and property CRUD.

mod test_utils;

use axum::http::{header, StatusCode};
use listings_common::{Property, Role, UserView};
use serde_json::{json, Value};
use test_utils::*;

#[tokio::test]
async fn test_documented_scenario() {
    let (app, _state) = setup_test_app().await;

    let response = register(&app, "alice", "s3cret").await;
    assert_eq!(response.status(), StatusCode::OK);
    let raw: Value = json_body(response).await;
    assert_eq!(raw["id"], 1);
    assert_eq!(raw["username"], "alice");
    assert!(raw.get("password").is_none());

    let response = login(&app, "alice", "s3cret").await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap();

    let response = login(&app, "alice", "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let property = json!({
        "address": "1 Main St",
        "price": 100000,
        "size": 80,
        "description": "flat"
    });
    let response = send(&app, json_request("POST", "/api/properties", Some(property), Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created: Property = json_body(response).await;
    assert_eq!(created.id, 1);

    let response = send(&app, json_request("GET", "/api/properties/2", None, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registered_password_is_hashed() {
    let (app, state) = setup_test_app().await;
    let view: UserView = json_body(register(&app, "bob", "hunter2").await).await;
    assert_eq!(view.role, Role::User);

    use backend_lib::storage::Storage;
    let stored = state.storage.find_user_by_username("bob").await.unwrap().unwrap();
    assert_ne!(stored.password, "hunter2");
    assert!(stored.password.starts_with("$scrypt$"));
}

#[tokio::test]
async fn test_login_response_omits_password() {
    let (app, _state) = setup_test_app().await;
    register(&app, "carol", "pw").await;

    let response = login(&app, "carol", "pw").await;
    assert_eq!(response.status(), StatusCode::OK);
    let raw: Value = json_body(response).await;
    assert_eq!(raw, json!({ "id": 1, "username": "carol", "role": "USER" }));
}

#[tokio::test]
async fn test_failed_logins_answer_plain_text() {
    let (app, _state) = setup_test_app().await;
    register(&app, "dave", "right").await;

    for (user, password) in [("dave", "wrong"), ("nobody", "right")] {
        let response = login(&app, user, password).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(session_cookie(&response).is_none());
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_bytes(response).await, b"Login failed");
    }
}

#[tokio::test]
async fn test_duplicate_registration_is_a_storage_error() {
    let (app, _state) = setup_test_app().await;
    assert_eq!(register(&app, "erin", "a").await.status(), StatusCode::OK);
    assert_eq!(
        register(&app, "erin", "b").await.status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );

    // The first account is untouched
    assert_eq!(login(&app, "erin", "a").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (app, _state) = setup_test_app().await;
    let cookie = signed_in(&app, "alice", "s3cret").await;

    let sent = json!({
        "id": 99,
        "address": "22 Acacia Ave",
        "price": 250000.5,
        "size": 112.25,
        "description": "semi-detached"
    });
    let created: Property = json_body(
        send(&app, json_request("POST", "/api/properties", Some(sent), Some(&cookie))).await,
    )
    .await;
    // Client-supplied ids are ignored
    assert_eq!(created.id, 1);

    let response = send(&app, json_request("GET", "/api/properties/1", None, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Property = json_body(response).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched.address, "22 Acacia Ave");
    assert_eq!(fetched.price, 250000.5);
    assert_eq!(fetched.size, 112.25);
    assert_eq!(fetched.description, "semi-detached");
}

#[tokio::test]
async fn test_put_replaces_fields_and_keeps_id() {
    let (app, _state) = setup_test_app().await;
    let cookie = signed_in(&app, "alice", "s3cret").await;

    let original = json!({ "address": "a", "price": 1, "size": 2, "description": "d" });
    send(&app, json_request("POST", "/api/properties", Some(original), Some(&cookie))).await;

    let replacement = json!({ "id": 7, "address": "b", "price": 3, "size": 4, "description": "e" });
    let response = send(&app, json_request("PUT", "/api/properties/1", Some(replacement), Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Property = json_body(response).await;
    assert_eq!(
        updated,
        Property { id: 1, address: "b".into(), price: 3.0, size: 4.0, description: "e".into() }
    );

    let fetched: Property = json_body(
        send(&app, json_request("GET", "/api/properties/1", None, Some(&cookie))).await,
    )
    .await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let (app, _state) = setup_test_app().await;
    let cookie = signed_in(&app, "alice", "s3cret").await;
    let payload = json!({ "address": "x", "price": 1, "size": 1, "description": "" });

    for (method, body) in [("GET", None), ("PUT", Some(payload)), ("DELETE", None)] {
        let response = send(&app, json_request(method, "/api/properties/42", body, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method}");
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn test_delete_then_gone() {
    let (app, _state) = setup_test_app().await;
    let cookie = signed_in(&app, "alice", "s3cret").await;
    let payload = json!({ "address": "x", "price": 1, "size": 1, "description": "" });
    send(&app, json_request("POST", "/api/properties", Some(payload), Some(&cookie))).await;

    let response = send(&app, json_request("DELETE", "/api/properties/1", None, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let response = send(&app, json_request("DELETE", "/api/properties/1", None, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_all_in_id_order() {
    let (app, _state) = setup_test_app().await;
    let cookie = signed_in(&app, "alice", "s3cret").await;

    let empty: Vec<Property> = json_body(
        send(&app, json_request("GET", "/api/properties", None, Some(&cookie))).await,
    )
    .await;
    assert!(empty.is_empty());

    for address in ["one", "two", "three"] {
        let payload = json!({ "address": address, "price": 1, "size": 1, "description": "" });
        send(&app, json_request("POST", "/api/properties", Some(payload), Some(&cookie))).await;
    }

    let all: Vec<Property> = json_body(
        send(&app, json_request("GET", "/api/properties", None, Some(&cookie))).await,
    )
    .await;
    let summary: Vec<_> = all.iter().map(|p| (p.id, p.address.as_str())).collect();
    assert_eq!(summary, vec![(1, "one"), (2, "two"), (3, "three")]);
}

#[tokio::test]
async fn test_missing_fields_default_and_negative_values_pass() {
    let (app, _state) = setup_test_app().await;
    let cookie = signed_in(&app, "alice", "s3cret").await;

    let payload = json!({ "address": "bare", "price": -5 });
    let response = send(&app, json_request("POST", "/api/properties", Some(payload), Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created: Property = json_body(response).await;
    assert_eq!(created.price, -5.0);
    assert_eq!(created.size, 0.0);
    assert_eq!(created.description, "");
}
