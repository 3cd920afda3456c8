//! Integration tests for the `/api/users` document routes.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::{CONTINUATION, TestApp};

#[tokio::test]
async fn test_create_sets_envelope_and_location() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "name": "John Doe", "email": "johndoe@example.com", "type": "Admin" })),
            &[
                ("X-Principal-Id", "u-42"),
                ("X-Principal-Name", "Ada"),
                ("X-Principal-Email", "ada@example.com"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_str().expect("id").to_string();
    assert!(!id.is_empty());
    assert_eq!(
        response.header("location"),
        Some(format!("/api/users/{id}").as_str())
    );
    assert_eq!(response.body["type"], "User");
    assert!(response.body["createdAt"].is_string());
    assert!(response.body["_etag"].is_string());
    assert!(response.body.get("modifiedAt").is_none());
    assert_eq!(response.body["createdBy"]["id"], "u-42");
    assert_eq!(response.body["createdBy"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_create_rejects_invalid_payload() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "name": "John Doe", "email": "not-an-email" })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request("POST", "/api/users", Some(json!({ "name": 7 })), &[])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_duplicate_id_conflicts() {
    let app = TestApp::new();
    let body = json!({ "id": "fixed", "name": "John Doe", "email": "johndoe@example.com" });

    let first = app.request("POST", "/api/users", Some(body.clone()), &[]).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["id"], "fixed");

    let second = app.request("POST", "/api/users", Some(body), &[]).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_get_by_id_and_missing() {
    let app = TestApp::new();
    let created = app.create_user("John Doe", "johndoe@example.com").await;
    let id = created["id"].as_str().expect("id");

    let found = app.request("GET", &format!("/api/users/{id}"), None, &[]).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body, created);

    let missing = app.request("GET", "/api/users/nope", None, &[]).await;
    assert_eq!(missing.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_keeps_provenance_and_rotates_etag() {
    let app = TestApp::new();
    let created = app.create_user("John Doe", "johndoe@example.com").await;

    let mut edit = created.clone();
    edit["email"] = json!("john.doe@example.com");
    edit["createdAt"] = json!("2000-01-01T00:00:00Z");

    let response = app.request("PATCH", "/api/users", Some(edit), &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "john.doe@example.com");
    assert_eq!(response.body["createdAt"], created["createdAt"]);
    assert!(response.body["modifiedAt"].is_string());
    assert_ne!(response.body["_etag"], created["_etag"]);
}

#[tokio::test]
async fn test_update_with_stale_etag_conflicts() {
    let app = TestApp::new();
    let created = app.create_user("John Doe", "johndoe@example.com").await;

    let mut first = created.clone();
    first["name"] = json!("Johnny");
    let ok = app.request("PATCH", "/api/users", Some(first), &[]).await;
    assert_eq!(ok.status, StatusCode::OK);

    let mut stale = created.clone();
    stale["name"] = json!("Jonathan");
    let conflict = app.request("PATCH", "/api/users", Some(stale), &[]).await;
    assert_eq!(conflict.status, StatusCode::CONFLICT);

    let id = created["id"].as_str().expect("id");
    let current = app.request("GET", &format!("/api/users/{id}"), None, &[]).await;
    assert_eq!(current.body["name"], "Johnny");
}

#[tokio::test]
async fn test_if_match_header_overrides_body_etag() {
    let app = TestApp::new();
    let created = app.create_user("John Doe", "johndoe@example.com").await;

    let mut edit = created.clone();
    edit["name"] = json!("Johnny");
    let response = app
        .request("PATCH", "/api/users", Some(edit), &[("If-Match", "\"stale\"")])
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_missing_is_no_content() {
    let app = TestApp::new();
    let response = app
        .request(
            "PATCH",
            "/api/users",
            Some(json!({ "id": "ghost", "name": "Nobody", "email": "nobody@example.com" })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request(
            "GET",
            "/api/users/ghost",
            None,
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let app = TestApp::new();
    let created = app.create_user("John Doe", "johndoe@example.com").await;
    let path = format!("/api/users/{}", created["id"].as_str().expect("id"));

    let first = app.request("DELETE", &path, None, &[]).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.request("DELETE", &path, None, &[]).await;
    assert_eq!(second.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &path, None, &[]).await;
    assert_eq!(gone.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_list_follows_continuation_header() {
    let app = TestApp::new();
    for i in 0..25 {
        app.create_user(&format!("User {i:02}"), &format!("user{i}@example.com"))
            .await;
    }

    let mut names = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0;
    loop {
        let headers: Vec<(&str, &str)> = token
            .as_deref()
            .map(|t| vec![(CONTINUATION, t)])
            .unwrap_or_default();
        let response = app
            .request("GET", "/api/users?sort=name&order=asc&pageSize=50", None, &headers)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        pages += 1;

        let items = response.body.as_array().expect("array");
        assert!(items.len() <= app.config.store.max_item_count as usize);
        names.extend(items.iter().map(|u| u["name"].as_str().unwrap_or_default().to_string()));

        token = response.header(CONTINUATION).map(str::to_string);
        if token.is_none() {
            break;
        }
    }

    assert_eq!(pages, 3);
    let expected: Vec<String> = (0..25).map(|i| format!("User {i:02}")).collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_list_defaults_to_newest_first() {
    let app = TestApp::new();
    let first = app.create_user("First", "first@example.com").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = app.create_user("Second", "second@example.com").await;

    let response = app.request("GET", "/api/users", None, &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<&Value> = response
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|u| &u["id"])
        .collect();
    assert_eq!(ids, vec![&second["id"], &first["id"]]);
    assert!(response.header(CONTINUATION).is_none());
}

#[tokio::test]
async fn test_list_empty_is_no_content() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/users", None, &[]).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_list_rejects_bad_sort_and_tokens() {
    let app = TestApp::new();
    for i in 0..3 {
        app.create_user(&format!("User {i}"), &format!("user{i}@example.com"))
            .await;
    }

    let bad_field = app
        .request("GET", "/api/users?sort=name%3B%20DROP", None, &[])
        .await;
    assert_eq!(bad_field.status, StatusCode::BAD_REQUEST);

    let malformed = app
        .request("GET", "/api/users", None, &[(CONTINUATION, "%%%not-a-token")])
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let page = app
        .request("GET", "/api/users?sort=name&order=asc&pageSize=1", None, &[])
        .await;
    let token = page.header(CONTINUATION).expect("token").to_string();
    let mismatched = app
        .request(
            "GET",
            "/api/users?sort=email&order=asc&pageSize=1",
            None,
            &[(CONTINUATION, token.as_str())],
        )
        .await;
    assert_eq!(mismatched.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_exposes_continuation_header() {
    let app = TestApp::new();
    app.create_user("A", "a@example.com").await;
    app.create_user("B", "b@example.com").await;

    let response = app
        .request(
            "GET",
            "/api/users?pageSize=1",
            None,
            &[("Origin", "https://app.example.com")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let exposed = response
        .header("access-control-expose-headers")
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(exposed.contains("x-requestcontinuationtoken"));
}

#[tokio::test]
async fn test_create_rejects_unroutable_id_before_writing() {
    let app = TestApp::new();

    for id in ["a\u{1}b", "a/b"] {
        let response = app
            .request(
                "POST",
                "/api/users",
                Some(json!({ "id": id, "name": "John Doe", "email": "johndoe@example.com" })),
                &[],
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{id:?}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }

    let stored = app.request("GET", "/api/users/a%01b", None, &[]).await;
    assert_eq!(stored.status, StatusCode::NO_CONTENT);
    let listed = app.request("GET", "/api/users", None, &[]).await;
    assert_eq!(listed.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_location_escapes_id_and_routes_back() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "id": "a b?c#d", "name": "John Doe", "email": "johndoe@example.com" })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let location = response.header("location").expect("location").to_string();
    assert_eq!(location, "/api/users/a%20b%3Fc%23d");

    let fetched = app.request("GET", &location, None, &[]).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["id"], "a b?c#d");
}

#[tokio::test]
async fn test_quoted_if_match_header_is_accepted() {
    let app = TestApp::new();
    let created = app.create_user("John Doe", "johndoe@example.com").await;
    let etag = format!("\"{}\"", created["_etag"].as_str().expect("etag"));

    let mut edit = created.clone();
    edit["name"] = json!("Johnny");
    edit.as_object_mut().expect("object").remove("_etag");
    let response = app
        .request("PATCH", "/api/users", Some(edit), &[("If-Match", etag.as_str())])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Johnny");
}
