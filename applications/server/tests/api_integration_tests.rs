/// API integration tests
/// Tests complete HTTP request/response cycles with real database
mod common;

use axum::http::{Method, StatusCode};
use common::{record_payload, FakeCatalog, TestApp};
use serde_json::{json, Value};

async fn create(app: &TestApp, token: &str, body: Value) -> Value {
    let (status, created) = app
        .send_json(Method::POST, "/api/records", Some(token), Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", created);
    created
}

/// Test health check endpoint (no auth required)
#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let (status, body) = app.send_json(Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

/// Test that record endpoints require a bearer token
#[tokio::test]
async fn test_records_require_authentication() {
    let app = TestApp::new().await;

    let (status, _) = app.send(Method::GET, "/api/records", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::GET, "/api/records", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Test creating a record returns the shaped record
#[tokio::test]
async fn test_create_record() {
    let app = TestApp::new().await;
    let (user, token) = app.user_with_token("glenn").await;

    let created = create(&app, &token, record_payload("Misfits", "Static Age")).await;

    assert!(created["id"].as_i64().unwrap() > 0);
    assert_eq!(created["artist"], "Misfits");
    assert_eq!(created["album"], "Static Age");
    assert_eq!(created["yearReleased"], 1980);
    assert_eq!(
        created["imageUrl"],
        "https://img.example.com/Static Age.jpg"
    );
    assert_eq!(created["condition"], json!({"id": 1, "label": "Mint"}));
    assert_eq!(created["genres"], json!([{"id": 2, "name": "Punk"}]));
    assert_eq!(created["user"]["id"], user.id);
    assert_eq!(created["user"]["username"], "glenn");
    assert_eq!(created["user"]["firstName"], "First");
    assert!(created.get("year_released").is_none());
}

/// Test duplicate genre ids collapse into a single association
#[tokio::test]
async fn test_create_record_collapses_duplicate_genres() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let mut body = record_payload("Misfits", "Walk Among Us");
    body["genres"] = json!([3, 2, 2]);
    let created = create(&app, &token, body).await;

    assert_eq!(
        created["genres"],
        json!([{"id": 2, "name": "Punk"}, {"id": 3, "name": "Hardcore"}])
    );
}

/// Test year may be sent as a numeric string or omitted
#[tokio::test]
async fn test_create_record_year_variants() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let mut body = record_payload("Misfits", "Earth A.D.");
    body["yearReleased"] = json!("1983");
    let created = create(&app, &token, body).await;
    assert_eq!(created["yearReleased"], 1983);

    let mut body = record_payload("Misfits", "Legacy of Brutality");
    body.as_object_mut().unwrap().remove("yearReleased");
    let created = create(&app, &token, body).await;
    assert!(created["yearReleased"].is_null());
}

/// Test unknown condition is rejected with a reason
#[tokio::test]
async fn test_create_record_unknown_condition() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let mut body = record_payload("Misfits", "Static Age");
    body["condition"] = json!(999);

    let (status, response) = app
        .send_json(Method::POST, "/api/records", Some(&token), Some(body))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["reason"].as_str().unwrap().contains("Condition"));

    let (_, records) = app
        .send_json(Method::GET, "/api/records", Some(&token), None)
        .await;
    assert_eq!(records, json!([]));
}

/// Test unknown genre is rejected with a reason and nothing is stored
#[tokio::test]
async fn test_create_record_unknown_genre() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let mut body = record_payload("Misfits", "Static Age");
    body["genres"] = json!([2, 999]);

    let (status, response) = app
        .send_json(Method::POST, "/api/records", Some(&token), Some(body))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["reason"].as_str().unwrap().contains("Genre"));

    let (_, records) = app
        .send_json(Method::GET, "/api/records", Some(&token), None)
        .await;
    assert_eq!(records, json!([]));
}

/// Test a body missing required fields is rejected with a reason
#[tokio::test]
async fn test_create_record_missing_fields() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, response) = app
        .send_json(
            Method::POST,
            "/api/records",
            Some(&token),
            Some(json!({"artist": "Misfits"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["reason"].is_string());
}

/// Test retrieving a single record
#[tokio::test]
async fn test_get_record() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;
    let created = create(&app, &token, record_payload("Misfits", "Static Age")).await;

    let (status, fetched) = app
        .send_json(
            Method::GET,
            &format!("/api/records/{}", created["id"]),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

/// Test retrieving a missing record reports 400 with a reason
#[tokio::test]
async fn test_get_missing_record() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, response) = app
        .send_json(Method::GET, "/api/records/999", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["reason"],
        "Record matching id 999 does not exist"
    );
}

/// Test updating a record overwrites every field and moves ownership
#[tokio::test]
async fn test_update_record() {
    let app = TestApp::new().await;
    let (_, owner_token) = app.user_with_token("glenn").await;
    let (editor, editor_token) = app.user_with_token("jerry").await;
    let created = create(&app, &owner_token, record_payload("Misfits", "Static Age")).await;
    let uri = format!("/api/records/{}", created["id"]);

    let update = json!({
        "artist": "The Misfits",
        "album": "Static Age (Reissue)",
        "yearReleased": 1997,
        "imageUrl": "https://img.example.com/reissue.jpg",
        "condition": 2,
        "genres": [3]
    });
    let (status, body) = app
        .send(Method::PUT, &uri, Some(&editor_token), Some(update))
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (_, fetched) = app
        .send_json(Method::GET, &uri, Some(&owner_token), None)
        .await;
    assert_eq!(fetched["artist"], "The Misfits");
    assert_eq!(fetched["album"], "Static Age (Reissue)");
    assert_eq!(fetched["yearReleased"], 1997);
    assert_eq!(fetched["imageUrl"], "https://img.example.com/reissue.jpg");
    assert_eq!(fetched["condition"], json!({"id": 2, "label": "Near Mint"}));
    assert_eq!(fetched["genres"], json!([{"id": 3, "name": "Hardcore"}]));
    assert_eq!(fetched["user"]["id"], editor.id);
}

/// Test updating a missing record reports 404 with an empty body
#[tokio::test]
async fn test_update_missing_record() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/records/999",
            Some(&token),
            Some(record_payload("Misfits", "Static Age")),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

/// Test updating with an unknown genre is a server error and changes nothing
#[tokio::test]
async fn test_update_record_unknown_genre() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;
    let created = create(&app, &token, record_payload("Misfits", "Static Age")).await;
    let uri = format!("/api/records/{}", created["id"]);

    let mut update = record_payload("Changed", "Changed");
    update["genres"] = json!([999]);
    let (status, _) = app.send(Method::PUT, &uri, Some(&token), Some(update)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, fetched) = app.send_json(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(fetched, created);
}

/// Test listing records with and without the owner filter
#[tokio::test]
async fn test_list_records_filtered_by_user() {
    let app = TestApp::new().await;
    let (glenn, glenn_token) = app.user_with_token("glenn").await;
    let (_, jerry_token) = app.user_with_token("jerry").await;

    let first = create(&app, &glenn_token, record_payload("Misfits", "Static Age")).await;
    create(&app, &jerry_token, record_payload("Samhain", "Initium")).await;
    let third = create(&app, &glenn_token, record_payload("Danzig", "Danzig")).await;

    let (status, all) = app
        .send_json(Method::GET, "/api/records", Some(&glenn_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, mine) = app
        .send_json(
            Method::GET,
            &format!("/api/records?user_id={}", glenn.id),
            Some(&glenn_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine, json!([first, third]));

    let (status, nobody) = app
        .send_json(
            Method::GET,
            "/api/records?user_id=999",
            Some(&glenn_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(nobody, json!([]));
}

/// Test a non-numeric user filter is a server error
#[tokio::test]
async fn test_list_records_invalid_user_filter() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, _) = app
        .send(Method::GET, "/api/records?user_id=abc", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

/// Test deleting a record, then deleting it again
#[tokio::test]
async fn test_delete_record_twice() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;
    let created = create(&app, &token, record_payload("Misfits", "Static Age")).await;
    let uri = format!("/api/records/{}", created["id"]);

    let (status, body) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, response) = app
        .send_json(Method::DELETE, &uri, Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response["message"].as_str().unwrap().contains("Record"));

    let (status, _) = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Test deleting a record that never existed
#[tokio::test]
async fn test_delete_missing_record() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, response) = app
        .send_json(Method::DELETE, "/api/records/999", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response["message"].is_string());
}

/// Test search relays the catalog payload unchanged
#[tokio::test]
async fn test_search_relays_catalog_payload() {
    let payload = json!({
        "pagination": {"page": 1, "pages": 1, "items": 1},
        "results": [{"id": 123, "title": "Misfits - Static Age", "year": "1997"}]
    });
    let app = TestApp::with_catalog(FakeCatalog::answering(payload.clone())).await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, body) = app
        .send_json(
            Method::GET,
            "/api/records/search?query=Misfits",
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, payload);
    assert_eq!(*app.catalog.queries.lock().unwrap(), vec!["Misfits"]);
}

/// Test search without a query is rejected before reaching the catalog
#[tokio::test]
async fn test_search_requires_query() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    for uri in ["/api/records/search", "/api/records/search?query="] {
        let (status, body) = app.send_json(Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "A 'query' parameter is required.");
    }

    assert!(app.catalog.queries.lock().unwrap().is_empty());
}

/// Test an unreachable catalog is reported as a server error
#[tokio::test]
async fn test_search_catalog_failure() {
    let app = TestApp::with_catalog(FakeCatalog::failing()).await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, body) = app
        .send_json(
            Method::GET,
            "/api/records/search?query=Misfits",
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to fetch data from Discogs"));
}

/// Test reference data listings
#[tokio::test]
async fn test_list_reference_data() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, genres) = app
        .send_json(Method::GET, "/api/genres", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let genres = genres.as_array().unwrap();
    assert_eq!(genres.len(), 15);
    assert_eq!(genres[0], json!({"id": 1, "name": "Rock"}));

    let (status, conditions) = app
        .send_json(Method::GET, "/api/conditions", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let conditions = conditions.as_array().unwrap();
    assert_eq!(conditions.len(), 8);
    assert_eq!(conditions[0], json!({"id": 1, "label": "Mint"}));
}

/// Test a non-integer id on retrieve is rejected with a reason
#[tokio::test]
async fn test_get_record_non_integer_id() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, response) = app
        .send_json(Method::GET, "/api/records/abc", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["reason"].is_string());
}

/// Test a non-integer id on update is a plain-text server error
#[tokio::test]
async fn test_update_record_non_integer_id() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/records/abc",
            Some(&token),
            Some(record_payload("Misfits", "Static Age")),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.is_empty());
    assert!(serde_json::from_slice::<Value>(&body).is_err());
}

/// Test a non-integer id on delete is a server error with a message
#[tokio::test]
async fn test_delete_record_non_integer_id() {
    let app = TestApp::new().await;
    let (_, token) = app.user_with_token("glenn").await;

    let (status, response) = app
        .send_json(Method::DELETE, "/api/records/abc", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response["message"].is_string());
}
