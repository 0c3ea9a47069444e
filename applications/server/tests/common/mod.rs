//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use stowaway_core::{types::CreateUser, CatalogSearch, RecordStore, StowawayError, User};
use stowaway_server::{create_router, services::AuthService, state::AppState};
use stowaway_storage::LocalStorageContext;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";

/// Catalog double that answers every query with a fixed payload, or fails
pub struct FakeCatalog {
    payload: Option<Value>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn answering(payload: Value) -> Self {
        Self {
            payload: Some(payload),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            payload: None,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CatalogSearch for FakeCatalog {
    async fn search(&self, query: &str) -> stowaway_core::Result<Value> {
        self.queries.lock().unwrap().push(query.to_string());
        self.payload
            .clone()
            .ok_or_else(|| StowawayError::upstream("connection refused"))
    }
}

/// A router wired to a real SQLite file and a fake catalog
pub struct TestApp {
    pub router: Router,
    pub auth_service: Arc<AuthService>,
    pub db: Arc<LocalStorageContext>,
    pub catalog: Arc<FakeCatalog>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_catalog(FakeCatalog::answering(serde_json::json!({ "results": [] }))).await
    }

    pub async fn with_catalog(catalog: FakeCatalog) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let db = Arc::new(LocalStorageContext::connect(&db_url).await.unwrap());

        let auth_service =
            Arc::new(AuthService::new(TEST_SECRET.to_string(), 1).with_hash_cost(4));
        let catalog = Arc::new(catalog);

        let app_state = AppState::new(
            Arc::clone(&db) as Arc<dyn RecordStore>,
            Arc::clone(&auth_service),
            Arc::clone(&catalog) as Arc<dyn CatalogSearch>,
        );

        Self {
            router: create_router(app_state),
            auth_service,
            db,
            catalog,
            _temp_dir: temp_dir,
        }
    }

    /// Create a user directly in the store and return it with a valid token
    pub async fn user_with_token(&self, username: &str) -> (User, String) {
        let user = self
            .db
            .create_user(
                CreateUser {
                    username: username.to_string(),
                    first_name: "First".to_string(),
                    last_name: "Last".to_string(),
                },
                "unused-hash",
            )
            .await
            .unwrap();
        let token = self.auth_service.create_token(user.id).unwrap();
        (user, token)
    }

    /// Send a request and return status plus raw body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, bytes.to_vec())
    }

    /// Send a request and parse the body as JSON (`Null` for an empty body)
    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, token, body).await;
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

/// Record payload using seeded reference data (condition 1 = Mint, genre 2 = Punk)
pub fn record_payload(artist: &str, album: &str) -> Value {
    serde_json::json!({
        "artist": artist,
        "album": album,
        "yearReleased": 1980,
        "imageUrl": format!("https://img.example.com/{}.jpg", album),
        "condition": 1,
        "genres": [2]
    })
}
