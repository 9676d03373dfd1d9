//! Common test utilities and fixtures

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use melody_core::{CreateUser, StorageContext, User};
use melody_server::{api, services::AuthService, state::AppState};
use melody_storage::LocalStorageContext;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Test user credentials
pub mod fixtures {
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
    pub const JWT_SECRET: &str = "test-secret-key";
}

/// Router plus direct handles on its storage and auth service
pub struct TestApp {
    pub router: Router,
    pub db: Arc<LocalStorageContext>,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestApp {
    /// Build the full router over a fresh SQLite file
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = melody_storage::create_pool(&db_url).await.unwrap();
        melody_storage::run_migrations(&pool).await.unwrap();
        let db = Arc::new(LocalStorageContext::new(pool));

        let auth_service = Arc::new(AuthService::new(fixtures::JWT_SECRET.to_string(), 1, 1));

        let router = api::create_router(AppState::new(Arc::clone(&db), Arc::clone(&auth_service)));

        Self {
            router,
            db,
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Create a user with a real (low-cost) bcrypt hash of `password`
    pub async fn create_user(&self, username: &str, password: &str) -> User {
        self.db
            .create_user(CreateUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                first_name: String::new(),
                last_name: String::new(),
                password_hash: bcrypt::hash(password, 4).unwrap(),
            })
            .await
            .unwrap()
    }

    /// Create a user and return it with a valid access token
    pub async fn signed_in(&self, username: &str) -> (User, String) {
        let user = self.create_user(username, fixtures::TEST_PASSWORD).await;
        let token = self.auth_service.create_access_token(user.id).unwrap();
        (user, token)
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, body).await
    }
}
