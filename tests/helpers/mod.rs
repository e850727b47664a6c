//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use warden_api::{ResetNotifier, build_app, build_state};
use warden_auth::{IssuedToken, MemoryDirectory, PasswordHasher};
use warden_cache::memory::MemorySessionStore;
use warden_core::config::{AppConfig, StrategyKind};
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::traits::SessionStore;
use warden_entity::{Subject, SubjectKind, SubjectStatus};

/// Notifier that keeps every issued reset token for inspection.
#[derive(Debug, Default)]
pub struct CapturingNotifier {
    tokens: Mutex<Vec<(String, String)>>,
}

impl CapturingNotifier {
    /// Most recent token issued for `subject_id`.
    pub fn last_token_for(&self, subject_id: &str) -> Option<String> {
        self.tokens
            .lock()
            .expect("notifier lock poisoned")
            .iter()
            .rev()
            .find(|(id, _)| id == subject_id)
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl ResetNotifier for CapturingNotifier {
    async fn notify(&self, subject: &Subject, token: &IssuedToken) -> AppResult<()> {
        self.tokens
            .lock()
            .expect("notifier lock poisoned")
            .push((subject.id.clone(), token.token.clone()));
        Ok(())
    }
}

/// Session store whose backend never answers.
#[derive(Debug, Default)]
pub struct UnreachableStore;

impl UnreachableStore {
    fn down<T>() -> AppResult<T> {
        Err(AppError::store_unavailable("Connection refused"))
    }
}

#[async_trait]
impl SessionStore for UnreachableStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Self::down()
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
        Self::down()
    }

    async fn set_if_absent(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<bool> {
        Self::down()
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Self::down()
    }

    async fn exists(&self, _key: &str) -> AppResult<bool> {
        Self::down()
    }

    async fn health_check(&self) -> AppResult<bool> {
        Self::down()
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Directory backing the app, for seeding subjects
    pub directory: Arc<MemoryDirectory>,
    /// Captured reset tokens
    pub notifier: Arc<CapturingNotifier>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application running the given strategy
    pub fn new(strategy: StrategyKind) -> Self {
        Self::with_config(strategy, |_| {})
    }

    /// Create a test application, adjusting the config before wiring
    pub fn with_config(strategy: StrategyKind, adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let config = Self::config(strategy, adjust);
        let store = Arc::new(MemorySessionStore::new(&config.store.memory));
        Self::build(config, store)
    }

    /// Create a test application over an explicit session store
    pub fn with_store(strategy: StrategyKind, store: Arc<dyn SessionStore>) -> Self {
        Self::build(Self::config(strategy, |_| {}), store)
    }

    fn config(strategy: StrategyKind, adjust: impl FnOnce(&mut AppConfig)) -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.strategy = strategy;
        config.auth.secret_key = "integration-test-secret".to_string();
        adjust(&mut config);
        config.validate().expect("Invalid test config");
        config
    }

    fn build(config: AppConfig, store: Arc<dyn SessionStore>) -> Self {
        let directory = Arc::new(MemoryDirectory::new());
        let notifier = Arc::new(CapturingNotifier::default());
        let state = build_state(config.clone(), store, directory.clone(), notifier.clone());

        Self {
            router: build_app(state),
            directory,
            notifier,
            config,
        }
    }

    /// The configured credential header
    pub fn header_name(&self) -> &str {
        &self.config.auth.header_name
    }

    /// Insert a subject with the given password and status
    pub fn create_subject(&self, email: &str, password: &str, status: SubjectStatus) -> Subject {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");
        let subject = Subject::new(SubjectKind::user(), email, hash).with_status(status);
        self.directory
            .insert(subject.clone())
            .expect("Failed to insert subject");
        subject
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Log in and return the issued credential
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/v1/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                &[],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response
            .header(self.header_name())
            .expect("Login response carries no credential header")
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as JSON
    pub body: Value,
}

impl TestResponse {
    /// A response header as a string
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    /// The `Set-Cookie` header for `name`, if any
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(http::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(String::from)
    }
}
