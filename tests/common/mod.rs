#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use parc_info_auth::auth::CredentialStore;
use parc_info_auth::config::{AppConfig, Environment};
use parc_info_auth::database::{AuthUser, DatabaseError};
use parc_info_auth::{router, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Nothing listens on port 1, so every connection attempt is refused
pub const UNREACHABLE_DATABASE_URL: &str = "postgres://nobody@127.0.0.1:1/nothing";

/// In-memory `auth_users` table that records every lookup it receives
#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Vec<(String, String, String)>,
    lookups: Arc<Mutex<Vec<(String, String)>>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, email: &str, password: &str, role: &str) -> Self {
        self.rows.push((email.to_string(), password.to_string(), role.to_string()));
        self
    }

    /// Every call fails as if the database were down
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthUser>, DatabaseError> {
        self.lookups
            .lock()
            .unwrap()
            .push((email.to_string(), password.to_string()));

        if self.unavailable {
            return Err(DatabaseError::Connection(sqlx::Error::PoolTimedOut));
        }

        Ok(self
            .rows
            .iter()
            .find(|(e, p, _)| e == email && p == password)
            .map(|(e, _, role)| AuthUser {
                email: e.clone(),
                role: role.clone(),
            }))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        if self.unavailable {
            return Err(DatabaseError::Connection(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::defaults(Environment::Development);
    config.api.enable_request_logging = false;
    config
}

pub fn app_with(store: MemoryStore) -> Router {
    router(AppState::new(store), &test_config())
}

/// Send a request through the router and decode the JSON body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

/// Server binary running on its own port, killed on drop
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    /// Spawn the server pointed at a database that cannot be reached
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_parc-info-auth"))
            .env("APP_ENV", "development")
            .env("AUTH_API_HOST", "127.0.0.1")
            .env("AUTH_API_PORT", port.to_string())
            .env("DATABASE_URL", UNREACHABLE_DATABASE_URL)
            .env_remove("SECURITY_CORS_ORIGINS")
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        let server = Self { port, base_url, child };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if client.get(&self.base_url).send().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
