#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    extract::{Path, Query},
    http::{Method, Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::ServiceExt;
use uuid::Uuid;

use profile_api::auth::{generate_jwt, Claims};
use profile_api::config::AppConfig;
use profile_api::database::models::User;
use profile_api::database::MemoryStore;
use profile_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
    pub json: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_github("http://127.0.0.1:9")
    }

    /// App whose GitHub lookups go to `api_url`
    pub fn with_github(api_url: &str) -> Self {
        let mut config = AppConfig::development();
        config.security.jwt_secret = TEST_SECRET.to_string();
        config.github.api_url = api_url.to_string();
        config.github.timeout_secs = 1;

        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(config.clone(), store.clone()).expect("valid test config");

        Self {
            router: app(state),
            store,
            config,
        }
    }

    /// Seed a user record and return its id with a valid token
    pub async fn user(&self, name: &str) -> (Uuid, String) {
        let user = User::new(name, format!("{}@example.com", name.to_lowercase()), Some(format!("//gravatar/{}", name)));
        let id = user.id;
        self.store.insert_user(user).await;
        (id, token_for(id))
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await.context("router failed")?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let text = String::from_utf8(bytes.to_vec())?;
        let json = serde_json::from_str(&text).unwrap_or(Value::Null);

        Ok(TestResponse { status, text, json })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.send(Method::GET, uri, token, None).await
    }

    /// Create a basic profile for the token's owner
    pub async fn create_profile(&self, token: &str) -> Result<TestResponse> {
        self.send(
            Method::POST,
            "/api/profile",
            Some(token),
            Some(json!({ "status": "Developer", "skills": "rust, axum" })),
        )
        .await
    }
}

pub fn token_for(user_id: Uuid) -> String {
    generate_jwt(&Claims::new(user_id, 1), TEST_SECRET).expect("token")
}

/// Minimal stand-in for the GitHub repos endpoint, bound to an ephemeral port.
/// `octocat` has repositories, `slowpoke` never answers in time, everyone else is 404.
pub async fn spawn_fake_github() -> Result<String> {
    async fn repos(Path(username): Path<String>, Query(query): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
        match username.as_str() {
            "octocat" => (
                StatusCode::OK,
                Json(json!([
                    { "name": "hello-world", "owner": { "login": "octocat" }, "query": query },
                    { "name": "spoon-knife", "owner": { "login": "octocat" } }
                ])),
            ),
            "slowpoke" => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                (StatusCode::OK, Json(json!([])))
            }
            _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))),
        }
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = Router::new().route("/users/:username/repos", get(repos));
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://{}", addr))
}
