#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use daily_bright_api::config::AppConfig;
use daily_bright_api::state::AppState;

pub const PASSWORD: &str = "correct horse battery staple";

/// An in-process server with its own in-memory store, alive for one test's runtime
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        let state = AppState::in_memory(config).context("failed to build state")?;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let app = daily_bright_api::app(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post_json(&self, path: &str, body: Value, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut req = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        read(req.send().await?).await
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        read(req.send().await?).await
    }

    /// Register a fresh account and sign in; returns (email, access, refresh)
    pub async fn signed_in_user(&self) -> Result<(String, String, String)> {
        let email = unique_email();
        let (status, body) = self
            .post_json("/auth/signup", json!({ "email": email, "password": PASSWORD }), None)
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "signup failed: {status} {body}");

        let (status, body) = self
            .post_json("/auth/signin", json!({ "email": email, "password": PASSWORD }), None)
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "signin failed: {status} {body}");

        let access = body["data"]["accessToken"]
            .as_str()
            .context("missing accessToken")?
            .to_string();
        let refresh = body["data"]["refreshToken"]
            .as_str()
            .context("missing refreshToken")?
            .to_string();
        Ok((email, access, refresh))
    }

    pub async fn create_entry(&self, token: &str, title: &str, content: &str) -> Result<Value> {
        let (status, body) = self
            .post_json("/entries", json!({ "title": title, "content": content }), Some(token))
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create failed: {status} {body}");
        Ok(body["data"].clone())
    }
}

pub fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4().simple())
}

/// Status plus JSON body; an empty body reads as `null`
pub async fn read(res: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let text = res.text().await?;
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).with_context(|| format!("non-JSON body: {text}"))?
    };
    Ok((status, body))
}
