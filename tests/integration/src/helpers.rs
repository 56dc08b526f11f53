//! Helpers for end-to-end tests against a live API server.
//!
//! These require running PostgreSQL and Redis instances; tests call
//! [`check_test_env`] and skip themselves when the environment is not set up.

use std::net::SocketAddr;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vita_api::server::{create_app, create_app_state};
use vita_common::AppConfig;

/// Whether the live-server test environment is configured
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    let configured =
        std::env::var("DATABASE_URL").is_ok() && std::env::var("REDIS_URL").is_ok();
    if !configured {
        eprintln!("Skipping live API test: DATABASE_URL and REDIS_URL not set");
    }
    configured
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = AppConfig::from_env()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            client: Client::new(),
            _handle: handle,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("/health") {
            format!("http://{}{}", self.addr, path)
        } else {
            format!("http://{}/api/v1{}", self.addr, path)
        }
    }

    /// GET request without authentication
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// GET request with a bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// POST request with a JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// POST request with a JSON body and a bearer token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        token: &str,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }
}

/// Assert the response status and decode the JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    anyhow::ensure!(
        status == expected,
        "expected status {expected}, got {status}: {body}"
    );
    Ok(serde_json::from_str(&body)?)
}

/// Assert the response status
pub async fn assert_status(response: Response, expected: StatusCode) -> Result<()> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    anyhow::ensure!(
        status == expected,
        "expected status {expected}, got {status}: {body}"
    );
    Ok(())
}
