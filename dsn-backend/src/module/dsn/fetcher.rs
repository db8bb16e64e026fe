//! Source document retrieval
//!
//! One plain GET per document: no timeout, no retries. Callers that need a
//! deadline wrap the pipeline in their own.

use async_trait::async_trait;
use reqwest::Client;

use super::error::FetchError;

/// Where the pipeline gets its raw documents from.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Return the full body of the document at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`FeedSource`] backed by a shared `reqwest` client
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("dsn-backend/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request { url: url.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Request { url: url.to_string(), source })?;

        tracing::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};

    /// Serve a tiny fixture app on an ephemeral port and return its base URL.
    async fn spawn_fixture_server() -> String {
        let app = Router::new()
            .route("/config.xml", get(|| async { "<config><spacecraftMap/></config>" }))
            .route("/broken.xml", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let base = spawn_fixture_server().await;
        let source = HttpFeedSource::new().unwrap();

        let body = source.fetch(&format!("{}/config.xml", base)).await.unwrap();
        assert_eq!(body, b"<config><spacecraftMap/></config>");
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_success_status() {
        let base = spawn_fixture_server().await;
        let source = HttpFeedSource::new().unwrap();

        let err = source.fetch(&format!("{}/broken.xml", base)).await.unwrap_err();
        match err {
            FetchError::Status { status, .. } => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_reports_unreachable_host() {
        // Bind and immediately drop a listener so the port is closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpFeedSource::new().unwrap();
        let err = source.fetch(&format!("http://{}/dsn.xml", addr)).await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }
}
