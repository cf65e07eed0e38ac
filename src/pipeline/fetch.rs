// src/pipeline/fetch.rs
// =============================================================================
// This module retrieves pages over HTTP.
//
// The pipeline only needs "GET(url) -> bytes or failure", so that contract
// lives behind the `Fetcher` trait. The real implementation wraps a reqwest
// Client; tests plug in an in-memory fetcher instead.
//
// Deliberately missing:
// - no per-request timeout (a slow server holds its worker until shutdown)
// - no retries
// - no content-type filtering (a non-HTML body just yields zero links)
//
// Rust concepts:
// - Traits: Describe a capability that several types can provide
// - async-trait: Lets an async method live on a trait object (Arc<dyn Fetcher>)
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::error::FetchError;

/// Default User-Agent sent with every GET
pub const DEFAULT_USER_AGENT: &str = concat!("link-swarm/", env!("CARGO_PKG_VERSION"));

// The HTTP collaborator
//
// Send + Sync because every worker task holds a clone of the same Arc
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues a GET and returns the full response body
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

// Fetcher backed by a shared reqwest Client (connection pooling across workers)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the client
    //
    // Parameters:
    //   user_agent: value of the User-Agent header
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        // 4xx and 5xx are both terminal for this visit
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait instead of calling reqwest directly?
//    - Workers only care that *something* can GET a URL
//    - Tests can count calls or serve canned pages without a network
//
// 2. Why #[async_trait]?
//    - We store the fetcher as Arc<dyn Fetcher> and share it between tasks
//    - async-trait boxes the returned future so the trait stays object-safe
//
// 3. Why is the Client cloned cheaply?
//    - reqwest::Client is an Arc around a connection pool
//    - Every clone shares the same pool
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<a href=\"/next\">next</a>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let url = Url::parse(&server.url()).unwrap();
        let body = fetcher.fetch(&url).await.unwrap();

        assert_eq!(body, b"<a href=\"/next\">next</a>".to_vec());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", "swarm-test/1.0")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new("swarm-test/1.0").unwrap();
        let url = Url::parse(&server.url()).unwrap();
        fetcher.fetch(&url).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/").with_status(503).create_async().await;

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let url = Url::parse(&server.url()).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_request_error() {
        // Port 1 on loopback is reserved and never listening in CI
        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Request(_)));
    }
}
