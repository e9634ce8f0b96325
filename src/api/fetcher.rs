use reqwest::{header, redirect, Client, RequestBuilder, Url};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use crate::{AppError, AppResult, FetchError};

/// Longest slice of an error body echoed into logs.
const MAX_LOGGED_BODY: usize = 512;

/// A source of JSON documents addressed by URL.
pub trait FetchJson {
    fn fetch_json(&self, url: &Url) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Issues one GET per call. No retries.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> AppResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        // A 3xx is a non-success status, not something to follow
        let mut builder = Client::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl FetchJson for HttpFetcher {
    fn fetch_json(&self, url: &Url) -> impl Future<Output = Result<Value, FetchError>> + Send {
        get_json(self.client.get(url.clone()), url.clone())
    }
}

async fn get_json(request: RequestBuilder, url: Url) -> Result<Value, FetchError> {
    tracing::debug!(url = %url, "GET");

    let response = request.send().await.map_err(|e| {
        tracing::warn!(error = %e, url = %url, "Request failed before a response arrived");
        FetchError::Transport(e)
    })?;

    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let text = String::from_utf8_lossy(&body);
        let excerpt: String = text.chars().take(MAX_LOGGED_BODY).collect();
        tracing::warn!(status = %status, url = %url, body = %excerpt, "API returned error status");
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    serde_json::from_slice(&body).map_err(|source| {
        tracing::warn!(error = %source, url = %url, "Response body is not JSON");
        FetchError::Parse {
            url: url.to_string(),
            source,
        }
    })
}
