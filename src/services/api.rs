//! REST transport for the GeoHod backend
//!
//! Owns the reqwest client, builds `/api/v1` urls, attaches the host
//! init data as the `Authorization` header and maps non-2xx replies into
//! [`GeoHodError`]. Nothing above this layer sees reqwest types.

use std::time::{Duration, Instant};
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;
use crate::config::ApiConfig;
use crate::utils::errors::{classify_failure, FailureContext, GeoHodError, Result};
use crate::utils::logging::{log_api_call, log_api_error};

/// Structured error body the backend sends on failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    init_data: String,
}

impl ApiClient {
    /// Create a new client for the configured backend
    pub fn new(config: &ApiConfig, init_data: &str) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            init_data: init_data.to_string(),
        })
    }

    /// Absolute url for a path below the base url
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path.trim_start_matches('/')))?)
    }

    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        let mut builder = self.client.request(method, url);
        if !self.init_data.is_empty() {
            builder = builder.header(header::AUTHORIZATION, self.init_data.as_str());
        }
        Ok(builder)
    }

    /// Send and decode a JSON body
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder, path: &str) -> Result<T> {
        let response = self.dispatch(builder, path, FailureContext::General).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            log_api_error(path, &e.to_string(), Some("decode"));
            GeoHodError::InvalidResponse(format!("{}: {}", path, e))
        })
    }

    /// Send and discard whatever body comes back
    pub async fn send_empty(&self, builder: RequestBuilder, path: &str) -> Result<()> {
        self.dispatch(builder, path, FailureContext::General).await?;
        Ok(())
    }

    /// Like [`send_empty`](Self::send_empty), for joining or leaving an
    /// event: capacity wording in a 4xx reply means the group is full
    pub async fn send_membership(&self, builder: RequestBuilder, path: &str) -> Result<()> {
        self.dispatch(builder, path, FailureContext::Membership).await?;
        Ok(())
    }

    async fn dispatch(&self, builder: RequestBuilder, path: &str, context: FailureContext) -> Result<Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let started = Instant::now();

        debug!(method = %method, url = %request.url(), "Calling backend");

        let response = self.client.execute(request).await.map_err(|e| {
            log_api_error(path, &e.to_string(), Some("transport"));
            if e.is_timeout() {
                GeoHodError::Network("request timed out".to_string())
            } else {
                GeoHodError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        log_api_call(method.as_str(), path, status.as_u16(), started.elapsed().as_millis() as u64);

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = failure_message(&text);
        warn!(method = %method, path = path, status = status.as_u16(), message = %message, "Backend rejected request");

        Err(match status.as_u16() {
            404 => GeoHodError::NotFound { resource: path.to_string() },
            code => classify_failure(code, &message, context),
        })
    }
}

/// Pull a human message out of an error body, falling back to the raw text
fn failure_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(m), .. }) if !m.is_empty() => m,
        Ok(ErrorBody { error: Some(e), .. }) if !e.is_empty() => e,
        _ => body.trim().to_string(),
    }
}

/// Percent-encode an id for use as a path segment
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
