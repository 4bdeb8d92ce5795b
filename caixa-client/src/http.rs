//! HTTP client for the back-office API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::collaborators::CsrfTokenProvider;
use crate::{ClientConfig, ClientError, ClientResult};

/// Header the back office reads the CSRF token from
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Error body the server sends with non-success statuses
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T>;

    /// State-mutating; carries the CSRF token
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;

    /// State-mutating; carries the CSRF token
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
}

/// Network HTTP client
#[derive(Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    csrf: Option<Arc<dyn CsrfTokenProvider>>,
}

impl std::fmt::Debug for NetworkHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkHttpClient")
            .field("base_url", &self.base_url)
            .field("csrf", &self.csrf.is_some())
            .finish()
    }
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf: None,
        })
    }

    /// Attach the CSRF token source
    pub fn with_csrf(mut self, provider: Arc<dyn CsrfTokenProvider>) -> Self {
        self.csrf = Some(provider);
        self
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn with_csrf_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.csrf.as_ref().and_then(|p| p.csrf_token()) {
            Some(token) => request.header(CSRF_HEADER, token),
            None => {
                tracing::debug!("No CSRF token available, sending request without it");
                request
            }
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .ok()
                .and_then(|body| body.message);
            tracing::debug!(status = status.as_u16(), ?message, "Request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.with_csrf_header(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.with_csrf_header(self.client.delete(self.url(path)));
        let response = request.send().await?;
        self.handle_response(response).await
    }
}
