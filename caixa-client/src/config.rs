//! Client configuration

use std::str::FromStr;

use crate::ClientError;

/// Where the finalize-sale dialog takes the sale total from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalSource {
    /// Parse the total the cart display last rendered
    #[default]
    Rendered,
    /// Sum the cart lines at the moment the dialog opens
    Recomputed,
}

impl FromStr for TotalSource {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rendered" => Ok(TotalSource::Rendered),
            "recomputed" => Ok(TotalSource::Recomputed),
            other => Err(ClientError::Config(format!(
                "unknown total source '{}', expected 'rendered' or 'recomputed'",
                other
            ))),
        }
    }
}

/// Endpoint paths, relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub finalize_sale: String,
    pub search_lots: String,
    pub search_sales: String,
    /// Prefix; the sale id and a trailing slash are appended
    pub delete_sale: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            finalize_sale: "/pdv/api/finalizar-venda/".into(),
            search_lots: "/pdv/api/search-lotes/".into(),
            search_sales: "/pdv/api/search-vendas/".into(),
            delete_sale: "/pdv/api/delete-venda/".into(),
        }
    }
}

impl Endpoints {
    /// Path of the delete endpoint for one sale
    pub fn delete_sale_path(&self, sale_id: shared::SaleId) -> String {
        format!("{}/{}/", self.delete_sale.trim_end_matches('/'), sale_id)
    }
}

/// Client configuration for talking to the back office
///
/// # Environment
///
/// | Variable | Default |
/// |----------|---------|
/// | PDV_BASE_URL | http://localhost:8000 |
/// | PDV_TIMEOUT_SECS | 30 |
/// | PDV_CSRF_COOKIE | csrftoken |
/// | PDV_COOKIES | (unset) |
/// | PDV_TOTAL_SOURCE | rendered |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Name of the cookie carrying the CSRF token
    pub csrf_cookie: String,

    /// Raw cookie string (`a=1; csrftoken=...`) used as the CSRF source
    pub cookies: Option<String>,

    /// Source of the sale total shown in the dialog
    pub total_source: TotalSource,

    pub endpoints: Endpoints,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            csrf_cookie: "csrftoken".into(),
            cookies: None,
            total_source: TotalSource::default(),
            endpoints: Endpoints::default(),
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ClientError> {
        let mut config = Self::new(
            std::env::var("PDV_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".into()),
        );

        if let Ok(timeout) = std::env::var("PDV_TIMEOUT_SECS") {
            config.timeout = timeout.parse().map_err(|_| {
                ClientError::Config(format!("PDV_TIMEOUT_SECS is not a number: {}", timeout))
            })?;
        }
        if let Ok(name) = std::env::var("PDV_CSRF_COOKIE") {
            config.csrf_cookie = name;
        }
        config.cookies = std::env::var("PDV_COOKIES").ok();
        if let Ok(source) = std::env::var("PDV_TOTAL_SOURCE") {
            config.total_source = source.parse()?;
        }

        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the CSRF cookie name
    pub fn with_csrf_cookie(mut self, name: impl Into<String>) -> Self {
        self.csrf_cookie = name.into();
        self
    }

    /// Set the cookie string the CSRF token is read from
    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    pub fn with_total_source(mut self, source: TotalSource) -> Self {
        self.total_source = source;
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
