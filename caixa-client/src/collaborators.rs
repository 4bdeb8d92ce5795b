//! Page-owned collaborators
//!
//! The checkout never reaches for ambient state. Everything the host page
//! owns (cart rendering, product search, alerts, the CSRF cookie) is
//! injected through these traits.

use async_trait::async_trait;

use crate::ClientResult;
use crate::cart::CartItem;

/// Renders the cart outside the dialog
pub trait CartDisplay: Send + Sync {
    /// Total text as last rendered (e.g. `"37.50"`)
    fn rendered_total(&self) -> String;

    /// Redraw after the cart changed
    fn refresh(&self, items: &[CartItem]);
}

/// Product search box of the page
#[async_trait]
pub trait ProductSearch: Send + Sync {
    /// Empty the search input
    fn clear_query(&self);

    /// Re-run the search with the current input
    async fn refresh(&self) -> ClientResult<()>;
}

/// Blocking user notification
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Source of the cross-site-request-forgery token
pub trait CsrfTokenProvider: Send + Sync {
    fn csrf_token(&self) -> Option<String>;
}

/// Fixed token
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl CsrfTokenProvider for StaticToken {
    fn csrf_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Search that does nothing, for pages without a product search
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSearch;

#[async_trait]
impl ProductSearch for NoSearch {
    fn clear_query(&self) {}

    async fn refresh(&self) -> ClientResult<()> {
        Ok(())
    }
}
