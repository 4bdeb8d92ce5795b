//! Builder for the checkout flow
//!
//! Collects the page-owned collaborators and wires them to a dialog
//! controller and an HTTP client.

use std::sync::Arc;

use crate::cart::CartHandle;
use crate::collaborators::{CartDisplay, NoSearch, Notifier, ProductSearch};
use crate::config::{ClientConfig, TotalSource};
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::modal::ModalController;
use crate::submission::SubmissionFlow;

/// Builder for [`SubmissionFlow`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use caixa_client::{CartHandle, CheckoutBuilder, ClientConfig, CookieJar, NetworkHttpClient};
/// # use caixa_client::{CartDisplay, CartItem, Notifier};
/// # struct Page;
/// # impl CartDisplay for Page {
/// #     fn rendered_total(&self) -> String { "0.00".into() }
/// #     fn refresh(&self, _: &[CartItem]) {}
/// # }
/// # impl Notifier for Page { fn alert(&self, _: &str) {} }
///
/// # fn example() -> Result<(), caixa_client::ClientError> {
/// let config = ClientConfig::from_env()?;
/// let jar = Arc::new(CookieJar::new("csrftoken=abc", &config.csrf_cookie));
/// let http = NetworkHttpClient::new(&config)?.with_csrf(jar);
/// let page = Arc::new(Page);
///
/// let checkout = CheckoutBuilder::new(&config)
///     .cart(CartHandle::new())
///     .display(page.clone())
///     .notifier(page)
///     .build(http)?;
///
/// checkout.modal().open();
/// # Ok(())
/// # }
/// ```
pub struct CheckoutBuilder {
    endpoint: String,
    total_source: TotalSource,
    cart: Option<CartHandle>,
    display: Option<Arc<dyn CartDisplay>>,
    search: Option<Arc<dyn ProductSearch>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl CheckoutBuilder {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            endpoint: config.endpoints.finalize_sale.clone(),
            total_source: config.total_source,
            cart: None,
            display: None,
            search: None,
            notifier: None,
        }
    }

    /// Sets the page cart. A fresh empty cart is used when omitted.
    pub fn cart(mut self, cart: CartHandle) -> Self {
        self.cart = Some(cart);
        self
    }

    pub fn display(mut self, display: Arc<dyn CartDisplay>) -> Self {
        self.display = Some(display);
        self
    }

    /// Sets the product search refreshed after a sale. Optional.
    pub fn search(mut self, search: Arc<dyn ProductSearch>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Builds the flow.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the display or the notifier is missing.
    pub fn build<C: HttpClient>(self, http: C) -> Result<SubmissionFlow<C>, ClientError> {
        let display = self
            .display
            .ok_or_else(|| ClientError::Config("cart display is required".into()))?;
        let notifier = self
            .notifier
            .ok_or_else(|| ClientError::Config("notifier is required".into()))?;
        let cart = self.cart.unwrap_or_default();
        let search: Arc<dyn ProductSearch> = match self.search {
            Some(search) => search,
            None => Arc::new(NoSearch),
        };

        Ok(SubmissionFlow {
            modal: ModalController::new(cart.clone(), display.clone(), self.total_source),
            cart,
            http,
            display,
            search,
            notifier,
            endpoint: self.endpoint,
        })
    }
}
