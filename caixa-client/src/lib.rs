//! Caixa Client - checkout client for the PDV back office
//!
//! Drives the finalize-sale dialog of the register, submits sales and
//! talks to the lot search and sale history APIs.

pub mod builder;
pub mod cart;
pub mod collaborators;
pub mod config;
pub mod cookie;
pub mod error;
pub mod history;
pub mod http;
pub mod modal;
pub mod money;
pub mod search;
pub mod submission;

pub use builder::CheckoutBuilder;
pub use cart::{CartHandle, CartItem};
pub use collaborators::{CartDisplay, CsrfTokenProvider, NoSearch, Notifier, ProductSearch, StaticToken};
pub use config::{ClientConfig, Endpoints, TotalSource};
pub use cookie::CookieJar;
pub use error::{CheckoutError, CheckoutErrorKind, CheckoutResult, ClientError, ClientResult};
pub use history::{SaleHistoryQuery, SalesHistory};
pub use http::{HttpClient, NetworkHttpClient};
pub use modal::{Field, ModalController, ModalView, PaymentPanel, Visibility};
pub use search::LotSearch;
pub use submission::{SaleDraft, SaleReceipt, SubmissionFlow};

// Re-export shared types for convenience
pub use shared::{Decimal, LotSummary, PaymentMethod, SaleId};
