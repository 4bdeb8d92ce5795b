//! Shared types for the Caixa PDV
//!
//! Wire types exchanged between the checkout client and the back-office
//! server: sale creation, lot search and sale history.

pub mod history;
pub mod lot;
pub mod sale;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use history::{SaleHistoryEntry, SaleHistoryItem, SaleHistoryPage};
pub use lot::{LotSearchResponse, LotSummary};
pub use sale::{FinalizeSaleResponse, PaymentMethod, SaleId, SaleItemPayload, SaleRequest};
