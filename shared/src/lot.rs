//! Lot search results
//!
//! Response of `GET /pdv/api/search-lotes/?query=...`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stock lot matched by the product search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotSummary {
    pub id: i64,
    pub codigo_lote: String,
    pub quantidade_estoque: i64,
    /// Sent by the server as a decimal string ("12.50")
    pub preco_unitario: Decimal,
    pub nome_produto: String,
    #[serde(default)]
    pub imagem_produto_url: Option<String>,
}

/// Search envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LotSearchResponse {
    #[serde(default)]
    pub lotes: Vec<LotSummary>,
}
