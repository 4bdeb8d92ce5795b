//! Sale creation payloads
//!
//! Body of `POST /pdv/api/finalizar-venda/` and its response. Money fields
//! go over the wire as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment method accepted at the register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash, change is due when tendered exceeds the total
    #[default]
    #[serde(rename = "dinheiro")]
    Cash,
    /// Instant bank transfer, no tendered amount applies
    #[serde(rename = "pix")]
    Pix,
}

impl PaymentMethod {
    /// Wire value of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "dinheiro",
            PaymentMethod::Pix => "pix",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-assigned sale identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(pub i64);

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line of the sale request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItemPayload {
    pub lote_id: i64,
    pub quantidade: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco_unitario: Decimal,
}

/// Sale creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub itens: Vec<SaleItemPayload>,
    pub nome_cliente: String,
    pub forma_pagamento: PaymentMethod,
    /// Always present; only meaningful for cash
    #[serde(with = "rust_decimal::serde::float")]
    pub valor_recebido: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_venda: Decimal,
}

/// Sale creation response
///
/// ```json
/// { "success": true, "message": "Venda finalizada com sucesso!", "venda_id": 42 }
/// { "success": false, "message": "Estoque insuficiente para o lote 'L-01'." }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizeSaleResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venda_id: Option<SaleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
