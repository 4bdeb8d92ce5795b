//! Sale history page
//!
//! Response of `GET /pdv/api/search-vendas/`. Money is sent as decimal
//! strings and dates are pre-formatted by the server (`dd/mm/YYYY HH:MM:SS`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sale::SaleId;

/// A sold line in the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleHistoryItem {
    pub produto_nome: String,
    pub lote_codigo: String,
    pub quantidade: u32,
    pub preco_unitario_vendido: Decimal,
    pub subtotal: Decimal,
}

/// A recorded sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleHistoryEntry {
    pub id: SaleId,
    pub data_venda: String,
    pub nome_cliente: String,
    pub forma_pagamento: String,
    pub total_venda: Decimal,
    pub status: String,
    pub observacoes: String,
    #[serde(default)]
    pub itens: Vec<SaleHistoryItem>,
}

/// One page of the history search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleHistoryPage {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub vendas: Vec<SaleHistoryEntry>,
    #[serde(default)]
    pub total_vendas: u64,
    #[serde(default)]
    pub total_paginas: u64,
    #[serde(default = "first_page")]
    pub pagina_atual: u32,
}

fn first_page() -> u32 {
    1
}
