//! Register cart
//!
//! The cart belongs to the page. Every component gets a clone of the same
//! [`CartHandle`], so clearing it after a sale is seen everywhere.

use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::{LotSummary, SaleItemPayload};

use crate::money::round_money;

/// A line waiting to be sold
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub lot_id: i64,
    pub lot_code: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl CartItem {
    /// Build a line from a search hit
    pub fn from_lot(lot: &LotSummary, quantity: u32) -> Self {
        Self {
            lot_id: lot.id,
            lot_code: lot.codigo_lote.clone(),
            name: lot.nome_produto.clone(),
            quantity,
            unit_price: lot.preco_unitario,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Wire projection: lot, quantity and unit price only
    pub fn to_payload(&self) -> SaleItemPayload {
        SaleItemPayload {
            lote_id: self.lot_id,
            quantidade: self.quantity,
            preco_unitario: self.unit_price,
        }
    }
}

/// Shared handle to the page cart
#[derive(Debug, Clone, Default)]
pub struct CartHandle {
    items: Arc<RwLock<Vec<CartItem>>>,
}

impl CartHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: CartItem) {
        self.items.write().push(item);
    }

    /// Snapshot of the current lines
    pub fn items(&self) -> Vec<CartItem> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Truncate in place
    pub fn clear(&self) {
        self.items.write().clear();
    }

    /// Sum of the line subtotals, rounded to cents
    pub fn total(&self) -> Decimal {
        round_money(self.items.read().iter().map(CartItem::subtotal).sum())
    }

    pub fn payload(&self) -> Vec<SaleItemPayload> {
        self.items.read().iter().map(CartItem::to_payload).collect()
    }
}

impl FromIterator<CartItem> for CartHandle {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self {
            items: Arc::new(RwLock::new(iter.into_iter().collect())),
        }
    }
}
