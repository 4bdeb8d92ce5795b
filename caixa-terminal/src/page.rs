//! Terminal rendition of the register page

use caixa_client::money::format_amount;
use caixa_client::{CartDisplay, CartItem, Decimal, ModalView, Notifier, PaymentPanel};
use parking_lot::Mutex;

/// Prints the cart and alerts, remembers the rendered total
#[derive(Debug)]
pub struct TerminalPage {
    rendered_total: Mutex<String>,
}

impl TerminalPage {
    pub fn new() -> Self {
        Self {
            rendered_total: Mutex::new(format_amount(Decimal::ZERO)),
        }
    }
}

impl Default for TerminalPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CartDisplay for TerminalPage {
    fn rendered_total(&self) -> String {
        self.rendered_total.lock().clone()
    }

    fn refresh(&self, items: &[CartItem]) {
        if items.is_empty() {
            println!("  (carrinho vazio)");
        }
        for (idx, item) in items.iter().enumerate() {
            println!(
                "  {:>2}. {:<24} {:<10} {:>4} x {:>8} = {:>9}",
                idx + 1,
                item.name,
                item.lot_code,
                item.quantity,
                format_amount(item.unit_price),
                format_amount(item.subtotal()),
            );
        }
        let total: Decimal = items.iter().map(CartItem::subtotal).sum();
        let total = format_amount(total);
        println!("  Total: R$ {}", total);
        *self.rendered_total.lock() = total;
    }
}

impl Notifier for TerminalPage {
    fn alert(&self, message: &str) {
        println!("\n*** {} ***\n", message);
    }
}

/// Print the finalize-sale dialog
pub fn render_modal(view: &ModalView) {
    println!("----- Finalizar venda -----");
    println!("  Total:        R$ {}", view.total_text);
    println!(
        "  Cliente:      {}",
        if view.client_name.is_empty() { "-" } else { &view.client_name }
    );
    println!("  Pagamento:    {}", view.method);
    match view.panel {
        PaymentPanel::CashDetails => {
            println!("  Recebido:     R$ {}", view.tendered_text);
            println!("  Troco:        {}", view.change_text);
        }
        PaymentPanel::PixDetails => {
            println!("  Valor Pix:    R$ {}", view.pix_amount_text);
        }
    }
    println!(
        "  Confirmar:    {}",
        if view.confirm_enabled { "disponível" } else { "bloqueado" }
    );
    println!("---------------------------");
}
