//! Finalize-sale dialog state
//!
//! The dialog is a small state machine:
//!
//! ```text
//!            open()                     select_payment_method(Pix)
//! Closed ───────────────▶ Open/Cash ◀──────────────────────────▶ Open/Pix
//!   ▲                        │       select_payment_method(Cash)     │
//!   └──────── close() ───────┴───────────────────────────────────────┘
//! ```
//!
//! With `Cash` the confirm control is enabled only while the tendered amount
//! covers the total. With `Pix` it is always enabled: an instant transfer has
//! no tendered amount. While a submission is in flight it is disabled in
//! both cases.
//!
//! State lives behind a mutex shared by every clone of the controller. The
//! lock is never held across an await point.

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::PaymentMethod;

use crate::cart::CartHandle;
use crate::collaborators::CartDisplay;
use crate::config::TotalSource;
use crate::money::{format_amount, format_change, parse_amount, round_money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Open,
    #[default]
    Closed,
}

/// Details panel shown under the payment selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPanel {
    CashDetails,
    PixDetails,
}

impl From<PaymentMethod> for PaymentPanel {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Cash => PaymentPanel::CashDetails,
            PaymentMethod::Pix => PaymentPanel::PixDetails,
        }
    }
}

/// Input that holds the focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ClientName,
    AmountTendered,
}

#[derive(Debug, Default)]
struct ModalState {
    visibility: Visibility,
    method: PaymentMethod,
    total: Decimal,
    pix_amount: String,
    tendered_input: String,
    change: Decimal,
    client_name: String,
    confirm_enabled: bool,
    focus: Option<Field>,
    in_flight: bool,
}

impl ModalState {
    fn tendered(&self) -> Decimal {
        parse_amount(&self.tendered_input)
    }

    fn reset_tendered(&mut self) {
        self.tendered_input = format_amount(self.total);
    }

    /// Recompute change and the confirm gate
    fn recompute(&mut self) {
        let tendered = self.tendered();
        // Overflows only for extreme negative input, shown as no change
        self.change = tendered.checked_sub(self.total).unwrap_or(Decimal::ZERO);
        self.confirm_enabled = match self.method {
            PaymentMethod::Cash => tendered >= self.total,
            PaymentMethod::Pix => true,
        };
    }
}

/// Read-only snapshot of the dialog
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub visibility: Visibility,
    pub method: PaymentMethod,
    pub panel: PaymentPanel,
    pub total: Decimal,
    /// Total display text (`"37.50"`)
    pub total_text: String,
    pub pix_amount_text: String,
    pub tendered_text: String,
    /// Tendered input as parsed (zero when not numeric)
    pub tendered: Decimal,
    pub change: Decimal,
    /// Change display text (`"R$ 12.50"`)
    pub change_text: String,
    pub client_name: String,
    pub confirm_enabled: bool,
    pub focus: Option<Field>,
    pub in_flight: bool,
}

impl ModalView {
    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }
}

/// Controller of the finalize-sale dialog
#[derive(Clone)]
pub struct ModalController {
    state: Arc<Mutex<ModalState>>,
    cart: CartHandle,
    display: Arc<dyn CartDisplay>,
    total_source: TotalSource,
}

impl std::fmt::Debug for ModalController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalController")
            .field("state", &self.state)
            .field("total_source", &self.total_source)
            .finish()
    }
}

impl ModalController {
    pub fn new(cart: CartHandle, display: Arc<dyn CartDisplay>, total_source: TotalSource) -> Self {
        Self {
            state: Arc::new(Mutex::new(ModalState::default())),
            cart,
            display,
            total_source,
        }
    }

    fn current_total(&self) -> Decimal {
        match self.total_source {
            TotalSource::Rendered => round_money(parse_amount(&self.display.rendered_total())),
            TotalSource::Recomputed => self.cart.total(),
        }
    }

    /// Show the dialog, seeded for an exact cash payment of the cart total
    pub fn open(&self) {
        let total = self.current_total();
        let mut state = self.state.lock();

        state.total = total;
        state.pix_amount = format_amount(total);
        state.reset_tendered();
        state.change = Decimal::ZERO;
        state.client_name.clear();
        state.method = PaymentMethod::Cash;
        state.confirm_enabled = true;
        state.visibility = Visibility::Open;
        state.focus = Some(Field::AmountTendered);

        tracing::debug!(total = %state.pix_amount, "Finalize-sale dialog opened");
    }

    /// Hide the dialog. The rest of the state is reseeded by the next `open()`.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.visibility = Visibility::Closed;
        state.focus = None;
    }

    /// Cancel and close controls
    pub fn cancel(&self) {
        self.close();
    }

    pub fn select_payment_method(&self, method: PaymentMethod) {
        let mut state = self.state.lock();
        state.method = method;
        match method {
            PaymentMethod::Cash => {
                state.reset_tendered();
                state.recompute();
            }
            // Pix leaves the tendered field and the gate as they are
            PaymentMethod::Pix => {
                state.confirm_enabled = true;
            }
        }
    }

    /// Every edit of the tendered-amount field
    pub fn input_tendered(&self, text: impl Into<String>) {
        let mut state = self.state.lock();
        state.tendered_input = text.into();
        state.recompute();
    }

    pub fn set_client_name(&self, name: impl Into<String>) {
        let mut state = self.state.lock();
        state.client_name = name.into();
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().visibility == Visibility::Open
    }

    pub fn view(&self) -> ModalView {
        let state = self.state.lock();
        ModalView {
            visibility: state.visibility,
            method: state.method,
            panel: state.method.into(),
            total: state.total,
            total_text: format_amount(state.total),
            pix_amount_text: state.pix_amount.clone(),
            tendered_text: state.tendered_input.clone(),
            tendered: state.tendered(),
            change: state.change,
            change_text: format_change(state.change),
            client_name: state.client_name.clone(),
            confirm_enabled: state.confirm_enabled && !state.in_flight,
            focus: state.focus,
            in_flight: state.in_flight,
        }
    }

    /// Mark a submission as started. `None` when one is already running.
    pub(crate) fn begin_submission(&self) -> Option<InFlightGuard> {
        let mut state = self.state.lock();
        if state.in_flight {
            return None;
        }
        state.in_flight = true;
        Some(InFlightGuard {
            state: Arc::clone(&self.state),
        })
    }
}

/// Clears the in-flight flag when the submission ends, however it ends
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    state: Arc<Mutex<ModalState>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state.lock().in_flight = false;
    }
}
