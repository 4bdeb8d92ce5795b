//! Sale submission
//!
//! Validates the dialog, serializes the cart and posts it to the back
//! office. Every failure ends in exactly one alert; nothing is retried.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::{FinalizeSaleResponse, PaymentMethod, SaleId, SaleItemPayload, SaleRequest};

use crate::cart::CartHandle;
use crate::collaborators::{CartDisplay, Notifier, ProductSearch};
use crate::error::{CheckoutError, CheckoutResult, ClientError, ClientResult};
use crate::http::HttpClient;
use crate::modal::{ModalController, ModalView};

/// Fallback when an HTTP error body carries no message
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erro desconhecido ao finalizar a venda.";
/// Fallback when the server rejects a sale without saying why
pub const UNKNOWN_DETAILS_MESSAGE: &str = "Detalhes do erro desconhecidos.";

const FAILURE_PREFIX: &str = "Erro ao finalizar a venda: ";

/// Sale values captured from the dialog at confirmation time
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub client_name: String,
    pub payment_method: PaymentMethod,
    pub amount_tendered: Decimal,
    pub total: Decimal,
}

impl SaleDraft {
    pub fn from_view(view: &ModalView) -> Self {
        Self {
            client_name: view.client_name.trim().to_string(),
            payment_method: view.method,
            amount_tendered: view.tendered,
            total: view.total,
        }
    }

    /// Cash must cover the total. Pix is not checked.
    pub fn validate(&self) -> CheckoutResult<()> {
        if self.payment_method == PaymentMethod::Cash && self.amount_tendered < self.total {
            return Err(CheckoutError::InsufficientCash {
                tendered: self.amount_tendered,
                total: self.total,
            });
        }
        Ok(())
    }

    pub fn into_request(self, itens: Vec<SaleItemPayload>) -> SaleRequest {
        SaleRequest {
            itens,
            nome_cliente: self.client_name,
            forma_pagamento: self.payment_method,
            valor_recebido: self.amount_tendered,
            total_venda: self.total,
        }
    }
}

/// Confirmed sale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleReceipt {
    pub sale_id: Option<SaleId>,
    pub message: Option<String>,
}

impl SaleReceipt {
    pub fn confirmation(&self) -> String {
        match self.sale_id {
            Some(id) => format!("Venda finalizada com sucesso! ID da Venda: {}", id),
            None => "Venda finalizada com sucesso!".to_string(),
        }
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

/// Map the HTTP exchange onto the checkout outcome
pub fn interpret(outcome: ClientResult<FinalizeSaleResponse>) -> CheckoutResult<SaleReceipt> {
    match outcome {
        Ok(response) if response.success => Ok(SaleReceipt {
            sale_id: response.venda_id,
            message: response.message,
        }),
        Ok(response) => Err(CheckoutError::Rejected(
            non_empty(response.message).unwrap_or_else(|| UNKNOWN_DETAILS_MESSAGE.to_string()),
        )),
        Err(ClientError::Api { status, message }) => Err(CheckoutError::Server {
            status,
            message: non_empty(message).unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
        }),
        Err(ClientError::InvalidResponse(message)) => Err(CheckoutError::Transport(message)),
        Err(other) => Err(CheckoutError::Transport(other.to_string())),
    }
}

/// Finalize-sale flow bound to one dialog and one cart
pub struct SubmissionFlow<C> {
    pub(crate) modal: ModalController,
    pub(crate) cart: CartHandle,
    pub(crate) http: C,
    pub(crate) display: Arc<dyn CartDisplay>,
    pub(crate) search: Arc<dyn ProductSearch>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) endpoint: String,
}

impl<C: HttpClient> SubmissionFlow<C> {
    /// Dialog controller, for the open/close/method/input handlers
    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn cart(&self) -> &CartHandle {
        &self.cart
    }

    /// Confirm handler
    pub async fn confirm(&self) -> CheckoutResult<SaleReceipt> {
        let view = self.modal.view();
        if !view.is_open() {
            return Err(CheckoutError::NotOpen);
        }
        let _guard = self
            .modal
            .begin_submission()
            .ok_or(CheckoutError::InFlight)?;

        if self.cart.is_empty() {
            let err = CheckoutError::EmptyCart;
            self.notifier.alert(&err.to_string());
            self.modal.close();
            return Err(err);
        }

        let draft = SaleDraft::from_view(&view);
        if let Err(err) = draft.validate() {
            self.notifier.alert(&err.to_string());
            return Err(err);
        }

        let request = draft.into_request(self.cart.payload());
        tracing::debug!(?request, "Submitting sale");

        let outcome = self
            .http
            .post::<FinalizeSaleResponse, _>(&self.endpoint, &request)
            .await;

        match interpret(outcome) {
            Ok(receipt) => {
                self.complete(&receipt).await;
                Ok(receipt)
            }
            Err(err) => {
                match &err {
                    CheckoutError::Rejected(message) => {
                        tracing::warn!(%message, "Sale rejected by server");
                    }
                    other => {
                        tracing::error!(error = %other, "Finalize-sale request failed");
                    }
                }
                self.notifier.alert(&format!("{}{}", FAILURE_PREFIX, err));
                Err(err)
            }
        }
    }

    async fn complete(&self, receipt: &SaleReceipt) {
        tracing::info!(sale_id = ?receipt.sale_id, "Sale finalized");
        self.notifier.alert(&receipt.confirmation());

        self.cart.clear();
        self.display.refresh(&self.cart.items());

        self.search.clear_query();
        if let Err(e) = self.search.refresh().await {
            tracing::warn!(error = %e, "Product search refresh failed after sale");
        }

        self.modal.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_trims_client_name_and_validates_cash() {
        let draft = SaleDraft {
            client_name: "  Ana  ".trim().to_string(),
            payment_method: PaymentMethod::Cash,
            amount_tendered: Decimal::new(1000, 2),
            total: Decimal::new(1001, 2),
        };
        assert!(matches!(
            draft.validate(),
            Err(CheckoutError::InsufficientCash { .. })
        ));

        let pix = SaleDraft {
            payment_method: PaymentMethod::Pix,
            ..draft
        };
        assert!(pix.validate().is_ok());
    }

    #[test]
    fn test_interpret_success() {
        let response: FinalizeSaleResponse =
            serde_json::from_value(json!({ "success": true, "venda_id": 42 })).unwrap();
        let receipt = interpret(Ok(response)).unwrap();
        assert_eq!(receipt.sale_id, Some(SaleId(42)));
        assert_eq!(
            receipt.confirmation(),
            "Venda finalizada com sucesso! ID da Venda: 42"
        );
    }

    #[test]
    fn test_interpret_business_failure() {
        let response: FinalizeSaleResponse = serde_json::from_value(
            json!({ "success": false, "message": "estoque insuficiente" }),
        )
        .unwrap();
        match interpret(Ok(response)) {
            Err(CheckoutError::Rejected(message)) => assert_eq!(message, "estoque insuficiente"),
            other => panic!("unexpected {:?}", other),
        }

        let response: FinalizeSaleResponse =
            serde_json::from_value(json!({ "success": false, "message": "" })).unwrap();
        match interpret(Ok(response)) {
            Err(CheckoutError::Rejected(message)) => {
                assert_eq!(message, UNKNOWN_DETAILS_MESSAGE)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_interpret_http_errors() {
        let err = interpret(Err(ClientError::Api {
            status: 500,
            message: Some("erro interno".into()),
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "erro interno");

        let err = interpret(Err(ClientError::Api {
            status: 502,
            message: None,
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_ERROR_MESSAGE);

        let err = interpret(Err(ClientError::InvalidResponse("bad json".into()))).unwrap_err();
        assert!(matches!(err, CheckoutError::Transport(ref m) if m == "bad json"));
    }
}
