//! Client error types

use thiserror::Error;

/// Transport-level error
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{}", .message.as_deref().unwrap_or("request failed"))]
    Api {
        status: u16,
        /// `message` field of the JSON error body, when there was one
        message: Option<String>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Server answered `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Coarse classification of a checkout failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutErrorKind {
    /// Checked locally, nothing was sent
    Precondition,
    /// Well-formed server answer with `success: false`
    Business,
    /// Network, HTTP status or decoding failure
    Transport,
}

/// Checkout flow error
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Finalize-sale dialog is not open")]
    NotOpen,

    #[error("A sale submission is already in progress")]
    InFlight,

    #[error("O carrinho está vazio. Adicione produtos antes de finalizar a venda.")]
    EmptyCart,

    #[error(
        "O valor recebido é menor que o total da venda. Por favor, ajuste o valor ou a forma de pagamento."
    )]
    InsufficientCash {
        tendered: rust_decimal::Decimal,
        total: rust_decimal::Decimal,
    },

    /// Server refused the sale
    #[error("{0}")]
    Rejected(String),

    /// Non-success HTTP status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Request never completed or the body could not be read
    #[error("{0}")]
    Transport(String),
}

impl CheckoutError {
    pub fn kind(&self) -> CheckoutErrorKind {
        match self {
            CheckoutError::NotOpen
            | CheckoutError::InFlight
            | CheckoutError::EmptyCart
            | CheckoutError::InsufficientCash { .. } => CheckoutErrorKind::Precondition,
            CheckoutError::Rejected(_) => CheckoutErrorKind::Business,
            CheckoutError::Server { .. } | CheckoutError::Transport(_) => {
                CheckoutErrorKind::Transport
            }
        }
    }
}

/// Result type for the checkout flow
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_uses_body_message() {
        let err = ClientError::Api {
            status: 500,
            message: Some("erro interno".into()),
        };
        assert_eq!(err.to_string(), "erro interno");

        let err = ClientError::Api {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "request failed");
    }

    #[test]
    fn test_checkout_error_kinds() {
        assert_eq!(CheckoutError::EmptyCart.kind(), CheckoutErrorKind::Precondition);
        assert_eq!(CheckoutError::InFlight.kind(), CheckoutErrorKind::Precondition);
        assert_eq!(
            CheckoutError::Rejected("estoque insuficiente".into()).kind(),
            CheckoutErrorKind::Business
        );
        assert_eq!(
            CheckoutError::Server {
                status: 500,
                message: "erro interno".into()
            }
            .kind(),
            CheckoutErrorKind::Transport
        );
    }
}
