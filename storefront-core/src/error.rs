//! Error types for shipping calculations.

use thiserror::Error;

/// Fallback message shown when the endpoint gives no usable detail.
pub const GENERIC_SHIPPING_ERROR: &str = "Unable to calculate shipping. Please try again.";

/// Error type for shipping calculation attempts.
///
/// The taxonomy mirrors how failures surface to the consumer:
/// cancellations are silent, business rejections carry the server message,
/// everything else degrades to a generic user-facing message.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// The request was superseded or the consumer was torn down.
    ///
    /// Expected during normal operation and never shown to the user.
    #[error("shipping calculation cancelled")]
    Cancelled,

    /// Network interaction error.
    ///
    /// Errors occurring while talking to the shipping endpoint.
    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The endpoint answered with a non-success HTTP status.
    #[error("shipping endpoint returned HTTP status {0}")]
    Status(u16),

    /// The endpoint processed the request but declined to quote
    /// (`success: false`), optionally with a human-readable reason.
    #[error("shipping calculation rejected by endpoint")]
    Rejected {
        /// Server-provided reason, surfaced to the user when present.
        message: Option<String>,
    },

    /// The endpoint payload could not be decoded.
    #[error("malformed shipping payload: {0}")]
    Payload(String),
}

impl ShippingError {
    /// Returns `true` for the silent cancellation case.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ShippingError::Cancelled)
    }

    /// Maps the error to user-facing text.
    ///
    /// Cancellations return `None` and must not be reported. Business
    /// rejections prefer the server-provided message; every other failure
    /// collapses into [`GENERIC_SHIPPING_ERROR`].
    pub fn user_message(&self) -> Option<String> {
        match self {
            ShippingError::Cancelled => None,
            ShippingError::Rejected {
                message: Some(message),
            } => Some(message.clone()),
            _ => Some(GENERIC_SHIPPING_ERROR.to_string()),
        }
    }
}
