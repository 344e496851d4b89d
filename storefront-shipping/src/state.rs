//! Consumer-facing calculator state.

use storefront_core::ShippingQuote;

/// Snapshot of the calculator as seen by a consumer.
///
/// Published through a `tokio::sync::watch` channel; every mutation by the
/// driver task replaces the whole snapshot, so readers always observe a
/// consistent triple.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShippingState {
    /// The latest quote, if any. Cleared on failure and on input reset.
    pub result: Option<ShippingQuote>,
    /// `true` while a downstream call is outstanding.
    pub is_loading: bool,
    /// User-facing error text, if the last attempt failed.
    pub error: Option<String>,
}

impl ShippingState {
    /// Shipping cost of the current quote, `0.0` when there is none.
    pub fn cost(&self) -> f64 {
        self.result.map(|quote| quote.cost).unwrap_or(0.0)
    }

    /// `true` exactly when there is a quote and its cost is zero.
    pub fn is_free_shipping(&self) -> bool {
        self.result
            .map(|quote| quote.is_free_shipping())
            .unwrap_or(false)
    }
}
