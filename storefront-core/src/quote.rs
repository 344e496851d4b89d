//! Successful shipping calculation outcome.

use serde::{Deserialize, Serialize};

/// The result of a successful shipping calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    /// Shipping cost in the shop currency.
    pub cost: f64,
}

impl ShippingQuote {
    /// Creates a quote with the given cost.
    pub fn new(cost: f64) -> Self {
        ShippingQuote { cost }
    }

    /// Returns `true` if shipping is free.
    ///
    /// Derived state: free shipping holds exactly when the cost is zero.
    pub fn is_free_shipping(&self) -> bool {
        self.cost == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_shipping_iff_zero_cost() {
        assert!(ShippingQuote::new(0.0).is_free_shipping());
        assert!(!ShippingQuote::new(0.01).is_free_shipping());
        assert!(!ShippingQuote::new(20.0).is_free_shipping());
    }
}
