//! Calculator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Configuration for [`ShippingCalculator`](crate::ShippingCalculator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Quiet interval after the last input change before a call is issued.
    #[serde(with = "humantime_serde", default = "default_debounce")]
    pub debounce: Duration,
}

fn default_debounce() -> Duration {
    DEFAULT_DEBOUNCE
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}
