use std::fmt::Debug;

use storefront_core::{CalculationRequest, RequestToken};
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// State of the calculator lifecycle for one consumer.
///
/// Transitions:
///
/// - `Idle → Debouncing` on calculable input
/// - `Debouncing → Debouncing` on further input (timer reset)
/// - `Debouncing → InFlight` when the quiet interval elapses, or
///   immediately on retry
/// - `InFlight → Settled` when the active token's response arrives
/// - any state `→ Idle` on non-calculable input or teardown
///
/// `Settled` keeps the last issued input so a retry can re-issue it
/// without waiting for a new input change.
pub enum CalcState {
    /// Nothing to calculate; output state is cleared.
    Idle,
    /// A calculable input is waiting out the quiet interval.
    Debouncing {
        /// The input that will be issued if no further change arrives.
        input: CalculationRequest,
        /// When the quiet interval elapses.
        deadline: Instant,
    },
    /// A downstream call is outstanding.
    InFlight {
        /// The issued input, kept for retry.
        input: CalculationRequest,
        /// Token identifying the outstanding call.
        token: RequestToken,
        /// Aborts the call's task, dropping the downstream request.
        abort: AbortHandle,
    },
    /// The last issued call has resolved; output state holds the outcome.
    Settled {
        /// The last issued input, kept for retry.
        input: CalculationRequest,
    },
}

impl CalcState {
    /// Returns the debounce deadline while waiting out the quiet interval.
    pub fn debounce_deadline(&self) -> Option<Instant> {
        match self {
            CalcState::Debouncing { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    /// Returns the most recent calculable input, if any.
    pub fn last_input(&self) -> Option<&CalculationRequest> {
        match self {
            CalcState::Idle => None,
            CalcState::Debouncing { input, .. }
            | CalcState::InFlight { input, .. }
            | CalcState::Settled { input } => Some(input),
        }
    }
}

impl Debug for CalcState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcState::Idle => f.write_str("CalcState::Idle"),
            CalcState::Debouncing { .. } => f.write_str("CalcState::Debouncing"),
            CalcState::InFlight { .. } => f.write_str("CalcState::InFlight"),
            CalcState::Settled { .. } => f.write_str("CalcState::Settled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::CartItem;

    fn request() -> CalculationRequest {
        CalculationRequest::new("1145", vec![CartItem::physical(1, 1)], 10.0)
    }

    #[tokio::test]
    async fn test_deadline_only_while_debouncing() {
        assert!(CalcState::Idle.debounce_deadline().is_none());
        let state = CalcState::Debouncing {
            input: request(),
            deadline: Instant::now(),
        };
        assert!(state.debounce_deadline().is_some());
        let task = tokio::spawn(async {});
        let state = CalcState::InFlight {
            input: request(),
            token: RequestToken::new(),
            abort: task.abort_handle(),
        };
        assert!(state.debounce_deadline().is_none());
    }

    #[test]
    fn test_last_input_survives_settling() {
        let state = CalcState::Settled { input: request() };
        assert_eq!(state.last_input().map(|i| i.postcode.as_str()), Some("1145"));
        assert!(CalcState::Idle.last_input().is_none());
    }
}
