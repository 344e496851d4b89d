use std::fmt::Debug;

use storefront_core::{CalculationRequest, RequestToken, ShippingError, ShippingQuote};

/// Events driving the calculator state machine.
///
/// Input events come from the consumer handle; `ResponseArrived` is looped
/// back by the spawned downstream call. The debounce timer firing is
/// handled directly in the driver's select loop rather than through the
/// channel, so it can be cancelled by simply replacing the deadline.
pub enum CalcEvent {
    /// The inputs changed; supersedes whatever is pending or in flight.
    InputChanged(CalculationRequest),
    /// Re-issue the last input immediately, bypassing the debounce.
    Retry,
    /// A downstream call finished. Applied only if `token` is still the
    /// active, non-cancelled one.
    ResponseArrived {
        /// Token the call was issued with.
        token: RequestToken,
        /// What the call produced.
        outcome: Result<ShippingQuote, ShippingError>,
    },
    /// The consumer is going away; cancel everything and stop.
    Teardown,
}

impl Debug for CalcEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcEvent::InputChanged(_) => f.write_str("CalcEvent::InputChanged"),
            CalcEvent::Retry => f.write_str("CalcEvent::Retry"),
            CalcEvent::ResponseArrived { .. } => f.write_str("CalcEvent::ResponseArrived"),
            CalcEvent::Teardown => f.write_str("CalcEvent::Teardown"),
        }
    }
}
