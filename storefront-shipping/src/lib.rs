#![warn(missing_docs)]
//! # storefront-shipping
//!
//! Debounced, cancellable shipping-cost calculator.
//!
//! [`ShippingCalculator`] converts rapid, bursty input changes (a user
//! typing a postcode, cart edits) into at most one outstanding downstream
//! call. A fixed quiet interval must pass after the last change before a
//! call is issued; a change inside that window resets the timer and the
//! earlier input is never sent. Each issued call carries its own
//! [`RequestToken`](storefront_core::RequestToken); superseding a call
//! cancels its token, so stale responses can never overwrite fresher state
//! (last-issued wins, not last-resolved).
//!
//! ```ignore
//! use storefront_shipping::{CalculatorConfig, HttpShippingEndpoint, ShippingCalculator};
//! use storefront_core::{CalculationRequest, CartItem};
//!
//! let endpoint = HttpShippingEndpoint::new("https://shop.example/wp-json/shop/v1/shipping");
//! let calculator = ShippingCalculator::spawn(endpoint, CalculatorConfig::default());
//!
//! calculator.update(CalculationRequest::new("1145", vec![CartItem::physical(7, 1)], 49.0));
//! // ... the quiet interval elapses, one call fires, state updates follow.
//! let state = calculator.state();
//! ```

/// The calculator handle and its event-driven driver task.
pub mod calculator;

/// Calculator configuration.
pub mod config;

/// Finite state machine for the calculator.
///
/// The FSM makes the debounce/supersession lifecycle explicit: states
/// {Idle, Debouncing, InFlight, Settled} and the events that move between
/// them. The driver task in [`calculator`] owns the machine.
pub mod fsm;

/// HTTP implementation of the downstream shipping endpoint.
pub mod http;

/// Consumer-facing state snapshot.
pub mod state;

pub use calculator::ShippingCalculator;
pub use config::CalculatorConfig;
pub use http::HttpShippingEndpoint;
pub use state::ShippingState;

pub use storefront_core::{
    CalculationRequest, CartItem, RequestToken, ShippingEndpoint, ShippingError, ShippingQuote,
};
