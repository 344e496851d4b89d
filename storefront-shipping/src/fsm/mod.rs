//! Finite state machine for the shipping calculator.

mod events;
mod states;

pub use events::CalcEvent;
pub use states::CalcState;
