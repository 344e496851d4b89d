//! The calculator handle and its driver task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};
use tracing::{Instrument, debug, info_span, warn};

use storefront_core::{
    CalculationRequest, RequestToken, ShippingEndpoint, ShippingError, ShippingQuote,
};

use crate::config::CalculatorConfig;
use crate::fsm::{CalcEvent, CalcState};
use crate::state::ShippingState;

/// Used for the disabled branch of the select loop; never actually elapses.
const IDLE_PARK: Duration = Duration::from_secs(3600);

/// Handle to a running shipping calculator.
///
/// One handle per consumer. Input changes go in through
/// [`update`](ShippingCalculator::update); output snapshots come back
/// through [`state`](ShippingCalculator::state) or a subscribed watch
/// receiver. Dropping the handle tears the driver task down and cancels
/// any in-flight call.
#[derive(Debug)]
pub struct ShippingCalculator {
    events: mpsc::UnboundedSender<CalcEvent>,
    state: watch::Receiver<ShippingState>,
}

impl ShippingCalculator {
    /// Spawns the driver task on the current tokio runtime.
    pub fn spawn<E>(endpoint: E, config: CalculatorConfig) -> Self
    where
        E: ShippingEndpoint,
    {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ShippingState::default());

        let driver = Driver {
            endpoint: Arc::new(endpoint),
            config,
            events: events_rx,
            loopback: events_tx.clone(),
            state: state_tx,
            fsm: CalcState::Idle,
        };
        tokio::spawn(driver.run().instrument(info_span!("shipping_calculator")));

        ShippingCalculator {
            events: events_tx,
            state: state_rx,
        }
    }

    /// Feeds a new input snapshot to the calculator.
    ///
    /// Calculable input supersedes anything pending or in flight and
    /// restarts the quiet interval. Non-calculable input (empty postcode
    /// or empty cart) clears result, error, and loading state immediately,
    /// with no debounce delay and no downstream call.
    pub fn update(&self, request: CalculationRequest) {
        let _ = self.events.send(CalcEvent::InputChanged(request));
    }

    /// Re-issues the last calculable input immediately, bypassing the
    /// debounce. No-op if no input was ever provided.
    pub fn retry(&self) {
        let _ = self.events.send(CalcEvent::Retry);
    }

    /// Cancels any in-flight call and stops the driver task.
    ///
    /// Also performed implicitly when the handle is dropped.
    pub fn teardown(&self) {
        let _ = self.events.send(CalcEvent::Teardown);
    }

    /// Returns the current state snapshot.
    pub fn state(&self) -> ShippingState {
        self.state.borrow().clone()
    }

    /// Returns a watch receiver observing every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ShippingState> {
        self.state.clone()
    }
}

impl Drop for ShippingCalculator {
    fn drop(&mut self) {
        let _ = self.events.send(CalcEvent::Teardown);
    }
}

/// The event loop owning the state machine.
struct Driver<E> {
    endpoint: Arc<E>,
    config: CalculatorConfig,
    events: mpsc::UnboundedReceiver<CalcEvent>,
    /// Sender handed to spawned calls so responses loop back as events.
    loopback: mpsc::UnboundedSender<CalcEvent>,
    state: watch::Sender<ShippingState>,
    fsm: CalcState,
}

impl<E> Driver<E>
where
    E: ShippingEndpoint,
{
    async fn run(mut self) {
        loop {
            let deadline = self.fsm.debounce_deadline();
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(CalcEvent::InputChanged(request)) => self.on_input_changed(request),
                    Some(CalcEvent::Retry) => self.on_retry(),
                    Some(CalcEvent::ResponseArrived { token, outcome }) => {
                        self.on_response_arrived(token, outcome)
                    }
                    Some(CalcEvent::Teardown) | None => {
                        self.cancel_in_flight();
                        debug!("calculator torn down");
                        break;
                    }
                },
                _ = sleep_until(deadline.unwrap_or_else(|| Instant::now() + IDLE_PARK)),
                    if deadline.is_some() =>
                {
                    self.on_timer_fired();
                }
            }
        }
    }

    fn on_input_changed(&mut self, request: CalculationRequest) {
        self.cancel_in_flight();

        if !request.is_calculable() {
            // Guard clause: reset synchronously, no debounce applies.
            self.fsm = CalcState::Idle;
            self.state.send_replace(ShippingState::default());
            debug!("input not calculable, cleared state");
            return;
        }

        let deadline = Instant::now() + self.config.debounce;
        debug!(postcode = %request.postcode, "input changed, debouncing");
        self.fsm = CalcState::Debouncing {
            input: request,
            deadline,
        };
    }

    fn on_timer_fired(&mut self) {
        if let CalcState::Debouncing { input, .. } =
            std::mem::replace(&mut self.fsm, CalcState::Idle)
        {
            self.issue(input);
        }
    }

    fn on_retry(&mut self) {
        self.cancel_in_flight();
        match std::mem::replace(&mut self.fsm, CalcState::Idle).last_input() {
            Some(input) => {
                debug!("retry requested, bypassing debounce");
                self.issue(input.clone());
            }
            None => debug!("retry with no prior input, ignoring"),
        }
    }

    /// Issues the downstream call for `input` with a fresh token.
    ///
    /// The previous token (if any) must already be cancelled by the caller;
    /// the active token is swapped, never mutated, so closures holding an
    /// older token cannot affect this request.
    fn issue(&mut self, input: CalculationRequest) {
        let token = RequestToken::new();
        debug!(postcode = %input.postcode, "issuing shipping calculation");

        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        let endpoint = Arc::clone(&self.endpoint);
        let loopback = self.loopback.clone();
        let call_token = token.clone();
        let request = input.clone();
        let handle = tokio::spawn(
            async move {
                let outcome = endpoint.calculate(request).await;
                // The abort races call completion; a superseded call that
                // slipped through must still not publish anything.
                if call_token.is_cancelled() {
                    return;
                }
                let _ = loopback.send(CalcEvent::ResponseArrived {
                    token: call_token,
                    outcome,
                });
            }
            .instrument(info_span!("shipping_call")),
        );

        self.fsm = CalcState::InFlight {
            input,
            token,
            abort: handle.abort_handle(),
        };
    }

    fn on_response_arrived(
        &mut self,
        token: RequestToken,
        outcome: Result<ShippingQuote, ShippingError>,
    ) {
        match std::mem::replace(&mut self.fsm, CalcState::Idle) {
            CalcState::InFlight {
                input,
                token: active,
                ..
            } if active.same_request(&token) && !token.is_cancelled() => {
                self.apply_outcome(outcome);
                self.fsm = CalcState::Settled { input };
            }
            other => {
                // Newest token wins: anything else is a stale response.
                debug!("dropping response from superseded call");
                self.fsm = other;
            }
        }
    }

    fn apply_outcome(&mut self, outcome: Result<ShippingQuote, ShippingError>) {
        match outcome {
            Ok(quote) => {
                debug!(cost = quote.cost, "shipping calculation settled");
                self.state.send_replace(ShippingState {
                    result: Some(quote),
                    is_loading: false,
                    error: None,
                });
            }
            Err(error) => match error.user_message() {
                Some(message) => {
                    warn!(%error, "shipping calculation failed");
                    self.state.send_replace(ShippingState {
                        result: None,
                        is_loading: false,
                        error: Some(message),
                    });
                }
                // A cancellation surfaced by the endpoint stays silent.
                None => self.state.send_modify(|state| state.is_loading = false),
            },
        }
    }

    /// Cancels the active token and aborts its task.
    ///
    /// The abort drops the downstream future, which tears the connection
    /// down immediately; the token covers the race where the task already
    /// finished the call and is about to publish.
    fn cancel_in_flight(&self) {
        if let CalcState::InFlight { token, abort, .. } = &self.fsm {
            token.cancel();
            abort.abort();
        }
    }
}
