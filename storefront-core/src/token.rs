//! Per-request cancellation tokens.
//!
//! A [`RequestToken`] identifies one specific downstream call. The
//! calculator creates a fresh token at issue time and *swaps* the active
//! token rather than mutating it, so closures holding an older token can
//! never affect a newer request. A response is applied only when its token
//! is still the active one and was not cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation token tied to a single downstream call.
///
/// Cloning the token shares the same underlying flag; two clones of the
/// same token compare equal under [`RequestToken::same_request`], while
/// tokens from separate [`RequestToken::new`] calls never do.
#[derive(Debug, Clone, Default)]
pub struct RequestToken {
    cancelled: Arc<AtomicBool>,
}

impl RequestToken {
    /// Creates a token for a new downstream call.
    pub fn new() -> Self {
        RequestToken {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Marks the call as cancelled.
    ///
    /// Cooperative: the in-flight call observes the flag and stops
    /// attempting to publish its result.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once the call has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `true` if both tokens identify the same downstream call.
    pub fn same_request(&self, other: &RequestToken) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let token = RequestToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_distinct_tokens_are_independent() {
        let first = RequestToken::new();
        let second = RequestToken::new();
        first.cancel();
        assert!(!second.is_cancelled());
        assert!(!first.same_request(&second));
    }

    #[test]
    fn test_same_request_for_clones() {
        let token = RequestToken::new();
        assert!(token.same_request(&token.clone()));
    }
}
