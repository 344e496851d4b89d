//! Trait for calling the downstream shipping endpoint.

use async_trait::async_trait;

use crate::{CalculationRequest, ShippingError, ShippingQuote};

/// Trait for the downstream shipping-cost computation.
///
/// This trait is transport-agnostic: the calculator only cares that the
/// endpoint turns a [`CalculationRequest`] into a [`ShippingQuote`] or a
/// [`ShippingError`]. The production implementation posts to an HTTP
/// endpoint; tests substitute scripted implementations.
///
/// # Examples
///
/// ```rust,ignore
/// use storefront_core::{ShippingEndpoint, ShippingQuote};
///
/// struct FlatRate;
///
/// #[async_trait::async_trait]
/// impl ShippingEndpoint for FlatRate {
///     async fn calculate(
///         &self,
///         _request: CalculationRequest,
///     ) -> Result<ShippingQuote, ShippingError> {
///         Ok(ShippingQuote::new(4.99))
///     }
/// }
/// ```
#[async_trait]
pub trait ShippingEndpoint: Send + Sync + 'static {
    /// Computes a shipping quote for the given request.
    async fn calculate(&self, request: CalculationRequest) -> Result<ShippingQuote, ShippingError>;
}

#[async_trait]
impl<E> ShippingEndpoint for std::sync::Arc<E>
where
    E: ShippingEndpoint,
{
    async fn calculate(&self, request: CalculationRequest) -> Result<ShippingQuote, ShippingError> {
        self.as_ref().calculate(request).await
    }
}
