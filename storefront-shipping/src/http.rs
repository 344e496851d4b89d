//! HTTP implementation of the shipping endpoint.
//!
//! Posts the [`CalculationRequest`] as JSON and decodes the endpoint's
//! envelope: `{success, shipping?: {cost}, message?}`. A non-2xx status or
//! `success: false` is a reportable error; the server-provided `message`
//! travels with business rejections so it can be shown to the user.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use storefront_core::{CalculationRequest, ShippingEndpoint, ShippingError, ShippingQuote};

/// Shipping endpoint talking to an HTTP service.
#[derive(Debug, Clone)]
pub struct HttpShippingEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpShippingEndpoint {
    /// Creates an endpoint with a default client.
    pub fn new(url: impl Into<String>) -> Self {
        HttpShippingEndpoint {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Creates an endpoint reusing an existing client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        HttpShippingEndpoint {
            client,
            url: url.into(),
        }
    }
}

/// Wire envelope returned by the shipping endpoint.
#[derive(Debug, Deserialize)]
struct ShippingEnvelope {
    success: bool,
    #[serde(default)]
    shipping: Option<ShippingPayload>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ShippingPayload {
    cost: f64,
}

#[async_trait]
impl ShippingEndpoint for HttpShippingEndpoint {
    async fn calculate(&self, request: CalculationRequest) -> Result<ShippingQuote, ShippingError> {
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|error| ShippingError::Transport(Box::new(error)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShippingError::Status(status.as_u16()));
        }

        let envelope: ShippingEnvelope = response
            .json()
            .await
            .map_err(|error| ShippingError::Payload(error.to_string()))?;

        if !envelope.success {
            return Err(ShippingError::Rejected {
                message: envelope.message,
            });
        }

        match envelope.shipping {
            Some(payload) => {
                debug!(cost = payload.cost, "shipping endpoint quoted");
                Ok(ShippingQuote::new(payload.cost))
            }
            None => Err(ShippingError::Payload(
                "success response missing shipping object".into(),
            )),
        }
    }
}
