//! Pricing client: one remote quote call per table cell.
//!
//! The [`PricingClient`] trait is the seam between the table generator and
//! the remote endpoint; the generator only ever sees `quote()`. The
//! production implementation, [`SoapPricingClient`], speaks the provider's
//! SOAP 1.1 contract over HTTPS with Basic authentication and retries a
//! transient connection failure exactly once after a fixed short wait.

mod envelope;
mod response;

use std::sync::Arc;

use log::debug;
use reqwest::StatusCode;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;

use crate::catalog::ServiceTier;
use crate::config::{RETRY_DELAY_MS, RETRY_MAX_ATTEMPTS};
use crate::error_handling::QuoteError;

/// Package dimensions in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Height in cm.
    pub height_cm: u32,
    /// Width in cm.
    pub width_cm: u32,
    /// Depth in cm.
    pub depth_cm: u32,
}

/// Parameters of a single quote call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteRequest {
    /// Service tier to price.
    pub tier: ServiceTier,
    /// Destination postal code; zero-padded to eight digits on the wire.
    pub destination: u32,
    /// Shipment weight in grams; converted to kilograms on the wire.
    pub weight_grams: u32,
    /// Declared shipment value in BRL.
    pub declared_value: f64,
    /// Package dimensions.
    pub dimensions: Dimensions,
}

/// A successfully parsed quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteResult {
    /// Shipping cost in BRL.
    pub money_cost: f64,
    /// Delivery time in days.
    pub time_days: u32,
}

/// A source of shipping quotes, one RPC per call.
///
/// Implementations must not suppress failures: every error reaches the
/// caller as a distinct [`QuoteError`] variant so the generator can decide
/// between skipping the cell and aborting the run.
#[allow(async_fn_in_trait)]
pub trait PricingClient {
    /// Requests a quote for one (tier, destination, weight) cell.
    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResult, QuoteError>;
}

/// Pricing client for the Total Express `calcularFrete` SOAP operation.
pub struct SoapPricingClient {
    http: Arc<reqwest::Client>,
    endpoint: String,
    username: String,
    password: String,
}

impl SoapPricingClient {
    /// Creates a client for the given endpoint and Basic-auth credentials.
    pub fn new(
        http: Arc<reqwest::Client>,
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        SoapPricingClient {
            http,
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Sends one SOAP request and returns the raw response body.
    ///
    /// Classification happens here: 401/403 become `Authentication`, any
    /// other failure to obtain a body becomes `Transport`.
    async fn dispatch(&self, envelope: &str) -> Result<String, QuoteError> {
        let response = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", "")
            .body(envelope.to_owned())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(QuoteError::Authentication {
                status: status.as_u16(),
            });
        }

        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

impl PricingClient for SoapPricingClient {
    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResult, QuoteError> {
        let envelope = envelope::build_quote_envelope(request);
        debug!(
            "calcularFrete {} cep={:08} weight={}g",
            request.tier.provider_code(),
            request.destination,
            request.weight_grams
        );

        let retry_strategy =
            FixedInterval::from_millis(RETRY_DELAY_MS).take(RETRY_MAX_ATTEMPTS - 1);
        let body = RetryIf::spawn(
            retry_strategy,
            || self.dispatch(&envelope),
            QuoteError::is_transient_transport,
        )
        .await?;

        response::parse_quote_response(&body)
    }
}
