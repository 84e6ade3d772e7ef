//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application: the remote endpoint, the fixed shipment parameters sent with
//! every quote, and timing/retry parameters.

use crate::client::Dimensions;

/// Production freight quote endpoint (SOAP 1.1 over HTTPS).
pub const PRICING_ENDPOINT: &str = "https://edi.totalexpress.com.br/webservice_calculo_frete.php";

/// Declared shipment value sent with every quote, in BRL.
///
/// Tables are built for plain shipping without declared-value insurance.
pub const DECLARED_VALUE: f64 = 0.0;

/// Fixed package dimensions sent with every quote, in centimeters.
pub const PACKAGE_DIMENSIONS: Dimensions = Dimensions {
    height_cm: 10,
    width_cm: 15,
    depth_cm: 20,
};

/// Default delay between two consecutive quote calls, in milliseconds.
///
/// The provider enforces an implicit rate limit; one call per second keeps a
/// full two-tier run (676 calls) comfortably under it.
pub const DEFAULT_CALL_DELAY_MS: u64 = 1_000;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Retry strategy
/// Fixed wait in milliseconds before the single transient-error retry.
pub const RETRY_DELAY_MS: u64 = 500;
/// Maximum attempts per quote call (initial attempt + one immediate retry).
pub const RETRY_MAX_ATTEMPTS: usize = 2;

/// Cells between progress log lines.
pub const PROGRESS_LOG_INTERVAL_CELLS: usize = 25;

/// User-Agent header for outbound requests.
pub const USER_AGENT: &str = concat!("shipping_table/", env!("CARGO_PKG_VERSION"));
