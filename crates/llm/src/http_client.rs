//! HTTP Client Factory
//!
//! Provides a factory function for building the reqwest client shared by
//! API providers.

/// Build a `reqwest::Client` for provider use.
///
/// No request timeout is configured: each flow call is a single best-effort
/// round trip and the caller owns latency measurement.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("failed to build reqwest client")
}
