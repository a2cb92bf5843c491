//! Application layer: request building, callback verification and the
//! `PaymentGateway` service that ties them to a clock and reference registry.
//!
//! The free functions below are the stateless entry points for callers that
//! already hold a [`GatewayConfig`].

pub mod builder;
pub mod gateway;
pub mod verifier;

use crate::domain::callback::CallbackResult;
use crate::domain::config::GatewayConfig;
use crate::domain::intent::{BuildResponse, PaymentIntent};
use crate::infrastructure::clock::SystemClock;
use builder::PaymentRequestBuilder;
use verifier::CallbackVerifier;

/// Builds and signs a payment request, reporting failures as `code = "99"`.
pub fn build_payment_request(intent: &PaymentIntent, config: &GatewayConfig) -> BuildResponse {
    PaymentRequestBuilder::new(config, &SystemClock)
        .build(intent)
        .into()
}

/// Verifies a callback's signature and business outcome.
pub fn verify_callback<I, K, V>(raw_params: I, config: &GatewayConfig) -> CallbackResult
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    CallbackVerifier::new(config).verify(raw_params)
}
