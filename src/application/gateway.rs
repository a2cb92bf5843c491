use super::builder::PaymentRequestBuilder;
use super::verifier::CallbackVerifier;
use crate::domain::callback::{CallbackResult, ExpectedPayment, IpnAcknowledgement};
use crate::domain::config::GatewayConfig;
use crate::domain::intent::{BuildResponse, PaymentIntent, SignedRequest};
use crate::domain::ports::{Clock, ClockBox, ReferenceRegistryBox};
use crate::error::{PaymentError, Result};
use crate::infrastructure::clock::SystemClock;

/// Attempts at drawing a fresh generated reference before giving up.
const MAX_REFERENCE_ATTEMPTS: usize = 5;

/// The main entry point for callers wiring the gateway into a web service.
///
/// `PaymentGateway` owns the configuration and, optionally, a reference
/// registry that guarantees a transaction reference is never handed out twice.
pub struct PaymentGateway {
    config: GatewayConfig,
    clock: ClockBox,
    registry: Option<ReferenceRegistryBox>,
}

impl PaymentGateway {
    /// Creates a gateway using the system clock and no uniqueness check.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            clock: Box::new(SystemClock),
            registry: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_registry(mut self, registry: ReferenceRegistryBox) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Signs a payment attempt.
    ///
    /// With a registry attached, a caller-supplied reference that was already
    /// issued is rejected, while a generated one is drawn again.
    pub async fn create_payment(&self, intent: &PaymentIntent) -> Result<SignedRequest> {
        let builder = PaymentRequestBuilder::new(&self.config, self.clock.as_ref());
        let Some(registry) = &self.registry else {
            return builder.build(intent);
        };

        for _ in 0..MAX_REFERENCE_ATTEMPTS {
            let request = builder.build(intent)?;
            if registry.reserve(&request.reference).await? {
                return Ok(request);
            }
            if !request.reference_generated {
                return Err(PaymentError::InvalidInputError(format!(
                    "transaction reference {} was already used",
                    request.reference
                )));
            }
            tracing::warn!(
                target: "vnpay::diagnostics",
                reference = %request.reference,
                "generated reference collided, drawing another"
            );
        }

        Err(PaymentError::InvalidInputError(
            "could not allocate a unique transaction reference".to_string(),
        ))
    }

    /// Same as [`PaymentGateway::create_payment`] but folded into the
    /// `code`/`message` envelope.
    pub async fn start_payment(&self, intent: &PaymentIntent) -> BuildResponse {
        let result = self.create_payment(intent).await;
        if let Err(e) = &result {
            tracing::warn!(target: "vnpay::audit", error = %e, "payment request refused");
        }
        result.into()
    }

    pub fn verify_callback<I, K, V>(&self, raw_params: I) -> CallbackResult
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        CallbackVerifier::new(&self.config).verify(raw_params)
    }

    /// Verifies a server notification and picks the reply for the gateway.
    pub fn acknowledge_notification<I, K, V>(
        &self,
        raw_params: I,
        expected: Option<ExpectedPayment>,
    ) -> (CallbackResult, IpnAcknowledgement)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let result = self.verify_callback(raw_params);
        let acknowledgement = IpnAcknowledgement::evaluate(&result, expected);
        (result, acknowledgement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::callback::parse_callback;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::in_memory::InMemoryReferenceRegistry;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn gateway() -> PaymentGateway {
        PaymentGateway::new(GatewayConfig::new(
            "DEMO1234",
            "SECRETKEY",
            "https://sandbox.example/paymentv2/vpcpay.html",
            "https://shop.example/return",
        ))
        .with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 2, 0, 0).unwrap()))
    }

    #[tokio::test]
    async fn test_duplicate_supplied_reference_rejected() {
        let registry = InMemoryReferenceRegistry::new();
        let gateway = gateway().with_registry(Box::new(registry.clone()));
        let intent = PaymentIntent::new(dec!(50000)).with_reference("ORDER42");

        assert!(gateway.create_payment(&intent).await.is_ok());
        let second = gateway.create_payment(&intent).await;
        assert!(matches!(second, Err(PaymentError::InvalidInputError(_))));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_generated_references_are_reserved() {
        let registry = InMemoryReferenceRegistry::new();
        let gateway = gateway().with_registry(Box::new(registry.clone()));
        let intent = PaymentIntent::new(dec!(10000));

        let first = gateway.create_payment(&intent).await.unwrap();
        let second = gateway.create_payment(&intent).await.unwrap();
        assert_ne!(first.reference, second.reference);
        assert!(registry.contains(&first.reference).await);
        assert!(registry.contains(&second.reference).await);
    }

    #[tokio::test]
    async fn test_failed_build_reserves_nothing() {
        let registry = InMemoryReferenceRegistry::new();
        let gateway = gateway().with_registry(Box::new(registry.clone()));

        let response = gateway
            .start_payment(&PaymentIntent::new(dec!(-1)).with_reference("ORDER1"))
            .await;
        assert_eq!(response.code, "99");
        assert!(response.payment_url.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_notification_round_trip() {
        let gateway = gateway();
        let request = gateway
            .create_payment(&PaymentIntent::new(dec!(50000)).with_reference("ORDER42"))
            .await
            .unwrap();

        let params = parse_callback(&request.payment_url).unwrap();
        let expected = ExpectedPayment {
            amount_minor: request.scaled_amount.value(),
            already_confirmed: false,
        };
        let (result, ack) = gateway.acknowledge_notification(&params, Some(expected));
        assert!(result.verified);
        assert_eq!(ack.rsp_code, "00");
    }
}
