use crate::domain::amount::Amount;
use crate::domain::canonical::CanonicalParameterSet;
use crate::domain::config::{DEFAULT_ORDER_TYPE, DEFAULT_VERSION, GatewayConfig, clean_value};
use crate::domain::description::OrderDescription;
use crate::domain::fields;
use crate::domain::intent::{PaymentIntent, SignedRequest, normalize_bank_code, resolve_locale};
use crate::domain::ports::Clock;
use crate::domain::reference::TransactionReference;
use crate::domain::signature::{self, SIGNATURE_PARAM};
use crate::domain::timestamp::PaymentWindow;
use crate::error::Result;
use crate::infrastructure::ip::resolve_client_ip;

fn or_default(value: &str, default: &str) -> String {
    Some(clean_value(value))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Turns a [`PaymentIntent`] into a signed redirect URL.
///
/// Configuration and amount are validated before anything is signed, so a
/// failed build never yields a partial URL.
pub struct PaymentRequestBuilder<'a> {
    config: &'a GatewayConfig,
    clock: &'a dyn Clock,
}

impl<'a> PaymentRequestBuilder<'a> {
    pub fn new(config: &'a GatewayConfig, clock: &'a dyn Clock) -> Self {
        Self { config, clock }
    }

    pub fn build(&self, intent: &PaymentIntent) -> Result<SignedRequest> {
        self.config.validate()?;
        let amount = Amount::new(intent.amount)?;
        let scaled_amount = amount.to_minor()?;

        let now = self.clock.now();
        let (reference, reference_generated) =
            TransactionReference::resolve(intent.reference.as_deref(), now);
        let description = OrderDescription::first_usable([
            intent.description.as_deref().unwrap_or_default(),
            self.config.default_order_info.as_str(),
        ]);
        let return_url = intent
            .return_url
            .as_deref()
            .map(clean_value)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| clean_value(&self.config.return_url));
        let version = or_default(&self.config.version, DEFAULT_VERSION);
        let order_type = or_default(&self.config.default_order_type, DEFAULT_ORDER_TYPE);
        let window = PaymentWindow::starting_at(now, self.config.expire_minutes)?;

        let mut params = CanonicalParameterSet::new();
        params.insert(fields::VERSION, version);
        params.insert(fields::COMMAND, fields::PAY_COMMAND);
        params.insert(fields::TERMINAL_CODE, clean_value(&self.config.terminal_code));
        params.insert(fields::AMOUNT, scaled_amount.value());
        params.insert(fields::CURRENCY, fields::CURRENCY_VND);
        params.insert(fields::TXN_REF, reference.as_str());
        params.insert(fields::ORDER_INFO, description.as_str());
        params.insert(fields::ORDER_TYPE, order_type);
        params.insert(
            fields::LOCALE,
            resolve_locale(intent.locale.as_deref(), &self.config.default_locale),
        );
        params.insert(fields::RETURN_URL, return_url);
        params.insert(fields::IP_ADDR, resolve_client_ip(&intent.client_ips));
        params.insert(fields::CREATE_DATE, window.create_date.as_str());
        params.insert(fields::EXPIRE_DATE, window.expire_date.as_str());
        params.insert(
            fields::BANK_CODE,
            normalize_bank_code(intent.bank_code.as_deref()),
        );

        let encoded = params.encode();
        let signature = signature::sign(&self.config.hash_secret, &encoded.hash_payload)?;

        let base_url = clean_value(&self.config.base_url);
        let separator = if base_url.contains('?') { '&' } else { '?' };
        let payment_url = format!(
            "{base_url}{separator}{}{SIGNATURE_PARAM}={signature}",
            encoded.query_string
        );

        tracing::info!(
            target: "vnpay::audit",
            reference = %reference,
            reference_generated,
            amount = %amount,
            scaled_amount = scaled_amount.value(),
            expire_date = %window.expire_date,
            "payment request signed"
        );
        if self.config.debug {
            tracing::debug!(
                target: "vnpay::audit",
                reference = %reference,
                hash_payload = %encoded.hash_payload,
                "canonical payload"
            );
        }

        Ok(SignedRequest {
            params,
            signature,
            payment_url,
            reference,
            reference_generated,
            amount,
            scaled_amount,
            create_date: window.create_date,
            expire_date: window.expire_date,
        })
    }
}
