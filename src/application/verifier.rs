use crate::domain::callback::CallbackResult;
use crate::domain::canonical::CanonicalParameterSet;
use crate::domain::codes::{ResponseCode, TransactionStatus};
use crate::domain::config::GatewayConfig;
use crate::domain::fields::{self, GATEWAY_PREFIX};
use crate::domain::signature::{self, SIGNATURE_PARAM, SIGNATURE_TYPE_PARAM};
use std::collections::HashMap;

/// Checks callbacks from either trust boundary (browser return or server
/// notification) with the same logic.
///
/// Never fails: anything missing or malformed resolves to "not verified" or
/// "not successful" with empty codes.
pub struct CallbackVerifier<'a> {
    config: &'a GatewayConfig,
}

impl<'a> CallbackVerifier<'a> {
    pub fn new(config: &'a GatewayConfig) -> Self {
        Self { config }
    }

    /// Accepts any flat key/value collection. Keys without the gateway prefix
    /// are ignored; a repeated key keeps its last value.
    pub fn verify<I, K, V>(&self, raw_params: I) -> CallbackResult
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let gateway_fields: HashMap<String, String> = raw_params
            .into_iter()
            .filter(|(k, _)| k.as_ref().starts_with(GATEWAY_PREFIX))
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        let field = |name: &str| gateway_fields.get(name).cloned().unwrap_or_default();

        let signed: CanonicalParameterSet = gateway_fields
            .iter()
            .filter(|(k, _)| k.as_str() != SIGNATURE_PARAM && k.as_str() != SIGNATURE_TYPE_PARAM)
            .collect();
        let provided = field(SIGNATURE_PARAM);
        let verified = signature::verify(
            &self.config.hash_secret,
            &signed.encode().hash_payload,
            &provided,
        );

        let response_code = ResponseCode::from_code(field(fields::RESPONSE_CODE).trim());
        let transaction_status =
            TransactionStatus::from_code(field(fields::TRANSACTION_STATUS).trim());
        let business_success = response_code.is_success() && transaction_status.is_success();

        let result = CallbackResult {
            verified,
            business_success,
            transaction_reference: field(fields::TXN_REF),
            response_code,
            transaction_status,
            raw_amount: field(fields::AMOUNT),
            gateway_transaction_no: field(fields::TRANSACTION_NO),
            bank_code: field(fields::BANK_CODE),
            pay_date: field(fields::PAY_DATE),
        };

        if verified {
            tracing::info!(
                target: "vnpay::audit",
                reference = %result.transaction_reference,
                response_code = result.response_code.code(),
                transaction_status = result.transaction_status.code(),
                business_success,
                outcome = result.response_code.description(),
                "callback verified"
            );
        } else {
            tracing::warn!(
                target: "vnpay::audit",
                reference = %result.transaction_reference,
                signature_present = !provided.trim().is_empty(),
                support_reference = %result.support_reference(),
                "callback signature rejected"
            );
        }
        result
    }
}
