use super::amount::{Amount, MinorAmount};
use super::canonical::CanonicalParameterSet;
use super::config::{DEFAULT_LOCALE, clean_value};
use super::reference::TransactionReference;
use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Locales the payment page can render.
pub const SUPPORTED_LOCALES: [&str; 2] = ["vn", "en"];

/// What the caller wants to charge. Only `amount` is mandatory; everything else
/// falls back to configuration or is generated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Major currency units.
    pub amount: Decimal,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub return_url: Option<String>,
    pub bank_code: Option<String>,
    pub locale: Option<String>,
    /// Client address candidates, most trusted first (e.g. forwarded header,
    /// then socket peer).
    #[serde(default)]
    pub client_ips: Vec<String>,
}

impl PaymentIntent {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_return_url(mut self, return_url: impl Into<String>) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    pub fn with_bank_code(mut self, bank_code: impl Into<String>) -> Self {
        self.bank_code = Some(bank_code.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ips.push(ip.into());
        self
    }
}

/// Picks the intent locale when supported, otherwise the configured default,
/// otherwise [`DEFAULT_LOCALE`].
pub fn resolve_locale(requested: Option<&str>, default: &str) -> String {
    requested
        .map(|l| l.trim().to_ascii_lowercase())
        .filter(|l| SUPPORTED_LOCALES.contains(&l.as_str()))
        .or_else(|| Some(clean_value(default).to_ascii_lowercase()).filter(|l| !l.is_empty()))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Bank codes are upper-case alphanumerics; anything else is stripped.
pub fn normalize_bank_code(raw: Option<&str>) -> Option<String> {
    let code: String = raw?
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    (!code.is_empty()).then_some(code)
}

/// A fully signed payment attempt. Nothing here is persisted by this crate;
/// the caller stores `reference` to correlate the later callback.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    pub params: CanonicalParameterSet,
    pub signature: String,
    pub payment_url: String,
    pub reference: TransactionReference,
    /// True when the reference was generated rather than supplied.
    pub reference_generated: bool,
    pub amount: Amount,
    pub scaled_amount: MinorAmount,
    pub create_date: String,
    pub expire_date: String,
}

pub const SUCCESS_RESPONSE_CODE: &str = "00";
pub const FAILURE_RESPONSE_CODE: &str = "99";

/// Message end users see when a payment cannot be started.
pub const CANNOT_START_PAYMENT: &str = "Cannot start payment";

/// Envelope returned to callers that prefer a result object over `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaled_amount: Option<i64>,
}

impl BuildResponse {
    pub fn success(request: &SignedRequest) -> Self {
        Self {
            code: SUCCESS_RESPONSE_CODE.to_string(),
            message: "success".to_string(),
            payment_url: Some(request.payment_url.clone()),
            transaction_reference: Some(request.reference.to_string()),
            scaled_amount: Some(request.scaled_amount.value()),
        }
    }

    /// Error text carries no signature material, only which check failed.
    pub fn failure(error: &PaymentError) -> Self {
        Self {
            code: FAILURE_RESPONSE_CODE.to_string(),
            message: error.to_string(),
            payment_url: None,
            transaction_reference: None,
            scaled_amount: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_RESPONSE_CODE
    }
}

impl From<Result<SignedRequest, PaymentError>> for BuildResponse {
    fn from(result: Result<SignedRequest, PaymentError>) -> Self {
        match result {
            Ok(request) => Self::success(&request),
            Err(error) => Self::failure(&error),
        }
    }
}
