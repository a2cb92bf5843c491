use super::codes::{ResponseCode, TransactionStatus};
use crate::error::PaymentError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Message end users see when a callback does not confirm the payment.
pub const PAYMENT_NOT_CONFIRMED: &str = "Payment not confirmed";
pub const PAYMENT_CONFIRMED: &str = "Payment confirmed";

/// Decodes a raw query string (with or without the leading `?`) into the flat
/// map the verifier consumes. Repeated keys keep the last value.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    let query = query.trim().trim_start_matches('?');
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Accepts either a full URL (browser return) or a bare query string
/// (server notification body or logged query).
pub fn parse_callback(input: &str) -> Result<HashMap<String, String>, PaymentError> {
    let input = input.trim();
    if input.contains("://") {
        let url = Url::parse(input)
            .map_err(|e| PaymentError::InvalidInputError(format!("callback URL: {e}")))?;
        Ok(url.query_pairs().into_owned().collect())
    } else {
        Ok(parse_query(input))
    }
}

/// Outcome of checking one callback. Computed fresh on every call.
///
/// `verified` and `business_success` are independent: a genuine callback can
/// report a failed or unsettled payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallbackResult {
    pub verified: bool,
    pub business_success: bool,
    pub transaction_reference: String,
    pub response_code: ResponseCode,
    pub transaction_status: TransactionStatus,
    /// Minor units as echoed by the gateway, unconverted.
    pub raw_amount: String,
    pub gateway_transaction_no: String,
    pub bank_code: String,
    pub pay_date: String,
}

impl CallbackResult {
    /// Genuine and settled.
    pub fn is_confirmed(&self) -> bool {
        self.verified && self.business_success
    }

    pub fn amount_minor(&self) -> Option<i64> {
        self.raw_amount.trim().parse().ok()
    }

    /// Generic text safe to show the customer.
    pub fn customer_message(&self) -> &'static str {
        if self.is_confirmed() {
            PAYMENT_CONFIRMED
        } else {
            PAYMENT_NOT_CONFIRMED
        }
    }

    /// Short code support staff can match against audit logs, so raw gateway
    /// codes never reach the customer verbatim.
    pub fn support_reference(&self) -> String {
        format!(
            "{}-R{}-S{}",
            if self.verified { "V" } else { "U" },
            or_dash(self.response_code.code()),
            or_dash(self.transaction_status.code()),
        )
    }
}

fn or_dash(code: &str) -> &str {
    if code.is_empty() { "--" } else { code }
}

/// What the merchant knows about the order a notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedPayment {
    pub amount_minor: i64,
    /// The order already reached a final state from an earlier notification.
    pub already_confirmed: bool,
}

/// Reply body the gateway expects from the server notification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpnAcknowledgement {
    #[serde(rename = "RspCode")]
    pub rsp_code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl IpnAcknowledgement {
    fn new(code: &str, message: &str) -> Self {
        Self {
            rsp_code: code.to_string(),
            message: message.to_string(),
        }
    }

    /// Chooses the acknowledgement for a verified-or-not callback.
    ///
    /// `expected` is `None` when the merchant has no order for the reference.
    /// A failed payment that is genuine still acknowledges with `00`: the
    /// notification was received and recorded.
    pub fn evaluate(result: &CallbackResult, expected: Option<ExpectedPayment>) -> Self {
        if !result.verified {
            return Self::new("97", "Invalid signature");
        }
        let Some(expected) = expected else {
            return Self::new("01", "Order not found");
        };
        match result.amount_minor() {
            None => Self::new("99", "Unknown error"),
            Some(amount) if amount != expected.amount_minor => Self::new("04", "Invalid amount"),
            Some(_) if expected.already_confirmed => Self::new("02", "Order already confirmed"),
            Some(_) => Self::new("00", "Confirm Success"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(verified: bool, amount: &str) -> CallbackResult {
        CallbackResult {
            verified,
            business_success: true,
            transaction_reference: "ORDER42".to_string(),
            response_code: ResponseCode::Success,
            transaction_status: TransactionStatus::Success,
            raw_amount: amount.to_string(),
            gateway_transaction_no: String::new(),
            bank_code: String::new(),
            pay_date: String::new(),
        }
    }

    #[test]
    fn test_parse_query_decodes_plus_and_percent() {
        let params = parse_query("?vnp_OrderInfo=Thanh+toan&vnp_ReturnUrl=https%3A%2F%2Fa.b%2Fr");
        assert_eq!(params["vnp_OrderInfo"], "Thanh toan");
        assert_eq!(params["vnp_ReturnUrl"], "https://a.b/r");
    }

    #[test]
    fn test_parse_callback_accepts_url() {
        let params = parse_callback("https://shop.example/return?vnp_TxnRef=ORDER42&x=1").unwrap();
        assert_eq!(params["vnp_TxnRef"], "ORDER42");
        assert_eq!(params["x"], "1");
    }

    #[test]
    fn test_parse_callback_rejects_broken_url() {
        assert!(matches!(
            parse_callback("https://"),
            Err(PaymentError::InvalidInputError(_))
        ));
    }

    #[test]
    fn test_ipn_acknowledgement_codes() {
        let expected = ExpectedPayment {
            amount_minor: 5_000_000,
            already_confirmed: false,
        };
        let ack = |r: &CallbackResult, e| IpnAcknowledgement::evaluate(r, e).rsp_code;

        assert_eq!(ack(&result(false, "5000000"), Some(expected)), "97");
        assert_eq!(ack(&result(true, "5000000"), None), "01");
        assert_eq!(ack(&result(true, "4000000"), Some(expected)), "04");
        assert_eq!(ack(&result(true, ""), Some(expected)), "99");
        assert_eq!(ack(&result(true, "5000000"), Some(expected)), "00");
        let confirmed = ExpectedPayment {
            already_confirmed: true,
            ..expected
        };
        assert_eq!(ack(&result(true, "5000000"), Some(confirmed)), "02");
    }

    #[test]
    fn test_ipn_acknowledgement_wire_names() {
        let json = serde_json::to_string(&IpnAcknowledgement::new("00", "Confirm Success")).unwrap();
        assert_eq!(json, r#"{"RspCode":"00","Message":"Confirm Success"}"#);
    }

    #[test]
    fn test_customer_message_and_support_reference() {
        let mut r = result(true, "1");
        assert_eq!(r.customer_message(), PAYMENT_CONFIRMED);
        r.transaction_status = TransactionStatus::Incomplete;
        r.business_success = false;
        assert_eq!(r.customer_message(), PAYMENT_NOT_CONFIRMED);
        assert_eq!(r.support_reference(), "V-R00-S01");
        r.response_code = ResponseCode::Missing;
        r.verified = false;
        assert_eq!(r.support_reference(), "U-R---S01");
    }
}
