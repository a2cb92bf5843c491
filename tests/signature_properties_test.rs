mod common;

use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use vnpay_client::application::builder::PaymentRequestBuilder;
use vnpay_client::domain::callback::parse_callback;
use vnpay_client::domain::canonical::{CanonicalParameterSet, ParamValue};
use vnpay_client::domain::signature::{SIGNATURE_PARAM, sign};
use vnpay_client::{PaymentIntent, verify_callback};

fn signed_url(intent: &PaymentIntent) -> String {
    let config = common::config();
    let clock = common::clock();
    PaymentRequestBuilder::new(&config, &clock)
        .build(intent)
        .unwrap()
        .payment_url
}

/// Re-signs a callback the way the gateway does: same fields plus the
/// gateway-asserted outcome codes.
fn gateway_callback(url: &str, response_code: &str, status: &str) -> HashMap<String, String> {
    let mut params = parse_callback(url).unwrap();
    params.remove(SIGNATURE_PARAM);
    params.insert("vnp_ResponseCode".to_string(), response_code.to_string());
    params.insert("vnp_TransactionStatus".to_string(), status.to_string());
    params.insert("vnp_TransactionNo".to_string(), "14123456".to_string());

    let set: CanonicalParameterSet = params.iter().collect();
    let signature = sign(&common::config().hash_secret, &set.encode().hash_payload).unwrap();
    params.insert(SIGNATURE_PARAM.to_string(), signature);
    params
}

#[test]
fn test_hash_payload_is_permutation_independent() {
    let mut entries: Vec<(String, ParamValue)> = vec![
        ("vnp_Amount".into(), 12_500_000_i64.into()),
        ("vnp_TxnRef".into(), "ORDER42".into()),
        ("vnp_OrderInfo".into(), "Thanh toan don hang".into()),
        ("vnp_BankCode".into(), ParamValue::Null),
        ("vnp_Locale".into(), "".into()),
        ("vnp_Flag".into(), true.into()),
        ("vnp_ReturnUrl".into(), "https://shop.example/r?a=1&b=2".into()),
    ];
    let reference = entries.iter().cloned().collect::<CanonicalParameterSet>().encode();

    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        entries.shuffle(&mut rng);
        let encoded = entries.iter().cloned().collect::<CanonicalParameterSet>().encode();
        assert_eq!(encoded, reference);
    }
    assert!(!reference.hash_payload.contains("vnp_BankCode"));
    assert!(!reference.hash_payload.contains("vnp_Locale"));
    assert!(reference.hash_payload.contains("vnp_Flag=1"));
}

#[test]
fn test_round_trip_verifies_for_varied_intents() {
    let config = common::config();
    let descriptions = ["Thanh toán đơn hàng", "Order #1 & co", "", "a/b:c,d.e-f_g", "★"];
    let mut rng = rand::thread_rng();

    for i in 0..40 {
        let amount = rust_decimal::Decimal::new(rng.gen_range(1..100_000_000), 2);
        let mut intent = PaymentIntent::new(amount)
            .with_description(descriptions[i % descriptions.len()])
            .with_client_ip("198.51.100.4");
        if i % 2 == 0 {
            intent = intent.with_reference(format!("ORD-{i}"));
        }
        if i % 3 == 0 {
            intent = intent.with_bank_code("VNBANK").with_locale("en");
        }

        let params = parse_callback(&signed_url(&intent)).unwrap();
        let result = verify_callback(&params, &config);
        assert!(result.verified, "intent {i} did not verify");
    }
}

#[test]
fn test_single_character_tamper_breaks_signature() {
    let config = common::config();
    let url = signed_url(
        &PaymentIntent::new(dec!(50000))
            .with_reference("ORDER42")
            .with_description("Thanh toan don hang 42"),
    );
    let original = parse_callback(&url).unwrap();

    for field in ["vnp_Amount", "vnp_TxnRef", "vnp_OrderInfo"] {
        let value = &original[field];
        for position in 0..value.len() {
            let mut tampered = original.clone();
            let mut chars: Vec<char> = value.chars().collect();
            chars[position] = if chars[position] == 'X' { 'Y' } else { 'X' };
            tampered.insert(field.to_string(), chars.into_iter().collect());

            let result = verify_callback(&tampered, &config);
            assert!(!result.verified, "{field} tampered at {position} still verified");
        }
    }
}

#[test]
fn test_missing_signature_never_verifies() {
    let config = common::config();
    let mut params = gateway_callback(
        &signed_url(&PaymentIntent::new(dec!(50000)).with_reference("ORDER42")),
        "00",
        "00",
    );
    params.remove(SIGNATURE_PARAM);
    assert!(!verify_callback(&params, &config).verified);

    params.insert(SIGNATURE_PARAM.to_string(), String::new());
    assert!(!verify_callback(&params, &config).verified);
}

#[test]
fn test_happy_path() {
    let config = common::config();
    let response = vnpay_client::build_payment_request(
        &PaymentIntent::new(dec!(50000)).with_reference("ORDER42"),
        &config,
    );
    assert_eq!(response.code, "00");
    assert_eq!(response.scaled_amount, Some(5_000_000));
    assert_eq!(response.transaction_reference.as_deref(), Some("ORDER42"));
    let url = response.payment_url.unwrap();
    assert!(url.contains("vnp_TxnRef=ORDER42"));

    let result = verify_callback(&gateway_callback(&url, "00", "00"), &config);
    assert!(result.verified);
    assert!(result.business_success);
    assert_eq!(result.transaction_reference, "ORDER42");
    assert_eq!(result.raw_amount, "5000000");
}

#[test]
fn test_tampered_amount() {
    let config = common::config();
    let url = signed_url(&PaymentIntent::new(dec!(50000)).with_reference("ORDER42"));
    let mut params = gateway_callback(&url, "00", "00");
    params.insert("vnp_Amount".to_string(), "100".to_string());

    let result = verify_callback(&params, &config);
    assert!(!result.verified);
    assert!(!result.is_confirmed());
}

#[test]
fn test_partial_success() {
    let config = common::config();
    let url = signed_url(&PaymentIntent::new(dec!(50000)).with_reference("ORDER42"));
    let result = verify_callback(&gateway_callback(&url, "00", "01"), &config);
    assert!(result.verified);
    assert!(!result.business_success);

    let result = verify_callback(&gateway_callback(&url, "24", "00"), &config);
    assert!(result.verified);
    assert!(!result.business_success);
}

#[test]
fn test_amount_scaling_and_rejection() {
    let config = common::config();
    let response =
        vnpay_client::build_payment_request(&PaymentIntent::new(dec!(125000.0)), &config);
    assert_eq!(response.scaled_amount, Some(12_500_000));

    for amount in [dec!(0), dec!(-1)] {
        let response = vnpay_client::build_payment_request(&PaymentIntent::new(amount), &config);
        assert_eq!(response.code, "99");
        assert!(response.payment_url.is_none());
        assert!(response.transaction_reference.is_none());
    }
}

#[test]
fn test_reference_normalization_through_builder() {
    let config = common::config();
    let response = vnpay_client::build_payment_request(
        &PaymentIntent::new(dec!(1000)).with_reference("ABC-123_xyz!!"),
        &config,
    );
    assert_eq!(response.transaction_reference.as_deref(), Some("ABC123xyz"));

    let response = vnpay_client::build_payment_request(
        &PaymentIntent::new(dec!(1000)).with_reference("!!--??"),
        &config,
    );
    let reference = response.transaction_reference.unwrap();
    assert!(!reference.is_empty());
    assert!(reference.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_secret_absent_from_url_and_errors() {
    let config = common::config();
    let response =
        vnpay_client::build_payment_request(&PaymentIntent::new(dec!(1000)), &config);
    assert!(!response.payment_url.unwrap().contains(common::SECRET));

    let mut broken = common::config();
    broken.base_url = String::new();
    let response = vnpay_client::build_payment_request(&PaymentIntent::new(dec!(1000)), &broken);
    assert_eq!(response.code, "99");
    assert!(response.message.contains("gateway URL"));
    assert!(!response.message.contains(common::SECRET));
}
