#![allow(dead_code)]

use assert_cmd::cargo_bin;
use chrono::{TimeZone, Utc};
use std::process::Command;
use vnpay_client::GatewayConfig;
use vnpay_client::infrastructure::clock::FixedClock;

pub const TMN_CODE: &str = "DEMO1234";
pub const SECRET: &str = "TESTSECRETKEY0123456789";
pub const BASE_URL: &str = "https://sandbox.example/paymentv2/vpcpay.html";
pub const RETURN_URL: &str = "https://shop.example/payment/return";

pub fn config() -> GatewayConfig {
    GatewayConfig::new(TMN_CODE, SECRET, BASE_URL, RETURN_URL)
}

pub fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 2, 0, 0).unwrap())
}

/// The CLI with a complete gateway environment and nothing inherited.
pub fn vnpay_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin!("vnpay"));
    cmd.env_clear()
        .env("VNPAY_TMN_CODE", TMN_CODE)
        .env("VNPAY_HASH_SECRET", format!("\"{SECRET}\""))
        .env("VNPAY_URL", BASE_URL)
        .env("VNPAY_RETURN_URL", RETURN_URL);
    cmd
}
