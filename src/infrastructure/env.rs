use crate::domain::config::{
    DEFAULT_EXPIRE_MINUTES, DEFAULT_LOCALE, DEFAULT_ORDER_TYPE, DEFAULT_VERSION, GatewayConfig,
    HashSecret, clean_value,
};

pub const TMN_CODE: &str = "VNPAY_TMN_CODE";
pub const HASH_SECRET: &str = "VNPAY_HASH_SECRET";
pub const URL: &str = "VNPAY_URL";
pub const RETURN_URL: &str = "VNPAY_RETURN_URL";
pub const VERSION: &str = "VNPAY_VERSION";
pub const ORDER_INFO: &str = "VNPAY_ORDER_INFO";
pub const ORDER_TYPE: &str = "VNPAY_ORDER_TYPE";
pub const LOCALE: &str = "VNPAY_LOCALE";
pub const EXPIRE_MINUTES: &str = "VNPAY_EXPIRE_MINUTES";
pub const DEBUG: &str = "VNPAY_DEBUG";

impl GatewayConfig {
    /// Reads the gateway settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Missing optional
    /// values take their defaults; required ones are left empty and reported
    /// by [`GatewayConfig::validate`] at use.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| clean_value(&v)).unwrap_or_default();
        let or_default = |key: &str, default: &str| {
            let value = get(key);
            if value.is_empty() {
                default.to_string()
            } else {
                value
            }
        };

        let expire_minutes = get(EXPIRE_MINUTES)
            .parse::<i64>()
            .unwrap_or(DEFAULT_EXPIRE_MINUTES);
        let debug = matches!(
            get(DEBUG).to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        );

        Self {
            terminal_code: get(TMN_CODE),
            hash_secret: HashSecret::new(get(HASH_SECRET)),
            base_url: get(URL),
            return_url: get(RETURN_URL),
            version: or_default(VERSION, DEFAULT_VERSION),
            default_order_info: get(ORDER_INFO),
            default_order_type: or_default(ORDER_TYPE, DEFAULT_ORDER_TYPE),
            default_locale: or_default(LOCALE, DEFAULT_LOCALE),
            expire_minutes,
            debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = GatewayConfig::from_lookup(lookup(&[]));
        assert_eq!(config.version, "2.1.0");
        assert_eq!(config.default_order_type, "other");
        assert_eq!(config.default_locale, "vn");
        assert_eq!(config.expire_minutes, 15);
        assert!(!config.debug);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_quoted_values_are_cleaned() {
        let config = GatewayConfig::from_lookup(lookup(&[
            (TMN_CODE, "\"DEMO1234\""),
            (HASH_SECRET, " 'secret' "),
            (URL, "https://sandbox.example/paymentv2/vpcpay.html"),
            (RETURN_URL, "https://shop.example/return"),
            (EXPIRE_MINUTES, "30"),
            (DEBUG, "true"),
        ]));
        assert_eq!(config.terminal_code, "DEMO1234");
        assert_eq!(config.hash_secret, HashSecret::new("secret"));
        assert_eq!(config.expire_minutes, 30);
        assert!(config.debug);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparseable_expiry_uses_default() {
        let config = GatewayConfig::from_lookup(lookup(&[(EXPIRE_MINUTES, "soon")]));
        assert_eq!(config.expire_minutes, DEFAULT_EXPIRE_MINUTES);
    }
}
