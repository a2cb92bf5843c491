use crate::error::PaymentError;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;
use subtle::ConstantTimeEq;

pub const DEFAULT_VERSION: &str = "2.1.0";
pub const DEFAULT_ORDER_TYPE: &str = "other";
pub const DEFAULT_LOCALE: &str = "vn";
pub const DEFAULT_EXPIRE_MINUTES: i64 = 15;

/// Shared HMAC secret. The value is zeroized on drop and redacted in `Debug`.
#[derive(Debug)]
pub struct HashSecret(SecretString);

impl HashSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::from(clean_value(&secret.into())))
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }

    /// Keyed HMAC-SHA512 instance; the secret bytes never leave this type.
    pub(crate) fn mac(&self) -> Result<Hmac<Sha512>, PaymentError> {
        Hmac::<Sha512>::new_from_slice(self.0.expose_secret().as_bytes()).map_err(|_| {
            PaymentError::ConfigurationError("hash secret is not a usable HMAC key".to_string())
        })
    }
}

impl Default for HashSecret {
    fn default() -> Self {
        Self(SecretString::from(String::new()))
    }
}

impl Clone for HashSecret {
    fn clone(&self) -> Self {
        Self(SecretString::from(self.0.expose_secret().to_owned()))
    }
}

impl PartialEq for HashSecret {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.0.expose_secret(), other.0.expose_secret());
        a.as_bytes().ct_eq(b.as_bytes()).into()
    }
}

impl Eq for HashSecret {}

/// Trims whitespace and stray quote characters left over from `.env`-style files.
pub fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace())
        .to_string()
}

/// Everything the builder and verifier need to talk to the gateway.
///
/// Completeness is not checked at construction; [`GatewayConfig::validate`]
/// runs before every signing operation so a partially configured deployment
/// fails per call instead of at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Merchant terminal code (`vnp_TmnCode`).
    pub terminal_code: String,
    pub hash_secret: HashSecret,
    /// Payment page the customer is redirected to.
    pub base_url: String,
    /// Default browser return URL when the intent carries none.
    pub return_url: String,
    pub version: String,
    pub default_order_info: String,
    pub default_order_type: String,
    pub default_locale: String,
    pub expire_minutes: i64,
    /// Enables logging of canonical payloads (never the secret).
    pub debug: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            terminal_code: String::new(),
            hash_secret: HashSecret::default(),
            base_url: String::new(),
            return_url: String::new(),
            version: DEFAULT_VERSION.to_string(),
            default_order_info: String::new(),
            default_order_type: DEFAULT_ORDER_TYPE.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            expire_minutes: DEFAULT_EXPIRE_MINUTES,
            debug: false,
        }
    }
}

impl GatewayConfig {
    pub fn new(
        terminal_code: impl Into<String>,
        hash_secret: impl Into<String>,
        base_url: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            terminal_code: clean_value(&terminal_code.into()),
            hash_secret: HashSecret::new(hash_secret),
            base_url: clean_value(&base_url.into()),
            return_url: clean_value(&return_url.into()),
            ..Self::default()
        }
    }

    /// Fails with the names of every missing required setting.
    pub fn validate(&self) -> Result<(), PaymentError> {
        let mut missing = Vec::new();
        if clean_value(&self.terminal_code).is_empty() {
            missing.push("terminal code");
        }
        if self.hash_secret.is_empty() {
            missing.push("hash secret");
        }
        if clean_value(&self.base_url).is_empty() {
            missing.push("gateway URL");
        }
        if clean_value(&self.return_url).is_empty() {
            missing.push("return URL");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PaymentError::ConfigurationError(format!(
                "missing {}",
                missing.join(", ")
            )))
        }
    }
}
