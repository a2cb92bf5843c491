use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::timestamp::gateway_timestamp;

/// Longest reference the gateway accepts.
pub const MAX_REFERENCE_LEN: usize = 40;

/// Merchant-side transaction reference (`vnp_TxnRef`).
///
/// Always non-empty, ASCII alphanumeric and at most [`MAX_REFERENCE_LEN`] chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionReference(String);

impl TransactionReference {
    /// Strips everything outside `[A-Za-z0-9]` and caps the length.
    ///
    /// Returns `None` when nothing usable remains.
    pub fn normalize(raw: &str) -> Option<Self> {
        let cleaned: String = raw
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .take(MAX_REFERENCE_LEN)
            .collect();
        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    /// Timestamp in the gateway timezone followed by a random six digit suffix.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
        Self(format!("{}{}", gateway_timestamp(now), suffix))
    }

    /// Normalizes the supplied reference, generating a fresh one when absent or
    /// unusable. The flag reports whether generation happened.
    pub fn resolve(raw: Option<&str>, now: DateTime<Utc>) -> (Self, bool) {
        match raw.and_then(Self::normalize) {
            Some(reference) => (reference, false),
            None => (Self::generate(now), true),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TransactionReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
