use crate::error::{PaymentError, Result};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Asia::Ho_Chi_Minh;
use chrono_tz::Tz;

/// Timezone the gateway interprets `vnp_CreateDate` and `vnp_ExpireDate` in.
pub const GATEWAY_TIMEZONE: Tz = Ho_Chi_Minh;

const GATEWAY_FORMAT: &str = "%Y%m%d%H%M%S";

/// Longest payment window accepted from configuration (one year).
pub const MAX_EXPIRE_MINUTES: i64 = 365 * 24 * 60;

/// Formats an instant as `YYYYMMDDHHmmss` in the gateway timezone, regardless
/// of the server's local zone.
pub fn gateway_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&GATEWAY_TIMEZONE)
        .format(GATEWAY_FORMAT)
        .to_string()
}

/// Creation and expiry stamps for one payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentWindow {
    pub create_date: String,
    pub expire_date: String,
}

impl PaymentWindow {
    /// Expiry is `now + minutes`, never less than one minute. Windows longer
    /// than [`MAX_EXPIRE_MINUTES`] are a configuration error.
    pub fn starting_at(now: DateTime<Utc>, minutes: i64) -> Result<Self> {
        let minutes = minutes.max(1);
        let expire = Some(minutes)
            .filter(|m| *m <= MAX_EXPIRE_MINUTES)
            .and_then(Duration::try_minutes)
            .and_then(|window| now.checked_add_signed(window))
            .ok_or_else(|| {
                PaymentError::ConfigurationError(format!(
                    "expire window of {minutes} minutes exceeds {MAX_EXPIRE_MINUTES}"
                ))
            })?;
        Ok(Self {
            create_date: gateway_timestamp(now),
            expire_date: gateway_timestamp(expire),
        })
    }
}
