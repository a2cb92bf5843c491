use crate::error::PaymentError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Multiplier the gateway applies between major and minor currency units.
pub const MINOR_UNIT_MULTIPLIER: i64 = 100;

/// A positive payment amount in major currency units (e.g. VND as displayed to
/// the customer).
///
/// The gateway receives the amount scaled to minor units, see [`Amount::to_minor`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::InvalidAmountError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    /// Parses a caller-supplied amount string, tolerating surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, PaymentError> {
        let value = Decimal::from_str(raw.trim()).map_err(|_| {
            PaymentError::InvalidAmountError(format!("'{}' is not a number", raw.trim()))
        })?;
        Self::new(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Scales to the gateway's minor-unit integer, rounding half away from zero.
    ///
    /// Amounts that round to zero or do not fit in an `i64` are rejected.
    pub fn to_minor(&self) -> Result<MinorAmount, PaymentError> {
        let scaled = self
            .0
            .checked_mul(Decimal::from(MINOR_UNIT_MULTIPLIER))
            .ok_or_else(|| PaymentError::InvalidAmountError("Amount is too large".to_string()))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        let minor = scaled
            .to_i64()
            .ok_or_else(|| PaymentError::InvalidAmountError("Amount is too large".to_string()))?;

        if minor <= 0 {
            return Err(PaymentError::InvalidAmountError(
                "Amount is below the smallest payable unit".to_string(),
            ));
        }
        Ok(MinorAmount(minor))
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Amount as the gateway transports it: an integer number of minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorAmount(i64);

impl MinorAmount {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<MinorAmount> for i64 {
    fn from(amount: MinorAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for MinorAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
