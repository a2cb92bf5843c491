use serde::{Serialize, Serializer};

/// `vnp_ResponseCode` values reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    SuspectedFraud,
    InternetBankingNotRegistered,
    AuthenticationFailed,
    PaymentTimeout,
    CardLocked,
    WrongOtp,
    CancelledByCustomer,
    InsufficientBalance,
    DailyLimitExceeded,
    BankMaintenance,
    TooManyPasswordAttempts,
    OtherError,
    /// Absent from the callback.
    Missing,
    Unknown(String),
}

impl ResponseCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "00" => Self::Success,
            "07" => Self::SuspectedFraud,
            "09" => Self::InternetBankingNotRegistered,
            "10" => Self::AuthenticationFailed,
            "11" => Self::PaymentTimeout,
            "12" => Self::CardLocked,
            "13" => Self::WrongOtp,
            "24" => Self::CancelledByCustomer,
            "51" => Self::InsufficientBalance,
            "65" => Self::DailyLimitExceeded,
            "75" => Self::BankMaintenance,
            "79" => Self::TooManyPasswordAttempts,
            "99" => Self::OtherError,
            "" => Self::Missing,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Success => "00",
            Self::SuspectedFraud => "07",
            Self::InternetBankingNotRegistered => "09",
            Self::AuthenticationFailed => "10",
            Self::PaymentTimeout => "11",
            Self::CardLocked => "12",
            Self::WrongOtp => "13",
            Self::CancelledByCustomer => "24",
            Self::InsufficientBalance => "51",
            Self::DailyLimitExceeded => "65",
            Self::BankMaintenance => "75",
            Self::TooManyPasswordAttempts => "79",
            Self::OtherError => "99",
            Self::Missing => "",
            Self::Unknown(code) => code,
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Self::Success
    }

    /// Operator-facing explanation for audit logs. Not for end users.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "transaction successful",
            Self::SuspectedFraud => "amount deducted, transaction flagged as suspicious",
            Self::InternetBankingNotRegistered => "card or account not registered for internet banking",
            Self::AuthenticationFailed => "card or account verification failed more than 3 times",
            Self::PaymentTimeout => "payment window expired",
            Self::CardLocked => "card or account is locked",
            Self::WrongOtp => "wrong one-time password",
            Self::CancelledByCustomer => "customer cancelled the transaction",
            Self::InsufficientBalance => "insufficient balance",
            Self::DailyLimitExceeded => "daily transaction limit exceeded",
            Self::BankMaintenance => "issuing bank under maintenance",
            Self::TooManyPasswordAttempts => "payment password entered wrong too many times",
            Self::OtherError => "other gateway error",
            Self::Missing => "no response code supplied",
            Self::Unknown(_) => "unrecognised response code",
        }
    }
}

impl Serialize for ResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// `vnp_TransactionStatus` values reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Success,
    Incomplete,
    Failed,
    Reversed,
    RefundProcessing,
    RefundSentToBank,
    SuspectedFraud,
    RefundRejected,
    Missing,
    Unknown(String),
}

impl TransactionStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "00" => Self::Success,
            "01" => Self::Incomplete,
            "02" => Self::Failed,
            "04" => Self::Reversed,
            "05" => Self::RefundProcessing,
            "06" => Self::RefundSentToBank,
            "07" => Self::SuspectedFraud,
            "09" => Self::RefundRejected,
            "" => Self::Missing,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Success => "00",
            Self::Incomplete => "01",
            Self::Failed => "02",
            Self::Reversed => "04",
            Self::RefundProcessing => "05",
            Self::RefundSentToBank => "06",
            Self::SuspectedFraud => "07",
            Self::RefundRejected => "09",
            Self::Missing => "",
            Self::Unknown(code) => code,
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Self::Success
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "settled",
            Self::Incomplete => "not completed",
            Self::Failed => "failed",
            Self::Reversed => "reversed: charged at the bank but not at the gateway",
            Self::RefundProcessing => "refund being processed by the gateway",
            Self::RefundSentToBank => "refund request sent to the bank",
            Self::SuspectedFraud => "suspected fraud",
            Self::RefundRejected => "refund rejected",
            Self::Missing => "no transaction status supplied",
            Self::Unknown(_) => "unrecognised transaction status",
        }
    }
}

impl Serialize for TransactionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
