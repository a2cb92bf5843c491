use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Gateway configuration incomplete: {0}")]
    ConfigurationError(String),
    #[error("Invalid amount: {0}")]
    InvalidAmountError(String),
    #[error("Invalid input: {0}")]
    InvalidInputError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
