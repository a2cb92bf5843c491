use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::io::Read;

/// One callback captured from access logs or a notification queue.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CapturedCallback {
    /// Raw query string or full return URL.
    pub query: String,
    /// Amount in minor units the merchant expected, if known.
    #[serde(default)]
    pub expected_amount: Option<i64>,
}

/// Reads captured callbacks from a CSV source with a `query` column and an
/// optional `expected_amount` column.
pub struct CallbackReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CallbackReader<R> {
    /// Creates a new `CallbackReader` from any `Read` source (e.g. File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes rows so large captures stream through.
    pub fn callbacks(self) -> impl Iterator<Item = Result<CapturedCallback>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
