use crate::domain::callback::{CallbackResult, IpnAcknowledgement};
use serde::Serialize;
use std::io::Write;

/// One line of the reconciliation report.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct ReconciliationRow {
    pub transaction_reference: String,
    pub verified: bool,
    pub business_success: bool,
    pub response_code: String,
    pub transaction_status: String,
    pub amount: String,
    pub acknowledgement: String,
    pub support_reference: String,
}

impl ReconciliationRow {
    /// `acknowledgement` is `None` when no expected amount was known for the row.
    pub fn new(result: &CallbackResult, acknowledgement: Option<&IpnAcknowledgement>) -> Self {
        Self {
            transaction_reference: result.transaction_reference.clone(),
            verified: result.verified,
            business_success: result.business_success,
            response_code: result.response_code.code().to_string(),
            transaction_status: result.transaction_status.code().to_string(),
            amount: result.raw_amount.clone(),
            acknowledgement: acknowledgement
                .map(|ack| ack.rsp_code.clone())
                .unwrap_or_default(),
            support_reference: result.support_reference(),
        }
    }
}

/// Writes reconciliation rows as CSV with a header line.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_rows(&mut self, rows: impl IntoIterator<Item = ReconciliationRow>) -> csv::Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::codes::{ResponseCode, TransactionStatus};

    #[test]
    fn test_writes_header_and_rows() {
        let result = CallbackResult {
            verified: true,
            business_success: false,
            transaction_reference: "ORDER42".to_string(),
            response_code: ResponseCode::Success,
            transaction_status: TransactionStatus::Incomplete,
            raw_amount: "5000000".to_string(),
            gateway_transaction_no: String::new(),
            bank_code: String::new(),
            pay_date: String::new(),
        };
        let ack = IpnAcknowledgement::evaluate(&result, None);

        let mut out = Vec::new();
        ReportWriter::new(&mut out)
            .write_rows([
                ReconciliationRow::new(&result, Some(&ack)),
                ReconciliationRow::new(&result, None),
            ])
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(
            "transaction_reference,verified,business_success,response_code,transaction_status,amount,acknowledgement,support_reference"
        ));
        assert!(text.contains("ORDER42,true,false,00,01,5000000,01,V-R00-S01"));
        assert!(text.contains("ORDER42,true,false,00,01,5000000,,V-R00-S01"));
    }
}
