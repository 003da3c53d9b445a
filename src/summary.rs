//! CSV listing of the entries in a file.
//!
//! One row per entry detail, in file order, with amounts rendered in dollars.

use crate::error::Result;
use crate::file::File;
use crate::money::Dollars;
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub batch: u32,
    pub sec: String,
    pub transaction_code: u8,
    pub trace_number: String,
    pub rdfi: String,
    pub account: String,
    pub amount: Dollars,
    pub name: String,
    pub addenda: usize,
    pub category: String,
}

/// Entry rows of a decoded or built file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn new(file: &File) -> Self {
        let mut rows = Vec::new();
        for batch in file.batches() {
            let header = batch.header();
            for entry in batch.entries() {
                let detail = &entry.detail;
                rows.push(SummaryRow {
                    batch: header.batch_number,
                    sec: batch.sec().to_string(),
                    transaction_code: detail.transaction_code,
                    trace_number: detail.trace_number_field(),
                    rdfi: format!("{}{}", detail.rdfi_identification_field(), detail.check_digit),
                    account: detail.dfi_account_number.trim_end().to_string(),
                    amount: Dollars::from_cents(detail.amount),
                    name: detail.individual_name.trim_end().to_string(),
                    addenda: entry.addenda.len(),
                    category: entry.category().to_string(),
                });
            }
        }
        Summary { rows }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Sum of the debit and credit entry amounts.
    pub fn totals(&self) -> (Dollars, Dollars) {
        let mut debit = Dollars::ZERO;
        let mut credit = Dollars::ZERO;
        for row in &self.rows {
            if crate::codes::is_debit(row.transaction_code) {
                debit += row.amount;
            } else if crate::codes::is_credit(row.transaction_code) {
                credit += row.amount;
            }
        }
        (debit, credit)
    }

    /// Writes the header row and one row per entry.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.rows.is_empty() {
            csv_writer.write_record([
                "batch",
                "sec",
                "transaction_code",
                "trace_number",
                "rdfi",
                "account",
                "amount",
                "name",
                "addenda",
                "category",
            ])?;
        }
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }

        csv_writer.flush()?;
        debug!("Wrote {} summary rows", self.rows.len());
        Ok(())
    }
}
