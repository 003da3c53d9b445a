//! File control record (type 9).

use crate::error::{ErrorList, FieldError, ValueSet};
use crate::field::{self, Line};
use crate::records::RecordKind;
use crate::validate::FieldChecker;
use std::fmt;

/// File Control record (type 9): totals of the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileControl {
    pub batch_count: u64,

    /// Number of 10-line blocks, filler included.
    pub block_count: u64,

    pub entry_addenda_count: u64,

    /// Sum of batch entry hashes, keeping the low ten digits.
    pub entry_hash: u64,

    pub total_debit_entry_dollar_amount: u64,

    pub total_credit_entry_dollar_amount: u64,
}

impl FileControl {
    pub const RECORD_TYPE: &'static str = "9";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    pub fn parse(line: &str) -> Result<Self, FieldError> {
        let line = Line::new(RecordKind::FileControl, line)?;
        line.expect("RecordType", 0, Self::RECORD_TYPE, ValueSet::RecordType)?;
        Ok(FileControl {
            batch_count: line.numeric("BatchCount", 1, 6)?,
            block_count: line.numeric("BlockCount", 7, 6)?,
            entry_addenda_count: line.numeric("EntryAddendaCount", 13, 8)?,
            entry_hash: line.numeric("EntryHash", 21, 10)?,
            total_debit_entry_dollar_amount: line.numeric("TotalDebitEntryDollarAmount", 31, 12)?,
            total_credit_entry_dollar_amount: line.numeric("TotalCreditEntryDollarAmount", 43, 12)?,
        })
    }

    pub fn validate(&self) -> Result<(), ErrorList<FieldError>> {
        FieldChecker::new(RecordKind::FileControl)
            .numeric("BatchCount", self.batch_count, 6)
            .numeric("BlockCount", self.block_count, 6)
            .numeric("EntryAddendaCount", self.entry_addenda_count, 8)
            .numeric("EntryHash", self.entry_hash, 10)
            .numeric("TotalDebitEntryDollarAmount", self.total_debit_entry_dollar_amount, 12)
            .numeric("TotalCreditEntryDollarAmount", self.total_credit_entry_dollar_amount, 12)
            .finish()
    }

    pub fn batch_count_field(&self) -> String {
        field::numeric_field(self.batch_count, 6)
    }

    /// Number of ten line blocks, six digits.
    pub fn block_count_field(&self) -> String {
        field::numeric_field(self.block_count, 6)
    }

    pub fn entry_addenda_count_field(&self) -> String {
        field::numeric_field(self.entry_addenda_count, 8)
    }

    /// Sum of the batch entry hashes, last ten digits.
    pub fn entry_hash_field(&self) -> String {
        field::numeric_field(self.entry_hash, 10)
    }

    pub fn total_debit_entry_dollar_amount_field(&self) -> String {
        field::numeric_field(self.total_debit_entry_dollar_amount, 12)
    }

    pub fn total_credit_entry_dollar_amount_field(&self) -> String {
        field::numeric_field(self.total_credit_entry_dollar_amount, 12)
    }
}

impl fmt::Display for FileControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}",
            Self::RECORD_TYPE,
            self.batch_count_field(),
            self.block_count_field(),
            self.entry_addenda_count_field(),
            self.entry_hash_field(),
            self.total_debit_entry_dollar_amount_field(),
            self.total_credit_entry_dollar_amount_field(),
            " ".repeat(39),
        )
    }
}
