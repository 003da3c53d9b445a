//! Batch control record (type 8).

use crate::codes;
use crate::error::{ErrorList, FieldError, ValueSet};
use crate::field::{self, Line};
use crate::records::RecordKind;
use crate::validate::FieldChecker;
use std::fmt;

/// Batch Control record (type 8): totals of one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchControl {
    /// Same as the batch header's.
    pub service_class_code: u16,

    /// Entry details plus addenda in the batch.
    pub entry_addenda_count: u64,

    /// Sum of RDFI identifications, keeping the low ten digits.
    pub entry_hash: u64,

    /// Cents.
    pub total_debit_entry_dollar_amount: u64,

    /// Cents.
    pub total_credit_entry_dollar_amount: u64,

    pub company_identification: String,

    pub message_authentication_code: String,

    pub odfi_identification: String,

    pub batch_number: u32,
}

impl BatchControl {
    pub const RECORD_TYPE: &'static str = "8";

    pub fn new() -> Self {
        BatchControl {
            service_class_code: codes::MIXED_DEBITS_AND_CREDITS,
            entry_addenda_count: 0,
            entry_hash: 0,
            total_debit_entry_dollar_amount: 0,
            total_credit_entry_dollar_amount: 0,
            company_identification: String::new(),
            message_authentication_code: String::new(),
            odfi_identification: String::new(),
            batch_number: 1,
        }
    }

    pub fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    pub fn parse(line: &str) -> Result<Self, FieldError> {
        let line = Line::new(RecordKind::BatchControl, line)?;
        line.expect("RecordType", 0, Self::RECORD_TYPE, ValueSet::RecordType)?;
        Ok(BatchControl {
            service_class_code: line.numeric("ServiceClassCode", 1, 3)? as u16,
            entry_addenda_count: line.numeric("EntryAddendaCount", 4, 6)?,
            entry_hash: line.numeric("EntryHash", 10, 10)?,
            total_debit_entry_dollar_amount: line.numeric("TotalDebitEntryDollarAmount", 20, 12)?,
            total_credit_entry_dollar_amount: line.numeric("TotalCreditEntryDollarAmount", 32, 12)?,
            company_identification: line.alpha("CompanyIdentification", 44, 10)?,
            message_authentication_code: line.alpha("MessageAuthenticationCode", 54, 19)?,
            odfi_identification: line.alpha("ODFIIdentification", 79, 8)?,
            batch_number: line.numeric("BatchNumber", 87, 7)? as u32,
        })
    }

    /// Field widths and codes; totals are compared by the batch.
    pub fn validate(&self) -> Result<(), ErrorList<FieldError>> {
        FieldChecker::new(RecordKind::BatchControl)
            .member(
                "ServiceClassCode",
                &self.service_class_code.to_string(),
                codes::is_service_class(self.service_class_code),
                ValueSet::ServiceClassCode,
            )
            .numeric("EntryAddendaCount", self.entry_addenda_count, 6)
            .numeric("EntryHash", self.entry_hash, 10)
            .numeric("TotalDebitEntryDollarAmount", self.total_debit_entry_dollar_amount, 12)
            .numeric("TotalCreditEntryDollarAmount", self.total_credit_entry_dollar_amount, 12)
            .alphanumeric("CompanyIdentification", &self.company_identification, 10)
            .alphanumeric("MessageAuthenticationCode", &self.message_authentication_code, 19)
            .digits("ODFIIdentification", &self.odfi_identification, 8)
            .numeric("BatchNumber", u64::from(self.batch_number), 7)
            .finish()
    }

    pub fn entry_addenda_count_field(&self) -> String {
        field::numeric_field(self.entry_addenda_count, 6)
    }

    /// Entry hash, ten digits.
    pub fn entry_hash_field(&self) -> String {
        field::numeric_field(self.entry_hash, 10)
    }

    /// Debit total in cents, twelve digits.
    pub fn total_debit_entry_dollar_amount_field(&self) -> String {
        field::numeric_field(self.total_debit_entry_dollar_amount, 12)
    }

    /// Credit total in cents, twelve digits.
    pub fn total_credit_entry_dollar_amount_field(&self) -> String {
        field::numeric_field(self.total_credit_entry_dollar_amount, 12)
    }

    pub fn company_identification_field(&self) -> String {
        field::alpha_field(&self.company_identification, 10)
    }

    pub fn odfi_identification_field(&self) -> String {
        field::zero_padded_text(&self.odfi_identification, 8)
    }

    pub fn batch_number_field(&self) -> String {
        field::numeric_field(u64::from(self.batch_number), 7)
    }
}

impl Default for BatchControl {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}{}{}",
            Self::RECORD_TYPE,
            field::numeric_field(u64::from(self.service_class_code), 3),
            self.entry_addenda_count_field(),
            self.entry_hash_field(),
            self.total_debit_entry_dollar_amount_field(),
            self.total_credit_entry_dollar_amount_field(),
            self.company_identification_field(),
            field::alpha_field(&self.message_authentication_code, 19),
            " ".repeat(6),
            self.odfi_identification_field(),
            self.batch_number_field(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldRule;

    const LINE: &str = "82250000020003130001000000010000000000000000231380104                          231380100000001";

    fn mock_batch_control() -> BatchControl {
        let mut bc = BatchControl::new();
        bc.service_class_code = codes::DEBITS_ONLY;
        bc.entry_addenda_count = 2;
        bc.entry_hash = 3130001;
        bc.total_debit_entry_dollar_amount = 10000;
        bc.company_identification = "231380104".to_string();
        bc.odfi_identification = "23138010".to_string();
        bc
    }

    #[test]
    fn test_parse_and_serialize() {
        let bc = BatchControl::parse(LINE).unwrap();
        assert_eq!(bc, mock_batch_control());
        assert_eq!(bc.to_string(), LINE);
    }

    #[test]
    fn test_validate_mock() {
        assert!(mock_batch_control().validate().is_ok());
    }

    #[test]
    fn test_validate_totals_overflow() {
        let mut bc = mock_batch_control();
        bc.entry_addenda_count = 1_000_000;
        bc.total_credit_entry_dollar_amount = 1_000_000_000_000;
        let errs = bc.validate().unwrap_err();
        assert!(errs.has_field("EntryAddendaCount"));
        assert!(errs.has_field("TotalCreditEntryDollarAmount"));
        assert_eq!(errs[0].rule, FieldRule::Overflow { width: 6 });
    }

    #[test]
    fn test_validate_odfi() {
        let mut bc = mock_batch_control();
        bc.odfi_identification = "ABCDEFGH".to_string();
        assert_eq!(bc.validate().unwrap_err()[0].rule, FieldRule::NonNumeric);
    }

    #[test]
    fn test_entry_hash_field_is_ten_digits() {
        let mut bc = mock_batch_control();
        bc.entry_hash = 12_345_678_901;
        assert_eq!(bc.entry_hash_field(), "2345678901");
    }
}
