//! Batch header record (type 5).
//!
//! The SEC code in this record decides which rules apply to the batch's entries.

use crate::codes;
use crate::error::{ErrorList, FieldError, FieldRule, ValueSet};
use crate::field::{self, Line};
use crate::records::RecordKind;
use crate::sec::SecCode;
use crate::validate::FieldChecker;
use chrono::NaiveDate;
use std::fmt;

/// Batch Header record (type 5): originator and SEC code of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchHeader {
    /// 200 mixed, 220 credits only, 225 debits only, 280 advices.
    pub service_class_code: u16,

    pub company_name: String,

    pub company_discretionary_data: String,

    /// Originator identifier, often an IRS EIN prefixed with a digit.
    pub company_identification: String,

    pub standard_entry_class_code: SecCode,

    /// Shown on the receiver's statement, e.g. `PAYROLL`.
    pub company_entry_description: String,

    pub company_descriptive_date: String,

    /// Date the originator intends the entries to settle.
    pub effective_entry_date: Option<NaiveDate>,

    /// Julian settlement day, filled in by the ACH operator.
    pub settlement_date: String,

    pub originator_status_code: u8,

    /// First eight digits of the originating DFI routing number.
    pub odfi_identification: String,

    pub batch_number: u32,
}

impl BatchHeader {
    pub const RECORD_TYPE: &'static str = "5";

    pub fn new() -> Self {
        BatchHeader {
            service_class_code: codes::MIXED_DEBITS_AND_CREDITS,
            company_name: String::new(),
            company_discretionary_data: String::new(),
            company_identification: String::new(),
            standard_entry_class_code: SecCode::Ppd,
            company_entry_description: String::new(),
            company_descriptive_date: String::new(),
            effective_entry_date: None,
            settlement_date: String::new(),
            originator_status_code: 1,
            odfi_identification: String::new(),
            batch_number: 1,
        }
    }

    pub fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    /// Parses a type 5 line. Fails on an unsupported SEC code.
    pub fn parse(line: &str) -> Result<Self, FieldError> {
        let line = Line::new(RecordKind::BatchHeader, line)?;
        line.expect("RecordType", 0, Self::RECORD_TYPE, ValueSet::RecordType)?;
        let sec = line.slice("StandardEntryClassCode", 50, 3)?;
        let standard_entry_class_code = sec.parse::<SecCode>().map_err(|raw| {
            FieldError::new(
                RecordKind::BatchHeader,
                "StandardEntryClassCode",
                raw,
                FieldRule::NotInSet(ValueSet::SecCode),
            )
        })?;
        Ok(BatchHeader {
            service_class_code: line.numeric("ServiceClassCode", 1, 3)? as u16,
            company_name: line.alpha("CompanyName", 4, 16)?,
            company_discretionary_data: line.alpha("CompanyDiscretionaryData", 20, 20)?,
            company_identification: line.alpha("CompanyIdentification", 40, 10)?,
            standard_entry_class_code,
            company_entry_description: line.alpha("CompanyEntryDescription", 53, 10)?,
            company_descriptive_date: line.alpha("CompanyDescriptiveDate", 63, 6)?,
            effective_entry_date: line.date("EffectiveEntryDate", 69)?,
            settlement_date: line.alpha("SettlementDate", 75, 3)?,
            originator_status_code: line.numeric("OriginatorStatusCode", 78, 1)? as u8,
            odfi_identification: line.alpha("ODFIIdentification", 79, 8)?,
            batch_number: line.numeric("BatchNumber", 87, 7)? as u32,
        })
    }

    pub fn validate(&self) -> Result<(), ErrorList<FieldError>> {
        let mut check = FieldChecker::new(RecordKind::BatchHeader);
        check
            .member(
                "ServiceClassCode",
                &self.service_class_code.to_string(),
                codes::is_service_class(self.service_class_code),
                ValueSet::ServiceClassCode,
            )
            .mandatory("CompanyName", &self.company_name, 16)
            .alphanumeric("CompanyDiscretionaryData", &self.company_discretionary_data, 20)
            .mandatory("CompanyIdentification", &self.company_identification, 10)
            .mandatory("CompanyEntryDescription", &self.company_entry_description, 10)
            .alphanumeric("CompanyDescriptiveDate", &self.company_descriptive_date, 6)
            .alphanumeric("SettlementDate", &self.settlement_date, 3)
            .member(
                "OriginatorStatusCode",
                &self.originator_status_code.to_string(),
                self.originator_status_code <= 2,
                ValueSet::OriginatorStatusCode,
            )
            .digits("ODFIIdentification", &self.odfi_identification, 8)
            .mandatory_numeric("BatchNumber", u64::from(self.batch_number), 7);
        check.finish()
    }

    /// The ODFI identification as a number, when it is eight digits.
    pub fn odfi_number(&self) -> Option<u64> {
        if self.odfi_identification.len() == 8 {
            self.odfi_identification.parse().ok()
        } else {
            None
        }
    }

    pub fn service_class_code_field(&self) -> String {
        field::numeric_field(u64::from(self.service_class_code), 3)
    }

    pub fn company_name_field(&self) -> String {
        field::alpha_field(&self.company_name, 16)
    }

    pub fn company_identification_field(&self) -> String {
        field::alpha_field(&self.company_identification, 10)
    }

    /// Effective entry date as `YYMMDD`, blank when unset.
    pub fn effective_entry_date_field(&self) -> String {
        field::date_field(self.effective_entry_date)
    }

    /// Eight digit ODFI routing prefix.
    pub fn odfi_identification_field(&self) -> String {
        field::zero_padded_text(&self.odfi_identification, 8)
    }

    /// Batch number, seven digits.
    pub fn batch_number_field(&self) -> String {
        field::numeric_field(u64::from(self.batch_number), 7)
    }
}

impl Default for BatchHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}{}{}{}{}",
            Self::RECORD_TYPE,
            self.service_class_code_field(),
            self.company_name_field(),
            field::alpha_field(&self.company_discretionary_data, 20),
            self.company_identification_field(),
            self.standard_entry_class_code,
            field::alpha_field(&self.company_entry_description, 10),
            field::alpha_field(&self.company_descriptive_date, 6),
            self.effective_entry_date_field(),
            field::alpha_field(&self.settlement_date, 3),
            field::numeric_field(u64::from(self.originator_status_code), 1),
            self.odfi_identification_field(),
            self.batch_number_field(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "5225Merchant ATM                        231380104 MTECASH WITHD      180424   1231380100000001";

    fn mock_batch_header() -> BatchHeader {
        let mut bh = BatchHeader::new();
        bh.service_class_code = codes::DEBITS_ONLY;
        bh.company_name = "Merchant ATM".to_string();
        bh.company_identification = "231380104".to_string();
        bh.standard_entry_class_code = SecCode::Mte;
        bh.company_entry_description = "CASH WITHD".to_string();
        bh.effective_entry_date = NaiveDate::from_ymd_opt(2018, 4, 24);
        bh.odfi_identification = "23138010".to_string();
        bh
    }

    #[test]
    fn test_parse_and_serialize() {
        let bh = BatchHeader::parse(LINE).unwrap();
        assert_eq!(bh, mock_batch_header());
        assert_eq!(bh.to_string(), LINE);
    }

    #[test]
    fn test_validate_mock() {
        assert!(mock_batch_header().validate().is_ok());
    }

    #[test]
    fn test_parse_unknown_sec() {
        let line = LINE.replace("MTE", "IAT");
        let err = BatchHeader::parse(&line).unwrap_err();
        assert_eq!(err.field_name, "StandardEntryClassCode");
        assert_eq!(err.rule, FieldRule::NotInSet(ValueSet::SecCode));
    }

    #[test]
    fn test_validate_service_class() {
        let mut bh = mock_batch_header();
        bh.service_class_code = 0;
        let errs = bh.validate().unwrap_err();
        assert!(errs.has_field("ServiceClassCode"));
    }

    #[test]
    fn test_validate_company_name_overflow() {
        let mut bh = mock_batch_header();
        bh.company_name = "Merchant with ATM".to_string();
        let errs = bh.validate().unwrap_err();
        assert_eq!(errs[0].rule, FieldRule::Overflow { width: 16 });
    }

    #[test]
    fn test_validate_mandatory_fields() {
        let mut bh = mock_batch_header();
        bh.company_identification = "   ".to_string();
        bh.company_entry_description.clear();
        bh.odfi_identification = "2313801".to_string();
        let errs = bh.validate().unwrap_err();
        assert!(errs.has_field("CompanyIdentification"));
        assert!(errs.has_field("CompanyEntryDescription"));
        assert!(errs.has_field("ODFIIdentification"));
    }

    #[test]
    fn test_odfi_number() {
        assert_eq!(mock_batch_header().odfi_number(), Some(23138010));
        assert_eq!(BatchHeader::new().odfi_number(), None);
    }
}
