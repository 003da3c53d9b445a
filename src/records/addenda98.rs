//! Addenda98: notification of change returned by the RDFI.
//!
//! Only COR batches carry it, one per entry.

use crate::error::{ErrorList, FieldError, ValueSet};
use crate::field::{self, Line};
use crate::records::RecordKind;
use crate::return_codes;
use crate::validate::FieldChecker;
use std::fmt;

/// Notification of change sent back by the RDFI in a COR batch.
pub type NoticeOfChange = Addenda98;

/// Addenda98: notification of change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda98 {
    /// `C01`..`C69`, see [`return_codes::change_code_dict`].
    pub change_code: String,

    /// Trace number of the entry being corrected.
    pub original_trace: u64,

    /// RDFI identification of the original entry.
    pub original_dfi: u32,

    /// Value the originator should use from now on.
    pub corrected_data: String,

    pub trace_number: u64,
}

impl Addenda98 {
    pub const RECORD_TYPE: &'static str = "7";
    pub const TYPE_CODE: &'static str = "98";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    pub fn type_code(&self) -> &'static str {
        Self::TYPE_CODE
    }

    /// Parses a type 7 line with addenda type code 98.
    pub fn parse(line: &str) -> Result<Self, FieldError> {
        let line = Line::new(RecordKind::Addenda98, line)?;
        line.expect("RecordType", 0, Self::RECORD_TYPE, ValueSet::RecordType)?;
        line.expect("TypeCode", 1, Self::TYPE_CODE, ValueSet::TypeCode)?;
        Ok(Addenda98 {
            change_code: line.alpha("ChangeCode", 3, 3)?,
            original_trace: line.numeric("OriginalTrace", 6, 15)?,
            original_dfi: line.numeric("OriginalDFI", 27, 8)? as u32,
            corrected_data: line.alpha("CorrectedData", 35, 29)?,
            trace_number: line.numeric("TraceNumber", 79, 15)?,
        })
    }

    pub fn validate(&self) -> Result<(), ErrorList<FieldError>> {
        FieldChecker::new(RecordKind::Addenda98)
            .member(
                "ChangeCode",
                &self.change_code,
                return_codes::change_code(&self.change_code).is_some(),
                ValueSet::ChangeCode,
            )
            .mandatory_numeric("OriginalTrace", self.original_trace, 15)
            .mandatory_numeric("OriginalDFI", u64::from(self.original_dfi), 8)
            .mandatory("CorrectedData", &self.corrected_data, 29)
            .numeric("TraceNumber", self.trace_number, 15)
            .finish()
    }

    /// Reason and description of the change code, if it is known.
    pub fn change_code_description(&self) -> Option<&'static return_codes::ReasonCode> {
        return_codes::change_code(&self.change_code)
    }

    pub fn original_trace_field(&self) -> String {
        field::numeric_field(self.original_trace, 15)
    }

    pub fn original_dfi_field(&self) -> String {
        field::numeric_field(u64::from(self.original_dfi), 8)
    }

    /// Corrected data padded to 29 characters.
    pub fn corrected_data_field(&self) -> String {
        field::alpha_field(&self.corrected_data, 29)
    }

    pub fn trace_number_field(&self) -> String {
        field::numeric_field(self.trace_number, 15)
    }
}

impl fmt::Display for Addenda98 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}",
            Self::RECORD_TYPE,
            Self::TYPE_CODE,
            field::alpha_field(&self.change_code, 3),
            self.original_trace_field(),
            " ".repeat(6),
            self.original_dfi_field(),
            self.corrected_data_field(),
            " ".repeat(15),
            self.trace_number_field(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldRule;

    const LINE: &str = "798C01121042880000001      121042881918171614                                  091012980000088";

    fn mock_addenda98() -> Addenda98 {
        Addenda98 {
            change_code: "C01".to_string(),
            original_trace: 121042880000001,
            original_dfi: 12104288,
            corrected_data: "1918171614".to_string(),
            trace_number: 91012980000088,
        }
    }

    #[test]
    fn test_parse_and_serialize() {
        let a = Addenda98::parse(LINE).unwrap();
        assert_eq!(a, mock_addenda98());
        assert_eq!(a.to_string(), LINE);
    }

    #[test]
    fn test_validate_mock() {
        assert!(mock_addenda98().validate().is_ok());
        assert_eq!(
            mock_addenda98().change_code_description().unwrap().reason,
            "Incorrect bank account number"
        );
    }

    #[test]
    fn test_validate_change_code() {
        let mut a = mock_addenda98();
        a.change_code = "C99".to_string();
        let errs = a.validate().unwrap_err();
        assert_eq!(errs[0].field_name, "ChangeCode");
        assert_eq!(errs[0].rule, FieldRule::NotInSet(ValueSet::ChangeCode));
    }

    #[test]
    fn test_validate_corrected_data() {
        let mut a = mock_addenda98();
        a.corrected_data.clear();
        assert!(a.validate().unwrap_err().has_field("CorrectedData"));
    }

    #[test]
    fn test_validate_original_trace() {
        let mut a = mock_addenda98();
        a.original_trace = 0;
        assert!(a.validate().unwrap_err().has_field("OriginalTrace"));
    }
}
