//! Addenda02: terminal location for card and ATM entries (MTE, POS, SHR).

use crate::codes;
use crate::error::{ErrorList, FieldError, FieldRule, ValueSet};
use crate::field::{self, Line};
use crate::records::RecordKind;
use crate::validate::FieldChecker;
use std::fmt;

/// Addenda02: terminal information for MTE, POS and SHR entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda02 {
    pub reference_information_one: String,

    pub reference_information_two: String,

    pub terminal_identification_code: String,

    /// Assigned by the terminal, used for audits.
    pub transaction_serial_number: String,

    /// `MMDD` the transaction took place.
    pub transaction_date: String,

    pub authorization_code_or_expire_date: String,

    pub terminal_location: String,

    pub terminal_city: String,

    pub terminal_state: String,

    /// Trace number of the entry this addenda belongs to.
    pub trace_number: u64,
}

impl Addenda02 {
    pub const RECORD_TYPE: &'static str = "7";
    pub const TYPE_CODE: &'static str = "02";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    pub fn type_code(&self) -> &'static str {
        Self::TYPE_CODE
    }

    /// Parses a type 7 line with addenda type code 02.
    pub fn parse(line: &str) -> Result<Self, FieldError> {
        let line = Line::new(RecordKind::Addenda02, line)?;
        line.expect("RecordType", 0, Self::RECORD_TYPE, ValueSet::RecordType)?;
        line.expect("TypeCode", 1, Self::TYPE_CODE, ValueSet::TypeCode)?;
        Ok(Addenda02 {
            reference_information_one: line.alpha("ReferenceInformationOne", 3, 7)?,
            reference_information_two: line.alpha("ReferenceInformationTwo", 10, 3)?,
            terminal_identification_code: line.alpha("TerminalIdentificationCode", 13, 6)?,
            transaction_serial_number: line.alpha("TransactionSerialNumber", 19, 6)?,
            transaction_date: line.alpha("TransactionDate", 25, 4)?,
            authorization_code_or_expire_date: line.alpha("AuthorizationCodeOrExpireDate", 29, 6)?,
            terminal_location: line.alpha("TerminalLocation", 35, 27)?,
            terminal_city: line.alpha("TerminalCity", 62, 15)?,
            terminal_state: line.alpha("TerminalState", 77, 2)?,
            trace_number: line.numeric("TraceNumber", 79, 15)?,
        })
    }

    pub fn validate(&self) -> Result<(), ErrorList<FieldError>> {
        let mut check = FieldChecker::new(RecordKind::Addenda02);
        check
            .alphanumeric("ReferenceInformationOne", &self.reference_information_one, 7)
            .alphanumeric("ReferenceInformationTwo", &self.reference_information_two, 3)
            .mandatory("TerminalIdentificationCode", &self.terminal_identification_code, 6)
            .mandatory("TransactionSerialNumber", &self.transaction_serial_number, 6)
            .alphanumeric(
                "AuthorizationCodeOrExpireDate",
                &self.authorization_code_or_expire_date,
                6,
            )
            .mandatory("TerminalLocation", &self.terminal_location, 27)
            .mandatory("TerminalCity", &self.terminal_city, 15)
            .member(
                "TerminalState",
                &self.terminal_state,
                codes::is_state_code(&self.terminal_state),
                ValueSet::StateCode,
            )
            .numeric("TraceNumber", self.trace_number, 15);
        if !is_month_day(&self.transaction_date) {
            check.push(FieldError::new(
                RecordKind::Addenda02,
                "TransactionDate",
                self.transaction_date.clone(),
                FieldRule::Date,
            ));
        }
        check.finish()
    }

    /// Transaction date as `MMDD`.
    pub fn transaction_date_field(&self) -> String {
        field::alpha_field(&self.transaction_date, 4)
    }

    pub fn terminal_location_field(&self) -> String {
        field::alpha_field(&self.terminal_location, 27)
    }

    pub fn terminal_city_field(&self) -> String {
        field::alpha_field(&self.terminal_city, 15)
    }

    /// Two letter state or territory code.
    pub fn terminal_state_field(&self) -> String {
        field::alpha_field(&self.terminal_state, 2)
    }

    /// Trace number of the entry this addenda belongs to, 15 digits.
    pub fn trace_number_field(&self) -> String {
        field::numeric_field(self.trace_number, 15)
    }
}

/// `MMDD` with a plausible month and day.
fn is_month_day(s: &str) -> bool {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let month: u32 = s[..2].parse().unwrap_or(0);
    let day: u32 = s[2..].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

impl fmt::Display for Addenda02 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}{}{}{}",
            Self::RECORD_TYPE,
            Self::TYPE_CODE,
            field::alpha_field(&self.reference_information_one, 7),
            field::alpha_field(&self.reference_information_two, 3),
            field::alpha_field(&self.terminal_identification_code, 6),
            field::alpha_field(&self.transaction_serial_number, 6),
            self.transaction_date_field(),
            field::alpha_field(&self.authorization_code_or_expire_date, 6),
            self.terminal_location_field(),
            self.terminal_city_field(),
            self.terminal_state_field(),
            self.trace_number_field(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "702          200509123456122400000033Main St and 1st Ave      ANYTOWN        VA231380100000001";

    fn mock_addenda02() -> Addenda02 {
        let mut addenda02 = Addenda02::new();
        addenda02.terminal_identification_code = "200509".to_string();
        addenda02.transaction_serial_number = "123456".to_string();
        addenda02.transaction_date = "1224".to_string();
        addenda02.authorization_code_or_expire_date = "000000".to_string();
        addenda02.terminal_location = "33Main St and 1st Ave".to_string();
        addenda02.terminal_city = "ANYTOWN".to_string();
        addenda02.terminal_state = "VA".to_string();
        addenda02.trace_number = 231380100000001;
        addenda02
    }

    #[test]
    fn test_parse_and_serialize() {
        let a = Addenda02::parse(LINE).unwrap();
        assert_eq!(a, mock_addenda02());
        assert_eq!(a.to_string(), LINE);
        assert_eq!(a.type_code(), "02");
    }

    #[test]
    fn test_validate_mock() {
        assert!(mock_addenda02().validate().is_ok());
    }

    #[test]
    fn test_validate_terminal_state() {
        let mut a = mock_addenda02();
        a.terminal_state = "XX".to_string();
        let errs = a.validate().unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field_name, "TerminalState");
        assert_eq!(errs[0].rule, FieldRule::NotInSet(ValueSet::StateCode));
    }

    #[test]
    fn test_validate_transaction_date() {
        let mut a = mock_addenda02();
        a.transaction_date = "1324".to_string();
        assert!(a.validate().unwrap_err().has_field("TransactionDate"));
    }

    #[test]
    fn test_validate_mandatory_terminal_fields() {
        let mut a = mock_addenda02();
        a.terminal_identification_code.clear();
        a.terminal_location = "   ".to_string();
        let errs = a.validate().unwrap_err();
        assert!(errs.has_field("TerminalIdentificationCode"));
        assert!(errs.has_field("TerminalLocation"));
    }

    #[test]
    fn test_parse_rejects_other_type_code() {
        let line = LINE.replacen("702", "705", 1);
        let err = Addenda02::parse(&line).unwrap_err();
        assert_eq!(err.field_name, "TypeCode");
    }
}
