//! Addenda99: return of an entry, with the R-code and original trace.

use crate::error::{ErrorList, FieldError, ValueSet};
use crate::field::{self, Line};
use crate::records::RecordKind;
use crate::return_codes::{self, ReasonCode};
use crate::validate::FieldChecker;
use chrono::NaiveDate;
use std::fmt;

/// Return of an entry by the RDFI.
pub type ReturnAddenda = Addenda99;

/// Addenda99: return entry addenda.
///
/// Carried by an entry that sends a previously received entry back to its
/// originator, with the reason in [`return_code`](Addenda99::return_code).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda99 {
    /// `R01`..`R85`, see [`return_codes::return_code_dict`].
    pub return_code: String,

    /// Trace number of the entry being returned.
    pub original_trace: u64,

    /// Only used for R14 and R15 returns.
    pub date_of_death: Option<NaiveDate>,

    /// Receiving DFI identification of the original entry.
    pub original_dfi: u32,

    pub addenda_information: String,

    pub trace_number: u64,
}

impl Addenda99 {
    pub const RECORD_TYPE: &'static str = "7";
    pub const TYPE_CODE: &'static str = "99";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    pub fn type_code(&self) -> &'static str {
        Self::TYPE_CODE
    }

    pub fn parse(line: &str) -> Result<Self, FieldError> {
        let line = Line::new(RecordKind::Addenda99, line)?;
        line.expect("RecordType", 0, Self::RECORD_TYPE, ValueSet::RecordType)?;
        line.expect("TypeCode", 1, Self::TYPE_CODE, ValueSet::TypeCode)?;
        Ok(Addenda99 {
            return_code: line.alpha("ReturnCode", 3, 3)?,
            original_trace: line.numeric("OriginalTrace", 6, 15)?,
            date_of_death: line.date("DateOfDeath", 21)?,
            original_dfi: line.numeric("OriginalDFI", 27, 8)? as u32,
            addenda_information: line.alpha("AddendaInformation", 35, 44)?,
            trace_number: line.numeric("TraceNumber", 79, 15)?,
        })
    }

    pub fn validate(&self) -> Result<(), ErrorList<FieldError>> {
        FieldChecker::new(RecordKind::Addenda99)
            .member(
                "ReturnCode",
                &self.return_code,
                return_codes::return_code(&self.return_code).is_some(),
                ValueSet::ReturnCode,
            )
            .numeric("OriginalTrace", self.original_trace, 15)
            .numeric("OriginalDFI", u64::from(self.original_dfi), 8)
            .alphanumeric("AddendaInformation", &self.addenda_information, 44)
            .numeric("TraceNumber", self.trace_number, 15)
            .finish()
    }

    /// Reason and description of the return code, if it is known.
    pub fn return_code_description(&self) -> Option<&'static ReasonCode> {
        return_codes::return_code(&self.return_code)
    }

    /// Trace number of the entry being returned, 15 digits.
    pub fn original_trace_field(&self) -> String {
        field::numeric_field(self.original_trace, 15)
    }

    /// `YYMMDD`, or six blanks when there is no date of death.
    pub fn date_of_death_field(&self) -> String {
        field::date_field(self.date_of_death)
    }

    pub fn original_dfi_field(&self) -> String {
        field::numeric_field(u64::from(self.original_dfi), 8)
    }

    /// Addenda information padded to 44 characters.
    pub fn addenda_information_field(&self) -> String {
        field::alpha_field(&self.addenda_information, 44)
    }

    pub fn trace_number_field(&self) -> String {
        field::numeric_field(self.trace_number, 15)
    }
}

impl fmt::Display for Addenda99 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}",
            Self::RECORD_TYPE,
            Self::TYPE_CODE,
            field::alpha_field(&self.return_code, 3),
            self.original_trace_field(),
            self.date_of_death_field(),
            self.original_dfi_field(),
            self.addenda_information_field(),
            self.trace_number_field(),
        )
    }
}
