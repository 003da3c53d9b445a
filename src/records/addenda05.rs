//! Addenda05: free-form payment related information.

use crate::error::{ErrorList, FieldError, ValueSet};
use crate::field::{self, Line};
use crate::records::RecordKind;
use crate::validate::FieldChecker;
use std::fmt;

/// Addenda05: free-form payment related information.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda05 {
    /// Remittance text, e.g. ANSI X12 segments for CTX.
    pub payment_related_information: String,

    /// Position of this addenda among the entry's addenda, starting at 1.
    pub sequence_number: u64,

    /// Last seven digits of the entry's trace number.
    pub entry_detail_sequence_number: u64,
}

impl Addenda05 {
    pub const RECORD_TYPE: &'static str = "7";
    pub const TYPE_CODE: &'static str = "05";

    pub fn new() -> Self {
        Self::default()
    }

    /// An addenda with the given payment related information and no sequence yet.
    pub fn with_information(info: impl Into<String>) -> Self {
        Addenda05 {
            payment_related_information: info.into(),
            ..Self::default()
        }
    }

    pub fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    pub fn type_code(&self) -> &'static str {
        Self::TYPE_CODE
    }

    pub fn parse(line: &str) -> Result<Self, FieldError> {
        let line = Line::new(RecordKind::Addenda05, line)?;
        line.expect("RecordType", 0, Self::RECORD_TYPE, ValueSet::RecordType)?;
        line.expect("TypeCode", 1, Self::TYPE_CODE, ValueSet::TypeCode)?;
        Ok(Addenda05 {
            payment_related_information: line.alpha("PaymentRelatedInformation", 3, 80)?,
            sequence_number: line.numeric("SequenceNumber", 83, 4)?,
            entry_detail_sequence_number: line.numeric("EntryDetailSequenceNumber", 87, 7)?,
        })
    }

    pub fn validate(&self) -> Result<(), ErrorList<FieldError>> {
        FieldChecker::new(RecordKind::Addenda05)
            .alphanumeric("PaymentRelatedInformation", &self.payment_related_information, 80)
            .mandatory_numeric("SequenceNumber", self.sequence_number, 4)
            .mandatory_numeric("EntryDetailSequenceNumber", self.entry_detail_sequence_number, 7)
            .finish()
    }

    /// Information padded to 80 characters.
    pub fn payment_related_information_field(&self) -> String {
        field::alpha_field(&self.payment_related_information, 80)
    }

    pub fn sequence_number_field(&self) -> String {
        field::numeric_field(self.sequence_number, 4)
    }

    /// Last seven digits of the owning entry's trace number.
    pub fn entry_detail_sequence_number_field(&self) -> String {
        field::numeric_field(self.entry_detail_sequence_number, 7)
    }
}

impl fmt::Display for Addenda05 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            Self::RECORD_TYPE,
            Self::TYPE_CODE,
            self.payment_related_information_field(),
            self.sequence_number_field(),
            self.entry_detail_sequence_number_field(),
        )
    }
}
