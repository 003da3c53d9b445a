//! Addenda records attached to an entry detail, keyed by type code.

use crate::error::{ErrorList, FieldError, FieldRule, ValueSet};
use crate::records::{Addenda02, Addenda05, Addenda98, Addenda99, RecordKind};
use chrono::NaiveDate;
use std::fmt;

/// Any addenda record (type 7), discriminated by its type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addenda {
    Terminal(Addenda02),
    PaymentInfo(Addenda05),
    NoticeOfChange(Addenda98),
    Return(Addenda99),
}

impl Addenda {
    /// Decodes one addenda line, dispatching on columns 2-3.
    pub fn parse(line: &str) -> Result<Self, FieldError> {
        match line.get(1..3) {
            Some(Addenda02::TYPE_CODE) => Addenda02::parse(line).map(Addenda::Terminal),
            Some(Addenda05::TYPE_CODE) => Addenda05::parse(line).map(Addenda::PaymentInfo),
            Some(Addenda98::TYPE_CODE) => Addenda98::parse(line).map(Addenda::NoticeOfChange),
            Some(Addenda99::TYPE_CODE) => Addenda99::parse(line).map(Addenda::Return),
            other => Err(unknown_type_code(other.unwrap_or(line))),
        }
    }

    /// Builds the variant named by `params.type_code`.
    pub fn from_params(params: AddendaParams) -> Result<Self, FieldError> {
        match params.type_code.as_str() {
            Addenda02::TYPE_CODE => {
                let kind = RecordKind::Addenda02;
                Ok(Addenda::Terminal(Addenda02 {
                    reference_information_one: params.reference_information_one,
                    reference_information_two: params.reference_information_two,
                    terminal_identification_code: params.terminal_identification_code,
                    transaction_serial_number: params.transaction_serial_number,
                    transaction_date: params.transaction_date,
                    authorization_code_or_expire_date: params.authorization_code_or_expire_date,
                    terminal_location: params.terminal_location,
                    terminal_city: params.terminal_city,
                    terminal_state: params.terminal_state,
                    trace_number: number(kind, "TraceNumber", &params.trace_number)?,
                }))
            }
            Addenda05::TYPE_CODE => {
                let kind = RecordKind::Addenda05;
                Ok(Addenda::PaymentInfo(Addenda05 {
                    payment_related_information: params.payment_related_information,
                    sequence_number: number(kind, "SequenceNumber", &params.sequence_number)?,
                    entry_detail_sequence_number: number(
                        kind,
                        "EntryDetailSequenceNumber",
                        &params.entry_detail_sequence_number,
                    )?,
                }))
            }
            Addenda98::TYPE_CODE => {
                let kind = RecordKind::Addenda98;
                Ok(Addenda::NoticeOfChange(Addenda98 {
                    change_code: params.change_code,
                    original_trace: number(kind, "OriginalTrace", &params.original_trace)?,
                    original_dfi: dfi(kind, &params.original_dfi)?,
                    corrected_data: params.corrected_data,
                    trace_number: number(kind, "TraceNumber", &params.trace_number)?,
                }))
            }
            Addenda99::TYPE_CODE => {
                let kind = RecordKind::Addenda99;
                Ok(Addenda::Return(Addenda99 {
                    return_code: params.return_code,
                    original_trace: number(kind, "OriginalTrace", &params.original_trace)?,
                    date_of_death: date(kind, "DateOfDeath", &params.date_of_death)?,
                    original_dfi: dfi(kind, &params.original_dfi)?,
                    addenda_information: params.addenda_information,
                    trace_number: number(kind, "TraceNumber", &params.trace_number)?,
                }))
            }
            other => Err(unknown_type_code(other)),
        }
    }

    /// Two digit addenda type code.
    pub fn type_code(&self) -> &'static str {
        match self {
            Addenda::Terminal(_) => Addenda02::TYPE_CODE,
            Addenda::PaymentInfo(_) => Addenda05::TYPE_CODE,
            Addenda::NoticeOfChange(_) => Addenda98::TYPE_CODE,
            Addenda::Return(_) => Addenda99::TYPE_CODE,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Addenda::Terminal(_) => RecordKind::Addenda02,
            Addenda::PaymentInfo(_) => RecordKind::Addenda05,
            Addenda::NoticeOfChange(_) => RecordKind::Addenda98,
            Addenda::Return(_) => RecordKind::Addenda99,
        }
    }

    /// Field checks of whichever addenda this is.
    pub fn validate(&self) -> Result<(), ErrorList<FieldError>> {
        match self {
            Addenda::Terminal(a) => a.validate(),
            Addenda::PaymentInfo(a) => a.validate(),
            Addenda::NoticeOfChange(a) => a.validate(),
            Addenda::Return(a) => a.validate(),
        }
    }

    /// Trace number of the owning entry, for the types that carry one.
    pub fn trace_number(&self) -> Option<u64> {
        match self {
            Addenda::Terminal(a) => Some(a.trace_number),
            Addenda::PaymentInfo(_) => None,
            Addenda::NoticeOfChange(a) => Some(a.trace_number),
            Addenda::Return(a) => Some(a.trace_number),
        }
    }

    /// Stamps the owning entry's trace number; Addenda05 instead takes its last seven digits.
    pub fn set_trace_number(&mut self, trace_number: u64) {
        match self {
            Addenda::Terminal(a) => a.trace_number = trace_number,
            Addenda::PaymentInfo(a) => a.entry_detail_sequence_number = trace_number % 10_000_000,
            Addenda::NoticeOfChange(a) => a.trace_number = trace_number,
            Addenda::Return(a) => a.trace_number = trace_number,
        }
    }
}

impl From<Addenda02> for Addenda {
    fn from(a: Addenda02) -> Self {
        Addenda::Terminal(a)
    }
}

impl From<Addenda05> for Addenda {
    fn from(a: Addenda05) -> Self {
        Addenda::PaymentInfo(a)
    }
}

impl From<Addenda98> for Addenda {
    fn from(a: Addenda98) -> Self {
        Addenda::NoticeOfChange(a)
    }
}

impl From<Addenda99> for Addenda {
    fn from(a: Addenda99) -> Self {
        Addenda::Return(a)
    }
}

impl fmt::Display for Addenda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addenda::Terminal(a) => a.fmt(f),
            Addenda::PaymentInfo(a) => a.fmt(f),
            Addenda::NoticeOfChange(a) => a.fmt(f),
            Addenda::Return(a) => a.fmt(f),
        }
    }
}

/// Named string parameters for [`Addenda::from_params`].
///
/// Only the fields of the selected type code are read; numbers are digits,
/// dates `YYMMDD`, and blank strings stand for zero or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddendaParams {
    pub type_code: String,
    pub return_code: String,
    pub change_code: String,
    pub original_trace: String,
    pub original_dfi: String,
    pub date_of_death: String,
    pub addenda_information: String,
    pub corrected_data: String,
    pub trace_number: String,
    pub payment_related_information: String,
    pub sequence_number: String,
    pub entry_detail_sequence_number: String,
    pub reference_information_one: String,
    pub reference_information_two: String,
    pub terminal_identification_code: String,
    pub transaction_serial_number: String,
    pub transaction_date: String,
    pub authorization_code_or_expire_date: String,
    pub terminal_location: String,
    pub terminal_city: String,
    pub terminal_state: String,
}

// Unknown type codes are reported against the free-form addenda kind.
fn unknown_type_code(raw: &str) -> FieldError {
    FieldError::new(
        RecordKind::Addenda05,
        "TypeCode",
        raw,
        FieldRule::NotInSet(ValueSet::TypeCode),
    )
}

fn number(kind: RecordKind, name: &'static str, raw: &str) -> Result<u64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::new(kind, name, raw, FieldRule::NonNumeric));
    }
    trimmed
        .parse()
        .map_err(|_| FieldError::new(kind, name, raw, FieldRule::Overflow { width: 19 }))
}

fn dfi(kind: RecordKind, raw: &str) -> Result<u32, FieldError> {
    let value = number(kind, "OriginalDFI", raw)?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v < 100_000_000)
        .ok_or_else(|| FieldError::new(kind, "OriginalDFI", raw, FieldRule::Overflow { width: 8 }))
}

fn date(kind: RecordKind, name: &'static str, raw: &str) -> Result<Option<NaiveDate>, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.bytes().all(|b| b == b'0') {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%y%m%d")
        .map(Some)
        .map_err(|_| FieldError::new(kind, name, raw, FieldRule::Date))
}
