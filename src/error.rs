//! Error types for the ACH engine.
//!
//! Validation never stops at the first defect: records, batches and files
//! report every violation they find as an [`ErrorList`]. Each error is a plain
//! comparable value so callers can match on the exact rule that fired.

use crate::entry::EntryCategory;
use crate::records::RecordKind;
use crate::sec::SecCode;
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// Result type alias for reader and CLI operations.
pub type Result<T> = std::result::Result<T, AchError>;

/// Sets of enumerated values a field can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSet {
    RecordType,
    TypeCode,
    ServiceClassCode,
    TransactionCode,
    SecCode,
    ReturnCode,
    ChangeCode,
    StateCode,
    OriginatorStatusCode,
    CardTransactionType,
    PaymentTypeCode,
    FileIdModifier,
}

impl fmt::Display for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueSet::RecordType => "record type",
            ValueSet::TypeCode => "addenda type code",
            ValueSet::ServiceClassCode => "service class code",
            ValueSet::TransactionCode => "transaction code",
            ValueSet::SecCode => "standard entry class code",
            ValueSet::ReturnCode => "return code",
            ValueSet::ChangeCode => "change code",
            ValueSet::StateCode => "US state or territory code",
            ValueSet::OriginatorStatusCode => "originator status code",
            ValueSet::CardTransactionType => "card transaction type code",
            ValueSet::PaymentTypeCode => "payment type code",
            ValueSet::FileIdModifier => "file ID modifier",
        };
        f.write_str(name)
    }
}

/// The formatting rule a single field broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    #[error("must contain only digits")]
    NonNumeric,

    #[error("has characters outside printable ASCII")]
    NonAlphanumeric,

    #[error("must be upper case alphanumeric")]
    NotUpperAlphanumeric,

    #[error("is mandatory and has a default value")]
    Mandatory,

    #[error("does not fit in {width} characters")]
    Overflow { width: usize },

    #[error("needs {expected} characters, found {found}")]
    Length { expected: usize, found: usize },

    #[error("has an invalid check digit, expected {expected}")]
    CheckDigit { expected: u8 },

    #[error("is not a valid {0}")]
    NotInSet(ValueSet),

    #[error("must be {expected:?}")]
    Constant { expected: &'static str },

    #[error("is not a valid date")]
    Date,

    #[error("is not a valid time")]
    Time,
}

/// A single field failed format, range or checksum validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{record} {field_name} {value:?} {rule}")]
pub struct FieldError {
    /// Record the field belongs to.
    pub record: RecordKind,

    /// Field name as used in the NACHA rules, e.g. `ReturnCode`.
    pub field_name: &'static str,

    /// Offending value as found.
    pub value: String,

    /// Rule that was violated.
    pub rule: FieldRule,
}

impl FieldError {
    pub fn new(
        record: RecordKind,
        field_name: &'static str,
        value: impl Into<String>,
        rule: FieldRule,
    ) -> Self {
        FieldError {
            record,
            field_name,
            value: value.into(),
            rule,
        }
    }
}

/// Business rules enforced across the records of a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchRule {
    /// A record inside the batch failed field validation.
    #[error("{0}")]
    Field(FieldError),

    #[error("header SEC code {found} does not match {expected} batch")]
    SecType { expected: SecCode, found: SecCode },

    #[error("{found} addenda found where {expected} are allowed")]
    AddendaCount { found: usize, expected: usize },

    #[error("addenda type {type_code} is not permitted in {sec} batches")]
    AddendaCategory { sec: SecCode, type_code: &'static str },

    #[error("addenda record indicator is {indicator} but the entry has {addenda} addenda")]
    AddendaIndicator { indicator: u8, addenda: usize },

    #[error("expected sequence {expected}, found {found}")]
    AddendaSequence { expected: u64, found: u64 },

    #[error("addenda trace number {found} does not match entry trace number {expected}")]
    AddendaTraceNumber { expected: u64, found: u64 },

    #[error("{found} entry in a batch of {expected} entries")]
    Category {
        expected: EntryCategory,
        found: EntryCategory,
    },

    #[error("amount must be non-zero")]
    AmountZero,

    #[error("amount must be zero for transaction code {transaction_code}")]
    AmountNonZero { transaction_code: u8 },

    #[error("amount {amount} exceeds the limit of {limit}")]
    AmountLimit { amount: u64, limit: u64 },

    #[error("service class code {service_class} does not allow transaction code {transaction_code}")]
    ServiceClassTranCode {
        service_class: u16,
        transaction_code: u8,
    },

    #[error("transaction code {transaction_code} is not permitted in {sec} batches")]
    TransactionCode { sec: SecCode, transaction_code: u8 },

    #[error("is mandatory")]
    Mandatory,

    #[error("must be {expected:?}, found {found:?}")]
    Expected { expected: String, found: String },

    #[error("trace number {trace_number} does not start with ODFI {odfi}")]
    TraceNumberOdfi { odfi: String, trace_number: u64 },

    #[error("trace number {found} does not follow {previous}")]
    TraceNumberAscending { previous: u64, found: u64 },

    #[error("batch control has not been computed")]
    ControlMissing,

    #[error("control value is {found}, entries add up to {expected}")]
    ControlMismatch { expected: u64, found: u64 },
}

/// A business rule failed inside one batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("batch #{batch_number} {field_name}: {rule}")]
pub struct BatchError {
    pub batch_number: u32,
    pub field_name: &'static str,
    pub rule: BatchRule,
}

impl BatchError {
    pub fn new(batch_number: u32, field_name: &'static str, rule: BatchRule) -> Self {
        BatchError {
            batch_number,
            field_name,
            rule,
        }
    }

    /// Wraps a record field error into the scope of a batch.
    pub fn field(batch_number: u32, err: FieldError) -> Self {
        BatchError {
            batch_number,
            field_name: err.field_name,
            rule: BatchRule::Field(err),
        }
    }
}

/// Rules enforced at file scope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileRule {
    #[error("file header {0}")]
    Header(FieldError),

    #[error("{0}")]
    Batch(BatchError),

    #[error("file control {0}")]
    Control(FieldError),

    #[error("file control has not been computed")]
    ControlMissing,

    #[error("control value is {found}, batches add up to {expected}")]
    ControlMismatch { expected: u64, found: u64 },

    #[error("batch number {found} does not follow {previous}")]
    BatchNumberAscending { previous: u32, found: u32 },

    #[error("trace number {trace_number} is used more than once")]
    DuplicateTraceNumber { trace_number: u64 },
}

/// A rule failed at file scope, or a batch/header error surfaced through the file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", file_message(.field_name, .rule))]
pub struct FileError {
    pub field_name: &'static str,
    pub rule: FileRule,
}

/// Control mismatches name the total they concern; other rules carry their own context.
fn file_message(field_name: &str, rule: &FileRule) -> String {
    match rule {
        FileRule::ControlMismatch { .. } => format!("file control {}: {}", field_name, rule),
        rule => rule.to_string(),
    }
}

impl FileError {
    pub fn new(field_name: &'static str, rule: FileRule) -> Self {
        FileError { field_name, rule }
    }

    /// Returns the batch error this file error wraps, if any.
    pub fn batch_error(&self) -> Option<&BatchError> {
        match &self.rule {
            FileRule::Batch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BatchError> for FileError {
    fn from(err: BatchError) -> Self {
        FileError {
            field_name: err.field_name,
            rule: FileRule::Batch(err),
        }
    }
}

/// Structural and record-level problems found while decoding lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Field(FieldError),

    #[error("line is {found} characters long, expected 94")]
    LineLength { found: usize },

    #[error("unknown record type {0:?}")]
    UnknownRecordType(char),

    #[error("record type {record_type} {reason}")]
    Unexpected {
        record_type: char,
        reason: &'static str,
    },

    #[error("file header record is missing")]
    MissingFileHeader,

    #[error("batch control record is missing")]
    MissingBatchControl,

    #[error("file control record is missing")]
    MissingFileControl,
}

/// A problem attributed to one input line (1-based).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line_number}: {kind}")]
pub struct ParseError {
    pub line_number: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line_number: usize, kind: ParseErrorKind) -> Self {
        ParseError { line_number, kind }
    }
}

/// Errors that name the field they were raised for.
pub trait Violation {
    fn field_name(&self) -> &str;
}

impl Violation for FieldError {
    fn field_name(&self) -> &str {
        self.field_name
    }
}

impl Violation for BatchError {
    fn field_name(&self) -> &str {
        self.field_name
    }
}

impl Violation for FileError {
    fn field_name(&self) -> &str {
        self.field_name
    }
}

impl Violation for ParseError {
    fn field_name(&self) -> &str {
        match &self.kind {
            ParseErrorKind::Field(err) => err.field_name,
            _ => "",
        }
    }
}

/// An ordered report of every violation found in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList<E>(Vec<E>);

impl<E> ErrorList<E> {
    pub fn new() -> Self {
        ErrorList(Vec::new())
    }

    pub fn push(&mut self, err: E) {
        self.0.push(err);
    }

    pub fn into_vec(self) -> Vec<E> {
        self.0
    }

    /// `Ok(())` when nothing was reported, otherwise the report itself.
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<E: PartialEq> ErrorList<E> {
    pub fn contains(&self, err: &E) -> bool {
        self.0.contains(err)
    }
}

impl<E: Violation> ErrorList<E> {
    /// Returns `true` if any reported error names `field_name`.
    pub fn has_field(&self, field_name: &str) -> bool {
        self.0.iter().any(|e| e.field_name() == field_name)
    }
}

impl ErrorList<BatchError> {
    pub fn has_rule(&self, rule: &BatchRule) -> bool {
        self.0.iter().any(|e| &e.rule == rule)
    }
}

impl ErrorList<FileError> {
    pub fn has_rule(&self, rule: &FileRule) -> bool {
        self.0.iter().any(|e| &e.rule == rule)
    }

    /// Returns `true` if any wrapped batch error carries `rule`.
    pub fn has_batch_rule(&self, rule: &BatchRule) -> bool {
        self.0
            .iter()
            .filter_map(FileError::batch_error)
            .any(|e| &e.rule == rule)
    }
}

impl<E> Default for ErrorList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Deref for ErrorList<E> {
    type Target = [E];

    fn deref(&self) -> &[E] {
        &self.0
    }
}

impl<E> Extend<E> for ErrorList<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<E> FromIterator<E> for ErrorList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        ErrorList(iter.into_iter().collect())
    }
}

impl<E> IntoIterator for ErrorList<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a ErrorList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<E: fmt::Display> fmt::Display for ErrorList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for ErrorList<E> {}

/// Errors surfaced by the reader and the CLI.
#[derive(Error, Debug)]
pub enum AchError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write the CSV summary
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// One or more lines could not be decoded
    #[error("decode failed: {0}")]
    Decode(#[from] ErrorList<ParseError>),

    /// The decoded file broke one or more rules
    #[error("invalid file: {0}")]
    Invalid(#[from] ErrorList<FileError>),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: ach-engine [--reformat] [--bypass-origin] [--bypass-destination] [--require-aba-origin] <file.ach>")]
    MissingArgument,

    /// Unrecognized command line option
    #[error("Unknown option {0}")]
    UnknownOption(String),
}
