//! # ACH Engine
//!
//! Encoder, decoder and validator for NACHA ACH files: fixed-width text of
//! 94 character records grouped into batches and blocked in tens.
//!
//! ## Design Principles
//!
//! - **Typed records**: every record type parses from and serializes to one line
//! - **Complete reports**: validation returns every violation, not the first
//! - **Computed controls**: batch and file totals are derived, never hand-set
//! - **Integer money**: amounts are cents; `rust_decimal` renders dollars
//!
//! ## Example
//!
//! ```no_run
//! use ach_engine::reader;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = reader::read(BufReader::new(File::open("payroll.ach").unwrap())).unwrap();
//! file.validate().unwrap();
//! print!("{}", file.encode().unwrap());
//! ```

pub mod batch;
pub mod codes;
pub mod entry;
pub mod error;
pub mod field;
pub mod file;
pub mod money;
pub mod options;
pub mod reader;
pub mod records;
pub mod return_codes;
pub mod sec;
pub mod summary;
pub mod validate;

pub use batch::Batch;
pub use entry::{Entry, EntryCategory};
pub use error::{
    AchError, BatchError, BatchRule, ErrorList, FieldError, FieldRule, FileError, FileRule,
    ParseError, ParseErrorKind, Result, ValueSet,
};
pub use file::File;
pub use money::Dollars;
pub use options::ValidateOptions;
pub use records::{
    Addenda, Addenda02, Addenda05, Addenda98, Addenda99, AddendaParams, BatchControl, BatchHeader,
    EntryDetail, FileControl, FileHeader, NoticeOfChange, RecordKind, ReturnAddenda,
};
pub use return_codes::ReasonCode;
pub use sec::{Direction, SecCode, SecRules};
pub use summary::{Summary, SummaryRow};
