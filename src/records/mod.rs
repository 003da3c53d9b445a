//! Fixed-width record types.
//!
//! Each record parses from and serializes to one 94 character line. The
//! record type (column 1) and addenda type code (columns 2-3) are associated
//! constants of each type and cannot be changed on an instance.

mod addenda;
mod addenda02;
mod addenda05;
mod addenda98;
mod addenda99;
mod batch_control;
mod batch_header;
mod entry_detail;
mod file_control;
mod file_header;

pub use addenda::{Addenda, AddendaParams};
pub use addenda02::Addenda02;
pub use addenda05::Addenda05;
pub use addenda98::{Addenda98, NoticeOfChange};
pub use addenda99::{Addenda99, ReturnAddenda};
pub use batch_control::BatchControl;
pub use batch_header::BatchHeader;
pub use entry_detail::EntryDetail;
pub use file_control::FileControl;
pub use file_header::FileHeader;

use std::fmt;

/// Every record variant of an ACH file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    FileHeader,
    BatchHeader,
    EntryDetail,
    Addenda02,
    Addenda05,
    Addenda98,
    Addenda99,
    BatchControl,
    FileControl,
}

impl RecordKind {
    /// Leading character of the record's line.
    pub fn record_type(&self) -> char {
        match self {
            RecordKind::FileHeader => '1',
            RecordKind::BatchHeader => '5',
            RecordKind::EntryDetail => '6',
            RecordKind::Addenda02
            | RecordKind::Addenda05
            | RecordKind::Addenda98
            | RecordKind::Addenda99 => '7',
            RecordKind::BatchControl => '8',
            RecordKind::FileControl => '9',
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::FileHeader => "FileHeader",
            RecordKind::BatchHeader => "BatchHeader",
            RecordKind::EntryDetail => "EntryDetail",
            RecordKind::Addenda02 => "Addenda02",
            RecordKind::Addenda05 => "Addenda05",
            RecordKind::Addenda98 => "Addenda98",
            RecordKind::Addenda99 => "Addenda99",
            RecordKind::BatchControl => "BatchControl",
            RecordKind::FileControl => "FileControl",
        };
        f.write_str(name)
    }
}
