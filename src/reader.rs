//! Decodes ACH text into a [`File`].
//!
//! Lines are dispatched on the record type in column 1 and reassembled by
//! position: entries belong to the open batch, addenda to the last entry.
//! Decoding does not stop at the first problem; every malformed record and
//! structural error is reported with its line number. Records that depend on
//! a record that failed to decode (the entries of a batch whose header is
//! broken, the addenda of a broken entry) are skipped silently.

use crate::batch::Batch;
use crate::entry::Entry;
use crate::error::{ErrorList, ParseError, ParseErrorKind, Result};
use crate::field::RECORD_LENGTH;
use crate::file::File;
use crate::records::{Addenda, BatchControl, BatchHeader, EntryDetail, FileControl, FileHeader};
use log::{debug, warn};
use std::io::BufRead;

/// Reads and decodes a whole file from `reader`.
pub fn read<R: BufRead>(reader: R) -> Result<File> {
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
    debug!("Read {} lines", lines.len());
    Ok(decode(lines.iter().map(String::as_str))?)
}

pub fn decode_str(input: &str) -> std::result::Result<File, ErrorList<ParseError>> {
    decode(input.lines())
}

/// Decodes lines of text, reporting every problem found.
pub fn decode<'a, I>(lines: I) -> std::result::Result<File, ErrorList<ParseError>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut decoder = Decoder::default();
    for (index, line) in lines.into_iter().enumerate() {
        decoder.line(index + 1, line);
    }
    decoder.finish()
}

#[derive(Default)]
struct Decoder {
    file: Option<File>,
    batch: Option<Batch>,
    line_number: usize,
    /// An entry detail was decoded in the open batch.
    entry_open: bool,
    /// The open batch header failed; drop records until its control.
    skip_batch: bool,
    /// The last entry detail failed; drop its addenda.
    skip_addenda: bool,
    control_seen: bool,
    errors: ErrorList<ParseError>,
}

impl Decoder {
    fn fail(&mut self, kind: ParseErrorKind) {
        let err = ParseError::new(self.line_number, kind);
        warn!("{}", err);
        self.errors.push(err);
    }

    fn unexpected(&mut self, record_type: char, reason: &'static str) {
        self.fail(ParseErrorKind::Unexpected { record_type, reason });
    }

    /// The file being built; a header is synthesized if the input lacks one.
    fn file(&mut self) -> &mut File {
        if self.file.is_none() {
            self.fail(ParseErrorKind::MissingFileHeader);
        }
        self.file.get_or_insert_with(|| File::new(FileHeader::new()))
    }

    fn line(&mut self, line_number: usize, raw: &str) {
        self.line_number = line_number;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            return;
        }
        let length = line.chars().count();
        if length != RECORD_LENGTH {
            self.fail(ParseErrorKind::LineLength { found: length });
            return;
        }
        if line.bytes().all(|b| b == b'9') {
            return;
        }
        let Some(record_type) = line.chars().next() else {
            return;
        };
        if self.control_seen {
            self.unexpected(record_type, "follows the file control");
            return;
        }

        match record_type {
            '1' => self.file_header(line),
            '5' => self.batch_header(line),
            '6' => self.entry_detail(line),
            '7' => self.addenda(line),
            '8' => self.batch_control(line),
            '9' => self.file_control(line),
            other => self.fail(ParseErrorKind::UnknownRecordType(other)),
        }
    }

    fn file_header(&mut self, line: &str) {
        if self.file.is_some() {
            self.unexpected('1', "duplicates the file header");
            return;
        }
        let header = match FileHeader::parse(line) {
            Ok(header) => header,
            Err(err) => {
                self.fail(ParseErrorKind::Field(err));
                FileHeader::new()
            }
        };
        self.file = Some(File::new(header));
    }

    fn batch_header(&mut self, line: &str) {
        self.file();
        if self.batch.is_some() || self.skip_batch {
            self.unexpected('5', "opens a batch inside an open batch");
            self.close_batch();
        }
        self.entry_open = false;
        self.skip_addenda = false;
        match BatchHeader::parse(line) {
            Ok(header) => self.batch = Some(Batch::new(header)),
            Err(err) => {
                self.fail(ParseErrorKind::Field(err));
                self.skip_batch = true;
            }
        }
    }

    fn entry_detail(&mut self, line: &str) {
        if self.skip_batch {
            return;
        }
        let Some(batch) = self.batch.as_mut() else {
            self.unexpected('6', "is outside a batch");
            return;
        };
        match EntryDetail::parse(line) {
            Ok(detail) => {
                batch.add_entry(Entry::new(detail));
                self.entry_open = true;
                self.skip_addenda = false;
            }
            Err(err) => {
                self.entry_open = false;
                self.skip_addenda = true;
                self.fail(ParseErrorKind::Field(err));
            }
        }
    }

    fn addenda(&mut self, line: &str) {
        if self.skip_batch || self.skip_addenda {
            return;
        }
        let entry = match self.batch.as_mut() {
            Some(batch) if self.entry_open => batch.entries_mut().last_mut(),
            _ => None,
        };
        let Some(entry) = entry else {
            self.unexpected('7', "has no entry detail");
            return;
        };
        match Addenda::parse(line) {
            Ok(addenda) => entry.add_addenda(addenda),
            Err(err) => self.fail(ParseErrorKind::Field(err)),
        }
    }

    fn batch_control(&mut self, line: &str) {
        if self.skip_batch {
            self.skip_batch = false;
            return;
        }
        if self.batch.is_none() {
            self.unexpected('8', "is outside a batch");
            return;
        }
        match BatchControl::parse(line) {
            Ok(control) => {
                if let Some(batch) = self.batch.as_mut() {
                    batch.set_control(control);
                }
            }
            Err(err) => self.fail(ParseErrorKind::Field(err)),
        }
        self.close_batch();
    }

    fn file_control(&mut self, line: &str) {
        if self.batch.is_some() || self.skip_batch {
            self.fail(ParseErrorKind::MissingBatchControl);
            self.close_batch();
        }
        self.control_seen = true;
        match FileControl::parse(line) {
            Ok(control) => self.file().set_control(control),
            Err(err) => self.fail(ParseErrorKind::Field(err)),
        }
    }

    fn close_batch(&mut self) {
        self.entry_open = false;
        self.skip_batch = false;
        self.skip_addenda = false;
        if let Some(batch) = self.batch.take() {
            self.file().add_batch(batch);
        }
    }

    fn finish(mut self) -> std::result::Result<File, ErrorList<ParseError>> {
        self.line_number += 1;
        if self.batch.is_some() || self.skip_batch {
            self.fail(ParseErrorKind::MissingBatchControl);
            self.close_batch();
        }
        if self.file.is_none() {
            self.fail(ParseErrorKind::MissingFileHeader);
        } else if !self.control_seen {
            self.fail(ParseErrorKind::MissingFileControl);
        }
        match self.file {
            Some(file) if self.errors.is_empty() => Ok(file),
            _ => Err(self.errors),
        }
    }
}
