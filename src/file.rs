//! The ACH file: header, batches, control and block filler.

use crate::batch::Batch;
use crate::error::{ErrorList, FileError, FileRule, Result};
use crate::field::{BLOCKING_FACTOR, RECORD_LENGTH};
use crate::options::ValidateOptions;
use crate::records::{FileControl, FileHeader};
use log::{debug, info};
use std::collections::HashSet;
use std::io::Write;

const ENTRY_HASH_MODULUS: u64 = 10_000_000_000;

/// A complete ACH file.
///
/// Batches are numbered and their controls summed by [`File::create`]; the
/// stored [`FileControl`] is dropped whenever a batch is added so stale totals
/// are never written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    header: FileHeader,
    batches: Vec<Batch>,
    control: Option<FileControl>,
    validation: ValidateOptions,
}

impl File {
    pub fn new(header: FileHeader) -> Self {
        File {
            header,
            batches: Vec::new(),
            control: None,
            validation: ValidateOptions::default(),
        }
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut FileHeader {
        &mut self.header
    }

    pub fn add_batch(&mut self, batch: Batch) {
        self.batches.push(batch);
        self.control = None;
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn batches_mut(&mut self) -> &mut [Batch] {
        &mut self.batches
    }

    pub fn control(&self) -> Option<&FileControl> {
        self.control.as_ref()
    }

    /// Installs a control record as decoded, without recomputing it.
    pub fn set_control(&mut self, control: FileControl) {
        self.control = Some(control);
    }

    pub fn validation(&self) -> ValidateOptions {
        self.validation
    }

    pub fn set_validation(&mut self, options: ValidateOptions) {
        self.validation = options;
    }

    /// Records in the file before block filler.
    pub fn line_count(&self) -> usize {
        2 + self.batches.iter().map(Batch::line_count).sum::<usize>()
    }

    /// Numbers the batches, creates each one, totals them and validates.
    ///
    /// Leaves the file without a control record when anything fails.
    pub fn create(&mut self) -> std::result::Result<(), ErrorList<FileError>> {
        let mut errors = ErrorList::new();
        for (index, batch) in self.batches.iter_mut().enumerate() {
            batch.header_mut().batch_number = index as u32 + 1;
            if let Err(errs) = batch.create() {
                errors.extend(errs.into_iter().map(FileError::from));
            }
        }
        if !errors.is_empty() {
            self.control = None;
            self.check_structure(&mut errors);
            return Err(errors);
        }

        let control = self.compute_control();
        debug!(
            "File: {} batches, {} blocks, {} entries and addenda",
            control.batch_count, control.block_count, control.entry_addenda_count
        );
        self.control = Some(control);
        let result = self.validate();
        if result.is_err() {
            self.control = None;
        }
        result
    }

    /// File totals recomputed from the batches as they are now.
    pub fn compute_control(&self) -> FileControl {
        let mut control = FileControl::new();
        control.batch_count = self.batches.len() as u64;
        control.block_count = self.line_count().div_ceil(BLOCKING_FACTOR) as u64;

        for batch in &self.batches {
            let totals = batch.compute_control();
            control.entry_addenda_count = control
                .entry_addenda_count
                .saturating_add(totals.entry_addenda_count);
            control.entry_hash =
                (control.entry_hash + totals.entry_hash % ENTRY_HASH_MODULUS) % ENTRY_HASH_MODULUS;
            control.total_debit_entry_dollar_amount = control
                .total_debit_entry_dollar_amount
                .saturating_add(totals.total_debit_entry_dollar_amount);
            control.total_credit_entry_dollar_amount = control
                .total_credit_entry_dollar_amount
                .saturating_add(totals.total_credit_entry_dollar_amount);
        }
        control
    }

    /// Checks the header, every batch, file-wide uniqueness and the control totals.
    pub fn validate(&self) -> std::result::Result<(), ErrorList<FileError>> {
        let mut errors = ErrorList::new();
        for batch in &self.batches {
            if let Err(errs) = batch.validate() {
                errors.extend(errs.into_iter().map(FileError::from));
            }
        }
        self.check_structure(&mut errors);

        match &self.control {
            None => errors.push(FileError::new("FileControl", FileRule::ControlMissing)),
            Some(control) => {
                if let Err(errs) = control.validate() {
                    errors.extend(
                        errs.into_iter()
                            .map(|e| FileError::new(e.field_name, FileRule::Control(e))),
                    );
                }
                let expected = self.compute_control();
                let totals = [
                    ("BatchCount", expected.batch_count, control.batch_count),
                    ("BlockCount", expected.block_count, control.block_count),
                    (
                        "EntryAddendaCount",
                        expected.entry_addenda_count,
                        control.entry_addenda_count,
                    ),
                    ("EntryHash", expected.entry_hash, control.entry_hash),
                    (
                        "TotalDebitEntryDollarAmount",
                        expected.total_debit_entry_dollar_amount,
                        control.total_debit_entry_dollar_amount,
                    ),
                    (
                        "TotalCreditEntryDollarAmount",
                        expected.total_credit_entry_dollar_amount,
                        control.total_credit_entry_dollar_amount,
                    ),
                ];
                for (name, expected, found) in totals {
                    if expected != found {
                        errors.push(FileError::new(
                            name,
                            FileRule::ControlMismatch { expected, found },
                        ));
                    }
                }
            }
        }

        errors.into_result()
    }

    /// Header fields, batch numbering and file-wide trace number uniqueness.
    fn check_structure(&self, errors: &mut ErrorList<FileError>) {
        if let Err(errs) = self.header.validate_with(&self.validation) {
            errors.extend(
                errs.into_iter()
                    .map(|e| FileError::new(e.field_name, FileRule::Header(e))),
            );
        }

        let mut previous_batch: Option<u32> = None;
        let mut traces = HashSet::new();
        for batch in &self.batches {
            let found = batch.header().batch_number;
            if let Some(previous) = previous_batch {
                if found <= previous {
                    errors.push(FileError::new(
                        "BatchNumber",
                        FileRule::BatchNumberAscending { previous, found },
                    ));
                }
            }
            previous_batch = Some(found);

            for entry in batch.entries() {
                let trace_number = entry.detail.trace_number;
                if !traces.insert(trace_number) {
                    errors.push(FileError::new(
                        "TraceNumber",
                        FileRule::DuplicateTraceNumber { trace_number },
                    ));
                }
            }
        }
    }

    /// Every line of the file, padded with filler to a whole number of blocks.
    pub fn lines(&self) -> std::result::Result<Vec<String>, ErrorList<FileError>> {
        let Some(control) = &self.control else {
            return Err(ErrorList::from_iter([FileError::new(
                "FileControl",
                FileRule::ControlMissing,
            )]));
        };

        let mut lines = Vec::with_capacity(self.line_count() + BLOCKING_FACTOR);
        lines.push(self.header.to_string());
        let mut errors = ErrorList::new();
        for batch in &self.batches {
            match batch.lines() {
                Ok(batch_lines) => lines.extend(batch_lines),
                Err(err) => errors.push(FileError::from(err)),
            }
        }
        errors.into_result()?;
        lines.push(control.to_string());

        let filler = "9".repeat(RECORD_LENGTH);
        while lines.len() % BLOCKING_FACTOR != 0 {
            lines.push(filler.clone());
        }
        Ok(lines)
    }

    /// The file as text, one record per line.
    pub fn encode(&self) -> std::result::Result<String, ErrorList<FileError>> {
        let lines = self.lines()?;
        let mut out = String::with_capacity(lines.len() * (RECORD_LENGTH + 1));
        for line in &lines {
            out.push_str(line);
            out.push('\n');
        }
        Ok(out)
    }

    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        let lines = self.lines()?;
        for line in &lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        info!("Wrote {} lines", lines.len());
        Ok(())
    }
}
