//! Fixed-width field formatting and parsing.
//!
//! Every NACHA record is 94 ASCII characters. Numeric fields are right
//! justified and zero padded, alphanumeric fields are left justified and space
//! padded, dates are `YYMMDD` and times `HHMM`. Amounts are integers in cents.

use crate::error::{FieldError, FieldRule};
use crate::records::RecordKind;
use chrono::{NaiveDate, NaiveTime};

/// Length of every record line.
pub const RECORD_LENGTH: usize = 94;

/// Number of lines in a block.
pub const BLOCKING_FACTOR: usize = 10;

/// A value to be written into a fixed-width field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Zero padded, right justified digits.
    Numeric(u64),
    /// Amount in cents; formatted like `Numeric`.
    Amount(u64),
    /// Space padded, left justified text.
    Alphanumeric(&'a str),
    /// `YYMMDD`, or blanks when absent.
    Date(Option<NaiveDate>),
    /// `HHMM`, or blanks when absent.
    Time(Option<NaiveTime>),
}

/// Formats `value` into exactly `width` characters.
///
/// Fails with [`FieldRule::Overflow`] when the value does not fit.
pub fn format(
    record: RecordKind,
    name: &'static str,
    value: FieldValue<'_>,
    width: usize,
) -> Result<String, FieldError> {
    let text = match value {
        FieldValue::Numeric(n) | FieldValue::Amount(n) => format!("{:0width$}", n, width = width),
        FieldValue::Alphanumeric(s) => format!("{:<width$}", s, width = width),
        FieldValue::Date(d) => date_field(d),
        FieldValue::Time(t) => time_field(t),
    };
    if text.chars().count() != width {
        let raw = match value {
            FieldValue::Alphanumeric(s) => s.to_string(),
            _ => text,
        };
        return Err(FieldError::new(
            record,
            name,
            raw,
            FieldRule::Overflow { width },
        ));
    }
    Ok(text)
}

/// Zero padded numeric field. Values wider than `width` keep their low-order digits.
pub fn numeric_field(value: u64, width: usize) -> String {
    let s = format!("{:0width$}", value, width = width);
    s[s.len() - width..].to_string()
}

/// Left justified, space padded text. Longer values are cut at `width`.
pub fn alpha_field(value: &str, width: usize) -> String {
    let truncated: String = value.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

/// Right justified, space padded text, used for the immediate destination/origin.
pub fn right_alpha_field(value: &str, width: usize) -> String {
    let count = value.chars().count();
    let truncated: String = value.chars().skip(count.saturating_sub(width)).collect();
    format!("{:>width$}", truncated, width = width)
}

/// Digits-as-text field, zero padded on the left (routing identifiers).
pub fn zero_padded_text(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count >= width {
        value.chars().skip(count - width).collect()
    } else {
        format!("{}{}", "0".repeat(width - count), value)
    }
}

pub fn date_field(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%y%m%d").to_string(),
        None => " ".repeat(6),
    }
}

pub fn time_field(time: Option<NaiveTime>) -> String {
    match time {
        Some(t) => t.format("%H%M").to_string(),
        None => " ".repeat(4),
    }
}

/// Reads `width` characters starting at the 0-based `start` of a shared field.
///
/// Returns an empty string when the field is shorter than `start`.
pub fn subfield(field: &str, start: usize, width: usize) -> &str {
    let end = (start + width).min(field.len());
    field.get(start.min(end)..end).unwrap_or("")
}

/// Writes `value` into a fixed position of a shared field of `total` characters.
pub fn set_subfield(field: &mut String, total: usize, start: usize, width: usize, value: &str) {
    let mut padded = alpha_field(field, total);
    if !padded.is_ascii() {
        padded = padded
            .chars()
            .map(|c| if c.is_ascii() { c } else { ' ' })
            .collect();
    }
    padded.replace_range(start..start + width, &alpha_field(value, width));
    *field = padded.trim_end().to_string();
}

/// A raw record line being decoded.
///
/// All accessors take 0-based offsets and never read past the line.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    text: &'a str,
    record: RecordKind,
}

impl<'a> Line<'a> {
    /// Wraps `text`, requiring it to be exactly [`RECORD_LENGTH`] ASCII characters.
    pub fn new(record: RecordKind, text: &'a str) -> Result<Self, FieldError> {
        if !text.is_ascii() {
            return Err(FieldError::new(
                record,
                "Line",
                text,
                FieldRule::NonAlphanumeric,
            ));
        }
        if text.len() != RECORD_LENGTH {
            return Err(FieldError::new(
                record,
                "RecordLength",
                text,
                FieldRule::Length {
                    expected: RECORD_LENGTH,
                    found: text.len(),
                },
            ));
        }
        Ok(Line { text, record })
    }

    /// Wraps a possibly short fragment without length checks.
    pub fn fragment(record: RecordKind, text: &'a str) -> Self {
        Line { text, record }
    }

    pub fn record(&self) -> RecordKind {
        self.record
    }

    /// Raw characters of a field.
    pub fn slice(&self, name: &'static str, start: usize, width: usize) -> Result<&'a str, FieldError> {
        self.text.get(start..start + width).ok_or_else(|| {
            FieldError::new(
                self.record,
                name,
                self.text.get(start.min(self.text.len())..).unwrap_or(""),
                FieldRule::Length {
                    expected: start + width,
                    found: self.text.len(),
                },
            )
        })
    }

    /// Numeric field; all blanks decode to zero.
    pub fn numeric(&self, name: &'static str, start: usize, width: usize) -> Result<u64, FieldError> {
        let raw = self.slice(name, start, width)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::new(self.record, name, raw, FieldRule::NonNumeric));
        }
        trimmed
            .parse::<u64>()
            .map_err(|_| FieldError::new(self.record, name, raw, FieldRule::Overflow { width }))
    }

    /// Left justified text with trailing padding removed.
    pub fn alpha(&self, name: &'static str, start: usize, width: usize) -> Result<String, FieldError> {
        Ok(self.slice(name, start, width)?.trim_end().to_string())
    }

    /// Text with padding removed on both sides.
    pub fn trimmed(&self, name: &'static str, start: usize, width: usize) -> Result<String, FieldError> {
        Ok(self.slice(name, start, width)?.trim().to_string())
    }

    /// `YYMMDD`; blanks or zeros decode to `None`.
    pub fn date(&self, name: &'static str, start: usize) -> Result<Option<NaiveDate>, FieldError> {
        let raw = self.slice(name, start, 6)?;
        if raw.trim().is_empty() || raw == "000000" {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, "%y%m%d")
            .map(Some)
            .map_err(|_| FieldError::new(self.record, name, raw, FieldRule::Date))
    }

    /// `HHMM`; blanks decode to `None`.
    pub fn time(&self, name: &'static str, start: usize) -> Result<Option<NaiveTime>, FieldError> {
        let raw = self.slice(name, start, 4)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        NaiveTime::parse_from_str(raw, "%H%M")
            .map(Some)
            .map_err(|_| FieldError::new(self.record, name, raw, FieldRule::Time))
    }

    /// Checks a fixed discriminant such as the record type.
    pub fn expect(
        &self,
        name: &'static str,
        start: usize,
        expected: &'static str,
        set: crate::error::ValueSet,
    ) -> Result<(), FieldError> {
        let raw = self.slice(name, start, expected.len())?;
        if raw != expected {
            return Err(FieldError::new(self.record, name, raw, FieldRule::NotInSet(set)));
        }
        Ok(())
    }
}
