//! Field-level validation rules shared by every record type.
//!
//! [`FieldChecker`] accumulates failures for one record so a caller sees every
//! defect at once instead of stopping at the first.

use crate::codes;
use crate::error::{ErrorList, FieldError, FieldRule, ValueSet};
use crate::field::{self, FieldValue};
use crate::records::RecordKind;

/// Printable ASCII only.
pub fn is_alphanumeric(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7e).contains(&b))
}

/// Upper case letters, digits and spaces.
pub fn is_upper_alphanumeric(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b' ')
}

pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Sentinel values that count as "not provided": empty, all blanks, all zeros.
pub fn is_blank_or_zero(s: &str) -> bool {
    s.trim().is_empty() || s.trim().bytes().all(|b| b == b'0')
}

/// Collects field errors for one record.
#[derive(Debug)]
pub struct FieldChecker {
    record: RecordKind,
    errors: ErrorList<FieldError>,
}

impl FieldChecker {
    pub fn new(record: RecordKind) -> Self {
        FieldChecker {
            record,
            errors: ErrorList::new(),
        }
    }

    fn fail(&mut self, name: &'static str, value: impl Into<String>, rule: FieldRule) {
        self.errors.push(FieldError::new(self.record, name, value, rule));
    }

    pub fn push(&mut self, err: FieldError) -> &mut Self {
        self.errors.push(err);
        self
    }

    /// Printable text that fits in `width`.
    pub fn alphanumeric(&mut self, name: &'static str, value: &str, width: usize) -> &mut Self {
        if !is_alphanumeric(value) {
            self.fail(name, value, FieldRule::NonAlphanumeric);
        } else if let Err(err) =
            field::format(self.record, name, FieldValue::Alphanumeric(value), width)
        {
            self.errors.push(err);
        }
        self
    }

    pub fn upper_alphanumeric(&mut self, name: &'static str, value: &str, width: usize) -> &mut Self {
        if !is_upper_alphanumeric(value) {
            self.fail(name, value, FieldRule::NotUpperAlphanumeric);
            return self;
        }
        self.alphanumeric(name, value, width)
    }

    /// Text that is neither blank nor all zeros.
    pub fn mandatory(&mut self, name: &'static str, value: &str, width: usize) -> &mut Self {
        if is_blank_or_zero(value) {
            self.fail(name, value, FieldRule::Mandatory);
            return self;
        }
        self.alphanumeric(name, value, width)
    }

    /// Integer that fits in `width` digits.
    pub fn numeric(&mut self, name: &'static str, value: u64, width: usize) -> &mut Self {
        if let Err(err) = field::format(self.record, name, FieldValue::Numeric(value), width) {
            self.errors.push(err);
        }
        self
    }

    pub fn mandatory_numeric(&mut self, name: &'static str, value: u64, width: usize) -> &mut Self {
        if value == 0 {
            self.fail(name, "0", FieldRule::Mandatory);
            return self;
        }
        self.numeric(name, value, width)
    }

    /// Digits carried as text, such as routing identifiers.
    pub fn digits(&mut self, name: &'static str, value: &str, width: usize) -> &mut Self {
        if !is_numeric(value) {
            self.fail(name, value, FieldRule::NonNumeric);
        } else if value.len() != width {
            self.fail(
                name,
                value,
                FieldRule::Length {
                    expected: width,
                    found: value.len(),
                },
            );
        }
        self
    }

    /// Eight digit routing prefix followed by its check digit.
    pub fn check_digit(&mut self, name: &'static str, routing: &str, digit: &str) -> &mut Self {
        if let Some(expected) = codes::check_digit(routing) {
            if digit != expected.to_string() {
                self.fail(name, digit, FieldRule::CheckDigit { expected });
            }
        }
        self
    }

    /// Full nine digit routing number with a valid check digit.
    pub fn routing(&mut self, name: &'static str, routing: &str) -> &mut Self {
        if is_blank_or_zero(routing) {
            self.fail(name, routing, FieldRule::Mandatory);
            return self;
        }
        self.digits(name, routing, 9);
        if is_numeric(routing) && routing.len() == 9 && !codes::is_valid_routing(routing) {
            if let Some(expected) = codes::check_digit(&routing[..8]) {
                self.fail(name, routing, FieldRule::CheckDigit { expected });
            }
        }
        self
    }

    pub fn member(&mut self, name: &'static str, value: &str, ok: bool, set: ValueSet) -> &mut Self {
        if !ok {
            self.fail(name, value, FieldRule::NotInSet(set));
        }
        self
    }

    pub fn constant(&mut self, name: &'static str, value: &str, expected: &'static str) -> &mut Self {
        if value != expected {
            self.fail(name, value, FieldRule::Constant { expected });
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ErrorList<FieldError>> {
        std::mem::take(&mut self.errors).into_result()
    }
}
