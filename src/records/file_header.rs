//! File header record (type 1).

use crate::error::{ErrorList, FieldError, ValueSet};
use crate::field::{self, Line};
use crate::options::ValidateOptions;
use crate::records::RecordKind;
use crate::validate::{self, FieldChecker};
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// File Header record (type 1): routing of the whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Always `01`.
    pub priority_code: String,

    /// Nine digit routing number of the receiving point.
    pub immediate_destination: String,

    /// Routing number or company identifier of the sender.
    pub immediate_origin: String,

    pub file_creation_date: Option<NaiveDate>,

    pub file_creation_time: Option<NaiveTime>,

    /// Distinguishes files created on the same date (`A`-`Z`, `0`-`9`).
    pub file_id_modifier: String,

    /// Always `094`.
    pub record_size: String,

    /// Always `10`.
    pub blocking_factor: String,

    /// Always `1`.
    pub format_code: String,

    pub immediate_destination_name: String,

    pub immediate_origin_name: String,

    pub reference_code: String,
}

impl FileHeader {
    pub const RECORD_TYPE: &'static str = "1";

    pub fn new() -> Self {
        FileHeader {
            priority_code: "01".to_string(),
            immediate_destination: String::new(),
            immediate_origin: String::new(),
            file_creation_date: None,
            file_creation_time: None,
            file_id_modifier: "A".to_string(),
            record_size: "094".to_string(),
            blocking_factor: "10".to_string(),
            format_code: "1".to_string(),
            immediate_destination_name: String::new(),
            immediate_origin_name: String::new(),
            reference_code: String::new(),
        }
    }

    pub fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    pub fn parse(line: &str) -> Result<Self, FieldError> {
        let line = Line::new(RecordKind::FileHeader, line)?;
        line.expect("RecordType", 0, Self::RECORD_TYPE, ValueSet::RecordType)?;
        Ok(FileHeader {
            priority_code: line.alpha("PriorityCode", 1, 2)?,
            immediate_destination: line.trimmed("ImmediateDestination", 3, 10)?,
            immediate_origin: line.trimmed("ImmediateOrigin", 13, 10)?,
            file_creation_date: line.date("FileCreationDate", 23)?,
            file_creation_time: line.time("FileCreationTime", 29)?,
            file_id_modifier: line.alpha("FileIDModifier", 33, 1)?,
            record_size: line.alpha("RecordSize", 34, 3)?,
            blocking_factor: line.alpha("BlockingFactor", 37, 2)?,
            format_code: line.alpha("FormatCode", 39, 1)?,
            immediate_destination_name: line.alpha("ImmediateDestinationName", 40, 23)?,
            immediate_origin_name: line.alpha("ImmediateOriginName", 63, 23)?,
            reference_code: line.alpha("ReferenceCode", 86, 8)?,
        })
    }

    /// Validates with default options.
    pub fn validate(&self) -> Result<(), ErrorList<FieldError>> {
        self.validate_with(&ValidateOptions::default())
    }

    /// Field checks, with origin and destination rules relaxed by `opts`.
    pub fn validate_with(&self, opts: &ValidateOptions) -> Result<(), ErrorList<FieldError>> {
        let mut check = FieldChecker::new(RecordKind::FileHeader);
        check
            .digits("PriorityCode", &self.priority_code, 2)
            .constant("RecordSize", &self.record_size, "094")
            .constant("BlockingFactor", &self.blocking_factor, "10")
            .constant("FormatCode", &self.format_code, "1")
            .member(
                "FileIDModifier",
                &self.file_id_modifier,
                self.file_id_modifier.len() == 1
                    && validate::is_upper_alphanumeric(&self.file_id_modifier)
                    && self.file_id_modifier != " ",
                ValueSet::FileIdModifier,
            )
            .alphanumeric("ImmediateDestinationName", &self.immediate_destination_name, 23)
            .alphanumeric("ImmediateOriginName", &self.immediate_origin_name, 23)
            .alphanumeric("ReferenceCode", &self.reference_code, 8);

        if self.file_creation_date.is_none() {
            check.push(FieldError::new(
                RecordKind::FileHeader,
                "FileCreationDate",
                "",
                crate::error::FieldRule::Mandatory,
            ));
        }
        if !opts.bypass_destination_validation {
            check.routing("ImmediateDestination", &self.immediate_destination);
        }
        if !opts.bypass_origin_validation {
            if opts.require_aba_origin {
                check.routing("ImmediateOrigin", &self.immediate_origin);
            } else {
                check.mandatory("ImmediateOrigin", &self.immediate_origin, 10);
            }
        }
        check.finish()
    }

    /// Destination as written: a leading blank and the nine digit routing number.
    pub fn immediate_destination_field(&self) -> String {
        field::right_alpha_field(&self.immediate_destination, 10)
    }

    /// Origin right justified in ten characters.
    pub fn immediate_origin_field(&self) -> String {
        field::right_alpha_field(&self.immediate_origin, 10)
    }

    pub fn file_creation_date_field(&self) -> String {
        field::date_field(self.file_creation_date)
    }

    /// Creation time as `HHMM`, blank when unset.
    pub fn file_creation_time_field(&self) -> String {
        field::time_field(self.file_creation_time)
    }

    pub fn immediate_destination_name_field(&self) -> String {
        field::alpha_field(&self.immediate_destination_name, 23)
    }

    pub fn immediate_origin_name_field(&self) -> String {
        field::alpha_field(&self.immediate_origin_name, 23)
    }

    pub fn reference_code_field(&self) -> String {
        field::alpha_field(&self.reference_code, 8)
    }
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}{}{}{}{}",
            Self::RECORD_TYPE,
            field::zero_padded_text(&self.priority_code, 2),
            self.immediate_destination_field(),
            self.immediate_origin_field(),
            self.file_creation_date_field(),
            self.file_creation_time_field(),
            field::alpha_field(&self.file_id_modifier, 1),
            field::alpha_field(&self.record_size, 3),
            field::alpha_field(&self.blocking_factor, 2),
            field::alpha_field(&self.format_code, 1),
            self.immediate_destination_name_field(),
            self.immediate_origin_name_field(),
            self.reference_code_field(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldRule;

    const LINE: &str = "101 231380104 1210428821804231500A094101Citadel                Wells Fargo            00000001";

    fn mock_file_header() -> FileHeader {
        let mut fh = FileHeader::new();
        fh.immediate_destination = "231380104".to_string();
        fh.immediate_origin = "121042882".to_string();
        fh.file_creation_date = NaiveDate::from_ymd_opt(2018, 4, 23);
        fh.file_creation_time = NaiveTime::from_hms_opt(15, 0, 0);
        fh.immediate_destination_name = "Citadel".to_string();
        fh.immediate_origin_name = "Wells Fargo".to_string();
        fh.reference_code = "00000001".to_string();
        fh
    }

    #[test]
    fn test_parse_and_serialize() {
        let fh = FileHeader::parse(LINE).unwrap();
        assert_eq!(fh, mock_file_header());
        assert_eq!(fh.to_string(), LINE);
        assert_eq!(fh.to_string().len(), 94);
    }

    #[test]
    fn test_destination_field_is_right_justified() {
        assert_eq!(mock_file_header().immediate_destination_field(), " 231380104");
    }

    #[test]
    fn test_validate_mock() {
        assert!(mock_file_header().validate().is_ok());
    }

    #[test]
    fn test_validate_destination_check_digit() {
        let mut fh = mock_file_header();
        fh.immediate_destination = "231380105".to_string();
        let errs = fh.validate().unwrap_err();
        assert_eq!(errs[0].field_name, "ImmediateDestination");
        assert_eq!(errs[0].rule, FieldRule::CheckDigit { expected: 4 });

        let opts = ValidateOptions {
            bypass_destination_validation: true,
            ..Default::default()
        };
        assert!(fh.validate_with(&opts).is_ok());
    }

    #[test]
    fn test_validate_origin_options() {
        let mut fh = mock_file_header();
        fh.immediate_origin = "1234567890".to_string();
        assert!(fh.validate().is_ok());

        let strict = ValidateOptions {
            require_aba_origin: true,
            ..Default::default()
        };
        assert!(fh.validate_with(&strict).unwrap_err().has_field("ImmediateOrigin"));

        fh.immediate_origin.clear();
        assert!(fh.validate().unwrap_err().has_field("ImmediateOrigin"));
        let bypass = ValidateOptions {
            bypass_origin_validation: true,
            ..Default::default()
        };
        assert!(fh.validate_with(&bypass).is_ok());
    }

    #[test]
    fn test_validate_constants() {
        let mut fh = mock_file_header();
        fh.record_size = "095".to_string();
        fh.file_id_modifier = "a".to_string();
        let errs = fh.validate().unwrap_err();
        assert!(errs.has_field("RecordSize"));
        assert!(errs.has_field("FileIDModifier"));
    }

    #[test]
    fn test_parse_rejects_wrong_record_type() {
        let line = format!("5{}", &LINE[1..]);
        let err = FileHeader::parse(&line).unwrap_err();
        assert_eq!(err.field_name, "RecordType");
    }
}
