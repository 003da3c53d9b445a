//! Entry detail record (type 6) and its SEC-specific overlays.
//!
//! Several SEC codes reuse the IdentificationNumber, IndividualName and
//! DiscretionaryData columns for their own sub-fields. The overlay accessors
//! below read and write those sub-fields in place.

use crate::codes;
use crate::error::{ErrorList, FieldError, FieldRule, ValueSet};
use crate::field::{self, Line};
use crate::records::RecordKind;
use crate::validate::FieldChecker;
use std::fmt;

/// Entry Detail record (type 6): a single payment instruction.
///
/// Several SEC codes reuse the IdentificationNumber, IndividualName and
/// DiscretionaryData columns for their own sub-fields; the accessors below read
/// and write those overlays in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryDetail {
    /// Account type and direction, e.g. 22 checking credit, 27 checking debit.
    pub transaction_code: u8,

    /// First eight digits of the receiving DFI routing number.
    pub rdfi_identification: String,

    /// Ninth digit of the receiving DFI routing number.
    pub check_digit: String,

    pub dfi_account_number: String,

    /// Amount in cents.
    pub amount: u64,

    pub identification_number: String,

    pub individual_name: String,

    pub discretionary_data: String,

    /// 1 when addenda records follow.
    pub addenda_record_indicator: u8,

    /// ODFI routing prefix followed by a seven digit sequence number.
    pub trace_number: u64,
}

impl EntryDetail {
    pub const RECORD_TYPE: &'static str = "6";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    pub fn parse(line: &str) -> Result<Self, FieldError> {
        let line = Line::new(RecordKind::EntryDetail, line)?;
        line.expect("RecordType", 0, Self::RECORD_TYPE, ValueSet::RecordType)?;
        Ok(EntryDetail {
            transaction_code: line.numeric("TransactionCode", 1, 2)? as u8,
            rdfi_identification: line.alpha("RDFIIdentification", 3, 8)?,
            check_digit: line.alpha("CheckDigit", 11, 1)?,
            dfi_account_number: line.alpha("DFIAccountNumber", 12, 17)?,
            amount: line.numeric("Amount", 29, 10)?,
            identification_number: line.alpha("IdentificationNumber", 39, 15)?,
            individual_name: line.alpha("IndividualName", 54, 22)?,
            discretionary_data: line.alpha("DiscretionaryData", 76, 2)?,
            addenda_record_indicator: line.numeric("AddendaRecordIndicator", 78, 1)? as u8,
            trace_number: line.numeric("TraceNumber", 79, 15)?,
        })
    }

    pub fn validate(&self) -> Result<(), ErrorList<FieldError>> {
        let mut check = FieldChecker::new(RecordKind::EntryDetail);
        check
            .member(
                "TransactionCode",
                &self.transaction_code.to_string(),
                codes::is_transaction_code(self.transaction_code),
                ValueSet::TransactionCode,
            )
            .mandatory("RDFIIdentification", &self.rdfi_identification, 8)
            .digits("RDFIIdentification", &self.rdfi_identification, 8)
            .check_digit("CheckDigit", &self.rdfi_identification, &self.check_digit)
            .mandatory("DFIAccountNumber", &self.dfi_account_number, 17)
            .numeric("Amount", self.amount, 10)
            .alphanumeric("IdentificationNumber", &self.identification_number, 15)
            .alphanumeric("IndividualName", &self.individual_name, 22)
            .alphanumeric("DiscretionaryData", &self.discretionary_data, 2)
            .numeric("TraceNumber", self.trace_number, 15);
        if self.addenda_record_indicator > 1 {
            check.push(FieldError::new(
                RecordKind::EntryDetail,
                "AddendaRecordIndicator",
                self.addenda_record_indicator.to_string(),
                FieldRule::Constant { expected: "0 or 1" },
            ));
        }
        check.finish()
    }

    /// Any credit code: live, prenote, zero dollar or return/NOC.
    pub fn is_credit(&self) -> bool {
        codes::is_credit(self.transaction_code)
    }

    /// Any debit code: live, prenote, zero dollar or return/NOC.
    pub fn is_debit(&self) -> bool {
        codes::is_debit(self.transaction_code)
    }

    /// Splits a nine digit routing number into the RDFI identification and check digit.
    pub fn set_rdfi(&mut self, routing: &str) {
        let routing = routing.trim();
        let split = routing.len().min(8);
        if routing.is_char_boundary(split) {
            self.rdfi_identification = routing[..split].to_string();
            self.check_digit = routing[split..].to_string();
        }
    }

    /// Trace number from an eight digit ODFI routing prefix and a sequence number.
    pub fn set_trace_number(&mut self, odfi: &str, sequence: u64) {
        let prefix: u64 = odfi.trim().parse().unwrap_or(0);
        // An oversized prefix saturates and fails the trace number width check.
        self.trace_number = prefix
            .saturating_mul(10_000_000)
            .saturating_add(sequence % 10_000_000);
    }

    /// Last seven digits of the trace number.
    pub fn sequence_number(&self) -> u64 {
        self.trace_number % 10_000_000
    }

    /// The eight digit RDFI prefix as summed into the entry hash.
    pub fn rdfi_number(&self) -> u64 {
        self.rdfi_identification.trim().parse().unwrap_or(0)
    }

    /// Eight digit RDFI routing prefix, without the check digit.
    pub fn rdfi_identification_field(&self) -> String {
        field::zero_padded_text(&self.rdfi_identification, 8)
    }

    pub fn dfi_account_number_field(&self) -> String {
        field::alpha_field(&self.dfi_account_number, 17)
    }

    /// Amount in cents, ten digits.
    pub fn amount_field(&self) -> String {
        field::numeric_field(self.amount, 10)
    }

    pub fn identification_number_field(&self) -> String {
        field::alpha_field(&self.identification_number, 15)
    }

    pub fn individual_name_field(&self) -> String {
        field::alpha_field(&self.individual_name, 22)
    }

    pub fn discretionary_data_field(&self) -> String {
        field::alpha_field(&self.discretionary_data, 2)
    }

    /// Trace number, 15 digits.
    pub fn trace_number_field(&self) -> String {
        field::numeric_field(self.trace_number, 15)
    }

    // Receiver name overlays

    /// CCD, CIE and MTE use IndividualName for the receiving company or individual.
    pub fn receiving_company(&self) -> &str {
        &self.individual_name
    }

    /// Writes the whole IndividualName column.
    pub fn set_receiving_company(&mut self, name: &str) {
        self.individual_name = name.to_string();
    }

    /// MTE and ACK entries carry the original trace number in the IdentificationNumber.
    pub fn original_trace_number(&self) -> &str {
        &self.identification_number
    }

    pub fn set_original_trace_number(&mut self, trace: &str) {
        self.identification_number = trace.to_string();
    }

    // ARC, BOC, RCK, TRC, XCK

    /// ARC, BOC, RCK, TRC and XCK keep the check serial number in IdentificationNumber.
    pub fn check_serial_number(&self) -> &str {
        &self.identification_number
    }

    /// Sets the check serial number, left justified in IdentificationNumber.
    pub fn set_check_serial_number(&mut self, serial: &str) {
        self.identification_number = serial.to_string();
    }

    // POP

    /// POP check serial number, IdentificationNumber positions 1-9.
    pub fn pop_check_serial_number(&self) -> &str {
        field::subfield(&self.identification_number, 0, 9).trim_end()
    }

    /// Writes the POP check serial number sub-field.
    pub fn set_pop_check_serial_number(&mut self, serial: &str) {
        field::set_subfield(&mut self.identification_number, 15, 0, 9, serial);
    }

    /// POP terminal city, IdentificationNumber positions 10-13.
    pub fn pop_terminal_city(&self) -> &str {
        field::subfield(&self.identification_number, 9, 4).trim_end()
    }

    /// Writes the POP terminal city sub-field.
    pub fn set_pop_terminal_city(&mut self, city: &str) {
        field::set_subfield(&mut self.identification_number, 15, 9, 4, city);
    }

    /// POP terminal state, IdentificationNumber positions 14-15.
    pub fn pop_terminal_state(&self) -> &str {
        field::subfield(&self.identification_number, 13, 2).trim_end()
    }

    /// Writes the POP terminal state sub-field.
    pub fn set_pop_terminal_state(&mut self, state: &str) {
        field::set_subfield(&mut self.identification_number, 15, 13, 2, state);
    }

    // SHR

    /// Card expiration as `MMYY`.
    pub fn shr_card_expiration_date(&self) -> &str {
        field::subfield(&self.identification_number, 0, 4).trim_end()
    }

    /// Card expiration as `MMYY`, IdentificationNumber positions 1-4.
    pub fn set_shr_card_expiration_date(&mut self, mmyy: &str) {
        field::set_subfield(&mut self.identification_number, 15, 0, 4, mmyy);
    }

    pub fn shr_document_reference_number(&self) -> &str {
        field::subfield(&self.identification_number, 4, 11).trim_end()
    }

    pub fn set_shr_document_reference_number(&mut self, reference: &str) {
        field::set_subfield(&mut self.identification_number, 15, 4, 11, reference);
    }

    pub fn shr_individual_card_account_number(&self) -> &str {
        &self.individual_name
    }

    /// SHR card account number, the whole IndividualName column.
    pub fn set_shr_individual_card_account_number(&mut self, account: &str) {
        self.individual_name = account.to_string();
    }

    // CTX, ATX

    /// Number of Addenda05 records announced by the entry.
    pub fn catx_addenda_records(&self) -> Option<u64> {
        field::subfield(&self.individual_name, 0, 4).parse().ok()
    }

    /// CTX/ATX addenda count, IndividualName positions 1-4.
    pub fn set_catx_addenda_records(&mut self, count: u64) {
        field::set_subfield(
            &mut self.individual_name,
            22,
            0,
            4,
            &field::numeric_field(count, 4),
        );
    }

    /// CTX/ATX receiving company, IndividualName positions 5-20.
    pub fn catx_receiving_company(&self) -> &str {
        field::subfield(&self.individual_name, 4, 16).trim_end()
    }

    /// Writes the CTX/ATX receiving company sub-field.
    pub fn set_catx_receiving_company(&mut self, name: &str) {
        field::set_subfield(&mut self.individual_name, 22, 4, 16, name);
    }

    // TRC, XCK

    /// TRC and XCK process control field, IndividualName positions 1-6.
    pub fn process_control_field(&self) -> &str {
        field::subfield(&self.individual_name, 0, 6).trim_end()
    }

    pub fn set_process_control_field(&mut self, value: &str) {
        field::set_subfield(&mut self.individual_name, 22, 0, 6, value);
    }

    /// TRC and XCK item research number, IndividualName positions 7-22.
    pub fn item_research_number(&self) -> &str {
        field::subfield(&self.individual_name, 6, 16).trim_end()
    }

    pub fn set_item_research_number(&mut self, value: &str) {
        field::set_subfield(&mut self.individual_name, 22, 6, 16, value);
    }

    // Discretionary data overlays

    /// TEL and WEB: `R` recurring or `S` single entry.
    pub fn payment_type_code(&self) -> &str {
        self.discretionary_data.trim_end()
    }

    /// WEB and TEL payment type code (`R` or `S`) in DiscretionaryData.
    pub fn set_payment_type_code(&mut self, code: &str) {
        self.discretionary_data = code.to_string();
    }

    /// POS and SHR: card transaction type code.
    pub fn card_transaction_type(&self) -> &str {
        &self.discretionary_data
    }

    /// MTE, POS and SHR card transaction type code in DiscretionaryData.
    pub fn set_card_transaction_type(&mut self, code: &str) {
        self.discretionary_data = code.to_string();
    }
}

impl fmt::Display for EntryDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}{}{}",
            Self::RECORD_TYPE,
            field::numeric_field(u64::from(self.transaction_code), 2),
            self.rdfi_identification_field(),
            field::alpha_field(&self.check_digit, 1),
            self.dfi_account_number_field(),
            self.amount_field(),
            self.identification_number_field(),
            self.individual_name_field(),
            self.discretionary_data_field(),
            field::numeric_field(u64::from(self.addenda_record_indicator), 1),
            self.trace_number_field(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "627031300012744-5678-99      0000010000031300010000001JANE DOE                1231380100000001";

    fn mock_entry_detail() -> EntryDetail {
        let mut ed = EntryDetail::new();
        ed.transaction_code = codes::CHECKING_DEBIT;
        ed.set_rdfi("031300012");
        ed.dfi_account_number = "744-5678-99".to_string();
        ed.amount = 10000;
        ed.set_original_trace_number("031300010000001");
        ed.set_receiving_company("JANE DOE");
        ed.set_trace_number("23138010", 1);
        ed.addenda_record_indicator = 1;
        ed
    }

    #[test]
    fn test_parse_and_serialize() {
        let ed = EntryDetail::parse(LINE).unwrap();
        assert_eq!(ed, mock_entry_detail());
        assert_eq!(ed.to_string(), LINE);
        assert_eq!(ed.trace_number_field(), "231380100000001");
    }

    #[test]
    fn test_validate_mock() {
        assert!(mock_entry_detail().validate().is_ok());
    }

    #[test]
    fn test_long_odfi_trace_is_rejected() {
        let mut ed = mock_entry_detail();
        ed.set_trace_number("9999999999999", 1);
        assert_eq!(ed.trace_number, u64::MAX);
        let errs = ed.validate().unwrap_err();
        assert!(errs.has_field("TraceNumber"));
    }

    #[test]
    fn test_validate_check_digit() {
        let mut ed = mock_entry_detail();
        ed.check_digit = "9".to_string();
        let errs = ed.validate().unwrap_err();
        assert_eq!(errs[0].field_name, "CheckDigit");
        assert_eq!(errs[0].rule, FieldRule::CheckDigit { expected: 2 });
    }

    #[test]
    fn test_validate_transaction_code_and_amount() {
        let mut ed = mock_entry_detail();
        ed.transaction_code = 25;
        ed.amount = 99_999_999_999;
        let errs = ed.validate().unwrap_err();
        assert!(errs.has_field("TransactionCode"));
        assert!(errs.has_field("Amount"));
    }

    #[test]
    fn test_sequence_and_rdfi_number() {
        let ed = mock_entry_detail();
        assert_eq!(ed.sequence_number(), 1);
        assert_eq!(ed.rdfi_number(), 3_130_001);
    }

    #[test]
    fn test_pop_overlay() {
        let mut ed = mock_entry_detail();
        ed.identification_number.clear();
        ed.set_pop_check_serial_number("123456");
        ed.set_pop_terminal_city("PHIL");
        ed.set_pop_terminal_state("PA");
        assert_eq!(ed.identification_number, "123456   PHILPA");
        assert_eq!(ed.pop_check_serial_number(), "123456");
        assert_eq!(ed.pop_terminal_city(), "PHIL");
        assert_eq!(ed.pop_terminal_state(), "PA");
    }

    #[test]
    fn test_catx_overlay() {
        let mut ed = mock_entry_detail();
        ed.individual_name.clear();
        ed.set_catx_addenda_records(2);
        ed.set_catx_receiving_company("ACME CORP");
        assert_eq!(ed.catx_addenda_records(), Some(2));
        assert_eq!(ed.catx_receiving_company(), "ACME CORP");
        assert_eq!(ed.individual_name_field(), "0002ACME CORP         ");
    }

    #[test]
    fn test_trace_item_overlay() {
        let mut ed = mock_entry_detail();
        ed.individual_name.clear();
        ed.set_process_control_field("CHECK1");
        ed.set_item_research_number("1234567890");
        assert_eq!(ed.process_control_field(), "CHECK1");
        assert_eq!(ed.item_research_number(), "1234567890");
    }
}
