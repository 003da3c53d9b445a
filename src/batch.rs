//! Batches: a header, its entries and the control record that totals them.
//!
//! The SEC code is fixed when the batch is constructed and selects the rule
//! set applied by [`Batch::validate`]. [`Batch::create`] normalizes the
//! derived fields of every entry, recomputes the control record and validates.

use crate::codes;
use crate::entry::{Entry, EntryCategory};
use crate::error::{BatchError, BatchRule, ErrorList, FieldError, FieldRule, ValueSet};
use crate::field;
use crate::records::{Addenda, BatchControl, BatchHeader, RecordKind};
use crate::sec::{SecCode, SecRules};
use crate::validate;
use log::debug;

/// Entry hash and trace sequence numbers keep this many low-order digits.
const ENTRY_HASH_MODULUS: u64 = 10_000_000_000;
const TRACE_SEQUENCE_MODULUS: u64 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    sec: SecCode,
    header: BatchHeader,
    entries: Vec<Entry>,
    control: Option<BatchControl>,
}

impl Batch {
    /// Starts an empty batch; its SEC code comes from `header`.
    pub fn new(header: BatchHeader) -> Self {
        Batch {
            sec: header.standard_entry_class_code,
            header,
            entries: Vec::new(),
            control: None,
        }
    }

    pub fn sec(&self) -> SecCode {
        self.sec
    }

    pub fn rules(&self) -> SecRules {
        self.sec.rules()
    }

    pub fn header(&self) -> &BatchHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut BatchHeader {
        &mut self.header
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    /// Appends an entry and discards the control totals.
    pub fn add_entry(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
        self.control = None;
    }

    pub fn control(&self) -> Option<&BatchControl> {
        self.control.as_ref()
    }

    /// Installs a control record as decoded, without recomputing it.
    pub fn set_control(&mut self, control: BatchControl) {
        self.control = Some(control);
    }

    /// Category shared by the entries, taken from the first one.
    pub fn category(&self) -> Option<EntryCategory> {
        self.entries.first().map(Entry::category)
    }

    /// Lines the batch occupies: header, entries, addenda and control.
    pub fn line_count(&self) -> usize {
        2 + self.entries.iter().map(Entry::line_count).sum::<usize>()
    }

    /// Normalizes entries, recomputes the control and validates.
    ///
    /// Leaves the batch without a control record when validation fails.
    pub fn create(&mut self) -> Result<(), ErrorList<BatchError>> {
        self.normalize();
        let control = self.compute_control();
        debug!(
            "Batch {}: {} entries, debit {} credit {} hash {}",
            self.header.batch_number,
            self.entries.len(),
            control.total_debit_entry_dollar_amount,
            control.total_credit_entry_dollar_amount,
            control.entry_hash
        );
        self.control = Some(control);
        let result = self.validate();
        if result.is_err() {
            self.control = None;
        }
        result
    }

    fn normalize(&mut self) {
        let odfi = self.header.odfi_number();
        let mut previous: Option<u64> = None;
        for (position, entry) in self.entries.iter_mut().enumerate() {
            if let Some(odfi) = odfi {
                let trace_number = entry.detail.trace_number;
                let ascending = previous.map_or(true, |p| trace_number > p);
                if trace_number / TRACE_SEQUENCE_MODULUS != odfi || !ascending {
                    let next = previous.map_or(odfi * TRACE_SEQUENCE_MODULUS + position as u64 + 1, |p| p + 1);
                    debug!("Batch {}: trace {} renumbered to {}", self.header.batch_number, trace_number, next);
                    entry.detail.trace_number = next;
                }
                previous = Some(entry.detail.trace_number);
            }
            entry.detail.addenda_record_indicator = u8::from(!entry.addenda.is_empty());

            let trace_number = entry.detail.trace_number;
            let mut sequence = 0;
            for addenda in entry.addenda.iter_mut() {
                if let Addenda::PaymentInfo(a) = addenda {
                    sequence += 1;
                    a.sequence_number = sequence;
                }
                addenda.set_trace_number(trace_number);
            }
        }
    }

    /// Control totals for the entries as they are now.
    pub fn compute_control(&self) -> BatchControl {
        let mut control = BatchControl::new();
        control.service_class_code = self.header.service_class_code;
        control.company_identification = self.header.company_identification.clone();
        control.odfi_identification = self.header.odfi_identification.clone();
        control.batch_number = self.header.batch_number;

        // Oversized amounts saturate here and are reported by validation.
        for entry in &self.entries {
            control.entry_addenda_count = control
                .entry_addenda_count
                .saturating_add(entry.line_count() as u64);
            control.entry_hash = (control.entry_hash + entry.detail.rdfi_number() % ENTRY_HASH_MODULUS)
                % ENTRY_HASH_MODULUS;
            if entry.detail.is_debit() {
                control.total_debit_entry_dollar_amount = control
                    .total_debit_entry_dollar_amount
                    .saturating_add(entry.detail.amount);
            } else if entry.detail.is_credit() {
                control.total_credit_entry_dollar_amount = control
                    .total_credit_entry_dollar_amount
                    .saturating_add(entry.detail.amount);
            }
        }
        control
    }

    /// Checks every record, the SEC rules and the control totals.
    pub fn validate(&self) -> Result<(), ErrorList<BatchError>> {
        let mut report = Report::new(self.header.batch_number);

        self.validate_header(&mut report);
        let category = self.category();
        let mut previous_trace: Option<u64> = None;
        for entry in &self.entries {
            self.validate_entry(entry, category, &mut report);

            let trace_number = entry.detail.trace_number;
            if let Some(odfi) = self.header.odfi_number() {
                if trace_number / TRACE_SEQUENCE_MODULUS != odfi {
                    report.fail(
                        "TraceNumber",
                        BatchRule::TraceNumberOdfi {
                            odfi: self.header.odfi_identification.clone(),
                            trace_number,
                        },
                    );
                }
            }
            if let Some(previous) = previous_trace {
                if trace_number <= previous {
                    report.fail(
                        "TraceNumber",
                        BatchRule::TraceNumberAscending {
                            previous,
                            found: trace_number,
                        },
                    );
                }
            }
            previous_trace = Some(trace_number);
        }
        self.validate_control(&mut report);

        report.errors.into_result()
    }

    fn validate_header(&self, report: &mut Report) {
        report.fields(self.header.validate());

        let found = self.header.standard_entry_class_code;
        if found != self.sec {
            report.fail(
                "StandardEntryClassCode",
                BatchRule::SecType {
                    expected: self.sec,
                    found,
                },
            );
        }
        if let Some(expected) = self.rules().company_entry_description {
            if self.header.company_entry_description != expected {
                report.fail(
                    "CompanyEntryDescription",
                    BatchRule::Expected {
                        expected: expected.to_string(),
                        found: self.header.company_entry_description.clone(),
                    },
                );
            }
        }
        if self.entries.is_empty() {
            report.fail("Entries", BatchRule::Mandatory);
        }
    }

    fn validate_entry(&self, entry: &Entry, batch_category: Option<EntryCategory>, report: &mut Report) {
        let detail = &entry.detail;
        report.fields(detail.validate());
        for addenda in &entry.addenda {
            report.fields(addenda.validate());
        }

        let code = detail.transaction_code;
        if codes::is_transaction_code(code)
            && !codes::service_class_allows(self.header.service_class_code, code)
        {
            report.fail(
                "TransactionCode",
                BatchRule::ServiceClassTranCode {
                    service_class: self.header.service_class_code,
                    transaction_code: code,
                },
            );
        }

        let category = entry.category();
        if let Some(expected) = batch_category {
            if category != expected {
                report.fail(
                    "Category",
                    BatchRule::Category {
                        expected,
                        found: category,
                    },
                );
            }
        }

        let has_addenda = !entry.addenda.is_empty();
        if detail.addenda_record_indicator != u8::from(has_addenda) {
            report.fail(
                "AddendaRecordIndicator",
                BatchRule::AddendaIndicator {
                    indicator: detail.addenda_record_indicator,
                    addenda: entry.addenda.len(),
                },
            );
        }
        self.validate_addenda_links(entry, report);

        match category {
            EntryCategory::Return => {
                if !self.rules().returns_allowed {
                    report.fail(
                        "TypeCode",
                        BatchRule::AddendaCategory {
                            sec: self.sec,
                            type_code: "99",
                        },
                    );
                }
                if entry.addenda.len() != 1 {
                    report.fail(
                        "Addenda",
                        BatchRule::AddendaCount {
                            found: entry.addenda.len(),
                            expected: 1,
                        },
                    );
                }
            }
            EntryCategory::NotificationOfChange => {
                if self.sec != SecCode::Cor {
                    report.fail(
                        "TypeCode",
                        BatchRule::AddendaCategory {
                            sec: self.sec,
                            type_code: "98",
                        },
                    );
                }
                if entry.addenda.len() != 1 {
                    report.fail(
                        "Addenda",
                        BatchRule::AddendaCount {
                            found: entry.addenda.len(),
                            expected: 1,
                        },
                    );
                }
                if detail.amount != 0 {
                    report.fail(
                        "Amount",
                        BatchRule::AmountNonZero {
                            transaction_code: code,
                        },
                    );
                }
            }
            EntryCategory::Forward => self.validate_forward(entry, report),
        }
    }

    /// Trace numbers and sequence numbers tying addenda to their entry.
    fn validate_addenda_links(&self, entry: &Entry, report: &mut Report) {
        let trace_number = entry.detail.trace_number;
        for addenda in &entry.addenda {
            if let Some(found) = addenda.trace_number() {
                if found != trace_number {
                    report.fail(
                        "TraceNumber",
                        BatchRule::AddendaTraceNumber {
                            expected: trace_number,
                            found,
                        },
                    );
                }
            }
        }
        for (expected, addenda) in (1u64..).zip(entry.addenda05()) {
            if addenda.sequence_number != expected {
                report.fail(
                    "SequenceNumber",
                    BatchRule::AddendaSequence {
                        expected,
                        found: addenda.sequence_number,
                    },
                );
            }
            if addenda.entry_detail_sequence_number != entry.detail.sequence_number() {
                report.fail(
                    "EntryDetailSequenceNumber",
                    BatchRule::AddendaSequence {
                        expected: entry.detail.sequence_number(),
                        found: addenda.entry_detail_sequence_number,
                    },
                );
            }
        }
    }

    fn validate_forward(&self, entry: &Entry, report: &mut Report) {
        let rules = self.rules();
        let detail = &entry.detail;
        let code = detail.transaction_code;

        if self.sec == SecCode::Cor {
            report.fail(
                "Addenda98",
                BatchRule::AddendaCount {
                    found: 0,
                    expected: 1,
                },
            );
        }

        let addenda02 = entry.count_of("02");
        if rules.addenda02_required {
            if addenda02 != 1 {
                report.fail(
                    "Addenda02",
                    BatchRule::AddendaCount {
                        found: addenda02,
                        expected: 1,
                    },
                );
            }
        } else if addenda02 > 0 {
            report.fail(
                "TypeCode",
                BatchRule::AddendaCategory {
                    sec: self.sec,
                    type_code: "02",
                },
            );
        }

        let addenda05 = entry.count_of("05");
        if rules.max_addenda05 == 0 && addenda05 > 0 {
            report.fail(
                "TypeCode",
                BatchRule::AddendaCategory {
                    sec: self.sec,
                    type_code: "05",
                },
            );
        } else if addenda05 > rules.max_addenda05 {
            report.fail(
                "Addenda05",
                BatchRule::AddendaCount {
                    found: addenda05,
                    expected: rules.max_addenda05,
                },
            );
        }

        if codes::is_transaction_code(code) && !rules.direction.allows(code) {
            report.fail(
                "TransactionCode",
                BatchRule::TransactionCode {
                    sec: self.sec,
                    transaction_code: code,
                },
            );
        }

        if self.sec == SecCode::Cor || codes::is_prenote(code) || codes::is_zero_dollar(code) {
            if detail.amount != 0 {
                report.fail(
                    "Amount",
                    BatchRule::AmountNonZero {
                        transaction_code: code,
                    },
                );
            }
        } else if codes::is_live(code) && detail.amount == 0 {
            report.fail("Amount", BatchRule::AmountZero);
        }
        if let Some(limit) = rules.amount_limit {
            if detail.amount > limit {
                report.fail(
                    "Amount",
                    BatchRule::AmountLimit {
                        amount: detail.amount,
                        limit,
                    },
                );
            }
        }

        if rules.name_required && validate::is_blank_or_zero(&detail.individual_name) {
            report.fail("IndividualName", BatchRule::Mandatory);
        }
        self.validate_overlays(entry, report);
    }

    /// Fields the SEC code stores inside the shared entry detail columns.
    fn validate_overlays(&self, entry: &Entry, report: &mut Report) {
        let detail = &entry.detail;
        match self.sec {
            SecCode::Ack | SecCode::Mte => {
                if validate::is_blank_or_zero(&detail.identification_number) {
                    report.fail("IdentificationNumber", BatchRule::Mandatory);
                }
            }
            SecCode::Atx | SecCode::Ctx => {
                if self.sec == SecCode::Atx && validate::is_blank_or_zero(&detail.identification_number) {
                    report.fail("IdentificationNumber", BatchRule::Mandatory);
                }
                let addenda05 = entry.count_of("05") as u64;
                if detail.catx_addenda_records() != Some(addenda05) {
                    report.fail(
                        "CATXAddendaRecords",
                        BatchRule::Expected {
                            expected: field::numeric_field(addenda05, 4),
                            found: field::subfield(&detail.individual_name, 0, 4).to_string(),
                        },
                    );
                }
                if validate::is_blank_or_zero(detail.catx_receiving_company()) {
                    report.fail("CATXReceivingCompany", BatchRule::Mandatory);
                }
            }
            SecCode::Arc | SecCode::Boc | SecCode::Rck => {
                if detail.check_serial_number().trim().is_empty() {
                    report.fail("CheckSerialNumber", BatchRule::Mandatory);
                }
            }
            SecCode::Trc | SecCode::Xck => {
                if detail.check_serial_number().trim().is_empty() {
                    report.fail("CheckSerialNumber", BatchRule::Mandatory);
                }
                if detail.process_control_field().trim().is_empty() {
                    report.fail("ProcessControlField", BatchRule::Mandatory);
                }
                if detail.item_research_number().trim().is_empty() {
                    report.fail("ItemResearchNumber", BatchRule::Mandatory);
                }
            }
            SecCode::Pop => {
                if detail.pop_check_serial_number().trim().is_empty() {
                    report.fail("CheckSerialNumber", BatchRule::Mandatory);
                }
                if detail.pop_terminal_city().trim().is_empty() {
                    report.fail("TerminalCity", BatchRule::Mandatory);
                }
                let state = detail.pop_terminal_state();
                if state.trim().is_empty() {
                    report.fail("TerminalState", BatchRule::Mandatory);
                } else if !codes::is_state_code(state) {
                    report.entry_field("TerminalState", state, ValueSet::StateCode);
                }
            }
            SecCode::Pos => {
                let card = detail.card_transaction_type();
                if !codes::is_card_transaction_type(card) {
                    report.entry_field("CardTransactionType", card, ValueSet::CardTransactionType);
                }
            }
            SecCode::Shr => {
                let card = detail.card_transaction_type();
                if !codes::is_card_transaction_type(card) {
                    report.entry_field("CardTransactionType", card, ValueSet::CardTransactionType);
                }
                if !is_month_year(detail.shr_card_expiration_date()) {
                    report.fail("CardExpirationDate", BatchRule::Mandatory);
                }
                if detail.shr_document_reference_number().trim().is_empty() {
                    report.fail("DocumentReferenceNumber", BatchRule::Mandatory);
                }
                if detail.shr_individual_card_account_number().trim().is_empty() {
                    report.fail("IndividualCardAccountNumber", BatchRule::Mandatory);
                }
            }
            SecCode::Tel => {
                let payment = detail.payment_type_code();
                if !payment.is_empty() && !codes::is_payment_type_code(payment) {
                    report.entry_field("PaymentTypeCode", payment, ValueSet::PaymentTypeCode);
                }
            }
            SecCode::Web => {
                let payment = detail.payment_type_code();
                if !codes::is_payment_type_code(payment) {
                    report.entry_field("PaymentTypeCode", payment, ValueSet::PaymentTypeCode);
                }
            }
            SecCode::Ccd | SecCode::Cie | SecCode::Cor | SecCode::Ppd => {}
        }
    }

    fn validate_control(&self, report: &mut Report) {
        let Some(control) = &self.control else {
            report.fail("BatchControl", BatchRule::ControlMissing);
            return;
        };
        report.fields(control.validate());

        let expected = self.compute_control();
        let totals = [
            ("EntryAddendaCount", expected.entry_addenda_count, control.entry_addenda_count),
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
                report.fail(name, BatchRule::ControlMismatch { expected, found });
            }
        }

        let echoed = [
            (
                "ServiceClassCode",
                expected.service_class_code.to_string(),
                control.service_class_code.to_string(),
            ),
            (
                "CompanyIdentification",
                expected.company_identification,
                control.company_identification.clone(),
            ),
            (
                "ODFIIdentification",
                expected.odfi_identification,
                control.odfi_identification.clone(),
            ),
            (
                "BatchNumber",
                expected.batch_number.to_string(),
                control.batch_number.to_string(),
            ),
        ];
        for (name, expected, found) in echoed {
            if expected.trim_end() != found.trim_end() {
                report.fail(name, BatchRule::Expected { expected, found });
            }
        }
    }

    /// Serialized lines of the batch, control last.
    pub fn lines(&self) -> Result<Vec<String>, BatchError> {
        let control = self.control.as_ref().ok_or_else(|| {
            BatchError::new(self.header.batch_number, "BatchControl", BatchRule::ControlMissing)
        })?;
        let mut lines = Vec::with_capacity(self.line_count());
        lines.push(self.header.to_string());
        for entry in &self.entries {
            lines.extend(entry.lines());
        }
        lines.push(control.to_string());
        Ok(lines)
    }
}

/// `MMYY` with a month between 01 and 12.
fn is_month_year(s: &str) -> bool {
    s.len() == 4
        && s.bytes().all(|b| b.is_ascii_digit())
        && matches!(s[..2].parse::<u8>(), Ok(1..=12))
}

/// Accumulates the errors of one batch.
struct Report {
    batch_number: u32,
    errors: ErrorList<BatchError>,
}

impl Report {
    fn new(batch_number: u32) -> Self {
        Report {
            batch_number,
            errors: ErrorList::new(),
        }
    }

    fn fail(&mut self, field_name: &'static str, rule: BatchRule) {
        self.errors
            .push(BatchError::new(self.batch_number, field_name, rule));
    }

    fn fields(&mut self, result: Result<(), ErrorList<FieldError>>) {
        if let Err(errs) = result {
            let batch_number = self.batch_number;
            self.errors
                .extend(errs.into_iter().map(|e| BatchError::field(batch_number, e)));
        }
    }

    /// An entry detail overlay holding a value outside its code list.
    fn entry_field(&mut self, field_name: &'static str, value: &str, set: ValueSet) {
        let err = FieldError::new(RecordKind::EntryDetail, field_name, value, FieldRule::NotInSet(set));
        self.errors.push(BatchError::field(self.batch_number, err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Addenda05, Addenda99, EntryDetail};

    fn ppd_header() -> BatchHeader {
        let mut bh = BatchHeader::new();
        bh.company_name = "Name on Account".to_string();
        bh.company_identification = "121042882".to_string();
        bh.standard_entry_class_code = SecCode::Ppd;
        bh.company_entry_description = "PAYROLL".to_string();
        bh.odfi_identification = "12104288".to_string();
        bh
    }

    fn ppd_entry(amount: u64) -> Entry {
        let mut ed = EntryDetail::new();
        ed.transaction_code = codes::CHECKING_CREDIT;
        ed.set_rdfi("231380104");
        ed.dfi_account_number = "123456789".to_string();
        ed.amount = amount;
        ed.individual_name = "Wade Arnold".to_string();
        Entry::new(ed)
    }

    fn ppd_batch() -> Batch {
        let mut batch = Batch::new(ppd_header());
        batch.add_entry(ppd_entry(100_000_000));
        batch
    }

    #[test]
    fn test_create_computes_control() {
        let mut batch = ppd_batch();
        batch.create().unwrap();
        let control = batch.control().unwrap();
        assert_eq!(control.entry_addenda_count, 1);
        assert_eq!(control.entry_hash, 23138010);
        assert_eq!(control.total_credit_entry_dollar_amount, 100_000_000);
        assert_eq!(control.total_debit_entry_dollar_amount, 0);
        assert_eq!(control.odfi_identification, "12104288");
        assert_eq!(batch.entries()[0].detail.trace_number, 121042880000001);
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut batch = ppd_batch();
        batch.add_entry(ppd_entry(2500));
        batch.create().unwrap();
        let first = batch.clone();
        batch.create().unwrap();
        assert_eq!(batch, first);
    }

    #[test]
    fn test_add_entry_clears_control() {
        let mut batch = ppd_batch();
        batch.create().unwrap();
        batch.add_entry(ppd_entry(100));
        assert!(batch.control().is_none());
        let errs = batch.validate().unwrap_err();
        assert!(errs.has_rule(&BatchRule::ControlMissing));
    }

    #[test]
    fn test_create_numbers_addenda05() {
        let mut batch = ppd_batch();
        batch.entries_mut()[0].add_addenda(Addenda05::with_information("Invoice 42"));
        batch.create().unwrap();
        let entry = &batch.entries()[0];
        assert_eq!(entry.detail.addenda_record_indicator, 1);
        let addenda = entry.addenda05().next().unwrap();
        assert_eq!(addenda.sequence_number, 1);
        assert_eq!(addenda.entry_detail_sequence_number, 1);
        assert_eq!(batch.control().unwrap().entry_addenda_count, 2);
    }

    #[test]
    fn test_ppd_allows_one_addenda05() {
        let mut batch = ppd_batch();
        batch.entries_mut()[0].add_addenda(Addenda05::with_information("one"));
        batch.entries_mut()[0].add_addenda(Addenda05::with_information("two"));
        let errs = batch.create().unwrap_err();
        assert!(errs.has_rule(&BatchRule::AddendaCount {
            found: 2,
            expected: 1
        }));
        assert!(batch.control().is_none());
    }

    #[test]
    fn test_amount_zero() {
        let mut batch = Batch::new(ppd_header());
        batch.add_entry(ppd_entry(0));
        let errs = batch.create().unwrap_err();
        assert!(errs.has_rule(&BatchRule::AmountZero));
        assert!(errs.has_field("Amount"));
    }

    #[test]
    fn test_prenote_must_be_zero() {
        let mut batch = Batch::new(ppd_header());
        let mut entry = ppd_entry(100);
        entry.detail.transaction_code = codes::CHECKING_PRENOTE_CREDIT;
        batch.add_entry(entry);
        let errs = batch.create().unwrap_err();
        assert!(errs.has_rule(&BatchRule::AmountNonZero {
            transaction_code: codes::CHECKING_PRENOTE_CREDIT
        }));

        batch.entries_mut()[0].detail.amount = 0;
        assert!(batch.create().is_ok());
    }

    #[test]
    fn test_control_mismatch() {
        let mut batch = ppd_batch();
        batch.create().unwrap();
        batch.entries_mut()[0].detail.amount = 1;
        let errs = batch.validate().unwrap_err();
        assert!(errs.has_rule(&BatchRule::ControlMismatch {
            expected: 1,
            found: 100_000_000
        }));
        assert!(errs.has_field("TotalCreditEntryDollarAmount"));
    }

    #[test]
    fn test_trace_numbers_ascending() {
        let mut batch = ppd_batch();
        batch.add_entry(ppd_entry(200));
        batch.create().unwrap();
        batch.entries_mut()[1].detail.trace_number = 121042880000001;
        let control = batch.compute_control();
        batch.set_control(control);
        let errs = batch.validate().unwrap_err();
        assert!(errs.has_rule(&BatchRule::TraceNumberAscending {
            previous: 121042880000001,
            found: 121042880000001
        }));
    }

    #[test]
    fn test_trace_number_odfi() {
        let mut batch = ppd_batch();
        batch.create().unwrap();
        batch.entries_mut()[0].detail.trace_number = 231380100000001;
        let errs = batch.validate().unwrap_err();
        assert!(errs.has_rule(&BatchRule::TraceNumberOdfi {
            odfi: "12104288".to_string(),
            trace_number: 231380100000001
        }));
    }

    #[test]
    fn test_create_renumbers_traces_out_of_order() {
        let mut batch = ppd_batch();
        let mut second = ppd_entry(2500);
        second.detail.set_trace_number("12104288", 1);
        batch.add_entry(second);
        batch.create().unwrap();
        assert_eq!(batch.entries()[0].detail.trace_number, 121042880000001);
        assert_eq!(batch.entries()[1].detail.trace_number, 121042880000002);
    }

    #[test]
    fn test_create_keeps_ascending_traces() {
        let mut batch = Batch::new(ppd_header());
        for sequence in [5, 9] {
            let mut entry = ppd_entry(100);
            entry.detail.set_trace_number("12104288", sequence);
            batch.add_entry(entry);
        }
        batch.create().unwrap();
        assert_eq!(batch.entries()[0].detail.trace_number, 121042880000005);
        assert_eq!(batch.entries()[1].detail.trace_number, 121042880000009);
    }

    #[test]
    fn test_oversized_amounts_do_not_overflow() {
        let mut batch = Batch::new(ppd_header());
        batch.add_entry(ppd_entry(u64::MAX));
        batch.add_entry(ppd_entry(u64::MAX));
        assert_eq!(batch.compute_control().total_credit_entry_dollar_amount, u64::MAX);
        let errs = batch.create().unwrap_err();
        assert!(errs.has_field("Amount"));
        assert!(batch.control().is_none());
    }

    #[test]
    fn test_return_entry() {
        let mut batch = Batch::new(ppd_header());
        let mut addenda = Addenda99::new();
        addenda.return_code = "R01".to_string();
        addenda.original_trace = 231380100000001;
        addenda.original_dfi = 23138010;
        batch.add_entry(ppd_entry(100).with_addenda(addenda));
        batch.create().unwrap();
        assert_eq!(batch.category(), Some(EntryCategory::Return));
        let entry = &batch.entries()[0];
        assert_eq!(entry.addenda99().unwrap().trace_number, entry.detail.trace_number);
    }

    #[test]
    fn test_mixed_categories() {
        let mut batch = ppd_batch();
        let mut addenda = Addenda99::new();
        addenda.return_code = "R01".to_string();
        batch.add_entry(ppd_entry(100).with_addenda(addenda));
        let errs = batch.create().unwrap_err();
        assert!(errs.has_rule(&BatchRule::Category {
            expected: EntryCategory::Forward,
            found: EntryCategory::Return
        }));
    }

    #[test]
    fn test_empty_batch() {
        let mut batch = Batch::new(ppd_header());
        let errs = batch.create().unwrap_err();
        assert!(errs.has_field("Entries"));
    }

    #[test]
    fn test_lines_need_control() {
        let mut batch = ppd_batch();
        let err = batch.lines().unwrap_err();
        assert_eq!(err.rule, BatchRule::ControlMissing);
        batch.create().unwrap();
        let lines = batch.lines().unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.len() == 94));
    }

    #[test]
    fn test_month_year() {
        assert!(is_month_year("0922"));
        assert!(!is_month_year("1322"));
        assert!(!is_month_year("09"));
    }
}
