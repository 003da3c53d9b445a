//! Edge case tests for building, validating and decoding ACH files.
//!
//! Everything here goes through the public API only.

use ach_engine::{
    reader, Addenda02, Addenda05, Addenda98, Addenda99, Batch, BatchError, BatchHeader, BatchRule,
    Entry, EntryCategory, EntryDetail, File, FileHeader, FileRule, ParseErrorKind, SecCode,
};
use chrono::{NaiveDate, NaiveTime};

const ODFI: &str = "12104288";

fn batch_header(sec: SecCode, service_class_code: u16) -> BatchHeader {
    let mut bh = BatchHeader::new();
    bh.service_class_code = service_class_code;
    bh.company_name = "Acme Corp".to_string();
    bh.company_identification = "121042882".to_string();
    bh.standard_entry_class_code = sec;
    bh.company_entry_description = "PAYROLL".to_string();
    bh.effective_entry_date = NaiveDate::from_ymd_opt(2019, 8, 16);
    bh.odfi_identification = ODFI.to_string();
    bh
}

fn entry(transaction_code: u8, amount: u64, sequence: u64) -> EntryDetail {
    let mut ed = EntryDetail::new();
    ed.transaction_code = transaction_code;
    ed.set_rdfi("231380104");
    ed.dfi_account_number = "123456789".to_string();
    ed.amount = amount;
    ed.individual_name = "Jane Doe".to_string();
    ed.set_trace_number(ODFI, sequence);
    ed
}

fn file_header() -> FileHeader {
    let mut fh = FileHeader::new();
    fh.immediate_destination = "231380104".to_string();
    fh.immediate_origin = "121042882".to_string();
    fh.file_creation_date = NaiveDate::from_ymd_opt(2019, 8, 16);
    fh.file_creation_time = NaiveTime::from_hms_opt(10, 55, 0);
    fh.immediate_destination_name = "Federal Reserve Bank".to_string();
    fh.immediate_origin_name = "My Bank Name".to_string();
    fh
}

fn terminal_addenda() -> Addenda02 {
    let mut a = Addenda02::new();
    a.terminal_identification_code = "200509".to_string();
    a.transaction_serial_number = "123456".to_string();
    a.transaction_date = "1224".to_string();
    a.terminal_location = "Main St and 1st Ave".to_string();
    a.terminal_city = "ANYTOWN".to_string();
    a.terminal_state = "VA".to_string();
    a
}

fn batch_of(sec: SecCode, service_class_code: u16, entries: Vec<Entry>) -> Batch {
    let mut batch = Batch::new(batch_header(sec, service_class_code));
    for e in entries {
        batch.add_entry(e);
    }
    batch
}

fn has(errs: &[BatchError], field_name: &str, rule: &BatchRule) -> bool {
    errs.iter().any(|e| e.field_name == field_name && &e.rule == rule)
}

// ==================== FILE BUILDING ====================

#[test]
fn test_build_encode_decode() {
    let mut file = File::new(file_header());
    file.add_batch(batch_of(
        SecCode::Ppd,
        200,
        vec![
            Entry::new(entry(22, 250000, 1)).with_addenda(Addenda05::with_information("PAYROLL JULY")),
            Entry::new(entry(27, 1234, 2)),
        ],
    ));
    file.create().unwrap();
    let text = file.encode().unwrap();

    let decoded = reader::decode_str(&text).unwrap();
    decoded.validate().unwrap();
    assert_eq!(decoded.encode().unwrap(), text);

    let entries = decoded.batches()[0].entries();
    assert_eq!(entries[0].detail.addenda_record_indicator, 1);
    assert_eq!(entries[0].addenda05().next().unwrap().entry_detail_sequence_number, 1);
    assert_eq!(entries[1].detail.addenda_record_indicator, 0);
}

#[test]
fn test_entry_hash_keeps_ten_digits() {
    let mut batch = Batch::new(batch_header(SecCode::Ppd, 200));
    for seq in 1..=200 {
        let mut ed = entry(22, 100, seq);
        ed.set_rdfi("999999992");
        batch.add_entry(ed);
    }
    let mut file = File::new(file_header());
    file.add_batch(batch);
    file.create().unwrap();

    let control = file.control().unwrap();
    assert_eq!(control.entry_hash, 9_999_999_800);
    assert_eq!(control.entry_addenda_count, 200);
    // header, batch header, 200 entries, batch control, file control
    assert_eq!(control.block_count, 21);
    assert_eq!(file.lines().unwrap().len(), 210);
}

#[test]
fn test_create_renumbers_batches() {
    let mut file = File::new(file_header());
    let mut first = batch_of(SecCode::Ppd, 200, vec![Entry::new(entry(22, 100, 1))]);
    first.header_mut().batch_number = 7;
    let mut second = batch_of(SecCode::Ppd, 200, vec![Entry::new(entry(22, 100, 2))]);
    second.header_mut().batch_number = 3;
    file.add_batch(first);
    file.add_batch(second);

    file.create().unwrap();
    let numbers: Vec<u32> = file.batches().iter().map(|b| b.header().batch_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(file.batches()[1].control().unwrap().batch_number, 2);
}

#[test]
fn test_trace_reused_across_batches() {
    let mut file = File::new(file_header());
    file.add_batch(batch_of(SecCode::Ppd, 200, vec![Entry::new(entry(22, 100, 1))]));
    file.add_batch(batch_of(SecCode::Ppd, 200, vec![Entry::new(entry(22, 100, 1))]));

    let errs = file.create().unwrap_err();
    assert!(errs.has_rule(&FileRule::DuplicateTraceNumber {
        trace_number: 121042880000001
    }));
    assert!(file.control().is_none());
}

#[test]
fn test_file_without_batches() {
    let mut file = File::new(file_header());
    file.create().unwrap();
    let lines = file.lines().unwrap();
    assert_eq!(lines.len(), 10);
    assert!(lines[1].starts_with("9000000000001"));
}

// ==================== SEC RULES ====================

#[test]
fn test_mte_needs_terminal_addenda() {
    let mut ed = entry(27, 10000, 1);
    ed.identification_number = "031300010000001".to_string();
    let mut batch = batch_of(SecCode::Mte, 225, vec![Entry::new(ed.clone())]);
    batch.header_mut().company_name = "Merchant ATM".to_string();

    let errs = batch.create().unwrap_err();
    assert!(has(&errs, "Addenda02", &BatchRule::AddendaCount { found: 0, expected: 1 }));

    let mut batch = batch_of(
        SecCode::Mte,
        225,
        vec![Entry::new(ed).with_addenda(terminal_addenda())],
    );
    batch.header_mut().company_name = "Merchant ATM".to_string();
    batch.create().unwrap();
    assert_eq!(batch.entries()[0].addenda02().next().unwrap().trace_number, 121042880000001);
}

#[test]
fn test_mte_addenda_limits() {
    let mut ed = entry(27, 10000, 1);
    ed.identification_number = "031300010000001".to_string();

    let e = Entry::new(ed.clone())
        .with_addenda(terminal_addenda())
        .with_addenda(terminal_addenda());
    let mut batch = batch_of(SecCode::Mte, 225, vec![e]);
    let errs = batch.create().unwrap_err();
    assert!(has(&errs, "Addenda02", &BatchRule::AddendaCount { found: 2, expected: 1 }));

    let e = Entry::new(ed)
        .with_addenda(terminal_addenda())
        .with_addenda(Addenda05::with_information("memo"));
    let mut batch = batch_of(SecCode::Mte, 225, vec![e]);
    let errs = batch.create().unwrap_err();
    assert!(has(
        &errs,
        "TypeCode",
        &BatchRule::AddendaCategory {
            sec: SecCode::Mte,
            type_code: "05"
        }
    ));
}

#[test]
fn test_mte_needs_identification_number() {
    let mut batch = batch_of(
        SecCode::Mte,
        225,
        vec![Entry::new(entry(27, 10000, 1)).with_addenda(terminal_addenda())],
    );
    let errs = batch.create().unwrap_err();
    assert!(has(&errs, "IdentificationNumber", &BatchRule::Mandatory));
}

fn mte_batch() -> Batch {
    let mut ed = entry(27, 10000, 1);
    ed.identification_number = "031300010000001".to_string();
    let mut batch = batch_of(
        SecCode::Mte,
        225,
        vec![Entry::new(ed).with_addenda(terminal_addenda())],
    );
    batch.header_mut().company_name = "Merchant ATM".to_string();
    batch
}

#[test]
fn test_mte_needs_individual_name() {
    for name in ["", "0000000000"] {
        let mut batch = mte_batch();
        batch.create().unwrap();
        batch.entries_mut()[0].detail.set_receiving_company(name);
        let errs = batch.create().unwrap_err();
        assert!(has(&errs, "IndividualName", &BatchRule::Mandatory), "name {:?}", name);
    }
}

#[test]
fn test_mte_header_sec_must_match_batch() {
    let mut batch = mte_batch();
    batch.create().unwrap();
    batch.header_mut().standard_entry_class_code = SecCode::Ack;
    let errs = batch.validate().unwrap_err();
    assert!(errs.has_rule(&BatchRule::SecType {
        expected: SecCode::Mte,
        found: SecCode::Ack
    }));
}

#[test]
fn test_mte_terminal_state() {
    let mut batch = mte_batch();
    let mut addenda = terminal_addenda();
    addenda.terminal_state = "XX".to_string();
    batch.entries_mut()[0].addenda = vec![addenda.into()];
    let errs = batch.create().unwrap_err();
    assert!(errs.iter().any(|e| e.field_name == "TerminalState"));
}

#[test]
fn test_terminal_addenda_rejected_outside_card_classes() {
    let mut batch = batch_of(
        SecCode::Ppd,
        200,
        vec![Entry::new(entry(22, 100, 1)).with_addenda(terminal_addenda())],
    );
    let errs = batch.create().unwrap_err();
    assert!(has(
        &errs,
        "TypeCode",
        &BatchRule::AddendaCategory {
            sec: SecCode::Ppd,
            type_code: "02"
        }
    ));
}

#[test]
fn test_cie_accepts_credits_only() {
    let mut batch = batch_of(SecCode::Cie, 200, vec![Entry::new(entry(27, 100, 1))]);
    let errs = batch.create().unwrap_err();
    assert!(has(
        &errs,
        "TransactionCode",
        &BatchRule::TransactionCode {
            sec: SecCode::Cie,
            transaction_code: 27
        }
    ));
}

#[test]
fn test_credits_only_service_class() {
    let mut batch = batch_of(SecCode::Ppd, 220, vec![Entry::new(entry(27, 100, 1))]);
    let errs = batch.create().unwrap_err();
    assert!(has(
        &errs,
        "TransactionCode",
        &BatchRule::ServiceClassTranCode {
            service_class: 220,
            transaction_code: 27
        }
    ));
}

#[test]
fn test_rck_description_and_limit() {
    let mut ed = entry(27, 250_001, 1);
    ed.set_check_serial_number("123879654");
    let mut batch = batch_of(SecCode::Rck, 225, vec![Entry::new(ed)]);
    let errs = batch.create().unwrap_err();
    assert!(has(
        &errs,
        "CompanyEntryDescription",
        &BatchRule::Expected {
            expected: "REDEPCHECK".to_string(),
            found: "PAYROLL".to_string()
        }
    ));
    assert!(has(
        &errs,
        "Amount",
        &BatchRule::AmountLimit {
            amount: 250_001,
            limit: 250_000
        }
    ));

    batch.header_mut().company_entry_description = "REDEPCHECK".to_string();
    batch.entries_mut()[0].detail.amount = 250_000;
    batch.create().unwrap();
}

#[test]
fn test_arc_needs_check_serial() {
    let mut batch = batch_of(SecCode::Arc, 225, vec![Entry::new(entry(27, 100, 1))]);
    let errs = batch.create().unwrap_err();
    assert!(has(&errs, "CheckSerialNumber", &BatchRule::Mandatory));
}

#[test]
fn test_pop_terminal_fields() {
    let mut ed = entry(27, 100, 1);
    ed.set_pop_check_serial_number("123456");
    ed.set_pop_terminal_city("PHIL");
    ed.set_pop_terminal_state("ZZ");
    let mut batch = batch_of(SecCode::Pop, 225, vec![Entry::new(ed)]);
    let errs = batch.create().unwrap_err();
    assert!(errs.iter().any(|e| e.field_name == "TerminalState"));

    batch.entries_mut()[0].detail.set_pop_terminal_state("PA");
    batch.create().unwrap();
}

#[test]
fn test_web_payment_type() {
    let mut batch = batch_of(SecCode::Web, 200, vec![Entry::new(entry(27, 100, 1))]);
    let errs = batch.create().unwrap_err();
    assert!(errs.iter().any(|e| e.field_name == "PaymentTypeCode"));

    batch.entries_mut()[0].detail.set_payment_type_code("R");
    batch.create().unwrap();
}

#[test]
fn test_ctx_addenda_count_overlay() {
    let mut ed = entry(22, 100, 1);
    ed.set_catx_addenda_records(2);
    ed.set_catx_receiving_company("RECEIVER CO");
    let e = Entry::new(ed)
        .with_addenda(Addenda05::with_information("ISA*00*"))
        .with_addenda(Addenda05::with_information("GS*RA*"));
    let mut batch = batch_of(SecCode::Ctx, 200, vec![e]);
    batch.create().unwrap();
    assert_eq!(batch.entries()[0].addenda05().map(|a| a.sequence_number).collect::<Vec<_>>(), vec![1, 2]);

    batch.entries_mut()[0].detail.set_catx_addenda_records(1);
    let errs = batch.create().unwrap_err();
    assert!(errs.iter().any(|e| e.field_name == "CATXAddendaRecords"));

    batch.entries_mut()[0].detail.set_catx_addenda_records(2);
    batch.entries_mut()[0].detail.set_catx_receiving_company("0000000000");
    let errs = batch.create().unwrap_err();
    assert!(has(&errs, "CATXReceivingCompany", &BatchRule::Mandatory));
}

#[test]
fn test_ppd_needs_name() {
    let mut ed = entry(22, 100, 1);
    ed.individual_name.clear();
    let mut batch = batch_of(SecCode::Ppd, 200, vec![Entry::new(ed)]);
    let errs = batch.create().unwrap_err();
    assert!(has(&errs, "IndividualName", &BatchRule::Mandatory));
}

// ==================== RETURNS AND NOTIFICATIONS OF CHANGE ====================

fn notice_of_change() -> Addenda98 {
    let mut a = Addenda98::new();
    a.change_code = "C01".to_string();
    a.original_trace = 121042880000001;
    a.original_dfi = 12104288;
    a.corrected_data = "1918171614".to_string();
    a
}

fn return_addenda() -> Addenda99 {
    let mut a = Addenda99::new();
    a.return_code = "R07".to_string();
    a.original_trace = 99912340000015;
    a.original_dfi = 9101298;
    a.addenda_information = "Authorization revoked".to_string();
    a
}

#[test]
fn test_cor_entry_needs_notification() {
    let mut batch = batch_of(SecCode::Cor, 200, vec![Entry::new(entry(21, 0, 1))]);
    let errs = batch.create().unwrap_err();
    assert!(has(&errs, "Addenda98", &BatchRule::AddendaCount { found: 0, expected: 1 }));

    let mut batch = batch_of(
        SecCode::Cor,
        200,
        vec![Entry::new(entry(21, 0, 1)).with_addenda(notice_of_change())],
    );
    batch.create().unwrap();
    assert_eq!(batch.category(), Some(EntryCategory::NotificationOfChange));
}

#[test]
fn test_notification_amount_is_zero() {
    let mut batch = batch_of(
        SecCode::Cor,
        200,
        vec![Entry::new(entry(21, 500, 1)).with_addenda(notice_of_change())],
    );
    let errs = batch.create().unwrap_err();
    assert!(has(&errs, "Amount", &BatchRule::AmountNonZero { transaction_code: 21 }));
}

#[test]
fn test_return_not_allowed_in_cor() {
    let mut batch = batch_of(
        SecCode::Cor,
        200,
        vec![Entry::new(entry(21, 0, 1)).with_addenda(return_addenda())],
    );
    let errs = batch.create().unwrap_err();
    assert!(has(
        &errs,
        "TypeCode",
        &BatchRule::AddendaCategory {
            sec: SecCode::Cor,
            type_code: "99"
        }
    ));
}

#[test]
fn test_notification_not_allowed_in_ppd() {
    let mut batch = batch_of(
        SecCode::Ppd,
        200,
        vec![Entry::new(entry(21, 0, 1)).with_addenda(notice_of_change())],
    );
    let errs = batch.create().unwrap_err();
    assert!(has(
        &errs,
        "TypeCode",
        &BatchRule::AddendaCategory {
            sec: SecCode::Ppd,
            type_code: "98"
        }
    ));
}

#[test]
fn test_return_batch() {
    let mut batch = batch_of(
        SecCode::Ppd,
        200,
        vec![
            Entry::new(entry(26, 10000, 1)).with_addenda(return_addenda()),
            Entry::new(entry(21, 2500, 2)).with_addenda(return_addenda()),
        ],
    );
    batch.create().unwrap();
    assert_eq!(batch.category(), Some(EntryCategory::Return));
    let addenda = batch.entries()[1].addenda99().unwrap();
    assert_eq!(addenda.trace_number, 121042880000002);
    assert_eq!(addenda.return_code_description().unwrap().reason, "Authorization Revoked by Customer");
}

// ==================== DECODING ====================

#[test]
fn test_decode_reports_every_bad_line() {
    let mut file = File::new(file_header());
    file.add_batch(batch_of(
        SecCode::Ppd,
        200,
        vec![Entry::new(entry(22, 100, 1)), Entry::new(entry(22, 200, 2))],
    ));
    file.create().unwrap();
    let mut lines = file.lines().unwrap();
    lines[2].replace_range(1..3, "2X");
    lines[3].truncate(80);

    let errs = reader::decode(lines.iter().map(String::as_str)).unwrap_err();
    let found: Vec<usize> = errs.iter().map(|e| e.line_number).collect();
    assert_eq!(found, vec![3, 4]);
    assert!(matches!(errs[0].kind, ParseErrorKind::Field(_)));
    assert_eq!(errs[1].kind, ParseErrorKind::LineLength { found: 80 });
}

#[test]
fn test_decode_then_validate_catches_stale_control() {
    let mut file = File::new(file_header());
    file.add_batch(batch_of(SecCode::Ppd, 200, vec![Entry::new(entry(22, 100, 1))]));
    file.create().unwrap();
    let text = file.encode().unwrap();
    // amount 100 -> 900 in the entry detail only
    let tampered = text.replacen("0000000100", "0000000900", 1);

    let decoded = reader::decode_str(&tampered).unwrap();
    let errs = decoded.validate().unwrap_err();
    assert!(errs.has_batch_rule(&BatchRule::ControlMismatch {
        expected: 900,
        found: 100
    }));
    assert!(errs.has_rule(&FileRule::ControlMismatch {
        expected: 900,
        found: 100
    }));
}
