//! Enumerated NACHA code values: service classes, transaction codes,
//! state codes and routing number check digits.

/// Service class code: ACH entries mixed debits and credits.
pub const MIXED_DEBITS_AND_CREDITS: u16 = 200;
/// Service class code: ACH credits only.
pub const CREDITS_ONLY: u16 = 220;
/// Service class code: ACH debits only.
pub const DEBITS_ONLY: u16 = 225;
/// Service class code: ACH automated accounting advices.
pub const AUTOMATED_ACCOUNTING_ADVICES: u16 = 280;

pub const CHECKING_RETURN_NOC_CREDIT: u8 = 21;
pub const CHECKING_CREDIT: u8 = 22;
pub const CHECKING_PRENOTE_CREDIT: u8 = 23;
pub const CHECKING_ZERO_DOLLAR_REMITTANCE_CREDIT: u8 = 24;
pub const CHECKING_RETURN_NOC_DEBIT: u8 = 26;
pub const CHECKING_DEBIT: u8 = 27;
pub const CHECKING_PRENOTE_DEBIT: u8 = 28;
pub const CHECKING_ZERO_DOLLAR_REMITTANCE_DEBIT: u8 = 29;
pub const SAVINGS_RETURN_NOC_CREDIT: u8 = 31;
pub const SAVINGS_CREDIT: u8 = 32;
pub const SAVINGS_PRENOTE_CREDIT: u8 = 33;
pub const SAVINGS_ZERO_DOLLAR_REMITTANCE_CREDIT: u8 = 34;
pub const SAVINGS_RETURN_NOC_DEBIT: u8 = 36;
pub const SAVINGS_DEBIT: u8 = 37;
pub const SAVINGS_PRENOTE_DEBIT: u8 = 38;
pub const SAVINGS_ZERO_DOLLAR_REMITTANCE_DEBIT: u8 = 39;
pub const GL_RETURN_NOC_CREDIT: u8 = 41;
pub const GL_CREDIT: u8 = 42;
pub const GL_PRENOTE_CREDIT: u8 = 43;
pub const GL_ZERO_DOLLAR_REMITTANCE_CREDIT: u8 = 44;
pub const GL_RETURN_NOC_DEBIT: u8 = 46;
pub const GL_DEBIT: u8 = 47;
pub const GL_PRENOTE_DEBIT: u8 = 48;
pub const GL_ZERO_DOLLAR_REMITTANCE_DEBIT: u8 = 49;
pub const LOAN_RETURN_NOC_CREDIT: u8 = 51;
pub const LOAN_CREDIT: u8 = 52;
pub const LOAN_PRENOTE_CREDIT: u8 = 53;
pub const LOAN_ZERO_DOLLAR_REMITTANCE_CREDIT: u8 = 54;
pub const LOAN_DEBIT: u8 = 55;
pub const LOAN_RETURN_NOC_DEBIT: u8 = 56;

pub fn is_service_class(code: u16) -> bool {
    matches!(
        code,
        MIXED_DEBITS_AND_CREDITS | CREDITS_ONLY | DEBITS_ONLY | AUTOMATED_ACCOUNTING_ADVICES
    )
}

pub fn is_credit(code: u8) -> bool {
    matches!(code, 21..=24 | 31..=34 | 41..=44 | 51..=54)
}

pub fn is_debit(code: u8) -> bool {
    matches!(code, 26..=29 | 36..=39 | 46..=49 | 55 | 56)
}

pub fn is_transaction_code(code: u8) -> bool {
    is_credit(code) || is_debit(code)
}

/// Prenotification entries carry no value.
pub fn is_prenote(code: u8) -> bool {
    matches!(code, 23 | 28 | 33 | 38 | 43 | 48 | 53)
}

/// Zero dollar entries carrying remittance data only.
pub fn is_zero_dollar(code: u8) -> bool {
    matches!(code, 24 | 29 | 34 | 39 | 44 | 49 | 54)
}

/// Codes used by automated returns and notifications of change.
pub fn is_return_or_noc(code: u8) -> bool {
    matches!(code, 21 | 26 | 31 | 36 | 41 | 46 | 51 | 56)
}

/// Codes that move money and therefore need a non-zero amount.
pub fn is_live(code: u8) -> bool {
    matches!(code, 22 | 27 | 32 | 37 | 42 | 47 | 52 | 55)
}

/// Whether a service class code admits a transaction code.
pub fn service_class_allows(service_class: u16, code: u8) -> bool {
    match service_class {
        CREDITS_ONLY => is_credit(code),
        DEBITS_ONLY => is_debit(code),
        _ => true,
    }
}

const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY", // territories
    "AS", "GU", "MP", "PR", "VI", "UM", "FM", "MH", "PW", // military
    "AA", "AE", "AP",
];

/// US state, territory and military postal codes.
pub fn is_state_code(code: &str) -> bool {
    STATE_CODES.contains(&code)
}

/// POS and SHR card transaction type codes.
pub fn is_card_transaction_type(code: &str) -> bool {
    matches!(code, "01" | "02" | "03" | "99")
}

/// TEL and WEB payment type codes (`R` recurring, `S` single).
pub fn is_payment_type_code(code: &str) -> bool {
    matches!(code.trim_end(), "R" | "S")
}

const ROUTING_WEIGHTS: [u32; 8] = [3, 7, 1, 3, 7, 1, 3, 7];

/// Computes the ABA check digit for the first eight digits of a routing number.
///
/// Returns `None` unless `routing` is exactly eight ASCII digits.
pub fn check_digit(routing: &str) -> Option<u8> {
    if routing.len() != 8 || !routing.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let sum: u32 = routing
        .bytes()
        .zip(ROUTING_WEIGHTS.iter())
        .map(|(b, w)| u32::from(b - b'0') * w)
        .sum();
    Some(((10 - sum % 10) % 10) as u8)
}

/// Checks a nine digit routing number against its check digit.
pub fn is_valid_routing(routing: &str) -> bool {
    routing.len() == 9
        && routing.is_ascii()
        && match (check_digit(&routing[..8]), routing[8..].parse::<u8>()) {
            (Some(expected), Ok(found)) => expected == found,
            _ => false,
        }
}
