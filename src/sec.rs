//! Standard Entry Class codes and the business rules each one imposes.

use crate::codes;
use std::fmt;
use std::str::FromStr;

/// Standard Entry Class code carried by a batch header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecCode {
    /// Acknowledgment of a CCD credit.
    Ack,
    /// Accounts receivable check conversion.
    Arc,
    /// Acknowledgment of a CTX credit.
    Atx,
    /// Back office check conversion.
    Boc,
    /// Corporate credit or debit.
    Ccd,
    /// Customer initiated entry.
    Cie,
    /// Notification of change.
    Cor,
    /// Corporate trade exchange.
    Ctx,
    /// Machine transfer (ATM) entry.
    Mte,
    /// Point of purchase check conversion.
    Pop,
    /// Point of sale entry.
    Pos,
    /// Prearranged payment and deposit.
    Ppd,
    /// Re-presented check.
    Rck,
    /// Shared network transaction.
    Shr,
    /// Telephone initiated entry.
    Tel,
    /// Check truncation entry.
    Trc,
    /// Internet initiated entry.
    Web,
    /// Destroyed check entry.
    Xck,
}

impl SecCode {
    pub const ALL: [SecCode; 18] = [
        SecCode::Ack,
        SecCode::Arc,
        SecCode::Atx,
        SecCode::Boc,
        SecCode::Ccd,
        SecCode::Cie,
        SecCode::Cor,
        SecCode::Ctx,
        SecCode::Mte,
        SecCode::Pop,
        SecCode::Pos,
        SecCode::Ppd,
        SecCode::Rck,
        SecCode::Shr,
        SecCode::Tel,
        SecCode::Trc,
        SecCode::Web,
        SecCode::Xck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SecCode::Ack => "ACK",
            SecCode::Arc => "ARC",
            SecCode::Atx => "ATX",
            SecCode::Boc => "BOC",
            SecCode::Ccd => "CCD",
            SecCode::Cie => "CIE",
            SecCode::Cor => "COR",
            SecCode::Ctx => "CTX",
            SecCode::Mte => "MTE",
            SecCode::Pop => "POP",
            SecCode::Pos => "POS",
            SecCode::Ppd => "PPD",
            SecCode::Rck => "RCK",
            SecCode::Shr => "SHR",
            SecCode::Tel => "TEL",
            SecCode::Trc => "TRC",
            SecCode::Web => "WEB",
            SecCode::Xck => "XCK",
        }
    }

    /// The rule table governing forward entries of this class.
    pub fn rules(&self) -> SecRules {
        let base = SecRules::default();
        match self {
            SecCode::Ack | SecCode::Atx => SecRules {
                max_addenda05: if *self == SecCode::Ack { 1 } else { 9999 },
                direction: Direction::Codes(&[
                    codes::CHECKING_ZERO_DOLLAR_REMITTANCE_CREDIT,
                    codes::SAVINGS_ZERO_DOLLAR_REMITTANCE_CREDIT,
                ]),
                ..base
            },
            SecCode::Arc | SecCode::Boc | SecCode::Pop => SecRules {
                max_addenda05: 0,
                direction: Direction::Debits,
                amount_limit: Some(2_500_000),
                ..base
            },
            SecCode::Ccd | SecCode::Ppd | SecCode::Web => SecRules {
                name_required: true,
                ..base
            },
            SecCode::Cie => SecRules {
                direction: Direction::Credits,
                name_required: true,
                ..base
            },
            SecCode::Cor => SecRules {
                max_addenda05: 0,
                direction: Direction::Codes(&[
                    codes::CHECKING_RETURN_NOC_CREDIT,
                    codes::CHECKING_RETURN_NOC_DEBIT,
                    codes::SAVINGS_RETURN_NOC_CREDIT,
                    codes::SAVINGS_RETURN_NOC_DEBIT,
                    codes::GL_RETURN_NOC_CREDIT,
                    codes::GL_RETURN_NOC_DEBIT,
                    codes::LOAN_RETURN_NOC_CREDIT,
                    codes::LOAN_RETURN_NOC_DEBIT,
                ]),
                returns_allowed: false,
                ..base
            },
            SecCode::Ctx => SecRules {
                max_addenda05: 9999,
                ..base
            },
            SecCode::Mte | SecCode::Shr => SecRules {
                addenda02_required: true,
                max_addenda05: 0,
                name_required: *self == SecCode::Mte,
                ..base
            },
            SecCode::Pos => SecRules {
                addenda02_required: true,
                max_addenda05: 0,
                ..base
            },
            SecCode::Rck => SecRules {
                max_addenda05: 0,
                direction: Direction::Codes(&[codes::CHECKING_DEBIT]),
                amount_limit: Some(250_000),
                company_entry_description: Some("REDEPCHECK"),
                ..base
            },
            SecCode::Tel => SecRules {
                max_addenda05: 0,
                direction: Direction::Debits,
                name_required: true,
                ..base
            },
            SecCode::Trc => SecRules {
                max_addenda05: 0,
                direction: Direction::Debits,
                ..base
            },
            SecCode::Xck => SecRules {
                max_addenda05: 0,
                direction: Direction::Debits,
                amount_limit: Some(250_000),
                company_entry_description: Some("NO CHECK"),
                ..base
            },
        }
    }
}

impl fmt::Display for SecCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SecCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Which transaction codes a class admits for forward entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Any,
    Debits,
    Credits,
    Codes(&'static [u8]),
}

impl Direction {
    pub fn allows(&self, code: u8) -> bool {
        match self {
            Direction::Any => true,
            Direction::Debits => codes::is_debit(code),
            Direction::Credits => codes::is_credit(code),
            Direction::Codes(allowed) => allowed.contains(&code),
        }
    }
}

/// Structural rules for the forward entries of one SEC code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecRules {
    /// Every entry carries exactly one Addenda02; otherwise Addenda02 is forbidden.
    pub addenda02_required: bool,
    /// Upper bound on Addenda05 records per entry, zero forbids them.
    pub max_addenda05: usize,
    pub direction: Direction,
    /// Inclusive limit in cents.
    pub amount_limit: Option<u64>,
    /// IndividualName (or receiving company) must not be blank.
    pub name_required: bool,
    /// Return entries (Addenda99) may appear in the batch.
    pub returns_allowed: bool,
    /// Required value of the header's CompanyEntryDescription.
    pub company_entry_description: Option<&'static str>,
}

impl Default for SecRules {
    fn default() -> Self {
        SecRules {
            addenda02_required: false,
            max_addenda05: 1,
            direction: Direction::Any,
            amount_limit: None,
            name_required: false,
            returns_allowed: true,
            company_entry_description: None,
        }
    }
}
