//! Return reason and change code dictionaries.
//!
//! Both tables are built once on first use and shared read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

/// A NACHA return reason or notification of change code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReasonCode {
    pub code: &'static str,
    pub reason: &'static str,
    pub description: &'static str,
}

const RETURN_CODES: &[(&str, &str, &str)] = &[
    ("R01", "Insufficient Funds", "Available balance is not sufficient to cover the dollar value of the debit entry"),
    ("R02", "Account Closed", "Previously active account has been closed by customer or RDFI"),
    ("R03", "No Account/Unable to Locate Account", "Account number structure is valid and passes editing process, but does not correspond to individual or is not an open account"),
    ("R04", "Invalid Account Number", "Account number structure not valid; entry may fail check digit validation or may contain an incorrect number of digits"),
    ("R05", "Improper Debit to Consumer Account", "A CCD, CTX, or CBR debit entry was transmitted to a Consumer Account of the Receiver and was not authorized by the Receiver"),
    ("R06", "Returned per ODFI's Request", "ODFI has requested RDFI to return the ACH entry"),
    ("R07", "Authorization Revoked by Customer", "Consumer, who previously authorized ACH payment, has revoked authorization from Originator"),
    ("R08", "Payment Stopped", "Receiver of a recurring debit transaction has stopped payment to a specific ACH debit"),
    ("R09", "Uncollected Funds", "Sufficient book or ledger balance exists to satisfy dollar value of the transaction, but the dollar value of transaction is in process of collection"),
    ("R10", "Customer Advises Not Authorized", "Consumer has advised RDFI that Originator of transaction is not authorized to debit account"),
    ("R11", "Customer Advises Entry Not in Accordance with the Terms of the Authorization", "The Receiver advised the RDFI that the entry was not in accordance with the terms of the authorization"),
    ("R12", "Branch Sold to Another DFI", "Financial institution receives entry destined for an account at a branch that has been sold to another financial institution"),
    ("R13", "RDFI not qualified to participate", "Financial institution does not receive commercial ACH entries"),
    ("R14", "Representative payee deceased or unable to continue in that capacity", "The representative payee authorized to accept entries on behalf of a beneficiary is either deceased or unable to continue in that capacity"),
    ("R15", "Beneficiary or bank account holder deceased", "Beneficiary or account holder is deceased"),
    ("R16", "Bank account frozen", "Funds in bank account are unavailable due to action by RDFI or legal order"),
    ("R17", "File record edit criteria", "Fields rejected by RDFI processing, identified in return addenda"),
    ("R18", "Improper effective entry date", "Entries have been presented prior to the first available processing window for the effective date"),
    ("R19", "Amount field error", "Improper formatting of the amount field"),
    ("R20", "Non-payment bank account", "Entry destined for non-payment bank account defined by regulation"),
    ("R21", "Invalid company Identification", "The company ID information not valid (normally CIE entries)"),
    ("R22", "Invalid individual ID number", "Individual id used by receiver is incorrect (CIE entries)"),
    ("R23", "Credit entry refused by receiver", "Receiver returned entry because minimum or exact amount not remitted, bank account is subject to litigation, or payment represents an overpayment"),
    ("R24", "Duplicate entry", "RDFI has received a duplicate entry"),
    ("R25", "Addenda error", "Improper formatting of the addenda record information"),
    ("R26", "Mandatory field error", "Improper information in one of the mandatory fields"),
    ("R27", "Trace number error", "Original entry trace number is not valid for return entry; or addenda trace numbers do not correspond with entry detail record"),
    ("R28", "Transit routing number check digit error", "Check digit for the transit routing number is incorrect"),
    ("R29", "Corporate customer advises not authorized", "RDFI has been notified by corporate receiver that debit entry of originator is not authorized"),
    ("R30", "RDFI not participant in check truncation program", "Financial institution not participating in automated check safekeeping application"),
    ("R31", "Permissible return entry (CCD and CTX only)", "RDFI has been notified by the ODFI that it agrees to accept a CCD or CTX return entry"),
    ("R32", "RDFI non-settlement", "RDFI is not able to settle the entry"),
    ("R33", "Return of XCK entry", "RDFI determines at its sole discretion to return an XCK entry; an XCK return entry may be initiated by midnight of the sixtieth day following the settlement date if the XCK entry"),
    ("R34", "Limited participation RDFI", "RDFI participation has been limited by a federal or state supervisor"),
    ("R35", "Return of improper debit entry", "ACH debit not permitted for use with the CIE standard entry class code (except for reversals)"),
    ("R36", "Return of Improper Credit Entry", ""),
    ("R37", "Source Document Presented for Payment", "The source document to which an ARC, BOC or POP entry relates has been presented for payment"),
    ("R38", "Stop Payment on Source Document", "The RDFI determines a stop payment order has been placed on the source document to which the ARC or BOC entry relates"),
    ("R39", "Improper Source Document/Source Document Presented for Payment", "The RDFI determines the source document used for the ARC, BOC or POP entry is not an eligible item or has been presented for payment"),
    ("R40", "Return of ENR Entry by Federal Government Agency (ENR Only)", "The federal government agency returns an ENR entry"),
    ("R41", "Invalid Transaction Code (ENR only)", "Either the Transaction Code included in Field 3 of the Addenda Record does not conform to the ACH Record Format Specifications contained in Appendix Three or it is not appropriate with regard to an Automated Enrollment Entry"),
    ("R42", "Routing Number/Check Digit Error (ENR Only)", "The Routing Number and the Check Digit included in Field 3 of the Addenda Record is either not a valid number or it does not conform to the Modulus 10 formula"),
    ("R43", "Invalid DFI Account Number (ENR Only)", "The Receiver's account number included in Field 3 of the Addenda Record must include at least one alphameric character"),
    ("R44", "Invalid Individual ID Number/Identification Number (ENR only)", "The Individual ID Number/Identification Number provided in Field 3 of the Addenda Record does not match a corresponding ID number in the Federal Government Agency's records"),
    ("R45", "Invalid Individual Name/Company Name (ENR only)", "The name of the consumer or company provided in Field 3 of the Addenda Record either does not match a corresponding name in the Federal Government Agency's records or fails to include at least one alphameric character"),
    ("R46", "Invalid Representative Payee Indicator (ENR Only)", "The Representative Payee Indicator Code included in Field 3 of the Addenda Record has been omitted or it is not consistent with the Federal Government Agency's records"),
    ("R47", "Duplicate Enrollment (ENR Only)", "The Entry is a duplicate of an Automated Enrollment Entry previously initiated by a DFI"),
    ("R50", "State Law Affecting RCK Acceptance", ""),
    ("R51", "Item related to RCK Entry is Ineligible or RCK Entry is Improper", ""),
    ("R52", "Stop Payment on Item Related to RCK Entry", ""),
    ("R53", "Item and RCK Entry Presented for Payment", ""),
    ("R61", "Misrouted Return", "The financial institution preparing the Return Entry (the RDFI of the original Entry) has placed the incorrect Routing Number in the Receiving DFI Identification field"),
    ("R62", "Return of Erroneous or Reversing Debit", "The Originator's/ODFI's use of the reversal process has resulted in, or failed to correct, an unintended credit to the Receiver"),
    ("R67", "Duplicate Return", "The ODFI has received more than one Return for the same Entry"),
    ("R68", "Untimely Return", "The Return Entry has not been sent within the time frame established by these Rules"),
    ("R69", "Field Error(s)", "One or more of the field requirements are incorrect"),
    ("R70", "Permissible Return Entry Not Accepted/Return Not Requested by ODFI", "The ODFI has received a Return Entry identified by the RDFI as being returned with the permission of, or at the request of, the ODFI, but the ODFI has not agreed to accept the Entry or has not requested the return of the Entry"),
    ("R71", "Misrouted Dishonored Return", "The financial institution preparing the dishonored Return Entry (the ODFI of the original Entry) has placed the incorrect Routing Number in the Receiving DFI Identification field"),
    ("R72", "Untimely Dishonored Return", "The dishonored Return Entry has not been sent within the designated time frame"),
    ("R73", "Timely Original Return", "The RDFI is certifying that the original Return Entry was sent within the timeframe designated in these Rules"),
    ("R74", "Corrected Return", "The RDFI is correcting a previous Return Entry that was dishonored using Return Reason Code R69 (Field Error(s)) because it contained incomplete or incorrect information"),
    ("R75", "Return Not a Duplicate", "The Return Entry was not a duplicate of an Entry previously returned by the RDFI"),
    ("R76", "No Errors Found", "The original Return Entry did not contain the errors indicated by the ODFI in the dishonored Return Entry"),
    ("R77", "Non-Acceptance of R62 Dishonored Return", "The RDFI returned both the Erroneous Entry and the related Reversing Entry, or the funds relating to the R62 dishonored Return are not recoverable from the Receiver"),
    ("R80", "IAT Entry Coding Error", "The IAT Entry is being returned due to one or more of the following conditions: invalid DFI/Bank Branch Country Code, invalid DFI/Bank Identification Number Qualifier, invalid Foreign Exchange Indicator, invalid ISO Originating Currency Code, invalid ISO Destination Currency Code, invalid ISO Destination Country Code, invalid Transaction Type Code"),
    ("R81", "Non-Participant in IAT Program", "The IAT Entry is being returned because the Gateway does not have an agreement with either the ODFI or the Gateway's customer to transmit Outbound IAT Entries"),
    ("R82", "Invalid Foreign Receiving DFI Identification", "The reference used to identify the Foreign Receiving DFI of an Outbound IAT Entry is invalid"),
    ("R83", "Foreign Receiving DFI Unable to Settle", "The IAT Entry is being returned due to settlement problems in the foreign payment system"),
    ("R84", "Entry Not Processed by Gateway", "For Outbound IAT Entries, the Entry has not been processed and is being returned at the Gateway's discretion because either the processing of such Entry may expose the Gateway to excessive risk, or the foreign payment system does not support the functions needed to process the transaction"),
    ("R85", "Incorrectly Coded Outbound International Payment", "The RDFI/Gateway has identified the Entry as an Outbound international payment and is returning the Entry because it bears an SEC Code that lacks information required by the Gateway for OFAC compliance"),
];

const CHANGE_CODES: &[(&str, &str, &str)] = &[
    ("C01", "Incorrect bank account number", "Bank account number incorrect or formatted incorrectly"),
    ("C02", "Incorrect transit/routing number", "Once valid transit/routing number must be changed"),
    ("C03", "Incorrect transit/routing number and bank account number", "Once valid transit/routing number must be changed and causes a change to bank account number structure"),
    ("C04", "Bank account name change", "Customer has changed name or ODFI submitted name incorrectly"),
    ("C05", "Incorrect payment code", "Entry posted to demand account should contain savings payment codes or vice versa"),
    ("C06", "Incorrect bank account number and transit code", "Bank account number must be changed and payment code should indicate posting to another account type (demand/savings)"),
    ("C07", "Incorrect transit/routing number, bank account number and payment code", "Changes required in three fields indicated"),
    ("C08", "Incorrect Foreign Receiving DFI Identification", "Foreign Receiving DFI identification is incorrect"),
    ("C09", "Incorrect individual ID number", "Individual's ID number is incorrect"),
    ("C10", "Incorrect company name", "Company name is no longer valid and should be changed"),
    ("C11", "Incorrect company identification", "Company ID is no longer valid and should be changed"),
    ("C12", "Incorrect company name and company ID", "Both the company name and company id are no longer valid and must be changed"),
    ("C13", "Addenda Format Error", "Information in the Entry Detail Record was correct and the entry was processed and credited by the RDFI, but information found in the addenda record was unclear or formatted incorrectly"),
    ("C14", "Incorrect SEC Code for Outbound International Payment", "The RDFI/Gateway has identified the Entry as an Outbound international payment and is requesting the ODFI to correct the SEC code"),
    ("C61", "Misrouted Notification of Change", "The financial institution preparing the NOC has placed the incorrect routing number in the Receiving DFI Identification field"),
    ("C62", "Incorrect Trace Number", "The NOC contains an incorrect original entry trace number"),
    ("C63", "Incorrect Company Identification Number", "The NOC contains an incorrect company identification number"),
    ("C64", "Incorrect Individual Identification Number/Identification Number", "The NOC contains an incorrect individual identification number"),
    ("C65", "Incorrectly Formatted Corrected Data", "The corrected data in the NOC is not formatted correctly"),
    ("C66", "Incorrect Discretionary Data", "The NOC contains incorrect discretionary data"),
    ("C67", "Routing Number Not From Original Entry Detail Record", "The NOC routing number does not match the original entry"),
    ("C68", "DFI Account Number Not From Original Entry Detail Record", "The NOC account number does not match the original entry"),
    ("C69", "Incorrect Transaction Code", "The NOC contains an incorrect transaction code"),
];

static RETURN_CODE_DICT: OnceLock<HashMap<&'static str, ReasonCode>> = OnceLock::new();
static CHANGE_CODE_DICT: OnceLock<HashMap<&'static str, ReasonCode>> = OnceLock::new();

fn build(table: &'static [(&'static str, &'static str, &'static str)]) -> HashMap<&'static str, ReasonCode> {
    table
        .iter()
        .map(|&(code, reason, description)| {
            (
                code,
                ReasonCode {
                    code,
                    reason,
                    description,
                },
            )
        })
        .collect()
}

/// Return reason codes (`R01`..`R85`) keyed by code.
pub fn return_code_dict() -> &'static HashMap<&'static str, ReasonCode> {
    RETURN_CODE_DICT.get_or_init(|| build(RETURN_CODES))
}

/// Notification of change codes (`C01`..`C69`) keyed by code.
pub fn change_code_dict() -> &'static HashMap<&'static str, ReasonCode> {
    CHANGE_CODE_DICT.get_or_init(|| build(CHANGE_CODES))
}

pub fn return_code(code: &str) -> Option<&'static ReasonCode> {
    return_code_dict().get(code)
}

pub fn change_code(code: &str) -> Option<&'static ReasonCode> {
    change_code_dict().get(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_code_dict() {
        let dict = return_code_dict();
        assert!(dict.contains_key("R01"));
        assert!(dict.contains_key("R85"));
        assert!(!dict.contains_key("ABC"));
        assert_eq!(return_code("R07").unwrap().reason, "Authorization Revoked by Customer");
    }

    #[test]
    fn test_change_code_dict() {
        assert_eq!(change_code("C01").unwrap().reason, "Incorrect bank account number");
        assert!(change_code("C69").is_some());
        assert!(change_code("C15").is_none());
        assert!(change_code("R01").is_none());
    }

    #[test]
    fn test_dicts_are_shared() {
        assert!(std::ptr::eq(return_code_dict(), return_code_dict()));
    }

    #[test]
    fn test_codes_are_unique() {
        assert_eq!(return_code_dict().len(), RETURN_CODES.len());
        assert_eq!(change_code_dict().len(), CHANGE_CODES.len());
    }
}
