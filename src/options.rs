//! Validation options.

use serde::{Deserialize, Serialize};

/// Switches that relax or tighten file header validation.
///
/// Some partners put a company identifier rather than a routing number in the
/// immediate origin, or route through a processor whose destination does not
/// pass the routing check digit; these options let such files validate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidateOptions {
    /// Skip presence and format checks of the immediate origin.
    pub bypass_origin_validation: bool,

    /// Skip presence and check digit checks of the immediate destination.
    pub bypass_destination_validation: bool,

    /// Require the immediate origin to be a routing number with a valid check digit.
    pub require_aba_origin: bool,
}
