//! Dollar amounts for reports.
//!
//! Records carry amounts as whole cents. `Dollars` renders them with exactly
//! two decimal places using `rust_decimal`, so totals never pass through
//! floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A dollar amount with two decimal places.
///
/// ```
/// use ach_engine::Dollars;
///
/// assert_eq!(Dollars::from_cents(100_050).to_string(), "1000.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Dollars(Decimal);

impl Dollars {
    pub const SCALE: u32 = 2;

    pub const ZERO: Self = Dollars(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Dollars(normalized)
    }

    pub fn from_cents(cents: u64) -> Self {
        Dollars(Decimal::from_i128_with_scale(i128::from(cents), Self::SCALE))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Dollars {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Dollars::new(Decimal::from_str(s.trim())?))
    }
}

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Dollars {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Dollars::new(self.0 + rhs.0)
    }
}

impl AddAssign for Dollars {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Sum for Dollars {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Dollars::ZERO, Add::add)
    }
}

impl Serialize for Dollars {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dollars {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Dollars::from_str(&s).map_err(serde::de::Error::custom)
    }
}
