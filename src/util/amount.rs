// SPDX-License-Identifier: CC0-1.0

//! Amounts
//!
//! This module mainly introduces the [Amount] type, a count of the
//! smallest indivisible unit of the chain, and the [Denomination]s it can
//! be displayed in.
//!

use std::fmt;
use std::ops;

/// Number of base units in one coin.
pub const COIN_VALUE: i64 = 100_000_000;

/// A set of denominations in which amounts can be expressed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Denomination {
    /// TURI
    Turi,
    /// base unit
    Satoshi,
}

impl Denomination {
    /// The number of decimal places more than a satoshi.
    fn precision(self) -> usize {
        match self {
            Denomination::Turi => 8,
            Denomination::Satoshi => 0,
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Denomination::Turi => "TURI",
            Denomination::Satoshi => "satoshi",
        })
    }
}

/// Amount
///
/// The [Amount] type can be used to express TuriCoin amounts that supports
/// arithmetic and conversion to various denominations.
///
/// Warning!
///
/// This type implements several arithmetic operations from [std::ops].
/// To prevent errors due to overflow or underflow when using these operations,
/// it is advised to instead use the checked arithmetic methods whose names
/// start with `checked_`. The operations from [std::ops] that [Amount]
/// implements will panic when overflow or underflow occurs.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Amount(i64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);
    /// Exactly one satoshi.
    pub const ONE_SAT: Amount = Amount(1);
    /// Exactly one coin.
    pub const ONE_COIN: Amount = Amount(COIN_VALUE);

    /// Create an [Amount] with satoshi precision and the given number of satoshis.
    pub const fn from_sat(satoshi: i64) -> Amount { Amount(satoshi) }

    /// Create an [Amount] of whole coins.
    pub const fn from_coins(coins: i64) -> Amount { Amount(coins * COIN_VALUE) }

    /// Get the number of satoshis in this [Amount].
    pub const fn as_sat(self) -> i64 { self.0 }

    /// Checked addition.
    /// Returns [None] if overflow occurred.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Checked multiplication.
    /// Returns [None] if overflow occurred.
    pub fn checked_mul(self, rhs: i64) -> Option<Amount> { self.0.checked_mul(rhs).map(Amount) }

    /// Checked integer division.
    /// Returns [None] if `rhs == 0`.
    pub fn checked_div(self, rhs: i64) -> Option<Amount> { self.0.checked_div(rhs).map(Amount) }

    /// Format the value of this [Amount] in the given denomination.
    ///
    /// Does not include the denomination.
    pub fn fmt_value_in(self, f: &mut dyn fmt::Write, denom: Denomination) -> fmt::Result {
        let precision = denom.precision();
        if precision == 0 {
            return write!(f, "{}", self.0);
        }
        let unit = 10i64.pow(precision as u32);
        if self.0 < 0 {
            f.write_char('-')?;
        }
        let abs = self.0.unsigned_abs();
        write!(f, "{}.{:0width$}", abs / unit as u64, abs % unit as u64, width = precision)
    }

    /// Get a string number of this [Amount] in the given denomination.
    ///
    /// Does not include the denomination.
    pub fn to_string_in(self, denom: Denomination) -> String {
        let mut buf = String::new();
        self.fmt_value_in(&mut buf, denom).expect("writing to a string doesn't fail");
        buf
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "Amount({} satoshi)", self.as_sat()) }
}

// No one should depend on a binding contract for Display for this type.
// Just using TURI for now.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_value_in(f, Denomination::Turi)?;
        write!(f, " {}", Denomination::Turi)
    }
}

impl ops::Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output { self.checked_add(rhs).expect("Amount addition error") }
}

impl ops::Mul<i64> for Amount {
    type Output = Amount;

    fn mul(self, rhs: i64) -> Self::Output { self.checked_mul(rhs).expect("Amount multiplication error") }
}

impl ops::Div<i64> for Amount {
    type Output = Amount;

    fn div(self, rhs: i64) -> Self::Output { self.checked_div(rhs).expect("Amount division error") }
}

#[cfg(test)]
mod tests {
    use super::{Amount, Denomination, COIN_VALUE};

    #[test]
    fn add_mul_div() {
        let sat = Amount::from_sat;

        assert_eq!(sat(15) + sat(15), sat(30));
        assert_eq!(Amount::ONE_COIN * 5000, sat(5000 * COIN_VALUE));
        assert_eq!(Amount::ONE_COIN / 10, sat(10_000_000));
        assert_eq!(Amount::from_coins(1500), sat(150_000_000_000));
        assert_eq!(sat(i64::max_value()).checked_add(sat(1)), None);
        assert_eq!(sat(1).checked_div(0), None);
    }

    #[test]
    fn display() {
        assert_eq!(Amount::from_coins(500).to_string(), "500.00000000 TURI");
        assert_eq!((Amount::ONE_COIN / 10).to_string(), "0.10000000 TURI");
        assert_eq!(Amount::from_sat(-1).to_string_in(Denomination::Turi), "-0.00000001");
        assert_eq!(Amount::from_sat(42).to_string_in(Denomination::Satoshi), "42");
        assert_eq!(format!("{:?}", Amount::ONE_SAT), "Amount(1 satoshi)");
    }
}
