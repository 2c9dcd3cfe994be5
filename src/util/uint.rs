// SPDX-License-Identifier: CC0-1.0

//! Big unsigned integer types
//!
//! Implementation of the 256-bit unsigned integer used for proof-of-work
//! limits, compact difficulty targets and cumulative chain work.
//!

use std::{fmt, str::FromStr};

use hashes::Hash;
use rug::integer::Order;
use rug::Integer;

use crate::hash_types::BlockHash;

/// Error returned when parsing or decoding a [Uint256] fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The string is not a hexadecimal number.
    InvalidHex(String),
    /// The value does not fit in 256 bits.
    Overflow,
    /// A compact target had its sign bit set.
    NegativeCompact(u32),
    /// A compact target expands beyond 256 bits.
    CompactOverflow(u32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidHex(ref s) => write!(f, "invalid hex number: {}", s),
            Error::Overflow => f.write_str("value exceeds 256 bits"),
            Error::NegativeCompact(bits) => write!(f, "compact target {:#010x} is negative", bits),
            Error::CompactOverflow(bits) => write!(f, "compact target {:#010x} overflows 256 bits", bits),
        }
    }
}

impl std::error::Error for Error {}

/// A 256-bit unsigned integer.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uint256(Integer);

impl Uint256 {
    /// Number of bits in the type.
    pub const BITS: u32 = 256;

    /// Zero.
    pub fn zero() -> Uint256 { Uint256(Integer::new()) }

    /// Parses a big-endian hexadecimal string, with or without a `0x`
    /// prefix. Shorter strings are zero-extended.
    pub fn from_hex(s: &str) -> Result<Uint256, Error> {
        let digits = s.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);
        let value = Integer::from_str_radix(digits, 16)
            .map_err(|_| Error::InvalidHex(s.to_owned()))?;
        if value < 0 {
            return Err(Error::InvalidHex(s.to_owned()));
        }
        Uint256::from_integer(value)
    }

    /// Interprets the bytes of a block hash as a little-endian number,
    /// the way proof-of-work compares a hash against its target.
    pub fn from_block_hash(hash: &BlockHash) -> Uint256 {
        Uint256(Integer::from_digits(&hash.to_byte_array()[..], Order::Lsf))
    }

    /// Expands a compact ("nBits") difficulty encoding into a full target.
    ///
    /// The top byte is the size in bytes of the number, the low 23 bits the
    /// mantissa and bit 23 the sign.
    pub fn from_compact(bits: u32) -> Result<Uint256, Error> {
        let size = bits >> 24;
        let word = bits & 0x007f_ffff;

        let value = if size <= 3 {
            Integer::from(word >> (8 * (3 - size)))
        } else {
            Integer::from(word) << (8 * (size - 3))
        };

        if word != 0 && bits & 0x0080_0000 != 0 {
            return Err(Error::NegativeCompact(bits));
        }
        if word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32)) {
            return Err(Error::CompactOverflow(bits));
        }
        Uint256::from_integer(value)
    }

    /// Encodes the number in the compact ("nBits") representation. Precision
    /// beyond the 23-bit mantissa is truncated.
    pub fn to_compact(&self) -> u32 {
        let mut size = (self.0.significant_bits() + 7) / 8;
        let mut compact = if size <= 3 {
            (self.0.to_u32_wrapping()) << (8 * (3 - size))
        } else {
            Integer::from(&self.0 >> (8 * (size - 3))).to_u32_wrapping()
        };
        // The 0x00800000 bit denotes the sign, so if it is already set,
        // divide the mantissa by 256 and increase the exponent.
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }
        compact | (size << 24)
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool { self.0 == 0 }

    /// The number of bits needed to represent the value.
    pub fn bits(&self) -> u32 { self.0.significant_bits() }

    /// Borrows the underlying arbitrary precision integer.
    pub fn as_integer(&self) -> &Integer { &self.0 }

    fn from_integer(value: Integer) -> Result<Uint256, Error> {
        if value.significant_bits() > Self::BITS {
            return Err(Error::Overflow);
        }
        Ok(Uint256(value))
    }
}

impl FromStr for Uint256 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Uint256::from_hex(s) }
}

impl fmt::LowerHex for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let digits = self.0.to_string_radix(16);
        for _ in digits.len()..64 {
            f.write_str("0")?;
        }
        f.write_str(&digits)
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::LowerHex::fmt(self, f) }
}

impl fmt::Debug for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "Uint256(0x{:x})", self) }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Error, Uint256};
    use crate::hash_types::BlockHash;

    #[test]
    fn hex_roundtrip() {
        let limit = Uint256::from_hex("00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff").unwrap();
        assert_eq!(limit.bits(), 236);
        assert_eq!(
            limit.to_string(),
            "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        );

        let zero = Uint256::from_hex("0x00").unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, Uint256::zero());

        assert!(Uint256::from_hex("xyz").is_err());
        assert_eq!(Uint256::from_hex("-1"), Err(Error::InvalidHex("-1".to_owned())));
        assert_eq!(
            Uint256::from_hex("1ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn compact_target() {
        let target = Uint256::from_compact(0x207fffff).unwrap();
        assert_eq!(
            target.to_string(),
            "7fffff0000000000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(target.to_compact(), 0x207fffff);

        let target = Uint256::from_compact(0x1d00ffff).unwrap();
        assert_eq!(
            target.to_string(),
            "00000000ffff0000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(target.to_compact(), 0x1d00ffff);

        assert_eq!(Uint256::from_compact(0x01123456).unwrap(), Uint256::from_hex("12").unwrap());
        assert_eq!(Uint256::from_compact(0x04923456), Err(Error::NegativeCompact(0x04923456)));
        assert_eq!(Uint256::from_compact(0xff123456), Err(Error::CompactOverflow(0xff123456)));
        // a 23-bit mantissa with the sign bit set moves to the next exponent
        assert_eq!(Uint256::from_hex("80").unwrap().to_compact(), 0x02008000);
    }

    #[test]
    fn block_hash_as_number() {
        let hash = BlockHash::from_str("07473470b091eda188fe47dc9dbf6e8e25e417c924892c61f88a0332c70021e9").unwrap();
        let value = Uint256::from_block_hash(&hash);
        assert_eq!(value, Uint256::from_hex("07473470b091eda188fe47dc9dbf6e8e25e417c924892c61f88a0332c70021e9").unwrap());
        assert!(value < Uint256::from_compact(0x207fffff).unwrap());
    }
}
