// SPDX-License-Identifier: CC0-1.0

//! Script
//!
//! Scripts define TuriCoin's digital signature scheme: a signature is formed
//! from a script (the second half of which is defined by a coin to be spent,
//! and the first half provided by the spending transaction), and is valid
//! iff the script leaves `TRUE` on the stack after being evaluated.
//!
//! This module only carries what the chain parameters need: a byte-level
//! script type and a builder that reproduces the node's push encodings,
//! so the genesis coinbase serializes byte-for-byte like the reference node.
//!

use std::{fmt, io};

use secp256k1::PublicKey;

use crate::consensus::encode::{self, Encodable};

/// Opcodes used by the genesis construction.
pub mod opcodes {
    /// Push an empty array onto the stack
    pub const OP_0: u8 = 0x00;
    /// Read the next byte as N; push the next N bytes as an array onto the stack
    pub const OP_PUSHDATA1: u8 = 0x4c;
    /// Read the next 2 bytes as N; push the next N bytes as an array onto the stack
    pub const OP_PUSHDATA2: u8 = 0x4d;
    /// Read the next 4 bytes as N; push the next N bytes as an array onto the stack
    pub const OP_PUSHDATA4: u8 = 0x4e;
    /// Push the array `0x81` onto the stack
    pub const OP_1NEGATE: u8 = 0x4f;
    /// Push the array `0x01` onto the stack
    pub const OP_1: u8 = 0x51;
    /// Pop a public key and signature and push 1 if the signature is valid
    pub const OP_CHECKSIG: u8 = 0xac;
}

/// A TuriCoin script
#[derive(Clone, Default, PartialOrd, Ord, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Script(Box<[u8]>);

impl Script {
    /// Creates a new empty script
    pub fn new() -> Script { Script(vec![].into_boxed_slice()) }

    /// Generates a P2PK-type script paying to an uncompressed public key,
    /// the form used by the genesis coinbase output
    pub fn new_p2pk(pubkey: &PublicKey) -> Script {
        Builder::new()
            .push_slice(&pubkey.serialize_uncompressed()[..])
            .push_opcode(opcodes::OP_CHECKSIG)
            .into_script()
    }

    /// The length in bytes of the script
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the script is the empty script
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns the script data
    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    /// Converts the script into a byte vector
    pub fn into_bytes(self) -> Vec<u8> { self.0.into_vec() }
}

impl From<Vec<u8>> for Script {
    fn from(v: Vec<u8>) -> Script { Script(v.into_boxed_slice()) }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Script(")?;
        fmt::LowerHex::fmt(self, f)?;
        f.write_str(")")
    }
}

impl fmt::LowerHex for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in self.0.iter() {
            write!(f, "{:02x}", ch)?;
        }
        Ok(())
    }
}

impl Encodable for Script {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, s: S) -> Result<usize, encode::Error> {
        self.0[..].consensus_encode(s)
    }
}

/// Helper to encode an integer in script format, matching the node's
/// `CScriptNum` serialization: minimal little-endian magnitude with the sign
/// in the top bit of the last byte. Zero encodes as the empty array.
pub fn build_scriptint(n: i64) -> Vec<u8> {
    if n == 0 {
        return vec![];
    }

    let neg = n < 0;

    let mut abs = n.unsigned_abs();
    let mut v = vec![];
    while abs > 0xFF {
        v.push((abs & 0xFF) as u8);
        abs >>= 8;
    }
    // If the number's value causes the sign bit to be set, we need an extra
    // byte to get the correct value and correct sign bit
    if abs & 0x80 != 0 {
        v.push(abs as u8);
        v.push(if neg { 0x80u8 } else { 0u8 });
    }
    // Otherwise we just set the sign bit ourselves
    else {
        abs |= if neg { 0x80 } else { 0 };
        v.push(abs as u8);
    }
    v
}

/// An object which can be used to construct a script piece by piece
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Builder(Vec<u8>);

impl Builder {
    /// Creates a new empty script
    pub fn new() -> Self { Builder(vec![]) }

    /// The length in bytes of the script
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the script is the empty script
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Adds instructions to push an integer onto the stack, using the
    /// single-byte opcodes for -1 and 1..=16 and `OP_0` for zero.
    pub fn push_int(self, data: i64) -> Builder {
        if data == -1 {
            self.push_opcode(opcodes::OP_1NEGATE)
        } else if data == 0 {
            self.push_opcode(opcodes::OP_0)
        } else if (1..=16).contains(&data) {
            self.push_opcode(opcodes::OP_1 + (data - 1) as u8)
        } else {
            self.push_scriptint(data)
        }
    }

    /// Adds instructions to push an integer onto the stack as a script
    /// number, without using the small-integer opcodes.
    pub fn push_scriptint(self, data: i64) -> Builder {
        self.push_slice(&build_scriptint(data))
    }

    /// Adds instructions to push some arbitrary data onto the stack
    pub fn push_slice(mut self, data: &[u8]) -> Builder {
        let n = data.len();
        match n {
            n if n < opcodes::OP_PUSHDATA1 as usize => {
                self.0.push(n as u8);
            }
            n if n < 0x100 => {
                self.0.push(opcodes::OP_PUSHDATA1);
                self.0.push(n as u8);
            }
            n if n < 0x10000 => {
                self.0.push(opcodes::OP_PUSHDATA2);
                self.0.extend_from_slice(&(n as u16).to_le_bytes());
            }
            n if n < 0x100000000 => {
                self.0.push(opcodes::OP_PUSHDATA4);
                self.0.extend_from_slice(&(n as u32).to_le_bytes());
            }
            _ => panic!("tried to put a 4bn+ sized object into a script!"),
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Adds a single opcode to the script
    pub fn push_opcode(mut self, data: u8) -> Builder {
        self.0.push(data);
        self
    }

    /// Converts the `Builder` into an unmodifiable `Script`
    pub fn into_script(self) -> Script { Script(self.0.into_boxed_slice()) }
}

impl From<Vec<u8>> for Builder {
    fn from(v: Vec<u8>) -> Builder { Builder(v) }
}

#[cfg(test)]
mod tests {
    use super::{build_scriptint, opcodes, Builder, Script};
    use crate::consensus::encode::serialize;

    #[test]
    fn scriptint_test() {
        assert_eq!(build_scriptint(0), Vec::<u8>::new());
        assert_eq!(build_scriptint(4), vec![4u8]);
        assert_eq!(build_scriptint(-1), vec![0x81u8]);
        assert_eq!(build_scriptint(127), vec![127u8]);
        assert_eq!(build_scriptint(128), vec![128u8, 0]);
        assert_eq!(build_scriptint(-128), vec![128u8, 0x80]);
        assert_eq!(build_scriptint(486604799), vec![0xffu8, 0xff, 0x00, 0x1d]);
    }

    #[test]
    fn script_builder() {
        // small ints
        let script = Builder::new().push_int(1).push_int(0).into_script();
        assert_eq!(script.as_bytes(), &[opcodes::OP_1, opcodes::OP_0]);
        let script = Builder::new().push_int(4).push_int(-1).push_int(17).into_script();
        assert_eq!(script.as_bytes(), &[0x54u8, opcodes::OP_1NEGATE, 0x01, 0x11]);

        // script numbers are always pushed as data
        let script = Builder::new().push_scriptint(0).push_scriptint(4).into_script();
        assert_eq!(script.as_bytes(), &[0x00u8, 0x01, 0x04]);

        // data
        let script = Builder::new().push_slice(&[0u8; 75]).into_script();
        assert_eq!(script.len(), 76);
        let script = Builder::new().push_slice(&[0u8; 76]).into_script();
        assert_eq!(&script.as_bytes()[..2], &[opcodes::OP_PUSHDATA1, 76]);
        let script = Builder::new().push_slice(&[0u8; 256]).into_script();
        assert_eq!(&script.as_bytes()[..3], &[opcodes::OP_PUSHDATA2, 0x00, 0x01]);
    }

    #[test]
    fn script_serialize() {
        let script = Builder::new().push_opcode(opcodes::OP_CHECKSIG).into_script();
        assert_eq!(serialize(&script), vec![0x01u8, 0xac]);
        assert_eq!(serialize(&Script::new()), vec![0x00u8]);
        assert_eq!(format!("{:?}", script), "Script(ac)");
    }
}
