// SPDX-License-Identifier: CC0-1.0

//! Consensus-encodable types
//!
//! This is basically a replacement of the `Encodable` trait which does
//! normalization of endianness etc., to ensure that the encoding matches
//! the network consensus encoding.
//!
//! Only encoding is provided: the genesis block is built in memory and
//! never read back from the wire by this library.
//!

use std::{fmt, io};

use hashes::{sha256d, Hash};

use crate::hash_types::{BlockHash, TxMerkleNode, Txid};

/// Encoding error
#[derive(Debug)]
pub enum Error {
    /// And I/O error
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e),
        }
    }
}

#[doc(hidden)]
impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self { Error::Io(error) }
}

/// Encode an object into a vector
pub fn serialize<T: Encodable + ?Sized>(data: &T) -> Vec<u8> {
    let mut encoder = Vec::new();
    let len = data.consensus_encode(&mut encoder).expect("in-memory writers don't error");
    debug_assert_eq!(len, encoder.len());
    encoder
}

/// Encode an object into a hex-encoded string
pub fn serialize_hex<T: Encodable + ?Sized>(data: &T) -> String {
    serialize(data).iter().map(|b| format!("{:02x}", b)).collect()
}

/// Data which can be encoded in a consensus-consistent way
pub trait Encodable {
    /// Encode an object with a well-defined format.
    /// Returns the number of bytes written on success.
    fn consensus_encode<S: io::Write>(&self, s: S) -> Result<usize, Error>;
}

/// A variable-length unsigned integer
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Gets the length of this VarInt when encoded.
    /// Returns 1 for 0..=0xFC, 3 for 0xFD..=(2^16-1), 5 for 0x10000..=(2^32-1),
    /// and 9 otherwise.
    #[inline]
    pub fn len(&self) -> usize {
        match self.0 {
            0..=0xFC => 1,
            0xFD..=0xFFFF => 3,
            0x10000..=0xFFFFFFFF => 5,
            _ => 9,
        }
    }
}

impl Encodable for VarInt {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, Error> {
        match self.0 {
            0..=0xFC => {
                (self.0 as u8).consensus_encode(s)?;
                Ok(1)
            }
            0xFD..=0xFFFF => {
                s.write_all(&[0xFD])?;
                (self.0 as u16).consensus_encode(s)?;
                Ok(3)
            }
            0x10000..=0xFFFFFFFF => {
                s.write_all(&[0xFE])?;
                (self.0 as u32).consensus_encode(s)?;
                Ok(5)
            }
            _ => {
                s.write_all(&[0xFF])?;
                self.0.consensus_encode(s)?;
                Ok(9)
            }
        }
    }
}

macro_rules! impl_int_encodable {
    ($ty:ident) => {
        impl Encodable for $ty {
            #[inline]
            fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, Error> {
                let bytes = self.to_le_bytes();
                s.write_all(&bytes)?;
                Ok(bytes.len())
            }
        }
    };
}

impl_int_encodable!(u8);
impl_int_encodable!(u16);
impl_int_encodable!(u32);
impl_int_encodable!(u64);
impl_int_encodable!(i32);
impl_int_encodable!(i64);

impl Encodable for [u8; 32] {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, Error> {
        s.write_all(&self[..])?;
        Ok(self.len())
    }
}

/// Length-prefixed byte strings, as used for scripts.
impl Encodable for [u8] {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, Error> {
        let vi_len = VarInt(self.len() as u64).consensus_encode(&mut s)?;
        s.write_all(self)?;
        Ok(vi_len + self.len())
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, Error> {
        let mut len = VarInt(self.len() as u64).consensus_encode(&mut s)?;
        for item in self.iter() {
            len += item.consensus_encode(&mut s)?;
        }
        Ok(len)
    }
}

macro_rules! impl_hash_encodable {
    ($hashtype:ident) => {
        impl Encodable for $hashtype {
            #[inline]
            fn consensus_encode<S: io::Write>(&self, s: S) -> Result<usize, Error> {
                self.to_byte_array().consensus_encode(s)
            }
        }
    };
}

impl_hash_encodable!(Txid);
impl_hash_encodable!(BlockHash);
impl_hash_encodable!(TxMerkleNode);

/// Double-SHA256 of the consensus encoding of `data`.
pub fn sha256d_of<T: Encodable + ?Sized>(data: &T) -> sha256d::Hash {
    let mut engine = sha256d::Hash::engine();
    data.consensus_encode(&mut engine).expect("engines don't error");
    sha256d::Hash::from_engine(engine)
}
