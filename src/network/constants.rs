// SPDX-License-Identifier: CC0-1.0

//! Network constants
//!
//! This module provides the set of known networks and the magic bytes that
//! start every peer-to-peer message on each of them.
//!
//! # Example: encoding a network's magic bytes
//!
//! ```rust
//! use turicoin::network::constants::Network;
//! use turicoin::consensus::encode::serialize;
//!
//! let bytes = serialize(&Network::Main.magic());
//!
//! assert_eq!(&bytes[..], b"TURI");
//! ```

use std::{fmt, io};
use std::str::FromStr;

use crate::consensus::encode::{self, Encodable};

/// The network to act on
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Network {
    /// For production
    Main,
    /// Public test network
    Test,
    /// Local regression testing
    Regtest,
}

impl Network {
    /// All networks.
    pub const ALL: [Network; 3] = [Network::Main, Network::Test, Network::Regtest];

    /// The network's name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
        }
    }

    /// Return the network magic bytes, which are written at the start of
    /// every message
    ///
    /// # Examples
    ///
    /// ```rust
    /// use turicoin::network::constants::Network;
    ///
    /// assert_eq!(Network::Regtest.magic().to_bytes(), [0x54, 0x55, 0x52, 0x52]);
    /// ```
    pub fn magic(self) -> Magic {
        match self {
            Network::Main => Magic::MAIN,
            Network::Test => Magic::TEST,
            Network::Regtest => Magic::REGTEST,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.name()) }
}

/// An unknown network name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNetworkError(pub String);

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown network name: {}", self.0)
    }
}

impl std::error::Error for ParseNetworkError {}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Network::Main),
            "test" => Ok(Network::Test),
            "regtest" => Ok(Network::Regtest),
            _ => Err(ParseNetworkError(s.to_owned())),
        }
    }
}

/// Message start bytes of a network.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Magic([u8; 4]);

impl Magic {
    /// "TURI"
    pub const MAIN: Magic = Magic([0x54, 0x55, 0x52, 0x49]);
    /// "TURT"
    pub const TEST: Magic = Magic([0x54, 0x55, 0x52, 0x54]);
    /// "TURR"
    pub const REGTEST: Magic = Magic([0x54, 0x55, 0x52, 0x52]);

    /// Wraps raw message start bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Magic { Magic(bytes) }

    /// The bytes in wire order.
    pub const fn to_bytes(self) -> [u8; 4] { self.0 }

    /// The network using these bytes, if any.
    pub fn network(self) -> Option<Network> {
        Network::ALL.iter().copied().find(|n| n.magic() == self)
    }
}

impl fmt::Debug for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "Magic({:x})", self) }
}

impl fmt::LowerHex for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl Encodable for Magic {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, encode::Error> {
        s.write_all(&self.0)?;
        Ok(self.0.len())
    }
}
