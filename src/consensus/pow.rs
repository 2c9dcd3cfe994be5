// SPDX-License-Identifier: CC0-1.0

//! Proof-of-work algorithm selection
//!
//! The chain started on X16R and switches to KAWPOW at a per-network
//! activation time. Neither hash function is implemented in this library:
//! nodes plug their implementation in through [`PowHasher`].
//!

use std::fmt;

use crate::blockdata::block::BlockHeader;
use crate::hash_types::BlockHash;
use crate::util::uint::{self, Uint256};

/// A proof-of-work hash algorithm used on the chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PowAlgorithm {
    /// X16R, used by the genesis block and all blocks before KAWPOW activation.
    X16r,
    /// KAWPOW, used from the activation time onward.
    Kawpow,
}

impl PowAlgorithm {
    /// Selects the algorithm for a block with the given header time.
    pub fn for_time(block_time: u32, kawpow_activation_time: u32) -> PowAlgorithm {
        if block_time >= kawpow_activation_time {
            PowAlgorithm::Kawpow
        } else {
            PowAlgorithm::X16r
        }
    }
}

impl fmt::Display for PowAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            PowAlgorithm::X16r => "x16r",
            PowAlgorithm::Kawpow => "kawpow",
        })
    }
}

/// Computes proof-of-work hashes of block headers.
///
/// Implemented for any `Fn(PowAlgorithm, &BlockHeader) -> BlockHash`, so a
/// closure or a plain function can be passed where a hasher is expected.
pub trait PowHasher {
    /// Hashes `header` with `algorithm`.
    fn pow_hash(&self, algorithm: PowAlgorithm, header: &BlockHeader) -> BlockHash;
}

impl<F> PowHasher for F
where
    F: Fn(PowAlgorithm, &BlockHeader) -> BlockHash,
{
    fn pow_hash(&self, algorithm: PowAlgorithm, header: &BlockHeader) -> BlockHash {
        self(algorithm, header)
    }
}

/// Checks that `hash`, read as a number, does not exceed the target
/// encoded by `bits`.
pub fn check_proof_of_work(hash: &BlockHash, bits: u32) -> Result<bool, uint::Error> {
    let target = Uint256::from_compact(bits)?;
    Ok(Uint256::from_block_hash(hash) <= target)
}
