// SPDX-License-Identifier: CC0-1.0

//! Checkpoints
//!
//! Known-good block hashes at fixed heights, and the transaction count
//! snapshot used to estimate verification progress.
//!

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::hash_types::BlockHash;

/// A checkpoint list that is not strictly increasing in height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointError {
    /// Height of the preceding checkpoint.
    pub previous: u32,
    /// Height that does not exceed it.
    pub height: u32,
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "checkpoint at height {} does not follow height {}", self.height, self.previous)
    }
}

impl std::error::Error for CheckpointError {}

/// Ordered map from block height to the block hash expected there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Checkpoints(BTreeMap<u32, BlockHash>);

impl Checkpoints {
    /// No checkpoints.
    pub fn empty() -> Checkpoints { Checkpoints(BTreeMap::new()) }

    /// Builds the map from a list given in strictly increasing height order.
    pub fn new(list: &[(u32, BlockHash)]) -> Result<Checkpoints, CheckpointError> {
        let mut map = BTreeMap::new();
        let mut previous: Option<u32> = None;
        for &(height, hash) in list {
            if let Some(previous) = previous {
                if height <= previous {
                    return Err(CheckpointError { previous, height });
                }
            }
            map.insert(height, hash);
            previous = Some(height);
        }
        Ok(Checkpoints(map))
    }

    /// The hash expected at `height`, if it is a checkpoint.
    pub fn get(&self, height: u32) -> Option<&BlockHash> { self.0.get(&height) }

    /// Iterates over checkpoints in ascending height order.
    pub fn iter(&self) -> btree_map::Iter<'_, u32, BlockHash> { self.0.iter() }

    /// Height of the highest checkpoint.
    pub fn last_height(&self) -> Option<u32> { self.0.keys().next_back().copied() }

    /// Number of checkpoints.
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether there are no checkpoints.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Whether a block with `hash` at `height` agrees with the checkpoints.
    /// Heights without a checkpoint always agree.
    pub fn check(&self, height: u32, hash: &BlockHash) -> bool {
        self.get(height).map_or(true, |expected| expected == hash)
    }
}

impl<'a> IntoIterator for &'a Checkpoints {
    type Item = (&'a u32, &'a BlockHash);
    type IntoIter = btree_map::Iter<'a, u32, BlockHash>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Transaction count snapshot of a chain.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainTxData {
    /// UNIX timestamp of the last known number of transactions.
    pub time: i64,
    /// Total number of transactions between genesis and that timestamp.
    pub tx_count: u64,
    /// Estimated number of transactions per second after that timestamp.
    pub tx_rate: f64,
}

impl ChainTxData {
    /// Estimated total number of transactions at UNIX time `now`.
    pub fn estimate_tx_count(&self, now: i64) -> f64 {
        let elapsed = now.saturating_sub(self.time).max(0);
        self.tx_count as f64 + elapsed as f64 * self.tx_rate
    }
}
