// SPDX-License-Identifier: CC0-1.0

//! Internal helper functions for unit tests
//!
//! X16R is not available in this crate, so tests stand in a hasher that
//! knows the published genesis hashes and falls back to sha256d.

use hashes::Hash;

use crate::blockdata::block::BlockHeader;
use crate::blockdata::constants::{create_genesis_block, genesis_hash, GenesisInputs};
use crate::consensus::pow::PowAlgorithm;
use crate::hash_types::BlockHash;
use crate::network::constants::Network;

/// Double-SHA256 of the serialized header.
pub fn sha256d_hasher(_algorithm: PowAlgorithm, header: &BlockHeader) -> BlockHash {
    BlockHash::hash(&header.to_bytes())
}

/// Returns the published X16R hash for the exact genesis header of each
/// network, and the sha256d of the header for anything else.
pub fn genesis_hasher() -> impl Fn(PowAlgorithm, &BlockHeader) -> BlockHash {
    let known: Vec<([u8; BlockHeader::SIZE], BlockHash)> = Network::ALL
        .iter()
        .map(|network| {
            let inputs = GenesisInputs::for_network(*network).unwrap();
            (create_genesis_block(&inputs).header.to_bytes(), genesis_hash(*network))
        })
        .collect();

    move |algorithm: PowAlgorithm, header: &BlockHeader| {
        let bytes = header.to_bytes();
        match known.iter().find(|(h, _)| h[..] == bytes[..]) {
            Some((_, hash)) if algorithm == PowAlgorithm::X16r => *hash,
            _ => sha256d_hasher(algorithm, header),
        }
    }
}
