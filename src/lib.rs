// SPDX-License-Identifier: CC0-1.0

//! # TuriCoin chain parameters
//!
//! This library defines the consensus rules and network constants of the
//! TuriCoin main, test and regtest chains: proof-of-work limits, version-bits
//! deployments, checkpoints, burn policy, address prefixes and the genesis
//! block of each network.
//!
//! A [`ChainParams`] value is built once per network and is immutable
//! afterwards. Building one constructs the genesis block and checks it
//! against the hard-coded genesis hash and merkle root, so a node with
//! inconsistent constants refuses to start instead of following the wrong
//! chain.
//!
//! The proof-of-work hash function is not implemented here; callers supply
//! it through the [`PowHasher`] trait.
//!
//! ```rust,no_run
//! use turicoin::{BlockHash, BlockHeader, ChainParams, Network, PowAlgorithm};
//!
//! fn x16r(_algo: PowAlgorithm, _header: &BlockHeader) -> BlockHash {
//!     unimplemented!("provided by the node's hashing crate")
//! }
//!
//! let params = ChainParams::new(Network::Main, &x16r).expect("consistent genesis");
//! assert_eq!(params.default_port, 8777);
//! ```

// Coding conventions
#![forbid(unsafe_code)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(missing_docs)]

// Re-exported dependencies.
pub extern crate bitcoin_hashes as hashes;
pub extern crate secp256k1;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

#[cfg(test)]
mod test_helpers;

pub mod blockdata;
pub mod consensus;
pub mod hash_types;
pub mod network;
pub mod util;

pub use crate::blockdata::block::{Block, BlockHeader};
pub use crate::blockdata::constants::GenesisInputs;
pub use crate::blockdata::script::Script;
pub use crate::blockdata::transaction::{OutPoint, Transaction, TxIn, TxOut};
pub use crate::consensus::burn::{BurnKind, BurnPolicy};
pub use crate::consensus::params::{Deployment, DeploymentInfo, DeploymentPos, Params};
pub use crate::consensus::pow::{PowAlgorithm, PowHasher};
pub use crate::consensus::rules::{LegacyRule, RuleOverrides};
pub use crate::hash_types::*;
pub use crate::network::constants::{Magic, Network};
pub use crate::network::params::ChainParams;
pub use crate::util::amount::Amount;
pub use crate::util::checkpoints::{ChainTxData, Checkpoints};
pub use crate::util::uint::Uint256;
pub use crate::util::Error;
