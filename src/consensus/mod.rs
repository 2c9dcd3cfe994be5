// SPDX-License-Identifier: CC0-1.0

//! Consensus
//!
//! This module defines structures, functions, and traits which are needed to
//! conform to TuriCoin consensus: the encoding the genesis block is hashed
//! with, the per-network consensus parameters and version-bits table, the
//! proof-of-work algorithm selection, burn policy and legacy rule switches.
//!

pub mod burn;
pub mod encode;
pub mod params;
pub mod pow;
pub mod rules;

pub use self::encode::{serialize, Encodable};
pub use self::params::Params;
