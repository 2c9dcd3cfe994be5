// SPDX-License-Identifier: CC0-1.0

//! File defines types for hashes used throughout the library.
//!
//! These types are needed in order to avoid mixing data of the same hash
//! format (like SHA256d) but of different meaning (transaction id, block
//! hash, merkle root).
//!

use hashes::{hash_newtype, sha256d};

hash_newtype! {
    /// A TuriCoin transaction hash/transaction ID.
    pub struct Txid(sha256d::Hash);

    /// A TuriCoin block hash, as produced by the chain's proof-of-work algorithm.
    pub struct BlockHash(sha256d::Hash);

    /// A hash of the Merkle tree branch or root for transactions.
    pub struct TxMerkleNode(sha256d::Hash);
}

impl From<Txid> for TxMerkleNode {
    fn from(txid: Txid) -> Self { TxMerkleNode::from_raw_hash(txid.to_raw_hash()) }
}
