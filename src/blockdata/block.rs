// SPDX-License-Identifier: CC0-1.0

//! TuriCoin blocks.
//!
//! A block is a bundle of transactions with a proof-of-work attached,
//! which commits to an earlier block to form the blockchain. This
//! module describes the structures needed to describe the genesis block
//! and compute its merkle root.
//!

use std::io;

use hashes::{sha256d, Hash, HashEngine};

use crate::blockdata::transaction::Transaction;
use crate::consensus::encode::{self, serialize, Encodable};
use crate::hash_types::{BlockHash, TxMerkleNode};

/// TuriCoin block header.
///
/// Contains all the block's information except the actual transactions, but
/// including a root of a merkle tree commiting to all transactions in the block.
///
/// This is the 80-byte legacy header hashed by X16R; headers mined with
/// KAWPOW extend it with height, 64-bit nonce and mix hash, which the
/// hashing collaborator owns.
#[derive(Copy, PartialEq, Eq, Clone, Debug, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockHeader {
    /// The protocol version. Should always be 1.
    pub version: i32,
    /// Reference to the previous block in the chain.
    pub prev_blockhash: BlockHash,
    /// The root hash of the merkle tree of transactions in the block.
    pub merkle_root: TxMerkleNode,
    /// The timestamp of the block, as claimed by the miner.
    pub time: u32,
    /// The target value below which the blockhash must lie, encoded as a
    /// a float (with well-defined rounding, of course).
    pub bits: u32,
    /// The nonce, selected to obtain a low enough blockhash.
    pub nonce: u32,
}

impl BlockHeader {
    /// The number of bytes that the block header contributes to the size of a block.
    pub const SIZE: usize = 4 + 32 + 32 + 4 + 4 + 4; // 80

    /// The serialized header, which is the pre-image of the proof-of-work hash.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes.copy_from_slice(&serialize(self));
        bytes
    }
}

impl Encodable for BlockHeader {
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, encode::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(&mut s)?;
        len += self.prev_blockhash.consensus_encode(&mut s)?;
        len += self.merkle_root.consensus_encode(&mut s)?;
        len += self.time.consensus_encode(&mut s)?;
        len += self.bits.consensus_encode(&mut s)?;
        len += self.nonce.consensus_encode(s)?;
        Ok(len)
    }
}

/// A TuriCoin block, which is a collection of transactions with an attached
/// proof of work.
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block {
    /// The block header
    pub header: BlockHeader,
    /// List of transactions contained in the block
    pub txdata: Vec<Transaction>,
}

impl Block {
    /// Computes the merkle root of the transactions in the block.
    ///
    /// Returns `None` for a block without transactions.
    pub fn compute_merkle_root(&self) -> Option<TxMerkleNode> {
        let hashes = self.txdata.iter().map(|tx| tx.txid().to_raw_hash());
        calculate_root(hashes).map(TxMerkleNode::from_raw_hash)
    }

    /// Checks if the merkle root of the header matches the merkle root of the
    /// transaction list.
    pub fn check_merkle_root(&self) -> bool {
        match self.compute_merkle_root() {
            Some(merkle_root) => self.header.merkle_root == merkle_root,
            None => false,
        }
    }
}

impl Encodable for Block {
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, encode::Error> {
        let len = self.header.consensus_encode(&mut s)?;
        Ok(len + self.txdata.consensus_encode(s)?)
    }
}

/// Calculates the merkle root of a list of hashes, duplicating the last
/// hash of a level with an odd number of entries.
pub fn calculate_root<I>(hashes: I) -> Option<sha256d::Hash>
where
    I: Iterator<Item = sha256d::Hash>,
{
    let mut level: Vec<sha256d::Hash> = hashes.collect();
    if level.is_empty() {
        return None;
    }
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            let last = level[level.len() - 1];
            level.push(last);
        }
        level = level
            .chunks(2)
            .map(|pair| {
                let mut engine = sha256d::Hash::engine();
                engine.input(pair[0].as_byte_array());
                engine.input(pair[1].as_byte_array());
                sha256d::Hash::from_engine(engine)
            })
            .collect();
    }
    Some(level[0])
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use hashes::{sha256d, Hash, HashEngine};

    use super::{calculate_root, BlockHeader};
    use crate::hash_types::{BlockHash, TxMerkleNode};

    #[test]
    fn header_size() {
        let header = BlockHeader {
            version: 4,
            prev_blockhash: BlockHash::all_zeros(),
            merkle_root: TxMerkleNode::all_zeros(),
            time: 1730678400,
            bits: 0x207fffff,
            nonce: 1,
        };
        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), 80);
        assert_eq!(&bytes[..4], &[4u8, 0, 0, 0]);
        assert_eq!(&bytes[68..], &[0x80u8, 0x0e, 0x28, 0x67, 0xff, 0xff, 0x7f, 0x20, 0x01, 0, 0, 0]);
    }

    #[test]
    fn merkle_root_levels() {
        assert_eq!(calculate_root(Vec::new().into_iter()), None);

        let a = sha256d::Hash::hash(b"a");
        let b = sha256d::Hash::hash(b"b");
        let c = sha256d::Hash::hash(b"c");
        assert_eq!(calculate_root(vec![a].into_iter()), Some(a));

        let pair = |x: sha256d::Hash, y: sha256d::Hash| {
            let mut engine = sha256d::Hash::engine();
            engine.input(x.as_byte_array());
            engine.input(y.as_byte_array());
            sha256d::Hash::from_engine(engine)
        };
        let ab = pair(a, b);
        assert_eq!(calculate_root(vec![a, b].into_iter()), Some(ab));
        let cc = pair(c, c);
        assert_eq!(calculate_root(vec![a, b, c].into_iter()), Some(pair(ab, cc)));
    }

    #[test]
    fn display_is_reversed() {
        let hash = TxMerkleNode::from_str("4f23f0a5a92732dba008d89980f1711a6333c0865927e23a830d0553f9e07a5e").unwrap();
        assert_eq!(hash.to_byte_array()[0], 0x5e);
        assert_eq!(hash.to_string(), "4f23f0a5a92732dba008d89980f1711a6333c0865927e23a830d0553f9e07a5e");
    }
}
