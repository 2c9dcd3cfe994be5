// SPDX-License-Identifier: CC0-1.0

//! Blockdata constants
//!
//! This module provides various constants relating to the blockchain and
//! consensus code. In particular, it defines the genesis block and its
//! single transaction, and checks a constructed genesis block against the
//! hashes every node of the network agrees on.
//!

use std::fmt;
use std::str::FromStr;

use hashes::hex::FromHex;
use hashes::Hash;
use log::{debug, error};
use secp256k1::PublicKey;

use crate::blockdata::block::{Block, BlockHeader};
use crate::blockdata::script::{self, Script};
use crate::blockdata::transaction::{OutPoint, Transaction, TxIn, TxOut};
use crate::consensus::pow::{check_proof_of_work, PowAlgorithm, PowHasher};
use crate::hash_types::{BlockHash, TxMerkleNode};
use crate::network::constants::Network;
use crate::util::amount::Amount;
use crate::util::uint;

/// The maximum allowable sequence number
pub const MAX_SEQUENCE: u32 = 0xFFFFFFFF;

/// Launch message embedded in the coinbase of every network's genesis block.
pub const GENESIS_MESSAGE: &str = "TuriCoin 03/Nov/2024 A new era of decentralized digital currency begins";

/// Uncompressed public key the genesis reward is paid to.
const GENESIS_OUTPUT_KEY: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";

/// Merkle root of the genesis block. All networks share the coinbase, so
/// they share the merkle root.
pub const GENESIS_MERKLE_ROOT: &str = "4f23f0a5a92732dba008d89980f1711a6333c0865927e23a830d0553f9e07a5e";

/// Compact target of every genesis block.
pub const GENESIS_BITS: u32 = 0x207fffff;

/// Block version of every genesis block.
pub const GENESIS_VERSION: i32 = 4;

/// The fixed inputs a genesis block is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisInputs {
    /// Message pushed into the coinbase script.
    pub message: String,
    /// Script the reward is paid to.
    pub output_script: Script,
    /// Block time.
    pub time: u32,
    /// Block nonce.
    pub nonce: u32,
    /// Compact difficulty target.
    pub bits: u32,
    /// Block version.
    pub version: i32,
    /// Coinbase reward.
    pub reward: Amount,
}

impl GenesisInputs {
    /// The genesis inputs of `network`.
    pub fn for_network(network: Network) -> Result<GenesisInputs, GenesisError> {
        let time = match network {
            Network::Main => 1730678400, // Nov 4, 2024
            Network::Test => 1730678401,
            Network::Regtest => 1524179366,
        };
        Ok(GenesisInputs {
            message: GENESIS_MESSAGE.to_owned(),
            output_script: genesis_output_script()?,
            time,
            nonce: 1,
            bits: GENESIS_BITS,
            version: GENESIS_VERSION,
            reward: Amount::from_coins(5000),
        })
    }
}

/// The genesis block hash every node of `network` agrees on.
pub fn genesis_hash(network: Network) -> BlockHash {
    let hex = match network {
        Network::Main => "07473470b091eda188fe47dc9dbf6e8e25e417c924892c61f88a0332c70021e9",
        Network::Test => "388251282eea8eb09c9e5a3b82e455e60cf8b775a034908bc6e0ea2cf021a136",
        Network::Regtest => "0b2c703dc93bb63a36c4e33b85be4855ddbca2ac951a7a0a29b8de0408200a3c",
    };
    BlockHash::from_str(hex).expect("valid hard-coded genesis hash")
}

/// The genesis merkle root every node agrees on.
pub fn genesis_merkle_root() -> TxMerkleNode {
    TxMerkleNode::from_str(GENESIS_MERKLE_ROOT).expect("valid hard-coded merkle root")
}

/// Pay-to-pubkey script of the genesis reward.
pub fn genesis_output_script() -> Result<Script, GenesisError> {
    let bytes = Vec::<u8>::from_hex(GENESIS_OUTPUT_KEY).map_err(|_| GenesisError::OutputKey(None))?;
    let key = PublicKey::from_slice(&bytes).map_err(|e| GenesisError::OutputKey(Some(e)))?;
    Ok(Script::new_p2pk(&key))
}

/// Constructs the coinbase (and only) transaction of a genesis block.
pub fn genesis_tx(message: &[u8], output_script: &Script, reward: Amount) -> Transaction {
    // Base
    let mut ret = Transaction { version: 1, lock_time: 0, input: vec![], output: vec![] };

    // Inputs
    let in_script = script::Builder::new()
        .push_scriptint(0)
        .push_int(486604799)
        .push_scriptint(4)
        .push_slice(message)
        .into_script();
    ret.input.push(TxIn {
        previous_output: OutPoint::null(),
        script_sig: in_script,
        sequence: MAX_SEQUENCE,
    });

    // Outputs
    ret.output.push(TxOut { value: reward, script_pubkey: output_script.clone() });

    // end
    ret
}

/// Constructs a genesis block: a single coinbase transaction under a header
/// with a null previous block hash.
pub fn create_genesis_block(inputs: &GenesisInputs) -> Block {
    let txdata = vec![genesis_tx(inputs.message.as_bytes(), &inputs.output_script, inputs.reward)];
    let merkle_root = txdata[0].txid().into();

    Block {
        header: BlockHeader {
            version: inputs.version,
            prev_blockhash: BlockHash::all_zeros(),
            merkle_root,
            time: inputs.time,
            bits: inputs.bits,
            nonce: inputs.nonce,
        },
        txdata,
    }
}

/// A genesis block that does not match the network's hard-coded constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenesisError {
    /// The proof-of-work hash differs from the expected genesis hash.
    HashMismatch {
        /// Hard-coded hash.
        expected: BlockHash,
        /// Hash of the constructed block.
        found: BlockHash,
    },
    /// The merkle root differs from the expected genesis merkle root.
    MerkleRootMismatch {
        /// Hard-coded merkle root.
        expected: TxMerkleNode,
        /// Merkle root of the constructed block.
        found: TxMerkleNode,
    },
    /// The genesis hash is above the block's own target.
    InsufficientWork {
        /// The block hash.
        hash: BlockHash,
        /// Compact target of the block.
        bits: u32,
    },
    /// The block's compact target cannot be decoded.
    BadTarget(uint::Error),
    /// The genesis output key is not a valid public key.
    OutputKey(Option<secp256k1::Error>),
}

impl fmt::Display for GenesisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GenesisError::HashMismatch { ref expected, ref found } => {
                write!(f, "genesis hash {} does not match expected {}", found, expected)
            }
            GenesisError::MerkleRootMismatch { ref expected, ref found } => {
                write!(f, "genesis merkle root {} does not match expected {}", found, expected)
            }
            GenesisError::InsufficientWork { ref hash, bits } => {
                write!(f, "genesis hash {} does not meet target {:#010x}", hash, bits)
            }
            GenesisError::BadTarget(ref e) => write!(f, "genesis target: {}", e),
            GenesisError::OutputKey(Some(ref e)) => write!(f, "genesis output key: {}", e),
            GenesisError::OutputKey(None) => f.write_str("genesis output key is not hex"),
        }
    }
}

impl std::error::Error for GenesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            GenesisError::BadTarget(ref e) => Some(e),
            GenesisError::OutputKey(Some(ref e)) => Some(e),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<uint::Error> for GenesisError {
    fn from(e: uint::Error) -> GenesisError { GenesisError::BadTarget(e) }
}

/// Checks a constructed genesis block against the hard-coded hash and merkle
/// root. The block is hashed with X16R regardless of the KAWPOW activation
/// time. Returns the verified block hash.
pub fn verify_genesis<H: PowHasher + ?Sized>(
    block: &Block,
    expected_hash: &BlockHash,
    expected_merkle_root: &TxMerkleNode,
    hasher: &H,
) -> Result<BlockHash, GenesisError> {
    let hash = hasher.pow_hash(PowAlgorithm::X16r, &block.header);
    debug!("genesis block {} with merkle root {}", hash, block.header.merkle_root);

    if hash != *expected_hash {
        error!("genesis hash mismatch: expected {}, got {}", expected_hash, hash);
        return Err(GenesisError::HashMismatch { expected: *expected_hash, found: hash });
    }
    if block.header.merkle_root != *expected_merkle_root {
        error!(
            "genesis merkle root mismatch: expected {}, got {}",
            expected_merkle_root, block.header.merkle_root
        );
        return Err(GenesisError::MerkleRootMismatch {
            expected: *expected_merkle_root,
            found: block.header.merkle_root,
        });
    }
    if !check_proof_of_work(&hash, block.header.bits)? {
        return Err(GenesisError::InsufficientWork { hash, bits: block.header.bits });
    }
    Ok(hash)
}

/// Builds the genesis block of `network` and verifies it with `hasher`.
pub fn genesis_block<H: PowHasher + ?Sized>(
    network: Network,
    hasher: &H,
) -> Result<(Block, BlockHash), GenesisError> {
    let block = create_genesis_block(&GenesisInputs::for_network(network)?);
    let hash = verify_genesis(&block, &genesis_hash(network), &genesis_merkle_root(), hasher)?;
    Ok((block, hash))
}

#[cfg(test)]
mod test {
    use hashes::Hash;

    use super::{
        create_genesis_block, genesis_block, genesis_hash, genesis_merkle_root, genesis_output_script,
        genesis_tx, verify_genesis, GenesisError, GenesisInputs, GENESIS_MESSAGE, MAX_SEQUENCE,
    };
    use crate::blockdata::block::BlockHeader;
    use crate::consensus::encode::{serialize, serialize_hex};
    use crate::consensus::pow::PowAlgorithm;
    use crate::hash_types::BlockHash;
    use crate::network::constants::Network;
    use crate::test_helpers::genesis_hasher;
    use crate::util::amount::Amount;

    #[test]
    fn genesis_first_transaction() {
        let script = genesis_output_script().unwrap();
        let gen = genesis_tx(GENESIS_MESSAGE.as_bytes(), &script, Amount::from_coins(5000));

        assert_eq!(gen.version, 1);
        assert_eq!(gen.input.len(), 1);
        assert!(gen.input[0].previous_output.is_null());
        assert_eq!(gen.input[0].previous_output.vout, 0xFFFFFFFF);
        assert_eq!(
            serialize(&gen.input[0].script_sig),
            hex::decode("500004ffff001d01044754757269436f696e2030332f4e6f762f323032342041206e657720657261206f6620646563656e7472616c697a6564206469676974616c2063757272656e637920626567696e73").unwrap()
        );
        assert_eq!(gen.input[0].sequence, MAX_SEQUENCE);
        assert_eq!(gen.output.len(), 1);
        assert_eq!(
            serialize(&gen.output[0].script_pubkey),
            hex::decode("434104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac").unwrap()
        );
        assert_eq!(gen.output[0].value, Amount::from_sat(500_000_000_000));
        assert_eq!(gen.lock_time, 0);
        assert_eq!(serialize(&gen).len(), 207);

        assert_eq!(
            gen.txid().to_string(),
            "4f23f0a5a92732dba008d89980f1711a6333c0865927e23a830d0553f9e07a5e"
        );
    }

    #[test]
    fn main_genesis_full_block() {
        let gen = create_genesis_block(&GenesisInputs::for_network(Network::Main).unwrap());

        assert_eq!(gen.header.version, 4);
        assert_eq!(gen.header.prev_blockhash, BlockHash::all_zeros());
        assert_eq!(gen.header.merkle_root, genesis_merkle_root());
        assert!(gen.check_merkle_root());
        assert_eq!(gen.header.time, 1730678400);
        assert_eq!(gen.header.bits, 0x207fffff);
        assert_eq!(gen.header.nonce, 1);
        assert_eq!(
            serialize_hex(&gen.header),
            "0400000000000000000000000000000000000000000000000000000000000000000000005e7ae0f953050d833ae2275986c033631a71f18099d808a0db3227a9a5f0234f800e2867ffff7f2001000000"
        );
    }

    #[test]
    fn genesis_blocks_differ_by_time_only() {
        let main = create_genesis_block(&GenesisInputs::for_network(Network::Main).unwrap());
        let test = create_genesis_block(&GenesisInputs::for_network(Network::Test).unwrap());
        let regtest = create_genesis_block(&GenesisInputs::for_network(Network::Regtest).unwrap());

        assert_eq!(main.txdata, test.txdata);
        assert_eq!(main.header.merkle_root, regtest.header.merkle_root);
        assert_eq!(test.header.time, 1730678401);
        assert_eq!(regtest.header.time, 1524179366);
        assert_ne!(main.header.to_bytes()[..], test.header.to_bytes()[..]);
    }

    #[test]
    fn every_input_changes_the_block() {
        let base = GenesisInputs::for_network(Network::Main).unwrap();
        let base_block = create_genesis_block(&base);

        let changes: [(&str, fn(&mut GenesisInputs)); 5] = [
            ("time", |i: &mut GenesisInputs| i.time += 1),
            ("nonce", |i: &mut GenesisInputs| i.nonce += 1),
            ("bits", |i: &mut GenesisInputs| i.bits = 0x1d00ffff),
            ("version", |i: &mut GenesisInputs| i.version = 1),
            ("reward", |i: &mut GenesisInputs| i.reward = Amount::from_coins(4999)),
        ];
        for &(field, change) in changes.iter() {
            let mut inputs = base.clone();
            change(&mut inputs);
            let block = create_genesis_block(&inputs);
            assert_ne!(block.header.to_bytes()[..], base_block.header.to_bytes()[..], "{}", field);
            if field == "reward" {
                assert_ne!(block.header.merkle_root, base_block.header.merkle_root);
                assert_ne!(block.txdata, base_block.txdata);
            } else {
                assert_eq!(block.header.merkle_root, base_block.header.merkle_root, "{}", field);
            }
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let inputs = GenesisInputs::for_network(Network::Main).unwrap();
        let a = create_genesis_block(&inputs);
        let b = create_genesis_block(&inputs.clone());
        assert_eq!(a, b);
        assert_eq!(serialize(&a), serialize(&b));
    }

    #[test]
    fn verify_each_network() {
        let hasher = genesis_hasher();
        for network in [Network::Main, Network::Test, Network::Regtest].iter() {
            let (block, hash) = genesis_block(*network, &hasher).unwrap();
            assert_eq!(hash, genesis_hash(*network));
            assert_eq!(block.header.merkle_root, genesis_merkle_root());
        }
    }

    #[test]
    fn wrong_nonce_fails_hash_check() {
        let mut inputs = GenesisInputs::for_network(Network::Main).unwrap();
        inputs.nonce = 2;
        let block = create_genesis_block(&inputs);

        let result = verify_genesis(&block, &genesis_hash(Network::Main), &genesis_merkle_root(), &genesis_hasher());
        match result {
            Err(GenesisError::HashMismatch { expected, found }) => {
                assert_eq!(expected, genesis_hash(Network::Main));
                assert_ne!(found, expected);
            }
            other => panic!("unexpected result {:?}", other),
        }
        // the merkle root commits to the coinbase only
        assert_eq!(block.header.merkle_root, genesis_merkle_root());
    }

    #[test]
    fn wrong_message_fails_merkle_check() {
        let mut inputs = GenesisInputs::for_network(Network::Main).unwrap();
        inputs.message = "The Times 03/Jan/2018 Bitcoin is name of the game for new generation of firms".to_owned();
        let block = create_genesis_block(&inputs);
        assert_eq!(
            block.header.merkle_root.to_string(),
            "28ff00a867739a352523808d301f504bc4547699398d70faf2266a8bae5f3516"
        );

        let expected = genesis_hash(Network::Main);
        let always_expected = move |_: PowAlgorithm, _: &BlockHeader| expected;
        assert_eq!(
            verify_genesis(&block, &expected, &genesis_merkle_root(), &always_expected),
            Err(GenesisError::MerkleRootMismatch {
                expected: genesis_merkle_root(),
                found: block.header.merkle_root,
            })
        );
    }

    #[test]
    fn hash_above_target_is_rejected() {
        let block = create_genesis_block(&GenesisInputs::for_network(Network::Regtest).unwrap());
        let weak = BlockHash::from_byte_array([0xff; 32]);
        let hasher = move |_: PowAlgorithm, _: &BlockHeader| weak;
        assert_eq!(
            verify_genesis(&block, &weak, &genesis_merkle_root(), &hasher),
            Err(GenesisError::InsufficientWork { hash: weak, bits: 0x207fffff })
        );
    }
}
