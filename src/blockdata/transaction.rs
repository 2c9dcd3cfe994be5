// SPDX-License-Identifier: CC0-1.0

//! TuriCoin Transaction
//!
//! A transaction describes a transfer of money. It consumes previously-unspent
//! transaction outputs and produces new ones, satisfying the condition to spend
//! the old outputs (typically a digital signature with a specific key must be
//! provided) and defining the condition to spend the new ones.
//!
//! The genesis block carries a single coinbase transaction; these types
//! model exactly the legacy (non-witness) serialization that it hashes with.
//!

use std::io;

use hashes::Hash;

use crate::blockdata::script::Script;
use crate::consensus::encode::{self, sha256d_of, Encodable};
use crate::hash_types::Txid;
use crate::util::amount::Amount;

/// A reference to a transaction output
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutPoint {
    /// The referenced transaction's txid
    pub txid: Txid,
    /// The index of the referenced output in its transaction's vout
    pub vout: u32,
}

impl OutPoint {
    /// Creates a "null" `OutPoint`.
    ///
    /// This value is used for coinbase transactions because they don't have
    /// any previous outputs.
    #[inline]
    pub fn null() -> OutPoint { OutPoint { txid: Txid::all_zeros(), vout: u32::max_value() } }

    /// Checks if an `OutPoint` is "null".
    #[inline]
    pub fn is_null(&self) -> bool { *self == OutPoint::null() }
}

impl Default for OutPoint {
    fn default() -> Self { OutPoint::null() }
}

/// A transaction input, which defines old coins to be consumed
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TxIn {
    /// The reference to the previous output that is being used an an input
    pub previous_output: OutPoint,
    /// The script which pushes values on the stack which will cause
    /// the referenced output's script to accept
    pub script_sig: Script,
    /// The sequence number, which suggests to miners which of two
    /// conflicting transactions should be preferred, or 0xFFFFFFFF
    /// to ignore this feature. This is generally never used since
    /// the miner behaviour cannot be enforced.
    pub sequence: u32,
}

/// A transaction output, which defines new coins to be created from old ones.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TxOut {
    /// The value of the output
    pub value: Amount,
    /// The script which must satisfy for the output to be spent
    pub script_pubkey: Script,
}

/// A TuriCoin transaction, which describes an authenticated movement of coins.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transaction {
    /// The protocol version, is currently expected to be 1 or 2 (BIP 68).
    pub version: i32,
    /// Block number before which this transaction is valid, or 0 for
    /// valid immediately.
    pub lock_time: u32,
    /// List of inputs
    pub input: Vec<TxIn>,
    /// List of outputs
    pub output: Vec<TxOut>,
}

impl Transaction {
    /// Computes the txid. The genesis transaction carries no witness, so
    /// this is the double-SHA256 of its full serialization.
    pub fn txid(&self) -> Txid { Txid::from_raw_hash(sha256d_of(self)) }

    /// Is this a coin base transaction?
    pub fn is_coin_base(&self) -> bool {
        self.input.len() == 1 && self.input[0].previous_output.is_null()
    }
}

impl Encodable for OutPoint {
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, encode::Error> {
        let len = self.txid.consensus_encode(&mut s)?;
        Ok(len + self.vout.consensus_encode(s)?)
    }
}

impl Encodable for TxIn {
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, encode::Error> {
        let mut len = 0;
        len += self.previous_output.consensus_encode(&mut s)?;
        len += self.script_sig.consensus_encode(&mut s)?;
        len += self.sequence.consensus_encode(s)?;
        Ok(len)
    }
}

impl Encodable for TxOut {
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, encode::Error> {
        let mut len = 0;
        len += self.value.as_sat().consensus_encode(&mut s)?;
        len += self.script_pubkey.consensus_encode(s)?;
        Ok(len)
    }
}

impl Encodable for Transaction {
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, encode::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(&mut s)?;
        len += self.input.consensus_encode(&mut s)?;
        len += self.output.consensus_encode(&mut s)?;
        len += self.lock_time.consensus_encode(s)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::{OutPoint, Transaction, TxIn, TxOut};
    use crate::blockdata::script::Builder;
    use crate::consensus::encode::serialize;
    use crate::util::amount::Amount;

    #[test]
    fn null_outpoint() {
        let null = OutPoint::null();
        assert!(null.is_null());
        assert_eq!(null.vout, 0xFFFFFFFF);
        assert_eq!(serialize(&null)[32..], [0xffu8, 0xff, 0xff, 0xff]);
        assert_eq!(OutPoint::default(), null);
    }

    #[test]
    fn coinbase_detection() {
        let mut tx = Transaction {
            version: 1,
            lock_time: 0,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig: Builder::new().push_int(1).into_script(),
                sequence: 0xFFFFFFFF,
            }],
            output: vec![TxOut { value: Amount::from_sat(1), script_pubkey: Builder::new().into_script() }],
        };
        assert!(tx.is_coin_base());
        // version, 1 input (36 + 2 + 4), 1 output (8 + 1), locktime
        assert_eq!(serialize(&tx).len(), 4 + 1 + 42 + 1 + 9 + 4);

        tx.input[0].previous_output.vout = 0;
        assert!(!tx.is_coin_base());
    }
}
