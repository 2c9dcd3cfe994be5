// SPDX-License-Identifier: CC0-1.0

//! Network profiles
//!
//! A [`ChainParams`] value aggregates everything a node needs to know about
//! one network: consensus parameters, wire magic and port, address version
//! bytes, checkpoints, burn policy, feature activation points and the
//! verified genesis block.
//!
//! Each network has one constructor. Construction builds the genesis block,
//! verifies it against the hard-coded hashes and validates the deployment
//! table and checkpoint list; any inconsistency is returned as an error.
//!

use std::str::FromStr;

use log::{debug, warn};

use crate::blockdata::block::Block;
use crate::blockdata::constants::genesis_block;
use crate::consensus::burn::{BurnKind, BurnPolicy};
use crate::consensus::params::{DeploymentError, DeploymentPos, Params, VersionBitsParameters};
use crate::consensus::pow::{PowAlgorithm, PowHasher};
use crate::hash_types::BlockHash;
use crate::network::constants::{Magic, Network};
use crate::util::checkpoints::{ChainTxData, Checkpoints};
use crate::util::uint::Uint256;
use crate::util::Error;

/// Version bytes of the base58 encodings used by wallets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Base58Prefixes {
    /// Pay-to-pubkey-hash address.
    pub pubkey_hash: u8,
    /// Pay-to-script-hash address.
    pub script_hash: u8,
    /// Private key export (WIF).
    pub secret_key: u8,
    /// BIP32 extended public key.
    pub ext_public_key: [u8; 4],
    /// BIP32 extended private key.
    pub ext_secret_key: [u8; 4],
}

/// A compiled-in fallback peer address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeedSpec {
    /// IPv6 or IPv4-mapped address.
    pub addr: [u8; 16],
    /// Port.
    pub port: u16,
}

/// Limits on how deep a reorganisation the node accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReorgPolicy {
    /// Deepest reorganisation accepted, in blocks.
    pub max_depth: u32,
    /// Peers required before the depth limit applies.
    pub min_peers: u32,
    /// Seconds after startup before the depth limit applies.
    pub min_age: u32,
}

/// Default node behaviour of a network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodePolicy {
    /// Whether expensive internal consistency checks run by default.
    pub default_consistency_checks: bool,
    /// Whether only standard transactions are relayed.
    pub require_standard: bool,
    /// Whether blocks are mined on request only.
    pub mine_blocks_on_demand: bool,
    /// Whether mining requires connected peers.
    pub mining_requires_peers: bool,
}

/// The complete parameter set of one network.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainParams {
    /// Network these parameters describe.
    pub network: Network,
    /// Consensus parameters.
    pub consensus: Params,
    /// Message start bytes.
    pub magic: Magic,
    /// Default P2P listening port.
    pub default_port: u16,
    /// Height below which block files are never pruned.
    pub prune_after_height: u64,
    /// Base58 version bytes.
    pub base58_prefixes: Base58Prefixes,
    /// BIP44 coin type.
    pub ext_coin_type: u32,
    /// DNS seed host names.
    pub dns_seeds: Vec<String>,
    /// Compiled-in fallback peers.
    pub fixed_seeds: Vec<SeedSpec>,
    /// Known-good block hashes.
    pub checkpoints: Checkpoints,
    /// Transaction count snapshot for progress estimation.
    pub chain_tx_data: ChainTxData,
    /// Asset burn amounts and addresses.
    pub burn_policy: BurnPolicy,
    /// Height from which assets are enabled.
    pub asset_activation_height: u32,
    /// Height from which messaging is enabled.
    pub messaging_activation_height: u32,
    /// Height from which restricted assets are enabled.
    pub restricted_activation_height: u32,
    /// Block time from which KAWPOW replaces X16R.
    pub kawpow_activation_time: u32,
    /// Height from which Dark Gravity Wave difficulty adjustment applies.
    pub dgw_activation_height: u32,
    /// Reorganisation limits.
    pub reorg: ReorgPolicy,
    /// Default node behaviour.
    pub policy: NodePolicy,
    /// The verified genesis block.
    pub genesis: Block,
}

impl ChainParams {
    /// Builds and verifies the parameters of `network`. `hasher` computes
    /// the X16R hash the genesis block is checked with.
    pub fn new<H: PowHasher + ?Sized>(network: Network, hasher: &H) -> Result<ChainParams, Error> {
        match network {
            Network::Main => ChainParams::main(hasher),
            Network::Test => ChainParams::testnet(hasher),
            Network::Regtest => ChainParams::regtest(hasher),
        }
    }

    /// Main network parameters.
    pub fn main<H: PowHasher + ?Sized>(hasher: &H) -> Result<ChainParams, Error> {
        let (consensus, genesis) = consensus_and_genesis(Network::Main, hasher)?;
        Ok(ChainParams {
            network: Network::Main,
            consensus,
            magic: Magic::MAIN,
            default_port: 8777,
            prune_after_height: 100000,
            base58_prefixes: Base58Prefixes {
                pubkey_hash: 65,
                script_hash: 127,
                secret_key: 193,
                ext_public_key: [0x04, 0x88, 0xB2, 0x1E],
                ext_secret_key: [0x04, 0x88, 0xAD, 0xE4],
            },
            ext_coin_type: 777,
            dns_seeds: vec![],
            fixed_seeds: vec![],
            checkpoints: Checkpoints::empty(),
            chain_tx_data: ChainTxData { time: 1730678400, tx_count: 1, tx_rate: 0.0 },
            burn_policy: BurnPolicy::new(
                |kind| match kind {
                    BurnKind::IssueAsset => "TWKF47cLFGhv4vPh2Q74fiUNBoaAz2S4me",
                    BurnKind::ReissueAsset => "TWCdUU7tsXSk93RTMHcRqx298Kp8Zu4Scf",
                    BurnKind::IssueSubAsset => "TQCxLsfs5i4ZTKXn5Pyq7Uwa9xVKcbQd1B",
                    BurnKind::IssueUniqueAsset => "TMTAAFtKBtznvpyGpQjaymgUYu4Mqa2mHi",
                    BurnKind::IssueMsgChannelAsset => "TExmNmtmzpHHTNvREeSB8kF298uz4g6AA8",
                    BurnKind::IssueQualifierAsset => "TQzsy8y8pECMbRTG1sDQ4MEMX9G9qqtTWb",
                    BurnKind::IssueSubQualifierAsset => "TM1s1wWUBQe6S7MzbY5YhSYEwcgNXw6hhN",
                    BurnKind::IssueRestrictedAsset => "TNcZxyeLTyzvLhhVHZwS3BZ1oj5vHvDj33",
                    BurnKind::AddNullQualifierTag => "TK6YsGLcF4eF7NoiQVZB4981tJzSd5SRpT",
                },
                "TBVnkrrjdpNyVZueU1s7HA8mQsqmJge4af",
            ),
            asset_activation_height: 1000,
            messaging_activation_height: 2000,
            restricted_activation_height: 2000,
            kawpow_activation_time: 1730678400,
            dgw_activation_height: 338778,
            reorg: ReorgPolicy { max_depth: 144, min_peers: 4, min_age: 60 * 60 * 12 },
            policy: NodePolicy {
                default_consistency_checks: false,
                require_standard: true,
                mine_blocks_on_demand: false,
                mining_requires_peers: true,
            },
            genesis,
        })
    }

    /// Test network parameters.
    pub fn testnet<H: PowHasher + ?Sized>(hasher: &H) -> Result<ChainParams, Error> {
        let (consensus, genesis) = consensus_and_genesis(Network::Test, hasher)?;
        let checkpoints = Checkpoints::new(&[
            (225, hash("000003465e3e0167322eb8269ce91246bbc211e293bc5fbf6f0a0d12c1ccb363")),
            (223408, hash("000000012a0c09dd6456ab19018cc458648dec762b04f4ddf8ef8108eae69db9")),
            (232980, hash("000000007b16ae547fce76c3308dbeec2090cde75de74ab5dfcd6f60d13f089b")),
            (257610, hash("000000006272208605c4df3b54d4d5515759105e7ffcb258e8cd8077924ffef1")),
        ])?;
        Ok(ChainParams {
            network: Network::Test,
            consensus,
            magic: Magic::TEST,
            default_port: 18777,
            prune_after_height: 1000,
            base58_prefixes: TEST_PREFIXES,
            ext_coin_type: 1,
            dns_seeds: vec![],
            fixed_seeds: vec![],
            checkpoints,
            chain_tx_data: ChainTxData { time: 1543633332, tx_count: 146666, tx_rate: 0.02 },
            burn_policy: BurnPolicy::new(
                |kind| match kind {
                    BurnKind::IssueAsset => "n1rzM7Kaua2Dgrog9hRiyUzZ91RZiStiUT",
                    BurnKind::ReissueAsset => "n1kNmTq9Xpm3kyqSUaw69iYL5XfXKQrv7q",
                    BurnKind::IssueSubAsset => "mukhdsP7k1Ns5FwmChJVRFTm7ALiLASpdo",
                    BurnKind::IssueUniqueAsset => "mrzuTFbZrCK6YmPFwi4FHYCfW6ukYZFEyz",
                    BurnKind::IssueMsgChannelAsset => "mkWWfmc2f7bb5KLQMwkqSWmD6LmNjHDB35",
                    BurnKind::IssueQualifierAsset => "mvYdG8gPUXWfDMsF9AY4N7kYUM7YXwSL7S",
                    BurnKind::IssueSubQualifierAsset => "mrZcJwDiqhxQ43myiqQD1D4RtpXmFX9FjS",
                    BurnKind::IssueRestrictedAsset => "mtAKFyMb8HKDxe7UQsG6Lx5CkvwJuaoCc3",
                    BurnKind::AddNullQualifierTag => "mpeJAG3ruMxYjKDhXnsqMueCqWqqHd1Sz5",
                },
                "mh3Y3rZzJ7hH7WKdbKBmavexN5h9x71Z9d",
            ),
            asset_activation_height: 6048,
            messaging_activation_height: 10080,
            restricted_activation_height: 10080,
            kawpow_activation_time: 1585159200,
            dgw_activation_height: 1,
            reorg: ReorgPolicy { max_depth: 150, min_peers: 4, min_age: 60 * 60 * 12 },
            policy: NodePolicy {
                default_consistency_checks: false,
                require_standard: false,
                mine_blocks_on_demand: false,
                mining_requires_peers: true,
            },
            genesis,
        })
    }

    /// Regression test network parameters.
    pub fn regtest<H: PowHasher + ?Sized>(hasher: &H) -> Result<ChainParams, Error> {
        let (consensus, genesis) = consensus_and_genesis(Network::Regtest, hasher)?;
        Ok(ChainParams {
            network: Network::Regtest,
            consensus,
            magic: Magic::REGTEST,
            default_port: 18777,
            prune_after_height: 1000,
            base58_prefixes: TEST_PREFIXES,
            ext_coin_type: 1,
            dns_seeds: vec![],
            fixed_seeds: vec![],
            checkpoints: Checkpoints::empty(),
            chain_tx_data: ChainTxData::default(),
            burn_policy: BurnPolicy::new(
                |kind| match kind {
                    BurnKind::IssueAsset => "n1issueAssetXXXXXXXXXXXXXXXXWdnemQ",
                    BurnKind::ReissueAsset => "n1ReissueAssetXXXXXXXXXXXXXXWG9NLd",
                    BurnKind::IssueSubAsset => "n1issueSubAssetXXXXXXXXXXXXXbNiH6v",
                    BurnKind::IssueUniqueAsset => "n1issueUniqueAssetXXXXXXXXXXS4695i",
                    BurnKind::IssueMsgChannelAsset => "n1issueMsgChanneLAssetXXXXXXT2PBdD",
                    BurnKind::IssueQualifierAsset => "n1issueQuaLifierXXXXXXXXXXXXUysLTj",
                    BurnKind::IssueSubQualifierAsset => "n1issueSubQuaLifierXXXXXXXXXYffPLh",
                    BurnKind::IssueRestrictedAsset => "n1issueRestrictedXXXXXXXXXXXXZVT9V",
                    BurnKind::AddNullQualifierTag => "n1addTagBurnXXXXXXXXXXXXXXXXX5oLMH",
                },
                "n1BurnXXXXXXXXXXXXXXXXXXXXXXU1qejP",
            ),
            asset_activation_height: 0,
            messaging_activation_height: 0,
            restricted_activation_height: 0,
            kawpow_activation_time: 3582830167,
            dgw_activation_height: 200,
            reorg: ReorgPolicy { max_depth: 60, min_peers: 4, min_age: 60 * 60 * 12 },
            policy: NodePolicy {
                default_consistency_checks: true,
                require_standard: false,
                mine_blocks_on_demand: true,
                mining_requires_peers: false,
            },
            genesis,
        })
    }

    /// Hash of the verified genesis block.
    pub fn genesis_hash(&self) -> BlockHash { self.consensus.hash_genesis_block }

    /// Proof-of-work algorithm for a block with header time `block_time`.
    pub fn pow_algorithm(&self, block_time: u32) -> PowAlgorithm {
        PowAlgorithm::for_time(block_time, self.kawpow_activation_time)
    }

    /// Proof-of-work limit of `algorithm`.
    pub fn pow_limit_for(&self, algorithm: PowAlgorithm) -> &Uint256 {
        match algorithm {
            PowAlgorithm::X16r => &self.consensus.pow_limit,
            PowAlgorithm::Kawpow => &self.consensus.kawpow_limit,
        }
    }

    /// Whether assets are enabled at `height`.
    pub fn assets_active(&self, height: u32) -> bool { height >= self.asset_activation_height }

    /// Whether messaging is enabled at `height`.
    pub fn messaging_active(&self, height: u32) -> bool { height >= self.messaging_activation_height }

    /// Whether restricted assets are enabled at `height`.
    pub fn restricted_active(&self, height: u32) -> bool {
        height >= self.restricted_activation_height
    }

    /// Replaces the start time and timeout of one deployment. The change is
    /// rolled back if it leaves the deployment table inconsistent.
    pub fn update_version_bits_parameters(
        &mut self,
        pos: DeploymentPos,
        start_time: i64,
        timeout: i64,
    ) -> Result<(), DeploymentError> {
        let previous = self.consensus.deployments[pos];
        {
            let d = &mut self.consensus.deployments[pos];
            d.start_time = start_time;
            d.timeout = timeout;
        }
        if let Err(e) = self.consensus.check_deployments() {
            self.consensus.deployments[pos] = previous;
            return Err(e);
        }
        warn!("{} deployment {} now starts at {} and times out at {}", self.network, pos, start_time, timeout);
        Ok(())
    }

    /// Applies a parsed `deployment:start:end` override.
    pub fn apply_version_bits(&mut self, vbparams: &VersionBitsParameters) -> Result<(), DeploymentError> {
        self.update_version_bits_parameters(vbparams.pos, vbparams.start_time, vbparams.timeout)
    }
}

const TEST_PREFIXES: Base58Prefixes = Base58Prefixes {
    pubkey_hash: 111,
    script_hash: 196,
    secret_key: 239,
    ext_public_key: [0x04, 0x35, 0x87, 0xCF],
    ext_secret_key: [0x04, 0x35, 0x83, 0x94],
};

fn consensus_and_genesis<H: PowHasher + ?Sized>(
    network: Network,
    hasher: &H,
) -> Result<(Params, Block), Error> {
    let mut consensus = Params::new(network);
    consensus.check_deployments()?;
    let (genesis, hash) = genesis_block(network, hasher)?;
    consensus.hash_genesis_block = hash;
    debug!("{} genesis block {} verified", network, hash);
    Ok((consensus, genesis))
}

fn hash(s: &str) -> BlockHash {
    BlockHash::from_str(s).expect("valid hard-coded block hash")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::ChainParams;
    use crate::blockdata::constants::{genesis_hash, genesis_merkle_root, GenesisError};
    use crate::consensus::burn::BurnKind;
    use crate::consensus::params::{Deployment, DeploymentError, DeploymentPos, VersionBitsParameters};
    use crate::consensus::pow::PowAlgorithm;
    use crate::hash_types::BlockHash;
    use crate::network::constants::{Magic, Network};
    use crate::test_helpers::{genesis_hasher, sha256d_hasher};
    use crate::util::amount::Amount;
    use crate::util::Error;

    #[test]
    fn main_profile() {
        let params = ChainParams::new(Network::Main, &genesis_hasher()).unwrap();

        assert_eq!(params.network, Network::Main);
        assert_eq!(params.magic, Magic::MAIN);
        assert_eq!(params.magic.to_bytes(), [0x54, 0x55, 0x52, 0x49]);
        assert_eq!(params.default_port, 8777);
        assert_eq!(params.prune_after_height, 100000);
        assert_eq!(params.base58_prefixes.pubkey_hash, 65);
        assert_eq!(params.base58_prefixes.script_hash, 127);
        assert_eq!(params.base58_prefixes.secret_key, 193);
        assert_eq!(params.base58_prefixes.ext_public_key, [0x04, 0x88, 0xB2, 0x1E]);
        assert_eq!(params.ext_coin_type, 777);
        assert!(params.dns_seeds.is_empty());
        assert!(params.fixed_seeds.is_empty());
        assert!(params.checkpoints.is_empty());
        assert_eq!(params.genesis_hash(), genesis_hash(Network::Main));
        assert_eq!(params.genesis.header.merkle_root, genesis_merkle_root());
        assert_eq!(params.consensus.subsidy_halving_interval, 5040000);
        assert_eq!(params.dgw_activation_height, 338778);
        assert_eq!(params.reorg.max_depth, 144);
        assert_eq!(params.reorg.min_age, 43200);
        assert!(params.policy.require_standard);
    }

    #[test]
    fn test_profile() {
        let params = ChainParams::new(Network::Test, &genesis_hasher()).unwrap();

        assert_eq!(params.magic.to_bytes(), *b"TURT");
        assert_eq!(params.default_port, 18777);
        assert_eq!(params.ext_coin_type, 1);
        assert_eq!(params.base58_prefixes.pubkey_hash, 111);
        assert_eq!(params.checkpoints.len(), 4);
        assert_eq!(params.checkpoints.last_height(), Some(257610));
        assert_eq!(
            params.checkpoints.get(257610),
            Some(&BlockHash::from_str("000000006272208605c4df3b54d4d5515759105e7ffcb258e8cd8077924ffef1").unwrap())
        );
        assert_eq!(params.consensus.default_assume_valid, *params.checkpoints.get(257610).unwrap());
        assert_eq!(params.chain_tx_data.tx_count, 146666);
        assert_eq!(params.genesis_hash(), genesis_hash(Network::Test));
    }

    #[test]
    fn regtest_profile() {
        let params = ChainParams::new(Network::Regtest, &genesis_hasher()).unwrap();

        assert_eq!(params.magic.to_bytes(), *b"TURR");
        assert_eq!(params.consensus.subsidy_halving_interval, 360);
        assert!(params.consensus.pow_no_retargeting);
        assert!(params.policy.mine_blocks_on_demand);
        assert!(!params.policy.mining_requires_peers);
        assert!(params.assets_active(0));
        assert!(params.restricted_active(0));
        assert_eq!(params.genesis_hash(), genesis_hash(Network::Regtest));
    }

    #[test]
    fn construction_is_deterministic() {
        for network in Network::ALL.iter() {
            let a = ChainParams::new(*network, &genesis_hasher()).unwrap();
            let b = ChainParams::new(*network, &genesis_hasher()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn wrong_hasher_is_rejected() {
        match ChainParams::new(Network::Main, &sha256d_hasher) {
            Err(Error::Genesis(GenesisError::HashMismatch { expected, .. })) => {
                assert_eq!(expected, genesis_hash(Network::Main));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn burn_table() {
        let params = ChainParams::main(&genesis_hasher()).unwrap();
        let burn = &params.burn_policy;
        assert_eq!(burn.amount(BurnKind::IssueAsset), Amount::from_coins(500));
        assert_eq!(burn.address(BurnKind::IssueAsset), "TWKF47cLFGhv4vPh2Q74fiUNBoaAz2S4me");
        assert_eq!(burn.global_burn_address, "TBVnkrrjdpNyVZueU1s7HA8mQsqmJge4af");

        let regtest = ChainParams::regtest(&genesis_hasher()).unwrap();
        assert_eq!(
            regtest.burn_policy.kind_for_address("n1addTagBurnXXXXXXXXXXXXXXXXX5oLMH"),
            Some(BurnKind::AddNullQualifierTag)
        );
        assert!(!regtest.burn_policy.is_burn_address("TWKF47cLFGhv4vPh2Q74fiUNBoaAz2S4me"));
    }

    #[test]
    fn activation() {
        let params = ChainParams::main(&genesis_hasher()).unwrap();
        assert!(!params.assets_active(999));
        assert!(params.assets_active(1000));
        assert!(!params.messaging_active(1999));
        assert!(params.messaging_active(2000));
        assert!(params.restricted_active(2000));

        assert_eq!(params.pow_algorithm(1730678399), PowAlgorithm::X16r);
        assert_eq!(params.pow_algorithm(1730678400), PowAlgorithm::Kawpow);
        assert_eq!(params.pow_limit_for(PowAlgorithm::X16r), &params.consensus.pow_limit);
        assert_eq!(params.pow_limit_for(PowAlgorithm::Kawpow), &params.consensus.kawpow_limit);
        assert!(params.pow_limit_for(PowAlgorithm::Kawpow) < params.pow_limit_for(PowAlgorithm::X16r));
    }

    #[test]
    fn version_bits_override() {
        let mut params = ChainParams::regtest(&genesis_hasher()).unwrap();
        params.update_version_bits_parameters(DeploymentPos::Assets, 100, 200).unwrap();
        let info = params.consensus.deployment(DeploymentPos::Assets);
        assert_eq!((info.start_time, info.timeout), (100, 200));
        assert_eq!(info.bit, 6);

        let err = params.update_version_bits_parameters(DeploymentPos::Assets, 300, 200).unwrap_err();
        assert_eq!(err, DeploymentError::TimeoutBeforeStart(DeploymentPos::Assets, 300, 200));
        let info = params.consensus.deployment(DeploymentPos::Assets);
        assert_eq!((info.start_time, info.timeout), (100, 200));

        let vb: VersionBitsParameters = "coinbase:-2:-2".parse().unwrap();
        params.apply_version_bits(&vb).unwrap();
        assert!(params.consensus.deployments[DeploymentPos::CoinbaseAssets].is_never_active());
        assert_eq!(
            params.consensus.deployments[DeploymentPos::CoinbaseAssets].start_time,
            Deployment::NEVER_ACTIVE
        );
    }
}
