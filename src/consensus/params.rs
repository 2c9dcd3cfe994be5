// SPDX-License-Identifier: CC0-1.0

//! Consensus parameters
//!
//! This module provides predefined set of parameters for different chains,
//! including the table of version-bits deployments read by the activation
//! state machine.
//!

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use hashes::Hash;

use crate::hash_types::BlockHash;
use crate::network::constants::Network;
use crate::util::uint::Uint256;

/// Highest version bit a deployment may signal on.
pub const MAX_VERSION_BIT: u8 = 28;

/// Identifies a version-bits deployment.
///
/// The set is closed: adding a deployment means adding a variant, and every
/// network's table is built from an exhaustive `match` over it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeploymentPos {
    /// Deployment used to exercise the activation logic.
    TestDummy,
    /// Asset issuance and transfer (RIP2).
    Assets,
    /// Messaging and restricted assets (RIP5).
    MsgRestAssets,
    /// Larger transfer scripts.
    TransferScriptSize,
    /// Enforcement of asset output values.
    EnforceValue,
    /// Assets in coinbase outputs.
    CoinbaseAssets,
}

impl DeploymentPos {
    /// Number of deployments.
    pub const COUNT: usize = 6;

    /// All deployments, in table order.
    pub const ALL: [DeploymentPos; DeploymentPos::COUNT] = [
        DeploymentPos::TestDummy,
        DeploymentPos::Assets,
        DeploymentPos::MsgRestAssets,
        DeploymentPos::TransferScriptSize,
        DeploymentPos::EnforceValue,
        DeploymentPos::CoinbaseAssets,
    ];

    /// The name of the deployment as used by `-vbparams`.
    pub fn name(self) -> &'static str {
        match self {
            DeploymentPos::TestDummy => "testdummy",
            DeploymentPos::Assets => "assets",
            DeploymentPos::MsgRestAssets => "messaging_restricted",
            DeploymentPos::TransferScriptSize => "transfer_script",
            DeploymentPos::EnforceValue => "enforce",
            DeploymentPos::CoinbaseAssets => "coinbase",
        }
    }

    fn index(self) -> usize {
        match self {
            DeploymentPos::TestDummy => 0,
            DeploymentPos::Assets => 1,
            DeploymentPos::MsgRestAssets => 2,
            DeploymentPos::TransferScriptSize => 3,
            DeploymentPos::EnforceValue => 4,
            DeploymentPos::CoinbaseAssets => 5,
        }
    }
}

impl fmt::Display for DeploymentPos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for DeploymentPos {
    type Err = ParseVersionBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeploymentPos::ALL
            .iter()
            .copied()
            .find(|pos| pos.name() == s)
            .ok_or_else(|| ParseVersionBitsError::UnknownDeployment(s.to_owned()))
    }
}

/// One version-bits soft fork.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deployment {
    /// Bit position to select the particular bit in the block version.
    pub bit: u8,
    /// Start MedianTime for version bits miner confirmation.
    pub start_time: i64,
    /// Timeout/expiry MedianTime for the deployment attempt.
    pub timeout: i64,
    /// Overrides the network's activation threshold for this deployment.
    pub override_threshold: Option<u32>,
    /// Overrides the network's confirmation window for this deployment.
    pub override_window: Option<u32>,
}

impl Deployment {
    /// Start/timeout sentinel for a deployment that can never activate.
    pub const NEVER_ACTIVE: i64 = -2;

    /// A placeholder deployment that is perpetually inactive.
    pub const fn never(bit: u8) -> Deployment {
        Deployment {
            bit,
            start_time: Deployment::NEVER_ACTIVE,
            timeout: Deployment::NEVER_ACTIVE,
            override_threshold: None,
            override_window: None,
        }
    }

    /// Whether this deployment is a perpetually inactive placeholder.
    pub fn is_never_active(&self) -> bool {
        self.start_time == Deployment::NEVER_ACTIVE && self.timeout == Deployment::NEVER_ACTIVE
    }
}

/// Version-bits configuration of one deployment, with threshold and window
/// resolved against the network defaults.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeploymentInfo {
    /// Bit position in the block version.
    pub bit: u8,
    /// Start MedianTime.
    pub start_time: i64,
    /// Timeout MedianTime.
    pub timeout: i64,
    /// Signalling blocks needed in a window to lock in.
    pub threshold: u32,
    /// Number of blocks per signalling window.
    pub window: u32,
}

/// Fixed table of deployments, one entry per [`DeploymentPos`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Deployments([Deployment; DeploymentPos::COUNT]);

impl Deployments {
    /// Builds the table by asking `f` for every deployment.
    pub fn from_fn<F: FnMut(DeploymentPos) -> Deployment>(mut f: F) -> Deployments {
        let mut table = [Deployment::never(0); DeploymentPos::COUNT];
        for pos in DeploymentPos::ALL.iter() {
            table[pos.index()] = f(*pos);
        }
        Deployments(table)
    }

    /// Iterates over `(position, deployment)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (DeploymentPos, &Deployment)> {
        (0..DeploymentPos::COUNT).map(move |i| (DeploymentPos::ALL[i], &self.0[i]))
    }
}

impl Index<DeploymentPos> for Deployments {
    type Output = Deployment;

    fn index(&self, pos: DeploymentPos) -> &Deployment { &self.0[pos.index()] }
}

impl IndexMut<DeploymentPos> for Deployments {
    fn index_mut(&mut self, pos: DeploymentPos) -> &mut Deployment { &mut self.0[pos.index()] }
}

/// A deployment that violates the table's invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentError {
    /// The bit is outside `0..=28`.
    BitOutOfRange(DeploymentPos, u8),
    /// Two deployments signal on the same bit.
    BitCollision(DeploymentPos, DeploymentPos, u8),
    /// The activation threshold exceeds the confirmation window.
    ThresholdAboveWindow(DeploymentPos, u32, u32),
    /// The deployment times out before it starts.
    TimeoutBeforeStart(DeploymentPos, i64, i64),
}

impl fmt::Display for DeploymentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DeploymentError::BitOutOfRange(pos, bit) => {
                write!(f, "deployment {} uses bit {} above {}", pos, bit, MAX_VERSION_BIT)
            }
            DeploymentError::BitCollision(a, b, bit) => {
                write!(f, "deployments {} and {} both use bit {}", a, b, bit)
            }
            DeploymentError::ThresholdAboveWindow(pos, threshold, window) => write!(
                f,
                "deployment {} needs {} signalling blocks in a window of {}",
                pos, threshold, window
            ),
            DeploymentError::TimeoutBeforeStart(pos, start, timeout) => {
                write!(f, "deployment {} times out at {} before starting at {}", pos, timeout, start)
            }
        }
    }
}

impl std::error::Error for DeploymentError {}

/// Error parsing a `deployment:start:end` version-bits override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseVersionBitsError {
    /// The string does not have exactly three `:`-separated fields.
    Format(String),
    /// No deployment has this name.
    UnknownDeployment(String),
    /// A time field is not an integer.
    InvalidTime(String),
}

impl fmt::Display for ParseVersionBitsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseVersionBitsError::Format(ref s) => {
                write!(f, "version bits parameters malformed, expecting deployment:start:end, got {}", s)
            }
            ParseVersionBitsError::UnknownDeployment(ref s) => write!(f, "invalid deployment ({})", s),
            ParseVersionBitsError::InvalidTime(ref s) => write!(f, "invalid time ({})", s),
        }
    }
}

impl std::error::Error for ParseVersionBitsError {}

/// Start/timeout override for one deployment, in the `deployment:start:end`
/// form accepted by the node's `-vbparams` option.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VersionBitsParameters {
    /// Deployment to change.
    pub pos: DeploymentPos,
    /// New start time.
    pub start_time: i64,
    /// New timeout.
    pub timeout: i64,
}

impl FromStr for VersionBitsParameters {
    type Err = ParseVersionBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != 3 {
            return Err(ParseVersionBitsError::Format(s.to_owned()));
        }
        let time = |field: &str| {
            field.parse::<i64>().map_err(|_| ParseVersionBitsError::InvalidTime(field.to_owned()))
        };
        Ok(VersionBitsParameters {
            pos: fields[0].parse()?,
            start_time: time(fields[1])?,
            timeout: time(fields[2])?,
        })
    }
}

/// Parameters that influence chain consensus.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Network for which parameters are valid.
    pub network: Network,
    /// Blocks between subsidy halvings.
    pub subsidy_halving_interval: u32,
    /// Whether block version 2 height-in-coinbase is enforced.
    pub bip34_enabled: bool,
    /// Whether OP_CHECKLOCKTIMEVERIFY is enforced.
    pub bip65_enabled: bool,
    /// Whether strict DER signatures are enforced.
    pub bip66_enabled: bool,
    /// Whether segregated witness is enabled.
    pub segwit_enabled: bool,
    /// Whether relative lock-times (BIP68/112/113) are enforced.
    pub csv_enabled: bool,
    /// Proof of work limit for X16R blocks.
    pub pow_limit: Uint256,
    /// Proof of work limit for KAWPOW blocks.
    pub kawpow_limit: Uint256,
    /// Expected amount of time to mine one retarget window, in seconds.
    pub pow_target_timespan: i64,
    /// Expected amount of time to mine one block, in seconds.
    pub pow_target_spacing: i64,
    /// Whether min-difficulty blocks are allowed after a long gap.
    pub pow_allow_min_difficulty_blocks: bool,
    /// Whether difficulty retargeting is disabled.
    pub pow_no_retargeting: bool,
    /// Minimum blocks including miner confirmation of the total of a
    /// confirmation window, which is also used for BIP9 deployments.
    pub rule_change_activation_threshold: u32,
    /// Number of blocks with the same set of rules.
    pub miner_confirmation_window: u32,
    /// Version-bits deployments.
    pub deployments: Deployments,
    /// The best chain should have at least this much work.
    pub minimum_chain_work: Uint256,
    /// Signatures in ancestors of this block are assumed valid.
    pub default_assume_valid: BlockHash,
    /// Hash of the genesis block, set once the genesis block is verified.
    pub hash_genesis_block: BlockHash,
}

impl Params {
    /// Creates parameters set for the given network.
    pub fn new(network: Network) -> Self {
        match network {
            Network::Main => Params::main(),
            Network::Test => Params::testnet(),
            Network::Regtest => Params::regtest(),
        }
    }

    fn main() -> Self {
        let (start, timeout) = (1730678400, 1762214400); // Nov 4, 2024 .. Nov 4, 2025
        Params {
            network: Network::Main,
            subsidy_halving_interval: 5_040_000, // ~4 years of 25 second blocks
            bip34_enabled: true,
            bip65_enabled: true,
            bip66_enabled: true,
            segwit_enabled: true,
            csv_enabled: true,
            pow_limit: limit("00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            kawpow_limit: limit("0000000000ffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_target_timespan: 50 * 25,
            pow_target_spacing: 25,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            rule_change_activation_threshold: 40, // 80% of 50
            miner_confirmation_window: 50,
            deployments: Deployments::from_fn(|pos| match pos {
                DeploymentPos::TestDummy => deployment(28, 1199145601, 1230767999, 45, 50),
                DeploymentPos::Assets => deployment(6, start, timeout, 45, 50),
                DeploymentPos::MsgRestAssets => deployment(7, start, timeout, 42, 50),
                DeploymentPos::TransferScriptSize => deployment(8, start, timeout, 42, 50),
                DeploymentPos::EnforceValue => deployment(9, start, timeout, 35, 50),
                DeploymentPos::CoinbaseAssets => deployment(10, start, timeout, 35, 50),
            }),
            minimum_chain_work: limit("0000000000000000000000000000000000000000000000355cd0ac1503c83052"),
            default_assume_valid: hash("0000000000018d2fdcf4ac8eaac8db059584bd2840be5629562bb8599d39998c"),
            hash_genesis_block: BlockHash::all_zeros(),
        }
    }

    fn testnet() -> Self {
        let (start, timeout) = (1730678400, 1762214400);
        Params {
            network: Network::Test,
            subsidy_halving_interval: 5_040_000,
            bip34_enabled: true,
            bip65_enabled: true,
            bip66_enabled: true,
            segwit_enabled: true,
            csv_enabled: true,
            pow_limit: limit("00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            kawpow_limit: limit("000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_target_timespan: 50 * 25,
            pow_target_spacing: 25,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: false,
            rule_change_activation_threshold: 32, // 65% of 50
            miner_confirmation_window: 50,
            deployments: Deployments::from_fn(|pos| match pos {
                DeploymentPos::TestDummy => deployment(28, 1199145601, 1230767999, 32, 50),
                DeploymentPos::Assets => deployment(5, start, timeout, 32, 50),
                DeploymentPos::MsgRestAssets => deployment(6, start, timeout, 32, 50),
                DeploymentPos::TransferScriptSize => deployment(8, start, timeout, 32, 50),
                DeploymentPos::EnforceValue => deployment(9, start, timeout, 35, 50),
                DeploymentPos::CoinbaseAssets => deployment(10, start, timeout, 35, 50),
            }),
            minimum_chain_work: limit("000000000000000000000000000000000000000000000000000168050db560b4"),
            default_assume_valid: hash("000000006272208605c4df3b54d4d5515759105e7ffcb258e8cd8077924ffef1"),
            hash_genesis_block: BlockHash::all_zeros(),
        }
    }

    fn regtest() -> Self {
        let (start, timeout) = (0, 999_999_999_999);
        Params {
            network: Network::Regtest,
            subsidy_halving_interval: 360,
            bip34_enabled: true,
            bip65_enabled: true,
            bip66_enabled: true,
            segwit_enabled: true,
            csv_enabled: true,
            pow_limit: limit("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            kawpow_limit: limit("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
            pow_target_timespan: 50 * 25,
            pow_target_spacing: 25,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            rule_change_activation_threshold: 37, // 75% of 50
            miner_confirmation_window: 50,
            deployments: Deployments::from_fn(|pos| match pos {
                DeploymentPos::TestDummy => deployment(28, start, timeout, 37, 50),
                DeploymentPos::Assets => deployment(6, start, timeout, 37, 50),
                DeploymentPos::MsgRestAssets => deployment(7, start, timeout, 37, 50),
                DeploymentPos::TransferScriptSize => deployment(8, start, timeout, 37, 50),
                DeploymentPos::EnforceValue => deployment(9, start, timeout, 37, 50),
                DeploymentPos::CoinbaseAssets => deployment(10, start, timeout, 37, 50),
            }),
            minimum_chain_work: Uint256::zero(),
            default_assume_valid: BlockHash::all_zeros(),
            hash_genesis_block: BlockHash::all_zeros(),
        }
    }

    /// Version-bits configuration of a deployment, with the per-deployment
    /// overrides applied.
    pub fn deployment(&self, pos: DeploymentPos) -> DeploymentInfo {
        let d = &self.deployments[pos];
        DeploymentInfo {
            bit: d.bit,
            start_time: d.start_time,
            timeout: d.timeout,
            threshold: d.override_threshold.unwrap_or(self.rule_change_activation_threshold),
            window: d.override_window.unwrap_or(self.miner_confirmation_window),
        }
    }

    /// Number of blocks between difficulty retargets.
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    /// Checks the deployment table: bits in range and unique among
    /// deployments that can activate, threshold within window and start
    /// before timeout.
    pub fn check_deployments(&self) -> Result<(), DeploymentError> {
        let mut bits: BTreeMap<u8, DeploymentPos> = BTreeMap::new();
        for (pos, d) in self.deployments.iter() {
            if d.bit > MAX_VERSION_BIT {
                return Err(DeploymentError::BitOutOfRange(pos, d.bit));
            }
            let info = self.deployment(pos);
            if info.threshold > info.window {
                return Err(DeploymentError::ThresholdAboveWindow(pos, info.threshold, info.window));
            }
            if d.is_never_active() {
                continue;
            }
            if d.start_time > d.timeout {
                return Err(DeploymentError::TimeoutBeforeStart(pos, d.start_time, d.timeout));
            }
            if let Some(other) = bits.insert(d.bit, pos) {
                return Err(DeploymentError::BitCollision(other, pos, d.bit));
            }
        }
        Ok(())
    }
}

fn deployment(bit: u8, start_time: i64, timeout: i64, threshold: u32, window: u32) -> Deployment {
    Deployment {
        bit,
        start_time,
        timeout,
        override_threshold: Some(threshold),
        override_window: Some(window),
    }
}

fn limit(s: &str) -> Uint256 {
    Uint256::from_hex(s).expect("valid hard-coded 256-bit constant")
}

fn hash(s: &str) -> BlockHash {
    BlockHash::from_str(s).expect("valid hard-coded block hash")
}
