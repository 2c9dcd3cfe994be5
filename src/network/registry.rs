// SPDX-License-Identifier: CC0-1.0

//! Process-wide chain parameters
//!
//! A node selects its network once at startup with [`select_params`]; every
//! later reader calls [`params`] and gets a shared, immutable snapshot.
//! Reading before anything was selected is a programming error and panics.
//!
//! Test harnesses may additionally change deployment times on the selected
//! network and switch legacy rules off. These mutations must not race with
//! readers: a snapshot obtained earlier is never modified, but it stops
//! reflecting the selected parameters.
//!

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::info;
use once_cell::sync::Lazy;

use crate::consensus::params::DeploymentPos;
use crate::consensus::pow::PowHasher;
use crate::consensus::rules::{LegacyRule, RuleOverrides};
use crate::network::constants::Network;
use crate::network::params::ChainParams;
use crate::util::Error;

const UNSELECTED: &str = "chain parameters read before select_params";

struct Registry {
    params: Option<Arc<ChainParams>>,
    overrides: RuleOverrides,
}

static REGISTRY: Lazy<RwLock<Registry>> =
    Lazy::new(|| RwLock::new(Registry { params: None, overrides: RuleOverrides::NONE }));

fn read() -> RwLockReadGuard<'static, Registry> {
    REGISTRY.read().unwrap_or_else(|e| e.into_inner())
}

fn write() -> RwLockWriteGuard<'static, Registry> {
    REGISTRY.write().unwrap_or_else(|e| e.into_inner())
}

/// Builds the parameters of the network called `name` and makes them the
/// selected parameters, replacing any earlier selection and clearing rule
/// overrides. On error the earlier selection stays in place.
pub fn select_params<H: PowHasher + ?Sized>(name: &str, hasher: &H) -> Result<Arc<ChainParams>, Error> {
    let network: Network = name.parse()?;
    select_network(network, hasher)
}

/// Like [`select_params`], for an already parsed network.
pub fn select_network<H: PowHasher + ?Sized>(
    network: Network,
    hasher: &H,
) -> Result<Arc<ChainParams>, Error> {
    let params = Arc::new(ChainParams::new(network, hasher)?);
    let mut registry = write();
    registry.params = Some(params.clone());
    registry.overrides = RuleOverrides::NONE;
    info!("selected {} chain parameters, genesis {}", network, params.genesis_hash());
    Ok(params)
}

/// The selected chain parameters.
///
/// # Panics
///
/// If no network has been selected.
pub fn params() -> Arc<ChainParams> { try_params().expect(UNSELECTED) }

/// The selected chain parameters, if a network has been selected.
pub fn try_params() -> Option<Arc<ChainParams>> { read().params.clone() }

/// Forgets the selected network.
#[cfg(any(test, feature = "test-utils"))]
pub fn reset() {
    let mut registry = write();
    registry.params = None;
    registry.overrides = RuleOverrides::NONE;
}

/// Changes the start time and timeout of one deployment of the selected
/// network. Snapshots handed out earlier keep the old values.
///
/// # Panics
///
/// If no network has been selected.
pub fn update_version_bits_parameters(pos: DeploymentPos, start_time: i64, timeout: i64) -> Result<(), Error> {
    let mut registry = write();
    let params = registry.params.as_mut().expect(UNSELECTED);
    Arc::make_mut(params).update_version_bits_parameters(pos, start_time, timeout)?;
    Ok(())
}

/// Legacy rules currently switched off.
pub fn rule_overrides() -> RuleOverrides { read().overrides }

fn rule_enabled(rule: LegacyRule) -> bool {
    let registry = read();
    let params = registry.params.as_ref().expect(UNSELECTED);
    registry.overrides.is_enabled(&params.consensus, rule)
}

/// Whether height-in-coinbase (BIP34) is enforced.
pub fn bip34() -> bool { rule_enabled(LegacyRule::Bip34) }

/// Whether OP_CHECKLOCKTIMEVERIFY (BIP65) is enforced.
pub fn bip65() -> bool { rule_enabled(LegacyRule::Bip65) }

/// Whether strict DER signatures (BIP66) are enforced.
pub fn bip66() -> bool { rule_enabled(LegacyRule::Bip66) }

/// Whether segregated witness is enabled.
pub fn segwit_enabled() -> bool { rule_enabled(LegacyRule::Segwit) }

/// Whether relative lock-times are enforced.
pub fn csv_enabled() -> bool { rule_enabled(LegacyRule::Csv) }

/// Switches a legacy rule off until the next selection.
#[cfg(any(test, feature = "test-utils"))]
pub fn turn_off(rule: LegacyRule) {
    let mut registry = write();
    if !registry.overrides.is_off(rule) {
        log::warn!("legacy rule {} switched off", rule);
    }
    registry.overrides.turn_off(rule);
}

/// Switches BIP34 enforcement off.
#[cfg(any(test, feature = "test-utils"))]
pub fn turn_off_bip34() { turn_off(LegacyRule::Bip34) }

/// Switches BIP65 enforcement off.
#[cfg(any(test, feature = "test-utils"))]
pub fn turn_off_bip65() { turn_off(LegacyRule::Bip65) }

/// Switches BIP66 enforcement off.
#[cfg(any(test, feature = "test-utils"))]
pub fn turn_off_bip66() { turn_off(LegacyRule::Bip66) }

/// Switches segregated witness off.
#[cfg(any(test, feature = "test-utils"))]
pub fn turn_off_segwit() { turn_off(LegacyRule::Segwit) }

/// Switches relative lock-time enforcement off.
#[cfg(any(test, feature = "test-utils"))]
pub fn turn_off_csv() { turn_off(LegacyRule::Csv) }
