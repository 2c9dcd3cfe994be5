// SPDX-License-Identifier: CC0-1.0

//! Legacy rule switches
//!
//! The production parameters enable every legacy soft-fork rule. Test
//! harnesses that need to replay pre-activation chain states switch rules
//! off through [`RuleOverrides`], a one-way latch set that sits beside the
//! parameters instead of mutating them. Rules can only be turned off.
//!

use std::fmt;

use crate::consensus::params::Params;

/// A legacy consensus rule that a test harness may disable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LegacyRule {
    /// Block height in coinbase (BIP34).
    Bip34,
    /// OP_CHECKLOCKTIMEVERIFY (BIP65).
    Bip65,
    /// Strict DER signatures (BIP66).
    Bip66,
    /// Segregated witness.
    Segwit,
    /// Relative lock-time (BIP68, BIP112, BIP113).
    Csv,
}

impl LegacyRule {
    /// All legacy rules.
    pub const ALL: [LegacyRule; 5] =
        [LegacyRule::Bip34, LegacyRule::Bip65, LegacyRule::Bip66, LegacyRule::Segwit, LegacyRule::Csv];

    /// Whether the rule is enabled by the network's production parameters.
    pub fn enabled_in(self, params: &Params) -> bool {
        match self {
            LegacyRule::Bip34 => params.bip34_enabled,
            LegacyRule::Bip65 => params.bip65_enabled,
            LegacyRule::Bip66 => params.bip66_enabled,
            LegacyRule::Segwit => params.segwit_enabled,
            LegacyRule::Csv => params.csv_enabled,
        }
    }

    fn mask(self) -> u8 {
        match self {
            LegacyRule::Bip34 => 1 << 0,
            LegacyRule::Bip65 => 1 << 1,
            LegacyRule::Bip66 => 1 << 2,
            LegacyRule::Segwit => 1 << 3,
            LegacyRule::Csv => 1 << 4,
        }
    }
}

impl fmt::Display for LegacyRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            LegacyRule::Bip34 => "bip34",
            LegacyRule::Bip65 => "bip65",
            LegacyRule::Bip66 => "bip66",
            LegacyRule::Segwit => "segwit",
            LegacyRule::Csv => "csv",
        })
    }
}

/// Set of legacy rules switched off on top of the immutable parameters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RuleOverrides(u8);

impl RuleOverrides {
    /// No rule switched off.
    pub const NONE: RuleOverrides = RuleOverrides(0);

    /// Switches `rule` off. Switching an already disabled rule off again has
    /// no effect.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn turn_off(&mut self, rule: LegacyRule) { self.0 |= rule.mask(); }

    /// Whether `rule` has been switched off.
    pub fn is_off(&self, rule: LegacyRule) -> bool { self.0 & rule.mask() != 0 }

    /// Whether `rule` is in force: enabled by `params` and not switched off.
    pub fn is_enabled(&self, params: &Params, rule: LegacyRule) -> bool {
        rule.enabled_in(params) && !self.is_off(rule)
    }
}
