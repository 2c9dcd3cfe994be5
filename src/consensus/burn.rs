// SPDX-License-Identifier: CC0-1.0

//! Asset burn policy
//!
//! Asset issuance transactions must pay a fixed amount to a fixed,
//! unspendable address. This module holds the per-network table of those
//! amounts and addresses.
//!

use std::fmt;

use crate::util::amount::Amount;

/// The kind of asset operation a burn pays for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BurnKind {
    /// Issuing a root asset.
    IssueAsset,
    /// Reissuing an asset.
    ReissueAsset,
    /// Issuing a sub-asset.
    IssueSubAsset,
    /// Issuing a unique asset.
    IssueUniqueAsset,
    /// Issuing a message channel asset.
    IssueMsgChannelAsset,
    /// Issuing a qualifier asset.
    IssueQualifierAsset,
    /// Issuing a sub-qualifier asset.
    IssueSubQualifierAsset,
    /// Issuing a restricted asset.
    IssueRestrictedAsset,
    /// Adding a tag to an address with a null qualifier.
    AddNullQualifierTag,
}

impl BurnKind {
    /// Number of burn kinds.
    pub const COUNT: usize = 9;

    /// All burn kinds, in table order.
    pub const ALL: [BurnKind; BurnKind::COUNT] = [
        BurnKind::IssueAsset,
        BurnKind::ReissueAsset,
        BurnKind::IssueSubAsset,
        BurnKind::IssueUniqueAsset,
        BurnKind::IssueMsgChannelAsset,
        BurnKind::IssueQualifierAsset,
        BurnKind::IssueSubQualifierAsset,
        BurnKind::IssueRestrictedAsset,
        BurnKind::AddNullQualifierTag,
    ];

    /// Amount burnt for this kind of operation. The amounts are the same on
    /// every network.
    pub fn amount(self) -> Amount {
        match self {
            BurnKind::IssueAsset => Amount::from_coins(500),
            BurnKind::ReissueAsset => Amount::from_coins(100),
            BurnKind::IssueSubAsset => Amount::from_coins(100),
            BurnKind::IssueUniqueAsset => Amount::from_coins(5),
            BurnKind::IssueMsgChannelAsset => Amount::from_coins(100),
            BurnKind::IssueQualifierAsset => Amount::from_coins(1000),
            BurnKind::IssueSubQualifierAsset => Amount::from_coins(100),
            BurnKind::IssueRestrictedAsset => Amount::from_coins(1500),
            BurnKind::AddNullQualifierTag => Amount::from_sat(Amount::ONE_COIN.as_sat() / 10),
        }
    }

    fn index(self) -> usize {
        match self {
            BurnKind::IssueAsset => 0,
            BurnKind::ReissueAsset => 1,
            BurnKind::IssueSubAsset => 2,
            BurnKind::IssueUniqueAsset => 3,
            BurnKind::IssueMsgChannelAsset => 4,
            BurnKind::IssueQualifierAsset => 5,
            BurnKind::IssueSubQualifierAsset => 6,
            BurnKind::IssueRestrictedAsset => 7,
            BurnKind::AddNullQualifierTag => 8,
        }
    }
}

impl fmt::Display for BurnKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            BurnKind::IssueAsset => "issue_asset",
            BurnKind::ReissueAsset => "reissue_asset",
            BurnKind::IssueSubAsset => "issue_sub_asset",
            BurnKind::IssueUniqueAsset => "issue_unique_asset",
            BurnKind::IssueMsgChannelAsset => "issue_msg_channel_asset",
            BurnKind::IssueQualifierAsset => "issue_qualifier_asset",
            BurnKind::IssueSubQualifierAsset => "issue_sub_qualifier_asset",
            BurnKind::IssueRestrictedAsset => "issue_restricted_asset",
            BurnKind::AddNullQualifierTag => "add_null_qualifier_tag",
        })
    }
}

/// Burn amounts and destination addresses of one network.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BurnPolicy {
    addresses: [&'static str; BurnKind::COUNT],
    /// Catch-all burn address of the network.
    pub global_burn_address: &'static str,
}

impl BurnPolicy {
    /// Builds a policy, asking `address` for the destination of every kind.
    pub fn new<F>(mut address: F, global_burn_address: &'static str) -> BurnPolicy
    where
        F: FnMut(BurnKind) -> &'static str,
    {
        let mut addresses = [""; BurnKind::COUNT];
        for kind in BurnKind::ALL.iter() {
            addresses[kind.index()] = address(*kind);
        }
        BurnPolicy { addresses, global_burn_address }
    }

    /// Amount that must be burnt for `kind`.
    pub fn amount(&self, kind: BurnKind) -> Amount { kind.amount() }

    /// Address the burn for `kind` must be paid to.
    pub fn address(&self, kind: BurnKind) -> &'static str { self.addresses[kind.index()] }

    /// The kind whose burn address is `address`, if any.
    pub fn kind_for_address(&self, address: &str) -> Option<BurnKind> {
        BurnKind::ALL.iter().copied().find(|kind| self.address(*kind) == address)
    }

    /// Whether `address` is one of the network's burn addresses, including
    /// the global one.
    pub fn is_burn_address(&self, address: &str) -> bool {
        address == self.global_burn_address || self.kind_for_address(address).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{BurnKind, BurnPolicy};
    use crate::util::amount::Amount;

    fn policy() -> BurnPolicy {
        BurnPolicy::new(
            |kind| match kind {
                BurnKind::IssueAsset => "issue",
                BurnKind::ReissueAsset => "reissue",
                BurnKind::IssueSubAsset => "sub",
                BurnKind::IssueUniqueAsset => "unique",
                BurnKind::IssueMsgChannelAsset => "channel",
                BurnKind::IssueQualifierAsset => "qualifier",
                BurnKind::IssueSubQualifierAsset => "subqualifier",
                BurnKind::IssueRestrictedAsset => "restricted",
                BurnKind::AddNullQualifierTag => "tag",
            },
            "global",
        )
    }

    #[test]
    fn amounts() {
        let policy = policy();
        assert_eq!(policy.amount(BurnKind::IssueAsset), Amount::from_sat(500 * 100_000_000));
        assert_eq!(policy.amount(BurnKind::IssueUniqueAsset), Amount::from_coins(5));
        assert_eq!(policy.amount(BurnKind::IssueRestrictedAsset), Amount::from_coins(1500));
        assert_eq!(policy.amount(BurnKind::AddNullQualifierTag), Amount::from_sat(10_000_000));
    }

    #[test]
    fn address_lookup() {
        let policy = policy();
        assert_eq!(policy.address(BurnKind::IssueSubQualifierAsset), "subqualifier");
        assert_eq!(policy.kind_for_address("tag"), Some(BurnKind::AddNullQualifierTag));
        assert_eq!(policy.kind_for_address("global"), None);
        assert!(policy.is_burn_address("global"));
        assert!(policy.is_burn_address("channel"));
        assert!(!policy.is_burn_address("somewhere"));
        assert_eq!(BurnKind::IssueMsgChannelAsset.to_string(), "issue_msg_channel_asset");
    }
}
