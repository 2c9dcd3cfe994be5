// SPDX-License-Identifier: CC0-1.0

use turicoin::network::registry;

#[test]
fn nothing_selected() {
    assert!(registry::try_params().is_none());
}

#[test]
#[should_panic(expected = "chain parameters read before select_params")]
fn params_before_selection_panics() {
    registry::params();
}

#[test]
#[should_panic(expected = "chain parameters read before select_params")]
fn rule_query_before_selection_panics() {
    registry::segwit_enabled();
}
