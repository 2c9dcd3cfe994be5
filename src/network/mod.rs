// SPDX-License-Identifier: CC0-1.0

//! Network parameters
//!
//! This module defines the known networks, the parameter set of each of
//! them and the process-wide handle on the selected one.
//!

pub mod constants;
pub mod params;
pub mod registry;

pub use self::registry::{params, select_params, try_params};
