// SPDX-License-Identifier: CC0-1.0

//! Utility functions
//!
//! Functions needed by all parts of the library, and the crate-level error
//! type that chain parameter construction and selection report.
//!

pub mod amount;
pub mod checkpoints;
pub mod uint;

use std::fmt;

use crate::blockdata::constants::GenesisError;
use crate::consensus::params::{DeploymentError, ParseVersionBitsError};
use crate::network::constants::ParseNetworkError;
use crate::util::checkpoints::CheckpointError;

/// A general error code, other errors should implement conversions to/from this
/// if appropriate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The network name is not one of the known networks.
    UnknownNetwork(ParseNetworkError),
    /// The constructed genesis block does not match the hard-coded constants.
    Genesis(GenesisError),
    /// The deployment table violates its invariants.
    Deployment(DeploymentError),
    /// The checkpoint list is not strictly increasing.
    Checkpoint(CheckpointError),
    /// A deployment override string could not be parsed.
    VersionBits(ParseVersionBitsError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnknownNetwork(ref e) => fmt::Display::fmt(e, f),
            Error::Genesis(ref e) => fmt::Display::fmt(e, f),
            Error::Deployment(ref e) => fmt::Display::fmt(e, f),
            Error::Checkpoint(ref e) => fmt::Display::fmt(e, f),
            Error::VersionBits(ref e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::UnknownNetwork(ref e) => Some(e),
            Error::Genesis(ref e) => Some(e),
            Error::Deployment(ref e) => Some(e),
            Error::Checkpoint(ref e) => Some(e),
            Error::VersionBits(ref e) => Some(e),
        }
    }
}

#[doc(hidden)]
impl From<ParseNetworkError> for Error {
    fn from(e: ParseNetworkError) -> Error { Error::UnknownNetwork(e) }
}

#[doc(hidden)]
impl From<GenesisError> for Error {
    fn from(e: GenesisError) -> Error { Error::Genesis(e) }
}

#[doc(hidden)]
impl From<DeploymentError> for Error {
    fn from(e: DeploymentError) -> Error { Error::Deployment(e) }
}

#[doc(hidden)]
impl From<CheckpointError> for Error {
    fn from(e: CheckpointError) -> Error { Error::Checkpoint(e) }
}

#[doc(hidden)]
impl From<ParseVersionBitsError> for Error {
    fn from(e: ParseVersionBitsError) -> Error { Error::VersionBits(e) }
}
