//! Domain error types
//!
//! These errors are framework-agnostic. Each capability fails inside its own
//! error value; nothing here is shared mutable state.

use std::fmt;

use super::capabilities::Contract;
use super::platform::PlatformTarget;

/// Failure of a single capability call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShimError {
    /// The capability has no real implementation on this target
    CapabilityUnavailable {
        capability: Contract,
        target: PlatformTarget,
    },
    /// A secure operation was attempted through an insecure shim
    InsecureTarget { capability: Contract },
    /// The underlying hash primitive reported an error
    Hash(String),
    /// A platform target string could not be parsed
    InvalidTarget(String),
}

impl fmt::Display for ShimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShimError::CapabilityUnavailable { capability, target } => write!(
                f,
                "Capability '{}' is unavailable on target '{}'",
                capability, target
            ),
            ShimError::InsecureTarget { capability } => write!(
                f,
                "Capability '{}' is running in insecure mode and cannot verify credentials",
                capability
            ),
            ShimError::Hash(msg) => write!(f, "Hash error: {}", msg),
            ShimError::InvalidTarget(value) => {
                write!(f, "Unknown platform target '{}' (expected native or web)", value)
            }
        }
    }
}

impl std::error::Error for ShimError {}

/// Failure to resolve the capability table for a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Contracts imported by the build with no implementation for the target
    MissingImplementation {
        target: PlatformTarget,
        contracts: Vec<Contract>,
    },
    /// A contract was requested from a build that never imported it
    NotLinked(Contract),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingImplementation { target, contracts } => {
                let names: Vec<&str> = contracts.iter().map(|c| c.module_name()).collect();
                write!(
                    f,
                    "No '{}' implementation for: {}",
                    target,
                    names.join(", ")
                )
            }
            BuildError::NotLinked(contract) => {
                write!(f, "Contract '{}' is not linked into this build", contract)
            }
        }
    }
}

impl std::error::Error for BuildError {}

// Conversion from password-hash errors (used by the native hash provider)
impl From<argon2::password_hash::Error> for ShimError {
    fn from(e: argon2::password_hash::Error) -> Self {
        ShimError::Hash(e.to_string())
    }
}
