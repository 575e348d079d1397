//! Secure-hash providers
//!
//! Native builds hash with Argon2. The web build has no hashing primitive, so
//! it gets `InsecureHashShim`: hashing and salt generation fail, and
//! comparison is plain equality. The shim deliberately does not implement
//! `SecureHashProvider`, and its comparison result is its own type, so it
//! cannot be handed to code that verifies real credentials.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use std::sync::Arc;

use crate::domain::{Contract, PlatformTarget, SecureHashProvider, ShimError};

/// Argon2 password hashing
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl SecureHashProvider for Argon2Hasher {
    fn hash(&self, data: &str, salt: Option<&str>) -> Result<String, ShimError> {
        let salt = match salt {
            Some(encoded) => SaltString::from_b64(encoded)?,
            None => SaltString::generate(&mut OsRng),
        };
        let password_hash = Argon2::default()
            .hash_password(data.as_bytes(), &salt)?
            .to_string();
        Ok(password_hash)
    }

    fn compare(&self, data: &str, encrypted: &str) -> Result<bool, ShimError> {
        let parsed_hash = PasswordHash::new(encrypted)?;
        Ok(Argon2::default()
            .verify_password(data.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn gen_salt(&self) -> Result<String, ShimError> {
        Ok(SaltString::generate(&mut OsRng).as_str().to_string())
    }
}

/// Outcome of an insecure comparison. Says nothing about credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsecureMatch {
    Equal,
    Different,
}

impl InsecureMatch {
    pub fn is_equal(&self) -> bool {
        *self == InsecureMatch::Equal
    }
}

/// Stand-in for the hash module on the web target
#[derive(Debug, Default, Clone, Copy)]
pub struct InsecureHashShim;

impl InsecureHashShim {
    fn unavailable() -> ShimError {
        ShimError::CapabilityUnavailable {
            capability: Contract::SecureHash,
            target: PlatformTarget::Web,
        }
    }

    /// Always fails: no digest is ever produced on this target
    pub fn hash(&self, _data: &str) -> Result<String, ShimError> {
        tracing::warn!("secure-hash(web): hash requested but no hashing is available");
        Err(Self::unavailable())
    }

    pub fn gen_salt(&self) -> Result<String, ShimError> {
        tracing::warn!("secure-hash(web): salt requested but no RNG-backed salt is available");
        Err(Self::unavailable())
    }

    /// Structural equality of the two inputs, nothing more
    pub fn compare(&self, data: &str, other: &str) -> InsecureMatch {
        tracing::warn!("secure-hash(web): comparing by plain equality (insecure)");
        if data == other {
            InsecureMatch::Equal
        } else {
            InsecureMatch::Different
        }
    }
}

/// Hash capability as linked into a build
#[derive(Clone)]
pub enum HashCapability {
    Secure(Arc<dyn SecureHashProvider>),
    Insecure(InsecureHashShim),
}

impl HashCapability {
    pub fn is_secure(&self) -> bool {
        matches!(self, HashCapability::Secure(_))
    }

    /// The real provider, or `InsecureTarget` on builds that only have the shim
    pub fn secure(&self) -> Result<&dyn SecureHashProvider, ShimError> {
        match self {
            HashCapability::Secure(provider) => Ok(provider.as_ref()),
            HashCapability::Insecure(_) => Err(ShimError::InsecureTarget {
                capability: Contract::SecureHash,
            }),
        }
    }

    /// Hash with a fresh salt
    pub fn hash(&self, data: &str) -> Result<String, ShimError> {
        match self {
            HashCapability::Secure(provider) => provider.hash(data, None),
            HashCapability::Insecure(shim) => shim.hash(data),
        }
    }

    pub fn gen_salt(&self) -> Result<String, ShimError> {
        match self {
            HashCapability::Secure(provider) => provider.gen_salt(),
            HashCapability::Insecure(shim) => shim.gen_salt(),
        }
    }
}

impl std::fmt::Debug for HashCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashCapability::Secure(_) => write!(f, "HashCapability::Secure"),
            HashCapability::Insecure(_) => write!(f, "HashCapability::Insecure"),
        }
    }
}
