//! Credential hashing
//!
//! Only builds linked with a real hash provider can hash or verify member
//! passwords. On the web target both calls fail with `InsecureTarget` instead
//! of falling back to the equality shim.

use crate::domain::ShimError;
use crate::modules::shims::HashCapability;

pub fn hash_password(hash: &HashCapability, password: &str) -> Result<String, ShimError> {
    hash.secure()?.hash(password, None)
}

pub fn verify_password(
    hash: &HashCapability,
    password: &str,
    password_hash: &str,
) -> Result<bool, ShimError> {
    let provider = hash.secure().inspect_err(|e| {
        tracing::warn!("credentials: refusing to verify password: {}", e);
    })?;
    provider.compare(password, password_hash)
}
