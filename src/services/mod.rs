//! Services Layer
//!
//! Logic shared by every capability implementation, independent of the
//! target a build is resolved for.

pub mod connectivity;
pub mod credentials;

// Re-export for convenience
pub use connectivity::{ConnectivityRegistry, Subscription};
pub use credentials::{hash_password, verify_password};
