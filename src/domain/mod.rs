//! Domain layer - Pure platform abstractions
//!
//! This layer contains NO framework dependencies (no Axum, no Tokio).
//! Only capability contracts, the build target and domain error types.

pub mod capabilities;
pub mod errors;
pub mod markup;
pub mod platform;

pub use capabilities::*;
pub use errors::{BuildError, ShimError};
pub use markup::Node;
pub use platform::PlatformTarget;
