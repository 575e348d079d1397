//! Capability shim registry
//!
//! One native and one web implementation per capability contract. The
//! resolver decides which of the two a build links.

pub mod gesture;
pub mod graphics;
pub mod hash;
pub mod navigation;
pub mod network;

pub use gesture::{NativeGestures, WebGestures};
pub use graphics::{NativeGraphics, WebGraphics};
pub use hash::{Argon2Hasher, HashCapability, InsecureHashShim, InsecureMatch};
pub use navigation::{NativeScreens, WebScreens};
pub use network::{NativeNetworkStatus, WebNetworkStatus};
