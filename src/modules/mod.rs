//! Platform modules
//!
//! - `shims`: per-target implementations of the capability contracts

pub mod shims;
