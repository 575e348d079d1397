//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Build-target resolution / capability injection (resolver)
//! - Static asset server (server)
//! - Offline cache manifest (offline)
//! - Database backup script (backup)

pub mod backup;
pub mod config;
pub mod offline;
pub mod resolver;
pub mod server;

pub use resolver::{ResolutionTable, ResolvedBuild, TargetPair};
