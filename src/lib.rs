pub mod domain;
pub mod infrastructure;
pub mod modules;
pub mod services;

// Short paths for the binary and the integration tests
pub use infrastructure::backup;
pub use infrastructure::config;
pub use infrastructure::offline;
pub use infrastructure::resolver;
pub use infrastructure::server;
pub use modules::shims;

/// Capability modules the app imports. Resolved once at startup.
pub const APP_IMPORTS: &[&str] = &["netinfo", "secure-hash", "gesture-handler", "svg", "screens"];
