use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fcschool::domain::PlatformTarget;
use fcschool::offline::{CacheManifest, OfflineCache};
use fcschool::resolver::ResolutionTable;
use fcschool::shims::NativeNetworkStatus;
use fcschool::{backup, config, server, APP_IMPORTS};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fcschool=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    // [BACKUP] Dump the database and exit
    if std::env::args().any(|arg| arg == "--backup") {
        let backup_config = config::BackupConfig::from_env();
        return match backup::run_backup(&backup_config).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("Backup failed: {}", e);
                eprintln!("Backup failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = config::Config::from_env();

    // Link every capability the app imports before anything is served
    let mut table = ResolutionTable::standard(&config);
    let native_status = Arc::new(NativeNetworkStatus::new(config.connectivity_probe.clone()));
    table.network.native = Some(native_status.clone());
    let build = match table.resolve(config.target, APP_IMPORTS) {
        Ok(build) => build,
        Err(e) => {
            tracing::error!("Capability resolution failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Native subscribers get connectivity changes without polling `fetch`
    let watcher = match (build.target(), build.network()) {
        (PlatformTarget::Native, Ok(_)) => {
            Some(native_status.spawn_watcher(config.connectivity_interval))
        }
        _ => None,
    };
    if let Ok(hash) = build.hash() {
        if !hash.is_secure() {
            tracing::warn!(
                "Target '{}' has no secure hashing: credentials cannot be verified on this build",
                build.target()
            );
        }
    }

    // Check the pre-cache list against the build output
    let manifest = CacheManifest::builtin();
    let mut cache = OfflineCache::new();
    match cache
        .install(&manifest, &config.dist_dir, &config.entry_document)
        .await
    {
        Ok(count) => {
            cache.activate(&manifest);
            tracing::info!("Offline manifest '{}' covers {} asset(s)", manifest.version, count);
        }
        Err(e) => tracing::warn!("Offline manifest '{}' incomplete: {}", manifest.version, e),
    }

    let served = server::serve(&config).await;
    if let Some(watcher) = watcher {
        watcher.abort();
    }

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Failed to start server on port {}: {}", config.port, e);
            ExitCode::FAILURE
        }
    }
}
