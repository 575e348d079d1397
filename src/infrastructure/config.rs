use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::PlatformTarget;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub dist_dir: PathBuf,
    pub entry_document: String,
    pub target: PlatformTarget,
    pub connectivity_probe: String,
    /// How often a native build re-checks connectivity
    pub connectivity_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let target = env::var("PLATFORM_TARGET")
            .ok()
            .and_then(|t| match t.parse() {
                Ok(target) => Some(target),
                Err(e) => {
                    tracing::warn!("{}, falling back to web", e);
                    None
                }
            })
            .unwrap_or(PlatformTarget::Web);

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            dist_dir: env::var("DIST_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("dist")),
            entry_document: env::var("ENTRY_DOCUMENT").unwrap_or_else(|_| "index.html".to_string()),
            target,
            connectivity_probe: env::var("CONNECTIVITY_PROBE")
                .unwrap_or_else(|_| "1.1.1.1:53".to_string()),
            connectivity_interval: env::var("CONNECTIVITY_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30)),
        }
    }

    pub fn entry_path(&self) -> PathBuf {
        self.dist_dir.join(&self.entry_document)
    }
}

/// Database connection settings for the backup script
#[derive(Clone, Debug)]
pub struct BackupConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub output_dir: PathBuf,
}

impl BackupConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("DB_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5432),
            database: env::var("DB_NAME").unwrap_or_else(|_| "postgres".to_string()),
            user: env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: env::var("DB_PASSWORD").unwrap_or_default(),
            output_dir: env::var("BACKUP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("backups")),
        }
    }
}
