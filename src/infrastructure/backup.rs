//! Database backup script
//!
//! Runs `pg_dump` against the database described by `BackupConfig` and writes
//! `<output_dir>/<database>.sql`. One attempt, no retries.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tokio::process::Command;

use crate::infrastructure::config::BackupConfig;

#[derive(Debug)]
pub enum BackupError {
    /// The dump program could not be started
    Spawn(String),
    /// The dump program exited non-zero (`None` when killed by a signal)
    Failed { code: Option<i32> },
    /// `DB_NAME` cannot be used as a file name inside the output directory
    InvalidDatabaseName(String),
    Io(String),
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::Spawn(msg) => write!(f, "Failed to start pg_dump: {}", msg),
            BackupError::Failed { code: Some(code) } => {
                write!(f, "pg_dump exited with status {}", code)
            }
            BackupError::Failed { code: None } => write!(f, "pg_dump was terminated by a signal"),
            BackupError::InvalidDatabaseName(name) => {
                write!(f, "Database name '{}' is not a plain file name", name)
            }
            BackupError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for BackupError {}

/// `<output_dir>/<database>.sql`, refusing names that would leave `output_dir`
pub fn dump_file(config: &BackupConfig) -> Result<PathBuf, BackupError> {
    let name = config.database.as_str();
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == OsStr::new(name) => {
            Ok(config.output_dir.join(format!("{}.sql", name)))
        }
        _ => Err(BackupError::InvalidDatabaseName(config.database.clone())),
    }
}

/// Arguments passed to `pg_dump`. The password goes through `PGPASSWORD`.
pub fn pg_dump_args(config: &BackupConfig) -> Result<Vec<String>, BackupError> {
    let file = dump_file(config)?;
    Ok(vec![
        "--host".to_string(),
        config.host.clone(),
        "--port".to_string(),
        config.port.to_string(),
        "--username".to_string(),
        config.user.clone(),
        "--dbname".to_string(),
        config.database.clone(),
        "--no-owner".to_string(),
        "--file".to_string(),
        file.to_string_lossy().to_string(),
    ])
}

pub async fn run_backup(config: &BackupConfig) -> Result<PathBuf, BackupError> {
    run_backup_with("pg_dump", config).await
}

/// Same as `run_backup` with an explicit dump program
pub async fn run_backup_with(program: &str, config: &BackupConfig) -> Result<PathBuf, BackupError> {
    let file = dump_file(config)?;
    let args = pg_dump_args(config)?;

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| BackupError::Io(e.to_string()))?;

    println!(
        "Backing up '{}' from {}:{} ...",
        config.database, config.host, config.port
    );

    let status = Command::new(program)
        .args(args)
        .env("PGPASSWORD", &config.password)
        .status()
        .await
        .map_err(|e| BackupError::Spawn(e.to_string()))?;

    if !status.success() {
        // Never leave a truncated dump behind
        match tokio::fs::remove_file(&file).await {
            Ok(()) => tracing::warn!("Removed partial dump {}", file.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Could not remove partial dump {}: {}", file.display(), e),
        }
        return Err(BackupError::Failed {
            code: status.code(),
        });
    }

    println!("Backup written to {}", file.display());
    Ok(file)
}
