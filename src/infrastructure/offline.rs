//! Offline cache manifest
//!
//! A versioned list of asset paths to pre-cache. Installing a manifest stores
//! its assets under a cache named after the version; activating it deletes
//! every other cache, so bumping the version invalidates everything at once.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

pub const CACHE_VERSION: &str = "fcschool-cache-v3";

const PRECACHE_ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/manifest.json",
    "/favicon.ico",
    "/assets/icon.png",
    "/assets/fonts/Inter-Regular.ttf",
];

#[derive(Debug)]
pub enum OfflineError {
    /// Asset path escapes the output directory
    InvalidPath(String),
    /// Asset listed in the manifest is not in the build output
    MissingAsset(String),
    Io(String),
}

impl fmt::Display for OfflineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfflineError::InvalidPath(p) => write!(f, "Invalid asset path: {}", p),
            OfflineError::MissingAsset(p) => write!(f, "Asset not found in build output: {}", p),
            OfflineError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for OfflineError {}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CacheManifest {
    pub version: String,
    pub assets: Vec<String>,
}

impl CacheManifest {
    /// Manifest shipped with the current release
    pub fn builtin() -> Self {
        Self {
            version: CACHE_VERSION.to_string(),
            assets: PRECACHE_ASSETS.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, OfflineError> {
        serde_json::from_str(json).map_err(|e| OfflineError::Io(e.to_string()))
    }
}

/// Map a request path to a file under `dist_dir`; `/` maps to `entry`
fn asset_file(dist_dir: &Path, entry: &str, asset: &str) -> Result<PathBuf, OfflineError> {
    let relative = asset.trim_start_matches('/');
    let relative = if relative.is_empty() { entry } else { relative };

    let mut path = dist_dir.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return Err(OfflineError::InvalidPath(asset.to_string())),
        }
    }
    Ok(path)
}

type Cache = HashMap<String, Vec<u8>>;

#[derive(Default)]
pub struct OfflineCache {
    caches: HashMap<String, Cache>,
    active: Option<String>,
}

impl OfflineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every manifest asset from the build output into the cache named
    /// by the manifest version. Nothing is stored unless all assets load.
    pub async fn install(
        &mut self,
        manifest: &CacheManifest,
        dist_dir: &Path,
        entry: &str,
    ) -> Result<usize, OfflineError> {
        let mut cache = Cache::new();
        for asset in &manifest.assets {
            let file = asset_file(dist_dir, entry, asset)?;
            let bytes = match tokio::fs::read(&file).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(OfflineError::MissingAsset(asset.clone()));
                }
                Err(e) => return Err(OfflineError::Io(e.to_string())),
            };
            cache.insert(asset.clone(), bytes);
        }

        let count = cache.len();
        tracing::info!("offline: installed {} asset(s) into '{}'", count, manifest.version);
        self.caches.insert(manifest.version.clone(), cache);
        Ok(count)
    }

    /// Make `manifest.version` current and delete every other cache.
    /// Returns the names of the deleted caches.
    pub fn activate(&mut self, manifest: &CacheManifest) -> Vec<String> {
        let mut stale: Vec<String> = self
            .caches
            .keys()
            .filter(|name| **name != manifest.version)
            .cloned()
            .collect();
        stale.sort();

        for name in &stale {
            self.caches.remove(name);
            tracing::info!("offline: deleted stale cache '{}'", name);
        }
        self.active = Some(manifest.version.clone());
        stale
    }

    pub fn active_version(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Cached bytes for `path` from the active cache
    pub fn lookup(&self, path: &str) -> Option<&[u8]> {
        let active = self.active.as_ref()?;
        self.caches
            .get(active)?
            .get(path)
            .map(|bytes| bytes.as_slice())
    }

    pub fn cache_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.caches.keys().map(|k| k.as_str()).collect();
        names.sort();
        names
    }
}
