//! Key/value persistence
//!
//! Backends:
//! - `MemoryStorage` for tests and headless runs
//! - `FileStorage`, a JSON object on disk (native)
//! - `WebStorage`, the browser's LocalStorage (wasm32)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// String key/value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store that counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = BTreeMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values, writes: 0 }
    }

    /// Number of successful `set` calls
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// JSON object file, rewritten through a temporary sibling on every set
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed reading {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed parsing {}", self.path.display()))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed creating {}", parent.display()))?;
            }
        }
        let encoded = serde_json::to_vec_pretty(values)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encoded).with_context(|| format!("failed writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed replacing {}", self.path.display()))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking every future save
        let mut values = self.read_all().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable storage: {e:#}");
            BTreeMap::new()
        });
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct WebStorage;

#[cfg(target_arch = "wasm32")]
impl WebStorage {
    fn local_storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .context("LocalStorage unavailable")
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::local_storage()?
            .get_item(key)
            .map_err(|e| anyhow::anyhow!("failed reading {key}: {e:?}"))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|e| anyhow::anyhow!("failed writing {key}: {e:?}"))
    }
}
