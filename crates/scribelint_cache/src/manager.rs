//! Bounded, exact-text lint cache.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use scribelint_plugin::Lint;
use tracing::{debug, info};

use crate::entry::hash_text;
use crate::{CacheEntry, CacheError};

const CACHE_FILE: &str = "cache.json";

/// Default number of entries kept in memory.
pub const DEFAULT_CAPACITY: usize = 128;

/// A FIFO-bounded cache of lint results.
pub struct LintCache {
    /// Directory where the cache file is stored.
    cache_dir: PathBuf,
    /// Maximum number of entries.
    capacity: usize,
    /// Entries keyed by content hash.
    entries: HashMap<String, CacheEntry>,
    /// Content hashes, oldest inserted first.
    order: VecDeque<String>,
    /// Whether cache is enabled.
    enabled: bool,
}

impl LintCache {
    /// Creates a new cache that persists into `cache_dir`.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(cache_dir: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
            enabled: true,
        }
    }

    /// Disables caching.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Enables caching.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Returns whether caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the directory the cache persists into.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Computes the BLAKE3 hash of content.
    pub fn hash_content(content: &str) -> String {
        hash_text(content)
    }

    /// Returns the cached lints for exactly `text` under `config_hash`.
    pub fn get(&self, text: &str, config_hash: &str) -> Option<&[Lint]> {
        if !self.enabled {
            return None;
        }
        let hash = hash_text(text);
        self.entries
            .get(&hash)
            .filter(|entry| entry.is_valid(&hash, text, config_hash))
            .map(|entry| entry.lints.as_slice())
    }

    /// Stores lints for `text`, evicting the oldest entries beyond capacity.
    ///
    /// Replacing an existing entry keeps its place in the eviction order.
    pub fn insert(&mut self, text: &str, config_hash: &str, lints: Vec<Lint>) {
        if !self.enabled {
            return;
        }
        self.push(CacheEntry::new(text, config_hash, lints));
    }

    fn push(&mut self, entry: CacheEntry) {
        let key = entry.content_hash.clone();
        if self.entries.insert(key.clone(), entry).is_none() {
            self.order.push_back(key);
        }
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                debug!(hash = %oldest, "evicted cache entry");
            }
        }
    }

    /// Removes the entry for `text`.
    pub fn remove(&mut self, text: &str) {
        let key = hash_text(text);
        if self.entries.remove(&key).is_some() {
            self.order.retain(|k| *k != key);
        }
    }

    /// Clears all cache entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Loads cache from disk.
    ///
    /// Entries are read in insertion order; when the file holds more than the
    /// capacity, the oldest ones are dropped.
    pub fn load(&mut self) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        let cache_file = self.cache_dir.join(CACHE_FILE);

        if !cache_file.exists() {
            debug!("No cache file found at {}", cache_file.display());
            return Ok(());
        }

        let content = fs::read_to_string(&cache_file)?;
        let entries: Vec<CacheEntry> =
            serde_json::from_str(&content).map_err(|e| CacheError::corrupted(e.to_string()))?;

        self.clear();
        for entry in entries {
            if hash_text(&entry.text) != entry.content_hash {
                return Err(CacheError::corrupted("content hash does not match text"));
            }
            self.push(entry);
        }

        info!("Loaded {} cache entries", self.entries.len());
        Ok(())
    }

    /// Saves cache to disk.
    pub fn save(&self) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        fs::create_dir_all(&self.cache_dir)?;

        let entries: Vec<&CacheEntry> = self
            .order
            .iter()
            .filter_map(|key| self.entries.get(key))
            .collect();
        let cache_file = self.cache_dir.join(CACHE_FILE);
        fs::write(&cache_file, serde_json::to_string(&entries)?)?;

        info!(
            "Saved {} cache entries to {}",
            entries.len(),
            cache_file.display()
        );

        Ok(())
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LintCache {
    fn default() -> Self {
        Self::new(".scribelint-cache", DEFAULT_CAPACITY)
    }
}
