use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use crate::types::{CacheKey, ProjectView};

/// Mapping from build file to its most recently computed project view.
///
/// Entries are only ever written by a refresh that produced a view, so a hit
/// is always a complete result. There is no expiry: an entry lives until it
/// is invalidated, cleared, or overwritten by a later refresh of the same
/// key (last writer wins).
#[derive(Debug, Default)]
pub struct BuildInformationCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub view: Arc<ProjectView>,
    pub computed_at: SystemTime,
}

impl BuildInformationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<ProjectView>> {
        self.entries.read().get(key).map(|entry| Arc::clone(&entry.view))
    }

    pub fn entry(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.read().get(key).cloned()
    }

    pub fn put(&self, key: CacheKey, view: ProjectView) {
        let entry = CacheEntry {
            key: key.clone(),
            view: Arc::new(view),
            computed_at: SystemTime::now(),
        };

        if self.entries.write().insert(key, entry).is_some() {
            tracing::debug!("Replaced cached build information");
        }
    }

    /// Drop the entry for `key`; returns whether one existed
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.entries.write().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<_> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}
