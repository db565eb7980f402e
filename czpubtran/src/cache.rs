//! In-memory cache of resolved timetable combinations.
//!
//! The connections endpoint is addressed by a guid that CRWS rotates daily.
//! Resolving it costs a request to the combination list, so each client keeps
//! the last guid per combination ID together with the day it was fetched.
//! Entries are never persisted and live as long as the owning client.

use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::CombinationEntry;

/// Combination ID → resolved guid map.
#[derive(Debug, Default)]
pub struct CombinationCache {
    entries: RwLock<HashMap<String, CombinationEntry>>,
}

impl CombinationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for a combination, fresh or not.
    pub async fn get(&self, combination_id: &str) -> Option<CombinationEntry> {
        let guard = self.entries.read().await;
        guard.get(combination_id).cloned()
    }

    /// Get the entry for a combination if it can still be used on `today`.
    pub async fn get_fresh(
        &self,
        combination_id: &str,
        today: NaiveDate,
    ) -> Option<CombinationEntry> {
        self.get(combination_id)
            .await
            .filter(|entry| entry.is_fresh(today))
    }

    /// Insert or overwrite the entry for a combination.
    pub async fn insert(&self, combination_id: impl Into<String>, entry: CombinationEntry) {
        let mut guard = self.entries.write().await;
        guard.insert(combination_id.into(), entry);
    }

    /// Remove a combination, returning the entry it held.
    pub async fn remove(&self, combination_id: &str) -> Option<CombinationEntry> {
        let mut guard = self.entries.write().await;
        guard.remove(combination_id)
    }

    /// Number of cached combinations.
    pub async fn len(&self) -> usize {
        let guard = self.entries.read().await;
        guard.len()
    }

    /// Check if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.entries.read().await;
        guard.is_empty()
    }

    /// Drop every cached combination.
    pub async fn clear(&self) {
        let mut guard = self.entries.write().await;
        guard.clear();
    }
}
