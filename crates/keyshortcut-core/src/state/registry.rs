// Keyshortcut Registry
// Listener records bucketed by physical key value, newest first

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{ListenerId, ListenerRecord};

/// Records filed under one key, most recently registered first
pub type Bucket = Vec<Arc<ListenerRecord>>;

/// Read-only copy of the registry, keyed by physical key value
pub type Snapshot = IndexMap<String, Bucket>;

/// Registry of active listener records.
///
/// Keys keep the order in which their bucket was first created. Within a
/// bucket, each new record is placed at the front. Record ids are unique
/// across all buckets. Buckets emptied by removal are kept.
#[derive(Debug, Default)]
pub struct Registry {
    buckets: IndexMap<String, Bucket>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            buckets: IndexMap::new(),
        }
    }

    /// Prepend a record to the bucket for its key, creating the bucket if needed
    pub fn insert(&mut self, record: ListenerRecord) -> Arc<ListenerRecord> {
        let record = Arc::new(record);
        self.buckets
            .entry(record.key().to_string())
            .or_default()
            .insert(0, record.clone());
        record
    }

    /// Remove every record whose id is in `ids`, from every bucket.
    ///
    /// Unknown ids are ignored. Returns the number of records removed.
    pub fn remove(&mut self, ids: &[ListenerId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let mut removed = 0;
        for bucket in self.buckets.values_mut() {
            let before = bucket.len();
            bucket.retain(|record| !ids.contains(&record.id()));
            removed += before - bucket.len();
        }
        removed
    }

    /// Records for a key in evaluation order; empty if the key was never registered
    pub fn bucket(&self, key: &str) -> &[Arc<ListenerRecord>] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of active records across all buckets
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Check if no record is active
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// True iff any record in any bucket has logging turned on
    pub fn logging_enabled(&self) -> bool {
        self.iter().any(|record| record.log())
    }

    /// Clone the current buckets
    pub fn snapshot(&self) -> Snapshot {
        self.buckets.clone()
    }

    /// Iterate over all active records, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ListenerRecord>> {
        self.buckets.values().flatten()
    }
}
