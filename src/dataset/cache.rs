//! Per-definition memo of constructed slices.

use super::capability::DatasetLike;
use super::factory::SliceKey;
use super::slice::Slice;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Append-only map from resolved label tuple to the one `Slice` for it.
///
/// Hits only take the read lock. Misses build the slice without holding any
/// lock and then insert it unless another caller got there first; the loser
/// is dropped and every caller sees the slice that is in the map. Entries are
/// never evicted.
#[derive(Debug, Default)]
pub struct SliceCache {
    entries: RwLock<HashMap<SliceKey, Arc<Slice>>>,
}

impl SliceCache {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, key: &SliceKey) -> Option<Arc<Slice>> {
        // Nothing is ever removed or mutated in place, so a poisoned map is
        // still consistent.
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Returns the cached slice for `key`, building it with `construct` if
    /// none is cached yet. Concurrent misses may each build one, but only the
    /// first inserted is ever returned.
    pub fn get_or_insert_with(&self, key: SliceKey, construct: impl FnOnce(&SliceKey) -> Slice) -> Arc<Slice> {
        if let Some(hit) = self.get(&key) {
            log::trace!("slice cache hit: {}", hit.name());
            return hit;
        }

        let built = Arc::new(construct(&key));

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let cached = Arc::clone(entries.entry(key).or_insert_with(|| Arc::clone(&built)));
        if Arc::ptr_eq(&cached, &built) {
            log::debug!("constructed {} ({} columns)", cached.name(), cached.columns().len());
        } else {
            log::trace!("discarded duplicate build of {}", built.name());
        }
        cached
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}
