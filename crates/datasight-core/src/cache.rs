//! Content-addressed cache of analysis results.
//!
//! Each fingerprint owns a slot guarded by its own mutex. The first caller
//! for a fingerprint computes while holding the slot lock; concurrent callers
//! block on that lock and reuse the stored result. Failed computations leave
//! the slot empty, so the next holder of the lock computes again. Completed
//! entries are evicted oldest first once `capacity` is exceeded.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use datasight_model::AnalysisResult;
use tracing::{debug, trace};

use crate::fingerprint::Fingerprint;

type Slot = Arc<Mutex<Option<Arc<AnalysisResult>>>>;

#[derive(Default)]
struct Entries {
    slots: HashMap<Fingerprint, Slot>,
    /// Completed fingerprints in insertion order.
    order: VecDeque<Fingerprint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct ResultCache {
    capacity: usize,
    entries: Mutex<Entries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic inside a computation leaves the slot empty, which is a valid state.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ResultCache {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(Entries::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Stored result for `key`, without waiting on an in-flight computation.
    pub fn get(&self, key: &Fingerprint) -> Option<Arc<AnalysisResult>> {
        let slot = lock(&self.entries).slots.get(key).cloned()?;
        slot.try_lock().ok()?.clone()
    }

    pub fn clear(&self) {
        let mut entries = lock(&self.entries);
        entries.slots.clear();
        entries.order.clear();
    }

    /// Return the cached result for `key`, computing it at most once at a time.
    ///
    /// Errors are returned to the caller that hit them and are not stored.
    pub fn get_or_compute<E, F>(&self, key: Fingerprint, compute: F) -> Result<Arc<AnalysisResult>, E>
    where
        F: FnOnce() -> Result<AnalysisResult, E>,
    {
        let slot = {
            let mut entries = lock(&self.entries);
            Arc::clone(entries.slots.entry(key).or_default())
        };

        let mut stored = lock(&slot);
        if let Some(result) = stored.as_ref() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(fingerprint = %key, "result cache hit");
            return Ok(Arc::clone(result));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        match compute() {
            Ok(result) => {
                let result = Arc::new(result);
                *stored = Some(Arc::clone(&result));
                drop(stored);
                self.record_completed(key);
                Ok(result)
            }
            Err(err) => {
                drop(stored);
                self.forget_empty(key, &slot);
                debug!(fingerprint = %key, "computation failed; nothing cached");
                Err(err)
            }
        }
    }

    fn record_completed(&self, key: Fingerprint) {
        let mut entries = lock(&self.entries);
        if entries.order.contains(&key) {
            return;
        }
        entries.order.push_back(key);
        while entries.order.len() > self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.slots.remove(&oldest);
                debug!(fingerprint = %oldest, "evicted cached result");
            }
        }
    }

    fn forget_empty(&self, key: Fingerprint, slot: &Slot) {
        let mut entries = lock(&self.entries);
        let same_slot = entries
            .slots
            .get(&key)
            .is_some_and(|current| Arc::ptr_eq(current, slot));
        if same_slot && slot.try_lock().is_ok_and(|stored| stored.is_none()) {
            entries.slots.remove(&key);
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(64)
    }
}
