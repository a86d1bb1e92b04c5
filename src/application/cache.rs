//! Memoized rule loading.
//!
//! The first [`RuleCache::get`] reads the artifact; later calls return the
//! same immutable snapshot until the artifact's modification time changes
//! or [`RuleCache::refresh`] is called. Failed loads are never cached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::RuleStore;
use crate::error::StoreError;
use crate::port::{LoadOutcome, RuleSource};

/// A loaded rule table shared by every reader of the cache.
#[derive(Debug, Clone)]
pub struct LoadedRules {
    pub store: Arc<RuleStore>,
    pub loaded_at: DateTime<Utc>,
}

/// What the cache currently knows about the artifact.
#[derive(Debug, Clone)]
pub enum Snapshot {
    Loaded(LoadedRules),
    Absent,
}

impl Snapshot {
    /// The rule store, or `None` when the artifact is absent.
    #[must_use]
    pub fn store(&self) -> Option<&Arc<RuleStore>> {
        match self {
            Self::Loaded(loaded) => Some(&loaded.store),
            Self::Absent => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

struct Entry {
    fingerprint: Option<SystemTime>,
    snapshot: Snapshot,
}

/// Read-mostly cache in front of a [`RuleSource`].
pub struct RuleCache<S> {
    source: S,
    entry: RwLock<Option<Entry>>,
    loads: AtomicU64,
}

impl<S: RuleSource> RuleCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entry: RwLock::new(None),
            loads: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the cached snapshot, reloading if the artifact changed.
    pub fn get(&self) -> Result<Snapshot, StoreError> {
        let fingerprint = self.source.fingerprint()?;

        if let Some(entry) = self.entry.read().as_ref() {
            if entry.fingerprint == fingerprint {
                return Ok(entry.snapshot.clone());
            }
            debug!(path = %self.source.location().display(), "Rules file changed, reloading");
        }

        self.reload(fingerprint)
    }

    /// Reload unconditionally.
    pub fn refresh(&self) -> Result<Snapshot, StoreError> {
        let fingerprint = self.source.fingerprint()?;
        self.reload(fingerprint)
    }

    /// Drop the cached snapshot so the next `get` reads the artifact.
    pub fn invalidate(&self) {
        *self.entry.write() = None;
    }

    /// Number of times the underlying source has been read.
    #[must_use]
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    fn reload(&self, fingerprint: Option<SystemTime>) -> Result<Snapshot, StoreError> {
        self.loads.fetch_add(1, Ordering::Relaxed);

        let outcome = match self.source.load() {
            Ok(outcome) => outcome,
            Err(err) => {
                self.invalidate();
                return Err(err);
            }
        };

        let snapshot = match outcome {
            LoadOutcome::Present(store) => Snapshot::Loaded(LoadedRules {
                store: Arc::new(store),
                loaded_at: Utc::now(),
            }),
            LoadOutcome::Absent => Snapshot::Absent,
        };

        *self.entry.write() = Some(Entry {
            fingerprint,
            snapshot: snapshot.clone(),
        });
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rule;
    use parking_lot::Mutex;
    use std::path::Path;
    use std::time::Duration;

    #[derive(Default)]
    struct MemorySource {
        rules: Mutex<Option<Vec<Rule>>>,
        stamp: Mutex<u64>,
        broken: Mutex<bool>,
    }

    impl MemorySource {
        fn with(rules: Vec<Rule>) -> Self {
            let source = Self::default();
            *source.rules.lock() = Some(rules);
            source
        }

        fn replace(&self, rules: Vec<Rule>, stamp: u64) {
            *self.rules.lock() = Some(rules);
            *self.stamp.lock() = stamp;
        }
    }

    impl RuleSource for MemorySource {
        fn location(&self) -> &Path {
            Path::new("memory://rules")
        }

        fn load(&self) -> Result<LoadOutcome, StoreError> {
            if *self.broken.lock() {
                return Err(StoreError::DataFormat {
                    path: self.location().to_path_buf(),
                    reason: "broken".to_string(),
                });
            }
            Ok(match self.rules.lock().clone() {
                Some(rules) => LoadOutcome::Present(RuleStore::new(rules)),
                None => LoadOutcome::Absent,
            })
        }

        fn fingerprint(&self) -> Result<Option<SystemTime>, StoreError> {
            Ok(self
                .rules
                .lock()
                .as_ref()
                .map(|_| SystemTime::UNIX_EPOCH + Duration::from_secs(*self.stamp.lock())))
        }
    }

    fn rule(antecedent: &str) -> Rule {
        Rule::new(antecedent, "b", 0.1, 0.5, 1.5)
    }

    #[test]
    fn repeated_get_shares_one_snapshot() {
        let cache = RuleCache::new(MemorySource::with(vec![rule("a")]));
        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert_eq!(cache.load_count(), 1);
        assert!(Arc::ptr_eq(first.store().unwrap(), second.store().unwrap()));
    }

    #[test]
    fn fingerprint_change_reloads() {
        let cache = RuleCache::new(MemorySource::with(vec![rule("a")]));
        cache.get().unwrap();
        cache.source().replace(vec![rule("a"), rule("c")], 5);
        assert_eq!(cache.get().unwrap().store().unwrap().len(), 2);
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn invalidate_forces_next_read() {
        let cache = RuleCache::new(MemorySource::with(vec![rule("a")]));
        cache.get().unwrap();
        cache.invalidate();
        cache.get().unwrap();
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = RuleCache::new(MemorySource::with(vec![rule("a")]));
        *cache.source().broken.lock() = true;
        assert!(cache.get().is_err());
        *cache.source().broken.lock() = false;
        assert_eq!(cache.get().unwrap().store().unwrap().len(), 1);
        assert_eq!(cache.load_count(), 2);
    }
}
