use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Identity of one synchronization cycle for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleToken<K> {
    key: K,
    seq: u64,
}

impl<K> CycleToken<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Issues monotonically increasing cycle tokens per target.
///
/// Starting a cycle supersedes every earlier cycle for the same target. In-flight
/// work is not aborted; its result is dropped when it returns with a token that
/// is no longer the latest.
pub struct SyncTracker<K> {
    next: AtomicU64,
    latest: Mutex<HashMap<K, u64>>,
}

impl<K: Eq + Hash + Clone> SyncTracker<K> {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
            latest: Mutex::new(HashMap::new()),
        }
    }

    pub fn begin(&self, key: K) -> CycleToken<K> {
        let seq = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut latest) = self.latest.lock() {
            latest.insert(key.clone(), seq);
        }
        CycleToken { key, seq }
    }

    pub fn is_latest(&self, token: &CycleToken<K>) -> bool {
        self.latest
            .lock()
            .map(|latest| latest.get(&token.key) == Some(&token.seq))
            .unwrap_or(false)
    }

    /// Runs `apply` only if `token` is still the latest cycle for its key.
    ///
    /// The tracker stays locked while `apply` runs, so no newer cycle can begin
    /// (and then apply) between the check and the write. `apply` must not call
    /// back into this tracker.
    pub fn apply_if_latest<R>(
        &self,
        token: &CycleToken<K>,
        apply: impl FnOnce() -> R,
    ) -> Option<R> {
        let latest = self.latest.lock().ok()?;
        if latest.get(&token.key) != Some(&token.seq) {
            return None;
        }
        let applied = apply();
        drop(latest);
        Some(applied)
    }

    /// Latest sequence issued for `key`, if any.
    pub fn latest(&self, key: &K) -> Option<u64> {
        self.latest
            .lock()
            .ok()
            .and_then(|latest| latest.get(key).copied())
    }
}

impl<K: Eq + Hash + Clone> Default for SyncTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{mpsc, Arc};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_later_cycle_supersedes_earlier() {
        let tracker = SyncTracker::new();
        let first = tracker.begin("a");
        let second = tracker.begin("a");

        assert!(second.seq() > first.seq());
        assert!(!tracker.is_latest(&first));
        assert!(tracker.is_latest(&second));
        assert_eq!(tracker.latest(&"a"), Some(second.seq()));
    }

    #[test]
    fn test_apply_if_latest_skips_stale_token() {
        let tracker = SyncTracker::new();
        let first = tracker.begin("a");
        let second = tracker.begin("a");

        let mut applied = Vec::new();
        assert_eq!(
            tracker.apply_if_latest(&first, || applied.push(first.seq())),
            None
        );
        assert!(tracker
            .apply_if_latest(&second, || applied.push(second.seq()))
            .is_some());
        assert_eq!(applied, vec![second.seq()]);
    }

    #[test]
    fn test_new_cycle_waits_for_running_apply() {
        let tracker = Arc::new(SyncTracker::new());
        let current = tracker.begin("a");
        let (started_tx, started_rx) = mpsc::channel();

        let mut newer = None;
        tracker.apply_if_latest(&current, || {
            let tracker = tracker.clone();
            newer = Some(thread::spawn(move || {
                let token = tracker.begin("a");
                started_tx.send(()).unwrap();
                token
            }));
            // The competing begin cannot get past the lock while we apply.
            assert!(started_rx.recv_timeout(Duration::from_millis(50)).is_err());
        });

        let newer = newer.unwrap().join().unwrap();
        assert!(tracker.is_latest(&newer));
        assert!(!tracker.is_latest(&current));
    }

    #[test]
    fn test_targets_are_independent() {
        let tracker = SyncTracker::new();
        let a = tracker.begin("a");
        let b = tracker.begin("b");

        assert!(tracker.is_latest(&a));
        assert!(tracker.is_latest(&b));
        assert_eq!(tracker.latest(&"c"), None);
    }
}
