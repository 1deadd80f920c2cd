//! Per-key in-flight registry. Callers holding the same key are serialized,
//! so concurrent misses collapse into one upstream call: the first caller
//! generates, the rest wait and then find the fresh entry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other caller holds `key`, then holds it until the guard drops.
    pub async fn acquire(&self, key: &str) -> KeyGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries left behind by waiters cancelled after the last release.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(key.to_string()).or_default().clone()
        };

        let guard = lock.lock_owned().await;
        KeyGuard {
            owner: self,
            key: key.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of keys currently held or awaited.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct KeyGuard<'a> {
    owner: &'a KeyedLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());

        // Only the registry's own handle left: nobody is waiting on this key.
        let mut locks = self
            .owner
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_registry_empties_after_release() {
        let locks = KeyedLocks::new();
        {
            let _guard = locks.acquire("a").await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_same_key_is_serialized() {
        let locks = KeyedLocks::new();
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let (locks, active, peak) = (&locks, &active, &peak);
        let work = move || async move {
            let _guard = locks.acquire("k").await;
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            active.fetch_sub(1, Ordering::SeqCst);
        };

        tokio::join!(work(), work(), work());
        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let _a = locks.acquire("a").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire("b")).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_waiter_entry_is_pruned() {
        let locks = KeyedLocks::new();
        let holder = locks.acquire("k").await;

        let mut waiter = Box::pin(locks.acquire("k"));
        tokio::select! {
            biased;
            _ = &mut waiter => panic!("waiter should block while the key is held"),
            _ = std::future::ready(()) => {}
        }

        // Release while the waiter is queued, then cancel the waiter.
        drop(holder);
        drop(waiter);
        assert_eq!(locks.len(), 1);

        drop(locks.acquire("other").await);
        assert!(locks.is_empty());
    }
}
