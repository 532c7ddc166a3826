//! Per-photo async mutexes
//!
//! One `tokio::sync::Mutex` per `ItemKey`, created on first use and removed
//! once the last holder or waiter lets go.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use potd_core::ItemKey;

/// Sharded map of per-key locks
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: DashMap<ItemKey, Slot>,
}

/// A key's mutex and the number of holders plus waiters using it.
/// The count only changes under the map's shard lock.
#[derive(Debug, Default)]
struct Slot {
    mutex: Arc<Mutex<()>>,
    users: usize,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`
    ///
    /// Cancel safe: dropping the future while it waits unregisters it.
    pub async fn lock(&self, key: &ItemKey) -> KeyGuard<'_> {
        // The shard guard from `entry` must be released before awaiting
        let mutex = {
            let mut slot = self.locks.entry(key.clone()).or_default();
            slot.users += 1;
            Arc::clone(&slot.mutex)
        };

        let mut guard = KeyGuard {
            locks: self,
            key: key.clone(),
            guard: None,
        };
        guard.guard = Some(mutex.lock_owned().await);
        guard
    }

    /// Number of keys currently locked or awaited
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive access to one key, released on drop
///
/// Also covers the wait itself: until the mutex is acquired `guard` is
/// `None` and dropping only gives up the registration.
#[derive(Debug)]
pub struct KeyGuard<'a> {
    locks: &'a KeyLocks,
    key: ItemKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        let guard = self.guard.take();
        self.locks.locks.remove_if_mut(&self.key, |_, slot| {
            slot.users -= 1;
            slot.users == 0
        });
        drop(guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_entry_removed_after_release() {
        let locks = KeyLocks::new();
        let key = ItemKey::new("john", 5);

        {
            let _guard = locks.lock(&key).await;
            assert_eq!(locks.len(), 1);
        }

        assert!(locks.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_same_key_is_serialized() {
        let locks = Arc::new(KeyLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let inside = Arc::clone(&inside);
            let max_inside = Arc::clone(&max_inside);
            handles.push(tokio::spawn(async move {
                let _guard = locks.lock(&ItemKey::new("john", 5)).await;
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_inside.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_different_keys_do_not_contend() {
        let locks = KeyLocks::new();
        let _first = locks.lock(&ItemKey::new("john", 5)).await;

        let second = tokio::time::timeout(
            Duration::from_millis(100),
            locks.lock(&ItemKey::new("john", 6)),
        )
        .await;

        assert!(second.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_abandoned_wait_leaves_no_entry() {
        let locks = KeyLocks::new();
        let key = ItemKey::new("john", 5);
        let first = locks.lock(&key).await;

        let waited = tokio::time::timeout(Duration::from_millis(10), locks.lock(&key)).await;
        assert!(waited.is_err());
        assert_eq!(locks.len(), 1);

        drop(first);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_wait_keeps_other_waiters_serialized() {
        let locks = KeyLocks::new();
        let key = ItemKey::new("john", 5);
        let first = locks.lock(&key).await;

        let abandoned = tokio::time::timeout(Duration::from_millis(10), locks.lock(&key)).await;
        assert!(abandoned.is_err());

        // Still held, so a new waiter must block on the same mutex
        let blocked = tokio::time::timeout(Duration::from_millis(10), locks.lock(&key)).await;
        assert!(blocked.is_err());

        drop(first);
        let second = locks.lock(&key).await;
        assert_eq!(locks.len(), 1);
        drop(second);
        assert!(locks.is_empty());
    }
}
