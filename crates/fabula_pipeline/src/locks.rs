//! Per-story serialization.

use fabula_core::StoryId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

type LockTable = Arc<std::sync::Mutex<HashMap<StoryId, Arc<Mutex<()>>>>>;

/// One async lock per story id.
///
/// A second invocation for the same story waits for the first to finish;
/// invocations for different stories never block each other. An entry lives
/// only while some invocation holds or waits on it.
#[derive(Debug, Default)]
pub struct StoryLocks {
    locks: LockTable,
}

impl StoryLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    fn get_or_create(&self, id: StoryId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Waiters dropped before acquiring leave entries only the table holds
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(id).or_default())
    }

    /// Wait for exclusive access to a story.
    pub async fn acquire(&self, id: StoryId) -> StoryGuard {
        let lock = self.get_or_create(id);
        if lock.try_lock().is_err() {
            debug!(story_id = %id, "Waiting for in-flight workflow on story");
        }
        let guard = Arc::clone(&lock).lock_owned().await;
        StoryGuard {
            id,
            lock,
            guard: Some(guard),
            table: Arc::clone(&self.locks),
        }
    }

    /// Number of stories with a held or awaited lock.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no story is locked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive access to one story; released on drop.
///
/// The last guard out removes the story's entry from the table.
#[derive(Debug)]
pub struct StoryGuard {
    id: StoryId,
    lock: Arc<Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
    table: LockTable,
}

impl Drop for StoryGuard {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        // Clones are only taken under the table lock, so two references
        // (table + ours) means nobody else is waiting.
        let idle = locks
            .get(&self.id)
            .is_some_and(|entry| Arc::ptr_eq(entry, &self.lock))
            && Arc::strong_count(&self.lock) == 2;
        if idle {
            locks.remove(&self.id);
        }
    }
}
