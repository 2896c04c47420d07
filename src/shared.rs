//! # Shared Resource Wrapper
//!
//! Chunks are created on the main thread, filled on a worker, meshed on
//! another worker and committed back on the main thread. `Shared<T>` is the
//! handle that crosses those boundaries: a reference-counted read-write lock
//! with the lock ceremony kept in one place.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe, reference-counted container with read-write locking.
///
/// Cloning a `Shared<T>` clones the handle, not the value; all clones see the
/// same underlying `T`.
#[derive(Debug)]
pub struct Shared<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Shared<T> {
    /// Wraps a value for shared cross-thread access.
    pub fn new(value: T) -> Self {
        Shared {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Acquires shared read access.
    ///
    /// # Panics
    /// Panics if a writer panicked while holding the lock.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read().expect("shared resource lock poisoned")
    }

    /// Acquires exclusive write access.
    ///
    /// # Panics
    /// Panics if a writer panicked while holding the lock.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write().expect("shared resource lock poisoned")
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_alias_the_same_value() {
        let a = Shared::new(1);
        let b = a.clone();
        *b.get_mut() += 1;
        assert_eq!(*a.get(), 2);
    }

    #[test]
    fn survives_a_thread_hop() {
        let counter = Shared::new(0usize);
        let worker = counter.clone();
        let handle = std::thread::spawn(move || {
            *worker.get_mut() += 1;
        });
        handle.join().unwrap();
        assert_eq!(*counter.get(), 1);
    }
}
