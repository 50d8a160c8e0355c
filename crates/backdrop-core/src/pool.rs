//! Reference-counted resource pool.
//!
//! Components that need the same expensive resource (a rasterised glow
//! sprite, for instance) acquire a [`Lease`] by key. The resource is
//! created on first acquire and released when the last lease drops.

use fnv::FnvHashMap;
use std::cell::RefCell;
use std::hash::Hash;
use std::ops::Deref;
use std::rc::{Rc, Weak};

struct Entry<T> {
    value: Rc<T>,
    refs: usize,
}

struct PoolInner<K, T> {
    entries: FnvHashMap<K, Entry<T>>,
    allocations: u64,
}

pub struct SharedPool<K, T> {
    inner: Rc<RefCell<PoolInner<K, T>>>,
}

impl<K, T> Clone for SharedPool<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: Eq + Hash + Clone, T> Default for SharedPool<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone, T> SharedPool<K, T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(PoolInner {
                entries: FnvHashMap::default(),
                allocations: 0,
            })),
        }
    }

    /// Take a lease on `key`, building the resource with `create` if no
    /// lease on it is currently alive. A failed `create` leaves the pool
    /// untouched.
    pub fn acquire<E>(
        &self,
        key: K,
        create: impl FnOnce() -> Result<T, E>,
    ) -> Result<Lease<K, T>, E> {
        let existing = {
            let mut inner = self.inner.borrow_mut();
            inner.entries.get_mut(&key).map(|entry| {
                entry.refs += 1;
                Rc::clone(&entry.value)
            })
        };
        let value = match existing {
            Some(value) => value,
            None => {
                // Build outside the borrow so `create` may use the pool.
                let value = Rc::new(create()?);
                let mut inner = self.inner.borrow_mut();
                inner.allocations += 1;
                inner.entries.insert(
                    key.clone(),
                    Entry {
                        value: Rc::clone(&value),
                        refs: 1,
                    },
                );
                log::debug!("[pool] allocated, {} live", inner.entries.len());
                value
            }
        };
        Ok(Lease {
            pool: Rc::downgrade(&self.inner),
            key,
            value,
        })
    }

    /// Number of distinct resources currently held.
    pub fn live_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Total resources ever created by this pool.
    pub fn allocations(&self) -> u64 {
        self.inner.borrow().allocations
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }
}

/// Handle to a pooled resource. Cloning takes another reference; dropping
/// the last one releases the resource.
pub struct Lease<K: Eq + Hash + Clone, T> {
    pool: Weak<RefCell<PoolInner<K, T>>>,
    key: K,
    value: Rc<T>,
}

impl<K: Eq + Hash + Clone, T> Lease<K, T> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K: Eq + Hash + Clone, T> Deref for Lease<K, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<K: Eq + Hash + Clone, T> Clone for Lease<K, T> {
    fn clone(&self) -> Self {
        if let Some(pool) = self.pool.upgrade() {
            if let Some(entry) = pool.borrow_mut().entries.get_mut(&self.key) {
                entry.refs += 1;
            }
        }
        Self {
            pool: self.pool.clone(),
            key: self.key.clone(),
            value: Rc::clone(&self.value),
        }
    }
}

impl<K: Eq + Hash + Clone, T> Drop for Lease<K, T> {
    fn drop(&mut self) {
        let Some(pool) = self.pool.upgrade() else {
            return;
        };
        // Take the entry out first so the resource is dropped after the
        // borrow ends.
        let released = {
            let mut inner = pool.borrow_mut();
            let last = match inner.entries.get_mut(&self.key) {
                Some(entry) => {
                    entry.refs = entry.refs.saturating_sub(1);
                    entry.refs == 0
                }
                None => false,
            };
            if last {
                inner.entries.remove(&self.key)
            } else {
                None
            }
        };
        if released.is_some() {
            log::debug!("[pool] released");
        }
    }
}
