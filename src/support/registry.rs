//! Versioned registry of immutable, shared values.
//!
//! A [`Registry`] maps a dataset version (an economic year, a release tag)
//! to one fully built value behind an [`Arc`]. Readers clone the `Arc` and
//! then query it without holding any lock.
//!
//! Builds are coalesced per version: concurrent [`Registry::get_or_build`]
//! calls for the same version run the build once, and the other callers
//! wait for its outcome. A failed build publishes nothing, so readers never
//! see a partially constructed value, and a later call retries.

use std::{
    collections::HashMap,
    fmt::Debug,
    hash::Hash,
    sync::Arc,
};

use parking_lot::{Mutex, RwLock};

/// Thread-safe map from dataset version to a published immutable value.
#[derive(Debug)]
pub struct Registry<K, T> {
    published: RwLock<HashMap<K, Arc<T>>>,
    building: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K, T> Default for Registry<K, T> {
    fn default() -> Self {
        Self {
            published: RwLock::new(HashMap::new()),
            building: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, T> Registry<K, T>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value published for `version`, if any.
    #[must_use]
    pub fn get(&self, version: &K) -> Option<Arc<T>> {
        self.published.read().get(version).cloned()
    }

    /// Returns the published value for `version`, building it first if needed.
    ///
    /// Only one build per version runs at a time. Callers arriving while a
    /// build is in flight block until it finishes and then receive its value.
    ///
    /// # Errors
    ///
    /// Returns the build's error. Nothing is published in that case.
    pub fn get_or_build<E>(
        &self,
        version: &K,
        build: impl FnOnce() -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        if let Some(value) = self.get(version) {
            return Ok(value);
        }

        let slot = self.slot(version);
        let outcome = {
            let _guard = slot.lock();

            // A build that finished while this caller waited has published already.
            match self.get(version) {
                Some(value) => Ok(value),
                None => {
                    tracing::debug!(?version, "building dataset version");
                    build().map(|value| self.publish_new(version, value))
                }
            }
        };

        self.release(version, slot);
        outcome
    }

    /// Builds a replacement for `version` and swaps it in once complete.
    ///
    /// Readers holding the previous value keep using it; new readers see the
    /// replacement only after it is fully built.
    ///
    /// # Errors
    ///
    /// Returns the build's error, leaving the previously published value in place.
    pub fn rebuild<E>(&self, version: &K, build: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        let slot = self.slot(version);
        let outcome = {
            let _guard = slot.lock();
            tracing::debug!(?version, "rebuilding dataset version");
            build().map(|value| self.publish_new(version, value))
        };

        self.release(version, slot);
        outcome
    }

    /// Publishes an already built value, returning the one it replaced.
    pub fn publish(&self, version: K, value: Arc<T>) -> Option<Arc<T>> {
        tracing::info!(?version, "published dataset version");
        self.published.write().insert(version, value)
    }

    /// Withdraws `version`, returning its value if it was published.
    pub fn remove(&self, version: &K) -> Option<Arc<T>> {
        self.published.write().remove(version)
    }

    /// Returns the published versions in no particular order.
    #[must_use]
    pub fn versions(&self) -> Vec<K> {
        self.published.read().keys().cloned().collect()
    }

    fn publish_new(&self, version: &K, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.publish(version.clone(), Arc::clone(&value));
        value
    }

    /// Returns the build slot for `version`, creating it if none is in use.
    fn slot(&self, version: &K) -> Arc<Mutex<()>> {
        Arc::clone(
            self.building
                .lock()
                .entry(version.clone())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Hands back a slot taken by [`Self::slot`], dropping the map entry once
    /// no other caller holds it.
    ///
    /// Handles are only cloned or dropped under the `building` lock, so a
    /// strong count of two (the map's and this one) means no caller is waiting.
    fn release(&self, version: &K, slot: Arc<Mutex<()>>) {
        let mut building = self.building.lock();
        let idle = building
            .get(version)
            .is_some_and(|entry| Arc::ptr_eq(entry, &slot) && Arc::strong_count(&slot) == 2);
        if idle {
            building.remove(version);
        }
        drop(slot);
    }
}
