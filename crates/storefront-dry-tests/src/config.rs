// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake standing in for browser `localStorage`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use storefront_app_core::config::{ConfigError, ConfigStore};

#[derive(Default)]
struct Shelf {
    blobs: BTreeMap<String, String>,
    reads: usize,
    unavailable: bool,
}

/// Shared, cloneable in-memory [`ConfigStore`].
///
/// Clones see the same blobs and counters, so a test can hand one clone to
/// a `SettingsSource` and inspect or rewire the other.
///
/// ```
/// use storefront_app_core::config::SettingsSource;
/// use storefront_dry_tests::InMemoryConfigStore;
///
/// let store = InMemoryConfigStore::with_blob("settings", r#"{"debounce_ms": 150}"#);
/// let source = SettingsSource::new(store.clone(), "settings");
/// let value: serde_json::Value = source.load().unwrap();
/// assert_eq!(value["debounce_ms"], 150);
/// assert_eq!(store.reads(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    shelf: Rc<RefCell<Shelf>>,
}

impl InMemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one blob.
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let store = Self::new();
        store.put(key, blob);
        store
    }

    /// Replace the blob under `key`, as a dev poking at `localStorage` would.
    pub fn put(&self, key: &str, blob: &str) {
        self.shelf
            .borrow_mut()
            .blobs
            .insert(key.to_string(), blob.to_string());
    }

    /// Make every read fail as if storage were disabled.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.shelf.borrow_mut().unavailable = unavailable;
    }

    /// Attempted reads, failed ones included.
    pub fn reads(&self) -> usize {
        self.shelf.borrow().reads
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn read(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let mut shelf = self.shelf.borrow_mut();
        shelf.reads += 1;
        if shelf.unavailable {
            return Err(ConfigError::Unavailable("simulated storage outage".into()));
        }
        Ok(shelf.blobs.get(key).cloned())
    }
}
