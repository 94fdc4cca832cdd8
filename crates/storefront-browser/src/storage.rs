// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `localStorage`-backed config store.

use storefront_app_core::config::{ConfigError, ConfigStore};
use web_sys::{Storage, Window};

use crate::console::describe;

/// Prefix that keeps our keys apart from the rest of the site's.
pub(crate) const KEY_PREFIX: &str = "storefront.";

/// Settings text under `storefront.<key>` in `window.localStorage`.
///
/// Storage can be disabled by the browser; reads then fail with
/// [`ConfigError::Unavailable`].
pub(crate) struct LocalStorageConfigStore {
    storage: Option<Storage>,
}

impl LocalStorageConfigStore {
    pub(crate) fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl ConfigStore for LocalStorageConfigStore {
    fn read(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| ConfigError::Unavailable("localStorage disabled".into()))?;
        storage
            .get_item(&format!("{KEY_PREFIX}{key}"))
            .map_err(|err| ConfigError::Unavailable(describe(&err)))
    }
}
