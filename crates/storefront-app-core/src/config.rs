// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Page settings read from browser-side storage.
//!
//! Settings are provisioned out of band (deploy script, dev tools) and only
//! ever read by the page. A [`SettingsSource`] binds a [`ConfigStore`] to the
//! one key its JSON blob lives under.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Read-only storage port for settings text.
pub trait ConfigStore {
    /// Text stored under `key`, or `None` when nothing is stored there.
    fn read(&self, key: &str) -> Result<Option<String>, ConfigError>;
}

/// Why settings could not be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The backing storage cannot be reached (e.g. disabled by the browser).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The stored text is not a valid settings blob.
    #[error("malformed settings under {key:?}: {source}")]
    Malformed {
        /// Key the blob was read from.
        key: String,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
}

/// One JSON settings blob at a fixed key.
#[derive(Debug, Clone)]
pub struct SettingsSource<S> {
    store: S,
    key: &'static str,
}

impl<S: ConfigStore> SettingsSource<S> {
    /// Read settings stored under `key` in `store`.
    pub const fn new(store: S, key: &'static str) -> Self {
        Self { store, key }
    }

    /// Key the blob lives under.
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Decode the blob. Absent or blank text yields `T::default()`; fields
    /// the blob omits are up to `T`'s serde defaults.
    pub fn load<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(text) = self.store.read(self.key)? else {
            debug!(key = self.key, "no stored settings");
            return Ok(T::default());
        };
        if text.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&text).map_err(|source| ConfigError::Malformed {
            key: self.key.to_string(),
            source,
        })
    }

    /// [`load`](Self::load), with any failure logged and replaced by the
    /// defaults. Page boot goes through here.
    pub fn load_or_default<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.load().unwrap_or_else(|err| {
            warn!(key = self.key, error = %err, "settings unreadable, using defaults");
            T::default()
        })
    }
}
