// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory cookie store.

use std::collections::BTreeMap;

use storefront_app_core::cookie::CookieStore;

/// Cookie values keyed by name, set directly by tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCookieStore {
    values: BTreeMap<String, String>,
}

impl InMemoryCookieStore {
    /// No cookies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a cookie.
    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    /// Remove a cookie.
    pub fn remove(&mut self, name: &str) {
        self.values.remove(name);
    }
}

impl CookieStore for InMemoryCookieStore {
    fn cookie(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}
