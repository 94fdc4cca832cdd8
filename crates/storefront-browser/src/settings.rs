// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Page-wide tunables, provisioned as one JSON blob.

use serde::{Deserialize, Serialize};
use storefront_app_core::config::{ConfigStore, SettingsSource};
use storefront_app_core::toast::ToastConfig;
use storefront_carousel::CarouselConfig;
use storefront_pages::search::SearchConfig;

/// Config key of the settings blob.
pub const SETTINGS_KEY: &str = "settings";

/// Everything a storefront page can tune. Missing fields keep their
/// defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontSettings {
    /// Carousel timing and gestures.
    pub carousel: CarouselConfig,
    /// Search-as-you-type.
    pub search: SearchConfig,
    /// Toast queue.
    pub toast: ToastConfig,
}

impl StorefrontSettings {
    /// Where the settings blob lives in `store`.
    pub const fn source<S: ConfigStore>(store: S) -> SettingsSource<S> {
        SettingsSource::new(store, SETTINGS_KEY)
    }

    /// Settings from `store`; an unreadable blob is logged and the defaults
    /// are used instead.
    pub fn load<S: ConfigStore>(store: S) -> Self {
        Self::source(store).load_or_default()
    }
}
