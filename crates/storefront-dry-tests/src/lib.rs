// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for storefront crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory settings store standing in for `localStorage`
//! - [`cookies`] - In-memory cookie store
//! - [`timers`] - Manual clock implementing [`storefront_carousel::TimerHost`]
//! - [`harness`] - Carousel driver wiring a controller to the fakes
//! - [`fixtures`] - Product catalogue and page data samples

pub mod config;
pub mod cookies;
pub mod fixtures;
pub mod harness;
pub mod timers;

// Re-export commonly used items at crate root for convenience
pub use config::InMemoryConfigStore;
pub use cookies::InMemoryCookieStore;
pub use fixtures::{sample_page_data, sample_products};
pub use harness::{CarouselHarness, RecordingView};
pub use timers::ManualTimers;
