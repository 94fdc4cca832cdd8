// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Carousel controllers for storefront pages.
//!
//! Two variants share one effect vocabulary:
//!
//! - [`RotatingCarousel`] swaps an "active" marker between slides on a timer
//!   and on indicator clicks.
//! - [`LoopingCarousel`] translates a slide track bracketed by two clones,
//!   giving the illusion of endless motion, and follows touch swipes.
//!
//! # Design Principles
//!
//! - **Pure transitions**: Controllers map `(state, event)` to an ordered
//!   list of [`Effect`]s. No DOM, no clock.
//! - **Single-owner timers**: Every callback lives in one slot; re-arming
//!   cancels the previous one first, and stale callbacks are ignored.
//! - **Dumb hosts**: A [`SlideView`] and a [`TimerHost`] execute effects via
//!   [`apply_effects`] and report events back.

use thiserror::Error;

/// Why a carousel could not be set up. The host treats every variant as
/// "leave the widget inert".
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SetupError {
    /// No slide elements were found.
    #[error("no slides")]
    NoSlides,
    /// No indicator elements were found.
    #[error("no indicators")]
    NoIndicators,
    /// The measured slide width is negative or not a number.
    #[error("invalid slide width: {0}")]
    InvalidWidth(f64),
}

mod config;
mod effect;
mod looping;
mod port;
mod rotating;

pub use config::CarouselConfig;
pub use effect::{Effect, Motion, TimerKind};
pub use looping::{layout, LoopEvent, LoopingCarousel, Slot};
pub use port::{apply_effects, Carousel, SlideView, TimerHost};
pub use rotating::{RotatingCarousel, RotatingEvent};
pub use storefront_app_core::timer::TimerId;
