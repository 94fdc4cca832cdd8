// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports between the controllers and their host.
//!
//! The state machines only produce [`Effect`]s. A host supplies a
//! [`SlideView`] that projects them onto rendered slides and a [`TimerHost`]
//! that owns the actual callbacks; [`apply_effects`] routes each effect to
//! the right side.

use storefront_app_core::timer::TimerId;

use crate::effect::{Effect, Motion, TimerKind};

/// Common surface of both carousel variants.
pub trait Carousel {
    /// Input events besides timers.
    type Event;

    /// Initial placement and first auto-advance.
    fn start(&mut self) -> Vec<Effect>;

    /// Feed one input event.
    fn handle(&mut self, event: Self::Event) -> Vec<Effect>;

    /// A scheduled callback fired.
    fn on_timer(&mut self, timer: TimerId) -> Vec<Effect>;
}

/// Rendering side of the host.
pub trait SlideView {
    /// Show slide `index` as the only active slide.
    fn activate(&mut self, index: usize);

    /// Move the track to `offset_px`.
    fn translate(&mut self, offset_px: f64, motion: Motion);
}

/// Clock side of the host.
pub trait TimerHost {
    /// Schedule `timer` to fire after `delay_ms`.
    fn schedule(&mut self, timer: TimerId, kind: TimerKind, delay_ms: u32);

    /// Drop `timer` if it has not fired yet.
    fn cancel(&mut self, timer: TimerId);
}

/// Execute `effects` in order against the host.
pub fn apply_effects<V, H>(effects: &[Effect], view: &mut V, timers: &mut H)
where
    V: SlideView + ?Sized,
    H: TimerHost + ?Sized,
{
    for effect in effects {
        match *effect {
            Effect::Activate { index } => view.activate(index),
            Effect::Translate { offset_px, motion } => view.translate(offset_px, motion),
            Effect::Schedule {
                timer,
                kind,
                delay_ms,
            } => timers.schedule(timer, kind, delay_ms),
            Effect::Cancel { timer } => timers.cancel(timer),
        }
    }
}
