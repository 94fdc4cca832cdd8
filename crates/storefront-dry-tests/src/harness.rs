// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Carousel driver wiring a controller to a recording view and manual timers.

use storefront_carousel::{apply_effects, Carousel, Effect, Motion, SlideView};

use crate::timers::ManualTimers;

/// [`SlideView`] that remembers what it was told.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingView {
    /// Slide currently marked active.
    pub active: Option<usize>,
    /// Every activation, in order.
    pub activations: Vec<usize>,
    /// Current track offset.
    pub offset_px: f64,
    /// Every translation, in order.
    pub moves: Vec<(f64, Motion)>,
}

impl SlideView for RecordingView {
    fn activate(&mut self, index: usize) {
        self.active = Some(index);
        self.activations.push(index);
    }

    fn translate(&mut self, offset_px: f64, motion: Motion) {
        self.offset_px = offset_px;
        self.moves.push((offset_px, motion));
    }
}

/// A controller plus its fake host.
#[derive(Debug)]
pub struct CarouselHarness<C> {
    /// Controller under test.
    pub carousel: C,
    /// What was rendered.
    pub view: RecordingView,
    /// Virtual clock.
    pub timers: ManualTimers,
}

impl<C: Carousel> CarouselHarness<C> {
    /// Wrap `carousel` and run its start transition.
    pub fn started(carousel: C) -> Self {
        let mut harness = Self {
            carousel,
            view: RecordingView::default(),
            timers: ManualTimers::new(),
        };
        let effects = harness.carousel.start();
        harness.apply(&effects);
        harness
    }

    /// Deliver an input event at the current virtual time.
    pub fn send(&mut self, event: C::Event) -> Vec<Effect> {
        let effects = self.carousel.handle(event);
        self.apply(&effects);
        effects
    }

    /// Fire every timer due up to `until_ms`, then park the clock there.
    /// Returns how many callbacks fired.
    pub fn run_until(&mut self, until_ms: u64) -> usize {
        let mut fired = 0;
        while let Some(due) = self.timers.pop_due(until_ms) {
            let effects = self.carousel.on_timer(due.timer);
            self.apply(&effects);
            fired += 1;
        }
        self.timers.set_now(until_ms);
        fired
    }

    /// Advance the clock by `delta_ms`.
    pub fn run_for(&mut self, delta_ms: u64) -> usize {
        let until = self.timers.now_ms() + delta_ms;
        self.run_until(until)
    }

    fn apply(&mut self, effects: &[Effect]) {
        apply_effects(effects, &mut self.view, &mut self.timers);
    }
}
