// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Index-swap carousel: one active slide, cycled on a timer and jumpable via
//! indicator dots.
//!
//! States are the slide positions `0..N`. The timer moves `i -> (i + 1) % N`;
//! an indicator click moves `i -> k` and gives slide `k` a full fresh dwell
//! by canceling the pending advance before the jump and re-arming after it.

use storefront_app_core::timer::{TimerId, TimerIds, TimerSlot};
use tracing::{debug, warn};

use crate::config::CarouselConfig;
use crate::effect::{disarm, rearm, Effect, TimerKind};
use crate::port::Carousel;
use crate::SetupError;

/// Non-timer inputs of the index-swap carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotatingEvent {
    /// Indicator dot `k` was clicked.
    IndicatorClicked(usize),
}

/// Index-swap carousel state.
#[derive(Debug, Clone)]
pub struct RotatingCarousel {
    slides: usize,
    current: usize,
    interval_ms: u32,
    ids: TimerIds,
    advance: TimerSlot,
}

impl RotatingCarousel {
    /// Build a controller for `slides` slides and `indicators` dots.
    ///
    /// Either count being zero means the markup is absent and the widget
    /// stays inert.
    pub fn new(
        slides: usize,
        indicators: usize,
        config: &CarouselConfig,
    ) -> Result<Self, SetupError> {
        if slides == 0 {
            return Err(SetupError::NoSlides);
        }
        if indicators == 0 {
            return Err(SetupError::NoIndicators);
        }
        Ok(Self {
            slides,
            current: 0,
            interval_ms: config.rotate_interval_ms,
            ids: TimerIds::new(),
            advance: TimerSlot::new(),
        })
    }

    /// Position of the active slide.
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of slides.
    pub const fn len(&self) -> usize {
        self.slides
    }

    /// Always false; an empty carousel cannot be built.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether slide `index` carries the active marker.
    pub const fn is_active(&self, index: usize) -> bool {
        index == self.current
    }

    /// The auto-advance timer currently pending.
    pub const fn pending_timer(&self) -> Option<TimerId> {
        self.advance.current()
    }

    fn jump(&mut self, target: usize, out: &mut Vec<Effect>) {
        disarm(&mut self.advance, out);
        self.current = target;
        out.push(Effect::Activate { index: target });
        rearm(
            &mut self.advance,
            &mut self.ids,
            TimerKind::Advance,
            self.interval_ms,
            out,
        );
    }
}

impl Carousel for RotatingCarousel {
    type Event = RotatingEvent;

    fn start(&mut self) -> Vec<Effect> {
        let mut out = Vec::with_capacity(3);
        self.jump(0, &mut out);
        out
    }

    fn handle(&mut self, event: RotatingEvent) -> Vec<Effect> {
        let RotatingEvent::IndicatorClicked(target) = event;
        if target >= self.slides {
            warn!(target, slides = self.slides, "indicator without a slide");
            return Vec::new();
        }
        debug!(from = self.current, to = target, "indicator jump");
        let mut out = Vec::with_capacity(3);
        self.jump(target, &mut out);
        out
    }

    fn on_timer(&mut self, timer: TimerId) -> Vec<Effect> {
        if !self.advance.claim(timer) {
            debug!(%timer, "stale advance ignored");
            return Vec::new();
        }
        let next = (self.current + 1) % self.slides;
        let mut out = Vec::with_capacity(2);
        self.jump(next, &mut out);
        out
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(slides: usize) -> RotatingCarousel {
        RotatingCarousel::new(slides, slides, &CarouselConfig::default()).unwrap()
    }

    fn scheduled(effects: &[Effect]) -> TimerId {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Schedule { timer, .. } => Some(*timer),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn missing_markup_is_inert() {
        let cfg = CarouselConfig::default();
        assert_eq!(
            RotatingCarousel::new(0, 3, &cfg).unwrap_err(),
            SetupError::NoSlides
        );
        assert_eq!(
            RotatingCarousel::new(3, 0, &cfg).unwrap_err(),
            SetupError::NoIndicators
        );
    }

    #[test]
    fn start_activates_first_slide_and_arms_timer() {
        let mut c = carousel(3);
        let effects = c.start();
        assert_eq!(effects[0], Effect::Activate { index: 0 });
        assert!(matches!(
            effects[1],
            Effect::Schedule {
                kind: TimerKind::Advance,
                delay_ms: 3000,
                ..
            }
        ));
        assert!(c.is_active(0));
    }

    #[test]
    fn timer_wraps_around() {
        let mut c = carousel(2);
        let mut t = scheduled(&c.start());
        t = scheduled(&c.on_timer(t));
        assert_eq!(c.current(), 1);
        c.on_timer(t);
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn indicator_cancels_before_activating() {
        let mut c = carousel(4);
        let pending = scheduled(&c.start());
        let effects = c.handle(RotatingEvent::IndicatorClicked(2));
        assert_eq!(effects[0], Effect::Cancel { timer: pending });
        assert_eq!(effects[1], Effect::Activate { index: 2 });
        assert!(matches!(effects[2], Effect::Schedule { .. }));
        assert_eq!(effects.len(), 3);
    }

    #[test]
    fn stale_timer_after_click_does_nothing() {
        let mut c = carousel(4);
        let pending = scheduled(&c.start());
        c.handle(RotatingEvent::IndicatorClicked(3));
        assert!(c.on_timer(pending).is_empty());
        assert_eq!(c.current(), 3);
    }

    #[test]
    fn out_of_range_indicator_is_ignored() {
        let mut c = RotatingCarousel::new(2, 5, &CarouselConfig::default()).unwrap();
        c.start();
        assert!(c.handle(RotatingEvent::IndicatorClicked(4)).is_empty());
        assert_eq!(c.current(), 0);
    }
}
