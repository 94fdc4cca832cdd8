// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Infinite-loop carousel: translate a track of N real slides bracketed by
//! two clones, and hide the seam by snapping from a clone to its real twin
//! with transitions disabled.
//!
//! # Layout
//!
//! ```text
//! position:  0          1 .. N       N + 1
//! slot:      Clone(N-1) Real(0..N)   Clone(0)
//! ```
//!
//! `current` always lies in `0..=N + 1`. Position 1 is the resting place of
//! the first real slide and the track offset is `-current * stride`.
//!
//! # Invariants
//!
//! - After a settle or transition-end check, `current` is never left on the
//!   trailing clone, and never on the leading clone after transition-end.
//! - A move that starts from a clone first snaps to the twin, so `current`
//!   stays in range even if both checks were skipped by the host.
//! - Touch-start cancels both pending callbacks before the gesture takes
//!   over; touch-end re-arms auto-advance.

use storefront_app_core::timer::{TimerId, TimerIds, TimerSlot};
use tracing::{debug, warn};

use crate::config::CarouselConfig;
use crate::effect::{disarm, rearm, Effect, Motion, TimerKind};
use crate::port::Carousel;
use crate::SetupError;

/// One rendered position of the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A real slide.
    Real(usize),
    /// A duplicate of real slide `n`, only there for the wraparound illusion.
    Clone(usize),
}

impl Slot {
    /// The real slide this position shows.
    pub const fn real_index(self) -> usize {
        match self {
            Self::Real(n) | Self::Clone(n) => n,
        }
    }

    /// Whether this position is a duplicate.
    pub const fn is_clone(self) -> bool {
        matches!(self, Self::Clone(_))
    }
}

/// Rendered sequence for `real` slides: trailing clone first, leading clone last.
pub fn layout(real: usize) -> Vec<Slot> {
    if real == 0 {
        return Vec::new();
    }
    let mut slots = Vec::with_capacity(real + 2);
    slots.push(Slot::Clone(real - 1));
    slots.extend((0..real).map(Slot::Real));
    slots.push(Slot::Clone(0));
    slots
}

/// Non-timer inputs of the infinite-loop carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopEvent {
    /// The track finished an animated move.
    TransitionEnded,
    /// A finger touched the track.
    TouchStart {
        /// Horizontal client coordinate.
        x: f64,
    },
    /// The finger moved.
    TouchMove {
        /// Horizontal client coordinate.
        x: f64,
    },
    /// The finger lifted.
    TouchEnd {
        /// Horizontal client coordinate.
        x: f64,
    },
    /// The browser aborted the gesture.
    TouchCancel,
    /// The first slide was re-measured.
    Resized {
        /// New rendered width of one slide, without gutter.
        slide_width_px: f64,
    },
}

/// Infinite-loop carousel state.
#[derive(Debug, Clone)]
pub struct LoopingCarousel {
    real: usize,
    stride_px: f64,
    current: usize,
    drag_start_x: Option<f64>,
    config: CarouselConfig,
    ids: TimerIds,
    advance: TimerSlot,
    settle: TimerSlot,
}

impl LoopingCarousel {
    /// Build a controller for `real` slides, each `slide_width_px` wide.
    pub fn new(
        real: usize,
        slide_width_px: f64,
        config: &CarouselConfig,
    ) -> Result<Self, SetupError> {
        if real == 0 {
            return Err(SetupError::NoSlides);
        }
        if !slide_width_px.is_finite() || slide_width_px < 0.0 {
            return Err(SetupError::InvalidWidth(slide_width_px));
        }
        Ok(Self {
            real,
            stride_px: slide_width_px + config.gutter_px,
            current: 1,
            drag_start_x: None,
            config: *config,
            ids: TimerIds::new(),
            advance: TimerSlot::new(),
            settle: TimerSlot::new(),
        })
    }

    /// Current track position, clones included.
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of real slides.
    pub const fn real_len(&self) -> usize {
        self.real
    }

    /// Rendered positions, clones included (`N + 2`).
    pub const fn total(&self) -> usize {
        self.real + 2
    }

    /// Distance between two slide origins.
    pub const fn stride_px(&self) -> f64 {
        self.stride_px
    }

    /// Resting offset of the current position.
    pub fn offset_px(&self) -> f64 {
        self.offset_for(self.current)
    }

    /// Slot shown at the current position.
    pub fn slot(&self) -> Slot {
        if self.current == 0 {
            Slot::Clone(self.real - 1)
        } else if self.current == self.trailing() {
            Slot::Clone(0)
        } else {
            Slot::Real(self.current - 1)
        }
    }

    /// Whether a touch gesture is in progress.
    pub const fn is_dragging(&self) -> bool {
        self.drag_start_x.is_some()
    }

    /// The auto-advance timer currently pending.
    pub const fn pending_advance(&self) -> Option<TimerId> {
        self.advance.current()
    }

    /// The settle check currently pending.
    pub const fn pending_settle(&self) -> Option<TimerId> {
        self.settle.current()
    }

    const fn trailing(&self) -> usize {
        self.real + 1
    }

    fn offset_for(&self, position: usize) -> f64 {
        -(position as f64) * self.stride_px
    }

    fn place(&mut self, position: usize, motion: Motion, out: &mut Vec<Effect>) {
        self.current = position;
        out.push(Effect::Translate {
            offset_px: self.offset_for(position),
            motion,
        });
    }

    fn eased(&self) -> Motion {
        Motion::Eased {
            duration_ms: self.config.transition_ms,
        }
    }

    /// Snap off a clone without animation. Returns whether a snap happened.
    fn reconcile(&mut self, out: &mut Vec<Effect>) -> bool {
        let slot = self.slot();
        if !slot.is_clone() {
            return false;
        }
        let target = slot.real_index() + 1;
        debug!(from = self.current, to = target, "seam reconciled");
        self.place(target, Motion::Instant, out);
        true
    }

    fn step_forward(&mut self, out: &mut Vec<Effect>) {
        if self.current == self.trailing() {
            self.reconcile(out);
        }
        let next = self.current + 1;
        self.place(next, self.eased(), out);
    }

    fn step_back(&mut self, out: &mut Vec<Effect>) {
        if self.current == 0 {
            self.reconcile(out);
        }
        let prev = self.current - 1;
        self.place(prev, self.eased(), out);
    }

    fn arm_advance(&mut self, out: &mut Vec<Effect>) {
        rearm(
            &mut self.advance,
            &mut self.ids,
            TimerKind::Advance,
            self.config.loop_interval_ms,
            out,
        );
    }

    fn release(&mut self, delta: f64, out: &mut Vec<Effect>) {
        let threshold = self.config.swipe_threshold_px;
        if delta > threshold {
            debug!(delta, "swipe right");
            self.step_back(out);
        } else if delta < -threshold {
            debug!(delta, "swipe left");
            self.step_forward(out);
        } else {
            let here = self.current;
            self.place(here, self.eased(), out);
        }
        self.arm_advance(out);
    }
}

impl Carousel for LoopingCarousel {
    type Event = LoopEvent;

    fn start(&mut self) -> Vec<Effect> {
        let mut out = Vec::with_capacity(3);
        self.place(1, Motion::Instant, &mut out);
        self.arm_advance(&mut out);
        out
    }

    fn handle(&mut self, event: LoopEvent) -> Vec<Effect> {
        let mut out = Vec::new();
        match event {
            LoopEvent::TransitionEnded => {
                self.reconcile(&mut out);
            }
            LoopEvent::TouchStart { x } => {
                disarm(&mut self.advance, &mut out);
                disarm(&mut self.settle, &mut out);
                self.drag_start_x = Some(x);
            }
            LoopEvent::TouchMove { x } => {
                if let Some(start) = self.drag_start_x {
                    out.push(Effect::Translate {
                        offset_px: self.offset_px() + (x - start),
                        motion: Motion::Instant,
                    });
                }
            }
            LoopEvent::TouchEnd { x } => {
                if let Some(start) = self.drag_start_x.take() {
                    self.release(x - start, &mut out);
                }
            }
            LoopEvent::TouchCancel => {
                if self.drag_start_x.take().is_some() {
                    self.release(0.0, &mut out);
                }
            }
            LoopEvent::Resized { slide_width_px } => {
                if !slide_width_px.is_finite() || slide_width_px < 0.0 {
                    warn!(slide_width_px, "ignoring unusable slide width");
                    return out;
                }
                self.stride_px = slide_width_px + self.config.gutter_px;
                let here = self.current;
                self.place(here, Motion::Instant, &mut out);
            }
        }
        out
    }

    fn on_timer(&mut self, timer: TimerId) -> Vec<Effect> {
        let mut out = Vec::new();
        if self.advance.claim(timer) {
            self.step_forward(&mut out);
            rearm(
                &mut self.settle,
                &mut self.ids,
                TimerKind::Settle,
                self.config.transition_ms,
                &mut out,
            );
            self.arm_advance(&mut out);
        } else if self.settle.claim(timer) {
            if self.current == self.trailing() {
                self.reconcile(&mut out);
            }
        } else {
            debug!(%timer, "stale timer ignored");
        }
        out
    }
}

#[allow(clippy::unwrap_used, clippy::float_cmp)]
#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(real: usize) -> LoopingCarousel {
        LoopingCarousel::new(real, 290.0, &CarouselConfig::default()).unwrap()
    }

    fn translate(effects: &[Effect]) -> Vec<(f64, Motion)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Translate { offset_px, motion } => Some((*offset_px, *motion)),
                _ => None,
            })
            .collect()
    }

    fn advance_timer(c: &LoopingCarousel) -> TimerId {
        c.pending_advance().unwrap()
    }

    #[test]
    fn layout_brackets_real_slides_with_clones() {
        assert_eq!(
            layout(3),
            vec![
                Slot::Clone(2),
                Slot::Real(0),
                Slot::Real(1),
                Slot::Real(2),
                Slot::Clone(0)
            ]
        );
        assert!(layout(0).is_empty());
    }

    #[test]
    fn start_places_first_real_slide_without_animation() {
        let mut c = carousel(3);
        let effects = c.start();
        assert_eq!(translate(&effects), vec![(-300.0, Motion::Instant)]);
        assert_eq!(c.current(), 1);
        assert_eq!(c.slot(), Slot::Real(0));
        assert!(matches!(
            effects[1],
            Effect::Schedule {
                kind: TimerKind::Advance,
                delay_ms: 6000,
                ..
            }
        ));
    }

    #[test]
    fn invalid_setup_is_rejected() {
        let cfg = CarouselConfig::default();
        assert_eq!(
            LoopingCarousel::new(0, 100.0, &cfg).unwrap_err(),
            SetupError::NoSlides
        );
        assert!(matches!(
            LoopingCarousel::new(2, f64::NAN, &cfg).unwrap_err(),
            SetupError::InvalidWidth(_)
        ));
    }

    #[test]
    fn advance_animates_and_arms_settle() {
        let mut c = carousel(3);
        c.start();
        let effects = c.on_timer(advance_timer(&c));
        assert_eq!(c.current(), 2);
        assert_eq!(
            translate(&effects),
            vec![(-600.0, Motion::Eased { duration_ms: 1000 })]
        );
        assert!(c.pending_settle().is_some());
        assert!(c.pending_advance().is_some());
    }

    #[test]
    fn settle_snaps_trailing_clone_home() {
        let mut c = carousel(2);
        c.start();
        c.on_timer(advance_timer(&c)); // 2
        c.on_timer(advance_timer(&c)); // 3 == trailing clone
        assert_eq!(c.slot(), Slot::Clone(0));
        let settle = c.pending_settle().unwrap();
        let effects = c.on_timer(settle);
        assert_eq!(c.current(), 1);
        assert_eq!(translate(&effects), vec![(-300.0, Motion::Instant)]);
    }

    #[test]
    fn transition_end_snaps_leading_clone_to_last_real() {
        let mut c = carousel(3);
        c.start();
        c.handle(LoopEvent::TouchStart { x: 100.0 });
        c.handle(LoopEvent::TouchEnd { x: 180.0 });
        assert_eq!(c.current(), 0);
        let effects = c.handle(LoopEvent::TransitionEnded);
        assert_eq!(c.current(), 3);
        assert_eq!(c.slot(), Slot::Real(2));
        assert_eq!(translate(&effects), vec![(-900.0, Motion::Instant)]);
    }

    #[test]
    fn transition_end_on_real_slide_is_noop() {
        let mut c = carousel(3);
        c.start();
        assert!(c.handle(LoopEvent::TransitionEnded).is_empty());
    }

    #[test]
    fn touch_start_cancels_both_timers() {
        let mut c = carousel(3);
        c.start();
        c.on_timer(advance_timer(&c));
        let advance = c.pending_advance().unwrap();
        let settle = c.pending_settle().unwrap();
        let effects = c.handle(LoopEvent::TouchStart { x: 10.0 });
        assert_eq!(
            effects,
            vec![
                Effect::Cancel { timer: advance },
                Effect::Cancel { timer: settle }
            ]
        );
        assert!(c.is_dragging());
    }

    #[test]
    fn drag_follows_finger_without_changing_index() {
        let mut c = carousel(3);
        c.start();
        c.handle(LoopEvent::TouchStart { x: 200.0 });
        let effects = c.handle(LoopEvent::TouchMove { x: 170.0 });
        assert_eq!(translate(&effects), vec![(-330.0, Motion::Instant)]);
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut c = carousel(3);
        c.start();
        assert!(c.handle(LoopEvent::TouchMove { x: 5.0 }).is_empty());
        assert!(c.handle(LoopEvent::TouchEnd { x: 5.0 }).is_empty());
    }

    #[test]
    fn small_swipe_snaps_back_and_rearms() {
        let mut c = carousel(3);
        c.start();
        c.handle(LoopEvent::TouchStart { x: 200.0 });
        let effects = c.handle(LoopEvent::TouchEnd { x: 230.0 });
        assert_eq!(c.current(), 1);
        assert_eq!(
            translate(&effects),
            vec![(-300.0, Motion::Eased { duration_ms: 1000 })]
        );
        assert!(c.pending_advance().is_some());
        assert!(!c.is_dragging());
    }

    #[test]
    fn swipe_left_from_trailing_clone_snaps_first() {
        let mut c = carousel(2);
        c.start();
        c.on_timer(advance_timer(&c));
        c.on_timer(advance_timer(&c));
        assert_eq!(c.current(), 3);
        c.handle(LoopEvent::TouchStart { x: 300.0 });
        let effects = c.handle(LoopEvent::TouchEnd { x: 200.0 });
        assert_eq!(c.current(), 2);
        assert_eq!(
            translate(&effects),
            vec![
                (-300.0, Motion::Instant),
                (-600.0, Motion::Eased { duration_ms: 1000 })
            ]
        );
    }

    #[test]
    fn touch_cancel_behaves_like_zero_delta() {
        let mut c = carousel(3);
        c.start();
        c.handle(LoopEvent::TouchStart { x: 0.0 });
        c.handle(LoopEvent::TouchMove { x: -400.0 });
        c.handle(LoopEvent::TouchCancel);
        assert_eq!(c.current(), 1);
        assert!(!c.is_dragging());
        assert!(c.pending_advance().is_some());
    }

    #[test]
    fn resize_recomputes_stride() {
        let mut c = carousel(3);
        c.start();
        c.on_timer(advance_timer(&c));
        let effects = c.handle(LoopEvent::Resized {
            slide_width_px: 490.0,
        });
        assert!((c.stride_px() - 500.0).abs() < f64::EPSILON);
        assert_eq!(translate(&effects), vec![(-1000.0, Motion::Instant)]);
        assert!(c
            .handle(LoopEvent::Resized {
                slide_width_px: -1.0
            })
            .is_empty());
    }

    #[test]
    fn stale_timers_are_ignored() {
        let mut c = carousel(3);
        c.start();
        let old = advance_timer(&c);
        c.handle(LoopEvent::TouchStart { x: 0.0 });
        c.handle(LoopEvent::TouchEnd { x: 0.0 });
        assert!(c.on_timer(old).is_empty());
        assert_eq!(c.current(), 1);
    }
}
