// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(clippy::unwrap_used, clippy::float_cmp)]
//! Infinite-loop carousel scenarios: periodicity, swipes and the seam.

use proptest::prelude::*;
use storefront_carousel::{
    layout, CarouselConfig, LoopEvent, LoopingCarousel, Motion, Slot, TimerKind,
};
use storefront_dry_tests::CarouselHarness;

const WIDTH: f64 = 290.0;
const STRIDE: f64 = 300.0;

fn harness(real: usize) -> CarouselHarness<LoopingCarousel> {
    let carousel = LoopingCarousel::new(real, WIDTH, &CarouselConfig::default()).unwrap();
    CarouselHarness::started(carousel)
}

fn swipe(h: &mut CarouselHarness<LoopingCarousel>, delta: f64) {
    h.send(LoopEvent::TouchStart { x: 400.0 });
    h.send(LoopEvent::TouchMove { x: 400.0 + delta / 2.0 });
    h.send(LoopEvent::TouchEnd { x: 400.0 + delta });
}

proptest! {
    #[test]
    fn setup_renders_two_clones_at_first_real_slide(real in 1usize..12) {
        let h = harness(real);
        prop_assert_eq!(layout(real).len(), real + 2);
        prop_assert_eq!(h.carousel.total(), real + 2);
        prop_assert_eq!(h.carousel.current(), 1);
        prop_assert_eq!(h.view.offset_px, -STRIDE);
    }

    #[test]
    fn n_advances_return_to_the_start(real in 1usize..10) {
        let mut h = harness(real);
        for _ in 0..real {
            h.run_for(6000);
        }
        h.run_for(1000);
        prop_assert_eq!(h.carousel.current(), 1);
        prop_assert_eq!(h.view.offset_px, -STRIDE);
        prop_assert_eq!(h.view.moves.last().map(|m| m.1), Some(Motion::Instant));
        prop_assert_eq!(h.timers.pending_of(TimerKind::Advance).len(), 1);
    }

    #[test]
    fn every_clone_shows_the_real_slide_it_snaps_to(real in 1usize..12) {
        let slots = layout(real);
        prop_assert_eq!(slots.iter().filter(|s| s.is_clone()).count(), 2);
        for slot in slots.iter().filter(|s| s.is_clone()) {
            let twin = slots[slot.real_index() + 1];
            prop_assert_eq!(twin, Slot::Real(slot.real_index()));
        }
        let shown: Vec<usize> = slots[1..=real].iter().map(|s| s.real_index()).collect();
        prop_assert_eq!(shown, (0..real).collect::<Vec<_>>());
    }
}

#[test]
fn three_slide_walkthrough() {
    let mut h = harness(3);
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
    assert_eq!(h.carousel.slot(), Slot::Real(0));

    h.run_until(6000);
    assert_eq!(h.carousel.current(), 2);
    assert_eq!(h.carousel.slot(), Slot::Real(1));

    swipe(&mut h, -80.0);
    assert_eq!(h.carousel.current(), 3);
    swipe(&mut h, -80.0);
    assert_eq!(h.carousel.current(), 4);
    assert_eq!(h.carousel.slot(), Slot::Clone(0));
    assert!(h.carousel.slot().is_clone());
    assert_eq!(h.carousel.slot().real_index(), 0);

    h.send(LoopEvent::TransitionEnded);
    assert_eq!(h.carousel.current(), 1);
    assert!(!h.carousel.slot().is_clone());
    assert_eq!(h.view.moves.last(), Some(&(-STRIDE, Motion::Instant)));
}

#[test]
fn swipe_direction_and_threshold() {
    let eased = Motion::Eased { duration_ms: 1000 };

    let mut h = harness(4);
    h.run_until(6000);
    assert_eq!(h.carousel.current(), 2);

    swipe(&mut h, 80.0);
    assert_eq!(h.carousel.current(), 1);
    assert_eq!(h.view.moves.last(), Some(&(-STRIDE, eased)));

    swipe(&mut h, -80.0);
    assert_eq!(h.carousel.current(), 2);

    swipe(&mut h, 30.0);
    assert_eq!(h.carousel.current(), 2);
    assert_eq!(h.view.moves.last(), Some(&(-2.0 * STRIDE, eased)));
    swipe(&mut h, -30.0);
    assert_eq!(h.carousel.current(), 2);
    assert!(!h.carousel.is_dragging());
}

#[test]
fn drag_follows_finger_without_changing_index() {
    let mut h = harness(3);
    h.send(LoopEvent::TouchStart { x: 100.0 });
    h.send(LoopEvent::TouchMove { x: 140.0 });
    assert_eq!(h.view.offset_px, -STRIDE + 40.0);
    assert_eq!(h.carousel.current(), 1);
    assert!(h.carousel.is_dragging());
}

#[test]
fn swipe_mid_interval_never_double_advances() {
    let mut h = harness(5);
    h.run_until(3000);
    h.send(LoopEvent::TouchStart { x: 300.0 });
    assert!(h.timers.pending_of(TimerKind::Advance).is_empty());
    h.run_until(3100);
    h.send(LoopEvent::TouchEnd { x: 200.0 });
    assert_eq!(h.carousel.current(), 2);

    let advances = h.timers.pending_of(TimerKind::Advance);
    assert_eq!(advances.len(), 1);
    assert_eq!(advances[0].due_ms, 9100);

    assert_eq!(h.run_until(9099), 0);
    assert_eq!(h.carousel.current(), 2);
    h.run_until(9100);
    assert_eq!(h.carousel.current(), 3);
}

#[test]
fn swiping_back_past_first_slide_lands_on_last() {
    let mut h = harness(3);
    swipe(&mut h, 120.0);
    assert_eq!(h.carousel.current(), 0);
    assert_eq!(h.carousel.slot(), Slot::Clone(2));
    h.send(LoopEvent::TransitionEnded);
    assert_eq!(h.carousel.current(), 3);
    assert_eq!(h.view.offset_px, -3.0 * STRIDE);
}

#[test]
fn touch_start_also_cancels_pending_settle() {
    let mut h = harness(3);
    h.run_until(6000);
    assert_eq!(h.timers.pending_of(TimerKind::Settle).len(), 1);
    h.send(LoopEvent::TouchStart { x: 0.0 });
    assert!(h.timers.pending().is_empty());
}

#[test]
fn resize_repositions_instantly() {
    let mut h = harness(3);
    h.run_until(6000);
    h.send(LoopEvent::Resized {
        slide_width_px: 390.0,
    });
    assert_eq!(h.carousel.stride_px(), 400.0);
    assert_eq!(h.view.moves.last(), Some(&(-800.0, Motion::Instant)));
}
