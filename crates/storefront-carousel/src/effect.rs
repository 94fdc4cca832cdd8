// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Effects emitted by the carousel state machines.
//!
//! Controllers never touch the DOM or a clock. Each transition returns an
//! ordered list of effects and the host executes them in that order.

use storefront_app_core::timer::{TimerId, TimerIds, TimerSlot};

/// Which callback a timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Auto-advance to the next slide.
    Advance,
    /// Post-transition check that hides the clone seam.
    Settle,
}

/// How the track moves to a new offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Jump with transitions disabled.
    Instant,
    /// Ease over the given duration.
    Eased {
        /// Transition length.
        duration_ms: u32,
    },
}

/// One instruction for the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Mark slide `index` as the only active slide.
    Activate {
        /// Slide position.
        index: usize,
    },
    /// Move the slide track horizontally.
    Translate {
        /// Horizontal offset in CSS pixels (zero or negative).
        offset_px: f64,
        /// Animated or not.
        motion: Motion,
    },
    /// Schedule a one-shot callback.
    Schedule {
        /// Id reported back when the callback fires.
        timer: TimerId,
        /// What the callback is for.
        kind: TimerKind,
        /// Delay before it fires.
        delay_ms: u32,
    },
    /// Cancel a previously scheduled callback.
    Cancel {
        /// Id to cancel.
        timer: TimerId,
    },
}

/// Re-arm `slot`, pushing `Cancel` for the previous timer before `Schedule`.
pub(crate) fn rearm(
    slot: &mut TimerSlot,
    ids: &mut TimerIds,
    kind: TimerKind,
    delay_ms: u32,
    out: &mut Vec<Effect>,
) {
    let rearm = slot.arm(ids);
    if let Some(timer) = rearm.canceled {
        out.push(Effect::Cancel { timer });
    }
    out.push(Effect::Schedule {
        timer: rearm.scheduled,
        kind,
        delay_ms,
    });
}

/// Disarm `slot`, pushing `Cancel` when something was pending.
pub(crate) fn disarm(slot: &mut TimerSlot, out: &mut Vec<Effect>) {
    if let Some(timer) = slot.cancel() {
        out.push(Effect::Cancel { timer });
    }
}
