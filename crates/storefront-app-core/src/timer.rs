// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-owner timer slots.
//!
//! Every scheduled callback belongs to exactly one [`TimerSlot`]. Re-arming a
//! slot always yields the previous timer for cancellation before the new one
//! is scheduled, so two cycles of the same callback can never overlap. A
//! callback that fires with a superseded id is recognized as stale by
//! [`TimerSlot::claim`] and must be ignored by the caller.

use std::fmt;

/// Opaque identifier of one scheduled callback.
///
/// The host maps it to its own handle (e.g. the value `setTimeout` returned).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric value, for logging and host-side maps.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Allocator for [`TimerId`]s, shared by all slots of one controller.
#[derive(Debug, Clone)]
pub struct TimerIds {
    next: u64,
}

impl Default for TimerIds {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerIds {
    /// Start allocating at 1.
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out a fresh id.
    pub fn allocate(&mut self) -> TimerId {
        let id = TimerId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Result of re-arming a slot: what to cancel, then what to schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rearm {
    /// Timer that was live before re-arming, if any. Cancel it first.
    pub canceled: Option<TimerId>,
    /// Freshly allocated timer to schedule.
    pub scheduled: TimerId,
}

/// Holder of at most one live timer.
#[derive(Debug, Clone, Default)]
pub struct TimerSlot {
    live: Option<TimerId>,
}

impl TimerSlot {
    /// An empty slot.
    pub const fn new() -> Self {
        Self { live: None }
    }

    /// Currently live timer.
    pub const fn current(&self) -> Option<TimerId> {
        self.live
    }

    /// True when a timer is pending.
    pub const fn is_armed(&self) -> bool {
        self.live.is_some()
    }

    /// Replace the live timer with a new one.
    pub fn arm(&mut self, ids: &mut TimerIds) -> Rearm {
        let scheduled = ids.allocate();
        let canceled = self.live.replace(scheduled);
        Rearm {
            canceled,
            scheduled,
        }
    }

    /// Disarm the slot, returning the timer that must be canceled.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.live.take()
    }

    /// Accept a fired callback.
    ///
    /// Returns `true` and empties the slot when `fired` is the live timer.
    /// Returns `false` for stale or foreign ids, leaving the slot untouched.
    pub fn claim(&mut self, fired: TimerId) -> bool {
        if self.live == Some(fired) {
            self.live = None;
            true
        } else {
            false
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_reports_previous_timer() {
        let mut ids = TimerIds::new();
        let mut slot = TimerSlot::new();

        let first = slot.arm(&mut ids);
        assert_eq!(first.canceled, None);

        let second = slot.arm(&mut ids);
        assert_eq!(second.canceled, Some(first.scheduled));
        assert_ne!(second.scheduled, first.scheduled);
        assert_eq!(slot.current(), Some(second.scheduled));
    }

    #[test]
    fn stale_ids_are_not_claimed() {
        let mut ids = TimerIds::new();
        let mut slot = TimerSlot::new();
        let old = slot.arm(&mut ids).scheduled;
        let new = slot.arm(&mut ids).scheduled;

        assert!(!slot.claim(old));
        assert!(slot.is_armed());
        assert!(slot.claim(new));
        assert!(!slot.is_armed());
        assert!(!slot.claim(new));
    }

    #[test]
    fn slots_sharing_an_allocator_never_collide() {
        let mut ids = TimerIds::new();
        let mut a = TimerSlot::new();
        let mut b = TimerSlot::new();
        let ta = a.arm(&mut ids).scheduled;
        let tb = b.arm(&mut ids).scheduled;
        assert_ne!(ta, tb);
        assert!(!a.claim(tb));
    }

    #[test]
    fn cancel_empties_slot() {
        let mut ids = TimerIds::new();
        let mut slot = TimerSlot::new();
        let t = slot.arm(&mut ids).scheduled;
        assert_eq!(slot.cancel(), Some(t));
        assert_eq!(slot.cancel(), None);
    }
}
