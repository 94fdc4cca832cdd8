// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Manual clock for driving carousel timers deterministically.

use std::collections::BTreeMap;

use storefront_carousel::{TimerHost, TimerId, TimerKind};

/// A pending callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTimer {
    /// Id reported by the controller.
    pub timer: TimerId,
    /// What it is for.
    pub kind: TimerKind,
    /// Absolute fire time in milliseconds.
    pub due_ms: u64,
}

/// [`TimerHost`] backed by a virtual millisecond clock.
///
/// Timers due at the same instant fire in scheduling order, like browser
/// timeouts.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now_ms: u64,
    seq: u64,
    queue: BTreeMap<(u64, u64), (TimerId, TimerKind)>,
    scheduled: usize,
    canceled: usize,
}

impl ManualTimers {
    /// Clock at zero, nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Total `schedule` calls seen.
    pub const fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    /// Total `cancel` calls that removed a pending timer.
    pub const fn canceled_count(&self) -> usize {
        self.canceled
    }

    /// All pending timers in firing order.
    pub fn pending(&self) -> Vec<PendingTimer> {
        self.queue
            .iter()
            .map(|(&(due_ms, _), &(timer, kind))| PendingTimer {
                timer,
                kind,
                due_ms,
            })
            .collect()
    }

    /// Pending timers of one kind.
    pub fn pending_of(&self, kind: TimerKind) -> Vec<PendingTimer> {
        self.pending()
            .into_iter()
            .filter(|p| p.kind == kind)
            .collect()
    }

    /// Remove and return the next timer due at or before `until_ms`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<PendingTimer> {
        let (&key, _) = self.queue.iter().next()?;
        if key.0 > until_ms {
            return None;
        }
        let (timer, kind) = self.queue.remove(&key)?;
        self.now_ms = self.now_ms.max(key.0);
        Some(PendingTimer {
            timer,
            kind,
            due_ms: key.0,
        })
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl TimerHost for ManualTimers {
    fn schedule(&mut self, timer: TimerId, kind: TimerKind, delay_ms: u32) {
        self.seq += 1;
        self.scheduled += 1;
        let due = self.now_ms + u64::from(delay_ms);
        self.queue.insert((due, self.seq), (timer, kind));
    }

    fn cancel(&mut self, timer: TimerId) {
        let key = self
            .queue
            .iter()
            .find_map(|(key, (t, _))| (*t == timer).then_some(*key));
        if let Some(key) = key {
            self.queue.remove(&key);
            self.canceled += 1;
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use storefront_app_core::timer::TimerIds;

    #[test]
    fn fires_in_due_then_schedule_order() {
        let mut ids = TimerIds::new();
        let (a, b, c) = (ids.allocate(), ids.allocate(), ids.allocate());
        let mut timers = ManualTimers::new();
        timers.schedule(a, TimerKind::Advance, 50);
        timers.schedule(b, TimerKind::Settle, 10);
        timers.schedule(c, TimerKind::Advance, 10);

        let order: Vec<_> = std::iter::from_fn(|| timers.pop_due(100))
            .map(|p| p.timer)
            .collect();
        assert_eq!(order, vec![b, c, a]);
        assert_eq!(timers.now_ms(), 50);
    }

    #[test]
    fn cancel_removes_only_the_named_timer() {
        let mut ids = TimerIds::new();
        let (a, b) = (ids.allocate(), ids.allocate());
        let mut timers = ManualTimers::new();
        timers.schedule(a, TimerKind::Advance, 10);
        timers.schedule(b, TimerKind::Advance, 20);
        timers.cancel(a);
        timers.cancel(a);
        assert_eq!(timers.canceled_count(), 1);
        assert_eq!(timers.pending().len(), 1);
        assert!(timers.pop_due(15).is_none());
    }
}
