// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Simple toast queue with TTL + dedupe for storefront notices.
//!
//! Timestamps are plain milliseconds supplied by the host (`Date.now()` in the
//! browser); the queue never reads a clock itself.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// An action went through.
    Success,
    /// Informational note.
    Info,
    /// Something failed and the user should know.
    Error,
}

/// Identifier for a toast entry.
pub type ToastId = u64;

/// Queue tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// How long a toast stays visible.
    pub ttl_ms: u64,
    /// Maximum queued toasts; the oldest is dropped first.
    pub max_visible: usize,
    /// Identical toasts pushed within this window refresh the existing entry.
    pub dedupe_window_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 3000,
            max_visible: 5,
            dedupe_window_ms: 500,
        }
    }
}

/// Toast data stored in the service.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Stable identifier.
    pub id: ToastId,
    /// Severity.
    pub kind: ToastKind,
    /// Message text.
    pub text: String,
    /// Link followed when the toast is clicked.
    pub destination: Option<String>,
    /// Time-to-live in milliseconds.
    pub ttl_ms: u64,
    /// Creation timestamp in milliseconds.
    pub created_ms: u64,
}

/// Rendering-friendly view of a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastRender {
    /// Stable identifier.
    pub id: ToastId,
    /// Severity.
    pub kind: ToastKind,
    /// Message text.
    pub text: String,
    /// Link followed when the toast is clicked.
    pub destination: Option<String>,
    /// 1.0 -> just created, 0.0 -> expired.
    pub progress: f32,
}

/// In-memory toast queue with TTL and dedupe window.
#[derive(Debug)]
pub struct ToastService {
    queue: VecDeque<Toast>,
    config: ToastConfig,
    next_id: ToastId,
}

impl ToastService {
    /// Create a new queue.
    pub fn new(config: ToastConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            config,
            next_id: 1,
        }
    }

    /// Push a toast, deduping identical recent entries (same kind/text/destination within the dedupe window).
    pub fn push<S>(
        &mut self,
        kind: ToastKind,
        text: S,
        destination: Option<String>,
        now_ms: u64,
    ) -> ToastId
    where
        S: Into<String>,
    {
        let text = text.into();
        let window = self.config.dedupe_window_ms;
        let ttl_ms = self.config.ttl_ms;

        if let Some(existing) = self.queue.iter_mut().find(|t| {
            t.kind == kind
                && t.text == text
                && t.destination == destination
                && now_ms.saturating_sub(t.created_ms) <= window
        }) {
            existing.created_ms = now_ms;
            existing.ttl_ms = ttl_ms;
            return existing.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        if self.config.max_visible == 0 {
            return id;
        }
        if self.queue.len() >= self.config.max_visible {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            id,
            kind,
            text,
            destination,
            ttl_ms,
            created_ms: now_ms,
        });
        id
    }

    /// Drop expired toasts.
    pub fn retain_visible(&mut self, now_ms: u64) {
        self.queue
            .retain(|t| now_ms.saturating_sub(t.created_ms) < t.ttl_ms);
    }

    /// Return render-ready toasts with progress ratios.
    pub fn visible(&self, now_ms: u64) -> Vec<ToastRender> {
        self.queue
            .iter()
            .filter(|t| now_ms.saturating_sub(t.created_ms) < t.ttl_ms)
            .map(|t| ToastRender {
                id: t.id,
                kind: t.kind,
                text: t.text.clone(),
                destination: t.destination.clone(),
                progress: 1.0 - (now_ms.saturating_sub(t.created_ms) as f32 / t.ttl_ms as f32),
            })
            .collect()
    }

    /// The newest toast, if still visible.
    pub fn latest(&self, now_ms: u64) -> Option<ToastRender> {
        self.visible(now_ms).pop()
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ToastService {
        ToastService::new(ToastConfig {
            ttl_ms: 1000,
            max_visible: 2,
            dedupe_window_ms: 100,
        })
    }

    #[test]
    fn identical_toasts_within_window_are_merged() {
        let mut toasts = service();
        let a = toasts.push(ToastKind::Success, "Item added to cart!", None, 0);
        let b = toasts.push(ToastKind::Success, "Item added to cart!", None, 50);
        assert_eq!(a, b);
        assert_eq!(toasts.visible(60).len(), 1);
    }

    #[test]
    fn toasts_outside_window_are_distinct() {
        let mut toasts = service();
        let a = toasts.push(ToastKind::Success, "Item added to cart!", None, 0);
        let b = toasts.push(ToastKind::Success, "Item added to cart!", None, 500);
        assert_ne!(a, b);
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let mut toasts = service();
        toasts.push(ToastKind::Info, "one", None, 0);
        toasts.push(ToastKind::Info, "two", None, 1);
        toasts.push(ToastKind::Info, "three", None, 2);
        let texts: Vec<_> = toasts.visible(3).into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["two", "three"]);
    }

    #[test]
    fn expired_toasts_disappear() {
        let mut toasts = service();
        toasts.push(ToastKind::Error, "boom", None, 0);
        assert_eq!(toasts.visible(999).len(), 1);
        assert!(toasts.visible(1000).is_empty());
        toasts.retain_visible(1000);
        assert!(toasts.latest(0).is_none());
    }

    #[test]
    fn progress_counts_down() {
        let mut toasts = service();
        toasts.push(ToastKind::Info, "half", Some("/cart".into()), 0);
        let render = toasts.latest(500).unwrap();
        assert!((render.progress - 0.5).abs() < f32::EPSILON);
        assert_eq!(render.destination.as_deref(), Some("/cart"));
    }
}
