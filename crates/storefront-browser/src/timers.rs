// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `setTimeout`-backed timer host.
//!
//! Every [`TimerId`] maps to at most one browser handle. When a callback
//! fires, the handle is forgotten before the owner sees the id, so a late
//! `cancel` for an already-fired timer is a no-op.

use std::collections::BTreeMap;
use std::rc::Rc;

use storefront_app_core::timer::TimerId;
use storefront_carousel::{TimerHost, TimerKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::console;

/// Callback invoked with the id of a fired timer.
pub(crate) type FireSink = Rc<dyn Fn(TimerId)>;

pub(crate) struct BrowserTimers {
    window: Window,
    fire: FireSink,
    handles: BTreeMap<TimerId, i32>,
}

impl BrowserTimers {
    pub(crate) fn new(window: Window, fire: FireSink) -> Self {
        Self {
            window,
            fire,
            handles: BTreeMap::new(),
        }
    }

    /// Arm a browser timeout that reports `timer` after `delay_ms`.
    pub(crate) fn set(&mut self, timer: TimerId, delay_ms: u32) {
        let fire = Rc::clone(&self.fire);
        let callback = Closure::once_into_js(move || fire(timer));
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(handle) => {
                self.handles.insert(timer, handle);
            }
            Err(err) => console::error(&format!("setTimeout failed for {timer}"), &err),
        }
    }

    /// Drop the handle of a timer that has fired.
    pub(crate) fn forget(&mut self, timer: TimerId) {
        self.handles.remove(&timer);
    }

    /// Clear a pending timeout.
    pub(crate) fn clear(&mut self, timer: TimerId) {
        if let Some(handle) = self.handles.remove(&timer) {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

impl TimerHost for BrowserTimers {
    fn schedule(&mut self, timer: TimerId, _kind: TimerKind, delay_ms: u32) {
        self.set(timer, delay_ms);
    }

    fn cancel(&mut self, timer: TimerId) {
        self.clear(timer);
    }
}
