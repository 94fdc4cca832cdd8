// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Toasts: queue through [`ToastService`], render through a [`NoticePort`].

use js_sys::{Function, Object, Reflect};
use storefront_app_core::notice_port::NoticePort;
use storefront_app_core::toast::{ToastConfig, ToastId, ToastKind, ToastRender, ToastService};
use storefront_pages::Notice;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::console;

const SUCCESS_BACKGROUND: &str = "linear-gradient(to right, #00b09b, #96c93d)";
const ERROR_BACKGROUND: &str = "linear-gradient(to right, #ff416c, #ff4b2b)";

/// Toast queue in front of a renderer. A toast deduplicated into one already
/// on screen is not rendered twice.
pub struct Notices<P> {
    toasts: ToastService,
    port: P,
    shown_up_to: ToastId,
}

impl<P: NoticePort> Notices<P> {
    /// Empty queue rendering through `port`.
    pub fn new(config: ToastConfig, port: P) -> Self {
        Self {
            toasts: ToastService::new(config),
            port,
            shown_up_to: 0,
        }
    }

    /// Renderer.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Queue `notice` at `now_ms`; returns whether it was rendered.
    pub fn post_at(&mut self, notice: &Notice, now_ms: u64) -> bool {
        self.toasts.retain_visible(now_ms);
        let id = self.toasts.push(
            notice.kind,
            notice.text.clone(),
            notice.destination.clone(),
            now_ms,
        );
        if id <= self.shown_up_to {
            return false;
        }
        self.shown_up_to = id;
        let Some(render) = self.toasts.visible(now_ms).into_iter().find(|t| t.id == id) else {
            return false;
        };
        self.port.show(&render);
        true
    }

    /// Queue `notice` now.
    pub fn post(&mut self, notice: &Notice) -> bool {
        self.post_at(notice, now_ms())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

/// Renders with the page's `Toastify` library, or the console when the page
/// does not ship it.
pub(crate) struct ToastifyPort {
    window: Window,
    duration_ms: u64,
}

impl ToastifyPort {
    pub(crate) fn new(window: Window, config: &ToastConfig) -> Self {
        Self {
            window,
            duration_ms: config.ttl_ms,
        }
    }

    fn try_show(&self, toast: &ToastRender) -> Result<(), JsValue> {
        let toastify: Function = Reflect::get(&self.window, &"Toastify".into())?.dyn_into()?;

        let style = Object::new();
        let background = match toast.kind {
            ToastKind::Error => ERROR_BACKGROUND,
            ToastKind::Success | ToastKind::Info => SUCCESS_BACKGROUND,
        };
        Reflect::set(&style, &"background".into(), &background.into())?;

        let options = Object::new();
        Reflect::set(&options, &"text".into(), &toast.text.as_str().into())?;
        Reflect::set(&options, &"duration".into(), &(self.duration_ms as f64).into())?;
        Reflect::set(&options, &"close".into(), &true.into())?;
        Reflect::set(&options, &"gravity".into(), &"top".into())?;
        Reflect::set(&options, &"position".into(), &"center".into())?;
        Reflect::set(&options, &"stopOnFocus".into(), &true.into())?;
        Reflect::set(&options, &"style".into(), &style)?;
        if let Some(destination) = &toast.destination {
            Reflect::set(&options, &"destination".into(), &destination.as_str().into())?;
        }

        let instance = toastify.call1(&JsValue::NULL, &options)?;
        let show: Function = Reflect::get(&instance, &"showToast".into())?.dyn_into()?;
        show.call0(&instance)?;
        Ok(())
    }
}

impl NoticePort for ToastifyPort {
    fn show(&self, toast: &ToastRender) {
        if let Err(err) = self.try_show(toast) {
            console::debug(&format!("Toastify unavailable: {}", console::describe(&err)));
            match toast.kind {
                ToastKind::Error => console::warn(&toast.text),
                ToastKind::Success | ToastKind::Info => console::info(&toast.text),
            }
        }
    }
}
