// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Slide views: project carousel effects onto markup.

use storefront_carousel::{Motion, SlideView};
use web_sys::{Element, HtmlElement};

use crate::console;

const ACTIVE_CLASS: &str = "active";

/// Index-swap markup: exactly one slide carries the `active` class.
pub(crate) struct ActiveClassView {
    slides: Vec<Element>,
}

impl ActiveClassView {
    pub(crate) fn new(slides: Vec<Element>) -> Self {
        Self { slides }
    }
}

impl SlideView for ActiveClassView {
    fn activate(&mut self, index: usize) {
        for (i, slide) in self.slides.iter().enumerate() {
            if let Err(err) = slide
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, i == index)
            {
                console::error("cannot toggle slide class", &err);
            }
        }
    }

    fn translate(&mut self, _offset_px: f64, _motion: Motion) {}
}

/// Track markup: the whole strip moves with `transform: translateX`.
pub(crate) struct TrackView {
    track: HtmlElement,
}

impl TrackView {
    pub(crate) fn new(track: HtmlElement) -> Self {
        Self { track }
    }

    fn style(&self, property: &str, value: &str) {
        if let Err(err) = self.track.style().set_property(property, value) {
            console::error(&format!("cannot set track {property}"), &err);
        }
    }
}

impl SlideView for TrackView {
    fn activate(&mut self, _index: usize) {}

    fn translate(&mut self, offset_px: f64, motion: Motion) {
        match motion {
            Motion::Instant => self.style("transition", "none"),
            Motion::Eased { duration_ms } => self.style(
                "transition",
                &format!("transform {duration_ms}ms ease-in-out"),
            ),
        }
        self.style("transform", &format!("translateX({offset_px}px)"));
        if motion == Motion::Instant {
            // Flush layout so the next eased move starts from here.
            let _ = self.track.offset_width();
        }
    }
}
