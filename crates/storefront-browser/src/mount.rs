// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Carousel mounting: find the markup, build the controller, route DOM events
//! and timer callbacks into it.
//!
//! A [`Mounted`] carousel owns the controller, its view and its timers. DOM
//! listeners hold it strongly and are leaked, so it lives as long as the page;
//! timer callbacks hold it weakly.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use storefront_carousel::{
    apply_effects, Carousel, CarouselConfig, Effect, LoopEvent, LoopingCarousel,
    RotatingCarousel, RotatingEvent, SetupError, SlideView, TimerId,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, TouchEvent, TouchList, Window};

use crate::console;
use crate::dom;
use crate::slides::{ActiveClassView, TrackView};
use crate::timers::{BrowserTimers, FireSink};

pub(crate) struct Mounted<C, V> {
    carousel: RefCell<C>,
    view: RefCell<V>,
    timers: RefCell<BrowserTimers>,
}

impl<C, V> Mounted<C, V>
where
    C: Carousel + 'static,
    V: SlideView + 'static,
{
    pub(crate) fn new(window: &Window, carousel: C, view: V) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let fire: FireSink = Rc::new(move |timer| {
                if let Some(mounted) = weak.upgrade() {
                    mounted.fire(timer);
                }
            });
            Self {
                carousel: RefCell::new(carousel),
                view: RefCell::new(view),
                timers: RefCell::new(BrowserTimers::new(window.clone(), fire)),
            }
        })
    }

    pub(crate) fn start(&self) {
        let effects = match self.carousel.try_borrow_mut() {
            Ok(mut carousel) => carousel.start(),
            Err(_) => return,
        };
        self.apply(&effects);
    }

    pub(crate) fn dispatch(&self, event: C::Event) {
        let effects = match self.carousel.try_borrow_mut() {
            Ok(mut carousel) => carousel.handle(event),
            Err(_) => {
                console::warn("carousel busy; event dropped");
                return;
            }
        };
        self.apply(&effects);
    }

    fn fire(&self, timer: TimerId) {
        if let Ok(mut timers) = self.timers.try_borrow_mut() {
            timers.forget(timer);
        }
        let effects = match self.carousel.try_borrow_mut() {
            Ok(mut carousel) => carousel.on_timer(timer),
            Err(_) => return,
        };
        self.apply(&effects);
    }

    fn apply(&self, effects: &[Effect]) {
        let (Ok(mut view), Ok(mut timers)) =
            (self.view.try_borrow_mut(), self.timers.try_borrow_mut())
        else {
            console::warn("carousel busy; effects dropped");
            return;
        };
        apply_effects(effects, &mut *view, &mut *timers);
    }
}

/// Index-swap carousel over `.slider_item` slides and `#slider_indicator`
/// dots. Absent markup leaves the page untouched, except that a lone slide
/// list still shows its first slide.
pub(crate) fn mount_rotating(
    window: &Window,
    document: &Document,
    config: &CarouselConfig,
) -> Result<(), JsValue> {
    let slides = dom::query_all(document, ".slider_item")?;
    let indicators = dom::query_all(document, "#slider_indicator > div")?;
    let carousel = match RotatingCarousel::new(slides.len(), indicators.len(), config) {
        Ok(carousel) => carousel,
        Err(err) => {
            if err == SetupError::NoIndicators {
                if let Some(first) = slides.first() {
                    first.class_list().add_1("active")?;
                }
            }
            console::debug(&format!("rotating carousel inert: {err}"));
            return Ok(());
        }
    };
    let mounted = Mounted::new(window, carousel, ActiveClassView::new(slides));
    for (index, indicator) in indicators.iter().enumerate() {
        let mounted = Rc::clone(&mounted);
        dom::listen(indicator, "click", move |_| {
            mounted.dispatch(RotatingEvent::IndicatorClicked(index));
        })?;
    }
    mounted.start();
    Ok(())
}

fn touch_x(list: &TouchList) -> Option<f64> {
    list.get(0).map(|touch| f64::from(touch.client_x()))
}

/// Layout width in whole CSS pixels, so strides never land between pixels.
fn width_of(slide: &Element) -> f64 {
    slide
        .dyn_ref::<HtmlElement>()
        .map_or(0.0, |slide| f64::from(slide.offset_width()))
}

/// Infinite-loop carousel over a `.carousel-track` and its `.carousel-slide`
/// children. The first and last slides are cloned onto the opposite ends.
pub(crate) fn mount_looping(
    window: &Window,
    document: &Document,
    config: &CarouselConfig,
) -> Result<(), JsValue> {
    let Some(track) = document.query_selector(".carousel-track")? else {
        console::debug("looping carousel inert: no track");
        return Ok(());
    };
    let Ok(track) = track.dyn_into::<HtmlElement>() else {
        return Ok(());
    };
    let slides = dom::query_within(&track, ".carousel-slide")?;
    let (Some(first), Some(last)) = (slides.first().cloned(), slides.last().cloned()) else {
        console::debug(&format!("looping carousel inert: {}", SetupError::NoSlides));
        return Ok(());
    };
    let carousel = match LoopingCarousel::new(slides.len(), width_of(&first), config) {
        Ok(carousel) => carousel,
        Err(err) => {
            console::debug(&format!("looping carousel inert: {err}"));
            return Ok(());
        }
    };

    track.append_child(&first.clone_node_with_deep(true)?)?;
    track.prepend_with_node_1(&last.clone_node_with_deep(true)?)?;

    let mounted = Mounted::new(window, carousel, TrackView::new(track.clone()));
    let track_js: JsValue = track.clone().into();

    {
        let mounted = Rc::clone(&mounted);
        dom::listen(&track, "transitionend", move |event: Event| {
            if event.target().is_some_and(|t| JsValue::from(t) == track_js) {
                mounted.dispatch(LoopEvent::TransitionEnded);
            }
        })?;
    }
    {
        let mounted = Rc::clone(&mounted);
        dom::listen(&track, "touchstart", move |event: Event| {
            if let Some(x) = event.dyn_ref::<TouchEvent>().and_then(|t| touch_x(&t.touches())) {
                mounted.dispatch(LoopEvent::TouchStart { x });
            }
        })?;
    }
    {
        let mounted = Rc::clone(&mounted);
        dom::listen(&track, "touchmove", move |event: Event| {
            if let Some(x) = event.dyn_ref::<TouchEvent>().and_then(|t| touch_x(&t.touches())) {
                mounted.dispatch(LoopEvent::TouchMove { x });
            }
        })?;
    }
    {
        let mounted = Rc::clone(&mounted);
        dom::listen(&track, "touchend", move |event: Event| {
            let x = event
                .dyn_ref::<TouchEvent>()
                .and_then(|t| touch_x(&t.changed_touches()));
            match x {
                Some(x) => mounted.dispatch(LoopEvent::TouchEnd { x }),
                None => mounted.dispatch(LoopEvent::TouchCancel),
            }
        })?;
    }
    {
        let mounted = Rc::clone(&mounted);
        dom::listen(&track, "touchcancel", move |_| {
            mounted.dispatch(LoopEvent::TouchCancel);
        })?;
    }
    {
        let mounted = Rc::clone(&mounted);
        dom::listen(window, "resize", move |_| {
            mounted.dispatch(LoopEvent::Resized {
                slide_width_px: width_of(&first),
            });
        })?;
    }

    mounted.start();
    Ok(())
}
