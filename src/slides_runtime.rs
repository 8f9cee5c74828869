use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use storefront_core::{active_dot_index, ScrollDirection};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use crate::carousel_runtime::ScrollTrack;
use crate::dom;

thread_local! {
    static SLIDESHOW: RefCell<Option<Rc<ScrollTrack>>> = RefCell::new(None);
}

pub(crate) fn install() {
    let Some(track) = dom::query(".image-slides .slide-track")
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let prev = dom::query(".image-slides .slide-btn.prev");
    let next = dom::query(".image-slides .slide-btn.next");
    if prev.is_none() && next.is_none() {
        return;
    }
    let strip = ScrollTrack::new(track, "img");
    strip.bind_button(prev, ScrollDirection::Prev, None);
    strip.bind_button(next, ScrollDirection::Next, None);
    strip.install_drag();

    let dots = dom::query_all(".image-slides .slide-dots .dot");
    if !dots.is_empty() {
        update_active_dot(strip.track(), &dots);
        let watched = Rc::clone(&strip);
        let listener = EventListener::new_with_options(
            strip.track(),
            "scroll",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: true,
            },
            move |_event: &Event| {
                update_active_dot(watched.track(), &dots);
            },
        );
        strip.keep_listener(listener);
    }

    SLIDESHOW.with(|slot| {
        *slot.borrow_mut() = Some(strip);
    });
}

fn update_active_dot(track: &HtmlElement, dots: &[Element]) {
    let active = active_dot_index(
        track.scroll_left() as f64,
        track.scroll_width() as f64,
        track.client_width() as f64,
        dots.len(),
    );
    for (index, dot) in dots.iter().enumerate() {
        dom::set_class(dot, "active", Some(index) == active);
    }
}
