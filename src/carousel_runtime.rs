use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use storefront_core::{parse_css_px, scroll_step, CarouselConfig, DragScroll, ScrollDirection};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlElement, KeyboardEvent, PointerEvent, ScrollBehavior, ScrollToOptions,
};

use crate::dom::{self, ScrollLock};

const DRAGGING_CLASS: &str = "is-dragging";
const PRESSED_CLASS: &str = "is-pressed";
const MODAL_MARKUP: &str = r#"
    <div class="modal" role="dialog" aria-modal="true" aria-label="리뷰 상세">
      <div class="modal__header">
        <h4 class="modal__title">리뷰 상세</h4>
        <button class="modal__close" aria-label="close modal">×</button>
      </div>
      <div class="modal__media" aria-hidden="true"></div>
      <div class="modal__body"></div>
    </div>
"#;
const MORE_LABEL: &str = "더보기";

thread_local! {
    static REVIEW_CAROUSEL: RefCell<Option<Rc<ScrollTrack>>> = RefCell::new(None);
    static REVIEW_MODAL: RefCell<Option<Rc<ReviewModal>>> = RefCell::new(None);
}

/// Horizontally scrolling strip with prev/next stepping and drag-to-scroll.
pub(crate) struct ScrollTrack {
    track: HtmlElement,
    item_selector: &'static str,
    drag: RefCell<DragScroll>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ScrollTrack {
    pub(crate) fn new(track: HtmlElement, item_selector: &'static str) -> Rc<Self> {
        Rc::new(Self {
            track,
            item_selector,
            drag: RefCell::new(DragScroll::new()),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn track(&self) -> &HtmlElement {
        &self.track
    }

    pub(crate) fn step(&self) -> Option<f64> {
        let item = dom::query_in(&self.track, self.item_selector)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let gap = web_sys::window()
            .and_then(|window| window.get_computed_style(&self.track).ok().flatten())
            .and_then(|style| style.get_property_value("gap").ok())
            .map(|value| parse_css_px(&value))
            .unwrap_or(0.0);
        scroll_step(item.offset_width() as f64, gap)
    }

    pub(crate) fn scroll_by_step(&self, direction: ScrollDirection) {
        let Some(step) = self.step() else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_left(step * direction.sign());
        options.set_behavior(ScrollBehavior::Smooth);
        self.track.scroll_by_with_scroll_to_options(&options);
    }

    /// Wires a prev/next button, optionally with the pressed flash.
    pub(crate) fn bind_button(
        self: &Rc<Self>,
        button: Option<Element>,
        direction: ScrollDirection,
        press_effect_ms: Option<u32>,
    ) {
        let Some(button) = button else {
            return;
        };
        let strip = Rc::clone(self);
        let target = button.clone();
        let listener = EventListener::new(&button, "click", move |_event: &Event| {
            if let Some(duration) = press_effect_ms {
                flash_pressed(&target, duration);
            }
            strip.scroll_by_step(direction);
        });
        self.listeners.borrow_mut().push(listener);
    }

    pub(crate) fn install_drag(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        let strip = Rc::clone(self);
        listeners.push(EventListener::new(&self.track, "pointerdown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            strip
                .drag
                .borrow_mut()
                .begin(event.client_x() as f64, strip.track.scroll_left() as f64);
            dom::set_class(&strip.track, DRAGGING_CLASS, true);
        }));

        let strip = Rc::clone(self);
        listeners.push(EventListener::new(&self.track, "pointermove", move |event: &Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let next = strip.drag.borrow().scroll_for(event.client_x() as f64);
            if let Some(left) = next {
                strip.track.set_scroll_left(left.round() as i32);
            }
        }));

        for event_type in ["pointerup", "pointerleave", "pointercancel"] {
            let strip = Rc::clone(self);
            listeners.push(EventListener::new(&self.track, event_type, move |_event: &Event| {
                if strip.drag.borrow_mut().end() {
                    dom::set_class(&strip.track, DRAGGING_CLASS, false);
                }
            }));
        }
        self.listeners.borrow_mut().extend(listeners);
    }

    pub(crate) fn keep_listener(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

fn flash_pressed(button: &Element, duration_ms: u32) {
    dom::set_class(button, PRESSED_CLASS, true);
    let button = button.clone();
    Timeout::new(duration_ms, move || {
        dom::set_class(&button, PRESSED_CLASS, false);
    })
    .forget();
}

pub(crate) fn install(config: &CarouselConfig) {
    let Some(carousel) = dom::query(".review-carousel") else {
        return;
    };
    let Some(track) = dom::query_in(&carousel, ".card-grid--horizontal")
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let strip = ScrollTrack::new(track, ".card");
    let press = Some(config.press_effect_ms);
    strip.bind_button(
        dom::query_in(&carousel, ".carousel-btn.prev"),
        ScrollDirection::Prev,
        press,
    );
    strip.bind_button(
        dom::query_in(&carousel, ".carousel-btn.next"),
        ScrollDirection::Next,
        press,
    );
    strip.install_drag();

    if let Some(modal) = ReviewModal::mount() {
        modal.attach_more_buttons(strip.track());
        REVIEW_MODAL.with(|slot| {
            *slot.borrow_mut() = Some(modal);
        });
    }
    REVIEW_CAROUSEL.with(|slot| {
        *slot.borrow_mut() = Some(strip);
    });
}

struct ReviewModal {
    overlay: Element,
    media: Element,
    body: Element,
    scroll_lock: RefCell<ScrollLock>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ReviewModal {
    fn mount() -> Option<Rc<Self>> {
        let document = dom::document()?;
        let page = document.body()?;
        let overlay = document.create_element("div").ok()?;
        overlay.set_class_name("modal-overlay");
        overlay.set_inner_html(MODAL_MARKUP);
        page.append_child(&overlay).ok()?;

        let media = dom::query_in(&overlay, ".modal__media")?;
        let body = dom::query_in(&overlay, ".modal__body")?;
        let close = dom::query_in(&overlay, ".modal__close")?;
        let modal = Rc::new(Self {
            overlay,
            media,
            body,
            scroll_lock: RefCell::new(ScrollLock::default()),
            listeners: RefCell::new(Vec::new()),
        });

        let mut listeners = Vec::new();
        let handle = Rc::clone(&modal);
        listeners.push(EventListener::new(&modal.overlay, "click", move |event: &Event| {
            if dom::is_event_target(event, &handle.overlay) {
                handle.close();
            }
        }));
        let handle = Rc::clone(&modal);
        listeners.push(EventListener::new(&close, "click", move |_event: &Event| {
            handle.close();
        }));
        if let Some(window) = web_sys::window() {
            let handle = Rc::clone(&modal);
            listeners.push(EventListener::new(&window, "keydown", move |event: &Event| {
                let is_escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .map(|event| event.key() == "Escape")
                    .unwrap_or(false);
                if is_escape {
                    handle.close();
                }
            }));
        }
        modal.listeners.borrow_mut().extend(listeners);
        Some(modal)
    }

    fn is_open(&self) -> bool {
        self.overlay.class_list().contains("is-open")
    }

    fn open(&self, image_html: &str, text_html: &str) {
        self.media.set_inner_html(image_html);
        self.body.set_inner_html(text_html);
        dom::set_class(&self.overlay, "is-open", true);
        self.scroll_lock.borrow_mut().lock();
    }

    fn close(&self) {
        if !self.is_open() {
            return;
        }
        dom::set_class(&self.overlay, "is-open", false);
        self.scroll_lock.borrow_mut().unlock();
    }

    fn attach_more_buttons(self: &Rc<Self>, track: &Element) {
        let Some(document) = dom::document() else {
            return;
        };
        let mut listeners = Vec::new();
        for card in dom::query_all_in(track, ".card:not(.review-more-card) .text-card") {
            let Ok(button) = document.create_element("button") else {
                continue;
            };
            let _ = button.set_attribute("type", "button");
            button.set_class_name("btn-more");
            button.set_text_content(Some(MORE_LABEL));

            let modal = Rc::clone(self);
            let source = card.clone();
            listeners.push(EventListener::new(&button, "click", move |_event: &Event| {
                let text = dom::query_in(&source, "p")
                    .map(|paragraph| paragraph.inner_html())
                    .unwrap_or_default();
                let image = dom::query_in(&source, ".image-placeholder img")
                    .map(|image| image.outer_html())
                    .unwrap_or_default();
                modal.open(&image, &format!("<p>{text}</p>"));
            }));
            let _ = card.append_child(&button);
        }
        self.listeners.borrow_mut().extend(listeners);
    }
}
