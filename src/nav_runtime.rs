use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use storefront_core::{
    FrameGate, MotionPreference, NavLink, NavigationConfig, NavigationTracker, Rect,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
};

use crate::dom::{self, HasClientRect};

const SECTION_SELECTOR: &str = "section";
const LINK_SELECTOR: &str = ".nav-link";
const HEADER_SELECTOR: &str = ".site-header";
const ANIMATION_READY_CLASS: &str = "anim-ready";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

thread_local! {
    static NAV_RUNTIME: RefCell<Option<Rc<NavRuntime>>> = RefCell::new(None);
}

pub(crate) fn install(config: &NavigationConfig, motion: MotionPreference) {
    let Some(runtime) = NavRuntime::new(config, motion) else {
        return;
    };
    runtime.install_listeners();
    runtime.install_observer();
    runtime.initialize();
    NAV_RUNTIME.with(|slot| {
        *slot.borrow_mut() = Some(runtime);
    });
}

struct NavRuntime {
    tracker: RefCell<NavigationTracker>,
    sections: Vec<Element>,
    links: Vec<(Element, NavLink)>,
    header: Option<HtmlElement>,
    gate: RefCell<FrameGate>,
    frame: RefCell<Option<AnimationFrame>>,
    observer: RefCell<Option<(IntersectionObserver, ObserverCallback)>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl NavRuntime {
    fn new(config: &NavigationConfig, motion: MotionPreference) -> Option<Rc<Self>> {
        let sections: Vec<Element> = dom::query_all(SECTION_SELECTOR)
            .into_iter()
            .filter(|section| !section.id().is_empty())
            .collect();
        let links: Vec<(Element, NavLink)> = dom::query_all(LINK_SELECTOR)
            .into_iter()
            .map(|element| {
                let section_id = element.get_attribute("data-section").unwrap_or_default();
                let href = element.get_attribute("href").unwrap_or_default();
                (element, NavLink::new(section_id, href))
            })
            .collect();
        if sections.is_empty() && links.is_empty() {
            return None;
        }
        let tracker = NavigationTracker::new(
            sections.iter().map(|section| section.id()),
            links.iter().map(|(_, link)| link.clone()).collect(),
            config,
            motion,
        );
        Some(Rc::new(Self {
            tracker: RefCell::new(tracker),
            sections,
            links,
            header: dom::query_html(HEADER_SELECTOR),
            gate: RefCell::new(FrameGate::new()),
            frame: RefCell::new(None),
            observer: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    fn header_height(&self) -> f64 {
        self.header
            .as_ref()
            .map(|header| header.offset_height() as f64)
            .unwrap_or(0.0)
    }

    fn section_rects(&self) -> Vec<Rect> {
        self.sections.iter().map(|section| section.client_rect()).collect()
    }

    fn initialize(&self) {
        let rects = self.section_rects();
        let viewport_height = dom::viewport_height();
        {
            let mut tracker = self.tracker.borrow_mut();
            if tracker.motion().animations_enabled() {
                tracker.prime_reveal(&rects, viewport_height);
                if let Some(body) = dom::body() {
                    dom::set_class(&body, ANIMATION_READY_CLASS, true);
                }
            }
            tracker.initialize(&rects, self.header_height(), viewport_height);
        }
        self.render();
    }

    fn install_observer(self: &Rc<Self>) {
        let band = self.tracker.borrow().band();
        let options = IntersectionObserverInit::new();
        options.set_root_margin(&band.root_margin());
        options.set_threshold(&JsValue::from_f64(band.threshold));

        let runtime = Rc::clone(self);
        let callback: ObserverCallback =
            Closure::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let batch: Vec<(String, bool)> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| (entry.target().id(), entry.is_intersecting()))
                    .collect();
                runtime.tracker.borrow_mut().on_visibility_batch(&batch);
                runtime.render();
            });
        let handler = callback.as_ref().unchecked_ref();
        let Ok(observer) = IntersectionObserver::new_with_options(handler, &options) else {
            console::warn!("nav: IntersectionObserver unavailable, scroll fallback only");
            return;
        };
        for section in &self.sections {
            observer.observe(section);
        }
        *self.observer.borrow_mut() = Some((observer, callback));
    }

    fn install_listeners(self: &Rc<Self>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut listeners = Vec::new();
        let passive = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: true,
        };
        for event_type in ["scroll", "resize"] {
            let runtime = Rc::clone(self);
            listeners.push(EventListener::new_with_options(
                &window,
                event_type,
                passive,
                move |_event: &Event| {
                    runtime.schedule_measure();
                },
            ));
        }

        let runtime = Rc::clone(self);
        listeners.push(EventListener::new(&window, "load", move |_event: &Event| {
            let rects = runtime.section_rects();
            runtime
                .tracker
                .borrow_mut()
                .prime_reveal(&rects, dom::viewport_height());
            runtime.render_sections();
        }));

        for (element, link) in &self.links {
            let runtime = Rc::clone(self);
            let href = link.href.clone();
            let anchor = element.clone();
            listeners.push(EventListener::new_with_options(
                element,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    event.prevent_default();
                    runtime.follow_link(&anchor, &href);
                },
            ));
        }
        self.listeners.borrow_mut().extend(listeners);
    }

    fn schedule_measure(self: &Rc<Self>) {
        if !self.gate.borrow_mut().request() {
            return;
        }
        let runtime = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            runtime.frame.borrow_mut().take();
            runtime.gate.borrow_mut().complete();
            runtime.measure();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn measure(&self) {
        let rects = self.section_rects();
        self.tracker
            .borrow_mut()
            .on_scroll(&rects, self.header_height(), dom::viewport_height());
        self.render();
    }

    fn follow_link(&self, anchor: &Element, href: &str) {
        let document = dom::document();
        let lookup = |id: &str| {
            document
                .as_ref()
                .and_then(|document| document.get_element_by_id(id))
        };
        let resolved = self
            .tracker
            .borrow_mut()
            .on_nav_link_click(href, |id| lookup(id).is_some());
        let Some(target_id) = resolved else {
            return;
        };
        let target = self
            .sections
            .iter()
            .find(|section| section.id() == target_id)
            .cloned()
            .or_else(|| lookup(&target_id));
        if let Some(target) = target {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        }
        self.render_links();
        if let Some(anchor) = anchor.dyn_ref::<HtmlElement>() {
            let _ = anchor.blur();
        }
    }

    fn render(&self) {
        self.render_links();
        self.render_sections();
    }

    fn render_links(&self) {
        let tracker = self.tracker.borrow();
        for (element, link) in &self.links {
            let active = tracker.is_link_active(link);
            dom::set_class(element, "active", active);
            let _ = element.set_attribute("aria-current", if active { "true" } else { "false" });
        }
    }

    fn render_sections(&self) {
        let tracker = self.tracker.borrow();
        for (element, state) in self.sections.iter().zip(tracker.sections()) {
            dom::set_class(element, "is-visible", state.is_visible());
        }
    }
}
