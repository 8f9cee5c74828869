use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use storefront_core::{PanZoomViewer, Rect, Size, StoreConfig, ViewerConfig};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent, PointerEvent, WheelEvent,
};

use crate::dom::{self, HasClientRect, ScrollLock};

const OPEN_SELECTOR: &str = "[data-map-open], .btn-open-map";
const MODAL_SELECTOR: &str = "[data-map-modal]";
const PREVIEW_IMAGE_SELECTOR: &str = "[data-map-open] .map-preview__image";
const OPEN_CLASS: &str = "is-open";
const PANNING_CLASS: &str = "is-panning";
const RESETTING_CLASS: &str = "is-resetting";

thread_local! {
    static MAP_RUNTIME: RefCell<Option<Rc<MapRuntime>>> = RefCell::new(None);
}

pub(crate) fn install(store: &StoreConfig, viewer: &ViewerConfig) {
    if let Some(preview) = dom::query(PREVIEW_IMAGE_SELECTOR)
        .and_then(|element| element.dyn_into::<HtmlImageElement>().ok())
    {
        preview.set_src(&store.map_image_src);
    }
    let Some(overlay) = dom::query(MODAL_SELECTOR) else {
        return;
    };
    let runtime = Rc::new(MapRuntime::new(overlay, viewer.clone()));
    if let Some(image) = runtime.image.as_ref() {
        image.set_src(&store.map_image_src);
        if image.complete() {
            runtime.sync_natural_size();
        }
    }
    runtime.install_listeners();
    MAP_RUNTIME.with(|slot| {
        *slot.borrow_mut() = Some(runtime);
    });
}

struct MapRuntime {
    viewer: RefCell<PanZoomViewer>,
    overlay: Element,
    close_button: Option<HtmlElement>,
    image: Option<HtmlImageElement>,
    panzoom: Option<HtmlElement>,
    scroll_lock: RefCell<ScrollLock>,
    open_frame: RefCell<Option<AnimationFrame>>,
    reset_timer: RefCell<Option<Timeout>>,
    pointer_id: Cell<Option<i32>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl MapRuntime {
    fn new(overlay: Element, config: ViewerConfig) -> Self {
        let close_button = dom::query_in(&overlay, ".map-modal__close")
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        let image = dom::query_in(&overlay, ".map-panzoom__image")
            .and_then(|element| element.dyn_into::<HtmlImageElement>().ok());
        let panzoom = dom::query_in(&overlay, "[data-map-panzoom]")
            .or_else(|| dom::query_in(&overlay, "[data-map-viewer]"))
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        Self {
            viewer: RefCell::new(PanZoomViewer::new(config)),
            overlay,
            close_button,
            image,
            panzoom,
            scroll_lock: RefCell::new(ScrollLock::default()),
            open_frame: RefCell::new(None),
            reset_timer: RefCell::new(None),
            pointer_id: Cell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    fn viewport(&self) -> Rect {
        self.panzoom
            .as_ref()
            .map(|panzoom| panzoom.client_rect())
            .unwrap_or_default()
    }

    fn sync_natural_size(&self) {
        let Some(image) = self.image.as_ref() else {
            return;
        };
        let natural = Size::new(image.natural_width() as f64, image.natural_height() as f64);
        self.viewer.borrow_mut().set_natural_size(natural);
    }

    fn install_listeners(self: &Rc<Self>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut listeners = Vec::new();

        for button in dom::query_all(OPEN_SELECTOR) {
            let runtime = Rc::clone(self);
            listeners.push(EventListener::new(&button, "click", move |_event: &Event| {
                runtime.open();
            }));
        }
        if let Some(close) = self.close_button.as_ref() {
            let runtime = Rc::clone(self);
            listeners.push(EventListener::new(close, "click", move |_event: &Event| {
                runtime.close();
            }));
        }
        let runtime = Rc::clone(self);
        listeners.push(EventListener::new(&self.overlay, "click", move |event: &Event| {
            if dom::is_event_target(event, &runtime.overlay) {
                runtime.close();
            }
        }));
        let runtime = Rc::clone(self);
        listeners.push(EventListener::new(&window, "keydown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() == "Escape" && runtime.viewer.borrow().is_open() {
                runtime.close();
            }
        }));
        let runtime = Rc::clone(self);
        listeners.push(EventListener::new(&window, "resize", move |_event: &Event| {
            let viewport = runtime.viewport();
            if runtime.viewer.borrow_mut().on_resize(viewport) {
                runtime.render();
            }
        }));

        if let Some(image) = self.image.as_ref() {
            let runtime = Rc::clone(self);
            listeners.push(EventListener::new(image, "load", move |_event: &Event| {
                runtime.sync_natural_size();
                runtime.render();
            }));
        }

        self.install_zoom_buttons(&mut listeners);
        if let Some(panzoom) = self.panzoom.as_ref() {
            self.install_pointer_listeners(panzoom, &mut listeners);
        }
        self.listeners.borrow_mut().extend(listeners);
    }

    fn install_zoom_buttons(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        let buttons: [(&str, fn(&Rc<MapRuntime>)); 3] = [
            ("[data-zoom-in]", |runtime| runtime.zoom_by_button(true)),
            ("[data-zoom-out]", |runtime| runtime.zoom_by_button(false)),
            ("[data-zoom-reset]", |runtime| runtime.reset_animated()),
        ];
        for (selector, action) in buttons {
            let Some(button) = dom::query_in(&self.overlay, selector) else {
                continue;
            };
            let runtime = Rc::clone(self);
            listeners.push(EventListener::new(&button, "click", move |_event: &Event| {
                action(&runtime);
            }));
        }
    }

    fn install_pointer_listeners(
        self: &Rc<Self>,
        panzoom: &HtmlElement,
        listeners: &mut Vec<EventListener>,
    ) {
        let active = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        };

        let runtime = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            panzoom,
            "pointerdown",
            active,
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                event.prevent_default();
                runtime.begin_pan(event);
            },
        ));

        let runtime = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            panzoom,
            "pointermove",
            active,
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                if !runtime.viewer.borrow().is_panning() {
                    return;
                }
                event.prevent_default();
                let moved = runtime.viewer.borrow_mut().pan_to(dom::client_point(event));
                if moved {
                    runtime.render();
                }
            },
        ));

        for event_type in ["pointerup", "pointerleave", "pointercancel"] {
            let runtime = Rc::clone(self);
            listeners.push(EventListener::new(panzoom, event_type, move |_event: &Event| {
                runtime.end_pan();
            }));
        }

        let runtime = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            panzoom,
            "wheel",
            active,
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let consumed = runtime
                    .viewer
                    .borrow_mut()
                    .wheel(event.delta_y(), dom::client_point(event));
                if consumed {
                    event.prevent_default();
                    runtime.render();
                }
            },
        ));
    }

    fn open(self: &Rc<Self>) {
        dom::set_class(&self.overlay, OPEN_CLASS, true);
        self.scroll_lock.borrow_mut().lock();
        self.viewer.borrow_mut().open(self.viewport());
        self.render();

        let runtime = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            runtime.open_frame.borrow_mut().take();
            let viewport = runtime.viewport();
            {
                let mut viewer = runtime.viewer.borrow_mut();
                viewer.set_viewport(viewport);
                viewer.reset(false);
            }
            runtime.render();
        });
        *self.open_frame.borrow_mut() = Some(handle);

        if let Some(close) = self.close_button.as_ref() {
            let _ = close.focus();
        }
    }

    fn close(&self) {
        dom::set_class(&self.overlay, OPEN_CLASS, false);
        self.scroll_lock.borrow_mut().unlock();
        self.open_frame.borrow_mut().take();
        let was_panning = self.viewer.borrow().is_panning();
        self.viewer.borrow_mut().close();
        if was_panning {
            self.release_pointer();
        }
        self.render();
    }

    fn zoom_by_button(&self, zoom_in: bool) {
        let changed = {
            let mut viewer = self.viewer.borrow_mut();
            if zoom_in {
                viewer.zoom_in()
            } else {
                viewer.zoom_out()
            }
        };
        if changed {
            self.render();
        }
    }

    fn reset_animated(self: &Rc<Self>) {
        let animate = self.viewer.borrow_mut().reset(true);
        self.render();
        if !animate {
            return;
        }
        let Some(image) = self.image.as_ref() else {
            self.viewer.borrow_mut().finish_reset_animation();
            return;
        };
        dom::set_class(image, RESETTING_CLASS, true);
        let duration = self.viewer.borrow().config().reset_animation_ms;
        let runtime = Rc::clone(self);
        *self.reset_timer.borrow_mut() = Some(Timeout::new(duration, move || {
            runtime.reset_timer.borrow_mut().take();
            runtime.viewer.borrow_mut().finish_reset_animation();
            if let Some(image) = runtime.image.as_ref() {
                dom::set_class(image, RESETTING_CLASS, false);
            }
        }));
    }

    fn begin_pan(&self, event: &PointerEvent) {
        let Some(panzoom) = self.panzoom.as_ref() else {
            return;
        };
        if !self.viewer.borrow_mut().begin_pan(dom::client_point(event)) {
            return;
        }
        dom::set_class(panzoom, PANNING_CLASS, true);
        let pointer_id = event.pointer_id();
        if panzoom.set_pointer_capture(pointer_id).is_ok() {
            self.pointer_id.set(Some(pointer_id));
        }
    }

    fn end_pan(&self) {
        if self.viewer.borrow_mut().end_pan() {
            self.release_pointer();
        }
    }

    fn release_pointer(&self) {
        let Some(panzoom) = self.panzoom.as_ref() else {
            return;
        };
        dom::set_class(panzoom, PANNING_CLASS, false);
        if let Some(pointer_id) = self.pointer_id.take() {
            let _ = panzoom.release_pointer_capture(pointer_id);
        }
    }

    fn render(&self) {
        let Some(image) = self.image.as_ref() else {
            return;
        };
        let css = self.viewer.borrow().css_transform();
        let _ = image.style().set_property("transform", &css);
    }
}
