use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use storefront_core::{Toast, ToastState};
use web_sys::Element;

use crate::dom;

const VISIBLE_CLASS: &str = "is-visible";
const ERROR_CLASS: &str = "is-error";

pub(crate) struct ToastView {
    element: Element,
    state: RefCell<ToastState>,
    timer: RefCell<Option<Timeout>>,
    duration_ms: u32,
}

impl ToastView {
    pub(crate) fn mount(duration_ms: u32) -> Option<Rc<Self>> {
        let element = dom::query(".toast")?;
        Some(Rc::new(Self {
            element,
            state: RefCell::new(ToastState::new()),
            timer: RefCell::new(None),
            duration_ms,
        }))
    }

    /// Shows `toast`, replacing whatever is on screen and restarting the timer.
    pub(crate) fn show(self: &Rc<Self>, toast: Toast) {
        self.element.set_text_content(Some(&toast.message));
        dom::set_class(&self.element, ERROR_CLASS, toast.is_error);
        dom::set_class(&self.element, VISIBLE_CLASS, true);
        let generation = self.state.borrow_mut().show(toast);

        let view = Rc::clone(self);
        // Dropping the previous handle cancels it.
        *self.timer.borrow_mut() = Some(Timeout::new(self.duration_ms, move || {
            view.timer.borrow_mut().take();
            if view.state.borrow_mut().expire(generation) {
                dom::set_class(&view.element, VISIBLE_CLASS, false);
                dom::set_class(&view.element, ERROR_CLASS, false);
            }
        }));
    }
}
