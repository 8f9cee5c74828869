use storefront_core::{Point, Rect};
use wasm_bindgen::JsCast;
use web_sys::{Document, DomRect, Element, HtmlElement, MouseEvent};

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> Rect;
}

impl HasClientRect for Element {
    fn client_rect(&self) -> Rect {
        rect_from_dom(&self.get_bounding_client_rect())
    }
}

impl HasClientRect for HtmlElement {
    fn client_rect(&self) -> Rect {
        rect_from_dom(&self.get_bounding_client_rect())
    }
}

pub(crate) fn rect_from_dom(rect: &DomRect) -> Rect {
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub(crate) fn client_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub(crate) fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub(crate) fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub(crate) fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub(crate) fn query_html(selector: &str) -> Option<HtmlElement> {
    query(selector)?.dyn_into::<HtmlElement>().ok()
}

pub(crate) fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = document() else {
        return Vec::new();
    };
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// `true` when the event fired on `element` itself rather than a descendant.
pub(crate) fn is_event_target(event: &web_sys::Event, element: &Element) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|target| &target == element)
        .unwrap_or(false)
}

pub(crate) fn viewport_height() -> f64 {
    let Some(window) = web_sys::window() else {
        return 0.0;
    };
    let inner = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    if inner > 0.0 {
        return inner;
    }
    window
        .document()
        .and_then(|document| document.document_element())
        .map(|root| root.client_height() as f64)
        .unwrap_or(0.0)
}

/// Body overflow override that restores whatever was set before.
#[derive(Default)]
pub(crate) struct ScrollLock {
    previous: Option<String>,
}

impl ScrollLock {
    pub(crate) fn lock(&mut self) {
        let Some(body) = body() else {
            return;
        };
        let style = body.style();
        if self.previous.is_none() {
            self.previous = Some(style.get_property_value("overflow").unwrap_or_default());
        }
        let _ = style.set_property("overflow", "hidden");
    }

    pub(crate) fn unlock(&mut self) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        let Some(body) = body() else {
            return;
        };
        let style = body.style();
        if previous.is_empty() {
            let _ = style.remove_property("overflow");
        } else {
            let _ = style.set_property("overflow", &previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn dom_rect_maps_to_core_rect() {
        let dom = DomRect::new_with_x_and_y_and_width_and_height(10.0, 20.0, 300.0, 150.0)
            .expect("DOMRect constructor");
        let rect = rect_from_dom(&dom);
        assert_eq!(rect, Rect::new(10.0, 20.0, 300.0, 150.0));
        assert_eq!(rect.bottom(), 170.0);
    }

    #[wasm_bindgen_test]
    fn scroll_lock_restores_previous_overflow() {
        let body = body().expect("body");
        let _ = body.style().set_property("overflow", "scroll");
        let mut lock = ScrollLock::default();
        lock.lock();
        lock.lock();
        assert_eq!(body.style().get_property_value("overflow").unwrap(), "hidden");
        lock.unlock();
        assert_eq!(body.style().get_property_value("overflow").unwrap(), "scroll");
        let _ = body.style().remove_property("overflow");
    }
}
