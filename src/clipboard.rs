use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use js_sys::{Function, Promise, Reflect};
use storefront_core::{CopyMethod, CopyOutcome, StoreConfig, Toast, ToastConfig};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Event, HtmlDocument, HtmlTextAreaElement};

use crate::dom;
use crate::toast::ToastView;

pub(crate) fn install(store: &StoreConfig, messages: &ToastConfig, toast: Option<Rc<ToastView>>) {
    if let Some(address) = dom::query(".directions__address-text") {
        address.set_text_content(Some(&store.address));
    }
    let Some(button) = dom::query(".btn-copy-address") else {
        return;
    };
    let address = store.address.clone();
    let messages = messages.clone();
    EventListener::new(&button, "click", move |_event: &Event| {
        if address.is_empty() {
            return;
        }
        let address = address.clone();
        let messages = messages.clone();
        let toast = toast.clone();
        spawn_local(async move {
            let outcome = copy_text(&address).await;
            console::log!("address copy:", format!("{outcome:?}"));
            if let Some(toast) = toast {
                toast.show(Toast::for_copy(outcome, &messages));
            }
        });
    })
    .forget();
}

/// Tries the async Clipboard API first, then the legacy `execCommand` path.
pub(crate) async fn copy_text(text: &str) -> CopyOutcome {
    if write_with_clipboard_api(text).await {
        return CopyOutcome::Copied(CopyMethod::Clipboard);
    }
    if write_with_exec_command(text) {
        return CopyOutcome::Copied(CopyMethod::ExecCommand);
    }
    CopyOutcome::Failed
}

async fn write_with_clipboard_api(text: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let navigator = window.navigator();
    let Ok(clipboard) = Reflect::get(&navigator, &"clipboard".into()) else {
        return false;
    };
    if clipboard.is_undefined() || clipboard.is_null() {
        return false;
    }
    let Ok(write_text) = Reflect::get(&clipboard, &"writeText".into()) else {
        return false;
    };
    let Ok(write_text) = write_text.dyn_into::<Function>() else {
        return false;
    };
    let Ok(promise) = write_text.call1(&clipboard, &JsValue::from_str(text)) else {
        return false;
    };
    let Ok(promise) = promise.dyn_into::<Promise>() else {
        return false;
    };
    JsFuture::from(promise).await.is_ok()
}

fn write_with_exec_command(text: &str) -> bool {
    let Some(document) = dom::document() else {
        return false;
    };
    let Some(body) = document.body() else {
        return false;
    };
    let Some(textarea) = document
        .create_element("textarea")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlTextAreaElement>().ok())
    else {
        return false;
    };
    textarea.set_value(text);
    let style = textarea.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("opacity", "0");
    if body.append_child(&textarea).is_err() {
        return false;
    }
    textarea.select();
    let copied = document
        .dyn_ref::<HtmlDocument>()
        .and_then(|document| document.exec_command("copy").ok())
        .unwrap_or(false);
    let _ = body.remove_child(&textarea);
    copied
}
