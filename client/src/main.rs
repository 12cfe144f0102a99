mod api;
mod app;
mod cities;
mod controls;
mod detail;
mod layers;
mod leaflet;
mod map_view;
mod refresh;
mod scenario;
mod stats;
mod time_format;

use leptos::mount::mount_to;
use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::JsCast;

thread_local! {
    static MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = const { RefCell::new(None) };
}

fn mount_target(document: &web_sys::Document) -> Option<web_sys::HtmlElement> {
    document
        .get_element_by_id("app")
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body())
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(target) = mount_target(&document) else {
        return;
    };

    // Keep the mount handle alive; a repeated main() replaces the running app
    // instead of stacking a second live instance over it.
    MOUNT_HANDLE.with(|slot| {
        slot.borrow_mut().take();
        let handle = mount_to(target, app::App);
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
