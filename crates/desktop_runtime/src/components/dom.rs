//! Internal DOM lookup, focus, and animation helpers for desktop shell widgets.

use desktop_app_contract::ApplicationId;
use leptos::logging;
use wasm_bindgen::JsCast;

use crate::{error::RuntimeError, model::WindowRect, transmute::TransmutePlan};

pub(crate) fn window_dom_id(app_id: &ApplicationId) -> String {
    format!("window-{app_id}")
}

pub(crate) fn taskbar_icon_dom_id(app_id: &ApplicationId) -> String {
    format!("taskbar-icon-{app_id}")
}

/// Logs a [`RuntimeError::MissingRenderTarget`] for a node that was expected to be mounted.
pub(crate) fn warn_missing_target(id: &str) {
    logging::warn!("{}", missing_target(id));
}

fn missing_target(id: &str) -> RuntimeError {
    RuntimeError::MissingRenderTarget(format!("#{id}"))
}

fn html_element_by_id(id: &str) -> Option<web_sys::HtmlElement> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
}

/// Focuses an element by ID and reports whether a focusable HTML element was found.
pub(crate) fn focus_element_by_id(id: &str) -> bool {
    let Some(element) = html_element_by_id(id) else {
        return false;
    };
    let _ = element.focus();
    true
}

/// Focuses the first menu item inside a menu container.
pub(crate) fn focus_first_menu_item(menu_id: &str) -> bool {
    let first = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(menu_id))
        .and_then(|menu| menu.query_selector(r#"[role="menuitem"]"#).ok().flatten())
        .and_then(|item| item.dyn_into::<web_sys::HtmlElement>().ok());
    match first {
        Some(item) => {
            let _ = item.focus();
            true
        }
        None => false,
    }
}

/// Viewport-relative bounds of an element, rounded to whole pixels.
pub(crate) fn element_rect(id: &str) -> Option<WindowRect> {
    let rect = html_element_by_id(id)?.get_bounding_client_rect();
    Some(WindowRect {
        x: rect.left().round() as i32,
        y: rect.top().round() as i32,
        w: rect.width().round() as i32,
        h: rect.height().round() as i32,
    })
}

pub(crate) fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Starts the morph on the window element. Returns `false` when the element is absent.
pub(crate) fn play_transmute(element_id: &str, plan: &TransmutePlan) -> bool {
    let Some(element) = html_element_by_id(element_id) else {
        return false;
    };
    let (start, end) = plan.keyframes();
    let style = element.style();
    let _ = element.class_list().add_1("transmuting");
    let _ = style.set_property("transition", "none");
    let _ = style.set_property("transform", &start);
    // Reading layout commits the start frame before the transition is enabled.
    let _ = element.offset_width();
    let _ = style.set_property(
        "transition",
        &format!("transform {}ms ease-in-out", plan.duration_ms),
    );
    let _ = style.set_property("transform", &end);
    true
}

pub(crate) fn finish_transmute(element_id: &str) {
    let Some(element) = html_element_by_id(element_id) else {
        return;
    };
    let style = element.style();
    let _ = style.remove_property("transition");
    let _ = style.remove_property("transform");
    let _ = element.class_list().remove_1("transmuting");
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}
