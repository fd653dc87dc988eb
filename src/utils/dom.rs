//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use web_sys::Window;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Insert a `<style>` block into `<head>` unless one with `id` already exists.
///
/// Returns `true` only when the block was inserted by this call.
pub fn inject_style_once(id: &str, css: &str) -> bool {
    let Some(document) = window().and_then(|w| w.document()) else {
        return false;
    };
    if document.get_element_by_id(id).is_some() {
        return false;
    }
    let Some(head) = document.head() else {
        return false;
    };
    let Ok(style) = document.create_element("style") else {
        return false;
    };
    style.set_id(id);
    style.set_text_content(Some(css));
    head.append_child(&style).is_ok()
}

/// Open a URL in a new browser tab.
pub fn open_in_new_tab(url: &str) {
    if let Some(window) = window()
        && window.open_with_url_and_target(url, "_blank").is_err()
    {
        tracing::warn!(%url, "could not open new tab");
    }
}

/// Milliseconds since the Unix epoch, from the browser clock.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current time as an ISO-8601 string.
pub fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}
