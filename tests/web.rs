//! Browser-only checks. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

use admin_portal::app::AppContext;
use admin_portal::components::pages::AnalyticsPage;
use admin_portal::models::AnalyticsData;
use admin_portal::utils::dom;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_inject_style_once_is_idempotent() {
    let id = "portal-test-style";
    assert!(dom::inject_style_once(id, ".marker { color: red; }"));
    assert!(!dom::inject_style_once(id, ".marker { color: blue; }"));

    let document = dom::window().and_then(|w| w.document()).unwrap();
    let styles = document.query_selector_all(&format!("style#{}", id)).unwrap();
    assert_eq!(styles.length(), 1);
    assert_eq!(
        document.get_element_by_id(id).and_then(|e| e.text_content()),
        Some(".marker { color: red; }".to_string())
    );
}

#[wasm_bindgen_test]
fn test_clock_helpers_agree() {
    let ms = dom::now_ms();
    let iso = dom::now_iso();
    assert!(ms > 0.0);
    assert!(iso.ends_with('Z'));
}

fn mount_point() -> HtmlElement {
    let document = dom::window().and_then(|w| w.document()).unwrap();
    let root = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    document.body().unwrap().append_child(&root).unwrap();
    root
}

fn find(root: &HtmlElement, selector: &str) -> Element {
    root.query_selector(selector).unwrap().unwrap()
}

#[wasm_bindgen_test]
async fn test_switching_sub_view_keeps_header_and_tabs() {
    let root = mount_point();
    let _mounted = leptos::mount::mount_to(root.clone(), || {
        provide_context(AppContext::new());
        view! { <AnalyticsPage data=AnalyticsData::placeholder() /> }
    });

    let header = find(&root, "h2");
    let tabs = find(&root, "[role=tablist]");
    let content_before = tabs.next_element_sibling().unwrap();

    let users_tab = root.query_selector_all("[role=tab]").unwrap().get(1).unwrap();
    users_tab.dyn_into::<HtmlElement>().unwrap().click();
    TimeoutFuture::new(0).await;

    assert!(find(&root, "h2").is_same_node(Some(&*header)));
    assert!(find(&root, "[role=tablist]").is_same_node(Some(&*tabs)));
    let content_after = tabs.next_element_sibling().unwrap();
    assert!(!content_after.is_same_node(Some(&*content_before)));
}
