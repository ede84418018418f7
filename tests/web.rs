//! Browser tests: `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use imgzoom::controller::{ControllerOptions, attach};
use imgzoom::scanner::{BlockScanner, SelectorScanner};
use imgzoom::zoom_core::constants::{DOT_PRESET_MARKUP, attribute, class, property};
use imgzoom::zoom_core::ZoomLock;
use imgzoom::{ZoomConfig, ZoomError};
use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlElement, MouseEvent, MouseEventInit, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().unwrap()
}

fn document() -> Document {
    window().document().unwrap()
}

/// A 200x100 container fixed at (50, 50) holding one image.
fn container(extra_style: &str) -> HtmlElement {
    let doc = document();
    let el: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    el.set_attribute(
        "style",
        &format!("position: fixed; left: 50px; top: 50px; width: 200px; height: 100px; margin: 0; {extra_style}"),
    )
    .unwrap();
    el.set_inner_html(r#"<img alt="" style="width: 100%; height: 100%">"#);
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

fn unthrottled() -> ControllerOptions {
    ControllerOptions {
        throttle_moves: false,
        ..ControllerOptions::default()
    }
}

fn mouse(el: &HtmlElement, event_type: &str, x: i32, y: i32) {
    let init = MouseEventInit::new();
    init.set_client_x(x);
    init.set_client_y(y);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = MouseEvent::new_with_mouse_event_init_dict(event_type, &init).unwrap();
    el.dispatch_event(&event).unwrap();
}

fn plain(el: &HtmlElement, event_type: &str) {
    el.dispatch_event(&Event::new(event_type).unwrap()).unwrap();
}

/// Resolves on the next animation frame, after callbacks requested earlier.
async fn next_frame() {
    let promise = Promise::new(&mut |resolve, _reject| {
        window().request_animation_frame(&resolve).unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn style_prop(el: &HtmlElement, name: &str) -> String {
    el.style().get_property_value(name).unwrap()
}

#[wasm_bindgen_test]
fn publishes_relative_position() {
    let el = container("");
    let target = attach(&el, &unthrottled()).unwrap();

    mouse(&el, "mousemove", 60, 55);
    assert_eq!(style_prop(&el, property::X_POS), "10px");
    assert_eq!(style_prop(&el, property::Y_POS), "5px");
    assert!(el.class_list().contains(class::ACTIVE_ZOOM));

    mouse(&el, "mousemove", 10, 10);
    assert_eq!(style_prop(&el, property::X_POS), "0px");
    assert_eq!(style_prop(&el, property::Y_POS), "0px");

    target.detach();
    el.remove();
}

#[wasm_bindgen_test]
fn second_attach_is_rejected() {
    let el = container("");
    let target = attach(&el, &unthrottled()).unwrap();
    assert!(el.has_attribute(attribute::CONTAINER_ATTACHED));

    assert!(matches!(attach(&el, &unthrottled()), Err(ZoomError::AlreadyAttached)));

    target.detach();
    assert!(!el.has_attribute(attribute::CONTAINER_ATTACHED));
    el.remove();
}

#[wasm_bindgen_test]
fn container_without_image_is_rejected() {
    let el = container("");
    el.set_inner_html("");
    assert!(matches!(attach(&el, &unthrottled()), Err(ZoomError::NoImage)));
    el.remove();
}

#[wasm_bindgen_test]
fn click_locks_and_leave_unlocks() {
    let el = container("");
    let target = attach(&el, &unthrottled()).unwrap();

    mouse(&el, "mousemove", 100, 80);
    mouse(&el, "click", 100, 80);
    assert_eq!(target.lock_state(), ZoomLock::Locked);

    mouse(&el, "mousemove", 200, 120);
    assert_eq!(style_prop(&el, property::X_POS), "50px");
    assert_eq!(style_prop(&el, property::Y_POS), "30px");

    mouse(&el, "mouseleave", 300, 300);
    assert_eq!(target.lock_state(), ZoomLock::Unlocked);
    assert!(!target.is_active());
    assert!(!el.class_list().contains(class::ACTIVE_ZOOM));

    target.detach();
    el.remove();
}

#[wasm_bindgen_test]
fn bare_leave_event_resets_zoom_and_cursor() {
    let el = container("--cursor: dot;");
    let target = attach(&el, &unthrottled()).unwrap();

    mouse(&el, "mouseenter", 60, 60);
    mouse(&el, "mousemove", 100, 80);
    mouse(&el, "click", 100, 80);
    assert_eq!(target.lock_state(), ZoomLock::Locked);
    assert!(target.cursor_visible());

    plain(&el, "mouseleave");
    assert_eq!(target.lock_state(), ZoomLock::Unlocked);
    assert!(!el.class_list().contains(class::ACTIVE_ZOOM));
    assert!(!el.class_list().contains(class::FOLLOW_CURSOR));
    assert!(!target.cursor_visible());

    // A bare move has no position and changes nothing.
    plain(&el, "mousemove");
    assert!(!target.is_active());

    target.detach();
    el.remove();
}

#[wasm_bindgen_test]
async fn throttled_moves_write_only_the_latest() {
    let el = container("");
    let target = attach(&el, &ControllerOptions::default()).unwrap();

    mouse(&el, "mousemove", 60, 55);
    mouse(&el, "mousemove", 150, 90);
    assert_eq!(style_prop(&el, property::X_POS), "");
    assert!(!el.class_list().contains(class::ACTIVE_ZOOM));

    next_frame().await;
    assert_eq!(style_prop(&el, property::X_POS), "100px");
    assert_eq!(style_prop(&el, property::Y_POS), "40px");
    assert!(el.class_list().contains(class::ACTIVE_ZOOM));

    target.detach();
    el.remove();
}

#[wasm_bindgen_test]
async fn leave_drops_pending_throttled_move() {
    let el = container("");
    let target = attach(&el, &ControllerOptions::default()).unwrap();

    mouse(&el, "mousemove", 60, 55);
    mouse(&el, "mouseleave", 300, 300);
    next_frame().await;
    next_frame().await;

    assert!(!target.is_active());
    assert!(!el.class_list().contains(class::ACTIVE_ZOOM));
    assert_eq!(style_prop(&el, property::X_POS), "");

    target.detach();
    el.remove();
}

#[wasm_bindgen_test]
fn dot_cursor_is_inserted_once() {
    let el = container("--cursor: dot;");
    let target = attach(&el, &unthrottled()).unwrap();
    assert!(target.has_custom_cursor());
    assert_eq!(el.inner_html().matches(DOT_PRESET_MARKUP).count(), 1);

    target.detach();
    let target = attach(&el, &unthrottled()).unwrap();
    let cursors = el.query_selector_all(".zoom-follow-cursor").unwrap();
    assert_eq!(cursors.length(), 1);

    mouse(&el, "mouseenter", 60, 60);
    assert!(el.class_list().contains(class::FOLLOW_CURSOR));
    mouse(&el, "mousemove", 30, 70);
    let cursor = target.cursor_element().unwrap();
    assert_eq!(
        cursor.style().get_property_value("transform").unwrap(),
        "translate3d(-20px, 20px, 0px)"
    );
    mouse(&el, "mouseleave", 300, 300);
    assert!(!el.class_list().contains(class::FOLLOW_CURSOR));

    target.detach();
    el.remove();
}

#[wasm_bindgen_test]
fn escaped_literal_cursor() {
    let el = container(r#"--cursor: "<span class=\"zoom-follow-cursor ring\"></span>";"#);
    let target = attach(&el, &unthrottled()).unwrap();

    let cursor = target.cursor_element().unwrap();
    assert_eq!(cursor.tag_name(), "SPAN");
    assert!(cursor.class_list().contains("ring"));

    target.detach();
    el.remove();
}

#[wasm_bindgen_test]
fn scanner_skips_processed_blocks() {
    let doc = document();
    let block: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    block.set_class_name("sqs-block-image");
    block.set_attribute("style", "--wm-image-zoom: true;").unwrap();
    block.set_inner_html(r#"<div class="frame"><img alt=""></div><div class="sqs-gallery-thumbnails"><img alt=""></div>"#);
    doc.body().unwrap().append_child(&block).unwrap();

    let scanner = SelectorScanner::new(ZoomConfig::default().unprocessed_blocks_selector());
    let found = scanner.discover(&window(), &doc).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].class_list().contains(class::ZOOM_CONTAINER));
    assert!(block.has_attribute(attribute::BLOCK_PROCESSED));

    let again = scanner.discover(&window(), &doc).unwrap();
    assert!(again.is_empty());

    block.remove();
}

#[wasm_bindgen_test]
fn scanner_ignores_blocks_without_flag() {
    let doc = document();
    let block: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    block.set_class_name("sqs-block-image");
    block.set_inner_html(r#"<div><img alt=""></div>"#);
    doc.body().unwrap().append_child(&block).unwrap();

    let scanner = SelectorScanner::new(ZoomConfig::default().unprocessed_blocks_selector());
    assert!(scanner.discover(&window(), &doc).unwrap().is_empty());
    assert!(!block.has_attribute(attribute::BLOCK_PROCESSED));

    block.remove();
}

#[wasm_bindgen_test]
fn classless_cursor_markup_is_tagged_and_moved() {
    let el = container(r#"--cursor: "<b></b>";"#);
    let target = attach(&el, &unthrottled()).unwrap();

    let cursor = target.cursor_element().unwrap();
    assert_eq!(cursor.tag_name(), "B");
    assert!(cursor.has_attribute(attribute::CURSOR_INSERTED));

    mouse(&el, "mousemove", 70, 60);
    assert_eq!(
        cursor.style().get_property_value("transform").unwrap(),
        "translate3d(20px, 10px, 0px)"
    );

    target.detach();
    let target = attach(&el, &unthrottled()).unwrap();
    assert_eq!(el.query_selector_all("b").unwrap().length(), 1);

    target.detach();
    el.remove();
}
