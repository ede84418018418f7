//! Thin helpers over `web_sys` for the controller and scanner.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, MouseEvent, TouchEvent, Window};
use zoom_core::constants::style_flag;
use zoom_core::{InputEvent, InputKind, Point, Rect};

use crate::error::ZoomError;

pub fn window() -> Result<Window, ZoomError> {
    web_sys::window().ok_or(ZoomError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, ZoomError> {
    window.document().ok_or(ZoomError::NoDocument)
}

/// Computed value of a custom property, trimmed. Empty when unset.
pub fn computed_property(window: &Window, element: &Element, property: &str) -> String {
    window
        .get_computed_style(element)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value(property).ok())
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Whether the page runs inside a frame. A cross-origin parent that refuses
/// access counts as a frame.
pub fn in_iframe(window: &Window) -> bool {
    match window.top() {
        Ok(Some(top)) => JsValue::from(top) != JsValue::from(window.clone()),
        Ok(None) => false,
        Err(_) => true,
    }
}

/// The site editor's preview: edit-mode flag on `body` while framed.
pub fn plugin_disabled(window: &Window, document: &Document) -> bool {
    let Some(body) = document.body() else {
        return false;
    };
    computed_property(window, &body, style_flag::EDIT_MODE) == "true" && in_iframe(window)
}

pub fn bounding_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Whether the event target sits inside an `<a>`.
fn inside_link(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest("a").ok().flatten())
        .is_some()
}

/// Read a mouse (or pointer) event. `None` if the event is not one, except
/// for enter and leave, which need no coordinates and are read from any
/// event type.
pub fn mouse_input(kind: InputKind, event: &Event) -> Option<InputEvent> {
    let input = match event.dyn_ref::<MouseEvent>() {
        Some(mouse) => {
            InputEvent::mouse(kind, f64::from(mouse.client_x()), f64::from(mouse.client_y()))
        }
        None if matches!(kind, InputKind::Enter | InputKind::Leave) => {
            InputEvent::mouse_boundary(kind)
        }
        None => return None,
    };
    Some(input.in_link(inside_link(event)))
}

/// Read a touch event. Missing touch points give an input without
/// coordinates, which the state machines ignore.
pub fn touch_input(kind: InputKind, event: &Event) -> Option<InputEvent> {
    let touch = event.dyn_ref::<TouchEvent>()?;
    let touches = touch.touches();
    let first = touches
        .get(0)
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())));
    Some(InputEvent::touch(kind, first, touches.length()).in_link(inside_link(event)))
}
