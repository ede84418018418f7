//! DOM-free description of the input a controller reacts to.

use crate::geometry::Point;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Pointer entered the container.
    Enter,
    /// Pointer or finger moved (also used for `touchstart`).
    Move,
    /// Pointer left the container.
    Leave,
    /// Finger lifted or the touch sequence was cancelled.
    TouchEnd,
    /// Discrete select: a click or tap.
    Select,
}

/// Where the input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Fine pointer.
    Mouse,
    /// Coarse pointer.
    Touch,
}

/// One input event as seen by the state machines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub source: InputSource,
    /// Viewport coordinates; `None` when the event carried none.
    pub client: Option<Point>,
    /// Number of simultaneous touch points (0 for mouse input).
    pub touch_count: u32,
    /// Whether the event target sits inside an anchor element.
    pub inside_link: bool,
}

impl InputEvent {
    /// A mouse event at the given client position.
    pub fn mouse(kind: InputKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            source: InputSource::Mouse,
            client: Some(Point::new(client_x, client_y)),
            touch_count: 0,
            inside_link: false,
        }
    }

    /// A mouse boundary event (enter or leave) that carried no position.
    pub fn mouse_boundary(kind: InputKind) -> Self {
        Self {
            kind,
            source: InputSource::Mouse,
            client: None,
            touch_count: 0,
            inside_link: false,
        }
    }

    /// A touch event. `first` is the first touch point, if any.
    pub fn touch(kind: InputKind, first: Option<Point>, touch_count: u32) -> Self {
        Self {
            kind,
            source: InputSource::Touch,
            client: first,
            touch_count,
            inside_link: false,
        }
    }

    /// Mark the event target as sitting inside a link.
    pub fn in_link(mut self, inside_link: bool) -> Self {
        self.inside_link = inside_link;
        self
    }

    /// More than one finger is down: a pinch or other gesture.
    pub fn is_multi_touch(&self) -> bool {
        self.touch_count > 1
    }

    /// Whether this input comes from a coarse pointer.
    pub fn is_coarse(&self) -> bool {
        self.source == InputSource::Touch
    }
}
