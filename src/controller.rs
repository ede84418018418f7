//! Per-container interaction controller.
//!
//! [`attach`] wires two independent subscriptions onto one container:
//!
//! - zoom tracking: mouse/touch moves publish `--x-pos`/`--y-pos` and toggle
//!   `active-zoom`; clicks toggle the zoom lock;
//! - cursor following (opt-in through `--cursor`): a custom cursor element
//!   is inserted once and translated to the pointer.
//!
//! Each subscription owns its state machine from `zoom_core` and its own
//! listeners. They read the same events and share nothing else.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlElement, HtmlImageElement, Window};
use zoom_core::constants::{attribute, class, property, style_flag};
use zoom_core::geometry::{px, translate3d};
use zoom_core::{
    CursorFollower, CursorPresets, CursorSpec, CursorUpdate, InputEvent, InputKind, InputSource,
    Point, ZoomLock, ZoomTracker, ZoomUpdate,
};

use crate::config::ZoomConfig;
use crate::dom;
use crate::error::ZoomError;
use crate::frame::FrameThrottle;
use crate::listener::EventListener;

/// Options shared by every controller on the page.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub presets: CursorPresets,
    pub throttle_moves: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            presets: CursorPresets::default(),
            throttle_moves: true,
        }
    }
}

impl From<&ZoomConfig> for ControllerOptions {
    fn from(config: &ZoomConfig) -> Self {
        Self {
            presets: config.cursor_presets(),
            throttle_moves: config.throttle_moves,
        }
    }
}

/// A container with a live controller.
///
/// Dropping it removes every listener, clears the state classes and the
/// attachment marker.
pub struct ZoomTarget {
    container: HtmlElement,
    zoom: ZoomSubscription,
    cursor: Option<CursorSubscription>,
}

/// Attach a controller to `container`.
///
/// Fails with [`ZoomError::AlreadyAttached`] if a controller already owns the
/// container, and with [`ZoomError::NoImage`] if it holds no `<img>`. A
/// cursor that cannot be set up is logged and skipped; zoom still works.
pub fn attach(container: &HtmlElement, options: &ControllerOptions) -> Result<ZoomTarget, ZoomError> {
    if container.has_attribute(attribute::CONTAINER_ATTACHED) {
        return Err(ZoomError::AlreadyAttached);
    }
    if container
        .query_selector("img")
        .map_err(ZoomError::from_js)?
        .is_none()
    {
        return Err(ZoomError::NoImage);
    }

    let window = dom::window()?;
    let zoom = ZoomSubscription::attach(&window, container, options.throttle_moves)?;

    let cursor_value = dom::computed_property(&window, container, style_flag::CURSOR);
    let cursor = CursorSpec::parse(&cursor_value).and_then(|spec| {
        let markup = spec.markup(&options.presets);
        match CursorSubscription::attach(&window, container, markup, options.throttle_moves) {
            Ok(subscription) => Some(subscription),
            Err(e) => {
                log::warn!("Custom cursor unavailable, zoom continues without it: {}", e);
                None
            }
        }
    });

    container
        .set_attribute(attribute::CONTAINER_ATTACHED, "")
        .map_err(ZoomError::from_js)?;
    log::debug!(
        "Attached image zoom ({} listeners, custom cursor: {})",
        zoom.listeners.len() + cursor.as_ref().map_or(0, |c| c.listeners.len()),
        cursor.is_some()
    );

    Ok(ZoomTarget {
        container: container.clone(),
        zoom,
        cursor,
    })
}

impl ZoomTarget {
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// The zoomed image, looked up on every call since the host page may
    /// replace the container's children.
    pub fn image(&self) -> Option<HtmlImageElement> {
        self.container
            .query_selector("img")
            .ok()
            .flatten()
            .and_then(|img| img.dyn_into::<HtmlImageElement>().ok())
    }

    /// The inserted custom cursor element, if any.
    pub fn cursor_element(&self) -> Option<HtmlElement> {
        cursor_element(&self.container)
    }

    pub fn has_custom_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn lock_state(&self) -> ZoomLock {
        self.zoom.tracker.borrow().lock_state()
    }

    pub fn is_active(&self) -> bool {
        self.zoom.tracker.borrow().is_active()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor
            .as_ref()
            .is_some_and(|c| c.follower.borrow().is_visible())
    }

    /// Remove the controller. The custom cursor element stays in place and is
    /// reused by a later [`attach`].
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for ZoomTarget {
    fn drop(&mut self) {
        let classes = self.container.class_list();
        if let Err(e) = classes.remove_2(class::ACTIVE_ZOOM, class::FOLLOW_CURSOR) {
            log::warn!("Failed to clear state classes on detach: {:?}", e);
        }
        if let Err(e) = self.container.remove_attribute(attribute::CONTAINER_ATTACHED) {
            log::warn!("Failed to clear {} on detach: {:?}", attribute::CONTAINER_ATTACHED, e);
        }
        log::debug!("Detached image zoom");
    }
}

/// Read the event as the given source; `None` if it is not one.
fn read_input(source: InputSource, kind: InputKind, event: &Event) -> Option<InputEvent> {
    match source {
        InputSource::Mouse => dom::mouse_input(kind, event),
        InputSource::Touch => dom::touch_input(kind, event),
    }
}

struct ZoomSubscription {
    tracker: Rc<RefCell<ZoomTracker>>,
    listeners: Vec<EventListener>,
}

impl ZoomSubscription {
    const BINDINGS: [(&'static str, InputSource, InputKind); 7] = [
        ("mousemove", InputSource::Mouse, InputKind::Move),
        ("mouseleave", InputSource::Mouse, InputKind::Leave),
        ("click", InputSource::Mouse, InputKind::Select),
        ("touchstart", InputSource::Touch, InputKind::Move),
        ("touchmove", InputSource::Touch, InputKind::Move),
        ("touchend", InputSource::Touch, InputKind::TouchEnd),
        ("touchcancel", InputSource::Touch, InputKind::TouchEnd),
    ];

    fn attach(window: &Window, container: &HtmlElement, throttle_moves: bool) -> Result<Self, ZoomError> {
        let tracker = Rc::new(RefCell::new(ZoomTracker::new()));
        let throttle = throttle_moves.then(|| {
            let container = container.clone();
            FrameThrottle::new(window.clone(), move |position| show_zoom(&container, position))
        });
        let output = Rc::new(ZoomOutput {
            container: container.clone(),
            throttle,
        });

        let target: &EventTarget = container;
        let mut listeners = Vec::with_capacity(Self::BINDINGS.len() + 1);
        for (event_type, source, kind) in Self::BINDINGS {
            let tracker = Rc::clone(&tracker);
            let output = Rc::clone(&output);
            listeners.push(EventListener::new(target, event_type, move |event: Event| {
                let Some(input) = read_input(source, kind, &event) else {
                    return;
                };
                let rect = dom::bounding_rect(&output.container);
                let update = tracker.borrow_mut().handle(&input, rect);
                output.apply(update, Some(&event));
            })?);
        }

        let resize_tracker = Rc::clone(&tracker);
        let resize_output = Rc::clone(&output);
        let window_target: &EventTarget = window;
        listeners.push(EventListener::new(window_target, "resize", move |_event: Event| {
            let rect = dom::bounding_rect(&resize_output.container);
            let update = resize_tracker.borrow_mut().resize(rect);
            resize_output.apply(update, None);
        })?);

        Ok(Self { tracker, listeners })
    }
}

struct ZoomOutput {
    container: HtmlElement,
    throttle: Option<FrameThrottle<Point>>,
}

impl ZoomOutput {
    fn apply(&self, update: ZoomUpdate, event: Option<&Event>) {
        match update {
            ZoomUpdate::Ignored => {}
            ZoomUpdate::Track(position) => {
                if let Some(event) = event {
                    event.prevent_default();
                    event.stop_propagation();
                }
                self.publish(position);
            }
            ZoomUpdate::Cancel => {
                if let Some(throttle) = &self.throttle {
                    throttle.cancel();
                }
                if let Err(e) = self.container.class_list().remove_1(class::ACTIVE_ZOOM) {
                    log::warn!("Failed to clear {}: {:?}", class::ACTIVE_ZOOM, e);
                }
            }
            ZoomUpdate::Toggled(lock) => log::debug!("Zoom lock is now {:?}", lock),
        }
    }

    fn publish(&self, position: Point) {
        let Some(throttle) = &self.throttle else {
            show_zoom(&self.container, position);
            return;
        };
        if let Err(e) = throttle.schedule(position) {
            log::debug!("No animation frame, writing directly: {}", e);
            show_zoom(&self.container, position);
        }
    }
}

fn show_zoom(container: &HtmlElement, position: Point) {
    let style = container.style();
    let result = style
        .set_property(property::X_POS, &px(position.x))
        .and_then(|_| style.set_property(property::Y_POS, &px(position.y)))
        .and_then(|_| container.class_list().add_1(class::ACTIVE_ZOOM));
    if let Err(e) = result {
        log::warn!("Failed to publish zoom position: {:?}", e);
    }
}

struct CursorSubscription {
    follower: Rc<RefCell<CursorFollower>>,
    listeners: Vec<EventListener>,
}

impl CursorSubscription {
    const BINDINGS: [(&'static str, InputKind); 3] = [
        ("mouseenter", InputKind::Enter),
        ("mousemove", InputKind::Move),
        ("mouseleave", InputKind::Leave),
    ];

    fn attach(
        window: &Window,
        container: &HtmlElement,
        markup: &str,
        throttle_moves: bool,
    ) -> Result<Self, ZoomError> {
        insert_cursor(container, markup)?;

        let follower = Rc::new(RefCell::new(CursorFollower::new()));
        let throttle = throttle_moves.then(|| {
            let container = container.clone();
            FrameThrottle::new(window.clone(), move |position| move_cursor(&container, position))
        });
        let output = Rc::new(CursorOutput {
            container: container.clone(),
            throttle,
        });

        let target: &EventTarget = container;
        let mut listeners = Vec::with_capacity(Self::BINDINGS.len());
        for (event_type, kind) in Self::BINDINGS {
            let follower = Rc::clone(&follower);
            let output = Rc::clone(&output);
            listeners.push(EventListener::new(target, event_type, move |event: Event| {
                let Some(input) = dom::mouse_input(kind, &event) else {
                    return;
                };
                let rect = dom::bounding_rect(&output.container);
                let update = follower.borrow_mut().handle(&input, rect);
                output.apply(update);
            })?);
        }

        Ok(Self {
            follower,
            listeners,
        })
    }
}

struct CursorOutput {
    container: HtmlElement,
    throttle: Option<FrameThrottle<Point>>,
}

impl CursorOutput {
    fn apply(&self, update: CursorUpdate) {
        let classes = self.container.class_list();
        let result = match update {
            CursorUpdate::Ignored => Ok(()),
            CursorUpdate::Show => classes.add_1(class::FOLLOW_CURSOR),
            CursorUpdate::Move(position) => {
                match &self.throttle {
                    Some(throttle) => {
                        if throttle.schedule(position).is_err() {
                            move_cursor(&self.container, position);
                        }
                    }
                    None => move_cursor(&self.container, position),
                }
                Ok(())
            }
            CursorUpdate::Hide => {
                if let Some(throttle) = &self.throttle {
                    throttle.cancel();
                }
                classes.remove_1(class::FOLLOW_CURSOR)
            }
        };
        if let Err(e) = result {
            log::warn!("Failed to update {}: {:?}", class::FOLLOW_CURSOR, e);
        }
    }
}

fn cursor_selector() -> String {
    format!(".{}, [{}]", class::CURSOR_ELEMENT, attribute::CURSOR_INSERTED)
}

fn cursor_element(container: &HtmlElement) -> Option<HtmlElement> {
    container
        .query_selector(&cursor_selector())
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Insert the cursor markup unless a cursor is already there.
fn insert_cursor(container: &HtmlElement, markup: &str) -> Result<(), ZoomError> {
    if cursor_element(container).is_some() {
        log::debug!("Custom cursor already present, not inserting another");
        return Ok(());
    }

    let previous_last = container.last_element_child();
    container
        .insert_adjacent_html("beforeend", markup)
        .map_err(ZoomError::from_js)?;

    // Markup without the cursor class: tag what was inserted so later
    // lookups find it.
    if container
        .query_selector(&format!(".{}", class::CURSOR_ELEMENT))
        .map_err(ZoomError::from_js)?
        .is_none()
    {
        let inserted = container.last_element_child().filter(|last| match &previous_last {
            Some(previous) => !js_sys::Object::is(last, previous),
            None => true,
        });
        match inserted {
            Some(element) => element
                .set_attribute(attribute::CURSOR_INSERTED, "")
                .map_err(ZoomError::from_js)?,
            None => log::warn!("Cursor markup produced no element"),
        }
    }
    Ok(())
}

fn move_cursor(container: &HtmlElement, position: Point) {
    let Some(cursor) = cursor_element(container) else {
        return;
    };
    if let Err(e) = cursor.style().set_property("transform", &translate3d(position)) {
        log::warn!("Failed to move custom cursor: {:?}", e);
    }
}
