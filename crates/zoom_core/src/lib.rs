//! zoom_core - platform-independent state for hover/touch image zoom
//!
//! Everything here is plain data and state machines. The browser glue in the
//! `imgzoom` crate converts DOM events into [`InputEvent`]s, feeds them to a
//! [`ZoomTracker`] and a [`CursorFollower`], and applies the returned updates.

pub mod coalesce;
pub mod constants;
pub mod cursor;
pub mod geometry;
pub mod input;
pub mod lock;
pub mod tracker;

pub use coalesce::Coalescer;
pub use cursor::{CursorFollower, CursorPresets, CursorSpec, CursorUpdate};
pub use geometry::{Point, Rect};
pub use input::{InputEvent, InputKind, InputSource};
pub use lock::ZoomLock;
pub use tracker::{ZoomTracker, ZoomUpdate};
