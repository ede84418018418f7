//! imgzoom - hover and touch zoom for page-builder image blocks
//!
//! Finds opted-in image blocks, attaches one interaction controller per
//! image container, and publishes `--x-pos`/`--y-pos` plus state classes for
//! the companion stylesheet to render a magnified, panned view.
//!
//! The state machines live in [`zoom_core`]; this crate is the browser glue.

pub mod config;
pub mod error;

pub use config::{ConfigError, LogLevel, ZoomConfig};
pub use error::ZoomError;
pub use zoom_core;

#[cfg(target_arch = "wasm32")]
pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod controller;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod listener;
#[cfg(target_arch = "wasm32")]
pub mod scanner;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
