//! Error types for attaching controllers and building blocks.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while wiring zoom onto the page.
///
/// None of these are fatal to the host page; callers log them and move on.
#[derive(Error, Debug)]
pub enum ZoomError {
    /// No global `window` (not running in a browser)
    #[error("No global window exists")]
    NoWindow,

    /// Window without a document
    #[error("No document in window")]
    NoDocument,

    /// A controller already owns this container
    #[error("Container already has a zoom controller")]
    AlreadyAttached,

    /// The container holds no `<img>`
    #[error("Container has no image")]
    NoImage,

    /// A DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),

    /// Page settings could not be used
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ZoomError {
    /// Wrap an exception thrown by a DOM call.
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&value)
                    .ok()
                    .and_then(|s| s.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Dom(message)
    }
}
