//! Names shared with the companion stylesheet and the host page.
//!
//! These strings are a contract: the stylesheet selects on the classes and
//! reads the custom properties, and page builders opt in through the
//! style flags. Changing any of them breaks deployed sites.

/// Custom properties written on the container.
pub mod property {
    /// Horizontal pointer position, in pixels from the container's left edge.
    pub const X_POS: &str = "--x-pos";
    /// Vertical pointer position, in pixels from the container's top edge.
    pub const Y_POS: &str = "--y-pos";
}

/// Classes toggled by the controller.
pub mod class {
    /// Present while a pointer is tracked inside the container.
    pub const ACTIVE_ZOOM: &str = "active-zoom";
    /// Present while the custom cursor should be shown.
    pub const FOLLOW_CURSOR: &str = "follow-cursor";
    /// Marks an element as a zoom viewport.
    pub const ZOOM_CONTAINER: &str = "wm-zoom-container";
    /// Class carried by the element that follows the pointer.
    pub const CURSOR_ELEMENT: &str = "zoom-follow-cursor";
    /// Image parents with this class are gallery thumbnails and never zoom.
    pub const GALLERY_THUMBNAILS: &str = "sqs-gallery-thumbnails";
}

/// Style-declared configuration read through computed style.
pub mod style_flag {
    /// Per-block opt-in. Enabled when the value contains `true`.
    pub const ENABLED: &str = "--wm-image-zoom";
    /// Cursor spec: a preset name or a quoted, escaped HTML literal.
    pub const CURSOR: &str = "--cursor";
    /// Set on `body` by the site editor. Combined with running inside a
    /// frame, disables the plugin.
    pub const EDIT_MODE: &str = "--wm-img-zoom-edit-mode";
}

/// Idempotency markers.
pub mod attribute {
    /// Set on a block once its containers have been built.
    pub const BLOCK_PROCESSED: &str = "data-wm-image-zoom";
    /// Set on a container once a controller is attached.
    pub const CONTAINER_ATTACHED: &str = "data-wm-image-zoom-attached";
    /// Set on an inserted cursor element that lacks the cursor class.
    pub const CURSOR_INSERTED: &str = "data-wm-zoom-cursor";
}

/// Page-level names.
pub mod page {
    /// Global object holding optional settings.
    pub const SETTINGS_GLOBAL: &str = "wmImageZoomSettings";
    /// Global re-initialization function.
    pub const INIT_GLOBAL: &str = "wmImageZoomInit";
    /// Base id of the companion stylesheet; the `<link>` gets `{id}-css`.
    pub const STYLESHEET_ID: &str = "wm-image-zoom";
    /// Default companion stylesheet location.
    pub const STYLESHEET_URL: &str =
        "https://cdn.jsdelivr.net/gh/willmyethewebsiteguy/imageZoom@1.0.004/styles.min.css";
}

/// Blocks scanned by default.
pub const DEFAULT_BLOCK_SELECTORS: &[&str] = &[".sqs-block-image", ".sqs-block-product", ".gallery-block"];

/// Name of the built-in dot cursor.
pub const DOT_PRESET: &str = "dot";

/// Markup of the built-in dot cursor.
pub const DOT_PRESET_MARKUP: &str = r#"<div class="zoom-follow-cursor circle"></div>"#;

/// Event dispatched on `window` once the stylesheet is ready.
pub fn css_loaded_event(stylesheet_id: &str) -> String {
    format!("{stylesheet_id}:css-loaded")
}

/// Class added to `body` once the stylesheet is ready.
pub fn css_loaded_class(stylesheet_id: &str) -> String {
    format!("{stylesheet_id}-css-loaded")
}

/// Id given to the injected `<link>` element.
pub fn stylesheet_link_id(stylesheet_id: &str) -> String {
    format!("{stylesheet_id}-css")
}
