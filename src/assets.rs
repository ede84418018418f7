//! Companion stylesheet loading.

use std::cell::Cell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlLinkElement, Window};
use zoom_core::constants::{css_loaded_class, css_loaded_event, stylesheet_link_id};

use crate::error::ZoomError;

/// Makes sure the stylesheet that renders the zoom is on the page.
///
/// Controllers do not wait for it; the custom properties simply take effect
/// once the rules arrive.
pub trait AssetLoader {
    fn ensure_stylesheet(&self, window: &Window, document: &Document) -> Result<(), ZoomError>;
}

/// Prepends a `<link rel="stylesheet">` to `<head>`, once per page.
///
/// When loaded, dispatches `{id}:css-loaded` on `window` and adds
/// `{id}-css-loaded` to `body`. A link already on the page (same id) is
/// moved to the front of `<head>` and treated as loaded.
#[derive(Debug)]
pub struct LinkAssetLoader {
    url: String,
    id: String,
    requested: Cell<bool>,
}

impl LinkAssetLoader {
    pub fn new(url: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            id: id.into(),
            requested: Cell::new(false),
        }
    }
}

impl AssetLoader for LinkAssetLoader {
    fn ensure_stylesheet(&self, window: &Window, document: &Document) -> Result<(), ZoomError> {
        if self.requested.get() {
            return Ok(());
        }
        let head = document
            .head()
            .ok_or_else(|| ZoomError::Dom("document has no head".to_string()))?;
        let link_id = stylesheet_link_id(&self.id);

        if let Some(existing) = document.get_element_by_id(&link_id) {
            head.prepend_with_node_1(&existing).map_err(ZoomError::from_js)?;
            self.requested.set(true);
            log::debug!("Stylesheet {} already present", link_id);
            mark_loaded(window, document, &self.id);
            return Ok(());
        }

        let link: HtmlLinkElement = document
            .create_element("link")
            .map_err(ZoomError::from_js)?
            .dyn_into()
            .map_err(|_| ZoomError::Dom("created element is not a link".to_string()))?;
        link.set_rel("stylesheet");
        link.set_type("text/css");
        link.set_href(&self.url);
        link.set_id(&link_id);

        let window_for_cb = window.clone();
        let document_for_cb = document.clone();
        let id = self.id.clone();
        let onload = Closure::wrap(Box::new(move |_event: Event| {
            mark_loaded(&window_for_cb, &document_for_cb, &id);
        }) as Box<dyn FnMut(Event)>);
        link.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget(); // Lives as long as the link

        head.prepend_with_node_1(&link).map_err(ZoomError::from_js)?;
        self.requested.set(true);
        log::info!("Loading stylesheet {}", self.url);
        Ok(())
    }
}

fn mark_loaded(window: &Window, document: &Document, id: &str) {
    match Event::new(&css_loaded_event(id)) {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(e) => log::warn!("Failed to create stylesheet event: {:?}", e),
    }
    if let Some(body) = document.body() {
        let _ = body.class_list().add_1(&css_loaded_class(id));
    }
}
