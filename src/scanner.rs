//! Block discovery: finds opted-in image containers on the page.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};
use zoom_core::constants::{attribute, class, style_flag};

use crate::dom;
use crate::error::ZoomError;

/// Finds containers that should get a controller.
///
/// Implementations tag what they process so repeated scans skip it, and
/// must not let one broken block stop the rest.
pub trait BlockScanner {
    fn discover(&self, window: &Window, document: &Document) -> Result<Vec<HtmlElement>, ZoomError>;
}

/// Scans page-builder image blocks matched by CSS selectors.
///
/// A block opts in when its computed `--wm-image-zoom` contains `true`. Every
/// image in it (gallery thumbnails excepted) has its parent marked as a zoom
/// container.
#[derive(Debug, Clone)]
pub struct SelectorScanner {
    selector: String,
}

impl SelectorScanner {
    /// `selector` should already exclude processed blocks; see
    /// [`crate::config::ZoomConfig::unprocessed_blocks_selector`].
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

impl BlockScanner for SelectorScanner {
    fn discover(&self, window: &Window, document: &Document) -> Result<Vec<HtmlElement>, ZoomError> {
        let blocks = document
            .query_selector_all(&self.selector)
            .map_err(ZoomError::from_js)?;

        let mut containers = Vec::new();
        for i in 0..blocks.length() {
            let Some(block) = blocks.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            if !is_enabled(window, &block) {
                continue;
            }
            match build_block(&block) {
                Ok(found) => {
                    log::debug!("Built {} zoom container(s) from block", found.len());
                    containers.extend(found);
                }
                Err(e) => log::error!("Problem building image zoom from block: {}", e),
            }
        }
        Ok(containers)
    }
}

fn is_enabled(window: &Window, block: &Element) -> bool {
    dom::computed_property(window, block, style_flag::ENABLED).contains("true")
}

fn image_selector() -> String {
    format!(":not(.{}) > img", class::GALLERY_THUMBNAILS)
}

/// Mark each image's parent as a container and the block as processed.
fn build_block(block: &Element) -> Result<Vec<HtmlElement>, ZoomError> {
    let images = block
        .query_selector_all(&image_selector())
        .map_err(ZoomError::from_js)?;

    let mut containers: Vec<HtmlElement> = Vec::new();
    for i in 0..images.length() {
        let Some(parent) = images.item(i).and_then(|img| img.parent_element()) else {
            continue;
        };
        let parent = parent
            .dyn_into::<HtmlElement>()
            .map_err(|_| ZoomError::Dom("image parent is not an HTML element".to_string()))?;
        if containers.iter().any(|c| js_sys::Object::is(c, &parent)) {
            continue;
        }
        parent
            .class_list()
            .add_1(class::ZOOM_CONTAINER)
            .map_err(ZoomError::from_js)?;
        containers.push(parent);
    }

    block
        .set_attribute(attribute::BLOCK_PROCESSED, "")
        .map_err(ZoomError::from_js)?;
    Ok(containers)
}
