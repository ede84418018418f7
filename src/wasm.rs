use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};
use zoom_core::constants::page;

use crate::assets::{AssetLoader, LinkAssetLoader};
use crate::config::ZoomConfig;
use crate::controller::{self, ControllerOptions, ZoomTarget};
use crate::dom;
use crate::error::ZoomError;
use crate::listener::EventListener;
use crate::scanner::{BlockScanner, SelectorScanner};

/// Page-wide state: collaborators plus every live controller.
struct Runtime {
    options: ControllerOptions,
    scanner: Box<dyn BlockScanner>,
    assets: Box<dyn AssetLoader>,
    targets: Vec<ZoomTarget>,
    _page_listeners: Vec<EventListener>,
    _init_global: Option<Closure<dyn FnMut()>>,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = ZoomConfig::load_from_window();
    if let Err(e) = console_log::init_with_level(config.log_level.to_level()) {
        web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
    }

    if let Err(e) = install(config) {
        log::error!("Image zoom failed to start: {}", e);
    }
}

/// Re-run discovery, e.g. after content was injected. Processed blocks and
/// attached containers are skipped. Returns the number of new controllers.
#[wasm_bindgen(js_name = wmImageZoomInit)]
pub fn reinitialize() -> usize {
    RUNTIME.with(|runtime| {
        let Ok(mut runtime) = runtime.try_borrow_mut() else {
            log::warn!("{} called while a scan is running, skipping", page::INIT_GLOBAL);
            return 0;
        };
        match runtime.as_mut() {
            Some(runtime) => runtime.initialize().unwrap_or_else(|e| {
                log::error!("Image zoom scan failed: {}", e);
                0
            }),
            None => {
                log::warn!("{} called before start", page::INIT_GLOBAL);
                0
            }
        }
    })
}

fn install(config: ZoomConfig) -> Result<(), ZoomError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;

    let window_target: &EventTarget = &window;
    let document_target: &EventTarget = &document;
    let page_listeners = vec![
        EventListener::new(window_target, "load", |_event: Event| {
            reinitialize();
        })?,
        EventListener::new(document_target, "DOMContentLoaded", |_event: Event| {
            reinitialize();
        })?,
    ];

    let init_global = Closure::wrap(Box::new(|| {
        reinitialize();
    }) as Box<dyn FnMut()>);
    let exposed = js_sys::Reflect::set(
        &window,
        &page::INIT_GLOBAL.into(),
        init_global.as_ref(),
    );
    if let Err(e) = exposed {
        log::warn!("Could not expose {}: {:?}", page::INIT_GLOBAL, e);
    }

    let runtime = Runtime {
        options: ControllerOptions::from(&config),
        scanner: Box::new(SelectorScanner::new(config.unprocessed_blocks_selector())),
        assets: Box::new(LinkAssetLoader::new(
            config.stylesheet_url.clone(),
            config.stylesheet_id.clone(),
        )),
        targets: Vec::new(),
        _page_listeners: page_listeners,
        _init_global: Some(init_global),
    };
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime));

    let attached = reinitialize();
    log::info!("Image zoom started, {} container(s) attached", attached);
    Ok(())
}

impl Runtime {
    fn initialize(&mut self) -> Result<usize, ZoomError> {
        let window = dom::window()?;
        let document = dom::document(&window)?;

        if dom::plugin_disabled(&window, &document) {
            log::info!("Editor preview detected, image zoom disabled");
            return Ok(0);
        }

        let containers = self.scanner.discover(&window, &document)?;
        let mut attached = 0;
        for container in containers {
            match controller::attach(&container, &self.options) {
                Ok(target) => {
                    self.targets.push(target);
                    attached += 1;
                }
                Err(ZoomError::AlreadyAttached) => log::debug!("Container already attached, skipping"),
                Err(e) => log::error!("Problem attaching image zoom: {}", e),
            }
        }

        if attached > 0 {
            if let Err(e) = self.assets.ensure_stylesheet(&window, &document) {
                log::error!("Problem loading image zoom stylesheet: {}", e);
            }
            log::debug!("{} controller(s) live", self.targets.len());
        }
        Ok(attached)
    }
}
