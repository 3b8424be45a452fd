mod utils;

pub mod anchor;
pub mod background;
pub mod color;
pub mod config;
pub mod dom;
pub mod field;
pub mod form;
pub mod header;
pub mod menu;
pub mod particle;
pub mod renderer;
pub mod reveal;
pub mod shooting_star;

use background::HeroBackground;
use config::SiteConfig;
use dom::EventListener;
use log::{info, Level};
use reveal::RevealObserver;
use wasm_bindgen::prelude::*;
use web_sys::Document;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    // a second call finds the logger already set
    let _ = console_log::init_with_level(Level::Debug);
}

/// Wires every page behavior using the config block on the page, if any.
#[wasm_bindgen]
pub fn boot() -> Result<Site, JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    let config = SiteConfig::load(&document);
    Site::install(&document, &config)
}

#[wasm_bindgen(js_name = bootWithConfig)]
pub fn boot_with_config(json: &str) -> Result<Site, JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    let config = SiteConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Site::install(&document, &config)
}

/// Everything `boot` set up. Features whose elements are missing hold nothing.
#[wasm_bindgen]
pub struct Site {
    background: HeroBackground,
    listeners: Vec<EventListener>,
    reveal: Option<RevealObserver>,
}

impl Site {
    pub fn install(document: &Document, config: &SiteConfig) -> Result<Site, JsValue> {
        let mut listeners = Vec::new();
        listeners.extend(header::install(document, &config.header_selector)?);
        listeners.extend(menu::install(
            document,
            &config.mobile_toggle_selector,
            &config.mobile_menu_selector,
        )?);
        listeners.extend(anchor::install(
            document,
            &config.anchor_selector,
            &config.header_selector,
        )?);
        listeners.extend(form::install(document, &config.form_selector)?);
        let reveal = reveal::install(document, &config.reveal_selector)?;

        let mut background = HeroBackground::attach(document, config);
        background.start()?;

        info!("site booted with {} listeners", listeners.len());
        Ok(Site {
            background,
            listeners,
            reveal,
        })
    }
}

#[wasm_bindgen]
impl Site {
    /// Stops the background and removes every listener and observer.
    pub fn teardown(&mut self) {
        self.background.stop();
        self.listeners.clear();
        self.reveal = None;
        info!("site torn down");
    }

    #[wasm_bindgen(getter = backgroundRunning)]
    pub fn background_running(&self) -> bool {
        self.background.running()
    }
}
