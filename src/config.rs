// Page configuration: element selectors and the tuning constants of the
// particle field. Everything has a default, a page may override any subset
// through a JSON block: <script id="site-config" type="application/json">

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub header_selector: String,
    pub mobile_toggle_selector: String,
    pub mobile_menu_selector: String,
    pub anchor_selector: String,
    pub reveal_selector: String,
    pub form_selector: String,
    pub hero_selector: String,
    pub canvas_id: String,
    pub field: FieldConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            header_selector: "header".to_owned(),
            mobile_toggle_selector: ".mobile-toggle".to_owned(),
            mobile_menu_selector: ".mobile-menu".to_owned(),
            anchor_selector: "a[href^=\"#\"]".to_owned(),
            reveal_selector: ".fade-up, .feature-card, .timeline-item".to_owned(),
            form_selector: "form".to_owned(),
            hero_selector: ".hero".to_owned(),
            canvas_id: "hero-canvas".to_owned(),
            field: FieldConfig::default(),
        }
    }
}

/// Tuning for the hero background.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub particle_count: usize,
    pub connection_distance: f64,
    pub connection_alpha: f64,
    pub connection_width: f64,
    pub pointer_radius: f64,
    pub repulsion: f64,
    pub glow_threshold: f64,
    pub glow_scale: f64,
    pub glow_alpha: f64,
    pub star_interval_ms: i32,
    pub star_probability: f64,
    pub star_duration_ms: i32,
    pub profile_frames: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: 80,
            connection_distance: 120.0,
            connection_alpha: 0.15,
            connection_width: 0.5,
            pointer_radius: 150.0,
            repulsion: 0.02,
            glow_threshold: 1.5,
            glow_scale: 3.0,
            glow_alpha: 0.1,
            star_interval_ms: 3000,
            star_probability: 0.3,
            star_duration_ms: 1000,
            profile_frames: false,
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<SiteConfig, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads the config block from the page. Falls back to the defaults when
    /// the block is missing or does not parse.
    pub fn load(document: &web_sys::Document) -> SiteConfig {
        let text = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
            .and_then(|script| script.text().ok());
        let text = match text {
            Some(text) => text,
            None => return SiteConfig::default(),
        };

        match SiteConfig::from_json(&text) {
            Ok(config) => {
                info!("site config loaded from #{}", CONFIG_ELEMENT_ID);
                config
            }
            Err(e) => {
                warn!("ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                SiteConfig::default()
            }
        }
    }
}
