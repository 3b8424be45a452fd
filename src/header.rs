// Sticky header: gains the `scrolled` class once the page has moved past the
// threshold and loses it again when scrolled back.

use crate::dom::{self, EventListener};
use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

pub const SCROLLED_CLASS: &str = "scrolled";
pub const SCROLL_THRESHOLD: f64 = 50.0;

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLL_THRESHOLD
}

pub fn apply(header: &Element, scroll_y: f64) -> Result<(), JsValue> {
    header
        .class_list()
        .toggle_with_force(SCROLLED_CLASS, is_scrolled(scroll_y))
        .map(|_| ())
}

pub fn install(document: &Document, selector: &str) -> Result<Option<EventListener>, JsValue> {
    let header = match dom::query(document, selector) {
        Some(header) => header,
        None => {
            debug!("no {} element, sticky header disabled", selector);
            return Ok(None);
        }
    };
    let window = match dom::window() {
        Some(window) => window,
        None => return Ok(None),
    };

    let listener = EventListener::new(&window, "scroll", move |_| {
        if let Some(scroll_y) = dom::window().and_then(|w| w.scroll_y().ok()) {
            if let Err(e) = apply(&header, scroll_y) {
                warn!("failed to update header state: {:?}", e);
            }
        }
    })?;
    info!("sticky header installed");
    Ok(Some(listener))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_around_threshold() {
        let states: Vec<bool> = [0.0, 51.0, 49.0].iter().map(|y| is_scrolled(*y)).collect();
        assert_eq!(states, vec![false, true, false]);
    }

    #[test]
    fn threshold_itself_is_not_scrolled() {
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.5));
    }
}
