// Same-page links scroll smoothly to their target, stopping short of it by the
// header height plus a small gap so the sticky header never covers it.

use crate::dom::{self, EventListener};
use log::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

pub const HEADER_GAP: f64 = 20.0;

/// Selector of the element an href points at. Only in-page hrefs other than
/// the bare `#` have one.
pub fn anchor_target(href: &str) -> Option<&str> {
    if href.starts_with('#') && href != "#" {
        Some(href)
    } else {
        None
    }
}

/// Document offset to scroll to. `target_top` is relative to the viewport.
pub fn scroll_offset(target_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    target_top + scroll_y - header_height - HEADER_GAP
}

fn header_height(document: &Document, header_selector: &str) -> f64 {
    dom::query(document, header_selector)
        .and_then(|header| header.dyn_into::<HtmlElement>().ok())
        .map(|header| header.offset_height() as f64)
        .unwrap_or(0.0)
}

#[allow(deprecated)]
fn scroll_to(target: &Element, header_selector: &str) {
    let (window, document) = match (dom::window(), dom::document()) {
        (Some(window), Some(document)) => (window, document),
        _ => return,
    };
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let top = scroll_offset(
        target.get_bounding_client_rect().top(),
        scroll_y,
        header_height(&document, header_selector),
    );

    let mut options = ScrollToOptions::new();
    options.top(top);
    options.behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn install(
    document: &Document,
    anchor_selector: &str,
    header_selector: &str,
) -> Result<Vec<EventListener>, JsValue> {
    let anchors = dom::query_all(document, anchor_selector);
    if anchors.is_empty() {
        debug!("no in-page anchors, smooth scroll disabled");
        return Ok(Vec::new());
    }

    let mut listeners = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        let link = anchor.clone();
        let header_selector = header_selector.to_owned();
        listeners.push(EventListener::new(&anchor, "click", move |event| {
            // every in-page link is handled here, including the bare `#`
            event.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let selector = match anchor_target(&href) {
                Some(selector) => selector,
                None => return,
            };
            if let Some(target) = dom::document().and_then(|d| dom::query(&d, selector)) {
                scroll_to(&target, &header_selector);
            }
        })?);
    }
    info!("smooth scroll installed on {} anchors", listeners.len());
    Ok(listeners)
}
