//! Scroll reveal.
//!
//! Marked elements start transparent and shifted down, and settle into place
//! the first time enough of them enters the viewport. Revealing is one way: a
//! revealed element is unobserved and tagged with `data-revealed`, so leaving
//! and re-entering the viewport does nothing.

use crate::dom;
use js_sys::Array;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

pub const THRESHOLD: f64 = 0.1;
pub const ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEALED_ATTR: &str = "data-revealed";

pub const HIDDEN_STYLES: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(20px)"),
    ("transition", "opacity 0.6s ease-out, transform 0.6s ease-out"),
];
pub const REVEALED_STYLES: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

impl RevealState {
    pub fn read(element: &Element) -> RevealState {
        if element.has_attribute(REVEALED_ATTR) {
            RevealState::Revealed
        } else {
            RevealState::Hidden
        }
    }

    pub fn observe(self, intersecting: bool) -> RevealState {
        match self {
            RevealState::Hidden if intersecting => RevealState::Revealed,
            state => state,
        }
    }
}

fn set_styles(element: &Element, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let style = element.style();
        for (name, value) in styles {
            style.set_property(name, value)?;
        }
    }
    Ok(())
}

fn reveal(element: &Element) -> Result<(), JsValue> {
    set_styles(element, &REVEALED_STYLES)?;
    element.set_attribute(REVEALED_ATTR, "")
}

/// Owns the observer; disconnects it when dropped.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[allow(deprecated)]
fn observer_options() -> IntersectionObserverInit {
    let mut init = IntersectionObserverInit::new();
    init.root_margin(ROOT_MARGIN);
    init.threshold(&JsValue::from_f64(THRESHOLD));
    init
}

pub fn install(document: &Document, selector: &str) -> Result<Option<RevealObserver>, JsValue> {
    let elements = dom::query_all(document, selector);
    if elements.is_empty() {
        debug!("nothing matches {}, scroll reveal disabled", selector);
        return Ok(None);
    }

    let callback = Closure::wrap(Box::new(|entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry = match entry.dyn_into::<IntersectionObserverEntry>() {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            let target = entry.target();
            let before = RevealState::read(&target);
            if before.observe(entry.is_intersecting()) != before {
                let _ = reveal(&target);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let observer = IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &observer_options(),
    )?;
    for element in &elements {
        if RevealState::read(element) == RevealState::Hidden {
            set_styles(element, &HIDDEN_STYLES)?;
            observer.observe(element);
        }
    }
    info!("scroll reveal watching {} elements", elements.len());

    Ok(Some(RevealObserver {
        observer,
        _callback: callback,
    }))
}
