// Mobile navigation. The toggle control opens and closes the menu and mirrors
// the state into `aria-expanded`; following any link inside the menu closes it.

use crate::dom::{self, EventListener};
use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

pub const OPEN_CLASS: &str = "active";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    pub fn read(menu: &Element) -> MenuState {
        MenuState {
            open: menu.class_list().contains(OPEN_CLASS),
        }
    }

    pub fn toggled(self) -> MenuState {
        MenuState { open: !self.open }
    }

    pub fn closed() -> MenuState {
        MenuState { open: false }
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    pub fn apply(&self, toggle: &Element, menu: &Element) -> Result<(), JsValue> {
        menu.class_list().toggle_with_force(OPEN_CLASS, self.open)?;
        toggle.set_attribute("aria-expanded", self.aria_expanded())
    }
}

pub fn install(
    document: &Document,
    toggle_selector: &str,
    menu_selector: &str,
) -> Result<Vec<EventListener>, JsValue> {
    let (toggle, menu) = match (
        dom::query(document, toggle_selector),
        dom::query(document, menu_selector),
    ) {
        (Some(toggle), Some(menu)) => (toggle, menu),
        _ => {
            debug!("no {} / {} pair, mobile menu disabled", toggle_selector, menu_selector);
            return Ok(Vec::new());
        }
    };

    let mut listeners = Vec::new();
    let (t, m) = (toggle.clone(), menu.clone());
    listeners.push(EventListener::new(&toggle, "click", move |_| {
        if let Err(e) = MenuState::read(&m).toggled().apply(&t, &m) {
            warn!("failed to toggle mobile menu: {:?}", e);
        }
    })?);

    for link in dom::query_all_in(&menu, "a") {
        let (t, m) = (toggle.clone(), menu.clone());
        listeners.push(EventListener::new(&link, "click", move |_| {
            if let Err(e) = MenuState::closed().apply(&t, &m) {
                warn!("failed to close mobile menu: {:?}", e);
            }
        })?);
    }

    info!("mobile menu installed ({} links)", listeners.len() - 1);
    Ok(listeners)
}
