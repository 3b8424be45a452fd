// Mock form submission. Nothing leaves the page: the submit button shows a
// sending state, then a success state while the form is cleared, then goes
// back to how it was.

use crate::dom::{self, EventListener};
use log::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlFormElement};

pub const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";
pub const SENDING_MS: u32 = 1500;
pub const SENT_MS: u32 = 3000;
pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_LABEL: &str = "✔ Message Sent!";
pub const SUCCESS_COLOR: &str = "#10b981";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Sending,
    Sent,
}

impl SubmitPhase {
    /// The phase that follows this one and how long this one lasts. A
    /// submission starts in `Sending` and ends when it reaches `Idle`.
    pub fn next(self) -> Option<(SubmitPhase, u32)> {
        match self {
            SubmitPhase::Sending => Some((SubmitPhase::Sent, SENDING_MS)),
            SubmitPhase::Sent => Some((SubmitPhase::Idle, SENT_MS)),
            SubmitPhase::Idle => None,
        }
    }
}

/// Phase of a submission `elapsed_ms` after the submit event.
pub fn phase_at(elapsed_ms: u32) -> SubmitPhase {
    let (mut phase, mut started) = (SubmitPhase::Sending, 0u32);
    while let Some((next, lasts)) = phase.next() {
        if elapsed_ms < started + lasts {
            break;
        }
        phase = next;
        started += lasts;
    }
    phase
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonView<'a> {
    pub label: &'a str,
    pub disabled: bool,
    pub opacity: &'static str,
    // None restores the stylesheet colors
    pub color: Option<&'static str>,
}

impl SubmitPhase {
    pub fn view(self, original_label: &str) -> ButtonView<'_> {
        match self {
            SubmitPhase::Idle => ButtonView {
                label: original_label,
                disabled: false,
                opacity: "1",
                color: None,
            },
            SubmitPhase::Sending => ButtonView {
                label: SENDING_LABEL,
                disabled: true,
                opacity: "0.7",
                color: None,
            },
            SubmitPhase::Sent => ButtonView {
                label: SENT_LABEL,
                disabled: true,
                opacity: "0.7",
                color: Some(SUCCESS_COLOR),
            },
        }
    }
}

impl<'a> ButtonView<'a> {
    pub fn apply(&self, button: &HtmlButtonElement) -> Result<(), JsValue> {
        button.set_inner_html(self.label);
        button.set_disabled(self.disabled);
        let style = button.style();
        style.set_property("opacity", self.opacity)?;
        match self.color {
            Some(color) => {
                style.set_property("background-color", color)?;
                style.set_property("border-color", color)?;
            }
            None => {
                style.remove_property("background-color")?;
                style.remove_property("border-color")?;
            }
        }
        Ok(())
    }
}

fn show(phase: SubmitPhase, button: &HtmlButtonElement, original_label: &str) {
    if let Err(e) = phase.view(original_label).apply(button) {
        warn!("failed to update submit button: {:?}", e);
    }
}

// Shows `phase` and schedules the one after it. Entering `Sent` clears the form.
fn enter(
    phase: SubmitPhase,
    form: HtmlFormElement,
    button: HtmlButtonElement,
    original_label: String,
) {
    show(phase, &button, &original_label);
    if phase == SubmitPhase::Sent {
        form.reset();
    }
    if let Some((next, lasts)) = phase.next() {
        let scheduled = dom::set_timeout(lasts as i32, move || {
            enter(next, form, button, original_label);
        });
        if let Err(e) = scheduled {
            warn!("failed to schedule submit button update: {:?}", e);
        }
    }
}

fn run_submission(form: HtmlFormElement, button: HtmlButtonElement) {
    let original_label = button.inner_html();
    enter(SubmitPhase::Sending, form, button, original_label);
}

pub fn install(document: &Document, selector: &str) -> Result<Vec<EventListener>, JsValue> {
    let forms: Vec<HtmlFormElement> = dom::query_all(document, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlFormElement>().ok())
        .collect();
    if forms.is_empty() {
        debug!("no forms, mock submission disabled");
        return Ok(Vec::new());
    }

    let mut listeners = Vec::with_capacity(forms.len());
    for form in forms {
        let target = form.clone();
        listeners.push(EventListener::new(&form, "submit", move |event| {
            event.prevent_default();
            let button = target
                .query_selector(SUBMIT_SELECTOR)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
            let button = match button {
                Some(button) => button,
                None => return,
            };
            // a submission is already in flight
            if button.disabled() {
                return;
            }
            run_submission(target.clone(), button);
        })?);
    }
    info!("mock submission installed on {} forms", listeners.len());
    Ok(listeners)
}
