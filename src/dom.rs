// Small owners for browser callbacks. Each one keeps its closure alive for as
// long as the callback is registered and unregisters it when dropped, so a
// feature is torn down simply by dropping its handles.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, NodeList, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

fn no_window() -> JsValue {
    JsValue::from_str("no global window")
}

/// First element matching `selector`, `None` when nothing matches or the
/// selector is invalid.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(EventListener {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

// Calls `on_frame` once per display refresh until stopped. Each frame
// schedules its successor after the work is done.
pub struct AnimationLoop {
    frame_id: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl AnimationLoop {
    pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let window = window().ok_or_else(no_window)?;
        let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let (frame_id_inner, callback_inner) = (frame_id.clone(), callback.clone());
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_id_inner.set(None);
            on_frame();
            if let (Some(cb), Some(window)) = (callback_inner.borrow().as_ref(), web_sys::window()) {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    frame_id_inner.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(ref cb) = *callback.borrow() {
            frame_id.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
        }

        Ok(AnimationLoop { frame_id, callback })
    }

    pub fn stop(&mut self) {
        if let (Some(id), Some(window)) = (self.frame_id.take(), window()) {
            let _ = window.cancel_animation_frame(id);
        }
        // Dropping the closure also breaks its reference back to this cell.
        self.callback.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start<F>(millis: i32, tick: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let window = window().ok_or_else(no_window)?;
        let callback = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        )?;
        Ok(Interval {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

/// One-shot timer that cleans itself up after running.
pub fn set_timeout<F>(millis: i32, f: F) -> Result<i32, JsValue>
where
    F: FnOnce() + 'static,
{
    let window = window().ok_or_else(no_window)?;
    let callback = Closure::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
}
