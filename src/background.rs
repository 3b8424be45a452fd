//! Browser side of the hero background: canvas sizing, pointer tracking, the
//! animation-frame loop and the shooting-star ticker.
//!
//! A page without the canvas gets an inert `HeroBackground`; `start` and
//! `stop` are then no-ops.

use crate::config::{FieldConfig, SiteConfig};
use crate::dom::{self, AnimationLoop, EventListener, Interval};
use crate::field::{FrameContext, ParticleField, Pointer};
use crate::shooting_star::{self, StarShape};
use crate::utils::Timer;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, MouseEvent, Window};

struct Scene {
    field: ParticleField,
    ctx: FrameContext,
}

struct Surface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    hero: Option<Element>,
    scene: Rc<RefCell<Scene>>,
}

// Handles owned while the background runs; dropping them stops everything.
struct Running {
    _frames: AnimationLoop,
    _stars: Interval,
    _resize: EventListener,
    _pointer: EventListener,
}

#[wasm_bindgen]
pub struct HeroBackground {
    surface: Option<Surface>,
    running: Option<Running>,
}

fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

fn size_canvas(canvas: &HtmlCanvasElement, (width, height): (f64, f64)) {
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
}

#[wasm_bindgen]
impl HeroBackground {
    /// Looks up `#canvas_id` with the default tuning.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> HeroBackground {
        let config = SiteConfig {
            canvas_id: canvas_id.to_owned(),
            ..SiteConfig::default()
        };
        match dom::document() {
            Some(document) => HeroBackground::attach(&document, &config),
            None => HeroBackground::inert(),
        }
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.running.is_some() {
            return Ok(());
        }
        let surface = match self.surface {
            Some(ref surface) => surface,
            None => return Ok(()),
        };
        let window = dom::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let config = surface.scene.borrow().field.config().clone();

        let (canvas, scene) = (surface.canvas.clone(), surface.scene.clone());
        let resize = EventListener::new(&window, "resize", move |_| {
            if let Some(window) = dom::window() {
                let size = viewport_size(&window);
                size_canvas(&canvas, size);
                scene.borrow_mut().field.resize(size.0, size.1);
            }
        })?;

        let (canvas, scene) = (surface.canvas.clone(), surface.scene.clone());
        let pointer = EventListener::new(&window, "mousemove", move |event| {
            if let Ok(event) = event.dyn_into::<MouseEvent>() {
                let rect = canvas.get_bounding_client_rect();
                scene.borrow_mut().ctx.pointer = Pointer {
                    x: event.client_x() as f64 - rect.left(),
                    y: event.client_y() as f64 - rect.top(),
                };
            }
        })?;

        let (mut context, scene) = (surface.context.clone(), surface.scene.clone());
        let profile = config.profile_frames;
        let frames = AnimationLoop::start(move || {
            let _timer = if profile {
                Some(Timer::new("HeroBackground::frame"))
            } else {
                None
            };
            let mut guard = scene.borrow_mut();
            let scene = &mut *guard;
            scene.field.frame(&scene.ctx, &mut context);
        })?;

        let stars = HeroBackground::star_ticker(surface.hero.clone(), &config)?;

        self.running = Some(Running {
            _frames: frames,
            _stars: stars,
            _resize: resize,
            _pointer: pointer,
        });
        info!("hero background started");
        Ok(())
    }

    /// Cancels the pending frame, the star ticker and the listeners.
    pub fn stop(&mut self) {
        if self.running.take().is_some() {
            info!("hero background stopped");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        self.surface.is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.running.is_some()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.surface
            .as_ref()
            .map(|s| s.scene.borrow().field.particles().len())
            .unwrap_or(0)
    }

    /// Current particle positions as flat `[x0, y0, x1, y1, ...]`.
    #[wasm_bindgen(js_name = particlePositions)]
    pub fn particle_positions(&self) -> Vec<f64> {
        self.surface
            .as_ref()
            .map(|s| {
                s.scene
                    .borrow()
                    .field
                    .particles()
                    .iter()
                    .flat_map(|p| p.pos.iter().copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Overrides the pointer position, in canvas coordinates.
    #[wasm_bindgen(js_name = setPointer)]
    pub fn set_pointer(&self, x: f64, y: f64) {
        if let Some(ref surface) = self.surface {
            surface.scene.borrow_mut().ctx.pointer = Pointer { x, y };
        }
    }
}

impl HeroBackground {
    pub fn inert() -> HeroBackground {
        HeroBackground {
            surface: None,
            running: None,
        }
    }

    pub fn attach(document: &Document, config: &SiteConfig) -> HeroBackground {
        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        let canvas = match canvas {
            Some(canvas) => canvas,
            None => {
                debug!("no canvas #{}, hero background disabled", config.canvas_id);
                return HeroBackground::inert();
            }
        };
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        let context = match context {
            Some(context) => context,
            None => {
                warn!("canvas #{} has no 2d context", config.canvas_id);
                return HeroBackground::inert();
            }
        };

        let size = dom::window()
            .map(|window| viewport_size(&window))
            .unwrap_or((canvas.width() as f64, canvas.height() as f64));
        size_canvas(&canvas, size);

        let hero = dom::query(document, &config.hero_selector);
        if hero.is_none() {
            debug!("no {} element, shooting stars disabled", config.hero_selector);
        }

        let field = ParticleField::new(&mut rand::thread_rng(), size.0, size.1, config.field.clone());
        info!(
            "hero background attached: {} particles on {}x{}",
            field.particles().len(),
            size.0,
            size.1
        );

        HeroBackground {
            surface: Some(Surface {
                canvas,
                context,
                hero,
                scene: Rc::new(RefCell::new(Scene {
                    field,
                    ctx: FrameContext::default(),
                })),
            }),
            running: None,
        }
    }

    fn star_ticker(hero: Option<Element>, config: &FieldConfig) -> Result<Interval, JsValue> {
        let (probability, duration) = (config.star_probability, config.star_duration_ms);
        Interval::start(config.star_interval_ms, move || {
            let hero = match hero {
                Some(ref hero) => hero,
                None => return,
            };
            let mut rng = rand::thread_rng();
            if !shooting_star::should_spawn(&mut rng, probability) {
                return;
            }
            if let Some(document) = dom::document() {
                if let Err(e) = shooting_star::spawn(&document, hero, StarShape::random(&mut rng), duration) {
                    warn!("failed to spawn shooting star: {:?}", e);
                }
            }
        })
    }
}
