// Decorative streaks that cross the hero section now and then. They share no
// state with the particle field; each star is spawned, animated by a CSS
// transition and removed after its duration.

use crate::dom;
use log::debug;
use rand::Rng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

pub const CLASS_NAME: &str = "shooting-star";

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StarShape {
    // percent of the hero height
    pub top: f64,
    pub angle_deg: f64,
    pub length_px: f64,
}

impl StarShape {
    pub fn random<R: Rng>(rng: &mut R) -> StarShape {
        StarShape {
            top: rng.gen_range(0.0, 50.0),
            angle_deg: rng.gen_range(-25.0, -10.0),
            length_px: rng.gen_range(60.0, 120.0),
        }
    }

    /// Styles the star is inserted with: off-screen left and invisible.
    pub fn initial_styles(&self, duration_ms: i32) -> Vec<(&'static str, String)> {
        vec![
            ("position", "absolute".to_owned()),
            ("top", format!("{}%", self.top)),
            ("left", "-10%".to_owned()),
            ("width", format!("{}px", self.length_px)),
            ("height", "2px".to_owned()),
            (
                "background",
                "linear-gradient(90deg, rgba(255, 255, 255, 0), rgba(255, 255, 255, 0.8))"
                    .to_owned(),
            ),
            ("transform", format!("rotate({}deg)", self.angle_deg)),
            ("opacity", "0".to_owned()),
            ("pointer-events", "none".to_owned()),
            (
                "transition",
                format!(
                    "left {}ms linear, opacity {}ms ease-in-out",
                    duration_ms,
                    duration_ms / 2
                ),
            ),
        ]
    }
}

pub fn should_spawn<R: Rng>(rng: &mut R, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

fn set_styles(element: &HtmlElement, styles: &[(&str, String)]) -> Result<(), JsValue> {
    let style = element.style();
    for (name, value) in styles {
        style.set_property(name, value)?;
    }
    Ok(())
}

/// Adds one star to `hero` and schedules its fade out and removal.
pub fn spawn(
    document: &Document,
    hero: &Element,
    shape: StarShape,
    duration_ms: i32,
) -> Result<(), JsValue> {
    let star: HtmlElement = document.create_element("div")?.dyn_into()?;
    star.set_class_name(CLASS_NAME);
    set_styles(&star, &shape.initial_styles(duration_ms))?;
    hero.append_child(&star)?;

    // Read layout so the browser commits the start position before the
    // transition targets are set.
    let _ = star.offset_width();
    set_styles(&star, &[("left", "110%".to_owned()), ("opacity", "1".to_owned())])?;

    let fading = star.clone();
    dom::set_timeout(duration_ms / 2, move || {
        let _ = fading.style().set_property("opacity", "0");
    })?;
    dom::set_timeout(duration_ms, move || star.remove())?;

    debug!("shooting star at {:.1}% / {:.1}deg", shape.top, shape.angle_deg);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawn_rate_tracks_probability() {
        let mut rng = StdRng::seed_from_u64(11);
        let spawned = (0..10_000).filter(|_| should_spawn(&mut rng, 0.3)).count();
        assert!(spawned > 2_700 && spawned < 3_300, "spawned {}", spawned);
        assert!(!(0..100).any(|_| should_spawn(&mut rng, 0.0)));
        assert!((0..100).all(|_| should_spawn(&mut rng, 1.0)));
    }

    #[test]
    fn shapes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let shape = StarShape::random(&mut rng);
            assert!(shape.top >= 0.0 && shape.top < 50.0);
            assert!(shape.angle_deg >= -25.0 && shape.angle_deg < -10.0);
            assert!(shape.length_px >= 60.0 && shape.length_px < 120.0);
        }
    }

    #[test]
    fn starts_hidden_off_screen_left() {
        let shape = StarShape {
            top: 20.0,
            angle_deg: -15.0,
            length_px: 80.0,
        };
        let styles = shape.initial_styles(1000);
        let get = |name: &str| {
            styles
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("left"), Some("-10%"));
        assert_eq!(get("opacity"), Some("0"));
        assert_eq!(get("top"), Some("20%"));
        assert_eq!(get("transform"), Some("rotate(-15deg)"));
        assert_eq!(get("transition"), Some("left 1000ms linear, opacity 500ms ease-in-out"));
    }
}
