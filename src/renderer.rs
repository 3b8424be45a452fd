// Drawing surface used by the particle field. The browser canvas implements it
// directly, tests use a recording target instead.

use crate::color::Color;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub trait DrawTarget {
    fn clear(&mut self, width: f64, height: f64);
    fn line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Color, alpha: f64);
    fn circle(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64);
}

impl DrawTarget for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    #[allow(deprecated)]
    fn line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Color, alpha: f64) {
        self.begin_path();
        self.set_stroke_style(&JsValue::from_str(&color.to_rgba(alpha)));
        self.set_line_width(width);
        self.move_to(from[0], from[1]);
        self.line_to(to[0], to[1]);
        self.stroke();
    }

    #[allow(deprecated)]
    fn circle(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64) {
        self.begin_path();
        // arc only fails on a negative radius
        if self.arc(center[0], center[1], radius.max(0.0), 0.0, 2.0 * PI).is_err() {
            return;
        }
        self.set_fill_style(&JsValue::from_str(&color.to_rgba(alpha)));
        self.fill();
    }
}
