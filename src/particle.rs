// A single background particle. The traits are fixed when the particle is
// created, only the position and pulse phase change from frame to frame.

use crate::color::Color;
use crate::config::FieldConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f64::consts::PI;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParticleTraits {
    size: f64,
    vel: Vector2<f64>,
    opacity: f64,
    color: Color,
    pulse_speed: f64,
}

impl ParticleTraits {
    pub const SIZE: (f64, f64) = (0.5, 2.5);
    pub const SPEED: (f64, f64) = (-0.25, 0.25);
    pub const OPACITY: (f64, f64) = (0.2, 0.7);
    pub const PULSE_SPEED: (f64, f64) = (0.01, 0.03);

    pub fn new(size: f64, vel: Vector2<f64>, opacity: f64, color: Color, pulse_speed: f64) -> Self {
        ParticleTraits {
            size,
            vel,
            opacity,
            color,
            pulse_speed,
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn vel(&self) -> Vector2<f64> {
        self.vel
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pulse_speed(&self) -> f64 {
        self.pulse_speed
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub pulse_phase: f64,
    traits: ParticleTraits,
}

/// Scale factor applied to a particle's radius and alpha, in [0.4, 1.0].
pub fn pulse(phase: f64) -> f64 {
    phase.sin() * 0.3 + 0.7
}

// Keeps a coordinate inside [0, bound). Leaving past the far edge restarts at
// 0. Leaving below 0 re-enters from the far edge by the same overshoot rather
// than landing exactly on `bound`, which would sit outside the range.
pub fn wrap(value: f64, bound: f64) -> f64 {
    if value >= bound {
        0.0
    } else if value < 0.0 {
        let wrapped = value + bound;
        if wrapped >= 0.0 && wrapped < bound {
            wrapped
        } else {
            0.0
        }
    } else {
        value
    }
}

impl Particle {
    pub fn new(pos: Vector2<f64>, pulse_phase: f64, traits: ParticleTraits) -> Particle {
        Particle {
            pos,
            pulse_phase,
            traits,
        }
    }

    pub fn random<R: Rng>(rng: &mut R, width: f64, height: f64) -> Particle {
        let (size_min, size_max) = ParticleTraits::SIZE;
        let (speed_min, speed_max) = ParticleTraits::SPEED;
        let (opacity_min, opacity_max) = ParticleTraits::OPACITY;
        let (pulse_min, pulse_max) = ParticleTraits::PULSE_SPEED;

        let traits = ParticleTraits {
            size: rng.gen_range(size_min, size_max),
            vel: [
                rng.gen_range(speed_min, speed_max),
                rng.gen_range(speed_min, speed_max),
            ],
            opacity: rng.gen_range(opacity_min, opacity_max),
            color: *Color::PALETTE
                .choose(rng)
                .unwrap_or(&Color::PALETTE[0]),
            pulse_speed: rng.gen_range(pulse_min, pulse_max),
        };
        let pos = [rng.gen::<f64>() * width, rng.gen::<f64>() * height];
        let pulse_phase = rng.gen::<f64>() * 2.0 * PI;

        Particle::new(pos, pulse_phase, traits)
    }

    pub fn traits(&self) -> &ParticleTraits {
        &self.traits
    }

    pub fn pulse(&self) -> f64 {
        pulse(self.pulse_phase)
    }

    // Drift, pulse, pointer repulsion, then wrap. Repulsion is applied before
    // the wrap check, and every position is back in bounds when this returns.
    pub fn update(&mut self, pointer: Vector2<f64>, bounds: Vector2<f64>, config: &FieldConfig) {
        self.pos = vecmath::vec2_add(self.pos, self.traits.vel);
        self.pulse_phase += self.traits.pulse_speed;

        let to_pointer = vecmath::vec2_sub(pointer, self.pos);
        let distance = vecmath::vec2_len(to_pointer);
        if distance < config.pointer_radius {
            let force = (config.pointer_radius - distance) / config.pointer_radius;
            let push = vecmath::vec2_scale(to_pointer, force * config.repulsion);
            self.pos = vecmath::vec2_sub(self.pos, push);
        }

        self.pos[0] = wrap(self.pos[0], bounds[0]);
        self.pos[1] = wrap(self.pos[1], bounds[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(pos: Vector2<f64>) -> Particle {
        Particle::new(pos, 0.0, ParticleTraits::new(1.0, [0.0, 0.0], 0.5, Color::PALETTE[0], 0.02))
    }

    #[test]
    fn random_particles_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, 800.0, 600.0);
            let t = p.traits();
            assert!(t.size() >= 0.5 && t.size() < 2.5);
            assert!(t.vel().iter().all(|v| *v >= -0.25 && *v < 0.25));
            assert!(t.opacity() >= 0.2 && t.opacity() < 0.7);
            assert!(t.pulse_speed() >= 0.01 && t.pulse_speed() < 0.03);
            assert!(Color::PALETTE.contains(&t.color()));
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 600.0);
        }
    }

    #[test]
    fn pulse_stays_in_range() {
        let mut phase = -20.0;
        while phase < 20.0 {
            let p = pulse(phase);
            assert!(p >= 0.4 - 1e-12 && p <= 1.0 + 1e-12, "pulse({}) = {}", phase, p);
            phase += 0.013;
        }
        assert!((pulse(PI / 2.0) - 1.0).abs() < 1e-12);
        assert!((pulse(-PI / 2.0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn wraps_past_far_edge_to_zero() {
        let config = FieldConfig::default();
        let traits = ParticleTraits::new(1.0, [5.0, 0.0], 0.5, Color::PALETTE[0], 0.02);
        let far = [10_000.0, 10_000.0];

        let mut p = Particle::new([790.0, 300.0], 0.0, traits);
        p.update(far, [800.0, 600.0], &config);
        assert_eq!(p.pos, [795.0, 300.0]);

        p.update(far, [800.0, 600.0], &config);
        assert_eq!(p.pos, [0.0, 300.0]);
    }

    #[test]
    fn wraps_below_zero_to_far_side() {
        let config = FieldConfig::default();
        let traits = ParticleTraits::new(1.0, [-0.2, -0.2], 0.5, Color::PALETTE[0], 0.02);
        let mut p = Particle::new([0.1, 0.1], 0.0, traits);
        p.update([10_000.0, 10_000.0], [800.0, 600.0], &config);
        assert!(p.pos[0] > 799.0 && p.pos[0] < 800.0);
        assert!(p.pos[1] > 599.0 && p.pos[1] < 600.0);
    }

    #[test]
    fn wrap_helper_edges() {
        assert_eq!(wrap(800.0, 800.0), 0.0);
        assert_eq!(wrap(0.0, 800.0), 0.0);
        assert_eq!(wrap(-1e-30, 800.0), 0.0);
        assert_eq!(wrap(1200.0, 800.0), 0.0);
        assert_eq!(wrap(5.0, 0.0), 0.0);
    }

    #[test]
    fn pointer_repels_in_proportion() {
        let config = FieldConfig::default();
        let pointer = [400.0, 300.0];
        let start = [340.0, 220.0];
        let d = vecmath::vec2_len(vecmath::vec2_sub(pointer, start));
        assert_eq!(d, 100.0);

        let mut p = still(start);
        p.update(pointer, [800.0, 600.0], &config);

        let after = vecmath::vec2_len(vecmath::vec2_sub(pointer, p.pos));
        assert!(after > d);

        let moved = vecmath::vec2_len(vecmath::vec2_sub(p.pos, start));
        let expected = (150.0 - d) / 150.0 * 0.02 * d;
        assert!((moved - expected).abs() < 1e-9);
    }

    #[test]
    fn pushed_past_the_edge_is_back_in_bounds() {
        let config = FieldConfig::default();
        let mut p = still([0.1, 300.0]);
        p.update([75.1, 300.0], [800.0, 600.0], &config);
        // pushed 0.75 to the left of 0.1, re-entering from the right
        assert!((p.pos[0] - 799.35).abs() < 1e-9, "x = {}", p.pos[0]);
        assert_eq!(p.pos[1], 300.0);
    }

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let config = FieldConfig::default();
        let mut p = still([100.0, 100.0]);
        p.update([100.0, 250.0], [800.0, 600.0], &config);
        assert_eq!(p.pos, [100.0, 100.0]);
    }

    #[test]
    fn update_changes_only_position_and_phase() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Particle::random(&mut rng, 800.0, 600.0);
        let before = *p.traits();
        let phase = p.pulse_phase;
        p.update([400.0, 300.0], [800.0, 600.0], &config);
        assert_eq!(*p.traits(), before);
        assert!((p.pulse_phase - (phase + before.pulse_speed())).abs() < 1e-12);
    }
}
