//! The particle field behind the hero section.
//!
//! A fixed set of particles drifts across a toroidal surface, is pushed away
//! from the pointer, and is joined by faint lines to every neighbour within
//! the connection distance. `frame` runs one full clear/connect/update/draw
//! cycle and never yields partway through.
//!
//! The connection pass compares every pair of particles, which is fine for the
//! default 80 particles (3160 pairs). Counts in the thousands would need
//! spatial bucketing before the pass stays within a frame budget.

use crate::color::Color;
use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::renderer::DrawTarget;
use rand::Rng;
use vecmath::Vector2;

/// Last known pointer position, relative to the canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// Everything a frame reads from outside the field.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameContext {
    pub pointer: Pointer,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    config: FieldConfig,
}

/// Alpha of the line joining two particles `distance` apart.
pub fn connection_alpha(distance: f64, config: &FieldConfig) -> f64 {
    if distance >= config.connection_distance {
        0.0
    } else {
        (1.0 - distance / config.connection_distance) * config.connection_alpha
    }
}

impl ParticleField {
    pub fn new<R: Rng>(rng: &mut R, width: f64, height: f64, config: FieldConfig) -> Self {
        let particles = (0..config.particle_count)
            .map(|_| Particle::random(rng, width, height))
            .collect();
        ParticleField::from_particles(particles, width, height, config)
    }

    pub fn from_particles(
        particles: Vec<Particle>,
        width: f64,
        height: f64,
        config: FieldConfig,
    ) -> Self {
        ParticleField {
            particles,
            width,
            height,
            config,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    // Particles keep their positions, anything now out of bounds is wrapped on
    // its next update.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn frame<T: DrawTarget + ?Sized>(&mut self, ctx: &FrameContext, target: &mut T) {
        target.clear(self.width, self.height);
        self.draw_connections(target);
        self.step(ctx);
        self.draw_particles(target);
    }

    pub fn step(&mut self, ctx: &FrameContext) {
        let pointer = [ctx.pointer.x, ctx.pointer.y];
        let bounds = [self.width, self.height];
        for particle in &mut self.particles {
            particle.update(pointer, bounds, &self.config);
        }
    }

    pub fn draw_connections<T: DrawTarget + ?Sized>(&self, target: &mut T) {
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = distance(a.pos, b.pos);
                if distance < self.config.connection_distance {
                    target.line(
                        a.pos,
                        b.pos,
                        self.config.connection_width,
                        Color::CONNECTION,
                        connection_alpha(distance, &self.config),
                    );
                }
            }
        }
    }

    pub fn draw_particles<T: DrawTarget + ?Sized>(&self, target: &mut T) {
        for particle in &self.particles {
            let traits = particle.traits();
            let pulse = particle.pulse();
            let radius = traits.size() * pulse;
            let alpha = traits.opacity() * pulse;

            if traits.size() > self.config.glow_threshold {
                target.circle(
                    particle.pos,
                    radius * self.config.glow_scale,
                    traits.color(),
                    alpha * self.config.glow_alpha,
                );
            }
            target.circle(particle.pos, radius, traits.color(), alpha);
        }
    }
}

fn distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    vecmath::vec2_len(vecmath::vec2_sub(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleTraits;
    use crate::renderer::recording::{Op, Recorder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field() -> ParticleField {
        let mut rng = StdRng::seed_from_u64(42);
        ParticleField::new(&mut rng, 800.0, 600.0, FieldConfig::default())
    }

    fn fixed(pos: Vector2<f64>, size: f64) -> Particle {
        Particle::new(
            pos,
            std::f64::consts::PI / 2.0,
            ParticleTraits::new(size, [0.0, 0.0], 0.5, Color::PALETTE[1], 0.0),
        )
    }

    fn pointer_at(x: f64, y: f64) -> FrameContext {
        FrameContext {
            pointer: Pointer { x, y },
        }
    }

    #[test]
    fn count_and_bounds_hold_over_many_frames() {
        let mut field = field();
        let mut target = Recorder::default();
        for i in 0..2_000 {
            let ctx = pointer_at((i * 7 % 800) as f64, (i * 13 % 600) as f64);
            field.frame(&ctx, &mut target);
            target.ops.clear();
            assert_eq!(field.particles().len(), 80);
            for p in field.particles() {
                assert!(p.pos[0] >= 0.0 && p.pos[0] < 800.0, "x = {}", p.pos[0]);
                assert!(p.pos[1] >= 0.0 && p.pos[1] < 600.0, "y = {}", p.pos[1]);
            }
        }
    }

    #[test]
    fn traits_never_change() {
        let mut field = field();
        let before: Vec<ParticleTraits> = field.particles().iter().map(|p| *p.traits()).collect();
        for _ in 0..50 {
            field.step(&pointer_at(400.0, 300.0));
        }
        let after: Vec<ParticleTraits> = field.particles().iter().map(|p| *p.traits()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn connection_alpha_falls_off_with_distance() {
        let config = FieldConfig::default();
        assert_eq!(connection_alpha(120.0, &config), 0.0);
        assert_eq!(connection_alpha(500.0, &config), 0.0);
        assert!((connection_alpha(0.0, &config) - 0.15).abs() < 1e-12);

        let mut last = connection_alpha(0.0, &config);
        let mut d = 0.5;
        while d < 120.0 {
            let alpha = connection_alpha(d, &config);
            assert!(alpha < last && alpha > 0.0);
            last = alpha;
            d += 0.5;
        }
    }

    #[test]
    fn connects_only_close_pairs() {
        let particles = vec![
            fixed([100.0, 100.0], 1.0),
            fixed([160.0, 100.0], 1.0),
            fixed([400.0, 400.0], 1.0),
        ];
        let field = ParticleField::from_particles(particles, 800.0, 600.0, FieldConfig::default());
        let mut target = Recorder::default();
        field.draw_connections(&mut target);

        let lines: Vec<&Op> = target.lines().collect();
        assert_eq!(lines.len(), 1);
        match lines[0] {
            Op::Line { from, to, width, color, alpha } => {
                assert_eq!(*from, [100.0, 100.0]);
                assert_eq!(*to, [160.0, 100.0]);
                assert_eq!(*width, 0.5);
                assert_eq!(*color, Color::CONNECTION);
                assert!((alpha - 0.075).abs() < 1e-12);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn large_particles_get_a_glow_underneath() {
        let particles = vec![fixed([10.0, 10.0], 2.0), fixed([500.0, 500.0], 1.0)];
        let field = ParticleField::from_particles(particles, 800.0, 600.0, FieldConfig::default());
        let mut target = Recorder::default();
        field.draw_particles(&mut target);

        // pulse is 1.0 at phase pi/2
        let circles: Vec<&Op> = target.circles().collect();
        assert_eq!(circles.len(), 3);
        match (circles[0], circles[1], circles[2]) {
            (
                Op::Circle { radius: glow_r, alpha: glow_a, .. },
                Op::Circle { radius: core_r, alpha: core_a, .. },
                Op::Circle { radius: small_r, .. },
            ) => {
                assert!((glow_r - 6.0).abs() < 1e-12);
                assert!((glow_a - 0.05).abs() < 1e-12);
                assert!((core_r - 2.0).abs() < 1e-12);
                assert!((core_a - 0.5).abs() < 1e-12);
                assert!((small_r - 1.0).abs() < 1e-12);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn frame_clears_then_connects_with_pre_update_positions() {
        let traits = ParticleTraits::new(1.0, [1.0, 0.0], 0.5, Color::PALETTE[0], 0.0);
        let particles = vec![
            Particle::new([100.0, 100.0], 0.0, traits),
            Particle::new([150.0, 100.0], 0.0, traits),
        ];
        let mut field =
            ParticleField::from_particles(particles, 800.0, 600.0, FieldConfig::default());
        let mut target = Recorder::default();
        field.frame(&pointer_at(700.0, 500.0), &mut target);

        assert_eq!(target.ops[0], Op::Clear { width: 800.0, height: 600.0 });
        match &target.ops[1] {
            Op::Line { from, .. } => assert_eq!(*from, [100.0, 100.0]),
            op => panic!("expected a line, got {:?}", op),
        }
        match &target.ops[2] {
            Op::Circle { center, .. } => assert_eq!(*center, [101.0, 100.0]),
            op => panic!("expected a circle, got {:?}", op),
        }
    }

    #[test]
    fn resize_keeps_positions_and_wraps_later() {
        let traits = ParticleTraits::new(1.0, [0.1, 0.0], 0.5, Color::PALETTE[0], 0.0);
        let particles = vec![Particle::new([700.0, 500.0], 0.0, traits)];
        let mut field =
            ParticleField::from_particles(particles, 800.0, 600.0, FieldConfig::default());

        field.resize(400.0, 300.0);
        assert_eq!(field.particles()[0].pos, [700.0, 500.0]);

        field.step(&pointer_at(-1_000.0, -1_000.0));
        assert_eq!(field.particles()[0].pos, [0.0, 0.0]);
    }
}
