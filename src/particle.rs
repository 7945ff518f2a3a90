use glam::Vec2;
use rand::Rng;

/// Straight-alpha color used by the display list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// The two particle colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swatch {
    Cyan,
    Violet,
}

impl Swatch {
    pub const fn rgb(self) -> Rgba {
        match self {
            Swatch::Cyan => Rgba::rgb(0x00, 0xd4, 0xff),
            Swatch::Violet => Rgba::rgb(0x53, 0x34, 0x83),
        }
    }
}

/// Color of every connection line; alpha comes from proximity.
pub const CONNECTION_RGB: Rgba = Rgba::rgb(0, 212, 255);

pub const MIN_OPACITY: f32 = 0.3;
pub const OPACITY_SPAN: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub swatch: Swatch,
}

impl Particle {
    /// Samples a particle inside `bounds`.
    ///
    /// Every attribute is `unit * extent` so a zero-sized surface or a zero
    /// speed cap yields zeros rather than an empty sampling range.
    pub fn random<R: Rng>(rng: &mut R, bounds: Vec2, speed: f32, size: f32) -> Self {
        let mut unit = || rng.gen_range(0.0f32..1.0);

        let position = Vec2::new(unit() * bounds.x, unit() * bounds.y);
        let velocity = Vec2::new((unit() - 0.5) * speed, (unit() - 0.5) * speed);
        let radius = unit() * size + 1.0;
        let opacity = unit() * OPACITY_SPAN + MIN_OPACITY;
        let swatch = if unit() > 0.5 { Swatch::Cyan } else { Swatch::Violet };

        Self {
            position,
            velocity,
            radius,
            opacity,
            swatch,
        }
    }

    pub fn color(&self) -> Rgba {
        self.swatch.rgb().with_alpha(self.opacity)
    }

    /// Integrates one frame and flips velocity on any axis that left `bounds`.
    pub fn advance(&mut self, bounds: Vec2) {
        self.position += self.velocity;

        macro_rules! reflect {
            ($coord:expr, $vel:expr, $limit:expr) => {
                if $coord < 0.0 || $coord > $limit {
                    $vel = -$vel;
                }
            };
        }

        reflect!(self.position.x, self.velocity.x, bounds.x);
        reflect!(self.position.y, self.velocity.y, bounds.y);
    }

    /// Positional nudge away from `pointer`; velocity is left untouched.
    pub fn repel(&mut self, pointer: Vec2, radius: f32, strength: f32) {
        let delta = pointer - self.position;
        let force = repulsion_force(delta.length(), radius);
        if force > 0.0 {
            self.position -= delta * force * strength;
        }
    }
}

/// Linear falloff: 1 at distance 0, 0 at `radius` and beyond.
pub fn repulsion_force(distance: f32, radius: f32) -> f32 {
    if distance < radius {
        (radius - distance) / radius
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn random_particle_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Vec2::new(800.0, 600.0);

        for _ in 0..500 {
            let p = Particle::random(&mut rng, bounds, 0.5, 2.0);
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((0.0..600.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= 0.25 && p.velocity.y.abs() <= 0.25);
            assert!((1.0..3.0).contains(&p.radius));
            assert!((0.3..0.8).contains(&p.opacity));
        }
    }

    #[test]
    fn zero_surface_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::random(&mut rng, Vec2::ZERO, 0.0, 0.0);
        assert_eq!(p.position, Vec2::ZERO);
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.radius, 1.0);
    }

    #[test]
    fn reflection_flips_without_clamping() {
        let mut p = Particle {
            position: Vec2::new(799.9, 300.0),
            velocity: Vec2::new(0.2, -0.1),
            radius: 1.0,
            opacity: 0.5,
            swatch: Swatch::Cyan,
        };
        p.advance(Vec2::new(800.0, 600.0));

        assert!(p.position.x > 800.0);
        assert_eq!(p.velocity.x, -0.2);
        assert_eq!(p.velocity.y, -0.1);

        p.advance(Vec2::new(800.0, 600.0));
        assert!(p.position.x < 800.0);
    }

    #[test]
    fn repulsion_force_falloff() {
        assert_eq!(repulsion_force(0.0, 200.0), 1.0);
        assert_eq!(repulsion_force(100.0, 200.0), 0.5);
        assert_eq!(repulsion_force(200.0, 200.0), 0.0);
        assert_eq!(repulsion_force(350.0, 200.0), 0.0);
        assert_eq!(repulsion_force(0.0, 0.0), 0.0);
    }

    #[test]
    fn repel_pushes_away_and_keeps_velocity() {
        let mut p = Particle {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(0.1, 0.1),
            radius: 1.0,
            opacity: 0.5,
            swatch: Swatch::Violet,
        };
        // distance 100, radius 200 -> force 0.5, delta (100, 0)
        p.repel(Vec2::new(200.0, 100.0), 200.0, 0.01);

        assert!((p.position.x - 99.5).abs() < 1e-4);
        assert_eq!(p.position.y, 100.0);
        assert_eq!(p.velocity, Vec2::new(0.1, 0.1));
    }
}
