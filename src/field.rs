use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::{
    canvas::{Connection, Dot, Frame},
    config::{FieldConfig, PUSH_STRENGTH},
    particle::Particle,
};

/// The animated particle background.
///
/// Owns a fixed-size set of particles, the surface bounds used for
/// reflection, and the last pointer position reported by the host.
pub struct ParticleField {
    pub config: FieldConfig,
    bounds: Vec2,
    pointer: Option<Vec2>,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: FieldConfig, bounds: Vec2) -> Self {
        Self::with_rng(config, bounds, StdRng::from_entropy())
    }

    /// Deterministic field for tests and `--seed`.
    pub fn seeded(config: FieldConfig, bounds: Vec2, seed: u64) -> Self {
        Self::with_rng(config, bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, bounds: Vec2, rng: StdRng) -> Self {
        let mut field = Self {
            config,
            bounds,
            pointer: None,
            particles: Vec::new(),
            rng,
        };
        field.populate();
        field
    }

    /// Builds a field from explicit particles; nothing is sampled.
    pub fn from_particles(config: FieldConfig, bounds: Vec2, particles: Vec<Particle>) -> Self {
        Self {
            config: FieldConfig {
                particle_count: particles.len(),
                ..config
            },
            bounds,
            pointer: None,
            particles,
            rng: StdRng::seed_from_u64(0),
        }
    }

    fn populate(&mut self) {
        let FieldConfig {
            particle_count,
            particle_speed,
            particle_size,
            ..
        } = self.config;
        let bounds = self.bounds;
        let rng = &mut self.rng;

        self.particles = std::iter::repeat_with(|| {
            Particle::random(&mut *rng, bounds, particle_speed, particle_size)
        })
        .take(particle_count)
        .collect();
    }

    /// Replaces every particle with `count` fresh ones inside the current bounds.
    pub fn reseed(&mut self, count: usize) {
        self.config.particle_count = count;
        self.populate();
        tracing::info!(count, width = self.bounds.x, height = self.bounds.y, "reseeded particle field");
    }

    /// Only the reflection and clearing bounds change; particles stay put.
    pub fn resize(&mut self, bounds: Vec2) {
        if bounds != self.bounds {
            tracing::debug!(width = bounds.x, height = bounds.y, "particle surface resized");
            self.bounds = bounds;
        }
    }

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = Some(pointer);
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Moves, reflects and repels every particle by one frame.
    pub fn advance(&mut self) {
        let bounds = self.bounds;
        let pointer = self.pointer;
        let mouse_radius = self.config.mouse_radius;

        for particle in &mut self.particles {
            particle.advance(bounds);
            if let Some(pointer) = pointer {
                particle.repel(pointer, mouse_radius, PUSH_STRENGTH);
            }
        }
    }

    /// Every unordered pair closer than `max_distance`, ordered by `(a, b)`.
    pub fn connections(&self) -> Vec<Connection> {
        let max_distance = self.config.max_distance;
        let scale = self.config.connection_opacity;
        let particles = &self.particles;

        (0..particles.len())
            .into_par_iter()
            .flat_map_iter(|a| {
                let from = particles[a].position;
                (a + 1..particles.len()).filter_map(move |b| {
                    let to = particles[b].position;
                    connection_opacity(from.distance(to), max_distance, scale)
                        .map(|opacity| Connection { a, b, from, to, opacity })
                })
            })
            .collect()
    }

    pub fn dots(&self) -> Vec<Dot> {
        self.particles
            .iter()
            .map(|particle| Dot {
                center: particle.position,
                radius: particle.radius,
                color: particle.color(),
            })
            .collect()
    }

    /// One animation frame: update positions, then snapshot what to draw.
    pub fn step(&mut self) -> Frame {
        self.advance();
        self.snapshot()
    }

    /// The display list for the current state without advancing it.
    pub fn snapshot(&self) -> Frame {
        Frame {
            size: self.bounds,
            connections: self.connections(),
            dots: self.dots(),
        }
    }
}

/// Opacity of a line between two particles `distance` apart, or `None` when
/// they are too far apart to be connected.
pub fn connection_opacity(distance: f32, max_distance: f32, scale: f32) -> Option<f32> {
    (distance < max_distance).then(|| (max_distance - distance) / max_distance * scale)
}
