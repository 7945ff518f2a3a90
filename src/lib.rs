//! Animated portfolio page: a particle-network background plus the small
//! timed widgets around it (loading splash, typing headline, code sample,
//! project grid, contact form and an easter egg).
//!
//! Everything in here is windowing-agnostic. The `portfolio` binary wires it
//! to an eframe window; tests drive it with a [`clock::ManualClock`] and a
//! seeded field.

pub mod canvas;
pub mod clock;
pub mod code_typing;
pub mod config;
pub mod contact;
pub mod error;
pub mod field;
pub mod frames;
pub mod konami;
pub mod loading;
pub mod particle;
pub mod portfolio;
pub mod typing;

pub use canvas::{Canvas, Connection, Dot, Frame};
pub use config::{FieldConfig, SiteConfig};
pub use error::ConfigError;
pub use field::ParticleField;
pub use frames::{FrameLoop, Frames, LoopState, Visibility};
pub use particle::{Particle, Rgba, Swatch};
