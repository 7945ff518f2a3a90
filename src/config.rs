//! Tunables for every animated piece of the page.
//!
//! All sections have defaults, so an empty (or absent) TOML file yields the
//! stock page. Only the keys a user wants to change need to appear:
//!
//! ```toml
//! [field]
//! particle_count = 120
//! max_distance = 180.0
//!
//! [typing]
//! texts = ["Rust developer", "Tinkerer"]
//! ```

use std::{path::Path, time::Duration};

use serde::Deserialize;

use crate::{error::ConfigError, portfolio::Project};

/// Cursor push per unit of force, applied to the cursor offset.
pub const PUSH_STRENGTH: f32 = 0.01;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Pairs closer than this get a connection line.
    pub max_distance: f32,
    /// Each velocity component is drawn from `[-speed/2, speed/2)`.
    pub particle_speed: f32,
    /// Radius is drawn from `[1, size + 1)`.
    pub particle_size: f32,
    /// Opacity of a connection between coincident particles.
    pub connection_opacity: f32,
    /// Cursor influence radius.
    pub mouse_radius: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 80,
            max_distance: 150.0,
            particle_speed: 0.5,
            particle_size: 2.0,
            connection_opacity: 0.3,
            mouse_radius: 200.0,
        }
    }
}

/// Repeating steps never run with a zero period, so a poll always terminates.
fn step_duration(ms: u64) -> Duration {
    Duration::from_millis(ms.max(1))
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoadingConfig {
    pub tick_ms: u64,
    /// Upper bound of the random increment added per tick.
    pub max_step: f32,
    pub hide_delay_ms: u64,
    pub ready_delay_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            max_step: 15.0,
            hide_delay_ms: 500,
            ready_delay_ms: 300,
        }
    }
}

impl LoadingConfig {
    pub fn tick(&self) -> Duration {
        step_duration(self.tick_ms)
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    pub fn ready_delay(&self) -> Duration {
        Duration::from_millis(self.ready_delay_ms)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypingConfig {
    pub texts: Vec<String>,
    pub type_ms: u64,
    pub delete_ms: u64,
    pub pause_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            texts: vec![
                "Front-end Developer".into(),
                "Designer".into(),
                "Technology Enthusiast".into(),
            ],
            type_ms: 100,
            delete_ms: 50,
            pause_ms: 2000,
        }
    }
}

impl TypingConfig {
    pub fn type_step(&self) -> Duration {
        step_duration(self.type_ms)
    }

    pub fn delete_step(&self) -> Duration {
        step_duration(self.delete_ms)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodeConfig {
    pub lines: Vec<String>,
    pub char_ms: u64,
    pub rest_ms: u64,
}

impl Default for CodeConfig {
    fn default() -> Self {
        let lines = [
            "const developer = {",
            "  name: \"Helber Oliveira\",",
            "  skills: [\"Python\", \"Html\", \"Css\"],",
            "  passion: \"Creating amazing experiences\",",
            "  available: true",
            "};",
            "",
            "function buildAwesome() {",
            "  return developer.skills.map(skill => {",
            "    return `Building with ${skill}`;",
            "  });",
            "}",
            "",
            "console.log(buildAwesome());",
        ];

        Self {
            lines: lines.iter().map(|line| line.to_string()).collect(),
            char_ms: 50,
            rest_ms: 3000,
        }
    }
}

impl CodeConfig {
    pub fn char_step(&self) -> Duration {
        step_duration(self.char_ms)
    }

    pub fn rest(&self) -> Duration {
        Duration::from_millis(self.rest_ms)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EasterEggConfig {
    pub particle_count: usize,
    pub message: String,
    pub message_ms: u64,
}

impl Default for EasterEggConfig {
    fn default() -> Self {
        Self {
            particle_count: 200,
            message: "You found the easter egg!".into(),
            message_ms: 3000,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactConfig {
    pub send_ms: u64,
    pub notification_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            send_ms: 2000,
            notification_ms: 3000,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub field: FieldConfig,
    pub loading: LoadingConfig,
    pub typing: TypingConfig,
    pub code: CodeConfig,
    pub easter_egg: EasterEggConfig,
    pub contact: ContactConfig,
    pub projects: Vec<Project>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            loading: LoadingConfig::default(),
            typing: TypingConfig::default(),
            code: CodeConfig::default(),
            easter_egg: EasterEggConfig::default(),
            contact: ContactConfig::default(),
            projects: crate::portfolio::default_projects(),
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(source: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.check(path)?;
        Ok(config)
    }

    /// Rejects values that would stall an animation forever.
    fn check(&self, path: &Path) -> Result<(), ConfigError> {
        let max_step = self.loading.max_step;
        if !(max_step.is_finite() && max_step > 0.0) {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: format!("loading.max_step must be positive, got {max_step}"),
            });
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source, path)?;

        tracing::info!(
            path = %path.display(),
            particles = config.field.particle_count,
            projects = config.projects.len(),
            "loaded site config"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SiteConfig::from_toml_str("", Path::new("site.toml")).unwrap();
        assert_eq!(config.field, FieldConfig::default());
        assert_eq!(config.typing.texts.len(), 3);
        assert_eq!(config.easter_egg.particle_count, 200);
        assert_eq!(config.projects.len(), 2);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let source = r#"
            [field]
            particle_count = 12
            mouse_radius = 50.0
        "#;
        let config = SiteConfig::from_toml_str(source, Path::new("site.toml")).unwrap();

        assert_eq!(config.field.particle_count, 12);
        assert_eq!(config.field.mouse_radius, 50.0);
        assert_eq!(config.field.max_distance, 150.0);
        assert_eq!(config.loading, LoadingConfig::default());
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = SiteConfig::from_toml_str("[field\n", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn non_positive_loading_step_is_rejected() {
        for value in ["0.0", "-5.0"] {
            let source = format!("[loading]\nmax_step = {value}\n");
            let err = SiteConfig::from_toml_str(&source, Path::new("site.toml")).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }));
            assert!(err.to_string().contains("max_step"));
        }

        let ok = SiteConfig::from_toml_str("[loading]\nmax_step = 0.5\n", Path::new("site.toml"));
        assert_eq!(ok.unwrap().loading.max_step, 0.5);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = SiteConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
