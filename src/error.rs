//! Error types.
//!
//! The simulator itself is infallible; the only things that can fail are
//! reading, parsing and checking the optional site configuration.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}
