//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for all configuration loading failures.
//! - Carry enough context (paths, offending values) for startup diagnostics.
//!
//! Does NOT handle:
//! - Recovery. Every variant aborts construction; callers treat
//!   configuration loading as an all-or-nothing startup precondition.
//!
//! Invariants:
//! - Path-carrying variants always name the exact file or directory that
//!   failed, never a parent.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving a mode or assembling configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A supplied configuration directory does not exist or is not a directory.
    #[error("Invalid configuration directory \"{path}\"")]
    InvalidDirectory { path: PathBuf },

    /// The required base source is absent for some directory.
    #[error("Cannot find main config file \"{path}\"")]
    MissingMainConfig { path: PathBuf },

    /// The required mode-specific source is absent for some directory.
    #[error("Cannot find mode specific config file \"{path}\"")]
    MissingModeConfig { path: PathBuf },

    /// The explicit or environment-derived mode is not in the valid set.
    #[error("Invalid environment mode supplied or selected: {0}")]
    InvalidMode(String),

    /// A source file exists but could not be read.
    #[error("Failed to read config source at {path}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file exists but is not valid YAML.
    #[error("Failed to parse config source at {path}")]
    SourceParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A mapping in a source file uses a key that is neither a string nor an
    /// integer.
    #[error("Unsupported mapping key in config source at {path} (keys must be strings or integers)")]
    UnsupportedKey { path: PathBuf },
}
