//! Deployment mode resolution.
//!
//! Responsibilities:
//! - Define the fixed set of deployment modes.
//! - Resolve the active mode from an explicit override, the `APP_ENV`
//!   environment variable, or the production default.
//!
//! Does NOT handle:
//! - Loading or merging configuration sources (see `environment.rs`).
//!
//! Invariants:
//! - A caller-supplied mode is always explicit, even when empty; the
//!   environment variable is never consulted in that case.
//! - Parsing is case-insensitive; the canonical form is lowercase.

use std::env::VarError;
use std::fmt;
use std::str::FromStr;

use crate::constants::MODE_ENV_VAR;
use crate::error::ConfigError;

/// Deployment mode selecting which configuration layer is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Dev,
    Test,
    Stage,
    Prod,
}

impl Mode {
    /// All valid modes, in canonical order.
    pub const ALL: [Mode; 4] = [Mode::Dev, Mode::Test, Mode::Stage, Mode::Prod];

    /// Canonical lowercase name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Dev => "dev",
            Mode::Test => "test",
            Mode::Stage => "stage",
            Mode::Prod => "prod",
        }
    }

    /// Resolve the active mode.
    ///
    /// Precedence: explicit override > `APP_ENV` environment variable >
    /// default (`prod`). The environment variable is only read when no
    /// explicit mode is supplied; a set-but-invalid value (including an
    /// empty string) fails rather than falling back.
    pub fn resolve(explicit: Option<&str>) -> Result<Mode, ConfigError> {
        match explicit {
            Some(raw) => raw.parse(),
            None => match std::env::var(MODE_ENV_VAR) {
                Ok(raw) => raw.parse(),
                Err(VarError::NotPresent) => Ok(Mode::Prod),
                Err(VarError::NotUnicode(raw)) => {
                    Err(ConfigError::InvalidMode(raw.to_string_lossy().into_owned()))
                }
            },
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = s.to_lowercase();
        match canonical.as_str() {
            "dev" => Ok(Mode::Dev),
            "test" => Ok(Mode::Test),
            "stage" => Ok(Mode::Stage),
            "prod" => Ok(Mode::Prod),
            _ => Err(ConfigError::InvalidMode(canonical)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
