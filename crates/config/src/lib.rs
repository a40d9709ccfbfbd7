//! Mode-driven layered configuration for envmode.
//!
//! This crate resolves a deployment mode (explicit override, `APP_ENV`
//! environment variable, or the `prod` default), loads layered YAML sources
//! (`main` -> `mode_<mode>` -> `local`) from one or more configuration
//! directories, and deep-merges them into a single configuration map with
//! deterministic precedence.

pub mod constants;
mod environment;
mod error;
mod mode;
mod source;
mod value;

pub use environment::Environment;
pub use error::ConfigError;
pub use mode::Mode;
pub use value::{ConfigMap, ConfigValue, Key};
