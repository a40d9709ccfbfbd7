//! Centralized constants for the envmode workspace.
//!
//! This module contains the names shared between the loader, the merge
//! core, and the CLI to avoid magic string duplication.

// =============================================================================
// Mode Resolution
// =============================================================================

/// Environment variable consulted when no explicit mode is supplied.
/// Use `export APP_ENV=dev` in a shell or the equivalent in a process manager.
pub const MODE_ENV_VAR: &str = "APP_ENV";

/// Canonical name of the default (production) mode.
pub const DEFAULT_MODE: &str = "prod";

// =============================================================================
// Source Layers
// =============================================================================

/// Base configuration source, required in every configuration directory.
pub const MAIN_SOURCE: &str = "main";

/// Prefix for the mode-specific source; the canonical mode name is appended
/// (e.g. `mode_test`). Required in every configuration directory.
pub const MODE_SOURCE_PREFIX: &str = "mode_";

/// Local override source. Optional; silently skipped when absent.
pub const LOCAL_SOURCE: &str = "local";

/// File extension used by the YAML source adapter.
pub const SOURCE_EXTENSION: &str = "yaml";

// =============================================================================
// Reserved Keys
// =============================================================================

/// Key stamped into the merged configuration with the resolved mode name.
/// Always overwrites a same-named key coming from any source.
pub const ENVIRONMENT_KEY: &str = "environment";
