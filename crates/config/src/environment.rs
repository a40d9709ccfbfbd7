//! Environment assembly: directory validation, source layering, and the
//! final merged configuration.
//!
//! Responsibilities:
//! - Validate the caller-supplied configuration directories up front.
//! - Resolve the active mode, then load `main` -> `mode_<mode>` -> `local`
//!   per directory (directories in caller order) and fold every yielded
//!   mapping into one accumulator.
//! - Stamp the reserved `environment` key with the resolved mode.
//!
//! Does NOT handle:
//! - The on-disk format (see `source.rs`).
//! - The merge rules themselves (see `value.rs`).
//!
//! Invariants:
//! - Every error aborts construction; no partial configuration escapes.
//! - The mode is resolved once and is immutable for the lifetime of the
//!   loaded configuration.

use std::path::{Path, PathBuf};

use crate::constants::{ENVIRONMENT_KEY, LOCAL_SOURCE, MAIN_SOURCE, MODE_SOURCE_PREFIX};
use crate::error::ConfigError;
use crate::mode::Mode;
use crate::source;
use crate::value::{ConfigMap, ConfigValue, Key};

/// A fully assembled configuration for one resolved deployment mode.
#[derive(Debug)]
pub struct Environment {
    mode: Mode,
    config: ConfigMap,
}

impl Environment {
    /// Load and merge configuration from one or more directories.
    ///
    /// `mode` overrides automatic resolution; `None` falls back to the
    /// `APP_ENV` environment variable and then to `prod`. Later directories
    /// override earlier ones on matching keys.
    pub fn new<I, P>(config_dirs: I, mode: Option<&str>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let dirs = validate_dirs(config_dirs)?;
        let mode = Mode::resolve(mode)?;

        let mut config = load_merged(&dirs, mode)?;
        config.insert(
            Key::Name(ENVIRONMENT_KEY.to_string()),
            ConfigValue::String(mode.as_str().to_string()),
        );

        tracing::debug!(mode = %mode, entries = config.len(), "configuration assembled");
        Ok(Self { mode, config })
    }

    /// The resolved deployment mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The merged configuration, including the stamped `environment` key.
    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// Consume the environment, returning the merged configuration.
    pub fn into_config(self) -> ConfigMap {
        self.config
    }
}

/// Check every supplied location before any loading occurs.
fn validate_dirs<I, P>(config_dirs: I) -> Result<Vec<PathBuf>, ConfigError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut dirs = Vec::new();
    for dir in config_dirs {
        let path = dir.as_ref().to_path_buf();
        if !path.is_dir() {
            return Err(ConfigError::InvalidDirectory { path });
        }
        dirs.push(path);
    }
    Ok(dirs)
}

/// Load every layer of every directory, folding each yielded mapping into a
/// single accumulator: main -> mode-specific -> local, directories in caller
/// order.
fn load_merged(dirs: &[PathBuf], mode: Mode) -> Result<ConfigMap, ConfigError> {
    let mode_source = format!("{MODE_SOURCE_PREFIX}{}", mode.as_str());
    let mut merged = ConfigMap::new();

    for dir in dirs {
        let main_path = source::source_path(dir, MAIN_SOURCE);
        if !main_path.exists() {
            return Err(ConfigError::MissingMainConfig { path: main_path });
        }
        if let Some(map) = source::load(dir, MAIN_SOURCE)? {
            merged = merged.merge(&map);
        }

        let mode_path = source::source_path(dir, &mode_source);
        if !mode_path.exists() {
            return Err(ConfigError::MissingModeConfig { path: mode_path });
        }
        if let Some(map) = source::load(dir, &mode_source)? {
            merged = merged.merge(&map);
        }

        // Local overrides are optional.
        if let Some(map) = source::load(dir, LOCAL_SOURCE)? {
            merged = merged.merge(&map);
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    use crate::constants::MODE_ENV_VAR;

    fn write_source(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(format!("{name}.yaml")), body).unwrap();
    }

    fn basic_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write_source(tmp.path(), "main", "key: value\n");
        write_source(tmp.path(), "mode_dev", "key: value-1\n");
        write_source(tmp.path(), "mode_test", "key: value-2\n");
        write_source(tmp.path(), "mode_stage", "key: value-3\n");
        write_source(tmp.path(), "mode_prod", "key: value-4\n");
        tmp
    }

    #[test]
    fn invalid_directory_fails_before_loading() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");

        let err = Environment::new([&missing], Some("test")).unwrap_err();
        match err {
            ConfigError::InvalidDirectory { path } => assert_eq!(path, missing),
            other => panic!("expected InvalidDirectory, got {other:?}"),
        }
    }

    #[test]
    fn missing_main_source_names_expected_path() {
        let tmp = TempDir::new().unwrap();

        let err = Environment::new([tmp.path()], Some("test")).unwrap_err();
        match err {
            ConfigError::MissingMainConfig { path } => {
                assert_eq!(path, tmp.path().join("main.yaml"));
            }
            other => panic!("expected MissingMainConfig, got {other:?}"),
        }
    }

    #[test]
    fn missing_mode_source_names_expected_path() {
        let tmp = TempDir::new().unwrap();
        write_source(tmp.path(), "main", "key: value\n");

        let err = Environment::new([tmp.path()], Some("stage")).unwrap_err();
        match err {
            ConfigError::MissingModeConfig { path } => {
                assert_eq!(path, tmp.path().join("mode_stage.yaml"));
            }
            other => panic!("expected MissingModeConfig, got {other:?}"),
        }
    }

    #[test]
    fn forced_modes_pick_their_layer() {
        let tmp = basic_dir();
        for (mode, expected) in [
            ("dev", "value-1"),
            ("test", "value-2"),
            ("stage", "value-3"),
            ("prod", "value-4"),
        ] {
            let env = Environment::new([tmp.path()], Some(mode)).unwrap();
            assert_eq!(
                env.config().get_named("key").and_then(ConfigValue::as_str),
                Some(expected)
            );
            assert_eq!(
                env.config()
                    .get_named("environment")
                    .and_then(ConfigValue::as_str),
                Some(mode)
            );
        }
    }

    #[test]
    fn local_source_is_optional_and_overrides() {
        let tmp = basic_dir();

        let without_local = Environment::new([tmp.path()], Some("test")).unwrap();
        assert_eq!(
            without_local
                .config()
                .get_named("key")
                .and_then(ConfigValue::as_str),
            Some("value-2")
        );

        write_source(tmp.path(), "local", "key: value-local\n");
        let with_local = Environment::new([tmp.path()], Some("test")).unwrap();
        assert_eq!(
            with_local
                .config()
                .get_named("key")
                .and_then(ConfigValue::as_str),
            Some("value-local")
        );
    }

    #[test]
    fn environment_key_overrides_loaded_value() {
        let tmp = TempDir::new().unwrap();
        write_source(tmp.path(), "main", "environment: from-main\n");
        write_source(tmp.path(), "mode_dev", "environment: from-mode\n");

        let env = Environment::new([tmp.path()], Some("dev")).unwrap();
        assert_eq!(
            env.config()
                .get_named("environment")
                .and_then(ConfigValue::as_str),
            Some("dev")
        );
    }

    #[test]
    fn later_directory_overrides_earlier() {
        let common = TempDir::new().unwrap();
        write_source(common.path(), "main", "key: v1\ncommon: c\n");
        write_source(common.path(), "mode_test", "{}\n");

        let specific = TempDir::new().unwrap();
        write_source(specific.path(), "main", "key: v2\n");
        write_source(specific.path(), "mode_test", "{}\n");

        let env = Environment::new([common.path(), specific.path()], Some("test")).unwrap();
        assert_eq!(
            env.config().get_named("key").and_then(ConfigValue::as_str),
            Some("v2")
        );
        assert_eq!(
            env.config()
                .get_named("common")
                .and_then(ConfigValue::as_str),
            Some("c")
        );
    }

    #[test]
    fn non_mapping_sources_are_ignored() {
        let tmp = TempDir::new().unwrap();
        write_source(tmp.path(), "main", "key: value\n");
        // Present but scalar-valued; satisfies the existence requirement only.
        write_source(tmp.path(), "mode_test", "just a scalar\n");

        let env = Environment::new([tmp.path()], Some("test")).unwrap();
        assert_eq!(
            env.config().get_named("key").and_then(ConfigValue::as_str),
            Some("value")
        );
    }

    #[test]
    #[serial]
    fn mode_comes_from_env_var_when_not_explicit() {
        let tmp = basic_dir();
        temp_env::with_var(MODE_ENV_VAR, Some("stage"), || {
            let env = Environment::new([tmp.path()], None).unwrap();
            assert_eq!(env.mode(), Mode::Stage);
            assert_eq!(
                env.config().get_named("key").and_then(ConfigValue::as_str),
                Some("value-3")
            );
        });
    }

    #[test]
    #[serial]
    fn mode_defaults_to_prod_when_env_unset() {
        let tmp = basic_dir();
        temp_env::with_var_unset(MODE_ENV_VAR, || {
            let env = Environment::new([tmp.path()], None).unwrap();
            assert_eq!(env.mode(), Mode::Prod);
        });
    }

    #[test]
    fn invalid_mode_aborts_construction() {
        let tmp = basic_dir();
        let err = Environment::new([tmp.path()], Some("invalid-mode")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMode(v) if v == "invalid-mode"));
    }

    #[test]
    fn directory_validation_precedes_mode_validation() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = Environment::new([&missing], Some("invalid-mode")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDirectory { .. }));
    }
}
