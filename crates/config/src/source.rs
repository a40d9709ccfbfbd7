//! YAML source-file adapter.
//!
//! Responsibilities:
//! - Load one named configuration source (`<name>.yaml`) from a directory
//!   and convert it into the crate's value model.
//! - Keep the merge core isolated from the on-disk format: the only
//!   contract is `(directory, name) -> mapping-or-absent`.
//!
//! Does NOT handle:
//! - Which sources are required or optional (see `environment.rs`).
//!
//! Invariants:
//! - An absent file is `Ok(None)`; existence is never an error here.
//! - A present but non-mapping document (scalar, sequence, empty) is also
//!   `Ok(None)`, matching the merge contract's "ignore non-mapping results".

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::SOURCE_EXTENSION;
use crate::error::ConfigError;
use crate::value::{ConfigMap, ConfigValue, Key};

/// Path of a named source inside a configuration directory.
pub(crate) fn source_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{SOURCE_EXTENSION}"))
}

/// Load a named source, returning `Ok(None)` when the file is absent or its
/// document is not a mapping.
pub(crate) fn load(dir: &Path, name: &str) -> Result<Option<ConfigMap>, ConfigError> {
    let path = source_path(dir, name);
    if !path.exists() {
        return Ok(None);
    }

    let text = fs::read_to_string(&path).map_err(|source| ConfigError::SourceRead {
        path: path.clone(),
        source,
    })?;
    let document: serde_yaml::Value =
        serde_yaml::from_str(&text).map_err(|source| ConfigError::SourceParse {
            path: path.clone(),
            source,
        })?;

    match convert(document, &path)? {
        ConfigValue::Map(map) => {
            tracing::debug!(path = %path.display(), entries = map.len(), "loaded config source");
            Ok(Some(map))
        }
        _ => {
            tracing::debug!(path = %path.display(), "source is not a mapping, ignoring");
            Ok(None)
        }
    }
}

/// Convert a generic YAML value into the crate's value model. Sequences
/// become maps keyed by the contiguous indexes `0..n`.
fn convert(value: serde_yaml::Value, path: &Path) -> Result<ConfigValue, ConfigError> {
    Ok(match value {
        serde_yaml::Value::Null => ConfigValue::Null,
        serde_yaml::Value::Bool(b) => ConfigValue::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigValue::Int(i)
            } else {
                ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_yaml::Value::String(s) => ConfigValue::String(s),
        serde_yaml::Value::Sequence(items) => {
            let mut map = ConfigMap::new();
            for (index, item) in items.into_iter().enumerate() {
                map.insert(Key::Index(index as i64), convert(item, path)?);
            }
            ConfigValue::Map(map)
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = ConfigMap::new();
            for (yaml_key, yaml_value) in mapping {
                let key = convert_key(yaml_key, path)?;
                map.insert(key, convert(yaml_value, path)?);
            }
            ConfigValue::Map(map)
        }
        serde_yaml::Value::Tagged(tagged) => convert(tagged.value, path)?,
    })
}

fn convert_key(key: serde_yaml::Value, path: &Path) -> Result<Key, ConfigError> {
    match key {
        serde_yaml::Value::String(name) => Ok(Key::Name(name)),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(index) => Ok(Key::Index(index)),
            None => Err(ConfigError::UnsupportedKey {
                path: path.to_path_buf(),
            }),
        },
        _ => Err(ConfigError::UnsupportedKey {
            path: path.to_path_buf(),
        }),
    }
}
