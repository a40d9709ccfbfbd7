//! Configuration value model and the recursive deep merge.
//!
//! Responsibilities:
//! - Represent configuration data as a tagged variant (`ConfigValue`) over
//!   an insertion-ordered map (`ConfigMap`) keyed by strings or integers.
//! - Implement the deep-merge rules: named keys merge recursively when both
//!   sides are maps and are replaced otherwise; integer keys append under
//!   the next free index instead of overwriting a colliding entry.
//! - Render values back out as `serde_yaml::Value` / `serde_json::Value`.
//!
//! Does NOT handle:
//! - File I/O or YAML parsing (see `source.rs`).
//! - Mode resolution or layering order (see `environment.rs`).
//!
//! Invariants:
//! - `merge` never mutates its operands; it returns a new structure.
//! - Entry order is insertion order; merging preserves the base map's order
//!   and appends new keys at the end.

use std::fmt;

/// A mapping key: positional (integer) or named (string).
///
/// Positional keys are treated as list elements during merging, not as
/// addresses; a colliding index appends rather than overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

/// A configuration value: scalar or nested map.
///
/// Sequences loaded from source files are represented as `Index`-keyed map
/// entries, which is what lets layered lists concatenate under the
/// positional-append rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Map(ConfigMap),
}

impl ConfigValue {
    /// Returns the nested map if this value is a map.
    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the string slice if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this value is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this value is an int.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Render as a generic YAML value. Maps whose keys are the contiguous
    /// indexes `0..n` render as sequences.
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            ConfigValue::Null => serde_yaml::Value::Null,
            ConfigValue::Bool(b) => serde_yaml::Value::Bool(*b),
            ConfigValue::Int(i) => serde_yaml::Value::Number((*i).into()),
            ConfigValue::Float(f) => serde_yaml::Value::Number((*f).into()),
            ConfigValue::String(s) => serde_yaml::Value::String(s.clone()),
            ConfigValue::Map(map) => map.to_yaml(),
        }
    }

    /// Render as a generic JSON value. Integer keys of non-sequence maps
    /// are stringified, since JSON object keys must be strings.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ConfigValue::Null => serde_json::Value::Null,
            ConfigValue::Bool(b) => serde_json::Value::Bool(*b),
            ConfigValue::Int(i) => serde_json::Value::Number((*i).into()),
            ConfigValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ConfigValue::String(s) => serde_json::Value::String(s.clone()),
            ConfigValue::Map(map) => map.to_json(),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

/// An insertion-ordered map of configuration entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigMap {
    entries: Vec<(Key, ConfigValue)>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &Key) -> Option<&ConfigValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a named (string-keyed) entry.
    pub fn get_named(&self, name: &str) -> Option<&ConfigValue> {
        self.get(&Key::Name(name.to_string()))
    }

    /// Look up a positional (integer-keyed) entry.
    pub fn get_index(&self, index: i64) -> Option<&ConfigValue> {
        self.get(&Key::Index(index))
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.get(key).is_some()
    }

    /// Insert an entry. An existing key is replaced in place, keeping its
    /// position; a new key is appended at the end.
    pub fn insert(&mut self, key: Key, value: ConfigValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// The next free positional index: one past the largest existing index,
    /// never below zero.
    fn next_index(&self) -> i64 {
        self.entries
            .iter()
            .filter_map(|(k, _)| match k {
                Key::Index(i) => Some(*i),
                Key::Name(_) => None,
            })
            .max()
            .map(|max| if max < 0 { 0 } else { max + 1 })
            .unwrap_or(0)
    }

    /// Whether every key is the contiguous index sequence `0..n`, i.e. the
    /// map is a faithful list representation.
    fn is_sequence(&self) -> bool {
        !self.entries.is_empty()
            && self
                .entries
                .iter()
                .enumerate()
                .all(|(i, (k, _))| matches!(k, Key::Index(n) if *n == i as i64))
    }

    /// Deep-merge `overlay` on top of `self`, producing a new map. Neither
    /// operand is mutated.
    ///
    /// Rules, applied per overlay entry in iteration order:
    /// - positional key already present: append the value under the next
    ///   free index; absent: insert at that index.
    /// - named key where both sides hold maps: merge recursively.
    /// - anything else: the overlay value wins.
    pub fn merge(&self, overlay: &ConfigMap) -> ConfigMap {
        let mut result = self.clone();
        for (key, value) in overlay.iter() {
            match key {
                Key::Index(_) => {
                    if result.contains_key(key) {
                        let next = result.next_index();
                        result.insert(Key::Index(next), value.clone());
                    } else {
                        result.insert(key.clone(), value.clone());
                    }
                }
                Key::Name(_) => {
                    let nested = match (result.get(key), value) {
                        (Some(ConfigValue::Map(base)), ConfigValue::Map(over)) => {
                            Some(base.merge(over))
                        }
                        _ => None,
                    };
                    match nested {
                        Some(merged) => result.insert(key.clone(), ConfigValue::Map(merged)),
                        None => result.insert(key.clone(), value.clone()),
                    }
                }
            }
        }
        result
    }

    /// Merge any number of maps by left-folding pairwise in argument order.
    pub fn merge_all<'a>(maps: impl IntoIterator<Item = &'a ConfigMap>) -> ConfigMap {
        maps.into_iter()
            .fold(ConfigMap::new(), |acc, next| acc.merge(next))
    }

    /// Render as a generic YAML value (sequence or mapping).
    pub fn to_yaml(&self) -> serde_yaml::Value {
        if self.is_sequence() {
            serde_yaml::Value::Sequence(self.entries.iter().map(|(_, v)| v.to_yaml()).collect())
        } else {
            let mut mapping = serde_yaml::Mapping::with_capacity(self.entries.len());
            for (key, value) in &self.entries {
                let yaml_key = match key {
                    Key::Index(i) => serde_yaml::Value::Number((*i).into()),
                    Key::Name(name) => serde_yaml::Value::String(name.clone()),
                };
                mapping.insert(yaml_key, value.to_yaml());
            }
            serde_yaml::Value::Mapping(mapping)
        }
    }

    /// Render as a generic JSON value (array or object).
    pub fn to_json(&self) -> serde_json::Value {
        if self.is_sequence() {
            serde_json::Value::Array(self.entries.iter().map(|(_, v)| v.to_json()).collect())
        } else {
            let mut object = serde_json::Map::with_capacity(self.entries.len());
            for (key, value) in &self.entries {
                object.insert(key.to_string(), value.to_json());
            }
            serde_json::Value::Object(object)
        }
    }
}

impl FromIterator<(Key, ConfigValue)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (Key, ConfigValue)>>(iter: I) -> Self {
        let mut map = ConfigMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
