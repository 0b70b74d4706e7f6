//! Decoding JSON and YAML into [`Value`] trees.
//!
//! Decoding is delegated to `serde_json` and `serde_yaml`; this module only
//! converts their value types into ours. Decoder errors are passed through
//! unchanged inside [`DmapError::Json`] / [`DmapError::Yaml`].
//!
//! # Example
//!
//! ```
//! use dmap::document::parser::{parse_slice, Format};
//! use dmap::document::node::{Key, Value};
//!
//! let value = parse_slice(br#"{"name": "Alice"}"#, Format::Json).unwrap();
//! assert!(value.is_object());
//!
//! let value = parse_slice(b"200: ok\n404: missing\n", Format::Yaml).unwrap();
//! assert_eq!(value.as_map().unwrap()[&Key::Integer(404)], Value::from("missing"));
//! ```

use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use super::node::{Key, Number, Value};
use crate::error::{DmapError, Result};

/// Input text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Guesses the format from a file name, ignoring a trailing `.gz`.
    ///
    /// `.yaml` and `.yml` are YAML; everything else is JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let name = path.as_ref().to_string_lossy();
        let base = name.strip_suffix(".gz").unwrap_or(&name);

        if base.ends_with(".yaml") || base.ends_with(".yml") {
            Format::Yaml
        } else {
            Format::Json
        }
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(format!("unknown format '{}'", other)),
        }
    }
}

/// Decodes a complete buffer.
pub fn parse_slice(bytes: &[u8], format: Format) -> Result<Value> {
    debug!("decoding {} bytes as {:?}", bytes.len(), format);
    match format {
        Format::Json => parse_json_slice(bytes),
        Format::Yaml => parse_yaml_slice(bytes),
    }
}

/// Decodes from a reader.
pub fn parse_reader<R: Read>(reader: R, format: Format) -> Result<Value> {
    debug!("decoding stream as {:?}", format);
    match format {
        Format::Json => parse_json_reader(reader),
        Format::Yaml => parse_yaml_reader(reader),
    }
}

/// Decodes a JSON buffer. Trailing content after the value is an error.
pub fn parse_json_slice(bytes: &[u8]) -> Result<Value> {
    let value: JsonValue = serde_json::from_slice(bytes)?;
    Ok(Value::from(value))
}

/// Decodes the first JSON value from a reader.
///
/// Reading stops after the first complete value; anything that follows it in
/// the stream is left unread.
pub fn parse_json_reader<R: Read>(reader: R) -> Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    let value = JsonValue::deserialize(&mut deserializer)?;
    Ok(Value::from(value))
}

/// Decodes a single YAML document from a buffer.
pub fn parse_yaml_slice(bytes: &[u8]) -> Result<Value> {
    let value: YamlValue = serde_yaml::from_slice(bytes)?;
    Value::try_from(value)
}

/// Decodes a single YAML document from a reader.
pub fn parse_yaml_reader<R: Read>(reader: R) -> Result<Value> {
    let value: YamlValue = serde_yaml::from_reader(reader)?;
    Value::try_from(value)
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Number(Number::Integer(i)),
                None => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Number {
    match n.as_i64() {
        Some(i) => Number::Integer(i),
        None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn yaml_key(value: YamlValue) -> Result<Key> {
    match value {
        YamlValue::Null => Ok(Key::Null),
        YamlValue::Bool(b) => Ok(Key::Bool(b)),
        YamlValue::Number(n) => Ok(match yaml_number(&n) {
            Number::Integer(i) => Key::Integer(i),
            Number::Float(f) => Key::Float(f),
        }),
        YamlValue::String(s) => Ok(Key::String(s)),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value),
        YamlValue::Sequence(_) => Err(DmapError::UnsupportedKey { kind: "sequence" }),
        YamlValue::Mapping(_) => Err(DmapError::UnsupportedKey { kind: "mapping" }),
    }
}

/// Converts a YAML value.
///
/// A mapping whose keys are all strings becomes a [`Value::Object`]; a mapping
/// with any other scalar key becomes a [`Value::Map`]. Tags are dropped.
impl TryFrom<YamlValue> for Value {
    type Error = DmapError;

    fn try_from(value: YamlValue) -> Result<Self> {
        Ok(match value {
            YamlValue::Null => Value::Null,
            YamlValue::Bool(b) => Value::Bool(b),
            YamlValue::Number(n) => Value::Number(yaml_number(&n)),
            YamlValue::String(s) => Value::String(s),
            YamlValue::Sequence(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            YamlValue::Mapping(mapping) => {
                let mut entries = IndexMap::with_capacity(mapping.len());
                for (k, v) in mapping {
                    entries.insert(yaml_key(k)?, Value::try_from(v)?);
                }

                if entries.keys().all(|k| matches!(k, Key::String(_))) {
                    Value::Object(
                        entries
                            .into_iter()
                            .filter_map(|(k, v)| match k {
                                Key::String(s) => Some((s, v)),
                                _ => None,
                            })
                            .collect(),
                    )
                } else {
                    Value::Map(entries)
                }
            }
            YamlValue::Tagged(tagged) => Value::try_from(tagged.value)?,
        })
    }
}
