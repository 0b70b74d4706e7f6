//! Dynamic value representation.
//!
//! This module provides the closed set of shapes a decoded document can take.
//! Every JSON or YAML input is decoded into a tree of [`Value`]s: scalars at the
//! leaves and three kinds of containers above them.
//!
//! # Example
//!
//! ```
//! use dmap::document::node::{Key, Number, Value};
//! use indexmap::IndexMap;
//!
//! let mut object = IndexMap::new();
//! object.insert("name".to_string(), Value::from("dmap"));
//! object.insert("version".to_string(), Value::from(1));
//! let value = Value::Object(object);
//! assert!(value.is_container());
//!
//! let mut map = IndexMap::new();
//! map.insert(Key::Integer(200), Value::from("ok"));
//! let value = Value::Map(map);
//! assert_eq!(value.kind(), "map");
//! assert_eq!(Value::Number(Number::Float(1.5)).as_f64(), Some(1.5));
//! ```

use indexmap::IndexMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A number, kept as an integer whenever the source allows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(_) => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

/// A hashable scalar used as the key of a [`Value::Map`].
///
/// Float keys compare and hash by their bit pattern, so `NaN` is a usable key
/// and `0.0` and `-0.0` are distinct keys.
#[derive(Debug, Clone)]
pub enum Key {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Null, Key::Null) => true,
            (Key::Bool(a), Key::Bool(b)) => a == b,
            (Key::Integer(a), Key::Integer(b)) => a == b,
            (Key::Float(a), Key::Float(b)) => a.to_bits() == b.to_bits(),
            (Key::String(a), Key::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Key::Null => {}
            Key::Bool(b) => b.hash(state),
            Key::Integer(i) => i.hash(state),
            Key::Float(f) => f.to_bits().hash(state),
            Key::String(s) => s.hash(state),
        }
    }
}

impl Key {
    /// Returns the type name of this key.
    pub fn kind(&self) -> &'static str {
        match self {
            Key::Null => "null",
            Key::Bool(_) => "bool",
            Key::Integer(_) => "integer",
            Key::Float(_) => "float",
            Key::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => write!(f, "null"),
            Key::Bool(b) => write!(f, "{}", b),
            Key::Integer(i) => write!(f, "{}", i),
            Key::Float(fl) => write!(f, "{:?}", fl),
            Key::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Integer(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Integer(i64::from(i))
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<f64> for Key {
    fn from(f: f64) -> Self {
        Key::Float(f)
    }
}

/// A decoded document value.
///
/// Objects, maps, and arrays are the three container shapes. Objects are keyed
/// by strings (the shape JSON objects decode to), maps are keyed by arbitrary
/// scalars (YAML mappings with non-string keys), and arrays are indexed by
/// position.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absent value
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Mapping keyed by strings
    Object(IndexMap<String, Value>),
    /// Mapping keyed by arbitrary scalars
    Map(IndexMap<Key, Value>),
    /// Ordered sequence
    Array(Vec<Value>),
}

impl Value {
    /// Returns the type name of this value.
    ///
    /// # Example
    ///
    /// ```
    /// use dmap::document::node::Value;
    ///
    /// assert_eq!(Value::Null.kind(), "null");
    /// assert_eq!(Value::from(3).kind(), "integer");
    /// assert_eq!(Value::Array(vec![]).kind(), "array");
    /// ```
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(Number::Integer(_)) => "integer",
            Value::Number(Number::Float(_)) => "float",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Map(_) => "map",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this value is an object, map, or array.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Map(_) | Value::Array(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an integer. Floats are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<Key, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut IndexMap<Key, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the elements of an array as a mutable slice.
    ///
    /// Elements can be replaced in place but the array cannot grow or shrink.
    pub fn as_array_mut(&mut self) -> Option<&mut [Value]> {
        match self {
            Value::Array(items) => Some(items.as_mut_slice()),
            _ => None,
        }
    }
}

/// Compact, human-readable rendering.
///
/// Strings are quoted, object keys are quoted, map keys are rendered as
/// scalars. This is for display only and makes no round-trip promise.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Object(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match key {
                        Key::String(s) => write!(f, "{:?}: {}", s, value)?,
                        other => write!(f, "{}: {}", other, value)?,
                    }
                }
                write!(f, "}}")
            }
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::Integer(i64::from(i)))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Number(Number::Integer(i64::from(i)))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Value::Object(fields)
    }
}

impl From<IndexMap<Key, Value>> for Value {
    fn from(entries: IndexMap<Key, Value>) -> Self {
        Value::Map(entries)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Null => Value::Null,
            Key::Bool(b) => Value::Bool(b),
            Key::Integer(i) => Value::Number(Number::Integer(i)),
            Key::Float(f) => Value::Number(Number::Float(f)),
            Key::String(s) => Value::String(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_number_display() {
        assert_eq!(format!("{}", Number::Integer(42)), "42");
        assert_eq!(format!("{}", Number::Float(42.5)), "42.5");
    }

    #[test]
    fn test_number_conversions() {
        assert_eq!(Number::Integer(3).as_f64(), 3.0);
        assert_eq!(Number::Float(3.5).as_i64(), None);
        assert!(Number::Integer(1).is_integer());
        assert!(Number::Float(1.0).is_float());
    }

    #[test]
    fn test_float_keys_compare_by_bits() {
        assert_eq!(Key::Float(f64::NAN), Key::Float(f64::NAN));
        assert_ne!(Key::Float(0.0), Key::Float(-0.0));

        let mut keys = HashSet::new();
        keys.insert(Key::Float(1.5));
        assert!(keys.contains(&Key::Float(1.5)));
    }

    #[test]
    fn test_float_key_display_keeps_fraction() {
        assert_eq!(Key::Float(1.0).to_string(), "1.0");
        assert_eq!(Key::Float(1.5).to_string(), "1.5");
        assert_eq!(Key::Integer(1).to_string(), "1");
    }

    #[test]
    fn test_keys_of_different_kinds_differ() {
        assert_ne!(Key::Integer(1), Key::Float(1.0));
        assert_ne!(Key::String("1".to_string()), Key::Integer(1));
        assert_ne!(Key::Null, Key::Bool(false));
    }

    #[test]
    fn test_value_kind_names() {
        assert_eq!(Value::Bool(true).kind(), "bool");
        assert_eq!(Value::from(1.5).kind(), "float");
        assert_eq!(Value::from("x").kind(), "string");
        assert_eq!(Value::Object(IndexMap::new()).kind(), "object");
        assert_eq!(Value::Map(IndexMap::new()).kind(), "map");
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(7).as_i64(), Some(7));
        assert_eq!(Value::from(7).as_f64(), Some(7.0));
        assert_eq!(Value::from(7.5).as_i64(), None);
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert!(Value::default().is_null());
    }

    #[test]
    fn test_array_mut_replaces_in_place() {
        let mut value = Value::from(vec![Value::from(1), Value::from(2)]);
        if let Some(items) = value.as_array_mut() {
            items[1] = Value::from("two");
        }
        assert_eq!(value.as_array().map(|a| a[1].clone()), Some(Value::from("two")));
    }

    #[test]
    fn test_display_nested() {
        let mut fields = IndexMap::new();
        fields.insert("a".to_string(), Value::from(vec![Value::from(1), Value::Null]));
        fields.insert("b".to_string(), Value::from("x"));
        assert_eq!(Value::Object(fields).to_string(), r#"{"a": [1, null], "b": "x"}"#);

        let mut entries = IndexMap::new();
        entries.insert(Key::Integer(1), Value::from(true));
        entries.insert(Key::from("k"), Value::from(2.5));
        assert_eq!(Value::Map(entries).to_string(), r#"{1: true, "k": 2.5}"#);
    }

    #[test]
    fn test_key_into_value() {
        assert_eq!(Value::from(Key::Integer(4)), Value::from(4));
        assert_eq!(Value::from(Key::Null), Value::Null);
        assert_eq!(Value::from(Key::from("s")), Value::from("s"));
    }
}
