//! Path-based access to a document tree.
//!
//! [`Dmap`] owns a decoded [`Value`] and resolves paths of mixed keys and
//! indices against it. Resolution walks one segment at a time, dispatching on
//! the shape of the current value in a fixed order:
//!
//! 1. string-keyed object: the segment must be a string key
//! 2. scalar-keyed map: the segment is converted to a [`Key`] and looked up
//! 3. array: the segment must be an integer index within bounds
//!
//! Any other value ends descent with [`DmapError::UnexpectedType`]. Errors carry
//! the path prefix up to and including the failing segment.
//!
//! Reads hand out borrowed views ([`NodeRef`], `&IndexMap`, `&[Value]`); the
//! `_mut` accessors hand out mutable borrows, so the tree can be edited in place
//! but never outlived by a handle into it.
//!
//! # Example
//!
//! ```
//! use dmap::{path, Dmap, DmapError, Value};
//!
//! let mut dmap = Dmap::from_json_slice(
//!     br#"{"root": {"title": "example json", "contents": ["c1", "c2", "c3"]}}"#,
//! ).unwrap();
//!
//! let title = dmap.get(path!["root", "title"]).unwrap();
//! assert_eq!(title.value(), &Value::from("example json"));
//! assert!(!dmap.exists(path!["missing"]));
//!
//! dmap.set_object("now exists", "missing", path![]).unwrap();
//! assert!(dmap.exists(path!["missing"]));
//!
//! assert!(matches!(
//!     dmap.get(path!["root", "contents", 5]),
//!     Err(DmapError::IndexOutOfRange { index: 5, .. })
//! ));
//! ```

use std::io::Read;

use indexmap::IndexMap;
use log::trace;

use super::node::{Key, Value};
use super::parser::{self, Format};
use crate::error::{DmapError, Result};
use crate::path::{Path, PathSegment};

fn key_not_found(segment: &PathSegment, prefix: &[PathSegment]) -> DmapError {
    DmapError::KeyNotFound {
        key: segment.clone(),
        path: Path::from(prefix),
    }
}

fn object_key<'p>(segment: &'p PathSegment, prefix: &[PathSegment]) -> Result<&'p str> {
    match segment {
        PathSegment::Key(name) | PathSegment::Scalar(Key::String(name)) => Ok(name.as_str()),
        other => Err(DmapError::ExpectedKey {
            segment: other.clone(),
            kind: other.kind(),
            path: Path::from(prefix),
        }),
    }
}

fn array_index(segment: &PathSegment, len: usize, prefix: &[PathSegment]) -> Result<usize> {
    let index = match segment {
        PathSegment::Index(index) | PathSegment::Scalar(Key::Integer(index)) => *index,
        other => {
            return Err(DmapError::ExpectedIndex {
                segment: other.clone(),
                kind: other.kind(),
                path: Path::from(prefix),
            })
        }
    };

    checked_index(index, len).ok_or_else(|| DmapError::IndexOutOfRange {
        index,
        path: Path::from(prefix),
    })
}

/// Converts `index` to a position in `0..len`.
fn checked_index(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

/// Resolves one segment. `prefix` ends with `segment`.
fn step<'a>(current: &'a Value, segment: &PathSegment, prefix: &[PathSegment]) -> Result<&'a Value> {
    match current {
        Value::Object(fields) => {
            let name = object_key(segment, prefix)?;
            fields
                .get(name)
                .ok_or_else(|| key_not_found(segment, prefix))
        }
        Value::Map(entries) => entries
            .get(&segment.to_key())
            .ok_or_else(|| key_not_found(segment, prefix)),
        Value::Array(items) => Ok(&items[array_index(segment, items.len(), prefix)?]),
        _ => Err(DmapError::UnexpectedType {
            path: Path::from(prefix),
        }),
    }
}

fn step_mut<'a>(
    current: &'a mut Value,
    segment: &PathSegment,
    prefix: &[PathSegment],
) -> Result<&'a mut Value> {
    match current {
        Value::Object(fields) => {
            let name = object_key(segment, prefix)?;
            fields
                .get_mut(name)
                .ok_or_else(|| key_not_found(segment, prefix))
        }
        Value::Map(entries) => entries
            .get_mut(&segment.to_key())
            .ok_or_else(|| key_not_found(segment, prefix)),
        Value::Array(items) => {
            let index = array_index(segment, items.len(), prefix)?;
            Ok(&mut items[index])
        }
        _ => Err(DmapError::UnexpectedType {
            path: Path::from(prefix),
        }),
    }
}

fn resolve<'a>(root: &'a Value, path: &[PathSegment]) -> Result<&'a Value> {
    if root.is_null() && !path.is_empty() {
        return Err(DmapError::EmptyData);
    }

    let mut current = root;
    for (i, segment) in path.iter().enumerate() {
        current = step(current, segment, &path[..=i])?;
    }
    Ok(current)
}

fn resolve_mut<'a>(root: &'a mut Value, path: &[PathSegment]) -> Result<&'a mut Value> {
    if root.is_null() && !path.is_empty() {
        return Err(DmapError::EmptyData);
    }

    let mut current = root;
    for (i, segment) in path.iter().enumerate() {
        current = step_mut(current, segment, &path[..=i])?;
    }
    Ok(current)
}

fn traced<T>(result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        trace!("path resolution failed: {}", err);
    }
    result
}

fn mismatch(expected: &'static str, value: &Value, path: &[PathSegment]) -> DmapError {
    DmapError::TypeMismatch {
        expected,
        found: value.kind(),
        path: Path::from(path),
    }
}

/// A borrowed view of one value inside a document.
///
/// Every successful [`get`](NodeRef::get) yields a new view over the resolved
/// value. Views are cheap to copy and cannot outlive the [`Dmap`] they borrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRef<'a> {
    value: &'a Value,
}

impl<'a> NodeRef<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Returns the viewed value.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Returns true if the viewed value is not null.
    pub fn has_value(&self) -> bool {
        !self.value.is_null()
    }

    /// Resolves `path` relative to this view.
    ///
    /// An empty path returns a view over the same value. A non-empty path on a
    /// null value fails with [`DmapError::EmptyData`].
    pub fn get<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<NodeRef<'a>> {
        traced(resolve(self.value, path.as_ref())).map(NodeRef::new)
    }

    /// Returns true if `path` resolves.
    pub fn exists<P: AsRef<[PathSegment]>>(&self, path: P) -> bool {
        resolve(self.value, path.as_ref()).is_ok()
    }

    /// Resolves `path` and views the result as a string-keyed object.
    pub fn get_object<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<&'a IndexMap<String, Value>> {
        let path = path.as_ref();
        self.get(path)?
            .value
            .as_object()
            .ok_or_else(|| DmapError::NotObject { path: Path::from(path) })
    }

    /// Resolves `path` and views the result as a scalar-keyed map.
    pub fn get_map<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<&'a IndexMap<Key, Value>> {
        let path = path.as_ref();
        self.get(path)?
            .value
            .as_map()
            .ok_or_else(|| DmapError::NotMap { path: Path::from(path) })
    }

    /// Resolves `path` and views the result as an array.
    pub fn get_array<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<&'a [Value]> {
        let path = path.as_ref();
        self.get(path)?
            .value
            .as_array()
            .ok_or_else(|| DmapError::NotArray { path: Path::from(path) })
    }

    pub fn get_str<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<&'a str> {
        let path = path.as_ref();
        let value = self.get(path)?.value;
        value.as_str().ok_or_else(|| mismatch("string", value, path))
    }

    /// Floats are rejected rather than truncated.
    pub fn get_i64<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<i64> {
        let path = path.as_ref();
        let value = self.get(path)?.value;
        value.as_i64().ok_or_else(|| mismatch("integer", value, path))
    }

    /// Integers are widened.
    pub fn get_f64<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<f64> {
        let path = path.as_ref();
        let value = self.get(path)?.value;
        value.as_f64().ok_or_else(|| mismatch("number", value, path))
    }

    pub fn get_bool<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<bool> {
        let path = path.as_ref();
        let value = self.get(path)?.value;
        value.as_bool().ok_or_else(|| mismatch("bool", value, path))
    }
}

/// An owned document with path-based accessors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dmap {
    data: Value,
}

impl From<Value> for Dmap {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl Dmap {
    /// Wraps a value as-is.
    ///
    /// # Example
    ///
    /// ```
    /// use dmap::{Dmap, Value};
    ///
    /// assert!(Dmap::new(Value::from(1)).has_value());
    /// assert!(!Dmap::new(Value::Null).has_value());
    /// ```
    pub fn new(value: impl Into<Value>) -> Self {
        Self { data: value.into() }
    }

    /// Decodes a complete buffer in the given format.
    pub fn from_slice(bytes: &[u8], format: Format) -> Result<Self> {
        parser::parse_slice(bytes, format).map(Self::new)
    }

    /// Decodes from a reader in the given format.
    pub fn from_reader<R: Read>(reader: R, format: Format) -> Result<Self> {
        parser::parse_reader(reader, format).map(Self::new)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        parser::parse_json_slice(bytes).map(Self::new)
    }

    /// Decodes the first JSON value in the stream.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        parser::parse_json_reader(reader).map(Self::new)
    }

    pub fn from_yaml_slice(bytes: &[u8]) -> Result<Self> {
        parser::parse_yaml_slice(bytes).map(Self::new)
    }

    pub fn from_yaml_reader<R: Read>(reader: R) -> Result<Self> {
        parser::parse_yaml_reader(reader).map(Self::new)
    }

    /// Returns the root value.
    pub fn value(&self) -> &Value {
        &self.data
    }

    /// Returns the root value mutably.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.data
    }

    pub fn into_value(self) -> Value {
        self.data
    }

    /// Returns true if the root is not null.
    pub fn has_value(&self) -> bool {
        !self.data.is_null()
    }

    /// Returns a view over the root.
    pub fn as_node(&self) -> NodeRef<'_> {
        NodeRef::new(&self.data)
    }

    /// Resolves `path` and returns a view over the value found there.
    ///
    /// # Errors
    ///
    /// - [`DmapError::EmptyData`] if the root is null and `path` is not empty
    /// - [`DmapError::ExpectedKey`] if an object is reached with a non-string segment
    /// - [`DmapError::KeyNotFound`] if an object or map lacks the key
    /// - [`DmapError::ExpectedIndex`] if an array is reached with a non-integer segment
    /// - [`DmapError::IndexOutOfRange`] if an array index is negative or too large
    /// - [`DmapError::UnexpectedType`] if a scalar is reached with segments left
    pub fn get<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<NodeRef<'_>> {
        self.as_node().get(path)
    }

    /// Resolves `path` and returns the value found there mutably.
    ///
    /// Uses the same rules and errors as [`get`](Dmap::get). The value can be
    /// replaced in place; nothing is created.
    pub fn get_mut<P: AsRef<[PathSegment]>>(&mut self, path: P) -> Result<&mut Value> {
        traced(resolve_mut(&mut self.data, path.as_ref()))
    }

    /// Returns true if `path` resolves. The reason for a failure is discarded.
    pub fn exists<P: AsRef<[PathSegment]>>(&self, path: P) -> bool {
        self.as_node().exists(path)
    }

    pub fn get_object<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<&IndexMap<String, Value>> {
        self.as_node().get_object(path)
    }

    pub fn get_map<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<&IndexMap<Key, Value>> {
        self.as_node().get_map(path)
    }

    pub fn get_array<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<&[Value]> {
        self.as_node().get_array(path)
    }

    pub fn get_str<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<&str> {
        self.as_node().get_str(path)
    }

    pub fn get_i64<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<i64> {
        self.as_node().get_i64(path)
    }

    pub fn get_f64<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<f64> {
        self.as_node().get_f64(path)
    }

    pub fn get_bool<P: AsRef<[PathSegment]>>(&self, path: P) -> Result<bool> {
        self.as_node().get_bool(path)
    }

    /// Resolves `path` to a string-keyed object that can be edited in place.
    pub fn get_object_mut<P: AsRef<[PathSegment]>>(
        &mut self,
        path: P,
    ) -> Result<&mut IndexMap<String, Value>> {
        let path = path.as_ref();
        self.get_mut(path)?
            .as_object_mut()
            .ok_or_else(|| DmapError::NotObject { path: Path::from(path) })
    }

    /// Resolves `path` to a scalar-keyed map that can be edited in place.
    pub fn get_map_mut<P: AsRef<[PathSegment]>>(&mut self, path: P) -> Result<&mut IndexMap<Key, Value>> {
        let path = path.as_ref();
        self.get_mut(path)?
            .as_map_mut()
            .ok_or_else(|| DmapError::NotMap { path: Path::from(path) })
    }

    /// Resolves `path` to an array whose elements can be replaced in place.
    ///
    /// The slice cannot grow or shrink.
    pub fn get_array_mut<P: AsRef<[PathSegment]>>(&mut self, path: P) -> Result<&mut [Value]> {
        let path = path.as_ref();
        self.get_mut(path)?
            .as_array_mut()
            .ok_or_else(|| DmapError::NotArray { path: Path::from(path) })
    }

    /// Inserts or overwrites `key` in the object at `path`.
    ///
    /// This is the only place a new entry can appear, and only inside an
    /// object that already exists.
    pub fn set_object<P: AsRef<[PathSegment]>>(
        &mut self,
        value: impl Into<Value>,
        key: impl Into<String>,
        path: P,
    ) -> Result<()> {
        let parent = self.get_object_mut(path)?;
        parent.insert(key.into(), value.into());
        Ok(())
    }

    /// Inserts or overwrites `key` in the scalar-keyed map at `path`.
    pub fn set_map<P: AsRef<[PathSegment]>>(
        &mut self,
        value: impl Into<Value>,
        key: impl Into<Key>,
        path: P,
    ) -> Result<()> {
        let parent = self.get_map_mut(path)?;
        parent.insert(key.into(), value.into());
        Ok(())
    }

    /// Replaces the element at `index` of the array at `path`.
    ///
    /// # Errors
    ///
    /// Fails with [`DmapError::IndexOutOfRange`] carrying `path` (the array's
    /// own path) if `index` is not an existing position. Arrays never grow.
    pub fn set_array<P: AsRef<[PathSegment]>>(
        &mut self,
        value: impl Into<Value>,
        index: i64,
        path: P,
    ) -> Result<()> {
        let path = path.as_ref();
        let parent = self.get_array_mut(path)?;
        let position = checked_index(index, parent.len()).ok_or_else(|| DmapError::IndexOutOfRange {
            index,
            path: Path::from(path),
        })?;
        parent[position] = value.into();
        Ok(())
    }
}
