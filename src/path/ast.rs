//! Path segments and owned paths.

use std::fmt;

use crate::document::node::Key;

/// One step of a path.
///
/// `Key` addresses string-keyed objects, `Index` addresses arrays, and
/// `Scalar` addresses scalar-keyed maps by a non-string key. Maps accept all
/// three: a `Key` looks up a string key and an `Index` looks up an integer key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named key (`.name` or `['name']`)
    Key(String),
    /// Array index (`[0]`, `[-1]`)
    Index(i64),
    /// Arbitrary scalar key
    Scalar(Key),
}

impl PathSegment {
    /// Returns the type name of this segment as reported in errors.
    pub fn kind(&self) -> &'static str {
        match self {
            PathSegment::Key(_) => "string",
            PathSegment::Index(_) => "integer",
            PathSegment::Scalar(key) => key.kind(),
        }
    }

    /// Returns the map key this segment looks up.
    pub fn to_key(&self) -> Key {
        match self {
            PathSegment::Key(name) => Key::String(name.clone()),
            PathSegment::Index(index) => Key::Integer(*index),
            PathSegment::Scalar(key) => key.clone(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(index) => write!(f, "{}", index),
            PathSegment::Scalar(key) => write!(f, "{}", key),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Key(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Key(name)
    }
}

impl From<&String> for PathSegment {
    fn from(name: &String) -> Self {
        PathSegment::Key(name.clone())
    }
}

impl From<i64> for PathSegment {
    fn from(index: i64) -> Self {
        PathSegment::Index(index)
    }
}

impl From<i32> for PathSegment {
    fn from(index: i32) -> Self {
        PathSegment::Index(i64::from(index))
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<bool> for PathSegment {
    fn from(b: bool) -> Self {
        PathSegment::Scalar(Key::Bool(b))
    }
}

/// A string key stays a `Key` segment and an integer key stays an `Index`
/// segment, so both behave the same way against objects and arrays.
impl From<Key> for PathSegment {
    fn from(key: Key) -> Self {
        match key {
            Key::String(name) => PathSegment::Key(name),
            Key::Integer(index) => PathSegment::Index(index),
            other => PathSegment::Scalar(other),
        }
    }
}

/// An owned path, as carried by errors and produced by the textual parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn into_segments(self) -> Vec<PathSegment> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }
}

impl From<&[PathSegment]> for Path {
    fn from(segments: &[PathSegment]) -> Self {
        Self(segments.to_vec())
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl AsRef<[PathSegment]> for Path {
    fn as_ref(&self) -> &[PathSegment] {
        &self.0
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '-')
        && !name.starts_with('-')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    write!(f, "['")?;
    for ch in name.chars() {
        match ch {
            '\'' => write!(f, "\\'")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            other => write!(f, "{}", other)?,
        }
    }
    write!(f, "']")
}

/// Renders as `$`, `$.root.contents[1]`, `$['a b']`, `$[true]`.
///
/// Key and index segments render in the syntax the path parser accepts.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(name) | PathSegment::Scalar(Key::String(name)) => {
                    if is_identifier(name) {
                        write!(f, ".{}", name)?;
                    } else {
                        write_quoted(f, name)?;
                    }
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Scalar(key) => write!(f, "[{}]", key)?,
            }
        }
        Ok(())
    }
}
