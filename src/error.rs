//! Error types for decoding, path parsing, and tree access.

use thiserror::Error;

use crate::path::{Path, PathSegment};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DmapError>;

/// Errors produced while decoding documents and resolving paths against them.
///
/// Every access error carries the path prefix consumed up to and including the
/// step that failed, so the caller can see exactly where resolution broke.
#[derive(Debug, Error)]
pub enum DmapError {
    /// A non-empty path was resolved against a null root.
    #[error("empty data")]
    EmptyData,

    /// A string-keyed object was reached with a segment that is not a string.
    #[error("expected key, got {segment} of type {kind} at path {path}")]
    ExpectedKey {
        /// The offending segment.
        segment: PathSegment,
        /// Type name of the offending segment.
        kind: &'static str,
        /// Path prefix up to and including the failing step.
        path: Path,
    },

    /// Lookup miss in an object or a scalar-keyed map.
    #[error("key {key} not found at path {path}")]
    KeyNotFound {
        /// The key that was looked up.
        key: PathSegment,
        /// Path prefix up to and including the failing step.
        path: Path,
    },

    /// An array was reached with a segment that is not an integer index.
    #[error("expected index, got {segment} of type {kind} at path {path}")]
    ExpectedIndex {
        /// The offending segment.
        segment: PathSegment,
        /// Type name of the offending segment.
        kind: &'static str,
        /// Path prefix up to and including the failing step.
        path: Path,
    },

    /// Array index is negative or past the end.
    #[error("index {index} out of range at path {path}")]
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// Path prefix for traversal, or the parent path for assignment.
        path: Path,
    },

    /// Descent was attempted through a value that is not a container.
    #[error("data at {path} is not a map or array")]
    UnexpectedType {
        /// Path prefix up to and including the failing step.
        path: Path,
    },

    /// The resolved value is not a string-keyed object.
    #[error("data at {path} is not a string-keyed object")]
    NotObject {
        /// The resolved path.
        path: Path,
    },

    /// The resolved value is not a scalar-keyed map.
    #[error("data at {path} is not a scalar-keyed map")]
    NotMap {
        /// The resolved path.
        path: Path,
    },

    /// The resolved value is not an array.
    #[error("data at {path} is not an array")]
    NotArray {
        /// The resolved path.
        path: Path,
    },

    /// The resolved value is a scalar of the wrong type.
    #[error("data at {path} is {found}, expected {expected}")]
    TypeMismatch {
        /// Requested type name.
        expected: &'static str,
        /// Actual type name.
        found: &'static str,
        /// The resolved path.
        path: Path,
    },

    /// A YAML mapping key is itself a container.
    #[error("unsupported {kind} used as a mapping key")]
    UnsupportedKey {
        /// Type name of the rejected key.
        kind: &'static str,
    },

    /// Textual path could not be parsed.
    #[error("invalid path {input:?} at position {position}: {reason}")]
    InvalidPath {
        /// The full input text.
        input: String,
        /// Character offset of the failure.
        position: usize,
        /// What went wrong.
        reason: String,
    },

    /// JSON decoder failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML decoder failure.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
