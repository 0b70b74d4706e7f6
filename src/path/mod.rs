//! Paths into a document tree.
//!
//! A path is an ordered list of segments. Each segment is a string key, an
//! integer index, or an arbitrary scalar key:
//!
//! - `"name"` - key into a string-keyed object (or a string key of a map)
//! - `1` - index into an array (or an integer key of a map)
//! - `true`, `Key::Null`, ... - scalar key into a map
//!
//! Paths are built with the [`path!`](crate::path!) macro or parsed from text:
//!
//! ```
//! use dmap::path;
//! use dmap::path::{Path, PathSegment};
//!
//! let built = path!["root", "contents", 1];
//! let parsed: Path = "$.root.contents[1]".parse().unwrap();
//! assert_eq!(parsed.segments(), built.as_slice());
//! assert_eq!(built[2], PathSegment::Index(1));
//! ```

pub mod ast;
pub mod parser;

pub use ast::{Path, PathSegment};
pub use parser::Parser;

/// Builds a `Vec<PathSegment>` from mixed keys and indices.
///
/// ```
/// use dmap::{path, PathSegment};
///
/// let p = path!["a", 0, true];
/// assert_eq!(p.len(), 3);
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::PathSegment>::new()
    };
    ($($segment:expr),+ $(,)?) => {
        ::std::vec![$($crate::PathSegment::from($segment)),+]
    };
}
