//! dmap - path-based access to decoded JSON and YAML documents.
//!
//! A document is decoded into a tree of [`Value`]s and wrapped in a [`Dmap`].
//! Paths of mixed string keys and integer indices are resolved against the
//! tree to read values, and to write values into containers that already exist.
//!
//! ```
//! use dmap::{path, Dmap, Value};
//!
//! let mut dmap = Dmap::from_json_slice(br#"{"root": {"contents": ["c1", "c2", "c3"]}}"#).unwrap();
//! assert_eq!(dmap.get_str(path!["root", "contents", 1]).unwrap(), "c2");
//!
//! dmap.get_array_mut(path!["root", "contents"]).unwrap()[1] = Value::from("changed");
//! assert_eq!(dmap.get_str(path!["root", "contents", 1]).unwrap(), "changed");
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod file;
pub mod path;

pub use document::node::{Key, Number, Value};
pub use document::parser::Format;
pub use document::tree::{Dmap, NodeRef};
pub use error::{DmapError, Result};
pub use path::{Path, PathSegment};
