//! Reading documents from disk or stdin.
//!
//! Handles the concerns around decoding: reading the bytes, transparent gzip
//! decompression, and picking a format when none was given.

pub mod loader;
