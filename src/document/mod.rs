//! Document model and path-based access.
//!
//! - [`node`] - the dynamic [`Value`](node::Value) tree
//! - [`parser`] - decoding JSON and YAML into that tree
//! - [`tree`] - [`Dmap`](tree::Dmap) and [`NodeRef`](tree::NodeRef), the traversal engine

pub mod node;
pub mod parser;
pub mod tree;
