//! Concrete syntax tree snapshots.
//!
//! Trees are produced by an external incremental parser and handed to the
//! editing services as immutable values. This crate stores them as an arena
//! of nodes addressed by [`NodeId`], with parents kept as indices, so a
//! snapshot can be shared freely across read-only queries.
//!
//! # Architecture
//!
//! * [`tree`]: The [`SyntaxTree`] arena and node kinds
//! * [`node`]: The [`Node`] view with parent, sibling and child navigation
//! * [`builder`]: [`TreeBuilder`] for assembling and validating a snapshot
//! * [`error`]: Construction errors

pub mod builder;
pub mod error;
pub mod node;
pub mod tree;

pub use builder::TreeBuilder;
pub use error::TreeError;
pub use node::{Ancestors, Children, Node, Side};
pub use tree::{ERROR_KIND, KindId, NodeId, NodeKind, SyntaxTree};
