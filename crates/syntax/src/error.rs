//! Errors raised while assembling or loading a [`SyntaxTree`](crate::SyntaxTree).

use thiserror::Error;

/// A tree handed to the builder violated the span invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
	/// Nothing was added before [`finish`](crate::TreeBuilder::finish).
	#[error("tree has no root node")]
	Empty,

	/// A second top-level node was started after the root was finished.
	#[error("tree has more than one root: {kind} at {from}")]
	MultipleRoots { kind: String, from: u32 },

	/// A node ends before it starts.
	#[error("{kind} has an inverted span {from}..{to}")]
	InvertedSpan { kind: String, from: u32, to: u32 },

	/// A child reaches outside its parent.
	#[error("{child} at {from}..{to} escapes parent {parent} at {parent_from}..{parent_to}")]
	OutsideParent {
		child: String,
		from: u32,
		to: u32,
		parent: String,
		parent_from: u32,
		parent_to: u32,
	},

	/// A child starts before its previous sibling ends.
	#[error("{kind} at {from} overlaps previous sibling ending at {prev_to}")]
	Overlap { kind: String, from: u32, prev_to: u32 },

	/// `finish_node` was called with no open node.
	#[error("finish_node called without a matching start_node")]
	Unbalanced,

	/// `finish` was called while nodes were still open.
	#[error("{count} node(s) left open, innermost is {kind}")]
	Unclosed { count: usize, kind: String },

	/// More distinct node kinds than the interner can address.
	#[error("too many distinct node kinds")]
	TooManyKinds,

	/// A deserialized snapshot has broken arena links.
	#[error("malformed tree snapshot: {0}")]
	Malformed(String),
}
