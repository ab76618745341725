//! Arena storage for syntax tree snapshots.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::node::Node;

/// Type name used for error-recovery nodes.
pub const ERROR_KIND: &str = "⚠";

/// Index of a node inside a [`SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
	/// The root node is always allocated first.
	pub const ROOT: NodeId = NodeId(0);

	#[inline]
	pub fn idx(self) -> usize {
		self.0 as usize
	}
}

/// Index of an interned [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KindId(pub(crate) u16);

impl KindId {
	#[inline]
	pub fn idx(self) -> usize {
		self.0 as usize
	}
}

/// The type of a node: its grammar name and whether it is a recovery node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKind {
	name: Box<str>,
	is_error: bool,
}

impl NodeKind {
	pub fn new(name: impl Into<Box<str>>) -> Self {
		let name = name.into();
		let is_error = &*name == ERROR_KIND;
		Self { name, is_error }
	}

	pub fn error() -> Self {
		Self::new(ERROR_KIND)
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[inline]
	pub fn is_error(&self) -> bool {
		self.is_error
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct NodeData {
	pub(crate) kind: KindId,
	pub(crate) from: u32,
	pub(crate) to: u32,
	pub(crate) parent: Option<NodeId>,
	/// Position of this node among its parent's children.
	pub(crate) index: u32,
	/// Slice of [`SyntaxTree::children`] holding the direct children.
	pub(crate) children: Range<u32>,
}

/// Immutable concrete syntax tree over a document.
///
/// Children of every node are non-overlapping, contained in their parent and
/// ordered by position. The root spans the whole document.
///
/// Deserialized snapshots are checked against the same invariants the
/// [`TreeBuilder`](crate::TreeBuilder) enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTree")]
pub struct SyntaxTree {
	pub(crate) kinds: Vec<NodeKind>,
	pub(crate) nodes: Vec<NodeData>,
	pub(crate) children: Vec<NodeId>,
}

impl SyntaxTree {
	/// Returns the root node.
	#[inline]
	pub fn root(&self) -> Node<'_> {
		Node::new(self, NodeId::ROOT)
	}

	/// Returns the node with the given id, if it belongs to this tree.
	pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
		(id.idx() < self.nodes.len()).then(|| Node::new(self, id))
	}

	/// Number of nodes in the arena.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Always false for a built tree; a tree has at least its root.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Length of the document covered by the root.
	pub fn text_len(&self) -> u32 {
		self.nodes[NodeId::ROOT.idx()].to
	}

	/// Iterates all nodes in document pre-order.
	pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> + '_ {
		(0..self.nodes.len() as u32).map(|i| Node::new(self, NodeId(i)))
	}

	/// Returns the interned kind table.
	pub fn kinds(&self) -> &[NodeKind] {
		&self.kinds
	}

	#[inline]
	pub(crate) fn data(&self, id: NodeId) -> &NodeData {
		&self.nodes[id.idx()]
	}

	#[inline]
	pub(crate) fn kind_of(&self, id: NodeId) -> &NodeKind {
		&self.kinds[self.data(id).kind.idx()]
	}

	#[inline]
	pub(crate) fn child_ids(&self, id: NodeId) -> &[NodeId] {
		let range = &self.data(id).children;
		&self.children[range.start as usize..range.end as usize]
	}
}

/// Unchecked wire form of a [`SyntaxTree`].
#[derive(Deserialize)]
struct RawTree {
	kinds: Vec<NodeKind>,
	nodes: Vec<NodeData>,
	children: Vec<NodeId>,
}

impl TryFrom<RawTree> for SyntaxTree {
	type Error = TreeError;

	fn try_from(raw: RawTree) -> Result<Self, TreeError> {
		let tree = SyntaxTree {
			kinds: raw.kinds,
			nodes: raw.nodes,
			children: raw.children,
		};
		tree.validate()?;
		Ok(tree)
	}
}

fn malformed(reason: String) -> TreeError {
	TreeError::Malformed(reason)
}

impl SyntaxTree {
	/// Checks arena links and span invariants so later lookups cannot index out of bounds.
	///
	/// Node ids are pre-order, so a parent is always validated before its children.
	fn validate(&self) -> Result<(), TreeError> {
		let Some(root) = self.nodes.first() else {
			return Err(TreeError::Empty);
		};
		if root.parent.is_some() {
			return Err(malformed("root has a parent".into()));
		}
		if self.kinds.len() > usize::from(u16::MAX) + 1 {
			return Err(TreeError::TooManyKinds);
		}
		if u32::try_from(self.nodes.len()).is_err() || u32::try_from(self.children.len()).is_err() {
			return Err(malformed("arena exceeds u32 addressing".into()));
		}
		if let Some(kind) = self.kinds.iter().find(|k| k.is_error != (k.name() == ERROR_KIND)) {
			return Err(malformed(format!("kind {} has a mismatched error flag", kind.name())));
		}

		for (i, data) in self.nodes.iter().enumerate() {
			let id = NodeId(i as u32);
			let kind = self
				.kinds
				.get(data.kind.idx())
				.ok_or_else(|| malformed(format!("node {i} has unknown kind {}", data.kind.idx())))?
				.name();
			if data.from > data.to {
				return Err(TreeError::InvertedSpan {
					kind: kind.to_string(),
					from: data.from,
					to: data.to,
				});
			}

			let Range { start, end } = data.children;
			if start > end || end as usize > self.children.len() {
				return Err(malformed(format!(
					"node {i} has children {start}..{end} outside a table of {}",
					self.children.len()
				)));
			}
			for (index, &child) in self.children[start as usize..end as usize].iter().enumerate() {
				let linked = child.idx() > i
					&& self
						.nodes
						.get(child.idx())
						.is_some_and(|c| c.parent == Some(id) && c.index as usize == index);
				if !linked {
					return Err(malformed(format!("node {i} lists child {} that does not link back", child.idx())));
				}
			}

			if i > 0 {
				self.validate_placement(id, kind)?;
			}
		}
		Ok(())
	}

	/// Checks that a non-root node sits inside its parent and after its previous sibling.
	fn validate_placement(&self, id: NodeId, kind: &str) -> Result<(), TreeError> {
		let i = id.idx();
		let data = &self.nodes[i];
		let parent = data
			.parent
			.filter(|p| p.idx() < i)
			.ok_or_else(|| malformed(format!("node {i} has no parent before it")))?;
		let siblings = self.child_ids(parent);
		let index = data.index as usize;
		if siblings.get(index) != Some(&id) {
			return Err(malformed(format!("node {i} is missing from its parent's children")));
		}

		let parent_data = &self.nodes[parent.idx()];
		if data.from < parent_data.from || data.to > parent_data.to {
			return Err(TreeError::OutsideParent {
				child: kind.to_string(),
				from: data.from,
				to: data.to,
				parent: self.kind_of(parent).name().to_string(),
				parent_from: parent_data.from,
				parent_to: parent_data.to,
			});
		}
		if let Some(prev) = index.checked_sub(1).map(|p| siblings[p]) {
			let prev_to = self.nodes[prev.idx()].to;
			if data.from < prev_to {
				return Err(TreeError::Overlap {
					kind: kind.to_string(),
					from: data.from,
					prev_to,
				});
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
