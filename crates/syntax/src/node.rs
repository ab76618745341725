//! Borrowed node views and tree navigation.

use std::fmt;
use std::ops::Range;

use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// Which neighbours of a position [`Node::resolve`] may enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
	/// Enter nodes that end at the position (`from < pos <= to`).
	Before,
	/// Enter only nodes that strictly contain the position (`from < pos < to`).
	Around,
	/// Enter nodes that start at the position (`from <= pos < to`).
	After,
}

/// A node of a [`SyntaxTree`].
///
/// Cheap to copy; navigation never allocates.
#[derive(Clone, Copy)]
pub struct Node<'tree> {
	tree: &'tree SyntaxTree,
	id: NodeId,
}

impl<'tree> Node<'tree> {
	#[inline]
	pub(crate) fn new(tree: &'tree SyntaxTree, id: NodeId) -> Self {
		Self { tree, id }
	}

	#[inline]
	pub fn id(self) -> NodeId {
		self.id
	}

	#[inline]
	pub fn tree(self) -> &'tree SyntaxTree {
		self.tree
	}

	#[inline]
	pub fn kind(self) -> &'tree NodeKind {
		self.tree.kind_of(self.id)
	}

	/// The node's type name.
	#[inline]
	pub fn name(self) -> &'tree str {
		self.kind().name()
	}

	#[inline]
	pub fn is_error(self) -> bool {
		self.kind().is_error()
	}

	#[inline]
	pub fn from(self) -> u32 {
		self.tree.data(self.id).from
	}

	#[inline]
	pub fn to(self) -> u32 {
		self.tree.data(self.id).to
	}

	#[inline]
	pub fn range(self) -> Range<u32> {
		self.from()..self.to()
	}

	pub fn parent(self) -> Option<Node<'tree>> {
		self.tree.data(self.id).parent.map(|id| Node::new(self.tree, id))
	}

	pub fn children(self) -> Children<'tree> {
		Children {
			tree: self.tree,
			ids: self.tree.child_ids(self.id).iter(),
		}
	}

	pub fn child_count(self) -> usize {
		self.tree.child_ids(self.id).len()
	}

	pub fn first_child(self) -> Option<Node<'tree>> {
		self.tree.child_ids(self.id).first().map(|&id| Node::new(self.tree, id))
	}

	pub fn last_child(self) -> Option<Node<'tree>> {
		self.tree.child_ids(self.id).last().map(|&id| Node::new(self.tree, id))
	}

	pub fn prev_sibling(self) -> Option<Node<'tree>> {
		let index = self.tree.data(self.id).index as usize;
		let siblings = self.tree.child_ids(self.parent()?.id);
		index.checked_sub(1).map(|i| Node::new(self.tree, siblings[i]))
	}

	pub fn next_sibling(self) -> Option<Node<'tree>> {
		let index = self.tree.data(self.id).index as usize;
		let siblings = self.tree.child_ids(self.parent()?.id);
		siblings.get(index + 1).map(|&id| Node::new(self.tree, id))
	}

	/// Iterates this node and then each of its ancestors up to the root.
	pub fn ancestors(self) -> Ancestors<'tree> {
		Ancestors { next: Some(self) }
	}

	/// Returns true if `self` is `other` or one of its ancestors.
	pub fn is_ancestor_of(self, other: Node<'_>) -> bool {
		std::ptr::eq(self.tree, other.tree) && other.ancestors().any(|n| n.id == self.id)
	}

	/// Last direct child that starts before `pos`.
	///
	/// The child may still extend past `pos` when the position is inside it.
	pub fn child_before(self, pos: u32) -> Option<Node<'tree>> {
		let ids = self.tree.child_ids(self.id);
		let idx = ids.partition_point(|&id| self.tree.data(id).from < pos);
		idx.checked_sub(1).map(|i| Node::new(self.tree, ids[i]))
	}

	/// First direct child that ends after `pos`.
	pub fn child_after(self, pos: u32) -> Option<Node<'tree>> {
		let ids = self.tree.child_ids(self.id);
		let idx = ids.partition_point(|&id| self.tree.data(id).to <= pos);
		ids.get(idx).map(|&id| Node::new(self.tree, id))
	}

	/// Finds the innermost node around `pos`.
	///
	/// Climbs to the parent while this node does not hold `pos`, then enters
	/// children as far as `side` allows. Positions outside the document
	/// resolve to the root.
	pub fn resolve(self, pos: u32, side: Side) -> Node<'tree> {
		let mut node = self;
		while !node.holds(pos, side) {
			match node.parent() {
				Some(parent) => node = parent,
				None => break,
			}
		}
		while let Some(child) = node.enter(pos, side) {
			node = child;
		}
		node
	}

	/// Moves into trailing children that end at `pos` with an empty recovery
	/// node, which mark constructs the parser could not close yet.
	///
	/// Returns the innermost such unfinished node, or `self` if there is none.
	pub fn enter_unfinished_nodes_before(self, pos: u32) -> Node<'tree> {
		let mut result = self;
		let mut scan = self.child_before(pos);
		while let Some(node) = scan {
			let Some(last) = node.last_child() else {
				break;
			};
			if last.to() != node.to() {
				break;
			}
			if last.is_error() && last.from() == last.to() {
				result = node;
				scan = last.prev_sibling();
			} else {
				scan = Some(last);
			}
		}
		result
	}

	fn holds(self, pos: u32, side: Side) -> bool {
		let (from, to) = (self.from(), self.to());
		match side {
			Side::Before => from < pos && to >= pos,
			Side::Around => from <= pos && to >= pos,
			Side::After => from <= pos && to > pos,
		}
	}

	fn enter(self, pos: u32, side: Side) -> Option<Node<'tree>> {
		let ids = self.tree.child_ids(self.id);
		let idx = match side {
			Side::Before => ids.partition_point(|&id| self.tree.data(id).to < pos),
			Side::Around | Side::After => ids.partition_point(|&id| self.tree.data(id).to <= pos),
		};
		let child = Node::new(self.tree, *ids.get(idx)?);
		let (from, to) = (child.from(), child.to());
		let enters = match side {
			Side::Before => from < pos && to >= pos,
			Side::Around => from < pos && to > pos,
			Side::After => from <= pos && to > pos,
		};
		enters.then_some(child)
	}
}

impl PartialEq for Node<'_> {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id && std::ptr::eq(self.tree, other.tree)
	}
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}@{}..{}", self.name(), self.from(), self.to())
	}
}

/// Iterator over the direct children of a node.
pub struct Children<'tree> {
	tree: &'tree SyntaxTree,
	ids: std::slice::Iter<'tree, NodeId>,
}

impl<'tree> Iterator for Children<'tree> {
	type Item = Node<'tree>;

	fn next(&mut self) -> Option<Self::Item> {
		self.ids.next().map(|&id| Node::new(self.tree, id))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.ids.size_hint()
	}
}

impl DoubleEndedIterator for Children<'_> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.ids.next_back().map(|&id| Node::new(self.tree, id))
	}
}

impl ExactSizeIterator for Children<'_> {}

/// Iterator from a node up to the root, starting with the node itself.
pub struct Ancestors<'tree> {
	next: Option<Node<'tree>>,
}

impl<'tree> Iterator for Ancestors<'tree> {
	type Item = Node<'tree>;

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.next?;
		self.next = node.parent();
		Some(node)
	}
}

#[cfg(test)]
mod tests;
