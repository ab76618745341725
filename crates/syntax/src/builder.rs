//! Incremental construction of [`SyntaxTree`] snapshots.
//!
//! The builder follows the parser's event stream: open a node, add its
//! tokens and nested nodes in document order, close it. Span invariants are
//! checked as nodes close and the first violation is reported by
//! [`TreeBuilder::finish`].

use rustc_hash::FxHashMap;

use crate::error::TreeError;
use crate::tree::{KindId, NodeData, NodeId, NodeKind, SyntaxTree};

struct OpenNode {
	id: NodeId,
	children: Vec<NodeId>,
}

/// Builds a [`SyntaxTree`] from a pre-order stream of nodes.
///
/// ```
/// use ophis_syntax::TreeBuilder;
///
/// let mut builder = TreeBuilder::new();
/// builder
/// 	.start_node("Script", 0)
/// 	.start_node("PassStatement", 0)
/// 	.token("pass", 0, 4)
/// 	.finish_node(4)
/// 	.finish_node(5);
/// let tree = builder.finish().unwrap();
/// assert_eq!(tree.root().name(), "Script");
/// ```
#[derive(Default)]
pub struct TreeBuilder {
	kinds: Vec<NodeKind>,
	kind_ids: FxHashMap<Box<str>, KindId>,
	nodes: Vec<NodeData>,
	children: Vec<NodeId>,
	open: Vec<OpenNode>,
	root: Option<NodeId>,
	error: Option<TreeError>,
}

impl TreeBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Opens a node starting at `from`. Its end is given to [`finish_node`](Self::finish_node).
	pub fn start_node(&mut self, kind: &str, from: u32) -> &mut Self {
		if let Some(id) = self.alloc(kind, from, from) {
			self.open.push(OpenNode {
				id,
				children: Vec::new(),
			});
		}
		self
	}

	/// Adds a leaf node spanning `from..to` to the innermost open node.
	pub fn token(&mut self, kind: &str, from: u32, to: u32) -> &mut Self {
		if to < from {
			self.fail(TreeError::InvertedSpan {
				kind: kind.to_string(),
				from,
				to,
			});
			return self;
		}
		if let Some(id) = self.alloc(kind, from, to) {
			self.attach(id);
		}
		self
	}

	/// Adds a zero-width error-recovery node at `pos`.
	pub fn error(&mut self, pos: u32) -> &mut Self {
		self.token(crate::tree::ERROR_KIND, pos, pos)
	}

	/// Closes the innermost open node at `to`.
	pub fn finish_node(&mut self, to: u32) -> &mut Self {
		let Some(open) = self.open.pop() else {
			self.fail(TreeError::Unbalanced);
			return self;
		};

		let from = self.nodes[open.id.idx()].from;
		if to < from {
			let kind = self.kind_name(open.id).to_string();
			self.fail(TreeError::InvertedSpan { kind, from, to });
		}
		self.nodes[open.id.idx()].to = to;

		if let Some(child) = open.children.iter().find(|&&c| self.nodes[c.idx()].to > to) {
			let data = &self.nodes[child.idx()];
			let err = TreeError::OutsideParent {
				child: self.kind_name(*child).to_string(),
				from: data.from,
				to: data.to,
				parent: self.kind_name(open.id).to_string(),
				parent_from: from,
				parent_to: to,
			};
			self.fail(err);
		}

		let start = self.children.len() as u32;
		for (index, &child) in open.children.iter().enumerate() {
			let data = &mut self.nodes[child.idx()];
			data.parent = Some(open.id);
			data.index = index as u32;
		}
		self.children.extend_from_slice(&open.children);
		self.nodes[open.id.idx()].children = start..self.children.len() as u32;

		self.attach(open.id);
		self
	}

	/// Validates and returns the finished tree.
	pub fn finish(self) -> Result<SyntaxTree, TreeError> {
		if let Some(err) = self.error {
			return Err(err);
		}
		if let Some(innermost) = self.open.last() {
			return Err(TreeError::Unclosed {
				count: self.open.len(),
				kind: self.kinds[self.nodes[innermost.id.idx()].kind.idx()].name().to_string(),
			});
		}
		if self.root.is_none() {
			return Err(TreeError::Empty);
		}
		Ok(SyntaxTree {
			kinds: self.kinds,
			nodes: self.nodes,
			children: self.children,
		})
	}

	fn alloc(&mut self, kind: &str, from: u32, to: u32) -> Option<NodeId> {
		let kind = self.intern(kind)?;
		let id = NodeId(self.nodes.len() as u32);
		self.nodes.push(NodeData {
			kind,
			from,
			to,
			parent: None,
			index: 0,
			children: 0..0,
		});
		Some(id)
	}

	fn intern(&mut self, name: &str) -> Option<KindId> {
		if let Some(&id) = self.kind_ids.get(name) {
			return Some(id);
		}
		let Ok(raw) = u16::try_from(self.kinds.len()) else {
			self.fail(TreeError::TooManyKinds);
			return None;
		};
		let id = KindId(raw);
		self.kinds.push(NodeKind::new(name));
		self.kind_ids.insert(name.into(), id);
		Some(id)
	}

	/// Hands a completed node to its parent, or makes it the root.
	fn attach(&mut self, id: NodeId) {
		let data = &self.nodes[id.idx()];
		let (from, to) = (data.from, data.to);

		let Some(parent) = self.open.last() else {
			if self.root.is_some() {
				let kind = self.kind_name(id).to_string();
				self.fail(TreeError::MultipleRoots { kind, from });
			} else {
				self.root = Some(id);
			}
			return;
		};

		let parent_data = &self.nodes[parent.id.idx()];
		if from < parent_data.from {
			let err = TreeError::OutsideParent {
				child: self.kind_name(id).to_string(),
				from,
				to,
				parent: self.kind_name(parent.id).to_string(),
				parent_from: parent_data.from,
				parent_to: parent_data.to,
			};
			self.fail(err);
		} else if let Some(&prev) = parent.children.last() {
			let prev_to = self.nodes[prev.idx()].to;
			if from < prev_to {
				let kind = self.kind_name(id).to_string();
				self.fail(TreeError::Overlap { kind, from, prev_to });
			}
		}

		if let Some(parent) = self.open.last_mut() {
			parent.children.push(id);
		}
	}

	fn kind_name(&self, id: NodeId) -> &str {
		self.kinds[self.nodes[id.idx()].kind.idx()].name()
	}

	fn fail(&mut self, err: TreeError) {
		if self.error.is_none() {
			self.error = Some(err);
		}
	}
}
