//! Fold ranges.
//!
//! A fold rule turns a node into the span that collapses when the user folds
//! it. Folding a line picks the outermost foldable construct starting on that
//! line whose fold range extends past it.

use std::fmt;
use std::ops::Range;

use ophis_syntax::{Node, Side, SyntaxTree};
use rustc_hash::FxHashMap;

use crate::text::DocumentText;

/// Computes the foldable span of a node, if it has one.
pub type FoldFn = fn(Node<'_>) -> Option<Range<u32>>;

/// Folds the content between a node's first and last child.
///
/// Meant for bracketed constructs: the delimiters stay visible. When the last
/// child is an error node (the closing delimiter is missing), the fold runs
/// to the end of the node instead.
pub fn fold_inside(node: Node<'_>) -> Option<Range<u32>> {
	let first = node.first_child()?;
	let last = node.last_child()?;
	if first.to() >= last.from() {
		return None;
	}
	let end = if last.is_error() { node.to() } else { last.from() };
	Some(first.to()..end)
}

/// Folds a colon-introduced body from the colon to the end of its last
/// statement.
///
/// Trailing error nodes are ignored. A body holding nothing after its colon
/// does not fold.
pub fn fold_body(node: Node<'_>) -> Option<Range<u32>> {
	let colon = node.first_child()?;
	let last = node.children().rev().find(|child| !child.is_error())?;
	if last == colon || last.to() <= colon.to() {
		return None;
	}
	Some(colon.to()..last.to())
}

/// Fold rules keyed by node type name.
#[derive(Clone, Default)]
pub struct FoldRules {
	by_kind: FxHashMap<Box<str>, FoldFn>,
}

impl FoldRules {
	pub fn new() -> Self {
		Self::default()
	}

	/// Attaches `fold` to every space-separated type name in `kinds`.
	pub fn with(mut self, kinds: &str, fold: FoldFn) -> Self {
		for kind in kinds.split_whitespace() {
			self.by_kind.insert(kind.into(), fold);
		}
		self
	}

	pub fn get(&self, kind: &str) -> Option<FoldFn> {
		self.by_kind.get(kind).copied()
	}

	pub fn len(&self) -> usize {
		self.by_kind.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_kind.is_empty()
	}

	/// Fold range of `node` under its type's rule.
	pub fn fold_range(&self, node: Node<'_>) -> Option<Range<u32>> {
		self.get(node.name()).and_then(|fold| fold(node))
	}

	/// Fold range for the line spanning `start..end`.
	///
	/// Walks outward from the innermost node at `end`, considering nodes that
	/// cross the line end. A range qualifies when it starts on the line and
	/// ends after it; the outermost qualifying range wins, but the walk stops
	/// at the first node starting before the line once one has been found.
	pub fn foldable(&self, tree: &SyntaxTree, start: u32, end: u32) -> Option<Range<u32>> {
		let mut found = None;
		for node in tree.root().resolve(end, Side::Around).ancestors() {
			if node.to() <= end || node.from() > end {
				continue;
			}
			if found.is_some() && node.from() < start {
				break;
			}
			if let Some(range) = self.fold_range(node)
				&& range.start >= start
				&& range.start <= end
				&& range.end > end
			{
				found = Some(range);
			}
		}
		found
	}

	/// [`foldable`](Self::foldable) for the zero-based line `number`.
	pub fn foldable_on_line(&self, tree: &SyntaxTree, text: &DocumentText, number: usize) -> Option<Range<u32>> {
		if number >= text.line_count() {
			return None;
		}
		let line = text.line(number);
		self.foldable(tree, line.from, line.to)
	}
}

impl fmt::Debug for FoldRules {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut kinds: Vec<_> = self.by_kind.keys().collect();
		kinds.sort();
		f.debug_struct("FoldRules").field("kinds", &kinds).finish()
	}
}
