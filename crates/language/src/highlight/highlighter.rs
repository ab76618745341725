//! Document-order iteration over tagged nodes within a byte range.

use std::ops::{Bound, Range, RangeBounds};

use ophis_syntax::{Node, SyntaxTree};

use super::{StyleRules, Tag};

/// A tagged region of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
	pub start: u32,
	pub end: u32,
	pub tag: Tag,
}

/// Iterator over the tagged nodes of a tree within a byte range.
///
/// Spans come out in document pre-order, so a node's span precedes the spans
/// of its descendants, and a renderer applying them in order lets inner tags
/// override outer ones. Spans are clipped to the requested range and empty
/// nodes are skipped. Subtrees outside the range are never entered.
pub struct Highlighter<'a> {
	rules: &'a StyleRules,
	range: Range<u32>,
	stack: Vec<Node<'a>>,
}

impl<'a> Highlighter<'a> {
	pub fn new(tree: &'a SyntaxTree, rules: &'a StyleRules, range: impl RangeBounds<u32>) -> Self {
		let start = match range.start_bound() {
			Bound::Included(&n) => n,
			Bound::Excluded(&n) => n.saturating_add(1),
			Bound::Unbounded => 0,
		};
		let end = match range.end_bound() {
			Bound::Included(&n) => n.saturating_add(1),
			Bound::Excluded(&n) => n,
			Bound::Unbounded => tree.text_len(),
		};

		let range = start..end;
		let root = tree.root();
		let stack = if intersects(root, &range) { vec![root] } else { Vec::new() };
		Self { rules, range, stack }
	}

	/// Convenience wrapper; prefer iterating directly to avoid allocation.
	pub fn collect_spans(self) -> Vec<HighlightSpan> {
		self.collect()
	}
}

fn intersects(node: Node<'_>, range: &Range<u32>) -> bool {
	node.from() < range.end && node.to() > range.start
}

impl Iterator for Highlighter<'_> {
	type Item = HighlightSpan;

	fn next(&mut self) -> Option<HighlightSpan> {
		loop {
			let node = self.stack.pop()?;
			let range = &self.range;
			self.stack
				.extend(node.children().rev().filter(|child| intersects(*child, range)));

			if node.from() == node.to() {
				continue;
			}
			if let Some(tag) = self.rules.classify(node) {
				return Some(HighlightSpan {
					start: node.from().max(self.range.start),
					end: node.to().min(self.range.end),
					tag,
				});
			}
		}
	}
}
