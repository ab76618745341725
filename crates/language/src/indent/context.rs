//! Per-call indentation context.

use std::borrow::Cow;

use ophis_syntax::{Node, Side};

use crate::text::{DocumentText, Line};

/// Everything an [`IndentStrategy`](super::IndentStrategy) needs to answer one query.
///
/// Built fresh for every request and dropped afterwards.
#[derive(Debug, Clone)]
pub struct IndentContext<'a> {
	/// Position the indentation is requested for.
	pub pos: u32,
	/// The node whose rule is running.
	pub node: Node<'a>,
	text: &'a DocumentText,
	unit: usize,
	tab_size: usize,
	base_indent: usize,
}

impl<'a> IndentContext<'a> {
	pub fn new(node: Node<'a>, pos: u32, text: &'a DocumentText, unit: usize, tab_size: usize) -> Self {
		Self {
			pos,
			node,
			text,
			unit,
			tab_size,
			base_indent: base_indent_for(node, text, tab_size),
		}
	}

	/// Same request, evaluated for another node.
	pub fn with_node(&self, node: Node<'a>) -> Self {
		Self::new(node, self.pos, self.text, self.unit, self.tab_size)
	}

	/// Indentation of the line on which [`node`](Self::node)'s construct starts.
	#[inline]
	pub fn base_indent(&self) -> usize {
		self.base_indent
	}

	/// Width of one indentation level.
	#[inline]
	pub fn unit(&self) -> usize {
		self.unit
	}

	#[inline]
	pub fn tab_size(&self) -> usize {
		self.tab_size
	}

	pub fn text(&self) -> &'a DocumentText {
		self.text
	}

	pub fn line_at(&self, pos: u32) -> Line<'a> {
		self.text.line_at(pos)
	}

	/// Indentation width of the line containing `pos`.
	pub fn line_indent(&self, pos: u32) -> usize {
		self.text.line_indent(pos, self.tab_size)
	}

	/// Visual column of `pos`.
	pub fn column(&self, pos: u32) -> usize {
		self.text.column(pos, self.tab_size)
	}

	/// Rest of the current line after [`pos`](Self::pos).
	pub fn text_after(&self) -> Cow<'a, str> {
		self.text.text_after(self.pos)
	}
}

/// Finds the indentation of the line where `node`'s construct begins.
///
/// If that line starts inside some node that is not an ancestor of `node`
/// (a continuation line of an earlier construct), the line where that
/// construct starts is used instead, repeatedly.
fn base_indent_for(node: Node<'_>, text: &DocumentText, tab_size: usize) -> usize {
	let mut line = text.line_at(node.from());
	loop {
		let mut at_break = node.resolve(line.from, Side::Around);
		while let Some(parent) = at_break.parent()
			&& parent.from() == at_break.from()
		{
			at_break = parent;
		}
		if at_break.is_ancestor_of(node) || at_break.from() >= line.from {
			break;
		}
		line = text.line_at(at_break.from());
	}
	line.indent(tab_size)
}
