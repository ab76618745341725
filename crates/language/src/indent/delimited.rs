//! Indentation inside bracketed lists.

use std::ops::Range;

use super::{IndentContext, IndentStrategy};

/// Indents the contents of a bracketed construct relative to the line of
/// its opening delimiter.
///
/// A line starting with the closing delimiter lines up with the opener's
/// line; any other line goes [`units`](Self::units) levels deeper. Only the
/// node's recorded span is used, so lists the user has not closed yet
/// indent the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedIndent {
	pub closing: String,
	/// Align with content that follows the opening delimiter on its line.
	pub align: bool,
	pub units: usize,
}

/// A [`DelimitedIndent`] closed by `closing`, one unit deep, without alignment.
pub fn delimited_indent(closing: &str) -> DelimitedIndent {
	DelimitedIndent {
		closing: closing.to_string(),
		align: false,
		units: 1,
	}
}

impl DelimitedIndent {
	pub fn aligned(mut self, align: bool) -> Self {
		self.align = align;
		self
	}

	pub fn units(mut self, units: usize) -> Self {
		self.units = units;
		self
	}
}

impl IndentStrategy for DelimitedIndent {
	fn indent(&self, cx: &IndentContext<'_>) -> usize {
		let after = cx.text_after();
		let closed = !self.closing.is_empty() && after.trim_start().starts_with(self.closing.as_str());

		if self.align
			&& let Some(opener) = aligned_opener(cx)
		{
			return if closed {
				cx.column(opener.start)
			} else {
				cx.column(opener.end)
			};
		}

		if closed {
			cx.base_indent()
		} else {
			cx.base_indent() + cx.unit() * self.units
		}
	}
}

/// Returns the opening delimiter's span when real content follows it on
/// the same line.
fn aligned_opener(cx: &IndentContext<'_>) -> Option<Range<u32>> {
	let node = cx.node;
	let opener = node.child_after(node.from())?;
	let last = node.last_child();

	let open_line = cx.line_at(opener.from());
	let line_end = if cx.pos > open_line.from {
		open_line.to.min(cx.pos)
	} else {
		open_line.to
	};

	let mut pos = opener.to();
	loop {
		let next = node.child_after(pos)?;
		if Some(next) == last {
			return None;
		}
		if next.name() != "Comment" {
			return (next.from() < line_end).then(|| opener.range());
		}
		pos = next.to();
	}
}
