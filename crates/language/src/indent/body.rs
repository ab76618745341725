//! Indentation of colon-introduced bodies.
//!
//! Indentation is significant in Python, so these rules only move a line
//! when the tree says so: right after a body-opening colon, or right after a
//! statement that ends its block. Everything else keeps the line as it is.

use ophis_syntax::{Node, Side};

use super::IndentContext;

const BODY: &str = "Body";
const COLON: &str = ":";

/// Whether a line following `node` should go back to the enclosing level.
///
/// `return` and `raise` only end the block once the cursor is past their
/// expression.
pub fn dedents_after(node: Node<'_>, pos: u32) -> bool {
	match node.name() {
		"BreakStatement" | "ContinueStatement" | "PassStatement" => true,
		"ReturnStatement" | "RaiseStatement" => pos >= node.to(),
		_ => false,
	}
}

/// Rule for `Body` nodes.
pub fn body_indent(cx: &IndentContext<'_>) -> usize {
	indent_in_body(cx, cx.pos, false)
}

/// Rule for the `Script` root.
///
/// A position followed only by whitespace up to the end of the document lies
/// outside every body span, even when the code before it is still inside one.
/// Such positions are resolved against the innermost body holding the last
/// non-whitespace text before the cursor, however many blank lines follow it.
pub fn script_indent(cx: &IndentContext<'_>) -> usize {
	let text = cx.text();
	if !text.is_blank_from(cx.pos) {
		return cx.line_indent(cx.pos);
	}

	let anchor = text.trim_end_before(cx.pos);
	let last = cx.node.resolve(anchor, Side::Before);
	match last.ancestors().find(|n| n.name() == BODY) {
		Some(body) => indent_in_body(&cx.with_node(body), anchor, true),
		None => cx.line_indent(cx.pos),
	}
}

/// Shared body logic. Structural checks look at `anchor`, which is the cursor
/// itself except in trailing mode, where it is the end of the last code.
fn indent_in_body(cx: &IndentContext<'_>, anchor: u32, trailing: bool) -> usize {
	let before = cx.node.child_before(anchor);
	if before.is_some_and(|child| dedents_after(child, anchor)) {
		return cx.base_indent();
	}

	if cx.node.resolve(anchor, Side::Before).name() == COLON {
		return cx.base_indent() + cx.unit();
	}

	// Blank lines after the end of the document still belong to the body
	// that was open there.
	if trailing && cx.line_at(cx.pos).is_blank() {
		return match before {
			Some(stmt) if stmt.name() != COLON => cx.line_indent(stmt.from()),
			_ => cx.base_indent() + cx.unit(),
		};
	}

	cx.line_indent(cx.pos)
}
