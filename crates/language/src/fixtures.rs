//! Hand-built trees shaped the way the Python parser emits them.
//!
//! A `Body` starts at its colon and runs through the newline ending its last
//! statement; constructs the parser could not close end with an empty `⚠`.

use ophis_syntax::{Node, SyntaxTree, TreeBuilder};

use crate::text::DocumentText;

pub(crate) struct Doc {
	pub text: DocumentText,
	pub tree: SyntaxTree,
}

impl Doc {
	pub fn new(text: &str, build: impl FnOnce(&mut TreeBuilder)) -> Self {
		let mut builder = TreeBuilder::new();
		build(&mut builder);
		Self {
			text: DocumentText::new(text),
			tree: builder.finish().unwrap(),
		}
	}

	/// First node of the given type in document order.
	pub fn find(&self, name: &str) -> Node<'_> {
		self.nth(name, 0)
	}

	pub fn nth(&self, name: &str, n: usize) -> Node<'_> {
		self.tree.nodes().filter(|node| node.name() == name).nth(n).unwrap()
	}
}

/// Opens `def <name>():` with the header spanning `from..from + name.len() + 6`.
fn def_header(b: &mut TreeBuilder, from: u32) {
	b.start_node("FunctionDefinition", from)
		.token("def", from, from + 3)
		.token("VariableName", from + 4, from + 5)
		.start_node("ParamList", from + 5)
		.token("(", from + 5, from + 6)
		.token(")", from + 6, from + 7)
		.finish_node(from + 7);
}

/// `def f():\n    pass\n`
pub(crate) fn def_pass() -> Doc {
	Doc::new("def f():\n    pass\n", |b| {
		b.start_node("Script", 0);
		def_header(b, 0);
		b.start_node("Body", 7)
			.token(":", 7, 8)
			.start_node("PassStatement", 13)
			.token("pass", 13, 17)
			.finish_node(17)
			.finish_node(18)
			.finish_node(18)
			.finish_node(18);
	})
}

/// `while x:\n    <keyword>\n` where the body holds a single bare statement.
pub(crate) fn while_with(statement: &str, keyword: &str) -> Doc {
	let end = 13 + keyword.len() as u32;
	let text = format!("while x:\n    {keyword}\n");
	Doc::new(&text, |b| {
		b.start_node("Script", 0)
			.start_node("WhileStatement", 0)
			.token("while", 0, 5)
			.token("VariableName", 6, 7)
			.start_node("Body", 7)
			.token(":", 7, 8)
			.start_node(statement, 13)
			.token(keyword, 13, end)
			.finish_node(end)
			.finish_node(end + 1)
			.finish_node(end + 1)
			.finish_node(end + 1);
	})
}

/// `def f():\n    <keyword> x + 1\n` for `return` or `raise`.
pub(crate) fn def_exits_with(statement: &str, keyword: &str) -> Doc {
	let kw_end = 13 + keyword.len() as u32;
	let expr = kw_end + 1;
	let end = expr + 5;
	let text = format!("def f():\n    {keyword} x + 1\n");
	Doc::new(&text, |b| {
		b.start_node("Script", 0);
		def_header(b, 0);
		b.start_node("Body", 7)
			.token(":", 7, 8)
			.start_node(statement, 13)
			.token(keyword, 13, kw_end)
			.start_node("BinaryExpression", expr)
			.token("VariableName", expr, expr + 1)
			.token("ArithOp", expr + 2, expr + 3)
			.token("Number", expr + 4, expr + 5)
			.finish_node(end)
			.finish_node(end)
			.finish_node(end + 1)
			.finish_node(end + 1)
			.finish_node(end + 1);
	})
}

/// `def f():\n    if x:\n` with the inner body still open.
pub(crate) fn nested_if_open() -> Doc {
	Doc::new("def f():\n    if x:\n", |b| {
		b.start_node("Script", 0);
		def_header(b, 0);
		b.start_node("Body", 7)
			.token(":", 7, 8)
			.start_node("IfStatement", 13)
			.token("if", 13, 15)
			.token("VariableName", 16, 17)
			.start_node("Body", 17)
			.token(":", 17, 18)
			.error(19)
			.finish_node(19)
			.finish_node(19)
			.finish_node(19)
			.finish_node(19)
			.finish_node(19);
	})
}

/// `def f():\n    if x:\n        <last>\n` followed by an empty final line.
///
/// `last` is either an assignment `y = 1` or a bare `return`.
pub(crate) fn nested_if_trailing(returns: bool) -> Doc {
	let text = if returns {
		"def f():\n    if x:\n        return\n"
	} else {
		"def f():\n    if x:\n        y = 1\n"
	};
	let end = text.len() as u32;
	Doc::new(text, |b| {
		b.start_node("Script", 0);
		def_header(b, 0);
		b.start_node("Body", 7)
			.token(":", 7, 8)
			.start_node("IfStatement", 13)
			.token("if", 13, 15)
			.token("VariableName", 16, 17)
			.start_node("Body", 17)
			.token(":", 17, 18);
		if returns {
			b.start_node("ReturnStatement", 27).token("return", 27, 33).finish_node(33);
		} else {
			b.start_node("AssignStatement", 27)
				.token("VariableName", 27, 28)
				.token("AssignOp", 29, 30)
				.token("Number", 31, 32)
				.finish_node(32);
		}
		b.finish_node(end).finish_node(end).finish_node(end).finish_node(end).finish_node(end);
	})
}

/// A body ending in `x = 1` followed by `blank` empty lines.
///
/// Flat: `def f():\n    x = 1\n`. Nested: `def f():\n    if x:\n        x = 1\n`.
pub(crate) fn blank_lines_after_body(nested: bool, blank: usize) -> Doc {
	let code = if nested {
		"def f():\n    if x:\n        x = 1\n"
	} else {
		"def f():\n    x = 1\n"
	};
	let body_end = code.len() as u32;
	let stmt = body_end - 6;
	let text = format!("{code}{}", "\n".repeat(blank));
	let end = text.len() as u32;
	Doc::new(&text, |b| {
		b.start_node("Script", 0);
		def_header(b, 0);
		b.start_node("Body", 7).token(":", 7, 8);
		if nested {
			b.start_node("IfStatement", 13)
				.token("if", 13, 15)
				.token("VariableName", 16, 17)
				.start_node("Body", 17)
				.token(":", 17, 18);
		}
		b.start_node("AssignStatement", stmt)
			.token("VariableName", stmt, stmt + 1)
			.token("AssignOp", stmt + 2, stmt + 3)
			.token("Number", stmt + 4, stmt + 5)
			.finish_node(stmt + 5);
		if nested {
			b.finish_node(body_end).finish_node(body_end);
		}
		b.finish_node(body_end).finish_node(body_end).finish_node(end);
	})
}

/// `x = [1,\n` with the list left open.
pub(crate) fn open_list() -> Doc {
	Doc::new("x = [1,\n", |b| {
		b.start_node("Script", 0)
			.start_node("AssignStatement", 0)
			.token("VariableName", 0, 1)
			.token("AssignOp", 2, 3)
			.start_node("ArrayExpression", 4)
			.token("[", 4, 5)
			.token("Number", 5, 6)
			.token(",", 6, 7)
			.error(8)
			.finish_node(8)
			.finish_node(8)
			.finish_node(8);
	})
}

/// `<callee>(<args>\n` inside `def f():` when `nested`, with the argument list open.
///
/// `args` is either empty or a single name followed by a comma.
pub(crate) fn open_call(callee: &str, args: &str, nested: bool) -> Doc {
	let indent = if nested { "    " } else { "" };
	let header = if nested { "def f():\n" } else { "" };
	let text = format!("{header}{indent}{callee}({args}\n");
	let start = (header.len() + indent.len()) as u32;
	let open = start + callee.len() as u32;
	let end = text.len() as u32;
	Doc::new(&text, |b| {
		b.start_node("Script", 0);
		if nested {
			def_header(b, 0);
			b.start_node("Body", 7).token(":", 7, 8);
		}
		b.start_node("ExpressionStatement", start)
			.start_node("CallExpression", start)
			.token("VariableName", start, open)
			.start_node("ArgList", open)
			.token("(", open, open + 1);
		if !args.is_empty() {
			b.token("VariableName", open + 1, open + 2).token(",", open + 2, open + 3);
		}
		b.error(end).finish_node(end).finish_node(end).finish_node(end);
		if nested {
			b.finish_node(end).finish_node(end);
		}
		b.finish_node(end);
	})
}

/// `foo(\n    a,\n)`
pub(crate) fn closed_call() -> Doc {
	Doc::new("foo(\n    a,\n)", |b| {
		b.start_node("Script", 0)
			.start_node("ExpressionStatement", 0)
			.start_node("CallExpression", 0)
			.token("VariableName", 0, 3)
			.start_node("ArgList", 3)
			.token("(", 3, 4)
			.token("VariableName", 9, 10)
			.token(",", 10, 11)
			.token(")", 12, 13)
			.finish_node(13)
			.finish_node(13)
			.finish_node(13)
			.finish_node(13);
	})
}

/// `print(len(x))\nclass A:\n    def m(self):\n        self.run()\n`
///
/// Covers call targets, definitions and member calls for highlighting.
pub(crate) fn mixed_names() -> Doc {
	let text = "print(len(x))\nclass A:\n    def m(self):\n        self.run()\n";
	Doc::new(text, |b| {
		b.start_node("Script", 0)
			// print(len(x))
			.start_node("ExpressionStatement", 0)
			.start_node("CallExpression", 0)
			.token("VariableName", 0, 5)
			.start_node("ArgList", 5)
			.token("(", 5, 6)
			.start_node("CallExpression", 6)
			.token("VariableName", 6, 9)
			.start_node("ArgList", 9)
			.token("(", 9, 10)
			.token("VariableName", 10, 11)
			.token(")", 11, 12)
			.finish_node(12)
			.finish_node(12)
			.token(")", 12, 13)
			.finish_node(13)
			.finish_node(13)
			.finish_node(13)
			// class A:
			.start_node("ClassDefinition", 14)
			.token("class", 14, 19)
			.token("VariableName", 20, 21)
			.start_node("Body", 21)
			.token(":", 21, 22)
			// def m(self):
			.start_node("FunctionDefinition", 27)
			.token("def", 27, 30)
			.token("VariableName", 31, 32)
			.start_node("ParamList", 32)
			.token("(", 32, 33)
			.token("self", 33, 37)
			.token(")", 37, 38)
			.finish_node(38)
			.start_node("Body", 38)
			.token(":", 38, 39)
			// self.run()
			.start_node("ExpressionStatement", 48)
			.start_node("CallExpression", 48)
			.start_node("MemberExpression", 48)
			.token("self", 48, 52)
			.token(".", 52, 53)
			.token("PropertyName", 53, 56)
			.finish_node(56)
			.start_node("ArgList", 56)
			.token("(", 56, 57)
			.token(")", 57, 58)
			.finish_node(58)
			.finish_node(58)
			.finish_node(58)
			.finish_node(59)
			.finish_node(59)
			.finish_node(59)
			.finish_node(59)
			.finish_node(59);
	})
}
