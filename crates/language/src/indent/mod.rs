//! Indentation rules and the resolver that dispatches them.
//!
//! Rules are attached to node type names. A query resolves the innermost
//! node at the cursor, then walks outward to the first node with a rule and
//! lets that rule decide. When nothing on the way has a rule the current
//! line keeps its indentation.

use std::fmt;
use std::sync::Arc;

use ophis_syntax::{Side, SyntaxTree};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::text::DocumentText;

mod body;
mod context;
mod delimited;

pub use body::{body_indent, dedents_after, script_indent};
pub use context::IndentContext;
pub use delimited::{DelimitedIndent, delimited_indent};

/// Computes an indentation width for a context.
pub trait IndentStrategy: Send + Sync {
	fn indent(&self, cx: &IndentContext<'_>) -> usize;
}

impl<F> IndentStrategy for F
where
	F: Fn(&IndentContext<'_>) -> usize + Send + Sync,
{
	fn indent(&self, cx: &IndentContext<'_>) -> usize {
		self(cx)
	}
}

/// Indentation rules keyed by node type name.
#[derive(Clone, Default)]
pub struct IndentRules {
	by_kind: FxHashMap<Box<str>, Arc<dyn IndentStrategy>>,
}

impl IndentRules {
	pub fn new() -> Self {
		Self::default()
	}

	/// Attaches `strategy` to every space-separated type name in `kinds`.
	pub fn with(mut self, kinds: &str, strategy: impl IndentStrategy + 'static) -> Self {
		let strategy: Arc<dyn IndentStrategy> = Arc::new(strategy);
		for kind in kinds.split_whitespace() {
			self.by_kind.insert(kind.into(), Arc::clone(&strategy));
		}
		self
	}

	pub fn get(&self, kind: &str) -> Option<&dyn IndentStrategy> {
		self.by_kind.get(kind).map(|s| &**s)
	}

	pub fn contains(&self, kind: &str) -> bool {
		self.by_kind.contains_key(kind)
	}

	pub fn len(&self) -> usize {
		self.by_kind.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_kind.is_empty()
	}
}

impl fmt::Debug for IndentRules {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut kinds: Vec<_> = self.by_kind.keys().collect();
		kinds.sort();
		f.debug_struct("IndentRules").field("kinds", &kinds).finish()
	}
}

/// Answers indentation queries for one language.
#[derive(Debug, Clone)]
pub struct IndentService {
	rules: IndentRules,
	unit: usize,
	tab_size: usize,
}

impl IndentService {
	pub fn new(rules: IndentRules, unit: usize, tab_size: usize) -> Self {
		Self {
			rules,
			unit,
			tab_size: tab_size.max(1),
		}
	}

	pub fn rules(&self) -> &IndentRules {
		&self.rules
	}

	pub fn unit(&self) -> usize {
		self.unit
	}

	pub fn tab_size(&self) -> usize {
		self.tab_size
	}

	/// Indentation width for the line at `pos`.
	///
	/// `pos` is where a line break is about to be inserted, or the start of a
	/// line being reindented. Never fails: unresolvable positions fall back to
	/// the root and a missing rule keeps the current line's indentation.
	pub fn resolve_indent(&self, tree: &SyntaxTree, text: &DocumentText, pos: u32) -> usize {
		let pos = text.clamp(pos);
		let start = tree.root().resolve(pos, Side::Around).enter_unfinished_nodes_before(pos);

		for node in start.ancestors() {
			let Some(rule) = self.rules.get(node.name()) else {
				continue;
			};
			let cx = IndentContext::new(node, pos, text, self.unit, self.tab_size);
			let indent = rule.indent(&cx);
			trace!(
				target: "ophis::indent",
				pos,
				node = node.name(),
				base_indent = cx.base_indent(),
				indent,
				"indent.resolved"
			);
			return indent;
		}

		let indent = text.line_indent(pos, self.tab_size);
		trace!(target: "ophis::indent", pos, indent, "indent.fallback");
		indent
	}
}
