//! Highlight classification.
//!
//! A [`StyleRules`] table maps node types, optionally scoped by their
//! ancestors, to abstract [`Tag`]s. Selectors are parsed once when the table
//! is built; classification is a hash lookup followed by a short scan of the
//! rules registered for that type.
//!
//! # Selectors
//!
//! A selector string holds space-separated alternatives. Each alternative is
//! one of:
//!
//! * a bare type name: `VariableName`, `for`, `(`
//! * a quoted literal spelling: `'*'`, `'**'`
//! * a path: `CallExpression/VariableName`, where every segment but the last
//!   names the direct parent of the one after it and `*` matches any single
//!   ancestor
//!
//! When several rules match, a path beats a bare type, which beats a literal.
//! Longer paths beat shorter ones.

use std::fmt;

use ophis_syntax::Node;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

mod highlighter;
mod tag;

pub use highlighter::{HighlightSpan, Highlighter};
pub use tag::{Tag, TagKind, TagModifiers, tags};

/// A selector in a style table could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
	#[error("selector {selector:?} has no alternatives")]
	EmptySelector { selector: String },

	#[error("selector {selector:?} has an empty path segment")]
	EmptySegment { selector: String },

	#[error("selector {selector:?} has an unterminated quoted literal")]
	UnterminatedLiteral { selector: String },

	/// `*` may only stand for ancestors.
	#[error("selector {selector:?} ends in a wildcard")]
	WildcardTarget { selector: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Name(Box<str>),
	Any,
}

impl Segment {
	fn matches(&self, name: &str) -> bool {
		match self {
			Segment::Name(n) => &**n == name,
			Segment::Any => true,
		}
	}
}

#[derive(Debug, Clone)]
struct Rule {
	/// Required ancestors, innermost first.
	context: SmallVec<[Segment; 2]>,
	literal: bool,
	tag: Tag,
}

impl Rule {
	fn rank(&self) -> (usize, bool) {
		(self.context.len(), !self.literal)
	}
}

/// Node type to tag mapping with path-scoped overrides.
#[derive(Clone, Default)]
pub struct StyleRules {
	by_kind: FxHashMap<Box<str>, SmallVec<[Rule; 2]>>,
}

impl StyleRules {
	/// Parses a style table.
	///
	/// Entries are `(selector, tag)` pairs. Rules for the same target keep
	/// their relative order when they are equally specific.
	pub fn new(entries: &[(&str, Tag)]) -> Result<Self, HighlightError> {
		let mut by_kind: FxHashMap<Box<str>, SmallVec<[Rule; 2]>> = FxHashMap::default();
		let mut count = 0usize;

		for &(selector, tag) in entries {
			let mut any = false;
			for alternative in selector.split_whitespace() {
				let (target, rule) = parse_alternative(selector, alternative, tag)?;
				by_kind.entry(target).or_default().push(rule);
				count += 1;
				any = true;
			}
			if !any {
				return Err(HighlightError::EmptySelector {
					selector: selector.to_string(),
				});
			}
		}

		for rules in by_kind.values_mut() {
			rules.sort_by(|a, b| b.rank().cmp(&a.rank()));
		}

		debug!(target: "ophis::highlight", rules = count, kinds = by_kind.len(), "style_rules.built");
		Ok(Self { by_kind })
	}

	/// Number of distinct node types with at least one rule.
	pub fn len(&self) -> usize {
		self.by_kind.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_kind.is_empty()
	}

	/// Tag for `node`, taking its ancestors into account.
	pub fn classify(&self, node: Node<'_>) -> Option<Tag> {
		let rules = self.by_kind.get(node.name())?;
		rules
			.iter()
			.find(|rule| context_matches(&rule.context, node.ancestors().skip(1).map(|n| n.name())))
			.map(|rule| rule.tag)
	}

	/// Tag for a node of type `kind` whose ancestors, innermost first, are
	/// `ancestors`.
	pub fn classify_path(&self, kind: &str, ancestors: &[&str]) -> Option<Tag> {
		let rules = self.by_kind.get(kind)?;
		rules
			.iter()
			.find(|rule| context_matches(&rule.context, ancestors.iter().copied()))
			.map(|rule| rule.tag)
	}
}

impl fmt::Debug for StyleRules {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let rules: usize = self.by_kind.values().map(SmallVec::len).sum();
		f.debug_struct("StyleRules")
			.field("kinds", &self.by_kind.len())
			.field("rules", &rules)
			.finish()
	}
}

fn context_matches<'a>(context: &[Segment], mut ancestors: impl Iterator<Item = &'a str>) -> bool {
	context
		.iter()
		.all(|segment| ancestors.next().is_some_and(|name| segment.matches(name)))
}

/// Parses one alternative into its target type name and rule.
fn parse_alternative(selector: &str, alternative: &str, tag: Tag) -> Result<(Box<str>, Rule), HighlightError> {
	let segments = split_path(selector, alternative)?;
	let Some(((target, literal), ancestors)) = segments.split_last() else {
		return Err(HighlightError::EmptySegment {
			selector: selector.to_string(),
		});
	};

	let target = match target {
		Segment::Name(name) => name.clone(),
		Segment::Any => {
			return Err(HighlightError::WildcardTarget {
				selector: selector.to_string(),
			});
		}
	};

	let context = ancestors.iter().rev().map(|(segment, _)| segment.clone()).collect();
	Ok((
		target,
		Rule {
			context,
			literal: *literal,
			tag,
		},
	))
}

/// Splits `A/'/'/B` into segments, honouring quotes. Each segment is paired
/// with whether it was quoted.
fn split_path(selector: &str, alternative: &str) -> Result<Vec<(Segment, bool)>, HighlightError> {
	let empty = || HighlightError::EmptySegment {
		selector: selector.to_string(),
	};

	let mut segments = Vec::new();
	let mut rest = alternative;
	loop {
		let (segment, tail) = if let Some(quoted) = rest.strip_prefix('\'') {
			let close = quoted.find('\'').ok_or_else(|| HighlightError::UnterminatedLiteral {
				selector: selector.to_string(),
			})?;
			if close == 0 {
				return Err(empty());
			}
			(
				(Segment::Name(quoted[..close].into()), true),
				&quoted[close + 1..],
			)
		} else {
			let end = rest.find('/').unwrap_or(rest.len());
			let raw = &rest[..end];
			if raw.is_empty() {
				return Err(empty());
			}
			let segment = if raw == "*" {
				Segment::Any
			} else {
				Segment::Name(raw.into())
			};
			((segment, false), &rest[end..])
		};
		segments.push(segment);

		if tail.is_empty() {
			return Ok(segments);
		}
		rest = tail.strip_prefix('/').ok_or_else(empty)?;
		if rest.is_empty() {
			return Err(empty());
		}
	}
}
