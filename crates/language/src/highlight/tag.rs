//! Abstract style tags.
//!
//! A [`Tag`] is a base category plus modifier flags, so "the name of a
//! function being defined" is `definition(function(variable name))` rather
//! than a variant of its own. Hosts map tags to concrete styles through
//! their dotted [scope names](Tag::scope_name).

use std::fmt;

use bitflags::bitflags;

/// Base style categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagKind {
	Comment,
	LineComment,
	Name,
	VariableName,
	PropertyName,
	ClassName,
	Literal,
	String,
	Number,
	Bool,
	Null,
	Keyword,
	ControlKeyword,
	OperatorKeyword,
	DefinitionKeyword,
	Modifier,
	SelfKeyword,
	Operator,
	UpdateOperator,
	ArithmeticOperator,
	BitwiseOperator,
	CompareOperator,
	DefinitionOperator,
	DerefOperator,
	Punctuation,
	Separator,
	Bracket,
	Paren,
	SquareBracket,
	Brace,
	Meta,
}

impl TagKind {
	/// The broader category this one refines, if any.
	pub const fn parent(self) -> Option<TagKind> {
		use TagKind::*;
		match self {
			LineComment => Some(Comment),
			VariableName | PropertyName | ClassName => Some(Name),
			String | Number | Bool | Null => Some(Literal),
			ControlKeyword | OperatorKeyword | DefinitionKeyword | Modifier | SelfKeyword => Some(Keyword),
			UpdateOperator | ArithmeticOperator | BitwiseOperator | CompareOperator | DefinitionOperator
			| DerefOperator => Some(Operator),
			Separator | Bracket => Some(Punctuation),
			Paren | SquareBracket | Brace => Some(Bracket),
			Comment | Name | Literal | Keyword | Operator | Punctuation | Meta => None,
		}
	}

	/// Dotted theme scope for this category.
	pub const fn scope(self) -> &'static str {
		use TagKind::*;
		match self {
			Comment => "comment",
			LineComment => "comment.line",
			Name | VariableName => "variable",
			PropertyName => "variable.other.member",
			ClassName => "type",
			Literal => "constant",
			String => "string",
			Number => "constant.numeric",
			Bool => "constant.builtin.boolean",
			Null => "constant.builtin",
			Keyword => "keyword",
			ControlKeyword => "keyword.control",
			OperatorKeyword => "keyword.operator",
			DefinitionKeyword => "keyword.storage",
			Modifier => "keyword.storage.modifier",
			SelfKeyword => "variable.builtin",
			Operator => "operator",
			UpdateOperator => "operator.update",
			ArithmeticOperator => "operator.arithmetic",
			BitwiseOperator => "operator.bitwise",
			CompareOperator => "operator.compare",
			DefinitionOperator => "operator.definition",
			DerefOperator => "operator.deref",
			Punctuation => "punctuation",
			Separator => "punctuation.delimiter",
			Bracket => "punctuation.bracket",
			Paren => "punctuation.bracket.paren",
			SquareBracket => "punctuation.bracket.square",
			Brace => "punctuation.bracket.brace",
			Meta => "attribute",
		}
	}
}

bitflags! {
	/// Refinements applied on top of a [`TagKind`].
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct TagModifiers: u8 {
		/// The name refers to something callable.
		const FUNCTION = 1 << 0;
		/// The occurrence defines the name.
		const DEFINITION = 1 << 1;
		const SPECIAL = 1 << 2;
		const CONSTANT = 1 << 3;
		/// Part of the language's standard environment.
		const STANDARD = 1 << 4;
		const LOCAL = 1 << 5;
	}
}

/// An abstract, renderer-agnostic style category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
	kind: TagKind,
	modifiers: TagModifiers,
}

impl Tag {
	pub const fn new(kind: TagKind) -> Self {
		Self {
			kind,
			modifiers: TagModifiers::empty(),
		}
	}

	#[inline]
	pub const fn kind(self) -> TagKind {
		self.kind
	}

	#[inline]
	pub const fn modifiers(self) -> TagModifiers {
		self.modifiers
	}

	pub const fn with(self, modifiers: TagModifiers) -> Self {
		Self {
			kind: self.kind,
			modifiers: self.modifiers.union(modifiers),
		}
	}

	/// True if this tag's kind is `kind` or refines it.
	pub fn is(self, kind: TagKind) -> bool {
		let mut cur = Some(self.kind);
		while let Some(k) = cur {
			if k == kind {
				return true;
			}
			cur = k.parent();
		}
		false
	}

	/// Dotted scope name, most general segment first.
	///
	/// `function` on a variable or property name turns it into a function
	/// scope; other modifiers append a segment each.
	pub fn scope_name(self) -> String {
		let m = self.modifiers;
		let mut scope = match self.kind {
			TagKind::VariableName | TagKind::Name if m.contains(TagModifiers::FUNCTION) => "function".to_string(),
			TagKind::PropertyName if m.contains(TagModifiers::FUNCTION) => "function.method".to_string(),
			kind if m.contains(TagModifiers::FUNCTION) => format!("{}.function", kind.scope()),
			kind => kind.scope().to_string(),
		};
		for (flag, segment) in [
			(TagModifiers::DEFINITION, "definition"),
			(TagModifiers::SPECIAL, "special"),
			(TagModifiers::CONSTANT, "constant"),
			(TagModifiers::STANDARD, "builtin"),
			(TagModifiers::LOCAL, "local"),
		] {
			if m.contains(flag) {
				scope.push('.');
				scope.push_str(segment);
			}
		}
		scope
	}

	/// Index of the longest recognised scope that prefixes this tag's scope.
	///
	/// Matching is by whole dot-separated segments, so `keyword.control`
	/// falls back to `keyword` when only the latter is recognised.
	pub fn resolve_scope(self, scopes: &[impl AsRef<str>]) -> Option<usize> {
		let name = self.scope_name();
		let parts: Vec<_> = name.split('.').collect();

		let mut best = None;
		let mut best_len = 0;
		for (i, scope) in scopes.iter().enumerate() {
			let mut len = 0;
			let mut matches = true;
			for (j, part) in scope.as_ref().split('.').enumerate() {
				match parts.get(j) {
					Some(&p) if p == part => len += 1,
					_ => {
						matches = false;
						break;
					}
				}
			}
			if matches && len > best_len {
				best = Some(i);
				best_len = len;
			}
		}
		best
	}
}

impl From<TagKind> for Tag {
	fn from(kind: TagKind) -> Self {
		Self::new(kind)
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.scope_name())
	}
}

/// Tag constants and modifier constructors.
pub mod tags {
	use super::{Tag, TagKind, TagModifiers};

	pub const COMMENT: Tag = Tag::new(TagKind::Comment);
	pub const LINE_COMMENT: Tag = Tag::new(TagKind::LineComment);
	pub const NAME: Tag = Tag::new(TagKind::Name);
	pub const VARIABLE_NAME: Tag = Tag::new(TagKind::VariableName);
	pub const PROPERTY_NAME: Tag = Tag::new(TagKind::PropertyName);
	pub const CLASS_NAME: Tag = Tag::new(TagKind::ClassName);
	pub const LITERAL: Tag = Tag::new(TagKind::Literal);
	pub const STRING: Tag = Tag::new(TagKind::String);
	pub const NUMBER: Tag = Tag::new(TagKind::Number);
	pub const BOOL: Tag = Tag::new(TagKind::Bool);
	pub const NULL: Tag = Tag::new(TagKind::Null);
	pub const KEYWORD: Tag = Tag::new(TagKind::Keyword);
	pub const CONTROL_KEYWORD: Tag = Tag::new(TagKind::ControlKeyword);
	pub const OPERATOR_KEYWORD: Tag = Tag::new(TagKind::OperatorKeyword);
	pub const DEFINITION_KEYWORD: Tag = Tag::new(TagKind::DefinitionKeyword);
	pub const MODIFIER: Tag = Tag::new(TagKind::Modifier);
	pub const SELF: Tag = Tag::new(TagKind::SelfKeyword);
	pub const OPERATOR: Tag = Tag::new(TagKind::Operator);
	pub const UPDATE_OPERATOR: Tag = Tag::new(TagKind::UpdateOperator);
	pub const ARITHMETIC_OPERATOR: Tag = Tag::new(TagKind::ArithmeticOperator);
	pub const BITWISE_OPERATOR: Tag = Tag::new(TagKind::BitwiseOperator);
	pub const COMPARE_OPERATOR: Tag = Tag::new(TagKind::CompareOperator);
	pub const DEFINITION_OPERATOR: Tag = Tag::new(TagKind::DefinitionOperator);
	pub const DEREF_OPERATOR: Tag = Tag::new(TagKind::DerefOperator);
	pub const PUNCTUATION: Tag = Tag::new(TagKind::Punctuation);
	pub const SEPARATOR: Tag = Tag::new(TagKind::Separator);
	pub const BRACKET: Tag = Tag::new(TagKind::Bracket);
	pub const PAREN: Tag = Tag::new(TagKind::Paren);
	pub const SQUARE_BRACKET: Tag = Tag::new(TagKind::SquareBracket);
	pub const BRACE: Tag = Tag::new(TagKind::Brace);
	pub const META: Tag = Tag::new(TagKind::Meta);

	pub const fn function(tag: Tag) -> Tag {
		tag.with(TagModifiers::FUNCTION)
	}

	pub const fn definition(tag: Tag) -> Tag {
		tag.with(TagModifiers::DEFINITION)
	}

	pub const fn special(tag: Tag) -> Tag {
		tag.with(TagModifiers::SPECIAL)
	}

	pub const fn constant(tag: Tag) -> Tag {
		tag.with(TagModifiers::CONSTANT)
	}

	pub const fn standard(tag: Tag) -> Tag {
		tag.with(TagModifiers::STANDARD)
	}

	pub const fn local(tag: Tag) -> Tag {
		tag.with(TagModifiers::LOCAL)
	}
}
