//! The Python language definition.
//!
//! Rule tables are keyed by the node type names of the Python grammar the
//! host's parser implements (`Script`, `Body`, `ArgList`, ...).

use std::ops::{Range, RangeBounds};
use std::sync::LazyLock;

use ophis_syntax::{Node, SyntaxTree};
use tracing::{debug, error};

use crate::config::LanguageConfig;
use crate::fold::{FoldRules, fold_body, fold_inside};
use crate::highlight::tags::*;
use crate::highlight::{HighlightError, Highlighter, StyleRules, Tag};
use crate::indent::{IndentRules, IndentService, body_indent, delimited_indent, script_indent};
use crate::language::LanguageData;
use crate::text::DocumentText;

/// Python support built with the default configuration.
pub static PYTHON: LazyLock<LanguageSupport> = LazyLock::new(python);

/// Bracketed constructs and the delimiter that closes each.
const DELIMITED: &[(&str, &str)] = &[
	("ArgList", ")"),
	("ArrayExpression", "]"),
	("DictionaryExpression", "}"),
	("ParamList", ")"),
	("ParenthesizedExpression", ")"),
	("TupleExpression", ")"),
	("SetExpression", "}"),
	("ArrayComprehensionExpression", "]"),
	("DictionaryComprehensionExpression", "}"),
	("SetComprehensionExpression", "}"),
	("ComprehensionExpression", ")"),
];

const STYLES: &[(&str, Tag)] = &[
	("async '*' '**' FormatConversion", MODIFIER),
	(
		"for while if elif else try except finally return raise break continue with pass assert await yield",
		CONTROL_KEYWORD,
	),
	("in not and or is del", OPERATOR_KEYWORD),
	("import from def class global nonlocal lambda", DEFINITION_KEYWORD),
	("with as print", KEYWORD),
	("self", SELF),
	("Boolean", BOOL),
	("None", NULL),
	("VariableName", VARIABLE_NAME),
	("CallExpression/VariableName", function(VARIABLE_NAME)),
	("FunctionDefinition/VariableName", function(definition(VARIABLE_NAME))),
	("ClassDefinition/VariableName", definition(CLASS_NAME)),
	("PropertyName", PROPERTY_NAME),
	("CallExpression/MemberExpression/PropertyName", function(PROPERTY_NAME)),
	("Comment", LINE_COMMENT),
	("Number", NUMBER),
	("String", STRING),
	("FormatString", special(STRING)),
	("UpdateOp", UPDATE_OPERATOR),
	("ArithOp", ARITHMETIC_OPERATOR),
	("BitOp", BITWISE_OPERATOR),
	("CompareOp", COMPARE_OPERATOR),
	("AssignOp", DEFINITION_OPERATOR),
	("Ellipsis", PUNCTUATION),
	("At", META),
	("( )", PAREN),
	("[ ]", SQUARE_BRACKET),
	("{ }", BRACE),
	(".", DEREF_OPERATOR),
	(", ;", SEPARATOR),
];

/// Indentation rules for Python under `config`.
pub fn indent_service(config: &LanguageConfig) -> IndentService {
	let mut rules = IndentRules::new()
		.with("Body", body_indent)
		.with("Script", script_indent);
	for &(kind, closing) in DELIMITED {
		rules = rules.with(kind, delimited_indent(closing).aligned(config.align_delimited));
	}
	IndentService::new(rules, config.unit_width(), config.tab_size)
}

/// Fold rules for Python.
pub fn fold_rules() -> FoldRules {
	FoldRules::new().with("Body", fold_body).with(
		"ArrayExpression DictionaryExpression TupleExpression SetExpression ParamList ArgList",
		fold_inside,
	)
}

/// The Python style table.
pub fn style_rules() -> Result<StyleRules, HighlightError> {
	StyleRules::new(STYLES)
}

/// Python support with the default configuration.
pub fn python() -> LanguageSupport {
	python_with(LanguageConfig::default())
}

/// Python support with a custom configuration.
pub fn python_with(config: LanguageConfig) -> LanguageSupport {
	let style = style_rules().unwrap_or_else(|e| {
		error!(error = %e, "Python style table rejected, highlighting disabled");
		StyleRules::default()
	});
	let support = LanguageSupport {
		data: LanguageData::python(),
		indent: indent_service(&config),
		style,
		folds: fold_rules(),
		config,
	};
	debug!(
		language = %support.data.name,
		indent_rules = support.indent.rules().len(),
		style_kinds = support.style.len(),
		fold_rules = support.folds.len(),
		"language.loaded"
	);
	support
}

/// Everything an editor needs for one language, bundled.
#[derive(Debug, Clone)]
pub struct LanguageSupport {
	data: LanguageData,
	indent: IndentService,
	style: StyleRules,
	folds: FoldRules,
	config: LanguageConfig,
}

impl LanguageSupport {
	pub fn data(&self) -> &LanguageData {
		&self.data
	}

	pub fn config(&self) -> &LanguageConfig {
		&self.config
	}

	pub fn indent_service(&self) -> &IndentService {
		&self.indent
	}

	pub fn style_rules(&self) -> &StyleRules {
		&self.style
	}

	pub fn fold_rules(&self) -> &FoldRules {
		&self.folds
	}

	/// Indentation width for the line at `pos`.
	pub fn indent(&self, tree: &SyntaxTree, text: &DocumentText, pos: u32) -> usize {
		self.indent.resolve_indent(tree, text, pos)
	}

	pub fn classify(&self, node: Node<'_>) -> Option<Tag> {
		self.style.classify(node)
	}

	pub fn highlighter<'a>(&'a self, tree: &'a SyntaxTree, range: impl RangeBounds<u32>) -> Highlighter<'a> {
		Highlighter::new(tree, &self.style, range)
	}

	pub fn fold_range(&self, node: Node<'_>) -> Option<Range<u32>> {
		self.folds.fold_range(node)
	}

	/// Fold range for the zero-based line `number`.
	pub fn foldable(&self, tree: &SyntaxTree, text: &DocumentText, number: usize) -> Option<Range<u32>> {
		self.folds.foldable_on_line(tree, text, number)
	}
}
