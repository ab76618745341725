// Host editors own the terminal; diagnostics go through tracing only.
#![deny(clippy::print_stderr)]

//! Editing support for Python syntax trees.
//!
//! Given an immutable [`SyntaxTree`](ophis_syntax::SyntaxTree) produced by an
//! external parser, this crate answers the three questions an editor asks on
//! every keystroke: how far to indent a line, how to style a node, and which
//! spans can be folded.
//!
//! # Architecture
//!
//! * [`text`]: Line lookup over the document text
//! * [`indent`]: Indentation rules keyed by node type, and the resolver that runs them
//! * [`highlight`]: Abstract style tags and the path-scoped rule table
//! * [`fold`]: Fold range rules
//! * [`language`]: Static language metadata (brackets, comments, reindent pattern)
//! * [`config`]: Indent unit and tab settings
//! * [`python`]: The Python rule tables bundled as a [`LanguageSupport`]
//!
//! All services are pure functions over their inputs; rule tables are built
//! once and can be shared across threads.

#[cfg(test)]
mod fixtures;

pub mod config;
pub mod fold;
pub mod highlight;
pub mod indent;
pub mod language;
pub mod python;
pub mod text;

pub use config::{ConfigError, IndentUnit, LanguageConfig};
pub use fold::{FoldFn, FoldRules, fold_body, fold_inside};
pub use highlight::{HighlightError, HighlightSpan, Highlighter, StyleRules, Tag, TagKind, TagModifiers, tags};
pub use indent::{DelimitedIndent, IndentContext, IndentRules, IndentService, IndentStrategy, delimited_indent};
pub use language::LanguageData;
pub use python::{LanguageSupport, PYTHON, python, python_with};
pub use text::{DocumentText, Line};
