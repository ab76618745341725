//! Language metadata.
//!
//! Static facts editors consult outside of tree queries: which brackets to
//! auto-close, how comments are spelled, and which typed lines should be
//! reindented immediately.

use regex::Regex;
use tracing::warn;

/// Static metadata for one language.
#[derive(Debug, Clone)]
pub struct LanguageData {
	/// Language name (e.g., "python").
	pub name: String,
	/// Opening spellings that get an automatic closer, longest last.
	pub close_brackets: Vec<String>,
	/// Line comment token(s) for the language.
	pub comment_tokens: Vec<String>,
	/// Block comment tokens (start, end).
	pub block_comment: Option<(String, String)>,
	/// Lines matching this pattern are reindented as soon as they are typed.
	pub indent_on_input: Option<Regex>,
}

impl LanguageData {
	/// Creates new language data.
	///
	/// An invalid `indent_on_input` pattern is logged and dropped.
	pub fn new(
		name: String,
		close_brackets: Vec<String>,
		comment_tokens: Vec<String>,
		block_comment: Option<(String, String)>,
		indent_on_input: Option<&str>,
	) -> Self {
		let indent_on_input = indent_on_input.and_then(|pattern| {
			Regex::new(pattern)
				.map_err(|e| warn!(language = %name, pattern, error = %e, "Invalid indent-on-input pattern"))
				.ok()
		});
		Self {
			name,
			close_brackets,
			comment_tokens,
			block_comment,
			indent_on_input,
		}
	}

	/// Python metadata.
	pub fn python() -> Self {
		let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
		Self::new(
			"python".to_string(),
			strings(&["(", "[", "{", "'", "\"", "'''", "\"\"\""]),
			strings(&["#"]),
			None,
			Some(r"^\s*[\}\]\)]$"),
		)
	}

	/// The primary line comment token.
	pub fn line_comment(&self) -> Option<&str> {
		self.comment_tokens.first().map(String::as_str)
	}

	/// Whether the line text typed so far should be reindented right away.
	///
	/// `line` is the text from the start of the line up to the cursor.
	pub fn should_reindent(&self, line: &str) -> bool {
		self.indent_on_input.as_ref().is_some_and(|re| re.is_match(line))
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_python_metadata() {
		let data = LanguageData::python();

		assert_eq!(data.name, "python");
		assert_eq!(data.close_brackets, ["(", "[", "{", "'", "\"", "'''", "\"\"\""]);
		assert_eq!(data.line_comment(), Some("#"));
		assert!(data.block_comment.is_none());
		assert!(data.indent_on_input.is_some());
	}

	#[rstest]
	#[case("    )", true)]
	#[case("]", true)]
	#[case("\t}", true)]
	#[case("    x)", false)]
	#[case("    ))", false)]
	#[case("    (", false)]
	#[case("", false)]
	fn test_should_reindent(#[case] line: &str, #[case] expected: bool) {
		assert_eq!(LanguageData::python().should_reindent(line), expected);
	}

	#[test]
	fn test_invalid_pattern_is_dropped() {
		let data = LanguageData::new("broken".to_string(), vec![], vec![], None, Some("[unclosed"));

		assert!(data.indent_on_input.is_none());
		assert!(!data.should_reindent(")"));
		assert_eq!(data.line_comment(), None);
	}
}
