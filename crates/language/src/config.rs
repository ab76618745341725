//! Indentation settings for a language.
//!
//! Settings are read from TOML:
//!
//! ```toml
//! indent-unit = "\t"
//! tab-size = 8
//! align-delimited = true
//! ```
//!
//! Every key is optional.

use serde::Deserialize;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The indent unit is empty or mixes tabs and spaces.
	#[error("invalid indent unit {0:?} (expected only spaces or only tabs)")]
	InvalidIndentUnit(String),

	/// Tab size of zero.
	#[error("tab size must be at least 1")]
	InvalidTabSize,
}

/// The whitespace inserted for one indentation level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct IndentUnit(String);

impl IndentUnit {
	pub fn new(unit: impl Into<String>) -> Result<Self, ConfigError> {
		let unit = unit.into();
		let uniform = unit.chars().all(|c| c == ' ') || unit.chars().all(|c| c == '\t');
		if unit.is_empty() || !uniform {
			return Err(ConfigError::InvalidIndentUnit(unit));
		}
		Ok(Self(unit))
	}

	pub fn spaces(count: usize) -> Self {
		Self(" ".repeat(count.max(1)))
	}

	pub fn tab() -> Self {
		Self("\t".to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Column width of one unit.
	pub fn width(&self, tab_size: usize) -> usize {
		crate::text::count_column(&self.0, tab_size)
	}
}

impl Default for IndentUnit {
	fn default() -> Self {
		Self::spaces(4)
	}
}

impl TryFrom<String> for IndentUnit {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

/// Per-language indentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LanguageConfig {
	pub indent_unit: IndentUnit,
	pub tab_size: usize,
	/// Align continuation lines of bracketed lists with the content after
	/// the opening delimiter instead of indenting by one unit.
	pub align_delimited: bool,
}

impl Default for LanguageConfig {
	fn default() -> Self {
		Self {
			indent_unit: IndentUnit::default(),
			tab_size: 4,
			align_delimited: false,
		}
	}
}

impl LanguageConfig {
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		if config.tab_size == 0 {
			return Err(ConfigError::InvalidTabSize);
		}
		Ok(config)
	}

	/// Width of one indentation level in columns.
	pub fn unit_width(&self) -> usize {
		self.indent_unit.width(self.tab_size)
	}
}
