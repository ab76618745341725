//! Line lookup over document text.
//!
//! Positions are byte offsets, matching the spans of
//! [`SyntaxTree`](ophis_syntax::SyntaxTree) nodes. Offsets past the end clamp
//! to the document length and offsets inside a multi-byte character snap back
//! to its start.

use std::borrow::Cow;

use ropey::Rope;

/// Read-only view of the document the tree was parsed from.
#[derive(Debug, Clone, Default)]
pub struct DocumentText {
	rope: Rope,
}

/// A single document line without its line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
	/// Zero-based line index.
	pub number: usize,
	/// Byte offset of the first character.
	pub from: u32,
	/// Byte offset just before the line break.
	pub to: u32,
	pub text: Cow<'a, str>,
}

impl Line<'_> {
	/// True when the line holds only whitespace.
	pub fn is_blank(&self) -> bool {
		self.text.trim().is_empty()
	}

	/// Width of the leading whitespace.
	pub fn indent(&self, tab_size: usize) -> usize {
		indentation_width(&self.text, tab_size)
	}
}

impl DocumentText {
	pub fn new(text: &str) -> Self {
		Self {
			rope: Rope::from_str(text),
		}
	}

	pub fn from_rope(rope: Rope) -> Self {
		Self { rope }
	}

	pub fn rope(&self) -> &Rope {
		&self.rope
	}

	/// Document length in bytes.
	pub fn len(&self) -> u32 {
		self.rope.len_bytes() as u32
	}

	pub fn is_empty(&self) -> bool {
		self.rope.len_bytes() == 0
	}

	pub fn line_count(&self) -> usize {
		self.rope.len_lines()
	}

	/// Clamps `pos` into the document and snaps it to a character boundary.
	pub fn clamp(&self, pos: u32) -> u32 {
		let pos = (pos as usize).min(self.rope.len_bytes());
		self.rope.char_to_byte(self.rope.byte_to_char(pos)) as u32
	}

	/// Returns the line containing `pos`.
	pub fn line_at(&self, pos: u32) -> Line<'_> {
		let pos = self.clamp(pos) as usize;
		self.line(self.rope.byte_to_line(pos))
	}

	/// Returns the line with the given zero-based index, clamped to the last line.
	pub fn line(&self, number: usize) -> Line<'_> {
		let number = number.min(self.rope.len_lines().saturating_sub(1));
		let from = self.rope.line_to_byte(number);
		let end = self.rope.line_to_byte(number + 1);
		let slice = self.rope.byte_slice(from..end);

		let mut to = end;
		if slice.len_bytes() > 0 && slice.byte(slice.len_bytes() - 1) == b'\n' {
			to -= 1;
			if to > from && self.rope.byte(to - 1) == b'\r' {
				to -= 1;
			}
		}

		Line {
			number,
			from: from as u32,
			to: to as u32,
			text: Cow::from(self.rope.byte_slice(from..to)),
		}
	}

	/// Text from `pos` to the end of its line.
	pub fn text_after(&self, pos: u32) -> Cow<'_, str> {
		let pos = self.clamp(pos);
		let line = self.line_at(pos);
		Cow::from(self.rope.byte_slice(pos as usize..line.to.max(pos) as usize))
	}

	/// True when nothing but whitespace follows `pos` up to the end of the document.
	pub fn is_blank_from(&self, pos: u32) -> bool {
		let pos = self.clamp(pos) as usize;
		self.rope.byte_slice(pos..).chars().all(char::is_whitespace)
	}

	/// End offset of the last non-whitespace character before `pos`, or 0.
	pub fn trim_end_before(&self, pos: u32) -> u32 {
		let pos = self.clamp(pos) as usize;
		let mut idx = self.rope.byte_to_char(pos);
		let mut chars = self.rope.chars_at(idx);
		while let Some(ch) = chars.prev() {
			if !ch.is_whitespace() {
				break;
			}
			idx -= 1;
		}
		self.rope.char_to_byte(idx) as u32
	}

	/// Indentation width of the line containing `pos`.
	pub fn line_indent(&self, pos: u32, tab_size: usize) -> usize {
		self.line_at(pos).indent(tab_size)
	}

	/// Visual column of `pos` within its line.
	pub fn column(&self, pos: u32, tab_size: usize) -> usize {
		let pos = self.clamp(pos);
		let line = self.line_at(pos);
		let prefix = self.rope.byte_slice(line.from as usize..pos.min(line.to) as usize);
		count_column(&Cow::from(prefix), tab_size)
	}
}

/// Visual width of `text`, advancing tabs to the next multiple of `tab_size`.
pub fn count_column(text: &str, tab_size: usize) -> usize {
	let tab_size = tab_size.max(1);
	text.chars().fold(0, |col, ch| match ch {
		'\t' => col + tab_size - col % tab_size,
		_ => col + 1,
	})
}

/// Visual width of the leading spaces and tabs of `text`.
pub fn indentation_width(text: &str, tab_size: usize) -> usize {
	let end = text.find(|c: char| c != ' ' && c != '\t').unwrap_or(text.len());
	count_column(&text[..end], tab_size)
}
