use logos::Logos;

/// Number of columns a tab expands to before computing the indentation depth.
pub const TAB_WIDTH: usize = 4;
/// Number of columns that make up one level of list indentation.
pub const INDENT_WIDTH: usize = 2;

/// Raw tokens for the structural prefix of a single line. Only the start of
/// a line is ever lexed; everything after the first non-prefix token is
/// treated as text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
	#[token(" ")]
	Space,
	#[token("\t")]
	Tab,
	#[regex(r"#{1,6} ")]
	Heading,
	#[regex(r"[-*+] ")]
	Bullet,
	#[regex(r"\[[ xX]\]")]
	Checkbox,
}

/// The classification of one line of markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
	/// `#` to `######` followed by a space and the label.
	Heading { level: u8, text: String },
	/// A `-`, `*` or `+` bullet with an optional task checkbox.
	ListItem {
		depth: usize,
		text: String,
		checked: Option<bool>,
	},
	/// Anything else that isn't blank.
	Paragraph(String),
}

/// Classify a single line. Blank lines return `None`. Unrecognised syntax
/// always degrades to [`Line::Paragraph`].
pub fn classify(line: &str) -> Option<Line> {
	if line.trim().is_empty() {
		return None;
	}

	let mut lexer = Marker::lexer(line);
	let mut columns = 0;

	while let Some(token) = lexer.next() {
		match token {
			Ok(Marker::Space) => columns += 1,
			Ok(Marker::Tab) => columns += TAB_WIDTH,
			Ok(Marker::Heading) if columns == 0 => {
				// The slice is the run of `#` plus the trailing space.
				let level = (lexer.slice().len() - 1) as u8;
				let text = lexer.remainder().trim().to_string();
				return Some(Line::Heading { level, text });
			}
			Ok(Marker::Bullet) => {
				let (text, checked) = split_checkbox(lexer.remainder());
				return Some(Line::ListItem {
					depth: columns / INDENT_WIDTH,
					text,
					checked,
				});
			}
			_ => break,
		}
	}

	Some(Line::Paragraph(line.to_string()))
}

/// Pull a leading `[ ]`, `[x]` or `[X]` off the item text.
fn split_checkbox(rest: &str) -> (String, Option<bool>) {
	let rest = rest.trim();
	let mut lexer = Marker::lexer(rest);

	match lexer.next() {
		Some(Ok(Marker::Checkbox)) => {
			let checked = !lexer.slice().contains(' ');
			(lexer.remainder().trim().to_string(), Some(checked))
		}
		_ => (rest.to_string(), None),
	}
}

/// An opening or closing code fence: three or more backticks or tildes,
/// indented by at most three spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
	pub marker: char,
	pub length: usize,
}

impl Fence {
	/// Read a fence delimiter from the start of `line`.
	pub fn parse(line: &str) -> Option<Self> {
		let trimmed = line.trim_start_matches(' ');
		if line.len() - trimmed.len() > 3 {
			return None;
		}

		let marker = trimmed.chars().next().filter(|&c| matches!(c, '`' | '~'))?;
		let length = trimmed.chars().take_while(|&c| c == marker).count();
		if length < 3 {
			return None;
		}

		// Backtick fences cannot carry backticks in their info string.
		if marker == '`' && trimmed[length..].contains('`') {
			return None;
		}

		Some(Self { marker, length })
	}

	/// Whether `line` closes a block opened by this fence.
	pub fn is_closed_by(&self, line: &str) -> bool {
		Self::parse(line).is_some_and(|close| {
			close.marker == self.marker
				&& close.length >= self.length
				&& line.trim().chars().all(|c| c == self.marker)
		})
	}
}
