//! Locate a sub-range of a document, hand only that range to the engine and
//! put the engine's output back in the same place.

use std::ops::Range;

use markdown::ParseOptions;
use markdown::mdast::Html;
use markdown::mdast::Node as MdNode;
use markdown::to_mdast;

use crate::Limits;
use crate::MdmergeError;
use crate::MdmergeResult;
use crate::MergeOptions;
use crate::lexer::Line;
use crate::lexer::classify;
use crate::merge_text;

const ANCHOR_PREFIX: &str = "anchor:";

/// Which part of a document to operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSelector {
	/// Everything between `<!-- anchor:NAME -->` and `<!-- /anchor:NAME -->`.
	Anchor(String),
	/// A heading with this text and everything below it up to the next
	/// heading of equal or shallower level.
	Heading(String),
}

impl SectionSelector {
	pub fn name(&self) -> &str {
		match self {
			Self::Anchor(name) | Self::Heading(name) => name,
		}
	}
}

/// A located section of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
	/// Byte range of the section's content within the document.
	pub range: Range<usize>,
	/// Whether the content is enclosed by anchor comments, which must stay on
	/// their own lines after splicing.
	pub anchored: bool,
}

impl Section {
	/// The section's content within `content`.
	pub fn content<'a>(&self, content: &'a str) -> &'a str {
		&content[self.range.clone()]
	}

	/// Replace the section's content within `content` with `replacement`.
	pub fn splice(&self, content: &str, replacement: &str) -> String {
		let original = self.content(content);
		let mut output = String::with_capacity(content.len() + replacement.len());
		output.push_str(&content[..self.range.start]);

		if self.anchored {
			output.push('\n');
			output.push_str(replacement);
			if !replacement.is_empty() {
				output.push('\n');
			}
		} else {
			output.push_str(replacement);
			if original.ends_with('\n') && !replacement.ends_with('\n') {
				output.push('\n');
			}
		}

		output.push_str(&content[self.range.end..]);
		output
	}
}

/// Find the section described by `selector`. Returns `None` when the
/// document contains no such section.
pub fn find_section(
	content: &str,
	selector: &SectionSelector,
) -> MdmergeResult<Option<Section>> {
	match selector {
		SectionSelector::Anchor(name) => find_anchor_section(content, name),
		SectionSelector::Heading(title) => find_heading_section(content, title),
	}
}

/// Merge `update` into the selected section of `base`, leaving the rest of
/// the document untouched.
pub fn merge_section(
	base: &str,
	update: &str,
	selector: &SectionSelector,
	options: MergeOptions,
	limits: &Limits,
) -> MdmergeResult<String> {
	if base.len() > limits.max_input_bytes {
		return Err(MdmergeError::InputTooLarge {
			size: base.len(),
			limit: limits.max_input_bytes,
		});
	}

	let Some(section) = find_section(base, selector)? else {
		return Err(MdmergeError::MissingSection(selector.name().to_string()));
	};

	tracing::debug!(
		section = selector.name(),
		start = section.range.start,
		end = section.range.end,
		"merging into section"
	);
	let merged = merge_text(section.content(base), update, options, limits)?;

	Ok(section.splice(base, &merged))
}

fn find_anchor_section(content: &str, name: &str) -> MdmergeResult<Option<Section>> {
	let mut start = None;

	for html in get_html_nodes(content)? {
		let Some(position) = html.position else {
			continue;
		};
		let Some(marker) = anchor_marker(&html.value) else {
			continue;
		};

		match marker {
			AnchorMarker::Open(open) if open == name && start.is_none() => {
				start = Some(position.end.offset);
			}
			AnchorMarker::Close(close) if close == name => {
				if let Some(start) = start {
					return Ok(Some(Section {
						range: start..position.start.offset,
						anchored: true,
					}));
				}
			}
			_ => {}
		}
	}

	match start {
		Some(_) => Err(MdmergeError::UnclosedSection(name.to_string())),
		None => Ok(None),
	}
}

fn find_heading_section(content: &str, title: &str) -> MdmergeResult<Option<Section>> {
	let mut open: Option<(usize, u8)> = None;

	for (start, level, text) in get_heading_lines(content)? {
		match open {
			Some((open_start, open_level)) if level <= open_level => {
				return Ok(Some(Section {
					range: open_start..start,
					anchored: false,
				}));
			}
			None if text == title => open = Some((start, level)),
			_ => {}
		}
	}

	Ok(open.map(|(start, _)| {
		Section {
			range: start..content.len(),
			anchored: false,
		}
	}))
}

/// Top level ATX headings as `(offset of the line, level, text)`. Headings
/// inside code blocks, block quotes and list items are not included. The text
/// is read with the line classifier so it compares the same way the merge
/// engine does.
fn get_heading_lines(content: &str) -> MdmergeResult<Vec<(usize, u8, String)>> {
	let mdast = get_mdast(content)?;
	let Some(children) = mdast.children() else {
		return Ok(vec![]);
	};

	let headings = children
		.iter()
		.filter_map(|node| {
			let MdNode::Heading(heading) = node else {
				return None;
			};
			let start = heading.position.as_ref()?.start.offset;
			let line = content.get(start..)?.lines().next()?;

			match classify(line)? {
				Line::Heading { level, text } => Some((start, level, text)),
				_ => None,
			}
		})
		.collect();

	Ok(headings)
}

enum AnchorMarker<'a> {
	Open(&'a str),
	Close(&'a str),
}

/// Read an anchor marker out of a raw HTML comment.
fn anchor_marker(value: &str) -> Option<AnchorMarker<'_>> {
	let body = value
		.trim()
		.strip_prefix("<!--")?
		.strip_suffix("-->")?
		.trim();

	if let Some(name) = body
		.strip_prefix('/')
		.and_then(|rest| rest.strip_prefix(ANCHOR_PREFIX))
	{
		return Some(AnchorMarker::Close(name.trim()));
	}

	body.strip_prefix(ANCHOR_PREFIX)
		.map(|name| AnchorMarker::Open(name.trim()))
}

/// Collect every HTML node in the document. Comments inside code blocks are
/// code, not HTML, so they never show up here.
pub fn get_html_nodes(content: impl AsRef<str>) -> MdmergeResult<Vec<Html>> {
	let mdast = get_mdast(content.as_ref())?;
	let mut html_nodes = vec![];
	collect_html(&mdast, &mut html_nodes);

	Ok(html_nodes)
}

fn get_mdast(content: &str) -> MdmergeResult<MdNode> {
	to_mdast(content, &ParseOptions::gfm()).map_err(|e| MdmergeError::Markdown(e.to_string()))
}

fn collect_html(node: &MdNode, nodes: &mut Vec<Html>) {
	match node {
		MdNode::Html(html) => nodes.push(html.clone()),
		_ => {
			if let Some(children) = node.children() {
				for child in children {
					collect_html(child, nodes);
				}
			}
		}
	}
}
