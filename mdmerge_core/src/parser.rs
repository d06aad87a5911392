use crate::Forest;
use crate::Heading;
use crate::Item;
use crate::Limits;
use crate::List;
use crate::MdmergeError;
use crate::MdmergeResult;
use crate::Node;
use crate::Paragraph;
use crate::lexer::Fence;
use crate::lexer::Line;
use crate::lexer::classify;

/// Parse markdown text into a forest using the default [`Limits`].
pub fn parse(content: impl AsRef<str>) -> MdmergeResult<Forest> {
	parse_with_limits(content, &Limits::default())
}

/// Parse markdown text into a forest.
///
/// Headings own everything below them until the next heading of equal or
/// shallower level. Consecutive bullet lines at the same indentation are
/// grouped into a [`List`], and deeper bullets nest under the nearest
/// shallower item. Every other non-blank line becomes a [`Paragraph`] child of
/// the innermost open container, and so does every line of a fenced code
/// block, fences included.
pub fn parse_with_limits(content: impl AsRef<str>, limits: &Limits) -> MdmergeResult<Forest> {
	let content = content.as_ref();

	if content.len() > limits.max_input_bytes {
		tracing::warn!(
			size = content.len(),
			limit = limits.max_input_bytes,
			"rejecting oversized input"
		);
		return Err(MdmergeError::InputTooLarge {
			size: content.len(),
			limit: limits.max_input_bytes,
		});
	}

	let mut builder = TreeBuilder::new(limits.max_depth);
	let mut line_count = 0;
	let mut fence: Option<Fence> = None;

	for line in content.lines() {
		line_count += 1;
		// `lines` only strips the `\n`, a trailing `\r` is left behind.
		let line = line.strip_suffix('\r').unwrap_or(line);

		// Fenced code is kept verbatim, a `#` in a shell snippet is not a
		// heading.
		if let Some(open) = fence {
			if open.is_closed_by(line) {
				fence = None;
			}
			if !line.trim().is_empty() {
				builder.push_line(Line::Paragraph(line.to_string()))?;
			}
			continue;
		}

		if let Some(open) = Fence::parse(line) {
			fence = Some(open);
			builder.push_line(Line::Paragraph(line.to_string()))?;
			continue;
		}

		if let Some(line) = classify(line) {
			builder.push_line(line)?;
		}
	}

	let forest = builder.finish();
	tracing::debug!(
		lines = line_count,
		nodes = forest.node_count(),
		"parsed markdown"
	);

	Ok(forest)
}

/// A node under construction. Children refer to other slots by index so the
/// open-container stack can hold plain indices while nodes are still being
/// appended to.
#[derive(Debug)]
struct Slot {
	kind: SlotKind,
	children: Vec<usize>,
}

#[derive(Debug)]
enum SlotKind {
	Root,
	Heading {
		level: u8,
		text: String,
	},
	List {
		level: usize,
	},
	Item {
		level: usize,
		text: String,
		checked: Option<bool>,
	},
	Paragraph {
		text: String,
	},
}

const ROOT: usize = 0;

struct TreeBuilder {
	/// Every node created so far. The virtual root always lives at index 0.
	arena: Vec<Slot>,
	/// Indices of the currently open containers, outermost first.
	stack: Vec<usize>,
	max_depth: usize,
}

impl TreeBuilder {
	fn new(max_depth: usize) -> Self {
		Self {
			arena: vec![Slot {
				kind: SlotKind::Root,
				children: vec![],
			}],
			stack: vec![ROOT],
			max_depth,
		}
	}

	fn top(&self) -> usize {
		self.stack.last().copied().unwrap_or(ROOT)
	}

	fn top_kind(&self) -> &SlotKind {
		&self.arena[self.top()].kind
	}

	fn push_line(&mut self, line: Line) -> MdmergeResult<()> {
		match line {
			Line::Heading { level, text } => {
				// Headings never nest inside lists, and close any heading of
				// the same or a deeper level.
				while self.stack.len() > 1 {
					let close = match self.top_kind() {
						SlotKind::Heading { level: open, .. } => *open >= level,
						_ => true,
					};
					if !close {
						break;
					}
					self.stack.pop();
				}

				let heading = self.append(SlotKind::Heading { level, text });
				self.open(heading)?;
			}
			Line::ListItem {
				depth,
				text,
				checked,
			} => {
				while self.stack.len() > 1 {
					let close = match self.top_kind() {
						SlotKind::Item { level, .. } => *level >= depth,
						SlotKind::List { level } => *level > depth,
						_ => false,
					};
					if !close {
						break;
					}
					self.stack.pop();
				}

				let reuse = matches!(self.top_kind(), SlotKind::List { level } if *level == depth);
				if !reuse {
					let list = self.append(SlotKind::List { level: depth });
					self.open(list)?;
				}

				let item = self.append(SlotKind::Item {
					level: depth,
					text,
					checked,
				});
				self.open(item)?;
			}
			Line::Paragraph(text) => {
				self.append(SlotKind::Paragraph { text });
			}
		}

		Ok(())
	}

	/// Create a slot as the last child of the current top of the stack.
	fn append(&mut self, kind: SlotKind) -> usize {
		let index = self.arena.len();
		self.arena.push(Slot {
			kind,
			children: vec![],
		});
		let parent = self.top();
		self.arena[parent].children.push(index);
		index
	}

	fn open(&mut self, index: usize) -> MdmergeResult<()> {
		// The root is not counted as a level of nesting.
		let depth = self.stack.len();
		if depth > self.max_depth {
			tracing::warn!(depth, limit = self.max_depth, "document nested too deeply");
			return Err(MdmergeError::TooDeeplyNested {
				depth,
				limit: self.max_depth,
			});
		}

		self.stack.push(index);
		Ok(())
	}

	fn finish(mut self) -> Forest {
		let children = std::mem::take(&mut self.arena[ROOT].children);
		self.collect(&children)
	}

	/// Move the slots listed in `indices` out of the arena into owned nodes,
	/// numbering them by their order among siblings.
	fn collect(&mut self, indices: &[usize]) -> Forest {
		let mut nodes = Vec::with_capacity(indices.len());

		for (position, &index) in indices.iter().enumerate() {
			let slot = &mut self.arena[index];
			let kind = std::mem::replace(&mut slot.kind, SlotKind::Root);
			let child_indices = std::mem::take(&mut slot.children);
			let children = self.collect(&child_indices);

			let node = match kind {
				SlotKind::Heading { level, text } => {
					Node::Heading(Heading {
						level,
						text,
						position,
						children,
					})
				}
				SlotKind::List { level } => {
					Node::List(List {
						level,
						position,
						children,
					})
				}
				SlotKind::Item {
					level,
					text,
					checked,
				} => {
					Node::Item(Item {
						level,
						text,
						checked,
						position,
						children,
					})
				}
				SlotKind::Paragraph { text } => Node::Paragraph(Paragraph { text, position }),
				// Only the root slot carries this kind and it is never a child.
				SlotKind::Root => continue,
			};

			nodes.push(node);
		}

		Forest(nodes)
	}
}
