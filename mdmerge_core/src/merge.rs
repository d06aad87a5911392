use serde::Deserialize;
use serde::Serialize;

use crate::Forest;
use crate::Node;
use crate::dedupe::dedupe;
use crate::matcher::Fallback;
use crate::matcher::find_with;
use crate::matcher::has_identity;

/// Controls how an update forest is combined with a base forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOptions {
	/// Substitute a matched node's whole subtree with the update's version
	/// instead of patching it in place.
	pub replace: bool,
	/// Collapse duplicate headings and items once merging is done.
	pub dedupe: bool,
}

impl MergeOptions {
	/// The default, non-destructive mode.
	pub fn patch() -> Self {
		Self::default()
	}

	/// Matched subtrees are fully overridden by the update.
	pub fn replace() -> Self {
		Self {
			replace: true,
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_dedupe(mut self, dedupe: bool) -> Self {
		self.dedupe = dedupe;
		self
	}
}

/// Merge `update` into a copy of `base`.
///
/// Every update node is paired with an existing sibling through the
/// [matcher](crate::matcher). Matched nodes are either patched (text
/// refreshed, checkboxes OR-ed, children merged recursively) or replaced,
/// depending on [`MergeOptions::replace`]. Unmatched nodes are inserted next
/// to the slot their preceding update sibling landed in, so new content keeps
/// its order relative to the content around it. A paragraph with no such
/// neighbour returns to its own index. Insertions never break the sibling
/// order the parser produces, so the result serializes and parses back to
/// itself. Content only present in `base` is never removed.
pub fn merge(base: &Forest, update: &Forest, options: MergeOptions) -> Forest {
	let mut result = base.clone();
	merge_into(&mut result, update, options, Fallback::Positional);
	result.renumber();

	if options.dedupe {
		dedupe(&result)
	} else {
		result
	}
}

/// Merge one level of siblings in place. Positions are left stale and must be
/// renumbered by the caller.
pub(crate) fn merge_into(
	result: &mut Forest,
	update: &Forest,
	options: MergeOptions,
	fallback: Fallback,
) {
	// Index in `result` of the slot the previous update sibling ended up in.
	let mut cursor: Option<usize> = None;

	for (index, node) in update.iter().enumerate() {
		if let Some(found) = find_with(result, node, fallback) {
			if options.replace {
				tracing::trace!(kind = %node.kind(), slot = found, "replacing matched node");
				result[found] = node.clone();
			} else {
				tracing::trace!(kind = %node.kind(), slot = found, "patching matched node");
				patch(&mut result[found], node, options, fallback);
			}
			cursor = Some(found);
			continue;
		}

		let existing: &[Node] = result;
		let slot = match cursor {
			Some(previous) => previous + 1,
			None => {
				update
					.iter()
					.skip(index + 1)
					.find_map(|next| find_with(existing, next, fallback))
					.or_else(|| keyless_slot(existing, node, fallback))
					.unwrap_or(existing.len())
			}
		};
		let slot = serializable_slot(existing, node, slot.min(existing.len()));

		tracing::debug!(kind = %node.kind(), slot, "inserting new node");
		result.insert(slot, node.clone());
		cursor = Some(slot);
	}
}

/// A paragraph with no anchoring neighbour goes back to its own index when
/// positions are meaningful.
fn keyless_slot(siblings: &[Node], node: &Node, fallback: Fallback) -> Option<usize> {
	if fallback != Fallback::Positional || has_identity(node) {
		return None;
	}

	Some(node.position()).filter(|&position| position <= siblings.len())
}

/// The order in which the parser can emit siblings: paragraphs first, then
/// lists (and items) from the deepest level up, then headings from the
/// deepest level up. Any other order changes shape when written and parsed
/// again, e.g. a paragraph after a list is read back as part of its last
/// item.
fn sibling_order(node: &Node) -> (u8, usize) {
	match node {
		Node::Paragraph(_) => (0, 0),
		Node::List(list) => (1, usize::MAX - list.level),
		Node::Item(_) => (1, 0),
		Node::Heading(heading) => (2, usize::from(u8::MAX - heading.level)),
	}
}

/// Move `slot` into the range where `node` keeps `siblings` in parser order.
fn serializable_slot(siblings: &[Node], node: &Node, slot: usize) -> usize {
	let order = sibling_order(node);
	let lower = siblings.partition_point(|sibling| sibling_order(sibling) < order);
	let upper = siblings
		.partition_point(|sibling| sibling_order(sibling) <= order)
		.max(lower);

	slot.clamp(lower, upper)
}

/// Fold `update` into the matched `existing` node.
fn patch(existing: &mut Node, update: &Node, options: MergeOptions, fallback: Fallback) {
	if let Some(text) = update.text() {
		if !text.is_empty() {
			set_text(existing, text);
		}
	}

	if let (Node::Item(existing), Node::Item(update)) = (&mut *existing, update) {
		existing.checked = merge_checked(existing.checked, update.checked);
	}

	if let (Some(children), Some(update_children)) = (existing.children_mut(), update.children()) {
		merge_into(children, update_children, options, fallback);
	}
}

fn set_text(node: &mut Node, text: &str) {
	let current = match node {
		Node::Heading(heading) => &mut heading.text,
		Node::Item(item) => &mut item.text,
		Node::Paragraph(paragraph) => &mut paragraph.text,
		Node::List(_) => return,
	};

	if current != text {
		text.clone_into(current);
	}
}

/// A checked item stays checked. Otherwise the existing state wins and the
/// update only fills in a missing checkbox.
pub fn merge_checked(existing: Option<bool>, update: Option<bool>) -> Option<bool> {
	match (existing, update) {
		(Some(true), _) | (_, Some(true)) => Some(true),
		(Some(false), _) | (None, Some(false)) => Some(false),
		(None, None) => None,
	}
}
