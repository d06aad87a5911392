use std::collections::HashMap;

use crate::Forest;
use crate::MergeOptions;
use crate::Node;
use crate::matcher::Fallback;
use crate::merge::merge_checked;
use crate::merge::merge_into;

/// Collapse repeated headings and items at every level of the forest.
///
/// A heading repeating an earlier sibling's level and text is removed after
/// its children are folded into the first occurrence. An item repeating an
/// earlier sibling's text (ignoring case) is removed, passing its checked
/// state on to the first occurrence. Paragraphs and lists are always kept.
///
/// Running `dedupe` on its own output changes nothing.
pub fn dedupe(forest: &Forest) -> Forest {
	let mut kept: Vec<Node> = Vec::with_capacity(forest.len());
	let mut headings: HashMap<(u8, &str), usize> = HashMap::new();
	let mut items: HashMap<String, usize> = HashMap::new();

	for node in forest.iter() {
		match node {
			Node::Heading(heading) => {
				let key = (heading.level, heading.text.as_str());
				if let Some(&first) = headings.get(&key) {
					tracing::debug!(text = %heading.text, level = heading.level, "collapsing duplicate heading");
					if let Node::Heading(first) = &mut kept[first] {
						merge_into(
							&mut first.children,
							&heading.children,
							MergeOptions::patch(),
							Fallback::IdentityOnly,
						);
					}
					continue;
				}
				headings.insert(key, kept.len());
			}
			Node::Item(item) => {
				let key = item.text.to_lowercase();
				if let Some(&first) = items.get(&key) {
					tracing::debug!(text = %item.text, "dropping duplicate item");
					if let Node::Item(first) = &mut kept[first] {
						if item.checked == Some(true) {
							first.checked = merge_checked(first.checked, item.checked);
						}
					}
					continue;
				}
				items.insert(key, kept.len());
			}
			Node::List(_) | Node::Paragraph(_) => {}
		}

		kept.push(node.clone());
	}

	for node in &mut kept {
		if let Some(children) = node.children_mut() {
			*children = dedupe(children);
		}
	}

	let mut result = Forest(kept);
	result.renumber();
	result
}
