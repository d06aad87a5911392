use crate::Forest;
use crate::Node;
use crate::lexer::INDENT_WIDTH;

/// Render a forest back to markdown.
///
/// This is the inverse of [`parse`](crate::parse) for forests the engine
/// produced itself: lists emit nothing of their own, items are indented by
/// their level and paragraphs are written verbatim. Lines are joined with a
/// single `\n` and no trailing newline is added.
pub fn serialize(forest: &Forest) -> String {
	let mut lines = Vec::new();
	write_forest(forest, &mut lines);
	lines.join("\n")
}

fn write_forest(forest: &Forest, lines: &mut Vec<String>) {
	for node in forest.iter() {
		write_node(node, lines);
	}
}

fn write_node(node: &Node, lines: &mut Vec<String>) {
	match node {
		Node::Heading(heading) => {
			let hashes = "#".repeat(usize::from(heading.level));
			lines.push(format!("{hashes} {}", heading.text));
			write_forest(&heading.children, lines);
		}
		Node::List(list) => write_forest(&list.children, lines),
		Node::Item(item) => {
			let indent = " ".repeat(item.level * INDENT_WIDTH);
			let checkbox = match item.checked {
				Some(true) => "[x] ",
				Some(false) => "[ ] ",
				None => "",
			};
			lines.push(format!("{indent}- {checkbox}{}", item.text));
			write_forest(&item.children, lines);
		}
		Node::Paragraph(paragraph) => lines.push(paragraph.text.clone()),
	}
}
