use crate::Node;

/// How a candidate without an identity match may still be paired with an
/// existing sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
	/// A keyless node (a paragraph) matches the sibling of the same kind at
	/// its own position.
	#[default]
	Positional,
	/// Only identity matches count.
	IdentityOnly,
}

/// Find the sibling that is the "same" node as `candidate`.
///
/// Headings match on level and text, items on text alone (checked state and
/// indentation are ignored), and lists on level. Paragraphs carry no identity
/// and are paired with the paragraph at the same index instead.
pub fn find(siblings: &[Node], candidate: &Node) -> Option<usize> {
	find_with(siblings, candidate, Fallback::Positional)
}

/// Like [`find`] but never falls back to positional matching.
pub fn find_by_identity(siblings: &[Node], candidate: &Node) -> Option<usize> {
	find_with(siblings, candidate, Fallback::IdentityOnly)
}

pub fn find_with(siblings: &[Node], candidate: &Node, fallback: Fallback) -> Option<usize> {
	if has_identity(candidate) {
		// Prefer the sibling already sitting at the candidate's position so
		// repeated keys pair up in order.
		let position = candidate.position();
		if siblings
			.get(position)
			.is_some_and(|sibling| same_identity(sibling, candidate))
		{
			return Some(position);
		}

		return siblings
			.iter()
			.position(|sibling| same_identity(sibling, candidate));
	}

	match fallback {
		Fallback::Positional => {
			let position = candidate.position();
			siblings
				.get(position)
				.filter(|sibling| sibling.kind() == candidate.kind())
				.map(|_| position)
		}
		Fallback::IdentityOnly => None,
	}
}

/// Whether nodes of this kind can be matched by a structural key.
pub fn has_identity(node: &Node) -> bool {
	match node {
		Node::Heading(_) | Node::Item(_) | Node::List(_) => true,
		Node::Paragraph(_) => false,
	}
}

/// Structural identity between two nodes. Case sensitive.
pub fn same_identity(existing: &Node, candidate: &Node) -> bool {
	match (existing, candidate) {
		(Node::Heading(a), Node::Heading(b)) => a.level == b.level && a.text == b.text,
		(Node::Item(a), Node::Item(b)) => a.text == b.text,
		(Node::List(a), Node::List(b)) => a.level == b.level,
		_ => false,
	}
}
