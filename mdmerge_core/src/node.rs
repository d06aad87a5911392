use derive_more::Deref;
use derive_more::DerefMut;
use serde::Deserialize;
use serde::Serialize;

/// An ordered sequence of sibling nodes.
///
/// The top level of a parsed document is a `Forest` and so are the children
/// of every container node. There is no root value visible to callers: the
/// forest itself plays the role of the virtual root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref, DerefMut)]
#[serde(transparent)]
pub struct Forest(pub Vec<Node>);

impl Forest {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reassign `position` on every node so that siblings are numbered
	/// `0..n` at each level of the tree.
	pub fn renumber(&mut self) {
		for (index, node) in self.0.iter_mut().enumerate() {
			node.set_position(index);
			if let Some(children) = node.children_mut() {
				children.renumber();
			}
		}
	}

	/// The number of nested levels in this forest. An empty forest has depth
	/// `0` and a flat forest has depth `1`.
	pub fn depth(&self) -> usize {
		self.0
			.iter()
			.map(|node| 1 + node.children().map_or(0, Forest::depth))
			.max()
			.unwrap_or(0)
	}

	/// Total number of nodes in the forest, counting every descendant.
	pub fn node_count(&self) -> usize {
		self.0
			.iter()
			.map(|node| 1 + node.children().map_or(0, Forest::node_count))
			.sum()
	}
}

impl From<Vec<Node>> for Forest {
	fn from(nodes: Vec<Node>) -> Self {
		let mut forest = Self(nodes);
		forest.renumber();
		forest
	}
}

impl FromIterator<Node> for Forest {
	fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
		iter.into_iter().collect::<Vec<_>>().into()
	}
}

/// The discriminant of a [`Node`], used where only the shape matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Heading,
	List,
	Item,
	Paragraph,
}

impl std::fmt::Display for NodeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Heading => write!(f, "heading"),
			Self::List => write!(f, "list"),
			Self::Item => write!(f, "item"),
			Self::Paragraph => write!(f, "paragraph"),
		}
	}
}

/// A node of the markdown tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
	Heading(Heading),
	List(List),
	Item(Item),
	Paragraph(Paragraph),
}

/// An ATX heading (`#` to `######`) and everything below it up to the next
/// heading of equal or shallower level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
	/// Between `1` and `6`.
	pub level: u8,
	/// The trimmed heading label.
	pub text: String,
	pub position: usize,
	pub children: Forest,
}

/// A run of list items sharing one indentation depth. Lists have no text of
/// their own and only exist to group items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
	/// Indentation depth shared by every direct item child.
	pub level: usize,
	pub position: usize,
	pub children: Forest,
}

/// A bullet list item, optionally carrying a task checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
	/// Indentation depth (two spaces per level, tabs count as four spaces).
	pub level: usize,
	pub text: String,
	/// `None` for a plain bullet, `Some(done)` for `[ ]` / `[x]`.
	pub checked: Option<bool>,
	pub position: usize,
	pub children: Forest,
}

/// Any other non-blank line, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
	pub text: String,
	pub position: usize,
}

impl Heading {
	pub fn new(level: u8, text: impl Into<String>) -> Self {
		Self {
			level,
			text: text.into(),
			position: 0,
			children: Forest::new(),
		}
	}

	#[must_use]
	pub fn with_children(mut self, children: impl Into<Forest>) -> Self {
		self.children = children.into();
		self
	}
}

impl List {
	pub fn new(level: usize) -> Self {
		Self {
			level,
			position: 0,
			children: Forest::new(),
		}
	}

	#[must_use]
	pub fn with_children(mut self, children: impl Into<Forest>) -> Self {
		self.children = children.into();
		self
	}
}

impl Item {
	pub fn new(level: usize, text: impl Into<String>, checked: Option<bool>) -> Self {
		Self {
			level,
			text: text.into(),
			checked,
			position: 0,
			children: Forest::new(),
		}
	}

	#[must_use]
	pub fn with_children(mut self, children: impl Into<Forest>) -> Self {
		self.children = children.into();
		self
	}
}

impl Paragraph {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			position: 0,
		}
	}
}

impl Node {
	pub fn kind(&self) -> NodeKind {
		match self {
			Self::Heading(_) => NodeKind::Heading,
			Self::List(_) => NodeKind::List,
			Self::Item(_) => NodeKind::Item,
			Self::Paragraph(_) => NodeKind::Paragraph,
		}
	}

	/// Index of this node among its siblings.
	pub fn position(&self) -> usize {
		match self {
			Self::Heading(heading) => heading.position,
			Self::List(list) => list.position,
			Self::Item(item) => item.position,
			Self::Paragraph(paragraph) => paragraph.position,
		}
	}

	pub fn set_position(&mut self, position: usize) {
		match self {
			Self::Heading(heading) => heading.position = position,
			Self::List(list) => list.position = position,
			Self::Item(item) => item.position = position,
			Self::Paragraph(paragraph) => paragraph.position = position,
		}
	}

	/// The node's own text. Lists have none.
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Heading(heading) => Some(&heading.text),
			Self::Item(item) => Some(&item.text),
			Self::Paragraph(paragraph) => Some(&paragraph.text),
			Self::List(_) => None,
		}
	}

	pub fn children(&self) -> Option<&Forest> {
		match self {
			Self::Heading(heading) => Some(&heading.children),
			Self::List(list) => Some(&list.children),
			Self::Item(item) => Some(&item.children),
			Self::Paragraph(_) => None,
		}
	}

	pub fn children_mut(&mut self) -> Option<&mut Forest> {
		match self {
			Self::Heading(heading) => Some(&mut heading.children),
			Self::List(list) => Some(&mut list.children),
			Self::Item(item) => Some(&mut item.children),
			Self::Paragraph(_) => None,
		}
	}
}

impl From<Heading> for Node {
	fn from(heading: Heading) -> Self {
		Self::Heading(heading)
	}
}

impl From<List> for Node {
	fn from(list: List) -> Self {
		Self::List(list)
	}
}

impl From<Item> for Node {
	fn from(item: Item) -> Self {
		Self::Item(item)
	}
}

impl From<Paragraph> for Node {
	fn from(paragraph: Paragraph) -> Self {
		Self::Paragraph(paragraph)
	}
}
