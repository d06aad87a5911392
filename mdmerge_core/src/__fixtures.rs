use crate::Forest;
use crate::Heading;
use crate::Item;
use crate::List;
use crate::Node;

pub const PROJECT_NOTES: &str = "# Project

Intro paragraph.

## Tasks
- [x] buy milk
- [ ] write report
  - [ ] outline
## Notes
- remember the milk
";

pub const PROJECT_UPDATE: &str = "# Project
## Tasks
- [ ] buy milk
- [x] write report
- [ ] call the bank
";

pub const JOURNAL: &str = "# Journal
Some intro.
<!-- anchor:tasks -->
- [ ] a
<!-- /anchor:tasks -->
Footer line.
";

pub const WEEK_LOG: &str = "# Log
## Monday
- a
## Tuesday
- b
";

pub fn item(level: usize, text: &str) -> Node {
	Item::new(level, text, None).into()
}

pub fn task(level: usize, text: &str, done: bool) -> Node {
	Item::new(level, text, Some(done)).into()
}

pub fn list(level: usize, items: Vec<Node>) -> Node {
	List::new(level).with_children(items).into()
}

pub fn heading(level: u8, text: &str, children: Vec<Node>) -> Node {
	Heading::new(level, text).with_children(children).into()
}

/// Assert that every level of the forest is numbered `0..n`.
pub fn assert_contiguous_positions(forest: &Forest) {
	for (index, node) in forest.iter().enumerate() {
		assert_eq!(node.position(), index, "bad position for {node:?}");
		if let Some(children) = node.children() {
			assert_contiguous_positions(children);
		}
	}
}
