//! `mdmerge_core` is the structural merge engine behind the `mdmerge`
//! command line tool. Markdown notes rewritten by several
//! uncoordinated writers are parsed into a semantic tree, an incoming update
//! is merged into the existing document without losing unrelated content,
//! duplicates left behind by repeated merges are collapsed, and the result is
//! written back as canonical markdown.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown text
//!   → Line classifier (heading / list item / paragraph per line)
//!   → Tree builder (nesting stack over an arena, sibling positions)
//!   → Matcher + merger (identity matching, patch or replace)
//!   → Deduplicator (optional, collapses repeated headings and items)
//!   → Serializer (canonical markdown)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `mdmerge.toml`: input limits and
//!   default merge options.
//! - [`matcher`]: The identity rules deciding which existing node an update
//!   node refers to.
//! - [`section`]: Anchor and heading delimited sections, so only part of a
//!   document is merged.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdmerge_core::{MergeOptions, merge, parse, serialize};
//!
//! let base = parse("# Tasks\n- [x] buy milk").unwrap();
//! let update = parse("# Tasks\n- [ ] buy milk\n- [ ] call home").unwrap();
//!
//! let merged = merge(&base, &update, MergeOptions::default());
//! assert_eq!(
//! 	serialize(&merged),
//! 	"# Tasks\n- [x] buy milk\n- [ ] call home"
//! );
//! ```

pub use config::*;
pub use dedupe::*;
pub use document::*;
pub use error::*;
pub use merge::*;
pub use node::*;
pub use parser::*;
pub use section::*;
pub use serializer::*;

pub mod config;
mod dedupe;
mod document;
#[allow(unused_assignments)]
mod error;
pub mod lexer;
pub mod matcher;
mod merge;
mod node;
mod parser;
pub mod section;
mod serializer;

#[cfg(test)]
mod __fixtures;
