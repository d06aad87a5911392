use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Merge markdown notes structurally instead of line by line.",
	long_about = "mdmerge parses markdown notes into a tree of headings, lists, items and \
	              paragraphs, and merges an update into an existing document without losing \
	              unrelated content.\n\nQuick start:\n  mdmerge merge notes.md update.md   \
	              Print the merged document\n  mdmerge dedupe notes.md           Collapse \
	              repeated headings and items\n  mdmerge fmt notes.md --check      Verify the \
	              canonical form\n  mdmerge tree notes.md             Inspect the parsed tree"
)]
pub struct MdmergeCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Directory searched for `mdmerge.toml`. Defaults to the current
	/// directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Log engine decisions to stderr. `RUST_LOG` takes precedence.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Merge an update document into a base document.
	///
	/// Nodes of the update are matched against the base by identity: headings
	/// by level and text, items by text, lists by level. Matched nodes are
	/// patched, everything else is inserted next to its neighbours from the
	/// update. Nothing from the base is ever removed.
	///
	/// Restrict the merge to part of the base with `--anchor` or
	/// `--heading`.
	Merge {
		/// The existing document.
		base: PathBuf,

		/// The incoming document.
		update: PathBuf,

		/// Replace matched nodes wholesale instead of patching them.
		#[arg(long, default_value_t = false)]
		replace: bool,

		/// Collapse repeated headings and items after merging.
		#[arg(long, default_value_t = false)]
		dedupe: bool,

		#[command(flatten)]
		section: SectionArgs,

		#[command(flatten)]
		output: OutputArgs,
	},
	/// Collapse repeated headings and list items.
	///
	/// The first occurrence of a heading absorbs the children of every later
	/// heading with the same level and text. Items repeated within a list are
	/// dropped, compared case-insensitively, and a checked duplicate marks the
	/// surviving item as done.
	Dedupe {
		/// The document to clean up.
		file: PathBuf,

		#[command(flatten)]
		output: OutputArgs,
	},
	/// Rewrite a document in canonical form.
	///
	/// Blank lines are dropped, bullets become `-`, nested items are indented
	/// by two spaces per level and checkboxes are written as `[ ]` or `[x]`.
	Fmt {
		/// The document to format.
		file: PathBuf,

		/// Write the formatted document back to the file.
		#[arg(long, default_value_t = false, conflicts_with = "check")]
		write: bool,

		/// Exit with a non-zero status code when the file is not in canonical
		/// form. Nothing is written.
		#[arg(long, default_value_t = false)]
		check: bool,
	},
	/// Print the tree the engine builds for a document.
	Tree {
		/// The document to inspect.
		file: PathBuf,

		/// Output format. Use `text` for an indented outline or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Default, Args)]
#[group(multiple = false)]
pub struct SectionArgs {
	/// Only merge into the content between `<!-- anchor:NAME -->` and
	/// `<!-- /anchor:NAME -->`.
	#[arg(long, value_name = "NAME")]
	pub anchor: Option<String>,

	/// Only merge into the section under the heading with this text.
	#[arg(long, value_name = "TITLE")]
	pub heading: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OutputArgs {
	/// Write the result back to the file instead of printing it.
	#[arg(long, default_value_t = false)]
	pub write: bool,

	/// Print a unified diff between the file and the result.
	#[arg(long, default_value_t = false)]
	pub diff: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Indented outline, one node per line.
	Text,
	/// The tree as JSON. Every node carries a `kind` tag.
	Json,
}
