use std::fmt::Write as _;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mdmerge_cli::Commands;
use mdmerge_cli::MdmergeCli;
use mdmerge_cli::OutputArgs;
use mdmerge_cli::OutputFormat;
use mdmerge_cli::SectionArgs;
use mdmerge_core::AnyEmptyResult;
use mdmerge_core::AnyResult;
use mdmerge_core::Forest;
use mdmerge_core::MdmergeConfig;
use mdmerge_core::MdmergeError;
use mdmerge_core::MergeOptions;
use mdmerge_core::Node;
use mdmerge_core::SectionSelector;
use mdmerge_core::dedupe_text;
use mdmerge_core::merge_section;
use mdmerge_core::merge_text;
use mdmerge_core::normalize_text;
use mdmerge_core::parse_with_limits;
use mdmerge_core::write_atomic;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = MdmergeCli::parse();

	// Respect NO_COLOR, --no-color and terminals without color support.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Merge {
			base,
			update,
			replace,
			dedupe,
			section,
			output,
		}) => run_merge(&args, base, update, *replace, *dedupe, section, *output),
		Some(Commands::Dedupe { file, output }) => run_dedupe(&args, file, *output),
		Some(Commands::Fmt { file, write, check }) => run_fmt(&args, file, *write, *check),
		Some(Commands::Tree { file, format }) => run_tree(&args, file, *format),
		None => {
			eprintln!("No subcommand specified. Run `mdmerge --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<MdmergeError>() {
			Ok(error) => {
				let report: miette::Report = (*error).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Engine events go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose {
		"mdmerge=debug,mdmerge_core=debug"
	} else {
		"warn"
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.init();
}

fn resolve_root(args: &MdmergeCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(args: &MdmergeCli) -> AnyResult<MdmergeConfig> {
	let root = resolve_root(args);
	let config = MdmergeConfig::load(&root)?.unwrap_or_default();
	tracing::debug!(
		max_input_bytes = config.limits.max_input_bytes,
		max_depth = config.limits.max_depth,
		"using limits"
	);

	Ok(config)
}

fn read_document(path: &Path) -> AnyResult<String> {
	std::fs::read_to_string(path)
		.map_err(|e| format!("failed to read {}: {e}", path.display()).into())
}

/// Documents written or printed by the tool always end with a newline.
fn finish(mut document: String) -> String {
	if !document.is_empty() && !document.ends_with('\n') {
		document.push('\n');
	}

	document
}

fn run_merge(
	args: &MdmergeCli,
	base_path: &Path,
	update_path: &Path,
	replace: bool,
	dedupe: bool,
	section: &SectionArgs,
	output: OutputArgs,
) -> AnyEmptyResult {
	let config = load_config(args)?;
	let defaults = MergeOptions::from(config.merge);
	let options = MergeOptions {
		replace: replace || defaults.replace,
		dedupe: dedupe || defaults.dedupe,
	};

	let base = read_document(base_path)?;
	let update = read_document(update_path)?;

	let selector = match (&section.anchor, &section.heading) {
		(Some(name), _) => Some(SectionSelector::Anchor(name.clone())),
		(None, Some(title)) => Some(SectionSelector::Heading(title.clone())),
		(None, None) => None,
	};

	let merged = match &selector {
		Some(selector) => merge_section(&base, &update, selector, options, &config.limits)?,
		None => merge_text(&base, &update, options, &config.limits)?,
	};

	emit(base_path, &base, finish(merged), output)
}

fn run_dedupe(args: &MdmergeCli, path: &Path, output: OutputArgs) -> AnyEmptyResult {
	let config = load_config(args)?;
	let content = read_document(path)?;
	let deduped = dedupe_text(&content, &config.limits)?;

	emit(path, &content, finish(deduped), output)
}

fn run_fmt(args: &MdmergeCli, path: &Path, write: bool, check: bool) -> AnyEmptyResult {
	let config = load_config(args)?;
	let content = read_document(path)?;
	let formatted = finish(normalize_text(&content, &config.limits)?);

	if check {
		if formatted == content {
			return Ok(());
		}

		eprintln!(
			"{} {}",
			colored!("Not formatted:", red),
			path.display()
		);
		print_diff(&content, &formatted);
		process::exit(1);
	}

	emit(
		path,
		&content,
		formatted,
		OutputArgs {
			write,
			diff: false,
		},
	)
}

fn run_tree(args: &MdmergeCli, path: &Path, format: OutputFormat) -> AnyEmptyResult {
	let config = load_config(args)?;
	let content = read_document(path)?;
	let forest = parse_with_limits(&content, &config.limits)?;

	match format {
		OutputFormat::Text => print!("{}", render_tree(&forest)?),
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&forest)?),
	}

	Ok(())
}

/// Print, diff or write back the result of an operation on `path`.
fn emit(path: &Path, original: &str, result: String, output: OutputArgs) -> AnyEmptyResult {
	if output.diff {
		print_diff(original, &result);
	}

	if !output.write {
		if !output.diff {
			print!("{result}");
		}

		return Ok(());
	}

	if result == original {
		println!("{} is already up to date.", path.display());
		return Ok(());
	}

	write_atomic(path, &result)?;
	println!("{} {}", colored!("Updated", green), path.display());

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);

	for change in diff.iter_all_changes() {
		let line = change.to_string_lossy();
		let newline = if change.missing_newline() { "\n" } else { "" };

		match change.tag() {
			ChangeTag::Delete => print!("{}{newline}", colored!(format!("-{line}"), red)),
			ChangeTag::Insert => print!("{}{newline}", colored!(format!("+{line}"), green)),
			ChangeTag::Equal => print!(" {line}{newline}"),
		}
	}
}

/// An indented outline of the tree with one node per line.
fn render_tree(forest: &Forest) -> Result<String, std::fmt::Error> {
	let mut output = String::new();
	write_tree(forest, 0, &mut output)?;
	Ok(output)
}

fn write_tree(forest: &Forest, depth: usize, output: &mut String) -> std::fmt::Result {
	for node in forest.iter() {
		let indent = "  ".repeat(depth);
		let kind = colored!(node.kind().to_string(), bold);

		match node {
			Node::Heading(heading) => {
				writeln!(output, "{indent}{kind}({}) {}", heading.level, heading.text)?;
			}
			Node::List(list) => writeln!(output, "{indent}{kind}({})", list.level)?,
			Node::Item(item) => {
				let checkbox = match item.checked {
					Some(true) => "[x] ",
					Some(false) => "[ ] ",
					None => "",
				};
				writeln!(
					output,
					"{indent}{kind}({}) {checkbox}{}",
					item.level, item.text
				)?;
			}
			Node::Paragraph(paragraph) => {
				writeln!(
					output,
					"{indent}{kind} {}",
					colored!(format!("{:?}", paragraph.text), dimmed)
				)?;
			}
		}

		if let Some(children) = node.children() {
			write_tree(children, depth + 1, output)?;
		}
	}

	Ok(())
}
