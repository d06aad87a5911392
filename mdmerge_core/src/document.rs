use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::Limits;
use crate::MdmergeResult;
use crate::MergeOptions;
use crate::dedupe;
use crate::merge;
use crate::parse_with_limits;
use crate::serialize;

/// Merge the markdown `update` into the markdown `base` and return the
/// canonical result.
///
/// The caller is expected to hold exclusive access to the document `base`
/// was read from until the result is written back.
pub fn merge_text(
	base: &str,
	update: &str,
	options: MergeOptions,
	limits: &Limits,
) -> MdmergeResult<String> {
	let base = parse_with_limits(base, limits)?;
	let update = parse_with_limits(update, limits)?;
	let merged = merge(&base, &update, options);

	Ok(serialize(&merged))
}

/// Collapse duplicate headings and items in a markdown document.
pub fn dedupe_text(content: &str, limits: &Limits) -> MdmergeResult<String> {
	let forest = parse_with_limits(content, limits)?;
	Ok(serialize(&dedupe(&forest)))
}

/// Rewrite a markdown document in the engine's canonical form: blank lines
/// dropped, bullets written as `-`, indentation normalised to two spaces per
/// level and checkboxes written as `[ ]` / `[x]`.
pub fn normalize_text(content: &str, limits: &Limits) -> MdmergeResult<String> {
	let forest = parse_with_limits(content, limits)?;
	Ok(serialize(&forest))
}

/// Replace the file at `path` with `content` by writing a sibling temporary
/// file and renaming it into place, so readers never observe a partially
/// written document.
pub fn write_atomic(path: &Path, content: &str) -> MdmergeResult<()> {
	let file_name = path
		.file_name()
		.map_or_else(|| "document".into(), |name| name.to_string_lossy());
	let temp_path = path.with_file_name(format!(
		".{file_name}.tmp-{}-{}",
		std::process::id(),
		std::time::SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_or(0, |duration| duration.as_nanos())
	));

	std::fs::write(&temp_path, content)?;

	if let Err(error) = std::fs::rename(&temp_path, path) {
		let _ = std::fs::remove_file(&temp_path);
		return Err(error.into());
	}

	tracing::debug!(path = %path.display(), bytes = content.len(), "wrote document");

	Ok(())
}
