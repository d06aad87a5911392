mod common;

use mdmerge_core::AnyEmptyResult;
use predicates::str::contains;
use similar_asserts::assert_eq;

use crate::common::mdmerge_cmd;
use crate::common::write_file;

#[test]
fn dedupe_prints_collapsed_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let notes = write_file(
		tmp.path(),
		"notes.md",
		"## Tasks\n- [ ] milk\n## Tasks\n- [x] Milk\n- eggs\n",
	)?;

	mdmerge_cmd()
		.arg("dedupe")
		.arg(&notes)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("## Tasks\n- [x] milk\n- eggs\n");

	Ok(())
}

#[test]
fn dedupe_write_is_idempotent() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let notes = write_file(tmp.path(), "notes.md", "# A\n- x\n# A\n- x\n- y\n")?;

	mdmerge_cmd()
		.arg("dedupe")
		.arg(&notes)
		.arg("--write")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(contains("Updated"));

	assert_eq!(std::fs::read_to_string(&notes)?, "# A\n- x\n- y\n");

	mdmerge_cmd()
		.arg("dedupe")
		.arg(&notes)
		.arg("--write")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(contains("already up to date"));

	Ok(())
}

#[test]
fn dedupe_diff_shows_removed_lines() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let notes = write_file(tmp.path(), "notes.md", "- a\n- a\n- b\n")?;

	mdmerge_cmd()
		.arg("dedupe")
		.arg(&notes)
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(contains("-- a\n"))
		.stdout(contains(" - b\n"));

	Ok(())
}
