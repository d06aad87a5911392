mod common;

use mdmerge_core::AnyEmptyResult;
use predicates::str::contains;
use rstest::rstest;
use similar_asserts::assert_eq;

use crate::common::mdmerge_cmd;
use crate::common::write_file;

#[rstest]
#[case::bullets("* a\n+ b\n", "- a\n- b\n")]
#[case::blank_lines("# T\n\n- a\n\n\npara\n", "# T\n- a\npara\n")]
#[case::checkboxes("- [X] done\n- [ ]   open\n", "- [x] done\n- [ ] open\n")]
#[case::indentation("- a\n\t- b\n", "- a\n    - b\n")]
#[case::missing_newline("# T", "# T\n")]
fn fmt_prints_canonical_form(#[case] input: &str, #[case] expected: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let notes = write_file(tmp.path(), "notes.md", input)?;

	mdmerge_cmd()
		.arg("fmt")
		.arg(&notes)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(expected.to_string());

	Ok(())
}

#[test]
fn fmt_check_passes_for_canonical_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let notes = write_file(tmp.path(), "notes.md", "# T\n- [x] a\n  - b\n")?;

	mdmerge_cmd()
		.arg("fmt")
		.arg(&notes)
		.arg("--check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("");

	Ok(())
}

#[test]
fn fmt_check_fails_for_non_canonical_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let notes = write_file(tmp.path(), "notes.md", "* a\n")?;

	mdmerge_cmd()
		.arg("fmt")
		.arg(&notes)
		.arg("--check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(contains("Not formatted"))
		.stdout(contains("+- a"));

	// Checking never touches the file.
	assert_eq!(std::fs::read_to_string(&notes)?, "* a\n");

	Ok(())
}

#[test]
fn fmt_write_rewrites_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let notes = write_file(tmp.path(), "notes.md", "# T\n\n* a\n")?;

	mdmerge_cmd()
		.arg("fmt")
		.arg(&notes)
		.arg("--write")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert_eq!(std::fs::read_to_string(&notes)?, "# T\n- a\n");

	Ok(())
}

#[test]
fn fmt_reports_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "mdmerge.toml", "[limits\n")?;
	let notes = write_file(tmp.path(), "notes.md", "# T\n")?;

	mdmerge_cmd()
		.arg("fmt")
		.arg(&notes)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(contains("failed to parse config"));

	Ok(())
}
