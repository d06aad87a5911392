mod common;

use mdmerge_core::AnyEmptyResult;
use predicates::str::contains;
use similar_asserts::assert_eq;

use crate::common::mdmerge_cmd;
use crate::common::write_file;

const BASE: &str = "# Tasks\n- [x] buy milk\n";
const UPDATE: &str = "# Tasks\n- [ ] buy milk\n- [ ] call home\n";

#[test]
fn merge_prints_merged_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let base = write_file(tmp.path(), "base.md", BASE)?;
	let update = write_file(tmp.path(), "update.md", UPDATE)?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("# Tasks\n- [x] buy milk\n- [ ] call home\n");

	// Without --write the base is left alone.
	assert_eq!(std::fs::read_to_string(&base)?, BASE);

	Ok(())
}

#[test]
fn merge_write_updates_base_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let base = write_file(tmp.path(), "base.md", BASE)?;
	let update = write_file(tmp.path(), "update.md", UPDATE)?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--write")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(contains("Updated"));

	assert_eq!(
		std::fs::read_to_string(&base)?,
		"# Tasks\n- [x] buy milk\n- [ ] call home\n"
	);

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--write")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(contains("already up to date"));

	Ok(())
}

#[test]
fn merge_diff_shows_inserted_lines() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let base = write_file(tmp.path(), "base.md", BASE)?;
	let update = write_file(tmp.path(), "update.md", UPDATE)?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(contains("+- [ ] call home"))
		.stdout(contains(" - [x] buy milk"));

	Ok(())
}

#[test]
fn merge_replace_overrides_matched_sections() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let base = write_file(tmp.path(), "base.md", "# A\n- one\n# B\n- keep\n")?;
	let update = write_file(tmp.path(), "update.md", "# A\n- two\n")?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--replace")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("# A\n- two\n# B\n- keep\n");

	Ok(())
}

#[test]
fn merge_into_anchor_section_keeps_surroundings() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let base = write_file(
		tmp.path(),
		"journal.md",
		"# Journal\n\nSome   intro.\n\n<!-- anchor:tasks -->\n- [ ] a\n<!-- /anchor:tasks \
		 -->\n\nFooter.\n",
	)?;
	let update = write_file(tmp.path(), "update.md", "- [x] a\n- [ ] b\n")?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--anchor")
		.arg("tasks")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			"# Journal\n\nSome   intro.\n\n<!-- anchor:tasks -->\n- [x] a\n- [ ] b\n<!-- \
			 /anchor:tasks -->\n\nFooter.\n",
		);

	Ok(())
}

#[test]
fn merge_into_heading_section() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let base = write_file(
		tmp.path(),
		"log.md",
		"# Log\n## Monday\n- a\n## Tuesday\n- b\n",
	)?;
	let update = write_file(tmp.path(), "update.md", "## Monday\n- c\n")?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--heading")
		.arg("Monday")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("# Log\n## Monday\n- a\n- c\n## Tuesday\n- b\n");

	Ok(())
}

#[test]
fn merge_reports_missing_section() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let base = write_file(tmp.path(), "base.md", BASE)?;
	let update = write_file(tmp.path(), "update.md", UPDATE)?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--anchor")
		.arg("weekly")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(contains("section not found"));

	Ok(())
}

#[test]
fn merge_rejects_both_section_selectors() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let base = write_file(tmp.path(), "base.md", BASE)?;
	let update = write_file(tmp.path(), "update.md", UPDATE)?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--anchor")
		.arg("a")
		.arg("--heading")
		.arg("b")
		.assert()
		.failure()
		.stderr(contains("cannot be used with"));

	Ok(())
}

#[test]
fn merge_reports_missing_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let base = write_file(tmp.path(), "base.md", BASE)?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(tmp.path().join("missing.md"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(contains("failed to read"));

	Ok(())
}

#[test]
fn merge_applies_config_defaults() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "mdmerge.toml", "[merge]\ndedupe = true\n")?;
	let base = write_file(tmp.path(), "base.md", "## Tasks\n- a\n## Tasks\n- b\n")?;
	let update = write_file(tmp.path(), "update.md", "## Tasks\n- c\n")?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("## Tasks\n- a\n- c\n- b\n");

	Ok(())
}

#[test]
fn merge_enforces_configured_limits() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), ".mdmerge.toml", "[limits]\nmax_input_bytes = 8\n")?;
	let base = write_file(tmp.path(), "base.md", BASE)?;
	let update = write_file(tmp.path(), "update.md", UPDATE)?;

	mdmerge_cmd()
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(contains("input too large"));

	Ok(())
}

#[test]
fn merge_verbose_logs_engine_decisions() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let base = write_file(tmp.path(), "base.md", BASE)?;
	let update = write_file(tmp.path(), "update.md", UPDATE)?;

	mdmerge_cmd()
		.arg("--verbose")
		.arg("merge")
		.arg(&base)
		.arg(&update)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(contains("inserting new node"));

	Ok(())
}
