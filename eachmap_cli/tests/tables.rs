mod common;

use eachmap_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn tables_lists_names_in_document_order() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;

	let assert = common::eachmap_cmd()
		.arg("tables")
		.arg("--base-path")
		.arg(tmp.path())
		.assert()
		.success();
	let stdout = String::from_utf8(assert.get_output().stdout.clone())?;

	let display = stdout.find("display_types (2 entries)");
	let direction = stdout.find("direction_map (2 entries)");
	assert!(display.is_some(), "missing display_types in {stdout}");
	assert!(direction.is_some(), "missing direction_map in {stdout}");
	assert!(display < direction);

	Ok(())
}

#[test]
fn tables_outputs_json() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;

	let assert = common::eachmap_cmd()
		.arg("tables")
		.arg("--format")
		.arg("json")
		.arg("--base-path")
		.arg(tmp.path())
		.assert()
		.success();
	let report: Value = serde_json::from_slice(&assert.get_output().stdout)?;

	assert_eq!(
		report["tables"],
		serde_json::json!([
			{ "name": "display_types", "entries": 2 },
			{ "name": "direction_map", "entries": 2 },
		])
	);
	assert!(
		report["path"]
			.as_str()
			.is_some_and(|path| path.ends_with("maps.json"))
	);

	Ok(())
}

#[test]
fn tables_reports_empty_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("maps.json"), "{}")?;

	common::eachmap_cmd()
		.arg("tables")
		.arg("--base-path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No tables found"));

	Ok(())
}

#[test]
fn tables_rejects_invalid_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("maps.json"), "[1, 2, 3]")?;

	common::eachmap_cmd()
		.arg("tables")
		.arg("--base-path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("eachmap::table_document"));

	Ok(())
}
