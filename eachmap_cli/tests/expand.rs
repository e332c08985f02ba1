mod common;

use eachmap_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

const INPUT: &str = ".d {\n  @each-in-map $name, $type in display_types {\n    .d-$(name) { \
                     display: $type; }\n  }\n}\n";
const OUTPUT: &str = ".d {\n  @each $name, $type in (None, Flex), (none, flex) {\n    .d-$(name) { \
                      display: $type; }\n  }\n}\n";

#[test]
fn expand_prints_expanded_stylesheet() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;
	std::fs::write(tmp.path().join("styles.css"), INPUT)?;

	common::eachmap_cmd()
		.arg("expand")
		.arg(tmp.path().join("styles.css"))
		.arg("--base-path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(OUTPUT);

	Ok(())
}

#[test]
fn expand_reads_stdin() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin(INPUT)
		.assert()
		.success()
		.stdout(OUTPUT);

	common::eachmap_cmd()
		.arg("expand")
		.arg("-")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin(INPUT)
		.assert()
		.success()
		.stdout(OUTPUT);

	Ok(())
}

#[test]
fn expand_writes_output_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;
	std::fs::write(tmp.path().join("styles.css"), INPUT)?;
	let output = tmp.path().join("out.css");

	common::eachmap_cmd()
		.arg("expand")
		.arg(tmp.path().join("styles.css"))
		.arg("--output")
		.arg(&output)
		.arg("--base-path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::is_empty());

	similar_asserts::assert_eq!(std::fs::read_to_string(&output)?, OUTPUT);

	Ok(())
}

#[test]
fn expand_flattens_sequence_values() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin("@each-in-map $d, $attr in direction_map {}")
		.assert()
		.success()
		.stdout("@each $d, $attr in (X, X, T), (-left, -right, -top) {}");

	Ok(())
}

#[test]
fn expand_uses_maps_flag() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("data"))?;
	std::fs::write(tmp.path().join("data/tokens.json"), common::MAPS_JSON)?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.arg("--maps")
		.arg("data/tokens.json")
		.write_stdin(INPUT)
		.assert()
		.success()
		.stdout(OUTPUT);

	Ok(())
}

#[test]
fn expand_leaves_stylesheets_without_directives_untouched() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;
	let input = "/* plain */\na { color: red }\n@media print { b { display: none; } }\n";

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin(input)
		.assert()
		.success()
		.stdout(input);

	Ok(())
}

#[test]
fn expand_reports_missing_keyword() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin("@each-in-map $k, $v display_types {}")
		.assert()
		.code(2)
		.stdout(predicates::str::is_empty())
		.stderr(predicates::str::contains("eachmap::missing_keyword"))
		.stderr(predicates::str::contains("Missed \"in\" keyword in @each-in-map"));

	Ok(())
}

#[test]
fn expand_reports_unknown_table() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin("@each-in-map $k, $v in colors {}")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("eachmap::table_not_found"))
		.stderr(predicates::str::contains("display_types, direction_map"));

	Ok(())
}

#[test]
fn expand_reports_missing_maps_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin("a {}")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("eachmap::table_document"))
		.stderr(predicates::str::contains("maps.json"));

	Ok(())
}

#[test]
fn expand_verbose_logs_each_expansion() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--verbose")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin(INPUT)
		.assert()
		.success()
		.stdout(OUTPUT)
		.stderr(
			predicates::str::contains("expanded @each-in-map")
				.and(predicates::str::contains("loaded maps document")),
		);

	Ok(())
}

#[test]
fn expand_is_quiet_by_default() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_maps(tmp.path())?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin(INPUT)
		.assert()
		.success()
		.stderr(predicates::str::is_empty());

	Ok(())
}
