mod common;

use eachmap_core::AnyEmptyResult;

const INPUT: &str = "@each-in-map $k, $v in sizes {}";
const OUTPUT: &str = "@each $k, $v in (sm, lg), (4px, 16px) {}";
const SIZES_JSON: &str = r#"{ "sizes": { "sm": "4px", "lg": "16px" } }"#;

#[test]
fn config_sets_json_path() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("data"))?;
	std::fs::write(tmp.path().join("data/sizes.json"), SIZES_JSON)?;
	std::fs::write(
		tmp.path().join("eachmap.toml"),
		"json_path = \"data/sizes.json\"\n",
	)?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin(INPUT)
		.assert()
		.success()
		.stdout(OUTPUT);

	Ok(())
}

#[test]
fn config_resolves_dot_eachmap_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("sizes.json"), SIZES_JSON)?;
	std::fs::write(
		tmp.path().join(".eachmap.toml"),
		"json_path = \"sizes.json\"\n",
	)?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin(INPUT)
		.assert()
		.success()
		.stdout(OUTPUT);

	Ok(())
}

#[test]
fn config_resolves_dot_config_eachmap_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(tmp.path().join("sizes.json"), SIZES_JSON)?;
	std::fs::write(
		tmp.path().join(".config/eachmap.toml"),
		"json_path = \"sizes.json\"\n",
	)?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.write_stdin(INPUT)
		.assert()
		.success()
		.stdout(OUTPUT);

	Ok(())
}

#[test]
fn config_base_path_is_relative_to_config_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("styles"))?;
	std::fs::write(tmp.path().join("styles/maps.json"), SIZES_JSON)?;
	std::fs::write(tmp.path().join("eachmap.toml"), "base_path = \"styles\"\n")?;

	common::eachmap_cmd()
		.current_dir(tmp.path())
		.arg("expand")
		.write_stdin(INPUT)
		.assert()
		.success()
		.stdout(OUTPUT);

	Ok(())
}

#[test]
fn maps_flag_overrides_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("sizes.json"), SIZES_JSON)?;
	std::fs::write(
		tmp.path().join("eachmap.toml"),
		"json_path = \"missing.json\"\n",
	)?;

	common::eachmap_cmd()
		.arg("expand")
		.arg("--base-path")
		.arg(tmp.path())
		.arg("--maps")
		.arg("sizes.json")
		.write_stdin(INPUT)
		.assert()
		.success()
		.stdout(OUTPUT);

	Ok(())
}

#[test]
fn invalid_config_is_reported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("eachmap.toml"), "unknown_key = true\n")?;

	common::eachmap_cmd()
		.arg("tables")
		.arg("--base-path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("eachmap::config_parse"));

	Ok(())
}
