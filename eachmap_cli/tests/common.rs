#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const MAPS_JSON: &str = r#"{
  "display_types": { "None": "none", "Flex": "flex" },
  "direction_map": { "X": ["-left", "-right"], "T": "-top" }
}"#;

pub fn eachmap_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("eachmap"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write `maps.json` into `dir`.
pub fn write_maps(dir: &Path) -> std::io::Result<()> {
	std::fs::write(dir.join("maps.json"), MAPS_JSON)
}
