use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::EachInMapError;
use crate::EachInMapResult;
use crate::Tables;

/// The maps document read when no path is configured.
pub const DEFAULT_JSON_PATH: &str = "maps.json";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["eachmap.toml", ".eachmap.toml", ".config/eachmap.toml"];

/// Configuration loaded from an `eachmap.toml` file.
///
/// ```toml
/// base_path = "styles"
/// json_path = "data/maps.json"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EachInMapConfig {
	/// Directory the maps document path is resolved against. Relative paths
	/// are resolved against the directory containing the config file.
	#[serde(default)]
	pub base_path: Option<PathBuf>,
	/// Path to the maps document.
	#[serde(default)]
	pub json_path: Option<PathBuf>,
}

impl EachInMapConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if there is no config file.
	pub fn load(root: &Path) -> EachInMapResult<Option<Self>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let mut config: Self =
			toml::from_str(&content).map_err(|e| EachInMapError::ConfigParse(e.to_string()))?;

		if let Some(base_path) = config.base_path.take() {
			config.base_path = Some(if base_path.is_absolute() {
				base_path
			} else {
				root.join(base_path)
			});
		}

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}
}

/// Where to find the maps document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EachInMapOptions {
	/// Directory used to resolve `json_path`. Defaults to the current
	/// working directory.
	pub base_path: PathBuf,
	/// The maps document, relative to `base_path` unless absolute. Defaults
	/// to `maps.json`.
	pub json_path: PathBuf,
}

impl Default for EachInMapOptions {
	fn default() -> Self {
		Self {
			base_path: current_dir(),
			json_path: PathBuf::from(DEFAULT_JSON_PATH),
		}
	}
}

impl EachInMapOptions {
	pub fn new(base_path: impl Into<PathBuf>) -> Self {
		Self {
			base_path: base_path.into(),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_json_path(mut self, json_path: impl Into<PathBuf>) -> Self {
		self.json_path = json_path.into();
		self
	}

	/// Build options from explicitly set values, falling back to the config
	/// file and then to the defaults.
	pub fn from_layers(
		base_path: Option<PathBuf>,
		json_path: Option<PathBuf>,
		config: Option<EachInMapConfig>,
	) -> Self {
		let config = config.unwrap_or_default();
		let defaults = Self::default();

		Self {
			base_path: base_path
				.or(config.base_path)
				.unwrap_or(defaults.base_path),
			json_path: json_path
				.or(config.json_path)
				.unwrap_or(defaults.json_path),
		}
	}

	/// The absolute base directory. Relative base paths are joined to the
	/// current working directory.
	pub fn resolved_base_path(&self) -> PathBuf {
		if self.base_path.is_absolute() {
			self.base_path.clone()
		} else {
			current_dir().join(&self.base_path)
		}
	}

	/// The absolute path of the maps document.
	pub fn resolved_json_path(&self) -> PathBuf {
		if self.json_path.is_absolute() {
			self.json_path.clone()
		} else {
			self.resolved_base_path().join(&self.json_path)
		}
	}

	/// Load the maps document these options point at.
	pub fn load_tables(&self) -> EachInMapResult<Tables> {
		Tables::load(&self.resolved_json_path())
	}
}

fn current_dir() -> PathBuf {
	std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
