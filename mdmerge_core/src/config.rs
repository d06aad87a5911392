use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::MdmergeError;
use crate::MdmergeResult;
use crate::MergeOptions;

/// Default maximum input size in bytes (10 MB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Default maximum number of nested open containers (headings, lists and
/// items) while building the tree.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["mdmerge.toml", ".mdmerge.toml", ".config/mdmerge.toml"];

/// Configuration loaded from an `mdmerge.toml` file.
///
/// ```toml
/// [limits]
/// max_input_bytes = 1048576
/// max_depth = 64
///
/// [merge]
/// replace = false
/// dedupe = true
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct MdmergeConfig {
	/// Ceilings applied before and while parsing.
	#[serde(default)]
	pub limits: Limits,
	/// Default merge behaviour. Command line flags can only switch these on.
	#[serde(default)]
	pub merge: MergeConfig,
}

/// Input ceilings that keep parsing and the recursive tree operations
/// bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Limits {
	/// Inputs longer than this many bytes are rejected with
	/// [`MdmergeError::InputTooLarge`].
	#[serde(default = "default_max_input_bytes")]
	pub max_input_bytes: usize,
	/// Documents nesting more containers than this are rejected with
	/// [`MdmergeError::TooDeeplyNested`].
	#[serde(default = "default_max_depth")]
	pub max_depth: usize,
}

impl Default for Limits {
	fn default() -> Self {
		Self {
			max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

fn default_max_input_bytes() -> usize {
	DEFAULT_MAX_INPUT_BYTES
}

fn default_max_depth() -> usize {
	DEFAULT_MAX_DEPTH
}

/// The `[merge]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MergeConfig {
	/// Replace matched subtrees instead of patching them.
	#[serde(default)]
	pub replace: bool,
	/// Collapse duplicate headings and items after merging.
	#[serde(default)]
	pub dedupe: bool,
}

impl From<MergeConfig> for MergeOptions {
	fn from(config: MergeConfig) -> Self {
		Self {
			replace: config.replace,
			dedupe: config.dedupe,
		}
	}
}

impl MdmergeConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> MdmergeResult<Option<MdmergeConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Parse a config from TOML source.
	pub fn from_toml(content: &str) -> MdmergeResult<MdmergeConfig> {
		toml::from_str(content).map_err(|e| MdmergeError::ConfigParse(e.to_string()))
	}
}
