use std::path::Path;

use serde::Deserialize;

use crate::error::ApidocError;
use crate::error::ApidocResult;

/// Name of the optional config file looked up at the scanned root.
pub const CONFIG_FILE: &str = "apidoc.toml";

/// Settings shared by every file parser and the renderer, constructed once
/// by the composition root and passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
	/// Comment-start token; only lines beginning with it are considered.
	pub comment: String,
	/// File extension (without dot) selecting which files to parse.
	pub extension: String,
	/// Spaces substituted for each tab during line normalization. `0` leaves
	/// tabs as literal tab characters.
	pub tab_width: usize,
	/// Category names establishing a preferred output order.
	pub order: Vec<String>,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			comment: "//".to_string(),
			extension: "go".to_string(),
			tab_width: 4,
			order: Vec::new(),
		}
	}
}

impl Options {
	/// Apply values from a loaded config file. Flags handled by the CLI are
	/// merged on top of the result.
	pub fn apply_config(&mut self, config: &ApidocConfig) {
		if let Some(comment) = &config.comment {
			self.comment.clone_from(comment);
		}
		if let Some(extension) = &config.extension {
			self.extension.clone_from(extension);
		}
		if let Some(tab_width) = config.tab_width {
			self.tab_width = tab_width;
		}
		if let Some(order) = &config.order {
			self.order.clone_from(order);
		}
	}
}

/// Configuration loaded from an `apidoc.toml` file at the scanned root,
/// supplying [`Options`] defaults.
///
/// ```toml
/// comment = "//"
/// extension = "go"
/// tab_width = 4
/// order = ["Auth", "Account"]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ApidocConfig {
	/// Comment-start token.
	pub comment: Option<String>,
	/// File extension (without dot) of the files to scan.
	pub extension: Option<String>,
	/// Tab width used during line normalization.
	pub tab_width: Option<usize>,
	/// Preferred category order.
	pub order: Option<Vec<String>>,
}

impl ApidocConfig {
	/// Load the config from `apidoc.toml` at the given root directory.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> ApidocResult<Option<Self>> {
		let config_path = root.join(CONFIG_FILE);

		if !config_path.exists() {
			return Ok(None);
		}

		let content = std::fs::read_to_string(&config_path)?;
		let config =
			toml::from_str(&content).map_err(|e| ApidocError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}
}
