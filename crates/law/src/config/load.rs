//! Config file loading utilities.

use std::path::{Path, PathBuf};

use super::{ConfigError, Lex};

/// Base document name inside a config directory.
pub const BASE_FILE: &str = "lex.toml";
/// Optional machine-local overrides layered over [`BASE_FILE`].
pub const LOCAL_FILE: &str = "lex.local.toml";

/// Aggregate result of loading configuration layers.
#[derive(Debug, Default)]
pub struct ConfigLoadReport {
	/// Merged document if any layer was loaded successfully.
	pub config: Option<Lex>,
	/// File read or parse errors keyed by source file path.
	pub errors: Vec<(PathBuf, ConfigError)>,
}

impl ConfigLoadReport {
	/// Returns the merged document, or the first error.
	///
	/// The binding table is revalidated after merging since layers may
	/// collide.
	pub fn into_result(mut self) -> super::Result<Option<Lex>> {
		if !self.errors.is_empty() {
			return Err(self.errors.swap_remove(0).1);
		}
		if let Some(lex) = &self.config {
			lex.validate()?;
		}
		Ok(self.config)
	}
}

/// Loads and merges `lex.toml` and `lex.local.toml` from `config_dir`.
///
/// Merge precedence is fixed: `lex.toml` < `lex.local.toml`.
pub fn load_from_dir(config_dir: &Path) -> ConfigLoadReport {
	let mut report = ConfigLoadReport::default();
	let mut merged = Lex::default();
	let mut found_any = false;

	for filename in [BASE_FILE, LOCAL_FILE] {
		load_layer(&mut report, &mut merged, &mut found_any, config_dir, filename);
	}

	if found_any {
		report.config = Some(merged);
	}

	report
}

fn load_layer(report: &mut ConfigLoadReport, merged: &mut Lex, found_any: &mut bool, config_dir: &Path, filename: &str) {
	let path = config_dir.join(filename);
	if !path.exists() {
		return;
	}

	match Lex::load(&path) {
		Ok(layer) => {
			tracing::debug!(path = %path.display(), bindings = layer.bindings.len(), "loaded config layer");
			merged.merge(layer);
			*found_any = true;
		}
		Err(error) => report.errors.push((path, error)),
	}
}
