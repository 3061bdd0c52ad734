/* src/cli/core/src/config/project.rs */

use std::path::{Path, PathBuf};

use anyhow::Result;
use trellis_plugin::PluginOptions;

use super::TrellisConfig;

/// A loaded `trellis.toml` with its paths resolved.
#[derive(Debug, Clone)]
pub struct Project {
  pub name: String,
  pub root_dir: PathBuf,
  pub options: PluginOptions,
}

impl Project {
  pub fn from_config(config_path: &Path, config: &TrellisConfig) -> Result<Self> {
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    Ok(Self {
      name: config.project.name.clone(),
      root_dir: base_dir.join(&config.project.root),
      options: PluginOptions {
        extensions: config.plugin.extensions.iter().map(|e| base_dir.join(e)).collect(),
        include_assets_imported_by_server: config.plugin.include_assets_imported_by_server,
        definitions: config.definitions()?,
      },
    })
  }

  /// Directories whose changes can affect the resolved configs.
  pub fn watched_dirs(&self) -> Vec<&Path> {
    std::iter::once(self.root_dir.as_path())
      .chain(self.options.extensions.iter().map(PathBuf::as_path))
      .collect()
  }
}
