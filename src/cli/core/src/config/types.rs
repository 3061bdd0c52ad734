/* src/cli/core/src/config/types.rs */

use std::collections::{BTreeMap, HashSet};

use anyhow::{Result, bail};
use serde::Deserialize;
use trellis_shared::{ConfigDefinitions, ConfigEnv};

#[derive(Debug, Clone, Deserialize)]
pub struct TrellisConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub plugin: PluginSection,
  /// Project-specific config names, keyed by name.
  #[serde(default)]
  pub configs: BTreeMap<String, CustomConfigSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
  pub name: String,
  /// User root directory, relative to `trellis.toml`.
  #[serde(default = "default_root")]
  pub root: String,
}

fn default_root() -> String {
  ".".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PluginSection {
  /// Extension directories, relative to `trellis.toml`.
  #[serde(default)]
  pub extensions: Vec<String>,
  #[serde(default = "default_true")]
  pub include_assets_imported_by_server: bool,
}

fn default_true() -> bool {
  true
}

impl Default for PluginSection {
  fn default() -> Self {
    Self { extensions: Vec::new(), include_assets_imported_by_server: true }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomConfigSection {
  pub env: ConfigEnv,
}

impl TrellisConfig {
  pub fn validate(&self) -> Result<()> {
    let mut seen = HashSet::new();
    for ext in &self.plugin.extensions {
      let normalized = ext.trim_end_matches('/');
      if !seen.insert(normalized) {
        bail!("plugin.extensions lists \"{ext}\" more than once");
      }
    }
    self.definitions()?;
    Ok(())
  }

  /// Built-in config definitions extended with `[configs.<name>]`.
  pub fn definitions(&self) -> Result<ConfigDefinitions> {
    let mut defs = ConfigDefinitions::builtin();
    for (name, section) in &self.configs {
      defs.define(name, section.env)?;
    }
    Ok(defs)
  }
}
