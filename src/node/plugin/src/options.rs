/* src/node/plugin/src/options.rs */

use std::path::PathBuf;

use trellis_shared::ConfigDefinitions;

/// Resolved plugin settings, built from the project's `trellis.toml`.
#[derive(Debug, Clone)]
pub struct PluginOptions {
  /// Extension directories scanned after the user root; their fragments rank
  /// below every user fragment.
  pub extensions: Vec<PathBuf>,
  /// In production client builds, also import the server-side page-code module
  /// for its static assets.
  pub include_assets_imported_by_server: bool,
  pub definitions: ConfigDefinitions,
}

impl Default for PluginOptions {
  fn default() -> Self {
    Self {
      extensions: Vec::new(),
      include_assets_imported_by_server: true,
      definitions: ConfigDefinitions::builtin(),
    }
  }
}
