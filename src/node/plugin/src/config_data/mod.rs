/* src/node/plugin/src/config_data/mod.rs */

//! Build-time discovery and resolution of per-page configuration.
//!
//! Fragments come from `+<name>` code files and `+config.toml` entries under
//! the user root and any extension directory. For each page, and each known
//! config name, the most specific non-null fragment wins; a tie between
//! differing definitions is a usage error.

mod cache;
mod fragment;
mod resolve;


use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use trellis_shared::errors::Result;
use trellis_shared::{PageConfigData, TrellisError};

use crate::options::PluginOptions;

pub use cache::ConfigDataCache;
pub use resolve::load_config_data;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigData {
  pub page_configs_data: Vec<PageConfigData>,
}

impl ConfigData {
  pub fn page(&self, page_id: &str) -> Option<&PageConfigData> {
    self.page_configs_data.iter().find(|p| p.page_id == page_id)
  }
}

/// Resolved config data for `user_root_dir`, cached per dev mode.
///
/// With `force_reload` the whole cache is dropped before resolving, so the
/// next build and dev lookups also see the fresh filesystem state.
pub async fn get_config_data(
  cache: &ConfigDataCache,
  user_root_dir: &Path,
  is_dev: bool,
  force_reload: bool,
  options: &PluginOptions,
) -> Result<Arc<ConfigData>> {
  if force_reload {
    cache.invalidate();
  } else if let Some(hit) = cache.get(user_root_dir, is_dev) {
    return Ok(hit);
  }

  let root = user_root_dir.to_path_buf();
  let opts = options.clone();
  let data = tokio::task::spawn_blocking(move || load_config_data(&root, &opts))
    .await
    .map_err(|e| TrellisError::bug(format!("config scan task failed: {e}")))??;

  let data = Arc::new(data);
  cache.insert(user_root_dir, is_dev, Arc::clone(&data));
  Ok(data)
}
