/* src/node/plugin/src/config_data/cache.rs */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use super::ConfigData;

/// `/app`, `/app/` and `/app/./` name the same root; relative roots are
/// anchored at the current directory.
fn normalize_root(root: &Path) -> PathBuf {
  std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf()).components().collect()
}

/// Resolved config data per (user root, dev mode).
#[derive(Debug, Default)]
pub struct ConfigDataCache {
  entries: DashMap<(PathBuf, bool), Arc<ConfigData>>,
}

impl ConfigDataCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, root: &Path, is_dev: bool) -> Option<Arc<ConfigData>> {
    self.entries.get(&(normalize_root(root), is_dev)).map(|e| Arc::clone(e.value()))
  }

  pub fn insert(&self, root: &Path, is_dev: bool, data: Arc<ConfigData>) {
    self.entries.insert((normalize_root(root), is_dev), data);
  }

  pub fn invalidate(&self) {
    self.entries.clear();
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
