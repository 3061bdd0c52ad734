/* src/shared/rust/src/page_files.rs */

// Legacy per-page files (`*.page.js`, `*.page.client.js`, `_default.page.*`),
// loaded alongside the config-driven page-code module.

use std::fmt;
use std::sync::Arc;

use crate::page_config::{BoxError, BoxFuture, FileExports};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSide {
  Client,
  Server,
  Both,
}

impl FileSide {
  /// Side implied by a legacy file name such as `index.page.client.js`.
  pub fn from_file_path(file_path: &str) -> Self {
    let name = file_path.rsplit('/').next().unwrap_or(file_path);
    if name.contains(".page.client.") {
      Self::Client
    } else if name.contains(".page.server.") {
      Self::Server
    } else {
      Self::Both
    }
  }

  pub fn is_client_side(self) -> bool {
    matches!(self, Self::Client | Self::Both)
  }
}

pub type LoadFileFn = Arc<dyn Fn() -> BoxFuture<Result<FileExports, BoxError>> + Send + Sync>;

#[derive(Clone)]
pub struct PageFile {
  pub file_path: String,
  /// `None` for `_default` files, which apply to every page below their directory.
  pub page_id: Option<String>,
  pub side: FileSide,
  pub load_file: Option<LoadFileFn>,
}

impl PageFile {
  pub fn new(file_path: impl Into<String>, page_id: Option<String>, load_file: Option<LoadFileFn>) -> Self {
    let file_path = file_path.into();
    let side = FileSide::from_file_path(&file_path);
    Self { file_path, page_id, side, load_file }
  }

  pub fn is_default_page_file(&self) -> bool {
    self.page_id.is_none()
  }

  /// Directory a default file governs, with `renderer` and `_default` segments dropped.
  fn default_scope(&self) -> Vec<&str> {
    let mut segments: Vec<&str> = self.file_path.split('/').filter(|s| !s.is_empty()).collect();
    segments.pop();
    segments.retain(|s| *s != "renderer" && *s != "_default");
    segments
  }

  /// Depth of the governed directory; deeper default files are more specific.
  pub fn default_depth(&self) -> usize {
    self.default_scope().len()
  }

  pub fn is_relevant(&self, page_id: &str) -> bool {
    match &self.page_id {
      Some(id) => id == page_id,
      None => {
        let scope = self.default_scope();
        let page: Vec<&str> = page_id.split('/').filter(|s| !s.is_empty()).collect();
        page.starts_with(&scope)
      }
    }
  }
}

impl fmt::Debug for PageFile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PageFile")
      .field("file_path", &self.file_path)
      .field("page_id", &self.page_id)
      .field("side", &self.side)
      .field("load_file", &self.load_file.is_some())
      .finish()
  }
}

/// Client-side files relevant to `page_id`, in load order: default files
/// first (shallow to deep), then the page's own files.
pub fn get_page_files_client_side(page_files_all: &[PageFile], page_id: &str) -> Vec<PageFile> {
  let mut files: Vec<PageFile> = page_files_all
    .iter()
    .filter(|p| p.side.is_client_side() && p.is_relevant(page_id))
    .cloned()
    .collect();
  files.sort_by_key(|p| if p.is_default_page_file() { (0, p.default_depth()) } else { (1, 0) });
  files
}
