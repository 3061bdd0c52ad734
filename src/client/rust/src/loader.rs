/* src/client/rust/src/loader.rs */

use futures_util::future::{try_join, try_join_all};
use trellis_shared::{
  BoxError, FileExports, PageConfig, PageConfigLoaded, PageContextExports, PageFile, Side,
  find_page_config, get_exports, get_page_files_client_side,
};

use crate::errors::{AssetFetchError, ClientLoadError};

/// Exports of a page, merged from its page-code module and legacy files.
#[derive(Debug)]
pub struct PageFilesLoaded {
  pub page_context: PageContextExports,
  /// Client-side page files that took part in the load.
  pub loaded_files: Vec<PageFile>,
}

/// Import the page-code module of `page_config`. Outside of dev the result
/// is kept on the config and reused.
pub async fn load_page_code(page_config: &PageConfig, is_dev: bool) -> Result<PageConfigLoaded, BoxError> {
  if !is_dev && let Some(code_files) = page_config.cached_code_files() {
    return Ok(PageConfigLoaded { data: page_config.data.clone(), code_files: code_files.to_vec() });
  }
  let code_files = (page_config.load_code_files)().await?;
  if !is_dev {
    page_config.prime_code_files(code_files.clone());
  }
  Ok(PageConfigLoaded { data: page_config.data.clone(), code_files })
}

async fn load_page_file(file: &PageFile) -> Result<Option<FileExports>, BoxError> {
  match &file.load_file {
    Some(load) => load().await.map(Some),
    None => Ok(None),
  }
}

/// Load everything page `page_id` needs on the client, concurrently.
///
/// The first failing load fails the whole batch with
/// [`ClientLoadError::FetchingAssets`]; the other loads' results are dropped.
pub async fn load_page_files_client_side(
  page_files_all: &[PageFile],
  page_configs: &[PageConfig],
  page_id: &str,
  is_dev: bool,
) -> Result<PageFilesLoaded, ClientLoadError> {
  let page_files = get_page_files_client_side(page_files_all, page_id);
  let page_config = find_page_config(page_configs, page_id);
  tracing::debug!(page_id, files = page_files.len(), config = page_config.is_some(), "loading page");

  let code = async {
    match page_config {
      Some(pc) => load_page_code(pc, is_dev).await.map(Some),
      None => Ok(None),
    }
  };
  let files = try_join_all(page_files.iter().map(load_page_file));
  let (page_config_loaded, file_exports) = try_join(code, files).await.map_err(AssetFetchError::new)?;

  let loaded: Vec<(PageFile, FileExports)> = page_files
    .iter()
    .zip(file_exports)
    .filter_map(|(file, exports)| exports.map(|e| (file.clone(), e)))
    .collect();
  let page_context = get_exports(&loaded, page_config_loaded.as_ref(), Side::Client)?;

  Ok(PageFilesLoaded { page_context, loaded_files: page_files })
}
