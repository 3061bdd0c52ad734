/* src/node/plugin/src/virtual_file.rs */

use std::path::Path;

use trellis_shared::errors::Result;
use trellis_shared::{TrellisError, parse_virtual_file_id_page_code};

use crate::codegen::generate_page_code;
use crate::config_data::{ConfigDataCache, get_config_data};
use crate::options::PluginOptions;

/// Answer a bundler request for a page-code virtual module.
pub async fn load_virtual_file_page_code(
  id: &str,
  user_root_dir: &Path,
  is_dev: bool,
  options: &PluginOptions,
  cache: &ConfigDataCache,
) -> Result<String> {
  let parsed = parse_virtual_file_id_page_code(id)
    .ok_or_else(|| TrellisError::bug(format!("not a page-code virtual id: `{id}`")))?;

  let config_data = get_config_data(cache, user_root_dir, is_dev, false, options).await?;
  let page = config_data
    .page(&parsed.page_id)
    .ok_or_else(|| TrellisError::bug(format!("no page config for `{}`", parsed.page_id)))?;

  let side = parsed.side();
  let code = generate_page_code(
    page,
    side,
    &parsed.page_id,
    options.include_assets_imported_by_server,
    is_dev,
  );
  tracing::debug!(id, side = side.as_str(), "generated page-code module:\n{code}");
  Ok(code)
}
