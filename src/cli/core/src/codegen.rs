/* src/cli/core/src/codegen.rs */

use anyhow::{Result, bail};
use trellis_plugin::{ConfigDataCache, get_config_data, load_virtual_file_page_code};
use trellis_shared::get_virtual_file_id_page_code;
use trellis_shared::suggest::did_you_mean;

use crate::config::Project;

/// Print the page-code module the bundler would receive for `page_id`.
pub async fn run_codegen(
  project: &Project,
  cache: &ConfigDataCache,
  page_id: &str,
  server: bool,
  is_dev: bool,
) -> Result<()> {
  let data = get_config_data(cache, &project.root_dir, is_dev, false, &project.options).await?;
  if data.page(page_id).is_none() {
    let ids: Vec<&str> = data.page_configs_data.iter().map(|p| p.page_id.as_str()).collect();
    match did_you_mean(page_id, &ids) {
      Some(s) => bail!("unknown page `{page_id}`, did you mean `{s}`?"),
      None => bail!("unknown page `{page_id}` (run `trellis inspect` to list pages)"),
    }
  }

  let id = get_virtual_file_id_page_code(page_id, !server);
  let code =
    load_virtual_file_page_code(&id, &project.root_dir, is_dev, &project.options, cache).await?;
  println!("{code}");
  Ok(())
}
