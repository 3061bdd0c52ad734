/* src/cli/core/src/route.rs */

use anyhow::{Result, bail};
use trellis_plugin::{ConfigDataCache, get_config_data};
use trellis_shared::route_page;

use crate::config::Project;
use crate::ui::{self, BOLD, DIM, RESET};

/// Show which page `url` maps to.
pub async fn run_route(project: &Project, cache: &ConfigDataCache, url: &str) -> Result<()> {
  let data = get_config_data(cache, &project.root_dir, true, false, &project.options).await?;
  let Some(matched) = route_page(&data.page_configs_data, url)? else {
    ui::fail(&format!("no page matches {url}"));
    bail!("no route for {url}");
  };

  ui::ok(&format!("{BOLD}{}{RESET}  {DIM}via {}{RESET}", matched.page.page_id, matched.route_string));
  for (name, value) in &matched.params {
    ui::detail(&format!("{name} = {value}"));
  }
  Ok(())
}
