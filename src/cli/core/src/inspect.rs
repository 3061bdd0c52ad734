/* src/cli/core/src/inspect.rs */

use anyhow::Result;
use trellis_plugin::{ConfigData, ConfigDataCache, get_config_data};
use trellis_shared::{ConfigElement, page_route_string};

use crate::config::Project;
use crate::ui::{self, BOLD, CYAN, DIM, RESET};

fn describe(element: &ConfigElement) -> String {
  match (&element.config_value_file_path, &element.config_value) {
    (Some(path), _) => path.clone(),
    (None, Some(value)) => serde_json::to_string(&value.to_json()).unwrap_or_else(|_| value.to_string()),
    (None, None) => "null".to_string(),
  }
}

pub(crate) fn print_pages(data: &ConfigData) {
  for page in &data.page_configs_data {
    let route = match page_route_string(page) {
      Ok(Some(route)) => route.to_string(),
      Ok(None) => "(route function)".to_string(),
      Err(e) => format!("(invalid route: {})", e.message()),
    };
    ui::arrow(&format!("{BOLD}{}{RESET}  {CYAN}{route}{RESET}", page.page_id));
    for (name, element) in &page.config_elements {
      ui::detail(&format!("{name:<24} {:<18} {}", element.config_env.as_str(), describe(element)));
      ui::detail(&format!("{DIM}  {}{RESET}", element.config_defined_at));
    }
  }
}

/// Resolve every page config and list it.
pub async fn run_inspect(project: &Project, cache: &ConfigDataCache, is_dev: bool, json: bool) -> Result<()> {
  let data = get_config_data(cache, &project.root_dir, is_dev, false, &project.options).await?;
  if json {
    println!("{}", serde_json::to_string_pretty(data.as_ref())?);
    return Ok(());
  }

  ui::banner("inspect");
  print_pages(&data);
  ui::blank();
  ui::ok(&format!("{} pages resolved in {}", data.page_configs_data.len(), project.root_dir.display()));
  Ok(())
}
