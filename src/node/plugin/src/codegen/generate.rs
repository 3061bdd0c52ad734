/* src/node/plugin/src/codegen/generate.rs */

use trellis_shared::{PageConfigData, Side, extract_assets_add_query, get_virtual_file_id_page_code};

use super::ast::PageCodeModule;
use super::render::render_module;

/// Structure of the page-code module for `side`: one eager import and record
/// per file-backed element loaded on that side, in declaration order.
pub fn build_page_code_module(
  page_config_data: &PageConfigData,
  side: Side,
  page_id: &str,
  include_assets_imported_by_server: bool,
  is_dev: bool,
) -> PageCodeModule {
  let mut module = PageCodeModule::default();

  for (config_name, element) in &page_config_data.config_elements {
    let Some(file_path) = element.config_value_file_path.as_deref() else {
      continue;
    };
    if !element.config_env.is_loaded_on(side) {
      continue;
    }
    module.push_code_file(config_name, file_path);
  }

  if include_assets_imported_by_server && side.is_client() && !is_dev {
    let server_id = get_virtual_file_id_page_code(page_id, false);
    module.side_effect_imports.push(extract_assets_add_query(&server_id));
  }

  module
}

/// Source text of the page-code module. Pure: identical inputs give identical text.
pub fn generate_page_code(
  page_config_data: &PageConfigData,
  side: Side,
  page_id: &str,
  include_assets_imported_by_server: bool,
  is_dev: bool,
) -> String {
  render_module(&build_page_code_module(
    page_config_data,
    side,
    page_id,
    include_assets_imported_by_server,
    is_dev,
  ))
}
