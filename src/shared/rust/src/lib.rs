/* src/shared/rust/src/lib.rs */

pub mod accessors;
pub mod config_env;
pub mod errors;
pub mod exports;
pub mod page_config;
pub mod page_files;
pub mod route;
pub mod suggest;
pub mod virtual_files;

// Re-exports for ergonomic use
pub use accessors::{
  find_page_config, get_code_file_path, get_config_bool, get_config_string, get_config_value,
  get_page_config,
};
pub use config_env::{ConfigDefinitions, ConfigEnv, Side};
pub use errors::{ErrorKind, TrellisError};
pub use exports::{ConfigEntry, ExportSource, PageContextExports, get_exports};
pub use page_config::{
  BoxError, BoxFuture, CodeFileEntry, ConfigElement, ConfigValue, FileExports, LoadCodeFilesFn,
  PageConfig, PageConfigData, PageConfigLoaded, PageIdentified, ValueType,
};
pub use page_files::{FileSide, LoadFileFn, PageFile, get_page_files_client_side};
pub use route::{RouteMatch, RouteParams, page_route_string, route_page, route_string_matches};
pub use virtual_files::{
  VirtualFileIdPageCode, extract_assets_add_query, get_virtual_file_id_page_code,
  is_virtual_file_id_page_code, parse_virtual_file_id_page_code,
};
