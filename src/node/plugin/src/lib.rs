/* src/node/plugin/src/lib.rs */

pub mod codegen;
pub mod config_data;
pub mod options;
pub mod virtual_file;

pub use codegen::{build_page_code_module, generate_page_code};
pub use config_data::{ConfigData, ConfigDataCache, get_config_data, load_config_data};
pub use options::PluginOptions;
pub use virtual_file::load_virtual_file_page_code;
