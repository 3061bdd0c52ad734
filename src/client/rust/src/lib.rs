/* src/client/rust/src/lib.rs */

pub mod errors;
pub mod loader;


pub use errors::{AssetFetchError, ClientLoadError, is_error_fetching_static_assets};
pub use loader::{PageFilesLoaded, load_page_code, load_page_files_client_side};
