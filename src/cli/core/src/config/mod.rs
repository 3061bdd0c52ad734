/* src/cli/core/src/config/mod.rs */

mod loader;
mod project;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{find_trellis_config, load_trellis_config};
pub use project::Project;
pub use types::TrellisConfig;
