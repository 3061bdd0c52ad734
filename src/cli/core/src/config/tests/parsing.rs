/* src/cli/core/src/config/tests/parsing.rs */

use std::path::Path;

use trellis_shared::ConfigEnv;

use super::*;

#[test]
fn parse_minimal_config() {
  let config: TrellisConfig = toml::from_str(
    r#"
[project]
name = "my-app"
"#,
  )
  .unwrap();
  assert_eq!(config.project.name, "my-app");
  assert_eq!(config.project.root, ".");
  assert!(config.plugin.extensions.is_empty());
  assert!(config.plugin.include_assets_imported_by_server);
  assert!(config.configs.is_empty());
}

#[test]
fn parse_full_config() {
  let config: TrellisConfig = toml::from_str(
    r#"
[project]
name = "my-app"
root = "app"

[plugin]
extensions = ["node_modules/trellis-react"]
include_assets_imported_by_server = false

[configs.analytics]
env = "client-only"
"#,
  )
  .unwrap();
  assert_eq!(config.project.root, "app");
  assert_eq!(config.plugin.extensions, vec!["node_modules/trellis-react"]);
  assert!(!config.plugin.include_assets_imported_by_server);
  assert_eq!(config.configs["analytics"].env, ConfigEnv::ClientOnly);
}

#[test]
fn project_paths_are_relative_to_config_file() {
  let config: TrellisConfig = toml::from_str(
    r#"
[project]
name = "my-app"
root = "app"

[plugin]
extensions = ["ext/ui"]

[configs.analytics]
env = "client-only"
"#,
  )
  .unwrap();
  let project = Project::from_config(Path::new("/work/my-app/trellis.toml"), &config).unwrap();
  assert_eq!(project.root_dir, Path::new("/work/my-app/app"));
  assert_eq!(project.options.extensions, vec![Path::new("/work/my-app/ext/ui").to_path_buf()]);
  assert_eq!(project.options.definitions.classify("analytics"), Some(ConfigEnv::ClientOnly));
  assert_eq!(project.watched_dirs().len(), 2);
}

#[test]
fn find_config_walks_upward() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("trellis.toml"), "[project]\nname = \"x\"\n").unwrap();
  let nested = dir.path().join("pages/about");
  std::fs::create_dir_all(&nested).unwrap();

  let found = find_trellis_config(&nested).unwrap();
  assert_eq!(found, dir.path().canonicalize().unwrap().join("trellis.toml"));
  let config = load_trellis_config(&found).unwrap();
  assert_eq!(config.project.name, "x");
}
