/* src/cli/core/src/config/tests/validation.rs */

use super::*;

fn parse(s: &str) -> anyhow::Result<TrellisConfig> {
  Ok(toml::from_str(s)?)
}

#[test]
fn unknown_env_is_rejected_by_parser() {
  let err = parse(
    r#"
[project]
name = "my-app"

[configs.analytics]
env = "browser"
"#,
  );
  assert!(err.is_err());
}

#[test]
fn custom_config_colliding_with_builtin() {
  let config = parse(
    r#"
[project]
name = "my-app"

[configs.title]
env = "config-only"
"#,
  )
  .unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("collides with the built-in"));
}

#[test]
fn custom_config_name_must_be_identifier() {
  let config = parse(
    r#"
[project]
name = "my-app"

[configs."my-config"]
env = "server-only"
"#,
  )
  .unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("my-config"));
}

#[test]
fn duplicated_extension() {
  let config = parse(
    r#"
[project]
name = "my-app"

[plugin]
extensions = ["ext/ui", "ext/ui/"]
"#,
  )
  .unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("more than once"));
}

#[test]
fn load_reports_validation_errors_with_path() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("trellis.toml");
  std::fs::write(&path, "[project]\nname = \"x\"\n\n[configs.Page]\nenv = \"client-only\"\n").unwrap();
  let err = load_trellis_config(&path).unwrap_err();
  assert!(format!("{err:#}").contains("trellis.toml"));
}
