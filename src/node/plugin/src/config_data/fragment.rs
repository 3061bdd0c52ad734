/* src/node/plugin/src/config_data/fragment.rs */

// Discovery of configuration fragments: `+<name>[.client|.server].<ext>` code
// files and the entries of `+config.toml` files.

use std::path::Path;

use trellis_shared::errors::Result;
use trellis_shared::{ConfigDefinitions, ConfigElement, ConfigEnv, ConfigValue, TrellisError};
use walkdir::{DirEntry, WalkDir};

const CONFIG_FILE: &str = "+config.toml";
const IGNORED_DIRS: &[&str] = &["node_modules", "dist"];
/// Co-located test files such as `+Page.test.tsx` are not fragments.
const TEST_SUFFIXES: &[&str] = &["test", "spec"];
/// Directory names that do not narrow where a fragment applies.
const TRANSPARENT_SEGMENTS: &[&str] = &["pages", "src", "renderer"];

/// Precedence of a fragment: user fragments beat extension fragments, then
/// deeper locations beat shallower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Rank {
  pub(crate) is_user: bool,
  pub(crate) depth: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct Fragment {
  pub(crate) config_name: String,
  /// Directory the fragment lives in, `/`-separated (root-relative for user files).
  pub(crate) dir: String,
  /// `dir` without transparent segments; a fragment applies below its location.
  pub(crate) location: Vec<String>,
  pub(crate) rank: Rank,
  pub(crate) file_path: Option<String>,
  pub(crate) value: Option<ConfigValue>,
  pub(crate) env: ConfigEnv,
  /// File the fragment was read from.
  pub(crate) site: String,
}

impl Fragment {
  pub(crate) fn defined_at(&self) -> String {
    format!("Config `{}` defined at {}", self.config_name, self.site)
  }

  pub(crate) fn applies_to(&self, page_location: &[String]) -> bool {
    page_location.starts_with(&self.location)
  }

  pub(crate) fn is_nullish(&self) -> bool {
    self.file_path.is_none() && self.value.as_ref().is_none_or(ConfigValue::is_null)
  }

  pub(crate) fn same_definition(&self, other: &Fragment) -> bool {
    self.file_path == other.file_path && self.value == other.value && self.env == other.env
  }

  pub(crate) fn to_element(&self) -> ConfigElement {
    ConfigElement {
      config_value: self.value.clone(),
      config_value_file_path: self.file_path.clone(),
      config_env: self.env,
      config_defined_at: self.defined_at(),
    }
  }
}

/// Where a scan starts and how its paths are displayed.
pub(crate) struct ScanRoot<'a> {
  pub(crate) dir: &'a Path,
  pub(crate) is_user: bool,
  /// Prefix of every displayed path: empty for the user root, the directory
  /// itself for extensions.
  pub(crate) display_base: String,
}

impl<'a> ScanRoot<'a> {
  pub(crate) fn user(dir: &'a Path) -> Self {
    Self { dir, is_user: true, display_base: String::new() }
  }

  pub(crate) fn extension(dir: &'a Path) -> Self {
    let base = dir.to_string_lossy().replace('\\', "/");
    Self { dir, is_user: false, display_base: base.trim_end_matches('/').to_string() }
  }

  fn display(&self, segments: &[String]) -> String {
    if segments.is_empty() && self.display_base.is_empty() {
      return "/".to_string();
    }
    format!("{}/{}", self.display_base, segments.join("/"))
  }
}

fn is_ignored(entry: &DirEntry) -> bool {
  if entry.depth() == 0 || !entry.file_type().is_dir() {
    return false;
  }
  let name = entry.file_name().to_string_lossy();
  name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
}

pub(crate) fn location_of(dir_segments: &[String]) -> Vec<String> {
  dir_segments.iter().filter(|s| !TRANSPARENT_SEGMENTS.contains(&s.as_str())).cloned().collect()
}

/// Walk `root` and collect every fragment, with its env validated.
pub(crate) fn scan_fragments(root: &ScanRoot<'_>, defs: &ConfigDefinitions) -> Result<Vec<Fragment>> {
  let mut fragments = Vec::new();
  let walker = WalkDir::new(root.dir).sort_by_file_name().into_iter().filter_entry(|e| !is_ignored(e));

  for entry in walker {
    let entry = entry.map_err(|e| {
      TrellisError::usage(format!("failed to scan {}: {e}", root.dir.display()))
    })?;
    if !entry.file_type().is_file() {
      continue;
    }
    let file_name = entry.file_name().to_string_lossy().into_owned();
    if !file_name.starts_with('+') {
      continue;
    }
    let Ok(rel) = entry.path().strip_prefix(root.dir) else {
      continue;
    };
    let mut dir_segments: Vec<String> =
      rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
    dir_segments.pop();

    let location = location_of(&dir_segments);
    let rank = Rank { is_user: root.is_user, depth: location.len() };
    let dir = root.display(&dir_segments);
    let mut file_segments = dir_segments.clone();
    file_segments.push(file_name.clone());
    let site = root.display(&file_segments);

    let base = Fragment {
      config_name: String::new(),
      dir,
      location,
      rank,
      file_path: None,
      value: None,
      env: ConfigEnv::ServerAndClient,
      site,
    };

    if file_name == CONFIG_FILE {
      let content = std::fs::read_to_string(entry.path())
        .map_err(|e| TrellisError::usage(format!("failed to read {}: {e}", base.site)))?;
      fragments.extend(fragments_from_config_file(&content, &base, defs)?);
    } else if file_name.starts_with("+config.") {
      return Err(TrellisError::usage(format!(
        "{}: only `{CONFIG_FILE}` config files are supported",
        base.site
      )));
    } else {
      let Some((name, declared)) = parse_code_file_name(&file_name, &base.site)? else {
        continue;
      };
      let mut fragment = base;
      fragment.config_name = name.to_string();
      fragment.file_path = Some(fragment.site.clone());
      fragment.env = defs.resolve_env(name, declared, &fragment.defined_at())?;
      fragments.push(fragment);
    }
  }

  Ok(fragments)
}

/// Split `+Page.client.tsx` into (`Page`, client-only). Names without an
/// extension and test files are not fragments.
pub(crate) fn parse_code_file_name<'a>(
  file_name: &'a str,
  site: &str,
) -> Result<Option<(&'a str, Option<ConfigEnv>)>> {
  let Some(stem) = file_name.strip_prefix('+') else {
    return Ok(None);
  };
  let parts: Vec<&str> = stem.split('.').collect();
  let Some((_ext, rest)) = parts.split_last() else {
    return Ok(None);
  };
  let Some((name, suffixes)) = rest.split_first() else {
    return Ok(None);
  };
  if suffixes.iter().any(|s| TEST_SUFFIXES.contains(s)) {
    return Ok(None);
  }
  let declared = match suffixes {
    [] => None,
    ["client"] => Some(ConfigEnv::ClientOnly),
    ["server"] => Some(ConfigEnv::ServerOnly),
    _ => {
      return Err(TrellisError::usage(format!(
        "{site}: unrecognized file name suffix `.{}`, expected `.client` or `.server`",
        suffixes.join(".")
      )));
    }
  };
  Ok(Some((name, declared)))
}

fn fragments_from_config_file(
  content: &str,
  base: &Fragment,
  defs: &ConfigDefinitions,
) -> Result<Vec<Fragment>> {
  let table: toml::Table = toml::from_str(content)
    .map_err(|e| TrellisError::usage(format!("{} is not valid TOML: {e}", base.site)))?;

  let mut out = Vec::with_capacity(table.len());
  for (key, value) in table {
    let mut fragment = base.clone();
    fragment.config_name = key;
    let declared = match value {
      toml::Value::Table(t) if t.contains_key("import") => {
        let (path, declared) = parse_import_table(&t, &fragment)?;
        fragment.file_path = Some(path);
        declared
      }
      other => {
        let json = serde_json::to_value(other).map_err(|e| {
          TrellisError::usage(format!("{} has an unsupported value: {e}", fragment.defined_at()))
        })?;
        fragment.value = ConfigValue::from_json(json);
        None
      }
    };
    fragment.env = defs.resolve_env(&fragment.config_name, declared, &fragment.defined_at())?;
    out.push(fragment);
  }
  Ok(out)
}

/// `{ import = "./Layout.js", env = "client-only" }`
fn parse_import_table(table: &toml::Table, fragment: &Fragment) -> Result<(String, Option<ConfigEnv>)> {
  let defined_at = fragment.defined_at();
  if let Some(key) = table.keys().find(|k| *k != "import" && *k != "env") {
    return Err(TrellisError::usage(format!(
      "{defined_at} has an unknown key `{key}`: only `import` and `env` are allowed"
    )));
  }
  let import = table.get("import").and_then(toml::Value::as_str).ok_or_else(|| {
    TrellisError::usage(format!("{defined_at}: `import` should be a string"))
  })?;
  let declared = match table.get("env") {
    None => None,
    Some(v) => {
      let raw = v
        .as_str()
        .ok_or_else(|| TrellisError::usage(format!("{defined_at}: `env` should be a string")))?;
      let env = raw
        .parse::<ConfigEnv>()
        .map_err(|e| TrellisError::usage(format!("{defined_at}: {}", e.message())))?;
      Some(env)
    }
  };
  Ok((resolve_import(&fragment.dir, import), declared))
}

/// Resolve a relative import against the config file's directory. Absolute
/// and bare specifiers are kept verbatim.
pub(crate) fn resolve_import(dir: &str, specifier: &str) -> String {
  if !(specifier.starts_with("./") || specifier.starts_with("../")) {
    return specifier.to_string();
  }
  let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
  for part in specifier.split('/') {
    match part {
      "" | "." => {}
      ".." => {
        segments.pop();
      }
      p => segments.push(p),
    }
  }
  let joined = segments.join("/");
  if dir.starts_with('/') { format!("/{joined}") } else { joined }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn code_file_names() {
    assert_eq!(parse_code_file_name("+Page.tsx", "x").unwrap(), Some(("Page", None)));
    assert_eq!(
      parse_code_file_name("+Page.client.js", "x").unwrap(),
      Some(("Page", Some(ConfigEnv::ClientOnly)))
    );
    assert_eq!(
      parse_code_file_name("+onBeforeRender.server.ts", "x").unwrap(),
      Some(("onBeforeRender", Some(ConfigEnv::ServerOnly)))
    );
    assert_eq!(parse_code_file_name("+Page", "x").unwrap(), None);
    assert_eq!(parse_code_file_name("Page.js", "x").unwrap(), None);
  }

  #[test]
  fn test_files_are_not_fragments() {
    assert_eq!(parse_code_file_name("+Page.test.tsx", "x").unwrap(), None);
    assert_eq!(parse_code_file_name("+Page.spec.ts", "x").unwrap(), None);
    assert_eq!(parse_code_file_name("+Page.client.test.ts", "x").unwrap(), None);
  }

  #[test]
  fn code_file_name_bad_suffix() {
    let err = parse_code_file_name("+Page.edge.js", "/pages/+Page.edge.js").unwrap_err();
    assert!(err.is_usage());
    assert!(err.message().contains("/pages/+Page.edge.js"));
  }

  #[test]
  fn import_resolution() {
    assert_eq!(resolve_import("/pages", "./Layout.js"), "/pages/Layout.js");
    assert_eq!(resolve_import("/pages/about", "../layouts/Main.js"), "/pages/layouts/Main.js");
    assert_eq!(resolve_import("/", "./renderer/x.js"), "/renderer/x.js");
    assert_eq!(resolve_import("/pages", "/layouts/Main.js"), "/layouts/Main.js");
    assert_eq!(resolve_import("/pages", "some-pkg/Layout"), "some-pkg/Layout");
  }

  #[test]
  fn location_skips_transparent_segments() {
    let segs: Vec<String> = ["src", "pages", "about", "renderer"].iter().map(|s| s.to_string()).collect();
    assert_eq!(location_of(&segs), vec!["about".to_string()]);
  }

  #[test]
  fn rank_order() {
    let ext = Rank { is_user: false, depth: 3 };
    let root = Rank { is_user: true, depth: 0 };
    let deep = Rank { is_user: true, depth: 2 };
    assert!(root > ext);
    assert!(deep > root);
  }
}
