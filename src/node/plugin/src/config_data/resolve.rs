/* src/node/plugin/src/config_data/resolve.rs */

use std::collections::BTreeMap;
use std::path::Path;

use trellis_shared::errors::Result;
use trellis_shared::{ConfigDefinitions, PageConfigData, TrellisError};

use super::ConfigData;
use super::fragment::{Fragment, ScanRoot, scan_fragments};
use crate::options::PluginOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageDir {
  pub(crate) page_id: String,
  pub(crate) location: Vec<String>,
  pub(crate) route_filesystem: String,
}

/// `index` segments and `(group)` segments don't contribute to the URL.
pub(crate) fn route_filesystem(location: &[String]) -> String {
  let segments: Vec<&str> = location
    .iter()
    .map(String::as_str)
    .filter(|s| *s != "index" && !(s.starts_with('(') && s.ends_with(')')))
    .collect();
  format!("/{}", segments.join("/"))
}

/// Every user directory holding a `+Page` fragment is a page.
fn discover_pages(fragments: &[Fragment]) -> Vec<PageDir> {
  let mut pages = BTreeMap::new();
  for f in fragments.iter().filter(|f| f.rank.is_user && f.config_name == "Page") {
    pages.entry(f.dir.clone()).or_insert_with(|| PageDir {
      page_id: f.dir.clone(),
      location: f.location.clone(),
      route_filesystem: route_filesystem(&f.location),
    });
  }
  pages.into_values().collect()
}

fn conflict_error(config_name: &str, page_id: &str, candidates: &[&Fragment]) -> TrellisError {
  let mut sites: Vec<&str> = candidates.iter().map(|f| f.site.as_str()).collect();
  sites.sort_unstable();
  sites.dedup();
  TrellisError::usage(format!(
    "Config `{config_name}` is defined by both {} which apply to {page_id} with the same \
     precedence: remove all but one, or move one of them to a more specific directory",
    sites.join(" and ")
  ))
}

/// Merge the fragments applying to `page` into its config data.
pub(crate) fn resolve_page(
  page: &PageDir,
  fragments: &[Fragment],
  defs: &ConfigDefinitions,
) -> Result<PageConfigData> {
  let mut data = PageConfigData::new(&page.page_id, &page.route_filesystem);

  for name in defs.names() {
    let mut candidates: Vec<&Fragment> = fragments
      .iter()
      .filter(|f| f.config_name == name && f.applies_to(&page.location) && !f.is_nullish())
      .collect();
    let Some(top) = candidates.iter().map(|f| f.rank).max() else {
      continue;
    };
    candidates.retain(|f| f.rank == top);
    let Some(winner) = candidates.first() else {
      continue;
    };
    if candidates.iter().any(|f| !f.same_definition(winner)) {
      return Err(conflict_error(name, &page.page_id, &candidates));
    }
    data.config_elements.insert(name.to_string(), winner.to_element());
  }

  Ok(data)
}

/// Scan the user root and every extension, then resolve each page.
pub fn load_config_data(user_root_dir: &Path, options: &PluginOptions) -> Result<ConfigData> {
  let defs = &options.definitions;
  let mut fragments = scan_fragments(&ScanRoot::user(user_root_dir), defs)?;
  for ext in &options.extensions {
    fragments.extend(scan_fragments(&ScanRoot::extension(ext), defs)?);
  }
  tracing::debug!(root = %user_root_dir.display(), fragments = fragments.len(), "scanned config fragments");

  let page_configs_data = discover_pages(&fragments)
    .iter()
    .map(|page| resolve_page(page, &fragments, defs))
    .collect::<Result<Vec<_>>>()?;

  tracing::debug!(pages = page_configs_data.len(), "resolved page configs");
  Ok(ConfigData { page_configs_data })
}

#[cfg(test)]
mod tests {
  use trellis_shared::{ConfigEnv, ConfigValue};

  use super::*;
  use crate::config_data::fragment::Rank;

  fn segs(s: &[&str]) -> Vec<String> {
    s.iter().map(|x| x.to_string()).collect()
  }

  fn frag(name: &str, dir: &str, location: &[&str], is_user: bool, value: ConfigValue) -> Fragment {
    Fragment {
      config_name: name.into(),
      dir: dir.into(),
      location: segs(location),
      rank: Rank { is_user, depth: location.len() },
      file_path: None,
      value: Some(value),
      env: ConfigEnv::ConfigOnly,
      site: format!("{dir}/+config.toml"),
    }
  }

  fn about() -> PageDir {
    PageDir { page_id: "/pages/about".into(), location: segs(&["about"]), route_filesystem: "/about".into() }
  }

  #[test]
  fn filesystem_routes() {
    assert_eq!(route_filesystem(&segs(&["index"])), "/");
    assert_eq!(route_filesystem(&segs(&["(marketing)", "about"])), "/about");
    assert_eq!(route_filesystem(&segs(&["star-wars", "@id"])), "/star-wars/@id");
    assert_eq!(route_filesystem(&[]), "/");
  }

  #[test]
  fn deeper_fragment_wins() {
    let frags = vec![
      frag("title", "/pages", &[], true, ConfigValue::String("Root".into())),
      frag("title", "/pages/about", &["about"], true, ConfigValue::String("About".into())),
    ];
    let data = resolve_page(&about(), &frags, &ConfigDefinitions::builtin()).unwrap();
    assert_eq!(data.element("title").unwrap().config_value, Some(ConfigValue::String("About".into())));
  }

  #[test]
  fn user_beats_extension() {
    let frags = vec![
      frag("title", "/ext/pages/about", &["about"], false, ConfigValue::String("Ext".into())),
      frag("title", "/pages", &[], true, ConfigValue::String("User".into())),
    ];
    let data = resolve_page(&about(), &frags, &ConfigDefinitions::builtin()).unwrap();
    assert_eq!(data.element("title").unwrap().config_value, Some(ConfigValue::String("User".into())));
  }

  #[test]
  fn null_fragment_does_not_shadow() {
    let mut null = frag("title", "/pages/about", &["about"], true, ConfigValue::String(String::new()));
    null.value = None;
    let frags = vec![frag("title", "/pages", &[], true, ConfigValue::String("Root".into())), null];
    let data = resolve_page(&about(), &frags, &ConfigDefinitions::builtin()).unwrap();
    assert_eq!(data.element("title").unwrap().config_value, Some(ConfigValue::String("Root".into())));
  }

  #[test]
  fn same_rank_disagreement_names_both_sites() {
    let frags = vec![
      frag("title", "/pages", &[], true, ConfigValue::String("A".into())),
      frag("title", "/renderer", &[], true, ConfigValue::String("B".into())),
    ];
    let err = resolve_page(&about(), &frags, &ConfigDefinitions::builtin()).unwrap_err();
    assert!(err.is_usage());
    assert!(err.message().contains("/pages/+config.toml"));
    assert!(err.message().contains("/renderer/+config.toml"));
  }

  #[test]
  fn identical_same_rank_definitions_are_fine() {
    let frags = vec![
      frag("title", "/pages", &[], true, ConfigValue::String("A".into())),
      frag("title", "/renderer", &[], true, ConfigValue::String("A".into())),
    ];
    assert!(resolve_page(&about(), &frags, &ConfigDefinitions::builtin()).is_ok());
  }

  #[test]
  fn fragments_for_other_pages_ignored() {
    let frags = vec![frag("title", "/pages/index", &["index"], true, ConfigValue::String("Home".into()))];
    let data = resolve_page(&about(), &frags, &ConfigDefinitions::builtin()).unwrap();
    assert!(data.element("title").is_none());
  }
}
