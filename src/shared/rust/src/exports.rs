/* src/shared/rust/src/exports.rs */

//! Merge the exports of the config-driven page-code module and of legacy page
//! files into the views handed to the rendering pipeline.
//!
//! Precedence per export name: config-driven code files first (declaration
//! order), then the page's own legacy files, then `_default` files from the
//! most to the least specific. `exports[name]` is the first source.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::config_env::Side;
use crate::errors::{Result, TrellisError};
use crate::page_config::{FileExports, PageConfigLoaded};
use crate::page_files::PageFile;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
  pub config_value: Value,
  pub config_defined_at: String,
  /// Backing file, if the value came from one.
  pub config_defined_by_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSource {
  pub export_value: Value,
  /// e.g. ``/pages/+onBeforeRender.js > `default` ``
  pub export_source: String,
  pub file_path: Option<String>,
  pub is_from_default_file: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContextExports {
  pub config: IndexMap<String, Value>,
  pub config_entries: IndexMap<String, Vec<ConfigEntry>>,
  pub exports: IndexMap<String, Value>,
  pub exports_all: IndexMap<String, Vec<ExportSource>>,
  pub page_exports: IndexMap<String, Value>,
}

impl PageContextExports {
  fn add_source(&mut self, name: &str, source: ExportSource, page_level: bool) {
    if page_level && !self.page_exports.contains_key(name) {
      self.page_exports.insert(name.to_string(), source.export_value.clone());
    }
    if !self.exports.contains_key(name) {
      self.exports.insert(name.to_string(), source.export_value.clone());
    }
    self.exports_all.entry(name.to_string()).or_default().push(source);
  }

  fn add_config(&mut self, name: &str, value: Value, defined_at: &str, file: Option<&str>) {
    self.config.insert(name.to_string(), value.clone());
    self.config_entries.entry(name.to_string()).or_default().push(ConfigEntry {
      config_value: value.clone(),
      config_defined_at: defined_at.to_string(),
      config_defined_by_file: file.map(String::from),
    });
    let source = ExportSource {
      export_value: value,
      export_source: match file {
        Some(path) => format!("{path} > `{name}`"),
        None => defined_at.to_string(),
      },
      file_path: file.map(String::from),
      is_from_default_file: false,
    };
    self.add_source(name, source, true);
  }
}

/// Value a code file contributes for its config: the default export, or the
/// export named after the config.
fn code_file_value(config_name: &str, file_path: &str, exports: &FileExports) -> Result<Value> {
  exports.get("default").or_else(|| exports.get(config_name)).cloned().ok_or_else(|| {
    TrellisError::usage(format!(
      "{file_path} should have a default export or an export named `{config_name}`"
    ))
  })
}

/// Build the exports views for `side`.
///
/// `page_files` is in load order (default files shallow to deep, then the
/// page's own files), as returned by `get_page_files_client_side`.
pub fn get_exports(
  page_files: &[(PageFile, FileExports)],
  page_config_loaded: Option<&PageConfigLoaded>,
  side: Side,
) -> Result<PageContextExports> {
  let mut out = PageContextExports::default();

  if let Some(loaded) = page_config_loaded {
    for (name, element) in &loaded.data.config_elements {
      if !element.config_env.is_loaded_on(side) {
        continue;
      }
      if element.config_value_file_path.is_some() {
        let code_file =
          loaded.code_files.iter().find(|c| c.config_name == *name).ok_or_else(|| {
            TrellisError::bug(format!("code file of `{name}` missing from the loaded page code"))
          })?;
        let value = code_file_value(name, &code_file.file_path, &code_file.file_exports)?;
        out.add_config(name, value, &element.config_defined_at, Some(&code_file.file_path));
      } else if let Some(value) = element.config_value.as_ref().filter(|v| !v.is_null()) {
        out.add_config(name, value.to_json(), &element.config_defined_at, None);
      }
    }
  }

  let (defaults, own): (Vec<_>, Vec<_>) =
    page_files.iter().partition(|(file, _)| file.is_default_page_file());
  for (file, exports) in own.into_iter().chain(defaults.into_iter().rev()) {
    let is_default = file.is_default_page_file();
    for (export_name, value) in exports {
      let source = ExportSource {
        export_value: value.clone(),
        export_source: format!("{} > `{export_name}`", file.file_path),
        file_path: Some(file.file_path.clone()),
        is_from_default_file: is_default,
      };
      out.add_source(export_name, source, !is_default);
    }
  }

  Ok(out)
}
