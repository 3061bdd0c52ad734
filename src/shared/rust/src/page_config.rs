/* src/shared/rust/src/page_config.rs */

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config_env::ConfigEnv;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Namespace object of an imported module: export name -> exported value.
pub type FileExports = serde_json::Map<String, Value>;

/// Literal configuration value. `Other` carries numbers, arrays, objects and null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
  Boolean(bool),
  String(String),
  Other(Value),
}

/// Value types the accessors can enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
  String,
  Boolean,
}

impl ValueType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::String => "string",
      Self::Boolean => "boolean",
    }
  }
}

impl ConfigValue {
  /// `None` for JSON null.
  pub fn from_json(value: Value) -> Option<Self> {
    match value {
      Value::Null => None,
      Value::Bool(b) => Some(Self::Boolean(b)),
      Value::String(s) => Some(Self::String(s)),
      other => Some(Self::Other(other)),
    }
  }

  pub fn to_json(&self) -> Value {
    match self {
      Self::Boolean(b) => Value::Bool(*b),
      Self::String(s) => Value::String(s.clone()),
      Self::Other(v) => v.clone(),
    }
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Self::Other(Value::Null))
  }

  /// Name of the value's type, as reported in diagnostics.
  pub fn type_name(&self) -> &'static str {
    match self {
      Self::Boolean(_) => "boolean",
      Self::String(_) => "string",
      Self::Other(Value::Number(_)) => "number",
      Self::Other(Value::Bool(_)) => "boolean",
      Self::Other(Value::String(_)) => "string",
      Self::Other(_) => "object",
    }
  }

  pub fn has_type(&self, expected: ValueType) -> bool {
    self.type_name() == expected.as_str()
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(s) | Self::Other(Value::String(s)) => Some(s),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Self::Boolean(b) | Self::Other(Value::Bool(b)) => Some(*b),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::String(s) => f.write_str(s),
      Self::Boolean(b) => write!(f, "{b}"),
      Self::Other(v) => write!(f, "{v}"),
    }
  }
}

/// One resolved configuration entry of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigElement {
  pub config_value: Option<ConfigValue>,
  pub config_value_file_path: Option<String>,
  pub config_env: ConfigEnv,
  /// Human-readable provenance, e.g. ``Config `title` defined at /pages/about/+config.toml``.
  pub config_defined_at: String,
}

impl ConfigElement {
  pub fn from_value(value: ConfigValue, env: ConfigEnv, defined_at: impl Into<String>) -> Self {
    Self {
      config_value: Some(value),
      config_value_file_path: None,
      config_env: env,
      config_defined_at: defined_at.into(),
    }
  }

  pub fn from_file(file_path: impl Into<String>, env: ConfigEnv, defined_at: impl Into<String>) -> Self {
    Self {
      config_value: None,
      config_value_file_path: Some(file_path.into()),
      config_env: env,
      config_defined_at: defined_at.into(),
    }
  }

  /// A backing file always counts as set, whatever the literal holds.
  pub fn is_nullish(&self) -> bool {
    if self.config_value_file_path.is_some() {
      return false;
    }
    self.config_value.as_ref().is_none_or(ConfigValue::is_null)
  }
}

/// Resolved configuration of one page, as produced at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfigData {
  pub page_id: String,
  /// Route derived from the page's directory, e.g. `/star-wars`.
  pub route_filesystem: String,
  /// Declaration order is significant: generated modules follow it.
  pub config_elements: IndexMap<String, ConfigElement>,
}

impl PageConfigData {
  pub fn new(page_id: impl Into<String>, route_filesystem: impl Into<String>) -> Self {
    Self {
      page_id: page_id.into(),
      route_filesystem: route_filesystem.into(),
      config_elements: IndexMap::new(),
    }
  }

  pub fn element(&self, config_name: &str) -> Option<&ConfigElement> {
    self.config_elements.get(config_name)
  }
}

/// One record of a generated page-code module's default export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFileEntry {
  pub config_name: String,
  pub file_path: String,
  pub file_exports: FileExports,
}

/// Imports the generated page-code module and yields its default export.
pub type LoadCodeFilesFn =
  Arc<dyn Fn() -> BoxFuture<Result<Vec<CodeFileEntry>, BoxError>> + Send + Sync>;

/// Request-time form of a page config: the resolved data plus a deferred
/// import of its code.
#[derive(Clone)]
pub struct PageConfig {
  pub data: PageConfigData,
  pub load_code_files: LoadCodeFilesFn,
  pub(crate) loaded: Arc<OnceLock<Vec<CodeFileEntry>>>,
}

impl PageConfig {
  pub fn new(data: PageConfigData, load_code_files: LoadCodeFilesFn) -> Self {
    Self { data, load_code_files, loaded: Arc::new(OnceLock::new()) }
  }

  pub fn page_id(&self) -> &str {
    &self.data.page_id
  }

  /// Code files from a previous non-dev load, if any.
  pub fn cached_code_files(&self) -> Option<&[CodeFileEntry]> {
    self.loaded.get().map(Vec::as_slice)
  }

  /// Remember loaded code files for later loads. First write wins.
  pub fn prime_code_files(&self, code_files: Vec<CodeFileEntry>) {
    let _ = self.loaded.set(code_files);
  }
}

impl fmt::Debug for PageConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PageConfig")
      .field("data", &self.data)
      .field("loaded", &self.loaded.get().is_some())
      .finish_non_exhaustive()
  }
}

/// A page config whose code files have been imported.
#[derive(Debug, Clone)]
pub struct PageConfigLoaded {
  pub data: PageConfigData,
  pub code_files: Vec<CodeFileEntry>,
}

/// Anything addressable by page id.
pub trait PageIdentified {
  fn page_id(&self) -> &str;
}

impl PageIdentified for PageConfigData {
  fn page_id(&self) -> &str {
    &self.page_id
  }
}

impl PageIdentified for PageConfig {
  fn page_id(&self) -> &str {
    &self.data.page_id
  }
}
