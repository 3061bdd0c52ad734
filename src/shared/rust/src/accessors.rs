/* src/shared/rust/src/accessors.rs */

//! Typed reads over a resolved page config.

use crate::errors::{Result, TrellisError};
use crate::page_config::{ConfigValue, PageConfigData, PageIdentified, ValueType};

/// Literal value of `config_name`, checked against `expected`.
/// Absent and nullish elements yield `Ok(None)`.
pub fn get_config_value<'a>(
  page_config: &'a PageConfigData,
  config_name: &str,
  expected: ValueType,
) -> Result<Option<&'a ConfigValue>> {
  let Some(element) = page_config.element(config_name) else {
    return Ok(None);
  };
  if element.is_nullish() {
    return Ok(None);
  }
  match &element.config_value {
    Some(value) if value.has_type(expected) => Ok(Some(value)),
    value => {
      let actual = value.as_ref().map_or("undefined", ConfigValue::type_name);
      Err(TrellisError::usage(format!(
        "{} has an invalid type `{actual}`: it should be a {} instead",
        element.config_defined_at,
        expected.as_str()
      )))
    }
  }
}

pub fn get_config_string<'a>(
  page_config: &'a PageConfigData,
  config_name: &str,
) -> Result<Option<&'a str>> {
  Ok(get_config_value(page_config, config_name, ValueType::String)?.and_then(ConfigValue::as_str))
}

pub fn get_config_bool(page_config: &PageConfigData, config_name: &str) -> Result<Option<bool>> {
  Ok(get_config_value(page_config, config_name, ValueType::Boolean)?.and_then(ConfigValue::as_bool))
}

/// Path of the file backing `config_name`.
///
/// A backing file path is returned verbatim. A literal must be a string
/// holding a root-relative path (leading `/`).
pub fn get_code_file_path<'a>(
  page_config: &'a PageConfigData,
  config_name: &str,
) -> Result<Option<&'a str>> {
  let Some(element) = page_config.element(config_name) else {
    return Ok(None);
  };
  if element.is_nullish() {
    return Ok(None);
  }
  if let Some(path) = &element.config_value_file_path {
    return Ok(Some(path.as_str()));
  }
  let defined_at = &element.config_defined_at;
  let value = element.config_value.as_ref();
  let Some(path) = value.and_then(ConfigValue::as_str) else {
    let actual = value.map_or("undefined", ConfigValue::type_name);
    return Err(TrellisError::usage(format!(
      "{defined_at} has an invalid type `{actual}`: it should be a `string` instead"
    )));
  };
  if !path.starts_with('/') {
    return Err(TrellisError::usage(format!(
      "{defined_at} has an invalid value `{path}`: it should be a file path instead"
    )));
  }
  Ok(Some(path))
}

/// Find a page config by id.
pub fn find_page_config<'a, T: PageIdentified>(page_configs: &'a [T], page_id: &str) -> Option<&'a T> {
  page_configs.iter().find(|p| p.page_id() == page_id)
}

/// Like [`find_page_config`], but a missing config is a bug: callers only
/// pass ids they obtained from the same config set.
pub fn get_page_config<'a, T: PageIdentified>(page_id: &str, page_configs: &'a [T]) -> Result<&'a T> {
  if page_configs.is_empty() {
    return Err(TrellisError::bug(format!("no page configs available while looking up `{page_id}`")));
  }
  find_page_config(page_configs, page_id)
    .ok_or_else(|| TrellisError::bug(format!("page config `{page_id}` not found")))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::config_env::ConfigEnv;
  use crate::page_config::ConfigElement;

  fn page(elements: Vec<(&str, ConfigElement)>) -> PageConfigData {
    let mut data = PageConfigData::new("/pages/about", "/about");
    for (name, el) in elements {
      data.config_elements.insert(name.to_string(), el);
    }
    data
  }

  fn literal(value: serde_json::Value, name: &str) -> ConfigElement {
    ConfigElement {
      config_value: ConfigValue::from_json(value),
      config_value_file_path: None,
      config_env: ConfigEnv::ConfigOnly,
      config_defined_at: format!("Config `{name}` defined at /pages/about/+config.toml"),
    }
  }

  #[test]
  fn absent_config_is_none() {
    let data = page(vec![]);
    assert_eq!(get_config_value(&data, "title", ValueType::String).unwrap(), None);
    assert_eq!(get_code_file_path(&data, "Page").unwrap(), None);
  }

  #[test]
  fn nullish_config_is_none() {
    let data = page(vec![("title", literal(json!(null), "title"))]);
    assert_eq!(get_config_string(&data, "title").unwrap(), None);
    assert_eq!(get_code_file_path(&data, "title").unwrap(), None);
  }

  #[test]
  fn string_value_returned() {
    let data = page(vec![("title", literal(json!("About us"), "title"))]);
    assert_eq!(get_config_string(&data, "title").unwrap(), Some("About us"));
  }

  #[test]
  fn boolean_value_returned() {
    let data = page(vec![("prerender", literal(json!(false), "prerender"))]);
    assert_eq!(get_config_bool(&data, "prerender").unwrap(), Some(false));
  }

  #[test]
  fn wrong_type_is_usage_error_with_provenance() {
    let data = page(vec![("prerender", literal(json!("yes"), "prerender"))]);
    let err = get_config_bool(&data, "prerender").unwrap_err();
    assert!(err.is_usage());
    assert_eq!(
      err.message(),
      "Config `prerender` defined at /pages/about/+config.toml has an invalid type `string`: it should be a boolean instead"
    );
  }

  #[test]
  fn file_backed_element_has_no_literal() {
    let el = ConfigElement::from_file(
      "/pages/about/+title.js",
      ConfigEnv::ConfigOnly,
      "Config `title` defined at /pages/about/+title.js",
    );
    let data = page(vec![("title", el)]);
    let err = get_config_string(&data, "title").unwrap_err();
    assert!(err.is_usage());
    assert!(err.message().contains("invalid type `undefined`"));
  }

  #[test]
  fn code_file_path_wins_over_literal() {
    let mut el = ConfigElement::from_file("/pages/+Layout.js", ConfigEnv::ServerAndClient, "x");
    el.config_value = Some(ConfigValue::Boolean(true));
    let data = page(vec![("Layout", el)]);
    assert_eq!(get_code_file_path(&data, "Layout").unwrap(), Some("/pages/+Layout.js"));
  }

  #[test]
  fn code_file_path_from_string_literal() {
    let data = page(vec![("Layout", literal(json!("/layouts/Default.js"), "Layout"))]);
    assert_eq!(get_code_file_path(&data, "Layout").unwrap(), Some("/layouts/Default.js"));
  }

  #[test]
  fn code_file_path_rejects_non_path_string() {
    let data = page(vec![("Layout", literal(json!("Default"), "Layout"))]);
    let err = get_code_file_path(&data, "Layout").unwrap_err();
    assert!(err.is_usage());
    assert!(err.message().contains("invalid value `Default`: it should be a file path instead"));
  }

  #[test]
  fn code_file_path_rejects_non_string() {
    let data = page(vec![("Layout", literal(json!(42), "Layout"))]);
    let err = get_code_file_path(&data, "Layout").unwrap_err();
    assert!(err.message().contains("invalid type `number`: it should be a `string` instead"));
  }

  #[test]
  fn get_page_config_empty_set_is_bug() {
    let configs: Vec<PageConfigData> = Vec::new();
    let err = get_page_config("missing-id", &configs).unwrap_err();
    assert!(err.is_bug());
    assert!(!err.is_usage());
  }

  #[test]
  fn get_page_config_unknown_id_is_bug() {
    let configs = vec![PageConfigData::new("/pages/index", "/")];
    assert!(get_page_config("/pages/about", &configs).unwrap_err().is_bug());
    assert_eq!(get_page_config("/pages/index", &configs).unwrap().route_filesystem, "/");
  }
}
