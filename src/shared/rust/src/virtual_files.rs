/* src/shared/rust/src/virtual_files.rs */

// Ids of the generated page-code modules, as exchanged with the bundler.

use crate::config_env::Side;

const PREFIX: &str = "virtual:trellis:pageConfigCode:";
/// Bundlers mark resolved virtual ids with a leading NUL byte.
const RESOLVED_MARKER: char = '\0';
const EXTRACT_ASSETS_QUERY: &str = "extractAssets&lang.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFileIdPageCode {
  pub page_id: String,
  pub is_for_client_side: bool,
}

impl VirtualFileIdPageCode {
  pub fn side(&self) -> Side {
    Side::from_is_client(self.is_for_client_side)
  }
}

pub fn get_virtual_file_id_page_code(page_id: &str, is_for_client_side: bool) -> String {
  let side = Side::from_is_client(is_for_client_side);
  format!("{PREFIX}{}:{page_id}", side.as_str())
}

/// Parse a page-code virtual id. Anything not of the exact shape is rejected,
/// including ids carrying a query string.
pub fn parse_virtual_file_id_page_code(id: &str) -> Option<VirtualFileIdPageCode> {
  let id = id.strip_prefix(RESOLVED_MARKER).unwrap_or(id);
  let rest = id.strip_prefix(PREFIX)?;
  let (side, page_id) = rest.split_once(':')?;
  let is_for_client_side = match side {
    "client" => true,
    "server" => false,
    _ => return None,
  };
  if !page_id.starts_with('/') || page_id.contains('?') {
    return None;
  }
  Some(VirtualFileIdPageCode { page_id: page_id.to_string(), is_for_client_side })
}

pub fn is_virtual_file_id_page_code(id: &str) -> bool {
  parse_virtual_file_id_page_code(id).is_some()
}

/// Mark an import so the bundler only collects the static assets it references.
pub fn extract_assets_add_query(id: &str) -> String {
  let sep = if id.contains('?') { '&' } else { '?' };
  format!("{id}{sep}{EXTRACT_ASSETS_QUERY}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn id_shape() {
    assert_eq!(
      get_virtual_file_id_page_code("/pages/about", true),
      "virtual:trellis:pageConfigCode:client:/pages/about"
    );
    assert_eq!(
      get_virtual_file_id_page_code("/pages/about", false),
      "virtual:trellis:pageConfigCode:server:/pages/about"
    );
  }

  #[test]
  fn parse_generated_ids() {
    for is_client in [true, false] {
      let id = get_virtual_file_id_page_code("/pages/star-wars/index", is_client);
      let parsed = parse_virtual_file_id_page_code(&id).unwrap();
      assert_eq!(parsed.page_id, "/pages/star-wars/index");
      assert_eq!(parsed.is_for_client_side, is_client);
    }
  }

  #[test]
  fn parse_accepts_resolved_marker() {
    let parsed = parse_virtual_file_id_page_code("\0virtual:trellis:pageConfigCode:server:/pages/index");
    assert_eq!(parsed.map(|p| p.side()), Some(Side::Server));
  }

  #[test]
  fn parse_rejects_malformed() {
    assert!(!is_virtual_file_id_page_code("virtual:trellis:pageConfigCode:/pages/index"));
    assert!(!is_virtual_file_id_page_code("virtual:trellis:pageConfigCode:both:/pages/index"));
    assert!(!is_virtual_file_id_page_code("virtual:trellis:pageConfigCode:client:pages/index"));
    assert!(!is_virtual_file_id_page_code("/pages/index/+Page.js"));
    assert!(!is_virtual_file_id_page_code(&extract_assets_add_query(
      "virtual:trellis:pageConfigCode:server:/pages/index"
    )));
  }

  #[test]
  fn extract_assets_query() {
    assert_eq!(extract_assets_add_query("/a.js"), "/a.js?extractAssets&lang.js");
    assert_eq!(extract_assets_add_query("/a.js?x"), "/a.js?x&extractAssets&lang.js");
  }
}
