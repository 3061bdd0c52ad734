/* src/shared/rust/src/route.rs */

use indexmap::IndexMap;

use crate::accessors::get_config_string;
use crate::errors::{Result, TrellisError};
use crate::page_config::PageConfigData;

pub type RouteParams = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a> {
  pub page: &'a PageConfigData,
  pub route_string: String,
  pub params: RouteParams,
}

fn segments(path: &str) -> Vec<&str> {
  path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Strip query string and hash from a URL path.
fn url_pathname(url: &str) -> &str {
  let end = url.find(['?', '#']).unwrap_or(url.len());
  &url[..end]
}

/// Match a route string such as `/star-wars/@id` or `/docs/*` against a URL.
pub fn route_string_matches(route: &str, url: &str) -> Option<RouteParams> {
  let route_segments = segments(route);
  let url_segments = segments(url_pathname(url));
  let mut params = RouteParams::new();

  for (i, seg) in route_segments.iter().enumerate() {
    if *seg == "*" && i + 1 == route_segments.len() {
      params.insert("*".to_string(), url_segments.get(i..).unwrap_or_default().join("/"));
      return Some(params);
    }
    let part = url_segments.get(i)?;
    if let Some(name) = seg.strip_prefix('@') {
      params.insert(name.to_string(), (*part).to_string());
    } else if seg != part {
      return None;
    }
  }

  (route_segments.len() == url_segments.len()).then_some(params)
}

/// Higher ranks win: fully static routes, then more static segments, then longer routes.
fn route_rank(route: &str) -> (bool, usize, usize) {
  let segs = segments(route);
  let dynamic = segs.iter().filter(|s| s.starts_with('@') || **s == "*").count();
  (dynamic == 0, segs.len() - dynamic, segs.len())
}

/// Route string of a page: its `route` config, falling back to the filesystem route.
/// `Ok(None)` for route functions, which only the host can evaluate.
pub fn page_route_string(page: &PageConfigData) -> Result<Option<&str>> {
  if page.element("route").is_some_and(|el| el.config_value_file_path.is_some()) {
    return Ok(None);
  }
  Ok(Some(get_config_string(page, "route")?.unwrap_or(page.route_filesystem.as_str())))
}

/// Find the page a URL maps to. Two pages matching with the same rank is a
/// usage error.
pub fn route_page<'a>(pages: &'a [PageConfigData], url: &str) -> Result<Option<RouteMatch<'a>>> {
  let mut matches: Vec<RouteMatch<'a>> = Vec::new();
  for page in pages {
    if page.element("isErrorPage").is_some_and(|el| !el.is_nullish()) {
      continue;
    }
    let Some(route) = page_route_string(page)? else {
      continue;
    };
    let Some(params) = route_string_matches(route, url) else {
      continue;
    };
    matches.push(RouteMatch { page, route_string: route.to_string(), params });
  }

  let Some(top) = matches.iter().map(|m| route_rank(&m.route_string)).max() else {
    return Ok(None);
  };
  matches.retain(|m| route_rank(&m.route_string) == top);
  if matches.len() > 1 {
    let sites: Vec<String> =
      matches.iter().map(|m| format!("{} (route `{}`)", m.page.page_id, m.route_string)).collect();
    return Err(TrellisError::usage(format!(
      "URL {url} is matched by {} with the same precedence: make one of the routes more specific",
      sites.join(" and ")
    )));
  }
  Ok(matches.pop())
}
