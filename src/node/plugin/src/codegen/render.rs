/* src/node/plugin/src/codegen/render.rs */

use super::ast::PageCodeModule;

/// Single-quoted JS string literal.
pub(super) fn quote(s: &str) -> String {
  let mut out = String::with_capacity(s.len() + 2);
  out.push('\'');
  for c in s.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\'' => out.push_str("\\'"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      c => out.push(c),
    }
  }
  out.push('\'');
  out
}

/// Serialize a module: eager imports, then the default export, then
/// side-effect imports. Lines are joined with `\n`, no trailing newline.
pub fn render_module(module: &PageCodeModule) -> String {
  let mut lines: Vec<String> = module
    .imports
    .iter()
    .map(|i| format!("import * as {} from {};", i.local, quote(&i.source)))
    .collect();

  lines.push("export default [".to_string());
  for record in &module.records {
    lines.push("  {".to_string());
    lines.push(format!("    configName: {},", quote(&record.config_name)));
    lines.push(format!("    filePath: {},", quote(&record.file_path)));
    lines.push(format!("    fileExports: {}", record.exports_local));
    lines.push("  },".to_string());
  }
  lines.push("];".to_string());

  for source in &module.side_effect_imports {
    lines.push(format!("import {};", quote(source)));
  }

  lines.join("\n")
}
