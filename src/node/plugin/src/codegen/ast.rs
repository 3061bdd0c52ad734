/* src/node/plugin/src/codegen/ast.rs */

/// `import * as <local> from '<source>';`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EagerImport {
  pub local: String,
  pub source: String,
}

impl EagerImport {
  /// Locals are numbered so every backing file is bound exactly once.
  pub fn numbered(source: impl Into<String>, counter: usize) -> Self {
    Self { local: format!("import_{counter}"), source: source.into() }
  }
}

/// One `{ configName, filePath, fileExports }` record of the default export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFileRecord {
  pub config_name: String,
  pub file_path: String,
  /// Local binding of the eager import providing the file's exports.
  pub exports_local: String,
}

/// Structured form of a generated page-code module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCodeModule {
  pub imports: Vec<EagerImport>,
  pub records: Vec<CodeFileRecord>,
  /// Imports kept only for the assets they pull in; no binding.
  pub side_effect_imports: Vec<String>,
}

impl PageCodeModule {
  pub fn push_code_file(&mut self, config_name: &str, file_path: &str) {
    let import = EagerImport::numbered(file_path, self.imports.len());
    self.records.push(CodeFileRecord {
      config_name: config_name.to_string(),
      file_path: file_path.to_string(),
      exports_local: import.local.clone(),
    });
    self.imports.push(import);
  }
}
