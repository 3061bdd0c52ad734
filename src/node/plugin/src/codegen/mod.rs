/* src/node/plugin/src/codegen/mod.rs */

mod ast;
mod generate;
mod render;


pub use ast::{CodeFileRecord, EagerImport, PageCodeModule};
pub use generate::{build_page_code_module, generate_page_code};
pub use render::render_module;
