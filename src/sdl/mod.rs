//! # Schema Definition Language
//!
//! The `graphql_type_graph::sdl` module lexes and parses GraphQL SDL fragments and merges them
//! into a single [`LoadedDocument`]. Only the type system subset of the language is supported:
//! schema definitions, type definitions, type extensions, and directive definitions. Executable
//! definitions like queries or fragments are rejected as syntax errors.
//!
//! ```
//! use graphql_type_graph::{ast::ASTContext, sdl::*};
//!
//! let ctx = ASTContext::new();
//! let sources = [Source::new("schema.graphql", "type Query { hello: String }")];
//! let document = load_sources(&ctx, &sources).unwrap().unwrap();
//! assert_eq!(document.definitions.len(), 1);
//! ```

mod lexer;

#[cfg(test)]
mod tests;

pub mod error;
pub mod loader;
pub mod parse_ast;
pub mod parser;

pub use loader::{load_sources, LoadedDocument, Source};
pub use parse_ast::*;
pub use parser::ParseSdl;
