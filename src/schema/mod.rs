//! # Building the Type System
//!
//! The `graphql_type_graph::schema` module turns a [`LoadedDocument`](crate::sdl::LoadedDocument)
//! into a [Schema]: every named type with its fields, arguments, and relations, type extensions
//! merged into their base definitions, and the root operation types resolved. All of it is
//! allocated into the [`ASTContext`](crate::ast::ASTContext) the document was parsed with.
//!
//! ```
//! use graphql_type_graph::{ast::ASTContext, schema::*, sdl::*};
//!
//! let ctx = ASTContext::new();
//! let sources = [Source::new("schema.graphql", "type Query { hello: String }")];
//! let document = load_sources(&ctx, &sources).unwrap().unwrap();
//! let schema = build_schema(&ctx, &document, false).unwrap();
//!
//! let query = schema.get_type(schema.query_type()).and_then(|typ| typ.object()).unwrap();
//! assert!(query.get_field("hello").is_some());
//! ```
//!
//! [More information on the Schema struct.](Schema)

mod builder;
#[allow(clippy::module_inception)]
pub mod schema;

pub use builder::build_schema;
pub use schema::*;
