//! `graphql_type_graph`
//! =========
//!
//! _Turns GraphQL schema files into a linked graph of types._
//!
//! The **`graphql_type_graph`** library reads a set of GraphQL SDL documents, merges them into a
//! single schema, and produces an owned [`TypeGraph`](graph::TypeGraph) in which every type,
//! field, argument, and type relation is addressable by a stable identifier and every reference
//! is resolved. The graph is meant to be drawn, for example as a diagram of a schema's object
//! types, so Relay connection plumbing can be collapsed and deprecated fields can be dropped on
//! the way.
//!
//! The work happens in stages, each consuming the previous stage's output:
//!
//! - [`sdl`] loads and parses the source documents into one arena-allocated document.
//! - [`schema`] builds a type system from the document, merging extensions.
//! - [`graph`] simplifies, links, and normalizes it into the final [`TypeGraph`](graph::TypeGraph).
//!
//! [`pipeline::build_type_graph`] runs all of them, and [`host::GraphHost`] keeps the graph of
//! the most recent build around for a long-running process.
//!
//! [A good place to start is the `pipeline` module...](pipeline)

pub mod ast;
pub mod error;
pub mod graph;
pub mod host;
pub mod pipeline;
pub mod schema;
pub mod sdl;

pub use bumpalo;
