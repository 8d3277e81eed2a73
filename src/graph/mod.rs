//! # The Type Graph
//!
//! The `graphql_type_graph::graph` module contains the owned, fully linked [TypeGraph] and the
//! stages producing it from a [Schema](crate::schema::Schema):
//!
//! - [simplify_schema] flattens every named type into a plain record that still refers to other
//!   types by name.
//! - [link_schema] assigns an identifier to every type, field, argument, and relation, and
//!   resolves all type names against them.
//! - [normalize_relay] collapses Relay connections into direct list edges.
//! - [filter_deprecated] drops deprecated fields.
//!
//! Each stage consumes or borrows the previous stage's output and returns a new value.
//! [TypeGraphView] then selects the part of a graph that's drawn as a diagram.
//!
//! ```
//! use graphql_type_graph::{ast::ASTContext, graph::*, schema::build_schema, sdl::*};
//!
//! let ctx = ASTContext::new();
//! let sources = [Source::new("schema.graphql", "type Query { me: User }\ntype User { id: ID! }")];
//! let document = load_sources(&ctx, &sources).unwrap().unwrap();
//! let schema = build_schema(&ctx, &document, false).unwrap();
//! let graph = link_schema(simplify_schema(&schema)).unwrap();
//!
//! let me = graph.field("FIELD::Query::me").unwrap();
//! assert_eq!(graph.type_of(&me.type_id).name, "User");
//! ```

mod deprecated;
mod ids;
mod link;
mod relay;
mod simplify;
mod type_graph;
mod view;

pub use deprecated::filter_deprecated;
pub use ids::*;
pub use link::link_schema;
pub use relay::{normalize_relay, RelayOptions, RELAY_ARGUMENTS};
pub use simplify::*;
pub use type_graph::*;
pub use view::TypeGraphView;
