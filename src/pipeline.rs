//! # Building Type Graphs
//!
//! The `graphql_type_graph::pipeline` module composes all stages into [build_type_graph], which
//! turns a list of SDL [Source] fragments into a [TypeGraph] according to [Options].
//!
//! ```
//! use graphql_type_graph::pipeline::*;
//!
//! let sources = [
//!     Source::new("query.graphql", "type Query { user: User }"),
//!     Source::new("user.graphql", "type User { id: ID! name: String }"),
//! ];
//! let graph = build_type_graph(&sources, &Options::default()).unwrap().unwrap();
//! let user = &graph.query_type().fields["user"];
//! assert_eq!(graph.type_of(&user.type_id).fields.len(), 2);
//! ```

use crate::{
    ast::ASTContext,
    error::Result,
    graph::{
        filter_deprecated, link_schema, normalize_relay, simplify_schema, RelayOptions,
        TypeGraph, TypeGraphView,
    },
    schema::build_schema,
    sdl::load_sources,
};

pub use crate::sdl::Source;

/// Options of a pipeline run.
///
/// With the `json` feature the options may also be read from JSON using camelCase keys, for
/// example `{ "sortByAlphabet": true, "skipRelayPattern": false }`. Missing keys take their
/// default values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "json", serde(default, rename_all = "camelCase"))]
pub struct Options {
    /// Orders types and their members by name instead of by declaration. Defaults to `false`.
    pub sort_by_alphabet: bool,
    /// Collapses Relay connections into direct list edges. Defaults to `true`.
    pub skip_relay_pattern: bool,
    /// Removes deprecated fields. Defaults to `true`.
    pub skip_deprecated_fields: bool,
    /// Roots the [view](Options::view) at this type instead of the query root.
    pub root_type_name_override: Option<String>,
    /// Leaves the root type out of the [view](Options::view). Defaults to `false`.
    pub hide_root_from_graph: bool,
    pub relay: RelayOptions,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            sort_by_alphabet: false,
            skip_relay_pattern: true,
            skip_deprecated_fields: true,
            root_type_name_override: None,
            hide_root_from_graph: false,
            relay: RelayOptions::default(),
        }
    }
}

impl Options {
    #[inline]
    pub fn sort_by_alphabet(mut self, sort_by_alphabet: bool) -> Self {
        self.sort_by_alphabet = sort_by_alphabet;
        self
    }

    #[inline]
    pub fn skip_relay_pattern(mut self, skip_relay_pattern: bool) -> Self {
        self.skip_relay_pattern = skip_relay_pattern;
        self
    }

    #[inline]
    pub fn skip_deprecated_fields(mut self, skip_deprecated_fields: bool) -> Self {
        self.skip_deprecated_fields = skip_deprecated_fields;
        self
    }

    #[inline]
    pub fn root_type_name_override<S: Into<String>>(mut self, root_type_name: Option<S>) -> Self {
        self.root_type_name_override = root_type_name.map(Into::into);
        self
    }

    #[inline]
    pub fn hide_root_from_graph(mut self, hide_root_from_graph: bool) -> Self {
        self.hide_root_from_graph = hide_root_from_graph;
        self
    }

    #[inline]
    pub fn relay(mut self, relay: RelayOptions) -> Self {
        self.relay = relay;
        self
    }

    /// Reads options from a JSON object with camelCase keys.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Selects the diagram of a graph according to the root type override and
    /// `hide_root_from_graph`.
    pub fn view<'g>(&self, graph: &'g TypeGraph) -> Result<TypeGraphView<'g>> {
        TypeGraphView::new(
            graph,
            self.root_type_name_override.as_deref(),
            self.hide_root_from_graph,
        )
    }
}

/// Runs all stages over the given sources and returns the finished graph.
///
/// An empty list of sources yields `Ok(None)`. Any failure aborts the whole run, no partial
/// graph is ever returned.
#[tracing::instrument(level = "debug", skip_all, fields(sources = sources.len()))]
pub fn build_type_graph(sources: &[Source], options: &Options) -> Result<Option<TypeGraph>> {
    let ctx = ASTContext::new();
    let Some(document) = load_sources(&ctx, sources)? else {
        tracing::debug!("no sources to build a type graph from");
        return Ok(None);
    };

    let schema = build_schema(&ctx, &document, options.sort_by_alphabet)?;
    let mut graph = link_schema(simplify_schema(&schema))?;
    if options.skip_relay_pattern {
        graph = normalize_relay(graph, &options.relay);
    }
    if options.skip_deprecated_fields {
        graph = filter_deprecated(graph);
    }

    tracing::debug!(types = graph.len(), "built type graph");
    Ok(Some(graph))
}
