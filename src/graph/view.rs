use super::ids::TypeId;
use super::type_graph::{TypeGraph, TypeNode};
use crate::error::{Error, ErrorType, Result};
use indexmap::IndexSet;

/// The part of a [TypeGraph] that's drawn as a diagram.
///
/// Starting from the root type, types are collected breadth-first along field types, derived
/// types, and possible types. Scalars, enums, input objects, and Relay types are leaves that
/// never become nodes of the diagram.
#[derive(Debug, Clone)]
pub struct TypeGraphView<'g> {
    graph: &'g TypeGraph,
    root: TypeId,
    nodes: IndexSet<TypeId>,
}

impl<'g> TypeGraphView<'g> {
    /// Selects the root type, either the type named by `root_type_name` or the query root, and
    /// collects every diagram node reachable from it.
    ///
    /// With `hide_root` set the root type itself is left out of the nodes while its neighbours
    /// are still reached through it.
    pub fn new(graph: &'g TypeGraph, root_type_name: Option<&str>, hide_root: bool) -> Result<Self> {
        let root = match root_type_name {
            Some(name) => match graph.get_by_name(name) {
                Some(typ) => typ.id.clone(),
                None => {
                    return Err(Error::new(
                        format!("Root type `{}` is not defined.", name),
                        ErrorType::SchemaBuild,
                    ))
                }
            },
            None => graph.query_type.clone(),
        };

        let mut nodes = IndexSet::new();
        nodes.insert(root.clone());
        let mut index = 0;
        while let Some(id) = nodes.get_index(index) {
            let targets: Vec<TypeId> = edge_targets(graph.type_of(id))
                .filter(|target| graph.type_of(target).is_diagram_node())
                .cloned()
                .collect();
            nodes.extend(targets);
            index += 1;
        }
        if hide_root {
            nodes.shift_remove(&root);
        }

        tracing::debug!(root = %root, nodes = nodes.len(), "selected graph view");
        Ok(TypeGraphView { graph, root, nodes })
    }

    #[inline]
    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    /// The type the diagram is rooted at.
    #[inline]
    pub fn root(&self) -> &'g TypeNode {
        self.graph.type_of(&self.root)
    }

    #[inline]
    pub fn root_id(&self) -> &TypeId {
        &self.root
    }

    /// Iterates over the diagram's nodes in the order they were reached.
    pub fn nodes(&self) -> impl Iterator<Item = &'g TypeNode> + '_ {
        self.nodes.iter().map(|id| self.graph.type_of(id))
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn edge_targets(typ: &TypeNode) -> impl Iterator<Item = &TypeId> {
    typ.fields
        .values()
        .map(|field| &field.type_id)
        .chain(typ.derived_types.iter().map(|relation| &relation.type_id))
        .chain(typ.possible_types.iter().map(|relation| &relation.type_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ASTContext;
    use crate::graph::{link_schema, normalize_relay, simplify_schema, RelayOptions};
    use crate::schema::build_schema;
    use crate::sdl::{load_sources, Source};
    use indoc::indoc;

    fn graph(source: &str) -> TypeGraph {
        let ctx = ASTContext::new();
        let sources = [Source::new("schema.graphql", source)];
        let document = load_sources(&ctx, &sources).unwrap().unwrap();
        let schema = build_schema(&ctx, &document, false).unwrap();
        let graph = link_schema(simplify_schema(&schema)).unwrap();
        normalize_relay(graph, &RelayOptions::default())
    }

    const SOURCE: &str = indoc! {"
        type Query { me: User search(filter: Filter): [Result] }
        type User implements Named { name: String role: Role posts: PostConnection }
        interface Named { name: String }
        type Admin implements Named { name: String }
        union Result = User | Post
        type Post { title: String }
        type PostConnection { edges: [PostEdge] }
        type PostEdge { node: Post }
        enum Role { ADMIN }
        input Filter { term: String }
        type Orphan { id: ID }
    "};

    fn names<'g>(view: &TypeGraphView<'g>) -> Vec<&'g str> {
        view.nodes().map(|typ| typ.name.as_str()).collect()
    }

    #[test]
    fn reachable_types_from_query_root() {
        let graph = graph(SOURCE);
        let view = TypeGraphView::new(&graph, None, false).unwrap();
        assert_eq!(view.root().name, "Query");
        assert_eq!(names(&view), ["Query", "User", "Result", "Post"]);
        assert!(!view.contains("TYPE::Orphan"));
        assert!(!view.contains("TYPE::PostConnection"));
        assert!(!view.contains("TYPE::Role"));
    }

    #[test]
    fn root_override_and_hidden_root() {
        let graph = graph(SOURCE);
        let view = TypeGraphView::new(&graph, Some("Named"), false).unwrap();
        assert_eq!(names(&view), ["Named", "User", "Admin", "Post"]);

        let view = TypeGraphView::new(&graph, Some("Named"), true).unwrap();
        assert_eq!(view.root_id(), &TypeId::new("Named"));
        assert_eq!(names(&view), ["User", "Admin", "Post"]);
    }

    #[test]
    fn unknown_root_override() {
        let graph = graph(SOURCE);
        let error = TypeGraphView::new(&graph, Some("Missing"), false).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::SchemaBuild);
        assert_eq!(error.message(), "Root type `Missing` is not defined.");
    }
}
