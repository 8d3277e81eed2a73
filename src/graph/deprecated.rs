use super::type_graph::TypeGraph;

/// Removes every deprecated field from its type.
///
/// Types are kept even if no field remains, since other fields may still reference them.
/// Deprecated arguments, input fields, and enum values are left in place.
pub fn filter_deprecated(mut graph: TypeGraph) -> TypeGraph {
    let mut removed = 0;
    for typ in graph.types.values_mut() {
        let before = typ.fields.len();
        typ.fields.retain(|_, field| !field.is_deprecated);
        removed += before - typ.fields.len();
    }
    tracing::debug!(removed, "filtered deprecated fields");
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ASTContext;
    use crate::graph::{link_schema, simplify_schema};
    use crate::schema::build_schema;
    use crate::sdl::{load_sources, Source};
    use indoc::indoc;

    fn graph(source: &str) -> TypeGraph {
        let ctx = ASTContext::new();
        let sources = [Source::new("schema.graphql", source)];
        let document = load_sources(&ctx, &sources).unwrap().unwrap();
        let schema = build_schema(&ctx, &document, false).unwrap();
        link_schema(simplify_schema(&schema)).unwrap()
    }

    const SOURCE: &str = indoc! {r#"
        type Query {
          user: User
          legacy: Legacy @deprecated(reason: "Use `user`.")
        }
        type User {
          name: String
          login: String @deprecated
        }
        type Legacy {
          id: ID @deprecated
        }
    "#};

    #[test]
    fn deprecated_fields_are_removed() {
        let graph = filter_deprecated(graph(SOURCE));
        assert!(graph
            .types()
            .flat_map(|typ| typ.fields.values())
            .all(|field| !field.is_deprecated));

        let user = graph.get_by_name("User").unwrap();
        assert_eq!(user.fields.keys().collect::<Vec<_>>(), ["name"]);
        assert!(graph.query_type().fields.get("legacy").is_none());
    }

    #[test]
    fn emptied_types_are_kept() {
        let graph = filter_deprecated(graph(SOURCE));
        let legacy = graph.get_by_name("Legacy").unwrap();
        assert!(legacy.fields.is_empty());
    }

    #[test]
    fn unfiltered_graphs_keep_reasons() {
        let graph = graph(SOURCE);
        let legacy = &graph.query_type().fields["legacy"];
        assert!(legacy.is_deprecated);
        assert_eq!(legacy.deprecation_reason.as_deref(), Some("Use `user`."));
        let login = &graph.get_by_name("User").unwrap().fields["login"];
        assert_eq!(login.deprecation_reason.as_deref(), Some("No longer supported"));
    }
}
