use super::{
    parse_ast::{Definition, Document, Position},
    parser::ParseSdl,
};
use crate::{
    ast::ASTContext,
    error::{get_location, Location, Result},
};
use bumpalo::collections::Vec;

/// A single schema definition language fragment and the path it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
pub struct Source {
    pub filepath: String,
    pub content: String,
}

impl Source {
    #[inline]
    pub fn new<P: Into<String>, C: Into<String>>(filepath: P, content: C) -> Self {
        Source {
            filepath: filepath.into(),
            content: content.into(),
        }
    }
}

/// All fragments of a schema merged into one logical document.
///
/// Definitions keep the order of their fragments and, within a fragment, their declaration
/// order. Every definition's [Position] points back into `sources`.
#[derive(Debug)]
pub struct LoadedDocument<'a> {
    pub sources: &'a [Source],
    pub definitions: Vec<'a, &'a Definition<'a>>,
}

impl<'a> LoadedDocument<'a> {
    /// Resolves a definition position into a file path plus line and column.
    pub fn location(&self, position: Position) -> Option<Location> {
        self.sources
            .get(position.source)
            .map(|source| get_location(&source.filepath, &source.content, position.offset))
    }
}

/// Parses each fragment on its own and concatenates the resulting definitions so that types may
/// reference each other across fragments.
///
/// An empty list of sources is valid and yields no document at all. A syntax error in any
/// fragment aborts loading and is reported against that fragment's file path.
pub fn load_sources<'a>(
    ctx: &'a ASTContext,
    sources: &'a [Source],
) -> Result<Option<LoadedDocument<'a>>> {
    if sources.is_empty() {
        return Ok(None);
    }

    let mut definitions = Vec::new_in(&ctx.arena);
    for (index, source) in sources.iter().enumerate() {
        let document = Document::parse_fragment(ctx, &source.filepath, &source.content, index)?;
        tracing::trace!(
            filepath = %source.filepath,
            definitions = document.definitions.len(),
            "parsed schema fragment"
        );
        definitions.extend(document.definitions.iter());
    }

    Ok(Some(LoadedDocument {
        sources,
        definitions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::sdl::parse_ast::TypeDefinition;

    #[test]
    fn empty_sources_yield_no_document() {
        let ctx = ASTContext::new();
        assert!(load_sources(&ctx, &[]).unwrap().is_none());
    }

    #[test]
    fn fragments_are_concatenated_in_order() {
        let ctx = ASTContext::new();
        let sources = [
            Source::new("query.graphql", "type Query { user: User }"),
            Source::new("user.graphql", "type User { id: ID! }\nscalar Date"),
        ];
        let document = load_sources(&ctx, &sources).unwrap().unwrap();
        let names: std::vec::Vec<_> = document
            .definitions
            .iter()
            .filter_map(|definition| match definition {
                Definition::Type(typ) => Some(typ.name()),
                _ => None,
            })
            .collect();
        assert_eq!(names, ["Query", "User", "Date"]);
    }

    #[test]
    fn positions_resolve_to_their_fragment() {
        let ctx = ASTContext::new();
        let sources = [
            Source::new("a.graphql", "type Query { a: String }"),
            Source::new("b.graphql", "\n\"Described\"\nscalar Date"),
        ];
        let document = load_sources(&ctx, &sources).unwrap().unwrap();
        let Definition::Type(date @ TypeDefinition::Scalar(_)) = document.definitions[1] else {
            panic!("expected a scalar definition");
        };
        let location = document.location(date.position()).unwrap();
        assert_eq!(location.filepath, "b.graphql");
        assert_eq!((location.line, location.column), (3, 1));
    }

    #[test]
    fn syntax_errors_name_the_fragment() {
        let ctx = ASTContext::new();
        let sources = [
            Source::new("ok.graphql", "type Query { a: String }"),
            Source::new("broken.graphql", "type User {\n  name: \"String\n}"),
        ];
        let error = load_sources(&ctx, &sources).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::SchemaParse);
        assert_eq!(error.location().as_ref().unwrap().filepath, "broken.graphql");
        assert_eq!(error.location().as_ref().unwrap().line, 2);
    }
}
