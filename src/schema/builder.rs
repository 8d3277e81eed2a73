use super::schema::*;
use crate::{
    ast::ASTContext,
    error::{Error, Result},
    sdl::{
        deprecation_reason,
        error::{validation, SchemaError},
        Definition, FieldDefinition, InputValueDefinition, LoadedDocument, Position,
        SchemaDefinition, TypeDefinition, TypeWrapper,
    },
};
use bumpalo::collections::Vec;
use hashbrown::HashSet;

/// Builds the type system of a loaded document.
///
/// Base definitions are collected first and extensions are merged into them afterwards, so an
/// `extend type` may appear before the type it extends. Builtin scalars that weren't declared are
/// appended after all declared types. If `sort_by_alphabet` is set, types and all of their members
/// are reordered by name, otherwise declaration order is kept.
///
/// Type references are not checked here, an unknown type name is only reported once the graph is
/// linked.
pub fn build_schema<'a>(
    ctx: &'a ASTContext,
    document: &LoadedDocument<'a>,
    sort_by_alphabet: bool,
) -> Result<Schema<'a>> {
    let mut builder = SchemaBuilder {
        ctx,
        schema: Schema::new(ctx, document.sources),
    };

    let mut schema_definition: Option<&SchemaDefinition> = None;
    for definition in document.definitions.iter().copied() {
        match definition {
            Definition::Type(typ) => builder.add_type(typ)?,
            Definition::Schema(definition) => {
                if schema_definition.is_some() {
                    return Err(builder.error(
                        validation!("Must provide only one schema definition."),
                        None,
                    ));
                }
                schema_definition = Some(definition);
            }
            _ => {}
        }
    }

    let mut schema_extensions = std::vec::Vec::new();
    for definition in document.definitions.iter().copied() {
        match definition {
            Definition::TypeExtension(typ) => builder.extend_type(typ)?,
            Definition::SchemaExtension(extension) => schema_extensions.push(extension),
            _ => {}
        }
    }

    builder.add_builtin_scalars();
    builder.collect_implementations()?;
    builder.resolve_root_types(schema_definition, &schema_extensions)?;

    let mut schema = builder.schema;
    if sort_by_alphabet {
        sort_schema(&mut schema);
    }

    tracing::debug!(
        types = schema.types.len(),
        query = schema.query_type,
        sorted = sort_by_alphabet,
        "built schema"
    );
    Ok(schema)
}

struct SchemaBuilder<'a> {
    ctx: &'a ASTContext,
    schema: Schema<'a>,
}

impl<'a> SchemaBuilder<'a> {
    fn error(&self, error: SchemaError, position: Option<Position>) -> Error {
        let location = position.and_then(|position| self.schema.location(position));
        Error::from(error).with_location(location)
    }

    fn add_type(&mut self, typ: &'a TypeDefinition<'a>) -> Result<()> {
        if self.schema.get_type(typ.name()).is_some() {
            return Err(self.error(
                validation!("There can be only one type named `{}`.", typ.name()),
                Some(typ.position()),
            ));
        }
        self.check_unique_members(typ)?;

        let ctx = self.ctx;
        let arena = &ctx.arena;
        let schema_type = match typ {
            TypeDefinition::Scalar(scalar) => SchemaType::Scalar(SchemaScalar {
                name: scalar.name,
                description: scalar.description,
                position: Some(scalar.position),
            }),
            TypeDefinition::Object(object) => SchemaType::Object(SchemaObject {
                name: object.name,
                description: object.description,
                position: Some(object.position),
                fields: self.fields(&object.fields),
                interfaces: Vec::from_iter_in(object.interfaces.iter().copied(), arena),
            }),
            TypeDefinition::Interface(interface) => SchemaType::Interface(SchemaInterface {
                name: interface.name,
                description: interface.description,
                position: Some(interface.position),
                fields: self.fields(&interface.fields),
                interfaces: Vec::from_iter_in(interface.interfaces.iter().copied(), arena),
                possible_types: Vec::new_in(arena),
            }),
            TypeDefinition::Union(union_type) => SchemaType::Union(SchemaUnion {
                name: union_type.name,
                description: union_type.description,
                position: Some(union_type.position),
                possible_types: Vec::from_iter_in(union_type.types.iter().copied(), arena),
            }),
            TypeDefinition::Enum(enum_type) => SchemaType::Enum(SchemaEnum {
                name: enum_type.name,
                description: enum_type.description,
                position: Some(enum_type.position),
                values: Vec::from_iter_in(
                    enum_type.values.iter().map(|value| SchemaEnumValue {
                        name: value.name,
                        description: value.description,
                        position: Some(value.position),
                        deprecation_reason: deprecation_reason(&value.directives),
                    }),
                    arena,
                ),
            }),
            TypeDefinition::InputObject(input) => SchemaType::InputObject(SchemaInputObject {
                name: input.name,
                description: input.description,
                position: Some(input.position),
                fields: self.input_fields(&input.fields),
            }),
        };

        self.schema.push_type(schema_type);
        Ok(())
    }

    fn extend_type(&mut self, extension: &'a TypeDefinition<'a>) -> Result<()> {
        let name = extension.name();
        let position = Some(extension.position());
        let Some(target) = self.schema.get_type(name) else {
            return Err(self.error(
                validation!("Cannot extend type `{}` because it is not defined.", name),
                position,
            ));
        };
        if target.keyword() != extension.keyword() {
            return Err(self.error(
                validation!(
                    "Cannot extend {} `{}` with an `extend {}` definition.",
                    target.keyword(),
                    name,
                    extension.keyword()
                ),
                position,
            ));
        }
        self.check_unique_members(extension)?;

        // Check for members that would be declared twice before touching the target.
        let duplicate = match (target, extension) {
            (SchemaType::Object(object), TypeDefinition::Object(ext)) => ext
                .fields
                .iter()
                .find(|field| object.get_field(field.name).is_some())
                .map(|field| field.name),
            (SchemaType::Interface(interface), TypeDefinition::Interface(ext)) => ext
                .fields
                .iter()
                .find(|field| interface.get_field(field.name).is_some())
                .map(|field| field.name),
            (SchemaType::InputObject(input), TypeDefinition::InputObject(ext)) => ext
                .fields
                .iter()
                .find(|field| input.fields.iter().any(|known| known.name == field.name))
                .map(|field| field.name),
            (SchemaType::Enum(enum_type), TypeDefinition::Enum(ext)) => ext
                .values
                .iter()
                .find(|value| enum_type.values.iter().any(|known| known.name == value.name))
                .map(|value| value.name),
            _ => None,
        };
        if let Some(member) = duplicate {
            return Err(self.error(
                validation!("`{}.{}` is already defined.", name, member),
                position,
            ));
        }

        let fields = match extension {
            TypeDefinition::Object(ext) | TypeDefinition::Interface(ext) => {
                Some(self.fields(&ext.fields))
            }
            _ => None,
        };
        let input_fields = match extension {
            TypeDefinition::InputObject(ext) => Some(self.input_fields(&ext.fields)),
            _ => None,
        };

        let Some(target) = self.schema.get_type_mut(name) else {
            return Ok(());
        };
        match (target, extension) {
            (SchemaType::Object(object), TypeDefinition::Object(ext)) => {
                object.fields.extend(fields.into_iter().flatten());
                extend_names(&mut object.interfaces, &ext.interfaces);
            }
            (SchemaType::Interface(interface), TypeDefinition::Interface(ext)) => {
                interface.fields.extend(fields.into_iter().flatten());
                extend_names(&mut interface.interfaces, &ext.interfaces);
            }
            (SchemaType::Union(union_type), TypeDefinition::Union(ext)) => {
                extend_names(&mut union_type.possible_types, &ext.types);
            }
            (SchemaType::Enum(enum_type), TypeDefinition::Enum(ext)) => {
                enum_type
                    .values
                    .extend(ext.values.iter().map(|value| SchemaEnumValue {
                        name: value.name,
                        description: value.description,
                        position: Some(value.position),
                        deprecation_reason: deprecation_reason(&value.directives),
                    }));
            }
            (SchemaType::InputObject(input), TypeDefinition::InputObject(_)) => {
                input.fields.extend(input_fields.into_iter().flatten());
            }
            // Scalar extensions may only add directives.
            _ => {}
        }

        tracing::trace!(name, kind = extension.keyword(), "merged type extension");
        Ok(())
    }

    /// Rejects fields, arguments, input fields, and enum values that are declared twice within a
    /// single definition.
    fn check_unique_members(&self, typ: &'a TypeDefinition<'a>) -> Result<()> {
        let name = typ.name();
        let duplicate = match typ {
            TypeDefinition::Object(object) | TypeDefinition::Interface(object) => {
                first_duplicate(object.fields.iter().map(|field| (field.name, field.position)))
                    .map(|(field, position)| (format!("{}.{}", name, field), position))
                    .or_else(|| {
                        object.fields.iter().find_map(|field| {
                            first_duplicate(field.arguments.iter().map(|arg| (arg.name, arg.position)))
                                .map(|(arg, position)| {
                                    (format!("{}.{}({}:)", name, field.name, arg), position)
                                })
                        })
                    })
            }
            TypeDefinition::InputObject(input) => {
                first_duplicate(input.fields.iter().map(|field| (field.name, field.position)))
                    .map(|(field, position)| (format!("{}.{}", name, field), position))
            }
            TypeDefinition::Enum(enum_type) => {
                first_duplicate(enum_type.values.iter().map(|value| (value.name, value.position)))
                    .map(|(value, position)| (format!("{}.{}", name, value), position))
            }
            TypeDefinition::Union(_) | TypeDefinition::Scalar(_) => None,
        };

        match duplicate {
            Some((member, position)) => Err(self.error(
                validation!("`{}` is already defined.", member),
                Some(position),
            )),
            None => Ok(()),
        }
    }

    fn fields(&self, fields: &'a [FieldDefinition<'a>]) -> Vec<'a, SchemaField<'a>> {
        Vec::from_iter_in(
            fields.iter().map(|field| SchemaField {
                name: field.name,
                description: field.description,
                position: Some(field.position),
                arguments: self.input_fields(&field.arguments),
                output_type: self.type_ref(field.output_type),
                deprecation_reason: deprecation_reason(&field.directives),
            }),
            &self.ctx.arena,
        )
    }

    fn input_fields(
        &self,
        fields: &'a [InputValueDefinition<'a>],
    ) -> Vec<'a, SchemaInputField<'a>> {
        Vec::from_iter_in(
            fields.iter().map(|field| SchemaInputField {
                name: field.name,
                description: field.description,
                position: Some(field.position),
                input_type: self.type_ref(field.input_type),
                default_value: field.default_value,
                deprecation_reason: deprecation_reason(&field.directives),
            }),
            &self.ctx.arena,
        )
    }

    fn type_ref(&self, wrapper: &'a TypeWrapper<'a>) -> &'a TypeRef<'a> {
        let type_ref = match wrapper {
            TypeWrapper::Named(name) => TypeRef::Type(*name),
            TypeWrapper::List(of_type) => TypeRef::ListType(self.type_ref(*of_type)),
            TypeWrapper::NonNull(of_type) => TypeRef::NonNullType(self.type_ref(*of_type)),
        };
        self.ctx.alloc(type_ref)
    }

    fn add_builtin_scalars(&mut self) {
        for name in BUILTIN_SCALARS {
            if self.schema.get_type(name).is_none() {
                self.schema
                    .push_type(SchemaType::Scalar(SchemaScalar::builtin(name)));
            }
        }
    }

    /// Records every object and interface type on the possible types of each interface it
    /// implements.
    fn collect_implementations(&mut self) -> Result<()> {
        let mut implementations = std::vec::Vec::new();
        for typ in self.schema.types.iter() {
            let (implementor, interfaces, position) = match typ {
                SchemaType::Object(object) => (object.name, &object.interfaces, object.position),
                SchemaType::Interface(interface) => {
                    (interface.name, &interface.interfaces, interface.position)
                }
                _ => continue,
            };
            for interface in interfaces.iter() {
                match self.schema.get_type(interface) {
                    Some(SchemaType::Interface(_)) => implementations.push((*interface, implementor)),
                    Some(other) => {
                        return Err(self.error(
                            validation!(
                                "Type `{}` can only implement interfaces, but `{}` is declared with `{}`.",
                                implementor,
                                interface,
                                other.keyword()
                            ),
                            position,
                        ))
                    }
                    // Unknown interfaces are left for the linker to report.
                    None => {}
                }
            }
        }

        for (interface, implementor) in implementations {
            if let Some(SchemaType::Interface(interface)) = self.schema.get_type_mut(interface) {
                if !interface.is_possible_type(implementor) {
                    interface.possible_types.push(implementor);
                }
            }
        }
        Ok(())
    }

    fn resolve_root_types(
        &mut self,
        definition: Option<&SchemaDefinition<'a>>,
        extensions: &[&SchemaDefinition<'a>],
    ) -> Result<()> {
        let explicit = definition.is_some() || !extensions.is_empty();
        let mut roots = definition.copied().unwrap_or_default();
        for extension in extensions {
            for (operation, root, added) in [
                ("query", &mut roots.query, extension.query),
                ("mutation", &mut roots.mutation, extension.mutation),
                ("subscription", &mut roots.subscription, extension.subscription),
            ] {
                if added.is_some() {
                    if root.is_some() {
                        return Err(self.error(
                            validation!("Type for {} already defined in the schema.", operation),
                            None,
                        ));
                    }
                    *root = added;
                }
            }
        }

        if !explicit {
            let implicit = |name: &'a str| self.schema.get_type(name).map(|_| name);
            roots = SchemaDefinition {
                query: implicit("Query"),
                mutation: implicit("Mutation"),
                subscription: implicit("Subscription"),
            };
        }

        let Some(query) = roots.query else {
            return Err(self.error(validation!("Query root type must be provided."), None));
        };
        self.schema.query_type = self.check_root_type("Query", query)?;
        self.schema.mutation_type = match roots.mutation {
            Some(mutation) => Some(self.check_root_type("Mutation", mutation)?),
            None => None,
        };
        self.schema.subscription_type = match roots.subscription {
            Some(subscription) => Some(self.check_root_type("Subscription", subscription)?),
            None => None,
        };
        Ok(())
    }

    fn check_root_type(&self, operation: &str, name: &'a str) -> Result<&'a str> {
        match self.schema.get_type(name) {
            Some(SchemaType::Object(_)) => Ok(name),
            Some(other) => Err(self.error(
                validation!(
                    "{} root type must be an object type, but `{}` is declared with `{}`.",
                    operation,
                    name,
                    other.keyword()
                ),
                other.position(),
            )),
            None => Err(self.error(
                validation!("{} root type `{}` is not defined.", operation, name),
                None,
            )),
        }
    }
}

fn extend_names<'a>(names: &mut Vec<'a, &'a str>, added: &[&'a str]) {
    for name in added {
        if !names.contains(name) {
            names.push(*name);
        }
    }
}

/// Reorders types and every member list by name, comparing names byte-wise.
fn sort_schema(schema: &mut Schema) {
    schema.types.sort_by(|a, b| a.name().cmp(b.name()));
    for typ in schema.types.iter_mut() {
        match typ {
            SchemaType::Object(object) => {
                sort_fields(&mut object.fields);
                object.interfaces.sort_unstable();
            }
            SchemaType::Interface(interface) => {
                sort_fields(&mut interface.fields);
                interface.interfaces.sort_unstable();
                interface.possible_types.sort_unstable();
            }
            SchemaType::Union(union_type) => union_type.possible_types.sort_unstable(),
            SchemaType::Enum(enum_type) => enum_type.values.sort_by(|a, b| a.name.cmp(b.name)),
            SchemaType::InputObject(input) => input.fields.sort_by(|a, b| a.name.cmp(b.name)),
            SchemaType::Scalar(_) => {}
        }
    }
    schema.reindex();
}

fn sort_fields(fields: &mut [SchemaField]) {
    fields.sort_by(|a, b| a.name.cmp(b.name));
    for field in fields.iter_mut() {
        field.arguments.sort_by(|a, b| a.name.cmp(b.name));
    }
}

/// Finds the first name that was already seen earlier in `members`.
fn first_duplicate<'a>(
    members: impl Iterator<Item = (&'a str, Position)>,
) -> Option<(&'a str, Position)> {
    let mut seen = HashSet::new();
    members.into_iter().find(|(name, _)| !seen.insert(*name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::sdl::{load_sources, Source};
    use indoc::indoc;

    fn build<'a>(
        ctx: &'a ASTContext,
        sources: &'a [Source],
        sort_by_alphabet: bool,
    ) -> Result<Schema<'a>> {
        let document = load_sources(ctx, sources)?.expect("sources are not empty");
        build_schema(ctx, &document, sort_by_alphabet)
    }

    fn names<'a>(schema: &Schema<'a>) -> std::vec::Vec<&'a str> {
        schema.types().iter().map(|typ| typ.name()).collect()
    }

    #[test]
    fn declaration_order_and_builtin_scalars() {
        let ctx = ASTContext::new();
        let sources = [
            Source::new("query.graphql", "type Query { user: User count: Int }"),
            Source::new("user.graphql", "type User { id: ID! }\nscalar String"),
        ];
        let schema = build(&ctx, &sources, false).unwrap();
        assert_eq!(
            names(&schema),
            ["Query", "User", "String", "Int", "Float", "Boolean", "ID"]
        );
        assert_eq!(schema.query_type(), "Query");
        assert_eq!(schema.mutation_type(), None);
        assert!(schema.get_type("String").unwrap().position().is_some());
        assert!(schema.get_type("Int").unwrap().position().is_none());
    }

    #[test]
    fn field_shapes() {
        let ctx = ASTContext::new();
        let sources = [Source::new(
            "schema.graphql",
            indoc! {r#"
                type Query {
                  "Find users."
                  users(first: Int = 10, names: [String!]): [User]! @deprecated
                }
                type User { id: ID! }
            "#},
        )];
        let schema = build(&ctx, &sources, false).unwrap();
        let query = schema.get_type("Query").and_then(|typ| typ.object()).unwrap();
        let users = query.get_field("users").unwrap();
        assert_eq!(users.description, Some("Find users."));
        assert_eq!(format!("{:?}", users.output_type), "[User]!");
        assert_eq!(users.output_type.named_type(), "User");
        assert!(users.is_deprecated());
        let names = users.get_argument("names").unwrap();
        assert_eq!(format!("{:?}", names.input_type), "[String!]");
        assert_eq!(
            users.get_argument("first").unwrap().default_value.unwrap().to_string(),
            "10"
        );
    }

    #[test]
    fn extensions_merge_regardless_of_order() {
        let ctx = ASTContext::new();
        let sources = [
            Source::new(
                "extensions.graphql",
                indoc! {"
                    extend type Query { posts: [Post] }
                    extend union SearchResult = Post
                    extend enum Color { BLUE }
                    extend input Filter { limit: Int }
                    extend type Post implements Node
                "},
            ),
            Source::new(
                "base.graphql",
                indoc! {"
                    type Query { search: [SearchResult] }
                    interface Node { id: ID! }
                    type Post { id: ID! }
                    type User implements Node { id: ID! }
                    union SearchResult = User
                    enum Color { RED }
                    input Filter { color: Color }
                "},
            ),
        ];
        let schema = build(&ctx, &sources, false).unwrap();

        let query = schema.get_type("Query").and_then(|typ| typ.object()).unwrap();
        let fields: std::vec::Vec<_> = query.get_fields().iter().map(|f| f.name).collect();
        assert_eq!(fields, ["search", "posts"]);

        let search = schema.get_type("SearchResult").and_then(|t| t.union_type()).unwrap();
        assert_eq!(search.get_possible_types(), ["User", "Post"]);

        let node = schema.get_type("Node").and_then(|typ| typ.interface()).unwrap();
        assert_eq!(node.get_possible_types(), ["Post", "User"]);

        let filter = schema.get_type("Filter").and_then(|t| t.input_object()).unwrap();
        assert_eq!(filter.fields.len(), 2);
    }

    #[test]
    fn interfaces_implementing_interfaces_are_possible_types() {
        let ctx = ASTContext::new();
        let sources = [Source::new(
            "schema.graphql",
            indoc! {"
                type Query { node: Node }
                interface Node { id: ID! }
                interface Resource implements Node { id: ID! }
                type Image implements Resource & Node { id: ID! }
            "},
        )];
        let schema = build(&ctx, &sources, false).unwrap();
        let node = schema.get_type("Node").and_then(|typ| typ.interface()).unwrap();
        assert_eq!(node.get_possible_types(), ["Resource", "Image"]);
        let resource = schema.get_type("Resource").and_then(|t| t.interface()).unwrap();
        assert!(resource.implements_interface("Node"));
        assert_eq!(resource.get_possible_types(), ["Image"]);
    }

    #[test]
    fn root_types() {
        let ctx = ASTContext::new();
        let sources = [Source::new(
            "schema.graphql",
            indoc! {"
                schema { query: Root }
                extend schema { mutation: Actions }
                type Root { a: Int }
                type Actions { b: Int }
                type Query { c: Int }
            "},
        )];
        let schema = build(&ctx, &sources, false).unwrap();
        assert_eq!(schema.query_type(), "Root");
        assert_eq!(schema.mutation_type(), Some("Actions"));
        assert_eq!(schema.subscription_type(), None);

        let sources = [Source::new(
            "schema.graphql",
            "type Query { a: Int }\ntype Subscription { b: Int }",
        )];
        let schema = build(&ctx, &sources, false).unwrap();
        assert_eq!(schema.subscription_type(), Some("Subscription"));
    }

    #[test]
    fn alphabetical_order() {
        let ctx = ASTContext::new();
        let sources = [Source::new(
            "schema.graphql",
            indoc! {"
                type Query { zebra(b: Int, a: Int): Int apple: Int }
                enum Letter { C A B }
                type Banana implements Zed & Alpha { x: Int }
                interface Zed { x: Int }
                interface Alpha { x: Int }
            "},
        )];
        let schema = build(&ctx, &sources, true).unwrap();
        assert_eq!(
            names(&schema),
            ["Alpha", "Banana", "Boolean", "Float", "ID", "Int", "Letter", "Query", "String", "Zed"]
        );

        let query = schema.get_type("Query").and_then(|typ| typ.object()).unwrap();
        let fields: std::vec::Vec<_> = query.get_fields().iter().map(|f| f.name).collect();
        assert_eq!(fields, ["apple", "zebra"]);
        let args: std::vec::Vec<_> = query.fields[1].arguments.iter().map(|a| a.name).collect();
        assert_eq!(args, ["a", "b"]);

        let SchemaType::Enum(letter) = schema.get_type("Letter").unwrap() else {
            panic!("expected an enum");
        };
        let values: std::vec::Vec<_> = letter.values.iter().map(|v| v.name).collect();
        assert_eq!(values, ["A", "B", "C"]);

        let banana = schema.get_type("Banana").and_then(|typ| typ.object()).unwrap();
        assert_eq!(banana.get_interfaces(), ["Alpha", "Zed"]);
    }

    #[test]
    fn build_errors() {
        let cases = [
            ("type User { id: ID }", "Query root type must be provided."),
            (
                "type Query { a: Int }\ntype Query { b: Int }",
                "There can be only one type named `Query`.",
            ),
            (
                "type Query { a: Int }\nextend type Missing { b: Int }",
                "Cannot extend type `Missing` because it is not defined.",
            ),
            (
                "type Query { a: Int }\nscalar Date\nextend type Date { b: Int }",
                "Cannot extend scalar `Date` with an `extend type` definition.",
            ),
            (
                "type Query { a: Int }\nextend type Query { a: String }",
                "`Query.a` is already defined.",
            ),
            ("type Query { a: Int a: String }", "`Query.a` is already defined."),
            (
                "type Query { a(x: Int, x: String): Int }",
                "`Query.a(x:)` is already defined.",
            ),
            (
                "type Query { a: Int }\ninput Filter { term: String term: Int }",
                "`Filter.term` is already defined.",
            ),
            (
                "type Query { a: Int }\nenum Color { RED GREEN RED }",
                "`Color.RED` is already defined.",
            ),
            (
                "type Query { a: Int }\nextend type Query { b: Int b: Int }",
                "`Query.b` is already defined.",
            ),
            (
                "schema { query: Missing }\ntype Query { a: Int }",
                "Query root type `Missing` is not defined.",
            ),
            (
                "schema { query: Query mutation: Input }\ntype Query { a: Int }\ninput Input { a: Int }",
                "Mutation root type must be an object type, but `Input` is declared with `input`.",
            ),
            (
                "schema { query: Query }\nschema { query: Query }\ntype Query { a: Int }",
                "Must provide only one schema definition.",
            ),
            (
                "type Query implements Date { a: Int }\nscalar Date",
                "Type `Query` can only implement interfaces, but `Date` is declared with `scalar`.",
            ),
        ];

        for (source, message) in cases {
            let ctx = ASTContext::new();
            let sources = [Source::new("schema.graphql", source)];
            let error = build(&ctx, &sources, false).unwrap_err();
            assert_eq!(error.error_type(), ErrorType::SchemaBuild, "{}", source);
            assert_eq!(error.message(), message);
        }
    }

    #[test]
    fn build_errors_carry_locations() {
        let ctx = ASTContext::new();
        let sources = [
            Source::new("a.graphql", "type Query { a: Int }"),
            Source::new("b.graphql", "\n\ntype Query { b: Int }"),
        ];
        let error = build(&ctx, &sources, false).unwrap_err();
        let location = error.location().clone().unwrap();
        assert_eq!(location.filepath, "b.graphql");
        assert_eq!((location.line, location.column), (3, 1));
    }

    #[test]
    fn duplicate_members_point_at_redeclaration() {
        let ctx = ASTContext::new();
        let sources = [Source::new("schema.graphql", "type Query {\n  a: Int\n  a: String\n}")];
        let error = build(&ctx, &sources, false).unwrap_err();
        assert_eq!(error.message(), "`Query.a` is already defined.");
        let location = error.location().clone().unwrap();
        assert_eq!((location.line, location.column), (3, 3));
    }

    #[test]
    fn unknown_references_are_not_rejected() {
        let ctx = ASTContext::new();
        let sources = [Source::new("schema.graphql", "type Query { a: Missing }")];
        assert!(build(&ctx, &sources, false).is_ok());
    }
}
