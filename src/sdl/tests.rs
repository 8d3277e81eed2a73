use super::{parse_ast::*, parser::ParseSdl};
use crate::{ast::ASTContext, error::ErrorType};
use indoc::indoc;

fn parse<'a>(ctx: &'a ASTContext, source: &'a str) -> &'a Document<'a> {
    Document::parse(ctx, source).unwrap()
}

fn type_definition<'a>(document: &'a Document<'a>, index: usize) -> &'a TypeDefinition<'a> {
    match &document.definitions[index] {
        Definition::Type(typ) | Definition::TypeExtension(typ) => typ,
        definition => panic!("expected a type definition, got {:?}", definition),
    }
}

fn parse_error(source: &str) -> String {
    let ctx = ASTContext::new();
    let error = Document::parse(&ctx, source).unwrap_err();
    assert_eq!(error.error_type(), ErrorType::SchemaParse);
    error.message().to_string()
}

#[test]
fn empty_document() {
    let ctx = ASTContext::new();
    assert!(parse(&ctx, "").definitions.is_empty());
    assert!(parse(&ctx, "# only a comment\n").definitions.is_empty());
}

#[test]
fn schema_definition() {
    let ctx = ASTContext::new();
    let source = indoc! {"
        schema @link(url: \"https://example.com\") {
            query: Foo
            mutation: Bar
        }
    "};

    assert_eq!(
        parse(&ctx, source).definitions[0],
        Definition::Schema(SchemaDefinition {
            query: Some("Foo"),
            mutation: Some("Bar"),
            subscription: None,
        })
    );
}

#[test]
fn schema_definition_invalid_operation_type() {
    let source = indoc! {"
        schema {
            query: Foo
            doesNotExist: Foo
        }
    "};

    assert_eq!(
        parse_error(source),
        "Expected operation type, got Name(\"doesNotExist\")"
    );
}

#[test]
fn object_type_definition() {
    let ctx = ASTContext::new();
    let source = indoc! {r#"
        """
        A person using the app.
        """
        type User implements & Node & Entity @key(fields: "id") {
          "The identifier."
          id: ID!
          friends(first: Int = 10, after: String): [User!]! @deprecated(reason: "Use `connections`.")
          name: String @deprecated
        }
    "#};

    let document = parse(&ctx, source);
    let TypeDefinition::Object(user) = type_definition(document, 0) else {
        panic!("expected an object type");
    };

    assert_eq!(user.name, "User");
    assert_eq!(user.description, Some("A person using the app."));
    assert_eq!(user.interfaces.as_slice(), ["Node", "Entity"]);
    assert_eq!(user.fields.len(), 3);

    let id = &user.fields[0];
    assert_eq!(id.description, Some("The identifier."));
    assert_eq!(id.output_type, &TypeWrapper::NonNull(&TypeWrapper::Named("ID")));
    assert_eq!(deprecation_reason(&id.directives), None);

    let friends = &user.fields[1];
    assert_eq!(friends.arguments.len(), 2);
    assert_eq!(friends.arguments[0].name, "first");
    assert_eq!(friends.arguments[0].default_value, Some(&ConstValue::Int("10")));
    assert_eq!(friends.arguments[1].default_value, None);
    assert_eq!(
        friends.output_type,
        &TypeWrapper::NonNull(&TypeWrapper::List(&TypeWrapper::NonNull(
            &TypeWrapper::Named("User")
        )))
    );
    assert_eq!(
        deprecation_reason(&friends.directives),
        Some("Use `connections`.")
    );

    let name = &user.fields[2];
    assert_eq!(
        deprecation_reason(&name.directives),
        Some(DEFAULT_DEPRECATION_REASON)
    );
}

#[test]
fn definition_positions_skip_descriptions() {
    let ctx = ASTContext::new();
    let source = "\"\"\"\nDocs\n\"\"\"\ntype Query {\n  \"field docs\" hello: String\n}";
    let document = parse(&ctx, source);
    let TypeDefinition::Object(query) = type_definition(document, 0) else {
        panic!("expected an object type");
    };
    assert_eq!(query.position.offset, source.find("type").unwrap());
    assert_eq!(query.fields[0].position.offset, source.find("hello").unwrap());
}

#[test]
fn interface_union_enum_input_and_scalar() {
    let ctx = ASTContext::new();
    let source = indoc! {r#"
        interface Node { id: ID! }
        interface Resource implements Node { id: ID! url: String }
        union SearchResult @tag = | User | Post
        enum Color {
          "Warm" RED
          GREEN @deprecated(reason: "Too green.")
        }
        input Filter {
          colors: [Color!] = [RED, GREEN]
          range: Range = { from: 1.5, to: null }
          query: String = "a \"b\""
        }
        scalar Date @specifiedBy(url: "https://tools.ietf.org/html/rfc3339")
    "#};

    let document = parse(&ctx, source);
    assert_eq!(document.definitions.len(), 6);

    let TypeDefinition::Interface(resource) = type_definition(document, 1) else {
        panic!("expected an interface");
    };
    assert_eq!(resource.interfaces.as_slice(), ["Node"]);

    let TypeDefinition::Union(search) = type_definition(document, 2) else {
        panic!("expected a union");
    };
    assert_eq!(search.types.as_slice(), ["User", "Post"]);

    let TypeDefinition::Enum(color) = type_definition(document, 3) else {
        panic!("expected an enum");
    };
    assert_eq!(color.values[0].description, Some("Warm"));
    assert_eq!(deprecation_reason(&color.values[1].directives), Some("Too green."));

    let TypeDefinition::InputObject(filter) = type_definition(document, 4) else {
        panic!("expected an input object");
    };
    let defaults: Vec<String> = filter
        .fields
        .iter()
        .map(|field| field.default_value.unwrap().to_string())
        .collect();
    assert_eq!(
        defaults,
        ["[RED, GREEN]", "{ from: 1.5, to: null }", r#""a \"b\"""#]
    );

    assert_eq!(type_definition(document, 5).name(), "Date");
}

#[test]
fn extensions_and_directive_definitions() {
    let ctx = ASTContext::new();
    let source = indoc! {"
        directive @key(fields: String!) repeatable on OBJECT | INTERFACE
        extend schema { mutation: Mutation }
        extend type Query { extra: Int }
        extend union SearchResult = Comment
        extend scalar Date @tag
    "};

    let document = parse(&ctx, source);
    assert_eq!(
        document.definitions[0],
        Definition::Directive(DirectiveDefinition { name: "key" })
    );
    assert!(matches!(
        document.definitions[1],
        Definition::SchemaExtension(SchemaDefinition {
            mutation: Some("Mutation"),
            ..
        })
    ));
    assert!(matches!(
        document.definitions[2],
        Definition::TypeExtension(TypeDefinition::Object(_))
    ));
    assert!(matches!(
        document.definitions[3],
        Definition::TypeExtension(TypeDefinition::Union(_))
    ));
    assert!(matches!(
        document.definitions[4],
        Definition::TypeExtension(TypeDefinition::Scalar(_))
    ));
}

#[test]
fn object_type_without_fields() {
    let ctx = ASTContext::new();
    let document = parse(&ctx, "type Empty\ntype Query { a: Empty }");
    let TypeDefinition::Object(empty) = type_definition(document, 0) else {
        panic!("expected an object type");
    };
    assert!(empty.fields.is_empty());
}

#[test]
fn syntax_errors() {
    assert_eq!(
        parse_error("type Query { field: [String }"),
        "Unterminated list"
    );
    assert_eq!(
        parse_error("type Query { field String }"),
        "Expected `(` or `:`, got Name(\"String\")"
    );
    assert_eq!(
        parse_error("query { field }"),
        "Expected valid type definition, got Name(\"query\")."
    );
    assert_eq!(
        parse_error("\"dangling description\""),
        "Expected definition after description"
    );
    assert_eq!(
        parse_error("enum Bool { true false }"),
        "Enum values must not be named `true`, `false`, or `null`."
    );
    assert_eq!(
        parse_error("directive @foo on NOWHERE"),
        "Expected directive location, got Name(\"NOWHERE\")"
    );
    assert_eq!(
        parse_error("\"described\" extend type Query { a: Int }"),
        "Extensions must not have a description."
    );}

#[test]
fn lexer_errors() {
    assert_eq!(
        parse_error("\"\"\"never closed\ntype Query { a: Int }"),
        "Unterminated block string."
    );
    assert_eq!(
        parse_error("type Query { a(x: String = \"open\n): Int }"),
        "Unterminated string."
    );
    assert_eq!(
        parse_error("type Query { a(x: String = \"bad \\q\"): Int }"),
        "Invalid escape sequence in string."
    );
    assert_eq!(parse_error("type Query { a: ? }"), "Unexpected character `?`.");
}

#[test]
fn syntax_error_location_and_snippet() {
    let ctx = ASTContext::new();
    let source = "type Query {\n  field: String\n  other: ?\n}";
    let error = Document::parse(&ctx, source).unwrap_err();
    let location = error.location().clone().unwrap();
    assert_eq!((location.line, location.column), (3, 10));
    assert!(error.print(true).contains("3 |   other: ?"));
}
