use super::{
    error::{syntax, syntax_err, SchemaError},
    lexer::{Extras, Token},
    parse_ast::*,
};
use crate::{
    ast::{ASTContext, DefaultIn},
    error::{get_location, print_span, Error, ErrorType, Result},
};
use bumpalo::collections::Vec;
use logos::{Lexer, Logos, Span};

pub type ParseResult<T> = std::result::Result<T, SchemaError>;

const DIRECTIVE_LOCATIONS: [&str; 19] = [
    "QUERY",
    "MUTATION",
    "SUBSCRIPTION",
    "FIELD",
    "FRAGMENT_DEFINITION",
    "FRAGMENT_SPREAD",
    "INLINE_FRAGMENT",
    "VARIABLE_DEFINITION",
    "SCHEMA",
    "SCALAR",
    "OBJECT",
    "FIELD_DEFINITION",
    "ARGUMENT_DEFINITION",
    "INTERFACE",
    "UNION",
    "ENUM",
    "ENUM_VALUE",
    "INPUT_OBJECT",
    "INPUT_FIELD_DEFINITION",
];

pub(crate) mod private {
    use super::*;

    /// Private Parser context state that's kept to keep track of the current parser's progress and
    /// state. This contains the AST context, a [Lexer], and the index of the fragment that's being
    /// parsed so that every definition can remember where it came from.
    pub struct ParserContext<'a> {
        pub(crate) ast_ctx: &'a ASTContext,
        pub(crate) source_index: usize,
        pub(crate) peek: Option<(Token<'a>, Span)>,
        pub(crate) iter: Lexer<'a, Token<'a>>,
        pub(crate) lexer_failed: bool,
    }

    impl<'a> ParserContext<'a> {
        /// Create a new Parser context for a given AST context and initialize it with an input source
        /// string to parse from.
        pub(crate) fn new(ctx: &'a ASTContext, source: &'a str, source_index: usize) -> Self {
            let extras = Extras { arena: &ctx.arena };
            ParserContext {
                ast_ctx: ctx,
                source_index,
                peek: None,
                iter: Token::lexer_with_extras(source, extras),
                lexer_failed: false,
            }
        }

        #[inline]
        pub(crate) fn next(&mut self) -> Token<'a> {
            match self.peek.take() {
                Some((token, _)) => token,
                None => {
                    let token = self.iter.next().unwrap_or(Token::End);
                    self.lexer_failed |= token == Token::Error;
                    token
                }
            }
        }

        #[inline]
        pub(crate) fn peek(&mut self) -> &Token<'a> {
            let iter = &mut self.iter;
            let (token, _) = self.peek.get_or_insert_with(|| {
                let token = iter.next().unwrap_or(Token::End);
                (token, iter.span())
            });
            self.lexer_failed |= *token == Token::Error;
            token
        }

        /// Describes the invalid token the lexer stopped at, if it did.
        pub(crate) fn lexer_error(&self) -> Option<SchemaError> {
            if !self.lexer_failed {
                return None;
            }
            let slice = self.iter.slice();
            let error = if slice.starts_with(r#"""""#) {
                syntax!("Unterminated block string.")
            } else if slice.starts_with('"') {
                let line = self.iter.remainder().lines().next().unwrap_or("");
                if line.contains('"') {
                    syntax!("Invalid escape sequence in string.")
                } else {
                    syntax!("Unterminated string.")
                }
            } else {
                syntax!("Unexpected character `{}`.", slice)
            };
            Some(error)
        }

        #[inline]
        pub(crate) fn source(&self) -> &str {
            self.iter.source()
        }

        #[inline]
        pub(crate) fn span(&self) -> Span {
            self.iter.span()
        }

        /// The position of the upcoming token.
        pub(crate) fn position(&mut self) -> Position {
            self.peek();
            let offset = self
                .peek
                .as_ref()
                .map_or(self.iter.span().start, |(_, span)| span.start);
            Position {
                source: self.source_index,
                offset,
            }
        }

        #[inline]
        pub(crate) fn expect(&mut self, expected: Token<'a>) -> ParseResult<()> {
            match self.next() {
                t if t == expected => Ok(()),
                t => syntax_err!("Expected {:?}, got {:?}", expected, t),
            }
        }

        #[inline]
        pub(crate) fn name(&mut self, what: &str) -> ParseResult<&'a str> {
            match self.next() {
                Token::Name(name) => Ok(name),
                t => syntax_err!("Expected {} name, got {:?}", what, t),
            }
        }

        /// Consumes an optional description string preceding a definition.
        pub(crate) fn description(&mut self) -> Option<&'a str> {
            match self.peek() {
                Token::String(_) => match self.next() {
                    Token::String(description) => Some(description),
                    _ => None,
                },
                _ => None,
            }
        }

        pub(crate) fn get_implements_interfaces(&mut self) -> ParseResult<Vec<'a, &'a str>> {
            let mut interfaces = Vec::new_in(&self.ast_ctx.arena);
            if self.peek() == &Token::Name("implements") {
                // Skip `implements`
                self.next();

                // Skip optional leading `&`
                if self.peek() == &Token::Ampersand {
                    self.next();
                }

                interfaces.push(self.name("interface")?);
                while self.peek() == &Token::Ampersand {
                    self.next();
                    interfaces.push(self.name("interface")?);
                }
            }

            Ok(interfaces)
        }

        pub(crate) fn directives(&mut self) -> ParseResult<Vec<'a, Directive<'a>>> {
            let mut directives = Vec::new_in(&self.ast_ctx.arena);
            while let Token::DirectiveName(_) = self.peek() {
                directives.push(Directive::parse_from_ctx(self)?);
            }
            Ok(directives)
        }

        /// Parses a type definition or extension after its description has been consumed.
        pub(crate) fn type_definition(
            &mut self,
            description: Option<&'a str>,
        ) -> ParseResult<TypeDefinition<'a>> {
            let position = self.position();
            let keyword = match self.next() {
                Token::Name(keyword @ ("scalar" | "type" | "interface" | "union" | "enum" | "input")) => {
                    keyword
                }
                t => return syntax_err!("Expected valid type definition, got {:?}.", t),
            };

            let name = self.name("type")?;
            match keyword {
                "scalar" => {
                    self.directives()?;
                    Ok(TypeDefinition::Scalar(ScalarTypeDefinition {
                        description,
                        name,
                        position,
                    }))
                }
                "type" | "interface" => {
                    let interfaces = self.get_implements_interfaces()?;
                    self.directives()?;
                    let fields = self.fields_definition()?;
                    let definition = ObjectTypeDefinition {
                        description,
                        name,
                        interfaces,
                        fields,
                        position,
                    };
                    Ok(if keyword == "type" {
                        TypeDefinition::Object(definition)
                    } else {
                        TypeDefinition::Interface(definition)
                    })
                }
                "union" => {
                    self.directives()?;
                    let types = self.union_member_types()?;
                    Ok(TypeDefinition::Union(UnionTypeDefinition {
                        description,
                        name,
                        types,
                        position,
                    }))
                }
                "enum" => {
                    self.directives()?;
                    let values = self.enum_values_definition()?;
                    Ok(TypeDefinition::Enum(EnumTypeDefinition {
                        description,
                        name,
                        values,
                        position,
                    }))
                }
                _ => {
                    self.directives()?;
                    let fields = self.input_fields_definition()?;
                    Ok(TypeDefinition::InputObject(InputObjectTypeDefinition {
                        description,
                        name,
                        fields,
                        position,
                    }))
                }
            }
        }

        fn fields_definition(&mut self) -> ParseResult<Vec<'a, FieldDefinition<'a>>> {
            let mut fields = Vec::new_in(&self.ast_ctx.arena);
            if let Token::BraceOpen = self.peek() {
                self.next(); // Skip brace open
                while !matches!(self.peek(), Token::BraceClose | Token::End) {
                    fields.push(FieldDefinition::parse_from_ctx(self)?);
                }
                match self.next() {
                    Token::BraceClose => {}
                    t => return syntax_err!("Expected `}}`, got {:?}", t),
                }
            }
            Ok(fields)
        }

        fn input_fields_definition(&mut self) -> ParseResult<Vec<'a, InputValueDefinition<'a>>> {
            let mut fields = Vec::new_in(&self.ast_ctx.arena);
            if let Token::BraceOpen = self.peek() {
                self.next(); // Skip brace open
                while !matches!(self.peek(), Token::BraceClose | Token::End) {
                    fields.push(InputValueDefinition::parse_from_ctx(self)?);
                }
                match self.next() {
                    Token::BraceClose => {}
                    t => return syntax_err!("Expected `}}`, got {:?}", t),
                }
            }
            Ok(fields)
        }

        pub(crate) fn arguments_definition(
            &mut self,
        ) -> ParseResult<Vec<'a, InputValueDefinition<'a>>> {
            let mut arguments = Vec::new_in(&self.ast_ctx.arena);
            if let Token::ParenOpen = self.peek() {
                self.next(); // Skip parens open
                while !matches!(self.peek(), Token::ParenClose | Token::End) {
                    arguments.push(InputValueDefinition::parse_from_ctx(self)?);
                }
                match self.next() {
                    Token::ParenClose => {}
                    t => return syntax_err!("Expected `)`, got {:?}", t),
                }
            }
            Ok(arguments)
        }

        fn enum_values_definition(&mut self) -> ParseResult<Vec<'a, EnumValueDefinition<'a>>> {
            let mut values = Vec::new_in(&self.ast_ctx.arena);
            if let Token::BraceOpen = self.peek() {
                self.next(); // Skip brace open
                while !matches!(self.peek(), Token::BraceClose | Token::End) {
                    values.push(EnumValueDefinition::parse_from_ctx(self)?);
                }
                match self.next() {
                    Token::BraceClose => {}
                    t => {
                        return syntax_err!(
                            "Expected either closing brace or value name, got {:?}",
                            t
                        )
                    }
                }
            }
            Ok(values)
        }

        fn union_member_types(&mut self) -> ParseResult<Vec<'a, &'a str>> {
            let mut types = Vec::new_in(&self.ast_ctx.arena);
            if self.peek() == &Token::Equal {
                // Skip `=`
                self.next();

                // Skip optional leading `|`
                if self.peek() == &Token::Pipe {
                    self.next();
                }

                types.push(self.name("member type")?);
                while self.peek() == &Token::Pipe {
                    self.next();
                    types.push(self.name("member type")?);
                }
            }
            Ok(types)
        }
    }

    /// (Private) Trait for parsing AST Nodes from a Parser Context.
    /// The [`super::ParseSdl`] trait implements the public `parse` method instead.
    pub trait ParseFromCtx<'a>: Sized {
        fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self>;
    }
}

impl<'a, T: private::ParseFromCtx<'a>> ParseSdl<'a> for T {}

/// Trait for parsing SDL AST nodes from source text using recursive descent and a lexer.
///
/// This trait is implemented by all SDL AST nodes and can hence be used to granularly parse SDL.
/// Mostly this will be used via [`Document::parse`] or the [loader](super::loader) though.
pub trait ParseSdl<'a>: private::ParseFromCtx<'a> {
    /// Parse an input source text into the implementor's AST node structure and allocate the
    /// resulting AST into the context arena.
    fn parse<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Self> {
        Self::parse_fragment(ctx, "", source, 0)
    }

    /// Parse the fragment at `source_index` of a list of sources. The `filepath` is only used
    /// for diagnostics.
    fn parse_fragment<T: ToString>(
        ctx: &'a ASTContext,
        filepath: &str,
        source: T,
        source_index: usize,
    ) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = private::ParserContext::new(ctx, source, source_index);
        match Self::parse_from_ctx(&mut parser_ctx) {
            Ok(value) => Ok(ctx.alloc(value)),
            Err(error) => {
                let span = print_span(parser_ctx.source(), parser_ctx.span());
                let location = get_location(filepath, parser_ctx.source(), parser_ctx.span().start);
                let message = parser_ctx.lexer_error().unwrap_or(error).to_string();

                Err(Error::new_with_context(
                    message,
                    Some(location),
                    span,
                    ErrorType::SchemaParse,
                ))
            }
        }
    }
}

impl<'a> DefaultIn<'a> for Document<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Document {
            definitions: Vec::new_in(arena),
        }
    }
}

impl<'a> private::ParseFromCtx<'a> for Document<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        let mut document = Document::default_in(&ctx.ast_ctx.arena);
        loop {
            let description = ctx.description();
            let definition = match ctx.peek() {
                Token::End if description.is_none() => break,
                Token::End => return syntax_err!("Expected definition after description"),
                Token::Name("schema") => {
                    Definition::Schema(SchemaDefinition::parse_from_ctx(ctx)?)
                }
                Token::Name("directive") => {
                    Definition::Directive(DirectiveDefinition::parse_from_ctx(ctx)?)
                }
                Token::Name("extend") => {
                    if description.is_some() {
                        return syntax_err!("Extensions must not have a description.");
                    }
                    ctx.next(); // Skip `extend`
                    if ctx.peek() == &Token::Name("schema") {
                        Definition::SchemaExtension(SchemaDefinition::parse_from_ctx(ctx)?)
                    } else {
                        Definition::TypeExtension(ctx.type_definition(None)?)
                    }
                }
                _ => Definition::Type(ctx.type_definition(description)?),
            };
            document.definitions.push(definition);
        }
        Ok(document)
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaDefinition<'a> {
    #[inline]
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        if ctx.next() != Token::Name("schema") {
            return syntax_err!("Schema definition must start with the `schema` keyword.");
        }

        ctx.directives()?;

        let mut defs = Self::default();
        if ctx.peek() != &Token::BraceOpen {
            return Ok(defs);
        }
        ctx.next();

        while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
            let operation_type = match ctx.next() {
                Token::Name(op @ ("query" | "mutation" | "subscription")) => op,
                t => return syntax_err!("Expected operation type, got {:?}", t),
            };

            ctx.expect(Token::Colon)?;
            let type_name = ctx.name("root type")?;

            match operation_type {
                "query" => defs.query = Some(type_name),
                "mutation" => defs.mutation = Some(type_name),
                _ => defs.subscription = Some(type_name),
            }
        }

        if Token::BraceClose != ctx.next() {
            return syntax_err!("Expected `}}`");
        }

        Ok(defs)
    }
}

impl<'a> private::ParseFromCtx<'a> for DirectiveDefinition<'a> {
    #[inline]
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        if ctx.next() != Token::Name("directive") {
            return syntax_err!("Directive definition must start with the `directive` keyword.");
        }

        let name = match ctx.next() {
            Token::DirectiveName(name) => name,
            t => return syntax_err!("Expected directive name, got {:?}", t),
        };

        ctx.arguments_definition()?;

        if ctx.peek() == &Token::Name("repeatable") {
            ctx.next();
        }

        if ctx.next() != Token::Name("on") {
            return syntax_err!("Expected `on`");
        }

        if ctx.peek() == &Token::Pipe {
            ctx.next();
        }

        loop {
            match ctx.next() {
                Token::Name(location) if DIRECTIVE_LOCATIONS.contains(&location) => {}
                t => return syntax_err!("Expected directive location, got {:?}", t),
            }

            if ctx.peek() == &Token::Pipe {
                ctx.next();
            } else {
                break;
            }
        }

        Ok(DirectiveDefinition { name })
    }
}

impl<'a> private::ParseFromCtx<'a> for Directive<'a> {
    #[inline]
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        let name = match ctx.next() {
            Token::DirectiveName(name) => name,
            t => return syntax_err!("Expected directive, got {:?}", t),
        };

        let mut arguments = Vec::new_in(&ctx.ast_ctx.arena);
        if ctx.peek() == &Token::ParenOpen {
            ctx.next();
            while !matches!(ctx.peek(), Token::ParenClose | Token::End) {
                let name = ctx.name("argument")?;
                ctx.expect(Token::Colon)?;
                arguments.push((name, ConstValue::parse_from_ctx(ctx)?));
            }
            ctx.expect(Token::ParenClose)?;
        }

        Ok(Directive { name, arguments })
    }
}

impl<'a> private::ParseFromCtx<'a> for FieldDefinition<'a> {
    #[inline]
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        let description = ctx.description();
        let position = ctx.position();
        let name = ctx.name("field")?;

        let arguments = match ctx.peek() {
            Token::Colon | Token::ParenOpen => ctx.arguments_definition()?,
            t => return syntax_err!("Expected `(` or `:`, got {:?}", t),
        };

        ctx.expect(Token::Colon)?;
        let output_type = ctx.ast_ctx.alloc(TypeWrapper::parse_from_ctx(ctx)?);
        let directives = ctx.directives()?;

        Ok(FieldDefinition {
            description,
            name,
            arguments,
            output_type,
            directives,
            position,
        })
    }
}

impl<'a> private::ParseFromCtx<'a> for InputValueDefinition<'a> {
    #[inline]
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        let description = ctx.description();
        let position = ctx.position();
        let name = ctx.name("input field")?;

        ctx.expect(Token::Colon)?;
        let input_type = ctx.ast_ctx.alloc(TypeWrapper::parse_from_ctx(ctx)?);

        let default_value = if ctx.peek() == &Token::Equal {
            ctx.next();
            Some(&*ctx.ast_ctx.alloc(ConstValue::parse_from_ctx(ctx)?))
        } else {
            None
        };

        let directives = ctx.directives()?;
        Ok(InputValueDefinition {
            description,
            name,
            input_type,
            default_value,
            directives,
            position,
        })
    }
}

impl<'a> private::ParseFromCtx<'a> for EnumValueDefinition<'a> {
    #[inline]
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        let description = ctx.description();
        let position = ctx.position();
        let name = match ctx.next() {
            Token::Name("true" | "false" | "null") => {
                return syntax_err!("Enum values must not be named `true`, `false`, or `null`.")
            }
            Token::Name(name) => name,
            t => {
                return syntax_err!(
                    "Expected either closing brace or value name, got {:?}",
                    t
                )
            }
        };

        let directives = ctx.directives()?;
        Ok(EnumValueDefinition {
            description,
            name,
            directives,
            position,
        })
    }
}

impl<'a> private::ParseFromCtx<'a> for TypeWrapper<'a> {
    #[inline]
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        let typ = match ctx.next() {
            Token::Name(name) => TypeWrapper::Named(name),
            Token::BracketOpen => {
                let typ = TypeWrapper::List(ctx.ast_ctx.alloc(TypeWrapper::parse_from_ctx(ctx)?));
                if ctx.next() != Token::BracketClose {
                    return syntax_err!("Unterminated list");
                }

                typ
            }

            t => return syntax_err!("Expected type name or list type start `[`, got {:?}", t),
        };

        match ctx.peek() {
            Token::Exclam => {
                ctx.next();
                Ok(TypeWrapper::NonNull(ctx.ast_ctx.alloc(typ)))
            }
            _ => Ok(typ),
        }
    }
}

impl<'a> private::ParseFromCtx<'a> for ConstValue<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        match ctx.next() {
            Token::Integer(value) => Ok(ConstValue::Int(value)),
            Token::Float(value) => Ok(ConstValue::Float(value)),
            Token::String(value) => Ok(ConstValue::String(value)),
            Token::Name("true") => Ok(ConstValue::Boolean(true)),
            Token::Name("false") => Ok(ConstValue::Boolean(false)),
            Token::Name("null") => Ok(ConstValue::Null),
            Token::Name(value) => Ok(ConstValue::Enum(value)),
            Token::BracketOpen => {
                let mut values = Vec::new_in(&ctx.ast_ctx.arena);
                while !matches!(ctx.peek(), Token::BracketClose | Token::End) {
                    values.push(ConstValue::parse_from_ctx(ctx)?);
                }
                ctx.expect(Token::BracketClose)?;
                Ok(ConstValue::List(values))
            }
            Token::BraceOpen => {
                let mut fields = Vec::new_in(&ctx.ast_ctx.arena);
                while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
                    let name = ctx.name("object field")?;
                    ctx.expect(Token::Colon)?;
                    fields.push((name, ConstValue::parse_from_ctx(ctx)?));
                }
                ctx.expect(Token::BraceClose)?;
                Ok(ConstValue::Object(fields))
            }
            t => syntax_err!("Expected constant value, got {:?}", t),
        }
    }
}
