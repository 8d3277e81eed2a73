use bumpalo::collections::Vec;
use std::fmt;

/// The reason graphql-js assigns to `@deprecated` when no `reason` argument is given.
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Where a definition starts: the index of the source fragment it was parsed from and the byte
/// offset of its first token after any leading description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub source: usize,
    pub offset: usize,
}

/// A parsed schema definition language document of a single source fragment.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-System)
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    pub definitions: Vec<'a, Definition<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition<'a> {
    Schema(SchemaDefinition<'a>),
    SchemaExtension(SchemaDefinition<'a>),
    Type(TypeDefinition<'a>),
    TypeExtension(TypeDefinition<'a>),
    Directive(DirectiveDefinition<'a>),
}

/// The root operation types named by a `schema` definition or extension.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Schema)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SchemaDefinition<'a> {
    pub query: Option<&'a str>,
    pub mutation: Option<&'a str>,
    pub subscription: Option<&'a str>,
}

/// https://github.com/graphql/graphql-spec/blob/main/spec/Section%203%20--%20Type%20System.md#types
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition<'a> {
    Scalar(ScalarTypeDefinition<'a>),
    Object(ObjectTypeDefinition<'a>),
    Interface(InterfaceTypeDefinition<'a>),
    Union(UnionTypeDefinition<'a>),
    Enum(EnumTypeDefinition<'a>),
    InputObject(InputObjectTypeDefinition<'a>),
}

impl<'a> TypeDefinition<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            TypeDefinition::Scalar(s) => s.name,
            TypeDefinition::Object(o) => o.name,
            TypeDefinition::Interface(i) => i.name,
            TypeDefinition::Union(u) => u.name,
            TypeDefinition::Enum(e) => e.name,
            TypeDefinition::InputObject(i) => i.name,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            TypeDefinition::Scalar(s) => s.position,
            TypeDefinition::Object(o) => o.position,
            TypeDefinition::Interface(i) => i.position,
            TypeDefinition::Union(u) => u.position,
            TypeDefinition::Enum(e) => e.position,
            TypeDefinition::InputObject(i) => i.position,
        }
    }

    /// The keyword a definition of this kind starts with, used in diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeDefinition::Scalar(_) => "scalar",
            TypeDefinition::Object(_) => "type",
            TypeDefinition::Interface(_) => "interface",
            TypeDefinition::Union(_) => "union",
            TypeDefinition::Enum(_) => "enum",
            TypeDefinition::InputObject(_) => "input",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarTypeDefinition<'a> {
    pub description: Option<&'a str>,
    pub name: &'a str,
    pub position: Position,
}

/// Object and interface types share the same shape: implemented interfaces plus fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTypeDefinition<'a> {
    pub description: Option<&'a str>,
    pub name: &'a str,
    pub interfaces: Vec<'a, &'a str>,
    pub fields: Vec<'a, FieldDefinition<'a>>,
    pub position: Position,
}

pub type InterfaceTypeDefinition<'a> = ObjectTypeDefinition<'a>;

#[derive(Debug, Clone, PartialEq)]
pub struct UnionTypeDefinition<'a> {
    pub description: Option<&'a str>,
    pub name: &'a str,
    pub types: Vec<'a, &'a str>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumTypeDefinition<'a> {
    pub description: Option<&'a str>,
    pub name: &'a str,
    pub values: Vec<'a, EnumValueDefinition<'a>>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition<'a> {
    pub description: Option<&'a str>,
    pub name: &'a str,
    pub directives: Vec<'a, Directive<'a>>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectTypeDefinition<'a> {
    pub description: Option<&'a str>,
    pub name: &'a str,
    pub fields: Vec<'a, InputValueDefinition<'a>>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition<'a> {
    pub description: Option<&'a str>,
    pub name: &'a str,
    pub arguments: Vec<'a, InputValueDefinition<'a>>,
    pub output_type: &'a TypeWrapper<'a>,
    pub directives: Vec<'a, Directive<'a>>,
    pub position: Position,
}

/// An argument or an input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition<'a> {
    pub description: Option<&'a str>,
    pub name: &'a str,
    pub input_type: &'a TypeWrapper<'a>,
    pub default_value: Option<&'a ConstValue<'a>>,
    pub directives: Vec<'a, Directive<'a>>,
    pub position: Position,
}

/// A `directive @name ... on LOCATIONS` definition. Only its name is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition<'a> {
    pub name: &'a str,
}

/// A directive applied to a definition, e.g. `@deprecated(reason: "Use `name`.")`.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive<'a> {
    pub name: &'a str,
    pub arguments: Vec<'a, (&'a str, ConstValue<'a>)>,
}

/// Returns the deprecation reason if the list of directives contains `@deprecated`.
pub fn deprecation_reason<'a>(directives: &[Directive<'a>]) -> Option<&'a str> {
    let deprecated = directives.iter().find(|d| d.name == "deprecated")?;
    let reason = deprecated
        .arguments
        .iter()
        .find_map(|(name, value)| match value {
            ConstValue::String(reason) if *name == "reason" => Some(*reason),
            _ => None,
        });
    Some(reason.unwrap_or(DEFAULT_DEPRECATION_REASON))
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeWrapper<'a> {
    NonNull(&'a TypeWrapper<'a>),
    List(&'a TypeWrapper<'a>),
    Named(&'a str),
}

impl<'a> TypeWrapper<'a> {
    /// The bare type name at the bottom of the wrapper chain.
    pub fn named_type(&self) -> &'a str {
        match self {
            TypeWrapper::NonNull(inner) | TypeWrapper::List(inner) => inner.named_type(),
            TypeWrapper::Named(name) => name,
        }
    }
}

/// A constant input value as it may appear in default values and directive arguments.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Values)
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue<'a> {
    Int(&'a str),
    Float(&'a str),
    String(&'a str),
    Boolean(bool),
    Null,
    Enum(&'a str),
    List(Vec<'a, ConstValue<'a>>),
    Object(Vec<'a, (&'a str, ConstValue<'a>)>),
}

/// Prints values back into GraphQL literal syntax, e.g. `{ first: 10, order: [ASC] }`.
impl<'a> fmt::Display for ConstValue<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Int(value) | ConstValue::Float(value) | ConstValue::Enum(value) => {
                f.write_str(value)
            }
            ConstValue::String(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c if (c as u32) < 0x20 => write!(f, "\\u{:04X}", c as u32)?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            ConstValue::Boolean(value) => write!(f, "{}", value),
            ConstValue::Null => f.write_str("null"),
            ConstValue::List(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
            ConstValue::Object(fields) if fields.is_empty() => f.write_str("{}"),
            ConstValue::Object(fields) => {
                f.write_str("{ ")?;
                for (index, (name, value)) in fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                f.write_str(" }")
            }
        }
    }
}
