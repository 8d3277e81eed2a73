use crate::ast::ASTContext;
use crate::error::{get_location, Location};
use crate::sdl::{ConstValue, Position, Source};
use bumpalo::collections::Vec;
use bumpalo::Bump;
use hashbrown::hash_map::DefaultHashBuilder;
use hashbrown::HashMap;

/// Names of the scalars every schema provides without declaring them.
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Schema Definition
///
/// A schema is built from the merged definitions of all source fragments and holds every named
/// type in declaration order (or lexicographic order if it has been sorted), plus the names of
/// the root operation types. Cross-references between types are still plain names at this stage.
/// [Reference](https://spec.graphql.org/October2021/#sec-Schema)
#[derive(Debug, Clone)]
pub struct Schema<'a> {
    pub(crate) query_type: &'a str,
    pub(crate) mutation_type: Option<&'a str>,
    pub(crate) subscription_type: Option<&'a str>,
    pub(crate) types: Vec<'a, SchemaType<'a>>,
    pub(crate) index: HashMap<&'a str, usize, DefaultHashBuilder, &'a Bump>,
    pub(crate) sources: &'a [Source],
}

impl<'a> Schema<'a> {
    pub(crate) fn new(ctx: &'a ASTContext, sources: &'a [Source]) -> Self {
        Schema {
            query_type: "Query",
            mutation_type: None,
            subscription_type: None,
            types: Vec::new_in(&ctx.arena),
            index: HashMap::new_in(&ctx.arena),
            sources,
        }
    }

    /// Returns the name of the root object type for query operations
    #[inline]
    pub fn query_type(&self) -> &'a str {
        self.query_type
    }

    /// Returns the name of the root object type for mutation operations
    #[inline]
    pub fn mutation_type(&self) -> Option<&'a str> {
        self.mutation_type
    }

    /// Returns the name of the root object type for subscription operations
    #[inline]
    pub fn subscription_type(&self) -> Option<&'a str> {
        self.subscription_type
    }

    /// Retrieves a type by name from known schema types.
    #[inline]
    pub fn get_type(&self, name: &str) -> Option<&SchemaType<'a>> {
        self.index.get(name).map(|index| &self.types[*index])
    }

    #[inline]
    pub(crate) fn get_type_mut(&mut self, name: &str) -> Option<&mut SchemaType<'a>> {
        match self.index.get(name) {
            Some(index) => self.types.get_mut(*index),
            None => None,
        }
    }

    /// Returns all named types in their current order.
    #[inline]
    pub fn types(&self) -> &[SchemaType<'a>] {
        &self.types
    }

    pub(crate) fn push_type(&mut self, typ: SchemaType<'a>) {
        self.index.insert(typ.name(), self.types.len());
        self.types.push(typ);
    }

    pub(crate) fn reindex(&mut self) {
        self.index.clear();
        for (index, typ) in self.types.iter().enumerate() {
            self.index.insert(typ.name(), index);
        }
    }

    /// Resolves the position of a definition into its file path, line, and column.
    pub fn location(&self, position: Position) -> Option<Location> {
        self.sources
            .get(position.source)
            .map(|source| get_location(&source.filepath, &source.content, position.offset))
    }
}

/// Generic trait for any schema type that declares fields
pub trait SchemaFields<'a> {
    /// Get all fields in their current order
    fn get_fields(&self) -> &[SchemaField<'a>];

    /// Get a known field by name
    fn get_field(&self, name: &str) -> Option<&SchemaField<'a>> {
        self.get_fields().iter().find(|field| field.name == name)
    }
}

/// Generic trait for any schema type that implements interfaces
pub trait SchemaInterfaces<'a> {
    /// Get the names of the implemented interfaces
    fn get_interfaces(&self) -> &[&'a str];

    /// Checks whether the type implements the interface of the given name
    #[inline]
    fn implements_interface(&self, name: &str) -> bool {
        self.get_interfaces().iter().any(|interface| *interface == name)
    }
}

/// Generic trait for abstract schema types that other types may stand in for
pub trait SchemaPossibleTypes<'a> {
    /// Get the names of all possible types
    fn get_possible_types(&self) -> &[&'a str];

    /// Checks whether the type of the given name is a possible type
    #[inline]
    fn is_possible_type(&self, name: &str) -> bool {
        self.get_possible_types().iter().any(|possible| *possible == name)
    }
}

/// An Object type definition.
///
/// Most types in GraphQL are objects and define a set of fields and the interfaces they implement.
/// [Reference](https://spec.graphql.org/October2021/#sec-Objects)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub position: Option<Position>,
    pub(crate) fields: Vec<'a, SchemaField<'a>>,
    pub(crate) interfaces: Vec<'a, &'a str>,
}

impl<'a> SchemaFields<'a> for SchemaObject<'a> {
    #[inline]
    fn get_fields(&self) -> &[SchemaField<'a>] {
        &self.fields
    }
}

impl<'a> SchemaInterfaces<'a> for SchemaObject<'a> {
    #[inline]
    fn get_interfaces(&self) -> &[&'a str] {
        &self.interfaces
    }
}

/// An Interface type definition.
///
/// Besides its own fields and the interfaces it implements itself, an interface keeps track of
/// every object or interface type implementing it, which are its possible types.
/// [Reference](https://spec.graphql.org/October2021/#sec-Interfaces)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInterface<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub position: Option<Position>,
    pub(crate) fields: Vec<'a, SchemaField<'a>>,
    pub(crate) interfaces: Vec<'a, &'a str>,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaFields<'a> for SchemaInterface<'a> {
    #[inline]
    fn get_fields(&self) -> &[SchemaField<'a>] {
        &self.fields
    }
}

impl<'a> SchemaInterfaces<'a> for SchemaInterface<'a> {
    #[inline]
    fn get_interfaces(&self) -> &[&'a str] {
        &self.interfaces
    }
}

impl<'a> SchemaPossibleTypes<'a> for SchemaInterface<'a> {
    #[inline]
    fn get_possible_types(&self) -> &[&'a str] {
        &self.possible_types
    }
}

/// An object Field type definition.
///
/// A field is like a function that given its arguments as input values produces an output value.
/// [Reference](https://spec.graphql.org/October2021/#FieldsDefinition)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub position: Option<Position>,
    pub arguments: Vec<'a, SchemaInputField<'a>>,
    pub output_type: &'a TypeRef<'a>,
    pub deprecation_reason: Option<&'a str>,
}

impl<'a> SchemaField<'a> {
    #[inline]
    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason.is_some()
    }

    #[inline]
    pub fn get_argument(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

/// A Union type definition.
///
/// A union contains a list of possible types that can be returned in its stead when its defined as
/// an output type.
/// [Reference](https://spec.graphql.org/October2021/#sec-Unions)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaUnion<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub position: Option<Position>,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaPossibleTypes<'a> for SchemaUnion<'a> {
    #[inline]
    fn get_possible_types(&self) -> &[&'a str] {
        &self.possible_types
    }
}

/// A Scalar type definition.
///
/// Scalars represent primitive leaf values. Builtin scalars that weren't declared in any source
/// have no position.
/// [Reference](https://spec.graphql.org/October2021/#sec-Scalars)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaScalar<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub position: Option<Position>,
}

impl<'a> SchemaScalar<'a> {
    #[inline]
    pub fn builtin(name: &'a str) -> Self {
        SchemaScalar {
            name,
            description: None,
            position: None,
        }
    }
}

/// An Enum type definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Enums)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEnum<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub position: Option<Position>,
    pub values: Vec<'a, SchemaEnumValue<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEnumValue<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub position: Option<Position>,
    pub deprecation_reason: Option<&'a str>,
}

/// An Input Object type definition.
///
/// Inputs, such as arguments, may sometimes be nested and accept objects that must adhere to the
/// shape of an Input Object definition. This is often used to represent more complex inputs.
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Objects)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInputObject<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub position: Option<Position>,
    pub fields: Vec<'a, SchemaInputField<'a>>,
}

/// An argument or input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInputField<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub position: Option<Position>,
    pub input_type: &'a TypeRef<'a>,
    pub default_value: Option<&'a ConstValue<'a>>,
    pub deprecation_reason: Option<&'a str>,
}

/// A named type enum that represents all possible GraphQL definition types.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Types)
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType<'a> {
    InputObject(SchemaInputObject<'a>),
    Object(SchemaObject<'a>),
    Union(SchemaUnion<'a>),
    Interface(SchemaInterface<'a>),
    Scalar(SchemaScalar<'a>),
    Enum(SchemaEnum<'a>),
}

impl<'a> SchemaType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            SchemaType::InputObject(x) => x.name,
            SchemaType::Object(x) => x.name,
            SchemaType::Union(x) => x.name,
            SchemaType::Interface(x) => x.name,
            SchemaType::Scalar(x) => x.name,
            SchemaType::Enum(x) => x.name,
        }
    }

    #[inline]
    pub fn description(&self) -> Option<&'a str> {
        match self {
            SchemaType::InputObject(x) => x.description,
            SchemaType::Object(x) => x.description,
            SchemaType::Union(x) => x.description,
            SchemaType::Interface(x) => x.description,
            SchemaType::Scalar(x) => x.description,
            SchemaType::Enum(x) => x.description,
        }
    }

    #[inline]
    pub fn position(&self) -> Option<Position> {
        match self {
            SchemaType::InputObject(x) => x.position,
            SchemaType::Object(x) => x.position,
            SchemaType::Union(x) => x.position,
            SchemaType::Interface(x) => x.position,
            SchemaType::Scalar(x) => x.position,
            SchemaType::Enum(x) => x.position,
        }
    }

    /// The keyword a definition of this kind starts with, used in diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            SchemaType::InputObject(_) => "input",
            SchemaType::Object(_) => "type",
            SchemaType::Union(_) => "union",
            SchemaType::Interface(_) => "interface",
            SchemaType::Scalar(_) => "scalar",
            SchemaType::Enum(_) => "enum",
        }
    }

    /// Whether this is one of the reserved `__`-prefixed introspection types.
    #[inline]
    pub fn is_introspection_type(&self) -> bool {
        self.name().starts_with("__")
    }

    pub fn object(&self) -> Option<&SchemaObject<'a>> {
        match self {
            SchemaType::Object(x) => Some(x),
            _ => None,
        }
    }

    pub fn interface(&self) -> Option<&SchemaInterface<'a>> {
        match self {
            SchemaType::Interface(x) => Some(x),
            _ => None,
        }
    }

    pub fn union_type(&self) -> Option<&SchemaUnion<'a>> {
        match self {
            SchemaType::Union(x) => Some(x),
            _ => None,
        }
    }

    pub fn input_object(&self) -> Option<&SchemaInputObject<'a>> {
        match self {
            SchemaType::InputObject(x) => Some(x),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum TypeRef<'a> {
    Type(&'a str),
    ListType(&'a TypeRef<'a>),
    NonNullType(&'a TypeRef<'a>),
}

impl<'a> TypeRef<'a> {
    /// The name of the named type at the bottom of the wrapper chain.
    #[inline]
    pub fn named_type(&self) -> &'a str {
        match self {
            TypeRef::Type(name) => name,
            TypeRef::ListType(of_type) | TypeRef::NonNullType(of_type) => of_type.named_type(),
        }
    }
}

impl<'a> std::fmt::Debug for TypeRef<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type(name) => write!(f, "{}", name),
            Self::ListType(of_type) => write!(f, "[{:?}]", of_type),
            Self::NonNullType(of_type) => write!(f, "{:?}!", of_type),
        }
    }
}
