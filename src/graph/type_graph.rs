use super::ids::{extract_type_id, TypeId};
use crate::error::Location;
use indexmap::IndexMap;
use std::ops::Index;

/// The kind of a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

/// A single List or Non-Null modifier of a type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Wrapper {
    List,
    NonNull,
}

/// The finished, fully linked graph of a schema.
///
/// All type nodes are owned by a single store, keyed by their [TypeId]. Every other reference,
/// whether from a field to its type or from a union to its members, is a [TypeId] that's
/// guaranteed to be present in the store, so cycles need no special handling. The store keeps
/// declaration order, or alphabetical order if the schema was sorted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct TypeGraph {
    pub(crate) types: IndexMap<TypeId, TypeNode>,
    pub(crate) query_type: TypeId,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) mutation_type: Option<TypeId>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) subscription_type: Option<TypeId>,
}

/// One named type of the schema.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct TypeNode {
    pub id: TypeId,
    pub name: String,
    pub kind: TypeKind,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub location: Option<Location>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "std::ops::Not::not"))]
    pub is_relay_type: bool,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "IndexMap::is_empty"))]
    pub fields: IndexMap<String, FieldNode>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Vec::is_empty"))]
    pub interfaces: Vec<Relation>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Vec::is_empty"))]
    pub derived_types: Vec<Relation>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Vec::is_empty"))]
    pub possible_types: Vec<Relation>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Vec::is_empty"))]
    pub enum_values: Vec<EnumValueNode>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "IndexMap::is_empty"))]
    pub input_fields: IndexMap<String, ArgumentNode>,
}

impl TypeNode {
    #[inline]
    pub fn is_object(&self) -> bool {
        self.kind == TypeKind::Object
    }

    /// Whether this type is drawn as a node of the diagram rather than inlined as a leaf.
    #[inline]
    pub fn is_diagram_node(&self) -> bool {
        !matches!(
            self.kind,
            TypeKind::Scalar | TypeKind::Enum | TypeKind::InputObject
        ) && !self.is_relay_type
    }
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct FieldNode {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_id: TypeId,
    pub type_wrappers: Vec<Wrapper>,
    pub is_deprecated: bool,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub deprecation_reason: Option<String>,
    pub args: IndexMap<String, ArgumentNode>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub relay_type: Option<RelayType>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "IndexMap::is_empty"))]
    pub relay_args: IndexMap<String, ArgumentNode>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub location: Option<Location>,
}

/// The type a field pointed to before its Relay connection was collapsed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct RelayType {
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_id: TypeId,
    pub type_wrappers: Vec<Wrapper>,
}

/// A field argument or an input object field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct ArgumentNode {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub default_value: Option<String>,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_id: TypeId,
    pub type_wrappers: Vec<Wrapper>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "std::ops::Not::not"))]
    pub is_deprecated: bool,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub deprecation_reason: Option<String>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct EnumValueNode {
    pub name: String,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    pub is_deprecated: bool,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub deprecation_reason: Option<String>,
}

/// An implements-interface, derived-type, or possible-type edge between two types.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Relation {
    pub id: String,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_id: TypeId,
}

/// Anything of the graph that can be addressed by its identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphEntity<'g> {
    Type(&'g TypeNode),
    Field(&'g FieldNode),
    Argument(&'g ArgumentNode),
    Relation(&'g Relation),
}

impl TypeGraph {
    /// Looks up a type by its identifier.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&TypeNode> {
        self.types.get(id)
    }

    /// Looks up a type by its name.
    #[inline]
    pub fn get_by_name(&self, name: &str) -> Option<&TypeNode> {
        self.types.get(&TypeId::new(name))
    }

    /// Follows a reference of the graph to the type node it points to.
    ///
    /// # Panics
    ///
    /// Panics if the identifier doesn't belong to this graph. Every [TypeId] stored inside a
    /// graph resolves.
    #[inline]
    pub fn type_of(&self, id: &TypeId) -> &TypeNode {
        &self.types[id]
    }

    /// Iterates over all types in their stored order.
    #[inline]
    pub fn types(&self) -> impl Iterator<Item = &TypeNode> {
        self.types.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[inline]
    pub fn query_type(&self) -> &TypeNode {
        self.type_of(&self.query_type)
    }

    #[inline]
    pub fn mutation_type(&self) -> Option<&TypeNode> {
        self.mutation_type.as_ref().map(|id| self.type_of(id))
    }

    #[inline]
    pub fn subscription_type(&self) -> Option<&TypeNode> {
        self.subscription_type.as_ref().map(|id| self.type_of(id))
    }

    /// Looks up a field of an object or interface type by its identifier.
    pub fn field(&self, id: &str) -> Option<&FieldNode> {
        let owner = self.get(extract_type_id(id)?.as_str())?;
        owner.fields.values().find(|field| field.id == id)
    }

    /// Looks up an argument, including Relay arguments, or an input object field by its
    /// identifier.
    pub fn argument(&self, id: &str) -> Option<&ArgumentNode> {
        let owner = self.get(extract_type_id(id)?.as_str())?;
        owner
            .fields
            .values()
            .flat_map(|field| field.args.values().chain(field.relay_args.values()))
            .chain(owner.input_fields.values())
            .find(|argument| argument.id == id)
    }

    /// Resolves any identifier of the graph to the entity it addresses.
    pub fn entity(&self, id: &str) -> Option<GraphEntity<'_>> {
        if let Some(typ) = self.get(id) {
            return Some(GraphEntity::Type(typ));
        }
        if let Some(field) = self.field(id) {
            return Some(GraphEntity::Field(field));
        }
        if let Some(argument) = self.argument(id) {
            return Some(GraphEntity::Argument(argument));
        }
        let owner = self.get(extract_type_id(id)?.as_str())?;
        owner
            .interfaces
            .iter()
            .chain(owner.derived_types.iter())
            .chain(owner.possible_types.iter())
            .find(|relation| relation.id == id)
            .map(GraphEntity::Relation)
    }

    /// Returns where the type, field, or argument of the given identifier was defined.
    ///
    /// The location points at the first token of the definition itself, past any description.
    pub fn source_location(&self, id: &str) -> Option<&Location> {
        match self.entity(id)? {
            GraphEntity::Type(typ) => typ.location.as_ref(),
            GraphEntity::Field(field) => field.location.as_ref(),
            GraphEntity::Argument(argument) => argument.location.as_ref(),
            GraphEntity::Relation(_) => None,
        }
    }

    /// Serializes the graph into a JSON string.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    #[cfg(feature = "json")]
    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl Index<&TypeId> for TypeGraph {
    type Output = TypeNode;

    #[inline]
    fn index(&self, id: &TypeId) -> &TypeNode {
        self.type_of(id)
    }
}
