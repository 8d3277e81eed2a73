use super::type_graph::{EnumValueNode, TypeKind, Wrapper};
use crate::error::Location;
use crate::schema::*;
use indexmap::IndexMap;

/// A schema flattened into plain, owned records.
///
/// References between types are still bare type names here. Linking them is left to the
/// [linker](super::link_schema), since a reference may point at a type that hasn't been visited
/// yet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct SimplifiedSchema {
    pub types: IndexMap<String, SimplifiedType>,
    pub query_type: String,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct SimplifiedType {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub fields: IndexMap<String, SimplifiedField>,
    /// Interfaces this type implements
    pub interfaces: Vec<String>,
    /// Types implementing this interface
    pub derived_types: Vec<String>,
    /// Members of this union
    pub possible_types: Vec<String>,
    pub enum_values: Vec<EnumValueNode>,
    pub input_fields: IndexMap<String, SimplifiedInputField>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct SimplifiedField {
    pub name: String,
    pub description: Option<String>,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_name: String,
    pub type_wrappers: Vec<Wrapper>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
    pub args: IndexMap<String, SimplifiedInputField>,
    pub location: Option<Location>,
}

/// An argument or input object field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct SimplifiedInputField {
    pub name: String,
    pub description: Option<String>,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_name: String,
    pub type_wrappers: Vec<Wrapper>,
    pub default_value: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
    pub location: Option<Location>,
}

/// Splits a type reference into its wrappers, outermost first, and the bare type name.
///
/// `[String]!` becomes `[NonNull, List]` and `String`, while `[String!]` becomes
/// `[List, NonNull]` and `String`.
pub fn unwrap_type_ref(type_ref: &TypeRef) -> (Vec<Wrapper>, String) {
    let mut wrappers = Vec::new();
    let mut current = type_ref;
    loop {
        match current {
            TypeRef::ListType(of_type) => {
                wrappers.push(Wrapper::List);
                current = *of_type;
            }
            TypeRef::NonNullType(of_type) => {
                wrappers.push(Wrapper::NonNull);
                current = *of_type;
            }
            TypeRef::Type(name) => return (wrappers, name.to_string()),
        }
    }
}

/// Classifies a named type. The builtin scalar names are always scalars, however they were
/// declared.
pub fn type_kind(typ: &SchemaType) -> TypeKind {
    if BUILTIN_SCALARS.iter().any(|name| *name == typ.name()) {
        return TypeKind::Scalar;
    }
    match typ {
        SchemaType::Scalar(_) => TypeKind::Scalar,
        SchemaType::Object(_) => TypeKind::Object,
        SchemaType::Interface(_) => TypeKind::Interface,
        SchemaType::Union(_) => TypeKind::Union,
        SchemaType::Enum(_) => TypeKind::Enum,
        SchemaType::InputObject(_) => TypeKind::InputObject,
    }
}

/// Converts every named type of a schema, except introspection types, into a simplified record.
pub fn simplify_schema(schema: &Schema) -> SimplifiedSchema {
    let types: IndexMap<String, SimplifiedType> = schema
        .types()
        .iter()
        .filter(|typ| !typ.is_introspection_type())
        .map(|typ| (typ.name().to_string(), simplify_type(schema, typ)))
        .collect();

    tracing::debug!(types = types.len(), "simplified schema");
    SimplifiedSchema {
        types,
        query_type: schema.query_type().to_string(),
        mutation_type: schema.mutation_type().map(str::to_string),
        subscription_type: schema.subscription_type().map(str::to_string),
    }
}

fn simplify_type(schema: &Schema, typ: &SchemaType) -> SimplifiedType {
    let kind = type_kind(typ);
    let mut simplified = SimplifiedType {
        name: typ.name().to_string(),
        kind,
        description: typ.description().map(str::to_string),
        location: typ.position().and_then(|position| schema.location(position)),
        fields: IndexMap::new(),
        interfaces: Vec::new(),
        derived_types: Vec::new(),
        possible_types: Vec::new(),
        enum_values: Vec::new(),
        input_fields: IndexMap::new(),
    };

    // A builtin scalar that was declared as something else keeps none of its members.
    if kind == TypeKind::Scalar {
        return simplified;
    }

    match typ {
        SchemaType::Object(object) => {
            simplified.fields = simplify_fields(schema, object.get_fields());
            simplified.interfaces = dedupe(object.get_interfaces());
        }
        SchemaType::Interface(interface) => {
            simplified.fields = simplify_fields(schema, interface.get_fields());
            simplified.interfaces = dedupe(interface.get_interfaces());
            simplified.derived_types = dedupe(interface.get_possible_types());
        }
        SchemaType::Union(union_type) => {
            simplified.possible_types = dedupe(union_type.get_possible_types());
        }
        SchemaType::Enum(enum_type) => {
            simplified.enum_values = enum_type
                .values
                .iter()
                .map(|value| EnumValueNode {
                    name: value.name.to_string(),
                    description: value.description.map(str::to_string),
                    is_deprecated: value.deprecation_reason.is_some(),
                    deprecation_reason: value.deprecation_reason.map(str::to_string),
                })
                .collect();
        }
        SchemaType::InputObject(input) => {
            simplified.input_fields = simplify_input_fields(schema, &input.fields);
        }
        SchemaType::Scalar(_) => {}
    }
    simplified
}

fn simplify_fields(schema: &Schema, fields: &[SchemaField]) -> IndexMap<String, SimplifiedField> {
    fields
        .iter()
        .map(|field| {
            let (type_wrappers, type_name) = unwrap_type_ref(field.output_type);
            let simplified = SimplifiedField {
                name: field.name.to_string(),
                description: field.description.map(str::to_string),
                type_name,
                type_wrappers,
                is_deprecated: field.is_deprecated(),
                deprecation_reason: field.deprecation_reason.map(str::to_string),
                args: simplify_input_fields(schema, &field.arguments),
                location: field.position.and_then(|position| schema.location(position)),
            };
            (simplified.name.clone(), simplified)
        })
        .collect()
}

fn simplify_input_fields(
    schema: &Schema,
    fields: &[SchemaInputField],
) -> IndexMap<String, SimplifiedInputField> {
    fields
        .iter()
        .map(|field| {
            let (type_wrappers, type_name) = unwrap_type_ref(field.input_type);
            let simplified = SimplifiedInputField {
                name: field.name.to_string(),
                description: field.description.map(str::to_string),
                type_name,
                type_wrappers,
                default_value: field.default_value.map(|value| value.to_string()),
                is_deprecated: field.deprecation_reason.is_some(),
                deprecation_reason: field.deprecation_reason.map(str::to_string),
                location: field.position.and_then(|position| schema.location(position)),
            };
            (simplified.name.clone(), simplified)
        })
        .collect()
}

fn dedupe(names: &[&str]) -> Vec<String> {
    let mut deduped: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !deduped.iter().any(|known| known == name) {
            deduped.push(name.to_string());
        }
    }
    deduped
}
