use super::ids::*;
use super::simplify::{SimplifiedField, SimplifiedInputField, SimplifiedSchema, SimplifiedType};
use super::type_graph::*;
use crate::error::{Error, ErrorType, Location, Result};
use hashbrown::HashMap;
use indexmap::IndexMap;

/// Identifiers of all types, assigned before any reference is resolved.
struct IdTable<'s> {
    types: HashMap<&'s str, TypeId>,
}

impl<'s> IdTable<'s> {
    fn assign(schema: &'s SimplifiedSchema) -> Self {
        let types = schema
            .types
            .keys()
            .map(|name| (name.as_str(), TypeId::new(name)))
            .collect();
        IdTable { types }
    }

    /// Resolves a bare type name referenced by the entity `from`.
    fn resolve(&self, name: &str, from: &str, location: Option<&Location>) -> Result<TypeId> {
        match self.types.get(name) {
            Some(id) => Ok(id.clone()),
            None => Err(Error::new(
                format!("Unknown type `{}` referenced by `{}`.", name, from),
                ErrorType::UnresolvedReference,
            )
            .with_location(location.cloned())),
        }
    }
}

/// Turns a simplified schema into a [TypeGraph].
///
/// Identifiers are assigned to every type up front, so that references to types declared later,
/// or to the referencing type itself, resolve like any other. Every field, argument, relation,
/// and root type reference must resolve, otherwise linking fails with an
/// [`ErrorType::UnresolvedReference`] error naming the identifier of the referencing entity.
pub fn link_schema(schema: SimplifiedSchema) -> Result<TypeGraph> {
    let ids = IdTable::assign(&schema);

    let mut types = IndexMap::with_capacity(schema.types.len());
    for typ in schema.types.values() {
        let node = link_type(&ids, typ)?;
        types.insert(node.id.clone(), node);
    }

    let schema_id = "schema";
    let query_type = ids.resolve(&schema.query_type, schema_id, None)?;
    let mutation_type = match schema.mutation_type {
        Some(ref name) => Some(ids.resolve(name, schema_id, None)?),
        None => None,
    };
    let subscription_type = match schema.subscription_type {
        Some(ref name) => Some(ids.resolve(name, schema_id, None)?),
        None => None,
    };

    tracing::debug!(types = types.len(), "linked type graph");
    Ok(TypeGraph {
        types,
        query_type,
        mutation_type,
        subscription_type,
    })
}

fn link_type(ids: &IdTable, typ: &SimplifiedType) -> Result<TypeNode> {
    let id = TypeId::new(&typ.name);
    let location = typ.location.as_ref();

    let mut fields = IndexMap::with_capacity(typ.fields.len());
    for field in typ.fields.values() {
        fields.insert(field.name.clone(), link_field(ids, &typ.name, field)?);
    }

    let mut input_fields = IndexMap::with_capacity(typ.input_fields.len());
    for field in typ.input_fields.values() {
        let id = field_id(&typ.name, &field.name);
        input_fields.insert(field.name.clone(), link_input_value(ids, id, field)?);
    }

    let relations = |names: &[String], relation_id: fn(&str, &str) -> String| {
        names
            .iter()
            .map(|name| {
                let id = relation_id(&typ.name, name);
                let type_id = ids.resolve(name, &id, location)?;
                Ok(Relation { id, type_id })
            })
            .collect::<Result<Vec<_>>>()
    };

    Ok(TypeNode {
        interfaces: relations(&typ.interfaces, interface_id)?,
        derived_types: relations(&typ.derived_types, derived_type_id)?,
        possible_types: relations(&typ.possible_types, possible_type_id)?,
        id,
        name: typ.name.clone(),
        kind: typ.kind,
        description: typ.description.clone(),
        location: typ.location.clone(),
        is_relay_type: false,
        fields,
        enum_values: typ.enum_values.clone(),
        input_fields,
    })
}

fn link_field(ids: &IdTable, type_name: &str, field: &SimplifiedField) -> Result<FieldNode> {
    let id = field_id(type_name, &field.name);
    let type_id = ids.resolve(&field.type_name, &id, field.location.as_ref())?;

    let mut args = IndexMap::with_capacity(field.args.len());
    for arg in field.args.values() {
        let arg_id = argument_id(type_name, &field.name, &arg.name);
        args.insert(arg.name.clone(), link_input_value(ids, arg_id, arg)?);
    }

    Ok(FieldNode {
        id,
        name: field.name.clone(),
        description: field.description.clone(),
        type_id,
        type_wrappers: field.type_wrappers.clone(),
        is_deprecated: field.is_deprecated,
        deprecation_reason: field.deprecation_reason.clone(),
        args,
        relay_type: None,
        relay_args: IndexMap::new(),
        location: field.location.clone(),
    })
}

fn link_input_value(
    ids: &IdTable,
    id: String,
    value: &SimplifiedInputField,
) -> Result<ArgumentNode> {
    let type_id = ids.resolve(&value.type_name, &id, value.location.as_ref())?;
    Ok(ArgumentNode {
        id,
        name: value.name.clone(),
        description: value.description.clone(),
        default_value: value.default_value.clone(),
        type_id,
        type_wrappers: value.type_wrappers.clone(),
        is_deprecated: value.is_deprecated,
        deprecation_reason: value.deprecation_reason.clone(),
        location: value.location.clone(),
    })
}
