use std::{borrow::Borrow, fmt};

const SEPARATOR: &str = "::";

/// The identifier of a [`TypeNode`](super::TypeNode), formatted as `TYPE::{name}`.
///
/// Every identifier of a field, argument, or relation starts with the name of the type it belongs
/// to, which is how [extract_type_id] recovers the owning type without a reverse index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize), serde(transparent))]
pub struct TypeId(String);

impl TypeId {
    #[inline]
    pub fn new(type_name: &str) -> Self {
        TypeId(build_id("TYPE", &[type_name]))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name of the type this identifier points to.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.0["TYPE::".len()..]
    }
}

impl Borrow<str> for TypeId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TypeId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for TypeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

fn build_id(tag: &str, path: &[&str]) -> String {
    let mut id = String::from(tag);
    for segment in path {
        id.push_str(SEPARATOR);
        id.push_str(segment);
    }
    id
}

/// `FIELD::{type}::{field}`, used for fields and input object fields alike.
pub fn field_id(type_name: &str, field: &str) -> String {
    build_id("FIELD", &[type_name, field])
}

/// `ARGUMENT::{type}::{field}::{argument}`
pub fn argument_id(type_name: &str, field: &str, argument: &str) -> String {
    build_id("ARGUMENT", &[type_name, field, argument])
}

/// `INTERFACE::{type}::{interface}`, the relation of a type to an interface it implements.
pub fn interface_id(type_name: &str, interface: &str) -> String {
    build_id("INTERFACE", &[type_name, interface])
}

/// `DERIVED_TYPE::{interface}::{type}`, the relation of an interface to an implementing type.
pub fn derived_type_id(interface: &str, type_name: &str) -> String {
    build_id("DERIVED_TYPE", &[interface, type_name])
}

/// `POSSIBLE_TYPE::{union}::{type}`, the relation of a union to one of its members.
pub fn possible_type_id(union_name: &str, type_name: &str) -> String {
    build_id("POSSIBLE_TYPE", &[union_name, type_name])
}

/// Recovers the identifier of the owning type from any identifier of the graph.
///
/// Returns `None` for strings that aren't identifiers at all.
///
/// ```
/// use graphql_type_graph::graph::{extract_type_id, TypeId};
///
/// assert_eq!(extract_type_id("ARGUMENT::Query::user::id"), Some(TypeId::new("Query")));
/// assert_eq!(extract_type_id("TYPE::User"), Some(TypeId::new("User")));
/// assert_eq!(extract_type_id("User"), None);
/// ```
pub fn extract_type_id(id: &str) -> Option<TypeId> {
    let mut segments = id.split(SEPARATOR);
    let _tag = segments.next()?;
    match segments.next() {
        Some(type_name) if !type_name.is_empty() => Some(TypeId::new(type_name)),
        _ => None,
    }
}
