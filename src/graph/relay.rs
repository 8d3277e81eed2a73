use super::ids::TypeId;
use super::type_graph::*;
use hashbrown::HashMap;
use indexmap::IndexMap;
use std::mem;

/// Arguments that only exist to paginate a connection.
pub const RELAY_ARGUMENTS: [&str; 4] = ["first", "last", "before", "after"];

const CONNECTION_SUFFIX: &str = "Connection";

/// Which fields of the query root are removed as Relay plumbing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "json", serde(default, rename_all = "camelCase"))]
pub struct RelayOptions {
    /// Root fields that are removed when their type is a Relay type, `node` and `nodes` by
    /// default.
    pub plumbing_root_fields: Vec<String>,
    /// Whether root fields returning the query root type itself are removed.
    pub remove_self_referencing_root_fields: bool,
}

impl Default for RelayOptions {
    fn default() -> Self {
        RelayOptions {
            plumbing_root_fields: vec!["node".to_string(), "nodes".to_string()],
            remove_self_referencing_root_fields: true,
        }
    }
}

/// A field whose type matched the connection pattern.
struct Connection {
    owner: TypeId,
    field: String,
    connection: TypeId,
    edge: TypeId,
    node: TypeId,
}

/// Whether a type name has at least one character followed by `Connection`.
#[inline]
fn is_connection_name(name: &str) -> bool {
    name.len() > CONNECTION_SUFFIX.len() && name.ends_with(CONNECTION_SUFFIX)
}

#[inline]
fn is_relay_argument(name: &str) -> bool {
    RELAY_ARGUMENTS.iter().any(|relay| *relay == name)
}

fn detect_connection(graph: &TypeGraph, owner: &TypeNode, field: &FieldNode) -> Option<Connection> {
    let connection = graph.type_of(&field.type_id);
    if !is_connection_name(&connection.name) || !connection.is_object() {
        return None;
    }
    let edges = connection.fields.get("edges")?;
    let edge = graph.type_of(&edges.type_id);
    if !edge.is_object() {
        return None;
    }
    let node = edge.fields.get("node")?;
    Some(Connection {
        owner: owner.id.clone(),
        field: field.name.clone(),
        connection: connection.id.clone(),
        edge: edge.id.clone(),
        node: node.type_id.clone(),
    })
}

/// Collapses Relay connections into direct list edges.
///
/// A field whose type is an object named `…Connection`, with an `edges` field of an object type
/// that has a `node` field, is rewritten to point at the node type with a single list wrapper.
/// Its previous type is kept in [`FieldNode::relay_type`] and its pagination arguments are moved
/// into [`FieldNode::relay_args`]. Connection, edge, `Node`, and `PageInfo` types are flagged as
/// Relay types, the `Node` interface is dropped from every type's interfaces, and any field that
/// exposes an edge type directly is pointed at the edge's node type. Finally the plumbing fields
/// named by `options` are removed from the query root.
///
/// Fields that don't match the pattern are left untouched.
pub fn normalize_relay(mut graph: TypeGraph, options: &RelayOptions) -> TypeGraph {
    let node_interface = TypeId::new("Node");
    for name in ["Node", "PageInfo"] {
        if let Some(typ) = graph.types.get_mut(TypeId::new(name).as_str()) {
            typ.is_relay_type = true;
        }
    }
    for typ in graph.types.values_mut() {
        typ.interfaces
            .retain(|interface| interface.type_id != node_interface);
    }

    let mut connections = Vec::new();
    for typ in graph.types.values() {
        for field in typ.fields.values() {
            connections.extend(detect_connection(&graph, typ, field));
        }
    }

    let mut edge_nodes: HashMap<TypeId, TypeId> = HashMap::new();
    for connection in connections {
        for relay_type in [&connection.connection, &connection.edge] {
            if let Some(typ) = graph.types.get_mut(relay_type) {
                typ.is_relay_type = true;
            }
        }
        edge_nodes.insert(connection.edge.clone(), connection.node.clone());

        let Some(field) = graph
            .types
            .get_mut(&connection.owner)
            .and_then(|owner| owner.fields.get_mut(&connection.field))
        else {
            continue;
        };
        field.relay_type = Some(RelayType {
            type_id: mem::replace(&mut field.type_id, connection.node),
            type_wrappers: mem::replace(&mut field.type_wrappers, vec![Wrapper::List]),
        });
        let (relay_args, args): (IndexMap<_, _>, IndexMap<_, _>) = mem::take(&mut field.args)
            .into_iter()
            .partition(|(name, _)| is_relay_argument(name));
        field.args = args;
        field.relay_args = relay_args;
        tracing::trace!(field = %field.id, node = %field.type_id, "collapsed relay connection");
    }

    // Edge types may also be exposed outside of their connection, e.g. by `Connection.edges`.
    for typ in graph.types.values_mut() {
        for field in typ.fields.values_mut() {
            if let Some(node) = edge_nodes.get(&field.type_id) {
                field.relay_type = Some(RelayType {
                    type_id: mem::replace(&mut field.type_id, node.clone()),
                    type_wrappers: field.type_wrappers.clone(),
                });
            }
        }
    }

    remove_root_plumbing(&mut graph, options);
    tracing::debug!(connections = edge_nodes.len(), "normalized relay types");
    graph
}

fn remove_root_plumbing(graph: &mut TypeGraph, options: &RelayOptions) {
    let query_id = graph.query_type.clone();
    let removed: Vec<String> = graph
        .query_type()
        .fields
        .values()
        .filter(|field| {
            let is_plumbing = options.plumbing_root_fields.contains(&field.name)
                && graph.type_of(&field.type_id).is_relay_type;
            let is_self_reference =
                options.remove_self_referencing_root_fields && field.type_id == query_id;
            is_plumbing || is_self_reference
        })
        .map(|field| field.name.clone())
        .collect();

    if let Some(query) = graph.types.get_mut(&query_id) {
        for name in removed {
            tracing::trace!(field = %name, "removed relay plumbing from query root");
            query.fields.shift_remove(&name);
        }
    }
}
