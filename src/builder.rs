//! Construction path — how the engine populates the tables.
//!
//! The builder only inserts rows: it computes no morphology and connects no
//! topology beyond recording the endpoints the caller names. Indices come
//! from monotone counters and are never reused; `connect` verifies both
//! endpoints exist at call time, which is what makes a dangling endpoint
//! unreachable after construction.

use tracing::debug;

use crate::model::{Edge, EdgeIndex, Node, NodeIndex, ParamMap, Value};
use crate::tables::{EdgeTable, EntityKind, NodeTable};
use crate::{Error, Network, Result};

/// Incrementally builds the node and edge tables, then seals them into a
/// [`Network`].
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: NodeTable,
    edges: EdgeTable,
    next_node: u64,
    next_edge: u64,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node row at the given structural position.
    pub fn add_node(&mut self, cell_index: u64, branch_index: u64, comp_index: u64) -> NodeIndex {
        let index = NodeIndex(self.next_node);
        self.next_node += 1;
        if self.nodes.insert(Node::new(index, cell_index, branch_index, comp_index)).is_err() {
            unreachable!("node indices are assigned from a monotone counter");
        }
        index
    }

    /// Define or overwrite a construction-time parameter on a node.
    pub fn set_node_param(
        &mut self,
        node: NodeIndex,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<()> {
        let key = key.into();
        reject_structural_node_key(&key)?;
        let row = self.nodes.get_mut(node).ok_or(Error::UnknownIndex {
            table: EntityKind::Nodes,
            index: node.0,
        })?;
        row.params.insert(key, value.into());
        Ok(())
    }

    /// Mark a mechanism as inserted into a node, attaching its namespaced
    /// parameters. Re-inserting the same mechanism overwrites its
    /// parameters.
    pub fn insert_mechanism(
        &mut self,
        node: NodeIndex,
        mechanism: impl Into<String>,
        params: ParamMap,
    ) -> Result<()> {
        for key in params.keys() {
            reject_structural_node_key(key)?;
        }
        let row = self.nodes.get_mut(node).ok_or(Error::UnknownIndex {
            table: EntityKind::Nodes,
            index: node.0,
        })?;
        row.mechanisms.insert(mechanism.into(), params);
        Ok(())
    }

    /// Append a directed synapse row from `pre` to `post`. Both endpoints
    /// must already exist.
    pub fn connect(
        &mut self,
        pre: NodeIndex,
        post: NodeIndex,
        synapse_type: impl Into<String>,
        params: ParamMap,
    ) -> Result<EdgeIndex> {
        for endpoint in [pre, post] {
            if !self.nodes.contains(endpoint) {
                return Err(Error::UnknownIndex {
                    table: EntityKind::Nodes,
                    index: endpoint.0,
                });
            }
        }
        for key in params.keys() {
            if Edge::is_structural_column(key) {
                return Err(Error::ReadOnlyAttribute { attribute: key.clone() });
            }
        }
        let index = EdgeIndex(self.next_edge);
        self.next_edge += 1;
        let mut edge = Edge::new(index, pre, post, synapse_type);
        edge.params = params;
        if self.edges.insert(edge).is_err() {
            unreachable!("edge indices are assigned from a monotone counter");
        }
        Ok(index)
    }

    /// Densely connect every `pre` node to every `post` node with the same
    /// synapse type and starting parameters. Edges are created in pre-major
    /// order; returns their indices in that order.
    pub fn connect_all(
        &mut self,
        pre_nodes: &[NodeIndex],
        post_nodes: &[NodeIndex],
        synapse_type: &str,
        params: &ParamMap,
    ) -> Result<Vec<EdgeIndex>> {
        let mut created = Vec::with_capacity(pre_nodes.len() * post_nodes.len());
        for &pre in pre_nodes {
            for &post in post_nodes {
                created.push(self.connect(pre, post, synapse_type, params.clone())?);
            }
        }
        Ok(created)
    }

    /// Seal the tables into a network handle.
    pub fn build(self) -> Network {
        debug!(nodes = self.nodes.len(), edges = self.edges.len(), "built network tables");
        Network::from_tables(self.nodes, self.edges)
    }
}

fn reject_structural_node_key(key: &str) -> Result<()> {
    if Node::is_structural_column(key) {
        return Err(Error::ReadOnlyAttribute { attribute: key.to_string() });
    }
    Ok(())
}
