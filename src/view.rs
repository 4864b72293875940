//! Selection views — the scoping object for bulk mutation.

use tracing::debug;

use crate::model::{Edge, EdgeIndex, Node, NodeIndex, Value};
use crate::tables::EntityKind;
use crate::{Error, Network, Result};

/// An ephemeral selection of node and/or edge rows against the live tables.
///
/// A view is a filter, not a snapshot: it stores validated indices and a
/// handle to the network, and reads and writes go to the current table
/// contents. Node and edge subsets are independent — selecting nodes does
/// not pull in their incident edges, nor the reverse.
#[derive(Debug, Clone)]
pub struct View {
    net: Network,
    nodes: Vec<NodeIndex>,
    edges: Vec<EdgeIndex>,
}

impl View {
    /// Validate and deduplicate the requested subsets.
    ///
    /// `None` for both subsets is the identity selection (full tables in
    /// row order); `None` for one subset while the other is given selects
    /// nothing from that table. Fails on the first index absent from its
    /// table, before a view exists.
    pub(crate) fn new(
        net: Network,
        nodes: Option<Vec<NodeIndex>>,
        edges: Option<Vec<EdgeIndex>>,
    ) -> Result<Self> {
        if nodes.is_none() && edges.is_none() {
            let node_subset = net.inner.nodes.read().indices().to_vec();
            let edge_subset = net.inner.edges.read().indices().to_vec();
            return Ok(Self { net, nodes: node_subset, edges: edge_subset });
        }

        let node_subset = {
            let table = net.inner.nodes.read();
            let mut subset = Vec::new();
            for index in nodes.unwrap_or_default() {
                if !table.contains(index) {
                    return Err(Error::UnknownIndex {
                        table: EntityKind::Nodes,
                        index: index.0,
                    });
                }
                if !subset.contains(&index) {
                    subset.push(index);
                }
            }
            subset
        };
        let edge_subset = {
            let table = net.inner.edges.read();
            let mut subset = Vec::new();
            for index in edges.unwrap_or_default() {
                if !table.contains(index) {
                    return Err(Error::UnknownIndex {
                        table: EntityKind::Edges,
                        index: index.0,
                    });
                }
                if !subset.contains(&index) {
                    subset.push(index);
                }
            }
            subset
        };
        Ok(Self { net, nodes: node_subset, edges: edge_subset })
    }

    /// Build a view from indices already known to exist (group membership,
    /// full-table selections).
    pub(crate) fn preverified(net: Network, nodes: Vec<NodeIndex>, edges: Vec<EdgeIndex>) -> Self {
        Self { net, nodes, edges }
    }

    /// Selected node indices, deduplicated, in selection order.
    pub fn node_indices(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Selected edge indices, deduplicated, in selection order.
    pub fn edge_indices(&self) -> &[EdgeIndex] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Overwrite `attribute` with `value` for exactly the selected rows
    /// that define it.
    ///
    /// Validation precedes mutation: structural columns are rejected, and
    /// if no selected row defines the attribute the call fails without
    /// writing anything. Selected rows whose variant lacks the attribute
    /// are skipped (partial-apply policy); unselected rows are never
    /// touched.
    pub fn set(&self, attribute: &str, value: impl Into<Value>) -> Result<()> {
        if Node::is_structural_column(attribute) || Edge::is_structural_column(attribute) {
            return Err(Error::ReadOnlyAttribute { attribute: attribute.to_string() });
        }
        let value = value.into();

        let mut nodes = self.net.inner.nodes.write();
        let mut edges = self.net.inner.edges.write();

        // Count defining rows before the first write. View indices were
        // validated against the live tables and rows are never removed,
        // so lookups cannot miss.
        let node_hits = self
            .nodes
            .iter()
            .filter(|&&i| nodes.get(i).is_some_and(|n| n.defines(attribute)))
            .count();
        let edge_hits = self
            .edges
            .iter()
            .filter(|&&i| edges.get(i).is_some_and(|e| e.defines(attribute)))
            .count();
        if node_hits + edge_hits == 0 {
            return Err(Error::UnknownAttributeForSelection {
                attribute: attribute.to_string(),
            });
        }

        for &i in &self.nodes {
            if let Some(node) = nodes.get_mut(i) {
                node.set(attribute, value.clone());
            }
        }
        for &i in &self.edges {
            if let Some(edge) = edges.get_mut(i) {
                edge.set(attribute, value.clone());
            }
        }

        debug!(
            attribute,
            nodes = node_hits,
            edges = edge_hits,
            "applied parameter overlay"
        );
        Ok(())
    }

    /// Record this view's indices as members of the named group, creating
    /// the group if needed. Repeated calls are additive (set union).
    pub fn add_to_group(&self, name: &str) {
        let (added_nodes, added_edges) =
            self.net.inner.groups.write().add(name, &self.nodes, &self.edges);
        debug!(group = name, added_nodes, added_edges, "extended group");
    }
}
