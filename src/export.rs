//! JSON snapshot interchange — serialize the tables for the engine.
//!
//! The external engine owns construction and simulation; this module gives
//! it a faithful copy of the two tables (plus group membership) to consume
//! or to hand back. Import re-runs the construction-time validation, so a
//! snapshot is checked the same way a built network is.
//!
//! ```text
//! Network → snapshot() → serde_json → file / wire
//!   → from_json() → validated Network
//! ```

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::groups::Group;
use crate::model::{Edge, Node};
use crate::tables::{EdgeTable, EntityKind, NodeTable};
use crate::{Error, Network, Result};

/// A value copy of both tables and the group registry, in row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub groups: Vec<(String, Group)>,
}

impl Network {
    /// Clone the live tables into a snapshot. Row order is table order.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            nodes: self.inner.nodes.read().iter().cloned().collect(),
            edges: self.inner.edges.read().iter().cloned().collect(),
            groups: self.inner.groups.read().entries(),
        }
    }

    /// Rebuild a network from a snapshot, re-validating every invariant:
    /// unique indices, resolvable edge endpoints, group members that exist.
    pub fn from_snapshot(snapshot: NetworkSnapshot) -> Result<Self> {
        let mut nodes = NodeTable::new();
        for node in snapshot.nodes {
            nodes.insert(node)?;
        }

        let mut edges = EdgeTable::new();
        for edge in snapshot.edges {
            for endpoint in [edge.pre_index, edge.post_index] {
                if !nodes.contains(endpoint) {
                    return Err(Error::BrokenReference {
                        edge: edge.index.0,
                        node: endpoint.0,
                    });
                }
            }
            edges.insert(edge)?;
        }

        let net = Network::from_tables(nodes, edges);
        {
            let node_table = net.inner.nodes.read();
            let edge_table = net.inner.edges.read();
            let mut registry = net.inner.groups.write();
            for (name, group) in snapshot.groups {
                for &i in &group.nodes {
                    if !node_table.contains(i) {
                        return Err(Error::UnknownIndex {
                            table: EntityKind::Nodes,
                            index: i.0,
                        });
                    }
                }
                for &i in &group.edges {
                    if !edge_table.contains(i) {
                        return Err(Error::UnknownIndex {
                            table: EntityKind::Edges,
                            index: i.0,
                        });
                    }
                }
                registry.add(&name, &group.nodes, &group.edges);
            }
        }
        Ok(net)
    }

    /// Write the snapshot as pretty-printed JSON.
    pub fn export_json(&self, writer: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.snapshot())?;
        Ok(())
    }

    /// Parse and validate a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_snapshot(serde_json::from_str(json)?)
    }
}
