//! Named reusable index sets.
//!
//! A group records node and/or edge indices under a name so a selection can
//! be rebuilt later without re-running the predicate that produced it.
//! Groups carry no attributes of their own; membership is many-to-many.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::{EdgeIndex, NodeIndex};

/// Membership of one named group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub nodes: Vec<NodeIndex>,
    pub edges: Vec<EdgeIndex>,
}

impl Group {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// All groups of one network, in registration order.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: HashMap<String, Group>,
    order: Vec<String>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union the given indices into the named group, creating it if absent.
    /// Membership is a set: duplicates are skipped, first-insertion order is
    /// preserved. Returns how many node and edge indices were actually new.
    pub fn add(&mut self, name: &str, nodes: &[NodeIndex], edges: &[EdgeIndex]) -> (usize, usize) {
        if !self.groups.contains_key(name) {
            self.order.push(name.to_string());
        }
        let group = self.groups.entry(name.to_string()).or_default();

        let mut added_nodes = 0;
        for &i in nodes {
            if !group.nodes.contains(&i) {
                group.nodes.push(i);
                added_nodes += 1;
            }
        }
        let mut added_edges = 0;
        for &i in edges {
            if !group.edges.contains(&i) {
                group.edges.push(i);
                added_edges += 1;
            }
        }
        (added_nodes, added_edges)
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Group names in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// (name, membership) pairs in registration order.
    pub fn entries(&self) -> Vec<(String, Group)> {
        self.order
            .iter()
            .map(|name| (name.clone(), self.groups[name].clone()))
            .collect()
    }
}
