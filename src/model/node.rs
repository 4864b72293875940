//! Node (compartment) row in the parameter tables.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{ParamMap, Value};

/// Opaque node identifier. Unique across the network, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub u64);

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One compartment row.
///
/// A node carries its structural position (which cell, which branch within
/// that cell, which compartment within that branch), free-form scalar
/// parameters, and the membrane mechanisms inserted into it. Mechanism
/// presence is keyed by name; each mechanism brings its own namespaced
/// parameters (e.g. the `HH` mechanism defines `HH_gNa`, `HH_gK`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub index: NodeIndex,
    pub cell_index: u64,
    pub branch_index: u64,
    pub comp_index: u64,
    pub params: ParamMap,
    pub mechanisms: HashMap<String, ParamMap>,
}

/// Structural node columns: readable and propagatable, never writable.
pub const NODE_STRUCTURAL_COLUMNS: [&str; 3] =
    ["global_cell_index", "global_branch_index", "global_comp_index"];

impl Node {
    pub fn new(index: NodeIndex, cell_index: u64, branch_index: u64, comp_index: u64) -> Self {
        Self {
            index,
            cell_index,
            branch_index,
            comp_index,
            params: ParamMap::new(),
            mechanisms: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_mechanism(mut self, name: impl Into<String>, params: ParamMap) -> Self {
        self.mechanisms.insert(name.into(), params);
        self
    }

    pub fn has_mechanism(&self, name: &str) -> bool {
        self.mechanisms.contains_key(name)
    }

    pub fn is_structural_column(key: &str) -> bool {
        NODE_STRUCTURAL_COLUMNS.contains(&key)
    }

    /// Whether this row's variant defines the attribute, at any stratum:
    /// structural column, plain parameter, or an inserted mechanism's
    /// parameter.
    pub fn defines(&self, key: &str) -> bool {
        Self::is_structural_column(key)
            || self.params.contains_key(key)
            || self.mechanisms.values().any(|m| m.contains_key(key))
    }

    /// Resolve an attribute to its value, whichever stratum defines it.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "global_cell_index" => return Some(Value::Int(self.cell_index as i64)),
            "global_branch_index" => return Some(Value::Int(self.branch_index as i64)),
            "global_comp_index" => return Some(Value::Int(self.comp_index as i64)),
            _ => {}
        }
        if let Some(v) = self.params.get(key) {
            return Some(v.clone());
        }
        self.mechanisms.values().find_map(|m| m.get(key).cloned())
    }

    /// Overwrite an attribute on a writable stratum. Returns false if no
    /// writable stratum defines it (structural columns are not writable).
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        if let Some(v) = self.params.get_mut(key) {
            *v = value;
            return true;
        }
        for mech in self.mechanisms.values_mut() {
            if let Some(v) = mech.get_mut(key) {
                *v = value;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::params;

    #[test]
    fn test_attribute_strata() {
        let node = Node::new(NodeIndex(7), 2, 0, 3)
            .with_param("radius", 1.0)
            .with_mechanism("HH", params([("HH_gNa", 0.12)]));

        assert_eq!(node.get("global_cell_index"), Some(Value::Int(2)));
        assert_eq!(node.get("radius"), Some(Value::Float(1.0)));
        assert_eq!(node.get("HH_gNa"), Some(Value::Float(0.12)));
        assert_eq!(node.get("gS"), None);
        assert!(node.defines("global_comp_index"));
        assert!(!node.defines("gS"));
    }

    #[test]
    fn test_set_skips_structural() {
        let mut node = Node::new(NodeIndex(0), 0, 0, 0).with_param("radius", 1.0);
        assert!(node.set("radius", Value::Float(2.5)));
        assert_eq!(node.get("radius"), Some(Value::Float(2.5)));
        assert!(!node.set("global_cell_index", Value::Int(9)));
        assert_eq!(node.cell_index, 0);
    }

    #[test]
    fn test_set_reaches_mechanism_params() {
        let mut node =
            Node::new(NodeIndex(0), 0, 0, 0).with_mechanism("HH", params([("HH_gNa", 0.12)]));
        assert!(node.set("HH_gNa", Value::Float(0.2)));
        assert_eq!(node.get("HH_gNa"), Some(Value::Float(0.2)));
    }
}
