//! Edge (synapse) row in the parameter tables.

use serde::{Deserialize, Serialize};

use super::{NodeIndex, ParamMap, Value};

/// Opaque edge identifier. Unique across the network, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeIndex(pub u64);

impl std::fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One directed synapse row.
///
/// `pre_index`/`post_index` reference the connected nodes' global indices.
/// Writable attributes (conductances, time constants, propagated
/// `pre_*`/`post_*` columns) live in `params`; the synapse type label and
/// endpoint indices are structural and read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub index: EdgeIndex,
    pub pre_index: NodeIndex,
    pub post_index: NodeIndex,
    pub synapse_type: String,
    pub params: ParamMap,
}

/// Structural edge columns: readable, never writable.
pub const EDGE_STRUCTURAL_COLUMNS: [&str; 3] = ["pre_index", "post_index", "synapse_type"];

impl Edge {
    pub fn new(
        index: EdgeIndex,
        pre_index: NodeIndex,
        post_index: NodeIndex,
        synapse_type: impl Into<String>,
    ) -> Self {
        Self {
            index,
            pre_index,
            post_index,
            synapse_type: synapse_type.into(),
            params: ParamMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn is_structural_column(key: &str) -> bool {
        EDGE_STRUCTURAL_COLUMNS.contains(&key)
    }

    /// Whether this row's synapse variant defines the attribute.
    pub fn defines(&self, key: &str) -> bool {
        Self::is_structural_column(key) || self.params.contains_key(key)
    }

    /// Resolve an attribute to its value.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "pre_index" => return Some(Value::Int(self.pre_index.0 as i64)),
            "post_index" => return Some(Value::Int(self.post_index.0 as i64)),
            "synapse_type" => return Some(Value::String(self.synapse_type.clone())),
            _ => {}
        }
        self.params.get(key).cloned()
    }

    /// Overwrite a writable attribute. Returns false if `params` does not
    /// define it.
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        match self.params.get_mut(key) {
            Some(v) => {
                *v = value;
                true
            }
            None => false,
        }
    }
}
