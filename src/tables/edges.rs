//! Edge table: synapse rows in insertion order, with endpoint adjacency.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::{Edge, EdgeIndex, NodeIndex, Value};
use crate::{Error, Result};
use super::EntityKind;

/// Ordered store of edge rows.
///
/// Besides the keyed rows and order list, two adjacency maps track which
/// edges leave and which edges land on each node, maintained on insert.
/// Most nodes touch only a handful of synapses, hence the inline vectors.
#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    rows: HashMap<EdgeIndex, Edge>,
    order: Vec<EdgeIndex>,
    outgoing: HashMap<NodeIndex, SmallVec<[EdgeIndex; 4]>>,
    incoming: HashMap<NodeIndex, SmallVec<[EdgeIndex; 4]>>,
}

impl EdgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row. The index must not already be present. Endpoint
    /// existence is the caller's contract (the builder verifies it against
    /// the node table before constructing the edge).
    pub fn insert(&mut self, edge: Edge) -> Result<()> {
        if self.rows.contains_key(&edge.index) {
            return Err(Error::DuplicateIndex {
                table: EntityKind::Edges,
                index: edge.index.0,
            });
        }
        self.outgoing.entry(edge.pre_index).or_default().push(edge.index);
        self.incoming.entry(edge.post_index).or_default().push(edge.index);
        self.order.push(edge.index);
        self.rows.insert(edge.index, edge);
        Ok(())
    }

    pub fn get(&self, index: EdgeIndex) -> Option<&Edge> {
        self.rows.get(&index)
    }

    pub fn get_mut(&mut self, index: EdgeIndex) -> Option<&mut Edge> {
        self.rows.get_mut(&index)
    }

    pub fn contains(&self, index: EdgeIndex) -> bool {
        self.rows.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Global indices in insertion order.
    pub fn indices(&self) -> &[EdgeIndex] {
        &self.order
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.order.iter().map(|i| &self.rows[i])
    }

    /// Edges whose presynaptic endpoint is `node`, in insertion order.
    pub fn edges_from(&self, node: NodeIndex) -> Vec<EdgeIndex> {
        self.outgoing.get(&node).map(|v| v.to_vec()).unwrap_or_default()
    }

    /// Edges whose postsynaptic endpoint is `node`, in insertion order.
    pub fn edges_onto(&self, node: NodeIndex) -> Vec<EdgeIndex> {
        self.incoming.get(&node).map(|v| v.to_vec()).unwrap_or_default()
    }

    /// Distinct synapse type labels, sorted.
    pub fn synapse_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.iter().map(|e| e.synapse_type.clone()).collect();
        types.sort();
        types.dedup();
        types
    }

    /// Read a whole column in row order. Rows whose variant does not define
    /// the attribute yield `Value::Null`; a column no row defines is an
    /// error.
    pub fn column(&self, key: &str) -> Result<Vec<Value>> {
        if !self.iter().any(|e| e.defines(key)) {
            return Err(Error::UnknownAttributeForSelection { attribute: key.to_string() });
        }
        Ok(self.iter().map(|e| e.get(key).unwrap_or(Value::Null)).collect())
    }

    /// Indices of rows matching a predicate, in row order.
    pub fn indices_where(&self, pred: impl Fn(&Edge) -> bool) -> Vec<EdgeIndex> {
        self.iter().filter(|e| pred(e)).map(|e| e.index).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EdgeTable {
        let mut t = EdgeTable::new();
        t.insert(Edge::new(EdgeIndex(0), NodeIndex(0), NodeIndex(2), "Ionotropic").with_param("gS", 1e-4)).unwrap();
        t.insert(Edge::new(EdgeIndex(1), NodeIndex(0), NodeIndex(3), "Ionotropic").with_param("gS", 1e-4)).unwrap();
        t.insert(Edge::new(EdgeIndex(2), NodeIndex(1), NodeIndex(2), "Gap").with_param("gGap", 2e-5)).unwrap();
        t
    }

    #[test]
    fn test_adjacency_maintained_on_insert() {
        let t = table();
        assert_eq!(t.edges_from(NodeIndex(0)), vec![EdgeIndex(0), EdgeIndex(1)]);
        assert_eq!(t.edges_onto(NodeIndex(2)), vec![EdgeIndex(0), EdgeIndex(2)]);
        assert!(t.edges_from(NodeIndex(3)).is_empty());
    }

    #[test]
    fn test_synapse_types_sorted_dedup() {
        let t = table();
        assert_eq!(t.synapse_types(), vec!["Gap".to_string(), "Ionotropic".to_string()]);
    }

    #[test]
    fn test_column_nulls_where_variant_lacks_attribute() {
        let t = table();
        let gs = t.column("gS").unwrap();
        assert_eq!(gs, vec![Value::Float(1e-4), Value::Float(1e-4), Value::Null]);
    }

    #[test]
    fn test_insert_rejects_duplicate_index() {
        let mut t = table();
        let err = t
            .insert(Edge::new(EdgeIndex(1), NodeIndex(0), NodeIndex(1), "Ionotropic"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateIndex { table: EntityKind::Edges, index: 1 }));
    }
}
