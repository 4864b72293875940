//! End-to-end tests for the selection/overlay path.
//!
//! Each test builds a small network through `NetworkBuilder`, then
//! exercises `select()` / `View::set()` against the live tables.

use neurite_rs::model::params;
use neurite_rs::{EdgeIndex, EntityKind, Error, Network, NetworkBuilder, NodeIndex, Value};
use pretty_assertions::assert_eq;

/// Four single-compartment cells; HH inserted into the first two; the
/// first two cells fully connected onto the last two (4 edges).
fn four_cell_net() -> Network {
    let mut b = NetworkBuilder::new();
    let cells: Vec<_> = (0..4u64).map(|c| b.add_node(c, 0, 0)).collect();
    for &n in &cells {
        b.set_node_param(n, "radius", 1.0).unwrap();
    }
    for &n in &cells[..2] {
        b.insert_mechanism(n, "HH", params([("HH_gNa", 0.12), ("HH_gK", 0.036)]))
            .unwrap();
    }
    b.connect_all(&cells[..2], &cells[2..], "Ionotropic", &params([("gS", 1e-4)]))
        .unwrap();
    b.build()
}

// ============================================================================
// 1. set() changes exactly the selected rows, nothing else
// ============================================================================

#[test]
fn test_set_changes_exactly_selected_edges() {
    let net = four_cell_net();

    net.select(None, Some(vec![EdgeIndex(0), EdgeIndex(2)]))
        .unwrap()
        .set("gS", 0.23)
        .unwrap();

    let gs = net.edge_column("gS").unwrap();
    assert_eq!(
        gs,
        vec![
            Value::Float(0.23),
            Value::Float(1e-4),
            Value::Float(0.23),
            Value::Float(1e-4),
        ]
    );
}

// ============================================================================
// 2. Repeated set() calls compose: last view containing a row wins
// ============================================================================

#[test]
fn test_overlapping_sets_compose() {
    let net = four_cell_net();

    net.select_edges([EdgeIndex(0), EdgeIndex(1)]).unwrap().set("gS", 0.1).unwrap();
    net.select_edges([EdgeIndex(1), EdgeIndex(2)]).unwrap().set("gS", 0.2).unwrap();

    let gs = net.edge_column("gS").unwrap();
    assert_eq!(
        gs,
        vec![
            Value::Float(0.1),
            Value::Float(0.2),
            Value::Float(0.2),
            Value::Float(1e-4),
        ]
    );
}

// ============================================================================
// 3. select() with no arguments is the identity selection
// ============================================================================

#[test]
fn test_default_selection_is_identity() {
    let net = four_cell_net();

    let view = net.select(None, None).unwrap();
    assert_eq!(view.node_indices(), net.node_indices().as_slice());
    assert_eq!(view.edge_indices(), net.edge_indices().as_slice());

    let all = net.select_all();
    assert_eq!(all.node_indices(), view.node_indices());
    assert_eq!(all.edge_indices(), view.edge_indices());
}

// ============================================================================
// 4. Out-of-range indices fail, identifying table and index
// ============================================================================

#[test]
fn test_unknown_index_fails() {
    let net = four_cell_net();

    let err = net.select(Some(vec![NodeIndex(99)]), None).unwrap_err();
    assert!(matches!(err, Error::UnknownIndex { table: EntityKind::Nodes, index: 99 }));

    let err = net.select(None, Some(vec![EdgeIndex(0), EdgeIndex(42)])).unwrap_err();
    assert!(matches!(err, Error::UnknownIndex { table: EntityKind::Edges, index: 42 }));
}

// ============================================================================
// 5. Duplicate indices collapse to a single selection of that row
// ============================================================================

#[test]
fn test_duplicate_indices_collapse() {
    let net = four_cell_net();

    let view = net
        .select_edges([EdgeIndex(1), EdgeIndex(1), EdgeIndex(0), EdgeIndex(1)])
        .unwrap();
    assert_eq!(view.edge_indices(), &[EdgeIndex(1), EdgeIndex(0)]);

    view.set("gS", 0.5).unwrap();
    let gs = net.edge_column("gS").unwrap();
    assert_eq!(
        gs,
        vec![
            Value::Float(0.5),
            Value::Float(0.5),
            Value::Float(1e-4),
            Value::Float(1e-4),
        ]
    );
}

// ============================================================================
// 6. Attribute undefined for every selected row: error, no mutation
// ============================================================================

#[test]
fn test_unknown_attribute_for_selection() {
    let net = four_cell_net();
    let before = net.edges();

    let err = net.select_all().set("does_not_exist", 1.0).unwrap_err();
    assert!(matches!(err, Error::UnknownAttributeForSelection { .. }));
    assert_eq!(net.edges(), before);
}

// ============================================================================
// 7. Mixed selection: value lands on defining rows only
// ============================================================================

#[test]
fn test_mixed_selection_applies_to_defining_rows() {
    let net = four_cell_net();

    // All four nodes selected; only the first two carry HH.
    net.select(Some(net.node_indices()), Some(vec![])).unwrap().set("HH_gNa", 0.2).unwrap();

    assert_eq!(net.node(NodeIndex(0)).unwrap().get("HH_gNa"), Some(Value::Float(0.2)));
    assert_eq!(net.node(NodeIndex(1)).unwrap().get("HH_gNa"), Some(Value::Float(0.2)));
    assert_eq!(net.node(NodeIndex(2)).unwrap().get("HH_gNa"), None);
    assert_eq!(net.node(NodeIndex(3)).unwrap().get("HH_gNa"), None);
}

// ============================================================================
// 8. Structural columns are rejected up front
// ============================================================================

#[test]
fn test_structural_attributes_read_only() {
    let net = four_cell_net();

    for attribute in ["global_cell_index", "pre_index", "synapse_type"] {
        let err = net.select_all().set(attribute, 9i64).unwrap_err();
        assert!(matches!(err, Error::ReadOnlyAttribute { .. }), "{attribute}");
    }
}

// ============================================================================
// 9. Node and edge subsets are independent
// ============================================================================

#[test]
fn test_subsets_are_independent() {
    let net = four_cell_net();

    // Selecting a node does not pull in its incident edges: no edge is in
    // this view, so an edge-only attribute resolves nowhere.
    let err = net.select_nodes([NodeIndex(0)]).unwrap().set("gS", 0.23).unwrap_err();
    assert!(matches!(err, Error::UnknownAttributeForSelection { .. }));
    assert_eq!(
        net.edge_column("gS").unwrap(),
        vec![Value::Float(1e-4); 4]
    );
}

// ============================================================================
// 10. Identity view writes a node attribute without touching edges
// ============================================================================

#[test]
fn test_identity_view_sets_node_attribute() {
    let net = four_cell_net();

    net.select_all().set("radius", 2.5).unwrap();

    assert_eq!(net.node_column("radius").unwrap(), vec![Value::Float(2.5); 4]);
    assert_eq!(net.edge_column("gS").unwrap(), vec![Value::Float(1e-4); 4]);
}

// ============================================================================
// 11. Empty explicit selection is valid but cannot be set through
// ============================================================================

#[test]
fn test_empty_selection() {
    let net = four_cell_net();

    let view = net.select(Some(vec![]), Some(vec![])).unwrap();
    assert!(view.is_empty());
    let err = view.set("gS", 0.23).unwrap_err();
    assert!(matches!(err, Error::UnknownAttributeForSelection { .. }));
}
