//! End-to-end tests for named groups.

use neurite_rs::model::params;
use neurite_rs::{EdgeIndex, Error, Network, NetworkBuilder, NodeIndex, Value};

/// Six single-compartment cells, no synapses unless a test adds them.
fn six_cell_net() -> Network {
    let mut b = NetworkBuilder::new();
    for c in 0..6u64 {
        let n = b.add_node(c, 0, 0);
        b.set_node_param(n, "radius", 1.0).unwrap();
    }
    b.build()
}

// ============================================================================
// 1. Membership is a set union across repeated add_to_group calls
// ============================================================================

#[test]
fn test_group_membership_unions() {
    let net = six_cell_net();

    net.select_nodes([NodeIndex(0), NodeIndex(3)]).unwrap().add_to_group("exc");
    net.select_nodes([NodeIndex(3), NodeIndex(5)]).unwrap().add_to_group("exc");

    assert_eq!(
        net.group("exc").unwrap().nodes,
        vec![NodeIndex(0), NodeIndex(3), NodeIndex(5)]
    );
}

// ============================================================================
// 2. Group membership feeds back into selection
// ============================================================================

#[test]
fn test_group_reselection_scopes_set() {
    let net = six_cell_net();

    net.select_nodes([NodeIndex(1), NodeIndex(4)]).unwrap().add_to_group("inh");
    net.select_group("inh").unwrap().set("radius", 0.5).unwrap();

    let radii = net.node_column("radius").unwrap();
    assert_eq!(
        radii,
        vec![
            Value::Float(1.0),
            Value::Float(0.5),
            Value::Float(1.0),
            Value::Float(1.0),
            Value::Float(0.5),
            Value::Float(1.0),
        ]
    );
}

// ============================================================================
// 3. Reading an unregistered group fails
// ============================================================================

#[test]
fn test_unknown_group() {
    let net = six_cell_net();
    assert!(matches!(net.group("nope"), Err(Error::UnknownGroup(_))));
    assert!(net.select_group("nope").is_err());
}

// ============================================================================
// 4. A group can hold node and edge indices at once
// ============================================================================

#[test]
fn test_group_holds_nodes_and_edges() {
    let mut b = NetworkBuilder::new();
    let n0 = b.add_node(0, 0, 0);
    let n1 = b.add_node(1, 0, 0);
    b.connect(n0, n1, "Ionotropic", params([("gS", 1e-4)])).unwrap();
    let net = b.build();

    net.select(Some(vec![n0]), Some(vec![EdgeIndex(0)]))
        .unwrap()
        .add_to_group("soma_and_input");

    let group = net.group("soma_and_input").unwrap();
    assert_eq!(group.nodes, vec![n0]);
    assert_eq!(group.edges, vec![EdgeIndex(0)]);
}

// ============================================================================
// 5. Group names report in registration order
// ============================================================================

#[test]
fn test_group_names_registration_order() {
    let net = six_cell_net();

    net.select_nodes([NodeIndex(2)]).unwrap().add_to_group("b");
    net.select_nodes([NodeIndex(0)]).unwrap().add_to_group("a");
    net.select_nodes([NodeIndex(1)]).unwrap().add_to_group("b");

    assert_eq!(net.group_names(), vec!["b".to_string(), "a".to_string()]);
}
