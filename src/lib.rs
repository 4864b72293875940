//! # neurite-rs — Parameter Tables for Multicompartment Network Models
//!
//! The attribute-overlay layer of a compartment simulator: two relational
//! tables (nodes = compartments, edges = synapses) plus the sanctioned
//! mutation path over them — selection views, bulk `set`, endpoint property
//! propagation, and named groups. The simulation engine populates the
//! tables at construction time and consumes them at solve time; everything
//! numerical lives in the engine, not here.
//!
//! ## Design Principles
//!
//! 1. **Explicit handle**: a [`Network`] owns the two tables — no hidden
//!    process-wide state
//! 2. **Clean DTOs**: [`Node`], [`Edge`], [`Value`] cross all boundaries
//! 3. **Fail-fast mutation**: every `set` validates the whole selection
//!    before the first write — no partial writes, no spillover
//! 4. **Views filter, never snapshot**: a selection scopes reads and writes
//!    to the live tables
//!
//! ## Quick Start
//!
//! ```rust
//! use neurite_rs::{NetworkBuilder, Value};
//! use neurite_rs::model::params;
//!
//! # fn main() -> neurite_rs::Result<()> {
//! // Two single-compartment cells joined by one synapse.
//! let mut builder = NetworkBuilder::new();
//! let pre = builder.add_node(0, 0, 0);
//! let post = builder.add_node(1, 0, 0);
//! builder.set_node_param(pre, "radius", 1.0)?;
//! builder.set_node_param(post, "radius", 1.0)?;
//! builder.connect(pre, post, "Ionotropic", params([("gS", 1e-4)]))?;
//! let net = builder.build();
//!
//! // Derive per-edge endpoint columns, filter, and overlay a value.
//! net.copy_node_property_to_edges("global_cell_index")?;
//! let from_cell_0 = net.edges_where(|e| {
//!     e.get("pre_global_cell_index") == Some(Value::Int(0))
//! });
//! net.select(None, Some(from_cell_0))?.set("gS", 0.23)?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod tables;
pub mod view;
pub mod groups;
pub mod builder;
pub mod export;

mod propagate;

use std::sync::Arc;

use parking_lot::RwLock;

use groups::GroupRegistry;
use tables::{EdgeTable, NodeTable};

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Edge, EdgeIndex, Node, NodeIndex, ParamMap, Value};

// ============================================================================
// Re-exports: Tables, views, groups
// ============================================================================

pub use builder::NetworkBuilder;
pub use export::NetworkSnapshot;
pub use groups::Group;
pub use tables::EntityKind;
pub use view::View;

// ============================================================================
// Top-level Network handle
// ============================================================================

/// The primary entry point. A `Network` owns the node and edge tables and
/// the group registry, and hands out selection views.
///
/// The handle is cheaply cloneable; all clones share the same tables. The
/// intended use is single-threaded and sequential — if downstream work is
/// parallelized, the tables must be treated as read-only for its duration.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) inner: Arc<NetworkInner>,
}

#[derive(Debug)]
pub(crate) struct NetworkInner {
    pub(crate) nodes: RwLock<NodeTable>,
    pub(crate) edges: RwLock<EdgeTable>,
    pub(crate) groups: RwLock<GroupRegistry>,
}

impl Network {
    pub(crate) fn from_tables(nodes: NodeTable, edges: EdgeTable) -> Self {
        Self {
            inner: Arc::new(NetworkInner {
                nodes: RwLock::new(nodes),
                edges: RwLock::new(edges),
                groups: RwLock::new(GroupRegistry::new()),
            }),
        }
    }

    // ========================================================================
    // Table reads
    // ========================================================================

    pub fn node_count(&self) -> usize {
        self.inner.nodes.read().len()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edges.read().len()
    }

    /// Value copy of one node row.
    pub fn node(&self, index: NodeIndex) -> Result<Node> {
        self.inner.nodes.read().get(index).cloned().ok_or(Error::UnknownIndex {
            table: EntityKind::Nodes,
            index: index.0,
        })
    }

    /// Value copy of one edge row.
    pub fn edge(&self, index: EdgeIndex) -> Result<Edge> {
        self.inner.edges.read().get(index).cloned().ok_or(Error::UnknownIndex {
            table: EntityKind::Edges,
            index: index.0,
        })
    }

    /// All node rows in table order.
    pub fn nodes(&self) -> Vec<Node> {
        self.inner.nodes.read().iter().cloned().collect()
    }

    /// All edge rows in table order.
    pub fn edges(&self) -> Vec<Edge> {
        self.inner.edges.read().iter().cloned().collect()
    }

    pub fn node_indices(&self) -> Vec<NodeIndex> {
        self.inner.nodes.read().indices().to_vec()
    }

    pub fn edge_indices(&self) -> Vec<EdgeIndex> {
        self.inner.edges.read().indices().to_vec()
    }

    /// One node column in row order; `Null` where a row lacks the attribute.
    pub fn node_column(&self, attribute: &str) -> Result<Vec<Value>> {
        self.inner.nodes.read().column(attribute)
    }

    /// One edge column in row order; `Null` where a row lacks the attribute.
    pub fn edge_column(&self, attribute: &str) -> Result<Vec<Value>> {
        self.inner.edges.read().column(attribute)
    }

    /// Node indices matching a predicate, in row order. The predicate sees
    /// each row; combine with [`Node::get`] for column-based filters.
    pub fn nodes_where(&self, pred: impl Fn(&Node) -> bool) -> Vec<NodeIndex> {
        self.inner.nodes.read().indices_where(pred)
    }

    /// Edge indices matching a predicate, in row order.
    pub fn edges_where(&self, pred: impl Fn(&Edge) -> bool) -> Vec<EdgeIndex> {
        self.inner.edges.read().indices_where(pred)
    }

    /// Edges leaving the given node, in table order.
    pub fn edges_from(&self, node: NodeIndex) -> Result<Vec<EdgeIndex>> {
        if !self.inner.nodes.read().contains(node) {
            return Err(Error::UnknownIndex { table: EntityKind::Nodes, index: node.0 });
        }
        Ok(self.inner.edges.read().edges_from(node))
    }

    /// Edges landing on the given node, in table order.
    pub fn edges_onto(&self, node: NodeIndex) -> Result<Vec<EdgeIndex>> {
        if !self.inner.nodes.read().contains(node) {
            return Err(Error::UnknownIndex { table: EntityKind::Nodes, index: node.0 });
        }
        Ok(self.inner.edges.read().edges_onto(node))
    }

    /// Distinct synapse type labels, sorted.
    pub fn synapse_types(&self) -> Vec<String> {
        self.inner.edges.read().synapse_types()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Build a view over the given subsets.
    ///
    /// `None` for both subsets is the identity selection (every node and
    /// every edge). `None` for one subset while the other is given selects
    /// nothing from that table — node and edge selections are independent.
    /// Indices may repeat (collapsed to one selection) and arrive in any
    /// order (preserved); any index absent from its table fails the call.
    pub fn select(
        &self,
        nodes: Option<Vec<NodeIndex>>,
        edges: Option<Vec<EdgeIndex>>,
    ) -> Result<View> {
        View::new(self.clone(), nodes, edges)
    }

    /// The identity selection: every node and every edge.
    pub fn select_all(&self) -> View {
        View::preverified(
            self.clone(),
            self.inner.nodes.read().indices().to_vec(),
            self.inner.edges.read().indices().to_vec(),
        )
    }

    /// Select only the given nodes.
    pub fn select_nodes(&self, nodes: impl IntoIterator<Item = NodeIndex>) -> Result<View> {
        self.select(Some(nodes.into_iter().collect()), None)
    }

    /// Select only the given edges.
    pub fn select_edges(&self, edges: impl IntoIterator<Item = EdgeIndex>) -> Result<View> {
        self.select(None, Some(edges.into_iter().collect()))
    }

    /// Rebuild a view from a named group's current membership.
    pub fn select_group(&self, name: &str) -> Result<View> {
        let group = self.group(name)?;
        Ok(View::preverified(self.clone(), group.nodes, group.edges))
    }

    // ========================================================================
    // Property propagation
    // ========================================================================

    /// Copy the node attribute `attribute` onto every edge as
    /// `pre_<attribute>` / `post_<attribute>`, via the edge's endpoint
    /// indices. Validates the full edge table before writing; idempotent.
    pub fn copy_node_property_to_edges(&self, attribute: &str) -> Result<()> {
        let nodes = self.inner.nodes.read();
        let mut edges = self.inner.edges.write();
        propagate::copy_node_property_to_edges(&nodes, &mut edges, attribute)
    }

    // ========================================================================
    // Groups
    // ========================================================================

    /// Current membership of a named group (unique, first-insertion order).
    pub fn group(&self, name: &str) -> Result<Group> {
        self.inner
            .groups
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownGroup(name.to_string()))
    }

    /// Group names in registration order.
    pub fn group_names(&self) -> Vec<String> {
        self.inner.groups.read().names().to_vec()
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("index {index} not found in {table} table")]
    UnknownIndex { table: EntityKind, index: u64 },

    #[error("attribute '{attribute}' is not defined for {table} {index}")]
    UnknownAttribute { table: EntityKind, attribute: String, index: u64 },

    #[error("attribute '{attribute}' is not defined for any row in the selection")]
    UnknownAttributeForSelection { attribute: String },

    #[error("attribute '{attribute}' is structural and read-only")]
    ReadOnlyAttribute { attribute: String },

    #[error("edge {edge} references missing node {node}")]
    BrokenReference { edge: u64, node: u64 },

    #[error("duplicate {table} index {index}")]
    DuplicateIndex { table: EntityKind, index: u64 },

    #[error("no group named '{0}'")]
    UnknownGroup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
