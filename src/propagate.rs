//! Endpoint property propagation: node column → `pre_*`/`post_*` edge columns.

use tracing::debug;

use crate::model::{EdgeIndex, NodeIndex, Value};
use crate::tables::{EdgeTable, EntityKind, NodeTable};
use crate::{Error, Result};

/// Copy the node attribute `key` onto every edge as `pre_<key>` and
/// `post_<key>`, looked up through the edge's endpoint indices.
///
/// Resolution follows the attribute's own stratum per node (structural
/// column, plain parameter, or mechanism parameter). The whole edge table
/// is validated before the first write: an endpoint lacking the attribute
/// fails the call naming the column and the node row, and nothing is
/// mutated. Re-running overwrites the two derived columns in place; row
/// count and order are untouched.
pub(crate) fn copy_node_property_to_edges(
    nodes: &NodeTable,
    edges: &mut EdgeTable,
    key: &str,
) -> Result<()> {
    let mut resolved: Vec<(EdgeIndex, Value, Value)> = Vec::with_capacity(edges.len());
    for edge in edges.iter() {
        let endpoint_value = |node_index: NodeIndex| -> Result<Value> {
            let node = nodes.get(node_index).ok_or(Error::BrokenReference {
                edge: edge.index.0,
                node: node_index.0,
            })?;
            node.get(key).ok_or_else(|| Error::UnknownAttribute {
                table: EntityKind::Nodes,
                attribute: key.to_string(),
                index: node_index.0,
            })
        };
        let pre = endpoint_value(edge.pre_index)?;
        let post = endpoint_value(edge.post_index)?;
        resolved.push((edge.index, pre, post));
    }

    let pre_key = format!("pre_{key}");
    let post_key = format!("post_{key}");
    let count = resolved.len();
    for (index, pre, post) in resolved {
        if let Some(edge) = edges.get_mut(index) {
            edge.params.insert(pre_key.clone(), pre);
            edge.params.insert(post_key.clone(), post);
        }
    }

    debug!(column = key, edges = count, "propagated node property to edges");
    Ok(())
}
