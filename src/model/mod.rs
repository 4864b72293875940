//! # Entity Model
//!
//! Clean DTOs for the two parameter tables: `Node` (compartment) rows and
//! `Edge` (synapse) rows, with the runtime-typed `Value` they store.
//! These types cross every boundary: construction ↔ tables ↔ views ↔ engine.
//!
//! Design rule: this module is pure data — no locking, no I/O, no state.

pub mod node;
pub mod edge;
pub mod value;
pub mod param_map;

pub use node::{Node, NodeIndex};
pub use edge::{Edge, EdgeIndex};
pub use value::Value;
pub use param_map::{ParamMap, params};
