//! ParamMap — the named scalar parameters on a node or edge row.

use hashbrown::HashMap;
use super::Value;

/// A map of parameter names to values.
pub type ParamMap = HashMap<String, Value>;

/// Build a `ParamMap` from (name, value) pairs.
///
/// ```rust
/// use neurite_rs::model::{params, Value};
///
/// let p = params([("gS", 1e-4), ("tau", 5.0)]);
/// assert_eq!(p.get("tau"), Some(&Value::Float(5.0)));
/// ```
pub fn params<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> ParamMap
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
