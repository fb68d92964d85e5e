//! JSON helpers for node trees.
//!
//! Serde already provides (de)serialization for [`Node`]. These helpers fix
//! the error type to [`FlatpathError`] for callers that load trees from text.

use crate::error::FlatpathResult;
use crate::node::Node;

/// Deserialize a tree from JSON text.
pub fn node_from_json(s: &str) -> FlatpathResult<Node> {
    Ok(serde_json::from_str(s)?)
}

/// Serialize a tree to pretty JSON.
pub fn node_to_json_pretty(node: &Node) -> FlatpathResult<String> {
    Ok(serde_json::to_string_pretty(node)?)
}
