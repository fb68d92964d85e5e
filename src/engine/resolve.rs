//! Path resolution.

use crate::node::{Lookup, Node};
use crate::path::{segments, Segment};

/// Resolves `path` against `root`.
///
/// Stops at the first step with no own child and reports `NotFound`.
pub(crate) fn read<'a>(path: &str, root: &'a Node) -> Lookup<'a> {
    let mut current = root;
    for segment in segments(path) {
        let next = match (segment, current) {
            (Segment::Index { index, .. }, Node::Array(_)) => current.element(index),
            // Objects are keyed by text, numeric or not.
            (_, Node::Object(_)) => current.member(segment.raw()),
            _ => Lookup::NotFound,
        };
        match next {
            Lookup::Present(node) => current = node,
            Lookup::NotFound => return Lookup::NotFound,
        }
    }
    Lookup::Present(current)
}
