//! Path enumeration.
//!
//! Children are visited in order. Each child's descendants are emitted before
//! the child itself, so `{a: {b: 1}}` yields `a.b` then `a`.

use tracing::debug;

use crate::config::EngineConfig;
use crate::node::Node;
use crate::path::{is_plain_key, push_index, push_key};

pub(crate) fn enumerate(root: &Node, config: &EngineConfig) -> Vec<String> {
    let mut paths = Vec::new();
    walk(root, &mut String::new(), config, &mut |path, _| paths.push(path.to_string()));
    paths
}

pub(crate) fn entries<'a>(root: &'a Node, config: &EngineConfig) -> Vec<(String, &'a Node)> {
    let mut entries = Vec::new();
    walk(root, &mut String::new(), config, &mut |path, node| {
        entries.push((path.to_string(), node));
    });
    entries
}

/// Depth-first walk below `node`. `prefix` holds the path of `node` on entry
/// and is restored before returning.
fn walk<'a, F>(node: &'a Node, prefix: &mut String, config: &EngineConfig, emit: &mut F)
where
    F: FnMut(&str, &'a Node),
{
    match node {
        Node::Object(members) => {
            for (key, child) in members {
                if !is_listed(child, config) {
                    continue;
                }
                if !is_plain_key(key) {
                    debug!(%key, %prefix, "object key is not a plain path segment");
                }
                let mark = prefix.len();
                push_key(prefix, key);
                walk(child, prefix, config, emit);
                emit(prefix, child);
                prefix.truncate(mark);
            }
        }
        Node::Array(items) => {
            for (index, slot) in items.iter().enumerate() {
                let Some(child) = slot else { continue };
                if !is_listed(child, config) {
                    continue;
                }
                let mark = prefix.len();
                push_index(prefix, index);
                walk(child, prefix, config, emit);
                emit(prefix, child);
                prefix.truncate(mark);
            }
        }
        _ => {}
    }
}

const fn is_listed(node: &Node, config: &EngineConfig) -> bool {
    match node {
        Node::Absent => false,
        Node::Null => config.enumerate_nulls,
        _ => true,
    }
}
