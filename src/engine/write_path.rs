//! Engine write path.
//!
//! A write runs in two phases. The path is first scanned into a [`WritePlan`]:
//! one [`Step`] per container that must exist on the way down, plus the
//! terminal [`Target`]. Only a well-formed path reaches the second phase,
//! which walks the tree with a single `&mut Node` cursor, creating vacant
//! containers and rejecting slots that hold the wrong kind.

use tracing::trace;

use crate::config::EngineConfig;
use crate::error::PathError;
use crate::node::{ContainerKind, Node, ObjectMap};
use crate::path::parse_index;

/// A container the cursor descends into.
///
/// `end` is the byte offset where the step's own path ends, so
/// `&path[..end]` names the location the step reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<'a> {
    Member { key: &'a str, kind: ContainerKind, end: usize },
    Element { index: usize, kind: ContainerKind, end: usize },
}

impl Step<'_> {
    const fn end(&self) -> usize {
        match self {
            Self::Member { end, .. } | Self::Element { end, .. } => *end,
        }
    }
}

/// Where the value lands once every step has been taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'a> {
    Member(&'a str),
    Element(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct WritePlan<'a> {
    steps: Vec<Step<'a>>,
    target: Target<'a>,
}

fn plan<'a>(path: &'a str, config: &EngineConfig) -> Result<WritePlan<'a>, PathError> {
    if path.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let bytes = path.as_bytes();
    let mut steps = Vec::new();
    let mut start = 0;
    // Offset of the '[' of the index being scanned.
    let mut open: Option<usize> = None;

    for (offset, &byte) in bytes.iter().enumerate() {
        match byte {
            b'[' => {
                if open.is_some() {
                    return Err(PathError::malformed(path, offset, "'[' inside an array index"));
                }
                let key = &path[start..offset];
                if !key.is_empty() {
                    steps.push(Step::Member {
                        key,
                        kind: ContainerKind::Array,
                        end: offset,
                    });
                } else if offset > 0 && bytes[offset - 1] == b'.' {
                    // `a.[0]` would claim an object and then index into it.
                    return Err(PathError::malformed(path, offset, "'[' directly after '.'"));
                }
                open = Some(offset);
                start = offset + 1;
            }
            b']' => {
                let Some(bracket) = open.take() else {
                    return Err(PathError::malformed(path, offset, "']' without a matching '['"));
                };
                let index = parse_index(&path[start..offset]).ok_or_else(|| {
                    PathError::malformed(path, start, "array index must be a non-negative integer")
                })?;
                if index > config.max_array_index {
                    return Err(PathError::IndexLimitExceeded {
                        prefix: path[..bracket].to_string(),
                        index,
                        max: config.max_array_index,
                    });
                }
                start = offset + 1;

                let kind = match bytes.get(offset + 1) {
                    None => {
                        return Ok(WritePlan {
                            steps,
                            target: Target::Element(index),
                        })
                    }
                    Some(b'[') => ContainerKind::Array,
                    Some(b'.') => ContainerKind::Object,
                    Some(_) => {
                        return Err(PathError::malformed(path, offset + 1, "expected '[' or '.' after ']'"))
                    }
                };
                steps.push(Step::Element {
                    index,
                    kind,
                    end: offset + 1,
                });
            }
            b'.' => {
                if open.is_some() {
                    return Err(PathError::malformed(path, offset, "'.' inside an array index"));
                }
                // Empty after ']' as in `list[0].name`.
                let key = &path[start..offset];
                if !key.is_empty() {
                    steps.push(Step::Member {
                        key,
                        kind: ContainerKind::Object,
                        end: offset,
                    });
                }
                start = offset + 1;
            }
            _ => {}
        }
    }

    if open.is_some() {
        return Err(PathError::malformed(path, path.len(), "unterminated '['"));
    }
    if start == path.len() {
        return Err(PathError::malformed(path, path.len(), "path ends without a key"));
    }

    Ok(WritePlan {
        steps,
        target: Target::Member(&path[start..]),
    })
}

/// Stores `value` at `path` inside `root`, creating missing containers.
///
/// Conflicts can only come from structure that already existed, and every
/// existing location on the path is visited before anything new is created
/// below it, so a failed write leaves `root` as it was.
pub(crate) fn write(
    path: &str,
    value: Node,
    root: &mut Node,
    config: &EngineConfig,
) -> Result<(), PathError> {
    let plan = plan(path, config)?;

    let mut cursor = root;
    let mut at = 0;
    for step in &plan.steps {
        cursor = match *step {
            Step::Member { key, kind, end } => {
                let slot = members(cursor, &path[..at])?
                    .entry(key.to_string())
                    .or_insert(Node::Absent);
                claim(slot, kind, &path[..end])?
            }
            Step::Element { index, kind, end } => {
                let slot = element_slot(cursor, index, &path[..at])?.get_or_insert(Node::Absent);
                claim(slot, kind, &path[..end])?
            }
        };
        at = step.end();
    }

    match plan.target {
        Target::Member(key) => {
            members(cursor, &path[..at])?.insert(key.to_string(), value);
        }
        Target::Element(index) => {
            *element_slot(cursor, index, &path[..at])? = Some(value);
        }
    }
    Ok(())
}

/// Makes `slot` a container of `kind`, creating it if vacant.
fn claim<'n>(slot: &'n mut Node, kind: ContainerKind, location: &str) -> Result<&'n mut Node, PathError> {
    if slot.is_absent() {
        trace!(path = location, %kind, "creating container");
        *slot = kind.empty();
    } else if !kind.matches(slot) {
        return Err(conflict(location, kind, slot));
    }
    Ok(slot)
}

/// Returns the members of the object at `location`, creating it if vacant.
fn members<'n>(node: &'n mut Node, location: &str) -> Result<&'n mut ObjectMap, PathError> {
    if node.is_absent() {
        trace!(path = location, "creating object");
        *node = Node::object();
    }
    match node {
        Node::Object(map) => Ok(map),
        other => Err(conflict(location, ContainerKind::Object, other)),
    }
}

/// Returns slot `index` of the array at `location`, growing the array with
/// holes as needed.
fn element_slot<'n>(
    node: &'n mut Node,
    index: usize,
    location: &str,
) -> Result<&'n mut Option<Node>, PathError> {
    if node.is_absent() {
        trace!(path = location, "creating array");
        *node = Node::array();
    }
    let items = match node {
        Node::Array(items) => items,
        other => return Err(conflict(location, ContainerKind::Array, other)),
    };
    if items.len() <= index {
        let len = index.checked_add(1).ok_or_else(|| PathError::IndexLimitExceeded {
            prefix: location.to_string(),
            index,
            max: usize::MAX - 1,
        })?;
        items.resize_with(len, || None);
    }
    Ok(&mut items[index])
}

fn conflict(location: &str, expected: ContainerKind, found: &Node) -> PathError {
    PathError::StructuralConflict {
        prefix: location.to_string(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use serde_json::json;

    fn plan_of(path: &str) -> Result<WritePlan<'_>, PathError> {
        plan(path, &EngineConfig::default())
    }

    fn write_json(path: &str, value: serde_json::Value, root: &mut Node) -> Result<(), PathError> {
        write(path, value.into(), root, &EngineConfig::default())
    }

    #[test]
    fn test_plan_mixed_path() {
        let plan = plan_of("foo[0].bar").unwrap();
        assert_eq!(
            plan.steps,
            vec![
                Step::Member { key: "foo", kind: ContainerKind::Array, end: 3 },
                Step::Element { index: 0, kind: ContainerKind::Object, end: 6 },
            ]
        );
        assert_eq!(plan.target, Target::Member("bar"));
    }

    #[test]
    fn test_plan_nested_arrays() {
        let plan = plan_of("grid[0][1]").unwrap();
        assert_eq!(
            plan.steps,
            vec![
                Step::Member { key: "grid", kind: ContainerKind::Array, end: 4 },
                Step::Element { index: 0, kind: ContainerKind::Array, end: 7 },
            ]
        );
        assert_eq!(plan.target, Target::Element(1));
    }

    #[test]
    fn test_plan_single_key() {
        let plan = plan_of("name").unwrap();
        assert!(plan.steps.is_empty());
        assert_eq!(plan.target, Target::Member("name"));
    }

    #[test]
    fn test_plan_rejects_malformed() {
        assert_eq!(plan_of(""), Err(PathError::EmptyPath));
        for path in [
            "a[", "a]", "a[]", "a[x]", "a[-1]", "a[0]b", "a[1.2]", "a[[0]]", "a.", "a.[0]", "a[0].[1]", ".[0]",
        ] {
            let err = plan_of(path).unwrap_err();
            assert!(matches!(err, PathError::Malformed { .. }), "{path}: {err}");
        }
    }

    #[test]
    fn test_plan_rejects_index_over_limit() {
        let config = EngineConfig {
            max_array_index: 10,
            ..EngineConfig::default()
        };
        assert!(plan("a[10]", &config).is_ok());
        let err = plan("a[11]", &config).unwrap_err();
        assert_eq!(
            err,
            PathError::IndexLimitExceeded {
                prefix: "a".to_string(),
                index: 11,
                max: 10,
            }
        );
    }

    #[test]
    fn test_write_creates_array_then_object() {
        let mut root = Node::object();
        write_json("foo[0].bar", json!(3), &mut root).unwrap();
        assert_eq!(root.to_json(), json!({"foo": [{"bar": 3}]}));
    }

    #[test]
    fn test_write_creates_objects() {
        let mut root = Node::object();
        write_json("foo.bar", json!("baz"), &mut root).unwrap();
        assert_eq!(root.to_json(), json!({"foo": {"bar": "baz"}}));
    }

    #[test]
    fn test_write_extends_with_holes() {
        let mut root = Node::object();
        write_json("list[2]", json!(true), &mut root).unwrap();
        let list = root.member("list").value().unwrap();
        assert_eq!(list.as_array().unwrap(), &[None, None, Some(Node::Bool(true))]);
    }

    #[test]
    fn test_write_never_shrinks() {
        let mut root = Node::from(json!({"list": [1, 2, 3]}));
        write_json("list[0]", json!(9), &mut root).unwrap();
        assert_eq!(root.to_json(), json!({"list": [9, 2, 3]}));
    }

    #[test]
    fn test_write_keeps_existing_containers() {
        let mut root = Node::from(json!({"a": {"keep": 1}}));
        write_json("a.new", json!(2), &mut root).unwrap();
        assert_eq!(root.to_json(), json!({"a": {"keep": 1, "new": 2}}));
    }

    #[test]
    fn test_write_array_conflict_leaves_value() {
        let mut root = Node::from(json!({"foo": "not an array"}));
        let err = write_json("foo[0]", json!(1), &mut root).unwrap_err();
        assert_eq!(
            err,
            PathError::StructuralConflict {
                prefix: "foo".to_string(),
                expected: ContainerKind::Array,
                found: NodeKind::String,
            }
        );
        assert_eq!(root.to_json(), json!({"foo": "not an array"}));
    }

    #[test]
    fn test_write_object_conflict() {
        let mut root = Node::from(json!({"foo": [1]}));
        let err = write_json("foo.bar", json!(1), &mut root).unwrap_err();
        assert_eq!(
            err,
            PathError::StructuralConflict {
                prefix: "foo".to_string(),
                expected: ContainerKind::Object,
                found: NodeKind::Array,
            }
        );
    }

    #[test]
    fn test_write_element_conflict() {
        let mut root = Node::from(json!({"items": [5]}));
        let err = write_json("items[0].name", json!("x"), &mut root).unwrap_err();
        assert_eq!(
            err,
            PathError::StructuralConflict {
                prefix: "items[0]".to_string(),
                expected: ContainerKind::Object,
                found: NodeKind::Int,
            }
        );
    }

    #[test]
    fn test_write_null_is_not_vacant() {
        let mut root = Node::from(json!({"a": null}));
        let err = write_json("a.b", json!(1), &mut root).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(root.to_json(), json!({"a": null}));
    }

    #[test]
    fn test_write_fills_hole_and_absent() {
        let mut root = Node::from(json!({"list": []}));
        write_json("list[1].x", json!(1), &mut root).unwrap();
        assert_eq!(root.to_json(), json!({"list": [null, {"x": 1}]}));

        let mut map = ObjectMap::new();
        map.insert("u".to_string(), Node::Absent);
        let mut root = Node::Object(map);
        write_json("u[0]", json!(1), &mut root).unwrap();
        assert_eq!(root.to_json(), json!({"u": [1]}));
    }

    #[test]
    fn test_write_scalar_then_descend_conflicts() {
        let mut root = Node::from(json!({"a": {"b": 1}}));
        write_json("fresh.a", json!(1), &mut root).unwrap();
        let err = write_json("fresh.a.b", json!(2), &mut root).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(root.to_json(), json!({"a": {"b": 1}, "fresh": {"a": 1}}));
    }

    #[test]
    fn test_write_root_array() {
        let mut root = Node::array();
        write_json("[1][0]", json!("x"), &mut root).unwrap();
        assert_eq!(root.to_json(), json!([null, ["x"]]));
    }

    #[test]
    fn test_write_vacant_root_becomes_container() {
        let mut root = Node::Absent;
        write_json("a", json!(1), &mut root).unwrap();
        assert_eq!(root.to_json(), json!({"a": 1}));
    }

    #[test]
    fn test_write_scalar_root_conflict() {
        let mut root = Node::from(3);
        let err = write_json("a", json!(1), &mut root).unwrap_err();
        assert_eq!(
            err,
            PathError::StructuralConflict {
                prefix: String::new(),
                expected: ContainerKind::Object,
                found: NodeKind::Int,
            }
        );
    }

    #[test]
    fn test_write_malformed_does_not_mutate() {
        let mut root = Node::object();
        assert!(write_json("a.b[x]", json!(1), &mut root).is_err());
        assert_eq!(root, Node::object());
    }

    #[test]
    fn test_write_dot_before_bracket_does_not_mutate() {
        for path in ["a.[0]", "a[0].[1]", ".[0]"] {
            let mut root = Node::object();
            let err = write_json(path, json!(1), &mut root).unwrap_err();
            assert!(matches!(err, PathError::Malformed { .. }), "{path}: {err}");
            assert_eq!(root, Node::object(), "{path}");
        }
    }

    #[test]
    fn test_element_slot_index_overflow() {
        let mut node = Node::array();
        let err = element_slot(&mut node, usize::MAX, "a").unwrap_err();
        assert!(matches!(err, PathError::IndexLimitExceeded { index: usize::MAX, .. }));
        assert_eq!(node, Node::array());
    }
}
