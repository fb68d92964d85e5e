//! The nested tree that paths address.
//!
//! A [`Node`] is either a scalar or one of two container kinds: an object
//! (string keys, insertion ordered) or an array (indexed slots that may be
//! holes). Containers own their children exclusively.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Members of an object node, in insertion order.
pub type ObjectMap = IndexMap<String, Node>;

/// One node of a nested tree.
///
/// Array slots are `Option<Node>`: `None` is a hole (the slot was never
/// written, e.g. the gap left when writing past the end), while
/// `Some(Node::Absent)` is an explicitly stored "undefined" value.
///
/// # Examples
///
/// ```
/// use flatpath::Node;
///
/// let node = Node::from(serde_json::json!({"foo": [1, 2]}));
/// assert!(node.is_object());
/// assert_eq!(node.kind().name(), "object");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Node {
    #[default]
    Absent,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Object(ObjectMap),
    Array(Vec<Option<Node>>),
}

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Absent,
    Null,
    Bool,
    Int,
    Float,
    String,
    Object,
    Array,
}

impl NodeKind {
    /// Returns a human-readable kind name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two kinds of container a path segment can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Required by `.key` access.
    Object,
    /// Required by `[index]` access.
    Array,
}

impl ContainerKind {
    /// Creates an empty container of this kind.
    #[must_use]
    pub fn empty(self) -> Node {
        match self {
            Self::Object => Node::Object(ObjectMap::new()),
            Self::Array => Node::Array(Vec::new()),
        }
    }

    /// Returns true if `node` is a container of this kind.
    #[must_use]
    pub const fn matches(self, node: &Node) -> bool {
        matches!(
            (self, node),
            (Self::Object, Node::Object(_)) | (Self::Array, Node::Array(_))
        )
    }
}

impl From<ContainerKind> for NodeKind {
    fn from(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Object => Self::Object,
            ContainerKind::Array => Self::Array,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&NodeKind::from(*self), f)
    }
}

/// Result of looking up a child or a path.
///
/// `NotFound` means nothing is stored at the location. A stored
/// [`Node::Null`] or [`Node::Absent`] is `Present`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Present(&'a Node),
    NotFound,
}

impl<'a> Lookup<'a> {
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns the node if present.
    #[must_use]
    pub const fn value(self) -> Option<&'a Node> {
        match self {
            Self::Present(node) => Some(node),
            Self::NotFound => None,
        }
    }

    /// Returns an owned copy of the node if present.
    #[must_use]
    pub fn cloned(self) -> Option<Node> {
        self.value().cloned()
    }
}

impl<'a> From<Option<&'a Node>> for Lookup<'a> {
    fn from(node: Option<&'a Node>) -> Self {
        node.map_or(Self::NotFound, Self::Present)
    }
}

impl Node {
    /// Creates an empty object node.
    #[must_use]
    pub fn object() -> Self {
        Self::Object(ObjectMap::new())
    }

    /// Creates an empty array node.
    #[must_use]
    pub const fn array() -> Self {
        Self::Array(Vec::new())
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Absent => NodeKind::Absent,
            Self::Null => NodeKind::Null,
            Self::Bool(_) => NodeKind::Bool,
            Self::Int(_) => NodeKind::Int,
            Self::Float(_) => NodeKind::Float,
            Self::String(_) => NodeKind::String,
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
        }
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns true for objects and arrays.
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Option<Node>]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Option<Node>>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up an own member of an object node.
    ///
    /// Non-objects have no members.
    #[must_use]
    pub fn member(&self, key: &str) -> Lookup<'_> {
        match self {
            Self::Object(map) => map.get(key).into(),
            _ => Lookup::NotFound,
        }
    }

    /// Looks up an own element of an array node.
    ///
    /// Holes, out-of-range indices and non-arrays yield `NotFound`.
    #[must_use]
    pub fn element(&self, index: usize) -> Lookup<'_> {
        match self {
            Self::Array(items) => items.get(index).and_then(Option::as_ref).into(),
            _ => Lookup::NotFound,
        }
    }

    /// Converts this node into plain JSON.
    ///
    /// Holes and `Absent` array slots become `null`; `Absent` object members
    /// are dropped; non-finite floats become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as JV;

        match self {
            Self::Absent | Self::Null => JV::Null,
            Self::Bool(v) => JV::Bool(*v),
            Self::Int(v) => JV::from(*v),
            Self::Float(v) => serde_json::Number::from_f64(*v).map_or(JV::Null, JV::Number),
            Self::String(v) => JV::String(v.clone()),
            Self::Object(map) => JV::Object(
                map.iter()
                    .filter(|(_, child)| !child.is_absent())
                    .map(|(key, child)| (key.clone(), child.to_json()))
                    .collect(),
            ),
            Self::Array(items) => JV::Array(
                items
                    .iter()
                    .map(|slot| slot.as_ref().map_or(JV::Null, Self::to_json))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("absent"),
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Object(_) | Self::Array(_) => write!(f, "{}", self.to_json()),
        }
    }
}

// Convenient From implementations
impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Node {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Node {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<ObjectMap> for Node {
    fn from(v: ObjectMap) -> Self {
        Self::Object(v)
    }
}

impl From<Vec<Node>> for Node {
    fn from(v: Vec<Node>) -> Self {
        Self::Array(v.into_iter().map(Some).collect())
    }
}

impl From<serde_json::Value> for Node {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as JV;

        match v {
            JV::Null => Self::Null,
            JV::Bool(b) => Self::Bool(b),
            JV::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JV::String(s) => Self::String(s),
            JV::Array(items) => Self::Array(items.into_iter().map(|item| Some(item.into())).collect()),
            JV::Object(map) => Self::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<Node> for serde_json::Value {
    fn from(node: Node) -> Self {
        node.to_json()
    }
}
