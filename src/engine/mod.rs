//! The path engine.
//!
//! [`PathEngine`] maps between a nested [`Node`] tree and flat path strings.
//! It holds only its [`EngineConfig`], so one engine can serve any number of
//! trees. `enumerate` and `read` borrow the tree shared; `write` borrows it
//! exclusively.

mod resolve;
mod walk;
mod write_path;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{ConfigError, PathError};
use crate::node::{Lookup, Node};

/// Enumerates, reads and writes paths in a [`Node`] tree.
///
/// # Examples
///
/// ```
/// use flatpath::{Lookup, Node, PathEngine};
///
/// let engine = PathEngine::default();
/// let mut root = Node::object();
///
/// engine.write("foo[0].bar", 3, &mut root).unwrap();
/// assert_eq!(engine.read("foo[0].bar", &root), Lookup::Present(&Node::Int(3)));
/// assert_eq!(engine.enumerate(&root), vec!["foo[0].bar", "foo[0]", "foo"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathEngine {
    config: EngineConfig,
}

impl PathEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this engine was built with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lists every addressable path in `root`.
    ///
    /// A container's path follows the paths of its descendants; siblings keep
    /// their order. `null` and `absent` children and array holes are skipped
    /// (see [`EngineConfig::enumerate_nulls`]). A scalar root has no paths.
    #[must_use]
    pub fn enumerate(&self, root: &Node) -> Vec<String> {
        walk::enumerate(root, &self.config)
    }

    /// Lists every addressable path in `root` together with its node, in
    /// [`enumerate`](Self::enumerate) order.
    #[must_use]
    pub fn entries<'a>(&self, root: &'a Node) -> Vec<(String, &'a Node)> {
        walk::entries(root, &self.config)
    }

    /// Resolves `path` against `root`.
    ///
    /// Returns [`Lookup::NotFound`] when any step has no own child; a stored
    /// `null` or `absent` is `Present`. Never mutates and never fails.
    ///
    /// A numeric segment applied to an object looks up the member with that
    /// name, so `a[0]` finds `{"a": {"0": 1}}`. [`write`](Self::write) is
    /// stricter: `[0]` always requires an array and fails with a
    /// [`PathError::StructuralConflict`] on that tree.
    #[must_use]
    pub fn read<'a>(&self, path: &str, root: &'a Node) -> Lookup<'a> {
        resolve::read(path, root)
    }

    /// Stores `value` at `path`, creating missing intermediate containers.
    ///
    /// Existing containers are reused, never replaced; arrays grow with holes
    /// and never shrink.
    ///
    /// # Errors
    ///
    /// - [`PathError::StructuralConflict`] when a segment requires an object or
    ///   array where a value of another kind is stored. `root` is unchanged.
    /// - [`PathError::EmptyPath`], [`PathError::Malformed`] and
    ///   [`PathError::IndexLimitExceeded`] for paths rejected before any
    ///   mutation.
    pub fn write(&self, path: &str, value: impl Into<Node>, root: &mut Node) -> Result<(), PathError> {
        write_path::write(path, value.into(), root, &self.config).inspect_err(|err| {
            debug!(%path, error = %err, "write rejected");
        })
    }

    /// Builds a new object tree by writing each `(path, value)` pair in order.
    ///
    /// Later pairs overwrite earlier ones at the same path, so the output of
    /// [`entries`](Self::entries) rebuilds the tree it came from.
    ///
    /// # Errors
    ///
    /// Fails with the first [`PathError`] returned by [`write`](Self::write).
    pub fn unflatten<I, P, V>(&self, entries: I) -> Result<Node, PathError>
    where
        I: IntoIterator<Item = (P, V)>,
        P: AsRef<str>,
        V: Into<Node>,
    {
        let mut root = Node::object();
        for (path, value) in entries {
            self.write(path.as_ref(), value, &mut root)?;
        }
        Ok(root)
    }
}

/// Lists every addressable path in `root` with the default configuration.
#[must_use]
pub fn enumerate(root: &Node) -> Vec<String> {
    PathEngine::default().enumerate(root)
}

/// Resolves `path` against `root`.
#[must_use]
pub fn read<'a>(path: &str, root: &'a Node) -> Lookup<'a> {
    PathEngine::default().read(path, root)
}

/// Stores `value` at `path` with the default configuration.
///
/// # Errors
///
/// See [`PathEngine::write`].
pub fn write(path: &str, value: impl Into<Node>, root: &mut Node) -> Result<(), PathError> {
    PathEngine::default().write(path, value, root)
}
