//! # flatpath - Flat paths for nested trees
//!
//! flatpath maps a nested tree of objects and arrays to a flat set of path
//! strings and back. Every scalar and container in the tree has one path,
//! written with `.key` for object members and `[index]` for array elements:
//! `user`, `user.name`, `user.tags[0]`, `grid[0][1]`.
//!
//! ## Core Concepts
//!
//! - **Node**: The tree. Scalars, insertion-ordered objects, and arrays whose
//!   slots may be holes
//! - **PathEngine**: Enumerates, reads and writes paths
//! - **Lookup**: Read result that keeps "nothing stored here" apart from a
//!   stored `null`
//! - **PathError**: Typed write failures, including structural conflicts
//!
//! ## Usage
//!
//! ```rust
//! use flatpath::{Lookup, Node, PathEngine};
//!
//! let engine = PathEngine::default();
//! let mut form = Node::object();
//!
//! engine.write("user.name", "ada", &mut form)?;
//! engine.write("user.tags[0]", "admin", &mut form)?;
//!
//! assert_eq!(
//!     engine.enumerate(&form),
//!     vec!["user.name", "user.tags[0]", "user.tags", "user"]
//! );
//! assert_eq!(engine.read("user.name", &form), Lookup::Present(&Node::from("ada")));
//! assert!(engine.read("user.email", &form).is_not_found());
//! # Ok::<(), flatpath::PathError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod engine;
pub mod error;
pub mod node;
pub mod path;
pub mod serialization;
pub mod validation;

// Re-export primary types at crate root for convenience
pub use config::EngineConfig;
pub use engine::{enumerate, read, write, PathEngine};
pub use error::{ConfigError, FlatpathError, FlatpathResult, PathError};
pub use node::{ContainerKind, Lookup, Node, NodeKind, ObjectMap};
pub use serialization::{node_from_json, node_to_json_pretty};
pub use validation::{
    FieldContext, FieldReport, FieldValidator, ValidationReport, ValidationService, Violation,
};
