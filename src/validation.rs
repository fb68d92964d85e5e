//! Field validation orchestration.
//!
//! This module walks a tree with a [`PathEngine`] and hands every field to
//! caller-supplied [`FieldValidator`]s. Rule semantics (required, type,
//! ranges, patterns, ...) belong to the validators; this layer only decides
//! which fields are visited and collects what the validators report.

use serde::Serialize;

use crate::engine::PathEngine;
use crate::node::{Lookup, Node};

/// What a validator sees for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// Path of the field.
    pub path: &'a str,
    /// Value read at `path`, `NotFound` if nothing is stored there.
    pub value: Lookup<'a>,
    /// The whole tree, for rules that compare fields.
    pub root: &'a Node,
}

/// A pluggable check applied to individual fields.
pub trait FieldValidator: Send + Sync {
    /// Name reported in [`Violation::validator`].
    fn name(&self) -> &str;

    /// Checks one field, returning a message describing the failure.
    fn check(&self, field: &FieldContext<'_>) -> Result<(), String>;
}

/// A failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub validator: String,
    pub path: String,
    pub message: String,
}

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub path: String,
    pub violations: Vec<Violation>,
}

impl FieldReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Outcome of validating every field of a tree, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub fields: Vec<FieldReport>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FieldReport::is_valid)
    }

    /// All violations across fields.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.fields.iter().flat_map(|field| field.violations.iter())
    }
}

/// Runs a fixed set of validators over fields of a tree.
pub struct ValidationService {
    engine: PathEngine,
    validators: Vec<Box<dyn FieldValidator>>,
}

impl ValidationService {
    #[must_use]
    pub fn new(engine: PathEngine) -> Self {
        Self {
            engine,
            validators: Vec::new(),
        }
    }

    /// Adds a validator. Validators run in the order they were added.
    #[must_use]
    pub fn with_validator(mut self, validator: impl FieldValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    #[must_use]
    pub const fn engine(&self) -> &PathEngine {
        &self.engine
    }

    /// Validates the field at `path`.
    ///
    /// Every validator runs, even after one has failed. A path that does not
    /// resolve is still validated, with a `NotFound` value.
    #[must_use]
    pub fn validate_field(&self, path: &str, root: &Node) -> FieldReport {
        let field = FieldContext {
            path,
            value: self.engine.read(path, root),
            root,
        };
        let violations = self
            .validators
            .iter()
            .filter_map(|validator| {
                validator.check(&field).err().map(|message| Violation {
                    validator: validator.name().to_string(),
                    path: path.to_string(),
                    message,
                })
            })
            .collect();

        FieldReport {
            path: path.to_string(),
            violations,
        }
    }

    /// Validates every path [`PathEngine::enumerate`] lists for `root`.
    #[must_use]
    pub fn validate(&self, root: &Node) -> ValidationReport {
        let fields = self
            .engine
            .enumerate(root)
            .iter()
            .map(|path| self.validate_field(path, root))
            .collect();
        ValidationReport { fields }
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new(PathEngine::default())
    }
}

impl std::fmt::Debug for ValidationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationService")
            .field("engine", &self.engine)
            .field(
                "validators",
                &self.validators.iter().map(|v| v.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
