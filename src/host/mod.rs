//! Contracts with the world outside the session core.
//!
//! The core never inspects a project, runs code or touches the filesystem
//! itself. It asks collaborators through three narrow traits:
//!
//! - [`TypeResolver`]: does a class or interface exist?
//! - [`Evaluator`]: what value does an expression produce under some
//!   variable bindings?
//! - [`ExportSink`]: persist generated test source.
//!
//! Each trait has a small production implementation here ([`TypeCatalog`],
//! [`LiteralEvaluator`], [`DirSink`]); embedders with a real runtime plug in
//! their own.

mod literal;
mod sink;
mod types;


use std::collections::BTreeMap;

use camino::Utf8Path;

use crate::error::{EvaluationError, FilesystemError};

pub use literal::{LiteralEvaluator, render_literal};
pub use sink::DirSink;
pub use types::TypeCatalog;

/// A runtime value reported by an evaluator.
pub type Value = serde_json::Value;

/// Variable bindings keyed by name without the leading `$`.
pub type Bindings = BTreeMap<String, Value>;

/// Answers whether a type name can be mocked or referenced.
#[cfg_attr(test, mockall::automock)]
pub trait TypeResolver {
    /// Returns whether `name` refers to a known class or interface.
    fn type_exists(&self, name: &str) -> bool;
}

/// Evaluates expression text to a value.
#[cfg_attr(test, mockall::automock)]
pub trait Evaluator {
    /// Evaluates `text` with the given variable bindings.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] carrying the evaluator's own message
    /// when the expression cannot be evaluated.
    fn evaluate(&self, text: &str, bindings: &Bindings) -> Result<Value, EvaluationError>;
}

/// Receives generated files.
#[cfg_attr(test, mockall::automock)]
pub trait ExportSink {
    /// Writes `content` to `path`, relative to the sink's root.
    ///
    /// # Errors
    ///
    /// Returns a [`FilesystemError`] when the file cannot be written.
    fn write_file(&self, path: &Utf8Path, content: &str) -> Result<(), FilesystemError>;
}
