//! Semantic error types for the testshell library.
//!
//! Each concern gets its own `thiserror` enum so the command layer can match
//! on the exact condition and map it to a user-facing message. The binary
//! converts the aggregate [`TestShellError`] into an `eyre::Report` at the
//! application boundary.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while mutating an interactive test session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Code or an assertion was added before any method was selected.
    #[error("no active method: add a method before adding code or assertions")]
    NoActiveMethod,

    /// A method was selected that does not exist in the session.
    #[error("unknown method '{name}'")]
    UnknownMethod {
        /// The requested method name.
        name: String,
    },
}

/// Errors raised by the test registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No test with the given name has been created.
    #[error("unknown test '{name}'")]
    UnknownTest {
        /// The requested test name.
        name: String,
    },

    /// An operation needed the current test but none has been created.
    #[error("no current test: create one with test:create")]
    NoCurrentTest,
}

/// Errors raised by the mock registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// The mock variable has not been declared.
    #[error("unknown mock '{variable}'")]
    UnknownMock {
        /// The variable name that was looked up.
        variable: String,
    },

    /// The mocked type is not known to the type resolver.
    #[error("unknown type '{name}'")]
    UnknownType {
        /// The type name that failed resolution.
        name: String,
    },

    /// A call-verification predicate could not be parsed.
    #[error("invalid call predicate '{text}': expected calledTimes(n), calledAtLeastOnce or neverCalled")]
    InvalidPredicate {
        /// The predicate text as given.
        text: String,
    },
}

/// Errors raised while classifying an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// The expression was empty or only whitespace.
    #[error("invalid expression format: expression is empty")]
    InvalidExpressionFormat,
}

/// Opaque failure reported by an evaluator collaborator.
///
/// The message is carried verbatim; the library never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("evaluation failed: {message}")]
pub struct EvaluationError {
    /// The evaluator's own description of the failure.
    pub message: String,
}

impl EvaluationError {
    /// Creates an evaluation error from any displayable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised by the REPL command layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// No command is registered under the given name.
    #[error("unknown command '{name}': try 'help'")]
    UnknownCommand {
        /// The command name as typed.
        name: String,
    },

    /// The command arguments did not match the expected usage.
    #[error("usage: {usage}")]
    Usage {
        /// The expected usage line.
        usage: String,
    },

    /// The argument line could not be split into words.
    #[error("could not parse arguments: {message}")]
    Arguments {
        /// A description of the split failure.
        message: String,
    },
}

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error during configuration loading.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors that can occur during filesystem operations.
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// A file or directory was not found.
    #[error("path not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied when accessing a path.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error at '{path}': {message}")]
    IoError {
        /// The path where the error occurred.
        path: PathBuf,
        /// A description of the I/O error.
        message: String,
    },
}

/// Top-level error type for the testshell library.
///
/// Aggregates the per-concern errors so command handlers can use `?` across
/// registry, session, mock and evaluation calls.
#[derive(Debug, Error)]
pub enum TestShellError {
    /// A session mutation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A registry lookup or selection failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A mock registry operation failed.
    #[error(transparent)]
    Mock(#[from] MockError),

    /// An expression could not be classified.
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    /// The evaluator collaborator failed.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// A REPL command could not be dispatched.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A filesystem operation failed.
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// A specialised `Result` type for testshell operations.
pub type Result<T> = std::result::Result<T, TestShellError>;
