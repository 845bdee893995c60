//! Interactive construction of unit tests from expressions.
//!
//! `testshell` is the core of a REPL in which a developer creates test
//! classes, adds methods, code lines and assertions, declares mocks, and
//! exports the result as a test class file. Natural expressions such as
//! `$total == 42` are translated into assertion calls like
//! `$this->assertEquals(42, $total);`.
//!
//! # Architecture
//!
//! The shell owns no interpreter. Evaluating host-language expressions,
//! resolving type names and writing files are delegated to collaborator
//! traits in [`host`], so the registries and translators stay pure and the
//! REPL can be driven entirely in tests.
//!
//! # Modules
//!
//! - [`config`]: Configuration with layered precedence (CLI > env > file > defaults)
//! - [`diagnostics`]: Snapshot assertions and failure reports built from evaluated values
//! - [`error`]: Semantic error types for the library
//! - [`export`]: Rendering sessions as test class source and writing them out
//! - [`expression`]: Translation of expressions into assertion statements
//! - [`host`]: Collaborator traits for evaluation, type resolution and export
//! - [`mock`]: Mock declarations, expectations, spying and call verification
//! - [`registry`]: The named collection of test sessions
//! - [`session`]: One test class under construction
//! - [`shell`]: REPL commands and their dispatch

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod expression;
pub mod host;
pub mod mock;
pub mod registry;
pub mod session;
pub mod shell;
