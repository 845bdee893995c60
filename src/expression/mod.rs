//! Expression-to-assertion translation.
//!
//! Free-form boolean expressions typed at the REPL are turned into
//! structured assertions in two steps:
//!
//! 1. [`analyze`] classifies the text into an [`ExpressionShape`]
//!    (comparison, `instanceof`, predicate call, negation or opaque boolean).
//! 2. [`synthesize`] maps the shape onto one [`AssertionStatement`],
//!    applying the literal tie-breaks (`$x === null` becomes a null check).
//!
//! [`text_to_assertion`] composes both and renders the result.
//!
//! # Example
//!
//! ```
//! use testshell::expression::text_to_assertion;
//!
//! let line = text_to_assertion("$total >= 10").expect("expression is not empty");
//! assert_eq!(line, "$this->assertGreaterThanOrEqual(10, $total);");
//! ```

mod analyzer;
mod scanner;
mod shape;
mod statement;
mod synthesizer;

#[cfg(test)]
mod tests;

pub use analyzer::analyze;
pub(crate) use scanner::split_top_level;
pub use shape::{ComparisonOperator, ExpressionShape, PredicateFunction};
pub use statement::{
    AssertionKind, AssertionStatement, Operand, OperandRole, SELF_REFERENCE, TERMINATOR,
};
pub use synthesizer::synthesize;

use crate::error::ExpressionError;

/// Classifies an expression and synthesizes its assertion statement.
///
/// # Errors
///
/// Returns [`ExpressionError::InvalidExpressionFormat`] for empty input.
pub fn expression_to_statement(expression: &str) -> Result<AssertionStatement, ExpressionError> {
    analyze(expression).map(|shape| synthesize(&shape))
}

/// Translates an expression into a rendered assertion line.
///
/// # Errors
///
/// Returns [`ExpressionError::InvalidExpressionFormat`] for empty input.
pub fn text_to_assertion(expression: &str) -> Result<String, ExpressionError> {
    expression_to_statement(expression).map(|statement| statement.render())
}
