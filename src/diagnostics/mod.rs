//! Assertions derived from observed values.
//!
//! [`snapshot_assertion`] pins the current value of an expression as an
//! assertion, and [`failure_report`] shows what each operand of an existing
//! assertion evaluates to. Both go through the session's [`Evaluator`].


use std::fmt;

use crate::error::{ExpressionError, Result};
use crate::expression::{AssertionKind, AssertionStatement, Operand, OperandRole};
use crate::host::{Bindings, Evaluator, Value, render_literal};

/// Evaluates `expression` and builds an assertion that its value stays the
/// same.
///
/// `null` becomes an `assertNull`, booleans become `assertTrue` or
/// `assertFalse`, other scalars an `assertSame` and arrays or maps an
/// `assertEquals` against the rendered literal.
///
/// # Errors
///
/// Returns [`ExpressionError::InvalidExpressionFormat`] for blank input and
/// passes evaluator failures through unchanged.
pub fn snapshot_assertion<E>(
    expression: &str,
    evaluator: &E,
    bindings: &Bindings,
) -> Result<AssertionStatement>
where
    E: Evaluator + ?Sized,
{
    let text = expression.trim();
    if text.is_empty() {
        return Err(ExpressionError::InvalidExpressionFormat.into());
    }

    let value = evaluator.evaluate(text, bindings)?;
    let statement = match &value {
        Value::Null => AssertionStatement::unary(AssertionKind::Null, text),
        Value::Bool(true) => AssertionStatement::unary(AssertionKind::True, text),
        Value::Bool(false) => AssertionStatement::unary(AssertionKind::False, text),
        Value::Number(_) | Value::String(_) => AssertionStatement::binary(
            AssertionKind::Same,
            Operand::expected(render_literal(&value)),
            text,
        ),
        Value::Array(_) | Value::Object(_) => AssertionStatement::binary(
            AssertionKind::Equals,
            Operand::expected(render_literal(&value)),
            text,
        ),
    };
    Ok(statement)
}

/// The observed value of one assertion operand.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedOperand {
    /// Which side of the check the operand stands for.
    pub role: OperandRole,
    /// The operand as written in the assertion.
    pub text: String,
    /// The evaluated value; `None` for class literals, which are not
    /// evaluated.
    pub value: Option<Value>,
}

/// An assertion together with what its operands evaluate to.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    /// The rendered assertion.
    pub assertion: String,
    /// Operands in argument order.
    pub operands: Vec<ObservedOperand>,
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.assertion)?;
        for operand in &self.operands {
            let role = match operand.role {
                OperandRole::Expected => "expected",
                OperandRole::Actual => "actual",
            };
            let observed = operand
                .value
                .as_ref()
                .map_or_else(|| String::from("(class)"), render_literal);
            write!(f, "\n  {role:<8} {} => {observed}", operand.text)?;
        }
        Ok(())
    }
}

/// Evaluates every operand of `statement`.
///
/// # Errors
///
/// Passes the first evaluator failure through unchanged.
pub fn failure_report<E>(
    statement: &AssertionStatement,
    evaluator: &E,
    bindings: &Bindings,
) -> Result<FailureReport>
where
    E: Evaluator + ?Sized,
{
    let operands = statement
        .operands()
        .iter()
        .map(|operand| -> Result<ObservedOperand> {
            let value = if operand.is_class_reference() {
                None
            } else {
                Some(evaluator.evaluate(operand.text(), bindings)?)
            };
            Ok(ObservedOperand {
                role: operand.role(),
                text: operand.render(),
                value,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FailureReport {
        assertion: statement.render(),
        operands,
    })
}
