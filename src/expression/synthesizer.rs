//! Translation of expression shapes into assertion statements.

use super::shape::{ComparisonOperator, ExpressionShape, PredicateFunction};
use super::statement::{AssertionKind, AssertionStatement, Operand};

/// Namespace separator; a class operand containing it is kept verbatim.
const NAMESPACE_SEPARATOR: char = '\\';

/// Produces the canonical assertion for a classified expression.
///
/// Synthesis is total: every shape yields exactly one statement. Binary
/// statements place the right-hand text as the expected value and the
/// left-hand text as the actual value.
#[must_use]
pub fn synthesize(shape: &ExpressionShape) -> AssertionStatement {
    match shape {
        ExpressionShape::InstanceOf { object, class } => {
            AssertionStatement::binary(AssertionKind::InstanceOf, class_operand(class), object)
        }
        ExpressionShape::Comparison {
            left,
            operator,
            right,
        } => comparison(left, *operator, right),
        ExpressionShape::Predicate { function, argument } => predicate(*function, argument),
        ExpressionShape::Negation { inner } => {
            AssertionStatement::unary(AssertionKind::False, inner)
        }
        ExpressionShape::Boolean { raw } => AssertionStatement::unary(AssertionKind::True, raw),
    }
}

fn comparison(left: &str, operator: ComparisonOperator, right: &str) -> AssertionStatement {
    let kind = match operator {
        ComparisonOperator::Identical => {
            if let Some(kind) = literal_kind(right) {
                return AssertionStatement::unary(kind, left);
            }
            if let Some(kind) = literal_kind(left) {
                return AssertionStatement::unary(kind, right);
            }
            AssertionKind::Same
        }
        ComparisonOperator::Equal => AssertionKind::Equals,
        ComparisonOperator::NotEqual | ComparisonOperator::NotIdentical => {
            AssertionKind::NotEquals
        }
        ComparisonOperator::GreaterThan => AssertionKind::GreaterThan,
        ComparisonOperator::LessThan => AssertionKind::LessThan,
        ComparisonOperator::GreaterOrEqual => AssertionKind::GreaterOrEqual,
        ComparisonOperator::LessOrEqual => AssertionKind::LessOrEqual,
    };
    AssertionStatement::binary(kind, Operand::expected(right), left)
}

fn predicate(function: PredicateFunction, argument: &str) -> AssertionStatement {
    let kind = match function {
        PredicateFunction::Isset => {
            return AssertionStatement::unary(AssertionKind::True, format!("isset({argument})"));
        }
        PredicateFunction::Empty => AssertionKind::Empty,
        PredicateFunction::IsNull => AssertionKind::Null,
        PredicateFunction::IsArray => AssertionKind::IsArray,
        PredicateFunction::IsObject => AssertionKind::IsObject,
        PredicateFunction::IsString => AssertionKind::IsString,
        PredicateFunction::IsInt => AssertionKind::IsInt,
        PredicateFunction::IsBool => AssertionKind::IsBool,
    };
    AssertionStatement::unary(kind, argument)
}

/// Maps the `null`, `true` and `false` literals to their dedicated kinds.
fn literal_kind(text: &str) -> Option<AssertionKind> {
    [
        ("null", AssertionKind::Null),
        ("true", AssertionKind::True),
        ("false", AssertionKind::False),
    ]
    .into_iter()
    .find(|(literal, _)| text.eq_ignore_ascii_case(literal))
    .map(|(_, kind)| kind)
}

/// A bare class name becomes a class literal; anything else stays an
/// expression.
fn class_operand(class: &str) -> Operand {
    if class.contains(NAMESPACE_SEPARATOR) || class.starts_with('$') {
        Operand::expected(class)
    } else {
        Operand::class_reference(class)
    }
}
