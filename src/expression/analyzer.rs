//! Ordered-rule classification of raw expressions.

use super::scanner::{INSTANCEOF, TopLevelToken, matching_close, top_level_tokens};
use super::shape::{ComparisonOperator, ExpressionShape, PredicateFunction};
use crate::error::ExpressionError;

/// Comparison rules in detection order. Each group is searched for its
/// first top-level occurrence; operators within a group compete by position.
const COMPARISON_RULES: &[&[&str]] = &[
    &["==="],
    &["=="],
    &["!==", "!="],
    &[">="],
    &["<="],
    &[">"],
    &["<"],
];

/// Classifies a raw boolean expression.
///
/// Detection order, first match wins: `instanceof`, `===`, `==`, `!=`/`!==`,
/// ordering operators, recognised predicate calls, leading negation, and
/// finally an opaque boolean. Only operators outside brackets and string
/// literals are considered, and a binary rule needs text on both sides.
///
/// # Errors
///
/// Returns [`ExpressionError::InvalidExpressionFormat`] when the expression
/// is empty or whitespace. Any other text classifies successfully.
pub fn analyze(expression: &str) -> Result<ExpressionShape, ExpressionError> {
    let text = expression.trim();
    if text.is_empty() {
        return Err(ExpressionError::InvalidExpressionFormat);
    }

    let tokens = top_level_tokens(text);

    if let Some((object, class)) = split_first(text, &tokens, &[INSTANCEOF]) {
        return Ok(ExpressionShape::InstanceOf { object, class });
    }

    for group in COMPARISON_RULES {
        if let Some((left, symbol, right)) = split_first_with_symbol(text, &tokens, group) {
            if let Some(operator) = ComparisonOperator::from_symbol(symbol) {
                return Ok(ExpressionShape::Comparison {
                    left,
                    operator,
                    right,
                });
            }
        }
    }

    if let Some(shape) = predicate_call(text) {
        return Ok(shape);
    }

    if let Some(inner) = negated(text) {
        return Ok(ExpressionShape::Negation {
            inner: String::from(inner),
        });
    }

    Ok(ExpressionShape::Boolean {
        raw: String::from(text),
    })
}

fn split_first(
    text: &str,
    tokens: &[TopLevelToken],
    symbols: &[&str],
) -> Option<(String, String)> {
    split_first_with_symbol(text, tokens, symbols).map(|(left, _, right)| (left, right))
}

/// Splits around the first token in `symbols` that has text on both sides.
fn split_first_with_symbol(
    text: &str,
    tokens: &[TopLevelToken],
    symbols: &[&str],
) -> Option<(String, &'static str, String)> {
    tokens
        .iter()
        .filter(|token| symbols.contains(&token.symbol))
        .find_map(|token| {
            let left = text.get(..token.start)?.trim();
            let right = text.get(token.end..)?.trim();
            if left.is_empty() || right.is_empty() {
                return None;
            }
            Some((String::from(left), token.symbol, String::from(right)))
        })
}

/// Matches `name(argument)` where the call spans the whole text.
fn predicate_call(text: &str) -> Option<ExpressionShape> {
    let open = text.find('(')?;
    let function = PredicateFunction::from_name(text.get(..open)?.trim_end())?;
    let close = matching_close(text, open)?;
    if close + 1 != text.len() {
        return None;
    }
    let argument = text.get(open + 1..close)?.trim();
    if argument.is_empty() {
        return None;
    }
    Some(ExpressionShape::Predicate {
        function,
        argument: String::from(argument),
    })
}

/// Returns the operand of a leading `!`, excluding `!=`.
fn negated(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('!')?;
    if rest.starts_with('=') {
        return None;
    }
    let inner = rest.trim();
    (!inner.is_empty()).then_some(inner)
}
