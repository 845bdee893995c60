//! Literal-only evaluation and host literal rendering.
//!
//! [`LiteralEvaluator`] understands scalars, quoted strings, array literals
//! and bound variables. It is what the shell uses when no language runtime
//! is attached; everything else is reported as an [`EvaluationError`].

use serde_json::{Map, Number};

use super::{Bindings, Evaluator, Value};
use crate::error::EvaluationError;
use crate::expression::split_top_level;

/// Evaluates literal expressions and `$variable` lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiteralEvaluator;

impl Evaluator for LiteralEvaluator {
    fn evaluate(&self, text: &str, bindings: &Bindings) -> Result<Value, EvaluationError> {
        parse_value(text.trim(), bindings)
    }
}

fn parse_value(text: &str, bindings: &Bindings) -> Result<Value, EvaluationError> {
    if text.is_empty() {
        return Err(EvaluationError::new("empty expression"));
    }

    if let Some(name) = text.strip_prefix('$').filter(|name| is_identifier(name)) {
        return bindings
            .get(name)
            .cloned()
            .ok_or_else(|| EvaluationError::new(format!("undefined variable ${name}")));
    }

    if text.eq_ignore_ascii_case("null") {
        return Ok(Value::Null);
    }
    if text.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if text.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }

    if let Ok(integer) = text.parse::<i64>() {
        return Ok(Value::from(integer));
    }
    if let Some(number) = text.parse::<f64>().ok().and_then(Number::from_f64) {
        return Ok(Value::Number(number));
    }

    if let Some(string) = unquote(text) {
        return Ok(Value::String(string));
    }

    if let Some(inner) = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return parse_array(inner, bindings);
    }

    Err(EvaluationError::new(format!(
        "cannot evaluate '{text}' without a runtime"
    )))
}

/// Parses the inside of `[...]` into a list, or a map when any element
/// carries a `key => value` pair.
fn parse_array(inner: &str, bindings: &Bindings) -> Result<Value, EvaluationError> {
    let mut elements = split_top_level(inner, ",");
    if elements.last().is_some_and(|last| last.trim().is_empty()) {
        elements.pop();
    }

    let mut positional = Vec::new();
    let mut keyed = Map::new();
    let mut has_keys = false;
    // `None` once an integer key of `i64::MAX` leaves no room to append.
    let mut next_index = Some(0_i64);

    for element in elements {
        let pair = split_top_level(element, "=>");
        match pair.as_slice() {
            [value] => {
                let parsed = parse_value(value.trim(), bindings)?;
                let index = next_index.ok_or_else(index_overflow)?;
                keyed.insert(index.to_string(), parsed.clone());
                positional.push(parsed);
                next_index = index.checked_add(1);
            }
            [key, value] => {
                has_keys = true;
                let key_text = match parse_value(key.trim(), bindings)? {
                    Value::String(text) => text,
                    Value::Number(number) => {
                        if let Some(index) = number.as_i64() {
                            next_index = next_index
                                .zip(index.checked_add(1))
                                .map(|(current, after)| current.max(after));
                        }
                        number.to_string()
                    }
                    other => {
                        return Err(EvaluationError::new(format!(
                            "unsupported array key {other}"
                        )));
                    }
                };
                keyed.insert(key_text, parse_value(value.trim(), bindings)?);
            }
            _ => {
                return Err(EvaluationError::new(format!(
                    "malformed array element '{}'",
                    element.trim()
                )));
            }
        }
    }

    if has_keys {
        Ok(Value::Object(keyed))
    } else {
        Ok(Value::Array(positional))
    }
}

fn index_overflow() -> EvaluationError {
    EvaluationError::new("array index overflow")
}

/// Strips matching quotes and resolves escapes. Returns `None` when the
/// text is not a single string literal.
fn unquote(text: &str) -> Option<String> {
    let quote = text.chars().next().filter(|c| matches!(c, '\'' | '"'))?;
    let inner = text.strip_prefix(quote)?.strip_suffix(quote)?;

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == quote {
            return None;
        }
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped) if escaped == quote || escaped == '\\' => result.push(escaped),
            Some('n') if quote == '"' => result.push('\n'),
            Some('t') if quote == '"' => result.push('\t'),
            Some('$') if quote == '"' => result.push('$'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => return None,
        }
    }
    Some(result)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Renders a value as a host-language literal.
///
/// Lists render as `[1, 2]`, maps as `['key' => value]` (keys that are
/// canonical integers stay bare) and strings single-quoted with `\` and `'` escaped.
#[must_use]
pub fn render_literal(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => quote_single(text),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_literal).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(entries) => {
            let rendered: Vec<String> = entries
                .iter()
                .map(|(key, item)| {
                    let key_text = if is_integer_key(key) {
                        key.clone()
                    } else {
                        quote_single(key)
                    };
                    format!("{key_text} => {}", render_literal(item))
                })
                .collect();
            format!("[{}]", rendered.join(", "))
        }
    }
}

/// Whether the host reads `key` as this exact integer. `"01"` or `"+1"`
/// parse but would collapse onto another key.
fn is_integer_key(key: &str) -> bool {
    key.parse::<i64>().is_ok_and(|number| number.to_string() == key)
}

fn quote_single(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}
