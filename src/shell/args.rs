//! Argument splitting helpers shared by the built-in commands.

use crate::error::CommandError;

/// Splits an argument line into words, honouring quotes.
///
/// Backslashes outside single quotes are kept literally so namespaced class
/// names such as `App\Mailer` survive unquoted.
pub(super) fn split_words(args: &str) -> Result<Vec<String>, CommandError> {
    shell_words::split(&escape_backslashes(args)).map_err(|error| CommandError::Arguments {
        message: error.to_string(),
    })
}

/// Takes `count` whitespace-separated words off the front of `args` and
/// returns them with the untouched remainder.
///
/// Returns `None` when fewer than `count` words are present.
pub(super) fn leading_words(args: &str, count: usize) -> Option<(Vec<&str>, &str)> {
    let mut words = Vec::with_capacity(count);
    let mut rest = args.trim_start();
    for _ in 0..count {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (word, tail) = rest.split_at(end);
        words.push(word);
        rest = tail.trim_start();
    }
    Some((words, rest.trim_end()))
}

/// Splits `$name = expression` into its variable name (without `$`) and the
/// expression. Comparisons such as `$a == 1` are not assignments.
pub(super) fn assignment(text: &str) -> Option<(&str, &str)> {
    let (target, value) = text.split_once('=')?;
    if value.starts_with('=') || value.starts_with('>') {
        return None;
    }
    let trimmed = target.trim();
    let name = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let expression = value.trim().trim_end_matches(';').trim_end();
    (is_identifier(name) && !expression.is_empty()).then_some((name, expression))
}

/// Whether `name` is a valid host identifier (class or method name).
pub(super) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn escape_backslashes(args: &str) -> String {
    let mut escaped = String::with_capacity(args.len());
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = args.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '\\' if !in_single => {
                if in_double && chars.peek() == Some(&'"') {
                    escaped.push(c);
                    if let Some(quote) = chars.next() {
                        escaped.push(quote);
                    }
                    continue;
                }
                escaped.push('\\');
            }
            _ => {}
        }
        escaped.push(c);
    }
    escaped
}
