//! Top-level operator scanner.
//!
//! Walks an expression byte by byte, skipping string literals and anything
//! nested inside brackets, and reports the operator tokens that sit at the
//! outermost level. Multi-character tokens are matched longest first, so
//! `>=` is never reported as `>` and `->` never as `>`.

/// An operator token found outside brackets and string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct TopLevelToken {
    /// The token text as listed in [`SYMBOLS`], or `instanceof`.
    pub(super) symbol: &'static str,
    /// Byte offset of the first character.
    pub(super) start: usize,
    /// Byte offset one past the last character.
    pub(super) end: usize,
}

/// Keyword token for type checks.
pub(super) const INSTANCEOF: &str = "instanceof";

/// Symbol tokens, longest first. The flag marks tokens worth reporting;
/// the rest are consumed so their characters cannot form a false match.
const SYMBOLS: &[(&str, bool)] = &[
    ("===", true),
    ("!==", true),
    ("<=>", false),
    ("<<=", false),
    (">>=", false),
    ("**=", false),
    ("??=", false),
    ("?->", false),
    ("==", true),
    ("!=", true),
    ("<>", false),
    (">=", true),
    ("<=", true),
    ("->", false),
    ("=>", false),
    ("<<", false),
    (">>", false),
    ("&&", false),
    ("||", false),
    ("??", false),
    ("::", false),
    (">", true),
    ("<", true),
];

/// Returns every reportable operator at the outermost nesting level, in
/// source order.
pub(super) fn top_level_tokens(text: &str) -> Vec<TopLevelToken> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut depth = 0_usize;
    let mut pos = 0_usize;

    while let Some(&byte) = bytes.get(pos) {
        match byte {
            b'\'' | b'"' => {
                pos = string_end(bytes, pos);
                continue;
            }
            b'(' | b'[' | b'{' => {
                depth += 1;
                pos += 1;
                continue;
            }
            b')' | b']' | b'}' => {
                depth = depth.saturating_sub(1);
                pos += 1;
                continue;
            }
            _ => {}
        }

        if depth > 0 {
            pos += 1;
            continue;
        }

        if is_word_start(byte) {
            let end = word_end(bytes, pos);
            let is_keyword = byte != b'$'
                && text
                    .get(pos..end)
                    .is_some_and(|word| word.eq_ignore_ascii_case(INSTANCEOF));
            if is_keyword {
                tokens.push(TopLevelToken {
                    symbol: INSTANCEOF,
                    start: pos,
                    end,
                });
            }
            pos = end;
            continue;
        }

        let rest = bytes.get(pos..).unwrap_or_default();
        if let Some(&(symbol, reported)) = SYMBOLS
            .iter()
            .find(|(symbol, _)| rest.starts_with(symbol.as_bytes()))
        {
            let end = pos + symbol.len();
            if reported {
                tokens.push(TopLevelToken {
                    symbol,
                    start: pos,
                    end,
                });
            }
            pos = end;
            continue;
        }

        pos += 1;
    }

    tokens
}

/// Finds the bracket that closes the one opened at `open`.
///
/// Returns `None` when `open` is not an opening bracket or the brackets are
/// unbalanced.
pub(super) fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if !matches!(bytes.get(open), Some(b'(' | b'[' | b'{')) {
        return None;
    }

    let mut depth = 0_usize;
    let mut pos = open;
    while let Some(&byte) = bytes.get(pos) {
        match byte {
            b'\'' | b'"' => {
                pos = string_end(bytes, pos);
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

/// Splits `text` at every outermost occurrence of `delimiter`.
///
/// Delimiters inside brackets or string literals do not split. The pieces
/// are returned untrimmed; a text without the delimiter yields one piece.
pub(crate) fn split_top_level<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut pos = 0_usize;
    let mut start = 0_usize;

    while let Some(&byte) = bytes.get(pos) {
        match byte {
            b'\'' | b'"' => {
                pos = string_end(bytes, pos);
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ if depth == 0
                && !delimiter.is_empty()
                && bytes
                    .get(pos..)
                    .is_some_and(|rest| rest.starts_with(delimiter.as_bytes())) =>
            {
                parts.push(text.get(start..pos).unwrap_or_default());
                pos += delimiter.len();
                start = pos;
                continue;
            }
            _ => {}
        }
        pos += 1;
    }

    parts.push(text.get(start..).unwrap_or_default());
    parts
}

/// Returns the offset just past the string literal starting at `start`.
///
/// Unterminated literals run to the end of the text.
fn string_end(bytes: &[u8], start: usize) -> usize {
    let Some(&quote) = bytes.get(start) else {
        return bytes.len();
    };
    let mut pos = start + 1;
    while let Some(&byte) = bytes.get(pos) {
        if byte == b'\\' {
            pos += 2;
            continue;
        }
        if byte == quote {
            return pos + 1;
        }
        pos += 1;
    }
    bytes.len()
}

const fn is_word_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || matches!(byte, b'_' | b'$' | b'\\')
}

fn word_end(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    while let Some(&byte) = bytes.get(pos) {
        if !(byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'\\')) {
            break;
        }
        pos += 1;
    }
    pos
}
