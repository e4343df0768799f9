//! User-supplied validation patterns.
//!
//! A pattern is embedded verbatim as a JavaScript regex literal in both
//! renderings and matched natively by the preview. The preview uses
//! `fancy_regex` so look-around and backreferences behave as they do in the
//! browser; constructs that only the Rust regex dialects understand are
//! rejected before compiling, since the generated script would not load.

use fancy_regex::Regex;

use crate::error::{SchemaError, SchemaResult};

/// Compile a user-supplied pattern source.
///
/// Fails when the source is not a valid flag-less JavaScript pattern or
/// cannot be matched by the preview.
pub fn compile_pattern(source: &str) -> SchemaResult<Regex> {
    if let Some(message) = js_syntax_error(source) {
        return Err(SchemaError::invalid_pattern(source, message));
    }
    Regex::new(source).map_err(|e| SchemaError::invalid_pattern(source, e.to_string()))
}

/// First construct in `source` that a JavaScript regex literal rejects or
/// reads differently from the preview, if any.
pub fn js_syntax_error(source: &str) -> Option<String> {
    let chars: Vec<char> = source.chars().collect();
    let mut in_class = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match c {
            '\\' => {
                match next {
                    None => return Some("pattern ends with a lone backslash".to_string()),
                    Some(e @ ('A' | 'z' | 'Z' | 'p' | 'P' | 'Q' | 'E' | '<' | '>')) => {
                        return Some(format!("escape \\{} is not supported in JavaScript", e));
                    }
                    Some(e @ ('x' | 'u' | 'b' | 'B')) if chars.get(i + 2) == Some(&'{') => {
                        return Some(format!(
                            "escape \\{}{{...}} is not supported in JavaScript",
                            e
                        ));
                    }
                    _ => {}
                }
                i += 2;
                continue;
            }
            '[' if in_class => {
                let message = if next == Some(':') {
                    "POSIX character classes are not supported in JavaScript"
                } else {
                    "nested character classes are not supported in JavaScript"
                };
                return Some(message.to_string());
            }
            '[' => {
                in_class = true;
                let mut first = i + 1;
                if chars.get(first) == Some(&'^') {
                    first += 1;
                }
                if chars.get(first) == Some(&']') {
                    return Some("a ']' leading a character class must be escaped".to_string());
                }
                i = first;
                continue;
            }
            ']' if in_class => in_class = false,
            '&' | '~' | '-' if in_class && next == Some(c) => {
                return Some(format!(
                    "class set operator '{}{}' is not supported in JavaScript",
                    c, c
                ));
            }
            '(' if !in_class && next == Some('?') => {
                if let Some(message) = group_error(&chars[i + 2..]) {
                    return Some(message);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Check the text following `(?`.
fn group_error(rest: &[char]) -> Option<String> {
    let supported = match rest {
        [':' | '=' | '!', ..] => true,
        ['<', '=' | '!', ..] => true,
        ['<', first, ..] => first.is_ascii_alphabetic() || matches!(first, '_' | '$'),
        _ => false,
    };
    if supported {
        return None;
    }
    let shown: String = rest.iter().take(2).collect();
    Some(format!(
        "group syntax '(?{}' is not supported in JavaScript",
        shown
    ))
}
