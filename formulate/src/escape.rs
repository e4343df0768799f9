//! Escaping helpers for embedding user text into generated code.

/// Escape text for HTML element content and double-quoted attributes.
pub fn html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for JSX element content, where braces open expressions.
pub fn jsx_text(s: &str) -> String {
    html(s).replace('{', "&#123;").replace('}', "&#125;")
}

/// Body of a double-quoted JavaScript string literal.
pub fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '<' => out.push_str("\\u003c"),
            _ => out.push(c),
        }
    }
    out
}

/// Double-quoted JavaScript string literal.
pub fn js_quoted(s: &str) -> String {
    format!("\"{}\"", js_string(s))
}

/// CSS id selector (`#id`) for an arbitrary id.
pub fn css_id_selector(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 1);
    out.push('#');
    for (i, c) in id.chars().enumerate() {
        match c {
            'a'..='z' | 'A'..='Z' | '_' | '-' => out.push(c),
            '0'..='9' if i > 0 => out.push(c),
            '0'..='9' => out.push_str(&format!("\\{:x} ", c as u32)),
            c if !c.is_ascii() => out.push(c),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:x} ", c as u32)),
            _ => {
                out.push('\\');
                out.push(c);
            }
        }
    }
    out
}

/// Regex source as a JavaScript regex literal (`/source/`).
///
/// Existing escapes are kept as written; bare `/` and line terminators are
/// escaped so the literal cannot end early.
pub fn js_regex_literal(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 2);
    out.push('/');
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                match chars.next() {
                    Some(next) => push_regex_char(&mut out, next),
                    None => out.push('\\'),
                }
            }
            '/' => out.push_str("\\/"),
            _ => push_regex_char(&mut out, c),
        }
    }
    out.push('/');
    out
}

fn push_regex_char(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\u{2028}' => out.push_str("\\u2028"),
        '\u{2029}' => out.push_str("\\u2029"),
        _ => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escapes_markup() {
        assert_eq!(
            html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_jsx_text_escapes_braces() {
        assert_eq!(jsx_text("{name}"), "&#123;name&#125;");
    }

    #[test]
    fn test_js_string_escapes_quotes_and_newlines() {
        assert_eq!(js_string("it's \"ok\"\n"), "it\\'s \\\"ok\\\"\\n");
        assert_eq!(js_quoted("</script>"), "\"\\u003c/script>\"");
    }

    #[test]
    fn test_css_id_selector() {
        assert_eq!(css_id_selector("email-1700000000000"), "#email-1700000000000");
        assert_eq!(css_id_selector("1st"), "#\\31 st");
        assert_eq!(css_id_selector("a.b"), "#a\\.b");
    }

    #[test]
    fn test_regex_literal_escapes_slashes() {
        assert_eq!(js_regex_literal("^a/b$"), "/^a\\/b$/");
    }

    #[test]
    fn test_regex_literal_keeps_existing_escapes() {
        assert_eq!(js_regex_literal(r"^\d+\/\d+$"), r"/^\d+\/\d+$/");
        assert_eq!(js_regex_literal(r"\\"), r"/\\/");
    }

    #[test]
    fn test_regex_literal_trailing_backslash() {
        assert_eq!(js_regex_literal("a\\"), "/a\\\\/");
    }

    #[test]
    fn test_regex_literal_escapes_newline() {
        assert_eq!(js_regex_literal("a\nb"), "/a\\nb/");
    }
}
