//! Line-oriented output buffer.
//!
//! Emitters write logical lines at a nesting depth; the configured indent and
//! line ending are only applied when the buffer is finished, so both
//! renderings honour [`GeneratorConfig`] without formatting strings by hand.

use super::traits::GeneratorConfig;

#[derive(Debug, Default)]
pub(crate) struct CodeWriter {
    lines: Vec<(usize, String)>,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line at the current depth.
    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push((self.depth, text.into()));
    }

    pub fn blank(&mut self) {
        self.lines.push((0, String::new()));
    }

    /// Append a line, then indent the following lines one level.
    pub fn open(&mut self, text: impl Into<String>) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedent one level, then append a line.
    pub fn close(&mut self, text: impl Into<String>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// Append a snippet whose lines are indented with two spaces per level,
    /// re-indented relative to the current depth.
    pub fn snippet<S: AsRef<str>>(&mut self, lines: &[S]) {
        for text in lines {
            let text = text.as_ref();
            if text.is_empty() {
                self.blank();
                continue;
            }
            let trimmed = text.trim_start_matches(' ');
            let level = (text.len() - trimmed.len()) / 2;
            self.lines.push((self.depth + level, trimmed.to_string()));
        }
    }

    /// Render with the configured indent and line ending. The output ends
    /// with a line ending.
    pub fn finish(self, config: &GeneratorConfig) -> String {
        let eol = config.line_ending.as_str();
        let mut out = String::new();
        for (depth, text) in self.lines {
            if !text.is_empty() {
                out.push_str(&config.indent.indent(depth));
                out.push_str(&text);
            }
            out.push_str(eol);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::traits::{IndentStyle, LineEnding};

    #[test]
    fn test_open_close_nesting() {
        let mut w = CodeWriter::new();
        w.open("a {");
        w.line("b;");
        w.close("}");
        assert_eq!(w.finish(&GeneratorConfig::default()), "a {\n  b;\n}\n");
    }

    #[test]
    fn test_snippet_reindents() {
        let mut w = CodeWriter::new();
        w.open("<script>");
        w.snippet(&["f() {", "  g();", "", "}"]);
        w.close("</script>");
        let config = GeneratorConfig::new().with_indent(IndentStyle::Tabs);
        assert_eq!(
            w.finish(&config),
            "<script>\n\tf() {\n\t\tg();\n\n\t}\n</script>\n"
        );
    }

    #[test]
    fn test_crlf() {
        let mut w = CodeWriter::new();
        w.line("x");
        w.blank();
        let config = GeneratorConfig::new().with_line_ending(LineEnding::CrLf);
        assert_eq!(w.finish(&config), "x\r\n\r\n");
    }
}
