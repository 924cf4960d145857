//! Indentation-aware line writer for generated JavaScript

const INDENT: &str = "  ";

#[derive(Debug, Default)]
pub struct CodeWriter {
    output: String,
    indent_level: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indentation
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.output.push('\n');
            return;
        }
        self.output.push_str(&INDENT.repeat(self.indent_level));
        self.output.push_str(text);
        self.output.push('\n');
    }

    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Write `text` and indent following lines
    pub fn open(&mut self, text: &str) {
        self.line(text);
        self.indent_level += 1;
    }

    /// Dedent and write `text`
    pub fn close(&mut self, text: &str) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.line(text);
    }

    /// `open … close` around an iterator of entries, or `{empty}` when there are none
    pub fn block<I>(&mut self, head: &str, entries: I, tail: &str, empty: &str)
    where
        I: IntoIterator<Item = String>,
    {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            self.line(&format!("{head}{empty}{tail}"));
            return;
        }
        self.open(head.trim_end());
        for entry in entries {
            self.line(&entry);
        }
        self.close(tail);
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// Single-quoted JavaScript string literal
pub fn js_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut w = CodeWriter::new();
        w.open("function f() {");
        w.line("return 1;");
        w.close("}");
        assert_eq!(w.finish(), "function f() {\n  return 1;\n}\n");
    }

    #[test]
    fn test_block_empty_and_filled() {
        let mut w = CodeWriter::new();
        w.block("const a = {", Vec::new(), "};", "");
        w.block("const b = [", vec!["1,".to_string()], "];", "");
        assert_eq!(w.finish(), "const a = {};\nconst b = [\n  1,\n];\n");
    }

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("SA"), "'SA'");
        assert_eq!(js_string("it's"), "'it\\'s'");
        assert_eq!(js_string("a\\b"), "'a\\\\b'");
    }
}
