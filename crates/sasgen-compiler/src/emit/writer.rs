//! Indented C++ text builder.

const INDENT: &str = "    ";

/// Line-oriented writer that tracks brace depth.
#[derive(Debug, Default)]
pub struct CodeWriter {
    output: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.output.push_str(INDENT);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Write `head {` (or a bare `{`) and indent.
    pub fn open(&mut self, head: impl AsRef<str>) {
        let head = head.as_ref();
        if head.is_empty() {
            self.line("{");
        } else {
            self.line(format!("{head} {{"));
        }
        self.depth += 1;
    }

    /// Dedent and write `}`.
    pub fn close(&mut self) {
        self.close_with("");
    }

    /// Dedent and write `}` followed by `suffix`, e.g. `};`.
    pub fn close_with(&mut self, suffix: &str) {
        self.dedent();
        self.line(format!("}}{suffix}"));
    }

    /// Dedent, write `text`, indent again, as for `} else {`.
    pub fn reopen(&mut self, text: impl AsRef<str>) {
        self.dedent();
        self.line(text);
        self.depth += 1;
    }

    /// Open a function definition.
    pub fn function(&mut self, ret: &str, name: &str, params: &[&str]) {
        self.open(signature(ret, name, params));
    }

    pub fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0, "unbalanced braces");
        self.output
    }

    /// Indent without opening a brace, e.g. under a `case` label.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.depth > 0, "dedent below zero");
        self.depth = self.depth.saturating_sub(1);
    }
}

/// `ret name(p1, p2)`
pub fn signature(ret: &str, name: &str, params: &[&str]) -> String {
    format!("{ret} {name}({})", params.join(", "))
}
