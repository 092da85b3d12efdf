//! Low-level helpers for emitting Go text.

use std::collections::BTreeSet;

/// Line-oriented writer producing tab-indented Go source.
#[derive(Debug, Default)]
pub struct GoWriter {
    buf: String,
}

impl GoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `text` at `indent` tabs followed by a newline.
    pub fn line(&mut self, indent: usize, text: impl AsRef<str>) {
        for _ in 0..indent {
            self.buf.push('\t');
        }
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes `name value` pairs with values aligned in one column, the way
    /// gofmt lays out struct fields and composite literals.
    pub fn aligned(&mut self, indent: usize, rows: &[(String, String)]) {
        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, value) in rows {
            self.line(indent, format!("{name:<width$} {value}"));
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Import paths used by one generated file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Imports {
    std: BTreeSet<&'static str>,
    runtime: Option<String>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn std(&mut self, path: &'static str) {
        self.std.insert(path);
    }

    pub fn runtime(&mut self, path: &str) {
        self.runtime = Some(path.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.std.is_empty() && self.runtime.is_none()
    }

    /// Renders a grouped import block: standard library first, then the
    /// runtime package.
    pub fn render(&self, out: &mut GoWriter) {
        if self.is_empty() {
            return;
        }
        out.line(0, "import (");
        for path in &self.std {
            out.line(1, quote(path));
        }
        if let Some(runtime) = &self.runtime {
            if !self.std.is_empty() {
                out.blank();
            }
            out.line(1, quote(runtime));
        }
        out.line(0, ")");
    }
}

/// Quotes `value` as a Go interpreted string literal.
///
/// ```
/// use restgen_lib::codegen::go::quote;
///
/// assert_eq!(quote("/photos/{id}"), r#""/photos/{id}""#);
/// assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
/// ```
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `preferred`, or `preferred` with the smallest numeric suffix that is not
/// in `taken`.
///
/// Generated receivers and locals share a scope with user-declared
/// parameters, so they must not reuse those names.
///
/// ```
/// use restgen_lib::codegen::go::unused_name;
///
/// assert_eq!(unused_name("b", &["id"]), "b");
/// assert_eq!(unused_name("b", &["b", "b1"]), "b2");
/// ```
pub fn unused_name(preferred: &str, taken: &[&str]) -> String {
    if !taken.contains(&preferred) {
        return preferred.to_string();
    }
    (1..)
        .map(|n| format!("{preferred}{n}"))
        .find(|candidate| !taken.contains(&candidate.as_str()))
        .unwrap_or_else(|| preferred.to_string())
}
