//! Structured Diagnostics
//!
//! Collects lexical and syntax errors as diagnostics and renders them
//! either for a terminal (`path:line:col: error[CODE]: message`) or as
//! machine-readable JSON reports.

use std::fmt;

use serde::Serialize;

use crate::utils::{Error, LineIndex, Span};

// ==================== Diagnostic ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One reported problem, positioned by byte span
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Error code (e.g., "E0001")
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    /// Optional hint on how to fix the input
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic from a lexer or parser error
    pub fn from_error(error: &Error) -> Self {
        Self {
            code: error.code(),
            severity: Severity::Error,
            message: error.to_string(),
            span: error.span(),
            help: help_for(error),
        }
    }

    /// `path:line:col: error[CODE]: message`
    pub fn render(&self, file: &str, index: &LineIndex) -> String {
        let (line, column) = index.line_col(self.span.start);
        let mut out = format!(
            "{}:{}:{}: {}[{}]: {}",
            file, line, column, self.severity, self.code, self.message
        );
        if let Some(help) = &self.help {
            out.push_str(&format!("\n  = help: {}", help));
        }
        out
    }

    /// JSON-friendly form with resolved line/column location
    pub fn report(&self, file: &str, index: &LineIndex) -> Report {
        let (line, column) = index.line_col(self.span.start);
        let (end_line, end_column) = index.line_col(self.span.end);
        Report {
            code: self.code.to_string(),
            severity: self.severity,
            message: self.message.clone(),
            location: Location {
                file: file.to_string(),
                line,
                column,
                end_line,
                end_column,
            },
            help: self.help.clone(),
        }
    }
}

/// Fix hints for errors where one obvious repair exists
fn help_for(error: &Error) -> Option<String> {
    let help = match error {
        Error::UnterminatedString { .. } => "add a closing `\"` before the end of the line",
        Error::UnterminatedChar { .. } => "add a closing `'`",
        Error::InvalidEscape { .. } => {
            "supported escapes are `\\n`, `\\t`, `\\r`, `\\0`, `\\\\` and the quote character"
        }
        Error::InvalidCharLiteral { .. } => "use a string literal for more than one character",
        Error::MalformedNumber { .. } => "separate the number from the name that follows it",
        Error::UnterminatedComment { .. } => "close the comment with `*/`",
        Error::NestingTooDeep { .. } => "move inner parts into local variables or functions",
        Error::UnexpectedToken { expected, .. } if expected == "`;`" => {
            "statements and declarations end with `;`"
        }
        _ => return None,
    };
    Some(help.to_string())
}

// ==================== JSON Report ====================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    pub help: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

// ==================== Collector ====================

/// Diagnostics for one source buffer, in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_errors<'a>(errors: impl IntoIterator<Item = &'a Error>) -> Self {
        let mut diagnostics = Self::new();
        for error in errors {
            diagnostics.push_error(error);
        }
        diagnostics
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        // keep source order when diagnostics arrive out of order
        let at = self
            .items
            .partition_point(|d| d.span.start <= diagnostic.span.start);
        self.items.insert(at, diagnostic);
    }

    pub fn push_error(&mut self, error: &Error) {
        self.push(Diagnostic::from_error(error));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Terminal rendering, one diagnostic per entry; past `max` the rest
    /// is summarized in a final line
    pub fn render_human(&self, file: &str, source: &str, max: Option<usize>) -> String {
        let index = LineIndex::new(source);
        let shown = max.unwrap_or(self.items.len()).min(self.items.len());

        let mut lines: Vec<String> = self.items[..shown]
            .iter()
            .map(|d| d.render(file, &index))
            .collect();
        if shown < self.items.len() {
            lines.push(format!(
                "... and {} more diagnostic(s)",
                self.items.len() - shown
            ));
        }
        lines.join("\n")
    }

    /// Reports for JSON output, capped at `max`
    pub fn reports(&self, file: &str, source: &str, max: Option<usize>) -> Vec<Report> {
        let index = LineIndex::new(source);
        self.items
            .iter()
            .take(max.unwrap_or(usize::MAX))
            .map(|d| d.report(file, &index))
            .collect()
    }

    /// Pretty JSON array of reports
    pub fn to_json(&self, file: &str, source: &str, max: Option<usize>) -> String {
        serde_json::to_string_pretty(&self.reports(file, source, max))
            .unwrap_or_else(|_| "[]".to_string())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
