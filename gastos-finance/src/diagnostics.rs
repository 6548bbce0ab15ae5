//! Row-level problems found while scanning, and where they are reported.

use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;

/// Something the scanner skipped without failing the scan.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Record with fewer than 4 fields.
    MalformedRow { line: u64, fields: Vec<String> },
    /// Classified row whose amount is not a number.
    InvalidAmount { line: u64, raw: String },
    /// The export could not be decoded; totals were zeroed.
    DecodeFailure { path: PathBuf, message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedRow { line, fields } => {
                write!(f, "line {line}: skipped, expected at least 4 columns: {fields:?}")
            }
            Diagnostic::InvalidAmount { line, raw } => {
                write!(f, "line {line}: invalid amount {raw:?}")
            }
            Diagnostic::DecodeFailure { path, message } => {
                write!(f, "could not decode {}: {message}", path.display())
            }
        }
    }
}

/// Receiver of scan diagnostics.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` as warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::MalformedRow { line, fields } => {
                tracing::warn!(line, columns = fields.len(), "{diagnostic}")
            }
            Diagnostic::InvalidAmount { line, raw } => {
                tracing::warn!(line, amount = %raw, "{diagnostic}")
            }
            Diagnostic::DecodeFailure { path, .. } => {
                tracing::warn!(path = %path.display(), "{diagnostic}")
            }
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    seen: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.seen.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.seen.borrow_mut().push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_keeps_order() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());

        sink.report(Diagnostic::InvalidAmount { line: 5, raw: "abc".into() });
        sink.report(Diagnostic::MalformedRow { line: 6, fields: vec!["x".into()] });

        let seen = sink.diagnostics();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], Diagnostic::InvalidAmount { line: 5, .. }));
        assert!(matches!(seen[1], Diagnostic::MalformedRow { line: 6, .. }));
    }

    #[test]
    fn test_display_names_the_line() {
        let d = Diagnostic::MalformedRow { line: 9, fields: vec!["a".into(), "b".into()] };
        assert_eq!(d.to_string(), r#"line 9: skipped, expected at least 4 columns: ["a", "b"]"#);

        let d = Diagnostic::InvalidAmount { line: 12, raw: "1.2.3".into() };
        assert_eq!(d.to_string(), r#"line 12: invalid amount "1.2.3""#);
    }
}
