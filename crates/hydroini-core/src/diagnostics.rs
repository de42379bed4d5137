//! Diagnostics emitted by the reader and writer.
//!
//! Readers and writers own a [`DiagnosticSink`] handed to them at
//! construction; nothing in this crate logs through process-wide state of its
//! own. [`TracingSink`] forwards to whatever `tracing` subscriber the
//! application installed.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            line: None,
            message: message.into(),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

pub trait DiagnosticSink {
    fn record(&mut self, diagnostic: Diagnostic);
}

/// Discards every diagnostic.
impl DiagnosticSink for () {
    fn record(&mut self, _diagnostic: Diagnostic) {}
}

impl<S> DiagnosticSink for &mut S
where
    S: DiagnosticSink + ?Sized,
{
    fn record(&mut self, diagnostic: Diagnostic) {
        (**self).record(diagnostic);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        let Diagnostic {
            severity,
            line,
            message,
        } = diagnostic;
        match (severity, line) {
            (Severity::Debug, Some(line)) => tracing::debug!(line, "{message}"),
            (Severity::Debug, None) => tracing::debug!("{message}"),
            (Severity::Info, Some(line)) => tracing::info!(line, "{message}"),
            (Severity::Info, None) => tracing::info!("{message}"),
            (Severity::Warning, Some(line)) => tracing::warn!(line, "{message}"),
            (Severity::Warning, None) => tracing::warn!("{message}"),
            (Severity::Error, Some(line)) => tracing::error!(line, "{message}"),
            (Severity::Error, None) => tracing::error!("{message}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.severity == severity)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectingSink, Diagnostic, DiagnosticSink, Severity, TracingSink};

    #[test]
    fn collecting_sink_keeps_order_and_filters_by_severity() {
        let mut sink = CollectingSink::new();
        sink.record(Diagnostic::new(Severity::Debug, "skipped").at_line(1));
        sink.record(Diagnostic::new(Severity::Info, "read 2 sections"));
        sink.record(Diagnostic::new(Severity::Debug, "skipped").at_line(4));

        let lines = sink
            .with_severity(Severity::Debug)
            .filter_map(|diagnostic| diagnostic.line)
            .collect::<Vec<_>>();
        assert_eq!(lines, [1, 4]);
        assert_eq!(sink.diagnostics().len(), 3);
    }

    #[test]
    fn borrowed_sink_records_into_owner() {
        fn emit(mut sink: impl DiagnosticSink) {
            sink.record(Diagnostic::new(Severity::Warning, "note"));
        }

        let mut sink = CollectingSink::new();
        emit(&mut sink);
        emit(&mut sink);
        assert_eq!(sink.into_diagnostics().len(), 2);
    }

    #[test]
    fn tracing_sink_accepts_records_without_subscriber() {
        let mut sink = TracingSink;
        sink.record(Diagnostic::new(Severity::Error, "bad header").at_line(7));
        ().record(Diagnostic::new(Severity::Info, "dropped"));
    }
}
