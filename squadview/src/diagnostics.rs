//! Developer-facing diagnostics.
//!
//! Components never surface failures to the page. They report them through
//! an injected [`Diagnostics`] sink instead, which by default forwards to the
//! `log` facade.

use std::sync::{Arc, Mutex};

/// How serious a reported problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

/// A single report from a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Component that raised it, e.g. `"table_sort"` or `"color"`.
    pub source: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(source: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            source,
            message: message.into(),
        }
    }

    pub fn error(source: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            source,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.source, self.message)
    }
}

/// Sink for diagnostics raised by the presentation helpers.
pub trait Diagnostics: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade, using the component as target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        let level = match diagnostic.severity {
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        };
        log::log!(target: diagnostic.source, level, "{}", diagnostic.message);
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    reports: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of everything reported so far.
    pub fn reports(&self) -> Vec<Diagnostic> {
        self.reports.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Drain everything reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.reports
            .lock()
            .map(|mut g| std::mem::take(&mut *g))
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().map(|g| g.is_empty()).unwrap_or(true)
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut guard) = self.reports.lock() {
            guard.push(diagnostic);
        }
    }
}

/// The default sink.
pub fn log_diagnostics() -> Arc<dyn Diagnostics> {
    Arc::new(LogDiagnostics)
}
