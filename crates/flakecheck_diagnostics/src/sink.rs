//! The host-side message surface and a thread-safe diagnostic accumulator.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Where a host shows diagnostics to the user.
///
/// The checker mode clears the panel before adding the diagnostics of a new
/// check, so a panel only ever shows the latest results for its document.
pub trait MessagePanel {
    /// Removes all previously displayed messages.
    fn clear_messages(&self);

    /// Displays a batch of diagnostics.
    fn add_messages(&self, diagnostics: &[Diagnostic]);
}

/// A thread-safe accumulator for diagnostics.
///
/// Multiple threads can emit diagnostics concurrently via [`emit`](Self::emit).
/// The error count is tracked atomically for fast `has_errors` checks without
/// locking the diagnostic vector.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
        }
    }

    /// Emits a diagnostic into the sink.
    ///
    /// If the diagnostic has [`Severity::Error`], the error count is incremented.
    pub fn emit(&self, diag: Diagnostic) {
        // Counted under the lock so a concurrent `clear` cannot split the two.
        let mut diagnostics = self.lock();
        if diag.severity == Severity::Error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        diagnostics.push(diag);
    }

    /// Emits every diagnostic of a batch, preserving order.
    pub fn emit_all(&self, batch: impl IntoIterator<Item = Diagnostic>) {
        let mut diagnostics = self.lock();
        for diag in batch {
            if diag.severity == Severity::Error {
                self.error_count.fetch_add(1, Ordering::Relaxed);
            }
            diagnostics.push(diag);
        }
    }

    /// Drops all accumulated diagnostics and resets the error count.
    pub fn clear(&self) {
        let mut diagnostics = self.lock();
        diagnostics.clear();
        self.error_count.store(0, Ordering::Relaxed);
    }

    /// Returns `true` if any error-severity diagnostics are held.
    pub fn has_errors(&self) -> bool {
        self.error_count.load(Ordering::Relaxed) > 0
    }

    /// Returns the number of error-severity diagnostics held.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    ///
    /// The error count is not reset; use [`clear`](Self::clear) for that.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.lock();
        std::mem::take(&mut *diagnostics)
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        // A poisoned lock still holds a consistent Vec.
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagePanel for DiagnosticSink {
    fn clear_messages(&self) {
        self.clear();
    }

    fn add_messages(&self, diagnostics: &[Diagnostic]) {
        self.emit_all(diagnostics.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_error() -> Diagnostic {
        Diagnostic::error("undefined name 'foo'", 3)
    }

    fn make_warning() -> Diagnostic {
        Diagnostic::warning("'os' imported but unused", 1)
    }

    #[test]
    fn empty_sink() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert_eq!(sink.error_count(), 0);
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn emit_error() {
        let sink = DiagnosticSink::new();
        sink.emit(make_error());
        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn emit_warning_not_error() {
        let sink = DiagnosticSink::new();
        sink.emit(make_warning());
        assert!(!sink.has_errors());
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn take_all_drains() {
        let sink = DiagnosticSink::new();
        sink.emit(make_error());
        sink.emit(make_warning());
        assert_eq!(sink.take_all().len(), 2);
        assert!(sink.take_all().is_empty());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn panel_clear_then_add_replaces_contents() {
        let sink = DiagnosticSink::new();
        sink.add_messages(&[make_error(), make_warning()]);
        assert_eq!(sink.error_count(), 1);

        sink.clear_messages();
        assert!(sink.diagnostics().is_empty());
        assert!(!sink.has_errors());

        sink.add_messages(&[make_warning()]);
        assert_eq!(sink.diagnostics(), vec![make_warning()]);
    }

    #[test]
    fn thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let sink = Arc::new(DiagnosticSink::new());
        let mut handles = Vec::new();

        for _ in 0..10 {
            let sink = Arc::clone(&sink);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    sink.emit(make_error());
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(sink.error_count(), 1000);
        assert_eq!(sink.diagnostics().len(), 1000);
    }

    #[test]
    fn error_count_matches_contents_across_clears() {
        use std::sync::Arc;
        use std::thread;

        let sink = Arc::new(DiagnosticSink::new());
        let mut handles = Vec::new();

        for _ in 0..4 {
            let sink = Arc::clone(&sink);
            handles.push(thread::spawn(move || {
                for _ in 0..500 {
                    sink.emit(make_error());
                    sink.emit(make_warning());
                }
            }));
        }
        {
            let sink = Arc::clone(&sink);
            handles.push(thread::spawn(move || {
                for _ in 0..200 {
                    sink.clear_messages();
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        let held = sink
            .diagnostics()
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        assert_eq!(sink.error_count(), held);
        assert_eq!(sink.has_errors(), held > 0);
    }
}
