//! The logging collaborator used for undecodable sources.

/// Receives warnings that are logged rather than shown as diagnostics.
pub trait WarningLog {
    /// Records one warning line.
    fn warn(&self, message: &str);
}

/// Forwards warnings to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFacade;

impl WarningLog for LogFacade {
    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }
}

impl<F> WarningLog for F
where
    F: Fn(&str),
{
    fn warn(&self, message: &str) {
        self(message)
    }
}
