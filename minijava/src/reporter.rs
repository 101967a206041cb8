//! Diagnostic sink for a single run.
use log::debug;

use crate::error::Diagnostic;

/// Collects every error reported while checking one program.
///
/// A reporter is created per run and handed to the scanner and
/// parser as `&mut Reporter`. Once an error is reported,
/// [`Reporter::has_errors`] stays `true` for the rest of the run.
#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: impl Into<Diagnostic>) {
        let diagnostic = diagnostic.into();
        debug!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Reported errors, in the order they occurred.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{error::ScanError, tokens::Pos};

    #[test]
    fn test_has_errors_is_sticky() {
        let mut reporter = Reporter::new();
        assert!(!reporter.has_errors());
        assert_eq!(reporter.error_count(), 0);

        reporter.report(ScanError::UnterminatedComment { pos: Pos::new(3, 1) });
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);

        reporter.report(ScanError::UnknownCharacter {
            found: '@',
            pos: Pos::new(4, 2),
        });
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 2);
        assert!(reporter.diagnostics().iter().all(Diagnostic::is_scan));
    }
}
