//! Observation hook for pipeline diagnostics.

use super::warning::{Diagnostic, ValidationResult};

/// Diagnostic codes emitted by the pipeline.
pub mod codes {
    pub const LENGTH_REPAIR: &str = "pxgov::length-repair";
    pub const PALETTE_REDUCED: &str = "pxgov::palette-reduced";
    pub const PALETTE_LOCKED: &str = "pxgov::palette-locked";
    pub const MASK_UNUSABLE: &str = "pxgov::mask-unusable";
    pub const BACKGROUND_REMOVED: &str = "pxgov::background-removed";
}

/// Receives diagnostics as the pipeline runs.
///
/// The core never logs on its own; callers decide where diagnostics go.
pub trait Observer {
    fn observe(&mut self, diagnostic: Diagnostic);
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn observe(&mut self, _diagnostic: Diagnostic) {}
}

impl Observer for ValidationResult {
    fn observe(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<F: FnMut(Diagnostic)> Observer for F {
    fn observe(&mut self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |d: Diagnostic| seen.push(d.code);
            observer.observe(Diagnostic::info(codes::PALETTE_LOCKED, "locked"));
        }
        assert_eq!(seen, vec![codes::PALETTE_LOCKED.to_string()]);
    }

    #[test]
    fn test_result_observer_collects() {
        let mut result = ValidationResult::new();
        result.observe(Diagnostic::warning(codes::LENGTH_REPAIR, "short"));
        assert_eq!(result.warning_count(), 1);
    }
}
