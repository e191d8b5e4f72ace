//! Diagnostic sinks for the claim construction path.
//!
//! Construction reports anomalies to a sink passed in by the caller rather
//! than to a process-wide logger, so tests can observe or silence them.

use std::sync::Mutex;

/// An anomaly observed while constructing a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The amount could not be represented as an unsigned 64-bit value.
    InvalidAmount { raw: i128 },
}

/// Receives diagnostics from claim construction.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::InvalidAmount { raw } => {
                tracing::error!(amount = %raw, "genesis claim amount is not a valid u64");
            }
        }
    }
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Keeps every diagnostic in memory, in report order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the diagnostics reported so far.
    pub fn events(&self) -> Vec<Diagnostic> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match self.events.lock() {
            Ok(mut events) => events.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.report(Diagnostic::InvalidAmount { raw: -1 });
        sink.report(Diagnostic::InvalidAmount { raw: -2 });

        assert_eq!(
            sink.events(),
            vec![
                Diagnostic::InvalidAmount { raw: -1 },
                Diagnostic::InvalidAmount { raw: -2 },
            ]
        );
    }

    #[test]
    fn test_null_and_tracing_sinks_accept_reports() {
        NullSink.report(Diagnostic::InvalidAmount { raw: -1 });
        TracingSink.report(Diagnostic::InvalidAmount { raw: i128::MAX });
    }
}
