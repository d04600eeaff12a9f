//! Structured diagnostics accumulated during construction and solve.
//!
//! Warnings are data, not log lines: every `tracing::warn!` emitted at `C5`
//! is paired with a [`Diagnostic`] pushed onto the result, so a caller that
//! never reads logs still learns "shortage penalty triggered at 14 demand
//! cells" from the result struct itself.

use serde::{Deserialize, Serialize};

/// A single diagnostic entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What kind of diagnostic this is.
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
    /// Structured payload, for callers that want the numbers without
    /// parsing `message`.
    pub data: serde_json::Value,
}

impl Diagnostic {
    /// Build a diagnostic with no structured payload.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: serde_json::Value::Null,
        }
    }

    /// Build a diagnostic with a structured payload.
    pub fn with_data(kind: DiagnosticKind, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind,
            message: message.into(),
            data,
        }
    }

    /// "shortage penalty triggered at N demand cells".
    pub fn shortage_triggered(cell_count: usize) -> Self {
        Self::with_data(
            DiagnosticKind::ShortageTriggered,
            format!("shortage penalty triggered at {cell_count} demand cells"),
            serde_json::json!({ "cell_count": cell_count }),
        )
    }

    /// "warmstart applied N% of hints".
    pub fn warmstart_summary(applied: usize, skipped_unknown: usize, skipped_type_mismatch: usize) -> Self {
        let total = applied + skipped_unknown + skipped_type_mismatch;
        let pct = if total == 0 { 0.0 } else { 100.0 * applied as f64 / total as f64 };
        Self::with_data(
            DiagnosticKind::WarmstartApplied,
            format!("warmstart applied {pct:.0}% of hints"),
            serde_json::json!({
                "applied": applied,
                "skipped_unknown": skipped_unknown,
                "skipped_type_mismatch": skipped_type_mismatch,
            }),
        )
    }

    /// A warmstart hint referenced an unrecognized variable.
    pub fn warmstart_unknown_hint(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::with_data(
            DiagnosticKind::WarmstartApplied,
            format!("warmstart hint references unknown variable: {key}"),
            serde_json::json!({ "key": key }),
        )
    }

    /// The MIP gap reported at termination.
    pub fn mip_gap(gap: f64) -> Self {
        Self::with_data(
            DiagnosticKind::SolveSummary,
            format!("final MIP gap {:.4}", gap),
            serde_json::json!({ "gap": gap }),
        )
    }
}

/// What a diagnostic describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Demand went unmet and a shortage penalty was charged.
    ShortageTriggered,
    /// A warmstart hint was applied, skipped, or summarized.
    WarmstartApplied,
    /// Summary information about the solve itself (gap, time limit hit).
    SolveSummary,
    /// Anything not covered by the above.
    Custom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortage_message_names_count() {
        let d = Diagnostic::shortage_triggered(14);
        assert!(d.message.contains("14"));
        assert_eq!(d.kind, DiagnosticKind::ShortageTriggered);
    }

    #[test]
    fn warmstart_summary_percentage() {
        let d = Diagnostic::warmstart_summary(83, 10, 7);
        assert!(d.message.contains("83%"));
    }

    #[test]
    fn warmstart_summary_handles_zero_total() {
        let d = Diagnostic::warmstart_summary(0, 0, 0);
        assert!(d.message.contains("0%"));
    }
}
