/// Compliance subsystem errors. Every variant names the violated
/// invariant so callers can distinguish failure modes.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ComplianceError {
    #[error("statement is not read-only: {detail}")]
    ReadOnlyViolation { detail: String },

    #[error("no anchor table '{anchor_table}' found: synthesizing a join is unsafe")]
    MissingAnchorTable { anchor_table: String },

    #[error("auto-correction left the statement non-compliant: {diagnostics:?}")]
    CorrectionIncomplete { diagnostics: Vec<String> },
}
