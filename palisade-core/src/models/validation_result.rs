use serde::{Deserialize, Serialize};

use super::compliance_report::ComplianceReport;

/// Terminal status of one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// Compliant as produced.
    Accepted,
    /// Compliant after one corrective pass.
    Corrected,
    /// Uncorrectable; never cached, never returned as SQL.
    Rejected,
}

/// Verdict of comparing a retrieved candidate against the current
/// request. An inconsistency is a routing decision, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum ConsistencyVerdict {
    Consistent,
    Inconsistent { reason: String },
}

/// Aggregated validation outcome for one SQL statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub report: ComplianceReport,
    /// Light well-formedness check: balanced delimiters, recognizable
    /// leading keyword. Informational; compliance flags drive status.
    pub syntax_valid: bool,
    /// Present only when the exact-match path was considered.
    pub consistency: Option<ConsistencyVerdict>,
    pub status: ValidationStatus,
}
