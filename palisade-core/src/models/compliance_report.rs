use serde::{Deserialize, Serialize};

/// Structured result of analyzing one SQL statement against the
/// access-isolation rules. Compliant iff all four flags are true.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Aliases bound to the anchor table, in discovery order.
    pub anchor_aliases: Vec<String>,
    /// Aliases bound to the fact table, in discovery order.
    pub fact_aliases: Vec<String>,
    /// A tenant filter predicate bound to an anchor alias was found.
    pub has_user_filter: bool,
    /// At least one anchor alias was discovered.
    pub has_anchor_table: bool,
    /// A trailing marker naming the anchor table and its alias was found.
    pub has_required_markers: bool,
    /// Every statement starts with a read-only verb.
    pub is_read_only: bool,
    /// Trailing marker names found, without the surrounding `#`.
    pub markers_found: Vec<String>,
    /// One human-readable reason per failing flag.
    pub diagnostics: Vec<String>,
}

impl ComplianceReport {
    /// Whether all four invariants hold.
    pub fn is_compliant(&self) -> bool {
        self.has_user_filter
            && self.has_anchor_table
            && self.has_required_markers
            && self.is_read_only
    }

    /// A report for input that could not be analyzed at all: every flag
    /// false, carrying the given diagnostic.
    pub fn malformed(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostics: vec![diagnostic.into()],
            ..Self::default()
        }
    }
}
