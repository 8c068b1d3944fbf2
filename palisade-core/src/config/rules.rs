use serde::{Deserialize, Serialize};

use crate::constants;

/// The access-isolation rule vocabulary every returned statement must
/// satisfy. Table and column names are matched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkRules {
    /// Table whose user-identity filter establishes tenant isolation.
    pub anchor_table: String,
    /// Secondary business-data table joined against the anchor.
    pub fact_table: String,
    /// Tenant-identity column on the anchor table.
    pub user_id_column: String,
    /// Bind placeholder expected on the right-hand side of the filter.
    pub placeholder: String,
    /// Column names whose presence marks a statement as temporal.
    pub temporal_columns: Vec<String>,
}

impl Default for FrameworkRules {
    fn default() -> Self {
        Self {
            anchor_table: constants::DEFAULT_ANCHOR_TABLE.to_string(),
            fact_table: constants::DEFAULT_FACT_TABLE.to_string(),
            user_id_column: constants::DEFAULT_USER_ID_COLUMN.to_string(),
            placeholder: constants::DEFAULT_PLACEHOLDER.to_string(),
            temporal_columns: ["PERIODE", "DATE", "MOIS", "ANNEE"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FrameworkRules {
    /// The tenant filter predicate for a given anchor alias,
    /// e.g. `a.ID_USER = ?`.
    pub fn user_filter(&self, alias: &str) -> String {
        format!("{alias}.{} = {}", self.user_id_column, self.placeholder)
    }

    /// Marker name for the anchor table under a given alias,
    /// e.g. `DEPOT_a`.
    pub fn anchor_marker(&self, alias: &str) -> String {
        format!("{}_{alias}", self.anchor_table.to_uppercase())
    }

    /// Marker name for the fact table under a given alias,
    /// e.g. `FACTS_b`.
    pub fn fact_marker(&self, alias: &str) -> String {
        format!("{}_{alias}", self.fact_table.to_uppercase())
    }
}
