use serde::{Deserialize, Serialize};

/// Aggregate health of the pipeline's collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall_status: HealthStatus,
    pub collaborators: Vec<CollaboratorHealth>,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Reachability of one external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
}
