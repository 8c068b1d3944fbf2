//! Per-collaborator reachability report.

use palisade_core::constants::VERSION;
use palisade_core::models::{CollaboratorHealth, HealthReport, HealthStatus};
use palisade_core::traits::{ICacheStore, IVectorIndex};
use palisade_generation::ProviderChain;

/// Build a health report from the collaborators' own availability
/// signals. Retrieval and cache loss degrade the pipeline; losing every
/// completion provider makes it unhealthy.
pub fn build(
    index: &dyn IVectorIndex,
    store: &dyn ICacheStore,
    chain: &ProviderChain,
) -> HealthReport {
    let mut collaborators = Vec::with_capacity(3);

    collaborators.push(availability(
        index.name(),
        index.is_available(),
        HealthStatus::Degraded,
        "similarity search degrades to generation-only",
    ));
    collaborators.push(availability(
        store.name(),
        store.is_available(),
        HealthStatus::Degraded,
        "cache degrades to pass-through",
    ));

    let generation = if chain.is_empty() {
        CollaboratorHealth {
            name: "generation".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some("no completion providers configured".to_string()),
        }
    } else if !chain.any_available() {
        CollaboratorHealth {
            name: "generation".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some("no completion provider is reachable".to_string()),
        }
    } else {
        CollaboratorHealth {
            name: "generation".to_string(),
            status: HealthStatus::Healthy,
            message: Some(format!("providers: {}", chain.provider_names().join(", "))),
        }
    };
    collaborators.push(generation);

    let overall_status = derive_overall(&collaborators);
    HealthReport {
        overall_status,
        collaborators,
        version: VERSION.to_string(),
    }
}

fn availability(
    name: &str,
    available: bool,
    when_down: HealthStatus,
    down_message: &str,
) -> CollaboratorHealth {
    if available {
        CollaboratorHealth {
            name: name.to_string(),
            status: HealthStatus::Healthy,
            message: None,
        }
    } else {
        CollaboratorHealth {
            name: name.to_string(),
            status: when_down,
            message: Some(down_message.to_string()),
        }
    }
}

/// Unhealthy if any collaborator is unhealthy, degraded if any is
/// degraded, otherwise healthy.
fn derive_overall(collaborators: &[CollaboratorHealth]) -> HealthStatus {
    let mut worst = HealthStatus::Healthy;
    for c in collaborators {
        match c.status {
            HealthStatus::Unhealthy => return HealthStatus::Unhealthy,
            HealthStatus::Degraded => worst = HealthStatus::Degraded,
            HealthStatus::Healthy => {}
        }
    }
    worst
}
