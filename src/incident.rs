// Consolidated incidents
// One durable record per real-world episode, not one per noisy clip.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::category::Category;
use crate::evidence::EvidenceRef;

/// The single consolidated result of one session, produced at most once and
/// only when at least one category sustained long enough to alert.
#[derive(Debug, Clone)]
pub struct Incident {
    /// Every category that triggered during the session, sorted.
    pub categories: BTreeSet<Category>,
    /// Highest rising-edge confidence seen across all categories.
    pub peak_confidence: f64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub location: String,
    pub evidence: EvidenceRef,
}

impl Incident {
    /// Comma-joined category names, e.g. "Arson, Fighting". Matches the
    /// summary format the alert dispatcher expects.
    pub fn summary(&self) -> String {
        self.categories
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Destination for consolidated incidents: persistence, alert dispatch, or
/// both. Called at most once per session. Once emitted the incident is
/// immutable; a sink failure must not un-trigger it.
pub trait IncidentSink {
    fn on_incident(&mut self, incident: &Incident) -> crate::error::Result<()>;
}

/// Sink that only logs, standing in for the external alert dispatcher.
pub struct LoggingSink;

impl IncidentSink for LoggingSink {
    fn on_incident(&mut self, incident: &Incident) -> crate::error::Result<()> {
        log::info!(
            "Incident at {}: [{}] peak confidence {:.2}, {} evidence frames ({} .. {})",
            incident.location,
            incident.summary(),
            incident.peak_confidence,
            incident.evidence.frame_count(),
            incident.started_at,
            incident.ended_at,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_is_sorted_union() {
        let mut categories = BTreeSet::new();
        categories.insert(Category::Fighting);
        categories.insert(Category::Arson);
        let incident = Incident {
            categories,
            peak_confidence: 0.9,
            started_at: Utc::now(),
            ended_at: Utc::now(),
            location: "Test".to_string(),
            evidence: EvidenceRef::from_snapshot(Vec::new(), 25.0),
        };
        assert_eq!(incident.summary(), "Arson, Fighting");
    }
}
