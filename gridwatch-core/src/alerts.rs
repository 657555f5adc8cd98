//! Alert lifecycle management — validated status transitions, history,
//! and summary statistics for the demo layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::classifier::{AlertStatus, ThreatAlert};

/// Alert registry errors.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert not found: {0}")]
    NotFound(String),
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition { from: AlertStatus, to: AlertStatus },
}

/// An entry in an alert's status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertHistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub from_status: AlertStatus,
    pub to_status: AlertStatus,
    pub actor: String,
    pub note: Option<String>,
}

/// Alert summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total: usize,
    pub open: usize,
    pub by_status: HashMap<String, usize>,
    pub by_severity: HashMap<String, usize>,
}

/// In-memory alert store with lifecycle enforcement.
pub struct AlertRegistry {
    alerts: HashMap<String, ThreatAlert>,
    history: HashMap<String, Vec<AlertHistoryEntry>>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self {
            alerts: HashMap::new(),
            history: HashMap::new(),
        }
    }

    /// Add an alert to the registry. Returns its ID.
    pub fn insert(&mut self, alert: ThreatAlert) -> String {
        let id = alert.id.clone();
        self.alerts.insert(id.clone(), alert);
        id
    }

    /// Get an alert by ID.
    pub fn get(&self, id: &str) -> Option<&ThreatAlert> {
        self.alerts.get(id)
    }

    /// Status history for an alert.
    pub fn history(&self, id: &str) -> &[AlertHistoryEntry] {
        self.history.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Transition an alert's status, validating the move.
    pub fn update_status(
        &mut self,
        id: &str,
        new_status: AlertStatus,
        actor: &str,
        note: Option<&str>,
    ) -> Result<(), AlertError> {
        let alert = self
            .alerts
            .get_mut(id)
            .ok_or_else(|| AlertError::NotFound(id.to_string()))?;

        if !is_valid_transition(alert.status, new_status) {
            return Err(AlertError::InvalidTransition {
                from: alert.status,
                to: new_status,
            });
        }

        self.history.entry(id.to_string()).or_default().push(AlertHistoryEntry {
            timestamp: Utc::now(),
            from_status: alert.status,
            to_status: new_status,
            actor: actor.to_string(),
            note: note.map(String::from),
        });
        alert.status = new_status;
        Ok(())
    }

    /// Shorthand for New -> Investigating.
    pub fn investigate(&mut self, id: &str, actor: &str) -> Result<(), AlertError> {
        self.update_status(id, AlertStatus::Investigating, actor, None)
    }

    /// Shorthand for moving into Mitigating.
    pub fn mark_mitigating(
        &mut self,
        id: &str,
        actor: &str,
        note: Option<&str>,
    ) -> Result<(), AlertError> {
        self.update_status(id, AlertStatus::Mitigating, actor, note)
    }

    /// Shorthand for moving into Resolved.
    pub fn resolve(&mut self, id: &str, actor: &str, note: Option<&str>) -> Result<(), AlertError> {
        self.update_status(id, AlertStatus::Resolved, actor, note)
    }

    /// Shorthand for marking a false positive.
    pub fn mark_false_positive(
        &mut self,
        id: &str,
        actor: &str,
        note: Option<&str>,
    ) -> Result<(), AlertError> {
        self.update_status(id, AlertStatus::FalsePositive, actor, note)
    }

    /// Alerts with a given status.
    pub fn by_status(&self, status: AlertStatus) -> Vec<&ThreatAlert> {
        self.alerts.values().filter(|a| a.status == status).collect()
    }

    /// Alerts not yet resolved or dismissed.
    pub fn open_alerts(&self) -> Vec<&ThreatAlert> {
        self.alerts
            .values()
            .filter(|a| !matches!(a.status, AlertStatus::Resolved | AlertStatus::FalsePositive))
            .collect()
    }

    /// Total alert count.
    pub fn count(&self) -> usize {
        self.alerts.len()
    }

    /// Summary statistics across the registry.
    pub fn summary(&self) -> AlertSummary {
        let mut by_status: HashMap<String, usize> = HashMap::new();
        let mut by_severity: HashMap<String, usize> = HashMap::new();

        for alert in self.alerts.values() {
            *by_status.entry(alert.status.to_string()).or_insert(0) += 1;
            *by_severity.entry(alert.severity.to_string()).or_insert(0) += 1;
        }

        AlertSummary {
            total: self.alerts.len(),
            open: self.open_alerts().len(),
            by_status,
            by_severity,
        }
    }
}

impl Default for AlertRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether a status transition is valid.
fn is_valid_transition(from: AlertStatus, to: AlertStatus) -> bool {
    matches!(
        (from, to),
        (AlertStatus::New, AlertStatus::Investigating)
            | (AlertStatus::New, AlertStatus::Analyzing)
            | (AlertStatus::New, AlertStatus::FalsePositive)
            | (AlertStatus::Investigating, AlertStatus::Analyzing)
            | (AlertStatus::Investigating, AlertStatus::Mitigating)
            | (AlertStatus::Investigating, AlertStatus::Contained)
            | (AlertStatus::Investigating, AlertStatus::FalsePositive)
            | (AlertStatus::Analyzing, AlertStatus::Mitigating)
            | (AlertStatus::Analyzing, AlertStatus::Contained)
            | (AlertStatus::Analyzing, AlertStatus::FalsePositive)
            | (AlertStatus::Mitigating, AlertStatus::Contained)
            | (AlertStatus::Mitigating, AlertStatus::Resolved)
            | (AlertStatus::Contained, AlertStatus::Resolved)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ThreatClassifier;
    use crate::device::{Device, DeviceCategory};
    use crate::threat::{Severity, ThreatCategory};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn make_alert(severity: Severity) -> ThreatAlert {
        let classifier = ThreatClassifier::with_defaults();
        let device = Device::new("cam-9", "Cam 9", DeviceCategory::Camera, "harbor");
        let mut rng = StdRng::seed_from_u64(31);
        classifier.generate_threat_alert(
            &device,
            ThreatCategory::UnauthorizedAccess,
            severity,
            None,
            &mut rng,
        )
    }

    #[test]
    fn test_full_lifecycle() {
        let mut registry = AlertRegistry::new();
        let id = registry.insert(make_alert(Severity::High));

        registry.investigate(&id, "analyst").unwrap();
        registry.mark_mitigating(&id, "analyst", Some("containment underway")).unwrap();
        registry.resolve(&id, "analyst", None).unwrap();

        assert_eq!(registry.get(&id).unwrap().status, AlertStatus::Resolved);
        assert_eq!(registry.history(&id).len(), 3);
    }

    #[test]
    fn test_invalid_transition_rejected() {
        let mut registry = AlertRegistry::new();
        let id = registry.insert(make_alert(Severity::High));

        // New -> Resolved skips the lifecycle.
        let result = registry.update_status(&id, AlertStatus::Resolved, "analyst", None);
        assert!(matches!(result, Err(AlertError::InvalidTransition { .. })));
    }

    #[test]
    fn test_unknown_alert_reports_not_found() {
        let mut registry = AlertRegistry::new();
        assert!(matches!(
            registry.investigate("missing", "analyst"),
            Err(AlertError::NotFound(_))
        ));
    }

    #[test]
    fn test_false_positive_closes_alert() {
        let mut registry = AlertRegistry::new();
        let id = registry.insert(make_alert(Severity::Low));

        registry.mark_false_positive(&id, "analyst", Some("scheduled maintenance")).unwrap();
        assert!(registry.open_alerts().is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let mut registry = AlertRegistry::new();
        let a = registry.insert(make_alert(Severity::High));
        registry.insert(make_alert(Severity::Critical));
        registry.insert(make_alert(Severity::Critical));
        registry.investigate(&a, "analyst").unwrap();

        let summary = registry.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.open, 3);
        assert_eq!(summary.by_status.get("Investigating"), Some(&1));
        assert_eq!(summary.by_severity.get("critical"), Some(&2));
    }

    #[test]
    fn test_history_records_actor_and_note() {
        let mut registry = AlertRegistry::new();
        let id = registry.insert(make_alert(Severity::Medium));

        registry
            .update_status(&id, AlertStatus::Analyzing, "ml-triage", Some("auto-escalated"))
            .unwrap();
        let history = registry.history(&id);
        assert_eq!(history[0].actor, "ml-triage");
        assert_eq!(history[0].note.as_deref(), Some("auto-escalated"));
    }
}
