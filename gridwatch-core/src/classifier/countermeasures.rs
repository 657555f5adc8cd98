//! Countermeasure simulation — mitigation outcomes for a classified alert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::alert::AlertStatus;
use crate::threat::{Severity, ThreatCategory};

/// Post-countermeasure device health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceHealth {
    Safe,
    Compromised,
}

impl std::fmt::Display for DeviceHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceHealth::Safe => write!(f, "safe"),
            DeviceHealth::Compromised => write!(f, "compromised"),
        }
    }
}

/// Result of deploying countermeasures against an alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountermeasureOutcome {
    /// Alert the countermeasures targeted.
    pub alert_id: String,
    /// Whether mitigation succeeded.
    pub success: bool,
    /// Simulated response time in seconds (10 to 120).
    pub response_time_secs: u32,
    /// Actions actually taken, a prefix of the alert's recommended actions.
    pub actions_taken: Vec<String>,
    /// Device health after the attempt.
    pub device_health: DeviceHealth,
    /// Alert status after the attempt.
    pub alert_status: AlertStatus,
    /// When the countermeasures were deployed.
    pub deployed_at: DateTime<Utc>,
}

/// Success probability for a countermeasure deployment.
///
/// Starts from 0.9 and is reduced by severity and category penalties.
pub(crate) fn success_probability(severity: Severity, category: ThreatCategory) -> f64 {
    let severity_penalty = match severity {
        Severity::Critical => 0.3,
        Severity::High => 0.2,
        Severity::Medium => 0.1,
        Severity::Low => 0.0,
    };
    let category_penalty = match category {
        ThreatCategory::FirmwareTampering => 0.15,
        ThreatCategory::Ransomware => 0.25,
        _ => 0.0,
    };
    0.9 - severity_penalty - category_penalty
}
