//! Deterministic classification tables — descriptions, action lists, impact.
//!
//! All dispatch is exhaustive match over closed enums so adding a category
//! or severity forces every table to be revisited.

use serde::{Deserialize, Serialize};

use crate::device::DeviceCategory;
use crate::threat::{ImpactLevel, Severity, ThreatCategory};

/// Deterministic classification of a (category, severity) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatClassification {
    /// Category being classified.
    pub category: ThreatCategory,
    /// Severity being classified.
    pub severity: Severity,
    /// Human-readable description of the threat.
    pub description: String,
    /// Ordered recommended actions (baseline + category-specific).
    pub recommended_actions: Vec<String>,
    /// Classifier confidence in [0, 1].
    pub confidence: f64,
    /// Operational impact level.
    pub impact_level: ImpactLevel,
}

/// Baseline actions prepended to every alert, in order.
pub(crate) const BASELINE_ACTIONS: [&str; 2] = [
    "Isolate the affected device from the operational network",
    "Capture a forensic snapshot of the device state",
];

pub(crate) fn description_for(category: ThreatCategory, severity: Severity) -> String {
    let qualifier = match severity {
        Severity::Low => "Low-grade",
        Severity::Medium => "Suspected",
        Severity::High => "Active",
        Severity::Critical => "Critical",
    };
    let subject = match category {
        ThreatCategory::UnauthorizedAccess => "unauthorized access attempt against a city device",
        ThreatCategory::DataManipulation => {
            "telemetry stream showing signs of deliberate manipulation"
        }
        ThreatCategory::DenialOfService => {
            "service-exhaustion traffic directed at city infrastructure"
        }
        ThreatCategory::Malware => "malicious code activity on an embedded controller",
        ThreatCategory::Ransomware => "ransomware behavior with encryption staging on the device",
        ThreatCategory::FirmwareTampering => "firmware image diverging from the signed baseline",
        ThreatCategory::CommunicationHijacking => {
            "command channel showing injected or replayed traffic"
        }
        ThreatCategory::CredentialTheft => "device credentials exercised from an unexpected origin",
        ThreatCategory::PhysicalTampering => "enclosure or port tamper indicators on the device",
        ThreatCategory::SocialEngineering => {
            "operator-targeted deception attempt referencing this device"
        }
    };
    format!("{qualifier} {subject}")
}

/// Category-specific actions, appended after the baseline pair.
pub(crate) fn category_actions(category: ThreatCategory) -> Vec<&'static str> {
    match category {
        ThreatCategory::UnauthorizedAccess => vec![
            "Revoke active sessions on the device",
            "Force credential rotation for device operators",
            "Review access logs for the past 24 hours",
        ],
        ThreatCategory::DataManipulation => vec![
            "Cross-check recent readings against neighboring sensors",
            "Restore telemetry baselines from the last trusted snapshot",
        ],
        ThreatCategory::DenialOfService => vec![
            "Enable rate limiting at the zone gateway",
            "Divert traffic to standby infrastructure",
        ],
        ThreatCategory::Malware => vec![
            "Run a full firmware integrity scan",
            "Quarantine binaries flagged by the scanner",
        ],
        ThreatCategory::Ransomware => vec![
            "Disconnect from network immediately",
            "Verify offline backups before any restore",
            "Notify the incident commander",
        ],
        ThreatCategory::FirmwareTampering => vec![
            "Compare firmware image against the signed manufacturer build",
            "Schedule an emergency reflash from trusted media",
        ],
        ThreatCategory::CommunicationHijacking => vec![
            "Rotate session keys for the device link",
            "Force re-authentication of all connected peers",
        ],
        ThreatCategory::CredentialTheft => vec![
            "Invalidate all credentials issued to the device",
            "Audit identity-provider logs for reuse of stolen credentials",
        ],
        ThreatCategory::PhysicalTampering => vec![
            "Dispatch a field technician to inspect the enclosure",
            "Review nearby camera footage around the tamper window",
        ],
        ThreatCategory::SocialEngineering => vec![
            "Alert operators to the active pretext campaign",
            "Re-run phishing awareness checks for the affected team",
        ],
    }
}

/// Severity-escalation actions, appended after the category-specific list.
pub(crate) fn severity_escalation_actions(severity: Severity) -> Vec<&'static str> {
    match severity {
        Severity::Critical => vec![
            "Escalate to the on-call incident commander",
            "Open a bridge with city emergency coordination",
        ],
        Severity::High => vec!["Escalate to the Tier 2 response queue"],
        Severity::Medium => vec!["Flag for review in the next operations sync"],
        Severity::Low => Vec::new(),
    }
}

/// Device-specific actions, appended last.
pub(crate) fn device_actions(category: DeviceCategory) -> Vec<&'static str> {
    match category {
        DeviceCategory::Camera => vec!["Blank public video feeds until integrity is confirmed"],
        DeviceCategory::TrafficSignal => {
            vec!["Switch the intersection to the failsafe timing plan"]
        }
        DeviceCategory::StreetLight => vec!["Force the lighting segment to manual override"],
        DeviceCategory::SmartMeter => {
            vec!["Suspend automated billing exports for the affected meter"]
        }
        DeviceCategory::AirQualitySensor => {
            vec!["Mark the sensor's readings as unvalidated in public dashboards"]
        }
        DeviceCategory::AccessController => {
            vec!["Place affected doors into lockdown-capable manual mode"]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_embeds_severity_qualifier() {
        let desc = description_for(ThreatCategory::Ransomware, Severity::Critical);
        assert!(desc.starts_with("Critical"));
        assert!(desc.contains("ransomware"));
    }

    #[test]
    fn test_ransomware_actions_include_disconnect() {
        let actions = category_actions(ThreatCategory::Ransomware);
        assert!(actions.contains(&"Disconnect from network immediately"));
    }

    #[test]
    fn test_low_severity_has_no_escalation() {
        assert!(severity_escalation_actions(Severity::Low).is_empty());
        assert_eq!(severity_escalation_actions(Severity::Critical).len(), 2);
    }

    #[test]
    fn test_every_category_has_actions() {
        for category in ThreatCategory::ALL {
            assert!(!category_actions(category).is_empty());
        }
    }

    #[test]
    fn test_every_device_category_has_actions() {
        for category in crate::device::DeviceCategory::ALL {
            assert_eq!(device_actions(category).len(), 1);
        }
    }
}
