//! Threat alerts — the classified output of a detection event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::DeviceCategory;
use crate::threat::{Severity, ThreatCategory};

/// Alert lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    New,
    Investigating,
    Analyzing,
    Mitigating,
    Contained,
    Resolved,
    FalsePositive,
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertStatus::New => write!(f, "New"),
            AlertStatus::Investigating => write!(f, "Investigating"),
            AlertStatus::Analyzing => write!(f, "Analyzing"),
            AlertStatus::Mitigating => write!(f, "Mitigating"),
            AlertStatus::Contained => write!(f, "Contained"),
            AlertStatus::Resolved => write!(f, "Resolved"),
            AlertStatus::FalsePositive => write!(f, "False Positive"),
        }
    }
}

/// A classified threat alert attached to one device.
///
/// Immutable after creation except for `status`, which the response layer
/// updates as mitigation proceeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatAlert {
    /// Unique alert ID.
    pub id: String,
    /// Device the alert refers to.
    pub device_id: String,
    /// Device display name, carried for reporting.
    pub device_name: String,
    /// Category of the affected device.
    pub device_category: DeviceCategory,
    /// Threat category.
    pub category: ThreatCategory,
    /// Severity.
    pub severity: Severity,
    /// Classifier confidence in [0, 1].
    pub confidence: f64,
    /// Human-readable description, including the confidence band.
    pub description: String,
    /// Ordered recommended actions. Duplicates are preserved.
    pub recommended_actions: Vec<String>,
    /// Systems affected beyond the device itself.
    pub affected_systems: Vec<String>,
    /// Expected operational impact.
    pub potential_impact: String,
    /// Risk score in [5, 99].
    pub risk_score: u8,
    /// Lifecycle status.
    pub status: AlertStatus,
    /// When the alert was raised.
    pub detected_at: DateTime<Utc>,
}

/// Inclusive risk-score draw range per severity.
pub(crate) fn risk_range(severity: Severity) -> (u8, u8) {
    match severity {
        Severity::Critical => (90, 99),
        Severity::High => (70, 89),
        Severity::Medium => (40, 69),
        Severity::Low => (10, 39),
    }
}

/// Confidence band label embedded in alert descriptions.
pub(crate) fn confidence_band(confidence: f64) -> &'static str {
    if confidence > 0.8 {
        "high"
    } else if confidence > 0.6 {
        "moderate"
    } else {
        "low"
    }
}

/// Systems affected by a threat on a device of the given category.
///
/// A fixed base list per device category, with extras for specific
/// (device category, threat category) combinations.
pub(crate) fn affected_systems(
    device_category: DeviceCategory,
    threat: ThreatCategory,
) -> Vec<String> {
    let base: &[&str] = match device_category {
        DeviceCategory::Camera => &["video-management", "evidence-archive"],
        DeviceCategory::TrafficSignal => &["intersection-control", "traffic-analytics"],
        DeviceCategory::StreetLight => &["lighting-control"],
        DeviceCategory::SmartMeter => &["billing", "grid-telemetry"],
        DeviceCategory::AirQualitySensor => &["environmental-reporting"],
        DeviceCategory::AccessController => &["badge-registry", "door-control"],
    };

    let mut systems: Vec<String> = base.iter().map(|s| s.to_string()).collect();

    let extra: Option<&str> = match (device_category, threat) {
        (DeviceCategory::Camera, ThreatCategory::UnauthorizedAccess) => Some("operator-console"),
        (DeviceCategory::TrafficSignal, ThreatCategory::DenialOfService) => {
            Some("corridor-coordination")
        }
        (DeviceCategory::SmartMeter, ThreatCategory::DataManipulation) => Some("load-forecasting"),
        (DeviceCategory::AirQualitySensor, ThreatCategory::DataManipulation) => {
            Some("public-dashboard")
        }
        (DeviceCategory::AccessController, ThreatCategory::CredentialTheft) => {
            Some("identity-provider")
        }
        (DeviceCategory::StreetLight, ThreatCategory::FirmwareTampering) => {
            Some("firmware-distribution")
        }
        _ => None,
    };
    if let Some(extra) = extra {
        systems.push(extra.to_string());
    }

    systems
}

/// Expected impact text for a severity on a device category.
pub(crate) fn potential_impact(severity: Severity, device_category: DeviceCategory) -> String {
    let asset = match device_category {
        DeviceCategory::Camera => "surveillance coverage",
        DeviceCategory::TrafficSignal => "intersection safety control",
        DeviceCategory::StreetLight => "street illumination",
        DeviceCategory::SmartMeter => "utility metering accuracy",
        DeviceCategory::AirQualitySensor => "environmental monitoring",
        DeviceCategory::AccessController => "building access enforcement",
    };
    match severity {
        Severity::Critical => {
            format!("Sustained loss of {asset} with cascading effects across the zone")
        }
        Severity::High => format!("Degraded {asset} until containment completes"),
        Severity::Medium => format!("Intermittent disruption to {asset} in the affected zone"),
        Severity::Low => format!("Negligible operational effect on {asset}; monitoring recommended"),
    }
}
