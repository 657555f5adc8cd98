//! Behavior analysis — synthetic anomaly scoring and pattern selection.
//!
//! The anomaly score stands in for a real model's output; everything after
//! the score is deterministic so tests can inject a fixed score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::DeviceCategory;
use crate::threat::{Severity, ThreatCategory};

/// Behavior patterns the analyzer can report.
///
/// `PRIORITY` fixes the order detection consults these in; the first pattern
/// present in an analysis decides the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorPattern {
    IrregularAccess,
    SignalTiming,
    ReadingFluctuation,
    ProtocolViolation,
    FirmwareBehavior,
}

impl BehaviorPattern {
    /// Detection priority order. Earlier entries win when an analysis
    /// reports multiple patterns.
    pub const PRIORITY: [BehaviorPattern; 5] = [
        BehaviorPattern::IrregularAccess,
        BehaviorPattern::SignalTiming,
        BehaviorPattern::ReadingFluctuation,
        BehaviorPattern::ProtocolViolation,
        BehaviorPattern::FirmwareBehavior,
    ];

    /// The threat classification a pattern maps to.
    pub fn classification(self) -> (ThreatCategory, Severity) {
        match self {
            BehaviorPattern::IrregularAccess => {
                (ThreatCategory::UnauthorizedAccess, Severity::High)
            }
            BehaviorPattern::SignalTiming => (ThreatCategory::DataManipulation, Severity::Critical),
            BehaviorPattern::ReadingFluctuation => {
                (ThreatCategory::DataManipulation, Severity::Medium)
            }
            BehaviorPattern::ProtocolViolation => {
                (ThreatCategory::CommunicationHijacking, Severity::High)
            }
            BehaviorPattern::FirmwareBehavior => {
                (ThreatCategory::FirmwareTampering, Severity::Critical)
            }
        }
    }
}

impl std::fmt::Display for BehaviorPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BehaviorPattern::IrregularAccess => write!(f, "irregular access timing"),
            BehaviorPattern::SignalTiming => write!(f, "signal timing drift"),
            BehaviorPattern::ReadingFluctuation => write!(f, "reading fluctuation"),
            BehaviorPattern::ProtocolViolation => write!(f, "protocol violation"),
            BehaviorPattern::FirmwareBehavior => write!(f, "unexpected firmware behavior"),
        }
    }
}

/// The result of analyzing one device's recent behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorAnalysis {
    /// Device the analysis refers to.
    pub device_id: String,
    /// Synthetic anomaly score in [0, 1).
    pub anomaly_score: f64,
    /// Patterns observed, strongest first.
    pub patterns: Vec<BehaviorPattern>,
    /// Whether the score crossed the anomaly threshold.
    pub is_anomaly: bool,
    /// When the analysis was taken.
    pub observed_at: DateTime<Utc>,
}

/// Patterns reported for a device category at a given score.
///
/// Each category has a fixed pattern pair: scores above 0.7 report both,
/// scores above 0.5 report the first, lower scores report nothing.
pub(crate) fn patterns_for(category: DeviceCategory, score: f64) -> Vec<BehaviorPattern> {
    let pair = match category {
        DeviceCategory::Camera => [
            BehaviorPattern::IrregularAccess,
            BehaviorPattern::FirmwareBehavior,
        ],
        DeviceCategory::TrafficSignal => [
            BehaviorPattern::SignalTiming,
            BehaviorPattern::ProtocolViolation,
        ],
        DeviceCategory::StreetLight => [
            BehaviorPattern::ProtocolViolation,
            BehaviorPattern::FirmwareBehavior,
        ],
        DeviceCategory::SmartMeter => [
            BehaviorPattern::ReadingFluctuation,
            BehaviorPattern::SignalTiming,
        ],
        DeviceCategory::AirQualitySensor => [
            BehaviorPattern::ReadingFluctuation,
            BehaviorPattern::SignalTiming,
        ],
        DeviceCategory::AccessController => [
            BehaviorPattern::IrregularAccess,
            BehaviorPattern::ProtocolViolation,
        ],
    };

    if score > 0.7 {
        pair.to_vec()
    } else if score > 0.5 {
        vec![pair[0]]
    } else {
        Vec::new()
    }
}
