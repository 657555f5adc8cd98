//! Configuration types for the simulation engine.

use serde::{Deserialize, Serialize};

/// Top-level simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Threat classifier configuration.
    pub classifier: ClassifierConfig,
    /// Incident-response planner configuration.
    pub response: ResponseConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            response: ResponseConfig::default(),
        }
    }
}

/// Configuration for the threat classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Anomaly scores above this threshold count as anomalies.
    pub anomaly_threshold: f64,
    /// Confidence used when no behavior record is supplied.
    pub default_confidence: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            anomaly_threshold: 0.7,
            default_confidence: 0.7,
        }
    }
}

/// Configuration for the incident-response planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Minimum generated team roster size.
    pub min_team_size: usize,
    /// Maximum generated team roster size.
    pub max_team_size: usize,
    /// Minimum average team response-time estimate (minutes).
    pub min_response_minutes: u32,
    /// Maximum average team response-time estimate (minutes).
    pub max_response_minutes: u32,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            min_team_size: 3,
            max_team_size: 5,
            min_response_minutes: 5,
            max_response_minutes: 15,
        }
    }
}
