//! Response timelines — the five-phase schedule for an incident.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::GridwatchError;
use crate::threat::{Severity, ThreatCategory};

/// The five response phases, strictly ordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePhase {
    Identification,
    Containment,
    Eradication,
    Recovery,
    LessonsLearned,
}

impl ResponsePhase {
    /// All phases in execution order.
    pub const ALL: [ResponsePhase; 5] = [
        ResponsePhase::Identification,
        ResponsePhase::Containment,
        ResponsePhase::Eradication,
        ResponsePhase::Recovery,
        ResponsePhase::LessonsLearned,
    ];

    /// Zero-based position in the phase order.
    pub fn index(self) -> usize {
        match self {
            ResponsePhase::Identification => 0,
            ResponsePhase::Containment => 1,
            ResponsePhase::Eradication => 2,
            ResponsePhase::Recovery => 3,
            ResponsePhase::LessonsLearned => 4,
        }
    }

    /// Unscaled base duration in minutes.
    fn base_minutes(self) -> f64 {
        match self {
            ResponsePhase::Identification => 15.0,
            ResponsePhase::Containment => 30.0,
            ResponsePhase::Eradication => 45.0,
            ResponsePhase::Recovery => 30.0,
            ResponsePhase::LessonsLearned => 60.0,
        }
    }
}

impl std::fmt::Display for ResponsePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponsePhase::Identification => write!(f, "identification"),
            ResponsePhase::Containment => write!(f, "containment"),
            ResponsePhase::Eradication => write!(f, "eradication"),
            ResponsePhase::Recovery => write!(f, "recovery"),
            ResponsePhase::LessonsLearned => write!(f, "lessons_learned"),
        }
    }
}

impl FromStr for ResponsePhase {
    type Err = GridwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "identification" => Ok(ResponsePhase::Identification),
            "containment" => Ok(ResponsePhase::Containment),
            "eradication" => Ok(ResponsePhase::Eradication),
            "recovery" => Ok(ResponsePhase::Recovery),
            "lessons_learned" => Ok(ResponsePhase::LessonsLearned),
            other => Err(GridwatchError::InvalidEnumValue {
                kind: "response phase",
                value: other.to_string(),
            }),
        }
    }
}

/// Phase-level execution status.
///
/// `Failed` is retained from the original design but no operation sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseStatus::Pending => write!(f, "pending"),
            PhaseStatus::InProgress => write!(f, "in_progress"),
            PhaseStatus::Completed => write!(f, "completed"),
            PhaseStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One phase's slot in the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseWindow {
    /// Estimated duration in minutes.
    pub estimated_minutes: u32,
    /// When work on the phase began. Set at most once, never cleared.
    pub started_at: Option<DateTime<Utc>>,
    /// When the phase finished. Set at most once, never cleared.
    pub ended_at: Option<DateTime<Utc>>,
    /// Execution status.
    pub status: PhaseStatus,
}

impl PhaseWindow {
    fn new(estimated_minutes: u32) -> Self {
        Self {
            estimated_minutes,
            started_at: None,
            ended_at: None,
            status: PhaseStatus::Pending,
        }
    }

    /// Move the window to in-progress, stamping the start time once.
    /// Completed windows are sticky and unaffected.
    pub(crate) fn mark_in_progress(&mut self, now: DateTime<Utc>) {
        if self.status == PhaseStatus::Completed {
            return;
        }
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.status = PhaseStatus::InProgress;
    }

    /// Complete the window, stamping unset timestamps.
    pub(crate) fn mark_completed(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
        self.status = PhaseStatus::Completed;
    }

    /// Elapsed minutes between the stamped start and end, or 0 if either
    /// is missing.
    pub fn elapsed_minutes(&self) -> i64 {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => (end - start).num_minutes().max(0),
            _ => 0,
        }
    }
}

/// The full five-phase schedule. Always contains every phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTimeline {
    phases: BTreeMap<ResponsePhase, PhaseWindow>,
}

impl ResponseTimeline {
    /// Build a timeline for a threat category and severity.
    ///
    /// Base minutes per phase are adjusted by category-specific multipliers
    /// (identification, eradication, and recovery only), then scaled by the
    /// severity multiplier, and rounded to whole minutes. The plan's
    /// estimated total is the sum of the rounded values, so the two always
    /// agree exactly.
    pub fn build(category: ThreatCategory, severity: Severity) -> Self {
        let scale = severity_multiplier(severity);
        let phases = ResponsePhase::ALL
            .into_iter()
            .map(|phase| {
                let minutes = phase.base_minutes()
                    * category_phase_multiplier(category, phase)
                    * scale;
                (phase, PhaseWindow::new(minutes.round() as u32))
            })
            .collect();
        Self { phases }
    }

    /// Total estimated minutes across all five phases.
    pub fn total_estimated_minutes(&self) -> u32 {
        self.phases.values().map(|w| w.estimated_minutes).sum()
    }

    /// The window for a phase. Total over `ResponsePhase`.
    pub fn window(&self, phase: ResponsePhase) -> &PhaseWindow {
        &self.phases[&phase]
    }

    pub(crate) fn window_mut(&mut self, phase: ResponsePhase) -> &mut PhaseWindow {
        self.phases.get_mut(&phase).expect("all phases present")
    }

    /// Iterate phases in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (ResponsePhase, &PhaseWindow)> {
        self.phases.iter().map(|(p, w)| (*p, w))
    }

    /// Number of completed phases.
    pub fn completed_count(&self) -> usize {
        self.phases
            .values()
            .filter(|w| w.status == PhaseStatus::Completed)
            .count()
    }
}

/// Severity multiplier applied to every phase.
pub(crate) fn severity_multiplier(severity: Severity) -> f64 {
    match severity {
        Severity::Low => 0.7,
        Severity::Medium => 1.0,
        Severity::High => 1.5,
        Severity::Critical => 2.0,
    }
}

/// Category adjustment for a phase, applied before the severity scale.
/// Only identification, eradication, and recovery are ever adjusted.
pub(crate) fn category_phase_multiplier(category: ThreatCategory, phase: ResponsePhase) -> f64 {
    match (category, phase) {
        (ThreatCategory::Ransomware, ResponsePhase::Eradication) => 2.0,
        (ThreatCategory::Ransomware, ResponsePhase::Recovery) => 1.5,
        (ThreatCategory::Malware, ResponsePhase::Eradication) => 1.5,
        (ThreatCategory::FirmwareTampering, ResponsePhase::Eradication) => 1.8,
        (ThreatCategory::FirmwareTampering, ResponsePhase::Recovery) => 1.4,
        (ThreatCategory::DenialOfService, ResponsePhase::Identification) => 0.8,
        (ThreatCategory::DenialOfService, ResponsePhase::Recovery) => 1.2,
        (ThreatCategory::DataManipulation, ResponsePhase::Identification) => 1.5,
        (ThreatCategory::DataManipulation, ResponsePhase::Recovery) => 1.3,
        (ThreatCategory::CredentialTheft, ResponsePhase::Identification) => 1.2,
        _ => 1.0,
    }
}
