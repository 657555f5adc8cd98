//! Response plans — the stateful record tracking an incident through the
//! five response phases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::ThreatAlert;
use crate::response::report::{ReportOutcome, ResponseReport};
use crate::response::steps::ResponseStep;
use crate::response::team::ResponseTeam;
use crate::response::timeline::{PhaseStatus, ResponsePhase, ResponseTimeline};
use crate::threat::{Severity, ThreatCategory};

/// Plan-level status. Transitions are monotonic:
/// `Pending -> InProgress -> Completed`.
///
/// `Failed` is retained from the original design but no operation sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStatus::Pending => write!(f, "pending"),
            PlanStatus::InProgress => write!(f, "in_progress"),
            PlanStatus::Completed => write!(f, "completed"),
            PlanStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Errors from plan mutation.
///
/// Policy: `record_progress` on a completed plan is a silent no-op; every
/// other mutator reports `PlanCompleted`.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("plan {0} is already completed")]
    PlanCompleted(String),
}

/// An entry in a plan's append-only notes log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteEntry {
    pub timestamp: DateTime<Utc>,
    pub author: String,
    pub content: String,
}

/// Inputs for constructing a plan. Usually derived from a `ThreatAlert`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentDescriptor {
    /// Originating alert ID.
    pub alert_id: String,
    /// Threat category.
    pub category: ThreatCategory,
    /// Severity.
    pub severity: Severity,
    /// Affected systems carried onto the plan.
    pub affected_systems: Vec<String>,
    /// Recommended actions the steps are generated from.
    pub recommended_actions: Vec<String>,
    /// Optional explicit start time; defaults to now.
    pub started_at: Option<DateTime<Utc>>,
}

impl From<&ThreatAlert> for IncidentDescriptor {
    fn from(alert: &ThreatAlert) -> Self {
        Self {
            alert_id: alert.id.clone(),
            category: alert.category,
            severity: alert.severity,
            affected_systems: alert.affected_systems.clone(),
            recommended_actions: alert.recommended_actions.clone(),
            started_at: None,
        }
    }
}

/// The mutable record tracking a simulated incident response.
///
/// Plans are mutated only through the state-machine operations below and
/// are retained as history once completed. A plan expects a single logical
/// writer; there is no internal synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsePlan {
    /// Unique plan ID.
    pub id: String,
    /// Originating alert ID.
    pub alert_id: String,
    /// Threat category of the originating alert.
    pub category: ThreatCategory,
    /// Severity of the originating alert.
    pub severity: Severity,
    /// Affected systems.
    pub affected_systems: Vec<String>,
    /// Assigned response teams.
    pub teams: Vec<ResponseTeam>,
    /// Current phase.
    pub current_phase: ResponsePhase,
    /// Plan-level status.
    pub status: PlanStatus,
    /// The five-phase schedule.
    pub timeline: ResponseTimeline,
    /// Ordered response steps.
    pub steps: Vec<ResponseStep>,
    /// When the response started.
    pub started_at: Option<DateTime<Utc>>,
    /// Sum of the per-phase estimates.
    pub estimated_completion_minutes: u32,
    /// Set only on completion.
    pub completed_at: Option<DateTime<Utc>>,
    /// Append-only notes log.
    pub notes: Vec<NoteEntry>,
    /// High-water progress percentage, 0 to 100.
    pub progress_pct: u8,
    /// Generated report, present only after completion.
    pub report: Option<ResponseReport>,
}

impl ResponsePlan {
    /// Append a note to the log.
    pub fn add_note(&mut self, author: &str, content: impl Into<String>) {
        self.notes.push(NoteEntry {
            timestamp: Utc::now(),
            author: author.to_string(),
            content: content.into(),
        });
    }

    /// Begin the response: stamp the start time and move the identification
    /// phase and its steps to in-progress.
    ///
    /// Guarded: a second call is a no-op, so timestamps are set at most
    /// once. Calling on a completed plan is an error.
    pub fn start(&mut self) -> Result<(), ResponseError> {
        if self.status == PlanStatus::Completed {
            return Err(ResponseError::PlanCompleted(self.id.clone()));
        }
        if self
            .timeline
            .window(ResponsePhase::Identification)
            .started_at
            .is_some()
        {
            return Ok(());
        }

        let now = Utc::now();
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.status = PlanStatus::InProgress;
        self.current_phase = ResponsePhase::Identification;
        self.timeline
            .window_mut(ResponsePhase::Identification)
            .mark_in_progress(now);
        self.sync_steps(now);
        self.add_note("system", "Response started; identification phase underway");
        Ok(())
    }

    /// Record simulation progress as a percentage of the whole response.
    ///
    /// The tick operation. A no-op when the plan has never started or is
    /// already completed. Progress keeps a high-water mark, so completed
    /// phases are sticky and out-of-order calls cannot regress state.
    /// Returns the effective progress percentage.
    pub fn record_progress(&mut self, pct: u8) -> u8 {
        if self.started_at.is_none() || self.status == PlanStatus::Completed {
            return self.progress_pct;
        }

        let pct = pct.min(100).max(self.progress_pct);
        self.progress_pct = pct;

        let now = Utc::now();
        let phase_count = ResponsePhase::ALL.len();
        let index = ((pct as usize * phase_count) / 100).min(phase_count - 1);

        for phase in ResponsePhase::ALL {
            if phase.index() < index {
                self.timeline.window_mut(phase).mark_completed(now);
            } else if phase.index() == index {
                if pct == 100 {
                    self.timeline.window_mut(phase).mark_completed(now);
                } else {
                    self.timeline.window_mut(phase).mark_in_progress(now);
                }
            }
        }
        self.current_phase = ResponsePhase::ALL[index];
        self.sync_steps(now);

        if pct >= 100 {
            self.status = PlanStatus::Completed;
            if self.completed_at.is_none() {
                self.completed_at = Some(now);
            }
            self.add_note("system", "Response completed; all phases closed out");
            tracing::info!(plan = %self.id, "response plan completed");
        } else {
            let phase = self.current_phase;
            self.add_note("system", format!("Progress {pct}%, current phase: {phase}"));
            tracing::debug!(plan = %self.id, pct, %phase, "response progress recorded");
        }

        self.progress_pct
    }

    /// Directly override the current phase, bypassing percentage logic.
    ///
    /// Phases before the target are completed; the target goes in-progress.
    /// Moving to lessons-learned completes the plan.
    pub fn set_phase(
        &mut self,
        phase: ResponsePhase,
        note: Option<&str>,
    ) -> Result<(), ResponseError> {
        if self.status == PlanStatus::Completed {
            return Err(ResponseError::PlanCompleted(self.id.clone()));
        }

        let now = Utc::now();
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.status = PlanStatus::InProgress;

        for earlier in ResponsePhase::ALL {
            if earlier.index() < phase.index() {
                self.timeline.window_mut(earlier).mark_completed(now);
            }
        }
        self.current_phase = phase;

        if phase == ResponsePhase::LessonsLearned {
            self.timeline.window_mut(phase).mark_completed(now);
            self.status = PlanStatus::Completed;
            if self.completed_at.is_none() {
                self.completed_at = Some(now);
            }
            self.progress_pct = 100;
            self.sync_steps(now);
            self.add_note("system", note.unwrap_or("Moved to lessons_learned; plan completed"));
            tracing::info!(plan = %self.id, "response plan completed via phase override");
        } else {
            self.timeline.window_mut(phase).mark_in_progress(now);
            self.progress_pct = self.progress_pct.max((phase.index() * 20) as u8);
            self.sync_steps(now);
            self.add_note(
                "system",
                note.map(String::from)
                    .unwrap_or_else(|| format!("Phase set to {phase}")),
            );
        }
        Ok(())
    }

    /// Generate the completion report, or an incomplete stub if the plan
    /// has not finished.
    pub fn generate_report(&self) -> ReportOutcome {
        ResponseReport::for_plan(self)
    }

    /// Align every step's status and timestamps with its owning phase.
    fn sync_steps(&mut self, now: DateTime<Utc>) {
        for step in &mut self.steps {
            let window_status = self.timeline.window(step.phase).status;
            match window_status {
                PhaseStatus::Completed => {
                    if step.started_at.is_none() {
                        step.started_at = Some(now);
                    }
                    if step.ended_at.is_none() {
                        step.ended_at = Some(now);
                    }
                    step.status = PhaseStatus::Completed;
                }
                PhaseStatus::InProgress => {
                    if step.status != PhaseStatus::Completed {
                        if step.started_at.is_none() {
                            step.started_at = Some(now);
                        }
                        step.status = PhaseStatus::InProgress;
                    }
                }
                PhaseStatus::Pending | PhaseStatus::Failed => {}
            }
        }
    }
}
