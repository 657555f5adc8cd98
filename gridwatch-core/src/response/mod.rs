//! Incident-response planner — teams, timelines, steps, and the plan
//! state machine.

pub mod plan;
pub mod report;
pub mod steps;
pub mod team;
pub mod timeline;

pub use plan::{IncidentDescriptor, NoteEntry, PlanStatus, ResponseError, ResponsePlan};
pub use report::{ReportOutcome, ResponseReport};
pub use steps::ResponseStep;
pub use team::{ResponderTier, ResponseTeam, TeamMember};
pub use timeline::{PhaseStatus, PhaseWindow, ResponsePhase, ResponseTimeline};

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::classifier::ThreatAlert;
use crate::config::ResponseConfig;
use crate::threat::{Severity, ThreatCategory};

/// Result of a one-shot incident simulation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IncidentSimulation {
    /// The plan after the requested progress was applied.
    pub plan: ResponsePlan,
    /// Present only when the simulation reached 100%.
    pub report: Option<ResponseReport>,
    /// Effective progress percentage.
    pub completion_percentage: u8,
}

/// Factory for response plans and their parts.
pub struct ResponsePlanner {
    config: ResponseConfig,
}

impl ResponsePlanner {
    pub fn new(config: ResponseConfig) -> Self {
        Self { config }
    }

    /// Create a planner with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ResponseConfig::default())
    }

    /// Allocate a response team with a generated roster.
    pub fn create_response_team<R: Rng>(
        &self,
        name: &str,
        specialties: &[&str],
        rng: &mut R,
    ) -> ResponseTeam {
        team::create_team(&self.config, name, specialties, rng)
    }

    /// Compute the five-phase schedule for a threat.
    pub fn create_response_timeline(
        &self,
        category: ThreatCategory,
        severity: Severity,
    ) -> ResponseTimeline {
        ResponseTimeline::build(category, severity)
    }

    /// Map recommended actions onto phased, team-assigned steps.
    pub fn generate_response_steps(
        &self,
        actions: &[String],
        timeline: &ResponseTimeline,
    ) -> Vec<ResponseStep> {
        steps::generate_steps(actions, timeline)
    }

    /// Assemble a fresh plan: in-progress status, identification phase,
    /// timeline and steps precomputed, start time defaulted to now.
    pub fn initiate_response<R: Rng>(
        &self,
        descriptor: IncidentDescriptor,
        rng: &mut R,
    ) -> ResponsePlan {
        let timeline = self.create_response_timeline(descriptor.category, descriptor.severity);
        let steps = self.generate_response_steps(&descriptor.recommended_actions, &timeline);
        let estimated_completion_minutes = timeline.total_estimated_minutes();

        let (team_name, specialties): (&str, &[&str]) =
            if descriptor.severity == Severity::Critical {
                ("Critical Incident Response", &["incident-command", "forensics"])
            } else {
                ("Zone Response", &["triage", "field-ops"])
            };
        let team = self.create_response_team(team_name, specialties, rng);

        ResponsePlan {
            id: Uuid::new_v4().to_string(),
            alert_id: descriptor.alert_id,
            category: descriptor.category,
            severity: descriptor.severity,
            affected_systems: descriptor.affected_systems,
            teams: vec![team],
            current_phase: ResponsePhase::Identification,
            status: PlanStatus::InProgress,
            timeline,
            steps,
            started_at: Some(descriptor.started_at.unwrap_or_else(Utc::now)),
            estimated_completion_minutes,
            completed_at: None,
            notes: Vec::new(),
            progress_pct: 0,
            report: None,
        }
    }

    /// As `initiate_response`, with the notes log seeded.
    pub fn initiate_detailed_response<R: Rng>(
        &self,
        descriptor: IncidentDescriptor,
        rng: &mut R,
    ) -> ResponsePlan {
        let category = descriptor.category;
        let severity = descriptor.severity;
        let mut plan = self.initiate_response(descriptor, rng);
        plan.add_note(
            "system",
            format!("Plan created for {severity} {category} incident"),
        );
        plan
    }

    /// Top-level composition: team, timeline, steps, and a started plan.
    pub fn create_response_plan<R: Rng>(&self, alert: &ThreatAlert, rng: &mut R) -> ResponsePlan {
        let mut plan = self.initiate_detailed_response(IncidentDescriptor::from(alert), rng);
        plan.start().expect("fresh plan cannot be completed");
        plan
    }

    /// One-shot simulation: create a plan, advance it to `pct`, and attach
    /// a report when fully progressed.
    pub fn simulate_incident_response<R: Rng>(
        &self,
        alert: &ThreatAlert,
        pct: u8,
        rng: &mut R,
    ) -> IncidentSimulation {
        let mut plan = self.create_response_plan(alert, rng);
        let completion_percentage = plan.record_progress(pct);
        let report = plan.generate_report().report().cloned();
        plan.report = report.clone();
        IncidentSimulation {
            plan,
            report,
            completion_percentage,
        }
    }
}

impl Default for ResponsePlanner {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ThreatClassifier;
    use crate::device::{Device, DeviceCategory};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn alert(severity: Severity) -> ThreatAlert {
        let classifier = ThreatClassifier::with_defaults();
        let device = Device::new("m-1", "Meter 1", DeviceCategory::SmartMeter, "industrial");
        let mut rng = StdRng::seed_from_u64(23);
        classifier.generate_threat_alert(
            &device,
            ThreatCategory::DataManipulation,
            severity,
            None,
            &mut rng,
        )
    }

    #[test]
    fn test_create_response_plan_is_started() {
        let planner = ResponsePlanner::with_defaults();
        let mut rng = StdRng::seed_from_u64(4);
        let plan = planner.create_response_plan(&alert(Severity::High), &mut rng);

        assert_eq!(plan.status, PlanStatus::InProgress);
        assert_eq!(plan.current_phase, ResponsePhase::Identification);
        assert!(plan.started_at.is_some());
        assert!(!plan.notes.is_empty());
        assert_eq!(
            plan.timeline.window(ResponsePhase::Identification).status,
            PhaseStatus::InProgress
        );
    }

    #[test]
    fn test_plan_references_alert() {
        let planner = ResponsePlanner::with_defaults();
        let mut rng = StdRng::seed_from_u64(4);
        let a = alert(Severity::High);
        let plan = planner.create_response_plan(&a, &mut rng);
        assert_eq!(plan.alert_id, a.id);
        assert_eq!(plan.affected_systems, a.affected_systems);
    }

    #[test]
    fn test_critical_plan_gets_critical_team() {
        let planner = ResponsePlanner::with_defaults();
        let mut rng = StdRng::seed_from_u64(6);
        let plan = planner.create_response_plan(&alert(Severity::Critical), &mut rng);
        assert_eq!(plan.teams[0].name, "Critical Incident Response");
    }

    #[test]
    fn test_simulation_partial_progress_has_no_report() {
        let planner = ResponsePlanner::with_defaults();
        let mut rng = StdRng::seed_from_u64(8);
        let sim = planner.simulate_incident_response(&alert(Severity::Medium), 55, &mut rng);

        assert_eq!(sim.completion_percentage, 55);
        assert!(sim.report.is_none());
        assert_eq!(sim.plan.status, PlanStatus::InProgress);
    }

    #[test]
    fn test_simulation_full_progress_attaches_report() {
        let planner = ResponsePlanner::with_defaults();
        let mut rng = StdRng::seed_from_u64(8);
        let a = alert(Severity::Medium);
        let sim = planner.simulate_incident_response(&a, 100, &mut rng);

        assert_eq!(sim.completion_percentage, 100);
        let report = sim.report.expect("report at 100%");
        assert_eq!(report.incident_id, a.id);
        assert_eq!(sim.plan.status, PlanStatus::Completed);
        assert!(sim.plan.report.is_some());
    }

    #[test]
    fn test_steps_generated_from_alert_actions() {
        let planner = ResponsePlanner::with_defaults();
        let mut rng = StdRng::seed_from_u64(12);
        let a = alert(Severity::High);
        let plan = planner.create_response_plan(&a, &mut rng);
        // One step per recommended action plus the documentation step.
        assert_eq!(plan.steps.len(), a.recommended_actions.len() + 1);
    }
}
