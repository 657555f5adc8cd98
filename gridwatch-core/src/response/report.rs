//! Response reports — the derived summary of a completed plan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::response::plan::{PlanStatus, ResponsePlan};
use crate::response::timeline::{PhaseStatus, ResponsePhase};
use crate::threat::ThreatCategory;

/// Result of requesting a report from a plan.
///
/// Requesting a report on an unfinished plan is not an error; it yields a
/// structured incomplete payload instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
    Complete(ResponseReport),
    Incomplete { completion_percentage: u8 },
}

impl ReportOutcome {
    /// The full report, if the plan was complete.
    pub fn report(&self) -> Option<&ResponseReport> {
        match self {
            ReportOutcome::Complete(report) => Some(report),
            ReportOutcome::Incomplete { .. } => None,
        }
    }
}

/// Read-only snapshot computed when a plan reaches completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseReport {
    /// The originating alert's ID.
    pub incident_id: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Total elapsed minutes from start to completion.
    pub total_response_time_minutes: i64,
    /// Elapsed minutes per phase, from stamped timestamps.
    pub phase_durations: BTreeMap<ResponsePhase, i64>,
    /// The plan's estimated total.
    pub estimated_minutes: u32,
    /// Actual minus estimated minutes (negative when under estimate).
    pub variance_minutes: i64,
    /// Whether the response finished within its estimate.
    pub within_estimate: bool,
    /// Names of the assigned teams.
    pub teams: Vec<String>,
    /// Steps completed out of the total.
    pub steps_completed: usize,
    pub steps_total: usize,
    /// Completion ratio in [0, 1].
    pub step_completion_ratio: f64,
    /// Follow-up recommendations.
    pub recommendations: Vec<String>,
}

impl ResponseReport {
    /// Build the report outcome for a plan.
    pub(crate) fn for_plan(plan: &ResponsePlan) -> ReportOutcome {
        if plan.status != PlanStatus::Completed {
            return ReportOutcome::Incomplete {
                completion_percentage: plan.progress_pct,
            };
        }

        let total_response_time_minutes = match (plan.started_at, plan.completed_at) {
            (Some(start), Some(end)) => (end - start).num_minutes().max(0),
            _ => 0,
        };

        let phase_durations: BTreeMap<ResponsePhase, i64> = plan
            .timeline
            .iter()
            .map(|(phase, window)| (phase, window.elapsed_minutes()))
            .collect();

        let estimated_minutes = plan.estimated_completion_minutes;
        let variance_minutes = total_response_time_minutes - estimated_minutes as i64;

        let steps_total = plan.steps.len();
        let steps_completed = plan
            .steps
            .iter()
            .filter(|s| s.status == PhaseStatus::Completed)
            .count();
        let step_completion_ratio = if steps_total == 0 {
            0.0
        } else {
            steps_completed as f64 / steps_total as f64
        };

        ReportOutcome::Complete(ResponseReport {
            incident_id: plan.alert_id.clone(),
            generated_at: Utc::now(),
            total_response_time_minutes,
            phase_durations,
            estimated_minutes,
            variance_minutes,
            within_estimate: total_response_time_minutes <= estimated_minutes as i64,
            teams: plan.teams.iter().map(|t| t.name.clone()).collect(),
            steps_completed,
            steps_total,
            step_completion_ratio,
            recommendations: recommendations_for(plan.category),
        })
    }
}

/// Category-keyed follow-up advice plus two universal closers.
pub(crate) fn recommendations_for(category: ThreatCategory) -> Vec<String> {
    let specific: [&str; 2] = match category {
        ThreatCategory::UnauthorizedAccess => [
            "Tighten access-control lists for the affected device class",
            "Enable anomaly alerts on repeated authentication failures",
        ],
        ThreatCategory::DataManipulation => [
            "Deploy cross-sensor plausibility checks for telemetry",
            "Sign sensor readings at the edge where hardware allows",
        ],
        ThreatCategory::DenialOfService => [
            "Provision surge capacity at zone gateways",
            "Pre-stage traffic diversion plans for critical corridors",
        ],
        ThreatCategory::Malware => [
            "Shorten the firmware attestation interval",
            "Restrict outbound connections from embedded controllers",
        ],
        ThreatCategory::Ransomware => [
            "Verify offline backup coverage for all zone controllers",
            "Rehearse restore procedures quarterly",
        ],
        ThreatCategory::FirmwareTampering => [
            "Enforce signed firmware updates fleet-wide",
            "Alert on bootloader configuration drift",
        ],
        ThreatCategory::CommunicationHijacking => [
            "Rotate link-layer keys on an aggressive schedule",
            "Enable mutual authentication on all device channels",
        ],
        ThreatCategory::CredentialTheft => [
            "Move device credentials to short-lived certificates",
            "Monitor identity-provider logs for replayed tokens",
        ],
        ThreatCategory::PhysicalTampering => [
            "Add tamper-evident seals to exposed enclosures",
            "Increase patrol coverage for remote cabinets",
        ],
        ThreatCategory::SocialEngineering => [
            "Run a targeted awareness briefing for zone operators",
            "Introduce verification callbacks for operational change requests",
        ],
    };

    let mut recommendations: Vec<String> = specific.iter().map(|s| s.to_string()).collect();
    recommendations.push(
        "Schedule a tabletop exercise replaying this incident within 30 days".to_string(),
    );
    recommendations
        .push("Update the zone response runbook with the lessons captured here".to_string());
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResponseConfig;
    use crate::response::ResponsePlanner;
    use crate::response::plan::IncidentDescriptor;
    use crate::threat::Severity;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn started_plan() -> ResponsePlan {
        let planner = ResponsePlanner::new(ResponseConfig::default());
        let mut rng = StdRng::seed_from_u64(17);
        let descriptor = IncidentDescriptor {
            alert_id: "alert-77".into(),
            category: ThreatCategory::Ransomware,
            severity: Severity::Critical,
            affected_systems: vec!["billing".into()],
            recommended_actions: vec!["Disconnect from network immediately".into()],
            started_at: None,
        };
        let mut plan = planner.initiate_response(descriptor, &mut rng);
        plan.start().unwrap();
        plan
    }

    #[test]
    fn test_incomplete_plan_yields_stub() {
        let mut plan = started_plan();
        plan.record_progress(60);
        match plan.generate_report() {
            ReportOutcome::Incomplete {
                completion_percentage,
            } => assert_eq!(completion_percentage, 60),
            ReportOutcome::Complete(_) => panic!("expected incomplete stub"),
        }
    }

    #[test]
    fn test_completed_plan_yields_full_report() {
        let mut plan = started_plan();
        plan.record_progress(100);
        let outcome = plan.generate_report();
        let report = outcome.report().expect("full report");

        assert_eq!(report.incident_id, "alert-77");
        assert!(report.total_response_time_minutes >= 0);
        assert_eq!(report.steps_completed, report.steps_total);
        assert!((report.step_completion_ratio - 1.0).abs() < 1e-9);
        assert_eq!(report.phase_durations.len(), 5);
    }

    #[test]
    fn test_report_variance_against_estimate() {
        let mut plan = started_plan();
        plan.record_progress(100);
        let outcome = plan.generate_report();
        let report = outcome.report().unwrap();

        // Simulated ticks complete within the same wall-clock instant.
        assert!(report.within_estimate);
        assert_eq!(
            report.variance_minutes,
            report.total_response_time_minutes - report.estimated_minutes as i64
        );
    }

    #[test]
    fn test_recommendations_end_with_universal_closers() {
        for category in ThreatCategory::ALL {
            let recommendations = recommendations_for(category);
            assert_eq!(recommendations.len(), 4);
            assert!(recommendations[3].contains("runbook"));
        }
    }

    #[test]
    fn test_ransomware_recommendations_mention_backups() {
        let recommendations = recommendations_for(ThreatCategory::Ransomware);
        assert!(recommendations[0].contains("offline backup"));
    }
}
