//! Response steps — recommended actions routed to phases and teams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::response::team::ResponderTier;
use crate::response::timeline::{PhaseStatus, ResponsePhase, ResponseTimeline};

/// One unit of work in a response plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseStep {
    /// What the step does.
    pub description: String,
    /// Phase the step belongs to.
    pub phase: ResponsePhase,
    /// Tier assigned to execute the step.
    pub team: ResponderTier,
    /// Execution status, mirrors the owning phase.
    pub status: PhaseStatus,
    /// Estimated duration in minutes.
    pub estimated_minutes: u32,
    /// When work began. Set at most once.
    pub started_at: Option<DateTime<Utc>>,
    /// When work finished. Set at most once.
    pub ended_at: Option<DateTime<Utc>>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Keyword routing tables, consulted in order; the first table whose
/// keyword appears in the lowercased action wins. Unmatched actions fall
/// back to containment under Tier 1.
const ROUTES: [(&[&str], ResponsePhase, ResponderTier); 4] = [
    (
        &["escalate", "notify", "incident commander", "open a bridge", "alert operators"],
        ResponsePhase::Identification,
        ResponderTier::Management,
    ),
    (
        &[
            "forensic", "snapshot", "review", "audit", "cross-check", "compare", "inspect",
            "footage",
        ],
        ResponsePhase::Identification,
        ResponderTier::Forensics,
    ),
    (
        &[
            "reflash", "integrity scan", "quarantine", "rotation", "rotate", "invalidate",
            "awareness",
        ],
        ResponsePhase::Eradication,
        ResponderTier::Tier2,
    ),
    (
        &["restore", "re-authentication", "verify offline", "standby", "re-enable"],
        ResponsePhase::Recovery,
        ResponderTier::Tier2,
    ),
];

/// Route one recommended action to a phase and responder tier.
pub(crate) fn route_action(action: &str) -> (ResponsePhase, ResponderTier) {
    let lowered = action.to_lowercase();
    for (keywords, phase, tier) in ROUTES {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return (phase, tier);
        }
    }
    (ResponsePhase::Containment, ResponderTier::Tier1)
}

/// Build the step list for a plan from its recommended actions.
///
/// Each action becomes one step estimated at a third of its phase's
/// duration; a synthetic documentation step closes out lessons-learned
/// with the full phase estimate.
pub(crate) fn generate_steps(actions: &[String], timeline: &ResponseTimeline) -> Vec<ResponseStep> {
    let mut steps: Vec<ResponseStep> = actions
        .iter()
        .map(|action| {
            let (phase, team) = route_action(action);
            ResponseStep {
                description: action.clone(),
                phase,
                team,
                status: PhaseStatus::Pending,
                estimated_minutes: timeline.window(phase).estimated_minutes / 3,
                started_at: None,
                ended_at: None,
                notes: Vec::new(),
            }
        })
        .collect();

    steps.push(ResponseStep {
        description: "Document incident findings and update response runbooks".to_string(),
        phase: ResponsePhase::LessonsLearned,
        team: ResponderTier::Management,
        status: PhaseStatus::Pending,
        estimated_minutes: timeline.window(ResponsePhase::LessonsLearned).estimated_minutes,
        started_at: None,
        ended_at: None,
        notes: Vec::new(),
    });

    steps
}
