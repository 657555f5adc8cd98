//! Attack scenarios — scripted multi-stage demos composing the classifier
//! and the response planner.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{ThreatAlert, ThreatClassifier};
use crate::device::{Device, DeviceCategory};
use crate::response::{IncidentSimulation, ResponsePlanner};
use crate::threat::{Severity, ThreatCategory};

/// Scenario errors.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
}

/// One stage of a scripted attack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStage {
    /// Short label for the stage.
    pub label: String,
    /// Device category the stage targets.
    pub target_category: DeviceCategory,
    /// Threat category the stage simulates.
    pub threat_category: ThreatCategory,
    /// Severity of the simulated threat.
    pub severity: Severity,
    /// How far the response is advanced, 0 to 100.
    pub progress_pct: u8,
}

/// A scripted multi-stage attack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackScenario {
    /// Scenario identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// What the scenario demonstrates.
    pub description: String,
    /// Stages, run in order.
    pub stages: Vec<ScenarioStage>,
}

/// The outcome of one scenario stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageOutcome {
    /// Stage label.
    pub label: String,
    /// The alert the stage raised.
    pub alert: ThreatAlert,
    /// The incident simulation driven from the alert.
    pub simulation: IncidentSimulation,
}

/// A completed scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRun {
    /// Scenario identifier.
    pub scenario_id: String,
    /// Per-stage outcomes, in order.
    pub outcomes: Vec<StageOutcome>,
    /// Human-readable event timeline.
    pub events: Vec<String>,
}

/// Registry of built-in attack scenarios.
pub struct ScenarioLibrary {
    scenarios: Vec<AttackScenario>,
}

impl ScenarioLibrary {
    pub fn new() -> Self {
        Self {
            scenarios: Vec::new(),
        }
    }

    /// Create with the built-in demo scenarios.
    pub fn with_defaults() -> Self {
        let mut library = Self::new();

        library.add(AttackScenario {
            id: "intersection-takeover".into(),
            name: "Coordinated Intersection Takeover".into(),
            description: "Timing manipulation across downtown signals followed by a flood \
                          of bogus control traffic"
                .into(),
            stages: vec![
                ScenarioStage {
                    label: "Signal timing drift detected".into(),
                    target_category: DeviceCategory::TrafficSignal,
                    threat_category: ThreatCategory::DataManipulation,
                    severity: Severity::Critical,
                    progress_pct: 100,
                },
                ScenarioStage {
                    label: "Control channel flooded".into(),
                    target_category: DeviceCategory::TrafficSignal,
                    threat_category: ThreatCategory::DenialOfService,
                    severity: Severity::High,
                    progress_pct: 100,
                },
            ],
        });

        library.add(AttackScenario {
            id: "metering-fraud".into(),
            name: "Metering Fraud Campaign".into(),
            description: "Falsified consumption telemetry from tampered meters in the \
                          industrial zone"
                .into(),
            stages: vec![
                ScenarioStage {
                    label: "Reading fluctuation on meter cluster".into(),
                    target_category: DeviceCategory::SmartMeter,
                    threat_category: ThreatCategory::DataManipulation,
                    severity: Severity::Medium,
                    progress_pct: 100,
                },
                ScenarioStage {
                    label: "Meter firmware diverges from baseline".into(),
                    target_category: DeviceCategory::SmartMeter,
                    threat_category: ThreatCategory::FirmwareTampering,
                    severity: Severity::Critical,
                    progress_pct: 60,
                },
            ],
        });

        library.add(AttackScenario {
            id: "perimeter-breach".into(),
            name: "Transit Depot Perimeter Breach".into(),
            description: "Stolen credentials replayed against depot door controllers with \
                          camera cover-up"
                .into(),
            stages: vec![
                ScenarioStage {
                    label: "Stolen badge replayed at depot door".into(),
                    target_category: DeviceCategory::AccessController,
                    threat_category: ThreatCategory::CredentialTheft,
                    severity: Severity::High,
                    progress_pct: 100,
                },
                ScenarioStage {
                    label: "Camera feed interference".into(),
                    target_category: DeviceCategory::Camera,
                    threat_category: ThreatCategory::CommunicationHijacking,
                    severity: Severity::High,
                    progress_pct: 100,
                },
            ],
        });

        library
    }

    /// Add a scenario.
    pub fn add(&mut self, scenario: AttackScenario) {
        self.scenarios.push(scenario);
    }

    /// All scenarios.
    pub fn all(&self) -> &[AttackScenario] {
        &self.scenarios
    }

    /// Get a scenario by ID.
    pub fn get(&self, id: &str) -> Option<&AttackScenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Run a scenario by ID against a device fleet.
    pub fn run<R: Rng>(
        &self,
        id: &str,
        devices: &[Device],
        rng: &mut R,
    ) -> Result<ScenarioRun, ScenarioError> {
        let scenario = self
            .get(id)
            .ok_or_else(|| ScenarioError::UnknownScenario(id.to_string()))?;
        Ok(run_scenario(scenario, devices, rng))
    }
}

impl Default for ScenarioLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive a scenario's stages through the classifier and planner.
///
/// Stages whose target category has no matching device are skipped with a
/// warning.
pub fn run_scenario<R: Rng>(
    scenario: &AttackScenario,
    devices: &[Device],
    rng: &mut R,
) -> ScenarioRun {
    let classifier = ThreatClassifier::with_defaults();
    let planner = ResponsePlanner::with_defaults();

    let mut outcomes = Vec::new();
    let mut events = Vec::new();
    events.push(format!("Scenario started: {}", scenario.name));

    for stage in &scenario.stages {
        let Some(device) = devices.iter().find(|d| d.category == stage.target_category) else {
            tracing::warn!(
                stage = %stage.label,
                category = %stage.target_category,
                "no device matches stage target, skipping"
            );
            events.push(format!("Skipped stage (no {} device): {}", stage.target_category, stage.label));
            continue;
        };

        let alert = classifier.generate_threat_alert(
            device,
            stage.threat_category,
            stage.severity,
            None,
            rng,
        );
        events.push(format!(
            "{}: {} alert raised for {} (risk {})",
            stage.label, stage.severity, device.name, alert.risk_score
        ));

        let simulation = planner.simulate_incident_response(&alert, stage.progress_pct, rng);
        events.push(match &simulation.report {
            Some(report) => format!(
                "Response for {} completed in {} estimated minutes",
                device.name, report.estimated_minutes
            ),
            None => format!(
                "Response for {} at {}%, phase {}",
                device.name, simulation.completion_percentage, simulation.plan.current_phase
            ),
        });

        outcomes.push(StageOutcome {
            label: stage.label.clone(),
            alert,
            simulation,
        });
    }

    ScenarioRun {
        scenario_id: scenario.id.clone(),
        outcomes,
        events,
    }
}
