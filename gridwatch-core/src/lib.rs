//! GridWatch Core — smart-city security-operations simulation engine.
//!
//! This crate provides the simulation core behind the GridWatch dashboard:
//!
//! - **Threat classification:** behavior analysis with an injectable
//!   anomaly score, deterministic classification tables, full alert
//!   assembly, and countermeasure simulation
//! - **Incident response:** generated teams, severity-scaled five-phase
//!   timelines, keyword-routed response steps, and the plan state machine
//!   with progress ticks and completion reports
//! - **Alert lifecycle:** a registry enforcing valid status transitions
//!   with per-alert history and summary statistics
//! - **Scenarios:** scripted multi-stage attacks composing the classifier
//!   and planner for demo runs
//!
//! All randomness is drawn through an injectable [`rand::Rng`], so any
//! simulation can be replayed from a seed. The core is synchronous and
//! performs no I/O beyond reading the clock; every record is
//! serde-serializable for whatever store or transport the caller chooses.

pub mod alerts;
pub mod classifier;
pub mod config;
pub mod device;
pub mod error;
pub mod response;
pub mod scenario;
pub mod threat;

// Re-exports for convenience
pub use alerts::{AlertError, AlertRegistry, AlertSummary};
pub use classifier::{
    AlertStatus, BehaviorAnalysis, BehaviorPattern, CountermeasureOutcome, DeviceHealth,
    ThreatAlert, ThreatClassifier,
};
pub use config::{ClassifierConfig, ResponseConfig, SimulationConfig};
pub use device::{Device, DeviceCategory, sample_fleet};
pub use error::GridwatchError;
pub use response::{
    IncidentDescriptor, IncidentSimulation, PhaseStatus, PlanStatus, ReportOutcome,
    ResponseError, ResponsePhase, ResponsePlan, ResponsePlanner, ResponseReport, ResponseTeam,
};
pub use scenario::{AttackScenario, ScenarioLibrary, ScenarioRun};
pub use threat::{ImpactLevel, Severity, ThreatCategory};
