//! End-to-end tests for the detection -> response -> report flow.

use rand::SeedableRng;
use rand::rngs::StdRng;

use gridwatch_core::alerts::AlertRegistry;
use gridwatch_core::classifier::{AlertStatus, ThreatClassifier};
use gridwatch_core::device::{Device, DeviceCategory, sample_fleet};
use gridwatch_core::response::{PlanStatus, ResponsePlan, ResponsePlanner};
use gridwatch_core::scenario::ScenarioLibrary;
use gridwatch_core::threat::{Severity, ThreatCategory};

#[test]
fn detection_to_completed_report() {
    let classifier = ThreatClassifier::with_defaults();
    let planner = ResponsePlanner::with_defaults();
    let mut rng = StdRng::seed_from_u64(1001);

    let device = Device::new("cam-7", "Plaza Cam 7", DeviceCategory::Camera, "plaza");
    let analysis = classifier.analyze_with_score(&device, 0.92);
    let alert = classifier
        .detect_from_analysis(&device, &analysis, &mut rng)
        .expect("high score must alert");

    let mut plan = planner.create_response_plan(&alert, &mut rng);
    assert_eq!(plan.status, PlanStatus::InProgress);

    for pct in [20, 40, 60, 80, 100] {
        plan.record_progress(pct);
    }

    let report = plan.generate_report().report().cloned().expect("completed plan reports");
    assert_eq!(report.incident_id, alert.id);
    assert_eq!(report.steps_completed, report.steps_total);
}

#[test]
fn seeded_runs_are_reproducible() {
    let classifier = ThreatClassifier::with_defaults();
    let device = Device::new("m-3", "Meter 3", DeviceCategory::SmartMeter, "industrial");

    let alert_a = {
        let mut rng = StdRng::seed_from_u64(77);
        classifier.generate_threat_alert(
            &device,
            ThreatCategory::DataManipulation,
            Severity::High,
            None,
            &mut rng,
        )
    };
    let alert_b = {
        let mut rng = StdRng::seed_from_u64(77);
        classifier.generate_threat_alert(
            &device,
            ThreatCategory::DataManipulation,
            Severity::High,
            None,
            &mut rng,
        )
    };

    assert_eq!(alert_a.risk_score, alert_b.risk_score);
    assert_eq!(alert_a.recommended_actions, alert_b.recommended_actions);
    assert_eq!(alert_a.affected_systems, alert_b.affected_systems);
}

#[test]
fn alert_lifecycle_tracks_mitigation() {
    let classifier = ThreatClassifier::with_defaults();
    let mut registry = AlertRegistry::new();
    let mut rng = StdRng::seed_from_u64(55);

    let device = Device::new("door-1", "Door 1", DeviceCategory::AccessController, "depot");
    let alert = classifier.generate_threat_alert(
        &device,
        ThreatCategory::CredentialTheft,
        Severity::High,
        None,
        &mut rng,
    );
    let id = registry.insert(alert);

    registry.investigate(&id, "soc").unwrap();
    registry.mark_mitigating(&id, "soc", Some("countermeasures deployed")).unwrap();
    registry.resolve(&id, "soc", None).unwrap();

    assert_eq!(registry.get(&id).unwrap().status, AlertStatus::Resolved);
    assert_eq!(registry.summary().open, 0);
}

#[test]
fn plan_survives_json_round_trip() {
    let planner = ResponsePlanner::with_defaults();
    let classifier = ThreatClassifier::with_defaults();
    let mut rng = StdRng::seed_from_u64(99);

    let device = Device::new("ts-2", "Signal 2", DeviceCategory::TrafficSignal, "downtown");
    let alert = classifier.generate_threat_alert(
        &device,
        ThreatCategory::DenialOfService,
        Severity::Critical,
        None,
        &mut rng,
    );
    let mut plan = planner.create_response_plan(&alert, &mut rng);
    plan.record_progress(60);

    let json = serde_json::to_string(&plan).unwrap();
    let restored: ResponsePlan = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.id, plan.id);
    assert_eq!(restored.current_phase, plan.current_phase);
    assert_eq!(restored.progress_pct, 60);
    assert_eq!(restored.steps.len(), plan.steps.len());
}

#[test]
fn scenario_run_end_to_end() {
    let library = ScenarioLibrary::with_defaults();
    let mut rng = StdRng::seed_from_u64(2024);

    let run = library
        .run("perimeter-breach", &sample_fleet(), &mut rng)
        .unwrap();

    assert_eq!(run.outcomes.len(), 2);
    for outcome in &run.outcomes {
        assert_eq!(outcome.simulation.plan.alert_id, outcome.alert.id);
    }
    assert!(run.events.first().unwrap().starts_with("Scenario started"));
}
