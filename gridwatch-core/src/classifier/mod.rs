//! Threat classifier — behavior analysis, classification, alert assembly.
//!
//! Every operation that draws randomness takes an injectable `Rng` so
//! simulations can be replayed from a seed.

pub mod alert;
pub mod behavior;
pub mod classify;
pub mod countermeasures;

pub use alert::{AlertStatus, ThreatAlert};
pub use behavior::{BehaviorAnalysis, BehaviorPattern};
pub use classify::ThreatClassification;
pub use countermeasures::{CountermeasureOutcome, DeviceHealth};

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::config::ClassifierConfig;
use crate::device::Device;
use crate::threat::{ImpactLevel, Severity, ThreatCategory};

/// The threat classification engine.
pub struct ThreatClassifier {
    config: ClassifierConfig,
}

impl ThreatClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Create a classifier with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ClassifierConfig::default())
    }

    /// Analyze a device's recent behavior, drawing a fresh anomaly score.
    pub fn analyze_device_behavior<R: Rng>(&self, device: &Device, rng: &mut R) -> BehaviorAnalysis {
        let score = rng.gen_range(0.0..1.0);
        self.analyze_with_score(device, score)
    }

    /// The deterministic half of behavior analysis: everything derived from
    /// a known anomaly score.
    pub fn analyze_with_score(&self, device: &Device, score: f64) -> BehaviorAnalysis {
        BehaviorAnalysis {
            device_id: device.id.clone(),
            anomaly_score: score,
            patterns: behavior::patterns_for(device.category, score),
            is_anomaly: score > self.config.anomaly_threshold,
            observed_at: Utc::now(),
        }
    }

    /// Classify a (category, severity) pair into a description, the
    /// category-specific action list, a confidence value, and an impact level.
    pub fn classify_threat(
        &self,
        category: ThreatCategory,
        severity: Severity,
        behavior: Option<&BehaviorAnalysis>,
    ) -> ThreatClassification {
        let confidence = match behavior {
            Some(analysis) => 0.5 + analysis.anomaly_score * 0.4,
            None => self.config.default_confidence,
        };
        ThreatClassification {
            category,
            severity,
            description: classify::description_for(category, severity),
            recommended_actions: classify::category_actions(category)
                .into_iter()
                .map(String::from)
                .collect(),
            confidence,
            impact_level: ImpactLevel::from(severity),
        }
    }

    /// Assemble a full alert for a device and classification input.
    pub fn generate_threat_alert<R: Rng>(
        &self,
        device: &Device,
        category: ThreatCategory,
        severity: Severity,
        behavior: Option<&BehaviorAnalysis>,
        rng: &mut R,
    ) -> ThreatAlert {
        let classification = self.classify_threat(category, severity, behavior);
        let confidence = classification.confidence;
        let band = alert::confidence_band(confidence);
        let description = format!(
            "{} on {} in zone {} ({band} confidence)",
            classification.description, device.name, device.zone
        );

        let (lo, hi) = alert::risk_range(severity);
        let draw = rng.gen_range(lo..=hi);
        let risk_score = ((draw as f64 + confidence * 10.0).round() as u8).min(99);

        // Order matters: baseline, category-specific, severity escalation,
        // device-specific. Duplicates are intentional fixture behavior.
        let mut recommended_actions: Vec<String> = classify::BASELINE_ACTIONS
            .iter()
            .map(|s| s.to_string())
            .collect();
        recommended_actions.extend(classification.recommended_actions.iter().cloned());
        recommended_actions.extend(
            classify::severity_escalation_actions(severity)
                .into_iter()
                .map(String::from),
        );
        recommended_actions.extend(
            classify::device_actions(device.category)
                .into_iter()
                .map(String::from),
        );

        ThreatAlert {
            id: Uuid::new_v4().to_string(),
            device_id: device.id.clone(),
            device_name: device.name.clone(),
            device_category: device.category,
            category,
            severity,
            confidence,
            description,
            recommended_actions,
            affected_systems: alert::affected_systems(device.category, category),
            potential_impact: alert::potential_impact(severity, device.category),
            risk_score,
            status: AlertStatus::New,
            detected_at: Utc::now(),
        }
    }

    /// Run the full detection pipeline: analyze, classify, assemble.
    ///
    /// Returns `None` when the behavior analysis does not cross the anomaly
    /// threshold.
    pub fn simulate_detection<R: Rng>(&self, device: &Device, rng: &mut R) -> Option<ThreatAlert> {
        let analysis = self.analyze_device_behavior(device, rng);
        self.detect_from_analysis(device, &analysis, rng)
    }

    /// Detection from a precomputed analysis, for deterministic replay.
    ///
    /// The first pattern in `BehaviorPattern::PRIORITY` that appears in the
    /// analysis decides the classification; an anomaly with no recognized
    /// pattern falls back to unauthorized access at medium severity.
    pub fn detect_from_analysis<R: Rng>(
        &self,
        device: &Device,
        analysis: &BehaviorAnalysis,
        rng: &mut R,
    ) -> Option<ThreatAlert> {
        if !analysis.is_anomaly {
            return None;
        }

        let (category, severity) = BehaviorPattern::PRIORITY
            .iter()
            .find(|p| analysis.patterns.contains(p))
            .map(|p| p.classification())
            .unwrap_or((ThreatCategory::UnauthorizedAccess, Severity::Medium));

        tracing::debug!(
            device = %device.id,
            score = analysis.anomaly_score,
            %category,
            %severity,
            "anomaly classified"
        );
        Some(self.generate_threat_alert(device, category, severity, Some(analysis), rng))
    }

    /// Simulate deploying countermeasures against an alert.
    pub fn deploy_countermeasures<R: Rng>(
        &self,
        alert: &ThreatAlert,
        rng: &mut R,
    ) -> CountermeasureOutcome {
        let probability = countermeasures::success_probability(alert.severity, alert.category);
        let success = rng.r#gen::<f64>() < probability;

        let actions_taken = if alert.recommended_actions.is_empty() {
            Vec::new()
        } else {
            let take = rng.gen_range(1..=alert.recommended_actions.len());
            alert.recommended_actions[..take].to_vec()
        };

        let (device_health, alert_status) = if success {
            (DeviceHealth::Safe, AlertStatus::Resolved)
        } else {
            (DeviceHealth::Compromised, AlertStatus::Mitigating)
        };

        CountermeasureOutcome {
            alert_id: alert.id.clone(),
            success,
            response_time_secs: rng.gen_range(10..=120),
            actions_taken,
            device_health,
            alert_status,
            deployed_at: Utc::now(),
        }
    }
}

impl Default for ThreatClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceCategory;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn camera() -> Device {
        Device::new("cam-1", "Test Camera", DeviceCategory::Camera, "downtown")
    }

    #[test]
    fn test_analysis_below_threshold_is_not_anomaly() {
        let classifier = ThreatClassifier::with_defaults();
        let analysis = classifier.analyze_with_score(&camera(), 0.7);
        assert!(!analysis.is_anomaly);
    }

    #[test]
    fn test_analysis_above_threshold_is_anomaly() {
        let classifier = ThreatClassifier::with_defaults();
        let analysis = classifier.analyze_with_score(&camera(), 0.71);
        assert!(analysis.is_anomaly);
        assert_eq!(analysis.patterns.len(), 2);
    }

    #[test]
    fn test_no_alert_for_injected_low_scores() {
        let classifier = ThreatClassifier::with_defaults();
        let mut rng = StdRng::seed_from_u64(7);
        for device in crate::device::sample_fleet() {
            let analysis = classifier.analyze_with_score(&device, 0.42);
            assert!(
                classifier
                    .detect_from_analysis(&device, &analysis, &mut rng)
                    .is_none()
            );
        }
    }

    #[test]
    fn test_detection_uses_pattern_priority() {
        // Camera at a high score reports [IrregularAccess, FirmwareBehavior];
        // IrregularAccess is first in priority order, so the alert is
        // unauthorized access at high severity.
        let classifier = ThreatClassifier::with_defaults();
        let mut rng = StdRng::seed_from_u64(11);
        let analysis = classifier.analyze_with_score(&camera(), 0.9);
        let alert = classifier
            .detect_from_analysis(&camera(), &analysis, &mut rng)
            .unwrap();
        assert_eq!(alert.category, ThreatCategory::UnauthorizedAccess);
        assert_eq!(alert.severity, Severity::High);
    }

    #[test]
    fn test_anomaly_without_patterns_falls_back() {
        let classifier = ThreatClassifier::with_defaults();
        let mut rng = StdRng::seed_from_u64(3);
        let mut analysis = classifier.analyze_with_score(&camera(), 0.9);
        analysis.patterns.clear();
        let alert = classifier
            .detect_from_analysis(&camera(), &analysis, &mut rng)
            .unwrap();
        assert_eq!(alert.category, ThreatCategory::UnauthorizedAccess);
        assert_eq!(alert.severity, Severity::Medium);
    }

    #[test]
    fn test_classify_threat_confidence_from_behavior() {
        let classifier = ThreatClassifier::with_defaults();
        let analysis = classifier.analyze_with_score(&camera(), 0.75);
        let classification = classifier.classify_threat(
            ThreatCategory::Malware,
            Severity::High,
            Some(&analysis),
        );
        assert!((classification.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_classify_threat_default_confidence() {
        let classifier = ThreatClassifier::with_defaults();
        let classification =
            classifier.classify_threat(ThreatCategory::Malware, Severity::High, None);
        assert!((classification.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_ransomware_critical_classification() {
        let classifier = ThreatClassifier::with_defaults();
        let classification =
            classifier.classify_threat(ThreatCategory::Ransomware, Severity::Critical, None);
        assert_eq!(classification.impact_level, ImpactLevel::Severe);
        assert!(
            classification
                .recommended_actions
                .iter()
                .any(|a| a == "Disconnect from network immediately")
        );
    }

    #[test]
    fn test_alert_action_ordering() {
        let classifier = ThreatClassifier::with_defaults();
        let mut rng = StdRng::seed_from_u64(5);
        let alert = classifier.generate_threat_alert(
            &camera(),
            ThreatCategory::Ransomware,
            Severity::Critical,
            None,
            &mut rng,
        );
        // Baseline pair first, then category-specific, then escalation,
        // then device-specific last.
        assert_eq!(
            alert.recommended_actions[0],
            "Isolate the affected device from the operational network"
        );
        assert_eq!(alert.recommended_actions[2], "Disconnect from network immediately");
        assert_eq!(
            alert.recommended_actions.last().unwrap(),
            "Blank public video feeds until integrity is confirmed"
        );
    }

    #[test]
    fn test_risk_score_bounds_across_severities() {
        let classifier = ThreatClassifier::with_defaults();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            for severity in Severity::ALL {
                let alert = classifier.generate_threat_alert(
                    &camera(),
                    ThreatCategory::Malware,
                    severity,
                    None,
                    &mut rng,
                );
                assert!(
                    (5..=99).contains(&alert.risk_score),
                    "risk score {} out of range for {severity}",
                    alert.risk_score
                );
            }
        }
    }

    #[test]
    fn test_description_embeds_confidence_band() {
        let classifier = ThreatClassifier::with_defaults();
        let mut rng = StdRng::seed_from_u64(2);
        let alert = classifier.generate_threat_alert(
            &camera(),
            ThreatCategory::Malware,
            Severity::High,
            None,
            &mut rng,
        );
        assert!(alert.description.contains("moderate confidence"));
        assert!(alert.description.contains("Test Camera"));
    }

    #[test]
    fn test_countermeasures_always_succeed_at_full_probability() {
        let classifier = ThreatClassifier::with_defaults();
        let mut rng = StdRng::seed_from_u64(9);
        let alert = classifier.generate_threat_alert(
            &camera(),
            ThreatCategory::Malware,
            Severity::Low,
            None,
            &mut rng,
        );
        // Probability 0.9; over many draws both outcomes stay consistent
        // with the returned status fields.
        for _ in 0..32 {
            let outcome = classifier.deploy_countermeasures(&alert, &mut rng);
            assert!((10..=120).contains(&outcome.response_time_secs));
            assert!(!outcome.actions_taken.is_empty());
            if outcome.success {
                assert_eq!(outcome.device_health, DeviceHealth::Safe);
                assert_eq!(outcome.alert_status, AlertStatus::Resolved);
            } else {
                assert_eq!(outcome.device_health, DeviceHealth::Compromised);
                assert_eq!(outcome.alert_status, AlertStatus::Mitigating);
            }
        }
    }

    #[test]
    fn test_countermeasure_actions_are_a_prefix() {
        let classifier = ThreatClassifier::with_defaults();
        let mut rng = StdRng::seed_from_u64(13);
        let alert = classifier.generate_threat_alert(
            &camera(),
            ThreatCategory::Ransomware,
            Severity::Critical,
            None,
            &mut rng,
        );
        let outcome = classifier.deploy_countermeasures(&alert, &mut rng);
        assert_eq!(
            outcome.actions_taken[..],
            alert.recommended_actions[..outcome.actions_taken.len()]
        );
    }
}
