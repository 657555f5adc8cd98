//! Shared threat enumerations — categories, severities, impact levels.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GridwatchError;

/// Threat severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Lenient parse: unknown values fall back to `Medium` with a warning,
    /// keeping the classifier's documented default branch explicit.
    pub fn parse_lenient(s: &str) -> Severity {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(value = s, "unknown severity, defaulting to medium");
            Severity::Medium
        })
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for Severity {
    type Err = GridwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(GridwatchError::InvalidEnumValue {
                kind: "severity",
                value: other.to_string(),
            }),
        }
    }
}

/// Threat categories recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatCategory {
    UnauthorizedAccess,
    DataManipulation,
    DenialOfService,
    Malware,
    Ransomware,
    FirmwareTampering,
    CommunicationHijacking,
    CredentialTheft,
    PhysicalTampering,
    SocialEngineering,
}

impl ThreatCategory {
    /// All categories, in declaration order.
    pub const ALL: [ThreatCategory; 10] = [
        ThreatCategory::UnauthorizedAccess,
        ThreatCategory::DataManipulation,
        ThreatCategory::DenialOfService,
        ThreatCategory::Malware,
        ThreatCategory::Ransomware,
        ThreatCategory::FirmwareTampering,
        ThreatCategory::CommunicationHijacking,
        ThreatCategory::CredentialTheft,
        ThreatCategory::PhysicalTampering,
        ThreatCategory::SocialEngineering,
    ];

    /// Lenient parse: unknown values fall back to `UnauthorizedAccess` with
    /// a warning, keeping the classifier's documented default branch explicit.
    pub fn parse_lenient(s: &str) -> ThreatCategory {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(
                value = s,
                "unknown threat category, defaulting to unauthorized access"
            );
            ThreatCategory::UnauthorizedAccess
        })
    }
}

impl std::fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreatCategory::UnauthorizedAccess => write!(f, "unauthorized access"),
            ThreatCategory::DataManipulation => write!(f, "data manipulation"),
            ThreatCategory::DenialOfService => write!(f, "denial of service"),
            ThreatCategory::Malware => write!(f, "malware"),
            ThreatCategory::Ransomware => write!(f, "ransomware"),
            ThreatCategory::FirmwareTampering => write!(f, "firmware tampering"),
            ThreatCategory::CommunicationHijacking => write!(f, "communication hijacking"),
            ThreatCategory::CredentialTheft => write!(f, "credential theft"),
            ThreatCategory::PhysicalTampering => write!(f, "physical tampering"),
            ThreatCategory::SocialEngineering => write!(f, "social engineering"),
        }
    }
}

impl FromStr for ThreatCategory {
    type Err = GridwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "unauthorized_access" => Ok(ThreatCategory::UnauthorizedAccess),
            "data_manipulation" => Ok(ThreatCategory::DataManipulation),
            "denial_of_service" | "dos" => Ok(ThreatCategory::DenialOfService),
            "malware" => Ok(ThreatCategory::Malware),
            "ransomware" => Ok(ThreatCategory::Ransomware),
            "firmware_tampering" => Ok(ThreatCategory::FirmwareTampering),
            "communication_hijacking" => Ok(ThreatCategory::CommunicationHijacking),
            "credential_theft" => Ok(ThreatCategory::CredentialTheft),
            "physical_tampering" => Ok(ThreatCategory::PhysicalTampering),
            "social_engineering" => Ok(ThreatCategory::SocialEngineering),
            other => Err(GridwatchError::InvalidEnumValue {
                kind: "threat category",
                value: other.to_string(),
            }),
        }
    }
}

/// Operational impact level derived from severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Minor,
    Moderate,
    Significant,
    Severe,
}

impl From<Severity> for ImpactLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Low => ImpactLevel::Minor,
            Severity::Medium => ImpactLevel::Moderate,
            Severity::High => ImpactLevel::Significant,
            Severity::Critical => ImpactLevel::Severe,
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::Minor => write!(f, "minor"),
            ImpactLevel::Moderate => write!(f, "moderate"),
            ImpactLevel::Significant => write!(f, "significant"),
            ImpactLevel::Severe => write!(f, "severe"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert!("extreme".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_parse_lenient_defaults_to_medium() {
        assert_eq!(Severity::parse_lenient("extreme"), Severity::Medium);
        assert_eq!(Severity::parse_lenient("low"), Severity::Low);
    }

    #[test]
    fn test_category_from_str_variants() {
        assert_eq!(
            "firmware-tampering".parse::<ThreatCategory>().unwrap(),
            ThreatCategory::FirmwareTampering
        );
        assert_eq!(
            "denial of service".parse::<ThreatCategory>().unwrap(),
            ThreatCategory::DenialOfService
        );
        assert!("cyber_badness".parse::<ThreatCategory>().is_err());
    }

    #[test]
    fn test_category_parse_lenient_default() {
        assert_eq!(
            ThreatCategory::parse_lenient("cyber_badness"),
            ThreatCategory::UnauthorizedAccess
        );
    }

    #[test]
    fn test_impact_mapping_is_total() {
        assert_eq!(ImpactLevel::from(Severity::Critical), ImpactLevel::Severe);
        assert_eq!(ImpactLevel::from(Severity::High), ImpactLevel::Significant);
        assert_eq!(ImpactLevel::from(Severity::Medium), ImpactLevel::Moderate);
        assert_eq!(ImpactLevel::from(Severity::Low), ImpactLevel::Minor);
    }
}
