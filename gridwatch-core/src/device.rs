//! Device registry types — the read-only inputs to threat classification.
//!
//! Devices are owned by the caller; the classifier and planner only read them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GridwatchError;

/// Categories of city devices under observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    Camera,
    TrafficSignal,
    StreetLight,
    SmartMeter,
    AirQualitySensor,
    AccessController,
}

impl DeviceCategory {
    /// All categories, in declaration order.
    pub const ALL: [DeviceCategory; 6] = [
        DeviceCategory::Camera,
        DeviceCategory::TrafficSignal,
        DeviceCategory::StreetLight,
        DeviceCategory::SmartMeter,
        DeviceCategory::AirQualitySensor,
        DeviceCategory::AccessController,
    ];
}

impl std::fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceCategory::Camera => write!(f, "camera"),
            DeviceCategory::TrafficSignal => write!(f, "traffic_signal"),
            DeviceCategory::StreetLight => write!(f, "street_light"),
            DeviceCategory::SmartMeter => write!(f, "smart_meter"),
            DeviceCategory::AirQualitySensor => write!(f, "air_quality_sensor"),
            DeviceCategory::AccessController => write!(f, "access_controller"),
        }
    }
}

impl FromStr for DeviceCategory {
    type Err = GridwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "camera" => Ok(DeviceCategory::Camera),
            "traffic_signal" => Ok(DeviceCategory::TrafficSignal),
            "street_light" => Ok(DeviceCategory::StreetLight),
            "smart_meter" => Ok(DeviceCategory::SmartMeter),
            "air_quality_sensor" => Ok(DeviceCategory::AirQualitySensor),
            "access_controller" => Ok(DeviceCategory::AccessController),
            other => Err(GridwatchError::InvalidEnumValue {
                kind: "device category",
                value: other.to_string(),
            }),
        }
    }
}

/// A city device under observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Unique device identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Device category.
    pub category: DeviceCategory,
    /// Zone the device is deployed in.
    pub zone: String,
}

impl Device {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: DeviceCategory,
        zone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            zone: zone.into(),
        }
    }
}

/// A small fixture fleet covering every device category, used by the demo layer.
pub fn sample_fleet() -> Vec<Device> {
    vec![
        Device::new("cam-014", "Harbor Plaza Camera 14", DeviceCategory::Camera, "harbor"),
        Device::new(
            "tsig-031",
            "5th & Meridian Signal",
            DeviceCategory::TrafficSignal,
            "downtown",
        ),
        Device::new(
            "slight-207",
            "Riverside Walk Light 207",
            DeviceCategory::StreetLight,
            "riverside",
        ),
        Device::new(
            "meter-1184",
            "Substation Meter 1184",
            DeviceCategory::SmartMeter,
            "industrial",
        ),
        Device::new(
            "aqs-009",
            "Parkfield Air Monitor 9",
            DeviceCategory::AirQualitySensor,
            "parkfield",
        ),
        Device::new(
            "door-072",
            "Transit Depot Door 72",
            DeviceCategory::AccessController,
            "transit",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip_from_str() {
        for category in DeviceCategory::ALL {
            let parsed: DeviceCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_from_str_rejects_unknown() {
        assert!("toaster".parse::<DeviceCategory>().is_err());
    }

    #[test]
    fn test_category_from_str_accepts_dashes() {
        let parsed: DeviceCategory = "traffic-signal".parse().unwrap();
        assert_eq!(parsed, DeviceCategory::TrafficSignal);
    }

    #[test]
    fn test_sample_fleet_covers_all_categories() {
        let fleet = sample_fleet();
        for category in DeviceCategory::ALL {
            assert!(
                fleet.iter().any(|d| d.category == category),
                "fleet is missing a {category} device"
            );
        }
    }
}
