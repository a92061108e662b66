//! Sensor data types

use serde::Serialize;

/// A single name/value pair extracted from tool output
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SensorReading {
    /// Sensor name (IPMI) or device identifier (lm-sensors)
    pub name: String,
    /// Reading in degrees Celsius
    pub value: f64,
}

impl SensorReading {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Metric category a reading is published under
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Dimm,
    VrDimm,
    Cpu,
    /// M2 ambient sensors
    Env,
    Hic,
    NetworkCard,
    /// Matched no rule; logged and never published
    Unknown,
}

impl Category {
    /// Every category that owns a gauge family, in exposition order
    pub const PUBLISHED: [Category; 6] = [
        Category::Dimm,
        Category::VrDimm,
        Category::Cpu,
        Category::Env,
        Category::Hic,
        Category::NetworkCard,
    ];

    pub fn is_published(self) -> bool {
        self != Category::Unknown
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Dimm => write!(f, "DIMM"),
            Category::VrDimm => write!(f, "VR_DIMM"),
            Category::Cpu => write!(f, "CPU"),
            Category::Env => write!(f, "ENV"),
            Category::Hic => write!(f, "HIC"),
            Category::NetworkCard => write!(f, "NETWORK_CARD"),
            Category::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Tool a reading was collected from
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Ipmi,
    Sensors,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Ipmi => write!(f, "ipmitool"),
            Source::Sensors => write!(f, "sensors"),
        }
    }
}
