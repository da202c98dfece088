//! Air quality index value objects
//!
//! OpenWeather reports air quality on a five-step scale (1 = Good,
//! 5 = Very Poor). The descriptor lookup is a constant mapping; anything
//! outside the scale is reported as "Unknown".
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::{AqiDescriptor, AqiLevel};
//!
//! let descriptor = AqiDescriptor::classify(Some(3));
//! assert_eq!(descriptor.label, "Moderate");
//! assert_eq!(descriptor.level, Some(AqiLevel::Moderate));
//!
//! assert_eq!(AqiDescriptor::classify(None).label, "Unknown");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Step on the OpenWeather air quality scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    /// Index 1
    Good,
    /// Index 2
    Fair,
    /// Index 3
    Moderate,
    /// Index 4
    Poor,
    /// Index 5
    VeryPoor,
}

impl AqiLevel {
    /// All levels in ascending order
    pub const ALL: [Self; 5] = [
        Self::Good,
        Self::Fair,
        Self::Moderate,
        Self::Poor,
        Self::VeryPoor,
    ];

    /// Map a raw index to its level, `None` outside 1..=5
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Good),
            2 => Some(Self::Fair),
            3 => Some(Self::Moderate),
            4 => Some(Self::Poor),
            5 => Some(Self::VeryPoor),
            _ => None,
        }
    }

    /// The raw index (1..=5)
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Good => 1,
            Self::Fair => 2,
            Self::Moderate => 3,
            Self::Poor => 4,
            Self::VeryPoor => 5,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }

    /// Display color as a hex triplet
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Good => "#2ecc71",
            Self::Fair => "#f1c40f",
            Self::Moderate => "#e67e22",
            Self::Poor => "#e74c3c",
            Self::VeryPoor => "#8e44ad",
        }
    }
}

impl fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Label and color handed to the renderer alongside a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiDescriptor {
    /// Matched level, `None` for unknown input
    pub level: Option<AqiLevel>,
    /// Label such as "Good" or "Unknown"
    pub label: &'static str,
    /// Hex color for the label
    pub color: &'static str,
}

impl AqiDescriptor {
    /// Label used for anything outside the scale
    pub const UNKNOWN_LABEL: &'static str = "Unknown";
    /// Neutral gray used for anything outside the scale
    pub const UNKNOWN_COLOR: &'static str = "#999999";

    /// Descriptor for readings that are absent or off the scale
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            level: None,
            label: Self::UNKNOWN_LABEL,
            color: Self::UNKNOWN_COLOR,
        }
    }

    /// Classify an optional raw index
    #[must_use]
    pub const fn classify(aqi: Option<u8>) -> Self {
        let level = match aqi {
            Some(index) => AqiLevel::from_index(index),
            None => None,
        };
        match level {
            Some(level) => Self {
                level: Some(level),
                label: level.label(),
                color: level.color(),
            },
            None => Self::unknown(),
        }
    }

    /// Whether the input mapped onto the scale
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.level.is_some()
    }
}

impl Default for AqiDescriptor {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for AqiDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
