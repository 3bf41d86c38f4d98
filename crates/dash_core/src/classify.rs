use serde::{Deserialize, Serialize};

use crate::GasReadings;

/// Normalization thresholds: the concentration at which a single gas alone
/// counts as fully "high".
pub const CO2_HIGH_THRESHOLD: f64 = 100.0;
pub const CH4_HIGH_THRESHOLD: f64 = 20.0;
pub const NOX_HIGH_THRESHOLD: f64 = 10.0;

/// Overall pollution severity of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Low,
    Moderate,
    High,
}

impl Level {
    /// Display name used by panel text, tips, and the alert banner.
    pub fn label(self) -> &'static str {
        match self {
            Level::Low => "Bajo",
            Level::Moderate => "Moderado",
            Level::High => "Alto",
        }
    }
}

/// Classify gas readings into a severity level.
///
/// Each gas is normalized by its threshold, the three ratios are averaged,
/// and the mean is cut at 0.3 and 0.6. Total and monotonic: raising any one
/// concentration never lowers the level. Marker coloring, panel text, and the
/// alert decision all go through this one function so they can never disagree
/// for the same readings.
pub fn classify(gases: &GasReadings) -> Level {
    let norm_co2 = gases.co2 / CO2_HIGH_THRESHOLD;
    let norm_ch4 = gases.ch4 / CH4_HIGH_THRESHOLD;
    let norm_nox = gases.nox / NOX_HIGH_THRESHOLD;
    let avg = (norm_co2 + norm_ch4 + norm_nox) / 3.0;

    if avg < 0.3 {
        Level::Low
    } else if avg < 0.6 {
        Level::Moderate
    } else {
        Level::High
    }
}

/// Marker fill color for a severity level.
pub fn color_for(level: Level) -> &'static str {
    match level {
        Level::Low => "#4CAF50",
        Level::Moderate => "#FFEB3B",
        Level::High => "#F44336",
    }
}

/// Marker fill color straight from readings.
pub fn marker_color(gases: &GasReadings) -> &'static str {
    color_for(classify(gases))
}
