use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Normalized severity label. Declaration order is the display order used
/// by every distribution: `Stable < Mild < Moderate < Severe < Unknown`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum SeverityCategory {
    Stable,
    Mild,
    Moderate,
    Severe,
    /// Missing label or a value outside the four recognized ones.
    Unknown,
}

impl SeverityCategory {
    /// All categories in display order.
    pub const ALL: [SeverityCategory; 5] = [
        SeverityCategory::Stable,
        SeverityCategory::Mild,
        SeverityCategory::Moderate,
        SeverityCategory::Severe,
        SeverityCategory::Unknown,
    ];

    /// Map a raw label onto a category. Total: anything unrecognized,
    /// including `None`, becomes `Unknown`.
    ///
    /// Matching ignores surrounding whitespace and ASCII case.
    pub fn from_label(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return SeverityCategory::Unknown;
        };
        let raw = raw.trim();
        [
            SeverityCategory::Stable,
            SeverityCategory::Mild,
            SeverityCategory::Moderate,
            SeverityCategory::Severe,
        ]
        .into_iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(raw))
        .unwrap_or(SeverityCategory::Unknown)
    }

    /// Whether `raw` names one of the four recognized categories.
    pub fn is_recognized(raw: &str) -> bool {
        Self::from_label(Some(raw)) != SeverityCategory::Unknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityCategory::Stable => "Stable",
            SeverityCategory::Mild => "Mild",
            SeverityCategory::Moderate => "Moderate",
            SeverityCategory::Severe => "Severe",
            SeverityCategory::Unknown => "Unknown",
        }
    }

    /// Position in the display order.
    pub fn rank(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SeverityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a record: the normalized label plus the fused
/// score exactly as stored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Classification {
    pub label: SeverityCategory,
    pub score: Option<f64>,
}
