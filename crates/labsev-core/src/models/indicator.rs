use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::severity::SeverityCategory;

/// Alert tone a UI should use for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Error,
    Neutral,
}

/// Display style for a severity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SeverityIndicator {
    pub category: SeverityCategory,
    pub icon: &'static str,
    pub headline: &'static str,
    pub detail: &'static str,
    pub tone: Tone,
    /// Hex color used for badges and chart bars.
    pub color: &'static str,
}

impl SeverityCategory {
    pub fn indicator(&self) -> SeverityIndicator {
        let (icon, detail, tone, color) = match self {
            SeverityCategory::Stable => (
                "🟢",
                "No major lab abnormality detected",
                Tone::Success,
                "#2e7d32",
            ),
            SeverityCategory::Mild => ("🟡", "Minor lab deviation", Tone::Info, "#f9a825"),
            SeverityCategory::Moderate => (
                "🟠",
                "Clinical attention recommended",
                Tone::Warning,
                "#ef6c00",
            ),
            SeverityCategory::Severe => (
                "🔴",
                "Immediate review recommended",
                Tone::Error,
                "#c62828",
            ),
            SeverityCategory::Unknown => {
                ("⚪", "No biomarker available", Tone::Neutral, "#9e9e9e")
            }
        };
        SeverityIndicator {
            category: *self,
            icon,
            headline: self.as_str(),
            detail,
            tone,
            color,
        }
    }

    /// Follow-up the doctor workflow should prompt for, if any.
    pub fn recommended_action(&self) -> Option<&'static str> {
        match self {
            SeverityCategory::Severe => Some("Automatic appointment scheduling recommended."),
            _ => None,
        }
    }
}
