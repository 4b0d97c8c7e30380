use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::schema::column;

/// Chronic condition tracked by the cohort. Declaration order is the
/// priority order conditions are listed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum ConditionTag {
    #[serde(rename = "CKD")]
    Ckd,
    Diabetes,
    Thyroid,
}

impl ConditionTag {
    pub const ALL: [ConditionTag; 3] = [
        ConditionTag::Ckd,
        ConditionTag::Diabetes,
        ConditionTag::Thyroid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionTag::Ckd => "CKD",
            ConditionTag::Diabetes => "Diabetes",
            ConditionTag::Thyroid => "Thyroid",
        }
    }

    /// Column holding the condition flag.
    pub fn flag_column(&self) -> &'static str {
        match self {
            ConditionTag::Ckd => column::HAS_CKD,
            ConditionTag::Diabetes => column::HAS_DIABETES,
            ConditionTag::Thyroid => column::HAS_THYROID,
        }
    }

    /// Column holding the disease-specific severity.
    pub fn severity_column(&self) -> &'static str {
        match self {
            ConditionTag::Ckd => column::CKD_SEVERITY,
            ConditionTag::Diabetes => column::DIABETES_SEVERITY,
            ConditionTag::Thyroid => column::THYROID_SEVERITY,
        }
    }
}

impl fmt::Display for ConditionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConditionTag::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownCondition(s.to_string()))
    }
}
