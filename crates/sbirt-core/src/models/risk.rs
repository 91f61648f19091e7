use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// DAST-10 risk tier. Variants are ordered from lowest to highest risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DastRiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Low/Moderate Risk")]
    LowModerate,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "Substantial Risk")]
    Substantial,
}

impl DastRiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            DastRiskLevel::Low => "Low Risk",
            DastRiskLevel::LowModerate => "Low/Moderate Risk",
            DastRiskLevel::Moderate => "Moderate Risk",
            DastRiskLevel::Substantial => "Substantial Risk",
        }
    }
}

impl fmt::Display for DastRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// ASSIST per-substance risk category, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AssistRiskCategory {
    Low,
    Moderate,
    High,
}

impl AssistRiskCategory {
    pub fn label(self) -> &'static str {
        match self {
            AssistRiskCategory::Low => "Low",
            AssistRiskCategory::Moderate => "Moderate",
            AssistRiskCategory::High => "High",
        }
    }
}

impl fmt::Display for AssistRiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
