use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The seven ASSIST substance families. The set is closed: every family
/// the screen asks about has a variant here and nothing else is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SubstanceFamily {
    Tobacco,
    Alcohol,
    Cannabis,
    Stimulants,
    Sedatives,
    Opioids,
    Other,
}

impl SubstanceFamily {
    /// All families in screening order.
    pub const ALL: [SubstanceFamily; 7] = [
        SubstanceFamily::Tobacco,
        SubstanceFamily::Alcohol,
        SubstanceFamily::Cannabis,
        SubstanceFamily::Stimulants,
        SubstanceFamily::Sedatives,
        SubstanceFamily::Opioids,
        SubstanceFamily::Other,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SubstanceFamily::Tobacco => "tobacco",
            SubstanceFamily::Alcohol => "alcohol",
            SubstanceFamily::Cannabis => "cannabis",
            SubstanceFamily::Stimulants => "stimulants",
            SubstanceFamily::Sedatives => "sedatives",
            SubstanceFamily::Opioids => "opioids",
            SubstanceFamily::Other => "other",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SubstanceFamily::Tobacco => "Tobacco",
            SubstanceFamily::Alcohol => "Alcohol",
            SubstanceFamily::Cannabis => "Cannabis",
            SubstanceFamily::Stimulants => "Stimulants (Cocaine/Amphetamine)",
            SubstanceFamily::Sedatives => "Sedatives/Sleeping Meds",
            SubstanceFamily::Opioids => "Opioids (Street/Rx)",
            SubstanceFamily::Other => "Other Psychoactive Substances",
        }
    }
}

impl fmt::Display for SubstanceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SubstanceFamily {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubstanceFamily::ALL
            .into_iter()
            .find(|family| family.id() == s)
            .ok_or_else(|| CoreError::UnknownSubstance(s.to_string()))
    }
}

/// One of the four yes/no answers recorded per substance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SubstanceFlag {
    /// Any use in the past three months.
    #[serde(rename = "used_in_past_3_months")]
    UsedInPast3Months,
    /// q1: the family's frequency threshold was exceeded.
    Frequency,
    /// q2: a failed quit attempt, or someone expressed concern.
    Concern,
    /// q3: family-specific supplementary criterion.
    Extra,
}

impl SubstanceFlag {
    pub const ALL: [SubstanceFlag; 4] = [
        SubstanceFlag::UsedInPast3Months,
        SubstanceFlag::Frequency,
        SubstanceFlag::Concern,
        SubstanceFlag::Extra,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SubstanceFlag::UsedInPast3Months => "used_in_past_3_months",
            SubstanceFlag::Frequency => "frequency",
            SubstanceFlag::Concern => "concern",
            SubstanceFlag::Extra => "extra",
        }
    }
}

impl fmt::Display for SubstanceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubstanceFlag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "used_in_past_3_months" => Ok(SubstanceFlag::UsedInPast3Months),
            "frequency" | "q1" => Ok(SubstanceFlag::Frequency),
            "concern" | "q2" => Ok(SubstanceFlag::Concern),
            "extra" | "q3" => Ok(SubstanceFlag::Extra),
            other => Err(CoreError::UnknownFlag(other.to_string())),
        }
    }
}

/// The raw answers for one substance. What each flag means, and whether it
/// counts toward the score, depends on the substance family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssistAnswers {
    #[serde(default)]
    pub used_in_past_3_months: bool,
    /// >10 cigarettes/day, >4 drinks/occasion, or more than weekly use.
    #[serde(default)]
    pub frequency_flag: bool,
    #[serde(default)]
    pub concern_flag: bool,
    /// Tobacco: use within 30 minutes of waking. Alcohol: tried to stop
    /// and failed. Unused elsewhere.
    #[serde(default)]
    pub extra_flag: bool,
}

impl AssistAnswers {
    pub fn get(&self, flag: SubstanceFlag) -> bool {
        match flag {
            SubstanceFlag::UsedInPast3Months => self.used_in_past_3_months,
            SubstanceFlag::Frequency => self.frequency_flag,
            SubstanceFlag::Concern => self.concern_flag,
            SubstanceFlag::Extra => self.extra_flag,
        }
    }

    pub fn set(&mut self, flag: SubstanceFlag, value: bool) {
        let slot = match flag {
            SubstanceFlag::UsedInPast3Months => &mut self.used_in_past_3_months,
            SubstanceFlag::Frequency => &mut self.frequency_flag,
            SubstanceFlag::Concern => &mut self.concern_flag,
            SubstanceFlag::Extra => &mut self.extra_flag,
        };
        *slot = value;
    }
}

/// A substance entry on the ASSIST screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubstanceAssessment {
    pub family: SubstanceFamily,
    pub display_name: String,
    #[serde(flatten)]
    pub answers: AssistAnswers,
}

impl SubstanceAssessment {
    /// An unanswered entry for `family`.
    pub fn new(family: SubstanceFamily) -> Self {
        Self {
            family,
            display_name: family.display_name().to_string(),
            answers: AssistAnswers::default(),
        }
    }

    /// One fresh entry per family, in screening order.
    pub fn all_families() -> Vec<SubstanceAssessment> {
        SubstanceFamily::ALL.into_iter().map(Self::new).collect()
    }
}
