use tracing::{debug, error};

use sbirt_core::models::risk::{AssistRiskCategory, DastRiskLevel};
use sbirt_core::models::substance::{AssistAnswers, SubstanceFamily, SubstanceFlag};

use crate::error::InstrumentError;
use crate::instruments::dast10;
use crate::registry::ResponseRegistry;

/// Highest possible DAST-10 score.
pub const DAST_MAX_SCORE: usize = 10;

/// Number of affirmative DAST-10 answers. Recomputed on every call.
pub fn dast_score(registry: &ResponseRegistry) -> usize {
    registry.affirmative_count()
}

/// Map a DAST-10 score to its risk tier.
///
/// A score above 10 means the registry is corrupt and is reported as an
/// [`InstrumentError::InvariantViolation`].
pub fn dast_risk_level(score: usize) -> Result<DastRiskLevel, InstrumentError> {
    match score {
        0 => Ok(DastRiskLevel::Low),
        1..=2 => Ok(DastRiskLevel::LowModerate),
        3..=5 => Ok(DastRiskLevel::Moderate),
        6..=DAST_MAX_SCORE => Ok(DastRiskLevel::Substantial),
        _ => {
            error!(score, max = DAST_MAX_SCORE, "DAST-10 score out of range");
            Err(InstrumentError::InvariantViolation {
                instrument_id: dast10::ID.to_string(),
                score,
                max: DAST_MAX_SCORE,
            })
        }
    }
}

/// ASSIST scoring rule. The same four answers are weighted differently per
/// family, so each rule keeps its own tally and thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistFormula {
    /// used + frequency + within-30-minutes. Concern is not counted.
    Tobacco,
    /// used + frequency + failed-to-stop + concern.
    Alcohol,
    /// used + frequency + concern. Extra is not counted.
    Generic,
}

impl AssistFormula {
    pub fn for_family(family: SubstanceFamily) -> Self {
        match family {
            SubstanceFamily::Tobacco => AssistFormula::Tobacco,
            SubstanceFamily::Alcohol => AssistFormula::Alcohol,
            SubstanceFamily::Cannabis
            | SubstanceFamily::Stimulants
            | SubstanceFamily::Sedatives
            | SubstanceFamily::Opioids
            | SubstanceFamily::Other => AssistFormula::Generic,
        }
    }

    /// Resolve a raw family id. Unrecognized ids use [`AssistFormula::Generic`].
    pub fn for_family_id(id: &str) -> Self {
        match id.parse::<SubstanceFamily>() {
            Ok(family) => Self::for_family(family),
            Err(_) => {
                debug!(family = id, "unrecognized substance family, using generic formula");
                AssistFormula::Generic
            }
        }
    }

    pub fn tally(self, answers: &AssistAnswers) -> u8 {
        match self {
            AssistFormula::Tobacco => {
                u8::from(answers.used_in_past_3_months)
                    + u8::from(answers.frequency_flag)
                    + u8::from(answers.extra_flag)
            }
            AssistFormula::Alcohol => {
                u8::from(answers.used_in_past_3_months)
                    + u8::from(answers.frequency_flag)
                    + u8::from(answers.extra_flag)
                    + u8::from(answers.concern_flag)
            }
            AssistFormula::Generic => {
                u8::from(answers.used_in_past_3_months)
                    + u8::from(answers.frequency_flag)
                    + u8::from(answers.concern_flag)
            }
        }
    }

    pub fn classify(self, tally: u8) -> AssistRiskCategory {
        match self {
            AssistFormula::Tobacco | AssistFormula::Generic => match tally {
                0 => AssistRiskCategory::Low,
                1..=2 => AssistRiskCategory::Moderate,
                _ => AssistRiskCategory::High,
            },
            AssistFormula::Alcohol => match tally {
                0..=1 => AssistRiskCategory::Low,
                2 => AssistRiskCategory::Moderate,
                _ => AssistRiskCategory::High,
            },
        }
    }

    pub fn max_tally(self) -> u8 {
        match self {
            AssistFormula::Tobacco => 3,
            AssistFormula::Alcohol => 4,
            AssistFormula::Generic => 3,
        }
    }

    /// The flags this formula counts, for display.
    pub fn scored_flags(self) -> &'static [SubstanceFlag] {
        match self {
            AssistFormula::Tobacco => &[
                SubstanceFlag::UsedInPast3Months,
                SubstanceFlag::Frequency,
                SubstanceFlag::Extra,
            ],
            AssistFormula::Alcohol => &SubstanceFlag::ALL,
            AssistFormula::Generic => &[
                SubstanceFlag::UsedInPast3Months,
                SubstanceFlag::Frequency,
                SubstanceFlag::Concern,
            ],
        }
    }
}

pub fn assist_risk_category(
    family: SubstanceFamily,
    answers: &AssistAnswers,
) -> AssistRiskCategory {
    let formula = AssistFormula::for_family(family);
    formula.classify(formula.tally(answers))
}

/// Like [`assist_risk_category`], for callers holding an unparsed family id.
pub fn assist_risk_category_for_id(
    family_id: &str,
    answers: &AssistAnswers,
) -> AssistRiskCategory {
    let formula = AssistFormula::for_family_id(family_id);
    formula.classify(formula.tally(answers))
}
