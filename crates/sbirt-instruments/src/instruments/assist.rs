use serde::Serialize;
use ts_rs::TS;

use sbirt_core::models::substance::{SubstanceFamily, SubstanceFlag};

use crate::error::InstrumentError;
use crate::scoring::AssistFormula;
use crate::session::ScreeningSession;
use crate::Instrument;

pub const ID: &str = "assist";

/// A question shown on the ASSIST screen and the flag its answer sets.
///
/// Several prompts may answer the same flag; a "yes" to any of them sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct AssistPrompt {
    pub id: &'static str,
    pub family: SubstanceFamily,
    pub flag: SubstanceFlag,
    pub text: &'static str,
}

const fn prompt(
    id: &'static str,
    family: SubstanceFamily,
    flag: SubstanceFlag,
    text: &'static str,
) -> AssistPrompt {
    AssistPrompt {
        id,
        family,
        flag,
        text,
    }
}

/// Every ASSIST prompt, grouped by family in screening order.
pub const PROMPTS: &[AssistPrompt] = &[
    prompt(
        "tobacco",
        SubstanceFamily::Tobacco,
        SubstanceFlag::UsedInPast3Months,
        "1. Did you smoke a cigarette containing tobacco?",
    ),
    prompt(
        "tobacco_10",
        SubstanceFamily::Tobacco,
        SubstanceFlag::Frequency,
        "1a. Did you usually smoke more than 10 cigarettes each day?",
    ),
    prompt(
        "tobacco_30min",
        SubstanceFamily::Tobacco,
        SubstanceFlag::Extra,
        "1b. Did you usually smoke within 30 minutes after waking?",
    ),
    prompt(
        "alcohol",
        SubstanceFamily::Alcohol,
        SubstanceFlag::UsedInPast3Months,
        "2. Did you have a drink containing alcohol?",
    ),
    prompt(
        "alcohol_4drinks",
        SubstanceFamily::Alcohol,
        SubstanceFlag::Frequency,
        "2a. On any occasion, did you drink more than 4 standard drinks of alcohol?",
    ),
    prompt(
        "alcohol_control",
        SubstanceFamily::Alcohol,
        SubstanceFlag::Extra,
        "2b. Have you tried and failed to control, cut down or stop drinking?",
    ),
    prompt(
        "alcohol_concern",
        SubstanceFamily::Alcohol,
        SubstanceFlag::Concern,
        "2c. Has anyone expressed concern about your drinking?",
    ),
    prompt(
        "cannabis",
        SubstanceFamily::Cannabis,
        SubstanceFlag::UsedInPast3Months,
        "3. Did you use cannabis?",
    ),
    prompt(
        "cannabis_urge",
        SubstanceFamily::Cannabis,
        SubstanceFlag::Frequency,
        "3a. Have you had a strong desire or urge to use cannabis at least once a week or more often?",
    ),
    prompt(
        "cannabis_concern",
        SubstanceFamily::Cannabis,
        SubstanceFlag::Concern,
        "3b. Has anyone expressed concern about your use of cannabis?",
    ),
    prompt(
        "stimulants",
        SubstanceFamily::Stimulants,
        SubstanceFlag::UsedInPast3Months,
        "4. Did you use an amphetamine-type stimulant, or cocaine, or a stimulant medication not as prescribed?",
    ),
    prompt(
        "stimulants_weekly",
        SubstanceFamily::Stimulants,
        SubstanceFlag::Frequency,
        "4a. Did you use a stimulant at least once each week or more often?",
    ),
    prompt(
        "stimulants_concern",
        SubstanceFamily::Stimulants,
        SubstanceFlag::Concern,
        "4b. Has anyone expressed concern about your use of a stimulant?",
    ),
    prompt(
        "sedatives",
        SubstanceFamily::Sedatives,
        SubstanceFlag::UsedInPast3Months,
        "5. Did you use a sedative or sleeping medication not as prescribed?",
    ),
    prompt(
        "sedatives_urge",
        SubstanceFamily::Sedatives,
        SubstanceFlag::Frequency,
        "5a. Have you had a strong desire or urge to use a sedative or sleeping medication at least once a week or more?",
    ),
    prompt(
        "sedatives_concern",
        SubstanceFamily::Sedatives,
        SubstanceFlag::Concern,
        "5b. Has anyone expressed concern about your use of a sedative or sleeping medication?",
    ),
    prompt(
        "opioids",
        SubstanceFamily::Opioids,
        SubstanceFlag::UsedInPast3Months,
        "6. Did you use a street opioid (e.g. heroin) or an opioid-containing medication not as prescribed?",
    ),
    prompt(
        "opioids_control",
        SubstanceFamily::Opioids,
        SubstanceFlag::Concern,
        "6a. Have you tried and failed to control, cut down or stop using an opioid?",
    ),
    prompt(
        "opioids_concern",
        SubstanceFamily::Opioids,
        SubstanceFlag::Concern,
        "6b. Has anyone expressed concern about your use of an opioid?",
    ),
    prompt(
        "other",
        SubstanceFamily::Other,
        SubstanceFlag::UsedInPast3Months,
        "7. Did you use any other psychoactive substances?",
    ),
];

/// Prompts for one family, in order.
pub fn prompts_for(family: SubstanceFamily) -> impl Iterator<Item = &'static AssistPrompt> {
    PROMPTS.iter().filter(move |p| p.family == family)
}

pub fn find_prompt(id: &str) -> Option<&'static AssistPrompt> {
    PROMPTS.iter().find(|p| p.id == id)
}

/// ASSIST: Alcohol, Smoking and Substance Involvement Screening Test.
/// Seven substance families, each classified Low/Moderate/High on its own.
pub struct Assist;

impl Instrument for Assist {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "ASSIST"
    }

    fn summarize(&self, session: &ScreeningSession) -> Result<String, InstrumentError> {
        let mut output = format!("## {}\n\n", self.name());
        for substance in session.substances() {
            let formula = AssistFormula::for_family(substance.family);
            let tally = formula.tally(&substance.answers);
            output.push_str(&format!(
                "- {}: {} ({}/{})\n",
                substance.display_name,
                formula.classify(tally),
                tally,
                formula.max_tally(),
            ));
        }
        Ok(output)
    }
}
