use sbirt_core::models::item::ScreeningItem;

use crate::error::InstrumentError;
use crate::scoring::{DAST_MAX_SCORE, dast_risk_level};
use crate::session::ScreeningSession;
use crate::Instrument;

pub const ID: &str = "dast10";

/// DAST-10: Drug Abuse Screening Test, 10-item version.
/// One point per "yes". Total 0–10.
pub struct Dast10;

impl Instrument for Dast10 {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "DAST-10"
    }

    fn items(&self) -> &[ScreeningItem] {
        static ITEMS: std::sync::LazyLock<Vec<ScreeningItem>> = std::sync::LazyLock::new(|| {
            let items = [
                ("d1", "Have you used drugs other than those required for medical reasons?"),
                ("d2", "Do you use more than one drug at a time?"),
                ("d3", "Are you unable to get through the week without using drugs?"),
                ("d4", "Have you ever had blackouts or flashbacks as a result of drug use?"),
                ("d5", "Do you ever feel bad or guilty about your drug use?"),
                (
                    "d6",
                    "Does your spouse (or parents) ever complain about your involvement with drugs?",
                ),
                ("d7", "Have you neglected your family because of your use of drugs?"),
                ("d8", "Have you engaged in illegal activities in order to obtain drugs?"),
                (
                    "d9",
                    "Have you ever experienced withdrawal symptoms (felt sick) when you stopped taking drugs?",
                ),
                (
                    "d10",
                    "Have you had medical problems as a result of your drug use (e.g., memory loss, hepatitis, convulsions, bleeding)?",
                ),
            ];

            items
                .iter()
                .map(|(id, prompt)| ScreeningItem::new(*id, *prompt))
                .collect()
        });
        &ITEMS
    }

    fn summarize(&self, session: &ScreeningSession) -> Result<String, InstrumentError> {
        let score = session.dast_score()?;
        let level = dast_risk_level(score)?;
        let affirmative: Vec<&str> = session
            .items(ID)?
            .iter()
            .filter(|item| item.is_affirmative)
            .map(|item| item.id.as_str())
            .collect();

        let mut output = format!("## {}\n\n", self.name());
        output.push_str(&format!("- Score: {score}/{DAST_MAX_SCORE}\n"));
        output.push_str(&format!("- Risk level: {level}\n"));
        if affirmative.is_empty() {
            output.push_str("- Affirmative items: none\n");
        } else {
            output.push_str(&format!("- Affirmative items: {}\n", affirmative.join(", ")));
        }
        Ok(output)
    }
}
