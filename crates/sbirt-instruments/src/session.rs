use sbirt_audit::events::{ResponseEvent, emit_rejected};
use sbirt_core::models::item::ScreeningItem;
use sbirt_core::models::risk::{AssistRiskCategory, DastRiskLevel};
use sbirt_core::models::substance::{SubstanceAssessment, SubstanceFamily, SubstanceFlag};

use crate::error::InstrumentError;
use crate::instruments::{assist, dast10};
use crate::registry::ResponseRegistry;
use crate::scoring::{assist_risk_category, dast_risk_level, dast_score};
use crate::{all_instruments, get_instrument};

/// The answers collected during one screening visit.
///
/// DAST-10 and ASSIST are held side by side and never combined. Every
/// derived value (score, risk tier) is recomputed from the answers on each
/// read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningSession {
    registries: Vec<ResponseRegistry>,
    substances: Vec<SubstanceAssessment>,
}

impl Default for ScreeningSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreeningSession {
    /// A session with every question unanswered.
    pub fn new() -> Self {
        let registries = all_instruments()
            .iter()
            .filter(|instrument| !instrument.items().is_empty())
            .map(|instrument| ResponseRegistry::new(instrument.id(), instrument.items()))
            .collect();

        Self {
            registries,
            substances: SubstanceAssessment::all_families(),
        }
    }

    fn registry(&self, instrument_id: &str) -> Result<&ResponseRegistry, InstrumentError> {
        self.registries
            .iter()
            .find(|r| r.instrument_id() == instrument_id)
            .ok_or_else(|| missing_registry(instrument_id))
    }

    fn registry_mut(
        &mut self,
        instrument_id: &str,
    ) -> Result<&mut ResponseRegistry, InstrumentError> {
        self.registries
            .iter_mut()
            .find(|r| r.instrument_id() == instrument_id)
            .ok_or_else(|| missing_registry(instrument_id))
    }

    /// Items of an item-based instrument, in canonical order.
    pub fn items(&self, instrument_id: &str) -> Result<&[ScreeningItem], InstrumentError> {
        Ok(self.registry(instrument_id)?.items())
    }

    pub fn set_affirmative(
        &mut self,
        instrument_id: &str,
        item_id: &str,
        value: bool,
    ) -> Result<(), InstrumentError> {
        let registry = self.registry_mut(instrument_id).inspect_err(|_| {
            emit_rejected(instrument_id, item_id, "unknown instrument");
        })?;
        registry.set_affirmative(item_id, value)
    }

    /// Number of "yes" DAST-10 answers. A session without a DAST-10
    /// registry is corrupt and fails rather than reading as zero.
    pub fn dast_score(&self) -> Result<usize, InstrumentError> {
        Ok(dast_score(self.registry(dast10::ID)?))
    }

    pub fn dast_risk_level(&self) -> Result<DastRiskLevel, InstrumentError> {
        dast_risk_level(self.dast_score()?)
    }

    pub fn substances(&self) -> &[SubstanceAssessment] {
        &self.substances
    }

    pub fn substance(&self, family: SubstanceFamily) -> &SubstanceAssessment {
        // Stored in `SubstanceFamily::ALL` order, one entry per family.
        &self.substances[family as usize]
    }

    /// Record an ASSIST answer for a known family and flag.
    pub fn set_flag(&mut self, family: SubstanceFamily, flag: SubstanceFlag, value: bool) {
        self.substances[family as usize].answers.set(flag, value);
        ResponseEvent::new(assist::ID, family.id(), flag.name(), value).emit();
    }

    /// Record an ASSIST answer by raw ids. Unknown substances or flags are
    /// rejected without changing any answer.
    pub fn set_substance_flag(
        &mut self,
        substance_id: &str,
        flag_name: &str,
        value: bool,
    ) -> Result<(), InstrumentError> {
        let parsed = substance_id
            .parse::<SubstanceFamily>()
            .and_then(|family| flag_name.parse::<SubstanceFlag>().map(|flag| (family, flag)));
        let (family, flag) = match parsed {
            Ok(pair) => pair,
            Err(e) => {
                emit_rejected(assist::ID, substance_id, &e.to_string());
                return Err(e.into());
            }
        };

        self.set_flag(family, flag, value);
        Ok(())
    }

    pub fn risk_category(&self, family: SubstanceFamily) -> AssistRiskCategory {
        assist_risk_category(family, &self.substance(family).answers)
    }

    pub fn substance_risk_category(
        &self,
        substance_id: &str,
    ) -> Result<AssistRiskCategory, InstrumentError> {
        let family = substance_id.parse::<SubstanceFamily>()?;
        Ok(self.risk_category(family))
    }

    /// Clear every answer on both instruments.
    pub fn reset(&mut self) {
        for registry in &mut self.registries {
            registry.reset();
        }
        self.substances = SubstanceAssessment::all_families();
    }

    /// Structured text of every instrument's results, for a clinical note.
    pub fn summary(&self) -> Result<String, InstrumentError> {
        let mut output = String::new();
        for instrument in all_instruments() {
            output.push_str(&instrument.summarize(self)?);
            output.push('\n');
        }
        Ok(output)
    }

    pub(crate) fn from_parts(
        registries: Vec<ResponseRegistry>,
        substances: Vec<SubstanceAssessment>,
    ) -> Self {
        Self {
            registries,
            substances,
        }
    }

    pub(crate) fn registries(&self) -> &[ResponseRegistry] {
        &self.registries
    }
}

fn missing_registry(instrument_id: &str) -> InstrumentError {
    if get_instrument(instrument_id).is_some() {
        InstrumentError::NoItemRegistry(instrument_id.to_string())
    } else {
        InstrumentError::UnknownInstrument(instrument_id.to_string())
    }
}
