use sbirt_audit::events::{ResponseEvent, emit_rejected};
use sbirt_core::models::item::ScreeningItem;

use crate::error::InstrumentError;

/// The ordered yes/no items of one instrument and their current answers.
///
/// The item set is fixed at construction. Only `is_affirmative` changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRegistry {
    instrument_id: String,
    items: Vec<ScreeningItem>,
}

impl ResponseRegistry {
    pub fn new(instrument_id: impl Into<String>, items: &[ScreeningItem]) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            items: items.to_vec(),
        }
    }

    pub fn instrument_id(&self) -> &str {
        &self.instrument_id
    }

    pub fn items(&self) -> &[ScreeningItem] {
        &self.items
    }

    /// Record an answer. An unknown `item_id` leaves the registry untouched
    /// and returns [`InstrumentError::UnknownItem`].
    pub fn set_affirmative(&mut self, item_id: &str, value: bool) -> Result<(), InstrumentError> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            emit_rejected(&self.instrument_id, item_id, "unknown item");
            return Err(InstrumentError::UnknownItem {
                instrument_id: self.instrument_id.clone(),
                item_id: item_id.to_string(),
            });
        };

        item.is_affirmative = value;
        ResponseEvent::new(&self.instrument_id, item_id, item_id, value).emit();
        Ok(())
    }

    pub fn affirmative_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_affirmative).count()
    }

    /// Replace all answers: `affirmative_ids` become "yes", everything else
    /// "no". Fails without changes if any id is unknown. Emits no response
    /// events.
    pub fn restore(&mut self, affirmative_ids: &[String]) -> Result<(), InstrumentError> {
        if let Some(unknown) = affirmative_ids
            .iter()
            .find(|id| !self.items.iter().any(|item| &item.id == *id))
        {
            return Err(InstrumentError::UnknownItem {
                instrument_id: self.instrument_id.clone(),
                item_id: unknown.clone(),
            });
        }

        for item in &mut self.items {
            item.is_affirmative = affirmative_ids.contains(&item.id);
        }
        Ok(())
    }

    /// Clear every answer.
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.is_affirmative = false;
        }
    }
}
