use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single yes/no question on an item-based instrument such as DAST-10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningItem {
    /// Stable identifier, unique within its instrument (e.g., "d3").
    pub id: String,
    /// The clinical question, verbatim.
    pub prompt_text: String,
    #[serde(default)]
    pub is_affirmative: bool,
}

impl ScreeningItem {
    /// An unanswered item.
    pub fn new(id: impl Into<String>, prompt_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt_text: prompt_text.into(),
            is_affirmative: false,
        }
    }
}
