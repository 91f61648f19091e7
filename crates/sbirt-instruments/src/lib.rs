//! sbirt-instruments
//!
//! Screening instrument definitions and scoring rules. Pure and
//! synchronous: no I/O, no background work. Defines the DAST-10 items,
//! the ASSIST prompts, the per-family ASSIST formulas, and the session that
//! collects answers and derives risk tiers from them.

pub mod error;
pub mod instruments;
pub mod registry;
pub mod scoring;
pub mod session;
pub mod snapshot;

use error::InstrumentError;
use sbirt_core::models::item::ScreeningItem;
use session::ScreeningSession;

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "dast10", "assist").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "DAST-10").
    fn name(&self) -> &str;

    /// Canonical yes/no items, unanswered. Empty for instruments that are
    /// not answered item by item.
    fn items(&self) -> &[ScreeningItem] {
        &[]
    }

    /// Format this instrument's results as structured text for a clinical
    /// note.
    fn summarize(&self, session: &ScreeningSession) -> Result<String, InstrumentError>;
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::dast10::Dast10),
        Box::new(instruments::assist::Assist),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
