use sbirt_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("instrument '{0}' has no yes/no item registry")]
    NoItemRegistry(String),

    #[error("unknown item '{item_id}' for instrument '{instrument_id}'")]
    UnknownItem {
        instrument_id: String,
        item_id: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("unknown ASSIST prompt: {0}")]
    UnknownPrompt(String),

    /// A derived score left its closed range. The response registry is
    /// corrupt; never clamp this away.
    #[error("{instrument_id} score {score} is outside range [0, {max}]")]
    InvariantViolation {
        instrument_id: String,
        score: usize,
        max: usize,
    },

    #[error(
        "snapshot_version {found} is newer than this build supports ({supported})"
    )]
    UnsupportedSnapshotVersion { found: u64, supported: u32 },

    /// More than one "yes" answer would collapse onto a single flag,
    /// scoring lower than the web store did.
    #[error("ASSIST prompts {prompts:?} all fold into {family}.{flag}")]
    FoldedPrompts {
        family: String,
        flag: String,
        prompts: Vec<String>,
    },

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InstrumentError {
    /// True for errors caused by an id outside the fixed registries.
    pub fn is_unknown_identifier(&self) -> bool {
        matches!(
            self,
            InstrumentError::UnknownInstrument(_)
                | InstrumentError::UnknownItem { .. }
                | InstrumentError::UnknownPrompt(_)
                | InstrumentError::Core(_)
        )
    }
}
