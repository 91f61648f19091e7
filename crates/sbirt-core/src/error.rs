use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown substance: {0}")]
    UnknownSubstance(String),

    #[error("unknown substance flag: {0}")]
    UnknownFlag(String),
}
