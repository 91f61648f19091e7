use serde::Serialize;
use tracing::{info, warn};

/// A structured event describing one recorded answer.
///
/// `subject` is the item or substance the answer belongs to and `field` is
/// the answered question (the item id again for DAST-10, the flag name for
/// ASSIST).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEvent {
    pub instrument: String,
    pub subject: String,
    pub field: String,
    pub value: bool,
}

impl ResponseEvent {
    pub fn new(
        instrument: impl Into<String>,
        subject: impl Into<String>,
        field: impl Into<String>,
        value: bool,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            subject: subject.into(),
            field: field.into(),
            value,
        }
    }

    /// Emit this event via tracing.
    pub fn emit(&self) {
        info!(
            response.instrument = %self.instrument,
            response.subject = %self.subject,
            response.field = %self.field,
            response.value = self.value,
            "response recorded"
        );
    }
}

/// Emit a warning for a mutation that referenced an id outside the fixed
/// registry. The mutation itself is dropped by the caller.
pub fn emit_rejected(instrument: &str, subject: &str, reason: &str) {
    warn!(
        response.instrument = instrument,
        response.subject = subject,
        reason,
        "response rejected"
    );
}
