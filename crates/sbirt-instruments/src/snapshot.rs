use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sbirt_core::models::substance::{SubstanceAssessment, SubstanceFamily};

use crate::error::InstrumentError;
use crate::instruments::assist::{self, AssistPrompt};
use crate::instruments::dast10;
use crate::session::ScreeningSession;

/// Current snapshot version. Bump this when changing the shape and add a
/// step to [`migrate`].
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

const SNAPSHOT_KEYS: [&str; 3] = ["snapshot_version", "dast_affirmative", "substances"];

/// The serializable state of a screening session: the answers only, never
/// derived scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSnapshot {
    /// Always present. Only the web app's pre-versioned ASSIST store (v0)
    /// omits it.
    pub snapshot_version: u32,
    /// DAST-10 item ids answered "yes".
    #[serde(default)]
    pub dast_affirmative: Vec<String>,
    /// Answered substances. Families not listed are unanswered.
    #[serde(default)]
    pub substances: Vec<SubstanceAssessment>,
}

impl ScreeningSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        let dast_affirmative = self
            .registries()
            .iter()
            .filter(|r| r.instrument_id() == dast10::ID)
            .flat_map(|r| r.items())
            .filter(|item| item.is_affirmative)
            .map(|item| item.id.clone())
            .collect();

        SessionSnapshot {
            snapshot_version: CURRENT_SNAPSHOT_VERSION,
            dast_affirmative,
            substances: self.substances().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, InstrumentError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Parse a snapshot, migrating older shapes first.
    pub fn from_json(contents: &str) -> Result<Self, InstrumentError> {
        // Parse as raw JSON so migrations run before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = snapshot_version(&json)?;

        let migrated = migrate(json, on_disk_version)?;
        expect_keys(&migrated, &SNAPSHOT_KEYS)?;
        let snapshot: SessionSnapshot = serde_json::from_value(migrated)?;
        Self::from_snapshot(&snapshot)
    }

    /// Rebuild a session. Every id must be known; nothing is dropped.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Result<Self, InstrumentError> {
        if snapshot.snapshot_version > CURRENT_SNAPSHOT_VERSION {
            return Err(InstrumentError::UnsupportedSnapshotVersion {
                found: u64::from(snapshot.snapshot_version),
                supported: CURRENT_SNAPSHOT_VERSION,
            });
        }

        let fresh = ScreeningSession::new();
        let mut registries = fresh.registries().to_vec();
        for registry in &mut registries {
            if registry.instrument_id() == dast10::ID {
                registry.restore(&snapshot.dast_affirmative)?;
            }
        }

        let mut substances = SubstanceAssessment::all_families();
        let mut seen = [false; SubstanceFamily::ALL.len()];
        for entry in &snapshot.substances {
            let slot = entry.family as usize;
            if seen[slot] {
                return Err(InstrumentError::MalformedSnapshot(format!(
                    "substance '{}' listed more than once",
                    entry.family
                )));
            }
            seen[slot] = true;
            substances[slot].answers = entry.answers;
        }

        tracing::info!(
            dast_affirmative = snapshot.dast_affirmative.len(),
            substances = snapshot.substances.len(),
            "session restored from snapshot"
        );
        Ok(ScreeningSession::from_parts(registries, substances))
    }
}

/// Read `snapshot_version`. Only the web store's own shape may omit it.
fn snapshot_version(json: &serde_json::Value) -> Result<u32, InstrumentError> {
    let obj = json.as_object().ok_or_else(|| malformed("not a JSON object"))?;
    match obj.get("snapshot_version") {
        Some(value) => {
            let version = value
                .as_u64()
                .ok_or_else(|| malformed("snapshot_version is not a non-negative integer"))?;
            u32::try_from(version).map_err(|_| InstrumentError::UnsupportedSnapshotVersion {
                found: version,
                supported: CURRENT_SNAPSHOT_VERSION,
            })
        }
        None if obj.contains_key("assistScores") || obj.contains_key("state") => Ok(0),
        None => Err(malformed("missing snapshot_version")),
    }
}

/// Fail on any top-level key outside `allowed`.
fn expect_keys(json: &serde_json::Value, allowed: &[&str]) -> Result<(), InstrumentError> {
    let obj = json.as_object().ok_or_else(|| malformed("not a JSON object"))?;
    match obj.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(malformed(&format!("unexpected key '{key}'"))),
        None => Ok(()),
    }
}

fn malformed(reason: &str) -> InstrumentError {
    InstrumentError::MalformedSnapshot(reason.to_string())
}

/// Run sequential migrations from `from_version` up to
/// [`CURRENT_SNAPSHOT_VERSION`]. Each step is a pure transform on the raw
/// JSON value.
fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, InstrumentError> {
    if from_version > CURRENT_SNAPSHOT_VERSION {
        return Err(InstrumentError::UnsupportedSnapshotVersion {
            found: u64::from(from_version),
            supported: CURRENT_SNAPSHOT_VERSION,
        });
    }

    // v0 → v1: the web store kept one flat toggle map keyed by ASSIST
    // prompt id, optionally wrapped in the persistence layer's `state`.
    if from_version < 1 {
        let state = json.get_mut("state").map(serde_json::Value::take);
        let store = match state {
            Some(state) => {
                expect_keys(&json, &["state", "version"])?;
                state
            }
            None => json,
        };
        expect_keys(&store, &["assistScores"])?;

        let mut yes: Vec<&'static AssistPrompt> = Vec::new();
        if let Some(scores) = store.get("assistScores") {
            let scores = scores
                .as_object()
                .ok_or_else(|| malformed("assistScores is not an object"))?;
            for (prompt_id, value) in scores {
                let prompt = assist::find_prompt(prompt_id)
                    .ok_or_else(|| InstrumentError::UnknownPrompt(prompt_id.clone()))?;
                let value = value
                    .as_bool()
                    .ok_or_else(|| malformed(&format!("{prompt_id} is not a boolean")))?;
                if value {
                    yes.push(prompt);
                }
            }
        }

        // The web store counted every prompt separately. Two "yes" answers
        // on one flag would score lower here, so refuse them.
        for prompt in &yes {
            let sharing: Vec<String> = yes
                .iter()
                .filter(|p| p.family == prompt.family && p.flag == prompt.flag)
                .map(|p| p.id.to_string())
                .collect();
            if sharing.len() > 1 {
                tracing::warn!(
                    family = %prompt.family,
                    flag = %prompt.flag,
                    prompts = ?sharing,
                    "web store answers fold into one flag"
                );
                return Err(InstrumentError::FoldedPrompts {
                    family: prompt.family.to_string(),
                    flag: prompt.flag.to_string(),
                    prompts: sharing,
                });
            }
        }

        let mut substances = SubstanceAssessment::all_families();
        let mut answered = [false; SubstanceFamily::ALL.len()];
        for prompt in &yes {
            let slot = prompt.family as usize;
            substances[slot].answers.set(prompt.flag, true);
            answered[slot] = true;
        }

        let snapshot = SessionSnapshot {
            snapshot_version: 1,
            dast_affirmative: Vec::new(),
            substances: substances
                .into_iter()
                .zip(answered)
                .filter_map(|(entry, answered)| answered.then_some(entry))
                .collect(),
        };
        json = serde_json::to_value(snapshot)?;
        tracing::info!("migrated snapshot v0 → v1 (flat ASSIST toggles)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}
