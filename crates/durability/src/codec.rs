//! Snapshot ⇄ envelope codec
//!
//! The on-disk envelope is the snapshot's own JSON plus two stamped metadata
//! keys: `version` (fixed schema string) and `savedAt` (epoch seconds at
//! encode time). Callers never supply either.
//!
//! Validation is structural only: mandatory keys present, typed fields of
//! the expected JSON type. Per-item schema is the domain models' concern and
//! surfaces through [`CodecError::Decode`] during [`StateCodec::decode`].

use chrono::Utc;
use serde_json::{Map, Value};
use tasksave_core::GameSnapshot;
use thiserror::Error;

/// Schema version written into every envelope.
pub const SAVE_FORMAT_VERSION: &str = "1.0.0";

pub(crate) const VERSION_KEY: &str = "version";
pub(crate) const SAVED_AT_KEY: &str = "savedAt";
const CHARACTER_KEY: &str = "character";
const ARRAY_KEYS: [&str; 3] = ["tasks", "notes", "habits"];

/// Failures at the codec boundary.
///
/// The coordinator translates these into the public load taxonomy; no codec
/// error escapes the crate directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Bytes are not well-formed JSON.
    #[error("invalid JSON syntax: {0}")]
    Syntax(String),

    /// Bytes are not valid UTF-8 / the document is not an object, or a
    /// mandatory key is missing or mistyped.
    #[error("invalid envelope structure: {0}")]
    Structure(String),

    /// The envelope's `version` belongs to a schema this build cannot read.
    #[error("unsupported save version: {0}")]
    UnsupportedVersion(String),

    /// A structurally valid envelope whose `{section}` payload failed
    /// model decoding.
    #[error("failed to decode {section}: {message}")]
    Decode {
        /// Envelope key of the failing section.
        section: &'static str,
        /// Underlying serde message.
        message: String,
    },

    /// Snapshot could not be serialized. Should not happen for well-formed
    /// in-memory state.
    #[error("failed to encode snapshot: {0}")]
    Encode(String),
}

/// Bidirectional mapping between [`GameSnapshot`] and the on-disk envelope.
///
/// Stateless and immutable; shared freely across threads without locking.
#[derive(Debug, Default)]
pub struct StateCodec;

impl StateCodec {
    /// Encode a snapshot into an envelope, stamping `version` and `savedAt`.
    pub fn encode(&self, snapshot: &GameSnapshot) -> Result<Value, CodecError> {
        let value =
            serde_json::to_value(snapshot).map_err(|e| CodecError::Encode(e.to_string()))?;
        let mut doc = match value {
            Value::Object(map) => map,
            other => {
                return Err(CodecError::Encode(format!(
                    "snapshot serialized to non-object JSON: {other}"
                )))
            }
        };
        doc.insert(
            VERSION_KEY.to_string(),
            Value::String(SAVE_FORMAT_VERSION.to_string()),
        );
        doc.insert(SAVED_AT_KEY.to_string(), Value::from(Utc::now().timestamp()));
        Ok(Value::Object(doc))
    }

    /// Parse raw bytes into a JSON document.
    pub fn parse(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Syntax(e.to_string()))
    }

    /// Render a document as pretty-printed UTF-8 with 2-space indentation.
    pub fn to_pretty_bytes(&self, doc: &Value) -> Result<Vec<u8>, CodecError> {
        let mut text =
            serde_json::to_string_pretty(doc).map_err(|e| CodecError::Encode(e.to_string()))?;
        text.push('\n');
        Ok(text.into_bytes())
    }

    /// Structural envelope check: top-level object, `version` string and
    /// `character` present, `tasks`/`notes`/`habits` arrays when present.
    ///
    /// Does not inspect per-item schema.
    pub fn validate_envelope(&self, doc: &Value) -> bool {
        let Some(map) = doc.as_object() else {
            return false;
        };
        if !map.get(VERSION_KEY).is_some_and(Value::is_string) {
            return false;
        }
        if !map.contains_key(CHARACTER_KEY) {
            return false;
        }
        for key in ARRAY_KEYS {
            if let Some(value) = map.get(key) {
                if !value.is_array() {
                    return false;
                }
            }
        }
        true
    }

    /// Decode an envelope back into a snapshot.
    ///
    /// Assumes [`validate_envelope`](Self::validate_envelope) already passed.
    /// Rejects envelopes from a different schema major version; absent
    /// optional sections decode to their defaults.
    pub fn decode(&self, doc: &Value) -> Result<GameSnapshot, CodecError> {
        let map = doc
            .as_object()
            .ok_or_else(|| CodecError::Structure("envelope is not a JSON object".to_string()))?;

        if let Some(found) = map.get(VERSION_KEY).and_then(Value::as_str) {
            if !same_major_version(found, SAVE_FORMAT_VERSION) {
                return Err(CodecError::UnsupportedVersion(found.to_string()));
            }
        }

        Ok(GameSnapshot {
            character: decode_section(map, CHARACTER_KEY)?,
            tasks: decode_optional_section(map, "tasks")?,
            notes: decode_optional_section(map, "notes")?,
            habits: decode_optional_section(map, "habits")?,
            town_state: decode_optional_section(map, "townState")?,
            gamification_state: decode_optional_section(map, "gamificationState")?,
        })
    }

    /// Read the `version` string out of an envelope.
    pub fn version(&self, doc: &Value) -> Option<String> {
        doc.get(VERSION_KEY)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Read the `savedAt` epoch-second stamp out of an envelope.
    pub fn saved_at(&self, doc: &Value) -> Option<i64> {
        doc.get(SAVED_AT_KEY).and_then(Value::as_i64)
    }
}

fn decode_section<T>(map: &Map<String, Value>, key: &'static str) -> Result<T, CodecError>
where
    T: serde::de::DeserializeOwned,
{
    let value = map
        .get(key)
        .ok_or_else(|| CodecError::Structure(format!("missing mandatory key `{key}`")))?;
    serde_json::from_value(value.clone()).map_err(|e| CodecError::Decode {
        section: key,
        message: e.to_string(),
    })
}

fn decode_optional_section<T>(map: &Map<String, Value>, key: &'static str) -> Result<T, CodecError>
where
    T: serde::de::DeserializeOwned + Default,
{
    match map.get(key) {
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| CodecError::Decode {
            section: key,
            message: e.to_string(),
        }),
        None => Ok(T::default()),
    }
}

fn same_major_version(found: &str, expected: &str) -> bool {
    found.split('.').next() == expected.split('.').next()
}
