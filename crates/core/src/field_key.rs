//! Namespaced field key codec.
//!
//! Configurable prize fields are addressed by a flat string key with a
//! fixed scope prefix:
//!
//! - `general_<fieldCode>` for banca-wide values
//! - `draw_<drawId>_<fieldCode>` for values scoped to one draw
//!
//! Field codes themselves embed underscores and bet-type codes
//! (e.g. `DIRECTO_PRIMER_PAGO`), so decoding never splits on segment
//! counts: it strips the fixed prefix and keeps the remainder verbatim.
//! `decode(encode(k)) == k` holds for every valid key.

use std::fmt;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::types::DrawId;

/// A decoded field key: the scope plus the verbatim field code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    /// Banca-wide value, applies to every draw unless shadowed.
    General { field_code: String },
    /// Value scoped to a single draw of the pool.
    Draw { draw_id: DrawId, field_code: String },
}

impl FieldKey {
    pub fn general(field_code: impl Into<String>) -> Self {
        Self::General {
            field_code: field_code.into(),
        }
    }

    pub fn draw(draw_id: DrawId, field_code: impl Into<String>) -> Self {
        Self::Draw {
            draw_id,
            field_code: field_code.into(),
        }
    }

    /// The verbatim field code, with any embedded underscores intact.
    pub fn field_code(&self) -> &str {
        match self {
            Self::General { field_code } | Self::Draw { field_code, .. } => field_code,
        }
    }

    /// The draw this key is scoped to, if any.
    pub fn draw_id(&self) -> Option<DrawId> {
        match self {
            Self::General { .. } => None,
            Self::Draw { draw_id, .. } => Some(*draw_id),
        }
    }

    /// Encode to the wire form (`general_X` / `draw_<id>_X`).
    pub fn encode(&self) -> String {
        match self {
            Self::General { field_code } => format!("general_{field_code}"),
            Self::Draw {
                draw_id,
                field_code,
            } => format!("draw_{draw_id}_{field_code}"),
        }
    }

    /// Decode a wire-form key.
    ///
    /// Strips only the fixed prefix (`general_` or `draw_<digits>_`);
    /// everything after it is the field code. A key whose prefix cannot
    /// be matched, or whose field code is empty, is `MalformedKey`.
    pub fn decode(key: &str) -> Result<Self, CoreError> {
        if let Some(rest) = key.strip_prefix("general_") {
            if rest.is_empty() {
                return Err(CoreError::MalformedKey(key.to_string()));
            }
            return Ok(Self::general(rest));
        }

        if let Some(rest) = key.strip_prefix("draw_") {
            let Some((id_part, field_code)) = rest.split_once('_') else {
                return Err(CoreError::MalformedKey(key.to_string()));
            };
            if field_code.is_empty()
                || id_part.is_empty()
                || !id_part.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(CoreError::MalformedKey(key.to_string()));
            }
            let draw_id: DrawId = id_part
                .parse()
                .map_err(|_| CoreError::MalformedKey(key.to_string()))?;
            return Ok(Self::draw(draw_id, field_code));
        }

        Err(CoreError::MalformedKey(key.to_string()))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

// Keys serialize as their encoded wire form, so change sets round-trip
// through JSON exactly as the UI layer sees them.
impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for FieldKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::decode(&raw).map_err(D::Error::custom)
    }
}
