//! Three-tier override cascade for configurable fields.
//!
//! Effective values resolve through the chain
//! system default -> pool override -> draw override, highest present
//! layer winning. A draw override shadows the pool layer for that
//! exact draw only; other draws of the same pool stay at the pool (or
//! system) level.

use serde::{Deserialize, Serialize};

use crate::types::{DrawId, PoolId};

/// Origin layer of a resolved value, in increasing precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideLayer {
    System,
    Pool,
    Draw,
}

impl OverrideLayer {
    /// String representation for display and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Pool => "pool",
            Self::Draw => "draw",
        }
    }
}

impl std::fmt::Display for OverrideLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A banca-wide customization of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolOverride {
    pub pool_id: PoolId,
    pub field_code: String,
    pub value: f64,
}

/// A per-draw customization, shadowing the pool layer for that draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOverride {
    pub pool_id: PoolId,
    pub draw_id: DrawId,
    pub field_code: String,
    pub value: f64,
}

/// The effective value of one field after walking the cascade.
///
/// Never persisted; always recomputed from the layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedValue {
    pub field_code: String,
    pub value: f64,
    pub source: OverrideLayer,
}

/// Walk the cascade for a single field given the already-fetched layer
/// values. Pure; the session layer is responsible for fetching each
/// layer at most once.
pub fn resolve_field(
    field_code: &str,
    default_value: f64,
    pool_value: Option<f64>,
    draw_value: Option<f64>,
) -> ResolvedValue {
    let mut resolved = ResolvedValue {
        field_code: field_code.to_string(),
        value: default_value,
        source: OverrideLayer::System,
    };
    if let Some(value) = pool_value {
        resolved.value = value;
        resolved.source = OverrideLayer::Pool;
    }
    if let Some(value) = draw_value {
        resolved.value = value;
        resolved.source = OverrideLayer::Draw;
    }
    resolved
}
