//! Configurable-field catalog: the universe of prize/commission fields
//! and their system defaults.
//!
//! Loaded once per session from the backend catalog and never mutated
//! client-side. Iteration order is the backend catalog order, which
//! drives deterministic change-set and commit ordering.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether a field applies pool-wide or belongs to a bet-type grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldScope {
    General,
    BetType,
}

/// An immutable catalog entry for one configurable numeric field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigField {
    /// Machine-readable field code (e.g. `DIRECTO_PRIMER_PAGO`).
    pub field_code: String,
    pub scope: FieldScope,
    /// Bet-type grouping for `BetType`-scoped fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet_type_code: Option<String>,
    /// Backend prize-type id, required by the override write payload.
    pub prize_type_id: i64,
    /// System-level default multiplier/limit.
    pub default_value: f64,
}

/// Lookup table over the full set of configurable fields.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    fields: Vec<ConfigField>,
    index: HashMap<String, usize>,
}

impl FieldCatalog {
    /// Build a catalog, rejecting duplicate field codes.
    pub fn from_fields(fields: Vec<ConfigField>) -> Result<Self, CoreError> {
        let mut index = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if index.insert(field.field_code.clone(), i).is_some() {
                return Err(CoreError::Validation(format!(
                    "Duplicate field code in catalog: '{}'",
                    field.field_code
                )));
            }
        }
        Ok(Self { fields, index })
    }

    /// Catalog entries in backend order.
    pub fn fields(&self) -> &[ConfigField] {
        &self.fields
    }

    pub fn get(&self, field_code: &str) -> Option<&ConfigField> {
        self.index.get(field_code).map(|&i| &self.fields[i])
    }

    pub fn contains(&self, field_code: &str) -> bool {
        self.index.contains_key(field_code)
    }

    /// System default for a field. Unknown codes are a hard error --
    /// callers must never silently substitute zero.
    pub fn default_of(&self, field_code: &str) -> Result<f64, CoreError> {
        self.get(field_code)
            .map(|f| f.default_value)
            .ok_or_else(|| CoreError::UnknownField(field_code.to_string()))
    }

    /// Backend prize-type id for a field, for the write payload.
    pub fn prize_type_id(&self, field_code: &str) -> Result<i64, CoreError> {
        self.get(field_code)
            .map(|f| f.prize_type_id)
            .ok_or_else(|| CoreError::UnknownField(field_code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
