//! One operator's edit session over a single pool.
//!
//! A session owns a Baseline (the last state known to match the
//! backend) and a WorkingState (the live edits). Mutations only ever
//! touch the WorkingState; the Baseline moves exclusively through the
//! save path, and only for sections that persisted.
//!
//! Known gap, carried over from the original system: nothing locks a
//! pool across sessions. Two operators editing the same pool can
//! silently clobber each other's override writes.

use serde_json::Value;

use bancnet_core::canonical::{canonicalize, Canonical};
use bancnet_core::catalog::FieldCatalog;
use bancnet_core::changeset::{ChangeSet, SectionChanges, SectionName};
use bancnet_core::diff;
use bancnet_core::error::CoreError;
use bancnet_core::field_key::FieldKey;
use bancnet_core::snapshot::{
    PoolSnapshot, BASIC_INFO_FIELDS, DRAW_SELECTION_FIELDS, SCHEDULE_FIELDS, SETTINGS_FIELDS,
};
use bancnet_core::types::PoolId;

use crate::error::SessionError;
use crate::port::ConfigStore;
use crate::resolver::Resolver;

#[derive(Debug)]
pub struct EditSession {
    pool_id: PoolId,
    catalog: FieldCatalog,
    baseline: PoolSnapshot,
    working: PoolSnapshot,
}

impl EditSession {
    /// Hydrate a session: section reads plus resolved cascade values
    /// for the general scope and every currently-selected draw.
    pub async fn open(pool_id: PoolId, store: &dyn ConfigStore) -> Result<Self, SessionError> {
        let resolver = Resolver::new();

        let mut baseline = PoolSnapshot::new();
        baseline.basic_info = store.basic_info(pool_id).await?;
        baseline.settings = store.settings(pool_id).await?;
        baseline.schedules = store.schedules(pool_id).await?;
        baseline.draw_selection = store.draw_selection(pool_id).await?;

        let selected = baseline.selected_draws();
        let resolution = resolver.resolve_pool(store, pool_id, &selected).await?;
        for resolved in resolution.general {
            baseline.fields.insert(
                FieldKey::general(resolved.field_code),
                Value::from(resolved.value),
            );
        }
        for (draw_id, values) in resolution.draws {
            for resolved in values {
                baseline.fields.insert(
                    FieldKey::draw(draw_id, resolved.field_code),
                    Value::from(resolved.value),
                );
            }
        }

        let catalog = resolver.catalog(store).await?.clone();

        tracing::info!(
            pool_id,
            fields = baseline.fields.len(),
            draws = selected.len(),
            "Edit session opened",
        );

        let working = baseline.clone();
        Ok(Self {
            pool_id,
            catalog,
            baseline,
            working,
        })
    }

    pub fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn baseline(&self) -> &PoolSnapshot {
        &self.baseline
    }

    pub fn working(&self) -> &PoolSnapshot {
        &self.working
    }

    /// A copy of the WorkingState, for UI rendering.
    pub fn snapshot(&self) -> PoolSnapshot {
        self.working.clone()
    }

    /// Mutate one cascade field by its wire-form key.
    ///
    /// Fails hard on malformed keys and unknown field codes; rejects
    /// non-numeric text (numeric fields only carry numbers or "unset").
    pub fn mutate(&mut self, key: &str, value: Value) -> Result<(), CoreError> {
        let field_key = FieldKey::decode(key)?;
        self.set_field(field_key, value)
    }

    /// Typed variant of [`Self::mutate`].
    pub fn set_field(&mut self, key: FieldKey, value: Value) -> Result<(), CoreError> {
        if !self.catalog.contains(key.field_code()) {
            return Err(CoreError::UnknownField(key.field_code().to_string()));
        }
        match canonicalize(Some(&value)) {
            Canonical::Number(_) | Canonical::Unset => {}
            _ => {
                return Err(CoreError::Validation(format!(
                    "Field '{key}' only accepts numeric values"
                )));
            }
        }
        self.working.fields.insert(key, value);
        Ok(())
    }

    /// Mutate one field of a non-cascading section.
    pub fn set_section_field(
        &mut self,
        section: SectionName,
        field: &str,
        value: Value,
    ) -> Result<(), CoreError> {
        let (registry, map) = match section {
            SectionName::BasicInfo => (BASIC_INFO_FIELDS, &mut self.working.basic_info),
            SectionName::Settings => (SETTINGS_FIELDS, &mut self.working.settings),
            SectionName::Schedules => (SCHEDULE_FIELDS, &mut self.working.schedules),
            SectionName::DrawSelection => {
                (DRAW_SELECTION_FIELDS, &mut self.working.draw_selection)
            }
            SectionName::GeneralPrizeFields | SectionName::DrawPrizeFields(_) => {
                return Err(CoreError::Validation(format!(
                    "Section '{section}' is cascade-scoped; use mutate with a field key"
                )));
            }
        };
        if !registry.contains(&field) {
            return Err(CoreError::Validation(format!(
                "Unknown field '{field}' for section '{section}'"
            )));
        }
        map.insert(field.to_string(), value);
        Ok(())
    }

    /// Diff the WorkingState against the Baseline.
    pub fn changes(&self) -> ChangeSet {
        diff::diff(&self.baseline, &self.working)
    }

    /// Advance the Baseline for one successfully persisted section.
    ///
    /// Cascade sections advance delta-by-delta; the non-cascading
    /// sections take the whole working payload, since the write sent
    /// the whole payload.
    pub(crate) fn advance_baseline(
        &mut self,
        section: SectionName,
        changes: &SectionChanges,
    ) -> Result<(), CoreError> {
        match section {
            SectionName::BasicInfo => self.baseline.basic_info = self.working.basic_info.clone(),
            SectionName::Settings => self.baseline.settings = self.working.settings.clone(),
            SectionName::Schedules => self.baseline.schedules = self.working.schedules.clone(),
            SectionName::DrawSelection => {
                self.baseline.draw_selection = self.working.draw_selection.clone();
            }
            SectionName::GeneralPrizeFields | SectionName::DrawPrizeFields(_) => {
                for delta in &changes.changed {
                    let key = FieldKey::decode(&delta.key)?;
                    if let Some(value) = self.working.fields.get(&key) {
                        self.baseline.fields.insert(key, value.clone());
                    }
                }
            }
        }
        Ok(())
    }
}
