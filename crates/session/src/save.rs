//! Sectioned, failure-isolated persistence of a session's changes.
//!
//! Sections commit sequentially in a fixed order: basicInfo, settings,
//! generalPrizeFields, drawPrizeFields per draw, schedules,
//! drawSelection. A failing section is recorded and the walk
//! continues; the one hard stop is a missing pool surfacing on the
//! basicInfo write, which makes every later write pointless. The
//! Baseline advances only for sections that persisted, so a re-commit
//! retries exactly the failed ones.

use bancnet_core::canonical::{canonicalize, Canonical};
use bancnet_core::changeset::{SectionChanges, SectionName};
use bancnet_core::error::CoreError;
use bancnet_core::field_key::FieldKey;
use bancnet_core::types::DrawId;

use crate::error::SessionError;
use crate::port::{ConfigStore, FieldWrite, StoreError};
use crate::session::EditSession;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Terminal state of one dirty section within a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    /// The write succeeded and the Baseline advanced.
    Persisted,
    /// The write failed; the section stays dirty for the next commit.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionResult {
    pub section: SectionName,
    pub outcome: SectionOutcome,
}

/// What happened to each dirty section. Clean sections never appear.
#[derive(Debug, Clone, Default)]
pub struct SaveReport {
    pub sections: Vec<SectionResult>,
}

impl SaveReport {
    pub fn all_ok(&self) -> bool {
        self.sections
            .iter()
            .all(|r| r.outcome == SectionOutcome::Persisted)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// True when some sections persisted and some failed.
    pub fn partial(&self) -> bool {
        !self.is_empty() && !self.all_ok() && self.failed().count() < self.sections.len()
    }

    pub fn failed(&self) -> impl Iterator<Item = &SectionResult> {
        self.sections
            .iter()
            .filter(|r| matches!(r.outcome, SectionOutcome::Failed(_)))
    }

    fn record_ok(&mut self, section: SectionName) {
        tracing::info!(section = %section, "Section persisted");
        self.sections.push(SectionResult {
            section,
            outcome: SectionOutcome::Persisted,
        });
    }

    fn record_failure(&mut self, section: SectionName, error: StoreError) {
        tracing::warn!(section = %section, error = %error, "Section write failed");
        self.sections.push(SectionResult {
            section,
            outcome: SectionOutcome::Failed(error.to_string()),
        });
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Persist every dirty section of `session` through `store`.
///
/// Returns `Err` only when the pool itself is gone (surfaced by the
/// basicInfo write) or on an internal invariant breach; per-section
/// backend failures land in the report instead.
pub async fn commit(
    session: &mut EditSession,
    store: &dyn ConfigStore,
) -> Result<SaveReport, SessionError> {
    let changes = session.changes();
    let mut report = SaveReport::default();

    if changes.is_clean() {
        tracing::debug!(pool_id = session.pool_id(), "Nothing to save");
        return Ok(report);
    }

    let pool_id = session.pool_id();
    tracing::info!(
        pool_id,
        dirty = changes.dirty_sections().count(),
        "Committing pool changes",
    );

    for (section, section_changes) in changes.sections() {
        if !section_changes.dirty {
            continue;
        }
        let result = match *section {
            SectionName::BasicInfo => {
                match store
                    .update_basic_info(pool_id, &session.working().basic_info)
                    .await
                {
                    Err(StoreError::PoolNotFound { pool_id }) => {
                        tracing::error!(pool_id, "Pool vanished; aborting commit");
                        return Err(StoreError::PoolNotFound { pool_id }.into());
                    }
                    other => other,
                }
            }
            SectionName::Settings => {
                store
                    .update_settings(pool_id, &session.working().settings)
                    .await
            }
            SectionName::Schedules => {
                store
                    .update_schedules(pool_id, &session.working().schedules)
                    .await
            }
            SectionName::DrawSelection => {
                store
                    .update_draw_selection(pool_id, &session.working().draw_selection)
                    .await
            }
            SectionName::GeneralPrizeFields => {
                write_overrides(session, store, section_changes, None).await?
            }
            SectionName::DrawPrizeFields(draw_id) => {
                write_overrides(session, store, section_changes, Some(draw_id)).await?
            }
        };

        match result {
            Ok(()) => {
                session.advance_baseline(*section, section_changes)?;
                report.record_ok(*section);
            }
            Err(error) => report.record_failure(*section, error),
        }
    }

    tracing::info!(
        pool_id,
        persisted = report.sections.len() - report.failed().count(),
        failed = report.failed().count(),
        "Commit finished",
    );
    Ok(report)
}

/// Turn a cascade section's deltas into override upserts.
///
/// At the pool level, a delta is suppressed when the new value equals
/// the system default AND the field already resolves to that default:
/// the cascade yields the value without a row, so the write would be
/// redundant. When a pool row holds a different value the write must
/// go through, or the backend would keep resolving the old row.
/// Draw-level deltas are never suppressed, since the layer below them
/// is the pool override, not the default. A fully suppressed section
/// still counts as persisted without touching the store.
async fn write_overrides(
    session: &EditSession,
    store: &dyn ConfigStore,
    changes: &SectionChanges,
    draw_id: Option<DrawId>,
) -> Result<Result<(), StoreError>, SessionError> {
    let catalog = session.catalog();
    let mut writes = Vec::with_capacity(changes.changed.len());

    for delta in &changes.changed {
        let key = FieldKey::decode(&delta.key)?;
        let field_code = key.field_code();
        let value = match canonicalize(Some(&delta.new)) {
            Canonical::Number(n) => n,
            other => {
                return Err(CoreError::Validation(format!(
                    "Override '{}' carries a non-numeric value ({other:?})",
                    delta.key
                ))
                .into());
            }
        };
        let default_value = catalog.default_of(field_code)?;
        if draw_id.is_none() && value == default_value {
            let current = canonicalize(session.baseline().fields.get(&key));
            if !current.is_set() || current == Canonical::Number(default_value) {
                tracing::debug!(field_code, value, "Override equals system default; skipped");
                continue;
            }
        }
        writes.push(FieldWrite {
            prize_type_id: catalog.prize_type_id(field_code)?,
            field_code: field_code.to_string(),
            value,
        });
    }

    if writes.is_empty() {
        return Ok(Ok(()));
    }

    let result = match draw_id {
        None => store.upsert_pool_overrides(session.pool_id(), &writes).await,
        Some(draw_id) => {
            store
                .upsert_draw_overrides(session.pool_id(), draw_id, &writes)
                .await
        }
    };
    Ok(result)
}
