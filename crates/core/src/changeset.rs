//! Sectioned change sets: the diff output the save path consumes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::DrawId;

/// An independently-persisted grouping of fields.
///
/// The declaration order here is the fixed commit order: later
/// sections assume the pool identity from the first was valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionName {
    BasicInfo,
    Settings,
    GeneralPrizeFields,
    DrawPrizeFields(DrawId),
    Schedules,
    DrawSelection,
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BasicInfo => f.write_str("basicInfo"),
            Self::Settings => f.write_str("settings"),
            Self::GeneralPrizeFields => f.write_str("generalPrizeFields"),
            Self::DrawPrizeFields(draw_id) => write!(f, "drawPrizeFields({draw_id})"),
            Self::Schedules => f.write_str("schedules"),
            Self::DrawSelection => f.write_str("drawSelection"),
        }
    }
}

/// One changed field: canonical old and new values.
///
/// `key` is the namespaced key for cascade fields and the plain
/// section field name otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDelta {
    pub key: String,
    pub old: Value,
    pub new: Value,
}

/// Per-section diff outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionChanges {
    pub dirty: bool,
    pub changed: Vec<FieldDelta>,
}

impl SectionChanges {
    pub fn from_deltas(changed: Vec<FieldDelta>) -> Self {
        Self {
            dirty: !changed.is_empty(),
            changed,
        }
    }
}

/// The full diff between Baseline and WorkingState, sections in commit
/// order. Draw-scoped entries appear only for dirty draws, ordered by
/// draw id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeSet {
    sections: Vec<(SectionName, SectionChanges)>,
}

impl ChangeSet {
    pub(crate) fn push(&mut self, section: SectionName, changes: SectionChanges) {
        self.sections.push((section, changes));
    }

    /// All sections in commit order, clean ones included.
    pub fn sections(&self) -> &[(SectionName, SectionChanges)] {
        &self.sections
    }

    pub fn get(&self, section: SectionName) -> Option<&SectionChanges> {
        self.sections
            .iter()
            .find(|(name, _)| *name == section)
            .map(|(_, changes)| changes)
    }

    pub fn is_dirty(&self, section: SectionName) -> bool {
        self.get(section).is_some_and(|c| c.dirty)
    }

    /// True when no section has any change.
    pub fn is_clean(&self) -> bool {
        self.sections.iter().all(|(_, c)| !c.dirty)
    }

    pub fn dirty_sections(&self) -> impl Iterator<Item = SectionName> + '_ {
        self.sections
            .iter()
            .filter(|(_, c)| c.dirty)
            .map(|(name, _)| *name)
    }
}
