//! Generic Baseline-vs-WorkingState diff.
//!
//! Pure and deterministic: no I/O, no clock, same inputs always yield
//! the same [`ChangeSet`]. One parametrized comparison replaces the
//! per-section change detectors of the original edit screens.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::canonical::canonicalize;
use crate::changeset::{ChangeSet, FieldDelta, SectionChanges, SectionName};
use crate::field_key::FieldKey;
use crate::snapshot::{
    PoolSnapshot, SectionMap, BASIC_INFO_FIELDS, DRAW_SELECTION_FIELDS, SCHEDULE_FIELDS,
    SETTINGS_FIELDS,
};
use crate::types::DrawId;

/// Compute the sectioned change set between two snapshots.
///
/// Cascade fields count as changed only when the canonical values
/// differ AND the working value is set: an operator clearing a field
/// back to "use default" is an explicit no-op, not a delete.
pub fn diff(baseline: &PoolSnapshot, working: &PoolSnapshot) -> ChangeSet {
    let mut general = Vec::new();
    let mut by_draw: BTreeMap<DrawId, Vec<FieldDelta>> = BTreeMap::new();

    // Union of keys; BTreeMap order keeps the output stable.
    let keys: BTreeSet<&FieldKey> = baseline
        .fields
        .keys()
        .chain(working.fields.keys())
        .collect();

    for key in keys {
        let old = canonicalize(baseline.fields.get(key));
        let new = canonicalize(working.fields.get(key));
        if !new.is_set() || old == new {
            continue;
        }
        let delta = FieldDelta {
            key: key.encode(),
            old: old.to_value(),
            new: new.to_value(),
        };
        match key.draw_id() {
            None => general.push(delta),
            Some(draw_id) => by_draw.entry(draw_id).or_default().push(delta),
        }
    }

    let mut change_set = ChangeSet::default();
    change_set.push(
        SectionName::BasicInfo,
        diff_section(BASIC_INFO_FIELDS, &baseline.basic_info, &working.basic_info),
    );
    change_set.push(
        SectionName::Settings,
        diff_section(SETTINGS_FIELDS, &baseline.settings, &working.settings),
    );
    change_set.push(
        SectionName::GeneralPrizeFields,
        SectionChanges::from_deltas(general),
    );
    for (draw_id, deltas) in by_draw {
        change_set.push(
            SectionName::DrawPrizeFields(draw_id),
            SectionChanges::from_deltas(deltas),
        );
    }
    change_set.push(
        SectionName::Schedules,
        diff_section(SCHEDULE_FIELDS, &baseline.schedules, &working.schedules),
    );
    change_set.push(
        SectionName::DrawSelection,
        diff_section(
            DRAW_SELECTION_FIELDS,
            &baseline.draw_selection,
            &working.draw_selection,
        ),
    );
    change_set
}

/// Element-wise comparison over one section's field registry.
fn diff_section(registry: &[&str], baseline: &SectionMap, working: &SectionMap) -> SectionChanges {
    let mut changed = Vec::new();
    for field in registry {
        let old = baseline.get(*field);
        let new = working.get(*field);
        if !section_values_equal(old, new) {
            changed.push(FieldDelta {
                key: (*field).to_string(),
                old: canonicalize(old).to_value(),
                new: canonicalize(new).to_value(),
            });
        }
    }
    SectionChanges::from_deltas(changed)
}

/// Section value equality: id arrays compare as sets, everything else
/// through canonicalization.
fn section_values_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    if let (Some(Value::Array(xs)), Some(Value::Array(ys))) = (a, b) {
        return arrays_equal_unordered(xs, ys);
    }
    canonicalize(a) == canonicalize(b)
}

fn arrays_equal_unordered(xs: &[Value], ys: &[Value]) -> bool {
    if xs.len() != ys.len() {
        return false;
    }
    let mut left: Vec<String> = xs.iter().map(|v| v.to_string()).collect();
    let mut right: Vec<String> = ys.iter().map(|v| v.to_string()).collect();
    left.sort();
    right.sort();
    left == right
}
