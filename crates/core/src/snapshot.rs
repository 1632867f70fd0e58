//! Edit snapshots: Baseline and WorkingState share one shape.
//!
//! A snapshot holds the cascade field map (keyed by [`FieldKey`]) plus
//! the four non-cascading sections, stored verbatim as the JSON maps
//! their read endpoints return. The field registries below name which
//! keys of each section participate in dirty-checking; one generic
//! diff replaces the per-section `has_x_changed` copies the original
//! screens accumulated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field_key::FieldKey;
use crate::types::DrawId;

/// Section payload shape: a flat JSON object from the read endpoint.
pub type SectionMap = serde_json::Map<String, Value>;

/// Dirty-checked fields of the basic-info section.
pub const BASIC_INFO_FIELDS: &[&str] = &[
    "pool_name",
    "branch_code",
    "username",
    "password",
    "location",
    "reference",
    "comment",
    "zone_id",
    "is_active",
];

/// Dirty-checked fields of the settings section: balance/sale limits,
/// cancellation rules, discount, print, and footer groups.
pub const SETTINGS_FIELDS: &[&str] = &[
    "fall_type",
    "deactivation_balance",
    "daily_sale_limit",
    "daily_balance_limit",
    "enable_temporary_balance",
    "temporary_additional_balance",
    "credit_limit",
    "control_winning_tickets",
    "allow_jackpot",
    "enable_recharges",
    "allow_password_change",
    "cancel_minutes",
    "daily_cancel_tickets",
    "max_cancel_amount",
    "max_ticket_amount",
    "max_daily_recharge",
    "discount_provider",
    "discount_mode",
    "print_mode",
    "print_enabled",
    "print_ticket_copy",
    "print_recharge_receipt",
    "sms_only",
    "auto_footer",
    "footer_line1",
    "footer_line2",
    "footer_line3",
    "footer_line4",
    "show_branch_info",
    "show_date_time",
];

/// Dirty-checked fields of the weekly sales-schedule section.
pub const SCHEDULE_FIELDS: &[&str] = &[
    "sunday_open",
    "sunday_close",
    "monday_open",
    "monday_close",
    "tuesday_open",
    "tuesday_close",
    "wednesday_open",
    "wednesday_close",
    "thursday_open",
    "thursday_close",
    "friday_open",
    "friday_close",
    "saturday_open",
    "saturday_close",
];

/// Dirty-checked fields of the draw-selection section. Draw id lists
/// compare as sets.
pub const DRAW_SELECTION_FIELDS: &[&str] = &[
    "selected_draws",
    "anticipated_closing_minutes",
    "anticipated_closing_draws",
];

/// One side of an edit session: the cascade fields plus the four
/// independently-persisted sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Effective cascade values keyed by namespaced field key.
    pub fields: BTreeMap<FieldKey, Value>,
    pub basic_info: SectionMap,
    pub settings: SectionMap,
    pub schedules: SectionMap,
    pub draw_selection: SectionMap,
}

impl PoolSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw ids currently selected for this pool, read from the
    /// draw-selection section.
    pub fn selected_draws(&self) -> Vec<DrawId> {
        self.draw_selection
            .get("selected_draws")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default()
    }
}
