//! Shared in-memory `ConfigStore` for integration tests.
//!
//! Records every call it receives and can be told to fail specific
//! operations, so tests can assert both the write payloads and the
//! fetch counts of the session layer.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use bancnet_core::cascade::{DrawOverride, PoolOverride};
use bancnet_core::catalog::{ConfigField, FieldScope};
use bancnet_core::snapshot::SectionMap;
use bancnet_core::types::{DrawId, PoolId};
use bancnet_session::port::{ConfigStore, FieldWrite, StoreError};

pub const POOL_ID: PoolId = 7;

#[derive(Default)]
pub struct StoreState {
    pub pool_overrides: HashMap<PoolId, HashMap<String, f64>>,
    pub draw_overrides: HashMap<(PoolId, DrawId), HashMap<String, f64>>,
    pub basic_info: SectionMap,
    pub settings: SectionMap,
    pub schedules: SectionMap,
    pub draw_selection: SectionMap,
    /// Operation names, in call order.
    pub calls: Vec<String>,
    /// Payloads accepted by the pool-level override upsert.
    pub pool_writes: Vec<FieldWrite>,
    /// Payloads accepted by the draw-level override upsert.
    pub draw_writes: Vec<(DrawId, FieldWrite)>,
    /// Operations forced to fail with a backend error.
    pub fail_ops: HashSet<&'static str>,
    /// Draws whose override upsert is forced to fail.
    pub fail_draws: HashSet<DrawId>,
    /// Pools the write path should report as gone.
    pub missing_pools: HashSet<PoolId>,
}

pub struct MemoryStore {
    catalog: Vec<ConfigField>,
    pub state: Mutex<StoreState>,
}

fn field(code: &str, bet_type: &str, prize_type_id: i64, default_value: f64) -> ConfigField {
    ConfigField {
        field_code: code.to_string(),
        scope: FieldScope::BetType,
        bet_type_code: Some(bet_type.to_string()),
        prize_type_id,
        default_value,
    }
}

pub fn test_catalog() -> Vec<ConfigField> {
    vec![
        field("DIRECTO_PRIMER_PAGO", "DIRECTO", 1, 56.0),
        field("DIRECTO_SEGUNDO_PAGO", "DIRECTO", 2, 12.0),
        field("PALE_PRIMER_PAGO", "PALE", 3, 1000.0),
        ConfigField {
            field_code: "COMISION_GENERAL".to_string(),
            scope: FieldScope::General,
            bet_type_code: None,
            prize_type_id: 9,
            default_value: 10.0,
        },
    ]
}

fn obj(pairs: &[(&str, Value)]) -> SectionMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

impl MemoryStore {
    /// A store seeded with one pool, two selected draws (43 and 61), a
    /// pool-level override and one draw-level override.
    pub fn seeded() -> Self {
        let mut state = StoreState {
            basic_info: obj(&[
                ("pool_name", json!("Banca Central")),
                ("branch_code", json!("BC-007")),
                ("zone_id", json!(3)),
                ("is_active", json!(true)),
            ]),
            settings: obj(&[
                ("fall_type", json!("DIARIO")),
                ("daily_sale_limit", json!(50000)),
                ("footer_line1", json!("Buena suerte")),
            ]),
            schedules: obj(&[
                ("monday_open", json!("08:00 AM")),
                ("monday_close", json!("09:00 PM")),
            ]),
            draw_selection: obj(&[
                ("selected_draws", json!([43, 61])),
                ("anticipated_closing_minutes", json!(5)),
            ]),
            ..StoreState::default()
        };
        state
            .pool_overrides
            .entry(POOL_ID)
            .or_default()
            .insert("DIRECTO_PRIMER_PAGO".to_string(), 60.0);
        state
            .draw_overrides
            .entry((POOL_ID, 43))
            .or_default()
            .insert("DIRECTO_PRIMER_PAGO".to_string(), 65.0);

        Self {
            catalog: test_catalog(),
            state: Mutex::new(state),
        }
    }

    pub fn fail_op(&self, op: &'static str) {
        self.state.lock().unwrap().fail_ops.insert(op);
    }

    pub fn fail_draw(&self, draw_id: DrawId) {
        self.state.lock().unwrap().fail_draws.insert(draw_id);
    }

    pub fn mark_missing(&self, pool_id: PoolId) {
        self.state.lock().unwrap().missing_pools.insert(pool_id);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == op)
            .count()
    }

    fn enter(&self, op: &'static str) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op.to_string());
        if state.fail_ops.contains(op) {
            return Err(StoreError::Backend(format!("{op} rejected")));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn field_catalog(&self) -> Result<Vec<ConfigField>, StoreError> {
        self.enter("field_catalog")?;
        Ok(self.catalog.clone())
    }

    async fn pool_overrides(&self, pool_id: PoolId) -> Result<Vec<PoolOverride>, StoreError> {
        self.enter("pool_overrides")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .pool_overrides
            .get(&pool_id)
            .into_iter()
            .flatten()
            .map(|(field_code, value)| PoolOverride {
                pool_id,
                field_code: field_code.clone(),
                value: *value,
            })
            .collect())
    }

    async fn draw_overrides(
        &self,
        pool_id: PoolId,
        draw_id: DrawId,
    ) -> Result<Vec<DrawOverride>, StoreError> {
        self.enter("draw_overrides")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .draw_overrides
            .get(&(pool_id, draw_id))
            .into_iter()
            .flatten()
            .map(|(field_code, value)| DrawOverride {
                pool_id,
                draw_id,
                field_code: field_code.clone(),
                value: *value,
            })
            .collect())
    }

    async fn basic_info(&self, pool_id: PoolId) -> Result<SectionMap, StoreError> {
        self.enter("basic_info")?;
        let state = self.state.lock().unwrap();
        if state.missing_pools.contains(&pool_id) {
            return Err(StoreError::PoolNotFound { pool_id });
        }
        Ok(state.basic_info.clone())
    }

    async fn settings(&self, _pool_id: PoolId) -> Result<SectionMap, StoreError> {
        self.enter("settings")?;
        Ok(self.state.lock().unwrap().settings.clone())
    }

    async fn schedules(&self, _pool_id: PoolId) -> Result<SectionMap, StoreError> {
        self.enter("schedules")?;
        Ok(self.state.lock().unwrap().schedules.clone())
    }

    async fn draw_selection(&self, _pool_id: PoolId) -> Result<SectionMap, StoreError> {
        self.enter("draw_selection")?;
        Ok(self.state.lock().unwrap().draw_selection.clone())
    }

    async fn update_basic_info(
        &self,
        pool_id: PoolId,
        payload: &SectionMap,
    ) -> Result<(), StoreError> {
        self.enter("update_basic_info")?;
        let mut state = self.state.lock().unwrap();
        if state.missing_pools.contains(&pool_id) {
            return Err(StoreError::PoolNotFound { pool_id });
        }
        state.basic_info = payload.clone();
        Ok(())
    }

    async fn update_settings(
        &self,
        _pool_id: PoolId,
        payload: &SectionMap,
    ) -> Result<(), StoreError> {
        self.enter("update_settings")?;
        self.state.lock().unwrap().settings = payload.clone();
        Ok(())
    }

    async fn update_schedules(
        &self,
        _pool_id: PoolId,
        payload: &SectionMap,
    ) -> Result<(), StoreError> {
        self.enter("update_schedules")?;
        self.state.lock().unwrap().schedules = payload.clone();
        Ok(())
    }

    async fn update_draw_selection(
        &self,
        _pool_id: PoolId,
        payload: &SectionMap,
    ) -> Result<(), StoreError> {
        self.enter("update_draw_selection")?;
        self.state.lock().unwrap().draw_selection = payload.clone();
        Ok(())
    }

    async fn upsert_pool_overrides(
        &self,
        pool_id: PoolId,
        writes: &[FieldWrite],
    ) -> Result<(), StoreError> {
        self.enter("upsert_pool_overrides")?;
        let mut state = self.state.lock().unwrap();
        state.pool_writes.extend_from_slice(writes);
        let layer = state.pool_overrides.entry(pool_id).or_default();
        for write in writes {
            layer.insert(write.field_code.clone(), write.value);
        }
        Ok(())
    }

    async fn upsert_draw_overrides(
        &self,
        pool_id: PoolId,
        draw_id: DrawId,
        writes: &[FieldWrite],
    ) -> Result<(), StoreError> {
        self.enter("upsert_draw_overrides")?;
        let mut state = self.state.lock().unwrap();
        if state.fail_draws.contains(&draw_id) {
            return Err(StoreError::Backend(format!(
                "override upsert rejected for draw {draw_id}"
            )));
        }
        state
            .draw_writes
            .extend(writes.iter().map(|w| (draw_id, w.clone())));
        let layer = state.draw_overrides.entry((pool_id, draw_id)).or_default();
        for write in writes {
            layer.insert(write.field_code.clone(), write.value);
        }
        Ok(())
    }
}
