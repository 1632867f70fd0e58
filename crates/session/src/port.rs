//! The persistence port: every backend interaction the engine needs.
//!
//! The surrounding application injects an implementation (HTTP client
//! in production, in-memory store in tests). Each `update_*`/
//! `upsert_*` call is all-or-nothing for its own section only; no
//! cross-section transaction is assumed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use bancnet_core::cascade::{DrawOverride, PoolOverride};
use bancnet_core::catalog::ConfigField;
use bancnet_core::snapshot::SectionMap;
use bancnet_core::types::{DrawId, PoolId};

/// Errors surfaced by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The pool identity itself is in question; fatal to a commit.
    #[error("Betting pool not found: {pool_id}")]
    PoolNotFound { pool_id: PoolId },

    /// Any other backend failure; isolated at the section boundary.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// One field write in the override upsert payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWrite {
    pub prize_type_id: i64,
    pub field_code: String,
    pub value: f64,
}

/// Abstract persistence operations for pool configuration.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    // -- reads --------------------------------------------------------------

    async fn field_catalog(&self) -> Result<Vec<ConfigField>, StoreError>;

    async fn pool_overrides(&self, pool_id: PoolId) -> Result<Vec<PoolOverride>, StoreError>;

    async fn draw_overrides(
        &self,
        pool_id: PoolId,
        draw_id: DrawId,
    ) -> Result<Vec<DrawOverride>, StoreError>;

    async fn basic_info(&self, pool_id: PoolId) -> Result<SectionMap, StoreError>;

    async fn settings(&self, pool_id: PoolId) -> Result<SectionMap, StoreError>;

    async fn schedules(&self, pool_id: PoolId) -> Result<SectionMap, StoreError>;

    async fn draw_selection(&self, pool_id: PoolId) -> Result<SectionMap, StoreError>;

    // -- writes -------------------------------------------------------------

    async fn update_basic_info(
        &self,
        pool_id: PoolId,
        payload: &SectionMap,
    ) -> Result<(), StoreError>;

    async fn update_settings(&self, pool_id: PoolId, payload: &SectionMap)
        -> Result<(), StoreError>;

    async fn update_schedules(
        &self,
        pool_id: PoolId,
        payload: &SectionMap,
    ) -> Result<(), StoreError>;

    async fn update_draw_selection(
        &self,
        pool_id: PoolId,
        payload: &SectionMap,
    ) -> Result<(), StoreError>;

    async fn upsert_pool_overrides(
        &self,
        pool_id: PoolId,
        writes: &[FieldWrite],
    ) -> Result<(), StoreError>;

    async fn upsert_draw_overrides(
        &self,
        pool_id: PoolId,
        draw_id: DrawId,
        writes: &[FieldWrite],
    ) -> Result<(), StoreError>;
}
