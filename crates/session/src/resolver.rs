//! Effective-value resolution over the three-tier cascade.
//!
//! The resolver owns the load-once catalog cache and fetches each
//! override layer at most once per resolution pass -- never one call
//! per field.

use std::collections::HashMap;

use tokio::sync::OnceCell;

use bancnet_core::cascade::{resolve_field, ResolvedValue};
use bancnet_core::catalog::FieldCatalog;
use bancnet_core::error::CoreError;
use bancnet_core::types::{DrawId, PoolId};

use crate::error::SessionError;
use crate::port::ConfigStore;

/// Cascade resolver with a session-scoped catalog cache.
#[derive(Default)]
pub struct Resolver {
    catalog: OnceCell<FieldCatalog>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field catalog, loaded through the store on first use and
    /// cached for the rest of the session.
    pub async fn catalog(&self, store: &dyn ConfigStore) -> Result<&FieldCatalog, SessionError> {
        self.catalog
            .get_or_try_init(|| async {
                let fields = store.field_catalog().await?;
                FieldCatalog::from_fields(fields).map_err(SessionError::Core)
            })
            .await
    }

    /// Resolve the effective value of one field.
    ///
    /// A draw override only applies when `draw_id` names that exact
    /// draw; otherwise the pool layer (or the system default) wins.
    pub async fn resolve(
        &self,
        store: &dyn ConfigStore,
        pool_id: PoolId,
        field_code: &str,
        draw_id: Option<DrawId>,
    ) -> Result<ResolvedValue, SessionError> {
        let catalog = self.catalog(store).await?;
        if !catalog.contains(field_code) {
            return Err(CoreError::UnknownField(field_code.to_string()).into());
        }

        let pool_layer = fetch_pool_layer(store, pool_id).await?;
        let draw_layer = match draw_id {
            Some(draw_id) => fetch_draw_layer(store, pool_id, draw_id).await?,
            None => HashMap::new(),
        };

        Ok(resolve_field(
            field_code,
            catalog.default_of(field_code)?,
            pool_layer.get(field_code).copied(),
            draw_layer.get(field_code).copied(),
        ))
    }

    /// Resolve every catalog field in one pass, in catalog order.
    ///
    /// Issues at most one store fetch per override layer.
    pub async fn resolve_all(
        &self,
        store: &dyn ConfigStore,
        pool_id: PoolId,
        draw_id: Option<DrawId>,
    ) -> Result<Vec<ResolvedValue>, SessionError> {
        let catalog = self.catalog(store).await?;

        let pool_layer = fetch_pool_layer(store, pool_id).await?;
        let draw_layer = match draw_id {
            Some(draw_id) => fetch_draw_layer(store, pool_id, draw_id).await?,
            None => HashMap::new(),
        };

        Ok(resolve_layers(catalog, &pool_layer, &draw_layer))
    }

    /// Resolve the general scope and every listed draw in one pass,
    /// fetching the shared pool layer exactly once.
    pub async fn resolve_pool(
        &self,
        store: &dyn ConfigStore,
        pool_id: PoolId,
        draw_ids: &[DrawId],
    ) -> Result<PoolResolution, SessionError> {
        let catalog = self.catalog(store).await?;
        let pool_layer = fetch_pool_layer(store, pool_id).await?;

        let general = resolve_layers(catalog, &pool_layer, &HashMap::new());
        let mut draws = Vec::with_capacity(draw_ids.len());
        for &draw_id in draw_ids {
            let draw_layer = fetch_draw_layer(store, pool_id, draw_id).await?;
            draws.push((draw_id, resolve_layers(catalog, &pool_layer, &draw_layer)));
        }
        Ok(PoolResolution { general, draws })
    }
}

/// Resolved values for a whole pool: the general scope plus each
/// requested draw, all in catalog order.
pub struct PoolResolution {
    pub general: Vec<ResolvedValue>,
    pub draws: Vec<(DrawId, Vec<ResolvedValue>)>,
}

fn resolve_layers(
    catalog: &FieldCatalog,
    pool_layer: &HashMap<String, f64>,
    draw_layer: &HashMap<String, f64>,
) -> Vec<ResolvedValue> {
    catalog
        .fields()
        .iter()
        .map(|field| {
            resolve_field(
                &field.field_code,
                field.default_value,
                pool_layer.get(&field.field_code).copied(),
                draw_layer.get(&field.field_code).copied(),
            )
        })
        .collect()
}

async fn fetch_pool_layer(
    store: &dyn ConfigStore,
    pool_id: PoolId,
) -> Result<HashMap<String, f64>, SessionError> {
    let overrides = store.pool_overrides(pool_id).await?;
    Ok(overrides
        .into_iter()
        .map(|o| (o.field_code, o.value))
        .collect())
}

async fn fetch_draw_layer(
    store: &dyn ConfigStore,
    pool_id: PoolId,
    draw_id: DrawId,
) -> Result<HashMap<String, f64>, SessionError> {
    let overrides = store.draw_overrides(pool_id, draw_id).await?;
    Ok(overrides
        .into_iter()
        .map(|o| (o.field_code, o.value))
        .collect())
}
