//! PostGIS-backed [`BridgeStore`].

use std::future::Future;
use std::time::Duration;

use bridgemap_core::{
    BridgeRecord, BridgeStore, OrderSpec, Region, StoreError, TileBridge, TileEnvelope,
};
use sqlx::PgPool;

use crate::{bridges, DbError};

/// Runs ranking queries against `bridge_core`, bounding each call by
/// `timeout`.
#[derive(Debug, Clone)]
pub struct PgBridgeStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgBridgeStore {
    #[must_use]
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, DbError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(StoreError::backend),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

impl BridgeStore for PgBridgeStore {
    async fn top_per_tile(
        &self,
        tiles: &[TileEnvelope],
        order: OrderSpec,
        limit: i64,
    ) -> Result<Vec<TileBridge>, StoreError> {
        let rows = self
            .bounded(bridges::top_bridges_per_tile(&self.pool, tiles, order, limit))
            .await?;

        rows.into_iter()
            .map(|row| {
                let tile = usize::try_from(row.tile_index)
                    .ok()
                    .and_then(|index| tiles.get(index))
                    .ok_or(DbError::UnexpectedTileIndex(row.tile_index))
                    .map_err(StoreError::backend)?;
                Ok(TileBridge {
                    tile: tile.tile_ref(),
                    bridge: BridgeRecord::from(row.bridge),
                })
            })
            .collect()
    }

    async fn top_in_region(
        &self,
        region: &Region,
        order: OrderSpec,
        limit: i64,
    ) -> Result<Vec<BridgeRecord>, StoreError> {
        let rows = self
            .bounded(bridges::top_bridges_in_region(
                &self.pool, region, order, limit,
            ))
            .await?;

        Ok(rows.into_iter().map(BridgeRecord::from).collect())
    }
}
