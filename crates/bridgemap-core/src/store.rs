//! The record store seam.
//!
//! The query engine issues exactly one store call per request. Stores own
//! their own timeouts, pooling and transaction discipline.

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::{BridgeRecord, OrderSpec, Region, TileBridge, TileEnvelope};

/// Any failure raised by a record store. Opaque to the caller and never
/// retried by the engine.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store query failed: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),

    #[error("record store query timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub fn backend(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Spatial and ranking primitives the query engine depends on.
pub trait BridgeStore {
    /// For each tile, the records intersecting its envelope ranked by `order`,
    /// at most `limit` per tile. Groups come back in tile-index order and a
    /// record appears once per tile it intersects.
    fn top_per_tile(
        &self,
        tiles: &[TileEnvelope],
        order: OrderSpec,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<TileBridge>, StoreError>> + Send;

    /// Records intersecting `region`, ranked by `order`, at most `limit`.
    /// Each record appears at most once.
    fn top_in_region(
        &self,
        region: &Region,
        order: OrderSpec,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<BridgeRecord>, StoreError>> + Send;
}
