//! In-process [`BridgeStore`] over a fixed set of records.
//!
//! Applies the same intersection, ranking and limit rules as the PostGIS
//! store. Used for tests and offline fixtures.

use crate::{BridgeRecord, BridgeStore, OrderSpec, Region, StoreError, TileBridge, TileEnvelope};

#[derive(Debug, Clone, Default)]
pub struct MemoryBridgeStore {
    records: Vec<BridgeRecord>,
}

impl MemoryBridgeStore {
    #[must_use]
    pub fn new(records: Vec<BridgeRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[BridgeRecord] {
        &self.records
    }

    fn ranked<'a>(
        &'a self,
        order: OrderSpec,
        limit: i64,
        matches: impl Fn(f64, f64) -> bool,
    ) -> Vec<&'a BridgeRecord> {
        let mut hits: Vec<&BridgeRecord> = self
            .records
            .iter()
            .filter(|record| {
                record
                    .position()
                    .is_some_and(|(lat, lon)| matches(lat, lon))
            })
            .collect();
        hits.sort_by(|a, b| order.compare(a, b));
        hits.truncate(usize::try_from(limit).unwrap_or(0));
        hits
    }
}

impl BridgeStore for MemoryBridgeStore {
    async fn top_per_tile(
        &self,
        tiles: &[TileEnvelope],
        order: OrderSpec,
        limit: i64,
    ) -> Result<Vec<TileBridge>, StoreError> {
        let mut results = Vec::new();
        for envelope in tiles {
            let tile = envelope.tile_ref();
            results.extend(
                self.ranked(order, limit, |lat, lon| envelope.bbox.contains(lat, lon))
                    .into_iter()
                    .map(|bridge| TileBridge {
                        tile,
                        bridge: bridge.clone(),
                    }),
            );
        }
        Ok(results)
    }

    async fn top_in_region(
        &self,
        region: &Region,
        order: OrderSpec,
        limit: i64,
    ) -> Result<Vec<BridgeRecord>, StoreError> {
        Ok(self
            .ranked(order, limit, |lat, lon| region.intersects_point(lat, lon))
            .into_iter()
            .cloned()
            .collect())
    }
}
