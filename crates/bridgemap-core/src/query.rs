//! Tile query engine: per-tile top-K and union top-K.
//!
//! All validation (tiles, limit, filter key, zoom) happens in [`prepare`],
//! before the store is reached. Each mode then issues a single store call
//! no matter how many tiles the request names.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{
    envelope::tile_envelopes, ranking, BridgeRecord, BridgeStore, OrderSpec, QueryError, Region,
    TileBridge, TileEnvelope,
};

/// Limit applied when the client does not send one.
pub const DEFAULT_LIMIT: i64 = 100;

/// How results are ranked across the requested tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// Independent top-K within each tile.
    Single,
    /// One top-K over the union of all tiles.
    #[default]
    Batch,
}

impl QueryMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Batch => "batch",
        }
    }
}

impl FromStr for QueryMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "batch" => Ok(Self::Batch),
            other => Err(QueryError::InvalidRequest(format!(
                "invalid mode '{other}'; expected 'single' or 'batch'"
            ))),
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tiles requested at a single zoom level, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBatchRequest {
    pub zoom: i64,
    pub tiles: Vec<(i64, i64)>,
}

/// A fully validated query, ready to hand to a store.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub envelopes: Vec<TileEnvelope>,
    pub order: OrderSpec,
    pub limit: i64,
}

impl PreparedQuery {
    /// Union of every requested tile.
    ///
    /// # Errors
    ///
    /// Cannot fail for a query built by [`prepare`], which rejects empty
    /// tile lists.
    pub fn region(&self) -> Result<Region, QueryError> {
        Region::from_boxes(self.envelopes.iter().map(|e| e.bbox))
    }
}

/// Ranked bridges, shaped by the mode that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    PerTile(Vec<TileBridge>),
    Union(Vec<BridgeRecord>),
}

impl QueryResult {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::PerTile(rows) => rows.len(),
            Self::Union(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validates the request and resolves its ordering.
///
/// # Errors
///
/// - [`QueryError::InvalidRequest`] when `tiles` is empty or `limit <= 0`
/// - [`QueryError::InvalidFilterKey`] for an unknown `filter_key`
/// - [`QueryError::InvalidTile`] for any tile outside the zoom's grid
pub fn prepare(
    request: &TileBatchRequest,
    filter_key: &str,
    limit: i64,
) -> Result<PreparedQuery, QueryError> {
    if request.tiles.is_empty() {
        return Err(QueryError::InvalidRequest(
            "tiles list cannot be empty".to_string(),
        ));
    }
    if limit <= 0 {
        return Err(QueryError::InvalidRequest(
            "limit must be a positive integer".to_string(),
        ));
    }
    let order = ranking::resolve(filter_key)?;
    let envelopes = tile_envelopes(request.zoom, &request.tiles)?;

    Ok(PreparedQuery {
        envelopes,
        order,
        limit,
    })
}

/// Top `limit` bridges inside each requested tile.
///
/// The result holds at most `limit * tiles.len()` rows. A bridge inside two
/// requested tiles is returned once for each.
///
/// # Errors
///
/// Returns a validation error from [`prepare`], or [`QueryError::Store`].
pub async fn query_per_tile<S>(
    store: &S,
    request: &TileBatchRequest,
    filter_key: &str,
    limit: i64,
) -> Result<Vec<TileBridge>, QueryError>
where
    S: BridgeStore + Sync,
{
    let prepared = prepare(request, filter_key, limit)?;
    tracing::debug!(
        mode = "single",
        zoom = request.zoom,
        tiles = prepared.envelopes.len(),
        limit,
        filter_key,
        "querying bridges per tile"
    );

    let rows = store
        .top_per_tile(&prepared.envelopes, prepared.order, prepared.limit)
        .await?;

    tracing::debug!(rows = rows.len(), "per-tile query complete");
    Ok(rows)
}

/// Top `limit` bridges across the union of all requested tiles.
///
/// The result holds at most `limit` rows with no repeated structure number.
///
/// # Errors
///
/// Returns a validation error from [`prepare`], or [`QueryError::Store`].
pub async fn query_union<S>(
    store: &S,
    request: &TileBatchRequest,
    filter_key: &str,
    limit: i64,
) -> Result<Vec<BridgeRecord>, QueryError>
where
    S: BridgeStore + Sync,
{
    let prepared = prepare(request, filter_key, limit)?;
    let region = prepared.region()?;
    tracing::debug!(
        mode = "batch",
        zoom = request.zoom,
        tiles = prepared.envelopes.len(),
        limit,
        filter_key,
        "querying bridges over tile union"
    );

    let rows = store
        .top_in_region(&region, prepared.order, prepared.limit)
        .await?;

    tracing::debug!(rows = rows.len(), "union query complete");
    Ok(rows)
}

/// Dispatches to [`query_per_tile`] or [`query_union`].
///
/// # Errors
///
/// See the two mode functions.
pub async fn run_query<S>(
    store: &S,
    request: &TileBatchRequest,
    filter_key: &str,
    mode: QueryMode,
    limit: i64,
) -> Result<QueryResult, QueryError>
where
    S: BridgeStore + Sync,
{
    match mode {
        QueryMode::Single => query_per_tile(store, request, filter_key, limit)
            .await
            .map(QueryResult::PerTile),
        QueryMode::Batch => query_union(store, request, filter_key, limit)
            .await
            .map(QueryResult::Union),
    }
}
