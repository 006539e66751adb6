use std::str::FromStr;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use bridgemap_core::{
    run_query, BridgeRecord, QueryError, QueryMode, QueryResult, TileBatchRequest, TileBridge,
    TileRef, DEFAULT_LIMIT,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, map_query_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Summary record as sent to map clients. Field names follow the NBI
/// column names the frontend already consumes.
#[derive(Debug, Serialize)]
pub(super) struct BridgeItem {
    structure_number_008: String,
    state_code_001: Option<String>,
    lat_016: Option<f64>,
    long_017: Option<f64>,
    year_built_027: Option<i32>,
    adt_029: Option<i32>,
    deck_cond_058: Option<String>,
    superstructure_cond_059: Option<String>,
    substructure_cond_060: Option<String>,
    channel_cond_061: Option<String>,
    culvert_cond_062: Option<String>,
    year_reconstructed_106: Option<i32>,
    bridge_condition: Option<String>,
    lowest_rating: Option<i32>,
    deck_area: Option<f64>,
}

impl From<BridgeRecord> for BridgeItem {
    fn from(record: BridgeRecord) -> Self {
        Self {
            structure_number_008: record.structure_number,
            state_code_001: record.state_code,
            lat_016: record.latitude,
            long_017: record.longitude,
            year_built_027: record.year_built,
            adt_029: record.average_daily_traffic,
            deck_cond_058: record.deck_condition,
            superstructure_cond_059: record.superstructure_condition,
            substructure_cond_060: record.substructure_condition,
            channel_cond_061: record.channel_condition,
            culvert_cond_062: record.culvert_condition,
            year_reconstructed_106: record.year_reconstructed,
            bridge_condition: record.bridge_condition,
            lowest_rating: record.lowest_rating,
            deck_area: record.deck_area,
        }
    }
}

/// A per-tile result: the summary record plus the tile it was ranked in.
#[derive(Debug, Serialize)]
pub(super) struct TileBridgeItem {
    tile: TileRef,
    #[serde(flatten)]
    bridge: BridgeItem,
}

impl From<TileBridge> for TileBridgeItem {
    fn from(row: TileBridge) -> Self {
        Self {
            tile: row.tile,
            bridge: BridgeItem::from(row.bridge),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum BatchData {
    PerTile(Vec<TileBridgeItem>),
    Union(Vec<BridgeItem>),
}

impl From<QueryResult> for BatchData {
    fn from(result: QueryResult) -> Self {
        match result {
            QueryResult::PerTile(rows) => Self::PerTile(rows.into_iter().map(Into::into).collect()),
            QueryResult::Union(rows) => Self::Union(rows.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BatchQuery {
    pub limit: Option<i64>,
    #[serde(rename = "filterKey")]
    pub filter_key: Option<String>,
    pub mode: Option<String>,
}

/// Request body for the batch endpoint: `{"zoom": 10, "tiles": [[x, y], ...]}`.
#[derive(Debug, Deserialize)]
pub(super) struct TileBatchBody {
    pub zoom: i64,
    pub tiles: Vec<Vec<i64>>,
}

impl TileBatchBody {
    fn into_request(self) -> Result<TileBatchRequest, QueryError> {
        let tiles = self
            .tiles
            .into_iter()
            .enumerate()
            .map(|(i, pair)| match pair.as_slice() {
                [x, y] => Ok((*x, *y)),
                _ => Err(QueryError::InvalidRequest(format!(
                    "tile {i} must be an [x, y] pair, got {} values",
                    pair.len()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TileBatchRequest {
            zoom: self.zoom,
            tiles,
        })
    }
}

pub(super) async fn list_bridges(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<BridgeItem>>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if limit <= 0 {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "limit must be a positive integer",
        ));
    }

    let rows = bridgemap_db::list_bridges(&state.pool, limit)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| BridgeItem::from(BridgeRecord::from(row)))
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_bridge_detail(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(structure_number): Path<String>,
) -> Result<Json<ApiResponse<bridgemap_db::BridgeDetailRow>>, ApiError> {
    let detail = bridgemap_db::get_bridge_detail(&state.pool, &structure_number)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("bridge {structure_number} not found"),
            )
        })?;

    Ok(Json(ApiResponse {
        data: detail,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn batch_bridges(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<BatchQuery>, QueryRejection>,
    body: Result<Json<TileBatchBody>, JsonRejection>,
) -> Result<Json<ApiResponse<BatchData>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;
    let Json(body) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;

    let mode = match query.mode.as_deref() {
        Some(mode) => {
            QueryMode::from_str(mode).map_err(|e| map_query_error(req_id.0.clone(), &e))?
        }
        None => QueryMode::default(),
    };
    let request = body
        .into_request()
        .map_err(|e| map_query_error(req_id.0.clone(), &e))?;
    let filter_key = query.filter_key.as_deref().unwrap_or("default");
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let result = run_query(&state.store(), &request, filter_key, mode, limit)
        .await
        .map_err(|e| map_query_error(req_id.0.clone(), &e))?;

    tracing::info!(
        request_id = %req_id.0,
        mode = %mode,
        filter_key,
        tiles = request.tiles.len(),
        rows = result.len(),
        "bridge batch served"
    );

    Ok(Json(ApiResponse {
        data: BatchData::from(result),
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_with_pairs_converts_to_request() {
        let body = TileBatchBody {
            zoom: 10,
            tiles: vec![vec![512, 384], vec![513, 384]],
        };
        let request = body.into_request().expect("valid body");
        assert_eq!(request.zoom, 10);
        assert_eq!(request.tiles, vec![(512, 384), (513, 384)]);
    }

    #[test]
    fn body_with_wrong_arity_is_rejected() {
        for bad in [vec![], vec![1], vec![1, 2, 3]] {
            let body = TileBatchBody {
                zoom: 3,
                tiles: vec![vec![0, 0], bad],
            };
            let err = body.into_request().unwrap_err();
            assert!(matches!(err, QueryError::InvalidRequest(ref msg) if msg.contains("tile 1")));
        }
    }

    #[test]
    fn tile_bridge_item_flattens_record_next_to_tile() {
        let item = TileBridgeItem {
            tile: TileRef {
                index: 1,
                x: 513,
                y: 384,
                zoom: 10,
            },
            bridge: BridgeItem::from(BridgeRecord {
                structure_number: "000000000012345".to_string(),
                state_code: None,
                latitude: Some(40.8),
                longitude: Some(0.5),
                year_built: Some(1931),
                average_daily_traffic: Some(20_000),
                deck_condition: None,
                superstructure_condition: None,
                substructure_condition: None,
                channel_condition: None,
                culvert_condition: None,
                year_reconstructed: None,
                bridge_condition: Some("G".to_string()),
                lowest_rating: Some(7),
                deck_area: None,
            }),
        };

        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["structure_number_008"], "000000000012345");
        assert_eq!(json["adt_029"], 20_000);
        assert_eq!(json["tile"]["index"], 1);
        assert_eq!(json["tile"]["x"], 513);
        assert_eq!(json["tile"]["zoom"], 10);
        assert!(json["deck_cond_058"].is_null());
    }
}
