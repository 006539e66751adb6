//! Read operations for the `bridge_core` and `bridge_details` tables.
//!
//! Envelope bounds are always bound as `float8[]` parameters and expanded
//! with `UNNEST`; only the `ORDER BY` body, which comes from the closed
//! [`OrderSpec`] enums, is formatted into the SQL text.

use bridgemap_core::{EnvelopeParams, OrderSpec, Region, TileEnvelope};
use sqlx::PgPool;

use super::types::{BridgeCoreRow, BridgeDetailRow, TileBridgeRow};
use crate::DbError;

const BRIDGE_CORE_COLUMNS: &str = "structure_number_008, state_code_001, lat_016, long_017, \
     year_built_027, adt_029, deck_cond_058, superstructure_cond_059, substructure_cond_060, \
     channel_cond_061, culvert_cond_062, year_reconstructed_106, bridge_condition, \
     lowest_rating, deck_area";

/// Returns up to `limit` bridges ordered by structure number.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_bridges(pool: &PgPool, limit: i64) -> Result<Vec<BridgeCoreRow>, DbError> {
    let sql = format!(
        "SELECT {BRIDGE_CORE_COLUMNS} \
         FROM bridge_core \
         ORDER BY structure_number_008 ASC \
         LIMIT $1"
    );
    let rows = sqlx::query_as::<_, BridgeCoreRow>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Returns the full detail row for a structure number, or `None` if absent.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_bridge_detail(
    pool: &PgPool,
    structure_number: &str,
) -> Result<Option<BridgeDetailRow>, DbError> {
    // Every column of bridge_details maps onto a BridgeDetailRow field.
    let row = sqlx::query_as::<_, BridgeDetailRow>(
        "SELECT * FROM bridge_details WHERE structure_number_008 = $1",
    )
    .bind(structure_number)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Ranks bridges independently inside each tile envelope.
///
/// A bridge joins every tile it intersects, so it can appear once per tile.
/// Rows come back grouped by `tile_index` (the position in `tiles`) and in
/// rank order inside each group, at most `limit` per tile.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn top_bridges_per_tile(
    pool: &PgPool,
    tiles: &[TileEnvelope],
    order: OrderSpec,
    limit: i64,
) -> Result<Vec<TileBridgeRow>, DbError> {
    let bounds = EnvelopeParams::from_boxes(tiles.iter().map(|t| &t.bbox));
    let sql = format!(
        "WITH tiles AS ( \
             SELECT t.ordinal - 1 AS tile_index, \
                    ST_MakeEnvelope(t.lon_min, t.lat_min, t.lon_max, t.lat_max, 4326) AS envelope \
             FROM UNNEST($1::float8[], $2::float8[], $3::float8[], $4::float8[]) \
                  WITH ORDINALITY AS t(lon_min, lat_min, lon_max, lat_max, ordinal) \
         ), \
         ranked AS ( \
             SELECT tiles.tile_index, {BRIDGE_CORE_COLUMNS}, \
                    ROW_NUMBER() OVER ( \
                        PARTITION BY tiles.tile_index \
                        ORDER BY {order_by} \
                    ) AS rn \
             FROM bridge_core \
             JOIN tiles ON ST_Intersects(bridge_core.geom, tiles.envelope) \
         ) \
         SELECT tile_index, {BRIDGE_CORE_COLUMNS} \
         FROM ranked \
         WHERE rn <= $5 \
         ORDER BY tile_index ASC, rn ASC",
        order_by = order.order_by_clause(),
    );

    let rows = sqlx::query_as::<_, TileBridgeRow>(&sql)
        .bind(&bounds.lon_min)
        .bind(&bounds.lat_min)
        .bind(&bounds.lon_max)
        .bind(&bounds.lat_max)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Ranks bridges once across `region`.
///
/// A single envelope is matched directly; several are merged with
/// `ST_Union` so a bridge inside overlapping tiles is returned once.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn top_bridges_in_region(
    pool: &PgPool,
    region: &Region,
    order: OrderSpec,
    limit: i64,
) -> Result<Vec<BridgeCoreRow>, DbError> {
    let order_by = order.order_by_clause();

    let rows = match region {
        Region::Envelope(bbox) => {
            let sql = format!(
                "SELECT {BRIDGE_CORE_COLUMNS} \
                 FROM bridge_core \
                 WHERE ST_Intersects(geom, ST_MakeEnvelope($1, $2, $3, $4, 4326)) \
                 ORDER BY {order_by} \
                 LIMIT $5"
            );
            sqlx::query_as::<_, BridgeCoreRow>(&sql)
                .bind(bbox.lon_min)
                .bind(bbox.lat_min)
                .bind(bbox.lon_max)
                .bind(bbox.lat_max)
                .bind(limit)
                .fetch_all(pool)
                .await?
        }
        Region::Union(_) => {
            let bounds = region.params();
            let sql = format!(
                "WITH region AS ( \
                     SELECT ST_Union( \
                                ST_MakeEnvelope(t.lon_min, t.lat_min, t.lon_max, t.lat_max, 4326) \
                            ) AS area \
                     FROM UNNEST($1::float8[], $2::float8[], $3::float8[], $4::float8[]) \
                          AS t(lon_min, lat_min, lon_max, lat_max) \
                 ) \
                 SELECT {BRIDGE_CORE_COLUMNS} \
                 FROM bridge_core, region \
                 WHERE ST_Intersects(bridge_core.geom, region.area) \
                 ORDER BY {order_by} \
                 LIMIT $5"
            );
            sqlx::query_as::<_, BridgeCoreRow>(&sql)
                .bind(&bounds.lon_min)
                .bind(&bounds.lat_min)
                .bind(&bounds.lon_max)
                .bind(&bounds.lat_max)
                .bind(limit)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(rows)
}
