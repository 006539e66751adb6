use bridgemap_core::{BridgeRecord, BridgeStore, QueryMode, QueryResult, TileBatchRequest};

/// Runs a tile query and prints the ranked bridges.
///
/// # Errors
///
/// Returns an error if the request is invalid or the store query fails.
pub(crate) async fn run_query<S>(
    store: &S,
    request: &TileBatchRequest,
    filter_key: &str,
    mode: QueryMode,
    limit: i64,
    json: bool,
) -> anyhow::Result<()>
where
    S: BridgeStore + Sync,
{
    tracing::debug!(
        mode = %mode,
        filter_key,
        zoom = request.zoom,
        tiles = request.tiles.len(),
        limit,
        "running tile query"
    );
    let result = bridgemap_core::run_query(store, request, filter_key, mode, limit).await?;
    tracing::info!(
        mode = %mode,
        tiles = request.tiles.len(),
        rows = result.len(),
        "tile query complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.is_empty() {
        println!("no bridges found in {} tile(s)", request.tiles.len());
        return Ok(());
    }

    println!(
        "{:<7}{:<18}{:>10}{:>8}{:>6}",
        "TILE", "STRUCTURE", "ADT", "RATING", "COND"
    );
    match &result {
        QueryResult::PerTile(rows) => {
            for row in rows {
                print_row(&row.tile.index.to_string(), &row.bridge);
            }
        }
        QueryResult::Union(rows) => {
            for bridge in rows {
                print_row("-", bridge);
            }
        }
    }

    Ok(())
}

fn print_row(tile: &str, bridge: &BridgeRecord) {
    println!(
        "{:<7}{:<18}{:>10}{:>8}{:>6}",
        tile,
        bridge.structure_number,
        fmt_opt(bridge.average_daily_traffic),
        fmt_opt(bridge.lowest_rating),
        bridge.bridge_condition.as_deref().unwrap_or("-"),
    );
}

fn fmt_opt(value: Option<i32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
