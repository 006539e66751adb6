/// Parses a `x,y` tile argument.
pub(crate) fn parse_tile_pair(raw: &str) -> Result<(i64, i64), String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{raw}'"))?;
    let x = x
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid x in '{raw}': {e}"))?;
    let y = y
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid y in '{raw}': {e}"))?;
    Ok((x, y))
}

/// Prints the bounding box of one tile.
///
/// # Errors
///
/// Returns an error if the tile is outside the zoom level's grid.
pub(crate) fn run_bbox(zoom: i64, x: i64, y: i64) -> anyhow::Result<()> {
    let bbox = bridgemap_core::project(x, y, zoom)?;
    println!("tile      {zoom}/{x}/{y}");
    println!("lat_min   {:.10}", bbox.lat_min);
    println!("lat_max   {:.10}", bbox.lat_max);
    println!("lon_min   {:.10}", bbox.lon_min);
    println!("lon_max   {:.10}", bbox.lon_max);
    Ok(())
}
