use serde::{Deserialize, Serialize};

/// Summary attributes of one inventoried bridge.
///
/// Owned by the record store; the query engine only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRecord {
    /// Unique structure number (NBI item 8).
    pub structure_number: String,
    pub state_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub year_built: Option<i32>,
    pub average_daily_traffic: Option<i32>,
    pub deck_condition: Option<String>,
    pub superstructure_condition: Option<String>,
    pub substructure_condition: Option<String>,
    pub channel_condition: Option<String>,
    pub culvert_condition: Option<String>,
    pub year_reconstructed: Option<i32>,
    /// Overall condition class (`G`, `F` or `P`).
    pub bridge_condition: Option<String>,
    /// Lowest of the condition sub-ratings, 0-9.
    pub lowest_rating: Option<i32>,
    /// Deck area in square meters.
    pub deck_area: Option<f64>,
}

impl BridgeRecord {
    /// Returns `(latitude, longitude)` when both are present.
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Identifies the requested tile a per-tile result was ranked within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRef {
    /// Position of the tile in the request's tile list.
    pub index: usize,
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

/// A bridge ranked inside one tile's partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileBridge {
    pub tile: TileRef,
    pub bridge: BridgeRecord,
}
