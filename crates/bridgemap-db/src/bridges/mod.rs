//! Database operations for bridge inventory records.

mod read;
mod types;

pub use read::{get_bridge_detail, list_bridges, top_bridges_in_region, top_bridges_per_tile};
pub use types::{BridgeCoreRow, BridgeDetailRow, TileBridgeRow};
