//! Tile-to-geography projection and the dual-mode bridge query engine.

mod app_config;
mod bridge;
mod config;
pub mod envelope;
mod error;
pub mod memory;
pub mod query;
pub mod ranking;
pub mod store;
pub mod tile;

pub use app_config::{AppConfig, Environment};
pub use bridge::{BridgeRecord, TileBridge, TileRef};
pub use config::{load_app_config, load_app_config_from_env};
pub use envelope::{EnvelopeParams, Region, TileEnvelope};
pub use error::{ConfigError, QueryError};
pub use memory::MemoryBridgeStore;
pub use query::{
    query_per_tile, query_union, run_query, PreparedQuery, QueryMode, QueryResult,
    TileBatchRequest, DEFAULT_LIMIT,
};
pub use ranking::{resolve, Direction, NullsOrder, OrderSpec, RankingKey, SortAttribute};
pub use store::{BridgeStore, StoreError};
pub use tile::{project, GeoBoundingBox, TileCoordinate, MAX_ZOOM};
