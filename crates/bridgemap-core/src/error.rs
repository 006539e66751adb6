use thiserror::Error;

use crate::store::StoreError;

/// Errors raised while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors returned by the tile query engine.
///
/// Everything except [`QueryError::Store`] is detected before the record
/// store is touched, so a rejected request never issues a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Tile index outside `[0, 2^zoom)`, or a zoom outside `[0, MAX_ZOOM]`.
    #[error("invalid tile ({x}, {y}) at zoom {zoom}: {reason}")]
    InvalidTile {
        x: i64,
        y: i64,
        zoom: i64,
        reason: &'static str,
    },

    /// Empty tile list, non-positive limit, or an unknown query mode.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(
        "invalid filterKey '{0}'; expected one of: lowestRating, highestADT, worstBridgeCondition, default"
    )]
    InvalidFilterKey(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QueryError {
    /// Returns `true` when the caller supplied bad input, as opposed to the
    /// store failing on a valid request.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
