//! Web Mercator tile math.
//!
//! Converts slippy-map tile indices into the latitude/longitude envelope the
//! tile covers. Tile `y` grows southward, so larger `y` means lower latitude.

use std::f64::consts::PI;

use serde::Serialize;

use crate::QueryError;

/// Highest zoom level accepted. `2^30` tiles per axis still fits in `u32`.
pub const MAX_ZOOM: u8 = 30;

/// One cell of the slippy-map grid.
///
/// Only constructible through [`TileCoordinate::new`], which guarantees
/// `x, y < 2^zoom` and `zoom <= MAX_ZOOM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileCoordinate {
    x: u32,
    y: u32,
    zoom: u8,
}

/// An axis-aligned latitude/longitude rectangle, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoBoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl TileCoordinate {
    /// Validates raw tile indices.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidTile`] when `zoom` is negative or above
    /// [`MAX_ZOOM`], or when `x`/`y` fall outside `[0, 2^zoom)`.
    pub fn new(x: i64, y: i64, zoom: i64) -> Result<Self, QueryError> {
        let invalid = |reason| QueryError::InvalidTile { x, y, zoom, reason };

        let zoom_level = u8::try_from(zoom)
            .ok()
            .filter(|z| *z <= MAX_ZOOM)
            .ok_or_else(|| invalid("zoom must be between 0 and 30"))?;

        let tiles_per_axis = 1_i64 << zoom_level;
        if !(0..tiles_per_axis).contains(&x) {
            return Err(invalid("x is outside [0, 2^zoom)"));
        }
        if !(0..tiles_per_axis).contains(&y) {
            return Err(invalid("y is outside [0, 2^zoom)"));
        }

        Ok(Self {
            x: u32::try_from(x).map_err(|_| invalid("x is outside [0, 2^zoom)"))?,
            y: u32::try_from(y).map_err(|_| invalid("y is outside [0, 2^zoom)"))?,
            zoom: zoom_level,
        })
    }

    #[must_use]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Geographic envelope covered by this tile (inverse Web Mercator).
    #[must_use]
    pub fn bounding_box(&self) -> GeoBoundingBox {
        let n = 2.0_f64.powi(i32::from(self.zoom));
        let x = f64::from(self.x);
        let y = f64::from(self.y);

        let lon_min = x / n * 360.0 - 180.0;
        let lon_max = (x + 1.0) / n * 360.0 - 180.0;

        let lat_rad_max = PI * (1.0 - 2.0 * y / n);
        let lat_max = 180.0 / PI * (2.0 * lat_rad_max.exp().atan() - PI / 2.0);

        let lat_rad_min = PI * (1.0 - 2.0 * (y + 1.0) / n);
        let lat_min = 180.0 / PI * (2.0 * lat_rad_min.exp().atan() - PI / 2.0);

        GeoBoundingBox {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }
}

impl GeoBoundingBox {
    /// Whether the point lies inside the box. Edges count as inside, matching
    /// `ST_Intersects` against a point geometry.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&latitude)
            && (self.lon_min..=self.lon_max).contains(&longitude)
    }
}

/// Projects raw tile indices to their geographic envelope.
///
/// # Errors
///
/// Returns [`QueryError::InvalidTile`] for indices outside the zoom's grid.
pub fn project(x: i64, y: i64, zoom: i64) -> Result<GeoBoundingBox, QueryError> {
    Ok(TileCoordinate::new(x, y, zoom)?.bounding_box())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERCATOR_LIMIT: f64 = 85.051_128_779_806_6;

    #[test]
    fn zoom_zero_covers_the_whole_mercator_world() {
        let bbox = project(0, 0, 0).expect("valid tile");
        assert!((bbox.lat_max - MERCATOR_LIMIT).abs() < 1e-9);
        assert!((bbox.lat_min + MERCATOR_LIMIT).abs() < 1e-9);
        assert_eq!(bbox.lon_min, -180.0);
        assert_eq!(bbox.lon_max, 180.0);
    }

    #[test]
    fn horizontal_neighbours_share_a_longitude_edge() {
        for x in 0..15 {
            let left = project(x, 5, 4).expect("left tile");
            let right = project(x + 1, 5, 4).expect("right tile");
            assert_eq!(left.lon_max, right.lon_min, "edge mismatch at x={x}");
        }
    }

    #[test]
    fn vertical_neighbours_share_a_latitude_edge() {
        for y in 0..15 {
            let upper = project(3, y, 4).expect("upper tile");
            let lower = project(3, y + 1, 4).expect("lower tile");
            assert_eq!(upper.lat_min, lower.lat_max, "edge mismatch at y={y}");
        }
    }

    #[test]
    fn increasing_y_moves_south() {
        let mut previous = project(7, 0, 6).expect("tile");
        for y in 1..64 {
            let current = project(7, y, 6).expect("tile");
            assert!(current.lat_max < previous.lat_max);
            assert!(current.lat_min < previous.lat_min);
            previous = current;
        }
    }

    #[test]
    fn boxes_are_well_formed_across_the_grid() {
        for zoom in [1_i64, 3, 8] {
            let n = 1_i64 << zoom;
            for (x, y) in [(0, 0), (n - 1, n - 1), (n / 2, n / 3)] {
                let bbox = project(x, y, zoom).expect("tile");
                assert!(bbox.lat_min < bbox.lat_max);
                assert!(bbox.lon_min < bbox.lon_max);
                assert!(bbox.lon_min >= -180.0 && bbox.lon_max <= 180.0);
                assert!(bbox.lat_min > -90.0 && bbox.lat_max < 90.0);
            }
        }
    }

    #[test]
    fn zoom_ten_tile_at_prime_meridian() {
        let bbox = project(512, 384, 10).expect("tile");
        assert_eq!(bbox.lon_min, 0.0);
        assert_eq!(bbox.lon_max, 0.351_562_5);
        assert!((bbox.lat_max - 40.979_898_069_620_13).abs() < 1e-9);
        assert!((bbox.lat_min - 40.713_955_826_286_05).abs() < 1e-9);
    }

    #[test]
    fn x_past_the_grid_is_rejected() {
        let err = project(8, 0, 3).unwrap_err();
        assert!(matches!(err, QueryError::InvalidTile { x: 8, zoom: 3, .. }));
    }

    #[test]
    fn negative_indices_are_rejected() {
        assert!(matches!(
            project(-1, 0, 3),
            Err(QueryError::InvalidTile { .. })
        ));
        assert!(matches!(
            project(0, -1, 3),
            Err(QueryError::InvalidTile { .. })
        ));
    }

    #[test]
    fn zoom_outside_supported_range_is_rejected() {
        assert!(matches!(
            project(0, 0, -1),
            Err(QueryError::InvalidTile { zoom: -1, .. })
        ));
        assert!(matches!(
            project(0, 0, i64::from(MAX_ZOOM) + 1),
            Err(QueryError::InvalidTile { .. })
        ));
    }

    #[test]
    fn highest_index_at_max_zoom_is_accepted() {
        let last = (1_i64 << MAX_ZOOM) - 1;
        let tile = TileCoordinate::new(last, last, i64::from(MAX_ZOOM)).expect("tile");
        assert_eq!(i64::from(tile.x()), last);
        assert_eq!(tile.zoom(), MAX_ZOOM);
    }

    #[test]
    fn contains_includes_edges() {
        let bbox = project(0, 0, 1).expect("tile");
        assert!(bbox.contains(1.0, 0.0));
        assert!(bbox.contains(40.0, -100.0));
        assert!(!bbox.contains(40.0, 10.0));
        assert!(!bbox.contains(-1.0, -100.0));
    }
}
