//! Composition of tile boxes into spatial filter regions.
//!
//! A [`Region`] is pure data. Stores turn it into their own intersection
//! predicate; the PostGIS store binds [`EnvelopeParams`] as `float8[]`
//! parameters so bounds never become SQL text.

use serde::Serialize;

use crate::{GeoBoundingBox, QueryError, TileCoordinate, TileRef};

/// A validated request tile together with its envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileEnvelope {
    /// Position of the tile in the request's tile list.
    pub index: usize,
    pub tile: TileCoordinate,
    pub bbox: GeoBoundingBox,
}

impl TileEnvelope {
    #[must_use]
    pub fn tile_ref(&self) -> TileRef {
        TileRef {
            index: self.index,
            x: self.tile.x(),
            y: self.tile.y(),
            zoom: self.tile.zoom(),
        }
    }
}

/// Validates every `(x, y)` pair at `zoom` and projects it.
///
/// # Errors
///
/// Returns the first [`QueryError::InvalidTile`] encountered.
pub fn tile_envelopes(zoom: i64, tiles: &[(i64, i64)]) -> Result<Vec<TileEnvelope>, QueryError> {
    tiles
        .iter()
        .enumerate()
        .map(|(index, &(x, y))| {
            let tile = TileCoordinate::new(x, y, zoom)?;
            Ok(TileEnvelope {
                index,
                tile,
                bbox: tile.bounding_box(),
            })
        })
        .collect()
}

/// "Geometry intersects this area" filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Region {
    /// A single rectangle.
    Envelope(GeoBoundingBox),
    /// The geometric union of several rectangles. Overlapping members are
    /// absorbed by the union, so a point inside two of them still matches once.
    Union(Vec<GeoBoundingBox>),
}

impl Region {
    /// Builds the smallest region variant covering `boxes`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidRequest`] when `boxes` is empty.
    pub fn from_boxes(boxes: impl IntoIterator<Item = GeoBoundingBox>) -> Result<Self, QueryError> {
        let mut boxes: Vec<GeoBoundingBox> = boxes.into_iter().collect();
        match boxes.len() {
            0 => Err(QueryError::InvalidRequest(
                "a region needs at least one envelope".to_string(),
            )),
            1 => Ok(Self::Envelope(boxes.remove(0))),
            _ => Ok(Self::Union(boxes)),
        }
    }

    #[must_use]
    pub fn boxes(&self) -> &[GeoBoundingBox] {
        match self {
            Self::Envelope(bbox) => std::slice::from_ref(bbox),
            Self::Union(boxes) => boxes,
        }
    }

    #[must_use]
    pub fn intersects_point(&self, latitude: f64, longitude: f64) -> bool {
        self.boxes()
            .iter()
            .any(|bbox| bbox.contains(latitude, longitude))
    }

    #[must_use]
    pub fn params(&self) -> EnvelopeParams {
        EnvelopeParams::from_boxes(self.boxes())
    }
}

/// Column-oriented envelope bounds, ready to bind as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvelopeParams {
    pub lon_min: Vec<f64>,
    pub lat_min: Vec<f64>,
    pub lon_max: Vec<f64>,
    pub lat_max: Vec<f64>,
}

impl EnvelopeParams {
    #[must_use]
    pub fn from_boxes<'a>(boxes: impl IntoIterator<Item = &'a GeoBoundingBox>) -> Self {
        let mut params = Self::default();
        for bbox in boxes {
            params.lon_min.push(bbox.lon_min);
            params.lat_min.push(bbox.lat_min);
            params.lon_max.push(bbox.lon_max);
            params.lat_max.push(bbox.lat_max);
        }
        params
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lon_min.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lon_min.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project;

    #[test]
    fn tile_envelopes_keep_request_order() {
        let envelopes = tile_envelopes(4, &[(3, 2), (0, 0), (3, 2)]).unwrap();
        let indices: Vec<_> = envelopes.iter().map(|e| e.index).collect();
        assert_eq!(indices, [0, 1, 2]);
        assert_eq!(envelopes[0].bbox, project(3, 2, 4).unwrap());
        assert_eq!(envelopes[0].tile_ref().x, 3);
        assert_eq!(envelopes[0].tile_ref().y, 2);
        assert_eq!(envelopes[0].tile_ref().zoom, 4);
    }

    #[test]
    fn tile_envelopes_fail_on_any_invalid_tile() {
        let err = tile_envelopes(3, &[(1, 1), (8, 0)]).unwrap_err();
        assert!(matches!(err, QueryError::InvalidTile { x: 8, .. }));
    }

    #[test]
    fn single_box_becomes_an_envelope() {
        let bbox = project(1, 1, 2).unwrap();
        assert_eq!(Region::from_boxes([bbox]).unwrap(), Region::Envelope(bbox));
    }

    #[test]
    fn several_boxes_become_a_union() {
        let a = project(0, 0, 1).unwrap();
        let b = project(1, 1, 1).unwrap();
        let region = Region::from_boxes([a, b]).unwrap();
        assert_eq!(region.boxes(), &[a, b]);
        assert!(region.intersects_point(45.0, -90.0));
        assert!(region.intersects_point(-45.0, 90.0));
        assert!(!region.intersects_point(45.0, 90.0));
    }

    #[test]
    fn empty_region_is_rejected() {
        assert!(matches!(
            Region::from_boxes(Vec::new()),
            Err(QueryError::InvalidRequest(_))
        ));
    }

    #[test]
    fn params_are_column_oriented() {
        let a = project(0, 0, 1).unwrap();
        let b = project(1, 0, 1).unwrap();
        let params = Region::from_boxes([a, b]).unwrap().params();
        assert_eq!(params.len(), 2);
        assert_eq!(params.lon_min, vec![-180.0, 0.0]);
        assert_eq!(params.lon_max, vec![0.0, 180.0]);
        assert_eq!(params.lat_max, vec![a.lat_max, b.lat_max]);
        assert_eq!(params.lat_min, vec![a.lat_min, b.lat_min]);
    }
}
