use crate::math::{Point, Vector2};
use crate::transform::{Projection, TransformEngine};

/// Inclusive tile-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub min: Point,
    pub max: Point,
}

impl TileRect {
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }
}

/// Tiles touched by a screen-space view rectangle, padded by `margin` tiles
/// and clamped to the map. `None` when the view misses the map entirely.
///
/// All four corners are mapped, so rotated projections (isometric) get the
/// bounding box of the view's footprint in tile space.
pub fn visible_tile_rect(engine: &TransformEngine, view_min: Vector2, view_max: Vector2, margin: u32) -> Option<TileRect> {
    let g = engine.geometry();
    if g.is_degenerate() {
        return None;
    }

    let corners = [
        engine.screen_to_tile(view_min.x, view_min.y),
        engine.screen_to_tile(view_max.x, view_min.y),
        engine.screen_to_tile(view_max.x, view_max.y),
        engine.screen_to_tile(view_min.x, view_max.y),
    ];
    let margin = i32::try_from(margin).unwrap_or(i32::MAX);

    let mut min_x = corners.iter().map(|p| p.x).min()?.saturating_sub(margin);
    let mut min_y = corners.iter().map(|p| p.y).min()?.saturating_sub(margin);
    let mut max_x = corners.iter().map(|p| p.x).max()?.saturating_add(margin);
    let mut max_y = corners.iter().map(|p| p.y).max()?.saturating_add(margin);

    let last_x = i32::try_from(g.width - 1).unwrap_or(i32::MAX);
    let last_y = i32::try_from(g.height - 1).unwrap_or(i32::MAX);
    if max_x < 0 || max_y < 0 || min_x > last_x || min_y > last_y {
        return None;
    }
    min_x = min_x.max(0);
    min_y = min_y.max(0);
    max_x = max_x.min(last_x);
    max_y = max_y.min(last_y);

    Some(TileRect {
        min: Point::new(min_x, min_y),
        max: Point::new(max_x, max_y),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{MapGeometry, Orientation};

    fn engine(o: Orientation) -> TransformEngine {
        TransformEngine::new(&MapGeometry::new(o, 20, 20, 32, 32)).expect("valid")
    }

    #[test]
    fn orthogonal_view_is_padded_and_clamped() {
        let e = engine(Orientation::Orthogonal);
        let r = visible_tile_rect(&e, Vector2::new(64.0, 64.0), Vector2::new(127.0, 95.0), 1).expect("on map");
        assert_eq!(r.min, Point::new(1, 1));
        assert_eq!(r.max, Point::new(4, 3));

        let r = visible_tile_rect(&e, Vector2::new(-100.0, -100.0), Vector2::new(10.0, 10.0), 1).expect("on map");
        assert_eq!(r.min, Point::ZERO);
        assert_eq!((r.width(), r.height()), (2, 2));
    }

    #[test]
    fn view_off_the_map_sees_nothing() {
        let e = engine(Orientation::Orthogonal);
        assert!(visible_tile_rect(&e, Vector2::new(5000.0, 0.0), Vector2::new(6000.0, 100.0), 1).is_none());
    }

    #[test]
    fn every_visible_isometric_tile_is_kept() {
        let e = engine(Orientation::Isometric);
        let (min, max) = (Vector2::new(300.0, 100.0), Vector2::new(420.0, 180.0));
        let r = visible_tile_rect(&e, min, max, 0).expect("on map");
        for v in e.tiles() {
            let c = e.tile_center(v.x, v.y);
            if c.x >= min.x && c.x <= max.x && c.y >= min.y && c.y <= max.y {
                assert!(r.contains(v.x, v.y), "({}, {}) culled", v.x, v.y);
            }
        }
    }
}
