use crate::geometry::MapGeometry;
use crate::math::{Point, Vector2};
use crate::transform::Projection;
use crate::visit::TileIter;

/// Square grid: pixel space and screen space coincide.
#[derive(Debug, Clone)]
pub struct Orthogonal {
    geometry: MapGeometry,
    tile_width: f64,
    tile_height: f64,
}

impl Orthogonal {
    pub fn new(geometry: MapGeometry) -> Self {
        Orthogonal {
            tile_width: geometry.tile_width as f64,
            tile_height: geometry.tile_height as f64,
            geometry,
        }
    }
}

impl Projection for Orthogonal {
    fn geometry(&self) -> &MapGeometry {
        &self.geometry
    }

    fn map_size(&self) -> Point {
        if self.geometry.is_degenerate() {
            return Point::ZERO;
        }
        let g = &self.geometry;
        Point::new(
            (g.width as i64 * g.tile_width as i64).min(i32::MAX as i64) as i32,
            (g.height as i64 * g.tile_height as i64).min(i32::MAX as i64) as i32,
        )
    }

    fn tile_to_screen(&self, x: f64, y: f64) -> Vector2 {
        let tile = Point::floor(x, y);
        Vector2::new(tile.x as f64 * self.tile_width, tile.y as f64 * self.tile_height)
    }

    fn screen_to_tile(&self, x: f64, y: f64) -> Point {
        Point::floor(x / self.tile_width, y / self.tile_height)
    }

    fn tile_to_pixel(&self, x: f64, y: f64) -> Vector2 {
        self.tile_to_screen(x, y)
    }

    fn pixel_to_screen(&self, x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    fn screen_to_pixel(&self, x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    fn pixel_to_tile(&self, x: f64, y: f64) -> Point {
        self.screen_to_tile(x, y)
    }

    fn tiles(&self) -> TileIter {
        let g = &self.geometry;
        TileIter::orthogonal(g.width, g.height, g.render_order)
    }

    fn tile_outline(&self, x: i32, y: i32) -> Vec<Vector2> {
        let o = self.tile_to_screen(x as f64, y as f64);
        let (w, h) = (self.tile_width, self.tile_height);
        vec![
            o,
            o + Vector2::new(w, 0.0),
            o + Vector2::new(w, h),
            o + Vector2::new(0.0, h),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;

    fn ortho() -> Orthogonal {
        Orthogonal::new(MapGeometry::new(Orientation::Orthogonal, 20, 15, 16, 24))
    }

    #[test]
    fn tile_scaling_is_exact() {
        let o = ortho();
        assert_eq!(o.tile_to_screen(3.0, -2.0), Vector2::new(48.0, -48.0));
        assert_eq!(o.map_size(), Point::new(320, 360));
    }

    #[test]
    fn boundary_belongs_to_positive_side() {
        let o = ortho();
        assert_eq!(o.screen_to_tile(16.0, 24.0), Point::new(1, 1));
        assert_eq!(o.screen_to_tile(15.999, 23.999), Point::new(0, 0));
        assert_eq!(o.screen_to_tile(-0.001, 0.0), Point::new(-1, 0));
    }
}
