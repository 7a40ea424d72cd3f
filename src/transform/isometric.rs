use crate::geometry::MapGeometry;
use crate::math::{Point, Vector2};
use crate::transform::Projection;
use crate::visit::TileIter;

/// Diamond projection. Tile (0, 0) sits at the top of the diamond, shifted
/// right by `height` half-tiles so the whole map has non-negative x.
///
/// Pixel space is the unrotated grid measured in `tile_height` units on both
/// axes, which is how Tiled positions objects on isometric maps.
#[derive(Debug, Clone)]
pub struct Isometric {
    geometry: MapGeometry,
    tile_width: f64,
    tile_height: f64,
    /// `height * tile_width / 2`: screen x of the tile (0, 0) anchor.
    origin_x: f64,
}

impl Isometric {
    pub fn new(geometry: MapGeometry) -> Self {
        let tile_width = geometry.tile_width as f64;
        let tile_height = geometry.tile_height as f64;
        Isometric {
            origin_x: geometry.height as f64 * tile_width / 2.0,
            tile_width,
            tile_height,
            geometry,
        }
    }
}

impl Projection for Isometric {
    fn geometry(&self) -> &MapGeometry {
        &self.geometry
    }

    fn map_size(&self) -> Point {
        if self.geometry.is_degenerate() {
            return Point::ZERO;
        }
        let g = &self.geometry;
        let span = g.width as i64 + g.height as i64;
        let clamp = |v: i64| v.min(i32::MAX as i64) as i32;
        Point::new(
            clamp(span * g.tile_width as i64 / 2),
            clamp(span * g.tile_height as i64 / 2),
        )
    }

    fn tile_to_screen(&self, x: f64, y: f64) -> Vector2 {
        Vector2::new(
            self.origin_x + (x - y) * self.tile_width / 2.0,
            (x + y) * self.tile_height / 2.0,
        )
    }

    fn screen_to_tile(&self, x: f64, y: f64) -> Point {
        let x = x - self.origin_x;
        let tile_y = y / self.tile_height;
        let tile_x = x / self.tile_width;
        Point::floor(tile_y + tile_x, tile_y - tile_x)
    }

    fn tile_to_pixel(&self, x: f64, y: f64) -> Vector2 {
        Vector2::new(x * self.tile_height, y * self.tile_height)
    }

    fn pixel_to_screen(&self, x: f64, y: f64) -> Vector2 {
        let tile_y = y / self.tile_height;
        let tile_x = x / self.tile_height;
        Vector2::new(
            self.origin_x + (tile_x - tile_y) * self.tile_width / 2.0,
            (tile_x + tile_y) * self.tile_height / 2.0,
        )
    }

    fn screen_to_pixel(&self, x: f64, y: f64) -> Vector2 {
        let x = x - self.origin_x;
        let tile_y = y / self.tile_height;
        let tile_x = x / self.tile_width;
        Vector2::new((tile_y + tile_x) * self.tile_height, (tile_y - tile_x) * self.tile_height)
    }

    fn pixel_to_tile(&self, x: f64, y: f64) -> Point {
        Point::floor(x / self.tile_height, y / self.tile_height)
    }

    fn tiles(&self) -> TileIter {
        TileIter::isometric(self.geometry.width, self.geometry.height)
    }

    fn tile_outline(&self, x: i32, y: i32) -> Vec<Vector2> {
        let top = self.tile_to_screen(x as f64, y as f64);
        let (hw, hh) = (self.tile_width / 2.0, self.tile_height / 2.0);
        vec![
            top,
            top + Vector2::new(hw, hh),
            top + Vector2::new(0.0, self.tile_height),
            top + Vector2::new(-hw, hh),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;

    fn iso() -> Isometric {
        Isometric::new(MapGeometry::new(Orientation::Isometric, 8, 6, 64, 32))
    }

    #[test]
    fn origin_is_shifted_by_height() {
        let i = iso();
        assert_eq!(i.tile_to_screen(0.0, 0.0), Vector2::new(6.0 * 32.0, 0.0));
        assert_eq!(i.map_size(), Point::new(14 * 32, 14 * 16));
    }

    #[test]
    fn centre_of_a_tile_resolves_back() {
        let i = iso();
        let c = i.tile_to_screen(3.0, 2.0) + Vector2::new(0.0, 16.0);
        assert_eq!(i.screen_to_tile(c.x, c.y), Point::new(3, 2));
    }

    #[test]
    fn pixel_and_screen_agree_through_tiles() {
        let i = iso();
        let pixel = i.tile_to_pixel(2.0, 5.0);
        assert_eq!(pixel, Vector2::new(64.0, 160.0));
        let screen = i.pixel_to_screen(pixel.x, pixel.y);
        assert_eq!(screen, i.tile_to_screen(2.0, 5.0));
        assert_eq!(i.screen_to_pixel(screen.x, screen.y), pixel);
        assert_eq!(i.pixel_to_tile(pixel.x + 1.0, pixel.y + 1.0), Point::new(2, 5));
    }
}
