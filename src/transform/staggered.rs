use crate::geometry::MapGeometry;
use crate::math::{Point, Vector2};
use crate::transform::{HexLayout, Projection};
use crate::visit::TileIter;

/// Isometric-looking diamonds laid out on a staggered grid. Shares the hex
/// layout with a zero side length; only picking differs.
#[derive(Debug, Clone)]
pub struct Staggered {
    geometry: MapGeometry,
    layout: HexLayout,
}

impl Staggered {
    pub fn new(geometry: MapGeometry) -> Self {
        Staggered {
            layout: HexLayout::new(&geometry),
            geometry,
        }
    }

    #[inline]
    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }
}

impl Projection for Staggered {
    fn geometry(&self) -> &MapGeometry {
        &self.geometry
    }

    fn map_size(&self) -> Point {
        self.layout.map_size()
    }

    fn tile_to_screen(&self, x: f64, y: f64) -> Vector2 {
        self.layout.tile_to_screen(x, y)
    }

    /// Resolves against the plain tile grid, then moves to a diagonal
    /// neighbour when the position falls in one of the four corner triangles.
    fn screen_to_tile(&self, x: f64, y: f64) -> Point {
        let l = &self.layout;
        let (mut x, mut y) = (x, y);
        if l.stagger_even {
            if l.stagger_x {
                x -= l.side_offset_x as f64;
            } else {
                y -= l.side_offset_y as f64;
            }
        }

        let (tw, th) = ((l.tile_width as f64).max(1.0), (l.tile_height as f64).max(1.0));
        let reference = Point::floor(x / tw, y / th);
        let rel = Point::floor(x - reference.x as f64 * tw, y - reference.y as f64 * th);
        let reference = l.adjust_reference_point(reference);

        let y_pos = rel.x as f64 * (th / tw);
        let rel_y = rel.y as f64;
        let offset_y = l.side_offset_y as f64;

        if offset_y - y_pos > rel_y {
            l.top_left(reference.x, reference.y)
        } else if -offset_y + y_pos > rel_y {
            l.top_right(reference.x, reference.y)
        } else if offset_y + y_pos < rel_y {
            l.bottom_left(reference.x, reference.y)
        } else if offset_y * 3.0 - y_pos < rel_y {
            l.bottom_right(reference.x, reference.y)
        } else {
            reference
        }
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
        self.layout.tiles_from(self.screen_to_tile(0.0, 0.0))
    }

    fn tile_outline(&self, x: i32, y: i32) -> Vec<Vector2> {
        self.layout.tile_to_screen_polygon(x, y)
    }
}
