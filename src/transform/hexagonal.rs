use crate::geometry::MapGeometry;
use crate::math::{Point, Vector2};
use crate::transform::{HexLayout, Projection};
use crate::visit::TileIter;

const STAGGER_X_OFFSETS: [Point; 4] = [
    Point::new(0, 0),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(2, 0),
];

const STAGGER_Y_OFFSETS: [Point; 4] = [
    Point::new(0, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
    Point::new(0, 2),
];

/// True hexagon grid. Pixel space equals screen space.
#[derive(Debug, Clone)]
pub struct Hexagonal {
    geometry: MapGeometry,
    layout: HexLayout,
    /// Hex centres inside one doubled reference cell.
    centers: [Point; 4],
}

impl Hexagonal {
    pub fn new(geometry: MapGeometry) -> Self {
        let layout = HexLayout::new(&geometry);
        let centers = reference_centers(&layout);
        Hexagonal {
            geometry,
            layout,
            centers,
        }
    }

    #[inline]
    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }
}

fn reference_centers(l: &HexLayout) -> [Point; 4] {
    let (cw, rh) = (l.column_width as f64, l.row_height as f64);
    if l.stagger_x {
        let left = l.side_length_x as f64 / 2.0;
        let center_x = left + cw;
        let center_y = l.tile_height as f64 / 2.0;
        [
            Point::floor(left, center_y),
            Point::floor(center_x, center_y - rh),
            Point::floor(center_x, center_y + rh),
            Point::floor(center_x + cw, center_y),
        ]
    } else {
        let top = l.side_length_y as f64 / 2.0;
        let center_x = l.tile_width as f64 / 2.0;
        let center_y = top + rh;
        [
            Point::floor(center_x, top),
            Point::floor(center_x - cw, center_y),
            Point::floor(center_x + cw, center_y),
            Point::floor(center_x, center_y + rh),
        ]
    }
}

impl Projection for Hexagonal {
    fn geometry(&self) -> &MapGeometry {
        &self.geometry
    }

    fn map_size(&self) -> Point {
        self.layout.map_size()
    }

    fn tile_to_screen(&self, x: f64, y: f64) -> Vector2 {
        self.layout.tile_to_screen(x, y)
    }

    /// Snaps to the nearest hex centre within a doubled reference cell.
    fn screen_to_tile(&self, x: f64, y: f64) -> Point {
        let l = &self.layout;
        let (mut x, mut y) = (x, y);
        if l.stagger_x {
            x -= if l.stagger_even { l.tile_width } else { l.side_offset_x } as f64;
        } else {
            y -= if l.stagger_even { l.tile_height } else { l.side_offset_y } as f64;
        }

        // one-pixel tiles collapse the cell; fall back to a unit cell
        let cell_w = (l.column_width as f64 * 2.0).max(1.0);
        let cell_h = (l.row_height as f64 * 2.0).max(1.0);
        let reference = Point::floor(x / cell_w, y / cell_h);
        let rel = Point::floor(x - reference.x as f64 * cell_w, y - reference.y as f64 * cell_h);
        let reference = l.adjust_reference_point(reference);

        let mut nearest = 0;
        let mut min_dist = i64::MAX;
        for (i, center) in self.centers.iter().enumerate() {
            let d = center.distance_squared(rel);
            if d < min_dist {
                min_dist = d;
                nearest = i;
            }
        }

        let offsets = if l.stagger_x { &STAGGER_X_OFFSETS } else { &STAGGER_Y_OFFSETS };
        reference.saturating_add(offsets[nearest])
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Orientation, StaggerAxis, StaggerIndex};

    fn hex(axis: StaggerAxis, index: StaggerIndex) -> Hexagonal {
        Hexagonal::new(
            MapGeometry::new(Orientation::Hexagonal, 7, 6, 32, 28)
                .with_stagger(axis, index)
                .with_hex_side_length(14),
        )
    }

    #[test]
    fn centre_of_each_tile_resolves_back() {
        for axis in [StaggerAxis::X, StaggerAxis::Y] {
            for index in [StaggerIndex::Even, StaggerIndex::Odd] {
                let h = hex(axis, index);
                for y in -3..9 {
                    for x in -3..10 {
                        let c = h.tile_to_screen(x as f64, y as f64) + Vector2::new(16.0, 14.0);
                        assert_eq!(h.screen_to_tile(c.x, c.y), Point::new(x, y), "{:?}/{:?}", axis, index);
                    }
                }
            }
        }
    }

    #[test]
    fn shifted_rows_move_by_column_width() {
        let h = hex(StaggerAxis::Y, StaggerIndex::Odd);
        let cw = h.layout().column_width as f64;
        assert_eq!(h.tile_to_screen(0.0, 1.0).x - h.tile_to_screen(0.0, 0.0).x, cw);
        assert_eq!(h.tile_to_screen(0.0, 2.0).x, 0.0);
    }
}
