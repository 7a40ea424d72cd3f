//! Derived layout shared by the hexagonal and staggered projections.

use crate::geometry::{MapGeometry, StaggerAxis, StaggerIndex};
use crate::math::{Point, Vector2};
use crate::visit::TileIter;

/// Cell measurements of a staggered grid, computed once from [`MapGeometry`].
///
/// `tile_width`/`tile_height` are rebuilt from the side offsets, so an odd
/// leftover pixel in the configured tile size is dropped exactly the way the
/// offsets drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexLayout {
    pub width: i32,
    pub height: i32,
    pub side_length_x: i32,
    pub side_length_y: i32,
    pub side_offset_x: i32,
    pub side_offset_y: i32,
    pub column_width: i32,
    pub row_height: i32,
    pub tile_width: i32,
    pub tile_height: i32,
    pub stagger_x: bool,
    pub stagger_even: bool,
    /// 0 when even rows/columns are shifted, 1 when odd ones are.
    pub stagger_index_bit: i32,
    map_size: Point,
}

impl HexLayout {
    /// Derives the layout; sizes too large for `i32` are clamped.
    pub fn new(geometry: &MapGeometry) -> Self {
        let width = clamp_i32(geometry.width);
        let height = clamp_i32(geometry.height);
        let side = clamp_i32(geometry.effective_side_length());
        let stagger_x = geometry.stagger_axis == StaggerAxis::X;
        let stagger_even = geometry.stagger_index == StaggerIndex::Even;

        let (side_length_x, side_length_y) = if stagger_x { (side, 0) } else { (0, side) };
        let side_offset_x = (clamp_i32(geometry.tile_width) - side_length_x) / 2;
        let side_offset_y = (clamp_i32(geometry.tile_height) - side_length_y) / 2;
        let column_width = side_offset_x + side_length_x;
        let row_height = side_offset_y + side_length_y;
        let tile_width = column_width + side_offset_x;
        let tile_height = row_height + side_offset_y;

        let map_size = if width == 0 || height == 0 {
            Point::ZERO
        } else if stagger_x {
            let (w, h) = (width as i64, height as i64);
            let mut map_height = h * (tile_height as i64 + side_length_y as i64);
            if width > 1 {
                map_height += row_height as i64;
            }
            Point::new(clamp_i64(w * column_width as i64 + side_offset_x as i64), clamp_i64(map_height))
        } else {
            let (w, h) = (width as i64, height as i64);
            let mut map_width = w * (tile_width as i64 + side_length_x as i64);
            if height > 1 {
                map_width += column_width as i64;
            }
            Point::new(clamp_i64(map_width), clamp_i64(h * row_height as i64 + side_offset_y as i64))
        };

        HexLayout {
            width,
            height,
            side_length_x,
            side_length_y,
            side_offset_x,
            side_offset_y,
            column_width,
            row_height,
            tile_width,
            tile_height,
            stagger_x,
            stagger_even,
            stagger_index_bit: if stagger_even { 0 } else { 1 },
            map_size,
        }
    }

    /// Map size in pixels; the same whichever parity is shifted.
    #[inline]
    pub fn map_size(&self) -> Point {
        self.map_size
    }

    /// Whether column `x` is one of the shifted ones.
    #[inline]
    pub fn do_stagger_x(&self, x: i32) -> bool {
        self.stagger_x && ((x & 1) ^ self.stagger_index_bit) == 0
    }

    /// Whether row `y` is one of the shifted ones.
    #[inline]
    pub fn do_stagger_y(&self, y: i32) -> bool {
        !self.stagger_x && ((y & 1) ^ self.stagger_index_bit) == 0
    }

    /// Top-left corner of the tile's bounding box. Sub-tile input is floored.
    pub fn tile_to_screen(&self, x: f64, y: f64) -> Vector2 {
        let tile = Point::floor(x, y);
        let (mut pixel_x, mut pixel_y);
        if self.stagger_x {
            pixel_y = tile.y as f64 * self.tile_height as f64;
            if self.do_stagger_x(tile.x) {
                pixel_y += self.row_height as f64;
            }
            pixel_x = tile.x as f64 * self.column_width as f64;
        } else {
            pixel_x = tile.x as f64 * self.tile_width as f64;
            if self.do_stagger_y(tile.y) {
                pixel_x += self.column_width as f64;
            }
            pixel_y = tile.y as f64 * self.row_height as f64;
        }
        Vector2::new(pixel_x, pixel_y)
    }

    /// Maps a reference cell index on the doubled grid back to a tile index
    /// along the stagger axis.
    pub(crate) fn adjust_reference_point(&self, mut reference: Point) -> Point {
        let adjust = |v: i32| {
            let doubled = v.saturating_mul(2);
            if self.stagger_even { doubled.saturating_add(1) } else { doubled }
        };
        if self.stagger_x {
            reference.x = adjust(reference.x);
        } else {
            reference.y = adjust(reference.y);
        }
        reference
    }

    /// Diagonal neighbour towards the top left; the other three mirror it.
    pub fn top_left(&self, x: i32, y: i32) -> Point {
        if self.stagger_x {
            if self.do_stagger_x(x) {
                step(x, y, -1, 0)
            } else {
                step(x, y, -1, -1)
            }
        } else if self.do_stagger_y(y) {
            step(x, y, 0, -1)
        } else {
            step(x, y, -1, -1)
        }
    }

    pub fn top_right(&self, x: i32, y: i32) -> Point {
        if self.stagger_x {
            if self.do_stagger_x(x) {
                step(x, y, 1, 0)
            } else {
                step(x, y, 1, -1)
            }
        } else if self.do_stagger_y(y) {
            step(x, y, 1, -1)
        } else {
            step(x, y, 0, -1)
        }
    }

    pub fn bottom_left(&self, x: i32, y: i32) -> Point {
        if self.stagger_x {
            if self.do_stagger_x(x) {
                step(x, y, -1, 1)
            } else {
                step(x, y, -1, 0)
            }
        } else if self.do_stagger_y(y) {
            step(x, y, 0, 1)
        } else {
            step(x, y, -1, 1)
        }
    }

    pub fn bottom_right(&self, x: i32, y: i32) -> Point {
        if self.stagger_x {
            if self.do_stagger_x(x) {
                step(x, y, 1, 1)
            } else {
                step(x, y, 1, 0)
            }
        } else if self.do_stagger_y(y) {
            step(x, y, 1, 1)
        } else {
            step(x, y, 0, 1)
        }
    }

    /// Outline of the tile in screen space, clockwise from the left edge.
    /// A zero side length collapses the hexagon to a diamond.
    pub fn tile_to_screen_polygon(&self, x: i32, y: i32) -> Vec<Vector2> {
        let mut corners: Vec<(i32, i32)> = Vec::with_capacity(6);
        corners.push((0, self.row_height));
        if !self.stagger_x {
            corners.push((0, self.side_offset_y));
        }
        corners.push((self.side_offset_x, 0));
        if self.stagger_x {
            corners.push((self.column_width, 0));
        }
        corners.push((self.tile_width, self.side_offset_y));
        if !self.stagger_x {
            corners.push((self.tile_width, self.row_height));
        }
        corners.push((self.column_width, self.tile_height));
        if self.stagger_x {
            corners.push((self.side_offset_x, self.tile_height));
        }

        corners.dedup();
        while corners.len() > 1 && corners.first() == corners.last() {
            corners.pop();
        }

        let origin = self.tile_to_screen(x as f64, y as f64);
        corners
            .into_iter()
            .map(|(cx, cy)| origin + Vector2::new(cx as f64, cy as f64))
            .collect()
    }

    /// Traversal from `start` (the tile under the screen origin) in paint order.
    pub fn tiles_from(&self, start: Point) -> TileIter {
        if self.stagger_x {
            TileIter::stagger_x(self.width, self.height, start, self.do_stagger_x(start.x))
        } else {
            TileIter::stagger_y(self.width, self.height, start)
        }
    }
}

fn clamp_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn clamp_i64(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

// Neighbours of tiles at the edge of the integer range stay on that edge.
fn step(x: i32, y: i32, dx: i32, dy: i32) -> Point {
    Point::new(x.saturating_add(dx), y.saturating_add(dy))
}
