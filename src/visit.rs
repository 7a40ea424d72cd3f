//! Lazy tile traversal in paint order.
//!
//! Each orientation walks the grid differently (see the constructors on
//! [`TileIter`]). Whatever the walk yields outside the map is dropped here,
//! and `z` counts only the tiles that survive, so it always runs
//! `0..width * height`.

use crate::geometry::RenderOrder;
use crate::math::Point;

/// One visited tile and its paint index within the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileVisit {
    pub x: i32,
    pub y: i32,
    pub z: u32,
}

/// Depth of the `z`-th painted tile inside a layer band of `layer_distance`.
/// Always within `[0, layer_distance]`; zero for empty maps.
pub fn tile_depth(z: u32, tile_count: usize, layer_distance: f64) -> f64 {
    if tile_count == 0 {
        return 0.0;
    }
    (z as f64 * layer_distance / tile_count as f64).clamp(0.0, layer_distance)
}

#[derive(Debug, Clone)]
enum Walk {
    Orthogonal(OrthogonalWalk),
    Isometric(IsometricWalk),
    StaggerX(StaggerXWalk),
    StaggerY(StaggerYWalk),
}

impl Walk {
    fn next(&mut self) -> Option<Point> {
        match self {
            Walk::Orthogonal(w) => w.next(),
            Walk::Isometric(w) => w.next(),
            Walk::StaggerX(w) => w.next(),
            Walk::StaggerY(w) => w.next(),
        }
    }
}

/// Iterator over [`TileVisit`]s. Obtained from
/// [`Projection::tiles`](crate::transform::Projection::tiles).
#[derive(Debug, Clone)]
pub struct TileIter {
    walk: Walk,
    width: i32,
    height: i32,
    next_z: u32,
}

fn dim(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

impl TileIter {
    fn from_walk(walk: Walk, width: i32, height: i32) -> Self {
        TileIter {
            walk,
            width,
            height,
            next_z: 0,
        }
    }

    /// Full grid, starting from the corner `order` names.
    pub fn orthogonal(width: u32, height: u32, order: RenderOrder) -> Self {
        let (w, h) = (dim(width), dim(height));
        let (start_x, end_x, inc_x) = match order {
            RenderOrder::RightDown | RenderOrder::RightUp => (0, w, 1),
            RenderOrder::LeftDown | RenderOrder::LeftUp => (w - 1, -1, -1),
        };
        let (start_y, end_y, inc_y) = match order {
            RenderOrder::RightDown | RenderOrder::LeftDown => (0, h, 1),
            RenderOrder::RightUp | RenderOrder::LeftUp => (h - 1, -1, -1),
        };
        let walk = OrthogonalWalk {
            x: start_x,
            y: start_y,
            start_x,
            end_x,
            inc_x,
            end_y,
            inc_y,
        };
        Self::from_walk(Walk::Orthogonal(walk), w, h)
    }

    /// Anti-diagonals from the top of the diamond down.
    pub fn isometric(width: u32, height: u32) -> Self {
        let (w, h) = (dim(width), dim(height));
        let mut walk = IsometricWalk {
            width: w,
            height: h,
            diagonal: 0,
            y: 0,
            y_end: -1,
        };
        walk.enter_diagonal();
        Self::from_walk(Walk::Isometric(walk), w, h)
    }

    /// Stagger-x maps: each output row interleaves two physical columns, so
    /// the walk steps `x` by 2 and alternates where the next row starts.
    /// `start_staggered` is whether `start.x` is a shifted column.
    pub fn stagger_x(width: i32, height: i32, start: Point, start_staggered: bool) -> Self {
        let walk = StaggerXWalk {
            width,
            height,
            x: start.x,
            y: start.y,
            row_x: start.x,
            staggered_row: start_staggered,
        };
        Self::from_walk(Walk::StaggerX(walk), width, height)
    }

    /// Stagger-y maps: plain row-major scan from `start`.
    pub fn stagger_y(width: i32, height: i32, start: Point) -> Self {
        let walk = StaggerYWalk {
            width,
            height,
            start_x: start.x,
            x: start.x,
            y: start.y,
        };
        Self::from_walk(Walk::StaggerY(walk), width, height)
    }
}

impl Iterator for TileIter {
    type Item = TileVisit;

    fn next(&mut self) -> Option<TileVisit> {
        loop {
            let p = self.walk.next()?;
            if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
                continue;
            }
            let z = self.next_z;
            self.next_z += 1;
            return Some(TileVisit { x: p.x, y: p.y, z });
        }
    }
}

#[derive(Debug, Clone)]
struct OrthogonalWalk {
    x: i32,
    y: i32,
    start_x: i32,
    end_x: i32,
    inc_x: i32,
    end_y: i32,
    inc_y: i32,
}

impl OrthogonalWalk {
    fn next(&mut self) -> Option<Point> {
        if self.start_x == self.end_x || self.y == self.end_y {
            return None;
        }
        let p = Point::new(self.x, self.y);
        self.x += self.inc_x;
        if self.x == self.end_x {
            self.x = self.start_x;
            self.y += self.inc_y;
        }
        Some(p)
    }
}

#[derive(Debug, Clone)]
struct IsometricWalk {
    width: i32,
    height: i32,
    diagonal: i32,
    y: i32,
    y_end: i32,
}

impl IsometricWalk {
    // only the in-bounds stretch of each diagonal is walked; order is unchanged
    fn enter_diagonal(&mut self) {
        self.y = (self.diagonal - (self.width - 1)).max(0);
        self.y_end = self.diagonal.min(self.height - 1);
    }

    fn next(&mut self) -> Option<Point> {
        while self.diagonal < self.width + self.height - 1 {
            if self.y <= self.y_end {
                let p = Point::new(self.diagonal - self.y, self.y);
                self.y += 1;
                return Some(p);
            }
            self.diagonal += 1;
            self.enter_diagonal();
        }
        None
    }
}

#[derive(Debug, Clone)]
struct StaggerXWalk {
    width: i32,
    height: i32,
    x: i32,
    y: i32,
    row_x: i32,
    staggered_row: bool,
}

impl StaggerXWalk {
    fn next(&mut self) -> Option<Point> {
        loop {
            if self.y >= self.height {
                return None;
            }
            if self.row_x < self.width {
                let p = Point::new(self.row_x, self.y);
                self.row_x = self.row_x.saturating_add(2);
                return Some(p);
            }
            if self.staggered_row {
                self.x -= 1;
                self.y += 1;
                self.staggered_row = false;
            } else {
                self.x += 1;
                self.staggered_row = true;
            }
            self.row_x = self.x;
        }
    }
}

#[derive(Debug, Clone)]
struct StaggerYWalk {
    width: i32,
    height: i32,
    start_x: i32,
    x: i32,
    y: i32,
}

impl StaggerYWalk {
    fn next(&mut self) -> Option<Point> {
        if self.start_x >= self.width || self.y >= self.height {
            return None;
        }
        let p = Point::new(self.x, self.y);
        self.x += 1;
        if self.x >= self.width {
            self.x = self.start_x;
            self.y += 1;
        }
        Some(p)
    }
}
