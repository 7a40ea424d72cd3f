//! Per-orientation conversions between tile, pixel and screen space.
//!
//! Every orientation implements [`Projection`]. [`TransformEngine`] picks
//! the strategy from a map's [`Orientation`] and forwards to it, so callers
//! hold one concrete value instead of a boxed trait object.
//!
//! Transforms are defined over the whole plane: querying a tile or position
//! outside the map is not an error, and bounds checks are left to the caller
//! (see [`MapGeometry::contains`]).

mod hexagonal;
mod isometric;
mod orthogonal;
mod stagger;
mod staggered;

pub use hexagonal::Hexagonal;
pub use isometric::Isometric;
pub use orthogonal::Orthogonal;
pub use stagger::HexLayout;
pub use staggered::Staggered;

use crate::error::MapError;
use crate::geometry::{MapGeometry, Orientation};
use crate::math::{Point, Vector2};
use crate::visit::TileIter;

/// The coordinate contract shared by all map orientations.
///
/// Tile results are floored, so a position exactly on a tile boundary
/// belongs to the tile on its positive side. Degenerate maps (zero width or
/// height) never panic; their results are simply meaningless.
pub trait Projection {
    /// Geometry the projection was built from.
    fn geometry(&self) -> &MapGeometry;

    /// Size of the whole map in screen pixels.
    fn map_size(&self) -> Point;

    /// Screen anchor of a tile. Fractional tile input is floored first except
    /// on isometric maps, where it interpolates.
    fn tile_to_screen(&self, x: f64, y: f64) -> Vector2;

    /// Tile under a screen position.
    fn screen_to_tile(&self, x: f64, y: f64) -> Point;

    /// Pixel (world) position of a tile.
    fn tile_to_pixel(&self, x: f64, y: f64) -> Vector2;

    /// Screen position of a pixel-space position.
    fn pixel_to_screen(&self, x: f64, y: f64) -> Vector2;

    /// Inverse of [`Projection::pixel_to_screen`].
    fn screen_to_pixel(&self, x: f64, y: f64) -> Vector2;

    /// Tile containing a pixel-space position, e.g. an object origin.
    fn pixel_to_tile(&self, x: f64, y: f64) -> Point;

    /// Every in-bounds tile once, in back-to-front paint order.
    fn tiles(&self) -> TileIter;

    /// Screen-space outline of one tile, clockwise.
    fn tile_outline(&self, x: i32, y: i32) -> Vec<Vector2>;
}

/// One of the four orientation strategies, selected at construction.
///
/// ```
/// use tiled_projection::{MapGeometry, Orientation, Point, Projection, TransformEngine};
///
/// let geometry = MapGeometry::new(Orientation::Isometric, 8, 8, 64, 32);
/// let engine = TransformEngine::new(&geometry)?;
/// assert!(matches!(engine, TransformEngine::Isometric(_)));
///
/// // object positions live in pixel space
/// let pixel = engine.tile_to_pixel(2.0, 3.0);
/// assert_eq!(engine.pixel_to_tile(pixel.x + 1.0, pixel.y + 1.0), Point::new(2, 3));
/// let screen = engine.pixel_to_screen(pixel.x, pixel.y);
/// assert_eq!(engine.screen_to_pixel(screen.x, screen.y), pixel);
/// # Ok::<(), tiled_projection::MapError>(())
/// ```
#[derive(Debug, Clone)]
pub enum TransformEngine {
    /// Square grid.
    Orthogonal(Orthogonal),
    /// Diamond grid with the origin at the top corner.
    Isometric(Isometric),
    /// Hexagons with alternate rows or columns shifted.
    Hexagonal(Hexagonal),
    /// Diamonds with alternate rows or columns shifted.
    Staggered(Staggered),
}

macro_rules! dispatch {
    ($self:ident, $p:ident => $e:expr) => {
        match $self {
            TransformEngine::Orthogonal($p) => $e,
            TransformEngine::Isometric($p) => $e,
            TransformEngine::Hexagonal($p) => $e,
            TransformEngine::Staggered($p) => $e,
        }
    };
}

impl TransformEngine {
    /// Validates `geometry` and builds the strategy for its orientation.
    pub fn new(geometry: &MapGeometry) -> Result<Self, MapError> {
        Self::for_orientation(geometry.orientation, geometry)
    }

    /// Builds the strategy for `orientation`, overriding whatever the
    /// geometry itself says.
    pub fn for_orientation(orientation: Orientation, geometry: &MapGeometry) -> Result<Self, MapError> {
        let mut geometry = geometry.clone();
        geometry.orientation = orientation;
        geometry.validate()?;
        Ok(match orientation {
            Orientation::Orthogonal => TransformEngine::Orthogonal(Orthogonal::new(geometry)),
            Orientation::Isometric => TransformEngine::Isometric(Isometric::new(geometry)),
            Orientation::Hexagonal => TransformEngine::Hexagonal(Hexagonal::new(geometry)),
            Orientation::Staggered => TransformEngine::Staggered(Staggered::new(geometry)),
        })
    }

    /// Orientation of the active strategy.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.geometry().orientation
    }

    /// Derived stagger parameters and neighbour helpers; `None` for
    /// orthogonal and isometric maps.
    pub fn hex_layout(&self) -> Option<&HexLayout> {
        match self {
            TransformEngine::Hexagonal(h) => Some(h.layout()),
            TransformEngine::Staggered(s) => Some(s.layout()),
            _ => None,
        }
    }

    /// Outline polygon used for grid lines on hex and staggered maps.
    pub fn tile_to_screen_polygon(&self, x: i32, y: i32) -> Option<Vec<Vector2>> {
        self.hex_layout().map(|l| l.tile_to_screen_polygon(x, y))
    }

    /// Screen position of a tile's centre.
    pub fn tile_center(&self, x: i32, y: i32) -> Vector2 {
        let g = self.geometry();
        let anchor = self.tile_to_screen(x as f64, y as f64);
        match self {
            // isometric anchors sit on the top vertex, already centred horizontally
            TransformEngine::Isometric(_) => anchor + Vector2::new(0.0, g.tile_height as f64 / 2.0),
            _ => anchor + Vector2::new(g.tile_width as f64 / 2.0, g.tile_height as f64 / 2.0),
        }
    }
}

impl Projection for TransformEngine {
    fn geometry(&self) -> &MapGeometry {
        dispatch!(self, p => p.geometry())
    }

    fn map_size(&self) -> Point {
        dispatch!(self, p => p.map_size())
    }

    fn tile_to_screen(&self, x: f64, y: f64) -> Vector2 {
        dispatch!(self, p => p.tile_to_screen(x, y))
    }

    fn screen_to_tile(&self, x: f64, y: f64) -> Point {
        dispatch!(self, p => p.screen_to_tile(x, y))
    }

    fn tile_to_pixel(&self, x: f64, y: f64) -> Vector2 {
        dispatch!(self, p => p.tile_to_pixel(x, y))
    }

    fn pixel_to_screen(&self, x: f64, y: f64) -> Vector2 {
        dispatch!(self, p => p.pixel_to_screen(x, y))
    }

    fn screen_to_pixel(&self, x: f64, y: f64) -> Vector2 {
        dispatch!(self, p => p.screen_to_pixel(x, y))
    }

    fn pixel_to_tile(&self, x: f64, y: f64) -> Point {
        dispatch!(self, p => p.pixel_to_tile(x, y))
    }

    fn tiles(&self) -> TileIter {
        dispatch!(self, p => p.tiles())
    }

    fn tile_outline(&self, x: i32, y: i32) -> Vec<Vector2> {
        dispatch!(self, p => p.tile_outline(x, y))
    }
}
