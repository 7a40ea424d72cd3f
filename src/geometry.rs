//! Read-only map metadata the projections are built from.

use serde::Deserialize;
use std::str::FromStr;

use crate::error::MapError;

/// Map projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Orthogonal,
    Isometric,
    Hexagonal,
    Staggered,
}

/// Iteration direction when painting orthogonal tile layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderOrder {
    #[default]
    RightDown,
    RightUp,
    LeftDown,
    LeftUp,
}

/// Which axis alternates offset rows/columns on hex and staggered maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaggerAxis {
    X,
    #[default]
    Y,
}

/// Which parity of row/column is the shifted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaggerIndex {
    Even,
    #[default]
    Odd,
}

fn unknown(kind: &'static str, value: &str) -> MapError {
    MapError::UnknownValue {
        kind,
        value: value.to_owned(),
    }
}

impl FromStr for Orientation {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orthogonal" => Ok(Orientation::Orthogonal),
            "isometric" => Ok(Orientation::Isometric),
            "hexagonal" => Ok(Orientation::Hexagonal),
            "staggered" => Ok(Orientation::Staggered),
            other => Err(unknown("orientation", other)),
        }
    }
}

impl FromStr for RenderOrder {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right-down" => Ok(RenderOrder::RightDown),
            "right-up" => Ok(RenderOrder::RightUp),
            "left-down" => Ok(RenderOrder::LeftDown),
            "left-up" => Ok(RenderOrder::LeftUp),
            other => Err(unknown("render order", other)),
        }
    }
}

impl FromStr for StaggerAxis {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(StaggerAxis::X),
            "y" => Ok(StaggerAxis::Y),
            other => Err(unknown("stagger axis", other)),
        }
    }
}

impl FromStr for StaggerIndex {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "even" => Ok(StaggerIndex::Even),
            "odd" => Ok(StaggerIndex::Odd),
            other => Err(unknown("stagger index", other)),
        }
    }
}

/// Map size and cell layout. Field names deserialize from a Tiled JSON map
/// header; unknown fields (layers, tilesets, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapGeometry {
    pub orientation: Orientation,
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    #[serde(rename = "staggeraxis", default)]
    pub stagger_axis: StaggerAxis,
    #[serde(rename = "staggerindex", default)]
    pub stagger_index: StaggerIndex,
    /// Length of the flat hex side in pixels. Ignored unless hexagonal.
    #[serde(rename = "hexsidelength", default)]
    pub hex_side_length: u32,
    #[serde(rename = "renderorder", default)]
    pub render_order: RenderOrder,
}

impl MapGeometry {
    /// Geometry with stagger Y/odd, no hex side and right-down order.
    pub fn new(orientation: Orientation, width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
        MapGeometry {
            orientation,
            width,
            height,
            tile_width,
            tile_height,
            stagger_axis: StaggerAxis::default(),
            stagger_index: StaggerIndex::default(),
            hex_side_length: 0,
            render_order: RenderOrder::default(),
        }
    }

    pub fn with_render_order(mut self, render_order: RenderOrder) -> Self {
        self.render_order = render_order;
        self
    }

    pub fn with_stagger(mut self, axis: StaggerAxis, index: StaggerIndex) -> Self {
        self.stagger_axis = axis;
        self.stagger_index = index;
        self
    }

    pub fn with_hex_side_length(mut self, side: u32) -> Self {
        self.hex_side_length = side;
        self
    }

    /// Parses the geometry fields out of a Tiled JSON map and validates them.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        let geometry: MapGeometry = serde_json::from_str(json)?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Checks the invariants every projection relies on.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(MapError::InvalidTileSize {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        if self.orientation == Orientation::Hexagonal {
            let tile = match self.stagger_axis {
                StaggerAxis::X => self.tile_width,
                StaggerAxis::Y => self.tile_height,
            };
            if self.hex_side_length > tile {
                return Err(MapError::InvalidHexSideLength {
                    side: self.hex_side_length,
                    tile,
                });
            }
        }
        Ok(())
    }

    /// Side length the stagger math should use: staggered maps are hexes with
    /// no flat side, so they always render as diamonds.
    pub fn effective_side_length(&self) -> u32 {
        match self.orientation {
            Orientation::Hexagonal => self.hex_side_length,
            _ => 0,
        }
    }

    /// Zero width or height.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when `(x, y)` is a tile inside the map.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as i64) < self.width as i64 && (y as i64) < self.height as i64
    }
}
