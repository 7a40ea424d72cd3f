use macroquad::color::Color;

use crate::error::MapError;
use crate::geometry::MapGeometry;
use crate::layer::{LayerId, LayerKind, LayerTree, TileLayer};
use crate::loader;
use crate::math::Vector2;
use crate::transform::TransformEngine;

/// A map as the renderer sees it: immutable geometry plus an editable
/// layer tree.
#[derive(Debug, Clone)]
pub struct TiledMap {
    pub geometry: MapGeometry,
    pub layers: LayerTree,
    /// Pixel position parallax displacement is measured from.
    pub parallax_origin: Vector2,
    pub background: Option<Color>,
}

impl TiledMap {
    /// Empty map; fails if the geometry is invalid.
    pub fn new(geometry: MapGeometry) -> Result<Self, MapError> {
        geometry.validate()?;
        Ok(TiledMap {
            geometry,
            layers: LayerTree::new(),
            parallax_origin: Vector2::ZERO,
            background: None,
        })
    }

    /// Decodes a Tiled JSON map already held in memory.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        loader::decode_map(json)
    }

    /// Projection for this map's orientation.
    pub fn engine(&self) -> Result<TransformEngine, MapError> {
        TransformEngine::new(&self.geometry)
    }

    pub fn tile_layer(&self, id: LayerId) -> Option<&TileLayer> {
        match self.layers.get(id)?.kind() {
            LayerKind::Tiles(t) => Some(t),
            _ => None,
        }
    }
}
