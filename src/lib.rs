
//! Tile, pixel and screen projections for Tiled maps, with paint-order
//! traversal, layer composition and a Macroquad sink.
//!
//! ```no_run
//! use tiled_projection::{Compositor, MacroquadSink, Projection, RenderConfig, TiledMap};
//!
//! # fn frame(json: &str) -> Result<(), tiled_projection::MapError> {
//! let map = TiledMap::from_json_str(json)?;
//! let engine = map.engine()?;
//! let tile = engine.screen_to_tile(120.0, 48.0);
//! let frame = Compositor::new(&engine, RenderConfig::default())?.compose(&map, None);
//! let mut sink = MacroquadSink::new();
//! frame.submit(&mut sink);
//! # let _ = tile;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod geometry;
mod grid;
mod layer;
mod loader;
mod map;
mod math;
mod object;
pub mod render;
mod tile;
pub mod transform;
mod view;
pub mod visit;

pub use config::RenderConfig;
pub use error::MapError;
pub use geometry::{MapGeometry, Orientation, RenderOrder, StaggerAxis, StaggerIndex};
pub use grid::GridMesh;
pub use layer::{ImageLayer, Layer, LayerId, LayerKind, LayerTree, Lineage, TileLayer};
pub use loader::parse_color;
pub use map::TiledMap;
pub use math::{Point, Vector2};
pub use object::{DrawOrder, MapObject, ObjectGroup, ObjectShape, Outline, TileAnchor};
pub use render::{
    visible_tile_rect, Compositor, DepthQueue, DrawCommand, DrawKind, DrawSink, Frame, LayerBatch, MacroquadSink,
    ObjectContent, Sprite, TileRect,
};
pub use tile::{TileRef, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
pub use transform::{HexLayout, Projection, TransformEngine};
pub use view::{Camera, CursorStatus};
pub use visit::{tile_depth, TileIter, TileVisit};
