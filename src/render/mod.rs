//! From layers to draw calls: composition, culling and the Macroquad sink.

pub mod command;
pub mod compositor;
pub mod cull;
pub mod macroquad_sink;

pub use command::{DrawCommand, DrawKind, DrawSink, Frame, LayerBatch, ObjectContent};
pub use compositor::Compositor;
pub use cull::{visible_tile_rect, TileRect};
pub use macroquad_sink::{DepthQueue, MacroquadSink, Sprite};
