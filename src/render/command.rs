use macroquad::color::Color;

use crate::layer::LayerId;
use crate::math::{Point, Vector2};
use crate::tile::TileRef;

/// What an object command should be filled with, beyond its outline.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectContent {
    /// Nothing but the outline.
    Outline,
    /// A marker at the origin.
    Point,
    /// A tile sprite stretched to the object bounds.
    Tile(TileRef),
    /// A text label.
    Text(String),
    /// A texture by source path.
    Image(String),
}

/// Payload of a [`DrawCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawKind {
    /// One cell of a tile layer. `position` is the top-left of the cell's
    /// bounding box.
    Tile {
        /// Gid with its flip bits.
        tile: TileRef,
        /// Tile column.
        x: i32,
        /// Tile row.
        y: i32,
        /// Mirrored left to right.
        flip_h: bool,
        /// Mirrored top to bottom.
        flip_v: bool,
    },
    /// A map object. `position` is the object origin in screen space and
    /// `outline` is already rotated and projected.
    Object {
        /// Object id from the map.
        id: u32,
        /// Outline points in map screen space.
        outline: Vec<Vector2>,
        /// Whether the last point joins the first.
        closed: bool,
        /// Clockwise rotation in degrees, already applied to `outline`.
        rotation: f64,
        /// Fill drawn inside the outline.
        content: ObjectContent,
        /// Group colour, if the object layer sets one.
        color: Option<Color>,
    },
    /// An image layer, drawn at the layer translation.
    Image { source: String, size: Vector2 },
}

/// One thing to draw, positioned in map screen space before the layer
/// translation is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub position: Vector2,
    /// Paint key; lower depths are drawn first.
    pub depth: f64,
    pub kind: DrawKind,
}

/// Everything one layer contributes to a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerBatch {
    pub layer: LayerId,
    pub name: String,
    /// Position among the map's drawable layers, bottom first.
    pub slot: usize,
    /// Depth of the first command in this layer.
    pub base_depth: f64,
    /// Render offset plus parallax shift; add to every command position.
    pub translation: Vector2,
    pub tint: Color,
    pub opacity: f32,
    /// Commands in paint order.
    pub commands: Vec<DrawCommand>,
}

impl LayerBatch {
    /// Tint with the layer opacity folded into alpha.
    pub fn color(&self) -> Color {
        Color::new(self.tint.r, self.tint.g, self.tint.b, self.tint.a * self.opacity)
    }
}

/// A composed map, ready to be replayed into a [`DrawSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Map size in screen pixels.
    pub map_size: Point,
    /// Cell size in screen pixels, for sinks that bottom-align tall sprites.
    pub tile_size: Vector2,
    pub background: Option<Color>,
    /// One batch per drawable layer, bottom first.
    pub batches: Vec<LayerBatch>,
}

impl Frame {
    /// Number of commands across all batches.
    pub fn command_count(&self) -> usize {
        self.batches.iter().map(|b| b.commands.len()).sum()
    }

    /// All commands with their batch, in emission order.
    pub fn commands(&self) -> impl Iterator<Item = (&LayerBatch, &DrawCommand)> {
        self.batches
            .iter()
            .flat_map(|b| b.commands.iter().map(move |c| (b, c)))
    }

    /// Batch of one layer, if it produced any.
    pub fn batch(&self, layer: LayerId) -> Option<&LayerBatch> {
        self.batches.iter().find(|b| b.layer == layer)
    }

    /// Replays the frame into `sink`, layer by layer.
    pub fn submit<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        sink.begin_frame(self);
        for batch in &self.batches {
            sink.begin_layer(batch);
            for command in &batch.commands {
                sink.draw(batch, command);
            }
            sink.end_layer(batch);
        }
        sink.end_frame(self);
    }
}

/// Consumer of composed frames: a renderer, a physics builder, a test spy.
pub trait DrawSink {
    fn begin_frame(&mut self, _frame: &Frame) {}
    fn begin_layer(&mut self, _batch: &LayerBatch) {}
    fn draw(&mut self, batch: &LayerBatch, command: &DrawCommand);
    fn end_layer(&mut self, _batch: &LayerBatch) {}
    fn end_frame(&mut self, _frame: &Frame) {}
}
