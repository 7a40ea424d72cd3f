//! Reference [`DrawSink`] that paints through Macroquad's immediate-mode API.
//!
//! Textures are owned by the host: register one [`Sprite`] per gid and one
//! texture per image-layer source, then `submit` a frame and `flush` inside
//! the host's camera.

use std::collections::HashMap;

use macroquad::prelude::*;

use crate::grid::GridMesh;
use crate::math::{Point, Vector2};
use crate::render::command::{DrawCommand, DrawKind, DrawSink, Frame, LayerBatch, ObjectContent};

/// Commands kept in painter's order: ascending depth, ties in insertion order.
#[derive(Debug, Clone)]
pub struct DepthQueue<T> {
    items: Vec<(f64, T)>,
}

impl<T> Default for DepthQueue<T> {
    fn default() -> Self {
        DepthQueue { items: Vec::new() }
    }
}

impl<T> DepthQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item; order among equal depths is kept.
    pub fn push(&mut self, depth: f64, item: T) {
        self.items.push((depth, item));
    }

    #[inline] pub fn len(&self) -> usize { self.items.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Empties the queue, back to front.
    pub fn drain_sorted(&mut self) -> Vec<T> {
        let mut items = std::mem::take(&mut self.items);
        items.sort_by(|a, b| a.0.total_cmp(&b.0));
        items.into_iter().map(|(_, item)| item).collect()
    }
}

/// Region of a texture drawn for one gid.
#[derive(Clone)]
pub struct Sprite {
    pub texture: Texture2D,
    /// Sub-rectangle of an atlas; `None` draws the whole texture.
    pub source: Option<Rect>,
}

impl Sprite {
    fn size(&self) -> Vec2 {
        match self.source {
            Some(r) => vec2(r.w, r.h),
            None => vec2(self.texture.width(), self.texture.height()),
        }
    }
}

#[derive(Clone)]
struct Queued {
    command: DrawCommand,
    translation: Vector2,
    color: Color,
}

/// Queues a frame and paints it with Macroquad. Gids and image sources without a
/// registered texture are skipped.
pub struct MacroquadSink {
    sprites: HashMap<u32, Sprite>,
    images: HashMap<String, Texture2D>,
    queue: DepthQueue<Queued>,
    tile_size: Vector2,
    background: Option<(Color, Point)>,
    /// Added to everything drawn; set to `-view_min` to scroll with a camera.
    pub view_offset: Vector2,
    /// Colour of object outlines without a group colour.
    pub outline_color: Color,
    pub font_size: f32,
}

impl Default for MacroquadSink {
    fn default() -> Self {
        MacroquadSink {
            sprites: HashMap::new(),
            images: HashMap::new(),
            queue: DepthQueue::new(),
            tile_size: Vector2::ZERO,
            background: None,
            view_offset: Vector2::ZERO,
            outline_color: LIGHTGRAY,
            font_size: 16.0,
        }
    }
}

fn v(p: Vector2) -> Vec2 {
    p.into()
}

impl MacroquadSink {
    /// Sink with no textures registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the sprite drawn for `gid` (flip bits ignored).
    pub fn insert_sprite(&mut self, gid: u32, sprite: Sprite) {
        self.sprites.insert(gid, sprite);
    }

    /// Registers the texture drawn for an image layer or image object `source`.
    pub fn insert_image(&mut self, source: impl Into<String>, texture: Texture2D) {
        self.images.insert(source.into(), texture);
    }

    /// Commands waiting for the next [`MacroquadSink::flush`].
    #[inline]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Draws everything submitted since the last flush, back to front.
    pub fn flush(&mut self) {
        let view = self.view_offset;
        if let Some((color, size)) = self.background.take() {
            draw_rectangle(view.x as f32, view.y as f32, size.x as f32, size.y as f32, color);
        }
        for q in self.queue.drain_sorted() {
            let offset = q.translation + view;
            let pos = v(q.command.position + offset);
            match &q.command.kind {
                DrawKind::Tile {
                    tile, flip_h, flip_v, ..
                } => {
                    if let Some(sprite) = self.sprites.get(&tile.gid()) {
                        let size = sprite.size();
                        // tall sprites grow upwards from the cell's bottom edge
                        let y = pos.y + self.tile_size.y as f32 - size.y;
                        draw_texture_ex(
                            &sprite.texture,
                            pos.x,
                            y,
                            q.color,
                            DrawTextureParams {
                                source: sprite.source,
                                flip_x: *flip_h,
                                flip_y: *flip_v,
                                ..Default::default()
                            },
                        );
                    }
                }
                DrawKind::Object {
                    outline,
                    closed,
                    rotation,
                    content,
                    color,
                    ..
                } => {
                    let line = color.unwrap_or(self.outline_color);
                    match content {
                        ObjectContent::Point => {
                            draw_circle(pos.x, pos.y, 3.0, line);
                        }
                        ObjectContent::Tile(tile) => {
                            if let (Some(sprite), Some(&top_left)) = (self.sprites.get(&tile.gid()), outline.first()) {
                                let unrotated = (top_left - q.command.position).rotate_deg(-rotation);
                                let corner = v(q.command.position + unrotated + offset);
                                let size = outline
                                    .get(2)
                                    .map(|&br| (br - top_left).rotate_deg(-rotation))
                                    .unwrap_or(Vector2::ZERO);
                                draw_texture_ex(
                                    &sprite.texture,
                                    corner.x,
                                    corner.y,
                                    q.color,
                                    DrawTextureParams {
                                        source: sprite.source,
                                        dest_size: Some(v(size)),
                                        rotation: rotation.to_radians() as f32,
                                        pivot: Some(pos),
                                        flip_x: tile.flip_h(),
                                        flip_y: tile.flip_v(),
                                        ..Default::default()
                                    },
                                );
                            }
                        }
                        ObjectContent::Text(text) => {
                            if let Some(&top_left) = outline.first() {
                                let p = v(top_left + offset);
                                draw_text(text, p.x, p.y + self.font_size, self.font_size, line);
                            }
                        }
                        ObjectContent::Image(source) => {
                            if let (Some(texture), Some(&top_left)) = (self.images.get(source), outline.first()) {
                                let p = v(top_left + offset);
                                draw_texture(texture, p.x, p.y, q.color);
                            }
                        }
                        ObjectContent::Outline => {}
                    }
                    draw_polyline(outline, *closed, offset, line);
                }
                DrawKind::Image { source, .. } => {
                    if let Some(texture) = self.images.get(source) {
                        draw_texture(texture, pos.x, pos.y, q.color);
                    }
                }
            }
        }
    }

    /// Draws grid lines for a whole map.
    pub fn draw_grid(&self, mesh: &GridMesh, color: Color) {
        for (a, b) in mesh.lines() {
            let (a, b) = (v(a + self.view_offset), v(b + self.view_offset));
            draw_line(a.x, a.y, b.x, b.y, 1.0, color);
        }
    }
}

fn draw_polyline(points: &[Vector2], closed: bool, offset: Vector2, color: Color) {
    if points.len() < 2 {
        return;
    }
    let segments = points.windows(2).map(|w| (w[0], w[1]));
    let closing = (closed && points.len() > 2).then(|| (points[points.len() - 1], points[0]));
    for (a, b) in segments.chain(closing) {
        let (a, b) = (v(a + offset), v(b + offset));
        draw_line(a.x, a.y, b.x, b.y, 1.0, color);
    }
}

impl DrawSink for MacroquadSink {
    fn begin_frame(&mut self, frame: &Frame) {
        self.tile_size = frame.tile_size;
        self.background = frame.background.map(|c| (c, frame.map_size));
    }

    fn draw(&mut self, batch: &LayerBatch, command: &DrawCommand) {
        self.queue.push(
            command.depth,
            Queued {
                command: command.clone(),
                translation: batch.translation,
                color: batch.color(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_queue_is_stable_back_to_front() {
        let mut q = DepthQueue::new();
        q.push(2.0, "c");
        q.push(0.5, "a");
        q.push(2.0, "d");
        q.push(1.0, "b");
        assert_eq!(q.drain_sorted(), vec!["a", "b", "c", "d"]);
        assert!(q.is_empty());
    }

    #[test]
    fn submitted_frames_are_queued_not_drawn() {
        use crate::geometry::{MapGeometry, Orientation};
        use crate::layer::{Layer, TileLayer};
        use crate::map::TiledMap;
        use crate::render::compositor::Compositor;
        use crate::config::RenderConfig;

        let mut map = TiledMap::new(MapGeometry::new(Orientation::Isometric, 2, 2, 32, 16)).expect("valid");
        map.layers
            .push_root(Layer::tiles("floor", TileLayer::from_gids("floor", 2, 2, vec![1, 1, 1, 0]).expect("sized")));
        let engine = map.engine().expect("valid");
        let frame = Compositor::new(&engine, RenderConfig::default())
            .expect("valid config")
            .compose(&map, None);

        let mut sink = MacroquadSink::new();
        frame.submit(&mut sink);
        assert_eq!(sink.queued(), 3);
    }
}
