//! Turns a map into per-layer draw commands.
//!
//! Each drawable layer gets a depth slot `slot * (layer_distance +
//! layer_gap)`; tiles and objects are spread over `[0, layer_distance]`
//! above it, so paint order inside a layer never crosses into the next one.
//! Bad objects are logged and skipped; the rest of the layer is still drawn.

use log::{debug, warn};

use crate::config::RenderConfig;
use crate::error::MapError;
use crate::geometry::Orientation;
use crate::layer::{ImageLayer, Layer, LayerId, LayerKind, TileLayer};
use crate::map::TiledMap;
use crate::math::Vector2;
use crate::object::{MapObject, ObjectGroup, ObjectShape, TileAnchor};
use crate::render::command::{DrawCommand, DrawKind, Frame, LayerBatch, ObjectContent};
use crate::render::cull::TileRect;
use crate::transform::{Projection, TransformEngine};
use crate::view::Camera;
use crate::visit::tile_depth;

/// Turns a [`TiledMap`] into a [`Frame`] for one projection.
pub struct Compositor<'e> {
    engine: &'e TransformEngine,
    config: RenderConfig,
    view: Option<TileRect>,
}

impl<'e> Compositor<'e> {
    /// Fails with the config's validation error.
    pub fn new(engine: &'e TransformEngine, config: RenderConfig) -> Result<Self, MapError> {
        config.validate()?;
        Ok(Compositor {
            engine,
            config,
            view: None,
        })
    }

    /// Restricts tile emission to `view`. Depths still come from the full
    /// traversal, so culling never reorders what remains.
    pub fn with_view(mut self, view: Option<TileRect>) -> Self {
        self.view = view;
        self
    }

    /// Culls to what `camera` can see, padded by the configured margin.
    pub fn culled_to(self, camera: &Camera) -> Self {
        let view = camera.visible_tiles(self.engine, self.config.cull_margin);
        self.with_view(view)
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Screen displacement of a layer with the given effective parallax
    /// factor when the camera is `distance` away from the parallax origin.
    pub fn parallax_shift(factor: Vector2, distance: Vector2) -> Vector2 {
        Vector2::new((1.0 - factor.x) * distance.x, (1.0 - factor.y) * distance.y)
    }

    /// One pass over the map. Invisible layers keep their slot but emit no
    /// batch, so toggling visibility never changes other layers' depths.
    pub fn compose(&self, map: &TiledMap, camera: Option<&Camera>) -> Frame {
        let tree = &map.layers;
        let distance = match camera {
            Some(cam) if self.config.parallax_enabled => cam.parallax_distance(self.engine, map.parallax_origin),
            _ => Vector2::ZERO,
        };

        let mut batches = Vec::new();
        for (slot, id) in tree.flatten().into_iter().enumerate() {
            let Some(layer) = tree.get(id) else { continue };
            if !tree.effective_visible(id) {
                continue;
            }

            let base_depth = self.config.slot_depth(slot);
            let parallax = Self::parallax_shift(tree.effective_parallax(id), distance);
            let commands = match layer.kind() {
                LayerKind::Tiles(tiles) => self.tile_commands(tiles, base_depth),
                LayerKind::Objects(group) => self.object_commands(layer, group, base_depth),
                LayerKind::Image(image) => image_commands(image, base_depth),
                LayerKind::Group => Vec::new(),
            };
            debug!(
                "composed layer '{}' (slot {}, depth {}): {} commands",
                layer.name,
                slot,
                base_depth,
                commands.len()
            );

            batches.push(LayerBatch {
                layer: id,
                name: layer.name.clone(),
                slot,
                base_depth,
                translation: tree.render_offset(id) + parallax,
                tint: tree.effective_tint(id),
                opacity: tree.effective_opacity(id),
                commands,
            });
        }

        let g = self.engine.geometry();
        Frame {
            map_size: self.engine.map_size(),
            tile_size: Vector2::new(g.tile_width as f64, g.tile_height as f64),
            background: map.background,
            batches,
        }
    }

    /// Commands for a single layer, or `None` if it is not drawable.
    pub fn compose_layer(&self, map: &TiledMap, id: LayerId) -> Option<Vec<DrawCommand>> {
        let slot = map.layers.flatten().iter().position(|&l| l == id)?;
        let layer = map.layers.get(id)?;
        let base_depth = self.config.slot_depth(slot);
        Some(match layer.kind() {
            LayerKind::Tiles(tiles) => self.tile_commands(tiles, base_depth),
            LayerKind::Objects(group) => self.object_commands(layer, group, base_depth),
            LayerKind::Image(image) => image_commands(image, base_depth),
            LayerKind::Group => return None,
        })
    }

    fn tile_commands(&self, tiles: &TileLayer, base_depth: f64) -> Vec<DrawCommand> {
        let g = self.engine.geometry();
        let count = g.tile_count();
        // isometric anchors are the top vertex; commands carry the box corner
        let shift = match g.orientation {
            Orientation::Isometric => Vector2::new(-(g.tile_width as f64) / 2.0, 0.0),
            _ => Vector2::ZERO,
        };

        self.engine
            .tiles()
            .filter(|v| self.view.map_or(true, |r| r.contains(v.x, v.y)))
            .filter_map(|v| {
                let tile = tiles.get_tile_at(v.x, v.y)?;
                Some(DrawCommand {
                    position: self.engine.tile_to_screen(v.x as f64, v.y as f64) + shift,
                    depth: base_depth + tile_depth(v.z, count, self.config.layer_distance),
                    kind: DrawKind::Tile {
                        tile,
                        x: v.x,
                        y: v.y,
                        flip_h: tile.flip_h(),
                        flip_v: tile.flip_v(),
                    },
                })
            })
            .collect()
    }

    fn object_commands(&self, layer: &Layer, group: &ObjectGroup, base_depth: f64) -> Vec<DrawCommand> {
        let sorted = group.sorted();
        let n = sorted.len().max(1) as f64;
        let mut out = Vec::with_capacity(sorted.len());
        for (i, object) in sorted.into_iter().enumerate() {
            if !object.visible {
                continue;
            }
            match self.object_command(object, group) {
                Ok(mut command) => {
                    command.depth = base_depth + i as f64 * self.config.layer_distance / n;
                    out.push(command);
                }
                Err(e) => warn!("skipping object in layer '{}': {}", layer.name, e),
            }
        }
        out
    }

    fn object_command(&self, object: &MapObject, group: &ObjectGroup) -> Result<DrawCommand, MapError> {
        let anchor = match self.engine.orientation() {
            Orientation::Isometric => TileAnchor::BottomCenter,
            _ => TileAnchor::BottomLeft,
        };
        let local = object.local_outline(self.config.ellipse_segments, anchor)?;
        let origin = self.engine.pixel_to_screen(object.x, object.y);

        let outline = match object.shape {
            // sprites stay upright on screen; only the anchor is projected
            ObjectShape::Tile(_) => local
                .points
                .iter()
                .map(|&p| origin + p.rotate_deg(object.rotation))
                .collect(),
            _ => local
                .points
                .iter()
                .map(|&p| {
                    let pixel = object.place(p);
                    self.engine.pixel_to_screen(pixel.x, pixel.y)
                })
                .collect(),
        };

        let content = match &object.shape {
            ObjectShape::Point => ObjectContent::Point,
            ObjectShape::Tile(tile) => ObjectContent::Tile(*tile),
            ObjectShape::Text(text) => ObjectContent::Text(text.clone()),
            ObjectShape::Image(source) => ObjectContent::Image(source.clone()),
            _ => ObjectContent::Outline,
        };

        Ok(DrawCommand {
            position: origin,
            depth: 0.0,
            kind: DrawKind::Object {
                id: object.id,
                outline,
                closed: local.closed,
                rotation: object.rotation,
                content,
                color: group.color,
            },
        })
    }
}

fn image_commands(image: &ImageLayer, base_depth: f64) -> Vec<DrawCommand> {
    vec![DrawCommand {
        position: Vector2::ZERO,
        depth: base_depth,
        kind: DrawKind::Image {
            source: image.source.clone(),
            size: Vector2::new(image.width, image.height),
        },
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MapGeometry;
    use crate::object::DrawOrder;
    use approx::assert_relative_eq;

    fn ortho_map() -> TiledMap {
        let mut map = TiledMap::new(MapGeometry::new(Orientation::Orthogonal, 2, 2, 16, 16)).expect("valid");
        map.layers
            .push_root(Layer::tiles("a", TileLayer::from_gids("a", 2, 2, vec![1, 1, 1, 1]).expect("sized")));
        map.layers
            .push_root(Layer::tiles("b", TileLayer::from_gids("b", 2, 2, vec![0, 2, 0, 0]).expect("sized")));
        map
    }

    #[test]
    fn layers_get_disjoint_depth_bands() {
        let map = ortho_map();
        let engine = map.engine().expect("valid");
        let config = RenderConfig {
            layer_gap: 4.0,
            ..RenderConfig::default()
        };
        let frame = Compositor::new(&engine, config).expect("valid config").compose(&map, None);

        assert_eq!(frame.batches.len(), 2);
        let a = &frame.batches[0];
        let b = &frame.batches[1];
        assert_eq!(a.commands.len(), 4);
        assert_eq!(b.commands.len(), 1);
        assert_relative_eq!(b.base_depth, 20.0);
        let a_max = a.commands.iter().map(|c| c.depth).fold(f64::MIN, f64::max);
        assert!(a_max <= a.base_depth + 16.0);
        assert_relative_eq!(a.commands[3].depth, 12.0);
        // z of the single tile in "b" is its position in the full traversal
        assert_relative_eq!(b.commands[0].depth, 20.0 + 4.0);
    }

    #[test]
    fn objects_are_spread_over_the_band() {
        let mut map = TiledMap::new(MapGeometry::new(Orientation::Orthogonal, 4, 4, 16, 16)).expect("valid");
        let group = ObjectGroup::new(DrawOrder::TopDown).with_objects(vec![
            MapObject::new(1, ObjectShape::Rectangle).at(0.0, 30.0).sized(4.0, 4.0),
            MapObject::new(2, ObjectShape::Polyline(vec![Vector2::ZERO])).at(0.0, 0.0),
            MapObject::new(3, ObjectShape::Point).at(8.0, 10.0),
            MapObject::new(4, ObjectShape::Unsupported("capsule".into())),
        ]);
        map.layers.push_root(Layer::objects("things", group));

        let engine = map.engine().expect("valid");
        let frame = Compositor::new(&engine, RenderConfig::default())
            .expect("valid config")
            .compose(&map, None);
        let commands = &frame.batches[0].commands;

        // the bad polyline and the unsupported shape are skipped
        assert_eq!(commands.len(), 2);
        let ids: Vec<u32> = commands
            .iter()
            .map(|c| match c.kind {
                DrawKind::Object { id, .. } => id,
                _ => 0,
            })
            .collect();
        assert_eq!(ids, vec![3, 1]);
        // sorted order: 2 and 4 (y 0), 3 (y 10), 1 (y 30)
        assert_relative_eq!(commands[0].depth, 2.0 * 16.0 / 4.0);
        assert_relative_eq!(commands[1].depth, 3.0 * 16.0 / 4.0);
    }

    #[test]
    fn parallax_factor_one_does_not_move() {
        let shift = Compositor::parallax_shift(Vector2::ONE, Vector2::new(120.0, -40.0));
        assert_eq!(shift, Vector2::ZERO);
        let shift = Compositor::parallax_shift(Vector2::new(0.0, 0.5), Vector2::new(120.0, -40.0));
        assert_eq!(shift, Vector2::new(120.0, -20.0));
    }
}
