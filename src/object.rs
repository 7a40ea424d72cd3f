//! Objects placed in pixel space on object layers.

use macroquad::color::Color;
use std::f64::consts::TAU;

use crate::error::MapError;
use crate::math::Vector2;
use crate::tile::TileRef;

/// What an object looks like.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectShape {
    Rectangle,
    Ellipse,
    /// Single position, no extent.
    Point,
    /// Closed outline, points relative to the object origin.
    Polygon(Vec<Vector2>),
    /// Open outline, points relative to the object origin.
    Polyline(Vec<Vector2>),
    /// Tile sprite anchored at the object's bottom-left corner.
    Tile(TileRef),
    /// Free image, by source path.
    Image(String),
    Text(String),
    /// Anything this crate cannot draw; the name is kept for diagnostics.
    Unsupported(String),
}

impl ObjectShape {
    pub fn name(&self) -> &str {
        match self {
            ObjectShape::Rectangle => "rectangle",
            ObjectShape::Ellipse => "ellipse",
            ObjectShape::Point => "point",
            ObjectShape::Polygon(_) => "polygon",
            ObjectShape::Polyline(_) => "polyline",
            ObjectShape::Tile(_) => "tile",
            ObjectShape::Image(_) => "image",
            ObjectShape::Text(_) => "text",
            ObjectShape::Unsupported(name) => name,
        }
    }
}

/// Where a tile object's position sits on its sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAnchor {
    BottomLeft,
    /// Used on isometric maps.
    BottomCenter,
}

/// Outline points plus whether the last point joins the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub points: Vec<Vector2>,
    pub closed: bool,
}

/// A shape placed on the map, positioned in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    pub id: u32,
    pub name: String,
    /// Position in pixel space.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise, in degrees, around `(x, y)`.
    pub rotation: f64,
    pub visible: bool,
    pub shape: ObjectShape,
}

impl MapObject {
    pub fn new(id: u32, shape: ObjectShape) -> Self {
        MapObject {
            id,
            name: String::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            visible: true,
            shape,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    #[inline]
    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Unrotated outline relative to the object origin.
    ///
    /// Fails for shapes that cannot be drawn: polygons with fewer than three
    /// points, polylines with fewer than two, tile objects without a gid and
    /// unsupported shapes.
    pub fn local_outline(&self, ellipse_segments: usize, anchor: TileAnchor) -> Result<Outline, MapError> {
        let (w, h) = (self.width, self.height);
        let boxed = |points: Vec<Vector2>| Outline { points, closed: true };
        let outline = match &self.shape {
            ObjectShape::Rectangle | ObjectShape::Text(_) | ObjectShape::Image(_) => boxed(vec![
                Vector2::ZERO,
                Vector2::new(w, 0.0),
                Vector2::new(w, h),
                Vector2::new(0.0, h),
            ]),
            ObjectShape::Ellipse => {
                let (rx, ry) = (w / 2.0, h / 2.0);
                let segments = ellipse_segments.max(3);
                boxed(
                    (0..segments)
                        .map(|i| {
                            let a = TAU * i as f64 / segments as f64;
                            Vector2::new(rx + rx * a.cos(), ry + ry * a.sin())
                        })
                        .collect(),
                )
            }
            ObjectShape::Point => Outline {
                points: vec![Vector2::ZERO],
                closed: false,
            },
            ObjectShape::Polygon(points) => {
                if points.len() < 3 {
                    return Err(self.malformed(format!("polygon has {} points", points.len())));
                }
                boxed(points.clone())
            }
            ObjectShape::Polyline(points) => {
                if points.len() < 2 {
                    return Err(self.malformed(format!("polyline has {} points", points.len())));
                }
                Outline {
                    points: points.clone(),
                    closed: false,
                }
            }
            ObjectShape::Tile(tile) => {
                if tile.is_empty() {
                    return Err(self.malformed("tile object without a gid".to_owned()));
                }
                let left = match anchor {
                    TileAnchor::BottomLeft => 0.0,
                    TileAnchor::BottomCenter => -w / 2.0,
                };
                boxed(vec![
                    Vector2::new(left, -h),
                    Vector2::new(left + w, -h),
                    Vector2::new(left + w, 0.0),
                    Vector2::new(left, 0.0),
                ])
            }
            ObjectShape::Unsupported(kind) => {
                return Err(self.malformed(format!("unsupported shape '{}'", kind)));
            }
        };
        Ok(outline)
    }

    /// Applies the object's rotation and position to a local point.
    #[inline]
    pub fn place(&self, local: Vector2) -> Vector2 {
        local.rotate_deg(self.rotation) + self.position()
    }

    fn malformed(&self, reason: String) -> MapError {
        MapError::MalformedObject { id: self.id, reason }
    }
}

/// Order objects of one layer are painted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawOrder {
    /// Ascending object id.
    Index,
    /// Ascending y: objects further up are painted first.
    #[default]
    TopDown,
}

impl From<&str> for DrawOrder {
    /// Unknown spellings fall back to [`DrawOrder::TopDown`].
    fn from(s: &str) -> Self {
        match s {
            "index" => DrawOrder::Index,
            _ => DrawOrder::TopDown,
        }
    }
}

/// Objects of one object layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectGroup {
    pub draw_order: DrawOrder,
    /// Editor colour for outlines, if set.
    pub color: Option<Color>,
    pub objects: Vec<MapObject>,
}

impl ObjectGroup {
    pub fn new(draw_order: DrawOrder) -> Self {
        ObjectGroup {
            draw_order,
            color: None,
            objects: Vec::new(),
        }
    }

    pub fn with_objects(mut self, objects: Vec<MapObject>) -> Self {
        self.objects = objects;
        self
    }

    /// Objects in paint order. Ties keep their position in the layer.
    pub fn sorted(&self) -> Vec<&MapObject> {
        let mut out: Vec<&MapObject> = self.objects.iter().collect();
        match self.draw_order {
            DrawOrder::Index => out.sort_by_key(|o| o.id),
            DrawOrder::TopDown => out.sort_by(|a, b| a.y.total_cmp(&b.y)),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(group: &ObjectGroup) -> Vec<u32> {
        group.sorted().iter().map(|o| o.id).collect()
    }

    #[test]
    fn topdown_sort_is_stable() {
        let group = ObjectGroup::new(DrawOrder::TopDown).with_objects(vec![
            MapObject::new(1, ObjectShape::Rectangle).at(0.0, 50.0),
            MapObject::new(2, ObjectShape::Rectangle).at(0.0, 10.0),
            MapObject::new(3, ObjectShape::Rectangle).at(0.0, 50.0),
            MapObject::new(4, ObjectShape::Rectangle).at(0.0, 10.0),
        ]);
        assert_eq!(ids(&group), vec![2, 4, 1, 3]);
    }

    #[test]
    fn index_sort_uses_ids() {
        let group = ObjectGroup::new(DrawOrder::Index).with_objects(vec![
            MapObject::new(9, ObjectShape::Point).at(0.0, 0.0),
            MapObject::new(3, ObjectShape::Point).at(0.0, 90.0),
        ]);
        assert_eq!(ids(&group), vec![3, 9]);
    }

    #[test]
    fn unknown_draw_order_falls_back_to_topdown() {
        assert_eq!(DrawOrder::from("index"), DrawOrder::Index);
        assert_eq!(DrawOrder::from("manual"), DrawOrder::TopDown);
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        let poly = MapObject::new(5, ObjectShape::Polygon(vec![Vector2::ZERO, Vector2::ONE]));
        assert!(matches!(
            poly.local_outline(16, TileAnchor::BottomLeft),
            Err(MapError::MalformedObject { id: 5, .. })
        ));
        let tile = MapObject::new(6, ObjectShape::Tile(TileRef::EMPTY));
        assert!(tile.local_outline(16, TileAnchor::BottomLeft).is_err());
    }

    #[test]
    fn tile_objects_hang_above_their_anchor() {
        let obj = MapObject::new(1, ObjectShape::Tile(TileRef(3))).sized(32.0, 16.0);
        let out = obj.local_outline(16, TileAnchor::BottomCenter).expect("drawable");
        assert_eq!(out.points[0], Vector2::new(-16.0, -16.0));
        assert_eq!(out.points[2], Vector2::new(16.0, 0.0));
    }

    #[test]
    fn ellipse_has_requested_segments() {
        let obj = MapObject::new(1, ObjectShape::Ellipse).sized(20.0, 10.0);
        let out = obj.local_outline(12, TileAnchor::BottomLeft).expect("drawable");
        assert_eq!(out.points.len(), 12);
        assert_eq!(out.points[0], Vector2::new(20.0, 5.0));
        assert!(out.closed);
    }
}
