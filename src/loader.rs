//! Builds a [`TiledMap`] from Tiled's JSON map format, held in memory.
//!
//! Only what the projections and the compositor read is decoded: geometry,
//! the layer tree with its display properties, tile data in CSV/array form
//! and object shapes. Custom properties, tilesets and infinite-map chunks
//! are ignored.

use macroquad::color::Color;
use serde::Deserialize;

use crate::error::MapError;
use crate::geometry::MapGeometry;
use crate::layer::{ImageLayer, Layer, LayerId, LayerTree, TileLayer};
use crate::map::TiledMap;
use crate::math::Vector2;
use crate::object::{DrawOrder, MapObject, ObjectGroup, ObjectShape};
use crate::tile::TileRef;

#[derive(Deserialize)]
struct JsonMap {
    #[serde(flatten)]
    geometry: MapGeometry,
    #[serde(default)]
    layers: Vec<JsonLayer>,
    #[serde(default)]
    parallaxoriginx: f64,
    #[serde(default)]
    parallaxoriginy: f64,
    #[serde(default)]
    backgroundcolor: Option<String>,
}

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    locked: bool,
    #[serde(default = "one")]
    opacity: f32,
    #[serde(default)]
    tintcolor: Option<String>,
    #[serde(default)]
    offsetx: f64,
    #[serde(default)]
    offsety: f64,
    #[serde(default = "one_f64")]
    parallaxx: f64,
    #[serde(default = "one_f64")]
    parallaxy: f64,
    // tilelayer
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    // objectgroup
    #[serde(default)]
    draworder: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    objects: Vec<JsonObject>,
    // imagelayer
    #[serde(default)]
    image: String,
    #[serde(default)]
    imagewidth: f64,
    #[serde(default)]
    imageheight: f64,
    // group
    #[serde(default)]
    layers: Vec<JsonLayer>,
}

fn default_true() -> bool {
    true
}
fn one() -> f32 {
    1.0
}
fn one_f64() -> f64 {
    1.0
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    rotation: f64,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    ellipse: bool,
    #[serde(default)]
    point: bool,
    #[serde(default)]
    polygon: Option<Vec<JsonObjectPoint>>,
    #[serde(default)]
    polyline: Option<Vec<JsonObjectPoint>>,
    #[serde(default)]
    gid: Option<u32>,
    #[serde(default)]
    text: Option<JsonText>,
    #[serde(default)]
    template: Option<String>,
}

#[derive(Deserialize)]
struct JsonObjectPoint {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct JsonText {
    #[serde(default)]
    text: String,
}

fn points(raw: Vec<JsonObjectPoint>) -> Vec<Vector2> {
    raw.into_iter().map(|p| Vector2::new(p.x, p.y)).collect()
}

fn object_from_json(obj: JsonObject) -> MapObject {
    let shape = if let Some(gid) = obj.gid {
        ObjectShape::Tile(TileRef(gid))
    } else if obj.point {
        ObjectShape::Point
    } else if obj.ellipse {
        ObjectShape::Ellipse
    } else if let Some(poly) = obj.polygon {
        ObjectShape::Polygon(points(poly))
    } else if let Some(line) = obj.polyline {
        ObjectShape::Polyline(points(line))
    } else if let Some(text) = obj.text {
        ObjectShape::Text(text.text)
    } else if obj.template.is_some() {
        ObjectShape::Unsupported("template".to_owned())
    } else {
        ObjectShape::Rectangle
    };

    MapObject {
        id: obj.id,
        name: obj.name,
        x: obj.x,
        y: obj.y,
        width: obj.width,
        height: obj.height,
        rotation: obj.rotation,
        visible: obj.visible,
        shape,
    }
}

/// Parses `#RRGGBB` or `#AARRGGBB`, the forms Tiled writes.
pub fn parse_color(value: &str) -> Result<Color, MapError> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    let bad = || MapError::UnknownValue {
        kind: "colour",
        value: value.to_owned(),
    };
    if !hex.is_ascii() {
        return Err(bad());
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
    match hex.len() {
        6 => Ok(Color::from_rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Ok(Color::from_rgba(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
        _ => Err(bad()),
    }
}

fn parse_optional_color(value: Option<&str>) -> Result<Option<Color>, MapError> {
    value.map(parse_color).transpose()
}

fn layer_from_json(
    tree: &mut LayerTree,
    parent: Option<LayerId>,
    mut json: JsonLayer,
    geometry: &MapGeometry,
) -> Result<(), MapError> {
    let children = std::mem::take(&mut json.layers);
    let name = json.name;

    let mut layer = match json.kind.as_str() {
        "tilelayer" => {
            let width = if json.width == 0 { geometry.width } else { json.width };
            let height = if json.height == 0 { geometry.height } else { json.height };
            Layer::tiles(name.clone(), TileLayer::from_gids(&name, width, height, json.data)?)
        }
        "objectgroup" => {
            let mut group = ObjectGroup::new(json.draworder.as_deref().map(DrawOrder::from).unwrap_or_default());
            group.color = parse_optional_color(json.color.as_deref())?;
            group.objects = json.objects.into_iter().map(object_from_json).collect();
            Layer::objects(name, group)
        }
        "imagelayer" => Layer::image(
            name,
            ImageLayer {
                source: json.image,
                width: json.imagewidth,
                height: json.imageheight,
            },
        ),
        "group" => Layer::group(name),
        other => {
            return Err(MapError::UnknownValue {
                kind: "layer type",
                value: other.to_owned(),
            })
        }
    };

    layer.visible = json.visible;
    layer.locked = json.locked;
    layer.opacity = json.opacity;
    layer.tint = parse_optional_color(json.tintcolor.as_deref())?;
    layer.offset = Vector2::new(json.offsetx, json.offsety);
    layer.parallax = Vector2::new(json.parallaxx, json.parallaxy);

    let id = match parent {
        Some(p) => tree.push_child(p, layer)?,
        None => tree.push_root(layer),
    };
    for child in children {
        layer_from_json(tree, Some(id), child, geometry)?;
    }
    Ok(())
}

pub(crate) fn decode_map(json: &str) -> Result<TiledMap, MapError> {
    let j: JsonMap = serde_json::from_str(json)?;
    let mut map = TiledMap::new(j.geometry)?;
    map.parallax_origin = Vector2::new(j.parallaxoriginx, j.parallaxoriginy);
    map.background = parse_optional_color(j.backgroundcolor.as_deref())?;
    for layer in j.layers {
        layer_from_json(&mut map.layers, None, layer, &map.geometry)?;
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerKind;

    const MAP: &str = r##"
    {
      "orientation": "hexagonal",
      "width": 2, "height": 2,
      "tilewidth": 32, "tileheight": 28,
      "hexsidelength": 14, "staggeraxis": "x", "staggerindex": "even",
      "parallaxoriginx": 10, "parallaxoriginy": 20,
      "backgroundcolor": "#102030",
      "tilesets": [],
      "layers": [
        { "type": "tilelayer", "name": "ground", "data": [1, 2, 0, 2147483651] },
        { "type": "group", "name": "fx", "tintcolor": "#80ff0000", "parallaxx": 0.5,
          "layers": [
            { "type": "objectgroup", "name": "things", "draworder": "index",
              "objects": [
                { "id": 3, "x": 5, "y": 6, "ellipse": true, "width": 4, "height": 4 },
                { "id": 1, "polygon": [{"x":0,"y":0},{"x":4,"y":0},{"x":0,"y":4}] },
                { "id": 2, "gid": 7, "width": 32, "height": 28 }
              ] },
            { "type": "imagelayer", "name": "sky", "image": "sky.png", "imagewidth": 64 }
          ] }
      ]
    }
    "##;

    #[test]
    fn decodes_nested_layers() {
        let map = decode_map(MAP).expect("valid map");
        assert_eq!(map.geometry.hex_side_length, 14);
        assert_eq!(map.parallax_origin, Vector2::new(10.0, 20.0));
        assert_eq!(map.background, Some(Color::from_rgba(0x10, 0x20, 0x30, 255)));
        assert_eq!(map.layers.len(), 4);

        let ground = map.layers.find("ground").expect("ground layer");
        let LayerKind::Tiles(tiles) = map.layers.get(ground).expect("exists").kind() else {
            panic!("ground should be a tile layer");
        };
        let flipped = tiles.get_tile_at(1, 1).expect("flipped tile");
        assert_eq!(flipped.gid(), 3);
        assert!(flipped.flip_h());

        let things = map.layers.find("things").expect("object layer");
        assert_eq!(map.layers.effective_parallax(things), Vector2::new(0.5, 1.0));
        assert_eq!(map.layers.effective_tint(things), Color::from_rgba(255, 0, 0, 0x80));
        let LayerKind::Objects(group) = map.layers.get(things).expect("exists").kind() else {
            panic!("things should be an object layer");
        };
        assert_eq!(group.draw_order, DrawOrder::Index);
        assert!(matches!(group.objects[1].shape, ObjectShape::Polygon(ref p) if p.len() == 3));
        assert!(matches!(group.objects[2].shape, ObjectShape::Tile(TileRef(7))));
    }

    #[test]
    fn rejects_unknown_layer_type() {
        let json = r#"{ "orientation": "orthogonal", "width": 1, "height": 1,
            "tilewidth": 8, "tileheight": 8, "layers": [ { "type": "blob" } ] }"#;
        assert!(matches!(
            decode_map(json),
            Err(MapError::UnknownValue { kind: "layer type", .. })
        ));
    }

    #[test]
    fn colours_accept_both_tiled_forms() {
        assert_eq!(parse_color("#ff0000").expect("rgb"), Color::from_rgba(255, 0, 0, 255));
        assert_eq!(parse_color("00ff0000").expect("argb"), Color::from_rgba(255, 0, 0, 0));
        assert!(parse_color("#12345").is_err());
    }
}
