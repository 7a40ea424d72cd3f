// tests/map_tests.rs

use macroquad::color::{Color, WHITE};
use tiled_projection::{
    Layer, LayerKind, MapError, MapGeometry, ObjectGroup, Orientation, TileLayer, TileRef, TiledMap, Vector2,
};

const BAD_LAYER_SIZE: &str = r#"
{
  "orientation": "orthogonal",
  "width": 2,
  "height": 2,
  "tilewidth": 8,
  "tileheight": 8,
  "layers": [
    { "type": "tilelayer", "name": "oops", "data": [1, 2, 3] }
  ]
}
"#;

#[test]
fn error_on_layer_size_mismatch() {
    let err = TiledMap::from_json_str(BAD_LAYER_SIZE).unwrap_err();
    assert!(matches!(
        err,
        MapError::InvalidLayerSize { ref layer, expected: 4, actual: 3 } if layer == "oops"
    ));
}

const JSON_WITH_EXTRA: &str = r#"
{
  "orientation": "orthogonal",
  "width": 1, "height": 1,
  "tilewidth": 8, "tileheight": 8,
  "dummyField": "ignored",
  "layers": [
    {
      "type": "tilelayer",
      "name": "L",
      "data": [0],
      "opacity": 0.5,
      "properties": []
    }
  ]
}
"#;

#[test]
fn ignores_unknown_fields() {
    let map = TiledMap::from_json_str(JSON_WITH_EXTRA).expect("extra fields are ignored");
    let id = map.layers.find("L").expect("layer L");
    assert_eq!(map.layers.effective_opacity(id), 0.5);
    let tiles = map.tile_layer(id).expect("tile layer");
    assert_eq!(tiles.get_tile_at(0, 0), None);
}

#[test]
fn empty_layer_names_are_allowed() {
    let json = r#"{ "orientation": "isometric", "width": 1, "height": 1,
        "tilewidth": 64, "tileheight": 32,
        "layers": [ { "type": "tilelayer", "data": [5] } ] }"#;
    let map = TiledMap::from_json_str(json).expect("unnamed layer");
    let id = map.layers.find("").expect("found by empty name");
    assert_eq!(map.layers.get(id).map(|l| l.name.as_str()), Some(""));
}

fn nested() -> (TiledMap, [tiled_projection::LayerId; 4]) {
    let mut map = TiledMap::new(MapGeometry::new(Orientation::Orthogonal, 3, 3, 16, 16)).expect("valid");
    let ground = map.layers.push_root(Layer::tiles("ground", TileLayer::new(3, 3)));
    let outer = map.layers.push_root(
        Layer::group("outer")
            .with_offset(10.0, 0.0)
            .with_parallax(0.5, 1.0)
            .with_opacity(0.5),
    );
    let inner = map
        .layers
        .push_child(outer, Layer::group("inner").with_offset(0.0, 5.0).with_parallax(0.5, 0.5))
        .expect("outer is a group");
    let props = map
        .layers
        .push_child(
            inner,
            Layer::objects("props", ObjectGroup::default())
                .with_offset(1.0, 1.0)
                .with_opacity(0.5),
        )
        .expect("inner is a group");
    (map, [ground, outer, inner, props])
}

#[test]
fn group_properties_compose_down_the_tree() {
    let (map, [ground, _, _, props]) = nested();
    let tree = &map.layers;

    assert_eq!(tree.render_offset(props), Vector2::new(11.0, 6.0));
    assert_eq!(tree.effective_parallax(props), Vector2::new(0.25, 0.5));
    assert_eq!(tree.effective_opacity(props), 0.25);
    assert_eq!(tree.effective_tint(props), WHITE);

    assert_eq!(tree.render_offset(ground), Vector2::ZERO);
    assert_eq!(tree.effective_parallax(ground), Vector2::ONE);
}

#[test]
fn hidden_or_locked_groups_cascade() {
    let (mut map, [ground, outer, inner, props]) = nested();
    map.layers.get_mut(outer).expect("outer").visible = false;
    map.layers.get_mut(inner).expect("inner").locked = true;

    assert!(!map.layers.effective_visible(props));
    assert!(map.layers.effective_locked(props));
    assert!(map.layers.effective_visible(ground));
    assert!(!map.layers.effective_locked(ground));
    // the layer's own flags are untouched
    assert!(map.layers.get(props).expect("props").visible);
}

#[test]
fn nearest_tint_wins() {
    let (mut map, [_, outer, inner, props]) = nested();
    let red = Color::from_rgba(255, 0, 0, 255);
    let blue = Color::from_rgba(0, 0, 255, 255);
    map.layers.get_mut(outer).expect("outer").tint = Some(red);
    assert_eq!(map.layers.effective_tint(props), red);
    map.layers.get_mut(inner).expect("inner").tint = Some(blue);
    assert_eq!(map.layers.effective_tint(props), blue);
}

#[test]
fn flatten_skips_groups_and_keeps_map_order() {
    let (mut map, [ground, outer, _, props]) = nested();
    let top = map.layers.push_root(Layer::tiles("top", TileLayer::new(3, 3)));
    assert_eq!(map.layers.flatten(), vec![ground, props, top]);
    assert_eq!(map.layers.roots(), &[ground, outer, top]);

    let names: Vec<&str> = map.layers.ancestors(props).map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["inner", "outer"]);
}

#[test]
fn children_attach_only_to_groups() {
    let (mut map, [ground, ..]) = nested();
    let err = map.layers.push_child(ground, Layer::group("nope")).unwrap_err();
    assert!(matches!(err, MapError::NotAGroup(id) if id == ground));
}

#[test]
fn tile_layers_are_editable_in_place() {
    let (mut map, [ground, ..]) = nested();
    let tiles = map
        .layers
        .get_mut(ground)
        .and_then(Layer::tile_layer_mut)
        .expect("ground holds tiles");
    assert_eq!(tiles.set_tile_at(2, 1, TileRef(9)), Some(TileRef::EMPTY));
    assert_eq!(tiles.set_tile_at(2, 1, TileRef(4)), Some(TileRef(9)));
    assert_eq!(tiles.set_tile_at(3, 1, TileRef(4)), None);

    let layer = map.layers.get(ground).expect("ground");
    let LayerKind::Tiles(tiles) = layer.kind() else {
        panic!("ground should be a tile layer");
    };
    assert_eq!(tiles.get_tile_at(2, 1), Some(TileRef(4)));
    assert_eq!(tiles.get_tile_at(-1, 0), None);
}
