// tests/load_tests.rs

use tiled_projection::{
    DrawOrder, LayerKind, MapError, MapGeometry, ObjectShape, Orientation, Point, Projection, RenderConfig, RenderOrder,
    StaggerAxis, StaggerIndex, TiledMap,
};

const HEX_MAP: &str = r#"
{
    "orientation": "hexagonal",
    "renderorder": "left-up",
    "width": 3,
    "height": 2,
    "tilewidth": 32,
    "tileheight": 28,
    "hexsidelength": 14,
    "staggeraxis": "x",
    "staggerindex": "even",
    "infinite": false,
    "layers": [
        { "type": "tilelayer", "name": "ground", "width": 3, "height": 2, "data": [1, 0, 2, 0, 3, 0] },
        { "type": "objectgroup", "name": "spawns", "draworder": "index", "objects": [
            { "id": 4, "name": "start", "x": 16, "y": 28, "point": true },
            { "id": 5, "x": 0, "y": 0, "polyline": [ { "x": 0, "y": 0 }, { "x": 32, "y": 0 } ] }
        ] }
    ]
}
"#;

#[test]
fn map_and_header_agree() {
    let map = TiledMap::from_json_str(HEX_MAP).expect("should parse inline JSON");
    assert_eq!(map.geometry.width, 3);
    let header = MapGeometry::from_json_str(HEX_MAP).unwrap();
    assert_eq!(map.geometry, header);
}

#[test]
fn geometry_header_is_read_in_full() {
    let g = MapGeometry::from_json_str(HEX_MAP).expect("valid header");
    assert_eq!(g.orientation, Orientation::Hexagonal);
    assert_eq!(g.render_order, RenderOrder::LeftUp);
    assert_eq!(g.stagger_axis, StaggerAxis::X);
    assert_eq!(g.stagger_index, StaggerIndex::Even);
    assert_eq!(g.hex_side_length, 14);
}

#[test]
fn layers_and_objects_are_decoded() {
    let map = TiledMap::from_json_str(HEX_MAP).expect("valid map");
    let ground = map.layers.find("ground").expect("ground");
    assert_eq!(map.tile_layer(ground).map(|t| t.tile_count()), Some(3));

    let spawns = map.layers.find("spawns").expect("spawns");
    let LayerKind::Objects(group) = map.layers.get(spawns).expect("exists").kind() else {
        panic!("spawns should be an object layer");
    };
    assert_eq!(group.draw_order, DrawOrder::Index);
    assert_eq!(group.objects[0].name, "start");
    assert_eq!(group.objects[0].shape, ObjectShape::Point);
    assert!(matches!(group.objects[1].shape, ObjectShape::Polyline(ref p) if p.len() == 2));

    // the decoded map drives the hex projection directly
    let engine = map.engine().expect("valid geometry");
    let start = engine.pixel_to_tile(group.objects[0].x, group.objects[0].y);
    assert_eq!(start, Point::new(0, 0));
}

#[test]
fn render_config_from_json() {
    let config = RenderConfig::from_json_str(r#"{ "layer_distance": 8, "parallax_enabled": false }"#)
        .expect("valid config");
    assert_eq!(config.layer_distance, 8.0);
    assert!(!config.parallax_enabled);
    assert_eq!(config.ellipse_segments, RenderConfig::default().ellipse_segments);
}

#[test]
fn unknown_orientation_is_rejected() {
    let json = r#"{ "orientation": "triangular", "width": 1, "height": 1,
        "tilewidth": 8, "tileheight": 8 }"#;
    assert!(matches!(MapGeometry::from_json_str(json), Err(MapError::Json(_))));

    let err = "triangular".parse::<Orientation>().unwrap_err();
    match err {
        MapError::UnknownValue { kind, value } => {
            assert_eq!(kind, "orientation");
            assert_eq!(value, "triangular");
        }
        other => panic!("expected UnknownValue, got {:?}", other),
    }
}

#[test]
fn oversized_hex_side_is_rejected() {
    let json = HEX_MAP.replace(r#""hexsidelength": 14"#, r#""hexsidelength": 40"#);
    let err = TiledMap::from_json_str(&json).unwrap_err();
    assert!(matches!(err, MapError::InvalidHexSideLength { side: 40, tile: 32 }));
}

#[test]
fn malformed_json_is_reported() {
    let err = TiledMap::from_json_str("{ \"width\": ").unwrap_err();
    assert!(matches!(err, MapError::Json(_)));
    assert!(err.to_string().starts_with("JSON"));
}
