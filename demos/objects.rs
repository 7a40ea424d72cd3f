use macroquad::prelude::*;
use tiled_projection::{
    Camera, Compositor, DrawKind, LayerKind, MacroquadSink, Orientation, Projection, RenderConfig, Sprite, TiledMap,
    TransformEngine, Vector2,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Objects Example".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

const MAP: &str = r##"
{
  "orientation": "isometric",
  "width": 10, "height": 10,
  "tilewidth": 64, "tileheight": 32,
  "backgroundcolor": "#202830",
  "layers": [
    { "type": "tilelayer", "name": "floor", "data": [
      1,1,1,1,1,1,1,1,1,1, 1,2,2,2,1,1,1,1,1,1, 1,2,2,2,1,1,1,1,1,1, 1,1,1,1,1,1,1,1,1,1,
      1,1,1,1,1,1,2,2,1,1, 1,1,1,1,1,1,2,2,1,1, 1,1,1,1,1,1,1,1,1,1, 1,1,1,1,1,1,1,1,1,1,
      1,1,1,1,1,1,1,1,1,1, 1,1,1,1,1,1,1,1,1,1 ] },
    { "type": "objectgroup", "name": "things", "draworder": "topdown", "color": "#ffe066",
      "objects": [
        { "id": 1, "name": "pen", "x": 32, "y": 32, "width": 96, "height": 64 },
        { "id": 2, "name": "pond", "x": 160, "y": 96, "width": 64, "height": 64, "ellipse": true },
        { "id": 3, "name": "path", "x": 32, "y": 200, "polyline": [
            { "x": 0, "y": 0 }, { "x": 64, "y": 32 }, { "x": 160, "y": 32 }, { "x": 224, "y": 96 } ] },
        { "id": 4, "name": "field", "x": 200, "y": 200, "polygon": [
            { "x": 0, "y": 0 }, { "x": 96, "y": 0 }, { "x": 64, "y": 64 } ] },
        { "id": 5, "name": "spawn", "x": 96, "y": 160, "point": true },
        { "id": 6, "name": "crate", "gid": 3, "x": 128, "y": 128, "width": 64, "height": 32 },
        { "id": 7, "name": "sign", "x": 256, "y": 32, "width": 96, "height": 24,
          "text": { "text": "welcome" } },
        { "id": 8, "name": "broken", "x": 0, "y": 0, "polygon": [ { "x": 0, "y": 0 } ] }
      ] }
  ]
}
"##;

fn sprite(width: f32, height: f32, color: Color) -> Sprite {
    let image = Image::gen_image_color(width as u16, height as u16, color);
    Sprite {
        texture: Texture2D::from_image(&image),
        source: None,
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let mut map = TiledMap::from_json_str(MAP).expect("Failed to load map");
    let mut engine = map.engine().expect("Invalid map geometry");

    let things = map.layers.find("things").expect("object layer");
    if let Some(LayerKind::Objects(group)) = map.layers.get(things).map(|l| l.kind()) {
        println!("objects={}", group.objects.len());
    }

    let mut sink = MacroquadSink::new();
    sink.insert_sprite(1, sprite(64.0, 32.0, DARKGREEN));
    sink.insert_sprite(2, sprite(64.0, 32.0, DARKBROWN));
    sink.insert_sprite(3, sprite(64.0, 32.0, ORANGE));

    let mut camera = Camera::new(Vector2::new(screen_width() as f64, screen_height() as f64));
    camera.move_to_tile(&engine, 4, 4);
    let mut spin = 0.0;

    loop {
        if is_key_pressed(KeyCode::Space) {
            let next = match engine.orientation() {
                Orientation::Isometric => Orientation::Orthogonal,
                _ => Orientation::Isometric,
            };
            if let Ok(e) = TransformEngine::for_orientation(next, &map.geometry) {
                engine = e;
                map.geometry = engine.geometry().clone();
                camera.move_to_tile(&engine, 4, 4);
            }
        }
        if is_key_down(KeyCode::R) {
            spin += 90.0 * get_frame_time() as f64;
            if let Some(group) = map.layers.get_mut(things).and_then(|l| l.object_group_mut()) {
                for object in group.objects.iter_mut().filter(|o| o.name == "pen" || o.name == "crate") {
                    object.rotation = spin;
                }
            }
        }

        clear_background(BLACK);

        let frame = Compositor::new(&engine, RenderConfig::default())
            .expect("Default config is valid")
            .compose(&map, Some(&camera));
        let objects = frame
            .commands()
            .filter(|(_, c)| matches!(c.kind, DrawKind::Object { .. }))
            .count();

        sink.view_offset = -camera.view_rect().0;
        frame.submit(&mut sink);
        sink.flush();

        draw_text(
            &format!("{:?}  {} objects drawn  (space: orientation, R: rotate)", engine.orientation(), objects),
            20.0,
            30.0,
            28.0,
            WHITE,
        );
        next_frame().await;
    }
}
