use macroquad::prelude::*;
use tiled_projection::{
    Camera, Compositor, GridMesh, Layer, MacroquadSink, MapGeometry, Orientation, Projection, RenderConfig, Sprite,
    StaggerAxis, StaggerIndex, TileLayer, TiledMap, TransformEngine, Vector2,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Tiled Projection Viewer".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

const PALETTE: [Color; 4] = [DARKGREEN, GREEN, BEIGE, DARKGRAY];

fn build_map() -> anyhow::Result<TiledMap> {
    let (w, h) = (24u32, 18u32);
    let geometry = MapGeometry::new(Orientation::Isometric, w, h, 64, 32)
        .with_stagger(StaggerAxis::Y, StaggerIndex::Odd)
        .with_hex_side_length(16);
    let mut map = TiledMap::new(geometry)?;
    let ground: Vec<u32> = (0..w * h).map(|i| 1 + (i * 7 / 5) % 3).collect();
    map.layers
        .push_root(Layer::tiles("ground", TileLayer::from_gids("ground", w, h, ground)?));
    let walls: Vec<u32> = (0..w * h)
        .map(|i| if i % w == 3 || i / w == 5 { 4 } else { 0 })
        .collect();
    let group = map.layers.push_root(Layer::group("overlay").with_parallax(0.8, 0.8));
    map.layers
        .push_child(group, Layer::tiles("walls", TileLayer::from_gids("walls", w, h, walls)?))?;
    map.background = Some(Color::from_rgba(20, 24, 32, 255));
    Ok(map)
}

/// Solid cell sprite, masked to a diamond for diamond-shaped cells.
fn cell_texture(width: u32, height: u32, color: Color, diamond: bool) -> Texture2D {
    let mut image = Image::gen_image_color(width as u16, height as u16, color);
    if diamond {
        let (hw, hh) = (width as f32 / 2.0, height as f32 / 2.0);
        for y in 0..height {
            for x in 0..width {
                let dx = ((x as f32 + 0.5) - hw).abs() / hw;
                let dy = ((y as f32 + 0.5) - hh).abs() / hh;
                if dx + dy > 1.0 {
                    image.set_pixel(x, y, BLANK);
                }
            }
        }
    }
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);
    texture
}

fn sink_for(engine: &TransformEngine) -> MacroquadSink {
    let g = engine.geometry();
    let diamond = !matches!(engine.orientation(), Orientation::Orthogonal);
    let mut sink = MacroquadSink::new();
    for (i, color) in PALETTE.iter().enumerate() {
        let texture = cell_texture(g.tile_width, g.tile_height, *color, diamond);
        sink.insert_sprite(i as u32 + 1, Sprite { texture, source: None });
    }
    sink
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let mut map = build_map().expect("Failed to load map");
    let mut engine = map.engine().expect("Invalid map geometry");
    let mut sink = sink_for(&engine);
    let mut grid = GridMesh::build(&engine);
    let mut config = RenderConfig::default();
    let mut show_grid = true;

    let mut camera = Camera::new(Vector2::new(screen_width() as f64, screen_height() as f64));
    camera.move_to_tile(&engine, 0, 0);

    loop {
        let switch = [
            (KeyCode::Key1, Orientation::Orthogonal),
            (KeyCode::Key2, Orientation::Isometric),
            (KeyCode::Key3, Orientation::Hexagonal),
            (KeyCode::Key4, Orientation::Staggered),
        ]
        .into_iter()
        .find(|(key, _)| is_key_pressed(*key));
        if let Some((_, orientation)) = switch {
            match TransformEngine::for_orientation(orientation, &map.geometry) {
                Ok(next) => {
                    let tile = camera.tile_coordinate(&engine);
                    engine = next;
                    map.geometry = engine.geometry().clone();
                    sink = sink_for(&engine);
                    grid = GridMesh::build(&engine);
                    camera.move_to_tile(&engine, tile.x, tile.y);
                }
                Err(e) => log::warn!("cannot switch to {:?}: {}", orientation, e),
            }
        }
        if is_key_pressed(KeyCode::G) {
            show_grid = !show_grid;
        }
        if is_key_pressed(KeyCode::P) {
            config.parallax_enabled = !config.parallax_enabled;
        }

        let speed = 400.0 * get_frame_time() as f64;
        let mut step = Vector2::ZERO;
        if is_key_down(KeyCode::Left) { step.x -= speed; }
        if is_key_down(KeyCode::Right) { step.x += speed; }
        if is_key_down(KeyCode::Up) { step.y -= speed; }
        if is_key_down(KeyCode::Down) { step.y += speed; }
        camera.position = camera.position + step;
        camera.viewport = Vector2::new(screen_width() as f64, screen_height() as f64);

        clear_background(BLACK);

        let frame = Compositor::new(&engine, config.clone())
            .expect("Default config is valid")
            .culled_to(&camera)
            .compose(&map, Some(&camera));
        sink.view_offset = -camera.view_rect().0;
        frame.submit(&mut sink);
        sink.flush();
        if show_grid {
            sink.draw_grid(&grid, Color::new(1.0, 1.0, 1.0, 0.15));
        }

        let (mx, my) = mouse_position();
        let cursor = camera.cursor_status(&engine, Vector2::new(mx as f64, my as f64));
        draw_text(
            &format!(
                "{:?}  tile ({}, {})  pixel ({:.0}, {:.0})  {} cmds",
                engine.orientation(),
                cursor.tile.x,
                cursor.tile.y,
                cursor.pixel.x,
                cursor.pixel.y,
                frame.command_count()
            ),
            20.0,
            30.0,
            24.0,
            WHITE,
        );
        draw_text("1-4 orientation  arrows scroll  G grid  P parallax", 20.0, 56.0, 20.0, GRAY);

        // Draw the frame rate in the top-right corner
        draw_text(
            &format!("FPS: {}", get_fps()),
            screen_width() - 135.0,
            55.0,
            30.0,
            RED,
        );

        next_frame().await;
    }
}
