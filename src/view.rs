//! Camera state for viewers: where the view is centred and what is under
//! the cursor.

use crate::math::{Point, Vector2};
use crate::render::cull::{visible_tile_rect, TileRect};
use crate::transform::{Projection, TransformEngine};

/// What a viewer shows for the position under the mouse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorStatus {
    /// Tile under the cursor.
    pub tile: Point,
    /// Pixel-space position under the cursor.
    pub pixel: Vector2,
    /// Map screen position under the cursor.
    pub screen: Vector2,
}

/// A view centred on `position` in map screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Centre of the view.
    pub position: Vector2,
    /// Window pixels per map screen pixel.
    pub scale: f64,
    /// Window size in pixels.
    pub viewport: Vector2,
}

impl Camera {
    /// Unscaled camera at the origin.
    pub fn new(viewport: Vector2) -> Self {
        Camera {
            position: Vector2::ZERO,
            scale: 1.0,
            viewport,
        }
    }

    /// Centres the view on a tile.
    pub fn move_to_tile(&mut self, engine: &TransformEngine, x: i32, y: i32) {
        self.position = engine.tile_center(x, y);
    }

    /// Centres the view on a pixel-space position.
    pub fn move_to_pixel(&mut self, engine: &TransformEngine, x: f64, y: f64) {
        self.position = engine.pixel_to_screen(x, y);
    }

    /// Tile under the centre of the view.
    pub fn tile_coordinate(&self, engine: &TransformEngine) -> Point {
        engine.screen_to_tile(self.position.x, self.position.y)
    }

    /// Converts a window position (e.g. the mouse) to map screen space.
    pub fn window_to_screen(&self, window: Vector2) -> Vector2 {
        let half = self.viewport * 0.5;
        self.position + (window - half) * (1.0 / self.scale)
    }

    /// Top-left and bottom-right of the view in map screen space.
    pub fn view_rect(&self) -> (Vector2, Vector2) {
        let half = self.viewport * (0.5 / self.scale);
        (self.position - half, self.position + half)
    }

    /// Tile, pixel and screen coordinates under a window position.
    pub fn cursor_status(&self, engine: &TransformEngine, window: Vector2) -> CursorStatus {
        let screen = self.window_to_screen(window);
        CursorStatus {
            tile: engine.screen_to_tile(screen.x, screen.y),
            pixel: engine.screen_to_pixel(screen.x, screen.y),
            screen,
        }
    }

    /// How far the view centre is from the parallax origin, in screen space.
    pub fn parallax_distance(&self, engine: &TransformEngine, origin: Vector2) -> Vector2 {
        self.position - engine.pixel_to_screen(origin.x, origin.y)
    }

    /// Tiles the view can see, padded by `margin`.
    pub fn visible_tiles(&self, engine: &TransformEngine, margin: u32) -> Option<TileRect> {
        let (min, max) = self.view_rect();
        visible_tile_rect(engine, min, max, margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{MapGeometry, Orientation};

    fn iso() -> TransformEngine {
        TransformEngine::new(&MapGeometry::new(Orientation::Isometric, 10, 10, 64, 32)).expect("valid")
    }

    #[test]
    fn moving_to_a_tile_centres_on_it() {
        let engine = iso();
        let mut cam = Camera::new(Vector2::new(800.0, 600.0));
        cam.move_to_tile(&engine, 4, 7);
        assert_eq!(cam.tile_coordinate(&engine), Point::new(4, 7));
    }

    #[test]
    fn cursor_at_window_centre_reads_camera_position() {
        let engine = iso();
        let mut cam = Camera::new(Vector2::new(800.0, 600.0));
        cam.move_to_pixel(&engine, 96.0, 64.0);
        let status = cam.cursor_status(&engine, Vector2::new(400.0, 300.0));
        assert_eq!(status.screen, cam.position);
        assert_eq!(status.pixel, Vector2::new(96.0, 64.0));
        assert_eq!(status.tile, Point::new(3, 2));
    }

    #[test]
    fn zoom_shrinks_the_view() {
        let mut cam = Camera::new(Vector2::new(800.0, 600.0));
        cam.scale = 2.0;
        let (min, max) = cam.view_rect();
        assert_eq!(max - min, Vector2::new(400.0, 300.0));
        assert_eq!(cam.window_to_screen(Vector2::new(800.0, 600.0)), Vector2::new(200.0, 150.0));
    }
}
