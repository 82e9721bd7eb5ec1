use super::geometry::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera2D {
    pub position: Vec2,
}

impl Camera2D {
    /// Center the viewport on a target and clamp to the map so the camera
    /// never shows space beyond the map edges. A map smaller than the
    /// viewport pins the camera to the origin.
    pub fn follow(&mut self, target_center: Vec2, viewport: Viewport, map_width: f32, map_height: f32) {
        let x = target_center.x - viewport.width / 2.0;
        let y = target_center.y - viewport.height / 2.0;
        self.position.x = x.max(0.0).min((map_width - viewport.width).max(0.0));
        self.position.y = y.max(0.0).min((map_height - viewport.height).max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1800.0,
        height: 800.0,
    };

    #[test]
    fn follow_centers_on_target() {
        let mut camera = Camera2D::default();
        camera.follow(Vec2 { x: 1000.0, y: 1000.0 }, VIEWPORT, 2000.0, 2000.0);
        assert_eq!(camera.position, Vec2 { x: 100.0, y: 600.0 });
    }

    #[test]
    fn follow_clamps_to_map_edges() {
        let mut camera = Camera2D::default();
        camera.follow(Vec2 { x: 10.0, y: 10.0 }, VIEWPORT, 2000.0, 2000.0);
        assert_eq!(camera.position, Vec2 { x: 0.0, y: 0.0 });

        camera.follow(Vec2 { x: 1990.0, y: 1990.0 }, VIEWPORT, 2000.0, 2000.0);
        assert_eq!(camera.position, Vec2 { x: 200.0, y: 1200.0 });
    }

    #[test]
    fn map_smaller_than_viewport_pins_to_origin() {
        let mut camera = Camera2D::default();
        camera.follow(Vec2 { x: 250.0, y: 250.0 }, VIEWPORT, 500.0, 500.0);
        assert_eq!(camera.position, Vec2 { x: 0.0, y: 0.0 });
    }
}
