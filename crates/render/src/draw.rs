use bytemuck::{Pod, Zeroable};
use fluidspace_common::Color;
use fluidspace_physics::{ParticlePoint, PolygonShape};
use glam::Mat4;

/// GPU-uploadable particle vertex: position plus premultiplied color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl ParticleVertex {
    pub fn from_point(point: &ParticlePoint) -> Self {
        Self {
            position: [point.position.x, point.position.y],
            color: point.color.to_linear(),
        }
    }
}

/// The consumed draw boundary.
///
/// Submission order within a frame is fixed: background fill, then
/// primary-material geometry, then overlay geometry, then end-of-frame.
/// Implementations own the material/program mechanics; callers never
/// hold a simulation guard while invoking any of these.
pub trait DrawTarget {
    /// (Re)load programs, materials, and textures. Idempotent; called on
    /// every surface (re)creation, e.g. after a context loss.
    fn prepare(&mut self);

    /// Rebuild the background-fill surface for new pixel dimensions.
    fn configure_surface(&mut self, width: u32, height: u32, clear_color: Color);

    /// Begin a frame by clearing to the configured background.
    fn begin_frame(&mut self);

    /// Submit the particle geometry under the view-projection matrix.
    fn draw_particles(&mut self, vertices: &[ParticleVertex], view_proj: &Mat4);

    /// Submit the dial-overlay shapes under the view-projection matrix.
    fn draw_overlay(&mut self, hands: &[PolygonShape], view_proj: &Mat4);

    /// Finish and present the frame.
    fn end_frame(&mut self);
}

/// What one submitted frame contained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameLog {
    pub particle_vertices: usize,
    pub overlay_shapes: usize,
}

/// Recording draw target.
///
/// Stands in for the GPU backend in tests and headless runs: it verifies
/// submission sequencing and keeps a bounded log of what each frame
/// contained.
#[derive(Debug, Default)]
pub struct DebugDraw {
    prepared: u32,
    surface: Option<(u32, u32)>,
    clear_color: Color,
    in_frame: bool,
    current: FrameLog,
    frames: Vec<FrameLog>,
}

const FRAME_LOG_CAPACITY: usize = 256;

impl DebugDraw {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times resources were (re)loaded.
    pub fn prepared_count(&self) -> u32 {
        self.prepared
    }

    pub fn surface(&self) -> Option<(u32, u32)> {
        self.surface
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Completed frames, oldest first, most recent
    /// [`FRAME_LOG_CAPACITY`] retained.
    pub fn frames(&self) -> &[FrameLog] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&FrameLog> {
        self.frames.last()
    }
}

impl DrawTarget for DebugDraw {
    fn prepare(&mut self) {
        self.prepared += 1;
    }

    fn configure_surface(&mut self, width: u32, height: u32, clear_color: Color) {
        self.surface = Some((width, height));
        self.clear_color = clear_color;
    }

    fn begin_frame(&mut self) {
        assert!(!self.in_frame, "begin_frame while a frame is open");
        self.in_frame = true;
        self.current = FrameLog::default();
    }

    fn draw_particles(&mut self, vertices: &[ParticleVertex], _view_proj: &Mat4) {
        assert!(self.in_frame, "draw_particles outside a frame");
        assert_eq!(
            self.current.overlay_shapes, 0,
            "particles must be submitted before the overlay"
        );
        self.current.particle_vertices += vertices.len();
    }

    fn draw_overlay(&mut self, hands: &[PolygonShape], _view_proj: &Mat4) {
        assert!(self.in_frame, "draw_overlay outside a frame");
        self.current.overlay_shapes += hands.len();
    }

    fn end_frame(&mut self) {
        assert!(self.in_frame, "end_frame without begin_frame");
        self.in_frame = false;
        if self.frames.len() == FRAME_LOG_CAPACITY {
            self.frames.remove(0);
        }
        self.frames.push(self.current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn vertex_from_point_normalizes_color() {
        let point = ParticlePoint {
            position: Vec2::new(1.0, 2.0),
            color: Color::new(255, 0, 0, 255),
        };
        let vertex = ParticleVertex::from_point(&point);
        assert_eq!(vertex.position, [1.0, 2.0]);
        assert_eq!(vertex.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn records_frame_contents_in_order() {
        let mut draw = DebugDraw::new();
        draw.prepare();
        draw.configure_surface(400, 800, Color::new(1, 2, 3, 255));

        let vp = Mat4::IDENTITY;
        let verts = [ParticleVertex {
            position: [0.0, 0.0],
            color: [1.0; 4],
        }; 3];
        let hands = [PolygonShape::new(0.1, 1.0, Vec2::ZERO, 0.0); 3];

        draw.begin_frame();
        draw.draw_particles(&verts, &vp);
        draw.draw_overlay(&hands, &vp);
        draw.end_frame();

        assert_eq!(draw.prepared_count(), 1);
        assert_eq!(draw.surface(), Some((400, 800)));
        let frame = draw.last_frame().unwrap();
        assert_eq!(frame.particle_vertices, 3);
        assert_eq!(frame.overlay_shapes, 3);
    }

    #[test]
    #[should_panic(expected = "before the overlay")]
    fn overlay_before_particles_is_rejected() {
        let mut draw = DebugDraw::new();
        let vp = Mat4::IDENTITY;
        draw.begin_frame();
        draw.draw_overlay(&[PolygonShape::new(0.1, 1.0, Vec2::ZERO, 0.0)], &vp);
        draw.draw_particles(
            &[ParticleVertex {
                position: [0.0, 0.0],
                color: [1.0; 4],
            }],
            &vp,
        );
    }

    #[test]
    #[should_panic(expected = "outside a frame")]
    fn draw_outside_frame_is_rejected() {
        let mut draw = DebugDraw::new();
        draw.draw_particles(&[], &Mat4::IDENTITY);
    }

    #[test]
    fn frame_log_is_bounded() {
        let mut draw = DebugDraw::new();
        for _ in 0..300 {
            draw.begin_frame();
            draw.end_frame();
        }
        assert_eq!(draw.frames().len(), FRAME_LOG_CAPACITY);
    }
}
