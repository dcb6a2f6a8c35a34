use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Virtual world dimensions derived from the window aspect ratio.
///
/// The window's larger axis is held at the reference extent and the
/// other axis scales with the aspect ratio, so simulation space always
/// preserves the on-screen aspect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldExtent {
    pub width: f32,
    pub height: f32,
}

impl WorldExtent {
    /// Square extent at the reference dimension (pre-resize state).
    pub fn square(reference: f32) -> Self {
        Self {
            width: reference,
            height: reference,
        }
    }

    /// Extent for a surface of `width x height` pixels against the
    /// fixed reference dimension.
    pub fn from_surface(width: u32, height: u32, reference: f32) -> Self {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;
        if height > width {
            // portrait
            Self {
                width: reference * width / height,
                height: reference,
            }
        } else {
            // landscape
            Self {
                width: reference,
                height: reference * height / width,
            }
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// World-space to normalized-device-coordinate mapping for one
/// instance. Recomputed on every surface resize; read-only for all draw
/// consumers afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    extent: WorldExtent,
    matrix: Mat4,
}

impl ViewTransform {
    pub fn new(extent: WorldExtent) -> Self {
        let matrix =
            Mat4::orthographic_rh(0.0, extent.width, 0.0, extent.height, -1.0, 1.0);
        Self { extent, matrix }
    }

    pub fn extent(&self) -> WorldExtent {
        self.extent
    }

    pub fn view_proj(&self) -> &Mat4 {
        &self.matrix
    }

    /// Map a simulation-space point into NDC.
    pub fn project(&self, point: Vec2) -> Vec2 {
        let p = self.matrix.project_point3(Vec3::new(point.x, point.y, 0.0));
        Vec2::new(p.x, p.y)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(WorldExtent::square(50.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_holds_height_at_reference() {
        let extent = WorldExtent::from_surface(400, 800, 50.0);
        assert!((extent.height - 50.0).abs() < 1e-6);
        assert!((extent.width - 25.0).abs() < 1e-6);
    }

    #[test]
    fn landscape_holds_width_at_reference() {
        let extent = WorldExtent::from_surface(800, 400, 50.0);
        assert!((extent.width - 50.0).abs() < 1e-6);
        assert!((extent.height - 25.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_flips_held_dimension() {
        let portrait = WorldExtent::from_surface(400, 800, 50.0);
        let landscape = WorldExtent::from_surface(800, 400, 50.0);
        assert!((portrait.height - landscape.width).abs() < 1e-6);
        assert!((portrait.width - landscape.height).abs() < 1e-6);
    }

    #[test]
    fn square_surface_keeps_both_axes() {
        let extent = WorldExtent::from_surface(500, 500, 50.0);
        assert!((extent.width - 50.0).abs() < 1e-6);
        assert!((extent.height - 50.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_surface_does_not_divide_by_zero() {
        let extent = WorldExtent::from_surface(0, 0, 50.0);
        assert!(extent.width.is_finite());
        assert!(extent.height.is_finite());
    }

    #[test]
    fn world_center_projects_to_ndc_origin() {
        let view = ViewTransform::new(WorldExtent::from_surface(400, 800, 50.0));
        let ndc = view.project(view.extent().center());
        assert!(ndc.length() < 1e-5);
    }

    #[test]
    fn world_corners_project_to_ndc_corners() {
        let extent = WorldExtent::square(50.0);
        let view = ViewTransform::new(extent);
        let lo = view.project(Vec2::ZERO);
        let hi = view.project(Vec2::new(extent.width, extent.height));
        assert!((lo - Vec2::splat(-1.0)).length() < 1e-5);
        assert!((hi - Vec2::splat(1.0)).length() < 1e-5);
    }
}
