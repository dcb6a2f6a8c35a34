use fluidspace_common::{Color, ParticleFlags};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An oriented box fixture: half extents around a center, rotated by
/// `angle` radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonShape {
    pub half_width: f32,
    pub half_height: f32,
    pub center: Vec2,
    pub angle: f32,
}

impl PolygonShape {
    pub fn new(half_width: f32, half_height: f32, center: Vec2, angle: f32) -> Self {
        Self {
            half_width,
            half_height,
            center,
            angle,
        }
    }

    /// Corner vertices in counter-clockwise order, world space.
    pub fn vertices(&self) -> [Vec2; 4] {
        let (sin, cos) = self.angle.sin_cos();
        let rotate = |p: Vec2| Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
        let hw = self.half_width;
        let hh = self.half_height;
        [
            self.center + rotate(Vec2::new(-hw, -hh)),
            self.center + rotate(Vec2::new(hw, -hh)),
            self.center + rotate(Vec2::new(hw, hh)),
            self.center + rotate(Vec2::new(-hw, hh)),
        ]
    }
}

/// Placement template for a particle group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnShape {
    /// Axis-aligned box of particles.
    Box {
        half_width: f32,
        half_height: f32,
        center: Vec2,
    },
    /// Disc of particles.
    Circle { center: Vec2, radius: f32 },
}

/// Definition of one material group: trait flags, color, and the shape
/// particles are seeded into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleGroupDef {
    pub flags: ParticleFlags,
    pub color: Color,
    pub shape: SpawnShape,
}

impl ParticleGroupDef {
    pub fn new(flags: ParticleFlags, color: Color, shape: SpawnShape) -> Self {
        Self { flags, color, shape }
    }
}

/// One particle as seen by draw submission: position plus color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticlePoint {
    pub position: Vec2,
    pub color: Color,
}
