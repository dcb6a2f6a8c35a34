use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Identity of a display surface. Each simulated instance is bound to
/// exactly one surface; coordinators route lifecycle and mutation calls
/// by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Normalized RGBA components for vertex/uniform upload.
    pub fn to_linear(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

/// Behavioral traits of a particle group, composed as a bitmask of
/// independent boolean capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParticleFlags(pub u32);

impl ParticleFlags {
    pub const WATER: Self = Self(1 << 0);
    pub const VISCOUS: Self = Self(1 << 1);
    pub const STRESSFUL: Self = Self(1 << 2);
    pub const MIX_COLOR: Self = Self(1 << 3);
    pub const REPULSIVE: Self = Self(1 << 4);
    pub const TENSILE: Self = Self(1 << 5);
    pub const POWER: Self = Self(1 << 6);
    pub const WALL: Self = Self(1 << 7);
    pub const BARRIER: Self = Self(1 << 8);
    pub const ZOMBIE: Self = Self(1 << 9);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ParticleFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ParticleFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_compose_and_query() {
        let f = ParticleFlags::WATER | ParticleFlags::MIX_COLOR;
        assert!(f.contains(ParticleFlags::WATER));
        assert!(f.contains(ParticleFlags::MIX_COLOR));
        assert!(!f.contains(ParticleFlags::VISCOUS));
    }

    #[test]
    fn flags_or_assign() {
        let mut f = ParticleFlags::empty();
        assert!(f.is_empty());
        f |= ParticleFlags::TENSILE;
        assert!(f.contains(ParticleFlags::TENSILE));
    }

    #[test]
    fn color_to_linear_range() {
        let c = Color::new(30, 144, 255, 220);
        let l = c.to_linear();
        assert!((l[2] - 1.0).abs() < 1e-6);
        assert!(l.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn surface_id_display() {
        assert_eq!(SurfaceId(2).to_string(), "surface#2");
    }
}
