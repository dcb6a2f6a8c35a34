use fluidspace_common::{Color, ParticleFlags};
use fluidspace_physics::{ParticleGroupDef, SpawnShape};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Geometry of the border fixture rebuilt on every surface resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderStyle {
    /// Four walls of `border_thickness` just outside the world edges.
    Rectangular,
    /// Rounded-rectangle boundary inset from the world edges.
    Rounded,
}

/// Plain value set supplied at instance initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Reference world dimension; the window aspect ratio decides which
    /// world axis is held at this value.
    pub reference_extent: f32,
    /// Wall thickness of the rectangular border.
    pub border_thickness: f32,
    /// Hard ceiling on total particle count.
    pub particle_ceiling: usize,
    /// Fixed simulate time slice, seconds.
    pub time_step: f32,
    /// Advisory target frame period for pacing.
    pub frame_period: Duration,
    /// Background fill color.
    pub clear_color: Color,
    pub border_style: BorderStyle,
    /// Material group seeded at initialization, if any.
    pub default_group: Option<ParticleGroupDef>,
}

impl InstanceConfig {
    /// The stock fluid group: color-mixing water in a box covering
    /// 0.38 x the reference extent, centered in the reference square.
    pub fn default_group_for(reference_extent: f32) -> ParticleGroupDef {
        ParticleGroupDef::new(
            ParticleFlags::WATER | ParticleFlags::MIX_COLOR,
            Color::new(30, 144, 255, 220),
            SpawnShape::Box {
                half_width: reference_extent * 0.38,
                half_height: reference_extent * 0.38,
                center: Vec2::splat(reference_extent / 2.0),
            },
        )
    }
}

impl Default for InstanceConfig {
    fn default() -> Self {
        let reference_extent = 50.0;
        Self {
            reference_extent,
            border_thickness: 2.0,
            particle_ceiling: 12_000,
            time_step: 1.0 / 60.0,
            frame_period: Duration::from_millis(32),
            clear_color: Color::new(10, 10, 20, 255),
            border_style: BorderStyle::Rectangular,
            default_group: Some(Self::default_group_for(reference_extent)),
        }
    }
}
