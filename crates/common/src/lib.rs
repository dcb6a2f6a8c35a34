//! Shared value types used across the fluidspace crates.

mod types;

pub use types::{Color, ParticleFlags, SurfaceId};
