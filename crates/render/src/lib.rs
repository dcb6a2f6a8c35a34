//! Frame-driven simulation/render orchestration.
//!
//! One [`InstanceRenderer`] per display surface: it owns the simulation
//! guard for its world, drives the fixed-cadence simulate-then-draw
//! cycle, and exposes the mutation entry points UI glue may call.
//! [`MultiInstanceCoordinator`] composes two fully isolated renderers.
//!
//! # Invariants
//! - Every read or mutation of the world happens under the instance's
//!   simulation guard.
//! - The guard is never held across a draw call; drawing consumes the
//!   post-step particle snapshot.
//! - Draw submission for one instance runs on a single thread.

mod config;
mod draw;
mod instance;
mod multi;
mod overlay;
mod timing;
mod view;

pub use config::{BorderStyle, InstanceConfig};
pub use draw::{DebugDraw, DrawTarget, FrameLog, ParticleVertex};
pub use instance::{InstanceRenderer, RenderError, RenderState};
pub use multi::MultiInstanceCoordinator;
pub use overlay::{DialCounters, generate_hands, hand_angle};
pub use timing::FrameClock;
pub use view::{ViewTransform, WorldExtent};
