//! Physics engine boundary.
//!
//! The orchestration layer invokes a particle/fluid engine; it never
//! implements one. This crate defines that boundary: the [`PhysicsWorld`]
//! trait plus the plain value types that cross it, and [`HeadlessWorld`],
//! a bookkeeping-only reference implementation used by tests and the
//! headless demo binary.
//!
//! # Invariants
//! - Every call into a `PhysicsWorld` happens while the owning
//!   simulation guard is held; the trait itself carries no locking.
//! - `remove_particles` never underflows; `add_particle_group` never
//!   spawns past the caller-supplied limit.

mod headless;
mod shapes;
mod world;

pub use headless::HeadlessWorld;
pub use shapes::{ParticleGroupDef, ParticlePoint, PolygonShape, SpawnShape};
pub use world::{BodyHandle, BodyKind, PhysicsWorld};
