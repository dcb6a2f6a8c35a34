use crate::shapes::{ParticleGroupDef, ParticlePoint, PolygonShape};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Engine-allocated handle to a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u64);

/// Body categories understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Static,
    Dynamic,
}

/// The consumed engine surface. One world per instance; the caller holds
/// the instance's simulation guard for the duration of every call.
///
/// Handle-returning operations yield `None` on engine-side allocation
/// failure. That is not fatal to the caller: the contract is to log,
/// skip the sub-step, and keep the instance valid.
pub trait PhysicsWorld {
    /// Allocate a body. `None` when the engine cannot provide one.
    fn create_body(&mut self, kind: BodyKind) -> Option<BodyHandle>;

    /// Destroy a body and all fixtures attached to it. Returns whether
    /// the handle was known.
    fn destroy_body(&mut self, body: BodyHandle) -> bool;

    /// Attach an oriented-box fixture to a body.
    fn attach_polygon(&mut self, body: BodyHandle, shape: &PolygonShape) -> bool;

    /// Attach a circular fixture to a body.
    fn attach_circle(&mut self, body: BodyHandle, center: Vec2, radius: f32) -> bool;

    /// Attach a rounded-rectangle boundary fixture: origin corner,
    /// extents, corner radius.
    fn attach_rounded_rect(
        &mut self,
        body: BodyHandle,
        origin: Vec2,
        width: f32,
        height: f32,
        corner_radius: f32,
    ) -> bool;

    /// Seed a particle group from its definition, spawning at most
    /// `limit` particles. Returns how many were created.
    fn add_particle_group(&mut self, def: &ParticleGroupDef, limit: usize) -> usize;

    /// Remove up to `count` particles (engine-chosen selection).
    /// Returns how many were removed; clamps at zero remaining.
    fn remove_particles(&mut self, count: usize) -> usize;

    /// Current particle count across all groups.
    fn particle_count(&self) -> usize;

    /// Advance the simulation by one fixed time slice.
    fn step(&mut self, dt: f32);

    /// Copy the current particle state into `out` (cleared first). The
    /// caller snapshots under its guard and draws from the copy.
    fn copy_particles(&self, out: &mut Vec<ParticlePoint>);
}
