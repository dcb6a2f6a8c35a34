//! Bookkeeping reference world.
//!
//! Implements the engine boundary without any dynamics: particle groups
//! are seeded on a regular grid inside their spawn shape, stepping only
//! advances time and applies a trivial downward settle so headless demos
//! show motion. No collision, no solver.

use crate::shapes::{ParticleGroupDef, ParticlePoint, PolygonShape, SpawnShape};
use crate::world::{BodyHandle, BodyKind, PhysicsWorld};
use fluidspace_common::{Color, ParticleFlags};
use glam::Vec2;
use std::collections::BTreeMap;

const SETTLE_SPEED: f32 = 1.5;

#[derive(Debug, Clone)]
struct BodyRecord {
    kind: BodyKind,
    fixtures: usize,
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    position: Vec2,
    color: Color,
    flags: ParticleFlags,
}

/// In-memory world with deterministic grid seeding.
#[derive(Debug, Clone)]
pub struct HeadlessWorld {
    bodies: BTreeMap<BodyHandle, BodyRecord>,
    particles: Vec<Particle>,
    next_body: u64,
    spacing: f32,
    elapsed: f32,
    fail_body_creation: bool,
}

impl HeadlessWorld {
    /// World with the default seeding grid spacing (0.5 world units).
    pub fn new() -> Self {
        Self::with_spacing(0.5)
    }

    /// World seeding particles on a grid with the given spacing.
    pub fn with_spacing(spacing: f32) -> Self {
        Self {
            bodies: BTreeMap::new(),
            particles: Vec::new(),
            next_body: 1,
            spacing: spacing.max(1e-3),
            elapsed: 0.0,
            fail_body_creation: false,
        }
    }

    /// Force subsequent `create_body` calls to fail. Exercises the
    /// degraded-but-valid path in callers.
    pub fn fail_body_creation(&mut self, fail: bool) {
        self.fail_body_creation = fail;
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Total fixtures attached to a body, if it exists.
    pub fn fixture_count(&self, body: BodyHandle) -> Option<usize> {
        self.bodies.get(&body).map(|b| b.fixtures)
    }

    pub fn body_kind(&self, body: BodyHandle) -> Option<BodyKind> {
        self.bodies.get(&body).map(|b| b.kind)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Grid points covering a spawn shape, in seeding order.
    fn seed_points(&self, shape: &SpawnShape) -> Vec<Vec2> {
        let spacing = self.spacing;
        let mut points = Vec::new();
        match *shape {
            SpawnShape::Box {
                half_width,
                half_height,
                center,
            } => {
                let nx = ((2.0 * half_width / spacing).floor() as usize).max(1);
                let ny = ((2.0 * half_height / spacing).floor() as usize).max(1);
                for iy in 0..ny {
                    for ix in 0..nx {
                        let x = center.x - half_width + spacing * (ix as f32 + 0.5);
                        let y = center.y - half_height + spacing * (iy as f32 + 0.5);
                        points.push(Vec2::new(x, y));
                    }
                }
            }
            SpawnShape::Circle { center, radius } => {
                let n = ((2.0 * radius / spacing).floor() as i32).max(1);
                for iy in 0..n {
                    for ix in 0..n {
                        let p = Vec2::new(
                            center.x - radius + spacing * (ix as f32 + 0.5),
                            center.y - radius + spacing * (iy as f32 + 0.5),
                        );
                        if (p - center).length() <= radius {
                            points.push(p);
                        }
                    }
                }
            }
        }
        points
    }

    fn attach(&mut self, body: BodyHandle, count: usize) -> bool {
        match self.bodies.get_mut(&body) {
            Some(record) => {
                record.fixtures += count;
                true
            }
            None => false,
        }
    }
}

impl Default for HeadlessWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld for HeadlessWorld {
    fn create_body(&mut self, kind: BodyKind) -> Option<BodyHandle> {
        if self.fail_body_creation {
            return None;
        }
        let handle = BodyHandle(self.next_body);
        self.next_body += 1;
        self.bodies.insert(handle, BodyRecord { kind, fixtures: 0 });
        Some(handle)
    }

    fn destroy_body(&mut self, body: BodyHandle) -> bool {
        self.bodies.remove(&body).is_some()
    }

    fn attach_polygon(&mut self, body: BodyHandle, _shape: &PolygonShape) -> bool {
        self.attach(body, 1)
    }

    fn attach_circle(&mut self, body: BodyHandle, _center: Vec2, _radius: f32) -> bool {
        self.attach(body, 1)
    }

    fn attach_rounded_rect(
        &mut self,
        body: BodyHandle,
        _origin: Vec2,
        _width: f32,
        _height: f32,
        _corner_radius: f32,
    ) -> bool {
        self.attach(body, 1)
    }

    fn add_particle_group(&mut self, def: &ParticleGroupDef, limit: usize) -> usize {
        let points = self.seed_points(&def.shape);
        let spawn = points.len().min(limit);
        for point in points.into_iter().take(spawn) {
            self.particles.push(Particle {
                position: point,
                color: def.color,
                flags: def.flags,
            });
        }
        tracing::debug!(spawned = spawn, total = self.particles.len(), "particle group added");
        spawn
    }

    fn remove_particles(&mut self, count: usize) -> usize {
        let removed = count.min(self.particles.len());
        let keep = self.particles.len() - removed;
        self.particles.truncate(keep);
        removed
    }

    fn particle_count(&self) -> usize {
        self.particles.len()
    }

    fn step(&mut self, dt: f32) {
        self.elapsed += dt;
        for particle in &mut self.particles {
            if particle.flags.contains(ParticleFlags::WALL) {
                continue;
            }
            particle.position.y = (particle.position.y - SETTLE_SPEED * dt).max(0.0);
        }
    }

    fn copy_particles(&self, out: &mut Vec<ParticlePoint>) {
        out.clear();
        out.extend(self.particles.iter().map(|p| ParticlePoint {
            position: p.position,
            color: p.color,
        }));
    }
}
