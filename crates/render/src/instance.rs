use crate::config::{BorderStyle, InstanceConfig};
use crate::draw::{DrawTarget, ParticleVertex};
use crate::overlay::DialCounters;
use crate::timing::FrameClock;
use crate::view::{ViewTransform, WorldExtent};
use fluidspace_common::{Color, ParticleFlags, SurfaceId};
use fluidspace_kernel::SimulationGuard;
use fluidspace_physics::{
    BodyHandle, BodyKind, ParticleGroupDef, ParticlePoint, PhysicsWorld, PolygonShape, SpawnShape,
};
use glam::Vec2;
use std::time::{Duration, Instant};

/// Lifecycle state of one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Uninitialized,
    SurfaceReady,
    Running,
    Paused,
    Destroyed,
}

/// Errors surfaced by lifecycle and mutation entry points.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{0} already initialized")]
    AlreadyInitialized(SurfaceId),
    #[error("{0} not initialized")]
    NotInitialized(SurfaceId),
    #[error("{0} destroyed; no further calls are valid")]
    Destroyed(SurfaceId),
    #[error("{0} already bound to another instance")]
    SurfaceConflict(SurfaceId),
}

/// One independently simulated instance: a guarded world bound to one
/// display surface.
///
/// The render-cadence actor drives [`on_frame_tick`]; external-event
/// actors call the mutation entry points. Both serialize against the
/// instance's simulation guard; the guard is released before any draw
/// submission.
///
/// [`on_frame_tick`]: InstanceRenderer::on_frame_tick
pub struct InstanceRenderer<W: PhysicsWorld, D: DrawTarget> {
    surface_id: SurfaceId,
    config: InstanceConfig,
    state: RenderState,
    guard: Option<SimulationGuard<W>>,
    draw: D,
    border: Option<BodyHandle>,
    pins: Option<BodyHandle>,
    view: ViewTransform,
    overlay: Vec<PolygonShape>,
    dial: DialCounters,
    snapshot: Vec<ParticlePoint>,
    vertices: Vec<ParticleVertex>,
    clock: FrameClock,
    last_dial_update: Instant,
}

impl<W: PhysicsWorld, D: DrawTarget> InstanceRenderer<W, D> {
    pub fn new(surface_id: SurfaceId, config: InstanceConfig, draw: D) -> Self {
        let now = Instant::now();
        let view = ViewTransform::new(WorldExtent::square(config.reference_extent));
        let clock = FrameClock::new(config.frame_period, now);
        Self {
            surface_id,
            config,
            state: RenderState::Uninitialized,
            guard: None,
            draw,
            border: None,
            pins: None,
            view,
            overlay: Vec::new(),
            dial: DialCounters::new(),
            snapshot: Vec::new(),
            vertices: Vec::new(),
            clock,
            last_dial_update: now,
        }
    }

    /// Start the dial at an arbitrary position instead of 12 o'clock.
    pub fn with_dial(mut self, dial: DialCounters) -> Self {
        self.dial = dial;
        self
    }

    pub fn surface_id(&self) -> SurfaceId {
        self.surface_id
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn draw_target(&self) -> &D {
        &self.draw
    }

    pub fn dial(&self) -> DialCounters {
        self.dial
    }

    /// Frame rate measured over the last full second.
    pub fn frame_rate(&self) -> u32 {
        self.clock.rate()
    }

    /// Current particle count, read under the guard.
    pub fn particle_count(&self) -> usize {
        match &self.guard {
            Some(guard) => guard.acquire().particle_count(),
            None => 0,
        }
    }

    fn live_guard(&self) -> Result<&SimulationGuard<W>, RenderError> {
        match self.state {
            RenderState::Uninitialized => Err(RenderError::NotInitialized(self.surface_id)),
            RenderState::Destroyed => Err(RenderError::Destroyed(self.surface_id)),
            _ => match &self.guard {
                Some(guard) => Ok(guard),
                None => Err(RenderError::NotInitialized(self.surface_id)),
            },
        }
    }

    /// Take ownership of the world and build the initial fixtures and
    /// the default material group. Reachable exactly once.
    pub fn initialize(&mut self, world: W) -> Result<(), RenderError> {
        match self.state {
            RenderState::Uninitialized => {}
            RenderState::Destroyed => return Err(RenderError::Destroyed(self.surface_id)),
            _ => return Err(RenderError::AlreadyInitialized(self.surface_id)),
        }
        let guard = SimulationGuard::new(world);
        {
            let mut world = guard.acquire();
            self.border = create_border(
                &mut *world,
                self.view.extent(),
                self.config.border_style,
                self.config.border_thickness,
            );
            if let Some(group) = self.config.default_group {
                let limit = self.config.particle_ceiling;
                world.add_particle_group(&group, limit);
            }
        }
        self.guard = Some(guard);
        self.state = RenderState::SurfaceReady;
        tracing::info!(surface = %self.surface_id, "instance initialized");
        Ok(())
    }

    /// (Re)load draw resources. Idempotent; valid on every surface
    /// (re)creation.
    pub fn on_surface_created(&mut self) -> Result<(), RenderError> {
        self.live_guard()?;
        self.draw.prepare();
        Ok(())
    }

    /// Recompute the view transform for the new surface size, rebuild
    /// the border fixture at the new world extents, and recreate the
    /// background-fill surface.
    pub fn on_surface_resized(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.live_guard()?;
        let extent = WorldExtent::from_surface(width, height, self.config.reference_extent);
        if let Some(guard) = &self.guard {
            let mut world = guard.acquire();
            if let Some(old) = self.border.take() {
                world.destroy_body(old);
            }
            self.border = create_border(
                &mut *world,
                extent,
                self.config.border_style,
                self.config.border_thickness,
            );
        }
        self.view = ViewTransform::new(extent);
        self.draw
            .configure_surface(width, height, self.config.clear_color);
        tracing::debug!(
            surface = %self.surface_id,
            width,
            height,
            world_w = extent.width,
            world_h = extent.height,
            "surface resized"
        );
        Ok(())
    }

    /// Resume the simulate half of the frame cycle.
    pub fn start(&mut self) -> Result<(), RenderError> {
        self.live_guard()?;
        self.state = RenderState::Running;
        Ok(())
    }

    /// Suppress the simulate step. Drawing and mutation entry points
    /// stay active; a frozen frame is valid output.
    pub fn pause(&mut self) -> Result<(), RenderError> {
        self.live_guard()?;
        self.state = RenderState::Paused;
        Ok(())
    }

    /// The per-frame operation driven by the render cadence.
    pub fn on_frame_tick(&mut self) -> Result<(), RenderError> {
        self.frame_at(Instant::now())
    }

    pub(crate) fn frame_at(&mut self, now: Instant) -> Result<(), RenderError> {
        self.live_guard()?;

        // Simulate (Running only) and snapshot, inside the guard.
        if let Some(guard) = &self.guard {
            let mut world = guard.acquire();
            if self.state == RenderState::Running {
                world.step(self.config.time_step);
            }
            world.copy_particles(&mut self.snapshot);
        }

        // Draw from the snapshot, outside the guard.
        self.vertices.clear();
        self.vertices
            .extend(self.snapshot.iter().map(ParticleVertex::from_point));
        self.draw.begin_frame();
        self.draw.draw_particles(&self.vertices, self.view.view_proj());
        self.draw.draw_overlay(&self.overlay, self.view.view_proj());
        self.draw.end_frame();

        // Once per elapsed wall-clock second: advance the dial and
        // regenerate overlay geometry.
        if now.duration_since(self.last_dial_update) >= Duration::from_secs(1) {
            self.last_dial_update = now;
            self.dial.advance();
            self.rebuild_overlay();
        }

        self.clock.record_frame(now);
        Ok(())
    }

    /// Advisory pacing: how long the render cadence may sleep before the
    /// next tick without exceeding the target frame period.
    pub fn throttle_budget(&self, now: Instant) -> Duration {
        self.clock.throttle_budget(now)
    }

    /// Replace the pins body and the overlay shape list with geometry
    /// for the current dial counters. The previous shapes are discarded
    /// wholesale.
    fn rebuild_overlay(&mut self) {
        let Some(guard) = &self.guard else { return };
        let radius = self.view.extent().width / 2.0;
        let hands = self.dial.hands(radius, self.config.border_thickness);

        let mut world = guard.acquire();
        if let Some(old) = self.pins.take() {
            world.destroy_body(old);
        }
        let Some(pins) = world.create_body(BodyKind::Static) else {
            // Degraded but valid: keep drawing the previous overlay.
            tracing::error!(surface = %self.surface_id, "pins body creation failed");
            return;
        };
        for hand in &hands {
            world.attach_polygon(pins, hand);
        }
        self.pins = Some(pins);
        drop(world);

        self.overlay.clear();
        self.overlay.extend(hands);
    }

    /// Seed a material group with the given traits, color, and shape.
    /// A no-op at or above the particle ceiling; otherwise the group is
    /// clamped to the remaining headroom. Returns particles added.
    pub fn add_material(
        &mut self,
        flags: ParticleFlags,
        color: Color,
        shape: SpawnShape,
    ) -> Result<usize, RenderError> {
        let guard = self.live_guard()?;
        let mut world = guard.acquire();
        let headroom = self
            .config
            .particle_ceiling
            .saturating_sub(world.particle_count());
        if headroom == 0 {
            tracing::debug!(surface = %self.surface_id, "particle ceiling reached");
            return Ok(0);
        }
        let def = ParticleGroupDef::new(flags, color, shape);
        Ok(world.add_particle_group(&def, headroom))
    }

    /// Remove up to `count` particles (engine-chosen selection).
    /// Returns particles removed; never underflows.
    pub fn remove_material(&mut self, count: usize) -> Result<usize, RenderError> {
        let guard = self.live_guard()?;
        let mut world = guard.acquire();
        Ok(world.remove_particles(count))
    }

    /// Destroy all owned fixtures and release the world. Terminal.
    pub fn destroy(&mut self) -> Result<(), RenderError> {
        if self.state == RenderState::Destroyed {
            return Err(RenderError::Destroyed(self.surface_id));
        }
        if let Some(guard) = self.guard.take() {
            {
                let mut world = guard.acquire();
                if let Some(border) = self.border.take() {
                    world.destroy_body(border);
                }
                if let Some(pins) = self.pins.take() {
                    world.destroy_body(pins);
                }
            }
            drop(guard.into_world());
        }
        self.overlay.clear();
        self.snapshot.clear();
        self.state = RenderState::Destroyed;
        tracing::info!(surface = %self.surface_id, "instance destroyed");
        Ok(())
    }
}

/// Build the border body for the given extents. Returns `None` (after
/// logging) when the engine cannot allocate a body; the instance keeps
/// running without a border.
fn create_border<W: PhysicsWorld>(
    world: &mut W,
    extent: WorldExtent,
    style: BorderStyle,
    thickness: f32,
) -> Option<BodyHandle> {
    let Some(border) = world.create_body(BodyKind::Static) else {
        tracing::error!("border body creation failed");
        return None;
    };
    let width = extent.width;
    let height = extent.height;
    match style {
        BorderStyle::Rectangular => {
            let walls = [
                // top
                PolygonShape::new(width, thickness, Vec2::new(width / 2.0, height + thickness), 0.0),
                // bottom
                PolygonShape::new(width, thickness, Vec2::new(width / 2.0, -thickness), 0.0),
                // left
                PolygonShape::new(thickness, height, Vec2::new(-thickness, height / 2.0), 0.0),
                // right
                PolygonShape::new(thickness, height, Vec2::new(width + thickness, height / 2.0), 0.0),
            ];
            for wall in &walls {
                world.attach_polygon(border, wall);
            }
            // Circular dial boundary inside the walls; the fluid pools
            // in the round face.
            world.attach_circle(border, extent.center(), width / 2.0);
        }
        BorderStyle::Rounded => {
            world.attach_rounded_rect(
                border,
                Vec2::new(width / 8.0, height / 8.0),
                width * 0.6,
                height * 0.6,
                height / 8.0,
            );
        }
    }
    Some(border)
}
