use crate::draw::DrawTarget;
use crate::instance::{InstanceRenderer, RenderError};
use fluidspace_common::SurfaceId;
use fluidspace_physics::PhysicsWorld;

/// Two fully isolated instances in one process.
///
/// Each renderer keeps its own world, guard, border, and draw target;
/// nothing is shared. Lifecycle broadcasts (start/pause/tick/destroy)
/// reach both; mutation entry points are routed by surface identity.
pub struct MultiInstanceCoordinator<W: PhysicsWorld, D: DrawTarget> {
    first: InstanceRenderer<W, D>,
    second: InstanceRenderer<W, D>,
}

impl<W: PhysicsWorld, D: DrawTarget> MultiInstanceCoordinator<W, D> {
    /// Compose two renderers. Their surface identities must be disjoint.
    pub fn new(
        first: InstanceRenderer<W, D>,
        second: InstanceRenderer<W, D>,
    ) -> Result<Self, RenderError> {
        if first.surface_id() == second.surface_id() {
            return Err(RenderError::SurfaceConflict(second.surface_id()));
        }
        Ok(Self { first, second })
    }

    /// Route to the instance bound to `surface`, if any.
    pub fn instance_mut(&mut self, surface: SurfaceId) -> Option<&mut InstanceRenderer<W, D>> {
        if self.first.surface_id() == surface {
            Some(&mut self.first)
        } else if self.second.surface_id() == surface {
            Some(&mut self.second)
        } else {
            None
        }
    }

    pub fn instance(&self, surface: SurfaceId) -> Option<&InstanceRenderer<W, D>> {
        if self.first.surface_id() == surface {
            Some(&self.first)
        } else if self.second.surface_id() == surface {
            Some(&self.second)
        } else {
            None
        }
    }

    pub fn surfaces(&self) -> [SurfaceId; 2] {
        [self.first.surface_id(), self.second.surface_id()]
    }

    /// Resume the simulate step on both instances. Each surface's loop
    /// is independent: a failure on one never skips the other; the
    /// first error is reported.
    pub fn start_all(&mut self) -> Result<(), RenderError> {
        let first = self.first.start();
        let second = self.second.start();
        first.and(second)
    }

    /// Pause the simulate step on both instances.
    pub fn pause_all(&mut self) -> Result<(), RenderError> {
        let first = self.first.pause();
        let second = self.second.pause();
        first.and(second)
    }

    /// Drive one frame on both instances.
    pub fn on_frame_tick_all(&mut self) -> Result<(), RenderError> {
        let first = self.first.on_frame_tick();
        let second = self.second.on_frame_tick();
        first.and(second)
    }

    /// Tear down both instances.
    pub fn destroy_all(&mut self) -> Result<(), RenderError> {
        let first = self.first.destroy();
        let second = self.second.destroy();
        first.and(second)
    }
}
