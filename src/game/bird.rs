// The player-controlled bird

use glam::Vec2;
use log::trace;

use super::config::GameConfig;
use crate::engine::physics::{BodyDef, BodyHandle, Simulation};

/// Handle to the bird plus the velocity a flap gives it
#[derive(Debug, Clone, Copy)]
pub struct Bird {
    handle: BodyHandle,
    flap_velocity: Vec2,
}

impl Bird {
    /// Create the bird body and add it to the world
    pub fn spawn<S: Simulation + ?Sized>(world: &mut S, config: &GameConfig) -> Self {
        let def = BodyDef::circle(config.bird_spawn.x, config.bird_spawn.y, config.bird_radius)
            .density(config.bird_density)
            .restitution(config.bird_restitution);

        Self {
            handle: world.add_body(&def),
            flap_velocity: config.flap_velocity,
        }
    }

    #[cfg(test)]
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    /// Overwrite the bird's velocity with the flap velocity
    ///
    /// The previous velocity is discarded, so repeated flaps never stack.
    pub fn flap<S: Simulation + ?Sized>(&self, world: &mut S) -> bool {
        trace!("Flap, velocity was {:?}", self.velocity(world));
        world.set_velocity(self.handle, self.flap_velocity)
    }

    #[cfg(test)]
    pub fn position<S: Simulation + ?Sized>(&self, world: &S) -> Option<Vec2> {
        world.position(self.handle)
    }

    pub fn velocity<S: Simulation + ?Sized>(&self, world: &S) -> Option<Vec2> {
        world.velocity(self.handle)
    }
}
