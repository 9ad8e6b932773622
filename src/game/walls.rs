// Static ground and ceiling

use super::config::GameConfig;
use crate::engine::physics::{BodyDef, BodyHandle, Simulation};

/// The two boundary walls keeping the bird on screen
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct Walls {
    pub ground: BodyHandle,
    pub ceiling: BodyHandle,
}

impl Walls {
    /// Create both walls and add them to the world
    pub fn spawn<S: Simulation + ?Sized>(world: &mut S, config: &GameConfig) -> Self {
        let wall = |center: glam::Vec2| {
            BodyDef::rect(center.x, center.y, config.wall_width, config.wall_thickness).fixed()
        };

        Self {
            ground: world.add_body(&wall(config.ground_center)),
            ceiling: world.add_body(&wall(config.ceiling_center)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::{BodyDef, PhysicsWorld};
    use glam::Vec2;

    #[test]
    fn test_walls_are_static_and_unlabeled() {
        let config = GameConfig::default();
        let mut world = PhysicsWorld::new(config.gravity_per_tick_sq());
        let walls = Walls::spawn(&mut world, &config);

        for _ in 0..10 {
            world.step();
        }
        assert_eq!(world.position(walls.ground), Some(Vec2::new(400.0, 590.0)));
        assert_eq!(world.position(walls.ceiling), Some(Vec2::new(400.0, 10.0)));
        assert_eq!(world.label(walls.ground), None);
        assert_eq!(world.label(walls.ceiling), None);
    }

    #[test]
    fn test_ground_stops_a_falling_body() {
        let config = GameConfig::default();
        let mut world = PhysicsWorld::new(config.gravity_per_tick_sq());
        Walls::spawn(&mut world, &config);
        let ball = world.add_body(&BodyDef::circle(150.0, 300.0, 20.0).density(0.04));

        for _ in 0..600 {
            world.step();
        }

        // Ground top surface is at y = 560
        let y = world.position(ball).unwrap().y;
        assert!(y < 560.0, "ball sank into the ground: y = {}", y);
        assert!(y > 500.0, "ball never landed: y = {}", y);
    }
}
