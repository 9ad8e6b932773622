use glam::Vec2;

use super::body::{BodyDef, BodyLabel, RigidBodyHandle, Shape};

/// Handle to a body living in a simulation
pub type BodyHandle = RigidBodyHandle;

/// Drawable state of one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyShape {
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    pub shape: Shape,
    pub is_static: bool,
    pub label: Option<BodyLabel>,
}

/// What the game needs from a physics engine
///
/// Velocities are in world units per tick. Operations on a handle that is no
/// longer in the world do nothing and report `false` or `None`.
pub trait Simulation {
    /// Create a body from `def` and add it to the world
    fn add_body(&mut self, def: &BodyDef) -> BodyHandle;

    /// Remove a body and its collider
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    fn contains(&self, handle: BodyHandle) -> bool;

    /// Overwrite a body's linear velocity
    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) -> bool;

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2>;

    /// Move a body by `delta` without touching its velocity
    fn translate(&mut self, handle: BodyHandle, delta: Vec2) -> bool;

    fn position(&self, handle: BodyHandle) -> Option<Vec2>;

    fn label(&self, handle: BodyHandle) -> Option<BodyLabel>;

    /// Handles of every body currently in the world
    fn bodies(&self) -> Vec<BodyHandle>;

    fn body_count(&self) -> usize;

    /// Advance the simulation by one tick
    fn step(&mut self);

    /// Remove every body
    fn clear(&mut self);

    /// Drawable state of every body
    fn snapshot(&self) -> Vec<BodyShape>;
}
