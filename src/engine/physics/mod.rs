// Physics system using rapier2d

pub mod body;
mod simulation;
mod world;

pub use body::{BodyDef, BodyLabel, Shape};
pub use simulation::{BodyHandle, BodyShape, Simulation};
pub use world::PhysicsWorld;
