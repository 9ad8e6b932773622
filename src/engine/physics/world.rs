use glam::Vec2;
use rapier2d::prelude::*;
use std::collections::HashMap;

use super::body::{BodyDef, BodyLabel, Shape};
use super::simulation::{BodyHandle, BodyShape, Simulation};
use crate::core::math::{
    per_second_to_per_tick, per_tick_sq_to_per_second_sq, per_tick_to_per_second, TICKS_PER_SECOND,
};

/// Typical size of a dynamic body, in world units (pixels)
const LENGTH_UNIT: Real = 40.0;

/// Physics world that manages all physics simulation
///
/// World space is y-down with the origin at the top-left of the play area.
/// The public API speaks per-tick units, rapier runs in per-second units.
pub struct PhysicsWorld {
    /// Gravity in units per second²
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Labels of tagged bodies
    labels: HashMap<RigidBodyHandle, BodyLabel>,

    /// Steps taken since creation or the last clear
    steps: u64,
}

impl PhysicsWorld {
    /// Create a new physics world with gravity given in units per tick²
    pub fn new(gravity_per_tick_sq: Vec2) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / TICKS_PER_SECOND;
        integration_parameters.length_unit = LENGTH_UNIT;

        Self {
            gravity: vector![
                per_tick_sq_to_per_second_sq(gravity_per_tick_sq.x),
                per_tick_sq_to_per_second_sq(gravity_per_tick_sq.y)
            ],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            labels: HashMap::new(),
            steps: 0,
        }
    }

    /// Gravity in units per tick²
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(
            self.gravity.x / (TICKS_PER_SECOND * TICKS_PER_SECOND),
            self.gravity.y / (TICKS_PER_SECOND * TICKS_PER_SECOND),
        )
    }

    /// Steps taken since creation or the last clear
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of bodies carrying `label`
    pub fn count_labeled(&self, label: BodyLabel) -> usize {
        self.labels.values().filter(|l| **l == label).count()
    }

    fn body_shape(&self, body: &RigidBody) -> Option<Shape> {
        let collider = body
            .colliders()
            .first()
            .and_then(|handle| self.collider_set.get(*handle))?;

        match collider.shape().shape_type() {
            ShapeType::Ball => collider
                .shape()
                .as_ball()
                .map(|ball| Shape::Circle { radius: ball.radius }),
            ShapeType::Cuboid => collider.shape().as_cuboid().map(|cuboid| Shape::Rect {
                width: cuboid.half_extents.x * 2.0,
                height: cuboid.half_extents.y * 2.0,
            }),
            _ => None,
        }
    }
}

impl Simulation for PhysicsWorld {
    fn add_body(&mut self, def: &BodyDef) -> BodyHandle {
        let (body, collider) = def.build();
        let handle = self.rigid_body_set.insert(body);
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        if let Some(label) = def.label {
            self.labels.insert(handle, label);
        }
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.labels.remove(&handle);
        self.rigid_body_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true, // remove attached colliders
            )
            .is_some()
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        self.rigid_body_set.contains(handle)
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => {
                body.set_linvel(
                    vector![
                        per_tick_to_per_second(velocity.x),
                        per_tick_to_per_second(velocity.y)
                    ],
                    true,
                );
                true
            }
            None => false,
        }
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|body| {
            let linvel = body.linvel();
            Vec2::new(
                per_second_to_per_tick(linvel.x),
                per_second_to_per_tick(linvel.y),
            )
        })
    }

    fn translate(&mut self, handle: BodyHandle, delta: Vec2) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => {
                let translation = body.translation() + vector![delta.x, delta.y];
                body.set_translation(translation, true);
                true
            }
            None => false,
        }
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|body| {
            let translation = body.translation();
            Vec2::new(translation.x, translation.y)
        })
    }

    fn label(&self, handle: BodyHandle) -> Option<BodyLabel> {
        self.labels.get(&handle).copied()
    }

    fn bodies(&self) -> Vec<BodyHandle> {
        self.rigid_body_set.iter().map(|(handle, _)| handle).collect()
    }

    fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.steps += 1;
    }

    fn clear(&mut self) {
        let bodies = self.rigid_body_set.len();
        *self = Self::new(self.gravity());
        log::debug!("Physics world cleared ({} bodies)", bodies);
    }

    fn snapshot(&self) -> Vec<BodyShape> {
        self.rigid_body_set
            .iter()
            .filter_map(|(handle, body)| {
                let shape = self.body_shape(body)?;
                let translation = body.translation();
                Some(BodyShape {
                    position: Vec2::new(translation.x, translation.y),
                    rotation: body.rotation().angle(),
                    shape,
                    is_static: body.is_fixed(),
                    label: self.labels.get(&handle).copied(),
                })
            })
            .collect()
    }
}
