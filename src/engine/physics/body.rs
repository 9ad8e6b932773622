use glam::Vec2;
use rapier2d::prelude::*;

use crate::core::math::per_tick_to_per_second;

pub use rapier2d::prelude::RigidBodyHandle;

/// Tag distinguishing game objects that need per-kind handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    /// Scrolling obstacle
    Pipe,
}

/// Collision shape of a body, in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
}

/// Engine-neutral description of a body to create
///
/// Material values follow the conventions of classic browser physics
/// engines: `air_friction` is the fraction of velocity lost per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDef {
    pub shape: Shape,
    pub position: Vec2,
    pub is_static: bool,
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
    pub air_friction: f32,
    pub label: Option<BodyLabel>,
}

impl BodyDef {
    fn new(shape: Shape, x: f32, y: f32) -> Self {
        Self {
            shape,
            position: Vec2::new(x, y),
            is_static: false,
            density: 0.001,
            restitution: 0.0,
            friction: 0.1,
            air_friction: 0.01,
            label: None,
        }
    }

    /// A dynamic circle centred at (x, y)
    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self::new(Shape::Circle { radius }, x, y)
    }

    /// A dynamic rectangle centred at (x, y)
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Shape::Rect { width, height }, x, y)
    }

    /// Make the body static (never moved by the simulation)
    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn label(mut self, label: BodyLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Build the rapier body and its single collider
    pub(super) fn build(&self) -> (RigidBody, Collider) {
        let builder = if self.is_static {
            BodyBuilder::new_fixed()
        } else {
            // Per-tick velocity loss expressed as a per-second damping rate
            BodyBuilder::new_dynamic()
                .linear_damping(per_tick_to_per_second(self.air_friction))
        };
        let body = builder.position(self.position.x, self.position.y).build();

        let collider = match self.shape {
            Shape::Circle { radius } => ColliderBuilder2D::circle(radius),
            Shape::Rect { width, height } => {
                ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            }
        }
        .friction(self.friction)
        .restitution(self.restitution)
        .density(self.density)
        .build();

        (body, collider)
    }
}

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linear_damping: Real,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            linear_damping: 0.0,
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            linear_damping: 0.0,
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the linear damping rate (per second)
    pub fn linear_damping(mut self, damping: Real) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Build the rigid body, with sleeping disabled
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linear_damping(self.linear_damping)
            .can_sleep(false)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    friction: Real,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder2D {
    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self {
            shape: SharedShape::cuboid(half_width, half_height),
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Create a circle-shaped collider
    pub fn circle(radius: Real) -> Self {
        Self {
            shape: SharedShape::ball(radius),
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set density (mass will be calculated from shape area)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        ColliderBuilder::new(self.shape)
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .build()
    }
}
