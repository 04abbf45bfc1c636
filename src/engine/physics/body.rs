use super::collision::CollisionGroups;
use glam::Vec2;
use rapier2d::prelude::*;

/// Body capability consumed by character controllers.
///
/// Scale carries the visual facing flip and is not part of the simulation.
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn scale(&self) -> Vec2;
    fn set_scale(&mut self, scale: Vec2);
}

/// A rapier rigid body paired with the owner's visual scale
pub struct BodyView<'a> {
    body: &'a mut RigidBody,
    scale: &'a mut Vec2,
}

impl<'a> BodyView<'a> {
    pub fn new(body: &'a mut RigidBody, scale: &'a mut Vec2) -> Self {
        Self { body, scale }
    }
}

impl PhysicsBody for BodyView<'_> {
    fn velocity(&self) -> Vec2 {
        let linvel = self.body.linvel();
        Vec2::new(linvel.x, linvel.y)
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.body.set_linvel(vector![velocity.x, velocity.y], true);
    }

    fn position(&self) -> Vec2 {
        let translation = self.body.translation();
        Vec2::new(translation.x, translation.y)
    }

    fn set_position(&mut self, position: Vec2) {
        self.body
            .set_translation(vector![position.x, position.y], true);
    }

    fn scale(&self) -> Vec2 {
        *self.scale
    }

    fn set_scale(&mut self, scale: Vec2) {
        *self.scale = scale;
    }
}

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new kinematic velocity-based body (moved by its velocity, not by forces)
    pub fn new_kinematic_velocity_based() -> Self {
        Self::with_type(RigidBodyType::KinematicVelocityBased)
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed)
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (useful for player characters)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(0.0)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Default,
            friction: 0.5,
        }
    }

    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// Create a capsule-shaped collider (good for characters)
    pub fn capsule(half_height: Real, radius: Real) -> Self {
        let a = point![0.0, -half_height];
        let b = point![0.0, half_height];
        Self::with_shape(SharedShape::capsule(a, b, radius))
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .build()
    }
}

/// Common rigid body configurations for game objects
pub mod presets {
    use super::*;

    /// Create a character body.
    ///
    /// Kinematic so the controller owns its motion: the physics step only
    /// integrates the velocity the controller sets.
    pub fn character_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_kinematic_velocity_based()
            .position(x, y)
            .lock_rotation()
            .can_sleep(false) // Characters should never sleep
            .build()
    }

    /// Create a character collider (capsule shape)
    pub fn character_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_height = ((height / 2.0) - radius).max(0.0);

        ColliderBuilder2D::capsule(half_height, radius)
            .collision_groups(CollisionGroups::Character)
            .friction(0.0)
            .build()
    }

    /// Create a floor body (fixed/static)
    pub fn floor_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create a floor collider (box shape)
    pub fn floor_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Environment)
            .friction(0.3)
            .build()
    }
}
