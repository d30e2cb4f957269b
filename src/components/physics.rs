use glam::{Quat, Vec3};
use hecs::Entity;

/// Linear velocity in world space.
#[derive(Clone, Copy, Debug, Default)]
pub struct Velocity(pub Vec3);

/// Angular velocity in world space, as a scaled axis (radians per second).
#[derive(Clone, Copy, Debug, Default)]
pub struct AngularVelocity(pub Vec3);

/// Simulated body. Anything a joint can connect to carries one.
#[derive(Clone, Copy, Debug)]
pub struct RigidBody {
    /// Kinematic bodies are moved by their owner (pose, joint) and never integrated.
    pub kinematic: bool,
}

impl RigidBody {
    pub fn dynamic() -> Self {
        Self { kinematic: false }
    }

    pub fn kinematic() -> Self {
        Self { kinematic: true }
    }
}

/// Marker: entity is affected by gravity.
pub struct GravityAffected;

/// Collision shape attached to an entity, centred on its position.
#[derive(Clone, Copy, Debug)]
pub enum Collider {
    Sphere { radius: f32 },
    Capsule { radius: f32, height: f32 },
    Box { half_extents: Vec3 },
}

impl Collider {
    /// Distance from the centre to the lowest point, for ground contact.
    pub fn bottom_extent(&self) -> f32 {
        match self {
            Collider::Sphere { radius } => *radius,
            Collider::Capsule { radius, height } => radius + height * 0.5,
            Collider::Box { half_extents } => half_extents.y,
        }
    }
}

/// Restitution coefficient (bounciness). 0.0 = no bounce, 1.0 = perfect bounce.
pub struct Restitution(pub f32);

/// Velocity damping factor (air resistance / drag). Applied as vel *= (1 - drag * dt) each step.
pub struct Drag(pub f32);

/// Pose of the connected body relative to the joint owner, frozen at connect time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointAnchor {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Rigid attachment between the owning body and at most one other body.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedJoint {
    pub connected_body: Option<Entity>,
    pub anchor: Option<JointAnchor>,
}

impl FixedJoint {
    /// Connect `body`, locking it at its current pose relative to the owner.
    pub fn connect(
        &mut self,
        body: Entity,
        owner_pos: Vec3,
        owner_rot: Quat,
        body_pos: Vec3,
        body_rot: Quat,
    ) {
        let inv = owner_rot.inverse();
        self.connected_body = Some(body);
        self.anchor = Some(JointAnchor {
            position: inv * (body_pos - owner_pos),
            rotation: inv * body_rot,
        });
    }

    pub fn disconnect(&mut self) {
        self.connected_body = None;
        self.anchor = None;
    }

    pub fn is_connected(&self) -> bool {
        self.connected_body.is_some()
    }
}

/// Overlap-only volume. Produces enter/exit events, never a collision response.
#[derive(Clone, Copy, Debug)]
pub enum TriggerVolume {
    Sphere { radius: f32 },
    Capsule { radius: f32, height: f32 },
}

/// Entities overlapping a trigger as of the last trigger pass.
#[derive(Default)]
pub struct TriggerOverlaps(pub Vec<Entity>);

/// Enter/exit notification from the trigger pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    Enter { trigger: Entity, other: Entity },
    Exit { trigger: Entity, other: Entity },
}
