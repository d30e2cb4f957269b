use glam::Vec3;
use hecs::{Entity, World};
use tracing::warn;

use crate::components::*;
use crate::error::GrabError;
use crate::systems::attach_controller;

const HAND_TRIGGER_RADIUS: f32 = 0.06;
const HAND_TRIGGER_HEIGHT: f32 = 0.12;

/// Spawn a tracked hand with its body, joint, pose and trigger, then attach
/// the grab controller to it.
pub fn spawn_hand(
    world: &mut World,
    name: &'static str,
    position: Vec3,
    config: HandConfig,
) -> Result<Entity, GrabError> {
    let hand = world.spawn((
        Name(name),
        LocalTransform::new(position),
        RigidBody::kinematic(),
        FixedJoint::default(),
        ControllerPose::at(position),
        TriggerVolume::Capsule {
            radius: HAND_TRIGGER_RADIUS,
            height: HAND_TRIGGER_HEIGHT,
        },
    ));
    if let Err(err) = attach_controller(world, hand, config) {
        warn!(hand = name, %err, "hand spawned without a controller");
        let _ = world.despawn(hand);
        return Err(err);
    }
    Ok(hand)
}

/// Dynamic body with gravity, drag and a ground-contact collider.
fn spawn_item(
    world: &mut World,
    name: &'static str,
    pos: Vec3,
    collider: Collider,
    grabbable: Grabbable,
) -> Entity {
    world.spawn((
        Name(name),
        LocalTransform::new(pos),
        RigidBody::dynamic(),
        Velocity(Vec3::ZERO),
        AngularVelocity::default(),
        GravityAffected,
        collider,
        Restitution(0.3),
        Drag(0.1),
        grabbable,
    ))
}

/// A ball that is held while the button is down and thrown on release.
pub fn spawn_throwable_ball(world: &mut World, name: &'static str, pos: Vec3, radius: f32) -> Entity {
    spawn_item(world, name, pos, Collider::Sphere { radius }, Grabbable::throwable())
}

/// A tool that snaps into the hand and toggles on press.
pub fn spawn_equippable(
    world: &mut World,
    name: &'static str,
    pos: Vec3,
    half_extents: Vec3,
    offset_degrees: Vec3,
) -> Entity {
    spawn_item(
        world,
        name,
        pos,
        Collider::Box { half_extents },
        Grabbable::equippable(offset_degrees),
    )
}

/// Plain held object: no snapping, no throw.
pub fn spawn_prop(world: &mut World, name: &'static str, pos: Vec3, radius: f32) -> Entity {
    spawn_item(world, name, pos, Collider::Sphere { radius }, Grabbable::default())
}

/// Immovable, non-grabbable collider. Still shows up in hand triggers.
pub fn spawn_static_box(world: &mut World, name: &'static str, pos: Vec3, half_extents: Vec3) -> Entity {
    world.spawn((Name(name), LocalTransform::new(pos), Collider::Box { half_extents }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_hand_is_ready_to_grab() {
        let mut world = World::new();
        let config = HandConfig::new(InputAction::Grip, Handedness::Right);
        let hand = spawn_hand(&mut world, "right", Vec3::Y, config).unwrap();

        let controller = world.get::<&HandController>(hand).unwrap();
        assert_eq!(controller.config, config);
        assert_eq!(controller.state(), GripState::Empty);
        assert!(world.get::<&ContactSet>(hand).unwrap().0.is_empty());
    }
}
