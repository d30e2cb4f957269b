use glam::{EulerRot, Quat, Vec3};
use hecs::{Entity, World};
use tracing::{debug, info};

use crate::components::{
    AngularVelocity, ContactSet, ControllerPose, FixedJoint, GrabEvent, Grabbable, HandConfig,
    HandController, Held, LocalTransform, ReleaseVelocity, RigidBody, Velocity,
};
use crate::error::GrabError;

/// Turn `entity` into a grabbing hand.
///
/// The entity must already carry its body, joint, pose source and transform;
/// nothing is looked up later, so a hand that passes here can't fail at runtime.
pub fn attach_controller(
    world: &mut World,
    entity: Entity,
    config: HandConfig,
) -> Result<(), GrabError> {
    if !world.contains(entity) {
        return Err(GrabError::NoSuchEntity(entity));
    }
    require::<RigidBody>(world, entity, "RigidBody")?;
    require::<FixedJoint>(world, entity, "FixedJoint")?;
    require::<ControllerPose>(world, entity, "ControllerPose")?;
    require::<LocalTransform>(world, entity, "LocalTransform")?;

    world
        .insert(entity, (HandController::new(config), ContactSet::default()))
        .map_err(|_| GrabError::NoSuchEntity(entity))?;
    debug!(?entity, ?config, "hand controller attached");
    Ok(())
}

fn require<T: hecs::Component>(
    world: &World,
    entity: Entity,
    component: &'static str,
) -> Result<(), GrabError> {
    if world.satisfies::<&T>(entity).unwrap_or(false) {
        Ok(())
    } else {
        Err(GrabError::MissingComponent { entity, component })
    }
}

/// Tear down a hand: release what it holds and strip the controller.
pub fn detach_controller(world: &mut World, hand: Entity) -> Vec<GrabEvent> {
    let events: Vec<GrabEvent> = drop_held(world, hand).into_iter().collect();
    let _ = world.remove::<(HandController, ContactSet)>(hand);
    events
}

/// Nearest contact by squared distance to the hand's pose.
/// Strict `<`, so on a tie the earliest contact wins. Contacts without a
/// `RigidBody` can't be jointed and are never candidates.
pub fn nearest_grabbable(world: &World, hand: Entity) -> Option<Entity> {
    let origin = world.get::<&ControllerPose>(hand).ok()?.position;
    let contacts = world.get::<&ContactSet>(hand).ok()?;

    let mut nearest = None;
    let mut min_distance = f32::MAX;
    for &candidate in &contacts.0 {
        if !world.satisfies::<&RigidBody>(candidate).unwrap_or(false) {
            continue;
        }
        let Ok(transform) = world.get::<&LocalTransform>(candidate) else {
            continue;
        };
        let distance = transform.position.distance_squared(origin);
        if distance < min_distance {
            min_distance = distance;
            nearest = Some(candidate);
        }
    }
    nearest
}

/// Rotation an equipped item takes: hand rotation, then the item's Euler offset
/// (degrees) applied intrinsically as yaw, pitch, roll.
pub fn equip_rotation(hand_rotation: Quat, offset_degrees: Vec3) -> Quat {
    let offset = Quat::from_euler(
        EulerRot::YXZ,
        offset_degrees.y.to_radians(),
        offset_degrees.x.to_radians(),
        offset_degrees.z.to_radians(),
    );
    hand_rotation * offset
}

/// Grab the nearest contact. No contact leaves everything untouched.
pub fn pickup(world: &mut World, hand: Entity) -> Vec<GrabEvent> {
    let mut events = Vec::new();
    let Some(item) = nearest_grabbable(world, hand) else {
        return events;
    };
    let Ok(grabbable) = world.get::<&Grabbable>(item).map(|g| (*g).clone()) else {
        return events;
    };

    // Ownership transfer: whoever holds the item lets go first, and so does
    // this hand if it is holding something else.
    if let Some(previous) = grabbable.active_controller {
        events.extend(drop_held(world, previous));
    }
    events.extend(drop_held(world, hand));

    let Ok(pose) = world.get::<&ControllerPose>(hand).map(|p| *p) else {
        return events;
    };

    if grabbable.equippable {
        if let Ok(mut transform) = world.get::<&mut LocalTransform>(item) {
            transform.position = pose.position;
            transform.rotation = equip_rotation(pose.rotation, grabbable.equip_offset);
        }
    }

    // Pickup notification: the item stops simulating on its own.
    let _ = world.insert_one(item, Held);
    if let Ok(mut vel) = world.get::<&mut Velocity>(item) {
        vel.0 = Vec3::ZERO;
    }
    if let Ok(mut ang) = world.get::<&mut AngularVelocity>(item) {
        ang.0 = Vec3::ZERO;
    }
    events.push(GrabEvent::PickedUp { hand, item });

    let (item_pos, item_rot) = world
        .get::<&LocalTransform>(item)
        .map(|t| (t.position, t.rotation))
        .unwrap_or((pose.position, pose.rotation));
    if let Ok(mut joint) = world.get::<&mut FixedJoint>(hand) {
        joint.connect(item, pose.position, pose.rotation, item_pos, item_rot);
    }

    link(world, hand, item);
    info!(?hand, ?item, equipped = grabbable.equippable, "picked up");
    events
}

/// Let go of whatever `hand` holds. Nothing held is a no-op.
pub fn drop_held(world: &mut World, hand: Entity) -> Option<GrabEvent> {
    let item = world.get::<&HandController>(hand).ok()?.current?;

    let throwable = world
        .get::<&Grabbable>(item)
        .map(|g| g.throwable)
        .unwrap_or(false);
    let release = if throwable {
        world
            .get::<&ControllerPose>(hand)
            .ok()
            .map(|pose| ReleaseVelocity {
                linear: pose.linear_velocity,
                angular: pose.angular_velocity,
            })
    } else {
        None
    };

    // Drop notification: hand the item back to the simulation.
    let _ = world.remove_one::<Held>(item);
    if let Some(release) = release {
        if let Ok(mut vel) = world.get::<&mut Velocity>(item) {
            vel.0 = release.linear;
        }
        if let Ok(mut ang) = world.get::<&mut AngularVelocity>(item) {
            ang.0 = release.angular;
        }
    }

    if let Ok(mut joint) = world.get::<&mut FixedJoint>(hand) {
        joint.disconnect();
    }

    unlink(world, hand, item);
    info!(?hand, ?item, thrown = release.is_some(), "dropped");
    Some(GrabEvent::Dropped { hand, item, release })
}

/// Record `hand` <-> `item` on both sides.
fn link(world: &mut World, hand: Entity, item: Entity) {
    if let Ok(mut controller) = world.get::<&mut HandController>(hand) {
        controller.current = Some(item);
    }
    if let Ok(mut grabbable) = world.get::<&mut Grabbable>(item) {
        grabbable.active_controller = Some(hand);
    }
}

fn unlink(world: &mut World, hand: Entity, item: Entity) {
    if let Ok(mut controller) = world.get::<&mut HandController>(hand) {
        controller.current = None;
    }
    if let Ok(mut grabbable) = world.get::<&mut Grabbable>(item) {
        if grabbable.active_controller == Some(hand) {
            grabbable.active_controller = None;
        }
    }
}
