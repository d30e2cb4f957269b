use glam::{Quat, Vec3};
use hecs::{Entity, World};

use crate::components::{FixedJoint, LocalTransform};

/// Move every jointed body to its anchor relative to the joint owner.
pub fn joint_system(world: &mut World) {
    let targets: Vec<(Entity, Vec3, Quat)> = world
        .query::<(&LocalTransform, &FixedJoint)>()
        .iter()
        .filter_map(|(_owner, (transform, joint))| {
            let body = joint.connected_body?;
            let anchor = joint.anchor?;
            Some((
                body,
                transform.position + transform.rotation * anchor.position,
                transform.rotation * anchor.rotation,
            ))
        })
        .collect();

    for (body, position, rotation) in targets {
        if let Ok(mut transform) = world.get::<&mut LocalTransform>(body) {
            transform.position = position;
            transform.rotation = rotation.normalize();
        }
    }
}
