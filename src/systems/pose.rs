use glam::{Quat, Vec3};
use hecs::{Entity, World};

use crate::components::{ControllerPose, LocalTransform};

/// One tracking update for a hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseSample {
    pub position: Vec3,
    pub rotation: Quat,
}

impl PoseSample {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

/// Apply a tracking sample to `hand`, deriving velocities from the previous pose.
/// The hand's transform follows the pose. Non-positive `dt` keeps the old velocities.
pub fn pose_sync_system(world: &mut World, hand: Entity, sample: PoseSample, dt: f32) {
    let Ok(mut pose) = world.get::<&mut ControllerPose>(hand) else {
        return;
    };

    if dt > 0.0 {
        pose.linear_velocity = (sample.position - pose.position) / dt;

        // Shortest arc, so a sign flip in the tracker doesn't read as a full turn.
        let mut delta = sample.rotation * pose.rotation.inverse();
        if delta.w < 0.0 {
            delta = -delta;
        }
        pose.angular_velocity = delta.to_scaled_axis() / dt;
    }
    pose.position = sample.position;
    pose.rotation = sample.rotation.normalize();
    let (position, rotation) = (pose.position, pose.rotation);
    drop(pose);

    if let Ok(mut transform) = world.get::<&mut LocalTransform>(hand) {
        transform.position = position;
        transform.rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 1.0 / 60.0;

    fn spawn_pose(world: &mut World) -> Entity {
        world.spawn((LocalTransform::new(Vec3::ZERO), ControllerPose::at(Vec3::ZERO)))
    }

    #[test]
    fn linear_velocity_is_finite_difference() {
        let mut world = World::new();
        let hand = spawn_pose(&mut world);

        pose_sync_system(&mut world, hand, PoseSample::new(Vec3::new(0.0, 0.05, -0.1), Quat::IDENTITY), DT);

        let pose = *world.get::<&ControllerPose>(hand).unwrap();
        assert!(pose.linear_velocity.abs_diff_eq(Vec3::new(0.0, 3.0, -6.0), 1e-3));
        assert_eq!(world.get::<&LocalTransform>(hand).unwrap().position, pose.position);
    }

    #[test]
    fn angular_velocity_from_yaw_step() {
        let mut world = World::new();
        let hand = spawn_pose(&mut world);
        let step = Quat::from_rotation_y(1.5f32.to_radians());

        pose_sync_system(&mut world, hand, PoseSample::new(Vec3::ZERO, step), DT);

        let pose = *world.get::<&ControllerPose>(hand).unwrap();
        assert!(pose.angular_velocity.abs_diff_eq(Vec3::new(0.0, FRAC_PI_2, 0.0), 1e-3));
    }

    #[test]
    fn negated_quaternion_is_not_a_spin() {
        let mut world = World::new();
        let hand = spawn_pose(&mut world);

        pose_sync_system(&mut world, hand, PoseSample::new(Vec3::ZERO, -Quat::IDENTITY), DT);

        let pose = *world.get::<&ControllerPose>(hand).unwrap();
        assert!(pose.angular_velocity.abs_diff_eq(Vec3::ZERO, 1e-4));
    }

    #[test]
    fn zero_dt_keeps_velocity() {
        let mut world = World::new();
        let hand = spawn_pose(&mut world);
        world.get::<&mut ControllerPose>(hand).unwrap().linear_velocity = Vec3::X;

        pose_sync_system(&mut world, hand, PoseSample::new(Vec3::Y, Quat::IDENTITY), 0.0);

        let pose = *world.get::<&ControllerPose>(hand).unwrap();
        assert_eq!(pose.linear_velocity, Vec3::X);
        assert_eq!(pose.position, Vec3::Y);
    }
}
