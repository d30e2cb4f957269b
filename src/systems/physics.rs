use glam::{Quat, Vec3};
use hecs::World;

use crate::components::{
    AngularVelocity, Collider, Drag, GravityAffected, Held, LocalTransform, Restitution, RigidBody,
    Velocity,
};

pub const PHYSICS_DT: f32 = 1.0 / 60.0;
const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
const GROUND_Y: f32 = 0.0;
const REST_VELOCITY_THRESHOLD: f32 = 0.5;
const DEFAULT_RESTITUTION: f32 = 0.3;
/// Fraction of horizontal and angular velocity kept per grounded step.
const GROUND_FRICTION: f32 = 0.9;

/// Advance free bodies by one fixed step. Held and kinematic bodies are skipped.
pub fn physics_step(world: &mut World) {
    for (_entity, (local, body, vel, ang, gravity, drag, collider, restitution, held)) in world
        .query_mut::<(
            &mut LocalTransform,
            &RigidBody,
            &mut Velocity,
            Option<&mut AngularVelocity>,
            Option<&GravityAffected>,
            Option<&Drag>,
            Option<&Collider>,
            Option<&Restitution>,
            Option<&Held>,
        )>()
    {
        if held.is_some() || body.kinematic {
            continue;
        }
        if gravity.is_some() {
            vel.0 += GRAVITY * PHYSICS_DT;
        }
        // Apply drag: vel *= (1 - drag * dt)
        if let Some(drag) = drag {
            let damping = (1.0 - drag.0 * PHYSICS_DT).max(0.0);
            vel.0 *= damping;
        }
        // Semi-implicit Euler: update velocity first, then position
        local.position += vel.0 * PHYSICS_DT;

        let mut spin = ang;
        if let Some(ang) = spin.as_deref() {
            let step = Quat::from_scaled_axis(ang.0 * PHYSICS_DT);
            local.rotation = (step * local.rotation).normalize();
        }

        // Ground plane contact
        let Some(collider) = collider else {
            continue;
        };
        let bottom = local.position.y - collider.bottom_extent();
        if bottom < GROUND_Y {
            local.position.y += GROUND_Y - bottom;
            if vel.0.y < 0.0 {
                let e = restitution.map(|r| r.0).unwrap_or(DEFAULT_RESTITUTION);
                vel.0.y = if -vel.0.y < REST_VELOCITY_THRESHOLD {
                    0.0
                } else {
                    -vel.0.y * e
                };
            }
            vel.0.x *= GROUND_FRICTION;
            vel.0.z *= GROUND_FRICTION;
            if let Some(ang) = spin.as_deref_mut() {
                ang.0 *= GROUND_FRICTION;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_ball(world: &mut World, position: Vec3, velocity: Vec3) -> hecs::Entity {
        world.spawn((
            LocalTransform::new(position),
            RigidBody::dynamic(),
            Velocity(velocity),
            AngularVelocity::default(),
            GravityAffected,
            Collider::Sphere { radius: 0.1 },
        ))
    }

    #[test]
    fn gravity_pulls_free_bodies() {
        let mut world = World::new();
        let ball = spawn_ball(&mut world, Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO);

        physics_step(&mut world);

        let vel = world.get::<&Velocity>(ball).unwrap().0;
        assert!((vel.y - GRAVITY.y * PHYSICS_DT).abs() < 1e-6);
        assert!(world.get::<&LocalTransform>(ball).unwrap().position.y < 2.0);
    }

    #[test]
    fn held_bodies_do_not_move() {
        let mut world = World::new();
        let ball = spawn_ball(&mut world, Vec3::new(0.0, 2.0, 0.0), Vec3::X);
        world.insert_one(ball, Held).unwrap();

        physics_step(&mut world);

        assert_eq!(world.get::<&LocalTransform>(ball).unwrap().position, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn ground_stops_slow_fall() {
        let mut world = World::new();
        let ball = spawn_ball(&mut world, Vec3::new(0.0, 0.1, 0.0), Vec3::new(0.0, -0.1, 0.0));

        physics_step(&mut world);

        let t = *world.get::<&LocalTransform>(ball).unwrap();
        assert!((t.position.y - 0.1).abs() < 1e-5);
        assert_eq!(world.get::<&Velocity>(ball).unwrap().0.y, 0.0);
    }

    #[test]
    fn angular_velocity_turns_body() {
        let mut world = World::new();
        let ball = spawn_ball(&mut world, Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        world.get::<&mut AngularVelocity>(ball).unwrap().0 = Vec3::new(0.0, 60.0, 0.0);

        physics_step(&mut world);

        let rot = world.get::<&LocalTransform>(ball).unwrap().rotation;
        assert!(rot.abs_diff_eq(Quat::from_rotation_y(1.0), 1e-5));
    }
}
