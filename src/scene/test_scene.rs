use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{HandConfig, Handedness, InputAction};
use crate::error::GrabError;
use crate::scene::prefabs::{
    spawn_equippable, spawn_hand, spawn_prop, spawn_static_box, spawn_throwable_ball,
};
use crate::scene::scenario::{LEFT_HAND_START, RIGHT_HAND_START};

/// Entities of the demo scene that callers want to inspect.
pub struct TestScene {
    pub left_hand: Entity,
    pub right_hand: Entity,
    pub ball: Entity,
    pub torch: Entity,
    pub mug: Entity,
}

/// Button bindings for the two hands.
#[derive(Clone, Copy, Debug)]
pub struct HandBindings {
    pub left: InputAction,
    pub right: InputAction,
}

impl Default for HandBindings {
    fn default() -> Self {
        Self {
            left: InputAction::Grip,
            right: InputAction::Grip,
        }
    }
}

/// Build and populate the demo scene: two hands and a few things to pick up.
pub fn load_test_scene(world: &mut World, bindings: HandBindings) -> Result<TestScene, GrabError> {
    let left_hand = spawn_hand(
        world,
        "left hand",
        LEFT_HAND_START,
        HandConfig::new(bindings.left, Handedness::Left),
    )?;
    let right_hand = spawn_hand(
        world,
        "right hand",
        RIGHT_HAND_START,
        HandConfig::new(bindings.right, Handedness::Right),
    )?;

    let ball = spawn_throwable_ball(world, "ball", Vec3::new(0.3, 0.05, -0.3), 0.05);
    // Yawed a quarter turn so the handle points along the forearm.
    let torch = spawn_equippable(
        world,
        "torch",
        Vec3::new(-0.3, 0.05, -0.3),
        Vec3::new(0.03, 0.05, 0.1),
        Vec3::new(0.0, 90.0, 0.0),
    );
    let mug = spawn_prop(world, "mug", Vec3::new(0.0, 0.04, -0.6), 0.04);

    // Sits right next to the ball so the right hand brushes it.
    spawn_static_box(world, "pedestal", Vec3::new(0.4, 0.1, -0.3), Vec3::new(0.05, 0.1, 0.05));

    Ok(TestScene {
        left_hand,
        right_hand,
        ball,
        torch,
        mug,
    })
}
