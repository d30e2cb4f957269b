use hecs::{Entity, World};

use crate::components::{GrabEvent, GripState, Grabbable, HandController};
use crate::engine::input::{InputEvent, InputPhase};

use super::grab::{drop_held, pickup};

/// Feed one input event to one hand.
pub fn route_input(world: &mut World, hand: Entity, event: &InputEvent) -> Vec<GrabEvent> {
    match event.phase {
        InputPhase::Pressed => on_press(world, hand, event),
        InputPhase::Released => on_release(world, hand, event),
    }
}

/// Press toggles equippables off; anything else attempts a pickup.
///
/// Pressing while holding a non-equippable also lands on pickup, which picks
/// the nearest contact again (possibly the same item).
pub fn on_press(world: &mut World, hand: Entity, event: &InputEvent) -> Vec<GrabEvent> {
    let Some(state) = matching_state(world, hand, event) else {
        return Vec::new();
    };
    match state {
        GripState::Holding(item) if is_equippable(world, item) => {
            drop_held(world, hand).into_iter().collect()
        }
        _ => pickup(world, hand),
    }
}

/// Release drops held non-equippables. Equippables only leave on press.
pub fn on_release(world: &mut World, hand: Entity, event: &InputEvent) -> Vec<GrabEvent> {
    let Some(state) = matching_state(world, hand, event) else {
        return Vec::new();
    };
    match state {
        GripState::Holding(item) if !is_equippable(world, item) => {
            drop_held(world, hand).into_iter().collect()
        }
        _ => Vec::new(),
    }
}

/// The hand's state, or `None` if the event isn't for this hand.
fn matching_state(world: &World, hand: Entity, event: &InputEvent) -> Option<GripState> {
    let controller = world.get::<&HandController>(hand).ok()?;
    let config = controller.config;
    if event.action != config.action || event.handedness != config.handedness {
        return None;
    }
    Some(controller.state())
}

fn is_equippable(world: &World, item: Entity) -> bool {
    world
        .get::<&Grabbable>(item)
        .map(|g| g.equippable)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    use crate::components::{
        ContactSet, ControllerPose, FixedJoint, HandConfig, Handedness, InputAction, LocalTransform,
        RigidBody,
    };
    use crate::systems::attach_controller;

    const ACTION: InputAction = InputAction::Grip;

    fn setup(grabbable: Grabbable) -> (World, Entity, Entity) {
        let mut world = World::new();
        let hand = world.spawn((
            LocalTransform::new(Vec3::ZERO),
            RigidBody::kinematic(),
            FixedJoint::default(),
            ControllerPose::at(Vec3::ZERO),
        ));
        attach_controller(&mut world, hand, HandConfig::new(ACTION, Handedness::Left)).unwrap();
        let item = world.spawn((
            LocalTransform::new(Vec3::new(0.0, 0.0, 0.1)),
            RigidBody::dynamic(),
            grabbable,
        ));
        world.get::<&mut ContactSet>(hand).unwrap().0.push(item);
        (world, hand, item)
    }

    fn press() -> InputEvent {
        InputEvent::pressed(ACTION, Handedness::Left)
    }

    fn release() -> InputEvent {
        InputEvent::released(ACTION, Handedness::Left)
    }

    fn state(world: &World, hand: Entity) -> GripState {
        world.get::<&HandController>(hand).unwrap().state()
    }

    #[test]
    fn mismatched_events_are_ignored() {
        let (mut world, hand, _) = setup(Grabbable::default());

        let wrong_hand = InputEvent::pressed(ACTION, Handedness::Right);
        let wrong_action = InputEvent::pressed(InputAction::Menu, Handedness::Left);
        assert!(route_input(&mut world, hand, &wrong_hand).is_empty());
        assert!(route_input(&mut world, hand, &wrong_action).is_empty());
        assert_eq!(state(&world, hand), GripState::Empty);
    }

    #[test]
    fn held_item_is_press_to_grab_release_to_drop() {
        let (mut world, hand, item) = setup(Grabbable::default());

        route_input(&mut world, hand, &press());
        assert_eq!(state(&world, hand), GripState::Holding(item));

        let events = route_input(&mut world, hand, &release());
        assert!(matches!(events.as_slice(), [GrabEvent::Dropped { .. }]));
        assert_eq!(state(&world, hand), GripState::Empty);
    }

    #[test]
    fn equippable_toggles_on_press_and_ignores_release() {
        let (mut world, hand, item) = setup(Grabbable::equippable(Vec3::ZERO));

        route_input(&mut world, hand, &press());
        assert!(route_input(&mut world, hand, &release()).is_empty());
        assert_eq!(state(&world, hand), GripState::Holding(item));

        let events = route_input(&mut world, hand, &press());
        assert!(matches!(events.as_slice(), [GrabEvent::Dropped { .. }]));
        assert_eq!(state(&world, hand), GripState::Empty);
    }

    #[test]
    fn release_while_empty_is_noop() {
        let (mut world, hand, _) = setup(Grabbable::default());
        assert!(route_input(&mut world, hand, &release()).is_empty());
    }

    #[test]
    fn press_while_holding_plain_item_regrabs_nearest() {
        let (mut world, hand, item) = setup(Grabbable::default());
        route_input(&mut world, hand, &press());

        let events = route_input(&mut world, hand, &press());

        assert_eq!(
            events,
            vec![
                GrabEvent::Dropped { hand, item, release: None },
                GrabEvent::PickedUp { hand, item },
            ]
        );
        assert_eq!(state(&world, hand), GripState::Holding(item));
    }
}
