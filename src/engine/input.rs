use std::cell::RefCell;
use std::rc::{Rc, Weak};

use hecs::{Entity, World};

use crate::components::{GrabEvent, Handedness, InputAction};
use crate::systems::route_input;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputPhase {
    Pressed,
    Released,
}

/// A discrete button transition on a tracked controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub action: InputAction,
    pub handedness: Handedness,
    pub phase: InputPhase,
}

impl InputEvent {
    pub fn pressed(action: InputAction, handedness: Handedness) -> Self {
        Self { action, handedness, phase: InputPhase::Pressed }
    }

    pub fn released(action: InputAction, handedness: Handedness) -> Self {
        Self { action, handedness, phase: InputPhase::Released }
    }
}

/// Events queued for the current frame.
pub struct InputState {
    pub events: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Hand the frame's events to the caller and start an empty frame.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Entity)>,
}

/// Routes input events to every subscribed hand, in subscription order.
#[derive(Default)]
pub struct InputBus {
    registry: Rc<RefCell<Registry>>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hand`. The hand stays registered until the returned guard is dropped.
    pub fn subscribe(&self, hand: Entity) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, hand));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    pub fn dispatch(&self, world: &mut World, event: &InputEvent) -> Vec<GrabEvent> {
        // Snapshot so a handler can't observe a half-updated registry.
        let hands: Vec<Entity> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|&(_, hand)| hand)
            .collect();

        let mut events = Vec::new();
        for hand in hands {
            events.extend(route_input(world, hand, event));
        }
        events
    }
}

/// Scoped registration on an [`InputBus`]. Unsubscribes on drop.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().handlers.retain(|&(id, _)| id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    use crate::components::{ContactSet, HandConfig, HandController};
    use crate::scene::prefabs::{spawn_hand, spawn_throwable_ball};

    #[test]
    fn drain_empties_the_frame() {
        let mut input = InputState::new();
        input.push(InputEvent::pressed(InputAction::Select, Handedness::Left));
        assert_eq!(input.drain().len(), 1);
        assert!(input.events.is_empty());
    }

    #[test]
    fn dropping_subscription_unregisters() {
        let mut world = World::new();
        let config = HandConfig::new(InputAction::Grip, Handedness::Left);
        let hand = spawn_hand(&mut world, "left", Vec3::ZERO, config).unwrap();
        let ball = spawn_throwable_ball(&mut world, "ball", Vec3::ZERO, 0.05);
        world.get::<&mut ContactSet>(hand).unwrap().0.push(ball);

        let bus = InputBus::new();
        let a = bus.subscribe(hand);
        let b = bus.subscribe(world.spawn(()));
        assert_eq!(bus.subscriber_count(), 2);

        drop(a);
        assert_eq!(bus.subscriber_count(), 1);
        let press = InputEvent::pressed(InputAction::Grip, Handedness::Left);
        assert!(bus.dispatch(&mut world, &press).is_empty());
        assert_eq!(world.get::<&HandController>(hand).unwrap().current(), None);

        drop(b);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_bus_is_harmless() {
        let mut world = World::new();
        let bus = InputBus::new();
        let sub = bus.subscribe(world.spawn(()));
        drop(bus);
        drop(sub);
    }
}
