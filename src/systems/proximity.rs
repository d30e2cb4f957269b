use hecs::{Entity, World};
use tracing::trace;

use crate::components::{ContactSet, Grabbable, TriggerEvent};

/// Something entered `hand`'s trigger. Only grabbables are tracked.
pub fn on_proximity_enter(world: &mut World, hand: Entity, other: Entity) {
    if !world.satisfies::<&Grabbable>(other).unwrap_or(false) {
        return;
    }
    if let Ok(mut contacts) = world.get::<&mut ContactSet>(hand) {
        contacts.0.push(other);
        trace!(?hand, ?other, count = contacts.0.len(), "contact added");
    }
}

/// Something left `hand`'s trigger. Removes the first matching contact, if any.
pub fn on_proximity_exit(world: &mut World, hand: Entity, other: Entity) {
    if !was_grabbable(world, other) {
        return;
    }
    if let Ok(mut contacts) = world.get::<&mut ContactSet>(hand) {
        if let Some(index) = contacts.0.iter().position(|&e| e == other) {
            contacts.0.remove(index);
            trace!(?hand, ?other, count = contacts.0.len(), "contact removed");
        }
    }
}

/// Apply one tick's trigger events to the hands' contact sets, in order.
pub fn proximity_system(world: &mut World, events: &[TriggerEvent]) {
    for event in events {
        match *event {
            TriggerEvent::Enter { trigger, other } => on_proximity_enter(world, trigger, other),
            TriggerEvent::Exit { trigger, other } => on_proximity_exit(world, trigger, other),
        }
    }
}

// Despawned entities can't be checked; let them through so stale contacts clear.
fn was_grabbable(world: &World, entity: Entity) -> bool {
    match world.satisfies::<&Grabbable>(entity) {
        Ok(grabbable) => grabbable,
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    use crate::components::LocalTransform;

    fn contacts(world: &World, hand: Entity) -> Vec<Entity> {
        world.get::<&ContactSet>(hand).unwrap().0.clone()
    }

    #[test]
    fn enter_and_exit_track_grabbables() {
        let mut world = World::new();
        let hand = world.spawn((ContactSet::default(),));
        let a = world.spawn((Grabbable::default(),));
        let b = world.spawn((Grabbable::default(),));

        on_proximity_enter(&mut world, hand, a);
        on_proximity_enter(&mut world, hand, b);
        assert_eq!(contacts(&world, hand), vec![a, b]);

        on_proximity_exit(&mut world, hand, a);
        assert_eq!(contacts(&world, hand), vec![b]);
    }

    #[test]
    fn non_grabbables_are_ignored() {
        let mut world = World::new();
        let hand = world.spawn((ContactSet::default(),));
        let wall = world.spawn((LocalTransform::new(Vec3::ZERO),));

        on_proximity_enter(&mut world, hand, wall);
        assert!(contacts(&world, hand).is_empty());
    }

    #[test]
    fn duplicate_enters_are_kept_and_removed_one_at_a_time() {
        let mut world = World::new();
        let hand = world.spawn((ContactSet::default(),));
        let a = world.spawn((Grabbable::default(),));
        let b = world.spawn((Grabbable::default(),));

        proximity_system(
            &mut world,
            &[
                TriggerEvent::Enter { trigger: hand, other: a },
                TriggerEvent::Enter { trigger: hand, other: b },
                TriggerEvent::Enter { trigger: hand, other: a },
            ],
        );
        assert_eq!(contacts(&world, hand), vec![a, b, a]);

        on_proximity_exit(&mut world, hand, a);
        assert_eq!(contacts(&world, hand), vec![b, a]);
    }

    #[test]
    fn exit_without_enter_is_harmless() {
        let mut world = World::new();
        let hand = world.spawn((ContactSet::default(),));
        let a = world.spawn((Grabbable::default(),));

        on_proximity_exit(&mut world, hand, a);
        on_proximity_exit(&mut world, hand, a);
        assert!(contacts(&world, hand).is_empty());
    }

    #[test]
    fn exit_of_despawned_grabbable_removes_it() {
        let mut world = World::new();
        let hand = world.spawn((ContactSet::default(),));
        let a = world.spawn((Grabbable::default(),));
        on_proximity_enter(&mut world, hand, a);
        world.despawn(a).unwrap();

        on_proximity_exit(&mut world, hand, a);
        assert!(contacts(&world, hand).is_empty());
    }
}
