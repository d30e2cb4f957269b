use hecs::{Entity, World};
use tracing::{debug, info};

use crate::components::{GrabEvent, Handedness, Name};
use crate::engine::input::{InputBus, InputState, Subscription};
use crate::error::GrabError;
use crate::scene::scenario::{Scenario, ScenarioKind};
use crate::scene::test_scene::{load_test_scene, HandBindings, TestScene};
use crate::systems::{
    detach_controller, joint_system, physics_step, pose_sync_system, proximity_system,
    trigger_system, PHYSICS_DT,
};

/// Headless driver: plays a scenario against the demo scene one fixed tick at a time.
pub struct GrabApp {
    world: World,
    scene: TestScene,
    bus: InputBus,
    subscriptions: Vec<Subscription>,
    scenario: Scenario,
    input: InputState,
    tick: u32,
}

impl GrabApp {
    pub fn new(kind: ScenarioKind, bindings: HandBindings) -> Result<Self, GrabError> {
        let mut world = World::new();
        let scene = load_test_scene(&mut world, bindings)?;

        let bus = InputBus::new();
        let subscriptions = vec![bus.subscribe(scene.left_hand), bus.subscribe(scene.right_hand)];

        Ok(Self {
            world,
            scene,
            bus,
            subscriptions,
            scenario: Scenario::build(kind),
            input: InputState::new(),
            tick: 0,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scene(&self) -> &TestScene {
        &self.scene
    }

    pub fn scenario_length(&self) -> u32 {
        self.scenario.length
    }

    fn hand(&self, handedness: Handedness) -> Option<Entity> {
        match handedness {
            Handedness::Left => Some(self.scene.left_hand),
            Handedness::Right => Some(self.scene.right_hand),
            Handedness::None => None,
        }
    }

    /// Advance one fixed tick. Returns the grab events it produced.
    pub fn step(&mut self) -> Vec<GrabEvent> {
        for track in &self.scenario.tracks {
            let (Some(hand), Some(sample)) = (self.hand(track.handedness), track.sample(self.tick))
            else {
                continue;
            };
            pose_sync_system(&mut self.world, hand, sample, PHYSICS_DT);
        }

        for event in self.scenario.inputs_at(self.tick) {
            self.input.push(event);
        }
        let mut grab_events = Vec::new();
        for event in self.input.drain() {
            debug!(tick = self.tick, ?event, "input");
            grab_events.extend(self.bus.dispatch(&mut self.world, &event));
        }

        let trigger_events = trigger_system(&mut self.world);
        proximity_system(&mut self.world, &trigger_events);
        joint_system(&mut self.world);
        physics_step(&mut self.world);

        for event in &grab_events {
            self.log_grab(event);
        }
        self.tick += 1;
        grab_events
    }

    pub fn run(&mut self, ticks: u32) -> Vec<GrabEvent> {
        info!(scenario = ?self.scenario.kind, ticks, "running");
        let mut all_events = Vec::new();
        for _ in 0..ticks {
            all_events.extend(self.step());
        }
        all_events
    }

    /// Unsubscribe both hands and release whatever they hold.
    pub fn teardown(&mut self) -> Vec<GrabEvent> {
        self.subscriptions.clear();
        let mut events = detach_controller(&mut self.world, self.scene.left_hand);
        events.extend(detach_controller(&mut self.world, self.scene.right_hand));
        events
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    fn name_of(&self, entity: Entity) -> &'static str {
        self.world.get::<&Name>(entity).map(|n| n.0).unwrap_or("?")
    }

    fn log_grab(&self, event: &GrabEvent) {
        match *event {
            GrabEvent::PickedUp { hand, item } => {
                info!(tick = self.tick, hand = self.name_of(hand), item = self.name_of(item), "pickup");
            }
            GrabEvent::Dropped { hand, item, release } => match release {
                Some(v) => info!(
                    tick = self.tick,
                    hand = self.name_of(hand),
                    item = self.name_of(item),
                    velocity = ?v.linear,
                    spin = ?v.angular,
                    "throw"
                ),
                None => info!(tick = self.tick, hand = self.name_of(hand), item = self.name_of(item), "drop"),
            },
        }
    }
}
