use clap::ValueEnum;
use glam::{Quat, Vec3};

use crate::components::{Handedness, InputAction};
use crate::engine::input::InputEvent;
use crate::systems::PoseSample;

/// Built-in scripted sessions for the demo binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    /// Right hand picks up the ball, swings and lets go.
    Toss,
    /// Left hand equips the torch, carries it, presses again to drop it.
    Equip,
    /// Right hand lifts the mug, left hand takes it over.
    Handoff,
}

/// Keyframed hand motion; poses between keys are interpolated.
pub struct HandTrack {
    pub handedness: Handedness,
    keys: Vec<(u32, PoseSample)>,
}

impl HandTrack {
    pub fn new(handedness: Handedness) -> Self {
        Self { handedness, keys: Vec::new() }
    }

    /// Keys must be added in increasing tick order.
    pub fn key(mut self, tick: u32, position: Vec3, rotation: Quat) -> Self {
        self.keys.push((tick, PoseSample::new(position, rotation)));
        self
    }

    pub fn sample(&self, tick: u32) -> Option<PoseSample> {
        let (first_tick, first) = *self.keys.first()?;
        if tick <= first_tick {
            return Some(first);
        }
        for pair in self.keys.windows(2) {
            let (t0, a) = pair[0];
            let (t1, b) = pair[1];
            if tick <= t1 {
                let s = (tick - t0) as f32 / (t1 - t0).max(1) as f32;
                return Some(PoseSample::new(
                    a.position.lerp(b.position, s),
                    a.rotation.slerp(b.rotation, s),
                ));
            }
        }
        self.keys.last().map(|&(_, pose)| pose)
    }
}

/// A timeline of hand motion and button events, keyed by simulation tick.
pub struct Scenario {
    pub kind: ScenarioKind,
    pub length: u32,
    pub tracks: Vec<HandTrack>,
    inputs: Vec<(u32, InputEvent)>,
}

impl Scenario {
    pub fn inputs_at(&self, tick: u32) -> impl Iterator<Item = InputEvent> + '_ {
        self.inputs
            .iter()
            .filter(move |(t, _)| *t == tick)
            .map(|(_, event)| *event)
    }

    pub fn build(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::Toss => toss(),
            ScenarioKind::Equip => equip(),
            ScenarioKind::Handoff => handoff(),
        }
    }
}

pub const LEFT_HAND_START: Vec3 = Vec3::new(-0.3, 1.0, 0.0);
pub const RIGHT_HAND_START: Vec3 = Vec3::new(0.3, 1.0, 0.0);

fn grip(handedness: Handedness, pressed: bool) -> InputEvent {
    if pressed {
        InputEvent::pressed(InputAction::Grip, handedness)
    } else {
        InputEvent::released(InputAction::Grip, handedness)
    }
}

fn idle(handedness: Handedness, start: Vec3) -> HandTrack {
    HandTrack::new(handedness).key(0, start, Quat::IDENTITY)
}

fn toss() -> Scenario {
    let right = HandTrack::new(Handedness::Right)
        .key(0, RIGHT_HAND_START, Quat::IDENTITY)
        .key(40, Vec3::new(0.3, 0.08, -0.3), Quat::IDENTITY)
        .key(50, Vec3::new(0.3, 0.08, -0.3), Quat::IDENTITY)
        .key(90, Vec3::new(0.3, 1.2, -0.3), Quat::IDENTITY)
        // Flick: 10 ticks up and forward.
        .key(100, Vec3::new(0.3, 1.5, -1.0), Quat::from_rotation_x(-0.6));

    Scenario {
        kind: ScenarioKind::Toss,
        length: 160,
        tracks: vec![idle(Handedness::Left, LEFT_HAND_START), right],
        inputs: vec![(45, grip(Handedness::Right, true)), (100, grip(Handedness::Right, false))],
    }
}

fn equip() -> Scenario {
    let left = HandTrack::new(Handedness::Left)
        .key(0, LEFT_HAND_START, Quat::IDENTITY)
        .key(40, Vec3::new(-0.3, 0.08, -0.3), Quat::IDENTITY)
        .key(55, Vec3::new(-0.3, 0.08, -0.3), Quat::IDENTITY)
        .key(100, Vec3::new(-0.3, 1.2, 0.0), Quat::from_rotation_z(0.4));

    Scenario {
        kind: ScenarioKind::Equip,
        length: 220,
        tracks: vec![left, idle(Handedness::Right, RIGHT_HAND_START)],
        inputs: vec![
            (45, grip(Handedness::Left, true)),
            // Equippables ignore release; the torch stays on.
            (50, grip(Handedness::Left, false)),
            (120, grip(Handedness::Left, true)),
            (125, grip(Handedness::Left, false)),
        ],
    }
}

fn handoff() -> Scenario {
    let right = HandTrack::new(Handedness::Right)
        .key(0, RIGHT_HAND_START, Quat::IDENTITY)
        .key(40, Vec3::new(0.0, 0.08, -0.6), Quat::IDENTITY)
        .key(50, Vec3::new(0.0, 0.08, -0.6), Quat::IDENTITY)
        .key(80, Vec3::new(0.0, 1.0, -0.6), Quat::IDENTITY);
    let left = HandTrack::new(Handedness::Left)
        .key(0, LEFT_HAND_START, Quat::IDENTITY)
        .key(60, LEFT_HAND_START, Quat::IDENTITY)
        .key(90, Vec3::new(-0.05, 0.97, -0.6), Quat::IDENTITY)
        .key(105, Vec3::new(-0.05, 0.97, -0.6), Quat::IDENTITY)
        .key(135, Vec3::new(-0.4, 1.1, -0.2), Quat::IDENTITY);

    Scenario {
        kind: ScenarioKind::Handoff,
        length: 140,
        tracks: vec![left, right],
        inputs: vec![
            (45, grip(Handedness::Right, true)),
            (100, grip(Handedness::Left, true)),
            // Right no longer holds anything, so this is a no-op.
            (110, grip(Handedness::Right, false)),
        ],
    }
}
