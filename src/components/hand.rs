use clap::ValueEnum;
use glam::{Quat, Vec3};
use hecs::Entity;

/// Logical input action a hand listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum InputAction {
    None,
    Select,
    Grip,
    Trigger,
    Menu,
}

/// Which physical hand an event or controller belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    None,
    Left,
    Right,
}

/// Fixed at construction; events must match both fields exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandConfig {
    pub action: InputAction,
    pub handedness: Handedness,
}

impl HandConfig {
    pub fn new(action: InputAction, handedness: Handedness) -> Self {
        Self { action, handedness }
    }
}

/// Grab behavior attached to a tracked hand.
///
/// `current` is one half of the ownership link; the other half is
/// [`Grabbable::active_controller`](super::Grabbable). Only the grab
/// system writes either side.
#[derive(Debug)]
pub struct HandController {
    pub config: HandConfig,
    pub(crate) current: Option<Entity>,
}

impl HandController {
    pub fn new(config: HandConfig) -> Self {
        Self { config, current: None }
    }

    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    pub fn state(&self) -> GripState {
        match self.current {
            Some(item) => GripState::Holding(item),
            None => GripState::Empty,
        }
    }
}

/// Input-routing state of a hand, derived from what it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GripState {
    Empty,
    Holding(Entity),
}

/// Grabbables currently overlapping the hand's trigger, in arrival order.
/// Not deduplicated; an entity entered twice is listed twice.
#[derive(Debug, Default)]
pub struct ContactSet(pub Vec<Entity>);

/// Tracked pose of a hand. Velocities are derived by the pose sync pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl ControllerPose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }
}
