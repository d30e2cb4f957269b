mod grabbable;
mod hand;
mod physics;

pub use grabbable::*;
pub use hand::*;
pub use physics::*;

use glam::{Quat, Vec3};

/// World-space position and rotation. There is no hierarchy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl LocalTransform {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Human-readable label, used in log output.
pub struct Name(pub &'static str);
