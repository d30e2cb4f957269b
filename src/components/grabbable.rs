use glam::Vec3;
use hecs::Entity;

/// Capability: entity can be picked up by a hand.
#[derive(Clone, Debug, Default)]
pub struct Grabbable {
    /// Snaps to the hand pose and toggles on press instead of release-to-drop.
    pub equippable: bool,
    /// Receives the hand's velocity when dropped.
    pub throwable: bool,
    /// Euler angles in degrees (x = pitch, y = yaw, z = roll) applied after the hand rotation
    /// when equipped.
    pub equip_offset: Vec3,
    pub(crate) active_controller: Option<Entity>,
}

impl Grabbable {
    /// Held only while the button is down, released with the hand's velocity.
    pub fn throwable() -> Self {
        Self {
            throwable: true,
            ..Self::default()
        }
    }

    pub fn equippable(equip_offset: Vec3) -> Self {
        Self {
            equippable: true,
            equip_offset,
            ..Self::default()
        }
    }

    pub fn active_controller(&self) -> Option<Entity> {
        self.active_controller
    }
}

/// Marker: entity is currently held (skip physics integration).
pub struct Held;

/// Hand motion handed to a throwable on release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseVelocity {
    pub linear: Vec3,
    pub angular: Vec3,
}

/// Pickup/drop notifications produced by the grab system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrabEvent {
    PickedUp {
        hand: Entity,
        item: Entity,
    },
    Dropped {
        hand: Entity,
        item: Entity,
        release: Option<ReleaseVelocity>,
    },
}
