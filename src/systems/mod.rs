mod grab;
mod input;
mod joint;
mod physics;
mod pose;
mod proximity;
mod trigger;

pub use grab::{
    attach_controller, detach_controller, drop_held, equip_rotation, nearest_grabbable, pickup,
};
pub use input::{on_press, on_release, route_input};
pub use joint::joint_system;
pub use physics::{physics_step, PHYSICS_DT};
pub use pose::{pose_sync_system, PoseSample};
pub use proximity::{on_proximity_enter, on_proximity_exit, proximity_system};
pub use trigger::trigger_system;
