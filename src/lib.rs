//! Hand-controller grabbing for a `hecs` world.
//!
//! A hand entity tracks grabbables overlapping its trigger, turns button
//! events into pickup and drop, and holds items with a fixed joint. The
//! trigger, pose, joint and physics passes in [`systems`] stand in for the
//! host engine so the whole loop can run headless.

pub mod app;
pub mod components;
pub mod engine;
pub mod error;
pub mod scene;
pub mod systems;

pub use error::GrabError;
