use hecs::Entity;
use thiserror::Error;

/// Errors surfaced while wiring hands into a world.
///
/// Grab operations themselves never fail; everything here is a setup problem.
#[derive(Debug, Error)]
pub enum GrabError {
    #[error("entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(Entity),
}
