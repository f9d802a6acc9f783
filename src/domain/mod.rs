//! Domain layer: entities, value objects, and repository contracts.

pub mod entities;
pub mod repositories;
pub mod value_objects;
