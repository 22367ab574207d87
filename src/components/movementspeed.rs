//! Walking speed exposed by an agent.
//!
//! Only agents that publish a speed (the player characters) carry this
//! component; the follow controller falls back to fixed speeds otherwise.

use bevy_ecs::prelude::Component;

/// Movement speed in world units per frame.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MovementSpeed(pub f32);
