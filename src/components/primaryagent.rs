//! Primary controllable agent marker component.
//!
//! Entities with the [`PrimaryAgent`] component are driven by a local or
//! remote player. A companion following such an entity is allowed to
//! teleport next to it when it keeps getting stuck.

use bevy_ecs::prelude::Component;

/// Tag component used to mark player-controlled entities.
#[derive(Component, Clone, Debug)]
pub struct PrimaryAgent;
