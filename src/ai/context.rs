//! Per-call view of the world handed to a follow controller.
//!
//! The controller keeps only an [`Entity`] handle to its leader; each tick the
//! caller resolves that handle (and the follower) into the structures below.
//! Either side may be missing, in which case the controller skips its work.

use bevy_ecs::prelude::Entity;
use glam::{IVec2, Vec2};

use crate::ai::collaborators::RandomRange;
use crate::components::boxcollider::BoxCollider;
use crate::components::location::{CurrentLocation, LocationId};
use crate::components::mapposition::MapPosition;
use crate::components::movementspeed::MovementSpeed;
use crate::resources::sessionrole::SessionRole;

/// Snapshot of the leader taken at the start of a call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderView {
    pub tile: IVec2,
    /// Center of the leader's bounding box.
    pub center: Vec2,
    pub location: Option<LocationId>,
    /// Speed published by the leader, if it publishes one.
    pub movement_speed: Option<f32>,
    /// The leader is a player-controlled agent.
    pub is_primary: bool,
}

impl LeaderView {
    pub fn from_parts(
        position: &MapPosition,
        collider: &BoxCollider,
        location: Option<&CurrentLocation>,
        speed: Option<&MovementSpeed>,
        is_primary: bool,
        tile_size: f32,
    ) -> Self {
        Self {
            tile: position.tile(tile_size),
            center: collider.center(position.pos),
            location: location.and_then(CurrentLocation::get),
            movement_speed: speed.map(|s| s.0),
            is_primary,
        }
    }
}

/// Mutable access to the follower for the duration of a call.
#[derive(Debug)]
pub struct FollowerBody<'a> {
    pub entity: Entity,
    pub position: &'a mut MapPosition,
    pub collider: &'a BoxCollider,
}

impl FollowerBody<'_> {
    pub fn center(&self) -> Vec2 {
        self.collider.center(self.position.pos)
    }

    pub fn tile(&self, tile_size: f32) -> IVec2 {
        self.position.tile(tile_size)
    }
}

/// Everything a controller needs for one update or one notification.
pub struct FollowContext<'a> {
    pub leader: Option<LeaderView>,
    pub follower: Option<FollowerBody<'a>>,
    pub role: SessionRole,
    /// Host tick number.
    pub tick: u64,
    pub rng: &'a mut dyn RandomRange,
}
