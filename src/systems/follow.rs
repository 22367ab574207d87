//! Companion follow system.
//!
//! Resolves each companion's leader and body into a
//! [`FollowContext`](crate::ai::context::FollowContext) and ticks its
//! [`CompanionAi`]. Leaders are looked up by entity each tick; a despawned or
//! incomplete leader simply yields no leader view and the controller skips
//! its work.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;

use crate::ai::context::{FollowContext, FollowerBody, LeaderView};
use crate::components::boxcollider::BoxCollider;
use crate::components::companionai::CompanionAi;
use crate::components::location::CurrentLocation;
use crate::components::mapposition::MapPosition;
use crate::components::movementspeed::MovementSpeed;
use crate::components::primaryagent::PrimaryAgent;
use crate::resources::followconfig::FollowConfig;
use crate::resources::sessionrole::SessionRole;
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;

/// Leader components read to build a [`LeaderView`].
pub type LeaderData = (
    &'static MapPosition,
    &'static BoxCollider,
    Option<&'static CurrentLocation>,
    Option<&'static MovementSpeed>,
    Has<PrimaryAgent>,
);

/// Shared inputs of every controller call.
#[derive(SystemParam)]
pub struct FollowParams<'w, 's> {
    leaders: Query<'w, 's, LeaderData, Without<CompanionAi>>,
    config: Res<'w, FollowConfig>,
    role: Res<'w, SessionRole>,
    time: Res<'w, WorldTime>,
    rng: ResMut<'w, SimRng>,
}

impl FollowParams<'_, '_> {
    /// Snapshot the leader, if it exists and has a body.
    pub fn resolve_leader(&self, leader: Option<Entity>) -> Option<LeaderView> {
        let leader = leader?;
        match self.leaders.get(leader) {
            Ok((position, collider, location, speed, is_primary)) => Some(LeaderView::from_parts(
                position,
                collider,
                location,
                speed,
                is_primary,
                self.config.tuning.tile_size,
            )),
            Err(_) => {
                log::debug!("Leader {:?} not found or incomplete", leader);
                None
            }
        }
    }

    /// Build the context for one controller call.
    pub fn context<'a>(
        &'a mut self,
        leader: Option<Entity>,
        follower: Option<FollowerBody<'a>>,
    ) -> FollowContext<'a> {
        FollowContext {
            leader: self.resolve_leader(leader),
            follower,
            role: *self.role,
            tick: self.time.frame_count,
            rng: &mut *self.rng,
        }
    }
}

/// Tick every companion's AI once.
pub fn companion_follow_system(
    mut companions: Query<(
        Entity,
        &mut CompanionAi,
        Option<&mut MapPosition>,
        Option<&BoxCollider>,
    )>,
    mut params: FollowParams,
) {
    for (entity, mut ai, position, collider) in companions.iter_mut() {
        let follower = match (position, collider) {
            (Some(position), Some(collider)) => Some(FollowerBody {
                entity,
                position: position.into_inner(),
                collider,
            }),
            _ => None,
        };
        let leader = ai.leader();
        let mut ctx = params.context(leader, follower);
        ai.update(&mut ctx);
    }
}
