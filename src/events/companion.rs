//! Companion mode switches.
//!
//! Whatever decides that a companion should start or stop following (a
//! dialogue choice, a quest step, the demo binary) triggers one of these
//! events instead of touching [`CompanionAi`] directly.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::ai::context::FollowerBody;
use crate::components::boxcollider::BoxCollider;
use crate::components::companionai::CompanionAi;
use crate::components::mapposition::MapPosition;
use crate::systems::follow::FollowParams;

/// Make a companion follow `leader`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngageFollowEvent {
    pub entity: Entity,
    pub leader: Entity,
}

/// Put a companion back on standby.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisengageFollowEvent {
    pub entity: Entity,
}

pub fn observe_engage_follow(
    trigger: On<EngageFollowEvent>,
    mut companions: Query<(&mut CompanionAi, Option<&mut MapPosition>, Option<&BoxCollider>)>,
    mut params: FollowParams,
) {
    let EngageFollowEvent { entity, leader } = *trigger.event();
    let Ok((mut ai, position, collider)) = companions.get_mut(entity) else {
        log::warn!("Cannot engage follow on {:?}: no CompanionAi", entity);
        return;
    };

    ai.follow_mut().set_leader(Some(leader));
    let follower = match (position, collider) {
        (Some(position), Some(collider)) => Some(FollowerBody {
            entity,
            position: position.into_inner(),
            collider,
        }),
        _ => None,
    };
    let mut ctx = params.context(Some(leader), follower);
    ai.engage_follow(&mut ctx);
}

pub fn observe_disengage_follow(
    trigger: On<DisengageFollowEvent>,
    mut companions: Query<&mut CompanionAi>,
) {
    let entity = trigger.event().entity;
    match companions.get_mut(entity) {
        Ok(mut ai) => ai.disengage(),
        Err(_) => log::warn!("Cannot disengage {:?}: no CompanionAi", entity),
    }
}
