//! Location change notifications.
//!
//! [`crate::systems::location::detect_location_changes`] triggers a
//! [`LocationChangedEvent`] when a companion or its leader changes location. The
//! [`observe_location_changed`] observer relays it to the companion's follow
//! controller, which resets its executor and re-targets the leader right away
//! if it is the active controller.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::ai::context::FollowerBody;
use crate::components::boxcollider::BoxCollider;
use crate::components::companionai::CompanionAi;
use crate::components::mapposition::MapPosition;
use crate::systems::follow::FollowParams;

/// Event fired when a companion or its leader entered another location.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationChangedEvent {
    /// The companion that changed location.
    pub entity: Entity,
}

/// Global observer forwarding location changes to [`CompanionAi`].
pub fn observe_location_changed(
    trigger: On<LocationChangedEvent>,
    mut companions: Query<(&mut CompanionAi, Option<&mut MapPosition>, Option<&BoxCollider>)>,
    mut params: FollowParams,
) {
    let entity = trigger.event().entity;
    let Ok((mut ai, position, collider)) = companions.get_mut(entity) else {
        log::warn!("Location change for {:?} which has no CompanionAi", entity);
        return;
    };

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
    ai.on_location_changed(&mut ctx);
}
