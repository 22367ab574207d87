//! Location change detection.
//!
//! Leaders and companions are warped between locations by whatever moves
//! them (a door, a cutscene, the scenario script). Rather than each mover
//! notifying the AI, this system watches [`CurrentLocation`] and triggers one
//! [`LocationChangedEvent`] for every companion whose own location or whose
//! leader's location changed since the previous run, even if both changed in
//! the same frame. Insertion is not a change.

use bevy_ecs::prelude::*;

use crate::components::companionai::CompanionAi;
use crate::components::location::CurrentLocation;
use crate::events::locationchanged::LocationChangedEvent;

fn moved(location: &Ref<CurrentLocation>) -> bool {
    location.is_changed() && !location.is_added()
}

pub fn detect_location_changes(
    mut commands: Commands,
    companions: Query<(Entity, &CompanionAi, Option<Ref<CurrentLocation>>)>,
    leaders: Query<Ref<CurrentLocation>, Without<CompanionAi>>,
) {
    for (entity, ai, location) in companions.iter() {
        let own = location.as_ref().is_some_and(moved);
        let leader = ai
            .leader()
            .and_then(|leader| leaders.get(leader).ok())
            .is_some_and(|location| moved(&location));
        if !own && !leader {
            continue;
        }
        log::debug!(
            "Location change for companion {:?} (own: {}, leader: {})",
            entity,
            own,
            leader
        );
        commands.trigger(LocationChangedEvent { entity });
    }
}
