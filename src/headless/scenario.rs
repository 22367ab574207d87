//! Scripted follow scenario.
//!
//! Spawns a leader walking a list of [`Waypoint`]s and one companion set up
//! to follow it, and assembles the schedule that runs them. A
//! [`Waypoint::Warp`] moves the leader and its companions to another
//! location in a single frame, which exercises the location change path of
//! the follow controller.

use std::collections::VecDeque;

use bevy_ecs::prelude::*;
use glam::IVec2;
use serde::Serialize;

use crate::ai::followcontroller::FollowController;
use crate::components::boxcollider::BoxCollider;
use crate::components::companionai::CompanionAi;
use crate::components::location::{CurrentLocation, LocationId};
use crate::components::mapposition::MapPosition;
use crate::components::movementspeed::MovementSpeed;
use crate::components::primaryagent::PrimaryAgent;
use crate::events::register_observers;
use crate::headless::joystick::StraightJoystick;
use crate::headless::pathfinder::RegionPathFinder;
use crate::resources::followconfig::FollowConfig;
use crate::resources::sessionrole::SessionRole;
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;
use crate::systems::follow::companion_follow_system;
use crate::systems::location::detect_location_changes;
use crate::systems::time::{advance_tick, update_world_time};

/// Walking speed of the scripted leader, world units per frame.
pub const LEADER_SPEED: f32 = 4.0;

/// One step of a scripted route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waypoint {
    /// Walk to the top-left corner of a tile.
    Walk(IVec2),
    /// Stand still for a number of frames.
    Wait(u32),
    /// Jump to a tile of another location, companions included.
    Warp { location: LocationId, tile: IVec2 },
}

/// Route followed by a leader entity.
#[derive(Component, Debug, Clone, Default)]
pub struct ScriptedWalk {
    pub waypoints: VecDeque<Waypoint>,
}

impl ScriptedWalk {
    pub fn new(waypoints: impl IntoIterator<Item = Waypoint>) -> Self {
        Self {
            waypoints: waypoints.into_iter().collect(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Entities spawned by [`spawn_scenario`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioEntities {
    pub leader: Entity,
    pub companion: Entity,
}

/// Route used by the demo binary: a walk, a pause, a warp and a walk back.
pub fn default_route() -> Vec<Waypoint> {
    vec![
        Waypoint::Walk(IVec2::new(12, 0)),
        Waypoint::Walk(IVec2::new(12, 6)),
        Waypoint::Wait(120),
        Waypoint::Warp {
            location: LocationId(2),
            tile: IVec2::new(3, 3),
        },
        Waypoint::Walk(IVec2::new(3, 10)),
        Waypoint::Wait(60),
    ]
}

/// Advance scripted leaders by one frame.
pub fn leader_walk_system(
    mut leaders: Query<
        (
            Entity,
            &mut ScriptedWalk,
            &mut MapPosition,
            &mut CurrentLocation,
            Option<&MovementSpeed>,
        ),
        Without<CompanionAi>,
    >,
    mut companions: Query<(&CompanionAi, &mut MapPosition, &mut CurrentLocation)>,
    config: Res<FollowConfig>,
) {
    let tile_size = config.tuning.tile_size;
    for (entity, mut walk, mut position, mut location, speed) in leaders.iter_mut() {
        let Some(waypoint) = walk.waypoints.front_mut() else {
            continue;
        };
        let done = match waypoint {
            Waypoint::Walk(tile) => {
                let goal = tile.as_vec2() * tile_size;
                let delta = goal - position.pos;
                let step = speed.map_or(LEADER_SPEED, |s| s.0);
                if delta.length() <= step {
                    position.pos = goal;
                    true
                } else {
                    position.pos += delta.normalize() * step;
                    false
                }
            }
            Waypoint::Wait(frames) => {
                *frames = frames.saturating_sub(1);
                *frames == 0
            }
            Waypoint::Warp {
                location: target,
                tile,
            } => {
                log::info!("Leader {:?} warps to {} at {}", entity, target, tile);
                location.set_if_neq(CurrentLocation::new(*target));
                position.set_tile(*tile, tile_size);
                for (ai, mut companion_pos, mut companion_location) in companions.iter_mut() {
                    if ai.leader() == Some(entity) {
                        companion_location.set_if_neq(CurrentLocation::new(*target));
                        companion_pos.set_tile(*tile + IVec2::X, tile_size);
                    }
                }
                true
            }
        };
        if done {
            walk.waypoints.pop_front();
        }
    }
}

/// Spawn a primary leader on `route` and a standby companion next to it.
///
/// The companion's follow controller already points at the leader; trigger
/// [`crate::events::companion::EngageFollowEvent`] to start following.
pub fn spawn_scenario(world: &mut World, route: Vec<Waypoint>) -> ScenarioEntities {
    let tuning = world
        .get_resource::<FollowConfig>()
        .map(|config| config.tuning)
        .unwrap_or_default();
    let ts = tuning.tile_size;
    let start = LocationId(1);

    let leader = world
        .spawn((
            MapPosition::from_tile(IVec2::new(2, 0), ts),
            BoxCollider::new(ts, ts),
            CurrentLocation::new(start),
            MovementSpeed(LEADER_SPEED),
            PrimaryAgent,
            ScriptedWalk::new(route),
        ))
        .id();

    let companion = spawn_companion(
        world,
        leader,
        StraightJoystick::new(ts),
        start,
        IVec2::ZERO,
    );

    ScenarioEntities { leader, companion }
}

/// Spawn a standby companion of `leader` driven by `joystick`.
pub fn spawn_companion(
    world: &mut World,
    leader: Entity,
    joystick: StraightJoystick,
    location: LocationId,
    tile: IVec2,
) -> Entity {
    let tuning = world
        .get_resource::<FollowConfig>()
        .map(|config| config.tuning)
        .unwrap_or_default();
    let ts = tuning.tile_size;
    let controller = FollowController::new(
        Some(leader),
        Box::new(RegionPathFinder::new(Some(location))),
        Box::new(joystick),
        tuning,
    );
    world
        .spawn((
            CompanionAi::new(controller),
            MapPosition::from_tile(tile, ts),
            BoxCollider::new(ts, ts),
            CurrentLocation::new(location),
        ))
        .id()
}

/// World with resources and observers but no entities.
pub fn empty_world(config: FollowConfig, role: SessionRole, seed: Option<u64>) -> World {
    let mut world = World::new();
    world.insert_resource(config);
    world.insert_resource(role);
    world.insert_resource(WorldTime::default());
    world.insert_resource(seed.map_or_else(SimRng::default, SimRng::with_seed));
    register_observers(&mut world);
    world
}

/// World with resources, observers and the default scenario.
pub fn build_world(
    config: FollowConfig,
    role: SessionRole,
    seed: Option<u64>,
) -> (World, ScenarioEntities) {
    let mut world = empty_world(config, role, seed);
    let entities = spawn_scenario(&mut world, default_route());
    (world, entities)
}

/// Per-tick schedule: leaders move, location changes are relayed, companions
/// follow, the tick counter advances.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            leader_walk_system,
            detect_location_changes,
            companion_follow_system,
            advance_tick,
        )
            .chain(),
    );
    schedule
}

/// Run one frame of `dt` seconds.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Snapshot of the scenario after a tick, written as a JSON trace line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub leader_tile: [i32; 2],
    pub follower_tile: [i32; 2],
    pub leader_location: Option<LocationId>,
    pub follower_location: Option<LocationId>,
    /// Location the companion's path finder is bound to.
    pub path_location: Option<LocationId>,
    pub distance: f32,
    pub speed: f32,
    pub idle: bool,
    pub idle_frames: i32,
    pub retries: u32,
}

impl TickReport {
    /// Capture the report for `tick`, or `None` if an entity is gone.
    pub fn capture(world: &World, entities: ScenarioEntities, tick: u64) -> Option<Self> {
        let ai = world.get::<CompanionAi>(entities.companion)?;
        let tile_size = ai.follow().tuning().tile_size;
        let leader_pos = world.get::<MapPosition>(entities.leader)?;
        let leader_box = world.get::<BoxCollider>(entities.leader)?;
        let follower_pos = world.get::<MapPosition>(entities.companion)?;
        let follower_box = world.get::<BoxCollider>(entities.companion)?;

        let leader_tile = leader_pos.tile(tile_size);
        let follower_tile = follower_pos.tile(tile_size);
        let distance = leader_box
            .center(leader_pos.pos)
            .distance(follower_box.center(follower_pos.pos));

        Some(Self {
            tick,
            leader_tile: leader_tile.to_array(),
            follower_tile: follower_tile.to_array(),
            leader_location: world
                .get::<CurrentLocation>(entities.leader)
                .and_then(CurrentLocation::get),
            follower_location: world
                .get::<CurrentLocation>(entities.companion)
                .and_then(CurrentLocation::get),
            path_location: ai.follow().pathfinder().current_location(),
            distance,
            speed: ai.follow().joystick().speed(),
            idle: ai.is_idle(),
            idle_frames: ai.follow().idle_timer().frames(),
            retries: ai.follow().retry_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::observer::On;

    use crate::events::companion::EngageFollowEvent;
    use crate::events::locationchanged::LocationChangedEvent;

    #[derive(Resource, Default)]
    struct LocationChanges(u32);

    fn count_location_changes(
        _trigger: On<LocationChangedEvent>,
        mut changes: ResMut<LocationChanges>,
    ) {
        changes.0 += 1;
    }

    /// Warp the leader to `location` after a short wait and count the
    /// location change events it produced.
    fn warp_location_changes(location: LocationId) -> u32 {
        let mut world = empty_world(FollowConfig::new(), SessionRole::single_player(), Some(1));
        world.init_resource::<LocationChanges>();
        world.spawn(Observer::new(count_location_changes));
        let entities = spawn_scenario(
            &mut world,
            vec![
                Waypoint::Wait(2),
                Waypoint::Warp {
                    location,
                    tile: IVec2::new(5, 0),
                },
            ],
        );
        world.trigger(EngageFollowEvent {
            entity: entities.companion,
            leader: entities.leader,
        });
        let mut schedule = build_schedule();
        for _ in 0..5 {
            step(&mut world, &mut schedule, 1.0 / 60.0);
        }

        assert!(world.get::<ScriptedWalk>(entities.leader).unwrap().is_finished());
        let report = TickReport::capture(&world, entities, 5).unwrap();
        assert_eq!(report.leader_tile, [5, 0]);
        assert_eq!(report.follower_tile, [6, 0]);
        world.resource::<LocationChanges>().0
    }

    #[test]
    fn test_warp_within_location_is_not_a_location_change() {
        assert_eq!(warp_location_changes(LocationId(1)), 0);
    }

    #[test]
    fn test_warp_to_other_location_changes_location_once() {
        assert_eq!(warp_location_changes(LocationId(2)), 1);
    }

    #[test]
    fn test_wait_pops_after_frames() {
        let mut world = World::new();
        world.insert_resource(FollowConfig::new());
        let leader = world
            .spawn((
                MapPosition::new(0.0, 0.0),
                CurrentLocation::new(LocationId(1)),
                ScriptedWalk::new([Waypoint::Wait(3)]),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(leader_walk_system);
        for _ in 0..2 {
            schedule.run(&mut world);
        }
        assert!(!world.get::<ScriptedWalk>(leader).unwrap().is_finished());
        schedule.run(&mut world);
        assert!(world.get::<ScriptedWalk>(leader).unwrap().is_finished());
    }

    #[test]
    fn test_walk_reaches_tile() {
        let mut world = World::new();
        world.insert_resource(FollowConfig::new());
        let leader = world
            .spawn((
                MapPosition::new(0.0, 0.0),
                CurrentLocation::new(LocationId(1)),
                MovementSpeed(16.0),
                ScriptedWalk::new([Waypoint::Walk(IVec2::new(1, 0))]),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(leader_walk_system);
        for _ in 0..4 {
            schedule.run(&mut world);
        }
        let pos = world.get::<MapPosition>(leader).unwrap();
        assert_eq!(pos.tile(64.0), IVec2::new(1, 0));
        assert!(world.get::<ScriptedWalk>(leader).unwrap().is_finished());
    }

    #[test]
    fn test_build_world_spawns_standby_companion() {
        let (world, entities) = build_world(FollowConfig::new(), SessionRole::default(), Some(1));
        let ai = world.get::<CompanionAi>(entities.companion).unwrap();
        assert_eq!(ai.leader(), Some(entities.leader));
        assert!(!ai.follow().is_active());
        let report = TickReport::capture(&world, entities, 0).unwrap();
        assert_eq!(report.leader_tile, [2, 0]);
        assert_eq!(report.follower_tile, [0, 0]);
        assert_eq!(report.retries, 0);
    }
}
