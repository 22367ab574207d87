//! Follow tick integration tests.
//!
//! Run the follow system, the location change detector and the companion
//! observers on a bare `World`, with recording collaborators standing in for
//! the navigation layer.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::*;
use glam::IVec2;

use companion_follow::ai::collaborators::{
    JoystickEvent, JoystickEvents, MovementExecutor, PathFinder,
};
use companion_follow::ai::context::FollowerBody;
use companion_follow::ai::followcontroller::FollowController;
use companion_follow::components::boxcollider::BoxCollider;
use companion_follow::components::companionai::{CompanionAi, CompanionState};
use companion_follow::components::location::{CurrentLocation, LocationId};
use companion_follow::components::mapposition::MapPosition;
use companion_follow::components::movementspeed::MovementSpeed;
use companion_follow::components::primaryagent::PrimaryAgent;
use companion_follow::events::companion::{DisengageFollowEvent, EngageFollowEvent};
use companion_follow::events::register_observers;
use companion_follow::resources::followconfig::{FollowConfig, FollowTuning};
use companion_follow::resources::sessionrole::SessionRole;
use companion_follow::resources::simrng::SimRng;
use companion_follow::resources::worldtime::WorldTime;
use companion_follow::systems::follow::companion_follow_system;
use companion_follow::systems::location::detect_location_changes;
use companion_follow::systems::time::advance_tick;

const TILE: f32 = 64.0;

#[derive(Default)]
struct Log {
    speed: f32,
    target: Option<IVec2>,
    targets: Vec<IVec2>,
    updates: u32,
    resets: u32,
    rebinds: Vec<Entity>,
    relocations: Vec<LocationId>,
    report_stuck: bool,
}

struct RecordingJoystick(Arc<Mutex<Log>>);

impl MovementExecutor for RecordingJoystick {
    fn speed(&self) -> f32 {
        self.0.lock().unwrap().speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.0.lock().unwrap().speed = speed;
    }

    fn is_following(&self) -> bool {
        self.0.lock().unwrap().target.is_some()
    }

    fn update(&mut self, _tick: u64, _follower: &mut FollowerBody<'_>) -> JoystickEvents {
        let mut log = self.0.lock().unwrap();
        log.updates += 1;
        let mut events = JoystickEvents::new();
        if log.report_stuck {
            events.push(JoystickEvent::Stuck);
        }
        events
    }

    fn acquire_target(&mut self, tile: IVec2) {
        let mut log = self.0.lock().unwrap();
        log.target = Some(tile);
        log.targets.push(tile);
    }

    fn reset(&mut self) {
        let mut log = self.0.lock().unwrap();
        log.target = None;
        log.resets += 1;
    }

    fn reset_follower(&mut self, follower: &FollowerBody<'_>) {
        self.0.lock().unwrap().rebinds.push(follower.entity);
    }
}

struct RecordingPathFinder(Arc<Mutex<Log>>, Option<LocationId>);

impl PathFinder for RecordingPathFinder {
    fn current_location(&self) -> Option<LocationId> {
        self.1
    }

    fn set_current_location(&mut self, location: LocationId) {
        self.1 = Some(location);
        self.0.lock().unwrap().relocations.push(location);
    }
}

struct Setup {
    world: World,
    schedule: Schedule,
    leader: Entity,
    companion: Entity,
    log: Arc<Mutex<Log>>,
}

fn setup(role: SessionRole) -> Setup {
    let mut world = World::new();
    world.insert_resource(FollowConfig::new());
    world.insert_resource(role);
    world.insert_resource(WorldTime::default());
    world.insert_resource(SimRng::with_seed(5));
    register_observers(&mut world);

    let leader = world
        .spawn((
            MapPosition::from_tile(IVec2::new(10, 10), TILE),
            BoxCollider::new(TILE, TILE),
            CurrentLocation::new(LocationId(1)),
            MovementSpeed(5.0),
            PrimaryAgent,
        ))
        .id();

    let log = Arc::new(Mutex::new(Log::default()));
    let controller = FollowController::new(
        None,
        Box::new(RecordingPathFinder(log.clone(), Some(LocationId(1)))),
        Box::new(RecordingJoystick(log.clone())),
        FollowTuning::default(),
    );
    let companion = world
        .spawn((
            CompanionAi::new(controller),
            MapPosition::from_tile(IVec2::ZERO, TILE),
            BoxCollider::new(TILE, TILE),
            CurrentLocation::new(LocationId(1)),
        ))
        .id();

    let mut schedule = Schedule::default();
    schedule.add_systems((detect_location_changes, companion_follow_system, advance_tick).chain());

    Setup {
        world,
        schedule,
        leader,
        companion,
        log,
    }
}

impl Setup {
    fn engage(&mut self) {
        self.world.trigger(EngageFollowEvent {
            entity: self.companion,
            leader: self.leader,
        });
    }

    fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.schedule.run(&mut self.world);
        }
    }

    fn ai(&self) -> &CompanionAi {
        self.world.get::<CompanionAi>(self.companion).unwrap()
    }
}

#[test]
fn engage_event_activates_and_targets_leader() {
    let mut s = setup(SessionRole::single_player());
    s.engage();

    let ai = s.ai();
    assert_eq!(ai.state(), CompanionState::Following);
    assert_eq!(ai.leader(), Some(s.leader));
    assert!(ai.follow().is_active());
    let frames = ai.follow().idle_timer().frames();
    assert!((500..=800).contains(&frames));
    assert_eq!(s.log.lock().unwrap().targets, vec![IVec2::new(10, 10)]);
}

#[test]
fn standby_companion_is_not_ticked() {
    let mut s = setup(SessionRole::single_player());
    s.tick(20);
    assert_eq!(s.log.lock().unwrap().updates, 0);
}

#[test]
fn following_companion_counts_down_and_drives_speed() {
    let mut s = setup(SessionRole::single_player());
    s.engage();
    let start = s.ai().follow().idle_timer().frames();

    s.tick(10);

    assert_eq!(s.ai().follow().idle_timer().frames(), start - 10);
    let log = s.log.lock().unwrap();
    assert_eq!(log.updates, 10);
    // 10 tiles diagonal: far band, slow leader
    assert!((log.speed - 5.28).abs() < 1e-4);
}

#[test]
fn leader_moves_are_picked_up_on_replan_ticks() {
    let mut s = setup(SessionRole::single_player());
    s.engage();
    s.tick(1);

    s.world
        .get_mut::<MapPosition>(s.leader)
        .unwrap()
        .set_tile(IVec2::new(11, 10), TILE);
    s.tick(13);
    assert_eq!(s.log.lock().unwrap().targets.len(), 1);

    // tick 15 replans
    s.tick(2);
    assert_eq!(
        s.log.lock().unwrap().targets,
        vec![IVec2::new(10, 10), IVec2::new(11, 10)]
    );
}

#[test]
fn replica_keeps_idle_in_sync_without_moving() {
    let mut s = setup(SessionRole::replica());
    s.engage();
    let start = s.ai().follow().idle_timer().frames();
    assert!(start > 0);

    s.tick(30);

    assert_eq!(s.ai().follow().idle_timer().frames(), start - 30);
    let log = s.log.lock().unwrap();
    assert_eq!(log.updates, 0);
    assert!(log.targets.is_empty());
}

#[test]
fn busy_single_player_pauses_companion() {
    let mut s = setup(SessionRole::single_player());
    s.engage();
    let start = s.ai().follow().idle_timer().frames();
    *s.world.resource_mut::<SessionRole>() =
        SessionRole::single_player().with_local_player_free(false);

    s.tick(30);

    assert_eq!(s.ai().follow().idle_timer().frames(), start);
    assert_eq!(s.log.lock().unwrap().updates, 0);
}

#[test]
fn location_change_while_following_resets_and_relocates() {
    let mut s = setup(SessionRole::single_player());
    s.engage();
    s.tick(1);

    s.world
        .get_mut::<CurrentLocation>(s.leader)
        .unwrap()
        .0 = Some(LocationId(2));
    s.world
        .get_mut::<CurrentLocation>(s.companion)
        .unwrap()
        .0 = Some(LocationId(2));
    s.tick(1);

    let log = s.log.lock().unwrap();
    assert_eq!(log.resets, 1);
    assert_eq!(log.rebinds, vec![s.companion]);
    assert_eq!(log.relocations, vec![LocationId(2)]);
    // cache cleared: same leader tile is targeted again
    assert_eq!(log.targets, vec![IVec2::new(10, 10), IVec2::new(10, 10)]);
    drop(log);
    assert_eq!(s.ai().follow().retry_count(), 0);
}

#[test]
fn leader_location_change_resets_retries() {
    let mut s = setup(SessionRole::single_player());
    s.engage();
    s.log.lock().unwrap().report_stuck = true;
    s.tick(2);
    assert_eq!(s.ai().follow().retry_count(), 2);
    s.log.lock().unwrap().report_stuck = false;

    s.world
        .get_mut::<CurrentLocation>(s.leader)
        .unwrap()
        .0 = Some(LocationId(2));
    s.tick(1);

    assert_eq!(s.ai().follow().retry_count(), 0);
    let log = s.log.lock().unwrap();
    assert_eq!(log.resets, 1);
    assert_eq!(log.rebinds, vec![s.companion]);
    assert_eq!(log.relocations, vec![LocationId(2)]);
    drop(log);
    // the companion itself stays put
    assert_eq!(
        s.world.get::<CurrentLocation>(s.companion).unwrap().get(),
        Some(LocationId(1))
    );
}

#[test]
fn location_change_while_standby_is_ignored() {
    let mut s = setup(SessionRole::single_player());
    s.tick(1);

    s.world
        .get_mut::<CurrentLocation>(s.companion)
        .unwrap()
        .0 = Some(LocationId(2));
    s.tick(1);

    let log = s.log.lock().unwrap();
    assert_eq!(log.resets, 0);
    assert!(log.rebinds.is_empty());
    assert!(log.targets.is_empty());
}

#[test]
fn repeated_stuck_snaps_follower_to_leader() {
    let mut s = setup(SessionRole::single_player());
    s.engage();
    s.log.lock().unwrap().report_stuck = true;

    s.tick(2);
    assert_eq!(s.ai().follow().retry_count(), 2);
    assert_eq!(
        s.world.get::<MapPosition>(s.companion).unwrap().tile(TILE),
        IVec2::ZERO
    );

    s.tick(1);
    assert_eq!(s.ai().follow().retry_count(), 0);
    assert_eq!(
        s.world.get::<MapPosition>(s.companion).unwrap().tile(TILE),
        IVec2::new(10, 10)
    );
}

#[test]
fn stuck_behind_non_primary_leader_never_snaps() {
    let mut s = setup(SessionRole::single_player());
    s.world.entity_mut(s.leader).remove::<PrimaryAgent>();
    s.engage();
    s.log.lock().unwrap().report_stuck = true;

    s.tick(10);

    assert_eq!(s.ai().follow().retry_count(), 0);
    assert_eq!(
        s.world.get::<MapPosition>(s.companion).unwrap().tile(TILE),
        IVec2::ZERO
    );
}

#[test]
fn despawned_leader_skips_ticks() {
    let mut s = setup(SessionRole::single_player());
    s.engage();
    let start = s.ai().follow().idle_timer().frames();
    s.world.despawn(s.leader);

    s.tick(5);

    assert_eq!(s.ai().follow().idle_timer().frames(), start);
    assert_eq!(s.log.lock().unwrap().updates, 0);
}

#[test]
fn disengage_event_returns_to_standby() {
    let mut s = setup(SessionRole::single_player());
    s.engage();
    s.world.trigger(DisengageFollowEvent {
        entity: s.companion,
    });

    let ai = s.ai();
    assert_eq!(ai.state(), CompanionState::Standby);
    assert!(!ai.follow().is_active());
    assert!(ai.is_idle());
}
