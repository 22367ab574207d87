//! Follow controller.
//!
//! Drives a companion so that it trails its leader. Once per tick the
//! controller:
//!
//! 1. bails out if the leader or the follower is missing, or if the session
//!    does not allow acting,
//! 2. counts the idle timer down (on every replica),
//! 3. stops there unless this process is authoritative,
//! 4. adjusts the executor speed from the leader distance while following,
//! 5. lets the executor advance one frame and handles its notifications,
//! 6. every `replan_interval` ticks, re-targets the leader's tile if it moved.
//!
//! Stuck notifications are counted; after `max_retries` of them the follower
//! is placed directly on the leader's tile. A location change (relayed by the
//! owning state machine) resets the executor and the retry count and re-targets
//! immediately, but only while this controller holds a valid activation ticket.

use bevy_ecs::prelude::Entity;
use glam::{IVec2, Vec2};
use log::{debug, info};
use std::fmt;

use crate::ai::collaborators::{JoystickEvent, MovementExecutor, PathFinder, RandomRange};
use crate::ai::context::{FollowContext, FollowerBody, LeaderView};
use crate::ai::idletimer::IdleTimer;
use crate::ai::speedpolicy::speed_for_distance;
use crate::ai::ticket::ControllerTicket;
use crate::resources::followconfig::FollowTuning;

/// Controller keeping one follower behind one leader.
pub struct FollowController {
    leader: Option<Entity>,
    pathfinder: Box<dyn PathFinder>,
    joystick: Box<dyn MovementExecutor>,
    tuning: FollowTuning,
    ticket: Option<ControllerTicket>,
    idle_timer: IdleTimer,
    retry_count: u32,
    /// Leader tile seen by the last path check; `None` forces a re-target.
    leader_last_tile: Option<IVec2>,
}

impl fmt::Debug for FollowController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FollowController")
            .field("leader", &self.leader)
            .field("active", &self.is_active())
            .field("idle_timer", &self.idle_timer)
            .field("retry_count", &self.retry_count)
            .field("leader_last_tile", &self.leader_last_tile)
            .field("speed", &self.joystick.speed())
            .finish()
    }
}

impl FollowController {
    pub fn new(
        leader: Option<Entity>,
        pathfinder: Box<dyn PathFinder>,
        joystick: Box<dyn MovementExecutor>,
        tuning: FollowTuning,
    ) -> Self {
        Self {
            leader,
            pathfinder,
            joystick,
            tuning,
            ticket: None,
            idle_timer: IdleTimer::default(),
            retry_count: 0,
            leader_last_tile: None,
        }
    }

    pub fn leader(&self) -> Option<Entity> {
        self.leader
    }

    pub fn set_leader(&mut self, leader: Option<Entity>) {
        self.leader = leader;
    }

    pub fn tuning(&self) -> &FollowTuning {
        &self.tuning
    }

    pub fn pathfinder(&self) -> &dyn PathFinder {
        self.pathfinder.as_ref()
    }

    pub fn joystick(&self) -> &dyn MovementExecutor {
        self.joystick.as_ref()
    }

    pub fn idle_timer(&self) -> IdleTimer {
        self.idle_timer
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn leader_last_tile(&self) -> Option<IVec2> {
        self.leader_last_tile
    }

    /// True iff the idle timer reads exactly 0.
    pub fn is_idle(&self) -> bool {
        self.idle_timer.is_idle()
    }

    /// Whether this controller is the current one of its state machine.
    pub fn is_active(&self) -> bool {
        self.ticket.as_ref().is_some_and(ControllerTicket::is_valid)
    }

    /// Become the current controller.
    ///
    /// Re-targets the leader right away on the authoritative process and
    /// starts the idle countdown.
    pub fn activate(&mut self, ticket: ControllerTicket, ctx: &mut FollowContext<'_>) {
        self.ticket = Some(ticket);

        if ctx.leader.is_some() && ctx.role.authoritative {
            self.recheck_path(ctx.leader.as_ref());
        }

        let (low, high) = self.tuning.idle_on_activate;
        self.idle_timer.start(ctx.rng.range(low, high));
    }

    /// Stop being the current controller. Path and retry state are kept.
    pub fn deactivate(&mut self) {
        self.idle_timer.clear();
        self.ticket = None;
    }

    /// Run one simulation tick.
    pub fn update(&mut self, ctx: &mut FollowContext<'_>) {
        let Some(leader) = ctx.leader else {
            return;
        };
        if ctx.follower.is_none() || !ctx.role.can_act() {
            return;
        }

        self.idle_timer.tick();

        // movement decisions are single-writer
        if !ctx.role.authoritative {
            return;
        }

        let Some(follower) = ctx.follower.as_mut() else {
            return;
        };

        if self.joystick.is_following() {
            self.drive_speed(&leader, follower.center());
        }

        let events = self.joystick.update(ctx.tick, follower);
        for event in events {
            match event {
                JoystickEvent::Moved { is_last_frame } => self.on_move(is_last_frame, ctx.rng),
                JoystickEvent::Stuck => self.on_stuck(Some(&leader), ctx.follower.as_mut()),
            }
        }

        if ctx.tick % self.tuning.replan_interval.max(1) == 0 {
            self.recheck_path(Some(&leader));
        }
    }

    /// Set the executor speed from the distance between both bounding-box centers.
    pub fn drive_speed(&mut self, leader: &LeaderView, follower_center: Vec2) {
        let distance = leader.center.distance(follower_center);
        let speed = self.movement_speed_for_distance(distance, leader);
        self.joystick.set_speed(speed);
    }

    /// Speed for a given leader distance, see [`crate::ai::speedpolicy`].
    pub fn movement_speed_for_distance(&self, distance: f32, leader: &LeaderView) -> f32 {
        speed_for_distance(
            distance,
            leader.movement_speed,
            self.joystick.speed(),
            &self.tuning,
        )
    }

    /// Path re-acquisition check.
    ///
    /// Moves the path finder to the leader's location if needed and targets
    /// the leader's tile when it differs from the last one checked. Returns
    /// whether a new target was issued.
    pub fn recheck_path(&mut self, leader: Option<&LeaderView>) -> bool {
        let Some(leader) = leader else {
            return false;
        };
        let Some(location) = leader.location else {
            return false;
        };

        if self.pathfinder.current_location() != Some(location) {
            debug!(
                "Path finder moves from {:?} to {}",
                self.pathfinder.current_location(),
                location
            );
            self.pathfinder.set_current_location(location);
        }

        let retarget = self.leader_last_tile != Some(leader.tile);
        if retarget {
            debug!("Leader moved to {}, acquiring new target", leader.tile);
            self.joystick.acquire_target(leader.tile);
        }

        self.leader_last_tile = Some(leader.tile);
        retarget
    }

    /// Executor advanced the follower by one frame.
    pub fn on_move(&mut self, is_last_frame: bool, rng: &mut dyn RandomRange) {
        if is_last_frame {
            let (low, high) = self.tuning.idle_after_move;
            self.idle_timer.start(rng.range(low, high));
        } else {
            self.idle_timer.disable();
        }
    }

    /// Executor could not make progress.
    ///
    /// Only counted while following a primary agent; the follower snaps onto
    /// the leader's tile once the count reaches `max_retries`.
    pub fn on_stuck(&mut self, leader: Option<&LeaderView>, follower: Option<&mut FollowerBody<'_>>) {
        let Some(leader) = leader.filter(|leader| leader.is_primary) else {
            return;
        };

        self.retry_count += 1;
        if self.retry_count < self.tuning.max_retries {
            return;
        }

        if let Some(follower) = follower {
            info!(
                "Follower {:?} stuck {} times, snapping to leader tile {}",
                follower.entity, self.retry_count, leader.tile
            );
            follower.position.set_tile(leader.tile, self.tuning.tile_size);
        }
        self.retry_count = 0;
    }

    /// Leader or follower changed location. No-op unless active.
    pub fn on_location_changed(&mut self, ctx: &mut FollowContext<'_>) {
        if !self.is_active() {
            return;
        }

        if let Some(follower) = ctx.follower.as_ref() {
            self.joystick.reset_follower(follower);
        }

        self.leader_last_tile = None;
        self.joystick.reset();
        self.recheck_path(ctx.leader.as_ref());
        self.retry_count = 0;
    }
}
