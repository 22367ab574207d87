//! Straight-line movement executor.
//!
//! [`StraightJoystick`] ignores obstacles: it walks the follower's pivot in a
//! straight line toward the top-left corner of the target tile, `speed` world
//! units per frame. It is enough to drive the follow controller without a
//! navigation mesh, and it exposes a `blocked` switch so tests can provoke
//! stuck notifications.

use bevy_ecs::prelude::Entity;
use glam::IVec2;

use crate::ai::collaborators::{JoystickEvent, JoystickEvents, MovementExecutor};
use crate::ai::context::FollowerBody;

/// Consecutive frames without progress before a stuck notification.
pub const DEFAULT_STUCK_FRAMES: u32 = 30;

#[derive(Debug, Clone)]
pub struct StraightJoystick {
    tile_size: f32,
    speed: f32,
    target: Option<IVec2>,
    follower: Option<Entity>,
    blocked: bool,
    stuck_frames: u32,
    stalled: u32,
}

impl StraightJoystick {
    pub fn new(tile_size: f32) -> Self {
        Self {
            tile_size,
            speed: 0.0,
            target: None,
            follower: None,
            blocked: false,
            stuck_frames: DEFAULT_STUCK_FRAMES,
            stalled: 0,
        }
    }

    pub fn with_stuck_frames(mut self, frames: u32) -> Self {
        self.stuck_frames = frames.max(1);
        self
    }

    /// Pretend an obstacle stands in the way.
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub fn target(&self) -> Option<IVec2> {
        self.target
    }

    /// Follower bound by the last `reset_follower` call.
    pub fn follower(&self) -> Option<Entity> {
        self.follower
    }
}

impl MovementExecutor for StraightJoystick {
    fn speed(&self) -> f32 {
        self.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn is_following(&self) -> bool {
        self.target.is_some()
    }

    fn update(&mut self, _tick: u64, follower: &mut FollowerBody<'_>) -> JoystickEvents {
        let mut events = JoystickEvents::new();
        let Some(target) = self.target else {
            return events;
        };

        // speed <= 0 means the policy wants us stopped
        if self.speed <= 0.0 {
            self.target = None;
            self.stalled = 0;
            events.push(JoystickEvent::Moved { is_last_frame: true });
            return events;
        }

        if self.blocked {
            self.stalled += 1;
            if self.stalled >= self.stuck_frames {
                self.stalled = 0;
                events.push(JoystickEvent::Stuck);
            }
            return events;
        }
        self.stalled = 0;

        let goal = target.as_vec2() * self.tile_size;
        let delta = goal - follower.position.pos;
        let distance = delta.length();
        if distance <= self.speed {
            follower.position.pos = goal;
            self.target = None;
            events.push(JoystickEvent::Moved { is_last_frame: true });
        } else {
            follower.position.pos += delta / distance * self.speed;
            events.push(JoystickEvent::Moved {
                is_last_frame: false,
            });
        }
        events
    }

    fn acquire_target(&mut self, tile: IVec2) {
        self.target = Some(tile);
        self.stalled = 0;
    }

    fn reset(&mut self) {
        self.target = None;
        self.stalled = 0;
    }

    fn reset_follower(&mut self, follower: &FollowerBody<'_>) {
        self.follower = Some(follower.entity);
    }
}
