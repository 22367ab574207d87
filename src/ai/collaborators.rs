//! Interfaces of the collaborators a follow controller is composed with.
//!
//! The controller does not plan paths nor move the follower itself. It relies
//! on:
//! - a [`PathFinder`] that knows which location paths are computed in,
//! - a [`MovementExecutor`] (the "joystick") that walks the follower toward a
//!   target tile frame by frame and reports back through [`JoystickEvent`]s,
//! - a [`RandomRange`] source for idle durations.
//!
//! Notifications are returned from [`MovementExecutor::update`] instead of
//! being pushed through callbacks, so the controller dispatches them to its
//! handlers synchronously, in emission order, before its own update returns.

use glam::IVec2;
use smallvec::SmallVec;

use crate::ai::context::FollowerBody;
use crate::components::location::LocationId;

/// Notification raised by a movement executor during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickEvent {
    /// The follower advanced; `is_last_frame` marks the end of a segment.
    Moved { is_last_frame: bool },
    /// The follower failed to make progress toward its target.
    Stuck,
}

/// Notifications raised during a single executor frame.
pub type JoystickEvents = SmallVec<[JoystickEvent; 2]>;

/// Holds the grid context paths are computed in.
pub trait PathFinder: Send + Sync {
    fn current_location(&self) -> Option<LocationId>;

    /// Rebind to another location. This does not compute a route.
    fn set_current_location(&mut self, location: LocationId);
}

/// Executes movement toward an acquired target tile.
pub trait MovementExecutor: Send + Sync {
    /// Current speed in world units per frame.
    fn speed(&self) -> f32;

    fn set_speed(&mut self, speed: f32);

    /// True while the executor has a target it is walking toward.
    fn is_following(&self) -> bool;

    /// Advance the follower by one frame.
    fn update(&mut self, tick: u64, follower: &mut FollowerBody<'_>) -> JoystickEvents;

    /// Start walking toward `tile`, replacing any previous target.
    fn acquire_target(&mut self, tile: IVec2);

    /// Drop the current target and any internal progress state.
    fn reset(&mut self);

    /// Bind to a follower that may have been respawned or relocated.
    fn reset_follower(&mut self, follower: &FollowerBody<'_>);
}

/// Source of uniformly distributed integers.
pub trait RandomRange {
    /// Draw from `[low, high)`. Returns `low` when the range is empty.
    fn range(&mut self, low: u32, high: u32) -> u32;
}
