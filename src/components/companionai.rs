//! Companion AI state machine component.
//!
//! A companion runs at most one controller at a time. `CompanionAi` owns the
//! follow controller and the [`ControllerSwitch`] handing out activation
//! tickets: engaging follow issues a fresh ticket, disengaging revokes it, so
//! the controller can tell on its own whether it is still the current one.

use bevy_ecs::prelude::{Component, Entity};
use log::info;

use crate::ai::context::FollowContext;
use crate::ai::followcontroller::FollowController;
use crate::ai::ticket::ControllerSwitch;

/// Which controller the companion is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompanionState {
    /// No controller; the companion stands still.
    #[default]
    Standby,
    Following,
}

/// Companion brain. Attach to the follower entity.
#[derive(Component, Debug)]
pub struct CompanionAi {
    follow: FollowController,
    switch: ControllerSwitch,
    state: CompanionState,
}

impl CompanionAi {
    pub fn new(follow: FollowController) -> Self {
        Self {
            follow,
            switch: ControllerSwitch::new(),
            state: CompanionState::Standby,
        }
    }

    pub fn state(&self) -> CompanionState {
        self.state
    }

    pub fn follow(&self) -> &FollowController {
        &self.follow
    }

    pub fn follow_mut(&mut self) -> &mut FollowController {
        &mut self.follow
    }

    /// Switch to the follow controller, activating it with a fresh ticket.
    pub fn engage_follow(&mut self, ctx: &mut FollowContext<'_>) {
        let ticket = self.switch.issue();
        info!(
            "Companion engages follow (leader {:?}, ticket {})",
            self.follow.leader(),
            ticket.serial()
        );
        self.follow.activate(ticket, ctx);
        self.state = CompanionState::Following;
    }

    /// Switch back to standby.
    pub fn disengage(&mut self) {
        if self.state == CompanionState::Standby {
            return;
        }
        info!("Companion disengages follow");
        self.follow.deactivate();
        self.switch.revoke();
        self.state = CompanionState::Standby;
    }

    /// Tick the running controller.
    pub fn update(&mut self, ctx: &mut FollowContext<'_>) {
        if self.state == CompanionState::Following {
            self.follow.update(ctx);
        }
    }

    /// Relay a location change to the follow controller.
    pub fn on_location_changed(&mut self, ctx: &mut FollowContext<'_>) {
        self.follow.on_location_changed(ctx);
    }

    pub fn leader(&self) -> Option<Entity> {
        self.follow.leader()
    }

    pub fn is_idle(&self) -> bool {
        self.follow.is_idle()
    }
}
