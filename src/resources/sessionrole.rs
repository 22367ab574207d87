//! Role of the local process in the current session.
//!
//! In a multiplayer session every process runs the follow controllers of all
//! companions, but only the authoritative one (the host) makes movement
//! decisions. Replicas only keep their idle countdown in sync so that idle
//! animations look the same everywhere.

use bevy_ecs::prelude::Resource;

/// Process role queried by the follow controller each tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRole {
    /// The local player is not locked in a menu, cutscene or dialogue.
    pub local_player_free: bool,
    /// More than one process takes part in the session.
    pub multiplayer: bool,
    /// This process owns the shared simulation state.
    pub authoritative: bool,
}

impl Default for SessionRole {
    fn default() -> Self {
        Self::single_player()
    }
}

impl SessionRole {
    /// Offline game: free to act and authoritative.
    pub fn single_player() -> Self {
        Self {
            local_player_free: true,
            multiplayer: false,
            authoritative: true,
        }
    }

    /// Host of a multiplayer session.
    pub fn host() -> Self {
        Self {
            local_player_free: true,
            multiplayer: true,
            authoritative: true,
        }
    }

    /// Non-authoritative participant of a multiplayer session.
    pub fn replica() -> Self {
        Self {
            local_player_free: true,
            multiplayer: true,
            authoritative: false,
        }
    }

    /// Return a copy with the local player's freedom changed.
    pub fn with_local_player_free(mut self, free: bool) -> Self {
        self.local_player_free = free;
        self
    }

    /// Whether controllers should tick at all.
    ///
    /// A single player game pauses companions while the player is busy; a
    /// multiplayer session cannot pause.
    pub fn can_act(&self) -> bool {
        self.local_player_free || self.multiplayer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_player_busy_cannot_act() {
        let role = SessionRole::single_player().with_local_player_free(false);
        assert!(!role.can_act());
    }

    #[test]
    fn test_multiplayer_busy_still_acts() {
        let role = SessionRole::replica().with_local_player_free(false);
        assert!(role.can_act());
        assert!(!role.authoritative);
    }
}
