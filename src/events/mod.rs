//! Event types and observers.
//!
//! Submodules:
//! - [`companion`] – engage/disengage requests for a companion's follow mode
//! - [`locationchanged`] – companion or leader location changes relayed to the follow controller
//!
//! Register the observers with [`register_observers`] (or individually as
//! `Observer`s) before triggering any of these events.
use bevy_ecs::prelude::*;

pub mod companion;
pub mod locationchanged;

/// Spawn the global observers of this module.
pub fn register_observers(world: &mut World) {
    world.spawn(Observer::new(companion::observe_engage_follow));
    world.spawn(Observer::new(companion::observe_disengage_follow));
    world.spawn(Observer::new(locationchanged::observe_location_changed));
}
