//! World region an entity currently stands in.
//!
//! A location is one map of the world (a farm, a town, a cave level). Path
//! finding is always scoped to a single location, so the follow controller
//! relocates its path finder whenever the leader's location differs.

use std::fmt;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Opaque handle of a world region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u32);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "location#{}", self.0)
    }
}

/// Location of an entity; `None` while it is between maps.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurrentLocation(pub Option<LocationId>);

impl CurrentLocation {
    pub fn new(location: LocationId) -> Self {
        Self(Some(location))
    }

    pub fn get(&self) -> Option<LocationId> {
        self.0
    }

    pub fn set(&mut self, location: Option<LocationId>) {
        self.0 = location;
    }
}
